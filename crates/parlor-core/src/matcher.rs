//! Rendezvous matcher: pairs offered endpoints, or falls back to the bot
//! after the wait window.

use crate::bot::Bot;
use crate::config::{BotConfig, MatchConfig};
use crate::endpoint::Endpoint;
use crate::relay::relay;
use parlor_markov::Chain;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{oneshot, Mutex};
use tracing::{debug, info};

const WAITING_NOTICE: &str = "Waiting for a partner...";
const PAIRED_NOTICE: &str = "Found one! Say hi.\n";

/// An endpoint parked in the rendezvous slot.
struct Waiting {
    id: u64,
    endpoint: Endpoint,
    claimed_tx: oneshot::Sender<()>,
}

/// Single-slot rendezvous point. At most one endpoint waits at a time;
/// the next offer claims it atomically, or the wait window expires and a
/// fresh bot steps in as the partner.
pub struct Matcher {
    slot: Mutex<Option<Waiting>>,
    next_id: AtomicU64,
    config: MatchConfig,
    bot_config: BotConfig,
    chain: Arc<Chain>,
}

impl Matcher {
    pub fn new(chain: Arc<Chain>, config: MatchConfig, bot_config: BotConfig) -> Self {
        Self {
            slot: Mutex::new(None),
            next_id: AtomicU64::new(0),
            config,
            bot_config,
            chain,
        }
    }

    /// Offer an endpoint for pairing. Exactly one of three outcomes
    /// happens: claim the current occupant, become the occupant, or time
    /// out into a bot session. The future resolves when this endpoint's
    /// session is over, or immediately after another offer has taken
    /// responsibility for it.
    pub async fn offer(&self, mut endpoint: Endpoint) {
        if let Err(e) = endpoint.notify(WAITING_NOTICE).await {
            debug!("waiting notice failed: {}", e);
        }

        let (claimed_tx, claimed_rx) = oneshot::channel();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        {
            let mut slot = self.slot.lock().await;
            if let Some(waiting) = slot.take() {
                drop(slot);
                let _ = waiting.claimed_tx.send(());
                info!("paired two waiting endpoints");
                self.chat(waiting.endpoint, endpoint).await;
                return;
            }
            *slot = Some(Waiting {
                id,
                endpoint,
                claimed_tx,
            });
        }

        tokio::select! {
            _ = claimed_rx => {
                // The claiming offer runs the session.
            }
            _ = tokio::time::sleep(self.config.wait_window) => {
                // A claim may have won the race; re-check under the lock.
                // The generation id keeps us from stealing a successor
                // occupant that entered after we were claimed.
                let mut slot = self.slot.lock().await;
                match slot.take() {
                    Some(waiting) if waiting.id == id => {
                        drop(slot);
                        info!("wait window expired, pairing with bot");
                        let bot =
                            Endpoint::new(Bot::new(self.chain.clone(), self.bot_config.clone()));
                        self.chat(bot, waiting.endpoint).await;
                    }
                    other => {
                        *slot = other;
                    }
                }
            }
        }
    }

    /// Announce the pairing to both members, then relay until either ends.
    /// Announcement failures are not fatal to the session.
    async fn chat(&self, mut a: Endpoint, mut b: Endpoint) {
        if let Err(e) = a.notify(PAIRED_NOTICE).await {
            debug!("pairing notice failed: {}", e);
        }
        if let Err(e) = b.notify(PAIRED_NOTICE).await {
            debug!("pairing notice failed: {}", e);
        }
        relay(a, b).await;
    }
}
