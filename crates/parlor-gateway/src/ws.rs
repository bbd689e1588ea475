//! WebSocket bridging: adapt an upgraded socket into a matchable endpoint.
//!
//! Every frame received from the remote party is teed into the shared
//! markov chain before it reaches the partner — ordinary chat traffic is
//! what trains the bot. This is a deliberate global side effect: one
//! chain serves every session in the process.

use axum::extract::ws::{Message as WsMessage, WebSocket};
use futures::{SinkExt, StreamExt};
use parlor_core::{Endpoint, Matcher};
use parlor_markov::Chain;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};
use tokio::sync::oneshot;
use tracing::debug;

/// Shared state for the web listener.
pub struct AppState {
    pub matcher: Arc<Matcher>,
    pub chain: Arc<Chain>,
    pub http_addr: String,
}

/// Bridge an upgraded websocket into the matchmaking core and keep the
/// connection open until the session's relay closes our endpoint.
pub async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (bridge, io) = tokio::io::duplex(8 * 1024);
    let (done_tx, done_rx) = oneshot::channel();

    let matcher = state.matcher.clone();
    tokio::spawn(async move {
        matcher.offer(Endpoint::with_done(io, done_tx)).await;
    });

    pump(socket, bridge, state.chain.clone(), done_rx).await;
}

/// Move bytes between the websocket and the bridge until either side
/// ends or the session is torn down.
async fn pump(
    socket: WebSocket,
    bridge: DuplexStream,
    chain: Arc<Chain>,
    mut done_rx: oneshot::Receiver<()>,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (mut bridge_rx, mut bridge_tx) = tokio::io::split(bridge);
    let mut assembler = FrameAssembler::new();
    let mut buf = vec![0u8; 4096];

    'pump: loop {
        tokio::select! {
            // Frames from the remote party: train the chain, then forward.
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(WsMessage::Text(text))) => {
                        chain.observe(&text);
                        if bridge_tx.write_all(text.as_bytes()).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(WsMessage::Binary(data))) => {
                        chain.observe(&String::from_utf8_lossy(&data));
                        if bridge_tx.write_all(&data).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(WsMessage::Close(_))) | None => {
                        debug!("websocket closed by remote");
                        break;
                    }
                    Some(Ok(_)) => {} // Ping/Pong — answered by axum
                    Some(Err(e)) => {
                        debug!("websocket error: {}", e);
                        break;
                    }
                }
            }

            // Bytes from the partner: frame toward the browser, keeping
            // multi-byte characters intact across read boundaries.
            read = bridge_rx.read(&mut buf) => {
                match read {
                    Ok(0) | Err(_) => {
                        if let Some(msg) = assembler.finish() {
                            let _ = ws_tx.send(msg).await;
                        }
                        break;
                    }
                    Ok(n) => {
                        for msg in assembler.push(&buf[..n]) {
                            if ws_tx.send(msg).await.is_err() {
                                break 'pump;
                            }
                        }
                    }
                }
            }

            // The relay closed our endpoint; the session is over.
            _ = &mut done_rx => {
                debug!("session finished, closing websocket");
                break;
            }
        }
    }
}

/// Turns the partner's raw byte stream into websocket messages.
///
/// A multi-byte UTF-8 sequence can straddle two reads, so an incomplete
/// tail is held back until its remaining bytes arrive. Bytes that are
/// genuinely not UTF-8 (a raw-TCP partner owes us nothing) are passed
/// through as binary frames rather than replacement characters.
pub struct FrameAssembler {
    pending: Vec<u8>,
}

impl FrameAssembler {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Feed partner bytes; returns the messages ready to send.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<WsMessage> {
        self.pending.extend_from_slice(bytes);
        let mut out = Vec::new();

        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(text) => {
                    if !text.is_empty() {
                        out.push(WsMessage::Text(text.to_string()));
                    }
                    self.pending.clear();
                    break;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    if valid > 0 {
                        let text = String::from_utf8_lossy(&self.pending[..valid]).into_owned();
                        out.push(WsMessage::Text(text));
                    }
                    match e.error_len() {
                        // Incomplete trailing sequence: wait for the rest.
                        None => {
                            self.pending.drain(..valid);
                            break;
                        }
                        // Invalid bytes: pass them through untouched.
                        Some(len) => {
                            out.push(WsMessage::Binary(
                                self.pending[valid..valid + len].to_vec(),
                            ));
                            self.pending.drain(..valid + len);
                        }
                    }
                }
            }
        }

        out
    }

    /// Whatever is still held back when the stream ends.
    pub fn finish(&mut self) -> Option<WsMessage> {
        if self.pending.is_empty() {
            None
        } else {
            Some(WsMessage::Binary(std::mem::take(&mut self.pending)))
        }
    }
}

impl Default for FrameAssembler {
    fn default() -> Self {
        Self::new()
    }
}
