//! Raw TCP listener: every accepted stream goes straight to matchmaking.

use parlor_core::{Endpoint, Matcher, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Accept connections until the listener fails. Listener-level errors
/// have no recovery path; the caller treats a return as fatal.
pub async fn accept_loop(listener: TcpListener, matcher: Arc<Matcher>) -> Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;
        info!("tcp connection from {}", peer);
        let matcher = matcher.clone();
        tokio::spawn(async move {
            matcher.offer(Endpoint::new(stream)).await;
        });
    }
}
