//! Duplex relay: copy bytes both ways until either direction ends.

use crate::endpoint::Endpoint;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Relay bytes between `a` and `b` until one direction hits end-of-stream
/// or an I/O error, then close both sides. The lagging direction is
/// dropped mid-flight; its error, if any, is never observed.
pub async fn relay(a: Endpoint, b: Endpoint) {
    let (mut a_read, mut a_write, a_close) = a.into_parts();
    let (mut b_read, mut b_write, b_close) = b.into_parts();

    let first = tokio::select! {
        res = tokio::io::copy(&mut a_read, &mut b_write) => res,
        res = tokio::io::copy(&mut b_read, &mut a_write) => res,
    };

    match first {
        Ok(n) => debug!(bytes = n, "relay direction finished"),
        Err(e) => debug!("relay direction errored: {}", e),
    }

    // The peer may already be gone, so shutdown is best-effort.
    let _ = a_write.shutdown().await;
    let _ = b_write.shutdown().await;
    a_close.close();
    b_close.close();
}
