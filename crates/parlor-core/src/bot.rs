//! Fallback responder: an endpoint-shaped markov bot.

use crate::config::BotConfig;
use bytes::Bytes;
use parlor_markov::Chain;
use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::io::StreamReader;
use tracing::debug;

/// Endpoint-shaped peer that answers every write with a delayed
/// generated sentence drawn from the shared chain.
///
/// Each write spawns its own reply task; rapid writes may produce
/// overlapping replies, which is accepted behavior. The bot never closes
/// itself — the surrounding session's relay tears it down.
pub struct Bot {
    chain: Arc<Chain>,
    config: BotConfig,
    replies: mpsc::Sender<io::Result<Bytes>>,
    out: StreamReader<ReceiverStream<io::Result<Bytes>>, Bytes>,
}

impl Bot {
    pub fn new(chain: Arc<Chain>, config: BotConfig) -> Self {
        let (replies, rx) = mpsc::channel(16);
        Self {
            chain,
            config,
            replies,
            out: StreamReader::new(ReceiverStream::new(rx)),
        }
    }
}

impl AsyncRead for Bot {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().out).poll_read(cx, buf)
    }
}

impl AsyncWrite for Bot {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        // Accept the whole buffer immediately; the reply comes later from
        // an independent task (fire-and-forget).
        let chain = self.chain.clone();
        let replies = self.replies.clone();
        let delay = self.config.reply_delay;
        let max_words = self.config.max_words;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let reply = chain.generate(max_words);
            if replies.send(Ok(Bytes::from(reply))).await.is_err() {
                debug!("bot reply dropped, session already closed");
            }
        });

        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}
