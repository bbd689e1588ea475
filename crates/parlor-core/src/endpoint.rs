//! The endpoint abstraction: one capability set over raw sockets,
//! websocket bridges, and the fallback bot.

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, ReadHalf, WriteHalf};
use tokio::sync::oneshot;

/// Byte-stream capability set shared by every endpoint kind.
pub trait ByteStream: AsyncRead + AsyncWrite + Send + Unpin {}

impl<T: AsyncRead + AsyncWrite + Send + Unpin> ByteStream for T {}

/// A two-way byte stream with a one-shot done signal fired on close.
///
/// Owned by whichever component currently holds it (matcher, then relay);
/// closed exactly once, on the relay teardown path.
pub struct Endpoint {
    stream: Box<dyn ByteStream>,
    done: Option<oneshot::Sender<()>>,
}

impl Endpoint {
    /// Wrap a stream with no close signal. Dropping the stream is the
    /// close (e.g. a TCP connection).
    pub fn new(stream: impl ByteStream + 'static) -> Self {
        Self {
            stream: Box::new(stream),
            done: None,
        }
    }

    /// Wrap a stream whose creator needs to know when the session is over.
    /// The creator's receiver fires when the endpoint is closed.
    pub fn with_done(stream: impl ByteStream + 'static, done: oneshot::Sender<()>) -> Self {
        Self {
            stream: Box::new(stream),
            done: Some(done),
        }
    }

    /// Best-effort status line toward the remote party.
    pub async fn notify(&mut self, text: &str) -> std::io::Result<()> {
        self.stream.write_all(text.as_bytes()).await?;
        self.stream.flush().await
    }

    /// Split into independently pollable halves plus the close handle.
    pub(crate) fn into_parts(
        self,
    ) -> (
        ReadHalf<Box<dyn ByteStream>>,
        WriteHalf<Box<dyn ByteStream>>,
        Closer,
    ) {
        let (read, write) = tokio::io::split(self.stream);
        (read, write, Closer { done: self.done })
    }
}

/// Holds an endpoint's done signal. Consuming it is the close; taking it
/// by value makes close-exactly-once a compile-time property.
pub(crate) struct Closer {
    done: Option<oneshot::Sender<()>>,
}

impl Closer {
    pub(crate) fn close(mut self) {
        if let Some(done) = self.done.take() {
            let _ = done.send(());
        }
    }
}
