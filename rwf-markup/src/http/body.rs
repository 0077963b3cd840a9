//! Handle sending a response body to the client.
//!
//! The body can be HTML, raw bytes or a stream of chunks. Buffered bodies are sent with a
//! `Content-Length`, streamed bodies use chunked transfer encoding.
use bytes::Bytes;
use std::fmt::Debug;
use std::marker::Unpin;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::warn;

use crate::view::Channel;
use crate::Error;

/// Response body.
#[derive(Debug)]
pub enum Body {
    /// UTF-8 encoded HTML.
    Html(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// Chunks written by a view while it renders.
    Stream(UnboundedReceiver<Bytes>),
}

impl Default for Body {
    fn default() -> Self {
        Self::Bytes(vec![])
    }
}

impl Body {
    /// Create new body from a string assumed to be HTML.
    pub fn html(text: impl ToString) -> Self {
        Self::Html(text.to_string())
    }

    /// Create a streaming body and the sender used to fill it.
    ///
    /// The body ends when the sender is dropped.
    pub fn stream() -> (StreamSender, Self) {
        let (tx, rx) = unbounded_channel();
        (StreamSender { tx }, Self::Stream(rx))
    }

    /// Is this body sent in chunks?
    pub fn streaming(&self) -> bool {
        matches!(self, Self::Stream(_))
    }

    /// Get the body size. Used in the `Content-Length` header.
    ///
    /// Streams don't have a known size.
    pub fn len(&self) -> Option<usize> {
        use Body::*;

        match self {
            Html(html) => Some(html.len()),
            Bytes(bytes) => Some(bytes.len()),
            Stream(_) => None,
        }
    }

    /// Get the body's MIME type. Used when no content type was set explicitly.
    pub fn mime_type(&self) -> &'static str {
        use Body::*;

        match self {
            Html(_) | Stream(_) => "text/html;charset=utf-8",
            Bytes(_) => "application/octet-stream",
        }
    }

    /// Send the body to the stream.
    ///
    /// Streamed bodies are written with chunked encoding as chunks arrive.
    /// The stream is not flushed.
    pub async fn send(&mut self, mut stream: impl AsyncWrite + Unpin) -> Result<(), std::io::Error> {
        use Body::*;

        match self {
            Bytes(bytes) => stream.write_all(bytes).await,
            Html(html) => stream.write_all(html.as_bytes()).await,
            Stream(rx) => {
                while let Some(chunk) = rx.recv().await {
                    // A zero-length chunk terminates the body.
                    if chunk.is_empty() {
                        continue;
                    }

                    stream
                        .write_all(format!("{:x}\r\n", chunk.len()).as_bytes())
                        .await?;
                    stream.write_all(&chunk).await?;
                    stream.write_all(b"\r\n").await?;
                    stream.flush().await?;
                }

                stream.write_all(b"0\r\n\r\n").await
            }
        }
    }

    /// Consume the body, collecting all of it into memory.
    pub async fn collect(self) -> Vec<u8> {
        use Body::*;

        match self {
            Bytes(bytes) => bytes,
            Html(text) => text.into_bytes(),
            Stream(mut rx) => {
                let mut body = vec![];
                while let Some(chunk) = rx.recv().await {
                    body.extend_from_slice(&chunk);
                }
                body
            }
        }
    }
}

/// Sending half of a streamed body.
#[derive(Debug, Clone)]
pub struct StreamSender {
    tx: UnboundedSender<Bytes>,
}

impl StreamSender {
    /// Send a chunk to the client.
    pub fn send(&self, chunk: impl Into<Bytes>) -> Result<(), Error> {
        self.tx.send(chunk.into()).map_err(|_| {
            warn!("stream receiver dropped, client likely disconnected");
            Error::StreamClosed
        })
    }

    pub fn closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl Channel for StreamSender {
    fn write(&mut self, chunk: &str) -> Result<(), Error> {
        if chunk.is_empty() {
            return Ok(());
        }

        self.send(Bytes::copy_from_slice(chunk.as_bytes()))
    }
}
