//! A byte stream with a lookahead buffer.
//!
//! Response heads are read in fixed-size pieces, so a read often goes past the
//! end of what the current parser needs. [`PushBackStream::push_back`] returns
//! such bytes to the stream: the next read delivers them before anything new
//! from the transport.

use std::cmp;
use std::io;

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::trace;

use crate::config::DEFAULT_READ_CHUNK_SIZE;
use crate::protocol::StreamError;

#[derive(Debug)]
pub struct PushBackStream<S> {
    inner: Option<S>,
    buffer: BytesMut,
    read_size: usize,
}

impl<S> PushBackStream<S> {
    pub fn new(inner: S) -> Self {
        Self::with_read_size(inner, DEFAULT_READ_CHUNK_SIZE)
    }

    /// `read_size` bounds how much buffer space a single transport read may claim.
    pub fn with_read_size(inner: S, read_size: usize) -> Self {
        Self { inner: Some(inner), buffer: BytesMut::new(), read_size: read_size.max(1) }
    }

    /// Makes `bytes` the next bytes to be read, ahead of anything already buffered.
    pub fn push_back<B: Into<BytesMut>>(&mut self, bytes: B) {
        let mut bytes = bytes.into();
        if bytes.is_empty() {
            return;
        }

        trace!(pushed = bytes.len(), buffered = self.buffer.len(), "push back bytes");
        if !self.buffer.is_empty() {
            bytes.extend_from_slice(&self.buffer);
        }
        self.buffer = bytes;
    }

    /// Number of buffered bytes not yet read.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }

    fn inner_mut(&mut self) -> Result<&mut S, StreamError> {
        self.inner.as_mut().ok_or_else(|| io::Error::from(io::ErrorKind::NotConnected).into())
    }
}

impl<S> PushBackStream<S>
where
    S: AsyncRead + Unpin,
{
    /// Appends one transport read of at most about `max_bytes` to the buffer.
    async fn fill_buf(&mut self, max_bytes: usize) -> Result<usize, StreamError> {
        self.buffer.reserve(cmp::min(max_bytes, self.read_size));
        let Some(stream) = self.inner.as_mut() else {
            return Err(io::Error::from(io::ErrorKind::NotConnected).into());
        };

        let n = stream.read_buf(&mut self.buffer).await?;
        trace!(read = n, buffered = self.buffer.len(), "read from stream");
        Ok(n)
    }

    /// Reads between one and `max_bytes` bytes.
    ///
    /// Buffered bytes are served first; only when none are left does this wait on
    /// the underlying stream.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::EndOfStream`] if the peer closed the stream and nothing is
    /// left to deliver.
    pub async fn read_partial(&mut self, max_bytes: usize) -> Result<Bytes, StreamError> {
        if max_bytes == 0 {
            return Ok(Bytes::new());
        }

        if self.buffer.is_empty() && self.fill_buf(max_bytes).await? == 0 {
            return Err(StreamError::end_of_stream(1));
        }

        let n = cmp::min(max_bytes, self.buffer.len());
        Ok(self.buffer.split_to(n).freeze())
    }

    /// Reads exactly `n` bytes.
    ///
    /// The buffer grows with the bytes that actually arrive, never by `n` up front.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::EndOfStream`] carrying the shortfall if the peer closed
    /// the stream first. The bytes read so far stay buffered.
    pub async fn read_exactly(&mut self, n: usize) -> Result<Bytes, StreamError> {
        while self.buffer.len() < n {
            let missing = n - self.buffer.len();
            if self.fill_buf(missing).await? == 0 {
                return Err(StreamError::end_of_stream(missing));
            }
        }
        Ok(self.buffer.split_to(n).freeze())
    }
}

impl<S> PushBackStream<S>
where
    S: AsyncWrite + Unpin,
{
    pub async fn write_all(&mut self, bytes: &[u8]) -> Result<(), StreamError> {
        self.inner_mut()?.write_all(bytes).await?;
        Ok(())
    }

    pub async fn flush(&mut self) -> Result<(), StreamError> {
        self.inner_mut()?.flush().await?;
        Ok(())
    }

    /// Shuts the underlying stream down and releases it. Closing twice is a no-op.
    pub async fn close(&mut self) -> io::Result<()> {
        self.buffer.clear();
        match self.inner.take() {
            Some(mut stream) => stream.shutdown().await,
            None => Ok(()),
        }
    }
}
