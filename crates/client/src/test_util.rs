//! In-memory transport used by the unit tests.

use std::io;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

use crate::io::Connector;

/// Counters and captured writes shared between a mock stream and the test body.
#[derive(Debug, Default)]
pub struct MockState {
    pub written: Mutex<Vec<u8>>,
    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
    pub flushes: AtomicUsize,
    pub shutdowns: AtomicUsize,
    pub connects: Mutex<Vec<(String, u16)>>,
}

impl MockState {
    pub fn written(&self) -> String {
        String::from_utf8_lossy(&self.written.lock().unwrap()).into_owned()
    }

    pub fn request_lines(&self) -> Vec<String> {
        self.written().split("\r\n").map(str::to_owned).collect()
    }

    /// Transport reads that delivered at least one byte.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn shutdowns(&self) -> usize {
        self.shutdowns.load(Ordering::SeqCst)
    }

    pub fn flushes(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }
}

/// Serves `read_data` in pieces of at most `fragment` bytes, then reports EOF.
#[derive(Debug)]
pub struct MockIo {
    read_data: Bytes,
    read_pos: usize,
    fragment: usize,
    state: Arc<MockState>,
}

impl MockIo {
    pub fn new(read_data: impl Into<Bytes>) -> Self {
        Self { read_data: read_data.into(), read_pos: 0, fragment: usize::MAX, state: Arc::default() }
    }

    pub fn with_fragment(mut self, fragment: usize) -> Self {
        self.fragment = fragment;
        self
    }

    pub fn with_state(mut self, state: Arc<MockState>) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> Arc<MockState> {
        Arc::clone(&self.state)
    }
}

impl AsyncRead for MockIo {
    fn poll_read(mut self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        let remaining = &self.read_data[self.read_pos..];
        let amt = remaining.len().min(buf.remaining()).min(self.fragment);
        buf.put_slice(&remaining[..amt]);
        self.read_pos += amt;
        if amt > 0 {
            self.state.reads.fetch_add(1, Ordering::SeqCst);
        }
        Poll::Ready(Ok(()))
    }
}

impl AsyncWrite for MockIo {
    fn poll_write(self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &[u8]) -> Poll<io::Result<usize>> {
        self.state.written.lock().unwrap().extend_from_slice(buf);
        self.state.writes.fetch_add(1, Ordering::SeqCst);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        self.state.flushes.fetch_add(1, Ordering::SeqCst);
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        self.state.shutdowns.fetch_add(1, Ordering::SeqCst);
        Poll::Ready(Ok(()))
    }
}

/// Hands out a [`MockIo`] serving `response` on every connect, all sharing one [`MockState`].
#[derive(Debug, Clone)]
pub struct MockConnector {
    response: Bytes,
    fragment: usize,
    refuse: bool,
    state: Arc<MockState>,
}

impl MockConnector {
    pub fn new(response: impl Into<Bytes>) -> Self {
        Self { response: response.into(), fragment: usize::MAX, refuse: false, state: Arc::default() }
    }

    pub fn with_fragment(mut self, fragment: usize) -> Self {
        self.fragment = fragment;
        self
    }

    /// Every connect attempt fails with `ConnectionRefused`.
    pub fn refusing() -> Self {
        Self { refuse: true, ..Self::new(Bytes::new()) }
    }

    pub fn state(&self) -> Arc<MockState> {
        Arc::clone(&self.state)
    }
}

impl Connector for MockConnector {
    type Stream = MockIo;

    async fn connect(&self, host: &str, port: u16) -> io::Result<MockIo> {
        self.state.connects.lock().unwrap().push((host.to_owned(), port));
        if self.refuse {
            return Err(io::Error::from(io::ErrorKind::ConnectionRefused));
        }
        Ok(MockIo::new(self.response.clone()).with_fragment(self.fragment).with_state(Arc::clone(&self.state)))
    }
}
