//! Records produced while decoding a chunked body.

use bytes::BytesMut;
use http::HeaderMap;

/// A parsed chunk-size line.
///
/// `body` holds the bytes that were read past the size line; they belong to the
/// chunk payload (or the next line) and have to be handed back to the stream.
#[derive(Debug, Default)]
pub struct ChunkHead {
    pub size: u64,
    pub body: BytesMut,
}

impl ChunkHead {
    /// The zero-size chunk terminates the body.
    #[inline]
    pub fn is_last(&self) -> bool {
        self.size == 0
    }
}

/// The trailer section following the terminal chunk.
#[derive(Debug, Default)]
pub struct Trailer {
    pub headers: HeaderMap,
    pub body: BytesMut,
}
