//! Reassembly of a `Transfer-Encoding: chunked` body.
//!
//! Each chunk-size line is parsed with the same read loop used for the response
//! head. Whatever that loop read past the size line is pushed back, so the payload
//! read that follows starts exactly at the first payload byte.

use std::mem;

use bytes::{Bytes, BytesMut};
use http::HeaderMap;
use tokio::io::AsyncRead;
use tracing::trace;

use crate::codec::{ChunkSizeParser, TrailerParser};
use crate::connection::head_reader::read_head;
use crate::ensure;
use crate::io::PushBackStream;
use crate::protocol::ClientError;

/// A decoded chunked body and the trailer fields that followed it.
#[derive(Debug)]
pub struct ChunkedBody {
    pub body: BytesMut,
    pub trailers: HeaderMap,
}

#[derive(Debug)]
pub struct ChunkedBodyReader<'a, S> {
    stream: &'a mut PushBackStream<S>,
    size_parser: &'a mut ChunkSizeParser,
    trailer_parser: &'a mut TrailerParser,
    read_chunk_size: usize,
}

impl<'a, S> ChunkedBodyReader<'a, S>
where
    S: AsyncRead + Unpin,
{
    pub fn new(
        stream: &'a mut PushBackStream<S>,
        size_parser: &'a mut ChunkSizeParser,
        trailer_parser: &'a mut TrailerParser,
        read_chunk_size: usize,
    ) -> Self {
        Self { stream, size_parser, trailer_parser, read_chunk_size }
    }

    /// Decodes the body. `partial` holds the bytes already read together with the
    /// response head; they are the start of the first chunk-size line.
    pub async fn read_body(mut self, partial: BytesMut) -> Result<ChunkedBody, ClientError> {
        self.stream.push_back(partial);

        let mut body = BytesMut::new();
        let mut chunks = 0usize;
        while let Some(payload) = self.read_chunk().await? {
            body.extend_from_slice(&payload);
            chunks += 1;
        }

        let mut trailer = read_head(self.stream, self.trailer_parser, self.read_chunk_size).await?;
        self.stream.push_back(mem::take(&mut trailer.body));

        trace!(chunks, body_size = body.len(), trailers = trailer.headers.len(), "finished reading chunked body");
        Ok(ChunkedBody { body, trailers: trailer.headers })
    }

    /// Reads one chunk. Returns `None` for the terminal zero-size chunk.
    async fn read_chunk(&mut self) -> Result<Option<Bytes>, ClientError> {
        let mut head = read_head(self.stream, self.size_parser, self.read_chunk_size).await?;
        self.stream.push_back(mem::take(&mut head.body));

        if head.is_last() {
            return Ok(None);
        }

        let size = usize::try_from(head.size)
            .map_err(|_| ClientError::malformed(format!("chunk size {} too large", head.size)))?;
        trace!(size, "read chunk payload");
        let payload = self.stream.read_exactly(size).await?;

        let trail = self.stream.read_exactly(2).await?;
        ensure!(
            &trail[..] == b"\r\n",
            ClientError::malformed(format!("chunk ended in \"{}\" not a CRLF", trail.escape_ascii()))
        );

        Ok(Some(payload))
    }
}
