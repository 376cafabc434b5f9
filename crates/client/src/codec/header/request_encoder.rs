//! HTTP request head encoder
//!
//! Serializes a [`RequestHead`] into the request line and header block:
//!
//! ```text
//! <METHOD> <target> HTTP/1.1\r\n
//! <field>: <value>\r\n
//! \r\n
//! ```
//!
//! Headers are written in insertion order with their names untouched. A list-valued
//! header produces one line per value. The body is not part of the head and is
//! written separately by the connection.

use std::io;

use bytes::{BufMut, BytesMut};
use tokio_util::codec::Encoder;
use tracing::trace;

use crate::protocol::RequestHead;

/// Initial buffer size reserved for a request head
const INIT_HEADER_SIZE: usize = 1024;

/// Encoder for HTTP/1.1 request heads implementing the [`Encoder`] trait.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestHeadEncoder;

impl Encoder<&RequestHead> for RequestHeadEncoder {
    type Error = io::Error;

    fn encode(&mut self, head: &RequestHead, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let start = dst.len();
        dst.reserve(INIT_HEADER_SIZE);

        dst.put_slice(head.method().as_str().as_bytes());
        dst.put_u8(b' ');
        dst.put_slice(head.target().as_bytes());
        dst.put_slice(b" HTTP/1.1\r\n");

        for (name, value) in head.headers().iter() {
            for v in value.iter() {
                dst.put_slice(name.as_bytes());
                dst.put_slice(b": ");
                dst.put_slice(v.as_bytes());
                dst.put_slice(b"\r\n");
            }
        }
        dst.put_slice(b"\r\n");

        trace!(head_size = dst.len() - start, "encoded request head");
        Ok(())
    }
}

/// Encodes `head` into a freshly allocated buffer.
///
/// # Errors
///
/// Returns the error of [`RequestHeadEncoder::encode`].
pub fn encode_request_head(head: &RequestHead) -> io::Result<BytesMut> {
    let mut dst = BytesMut::new();
    RequestHeadEncoder.encode(head, &mut dst)?;
    Ok(dst)
}
