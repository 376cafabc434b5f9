//! The read loop that drives a [`HeadParser`] over a [`PushBackStream`].

use bytes::BytesMut;
use tokio::io::AsyncRead;
use tracing::trace;

use crate::codec::HeadParser;
use crate::io::PushBackStream;
use crate::protocol::ClientError;

/// Reads from `stream` in pieces of `read_chunk_size` until `parser` has a complete head.
///
/// The parser sees the whole accumulated buffer on every call. Bytes past the head are
/// left in the parser's output; handing them back to the stream is up to the caller.
///
/// This is where parser errors become [`ClientError::MalformedResponse`]. A stream that
/// ends before the head is complete is malformed too.
pub(crate) async fn read_head<S, P>(
    stream: &mut PushBackStream<S>,
    parser: &mut P,
    read_chunk_size: usize,
) -> Result<P::Output, ClientError>
where
    S: AsyncRead + Unpin,
    P: HeadParser,
{
    parser.reset();
    let mut output = P::Output::default();
    let mut data = BytesMut::new();
    let mut nread = 0;

    loop {
        let bytes = stream.read_partial(read_chunk_size).await.map_err(|e| {
            if e.is_end_of_stream() {
                ClientError::malformed(format!("connection closed after {} bytes of an incomplete head", data.len()))
            } else {
                ClientError::from(e)
            }
        })?;
        data.extend_from_slice(&bytes);

        nread = parser.execute(&mut output, &data, nread)?;
        if parser.finished() {
            trace!(consumed = nread, buffered = data.len(), "head complete");
            return Ok(output);
        }
    }
}
