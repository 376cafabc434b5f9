//! Parser for the size line that starts every chunk of a chunked body.
//!
//! The size is hexadecimal (either case). Chunk extensions after a `;` are
//! accepted and ignored, see
//! [RFC 9112 Section 7.1.1](https://www.rfc-editor.org/rfc/rfc9112#section-7.1.1).

use bytes::BytesMut;
use httparse::Status;
use tracing::trace;

use crate::codec::HeadParser;
use crate::ensure;
use crate::protocol::{ChunkHead, ParseError};

/// Parses `<hex-size>[;ext]\r\n` into a [`ChunkHead`].
#[derive(Debug, Clone)]
pub struct ChunkSizeParser {
    max_line_bytes: usize,
    finished: bool,
}

impl ChunkSizeParser {
    pub fn new(max_line_bytes: usize) -> Self {
        Self { max_line_bytes, finished: false }
    }
}

impl HeadParser for ChunkSizeParser {
    type Output = ChunkHead;

    fn reset(&mut self) {
        self.finished = false;
    }

    fn execute(&mut self, output: &mut ChunkHead, buffer: &[u8], offset: usize) -> Result<usize, ParseError> {
        if self.finished || (offset > 0 && buffer.len() <= offset) {
            return Ok(offset);
        }

        match httparse::parse_chunk_size(buffer) {
            Ok(Status::Complete((line_size, size))) => {
                // httparse reads an empty line as size zero
                ensure!(
                    buffer.first().is_some_and(u8::is_ascii_hexdigit),
                    ParseError::invalid_chunk_size(format!("{:?} has no hex digits", escape(&buffer[..line_size])))
                );
                trace!(size, line_size, "parsed chunk size line");

                output.size = size;
                output.body = BytesMut::from(&buffer[line_size..]);
                self.finished = true;
                Ok(line_size)
            }
            Ok(Status::Partial) => {
                ensure!(buffer.len() <= self.max_line_bytes, ParseError::too_large_header(buffer.len(), self.max_line_bytes));
                Ok(buffer.len())
            }
            Err(_) => Err(ParseError::invalid_chunk_size(escape(line_of(buffer)))),
        }
    }

    fn finished(&self) -> bool {
        self.finished
    }
}

fn line_of(buffer: &[u8]) -> &[u8] {
    let end = buffer.iter().position(|b| *b == b'\n').map_or(buffer.len(), |i| i + 1);
    &buffer[..end.min(64)]
}

fn escape(bytes: &[u8]) -> String {
    bytes.escape_ascii().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &[u8]) -> Result<(usize, ChunkHead), ParseError> {
        let mut parser = ChunkSizeParser::new(1024);
        let mut head = ChunkHead::default();
        let consumed = parser.execute(&mut head, input, 0)?;
        Ok((consumed, head))
    }

    #[test]
    fn size_is_hex() {
        let (consumed, head) = parse(b"1a\r\nabc").unwrap();
        assert_eq!(consumed, 4);
        assert_eq!(head.size, 26);
        assert_eq!(&head.body[..], b"abc");

        let (_, head) = parse(b"FF\r\n").unwrap();
        assert_eq!(head.size, 255);
        assert!(head.body.is_empty());
    }

    #[test]
    fn extensions_are_ignored() {
        let (consumed, head) = parse(b"5;name=value\r\nhello").unwrap();
        assert_eq!(consumed, 14);
        assert_eq!(head.size, 5);
        assert_eq!(&head.body[..], b"hello");
    }

    #[test]
    fn terminal_chunk() {
        let (_, head) = parse(b"0\r\n\r\n").unwrap();
        assert!(head.is_last());
        assert_eq!(&head.body[..], b"\r\n");
    }

    #[test]
    fn empty_line_is_invalid() {
        assert!(matches!(parse(b"\r\n"), Err(ParseError::InvalidChunkSize { .. })));
    }

    #[test]
    fn non_hex_is_invalid() {
        let error = parse(b"xyz\r\n").unwrap_err();
        assert!(matches!(error, ParseError::InvalidChunkSize { .. }));
        assert!(error.to_string().contains("xyz"));
    }

    #[test]
    fn partial_line_waits() {
        let mut parser = ChunkSizeParser::new(1024);
        let mut head = ChunkHead::default();

        let nread = parser.execute(&mut head, b"1f", 0).unwrap();
        assert_eq!(nread, 2);
        assert!(!parser.finished());

        parser.execute(&mut head, b"1f\r\n", nread).unwrap();
        assert!(parser.finished());
        assert_eq!(head.size, 31);
    }

    #[test]
    fn overlong_line_is_rejected() {
        let mut parser = ChunkSizeParser::new(8);
        let mut head = ChunkHead::default();
        let result = parser.execute(&mut head, b"5;aaaaaaaaaaaaaa", 0);
        assert!(matches!(result, Err(ParseError::TooLargeHeader { .. })));
    }
}
