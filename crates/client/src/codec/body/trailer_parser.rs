//! Parser for the trailer section after the last chunk.
//!
//! The section is zero or more header fields followed by an empty line. A body
//! without trailers ends with `0\r\n\r\n`, whose trailer section is the bare CRLF.

use bytes::BytesMut;
use http::{HeaderName, HeaderValue};
use httparse::{Error, Status};
use tracing::trace;

use crate::codec::HeadParser;
use crate::ensure;
use crate::protocol::{ParseError, Trailer};

#[derive(Debug, Clone)]
pub struct TrailerParser {
    max_headers: usize,
    max_bytes: usize,
    finished: bool,
}

impl TrailerParser {
    pub fn new(max_headers: usize, max_bytes: usize) -> Self {
        Self { max_headers, max_bytes, finished: false }
    }
}

impl HeadParser for TrailerParser {
    type Output = Trailer;

    fn reset(&mut self) {
        self.finished = false;
    }

    fn execute(&mut self, output: &mut Trailer, buffer: &[u8], offset: usize) -> Result<usize, ParseError> {
        if self.finished || (offset > 0 && buffer.len() <= offset) {
            return Ok(offset);
        }

        let mut headers = vec![httparse::EMPTY_HEADER; self.max_headers];
        let max_headers = self.max_headers;
        let status = httparse::parse_headers(buffer, &mut headers).map_err(|e| match e {
            Error::TooManyHeaders => ParseError::too_many_headers(max_headers),
            e => ParseError::invalid_header(format!("trailer: {e}")),
        })?;

        match status {
            Status::Complete((size, fields)) => {
                trace!(size, fields = fields.len(), "parsed chunk trailer");
                ensure!(size <= self.max_bytes, ParseError::too_large_header(size, self.max_bytes));

                for field in fields {
                    let name = HeaderName::from_bytes(field.name.as_bytes()).map_err(ParseError::invalid_header)?;
                    let value = HeaderValue::from_bytes(field.value).map_err(ParseError::invalid_header)?;
                    output.headers.append(name, value);
                }

                output.body = BytesMut::from(&buffer[size..]);
                self.finished = true;
                Ok(size)
            }
            Status::Partial => {
                ensure!(buffer.len() <= self.max_bytes, ParseError::too_large_header(buffer.len(), self.max_bytes));
                Ok(buffer.len())
            }
        }
    }

    fn finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_trailer() {
        let mut parser = TrailerParser::new(8, 1024);
        let mut trailer = Trailer::default();

        let consumed = parser.execute(&mut trailer, b"\r\n", 0).unwrap();

        assert!(parser.finished());
        assert_eq!(consumed, 2);
        assert!(trailer.headers.is_empty());
        assert!(trailer.body.is_empty());
    }

    #[test]
    fn trailer_fields_are_collected() {
        let mut parser = TrailerParser::new(8, 1024);
        let mut trailer = Trailer::default();

        parser.execute(&mut trailer, b"Expires: never\r\nX-Checksum: abc\r\n\r\nrest", 0).unwrap();

        assert_eq!(trailer.headers["expires"], "never");
        assert_eq!(trailer.headers["x-checksum"], "abc");
        assert_eq!(&trailer.body[..], b"rest");
    }

    #[test]
    fn partial_trailer() {
        let mut parser = TrailerParser::new(8, 1024);
        let mut trailer = Trailer::default();

        let nread = parser.execute(&mut trailer, b"Expires: ne", 0).unwrap();
        assert!(!parser.finished());
        assert_eq!(nread, 11);
    }
}
