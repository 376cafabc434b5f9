//! HTTP response head parser
//!
//! Parses the status line and header block of a response with `httparse`, and
//! converts the result into a [`ResponseHead`].
//!
//! # Limits
//!
//! - Maximum number of headers: configurable, 64 by default
//! - Maximum header size: configurable, 64KB by default
//! - Only HTTP/1.0 and HTTP/1.1 responses are accepted
//!
//! `httparse` is not resumable: every call re-parses the buffer from its start.
//! The `offset` handed back by the driving loop is only used to skip calls that
//! bring no new bytes.

use bytes::BytesMut;
use http::{HeaderName, HeaderValue, Version};
use httparse::{Error, Status};
use tracing::trace;

use crate::codec::HeadParser;
use crate::ensure;
use crate::protocol::{ParseError, ResponseHead};

/// Default maximum number of response headers
pub const DEFAULT_MAX_HEADERS: usize = 64;

/// Default maximum size in bytes of the status line plus header block
pub const DEFAULT_MAX_HEADER_BYTES: usize = 64 * 1024;

/// Parser for the status line and header fields of an HTTP/1.x response.
#[derive(Debug, Clone)]
pub struct ResponseHeadParser {
    max_headers: usize,
    max_header_bytes: usize,
    finished: bool,
}

impl Default for ResponseHeadParser {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HEADERS, DEFAULT_MAX_HEADER_BYTES)
    }
}

impl ResponseHeadParser {
    pub fn new(max_headers: usize, max_header_bytes: usize) -> Self {
        Self { max_headers, max_header_bytes, finished: false }
    }
}

impl HeadParser for ResponseHeadParser {
    type Output = ResponseHead;

    fn reset(&mut self) {
        self.finished = false;
    }

    fn execute(&mut self, output: &mut ResponseHead, buffer: &[u8], offset: usize) -> Result<usize, ParseError> {
        if self.finished || (offset > 0 && buffer.len() <= offset) {
            return Ok(offset);
        }

        let mut headers = vec![httparse::EMPTY_HEADER; self.max_headers];
        let mut response = httparse::Response::new(&mut headers);

        let max_headers = self.max_headers;
        let status = response.parse(buffer).map_err(|e| match e {
            Error::TooManyHeaders => ParseError::too_many_headers(max_headers),
            Error::Status => ParseError::invalid_status_line("status code is not a 3 digit number"),
            Error::Version => ParseError::invalid_status_line("unrecognized http version"),
            e => ParseError::invalid_header(e),
        })?;

        match status {
            Status::Complete(head_size) => {
                trace!(head_size, buffered = buffer.len(), "parsed response head");
                ensure!(head_size <= self.max_header_bytes, ParseError::too_large_header(head_size, self.max_header_bytes));

                output.version = match response.version {
                    Some(0) => Version::HTTP_10,
                    Some(1) => Version::HTTP_11,
                    v => return Err(ParseError::InvalidVersion(v)),
                };
                output.status = response.code.ok_or_else(|| ParseError::invalid_status_line("missing status code"))?;
                output.reason = response.reason.unwrap_or_default().to_owned();

                output.headers.reserve(response.headers.len());
                for header in response.headers.iter() {
                    let name = HeaderName::from_bytes(header.name.as_bytes()).map_err(ParseError::invalid_header)?;
                    let value = HeaderValue::from_bytes(header.value).map_err(ParseError::invalid_header)?;
                    // duplicate fields are kept side by side
                    output.headers.append(name, value);
                }

                output.body = BytesMut::from(&buffer[head_size..]);
                self.finished = true;
                Ok(head_size)
            }
            Status::Partial => {
                ensure!(buffer.len() <= self.max_header_bytes, ParseError::too_large_header(buffer.len(), self.max_header_bytes));
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
    use http::header;
    use indoc::indoc;

    fn crlf(s: &str) -> String {
        s.replace('\n', "\r\n")
    }

    #[test]
    fn parse_simple_response() {
        let str = crlf(indoc! {r##"
        HTTP/1.1 200 OK
        Content-Length: 5
        Content-Type: text/plain

        hello"##});

        let mut parser = ResponseHeadParser::default();
        let mut head = ResponseHead::default();
        let consumed = parser.execute(&mut head, str.as_bytes(), 0).unwrap();

        assert!(parser.finished());
        assert_eq!(consumed, str.len() - 5);
        assert_eq!(head.status, 200);
        assert_eq!(head.reason, "OK");
        assert_eq!(head.version, Version::HTTP_11);
        assert_eq!(head.headers.len(), 2);
        assert_eq!(head.headers[header::CONTENT_LENGTH], "5");
        assert_eq!(head.headers["content-type"], "text/plain");
        assert_eq!(&head.body[..], b"hello");
    }

    #[test]
    fn partial_head_needs_more_bytes() {
        let mut parser = ResponseHeadParser::default();
        let mut head = ResponseHead::default();

        let mut buffer = b"HTTP/1.0 404 Not Fo".to_vec();
        let nread = parser.execute(&mut head, &buffer, 0).unwrap();
        assert!(!parser.finished());
        assert_eq!(nread, buffer.len());

        // nothing new, nothing parsed
        assert_eq!(parser.execute(&mut head, &buffer, nread).unwrap(), nread);

        buffer.extend_from_slice(b"und\r\nX-A: 1\r\n\r\n");
        parser.execute(&mut head, &buffer, nread).unwrap();
        assert!(parser.finished());
        assert_eq!(head.status, 404);
        assert_eq!(head.reason, "Not Found");
        assert_eq!(head.version, Version::HTTP_10);
        assert!(head.body.is_empty());
    }

    #[test]
    fn duplicate_headers_append() {
        let str = crlf(indoc! {r##"
        HTTP/1.1 200 OK
        Set-Cookie: a=1
        set-cookie: b=2

        "##});

        let mut parser = ResponseHeadParser::default();
        let mut head = ResponseHead::default();
        parser.execute(&mut head, str.as_bytes(), 0).unwrap();

        let cookies: Vec<_> = head.headers.get_all(header::SET_COOKIE).iter().collect();
        assert_eq!(cookies, ["a=1", "b=2"]);
    }

    #[test]
    fn non_numeric_status_is_rejected() {
        let mut parser = ResponseHeadParser::default();
        let mut head = ResponseHead::default();
        let result = parser.execute(&mut head, b"HTTP/1.1 abc OK\r\n\r\n", 0);

        assert!(matches!(result, Err(ParseError::InvalidStatusLine { .. })));
        assert!(!parser.finished());
    }

    #[test]
    fn too_many_headers() {
        let mut parser = ResponseHeadParser::new(2, DEFAULT_MAX_HEADER_BYTES);
        let mut head = ResponseHead::default();
        let result = parser.execute(&mut head, b"HTTP/1.1 200 OK\r\nA: 1\r\nB: 2\r\nC: 3\r\n\r\n", 0);

        assert!(matches!(result, Err(ParseError::TooManyHeaders { max_num: 2 })));
    }

    #[test]
    fn too_large_partial_head() {
        let mut parser = ResponseHeadParser::new(DEFAULT_MAX_HEADERS, 16);
        let mut head = ResponseHead::default();
        let result = parser.execute(&mut head, b"HTTP/1.1 200 OK\r\nX-Long: aaaa", 0);

        assert!(matches!(result, Err(ParseError::TooLargeHeader { max_size: 16, .. })));
    }

    #[test]
    fn reset_allows_reuse() {
        let mut parser = ResponseHeadParser::default();
        let mut head = ResponseHead::default();
        parser.execute(&mut head, b"HTTP/1.1 204 No Content\r\n\r\n", 0).unwrap();
        assert!(parser.finished());

        parser.reset();
        assert!(!parser.finished());

        let mut head = ResponseHead::default();
        parser.execute(&mut head, b"HTTP/1.1 500 Oops\r\n\r\n", 0).unwrap();
        assert_eq!(head.status, 500);
    }
}
