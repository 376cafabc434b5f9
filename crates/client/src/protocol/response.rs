//! HTTP response types.
//!
//! [`ResponseHead`] is the record the head parser fills in while bytes arrive;
//! [`ClientResponse`] is the finished value handed back to callers.

use bytes::{Bytes, BytesMut};
use http::{HeaderMap, StatusCode, Version, header};

/// The parsed status line and header block of a response.
///
/// `body` holds whatever bytes followed the header terminator in the buffer that
/// was parsed. The connection later completes it, or pushes it back when the body
/// is chunked.
#[derive(Debug, Default)]
pub struct ResponseHead {
    pub status: u16,
    pub reason: String,
    pub version: Version,
    pub headers: HeaderMap,
    pub body: BytesMut,
}

impl ResponseHead {
    /// Returns true if any `Transfer-Encoding` value mentions `chunked`, ignoring case.
    pub fn is_chunked(&self) -> bool {
        self.headers
            .get_all(header::TRANSFER_ENCODING)
            .iter()
            .any(|value| contains_ignore_ascii_case(value.as_bytes(), b"chunked"))
    }

    /// The declared `Content-Length`, if any.
    ///
    /// Returns `Err` with the raw value when the header is present but not a number.
    pub fn content_length(&self) -> Result<Option<u64>, String> {
        let Some(value) = self.headers.get(header::CONTENT_LENGTH) else {
            return Ok(None);
        };

        let raw = String::from_utf8_lossy(value.as_bytes());
        raw.trim().parse::<u64>().map(Some).map_err(|_| raw.into_owned())
    }
}

fn contains_ignore_ascii_case(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window.eq_ignore_ascii_case(needle))
}

/// A complete response: status code, header map and body bytes.
#[derive(Debug, Clone)]
pub struct ClientResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl ClientResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self { status, headers, body }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Splits the response into its `(status, headers, body)` triple.
    pub fn into_parts(self) -> (StatusCode, HeaderMap, Bytes) {
        (self.status, self.headers, self.body)
    }
}

impl From<ClientResponse> for http::Response<Bytes> {
    fn from(response: ClientResponse) -> Self {
        let (status, headers, body) = response.into_parts();
        let mut converted = http::Response::new(body);
        *converted.status_mut() = status;
        *converted.headers_mut() = headers;
        converted
    }
}
