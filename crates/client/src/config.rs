//! Client configuration.

use crate::codec::{DEFAULT_MAX_HEADER_BYTES, DEFAULT_MAX_HEADERS};

/// Size of each read while a response head or chunk-size line is being parsed
pub const DEFAULT_READ_CHUNK_SIZE: usize = 16 * 1024;

/// Port used when the uri does not name one
pub const DEFAULT_PORT: u16 = 80;

/// Tunables for [`HttpAdapter`](crate::HttpAdapter) and
/// [`HttpConnection`](crate::connection::HttpConnection).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub read_chunk_size: usize,
    pub max_header_bytes: usize,
    pub max_headers: usize,
    pub default_port: u16,
    /// Sent as `User-Agent` unless the request already carries one.
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
            max_header_bytes: DEFAULT_MAX_HEADER_BYTES,
            max_headers: DEFAULT_MAX_HEADERS,
            default_port: DEFAULT_PORT,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_read_chunk_size(mut self, read_chunk_size: usize) -> Self {
        self.read_chunk_size = read_chunk_size.max(1);
        self
    }

    #[must_use]
    pub fn with_max_header_bytes(mut self, max_header_bytes: usize) -> Self {
        self.max_header_bytes = max_header_bytes;
        self
    }

    #[must_use]
    pub fn with_max_headers(mut self, max_headers: usize) -> Self {
        self.max_headers = max_headers;
        self
    }

    #[must_use]
    pub fn with_default_port(mut self, default_port: u16) -> Self {
        self.default_port = default_port;
        self
    }

    #[must_use]
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}
