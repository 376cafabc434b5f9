use std::io;
use thiserror::Error;

/// The error type surfaced by every public operation of this crate.
///
/// Parser and stream errors never leak to callers directly: they are translated into
/// [`ClientError::MalformedResponse`] or [`ClientError::Connection`] at the connection
/// boundary.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("connection error: {source}")]
    Connection {
        #[from]
        source: io::Error,
    },

    #[error("malformed server response: {reason}")]
    MalformedResponse { reason: String },

    #[error("invalid uri: {reason}")]
    InvalidUri { reason: String },

    #[error("invalid http method: {method}")]
    InvalidMethod { method: String },

    #[error("connection already closed")]
    ConnectionClosed,
}

impl ClientError {
    pub fn malformed<S: ToString>(str: S) -> Self {
        Self::MalformedResponse { reason: str.to_string() }
    }

    pub fn invalid_uri<S: ToString>(str: S) -> Self {
        Self::InvalidUri { reason: str.to_string() }
    }

    pub fn invalid_method<S: ToString>(str: S) -> Self {
        Self::InvalidMethod { method: str.to_string() }
    }

    /// Returns true if this error reports a framing or syntax problem in the response.
    pub fn is_malformed(&self) -> bool {
        matches!(self, ClientError::MalformedResponse { .. })
    }

    /// Returns true if this error comes from the transport.
    pub fn is_connection(&self) -> bool {
        matches!(self, ClientError::Connection { .. })
    }
}

/// Errors reported by the head, chunk-size and trailer parsers.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("header size too large, current: {current_size} exceed the limit {max_size}")]
    TooLargeHeader { current_size: usize, max_size: usize },

    #[error("header number exceed the limit {max_num}")]
    TooManyHeaders { max_num: usize },

    #[error("invalid status line: {reason}")]
    InvalidStatusLine { reason: String },

    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    #[error("invalid http version: {0:?}")]
    InvalidVersion(Option<u8>),

    #[error("invalid chunk size line: {reason}")]
    InvalidChunkSize { reason: String },
}

impl ParseError {
    pub fn too_large_header(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeHeader { current_size, max_size }
    }

    pub fn too_many_headers(max_num: usize) -> Self {
        Self::TooManyHeaders { max_num }
    }

    pub fn invalid_status_line<S: ToString>(str: S) -> Self {
        Self::InvalidStatusLine { reason: str.to_string() }
    }

    pub fn invalid_header<S: ToString>(str: S) -> Self {
        Self::InvalidHeader { reason: str.to_string() }
    }

    pub fn invalid_chunk_size<S: ToString>(str: S) -> Self {
        Self::InvalidChunkSize { reason: str.to_string() }
    }
}

/// Errors reported by [`PushBackStream`](crate::io::PushBackStream).
#[derive(Error, Debug)]
pub enum StreamError {
    #[error("end of stream, still needed {needed} bytes")]
    EndOfStream { needed: usize },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl StreamError {
    pub fn end_of_stream(needed: usize) -> Self {
        Self::EndOfStream { needed }
    }

    /// Returns true if the peer closed the stream before enough bytes arrived.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, StreamError::EndOfStream { .. })
    }
}

impl From<ParseError> for ClientError {
    fn from(e: ParseError) -> Self {
        ClientError::malformed(e)
    }
}

impl From<StreamError> for ClientError {
    fn from(e: StreamError) -> Self {
        match e {
            StreamError::EndOfStream { needed } => {
                ClientError::malformed(format!("connection closed by peer while {needed} more bytes were expected"))
            }
            StreamError::Io { source } => ClientError::Connection { source },
        }
    }
}
