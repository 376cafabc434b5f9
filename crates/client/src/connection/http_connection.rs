//! A single HTTP/1.1 connection: lazy open, one request out, one response in.
//!
//! The response body is completed from `Content-Length` or decoded from the
//! chunked transfer coding. No body is read after a HEAD request, nor for 1xx,
//! 204 and 304 responses.

use std::fmt;
use std::mem;

use http::Method;
use tracing::{debug, trace, warn};

use crate::codec::{ChunkSizeParser, ResponseHeadParser, TrailerParser, encode_request_head};
use crate::config::ClientConfig;
use crate::connection::chunked_body::ChunkedBodyReader;
use crate::connection::head_reader::read_head;
use crate::io::{LocalConnector, PushBackStream};
use crate::protocol::{ClientError, RequestHead, RequestHeaders, ResponseHead};

const CONTENT_LENGTH: &str = "Content-Length";

enum State<S> {
    Unopened,
    Open(PushBackStream<S>),
    Closed,
}

/// One HTTP/1.1 connection to one `(host, port)`.
///
/// The transport is opened on the first [`send_request`](Self::send_request) or
/// [`read_response`](Self::read_response) and released by [`close`](Self::close).
/// A closed connection cannot be reopened.
///
/// The parsers are owned by the connection and reset before each use.
pub struct HttpConnection<C: LocalConnector> {
    host: String,
    port: u16,
    connector: C,
    state: State<C::Stream>,
    head_parser: ResponseHeadParser,
    size_parser: ChunkSizeParser,
    trailer_parser: TrailerParser,
    read_chunk_size: usize,
    request_method: Option<Method>,
}

impl<C: LocalConnector> fmt::Debug for HttpConnection<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            State::Unopened => "unopened",
            State::Open(_) => "open",
            State::Closed => "closed",
        };
        f.debug_struct("HttpConnection")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("state", &state)
            .finish_non_exhaustive()
    }
}

impl<C: LocalConnector> HttpConnection<C> {
    pub fn new(host: impl Into<String>, port: u16, connector: C, config: &ClientConfig) -> Self {
        Self {
            host: host.into(),
            port,
            connector,
            state: State::Unopened,
            head_parser: ResponseHeadParser::new(config.max_headers, config.max_header_bytes),
            size_parser: ChunkSizeParser::new(config.max_header_bytes),
            trailer_parser: TrailerParser::new(config.max_headers, config.max_header_bytes),
            read_chunk_size: config.read_chunk_size,
            request_method: None,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, State::Open(_))
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, State::Closed)
    }

    async fn stream(&mut self) -> Result<&mut PushBackStream<C::Stream>, ClientError> {
        if matches!(self.state, State::Unopened) {
            let stream = self.connector.connect(&self.host, self.port).await?;
            debug!(host = %self.host, port = self.port, "connection opened");
            self.state = State::Open(PushBackStream::with_read_size(stream, self.read_chunk_size));
        }

        match &mut self.state {
            State::Open(stream) => Ok(stream),
            _ => Err(ClientError::ConnectionClosed),
        }
    }

    /// Writes the request head, then the body if there is one, then flushes.
    ///
    /// With a body, `Content-Length` is set to its length and placed before every other
    /// header; a caller supplied `Content-Length` is dropped.
    pub async fn send_request(
        &mut self,
        method: &Method,
        target: &str,
        body: Option<&[u8]>,
        headers: RequestHeaders,
    ) -> Result<(), ClientError> {
        let mut head = RequestHead::new(method.clone(), target, headers);
        if let Some(body) = body {
            head.headers_mut().insert_first(CONTENT_LENGTH, body.len());
        }
        let head_bytes = encode_request_head(&head)?;

        let stream = self.stream().await?;
        stream.write_all(&head_bytes).await?;
        if let Some(body) = body.filter(|body| !body.is_empty()) {
            stream.write_all(body).await?;
        }
        stream.flush().await?;
        self.request_method = Some(method.clone());

        debug!(%method, request_target = target, head_size = head_bytes.len(), body_size = body.map(<[u8]>::len), "request sent");
        Ok(())
    }

    /// Reads a complete response.
    ///
    /// A chunked body is decoded and its trailer fields are appended to the headers.
    /// Otherwise the body is completed up to `Content-Length`; without one, the body is
    /// whatever arrived together with the head.
    pub async fn read_response(&mut self) -> Result<ResponseHead, ClientError> {
        let read_chunk_size = self.read_chunk_size;
        self.stream().await?;
        let State::Open(stream) = &mut self.state else {
            return Err(ClientError::ConnectionClosed);
        };

        let mut head = read_head(stream, &mut self.head_parser, read_chunk_size).await?;
        debug!(status = head.status, reason = %head.reason, version = ?head.version, "response head received");

        if !response_has_body(self.request_method.as_ref(), head.status) {
            trace!(status = head.status, "response carries no body");
            head.body.clear();
            return Ok(head);
        }

        if head.is_chunked() {
            let partial = mem::take(&mut head.body);
            let chunked = ChunkedBodyReader::new(stream, &mut self.size_parser, &mut self.trailer_parser, read_chunk_size)
                .read_body(partial)
                .await?;
            head.body = chunked.body;
            // repeated values of one field come back with no name
            let mut current = None;
            for (name, value) in chunked.trailers {
                if name.is_some() {
                    current = name;
                }
                if let Some(name) = &current {
                    head.headers.append(name.clone(), value);
                }
            }
            return Ok(head);
        }

        let content_length = head
            .content_length()
            .map_err(|raw| ClientError::malformed(format!("invalid content-length header {raw:?}")))?;

        if let Some(length) = content_length {
            let length = usize::try_from(length).map_err(|_| ClientError::malformed(format!("content-length {length} too large")))?;
            let captured = head.body.len();
            if captured < length {
                let rest = stream.read_exactly(length - captured).await?;
                head.body.extend_from_slice(&rest);
            } else if captured > length {
                trace!(captured, length, "dropping bytes past content-length");
                head.body.truncate(length);
            }
        }

        Ok(head)
    }

    /// Releases the transport. Calling it again, or on a never opened connection, does nothing
    /// beyond marking the connection closed.
    pub async fn close(&mut self) {
        if let State::Open(mut stream) = mem::replace(&mut self.state, State::Closed) {
            match stream.close().await {
                Ok(()) => debug!(host = %self.host, port = self.port, "connection closed"),
                Err(e) => warn!(cause = %e, host = %self.host, "failed to shut down connection"),
            }
        }
    }
}

/// Responses to HEAD, and 1xx, 204 and 304 responses, end with the header block
/// whatever their `Content-Length` says.
fn response_has_body(method: Option<&Method>, status: u16) -> bool {
    !matches!(method, Some(&Method::HEAD)) && !matches!(status, 100..=199 | 204 | 304)
}
