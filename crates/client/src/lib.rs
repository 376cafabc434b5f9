//! An asynchronous micro HTTP/1.1 client transport
//!
//! This crate owns the TCP connection for a single request: it serializes the
//! request line, headers and body onto the wire, then parses the response back
//! into a status, a header map and a body, decoding chunked transfer coding
//! along the way. Redirects, retries and connection reuse are left to the layer
//! above.
//!
//! # Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use http::Method;
//! use micro_http_client::{HttpAdapter, RequestHeaders};
//!
//! # async fn run() -> Result<(), micro_http_client::ClientError> {
//! let adapter = HttpAdapter::new();
//!
//! let headers = RequestHeaders::from([("Accept", "text/plain")]);
//! let response = adapter.make_request(Method::GET, "http://example.test/", None, headers).await?;
//! let (status, headers, body) = response.into_parts();
//! println!("{status} {headers:?} {} bytes", body.len());
//!
//! let body = Bytes::from_static(b"hello there");
//! adapter.make_request("post", "http://example.test/echo", Some(body), RequestHeaders::new()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`adapter`]: [`HttpAdapter`], one connection per request, always closed
//! - [`connection`]: [`HttpConnection`](connection::HttpConnection) and the chunked body reader
//! - [`codec`]: request head encoding and the incremental response parsers
//! - [`io`]: the [`Connector`](io::Connector) transport seam and the push-back stream
//! - [`protocol`]: request/response types and errors
//!
//! # Reading a response
//!
//! The status line and headers are read in fixed-size pieces (16KB by default) and
//! re-parsed until complete. Bytes that arrived after the header block are either
//! the start of the body or, for a chunked body, the start of the first chunk-size
//! line. In the chunked case they are pushed back onto the stream and every chunk
//! size line goes through the same read-parse-push-back cycle.
//!
//! # Error Handling
//!
//! Every operation returns [`ClientError`]:
//!
//! - `Connection`: the transport could not be opened, read or written
//! - `MalformedResponse`: bad status line, bad chunk framing, or the peer closed
//!   the stream before the response was complete
//!
//! # Limitations
//!
//! - HTTP/1.1 only, one request per connection
//! - No TLS; plug a TLS stream in through [`Connector`](io::Connector)
//! - No timeouts

pub mod adapter;
pub mod codec;
pub mod config;
pub mod connection;
pub mod io;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;

#[cfg(test)]
mod test_util;

pub use adapter::HttpAdapter;
pub use config::ClientConfig;
pub use protocol::{ClientError, ClientResponse, FieldValue, RequestHeaders};
