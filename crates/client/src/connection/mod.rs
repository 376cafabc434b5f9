//! HTTP connection handling module
//!
//! # Components
//!
//! - [`HttpConnection`]: one connection to one `(host, port)`:
//!   - Opens the transport lazily and closes it exactly once
//!   - Writes the request head and body
//!   - Reads the response head, then a `Content-Length` or chunked body
//! - [`ChunkedBodyReader`]: decodes a chunked body over the connection's stream,
//!   pushing back whatever each chunk-size parse read too far

mod chunked_body;
mod head_reader;
mod http_connection;

pub use chunked_body::{ChunkedBody, ChunkedBodyReader};
pub use http_connection::HttpConnection;
