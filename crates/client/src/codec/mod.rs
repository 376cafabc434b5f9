//! HTTP codec module for encoding requests and parsing responses
//!
//! # Architecture
//!
//! - Request side:
//!   - [`RequestHeadEncoder`]: encodes the request line and header block
//!
//! - Response side, all implementing [`HeadParser`]:
//!   - [`ResponseHeadParser`]: the status line and header block
//!   - [`ChunkSizeParser`]: one chunk-size line of a chunked body
//!   - [`TrailerParser`]: the trailer section ending a chunked body
//!
//! Parsers never touch the network. The connection reads bytes, feeds them to a
//! parser until it reports [`HeadParser::finished`], and pushes back the bytes the
//! parser found past the end of what it parsed.

mod body;
mod head_parser;
mod header;

pub use body::{ChunkSizeParser, TrailerParser};
pub use head_parser::HeadParser;
pub use header::{DEFAULT_MAX_HEADER_BYTES, DEFAULT_MAX_HEADERS, RequestHeadEncoder, ResponseHeadParser, encode_request_head};
