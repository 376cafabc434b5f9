//! HTTP head processing: the response head parser and the request head encoder
//!
//! - [`ResponseHeadParser`]: parses a response status line and header block
//!   - Drives `httparse` incrementally over a growing buffer
//!   - Enforces header count and size limits
//!
//! - [`RequestHeadEncoder`]: writes the request line and header block
//!   - Preserves caller header order and casing
//!   - Expands list-valued headers into repeated lines

mod request_encoder;
mod response_head_parser;

pub use request_encoder::RequestHeadEncoder;
pub use request_encoder::encode_request_head;
pub use response_head_parser::ResponseHeadParser;
pub use response_head_parser::{DEFAULT_MAX_HEADERS, DEFAULT_MAX_HEADER_BYTES};
