//! Parsers for the framing lines of a chunked body
//!
//! - [`ChunkSizeParser`]: parses the hex size line that starts each chunk
//! - [`TrailerParser`]: parses the trailer section after the zero-size chunk
//!
//! Payload bytes themselves are not parsed here; the chunked body reader takes
//! them straight from the push-back stream.

mod chunk_size_parser;
mod trailer_parser;

pub use chunk_size_parser::ChunkSizeParser;
pub use trailer_parser::TrailerParser;
