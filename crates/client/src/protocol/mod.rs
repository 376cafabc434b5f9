//! Core HTTP client protocol types.
//!
//! - **Request side** (`request`): [`RequestHead`], [`RequestHeaders`] and the
//!   [`FieldValue`] tagged union for single and list-valued headers
//! - **Response side** (`response`): [`ResponseHead`] as filled in by the head
//!   parser, and the finished [`ClientResponse`]
//! - **Chunked bodies** (`chunk`): [`ChunkHead`] and [`Trailer`]
//! - **Errors** (`error`): [`ClientError`], [`ParseError`], [`StreamError`]

mod request;
pub use request::FieldValue;
pub use request::RequestHead;
pub use request::RequestHeaders;
pub(crate) use request::parse_method;

mod response;
pub use response::ClientResponse;
pub use response::ResponseHead;

mod chunk;
pub use chunk::ChunkHead;
pub use chunk::Trailer;

mod error;
pub use error::ClientError;
pub use error::ParseError;
pub use error::StreamError;
