//! The incremental parser contract driven by the connection.
//!
//! A parser is fed the whole buffer accumulated so far on every call, together
//! with the count it returned last time. It never reads from the stream itself:
//! the connection owns the read loop and the push-back of unconsumed bytes.

use crate::protocol::ParseError;

/// An incremental parser for a CRLF-delimited head: a response status line and
/// header block, a chunk-size line, or a chunk trailer section.
pub trait HeadParser {
    /// The record populated by [`execute`](Self::execute).
    type Output: Default;

    /// Clears all state left from a previous parse.
    fn reset(&mut self);

    /// Parses `buffer`, which starts at the beginning of the head.
    ///
    /// `offset` is the value returned by the previous call for the same head (zero on
    /// the first call). Returns the number of bytes consumed. Once the head is
    /// complete, any bytes of `buffer` beyond it are stored in `output` so that the
    /// caller can hand them back to the stream.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the bytes can never form a valid head, or if the
    /// head grows past the configured size limit.
    fn execute(&mut self, output: &mut Self::Output, buffer: &[u8], offset: usize) -> Result<usize, ParseError>;

    /// Returns true once a complete head has been parsed since the last [`reset`](Self::reset).
    fn finished(&self) -> bool;
}
