//! Transport plumbing: the [`Connector`] that opens streams, and the
//! [`PushBackStream`] that lets parsers return bytes they read too early.

mod connector;
mod push_back;

pub use connector::{Connector, LocalConnector, TcpConnector};
pub use push_back::PushBackStream;
