//! Opening the transport stream for a `(host, port)` pair.

use std::io;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tracing::debug;

/// Opens byte streams to a remote host.
///
/// [`Connector`] is the `Send` variant used by [`TcpConnector`]; anything implementing
/// it also implements [`LocalConnector`].
#[trait_variant::make(Connector: Send)]
pub trait LocalConnector {
    type Stream: AsyncRead + AsyncWrite + Unpin;

    async fn connect(&self, host: &str, port: u16) -> io::Result<Self::Stream>;
}

/// Plain TCP transport.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpConnector;

impl Connector for TcpConnector {
    type Stream = TcpStream;

    async fn connect(&self, host: &str, port: u16) -> io::Result<TcpStream> {
        let stream = TcpStream::connect((host, port)).await?;
        stream.set_nodelay(true)?;
        debug!(host, port, local = ?stream.local_addr().ok(), "tcp connection established");
        Ok(stream)
    }
}
