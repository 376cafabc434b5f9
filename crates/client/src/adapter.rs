//! The request entry point.
//!
//! [`HttpAdapter::make_request`] opens a fresh connection per call, sends one request,
//! reads one response and closes the connection on every path out, successful or not.

use std::fmt::Display;

use bytes::Bytes;
use http::{StatusCode, Uri};
use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::connection::HttpConnection;
use crate::io::{LocalConnector, TcpConnector};
use crate::protocol::{ClientError, ClientResponse, RequestHeaders, parse_method};

const USER_AGENT: &str = "User-Agent";

/// Sends single requests, each over its own connection.
#[derive(Debug, Clone, Default)]
pub struct HttpAdapter<C = TcpConnector> {
    connector: C,
    config: ClientConfig,
}

impl HttpAdapter {
    /// An adapter using plain TCP and the default [`ClientConfig`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self { connector: TcpConnector, config }
    }
}

impl<C> HttpAdapter<C>
where
    C: LocalConnector + Clone,
{
    pub fn with_connector(connector: C, config: ClientConfig) -> Self {
        Self { connector, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Makes one request and returns the status, headers and body of the response.
    ///
    /// `method` is matched case-insensitively and sent upper-case. The request target is
    /// the uri rendered in full. The port defaults to
    /// [`ClientConfig::default_port`] when the uri has none.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidMethod`] / [`ClientError::InvalidUri`] before anything is sent
    /// - [`ClientError::Connection`] when the transport fails
    /// - [`ClientError::MalformedResponse`] when the response cannot be parsed or ends early
    pub async fn make_request<M, U>(
        &self,
        method: M,
        uri: U,
        body: Option<Bytes>,
        mut headers: RequestHeaders,
    ) -> Result<ClientResponse, ClientError>
    where
        M: AsRef<str>,
        U: TryInto<Uri>,
        U::Error: Display,
    {
        let method = method.as_ref();
        let method = parse_method(method).ok_or_else(|| ClientError::invalid_method(method))?;
        let uri: Uri = uri.try_into().map_err(ClientError::invalid_uri)?;
        let host = uri.host().ok_or_else(|| ClientError::invalid_uri(format!("{uri} has no host")))?.to_owned();
        let port = uri.port_u16().unwrap_or(self.config.default_port);
        let target = uri.to_string();

        if let Some(user_agent) = &self.config.user_agent
            && !headers.contains(USER_AGENT)
        {
            headers.append(USER_AGENT, user_agent.as_str());
        }

        let mut connection = HttpConnection::new(host, port, self.connector.clone(), &self.config);
        let result = exchange(&mut connection, &method, &target, body.as_deref(), headers).await;
        connection.close().await;

        match &result {
            Ok(response) => {
                debug!(%method, %uri, status = %response.status(), body_size = response.body().len(), "request finished");
            }
            Err(e) => error!(%method, %uri, cause = %e, "request failed"),
        }
        result
    }
}

async fn exchange<C: LocalConnector>(
    connection: &mut HttpConnection<C>,
    method: &http::Method,
    target: &str,
    body: Option<&[u8]>,
    headers: RequestHeaders,
) -> Result<ClientResponse, ClientError> {
    connection.send_request(method, target, body, headers).await?;
    let head = connection.read_response().await?;

    let status = StatusCode::from_u16(head.status).map_err(|_| ClientError::malformed(format!("invalid status code {}", head.status)))?;
    Ok(ClientResponse::new(status, head.headers, head.body.freeze()))
}
