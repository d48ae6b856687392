//! HTTP transport: POSTs the request and streams the response body.

use super::{ChatRequest, Rejection, Reply, Transport};
use crate::{Error, Result};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use std::time::Duration;
use tracing::debug;

/// Configuration for [`HttpTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Full URL of the chat endpoint.
    pub endpoint: String,
    /// Time allowed to establish the connection.
    pub connect_timeout: Duration,
    /// Time allowed for the whole exchange, body included. `None` lets long
    /// replies stream for as long as the server keeps sending.
    pub timeout: Option<Duration>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8000/api/chat".to_string(),
            connect_timeout: Duration::from_secs(10),
            timeout: None,
        }
    }
}

/// [`Transport`] over a blocking reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: HttpConfig,
}

impl HttpTransport {
    /// Build a transport, validating the endpoint.
    pub fn new(config: HttpConfig) -> Result<Self> {
        reqwest::Url::parse(&config.endpoint).map_err(|e| {
            Error::InvalidConfig(format!("invalid endpoint {:?}: {e}", config.endpoint))
        })?;

        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    /// The active configuration.
    pub const fn config(&self) -> &HttpConfig {
        &self.config
    }

    fn map_send_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout(self.timeout_limit(err.is_connect()))
        } else {
            Error::Http(err)
        }
    }

    /// The limit that expired: the connect timeout while connecting, else
    /// the exchange timeout.
    fn timeout_limit(&self, connecting: bool) -> Duration {
        match self.config.timeout {
            Some(limit) if !connecting => limit,
            _ => self.config.connect_timeout,
        }
    }
}

impl Transport for HttpTransport {
    fn open(&self, request: &ChatRequest) -> Result<Reply> {
        debug!(endpoint = %self.config.endpoint, chars = request.message.chars().count(), "posting chat request");

        let response = self
            .client
            .post(&self.config.endpoint)
            .header(ACCEPT, "text/event-stream")
            .header(CACHE_CONTROL, "no-cache")
            .json(request)
            .send()
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(Reply::Stream(Box::new(response)));
        }

        let reason = status.canonical_reason().map(str::to_owned);
        // An unreadable error body is treated as empty; the reason phrase
        // still gives the user something.
        let body = response.text().unwrap_or_default();
        debug!(status = status.as_u16(), "chat request rejected");
        Ok(Reply::Rejected(Rejection::new(status.as_u16(), reason, body)))
    }
}
