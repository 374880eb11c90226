use async_trait::async_trait;
use tracing::{trace, warn};
use url::Url;

use crate::error::TransportError;

/// Everything the transport observed for one request.
///
/// A transport error and a status code may both be present, e.g. when the
/// connection dropped while reading the body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: Option<u16>,
    pub body: Option<Vec<u8>>,
    pub error: Option<TransportError>,
}

impl TransportResponse {
    /// A completed exchange with a status code and body.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: Some(status),
            body: Some(body.into()),
            error: None,
        }
    }

    /// A completed exchange without a body.
    pub fn status_only(status: u16) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// An exchange that failed in the transport.
    pub fn failed(error: TransportError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }
}

/// Issues HTTP GET requests.
///
/// Implementations own timeouts, connection pooling and the threads the
/// request runs on. `get` resolves exactly once per call.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn get(&self, url: Url) -> TransportResponse;
}

/// A [`Transport`] backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with a default `reqwest` client.
    pub fn new() -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("snip/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::new(e.to_string()))?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: Url) -> TransportResponse {
        trace!(url = %url, "Sending GET request");

        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "GET request failed");
                return TransportResponse::failed(TransportError::new(e.to_string()));
            }
        };

        let status = response.status().as_u16();
        match response.bytes().await {
            Ok(body) => TransportResponse::new(status, body.to_vec()),
            Err(e) => {
                warn!(status, error = %e, "Failed to read response body");
                TransportResponse {
                    status: Some(status),
                    body: None,
                    error: Some(TransportError::new(e.to_string())),
                }
            }
        }
    }
}
