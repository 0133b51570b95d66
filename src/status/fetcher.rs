//! Network seam for the backend root request.
//!
//! The status panel only needs the status code and the raw body of
//! `GET <apiBase>/`, so the trait returns exactly that. `ReqwestFetcher` is the
//! production implementation; tests supply their own.

use async_trait::async_trait;
use http::StatusCode;

/// Error for a request that did not produce an HTTP response.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Failure described only by its message (used by non-reqwest fetchers)
    #[error("{0}")]
    Message(String),
}

/// Reply to the backend root request.
///
/// `body` is `None` when the response arrived but its body could not be read;
/// the panel treats that the same as an unparseable body.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: StatusCode,
    pub body: Option<Vec<u8>>,
}

impl HttpReply {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: Some(body.into()),
        }
    }

    pub fn empty(status: StatusCode) -> Self {
        Self { status, body: None }
    }
}

/// Performs the single GET the status panel issues on mount.
#[async_trait]
pub trait HealthFetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpReply, FetchError>;
}

/// `HealthFetcher` backed by a shared `reqwest::Client`.
#[derive(Clone, Default)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HealthFetcher for ReqwestFetcher {
    async fn get(&self, url: &str) -> Result<HttpReply, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        // Only a 2xx body is ever inspected
        if !status.is_success() {
            return Ok(HttpReply::empty(status));
        }

        match response.bytes().await {
            Ok(bytes) => Ok(HttpReply::new(status, bytes.to_vec())),
            Err(e) => {
                tracing::debug!(error = %e, %url, "Failed to read backend response body");
                Ok(HttpReply::empty(status))
            }
        }
    }
}
