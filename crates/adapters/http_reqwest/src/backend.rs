//! `ChartBackend` implementation over a shared reqwest client.

use std::time::Duration;

use gridgate_app::ports::ChartBackend;
use gridgate_domain::error::BackendError;

use crate::error::HttpClientError;

/// Fetches chart documents with a single reusable [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestChartBackend {
    client: reqwest::Client,
}

impl ReqwestChartBackend {
    /// Build a backend whose calls give up after `timeout`.
    ///
    /// The same bound applies to establishing the connection.
    ///
    /// # Errors
    ///
    /// Returns [`HttpClientError::Build`] if the client cannot be constructed.
    pub fn new(timeout: Duration) -> Result<Self, HttpClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(HttpClientError::Build)?;
        Ok(Self { client })
    }
}

impl ChartBackend for ReqwestChartBackend {
    async fn fetch(&self, url: &str) -> Result<serde_json::Value, BackendError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| classify(url, err))?;

        let status = response.status();
        tracing::trace!(url, status = status.as_u16(), "chart server responded");
        if !status.is_success() {
            return Err(BackendError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|err| classify(url, err))
    }
}

fn classify(url: &str, err: reqwest::Error) -> BackendError {
    let url = url.to_owned();
    if err.is_timeout() {
        BackendError::Timeout { url }
    } else if err.is_builder() {
        BackendError::InvalidUrl {
            url,
            source: Box::new(err),
        }
    } else if err.is_decode() {
        BackendError::Decode {
            url,
            source: Box::new(err),
        }
    } else {
        BackendError::Transport {
            url,
            source: Box::new(err),
        }
    }
}
