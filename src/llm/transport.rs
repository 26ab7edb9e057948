//! HTTP seam between the gateway and the network.
//!
//! The gateway only ever hands a built [`ProviderRequest`] to a
//! [`HttpTransport`] and gets back status plus body, so tests swap in a fake.

use std::time::Duration;

use super::config::Timeouts;
use super::types::{GenerationError, HttpReply, ProviderRequest};

/// Sends a JSON `POST` and returns the raw reply. Non-2xx statuses are
/// replies, not errors; only network-level failures are `Err`.
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    /// # Errors
    ///
    /// Returns `TransportFailure` when the request cannot be sent or the
    /// body cannot be read.
    async fn post_json(&self, request: &ProviderRequest) -> Result<HttpReply, GenerationError>;
}

/// [`HttpTransport`] backed by a shared `reqwest::Client`.
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns the builder error if the TLS backend cannot initialize.
    pub fn new(timeouts: Timeouts) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(&self, request: &ProviderRequest) -> Result<HttpReply, GenerationError> {
        let mut builder = self.http.post(&request.url).json(&request.body);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        // Strip the URL from reqwest errors; Gemini carries the key in the query.
        let resp = builder
            .send()
            .await
            .map_err(|e| GenerationError::TransportFailure(e.without_url().to_string()))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| GenerationError::TransportFailure(e.without_url().to_string()))?;

        Ok(HttpReply { status, body })
    }
}
