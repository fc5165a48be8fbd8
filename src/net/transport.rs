//! HTTP transport seam: one JSON POST, optional bearer token, raw response back.
//!
//! Browser builds (`csr`): `gloo-net` fetch.
//! Native builds: `reqwest`.
//!
//! Transports never interpret status codes; that is the gateway's job.

use serde_json::Value;

/// Network-level failure: the request produced no HTTP response.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("request failed: {0}")]
    Request(String),
    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Status and body of an HTTP response, untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }
}

/// Issues exactly one POST per call. No retries, no timeouts beyond the platform's.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// POST `body` as `application/json` to `url`.
    ///
    /// When `bearer` is `Some`, sends `Authorization: Bearer <token>`;
    /// when `None`, sends no `Authorization` header at all.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no response was received.
    async fn post_json(&self, url: &str, bearer: Option<&str>, body: &Value) -> Result<RawResponse, TransportError>;
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

#[cfg(not(target_arch = "wasm32"))]
impl HttpTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, bearer: Option<&str>, body: &Value) -> Result<RawResponse, TransportError> {
        let mut request = self.client.post(url).json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let resp = request.send().await.map_err(|e| TransportError::Request(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| TransportError::Body(e.to_string()))?;
        Ok(RawResponse { status, body })
    }
}

#[cfg(feature = "csr")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

#[cfg(feature = "csr")]
impl Transport for BrowserTransport {
    async fn post_json(&self, url: &str, bearer: Option<&str>, body: &Value) -> Result<RawResponse, TransportError> {
        let mut builder = gloo_net::http::Request::post(url);
        if let Some(token) = bearer {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }
        let resp = builder
            .json(body)
            .map_err(|e| TransportError::Request(e.to_string()))?
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| TransportError::Body(e.to_string()))?;
        Ok(RawResponse { status, body })
    }
}
