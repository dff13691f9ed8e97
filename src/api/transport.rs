use async_trait::async_trait;
use log::debug;
use reqwest::{Client, ClientBuilder};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::error::{GwsError, Result};

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Capability to issue a single HTTP GET
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one GET request. Errors are reported as [`GwsError::TransportFailure`].
    async fn get(
        &self,
        url: &Url,
        headers: &[(&'static str, String)],
        query: &[(&'static str, String)],
    ) -> Result<RawResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(
        &self,
        url: &Url,
        headers: &[(&'static str, String)],
        query: &[(&'static str, String)],
    ) -> Result<RawResponse> {
        (**self).get(url, headers, query).await
    }
}

/// Transport backed by a `reqwest` client
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with the given timeout and user agent
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .tcp_nodelay(true)
            .use_rustls_tls()
            .build()
            .map_err(|e| GwsError::TransportFailure(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(
        &self,
        url: &Url,
        headers: &[(&'static str, String)],
        query: &[(&'static str, String)],
    ) -> Result<RawResponse> {
        let mut request = self.client.get(url.clone()).query(query);
        for (name, value) in headers {
            request = request.header(*name, value);
        }

        let response = request.send().await.map_err(describe)?;
        let status = response.status().as_u16();
        debug!("GET {} -> {}", response.url().path(), status);

        let body = response.text().await.map_err(describe)?;
        Ok(RawResponse { status, body })
    }
}

fn describe(error: reqwest::Error) -> GwsError {
    let message = if error.is_timeout() {
        format!("request timed out: {}", error)
    } else if error.is_connect() {
        format!("could not connect to the API: {}", error)
    } else {
        error.to_string()
    };
    GwsError::TransportFailure(message)
}
