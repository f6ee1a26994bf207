use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode, Url};
use tracing::debug;

use crate::client::ClientConfig;
use crate::error::{BidError, Result};

/// A single outbound request issued by [`BidClient`](crate::BidClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    /// JSON body, if any.
    pub body: Option<Vec<u8>>,
}

/// The parts of a response the client looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Sends requests on behalf of the client.
///
/// Implementations only move bytes; status handling and decoding stay in
/// the client, so a substitute transport sees exactly what the network would.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.as_ref().send(request).await
    }
}

/// [`Transport`] backed by a [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with the [`ClientConfig::default`] timeout and user agent.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`reqwest::Client::new`]: the TLS
    /// backend or system resolver cannot be initialized.
    pub fn new() -> Self {
        let http = build_http(&ClientConfig::default())
            .expect("failed to initialize the default http client");
        Self { http }
    }

    /// Use the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure proxies, extra headers, etc.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { http: client }
    }

    /// Build a client with the timeout and user agent from `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let http = build_http(config).map_err(BidError::ClientBuild)?;
        Ok(Self { http })
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn build_http(config: &ClientConfig) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(config.timeout)
        .build()
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = request.url.to_string();
        debug!(method = %request.method, url = %url, "sending request");

        let mut builder = self.http.request(request.method, request.url);
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = builder.send().await.map_err(|e| BidError::Http {
            url: url.clone(),
            source: e,
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| BidError::ResponseBody {
            url: url.clone(),
            source: e,
        })?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}
