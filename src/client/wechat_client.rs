//! WeChat HTTP Client
//!
//! Provides the reqwest-backed [`Transport`] used by the API components.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tower::Service;

use super::builder::WechatClientBuilder;
use super::transport::Transport;
use crate::error::{HttpError, WechatError};

/// Base URL of the official account and open platform APIs.
pub const OFFICIAL_API_BASE_URL: &str = "https://api.weixin.qq.com";
/// Base URL of the WeCom (enterprise WeChat) APIs.
pub const WORK_API_BASE_URL: &str = "https://qyapi.weixin.qq.com";

pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub(crate) const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

pub(crate) type MiddlewareFuture =
    Pin<Box<dyn Future<Output = Result<reqwest::Response, reqwest::Error>> + Send>>;
pub(crate) type MiddlewareExecutor =
    Arc<dyn Fn(reqwest::Request) -> MiddlewareFuture + Send + Sync>;

/// WeChat API Client
///
/// Reusable HTTP client for calling WeChat APIs. Requests go through the
/// configured tower middleware (see [`crate::middleware`]) when one is set.
#[derive(Clone)]
pub struct WechatClient {
    http: Client,
    base_url: String,
    middleware_executor: Option<MiddlewareExecutor>,
}

impl std::fmt::Debug for WechatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WechatClient")
            .field("base_url", &self.base_url)
            .field(
                "middleware_executor",
                &self.middleware_executor.as_ref().map(|_| ".."),
            )
            .finish_non_exhaustive()
    }
}

impl WechatClient {
    /// Create a new client builder
    pub fn builder() -> WechatClientBuilder {
        WechatClientBuilder::default()
    }

    pub(crate) fn new(http: Client, base_url: String) -> Self {
        Self {
            http,
            base_url,
            middleware_executor: None,
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn with_middleware_executor(mut self, executor: MiddlewareExecutor) -> Self {
        self.middleware_executor = Some(executor);
        self
    }

    async fn send_request(
        &self,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, reqwest::Error> {
        if let Some(executor) = &self.middleware_executor {
            (executor)(request).await
        } else {
            self.http.execute(request).await
        }
    }

    async fn execute(&self, request: reqwest::Request) -> Result<Vec<u8>, WechatError> {
        let response = self.send_request(request).await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(HttpError::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            }
            .into());
        }

        Ok(body.to_vec())
    }
}

impl Transport for WechatClient {
    /// Make a GET request to WeChat API
    ///
    /// # Errors
    /// Returns `WechatError::Http` for network failures and non-2xx status codes
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<u8>, WechatError> {
        let url = format!("{}{}", self.base_url, path);
        let request = self.http.get(url).query(query).build()?;
        self.execute(request).await
    }

    /// Make a POST request to WeChat API
    ///
    /// # Errors
    /// Returns `WechatError::Http` for network failures and non-2xx status codes
    async fn post(
        &self,
        path: &str,
        body: &[u8],
        content_type: &str,
    ) -> Result<Vec<u8>, WechatError> {
        let url = format!("{}{}", self.base_url, path);
        let request = self
            .http
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .body(body.to_vec())
            .build()?;
        self.execute(request).await
    }
}

impl Service<reqwest::Request> for WechatClient {
    type Response = reqwest::Response;
    type Error = reqwest::Error;
    type Future = MiddlewareFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: reqwest::Request) -> Self::Future {
        let client = self.http.clone();
        Box::pin(async move { client.execute(req).await })
    }
}
