//! Middleware for automatic app access token injection.
//!
//! Appends the token from a [`TokenSource`] to each outgoing request as a
//! query parameter. Official account and WeCom APIs read it from
//! `access_token`; open platform component APIs read it from
//! `component_access_token`.
//!
//! Requests are left untouched when they already carry the parameter, or when
//! their path is under `/sns/`: those endpoints authenticate with the app
//! secret or with a user's web access token instead.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wechat_platform_sdk::client::WechatClient;
//! use wechat_platform_sdk::middleware::AccessTokenLayer;
//! use wechat_platform_sdk::token::SharedToken;
//!
//! let token = Arc::new(SharedToken::empty());
//! let client = WechatClient::builder()
//!     .with_middleware(AccessTokenLayer::new(token).component())
//!     .build()?;
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use reqwest::{Request as ReqwestRequest, Url};
use tower::{Layer, Service};

use crate::token::TokenSource;

/// Query key for official account and WeCom tokens.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Query key for open platform component tokens.
pub const COMPONENT_ACCESS_TOKEN_KEY: &str = "component_access_token";

const TOKENLESS_PATH_PREFIX: &str = "/sns/";

/// Layer that injects the app access token into requests.
pub struct AccessTokenLayer<S> {
    source: Arc<S>,
    query_key: &'static str,
}

impl<S: TokenSource> AccessTokenLayer<S> {
    /// Inject the token as `access_token`.
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            query_key: ACCESS_TOKEN_KEY,
        }
    }

    /// Inject the token as `component_access_token`.
    pub fn component(mut self) -> Self {
        self.query_key = COMPONENT_ACCESS_TOKEN_KEY;
        self
    }

    pub fn query_key(&self) -> &'static str {
        self.query_key
    }
}

impl<S> Clone for AccessTokenLayer<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            query_key: self.query_key,
        }
    }
}

impl<S, Inner> Layer<Inner> for AccessTokenLayer<S> {
    type Service = AccessTokenService<S, Inner>;

    fn layer(&self, inner: Inner) -> Self::Service {
        AccessTokenService {
            inner,
            source: Arc::clone(&self.source),
            query_key: self.query_key,
        }
    }
}

/// Service created by [`AccessTokenLayer`].
pub struct AccessTokenService<S, Inner> {
    inner: Inner,
    source: Arc<S>,
    query_key: &'static str,
}

impl<S, Inner: Clone> Clone for AccessTokenService<S, Inner> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            source: Arc::clone(&self.source),
            query_key: self.query_key,
        }
    }
}

impl<S, Inner> Service<ReqwestRequest> for AccessTokenService<S, Inner>
where
    S: TokenSource,
    Inner: Service<ReqwestRequest> + Clone + Send + 'static,
    Inner::Future: Send,
{
    type Response = Inner::Response;
    type Error = Inner::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: ReqwestRequest) -> Self::Future {
        let source = Arc::clone(&self.source);
        let query_key = self.query_key;
        let mut inner = self.inner.clone();

        Box::pin(async move {
            if !needs_token(req.url(), query_key) {
                return inner.call(req).await;
            }

            match source.access_token().await {
                Ok(token) => {
                    let url = req.url().clone();
                    *req.url_mut() = append_token(&url, query_key, &token);
                }
                Err(e) => {
                    log::warn!("Failed to fetch access token: {}", e);
                }
            }

            inner.call(req).await
        })
    }
}

fn needs_token(url: &Url, query_key: &str) -> bool {
    if url.path().starts_with(TOKENLESS_PATH_PREFIX) {
        return false;
    }
    !url.query_pairs().any(|(key, _)| key == query_key)
}

fn append_token(url: &Url, query_key: &str, token: &str) -> Url {
    let mut url = url.clone();
    url.query_pairs_mut().append_pair(query_key, token);
    url
}
