//! Middleware components for the WeChat SDK.
//!
//! Middleware follows Tower patterns and is installed on a
//! [`WechatClient`](crate::client::WechatClient) through
//! [`WechatClientBuilder::with_middleware`](crate::client::WechatClientBuilder::with_middleware).
//!
//! ## Middleware Types
//!
//! - [`AccessTokenLayer`] - Injects the app access token into requests
//! - [`LoggingMiddleware`] - Logs request/response information
//!
//! ## Usage
//!
//! ```ignore
//! use tower::ServiceBuilder;
//! use wechat_platform_sdk::middleware::{AccessTokenLayer, LoggingMiddleware};
//!
//! let layers = ServiceBuilder::new()
//!     .layer(AccessTokenLayer::new(token_source))
//!     .layer(LoggingMiddleware::new());
//!
//! let client = WechatClient::builder().with_middleware(layers).build()?;
//! ```

// Re-export tower types for convenience
pub use tower::{Layer, Service, ServiceBuilder};

mod access_token;
mod logging;

pub use access_token::{
    AccessTokenLayer, AccessTokenService, ACCESS_TOKEN_KEY, COMPONENT_ACCESS_TOKEN_KEY,
};
pub use logging::{LoggingMiddleware, LoggingMiddlewareService};
