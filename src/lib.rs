//! WeChat platform SDK for Rust
//!
//! Server-side helpers for the web authorization flows of the WeChat
//! ecosystem:
//!
//! | Surface | Coverage |
//! |---------|----------|
//! | Official account | OAuth links, code exchange, user info, JS-SDK tickets |
//! | Open platform | Pre-auth code, authorization links, authorizer passthroughs |
//! | WeCom | OAuth and SSO links, member lookup, application messaging |
//!
//! The SDK does not cache tokens or tickets. Application access tokens are
//! supplied by the caller through a [`token::TokenSource`] and attached to
//! requests by [`middleware::AccessTokenLayer`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wechat_platform_sdk::{OfficialAccount, WechatClient};
//! use wechat_platform_sdk::middleware::AccessTokenLayer;
//! use wechat_platform_sdk::token::SharedToken;
//! use wechat_platform_sdk::types::{AccessToken, AppId, AppSecret};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let token = Arc::new(SharedToken::new(AccessToken::new("app_token")?));
//!     let client = WechatClient::builder()
//!         .with_middleware(AccessTokenLayer::new(token))
//!         .build()?;
//!
//!     let account = OfficialAccount::new(
//!         AppId::new("wx1234567890abcdef")?,
//!         AppSecret::new("your_secret")?,
//!         Arc::new(client),
//!     );
//!
//!     // Send the user here, then exchange the `code` WeChat redirects back with
//!     let url = account.authorize_url("https://example.com/callback", "snsapi_userinfo", "xyz");
//!     println!("{url}");
//!
//!     let token = account.exchange_code("code_from_redirect").await?;
//!     let user = account.user_info(&token.access_token, &token.openid, "zh_CN").await?;
//!     println!("Nickname: {}", user.nickname);
//!
//!     let ticket = account.jsapi_ticket().await?;
//!     println!("Ticket: {}", ticket.ticket);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`api`] - Official account, open platform and WeCom helpers
//! - [`client`] - HTTP client and the [`Transport`] seam
//! - [`error`] - Error types
//! - [`middleware`] - Tower layers (token injection, logging)
//! - [`token`] - Caller-supplied access token sources
//! - [`types`] - Validated identifiers
//!
//! ## Error Handling
//!
//! ```rust,ignore
//! use wechat_platform_sdk::WechatError;
//!
//! match account.exchange_code(code).await {
//!     Ok(token) => { /* handle success */ }
//!     Err(WechatError::Http(e)) => eprintln!("HTTP error: {}", e),
//!     // Provider errors such as {"errcode":40029,...} land here with the raw body
//!     Err(WechatError::Decode { body, .. }) => eprintln!("Unexpected response: {}", body),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod middleware;
pub mod token;
pub mod types;
mod utils;

pub use api::{OfficialAccount, OpenPlatform, WorkAgent, WorkMessageApi};
pub use client::{Transport, WechatClient, WechatClientBuilder};
pub use error::WechatError;
