//! WeChat platform API modules
//!
//! - [`common`] - Shared response primitives and JSON request helpers
//! - [`official_account`] - Official account web OAuth and JS-SDK tickets
//! - [`open_platform`] - Third-party platform authorization
//! - [`work`] - WeCom web OAuth and QR-code SSO
//! - [`work_message`] - WeCom application messaging
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wechat_platform_sdk::api::OfficialAccount;
//! use wechat_platform_sdk::types::{AppId, AppSecret};
//!
//! let account = OfficialAccount::new(
//!     AppId::new("wx1234567890abcdef")?,
//!     AppSecret::new("secret")?,
//!     Arc::new(client),
//! );
//! let url = account.authorize_url("https://example.com/cb", "snsapi_base", "state");
//! ```

pub mod common;
pub mod official_account;
pub mod open_platform;
pub mod work;
pub mod work_message;

pub use common::{ApiResponseBase, WechatApiResponse};
pub use official_account::{
    ApiTicket, OauthAccessToken, OauthUserInfo, OfficialAccount, TicketType,
};
pub use open_platform::{OpenPlatform, PreAuthCode};
pub use work::{WorkAgent, WorkUserInfo};
pub use work_message::WorkMessageApi;
