//! WeChat HTTP Client module
//!
//! This module contains the [`Transport`] abstraction and its reqwest-backed
//! implementation, [`WechatClient`].

mod transport;
pub use transport::{Transport, CONTENT_TYPE_JSON};

mod wechat_client;
pub use wechat_client::{WechatClient, OFFICIAL_API_BASE_URL, WORK_API_BASE_URL};

mod builder;
pub use builder::WechatClientBuilder;
