//! App access token sources
//!
//! The SDK never fetches or caches app-level tokens itself. Requests that need
//! one ask a [`TokenSource`], which the caller backs with whatever store and
//! refresh policy they run.

use std::future::Future;

use tokio::sync::RwLock;

use crate::error::WechatError;
use crate::types::AccessToken;

/// Supplies the current app access token.
pub trait TokenSource: Send + Sync + 'static {
    fn access_token(&self) -> impl Future<Output = Result<String, WechatError>> + Send;
}

/// Token holder that the caller keeps up to date.
///
/// # Example
///
/// ```rust
/// use wechat_platform_sdk::token::{SharedToken, TokenSource};
/// use wechat_platform_sdk::types::AccessToken;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let holder = SharedToken::empty();
/// assert!(holder.access_token().await.is_err());
///
/// holder.set(AccessToken::new("fresh_token").unwrap()).await;
/// assert_eq!(holder.access_token().await.unwrap(), "fresh_token");
/// # }
/// ```
#[derive(Debug, Default)]
pub struct SharedToken {
    token: RwLock<Option<AccessToken>>,
}

impl SharedToken {
    pub fn new(token: AccessToken) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Replace the held token.
    pub async fn set(&self, token: AccessToken) {
        *self.token.write().await = Some(token);
    }

    /// Drop the held token; requests proceed without one until the next `set`.
    pub async fn clear(&self) {
        *self.token.write().await = None;
    }
}

impl TokenSource for SharedToken {
    async fn access_token(&self) -> Result<String, WechatError> {
        self.token
            .read()
            .await
            .as_ref()
            .map(|token| token.as_str().to_string())
            .ok_or_else(|| WechatError::Token("no access token has been set".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shared_token_returns_current_value() {
        let holder = SharedToken::new(AccessToken::new("first").unwrap());
        assert_eq!(holder.access_token().await.unwrap(), "first");

        holder.set(AccessToken::new("second").unwrap()).await;
        assert_eq!(holder.access_token().await.unwrap(), "second");
    }

    #[tokio::test]
    async fn test_cleared_token_is_an_error() {
        let holder = SharedToken::new(AccessToken::new("first").unwrap());
        holder.clear().await;

        let err = holder.access_token().await.unwrap_err();
        assert!(matches!(err, WechatError::Token(_)));
    }
}
