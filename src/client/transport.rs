//! Transport abstraction shared by every API component.

use std::future::Future;

use crate::error::WechatError;

/// Content type used for every JSON POST body.
pub const CONTENT_TYPE_JSON: &str = "application/json;charset=utf-8";

/// The HTTP capability the API components are built on.
///
/// `path` is relative to the transport's base URL. Implementations return the
/// raw response body; interpreting it is up to the caller. Supplying the app
/// access token, timeouts and cancellation are the transport's concern.
///
/// [`WechatClient`](super::WechatClient) is the default implementation.
pub trait Transport: Send + Sync {
    /// Issue a GET with query-encoded parameters.
    fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> impl Future<Output = Result<Vec<u8>, WechatError>> + Send;

    /// Issue a POST with the given body and content type.
    fn post(
        &self,
        path: &str,
        body: &[u8],
        content_type: &str,
    ) -> impl Future<Output = Result<Vec<u8>, WechatError>> + Send;
}
