//! Common API response primitives
//!
//! Shared helpers for the request/response patterns of every component.
//!
//! ## Overview
//!
//! - [`WechatApiResponse`] trait for uniform errcode/errmsg checking
//! - [`ApiResponseBase`] struct for error-only responses
//! - [`decode_response`] turns a raw body into a typed value, keeping the body
//!   in the error when it does not fit
//! - [`get_json`] / [`post_json`] issue one request through a [`Transport`] and decode it
//!
//! ## Usage
//!
//! ```rust
//! use wechat_platform_sdk::api::common::{decode_response, ApiResponseBase, WechatApiResponse};
//!
//! let resp: ApiResponseBase = decode_response(br#"{"errcode": 0, "errmsg": "ok"}"#).unwrap();
//! assert!(resp.check().is_ok());
//!
//! let err = decode_response::<ApiResponseBase>(b"invalid_grant").unwrap_err();
//! assert_eq!(err.to_string(), "invalid_grant");
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::client::{Transport, CONTENT_TYPE_JSON};
use crate::error::WechatError;

/// Trait for WeChat API responses that carry `errcode` / `errmsg`.
pub trait WechatApiResponse {
    /// Returns the error code from the API response.
    ///
    /// `0` indicates success; any other value is an error.
    fn errcode(&self) -> i32;

    /// Returns the error message from the API response.
    fn errmsg(&self) -> &str;

    /// Returns `Ok(())` when `errcode == 0`, otherwise `WechatError::Api`.
    fn check(&self) -> Result<(), WechatError> {
        WechatError::check_api(self.errcode(), self.errmsg())
    }

    /// Returns `true` when the response indicates success (`errcode == 0`).
    fn is_success(&self) -> bool {
        self.errcode() == 0
    }
}

/// Minimal API response carrying only `errcode` and `errmsg`.
#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiResponseBase {
    /// Error code (`0` = success)
    #[serde(default, deserialize_with = "null_as_default")]
    pub errcode: i32,
    /// Error message
    #[serde(default, deserialize_with = "null_as_default")]
    pub errmsg: String,
}

impl WechatApiResponse for ApiResponseBase {
    fn errcode(&self) -> i32 {
        self.errcode
    }

    fn errmsg(&self) -> &str {
        &self.errmsg
    }
}

/// Deserialize an explicit `null` the same way as a missing field.
///
/// Pair with `#[serde(default)]` so both cases yield `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a response body.
///
/// # Errors
/// `WechatError::Decode` holding the raw body when it is not valid JSON or
/// lacks required fields.
pub fn decode_response<T: DeserializeOwned>(body: &[u8]) -> Result<T, WechatError> {
    serde_json::from_slice(body).map_err(|e| {
        log::debug!("[Wechat] response did not decode: {}", e);
        WechatError::decode(body, e)
    })
}

/// GET `path` and decode the JSON response.
pub async fn get_json<T, C>(
    transport: &C,
    path: &str,
    query: &[(&str, &str)],
) -> Result<T, WechatError>
where
    T: DeserializeOwned,
    C: Transport,
{
    let body = transport.get(path, query).await?;
    decode_response(&body)
}

/// Serialize `payload` as JSON, POST it to `path` and decode the response.
///
/// The response type must implement [`WechatApiResponse`]; a non-zero
/// `errcode` becomes `WechatError::Api`.
pub async fn post_json<T, B, C>(transport: &C, path: &str, payload: &B) -> Result<T, WechatError>
where
    T: DeserializeOwned + WechatApiResponse,
    B: Serialize + ?Sized,
    C: Transport,
{
    let request = serde_json::to_vec(payload)?;
    let body = transport.post(path, &request, CONTENT_TYPE_JSON).await?;
    let response: T = decode_response(&body)?;
    response.check()?;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Ticket {
        ticket: String,
        #[serde(default)]
        errcode: i32,
    }

    #[test]
    fn test_api_response_base_success() {
        let body = br#"{"errcode":0,"errmsg":"ok"}"#;
        let resp: ApiResponseBase = decode_response(body).unwrap();
        assert!(resp.is_success());
        assert!(resp.check().is_ok());
    }

    #[test]
    fn test_api_response_base_deserialize_error() {
        let json = r#"{"errcode": 40013, "errmsg": "invalid appid"}"#;
        let resp: ApiResponseBase = serde_json::from_str(json).unwrap();
        assert!(!resp.is_success());
        match resp.check().unwrap_err() {
            WechatError::Api { code, message } => {
                assert_eq!(code, 40013);
                assert_eq!(message, "invalid appid");
            }
            _ => panic!("Expected WechatError::Api"),
        }
    }

    #[test]
    fn test_api_response_base_defaults_on_missing_fields() {
        let resp: ApiResponseBase = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.errcode, 0);
        assert!(resp.errmsg.is_empty());
    }

    #[test]
    fn test_api_response_base_null_fields() {
        let json = r#"{"errcode": null, "errmsg": null}"#;
        let resp: ApiResponseBase = serde_json::from_str(json).unwrap();
        assert_eq!(resp.errcode, 0);
        assert!(resp.errmsg.is_empty());
    }

    #[test]
    fn test_decode_response_success() {
        let ticket: Ticket = decode_response(br#"{"ticket":"abc","errcode":0}"#).unwrap();
        assert_eq!(ticket.ticket, "abc");
        assert_eq!(ticket.errcode, 0);
    }

    #[test]
    fn test_decode_response_non_json_keeps_body() {
        let err = decode_response::<Ticket>(b"invalid_grant").unwrap_err();
        assert_eq!(err.raw_body(), Some("invalid_grant"));
        assert_eq!(err.to_string(), "invalid_grant");
    }

    #[test]
    fn test_decode_response_missing_field_keeps_body() {
        let body = br#"{"errcode":40001,"errmsg":"invalid credential"}"#;
        let err = decode_response::<Ticket>(body).unwrap_err();
        assert_eq!(
            err.raw_body(),
            Some(r#"{"errcode":40001,"errmsg":"invalid credential"}"#)
        );
    }

    #[test]
    fn test_decode_response_invalid_utf8_is_lossy() {
        let err = decode_response::<Ticket>(&[0xff, 0xfe]).unwrap_err();
        assert!(err.raw_body().is_some());
    }
}
