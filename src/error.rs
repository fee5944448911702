use thiserror::Error;

/// Transport-level failure.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network, timeout or connection failure reported by reqwest
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("unexpected HTTP status {status}: {body}")]
    Status {
        status: http::StatusCode,
        body: String,
    },
}

/// WeChat SDK error types
#[derive(Debug, Error)]
pub enum WechatError {
    #[error("HTTP request error: {0}")]
    Http(#[from] HttpError),

    /// The response body was not the JSON shape the endpoint promises.
    ///
    /// Displays as the raw body so provider error payloads stay readable.
    #[error("{body}")]
    Decode {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("WeChat API error (code={code}): {message}")]
    Api { code: i32, message: String },

    #[error("Access token error: {0}")]
    Token(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for WechatError {
    fn from(e: reqwest::Error) -> Self {
        WechatError::Http(HttpError::Reqwest(e))
    }
}

impl WechatError {
    /// Map a WeChat `errcode`/`errmsg` pair to a result.
    pub fn check_api(code: i32, message: &str) -> Result<(), WechatError> {
        if code == 0 {
            Ok(())
        } else {
            Err(WechatError::Api {
                code,
                message: message.to_string(),
            })
        }
    }

    /// Wrap a body that failed to decode.
    pub(crate) fn decode(body: &[u8], source: serde_json::Error) -> Self {
        WechatError::Decode {
            body: String::from_utf8_lossy(body).into_owned(),
            source,
        }
    }

    /// The raw response body for [`WechatError::Decode`].
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            WechatError::Decode { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Whether the failure happened below the JSON layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, WechatError::Http(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_error(body: &str) -> WechatError {
        let source = serde_json::from_str::<serde_json::Value>(body).unwrap_err();
        WechatError::decode(body.as_bytes(), source)
    }

    #[test]
    fn test_decode_error_displays_raw_body() {
        let err = decode_error("invalid_grant");
        assert_eq!(err.to_string(), "invalid_grant");
        assert_eq!(err.raw_body(), Some("invalid_grant"));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_decode_error_keeps_source() {
        use std::error::Error as _;

        let err = decode_error("<html>");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_check_api() {
        assert!(WechatError::check_api(0, "ok").is_ok());

        let err = WechatError::check_api(40001, "invalid credential").unwrap_err();
        assert!(matches!(err, WechatError::Api { code: 40001, .. }));
        assert_eq!(
            err.to_string(),
            "WeChat API error (code=40001): invalid credential"
        );
    }

    #[test]
    fn test_status_error_is_transport() {
        let err = WechatError::from(HttpError::Status {
            status: http::StatusCode::BAD_GATEWAY,
            body: "upstream".to_string(),
        });
        assert!(err.is_transport());
        assert!(err.raw_body().is_none());
        assert!(err.to_string().contains("502"));
    }
}
