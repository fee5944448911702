//! WeCom (enterprise WeChat) web authorization
//!
//! Members are identified through the WeChat in-app OAuth page or the WeCom
//! QR-code single sign-on page. Both redirect to
//! `redirect_uri?code=CODE&state=STATE`; the code is then resolved with
//! [`WorkAgent::user_info`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::common::{get_json, null_as_default, WechatApiResponse};
use crate::client::{Transport, WechatClient};
use crate::error::WechatError;
use crate::types::{AgentId, CorpId};
use crate::utils::{build_url, WECHAT_REDIRECT_FRAGMENT};

const API_AUTHORIZE: &str = "https://open.weixin.qq.com/connect/oauth2/authorize";
const API_SSO_AUTHORIZE: &str = "https://open.work.weixin.qq.com/wwopen/sso/qrConnect";
const API_USER_INFO: &str = "/cgi-bin/user/getuserinfo";

/// Identity of the member behind an OAuth code
///
/// WeCom reports failures through `errcode`/`errmsg` in this same payload.
#[non_exhaustive]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WorkUserInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub errcode: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub errmsg: String,
    /// Member ID inside the corporation
    #[serde(default, rename = "UserId", deserialize_with = "null_as_default")]
    pub user_id: String,
    /// Device of the member's client
    #[serde(default, rename = "DeviceId", deserialize_with = "null_as_default")]
    pub device_id: String,
}

impl WechatApiResponse for WorkUserInfo {
    fn errcode(&self) -> i32 {
        self.errcode
    }

    fn errmsg(&self) -> &str {
        &self.errmsg
    }
}

/// WeCom application (agent) helper
#[derive(Debug)]
pub struct WorkAgent<T = WechatClient> {
    corpid: CorpId,
    agentid: AgentId,
    transport: Arc<T>,
}

impl<T> Clone for WorkAgent<T> {
    fn clone(&self) -> Self {
        Self {
            corpid: self.corpid.clone(),
            agentid: self.agentid.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport> WorkAgent<T> {
    pub fn new(corpid: CorpId, agentid: AgentId, transport: Arc<T>) -> Self {
        Self {
            corpid,
            agentid,
            transport,
        }
    }

    pub fn corpid(&self) -> &str {
        self.corpid.as_str()
    }

    pub fn agentid(&self) -> &str {
        self.agentid.as_str()
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// In-app authorization link (scope is always `snsapi_base`).
    pub fn authorize_url(&self, redirect_uri: &str, state: &str) -> String {
        let mut url = build_url(
            API_AUTHORIZE,
            &[
                ("appid", self.corpid.as_str()),
                ("redirect_uri", redirect_uri),
                ("response_type", "code"),
                ("scope", "snsapi_base"),
                ("state", state),
            ],
        );
        url.push_str(WECHAT_REDIRECT_FRAGMENT);
        url
    }

    /// QR-code single sign-on link for browsers outside WeChat.
    pub fn sso_authorize_url(&self, redirect_uri: &str, state: &str) -> String {
        build_url(
            API_SSO_AUTHORIZE,
            &[
                ("appid", self.corpid.as_str()),
                ("agentid", self.agentid.as_str()),
                ("redirect_uri", redirect_uri),
                ("state", state),
            ],
        )
    }

    /// Resolve an OAuth code to a member identity.
    ///
    /// GET /cgi-bin/user/getuserinfo
    ///
    /// A WeCom-side failure is returned as `Ok` with a non-zero `errcode`.
    pub async fn user_info(&self, code: &str) -> Result<WorkUserInfo, WechatError> {
        get_json(self.transport.as_ref(), API_USER_INFO, &[("code", code)]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Url;
    use std::collections::HashMap;

    fn test_agent() -> WorkAgent {
        let client = WechatClient::builder()
            .base_url(crate::client::WORK_API_BASE_URL)
            .build()
            .unwrap();
        WorkAgent::new(
            CorpId::new("ww0123456789abcdef").unwrap(),
            AgentId::new("1000002").unwrap(),
            Arc::new(client),
        )
    }

    fn query_map(url: &str) -> HashMap<String, String> {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_authorize_url() {
        let url = test_agent().authorize_url("https://example.com/cb?a=1", "xyz");

        assert!(url.starts_with("https://open.weixin.qq.com/connect/oauth2/authorize?"));
        assert!(url.ends_with("#wechat_redirect"));

        let query = query_map(&url);
        assert_eq!(query["appid"], "ww0123456789abcdef");
        assert_eq!(query["redirect_uri"], "https://example.com/cb?a=1");
        assert_eq!(query["response_type"], "code");
        assert_eq!(query["scope"], "snsapi_base");
        assert_eq!(query["state"], "xyz");
        assert!(!query.contains_key("agentid"));
    }

    #[test]
    fn test_sso_authorize_url_includes_agentid() {
        let url = test_agent().sso_authorize_url("https://example.com/sso", "s1");

        assert!(url.starts_with("https://open.work.weixin.qq.com/wwopen/sso/qrConnect?"));
        assert!(!url.contains('#'));

        let query = query_map(&url);
        assert_eq!(query.len(), 4);
        assert_eq!(query["appid"], "ww0123456789abcdef");
        assert_eq!(query["agentid"], "1000002");
        assert_eq!(query["redirect_uri"], "https://example.com/sso");
        assert_eq!(query["state"], "s1");
    }

    #[test]
    fn test_work_user_info_parse() {
        let json = r#"{
            "errcode": 0,
            "errmsg": "ok",
            "UserId": "zhangsan",
            "DeviceId": "device-1"
        }"#;
        let info: WorkUserInfo = serde_json::from_str(json).unwrap();
        assert!(info.is_success());
        assert_eq!(info.user_id, "zhangsan");
        assert_eq!(info.device_id, "device-1");
    }

    #[test]
    fn test_work_user_info_null_fields() {
        let json = r#"{"errcode": 0, "errmsg": null, "UserId": "u", "DeviceId": null}"#;
        let info: WorkUserInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.user_id, "u");
        assert!(info.device_id.is_empty());
        assert!(info.errmsg.is_empty());
    }

    #[test]
    fn test_work_user_info_error_is_embedded() {
        let json = r#"{"errcode": 40029, "errmsg": "invalid code"}"#;
        let info: WorkUserInfo = serde_json::from_str(json).unwrap();
        assert!(!info.is_success());
        assert_eq!(info.errcode, 40029);
        assert_eq!(info.errmsg, "invalid code");
        assert!(info.user_id.is_empty());
    }
}
