//! Open platform (third-party platform) authorization
//!
//! A third-party platform obtains a pre-authorization code, sends the
//! authorizer's administrator to an authorization page, and then manages the
//! authorizer through the component APIs below. Every component API call
//! carries `component_access_token`, supplied by the transport (see
//! [`AccessTokenLayer::component`](crate::middleware::AccessTokenLayer::component)).
//!
//! Apart from [`OpenPlatform::create_preauth_code`], request and response
//! bodies are passed through as raw JSON bytes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::common::{null_as_default, post_json, WechatApiResponse};
use crate::client::{Transport, WechatClient, CONTENT_TYPE_JSON};
use crate::error::WechatError;
use crate::types::AppId;
use crate::utils::{build_url, WECHAT_REDIRECT_FRAGMENT};

/// Host serving the authorization pages.
pub const AUTHORIZATION_REDIRECT_BASE_URL: &str = "https://mp.weixin.qq.com";

/// Only official accounts are listed on the authorization page
pub const AUTH_TYPE_OFFICIAL_ACCOUNT: i32 = 1;
/// Only mini programs are listed
pub const AUTH_TYPE_MINI_PROGRAM: i32 = 2;
/// Both official accounts and mini programs are listed
pub const AUTH_TYPE_ALL: i32 = 3;

const API_CREATE_PREAUTH_CODE: &str = "/cgi-bin/component/api_create_preauthcode";
const API_COMPONENT_LOGIN_PAGE: &str = "/cgi-bin/componentloginpage";
const API_BIND_COMPONENT: &str = "/safe/bindcomponent";
const API_QUERY_AUTH: &str = "/cgi-bin/component/api_query_auth";
const API_AUTHORIZER_TOKEN: &str = "/cgi-bin/component/api_authorizer_token";
const API_GET_AUTHORIZER_INFO: &str = "/cgi-bin/component/api_get_authorizer_info";
const API_GET_AUTHORIZER_OPTION: &str = "/cgi-bin/component/api_get_authorizer_option";
const API_SET_AUTHORIZER_OPTION: &str = "/cgi-bin/component/api_set_authorizer_option";
const API_GET_AUTHORIZER_LIST: &str = "/cgi-bin/component/api_get_authorizer_list";

#[derive(Debug, Serialize)]
struct PreAuthCodeRequest<'a> {
    component_appid: &'a str,
}

/// Pre-authorization code, valid for 10 minutes
#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PreAuthCode {
    #[serde(
        default,
        alias = "component_access_token",
        deserialize_with = "null_as_default"
    )]
    pub pre_auth_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub expires_in: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) errcode: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) errmsg: String,
}

impl WechatApiResponse for PreAuthCode {
    fn errcode(&self) -> i32 {
        self.errcode
    }

    fn errmsg(&self) -> &str {
        &self.errmsg
    }
}

/// Open platform authorization helper
#[derive(Debug)]
pub struct OpenPlatform<T = WechatClient> {
    component_appid: AppId,
    transport: Arc<T>,
}

impl<T> Clone for OpenPlatform<T> {
    fn clone(&self) -> Self {
        Self {
            component_appid: self.component_appid.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport> OpenPlatform<T> {
    pub fn new(component_appid: AppId, transport: Arc<T>) -> Self {
        Self {
            component_appid,
            transport,
        }
    }

    pub fn component_appid(&self) -> &str {
        self.component_appid.as_str()
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// POST /cgi-bin/component/api_create_preauthcode with a caller-built body
    pub async fn create_preauth_code_raw(&self, payload: &[u8]) -> Result<Vec<u8>, WechatError> {
        self.post_raw(API_CREATE_PREAUTH_CODE, payload).await
    }

    /// Obtain a pre-authorization code for this component.
    ///
    /// # Errors
    /// `WechatError::Api` when WeChat answers with a non-zero `errcode`,
    /// `WechatError::Decode` with the raw body when the answer is not JSON.
    pub async fn create_preauth_code(&self) -> Result<PreAuthCode, WechatError> {
        let body = PreAuthCodeRequest {
            component_appid: self.component_appid.as_str(),
        };
        post_json(self.transport.as_ref(), API_CREATE_PREAUTH_CODE, &body).await
    }

    fn authorization_params<'a>(
        &'a self,
        pre_auth_code: &'a str,
        redirect_uri: &'a str,
        biz_appid: &'a str,
        auth_type: &'a str,
        include_auth_type: bool,
    ) -> Vec<(&'a str, &'a str)> {
        let mut params = vec![
            ("component_appid", self.component_appid.as_str()),
            ("pre_auth_code", pre_auth_code),
            ("redirect_uri", redirect_uri),
        ];
        if !biz_appid.is_empty() {
            params.push(("biz_appid", biz_appid));
        }
        if include_auth_type {
            params.push(("auth_type", auth_type));
        }
        params
    }

    fn authorization_query(
        &self,
        endpoint: &str,
        pre_auth_code: &str,
        redirect_uri: &str,
        biz_appid: &str,
        auth_type: i32,
    ) -> String {
        // auth_type is appended only when below 1; valid values are 1..=3.
        let auth_type_value = auth_type.to_string();
        let params = self.authorization_params(
            pre_auth_code,
            redirect_uri,
            biz_appid,
            &auth_type_value,
            auth_type < 1,
        );
        build_url(
            &format!("{}{}", AUTHORIZATION_REDIRECT_BASE_URL, endpoint),
            &params,
        )
    }

    /// Link to the QR-code authorization page (desktop flow).
    ///
    /// `biz_appid` is omitted when empty.
    pub fn authorization_redirect_uri(
        &self,
        pre_auth_code: &str,
        redirect_uri: &str,
        biz_appid: &str,
        auth_type: i32,
    ) -> String {
        self.authorization_query(
            API_COMPONENT_LOGIN_PAGE,
            pre_auth_code,
            redirect_uri,
            biz_appid,
            auth_type,
        )
    }

    /// Link the administrator opens inside WeChat on mobile.
    pub fn mobile_authorization_redirect_uri(
        &self,
        pre_auth_code: &str,
        redirect_uri: &str,
        biz_appid: &str,
        auth_type: i32,
    ) -> String {
        let mut url = self.authorization_query(
            API_BIND_COMPONENT,
            pre_auth_code,
            redirect_uri,
            biz_appid,
            auth_type,
        );
        url.push_str(WECHAT_REDIRECT_FRAGMENT);
        url
    }

    /// Exchange an authorization code for the authorizer's tokens.
    ///
    /// POST /cgi-bin/component/api_query_auth
    pub async fn query_auth(&self, payload: &[u8]) -> Result<Vec<u8>, WechatError> {
        self.post_raw(API_QUERY_AUTH, payload).await
    }

    /// Obtain or refresh an authorizer access token.
    ///
    /// POST /cgi-bin/component/api_authorizer_token
    pub async fn authorizer_token(&self, payload: &[u8]) -> Result<Vec<u8>, WechatError> {
        self.post_raw(API_AUTHORIZER_TOKEN, payload).await
    }

    /// POST /cgi-bin/component/api_get_authorizer_info
    pub async fn authorizer_info(&self, payload: &[u8]) -> Result<Vec<u8>, WechatError> {
        self.post_raw(API_GET_AUTHORIZER_INFO, payload).await
    }

    /// POST /cgi-bin/component/api_get_authorizer_option
    pub async fn authorizer_option(&self, payload: &[u8]) -> Result<Vec<u8>, WechatError> {
        self.post_raw(API_GET_AUTHORIZER_OPTION, payload).await
    }

    /// POST /cgi-bin/component/api_set_authorizer_option
    pub async fn set_authorizer_option(&self, payload: &[u8]) -> Result<Vec<u8>, WechatError> {
        self.post_raw(API_SET_AUTHORIZER_OPTION, payload).await
    }

    /// List every account that has authorized this component.
    ///
    /// POST /cgi-bin/component/api_get_authorizer_list
    pub async fn authorizer_list(&self, payload: &[u8]) -> Result<Vec<u8>, WechatError> {
        self.post_raw(API_GET_AUTHORIZER_LIST, payload).await
    }

    async fn post_raw(&self, path: &str, payload: &[u8]) -> Result<Vec<u8>, WechatError> {
        self.transport.post(path, payload, CONTENT_TYPE_JSON).await
    }
}
