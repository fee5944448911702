//! Official account web authorization (OAuth) and JS-SDK tickets
//!
//! The web authorization flow has four steps:
//!
//! 1. Send the user to [`OfficialAccount::authorize_url`]; WeChat redirects back
//!    to `redirect_uri?code=CODE&state=STATE`.
//! 2. Exchange the code with [`OfficialAccount::exchange_code`].
//! 3. Renew with [`OfficialAccount::refresh_token`] when the web token expires.
//! 4. Read the profile with [`OfficialAccount::user_info`] (`snsapi_userinfo` scope).
//!
//! The web access token is not the app access token. The app secret and both
//! tokens must stay on the server.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::common::{decode_response, get_json, null_as_default, ApiResponseBase};
use crate::client::{Transport, WechatClient};
use crate::error::WechatError;
use crate::types::{AppId, AppSecret};
use crate::utils::build_url;

/// Host serving the authorization page.
pub const DEFAULT_AUTHORIZE_BASE_URL: &str = "https://open.weixin.qq.com";

const API_AUTHORIZE: &str = "/connect/oauth2/authorize";
const API_ACCESS_TOKEN: &str = "/sns/oauth2/access_token";
const API_REFRESH_TOKEN: &str = "/sns/oauth2/refresh_token";
const API_USER_INFO: &str = "/sns/userinfo";
const API_AUTH: &str = "/sns/auth";
const API_GET_TICKET: &str = "/cgi-bin/ticket/getticket";

/// Silent authorization; yields only the openid.
pub const SCOPE_SNSAPI_BASE: &str = "snsapi_base";
/// Explicit consent; allows reading the user's profile.
pub const SCOPE_SNSAPI_USERINFO: &str = "snsapi_userinfo";

pub const LANG_ZH_CN: &str = "zh_CN";
pub const LANG_ZH_TW: &str = "zh_TW";
pub const LANG_EN: &str = "en";

/// Web access token returned by code exchange and refresh
#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OauthAccessToken {
    pub access_token: String,
    /// Lifetime in seconds
    pub expires_in: i64,
    /// Valid for 30 days; the user must authorize again afterwards
    #[serde(default, deserialize_with = "null_as_default")]
    pub refresh_token: String,
    pub openid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scope: String,
    /// Empty unless the account is bound to an open platform
    #[serde(default, deserialize_with = "null_as_default")]
    pub unionid: String,
}

/// User profile from `/sns/userinfo`
#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OauthUserInfo {
    pub openid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nickname: String,
    /// 1 = male, 2 = female, 0 = unknown
    #[serde(default, deserialize_with = "null_as_default")]
    pub sex: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub province: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub country: String,
    /// Avatar URL
    #[serde(default, deserialize_with = "null_as_default")]
    pub headimgurl: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub privilege: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unionid: String,
}

/// Kind of short-lived ticket issued by `/cgi-bin/ticket/getticket`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketType {
    /// `jsapi_ticket` for signing JS-SDK configuration
    Jsapi,
    /// Card/invoice authorization page ticket
    WxCard,
}

impl TicketType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketType::Jsapi => "jsapi",
            TicketType::WxCard => "wx_card",
        }
    }
}

impl std::fmt::Display for TicketType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ticket and its lifetime (normally 7200 seconds)
///
/// Ticket issuance is heavily rate limited; callers must cache the ticket
/// for its lifetime.
#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiTicket {
    pub ticket: String,
    pub expires_in: i64,
}

/// Official account OAuth helper
///
/// `/sns/*` calls authenticate with the app secret or a web token. The ticket
/// call needs the app access token, which the transport supplies (see
/// [`AccessTokenLayer`](crate::middleware::AccessTokenLayer)).
#[derive(Debug)]
pub struct OfficialAccount<T = WechatClient> {
    appid: AppId,
    secret: AppSecret,
    authorize_base_url: String,
    transport: Arc<T>,
}

impl<T> Clone for OfficialAccount<T> {
    fn clone(&self) -> Self {
        Self {
            appid: self.appid.clone(),
            secret: self.secret.clone(),
            authorize_base_url: self.authorize_base_url.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport> OfficialAccount<T> {
    pub fn new(appid: AppId, secret: AppSecret, transport: Arc<T>) -> Self {
        Self {
            appid,
            secret,
            authorize_base_url: DEFAULT_AUTHORIZE_BASE_URL.to_string(),
            transport,
        }
    }

    /// Override the host of the authorization page.
    pub fn with_authorize_base_url(mut self, url: impl Into<String>) -> Self {
        self.authorize_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn appid(&self) -> &str {
        self.appid.as_str()
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Build the link that starts web authorization.
    ///
    /// `scope` is [`SCOPE_SNSAPI_BASE`] or [`SCOPE_SNSAPI_USERINFO`]; other
    /// values are passed through and rejected by WeChat.
    pub fn authorize_url(&self, redirect_uri: &str, scope: &str, state: &str) -> String {
        let endpoint = format!("{}{}", self.authorize_base_url, API_AUTHORIZE);
        build_url(
            &endpoint,
            &[
                ("appid", self.appid.as_str()),
                ("redirect_uri", redirect_uri),
                ("response_type", "code"),
                ("scope", scope),
                ("state", state),
            ],
        )
    }

    /// Exchange an authorization code for a web access token.
    ///
    /// GET /sns/oauth2/access_token
    ///
    /// # Errors
    /// Transport failures pass through; a body that is not a token (including
    /// WeChat's `errcode` payloads) is returned as `WechatError::Decode`.
    pub async fn exchange_code(&self, code: &str) -> Result<OauthAccessToken, WechatError> {
        let query = [
            ("appid", self.appid.as_str()),
            ("secret", self.secret.as_str()),
            ("code", code),
            ("grant_type", "authorization_code"),
        ];
        get_json(self.transport.as_ref(), API_ACCESS_TOKEN, &query).await
    }

    /// Renew a web access token.
    ///
    /// GET /sns/oauth2/refresh_token
    pub async fn refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<OauthAccessToken, WechatError> {
        let query = [
            ("appid", self.appid.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];
        get_json(self.transport.as_ref(), API_REFRESH_TOKEN, &query).await
    }

    /// Fetch the user's profile with a web access token.
    ///
    /// GET /sns/userinfo
    ///
    /// `lang` is one of [`LANG_ZH_CN`], [`LANG_ZH_TW`], [`LANG_EN`].
    pub async fn user_info(
        &self,
        access_token: &str,
        openid: &str,
        lang: &str,
    ) -> Result<OauthUserInfo, WechatError> {
        let query = [
            ("access_token", access_token),
            ("openid", openid),
            ("lang", lang),
        ];
        get_json(self.transport.as_ref(), API_USER_INFO, &query).await
    }

    /// Check whether a web access token is still valid.
    ///
    /// GET /sns/auth
    ///
    /// A non-zero `errcode` is a valid negative answer, not an error.
    pub async fn validate_token(
        &self,
        access_token: &str,
        openid: &str,
    ) -> Result<bool, WechatError> {
        let query = [("access_token", access_token), ("openid", openid)];
        let body = self.transport.get(API_AUTH, &query).await?;
        let response: ApiResponseBase = decode_response(&body)?;
        Ok(response.errcode == 0)
    }

    /// Fetch a short-lived ticket of the given kind.
    ///
    /// GET /cgi-bin/ticket/getticket
    pub async fn api_ticket(&self, kind: TicketType) -> Result<ApiTicket, WechatError> {
        get_json(
            self.transport.as_ref(),
            API_GET_TICKET,
            &[("type", kind.as_str())],
        )
        .await
    }

    /// Fetch the `jsapi_ticket` used to sign JS-SDK configuration.
    pub async fn jsapi_ticket(&self) -> Result<ApiTicket, WechatError> {
        self.api_ticket(TicketType::Jsapi).await
    }

    /// Fetch the ticket required by the card/invoice authorization page.
    pub async fn wx_card_ticket(&self) -> Result<ApiTicket, WechatError> {
        self.api_ticket(TicketType::WxCard).await
    }
}
