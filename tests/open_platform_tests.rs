//! Open platform component API tests against a mock WeChat server.

use std::sync::Arc;

use wechat_platform_sdk::client::{WechatClient, CONTENT_TYPE_JSON};
use wechat_platform_sdk::error::WechatError;
use wechat_platform_sdk::middleware::AccessTokenLayer;
use wechat_platform_sdk::token::SharedToken;
use wechat_platform_sdk::types::{AccessToken, AppId};
use wechat_platform_sdk::OpenPlatform;
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMPONENT_APPID: &str = "wxcomponent0000001";

fn create_platform(mock_server: &MockServer) -> OpenPlatform {
    let source = Arc::new(SharedToken::new(
        AccessToken::new("component_token").unwrap(),
    ));
    let client = WechatClient::builder()
        .base_url(mock_server.uri())
        .with_middleware(AccessTokenLayer::new(source).component())
        .build()
        .unwrap();
    OpenPlatform::new(AppId::new(COMPONENT_APPID).unwrap(), Arc::new(client))
}

#[tokio::test]
async fn test_create_preauth_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cgi-bin/component/api_create_preauthcode"))
        .and(query_param("component_access_token", "component_token"))
        .and(header("content-type", CONTENT_TYPE_JSON))
        .and(body_json(serde_json::json!({
            "component_appid": COMPONENT_APPID
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "pre_auth_code": "Cx_Dk6qiBE0Dmx4E",
            "expires_in": 600
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let platform = create_platform(&mock_server);
    let code = platform.create_preauth_code().await.unwrap();

    assert_eq!(code.pre_auth_code, "Cx_Dk6qiBE0Dmx4E");
    assert_eq!(code.expires_in, 600);
}

#[tokio::test]
async fn test_create_preauth_code_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cgi-bin/component/api_create_preauthcode"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "errcode": 61004,
            "errmsg": "access clientip is not registered"
        })))
        .mount(&mock_server)
        .await;

    let platform = create_platform(&mock_server);
    let err = platform.create_preauth_code().await.unwrap_err();

    match err {
        WechatError::Api { code, message } => {
            assert_eq!(code, 61004);
            assert_eq!(message, "access clientip is not registered");
        }
        other => panic!("expected api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_preauth_code_non_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cgi-bin/component/api_create_preauthcode"))
        .respond_with(ResponseTemplate::new(200).set_body_string("system busy"))
        .mount(&mock_server)
        .await;

    let platform = create_platform(&mock_server);
    let err = platform.create_preauth_code().await.unwrap_err();
    assert_eq!(err.raw_body(), Some("system busy"));
}

#[tokio::test]
async fn test_create_preauth_code_raw_passthrough() {
    let mock_server = MockServer::start().await;
    let payload = r#"{"component_appid":"wxcomponent0000001"}"#;
    let answer = r#"{"pre_auth_code":"raw_code","expires_in":600}"#;

    Mock::given(method("POST"))
        .and(path("/cgi-bin/component/api_create_preauthcode"))
        .and(body_string(payload))
        .respond_with(ResponseTemplate::new(200).set_body_string(answer))
        .expect(1)
        .mount(&mock_server)
        .await;

    let platform = create_platform(&mock_server);
    let body = platform
        .create_preauth_code_raw(payload.as_bytes())
        .await
        .unwrap();
    assert_eq!(body, answer.as_bytes());
}

#[tokio::test]
async fn test_component_passthroughs_hit_their_paths() {
    let mock_server = MockServer::start().await;

    let cases = [
        "/cgi-bin/component/api_query_auth",
        "/cgi-bin/component/api_authorizer_token",
        "/cgi-bin/component/api_get_authorizer_info",
        "/cgi-bin/component/api_get_authorizer_option",
        "/cgi-bin/component/api_set_authorizer_option",
        "/cgi-bin/component/api_get_authorizer_list",
    ];
    for endpoint in cases {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .and(query_param("component_access_token", "component_token"))
            .and(header("content-type", CONTENT_TYPE_JSON))
            .and(body_string(r#"{"component_appid":"wxcomponent0000001"}"#))
            .respond_with(ResponseTemplate::new(200).set_body_string(endpoint))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let platform = create_platform(&mock_server);
    let payload = br#"{"component_appid":"wxcomponent0000001"}"#;

    let responses = [
        platform.query_auth(payload).await.unwrap(),
        platform.authorizer_token(payload).await.unwrap(),
        platform.authorizer_info(payload).await.unwrap(),
        platform.authorizer_option(payload).await.unwrap(),
        platform.set_authorizer_option(payload).await.unwrap(),
        platform.authorizer_list(payload).await.unwrap(),
    ];
    for (response, endpoint) in responses.iter().zip(cases) {
        assert_eq!(response.as_slice(), endpoint.as_bytes());
    }
}

#[tokio::test]
async fn test_passthrough_returns_error_payload_verbatim() {
    let mock_server = MockServer::start().await;
    let answer = r#"{"errcode":61005,"errmsg":"component ticket is expired"}"#;

    Mock::given(method("POST"))
        .and(path("/cgi-bin/component/api_query_auth"))
        .respond_with(ResponseTemplate::new(200).set_body_string(answer))
        .mount(&mock_server)
        .await;

    let platform = create_platform(&mock_server);
    let body = platform.query_auth(b"{}").await.unwrap();
    assert_eq!(body, answer.as_bytes());
}
