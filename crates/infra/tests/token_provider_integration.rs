//! Integration tests for the token providers
//!
//! The caching provider is exercised against a mock authentication service;
//! request counts prove when the cache is hit.

mod support;

use std::sync::Arc;

use chrono::Duration;
use forge_domain::{ForgeError, Scope};
use forge_infra::{ApiClient, RequestOptions, StaticTokenProvider, TokenProvider};
use serde_json::json;
use support::{mount_authenticate, oauth_provider, token_body, TestClock};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn cached_token_is_reused_for_same_scopes() {
    let server = MockServer::start().await;
    mount_authenticate(&server, "tok-1", 1).await;

    let provider = oauth_provider(&server);
    let first = provider.get_token(&[Scope::DataRead]).await.unwrap();
    let second = provider.get_token(&[Scope::DataRead]).await.unwrap();

    assert_eq!(first.access_token, "tok-1");
    assert_eq!(first, second);
    assert_eq!(provider.cached_scope_sets(), 1);
}

#[tokio::test]
async fn scope_order_and_duplicates_share_one_token() {
    let server = MockServer::start().await;
    mount_authenticate(&server, "shared", 1).await;

    let provider = oauth_provider(&server);
    provider.get_token(&[Scope::DataRead, Scope::BucketRead]).await.unwrap();
    provider.get_token(&[Scope::BucketRead, Scope::DataRead]).await.unwrap();
    provider.get_token(&[Scope::BucketRead, Scope::DataRead, Scope::BucketRead]).await.unwrap();

    assert_eq!(provider.cached_scope_sets(), 1);
}

#[tokio::test]
async fn distinct_scope_sets_get_distinct_tokens() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/authenticate"))
        .and(body_string_contains("scope=data%3Aread"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("read", 3599)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/authenticate"))
        .and(body_string_contains("scope=bucket%3Acreate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("create", 3599)))
        .expect(1)
        .mount(&server)
        .await;

    let provider = oauth_provider(&server);
    let read = provider.get_token(&[Scope::DataRead]).await.unwrap();
    let create = provider.get_token(&[Scope::BucketCreate]).await.unwrap();

    assert_eq!(read.access_token, "read");
    assert_eq!(create.access_token, "create");
    assert_eq!(provider.cached_scope_sets(), 2);
}

#[tokio::test]
async fn expired_token_is_replaced() {
    support::init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/authenticate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("short-lived", 60)))
        .expect(2)
        .mount(&server)
        .await;

    let clock = TestClock::new();
    let provider = oauth_provider(&server).with_clock(clock.clock());

    provider.get_token(&[Scope::DataRead]).await.unwrap();
    clock.advance(Duration::seconds(59));
    provider.get_token(&[Scope::DataRead]).await.unwrap();
    clock.advance(Duration::seconds(1));
    let renewed = provider.get_token(&[Scope::DataRead]).await.unwrap();

    assert!(renewed.is_valid_at(chrono::Utc::now()));
    assert_eq!(provider.cached_scope_sets(), 1);
}

#[tokio::test]
async fn client_credentials_form_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/authenticate"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("client_id=client-id"))
        .and(body_string_contains("client_secret=client-secret"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("ok", 3599)))
        .expect(1)
        .mount(&server)
        .await;

    let token = oauth_provider(&server).get_token(&[Scope::ViewablesRead]).await.unwrap();
    assert_eq!(token.token_type, "Bearer");
}

#[tokio::test]
async fn authentication_failure_is_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/authenticate"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"developerMessage": "bad client"})),
        )
        .expect(2)
        .mount(&server)
        .await;

    let provider = oauth_provider(&server);
    for _ in 0..2 {
        let err = provider.get_token(&[Scope::DataRead]).await.unwrap_err();
        assert!(matches!(err, ForgeError::HttpStatus { status: 401, .. }));
    }
    assert_eq!(provider.cached_scope_sets(), 0);
}

#[tokio::test]
async fn dispatcher_requests_use_cached_provider_token() {
    let server = MockServer::start().await;
    mount_authenticate(&server, "minted", 1).await;

    Mock::given(method("GET"))
        .and(path("/buckets"))
        .and(header("authorization", "Bearer minted"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(2)
        .mount(&server)
        .await;

    let api = ApiClient::new(server.uri(), Arc::new(oauth_provider(&server))).unwrap();
    for _ in 0..2 {
        api.get("/buckets", &[Scope::BucketRead], RequestOptions::new()).await.unwrap();
    }
}

#[tokio::test]
async fn static_provider_never_touches_the_network() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let provider = StaticTokenProvider::new("fixed");
    let token = provider.get_token(&[Scope::CodeAll, Scope::AccountWrite]).await.unwrap();

    assert_eq!(token.access_token, "fixed");
    assert_eq!(token.expires_at, None);
}

#[tokio::test]
async fn out_of_range_lifetime_is_malformed_and_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/authenticate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "t",
            "token_type": "Bearer",
            "expires_in": i64::MAX
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = Arc::new(oauth_provider(&server));
    let task_provider = Arc::clone(&provider);
    let outcome =
        tokio::spawn(async move { task_provider.get_token(&[Scope::DataRead]).await }).await;

    let result = outcome.expect("token request must not panic");
    assert!(matches!(result, Err(ForgeError::MalformedResponse(_))));
    assert_eq!(provider.cached_scope_sets(), 0);
}
