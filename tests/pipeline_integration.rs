//! Pipeline integration tests
//!
//! Exercises the token exchange and redemption stages against mock HTTP
//! endpoints. No test launches a real browser: the login stage is covered
//! by a fake credential source.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::helpers::{mock_settings, test_token};
use edgeone_redeem::{
    Error, RedeemOutcome, Result, Settings,
    session::{RedeemClient, RedeemPipelineGeneric, TokenExchanger, redeem_all},
    types::CookiePair,
};

/// Credential source returning a canned cookie pair
#[derive(Debug)]
struct FakeBrowser(CookiePair);

#[async_trait]
impl edgeone_redeem::session::CredentialSource for FakeBrowser {
    async fn harvest(&self) -> Result<CookiePair> {
        Ok(self.0.clone())
    }
}

fn exchanger(settings: Settings) -> TokenExchanger {
    TokenExchanger::new(reqwest::Client::new(), Arc::new(settings))
}

fn redeem_client(settings: Settings) -> RedeemClient {
    RedeemClient::new(reqwest::Client::new(), Arc::new(settings))
}

#[tokio::test]
async fn test_token_exchange_coerces_owner_uin() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/account/login/saas/getTokenFormSass"))
        .and(query_param("platform", "intlSaaSTrtc"))
        .and(query_param("s_url", "https://trtc.io"))
        // The raw uin cookie value "o100" must arrive o-stripped
        .and(header("cookie", "uin=100; skey=S;"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 0,
            "data": {"key": "K", "uin": "100", "ownerUin": 200}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = exchanger(mock_settings(&server.uri()))
        .exchange(&CookiePair::new("S", "o100"))
        .await
        .unwrap();

    assert_eq!(token, test_token());
}

#[tokio::test]
async fn test_token_exchange_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/account/login/saas/getTokenFormSass"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 1020,
            "msg": "session expired"
        })))
        .mount(&server)
        .await;

    let err = exchanger(mock_settings(&server.uri()))
        .exchange(&CookiePair::new("S", "100"))
        .await
        .unwrap_err();

    match err {
        Error::TokenApi { code, message } => {
            assert_eq!(code, 1020);
            assert_eq!(message, "session expired");
        }
        other => panic!("expected TokenApi error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_token_exchange_rejects_empty_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/account/login/saas/getTokenFormSass"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 0,
            "data": {"key": "", "uin": "100", "ownerUin": "200"}
        })))
        .mount(&server)
        .await;

    let err = exchanger(mock_settings(&server.uri()))
        .exchange(&CookiePair::new("S", "100"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::TokenApi { .. }));
}

#[tokio::test]
async fn test_token_exchange_transport_error() {
    // Nothing listens here
    let err = exchanger(mock_settings("http://127.0.0.1:9"))
        .exchange(&CookiePair::new("S", "100"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Network(_)));
}

#[tokio::test]
async fn test_redeem_request_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/common/portal-user"))
        // csrf_code("K") pinned by the signature reference vectors
        .and(header("x-csrfcode", "177648"))
        .and(header("cookie", "saas_uin=100; saas_ownerUin=200; saas_token=K"))
        .and(body_json(serde_json::json!({
            "Action": "redeem/consume",
            "Data": {"code": "WELCOME"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"code": "Success", "message": "credited"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = redeem_client(mock_settings(&server.uri()));
    let outcomes = redeem_all(&client, &test_token(), &["WELCOME".to_string()], 5).await;

    assert_eq!(
        outcomes,
        vec![RedeemOutcome::accepted("WELCOME", "Success", "credited")]
    );
}

#[tokio::test]
async fn test_redeem_batch_duplicates_and_statuses() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/common/portal-user"))
        .and(body_json(serde_json::json!({
            "Action": "redeem/consume",
            "Data": {"code": "A"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"code": "AlreadyUsed", "message": "code was claimed"}
        })))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/common/portal-user"))
        .and(body_json(serde_json::json!({
            "Action": "redeem/consume",
            "Data": {"code": "B"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"code": "Success", "message": "credited"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = redeem_client(mock_settings(&server.uri()));
    let codes = vec!["A".to_string(), "A".to_string(), "B".to_string()];
    let outcomes = redeem_all(&client, &test_token(), &codes, 5).await;

    assert_eq!(outcomes.len(), 3);
    // Each duplicate submission yields its own independent outcome
    let already_used: Vec<_> = outcomes
        .iter()
        .filter(|o| **o == RedeemOutcome::accepted("A", "AlreadyUsed", "code was claimed"))
        .collect();
    assert_eq!(already_used.len(), 2);
    assert!(outcomes.contains(&RedeemOutcome::accepted("B", "Success", "credited")));
}

#[tokio::test]
async fn test_redeem_server_error_is_per_code_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/common/portal-user"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = redeem_client(mock_settings(&server.uri()));
    let codes = vec!["A".to_string(), "B".to_string()];
    let outcomes = redeem_all(&client, &test_token(), &codes, 5).await;

    // Both failures are captured; neither aborts the batch
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o.is_failure()));
    let mut seen: Vec<&str> = outcomes.iter().map(|o| o.code()).collect();
    seen.sort_unstable();
    assert_eq!(seen, vec!["A", "B"]);
}

#[tokio::test]
async fn test_redeem_missing_fields_fall_back_to_defaults() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/common/portal-user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = redeem_client(mock_settings(&server.uri()));
    let outcomes = redeem_all(&client, &test_token(), &["A".to_string()], 5).await;

    assert_eq!(
        outcomes,
        vec![RedeemOutcome::accepted("A", "unknown status", "no message")]
    );
}

#[tokio::test]
async fn test_empty_batch_returns_empty() {
    let server = MockServer::start().await;

    let client = redeem_client(mock_settings(&server.uri()));
    let outcomes = redeem_all(&client, &test_token(), &[], 5).await;

    assert!(outcomes.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_full_pipeline_with_fake_browser() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/account/login/saas/getTokenFormSass"))
        .and(header("cookie", "uin=100; skey=S;"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 0,
            "data": {"key": "K", "uin": "100", "ownerUin": 200}
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/common/portal-user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"code": "Success", "message": "credited"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let pipeline = RedeemPipelineGeneric::with_credential_source(
        mock_settings(&server.uri()),
        FakeBrowser(CookiePair::new("S", "o100")),
    );

    let cookies = pipeline.harvest_credentials().await.unwrap();
    let token = pipeline.exchange_token(&cookies).await.unwrap();
    assert_eq!(token, test_token());

    let outcomes = pipeline
        .redeem_batch(&token, &["WELCOME".to_string()])
        .await;
    assert_eq!(
        outcomes,
        vec![RedeemOutcome::accepted("WELCOME", "Success", "credited")]
    );
}
