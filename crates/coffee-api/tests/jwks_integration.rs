//! 키 세트 HTTP 조회 통합 테스트.
//!
//! mockito 서버가 JWKS 문서를 제공하고, 조회기/캐시/검증기가 이를 사용하는지
//! 확인합니다.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use coffee_api::auth::{CachedKeySource, JwksFetcher, KeySource, TokenVerifier};
use coffee_core::AuthConfig;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::json;

const JWKS: &str = include_str!("fixtures/test_jwks.json");
const PRIVATE_KEY: &str = include_str!("fixtures/test_rsa_private.pem");
const JWKS_PATH: &str = "/.well-known/jwks.json";
const AUDIENCE: &str = "drinks";

fn issuer(server: &mockito::Server) -> String {
    format!("{}/", server.url())
}

fn sign(kid: &str, issuer: &str, permissions: &[&str]) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = json!({
        "iss": issuer,
        "sub": "auth0|barista",
        "aud": AUDIENCE,
        "iat": now,
        "exp": now + 3600,
        "permissions": permissions,
    });

    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(kid.to_string());
    let key = EncodingKey::from_rsa_pem(PRIVATE_KEY.as_bytes()).unwrap();
    encode(&header, &claims, &key).unwrap()
}

fn cached_verifier(server: &mockito::Server) -> TokenVerifier {
    let fetcher = JwksFetcher::new(format!("{}{}", server.url(), JWKS_PATH)).unwrap();
    let keys = CachedKeySource::new(fetcher, Duration::from_secs(600));
    TokenVerifier::new(Arc::new(keys), AUDIENCE, issuer(server))
}

#[tokio::test]
async fn test_fetcher_reads_key_set() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", JWKS_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(JWKS)
        .expect(1)
        .create_async()
        .await;

    let fetcher = JwksFetcher::new(format!("{}{}", server.url(), JWKS_PATH)).unwrap();
    let keys = fetcher.key_set().await.unwrap();

    assert!(keys.find("test-key-1").is_some());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_cached_verifier_fetches_once() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", JWKS_PATH)
        .with_status(200)
        .with_body(JWKS)
        .expect(1)
        .create_async()
        .await;

    let verifier = cached_verifier(&server);
    let token = sign("test-key-1", &issuer(&server), &["post:drinks"]);

    for _ in 0..3 {
        let claims = verifier.verify(&token).await.unwrap();
        assert_eq!(claims.permissions, Some(vec!["post:drinks".to_string()]));
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn test_unknown_kid_refreshes_once() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", JWKS_PATH)
        .with_status(200)
        .with_body(JWKS)
        .expect(2)
        .create_async()
        .await;

    let verifier = cached_verifier(&server);
    let token = sign("rotated-key", &issuer(&server), &[]);

    let err = verifier.verify(&token).await.unwrap_err();
    assert_eq!(err.code(), "key_not_found");
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    // 최초 조회 + kid 미스로 인한 갱신 1회
    mock.assert_async().await;
}

#[tokio::test]
async fn test_repeated_unknown_kids_do_not_refetch() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", JWKS_PATH)
        .with_status(200)
        .with_body(JWKS)
        .expect(2)
        .create_async()
        .await;

    let verifier = cached_verifier(&server);

    for kid in ["forged-1", "forged-2", "forged-3", "forged-4"] {
        let token = sign(kid, &issuer(&server), &[]);
        let err = verifier.verify(&token).await.unwrap_err();
        assert_eq!(err.code(), "key_not_found");
    }

    // 최초 조회 + 첫 kid 미스의 갱신만 서버에 도달
    mock.assert_async().await;
}

#[tokio::test]
async fn test_key_set_server_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", JWKS_PATH)
        .with_status(500)
        .create_async()
        .await;

    let verifier = cached_verifier(&server);
    let token = sign("test-key-1", &issuer(&server), &[]);

    let err = verifier.verify(&token).await.unwrap_err();
    assert_eq!(err.code(), "key_set_unavailable");
    assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_verifier_from_config_without_cache() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", JWKS_PATH)
        .with_status(200)
        .with_body(JWKS)
        .expect(2)
        .create_async()
        .await;

    let config = AuthConfig {
        domain: "unused.example.com".to_string(),
        audience: AUDIENCE.to_string(),
        issuer: Some(issuer(&server)),
        jwks_url: Some(format!("{}{}", server.url(), JWKS_PATH)),
        jwks_cache_ttl_secs: 0,
    };
    let verifier = TokenVerifier::from_config(&config).unwrap();
    let token = sign("test-key-1", &issuer(&server), &["delete:drinks"]);

    verifier.verify(&token).await.unwrap();
    verifier.verify(&token).await.unwrap();

    // TTL 0이면 요청마다 조회
    mock.assert_async().await;
}
