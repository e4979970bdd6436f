//! 테스트용 키와 토큰 헬퍼.
//!
//! `tests/fixtures`의 RSA 키쌍으로 토큰을 서명하고, 같은 키의 공개 JWKS로
//! 검증기를 구성합니다.

use std::sync::Arc;

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};

use super::jwks::StaticKeySource;
use super::TokenVerifier;

/// 테스트 키 세트 (JWKS JSON)
pub const TEST_JWKS: &str = include_str!("../../tests/fixtures/test_jwks.json");
/// 테스트 키 세트에 있는 키의 개인 키
pub const TEST_PRIVATE_KEY: &str = include_str!("../../tests/fixtures/test_rsa_private.pem");
/// 키 세트에 없는 개인 키
pub const OTHER_PRIVATE_KEY: &str = include_str!("../../tests/fixtures/other_rsa_private.pem");
/// 테스트 키 ID
pub const TEST_KID: &str = "test-key-1";
pub const TEST_AUDIENCE: &str = "drinks";
pub const TEST_ISSUER: &str = "https://coffee-shop.test/";

/// 테스트 키 세트를 쓰는 검증기.
pub fn test_verifier() -> TokenVerifier {
    let keys = StaticKeySource::from_json(TEST_JWKS).expect("test JWKS fixture is valid");
    TokenVerifier::new(Arc::new(keys), TEST_AUDIENCE, TEST_ISSUER)
}

/// 한 시간 뒤 만료되는 유효한 클레임 (권한 필드 없음).
pub fn valid_claims() -> Value {
    let now = chrono::Utc::now().timestamp();
    json!({
        "iss": TEST_ISSUER,
        "sub": "auth0|test-user",
        "aud": TEST_AUDIENCE,
        "iat": now,
        "exp": now + 3600,
    })
}

/// 주어진 개인 키와 `kid`로 클레임을 서명합니다.
pub fn sign_claims_with(private_key_pem: &str, kid: Option<&str>, claims: &Value) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = kid.map(str::to_string);

    let key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
        .expect("test private key fixture is valid");
    encode(&header, claims, &key).expect("failed to sign test token")
}

/// 테스트 키로 클레임을 서명합니다.
pub fn sign_claims(claims: &Value) -> String {
    sign_claims_with(TEST_PRIVATE_KEY, Some(TEST_KID), claims)
}

/// 주어진 권한을 가진 유효한 토큰.
pub fn token_with_permissions(permissions: &[&str]) -> String {
    let mut claims = valid_claims();
    claims["permissions"] = json!(permissions);
    sign_claims(&claims)
}

/// `Authorization` 헤더 값.
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
