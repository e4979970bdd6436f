//! Bearer 토큰 추출 및 검증.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use coffee_core::AuthConfig;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::jwk::Jwk;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use tracing::debug;

use super::jwks::{CachedKeySource, JwksFetcher, KeySource};
use super::{AuthError, Claims};

/// Authorization 헤더에서 Bearer 토큰을 꺼냅니다.
///
/// 헤더는 정확히 `Bearer <token>` 두 부분이어야 합니다. 스킴은 대소문자를
/// 구분하지 않습니다.
pub fn bearer_token(header: Option<&HeaderValue>) -> Result<&str, AuthError> {
    let header = header
        .ok_or_else(AuthError::missing_header)?
        .to_str()
        .map_err(|_| AuthError::invalid_header("Authorization header must be bearer token."))?;

    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        (Some(scheme), _, _) if !scheme.eq_ignore_ascii_case("bearer") => Err(
            AuthError::invalid_header("Authorization header must start with \"Bearer\"."),
        ),
        (Some(_), None, _) => Err(AuthError::invalid_header("Token not found.")),
        _ => Err(AuthError::invalid_header(
            "Authorization header must be bearer token.",
        )),
    }
}

/// RS256 토큰 검증기.
///
/// 토큰 헤더의 `kid`로 키 세트에서 공개 키를 찾고, 서명과 `exp`/`iss`/`aud`를
/// 검증합니다.
pub struct TokenVerifier {
    keys: Arc<dyn KeySource>,
    audience: String,
    issuer: String,
}

impl TokenVerifier {
    pub fn new(
        keys: Arc<dyn KeySource>,
        audience: impl Into<String>,
        issuer: impl Into<String>,
    ) -> Self {
        Self {
            keys,
            audience: audience.into(),
            issuer: issuer.into(),
        }
    }

    /// 설정에서 검증기 생성.
    ///
    /// `jwks_cache_ttl_secs`가 0이면 매 요청마다 키 세트를 조회합니다.
    pub fn from_config(config: &AuthConfig) -> Result<Self, reqwest::Error> {
        let fetcher = JwksFetcher::new(config.jwks_url())?;

        let keys: Arc<dyn KeySource> = if config.jwks_cache_ttl_secs > 0 {
            Arc::new(CachedKeySource::new(
                fetcher,
                Duration::from_secs(config.jwks_cache_ttl_secs),
            ))
        } else {
            Arc::new(fetcher)
        };

        Ok(Self::new(keys, config.audience.clone(), config.issuer()))
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// 토큰을 검증하고 클레임을 반환합니다.
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|e| {
            debug!(error = %e, "Unable to parse token header");
            AuthError::invalid_token()
        })?;

        let kid = header.kid.ok_or_else(|| {
            debug!("Token header has no kid");
            AuthError::invalid_token()
        })?;

        let jwk = self.find_key(&kid).await?;
        let key = DecodingKey::from_jwk(&jwk).map_err(|e| {
            debug!(kid = %kid, error = %e, "Signing key is not usable");
            AuthError::key_not_found()
        })?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.audience]);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);

        decode::<Claims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(kid = %kid, error = %e, "Token rejected");
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::token_expired(),
                    ErrorKind::InvalidAudience
                    | ErrorKind::InvalidIssuer
                    | ErrorKind::MissingRequiredClaim(_) => AuthError::invalid_claims(),
                    ErrorKind::InvalidSignature => AuthError::invalid_signature(),
                    _ => AuthError::invalid_token(),
                }
            })
    }

    async fn find_key(&self, kid: &str) -> Result<Jwk, AuthError> {
        let keys = self.keys.key_set().await?;
        if let Some(jwk) = keys.find(kid) {
            return Ok(jwk.clone());
        }

        // 키 교체 직후일 수 있으므로 캐시를 한 번 갱신
        if self.keys.is_cached() {
            debug!(kid = %kid, "Key id not in cached key set, refreshing");
            let keys = self.keys.refresh().await?;
            if let Some(jwk) = keys.find(kid) {
                return Ok(jwk.clone());
            }
        }

        Err(AuthError::key_not_found())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::test_support::{
        sign_claims, sign_claims_with, test_verifier, token_with_permissions, valid_claims,
        OTHER_PRIVATE_KEY, TEST_AUDIENCE, TEST_KID,
    };
    use axum::http::StatusCode;
    use serde_json::json;

    fn header(value: &str) -> HeaderValue {
        HeaderValue::from_str(value).unwrap()
    }

    #[test]
    fn test_bearer_token_extracts_token() {
        assert_eq!(bearer_token(Some(&header("Bearer abc.def"))).unwrap(), "abc.def");
        assert_eq!(bearer_token(Some(&header("bearer abc"))).unwrap(), "abc");
    }

    #[test]
    fn test_bearer_token_rejections() {
        let err = bearer_token(None).unwrap_err();
        assert_eq!(err.code(), "authorization_header_missing");
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);

        for value in ["Basic abc", "Bearer", "Bearer a b", "Token abc"] {
            let err = bearer_token(Some(&header(value))).unwrap_err();
            assert_eq!(err.code(), "invalid_header", "{}", value);
            assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn test_verify_valid_token() {
        let token = token_with_permissions(&["get:drinks-detail"]);
        let claims = test_verifier().verify(&token).await.unwrap();

        assert_eq!(claims.permissions, Some(vec!["get:drinks-detail".to_string()]));
        assert_eq!(claims.subject(), "auth0|test-user");
    }

    #[tokio::test]
    async fn test_verify_accepts_audience_list() {
        let mut claims = valid_claims();
        claims["aud"] = json!([TEST_AUDIENCE, "https://coffee-shop.test/userinfo"]);

        let verified = test_verifier().verify(&sign_claims(&claims)).await;
        assert!(verified.is_ok());
    }

    #[tokio::test]
    async fn test_verify_expired_token() {
        let mut claims = valid_claims();
        claims["exp"] = json!(chrono::Utc::now().timestamp() - 3600);

        let err = test_verifier().verify(&sign_claims(&claims)).await.unwrap_err();
        assert_eq!(err.code(), "token_expired");
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_verify_wrong_audience() {
        let mut claims = valid_claims();
        claims["aud"] = json!("other-api");

        let err = test_verifier().verify(&sign_claims(&claims)).await.unwrap_err();
        assert_eq!(err.code(), "invalid_claims");
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_verify_wrong_issuer() {
        let mut claims = valid_claims();
        claims["iss"] = json!("https://evil.example.com/");

        let err = test_verifier().verify(&sign_claims(&claims)).await.unwrap_err();
        assert_eq!(err.code(), "invalid_claims");
    }

    #[tokio::test]
    async fn test_verify_missing_issuer() {
        let mut claims = valid_claims();
        claims.as_object_mut().unwrap().remove("iss");

        let err = test_verifier().verify(&sign_claims(&claims)).await.unwrap_err();
        assert_eq!(err.code(), "invalid_claims");
    }

    #[tokio::test]
    async fn test_verify_signed_by_other_key() {
        let token = sign_claims_with(OTHER_PRIVATE_KEY, Some(TEST_KID), &valid_claims());

        let err = test_verifier().verify(&token).await.unwrap_err();
        assert_eq!(err.code(), "invalid_signature");
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_verify_unknown_kid() {
        let token = sign_claims_with(OTHER_PRIVATE_KEY, Some("rotated-key"), &valid_claims());

        let err = test_verifier().verify(&token).await.unwrap_err();
        assert_eq!(err.code(), "key_not_found");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_verify_missing_kid() {
        let token = sign_claims_with(OTHER_PRIVATE_KEY, None, &valid_claims());

        let err = test_verifier().verify(&token).await.unwrap_err();
        assert_eq!(err.code(), "invalid_token");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_verify_garbage_token() {
        let err = test_verifier().verify("not-a-jwt").await.unwrap_err();
        assert_eq!(err.code(), "invalid_token");
    }
}
