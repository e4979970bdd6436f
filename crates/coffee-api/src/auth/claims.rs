//! 검증된 토큰 페이로드.

use serde::{Deserialize, Serialize};

/// 토큰 audience (`aud`). 단일 문자열 또는 목록.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Multiple(Vec<String>),
}

/// 검증을 통과한 Bearer 토큰의 클레임.
///
/// 요청마다 생성되며 저장되지 않습니다. 권한 가드가 요청 extensions에 넣어
/// 핸들러에서 `Extension<Claims>`로 꺼낼 수 있습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer
    pub iss: String,
    /// Subject - 사용자 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Audience
    pub aud: Audience,
    /// Expiration (Unix timestamp)
    pub exp: i64,
    /// Issued At (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// 권한 문자열 목록 (예: "post:drinks")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl Claims {
    /// 로그용 subject. 없으면 "unknown".
    pub fn subject(&self) -> &str {
        self.sub.as_deref().unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_auth0_payload() {
        let claims: Claims = serde_json::from_value(serde_json::json!({
            "iss": "https://coffee-shop.auth0.com/",
            "sub": "auth0|barista",
            "aud": ["drinks", "https://coffee-shop.auth0.com/userinfo"],
            "iat": 1_700_000_000,
            "exp": 1_700_086_400,
            "azp": "client-id",
            "scope": "openid profile",
            "permissions": ["get:drinks-detail"]
        }))
        .unwrap();

        assert_eq!(claims.subject(), "auth0|barista");
        assert!(matches!(claims.aud, Audience::Multiple(ref v) if v.len() == 2));
        assert_eq!(
            claims.permissions,
            Some(vec!["get:drinks-detail".to_string()])
        );
    }

    #[test]
    fn test_permissions_field_is_optional() {
        let claims: Claims = serde_json::from_value(serde_json::json!({
            "iss": "https://coffee-shop.auth0.com/",
            "aud": "drinks",
            "exp": 1_700_086_400
        }))
        .unwrap();

        assert_eq!(claims.aud, Audience::Single("drinks".to_string()));
        assert!(claims.permissions.is_none());
        assert_eq!(claims.subject(), "unknown");
    }
}
