//! 서명 키 세트 (JWKS) 조회.
//!
//! - [`JwksFetcher`]: 발급자의 `/.well-known/jwks.json`을 HTTP로 조회
//! - [`CachedKeySource`]: TTL 동안 키 세트를 재사용
//! - [`StaticKeySource`]: 고정 키 세트 (테스트/오프라인)

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use super::AuthError;

/// 키 세트 조회 타임아웃
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// 강제 갱신 사이 최소 간격
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// 서명 키 세트 제공자.
#[async_trait]
pub trait KeySource: Send + Sync {
    /// 현재 키 세트를 반환합니다.
    async fn key_set(&self) -> Result<Arc<JwkSet>, AuthError>;

    /// 캐시를 무시하고 키 세트를 다시 조회합니다.
    async fn refresh(&self) -> Result<Arc<JwkSet>, AuthError> {
        self.key_set().await
    }

    /// 캐시된 키 세트를 반환할 수 있는지 여부.
    ///
    /// `true`면 검증기가 `kid`를 찾지 못했을 때 한 번 [`refresh`](Self::refresh)합니다.
    fn is_cached(&self) -> bool {
        false
    }
}

/// HTTP로 키 세트를 조회하는 제공자.
#[derive(Debug, Clone)]
pub struct JwksFetcher {
    client: reqwest::Client,
    url: String,
}

impl JwksFetcher {
    /// 새 조회기 생성.
    pub fn new(url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl KeySource for JwksFetcher {
    async fn key_set(&self) -> Result<Arc<JwkSet>, AuthError> {
        debug!(url = %self.url, "Fetching signing key set");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                warn!(url = %self.url, error = %e, "Failed to fetch signing key set");
                AuthError::key_set_unavailable()
            })?;

        let keys: JwkSet = response.json().await.map_err(|e| {
            warn!(url = %self.url, error = %e, "Signing key set is not valid JWKS");
            AuthError::key_set_unavailable()
        })?;

        debug!(keys = keys.keys.len(), "Signing key set fetched");
        Ok(Arc::new(keys))
    }
}

struct CachedKeys {
    fetched_at: Instant,
    keys: Arc<JwkSet>,
}

/// TTL 캐시를 씌운 제공자.
///
/// 강제 갱신([`KeySource::refresh`])은 [`MIN_REFRESH_INTERVAL`]에 한 번만 실제로
/// 조회하고, 그 사이에는 캐시된 키 세트를 돌려줍니다.
pub struct CachedKeySource<S> {
    inner: S,
    ttl: Duration,
    min_refresh_interval: Duration,
    cached: RwLock<Option<CachedKeys>>,
    last_forced_refresh: Mutex<Option<Instant>>,
}

impl<S: KeySource> CachedKeySource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            min_refresh_interval: MIN_REFRESH_INTERVAL,
            cached: RwLock::new(None),
            last_forced_refresh: Mutex::new(None),
        }
    }

    /// 강제 갱신 최소 간격 설정.
    pub fn with_min_refresh_interval(mut self, interval: Duration) -> Self {
        self.min_refresh_interval = interval;
        self
    }

    async fn fetch(&self) -> Result<Arc<JwkSet>, AuthError> {
        let keys = self.inner.key_set().await?;

        *self.cached.write().await = Some(CachedKeys {
            fetched_at: Instant::now(),
            keys: Arc::clone(&keys),
        });

        Ok(keys)
    }
}

#[async_trait]
impl<S: KeySource> KeySource for CachedKeySource<S> {
    async fn key_set(&self) -> Result<Arc<JwkSet>, AuthError> {
        {
            let cached = self.cached.read().await;
            if let Some(entry) = cached.as_ref() {
                if entry.fetched_at.elapsed() < self.ttl {
                    return Ok(Arc::clone(&entry.keys));
                }
            }
        }

        self.fetch().await
    }

    async fn refresh(&self) -> Result<Arc<JwkSet>, AuthError> {
        let mut last = self.last_forced_refresh.lock().await;

        if let Some(at) = *last {
            if at.elapsed() < self.min_refresh_interval {
                if let Some(entry) = self.cached.read().await.as_ref() {
                    debug!("Forced refresh throttled, using cached key set");
                    return Ok(Arc::clone(&entry.keys));
                }
            }
        }

        *last = Some(Instant::now());
        self.fetch().await
    }

    fn is_cached(&self) -> bool {
        true
    }
}

/// 고정 키 세트 제공자.
#[derive(Debug, Clone)]
pub struct StaticKeySource {
    keys: Arc<JwkSet>,
}

impl StaticKeySource {
    pub fn new(keys: JwkSet) -> Self {
        Self {
            keys: Arc::new(keys),
        }
    }

    /// JWKS JSON 문서에서 생성.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }
}

#[async_trait]
impl KeySource for StaticKeySource {
    async fn key_set(&self) -> Result<Arc<JwkSet>, AuthError> {
        Ok(Arc::clone(&self.keys))
    }
}
