mod redis_store;

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use redis_store::RedisCacheStore;

/// How long a rendered profile may be served from cache.
///
/// Writes from this process never leave a stale entry behind (see
/// `Database::write_epoch`). Writes from another process are only seen once
/// the entry expires.
pub const DEFAULT_PROFILE_CACHE_TTL: Duration = Duration::from_secs(30);

#[derive(Clone, Debug)]
enum CacheBackend {
    Disabled,
    Redis(RedisCacheStore),
}

#[derive(Clone, Debug)]
pub struct CacheService {
    key_prefix: String,
    backend: CacheBackend,
    profile_ttl: Duration,
}

impl CacheService {
    pub fn disabled(prefix: impl Into<String>) -> Self {
        Self {
            key_prefix: prefix.into(),
            backend: CacheBackend::Disabled,
            profile_ttl: DEFAULT_PROFILE_CACHE_TTL,
        }
    }

    pub fn redis(redis_url: &str, prefix: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            key_prefix: prefix.into(),
            backend: CacheBackend::Redis(RedisCacheStore::from_url(redis_url)?),
            profile_ttl: DEFAULT_PROFILE_CACHE_TTL,
        })
    }

    pub fn configure_profile_ttl(&mut self, ttl: Duration) {
        self.profile_ttl = ttl;
    }

    pub fn profile_ttl(&self) -> Duration {
        self.profile_ttl
    }

    pub fn is_redis_enabled(&self) -> bool {
        matches!(self.backend, CacheBackend::Redis(_))
    }

    pub async fn ping(&self) -> anyhow::Result<()> {
        match &self.backend {
            CacheBackend::Disabled => Ok(()),
            CacheBackend::Redis(store) => store.ping().await,
        }
    }

    pub fn key(&self, suffix: impl AsRef<str>) -> String {
        format!("{}:{}", self.key_prefix, suffix.as_ref())
    }

    pub async fn get_json<T>(&self, key: &str) -> anyhow::Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let value = match &self.backend {
            CacheBackend::Disabled => None,
            CacheBackend::Redis(store) => store.get(key).await?,
        };

        value
            .map(|bytes| {
                serde_json::from_slice(&bytes).map_err(|e| {
                    anyhow::anyhow!("failed to deserialize cache value for `{key}`: {e}")
                })
            })
            .transpose()
    }

    pub async fn set_json<T>(&self, key: &str, value: &T, ttl: Duration) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        let CacheBackend::Redis(store) = &self.backend else {
            return Ok(());
        };

        let payload = serde_json::to_vec(value)
            .map_err(|e| anyhow::anyhow!("failed to serialize cache value for `{key}`: {e}"))?;
        store.set(key, payload, ttl.as_secs().max(1)).await
    }

    pub async fn del(&self, key: &str) -> anyhow::Result<()> {
        match &self.backend {
            CacheBackend::Disabled => Ok(()),
            CacheBackend::Redis(store) => store.del(key).await,
        }
    }

    /// Read through the cache, loading and storing on a miss.
    ///
    /// `still_current` is asked before and after the store write; if it turns
    /// false the loaded value may predate a concurrent write, so it is not
    /// cached (or is removed again).
    pub async fn get_or_load_json<T, F, Fut, C>(
        &self,
        key: &str,
        ttl: Duration,
        loader: F,
        still_current: C,
    ) -> anyhow::Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
        C: Fn() -> bool,
    {
        match self.get_json::<T>(key).await {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(e) => warn!(?e, cache_key = key, "cache get failed; falling back to store"),
        }

        let loaded = loader().await?;

        if !still_current() {
            return Ok(loaded);
        }

        if let Err(e) = self.set_json(key, &loaded, ttl).await {
            warn!(?e, cache_key = key, "cache set failed; returning store value");
        } else if !still_current()
            && let Err(e) = self.del(key).await
        {
            warn!(?e, cache_key = key, "failed to drop possibly stale cache entry");
        }

        Ok(loaded)
    }
}

pub fn profile_key(cache: &CacheService, user_id: u64) -> String {
    cache.key(format!("profile:{user_id}"))
}

/// Drop a cached profile after its record changed. Failures are logged, not
/// returned: the write already committed and the entry expires on its own.
pub async fn invalidate_profile(cache: &CacheService, user_id: u64) {
    if let Err(e) = cache.del(&profile_key(cache, user_id)).await {
        warn!(?e, user_id, "failed to invalidate cached profile");
    }
}
