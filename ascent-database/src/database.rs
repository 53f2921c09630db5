use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use sqlx::{PgPool, migrate::Migrator};

use crate::cache::CacheService;
use crate::store::StoreBackend;
use crate::store::memory_store::MemoryUserStore;
use crate::store::postgres_store::PgUserStore;

/// Compile-time discovered SQLx migrations for the `ascent-database` crate.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Shared user store handle passed across crates.
#[derive(Clone, Debug)]
pub struct Database {
    backend: StoreBackend,
    cache: CacheService,
    write_epoch: Arc<AtomicU64>,
}

impl Database {
    /// Create a Postgres-backed handle from an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self::with_cache(pool, CacheService::disabled("ascent:prod"))
    }

    /// Create a Postgres-backed handle from an existing pool and cache service.
    pub fn with_cache(pool: PgPool, cache: CacheService) -> Self {
        Self {
            backend: StoreBackend::Postgres(PgUserStore::new(pool)),
            cache,
            write_epoch: Arc::default(),
        }
    }

    /// Create a process-local handle. Records do not survive a restart.
    pub fn in_memory(cache: CacheService) -> Self {
        Self {
            backend: StoreBackend::Memory(MemoryUserStore::default()),
            cache,
            write_epoch: Arc::default(),
        }
    }

    /// Expose the Postgres pool, if this handle is backed by one.
    pub fn pool(&self) -> Option<&PgPool> {
        match &self.backend {
            StoreBackend::Postgres(store) => Some(store.pool()),
            StoreBackend::Memory(_) => None,
        }
    }

    /// Apply embedded migrations. A no-op for the in-memory backend.
    pub async fn run_migrations(&self) -> anyhow::Result<bool> {
        match self.pool() {
            Some(pool) => {
                MIGRATOR.run(pool).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn is_persistent(&self) -> bool {
        matches!(self.backend, StoreBackend::Postgres(_))
    }

    pub(crate) fn backend(&self) -> &StoreBackend {
        &self.backend
    }

    /// Counter bumped after every committed user write from this process.
    ///
    /// Cache fills compare it before and after loading to avoid writing back
    /// a profile that a concurrent write already replaced.
    pub fn write_epoch(&self) -> u64 {
        self.write_epoch.load(Ordering::Acquire)
    }

    pub(crate) fn record_write(&self) {
        self.write_epoch.fetch_add(1, Ordering::AcqRel);
    }

    /// Expose the cache service for query modules.
    pub fn cache(&self) -> &CacheService {
        &self.cache
    }
}
