use tracing::debug;

use crate::cache::{invalidate_profile, profile_key};
use crate::database::Database;
use crate::model::progression::{ProgressionRecord, UserProfile};
use crate::store::StoreBackend;

/// Create a user with the initial progression state.
///
/// Returns `false` without touching anything if the user already exists.
pub async fn register_user(
    db: &Database,
    user_id: u64,
    name: &str,
    now: u64,
) -> anyhow::Result<bool> {
    let inserted = match db.backend() {
        StoreBackend::Postgres(store) => store.insert_user(user_id, name, now).await?,
        StoreBackend::Memory(store) => store.insert_user(user_id, name, now).await?,
    };

    if inserted {
        db.record_write();
        invalidate_profile(db.cache(), user_id).await;
    }

    Ok(inserted)
}

/// Profile for display, served from cache when possible.
pub async fn get_profile(db: &Database, user_id: u64) -> anyhow::Result<Option<UserProfile>> {
    let cache = db.cache();
    let cache_key = profile_key(cache, user_id);
    let epoch = db.write_epoch();

    cache
        .get_or_load_json(
            &cache_key,
            cache.profile_ttl(),
            || load_profile_uncached(db, user_id),
            || db.write_epoch() == epoch,
        )
        .await
}

async fn load_profile_uncached(db: &Database, user_id: u64) -> anyhow::Result<Option<UserProfile>> {
    match db.backend() {
        StoreBackend::Postgres(store) => store.load_profile(user_id).await,
        StoreBackend::Memory(store) => store.load_profile(user_id).await,
    }
}

/// Current progression record, bypassing the cache.
pub async fn load_record(db: &Database, user_id: u64) -> anyhow::Result<Option<ProgressionRecord>> {
    Ok(load_profile_uncached(db, user_id)
        .await?
        .map(|profile| profile.progression))
}

/// Atomically read, mutate and write back one user's progression record.
///
/// `apply` runs while the record is locked. The record is written only if
/// `apply` changed it. Returns `None` when the user does not exist.
pub async fn update_record<F, T>(db: &Database, user_id: u64, apply: F) -> anyhow::Result<Option<T>>
where
    F: FnOnce(&mut ProgressionRecord) -> T + Send,
    T: Send,
{
    let updated = match db.backend() {
        StoreBackend::Postgres(store) => store.update_record(user_id, apply).await?,
        StoreBackend::Memory(store) => store.update_record(user_id, apply).await?,
    };

    let Some((output, changed)) = updated else {
        return Ok(None);
    };

    if changed {
        debug!(user_id, "progression record written");
        db.record_write();
        invalidate_profile(db.cache(), user_id).await;
    }

    Ok(Some(output))
}

#[cfg(test)]
mod tests {
    use super::{get_profile, load_record, register_user, update_record};
    use crate::cache::CacheService;
    use crate::database::Database;
    use crate::model::progression::ProgressionRecord;

    fn memory_db() -> Database {
        Database::in_memory(CacheService::disabled("ascent:test"))
    }

    #[tokio::test]
    async fn registration_sets_initial_state() {
        let db = memory_db();
        assert!(register_user(&db, 1, "ayu", 1_000).await.expect("register"));

        let profile = get_profile(&db, 1).await.expect("load").expect("exists");
        assert_eq!(profile.name, "ayu");
        assert_eq!(profile.created_at, 1_000);
        assert_eq!(profile.progression, ProgressionRecord::initial());
        assert_eq!(profile.progression.level, 1);
        assert_eq!(profile.progression.title, "Newbie");
        assert!(!db.is_persistent());
    }

    #[tokio::test]
    async fn registration_never_overwrites() {
        let db = memory_db();
        register_user(&db, 1, "ayu", 1_000).await.expect("register");
        update_record(&db, 1, |record| record.exp = 77)
            .await
            .expect("update");

        assert!(!register_user(&db, 1, "other", 2_000).await.expect("register"));
        let profile = get_profile(&db, 1).await.expect("load").expect("exists");
        assert_eq!(profile.name, "ayu");
        assert_eq!(profile.progression.exp, 77);
    }

    #[tokio::test]
    async fn update_on_missing_user_is_none() {
        let db = memory_db();
        let out = update_record(&db, 42, |record| {
            record.exp += 1;
            "ran"
        })
        .await
        .expect("update");

        assert_eq!(out, None);
        assert_eq!(load_record(&db, 42).await.expect("load"), None);
    }

    #[tokio::test]
    async fn only_committed_writes_advance_the_write_epoch() {
        let db = memory_db();
        let start = db.write_epoch();

        register_user(&db, 5, "mei", 0).await.expect("register");
        let after_register = db.write_epoch();
        assert!(after_register > start);

        register_user(&db, 5, "mei", 0).await.expect("register");
        update_record(&db, 5, |_record| ()).await.expect("no-op update");
        update_record(&db, 99, |record| record.exp += 1)
            .await
            .expect("missing user");
        assert_eq!(db.write_epoch(), after_register);

        let clone = db.clone();
        update_record(&clone, 5, |record| record.coins += 1)
            .await
            .expect("update");
        assert!(db.write_epoch() > after_register);
    }

    #[tokio::test]
    async fn profile_read_after_write_is_fresh() {
        let db = memory_db();
        register_user(&db, 6, "kai", 0).await.expect("register");
        get_profile(&db, 6).await.expect("load");

        update_record(&db, 6, |record| record.exp = 42)
            .await
            .expect("update");

        let profile = get_profile(&db, 6).await.expect("load").expect("exists");
        assert_eq!(profile.progression.exp, 42);
    }

    #[tokio::test]
    async fn update_returns_closure_output() {
        let db = memory_db();
        register_user(&db, 3, "rin", 0).await.expect("register");

        let out = update_record(&db, 3, |record| {
            record.coins += 5;
            record.coins
        })
        .await
        .expect("update");

        assert_eq!(out, Some(5));
        let record = load_record(&db, 3).await.expect("load").expect("exists");
        assert_eq!(record.coins, 5);
    }
}
