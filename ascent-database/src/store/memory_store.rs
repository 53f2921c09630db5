use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::model::progression::{ProgressionRecord, UserProfile};

/// Process-local store. The whole map is locked for each operation, which
/// makes every read-modify-write atomic.
#[derive(Clone, Debug, Default)]
pub(crate) struct MemoryUserStore {
    users: Arc<Mutex<HashMap<u64, UserProfile>>>,
}

impl MemoryUserStore {
    pub async fn insert_user(&self, user_id: u64, name: &str, now: u64) -> anyhow::Result<bool> {
        let mut users = self.users.lock().await;
        if users.contains_key(&user_id) {
            return Ok(false);
        }

        users.insert(
            user_id,
            UserProfile {
                user_id,
                name: name.to_owned(),
                created_at: now,
                progression: ProgressionRecord::initial(),
            },
        );
        Ok(true)
    }

    pub async fn load_profile(&self, user_id: u64) -> anyhow::Result<Option<UserProfile>> {
        Ok(self.users.lock().await.get(&user_id).cloned())
    }

    pub async fn update_record<F, T>(
        &self,
        user_id: u64,
        apply: F,
    ) -> anyhow::Result<Option<(T, bool)>>
    where
        F: FnOnce(&mut ProgressionRecord) -> T + Send,
        T: Send,
    {
        let mut users = self.users.lock().await;
        let Some(profile) = users.get_mut(&user_id) else {
            return Ok(None);
        };

        let before = profile.progression.clone();
        let output = apply(&mut profile.progression);
        let changed = profile.progression != before;

        Ok(Some((output, changed)))
    }
}
