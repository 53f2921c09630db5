use tracing::{debug, info, warn};

use ascent_database::ProgressionRecord;
use ascent_database::impls::users::update_record;
use ascent_utils::time::now_unix_secs;

use crate::error::ProgressionError;
use crate::rules::{LEVEL_UP_COINS, LEVEL_UP_EXP, PASSIVE_TICK_EXP, RANK_UP_LEVEL};
use crate::service::Progression;
use crate::titles::title_for_rank;

/// What one passive tick did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The global tick window has not elapsed; nothing was touched.
    Gated,
    /// The window was open but the user does not exist.
    UserMissing,
    /// Below the level-up threshold; exp went up by one.
    Accrued { exp: u64 },
    /// Spent exp on a level inside the current rank.
    LeveledUp { level: u32 },
    /// The level wrapped and the rank (and title) advanced.
    RankedUp { rank: u32, title: String },
}

/// Apply one tick's worth of progression to a record.
///
/// Only one level is gained per tick, however much exp is banked.
pub fn advance(record: &mut ProgressionRecord) -> TickOutcome {
    if record.exp < LEVEL_UP_EXP {
        record.exp += PASSIVE_TICK_EXP;
        return TickOutcome::Accrued { exp: record.exp };
    }

    record.exp -= LEVEL_UP_EXP;
    record.coins += LEVEL_UP_COINS;

    let next_level = record.level + 1;
    if next_level < RANK_UP_LEVEL {
        record.level = next_level;
        return TickOutcome::LeveledUp { level: next_level };
    }

    record.level = 0;
    record.rank += 1;
    record.title = title_for_rank(record.rank).to_owned();

    TickOutcome::RankedUp {
        rank: record.rank,
        title: record.title.clone(),
    }
}

impl Progression {
    /// Passive tick for a profile view, using the current time.
    pub async fn apply_passive_tick(&self, user_id: u64) -> Result<TickOutcome, ProgressionError> {
        self.apply_passive_tick_at(user_id, now_unix_secs()).await
    }

    /// Passive tick at an explicit unix time.
    ///
    /// The global clock stays locked for the whole call, so ticks from all
    /// users are serialized through one window. The clock only advances when
    /// a user record was actually evaluated.
    pub async fn apply_passive_tick_at(
        &self,
        user_id: u64,
        now: u64,
    ) -> Result<TickOutcome, ProgressionError> {
        let mut window = self.clock.claim().await;

        let elapsed = window.elapsed_minutes(now);
        if elapsed < self.rules.tick_interval_minutes() {
            debug!(user_id, elapsed, "passive tick gated");
            return Ok(TickOutcome::Gated);
        }

        let outcome = update_record(&self.db, user_id, advance)
            .await
            .map_err(|err| {
                warn!(?err, user_id, "passive tick could not reach the user store");
                ProgressionError::store(err)
            })?;

        let Some(outcome) = outcome else {
            debug!(user_id, "passive tick for unknown user ignored");
            return Ok(TickOutcome::UserMissing);
        };

        window.mark(now);

        match &outcome {
            TickOutcome::RankedUp { rank, title } => {
                info!(user_id, rank, title = %title, "user promoted")
            }
            other => debug!(user_id, outcome = ?other, "passive tick applied"),
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use ascent_database::impls::users::{load_record, register_user, update_record};
    use ascent_database::{CacheService, Database, ProgressionRecord};

    use super::{TickOutcome, advance};
    use crate::clock::ProgressionClock;
    use crate::rules::ProgressionRules;
    use crate::service::Progression;

    const START: u64 = 1_700_000_000;
    const OPEN: u64 = START + 60;

    fn service() -> Progression {
        Progression::with_clock(
            Database::in_memory(CacheService::disabled("ascent:test")),
            ProgressionRules::default(),
            ProgressionClock::starting_at(START),
        )
    }

    async fn seed(progression: &Progression, user_id: u64, level: u32, exp: u64, rank: u32) {
        register_user(progression.db(), user_id, "tester", START)
            .await
            .expect("register");
        update_record(progression.db(), user_id, |record| {
            record.level = level;
            record.exp = exp;
            record.coins = 40;
            record.rank = rank;
            record.title = crate::titles::title_for_rank(rank).to_owned();
        })
        .await
        .expect("seed");
    }

    async fn record(progression: &Progression, user_id: u64) -> ProgressionRecord {
        load_record(progression.db(), user_id)
            .await
            .expect("load")
            .expect("user exists")
    }

    #[tokio::test]
    async fn tick_inside_window_changes_nothing() {
        let progression = service();
        seed(&progression, 1, 3, 100, 2).await;
        let before = record(&progression, 1).await;

        let outcome = progression
            .apply_passive_tick_at(1, START + 59)
            .await
            .expect("tick");

        assert_eq!(outcome, TickOutcome::Gated);
        assert_eq!(record(&progression, 1).await, before);
        assert_eq!(progression.clock().last_tick().await, START);
    }

    #[tokio::test]
    async fn no_ticks_leave_record_identical() {
        let progression = service();
        register_user(progression.db(), 1, "tester", START)
            .await
            .expect("register");

        assert_eq!(record(&progression, 1).await, ProgressionRecord::initial());
    }

    #[tokio::test]
    async fn level_up_spends_exp_and_pays_coins() {
        let progression = service();
        seed(&progression, 1, 3, 100, 2).await;

        let outcome = progression.apply_passive_tick_at(1, OPEN).await.expect("tick");

        assert_eq!(outcome, TickOutcome::LeveledUp { level: 4 });
        let after = record(&progression, 1).await;
        assert_eq!(after.exp, 0);
        assert_eq!(after.level, 4);
        assert_eq!(after.coins, 50);
        assert_eq!(after.rank, 2);
        assert_eq!(after.title, "Pemula");
    }

    #[tokio::test]
    async fn level_eight_wraps_and_promotes_rank() {
        let progression = service();
        seed(&progression, 1, 8, 100, 4).await;

        let outcome = progression.apply_passive_tick_at(1, OPEN).await.expect("tick");

        assert_eq!(
            outcome,
            TickOutcome::RankedUp {
                rank: 5,
                title: "Kapten".to_owned()
            }
        );
        let after = record(&progression, 1).await;
        assert_eq!(after.level, 0);
        assert_eq!(after.rank, 5);
        assert_eq!(after.title, "Kapten");
        assert_eq!(after.exp, 0);
        assert_eq!(after.coins, 50);
    }

    #[tokio::test]
    async fn promotion_past_table_is_unknown() {
        let progression = service();
        seed(&progression, 1, 8, 130, 18).await;

        progression.apply_passive_tick_at(1, OPEN).await.expect("tick");

        let after = record(&progression, 1).await;
        assert_eq!(after.rank, 19);
        assert_eq!(after.title, "Unknown");
        assert_eq!(after.exp, 30);
    }

    #[tokio::test]
    async fn below_threshold_accrues_one_exp() {
        let progression = service();
        seed(&progression, 1, 6, 50, 3).await;

        let outcome = progression.apply_passive_tick_at(1, OPEN).await.expect("tick");

        assert_eq!(outcome, TickOutcome::Accrued { exp: 51 });
        let after = record(&progression, 1).await;
        assert_eq!(after.exp, 51);
        assert_eq!(after.level, 6);
        assert_eq!(after.coins, 40);
        assert_eq!(after.rank, 3);
        assert_eq!(after.title, "Pemula Senior");
    }

    #[tokio::test]
    async fn accrual_reaching_threshold_levels_on_next_open_tick() {
        let progression = service();
        seed(&progression, 1, 0, 99, 1).await;

        progression.apply_passive_tick_at(1, OPEN).await.expect("tick");
        assert_eq!(record(&progression, 1).await.exp, 100);

        let outcome = progression
            .apply_passive_tick_at(1, OPEN + 60)
            .await
            .expect("tick");
        assert_eq!(outcome, TickOutcome::LeveledUp { level: 1 });
        assert_eq!(record(&progression, 1).await.exp, 0);
    }

    #[tokio::test]
    async fn gate_is_shared_by_all_users() {
        let progression = service();
        seed(&progression, 1, 0, 10, 1).await;
        seed(&progression, 2, 0, 10, 1).await;

        let first = progression.apply_passive_tick_at(1, OPEN).await.expect("tick");
        let second = progression
            .apply_passive_tick_at(2, OPEN + 30)
            .await
            .expect("tick");

        assert_eq!(first, TickOutcome::Accrued { exp: 11 });
        assert_eq!(second, TickOutcome::Gated);
        assert_eq!(record(&progression, 2).await.exp, 10);
        assert_eq!(progression.clock().last_tick().await, OPEN);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_ticks_share_one_window() {
        let progression = service();
        let users: Vec<u64> = (1..=32).collect();
        for &user_id in &users {
            seed(&progression, user_id, 0, 10, 1).await;
        }

        let handles: Vec<_> = users
            .iter()
            .map(|&user_id| {
                let progression = progression.clone();
                tokio::spawn(async move { progression.apply_passive_tick_at(user_id, OPEN).await })
            })
            .collect();

        let mut applied = 0;
        for handle in handles {
            let outcome = handle.await.expect("join").expect("tick");
            if outcome != TickOutcome::Gated {
                applied += 1;
            }
        }

        let mut total_exp = 0;
        for &user_id in &users {
            total_exp += record(&progression, user_id).await.exp;
        }

        assert_eq!(applied, 1);
        assert_eq!(total_exp, 10 * 32 + 1);
        assert_eq!(progression.clock().last_tick().await, OPEN);
    }

    #[tokio::test]
    async fn store_failure_is_reported_and_keeps_the_window_open() {
        let progression = Progression::with_clock(
            crate::testing::unreachable_store(),
            ProgressionRules::default(),
            ProgressionClock::starting_at(START),
        );

        let result = progression.apply_passive_tick_at(1, OPEN).await;

        assert!(matches!(
            result,
            Err(crate::error::ProgressionError::StoreUnavailable(_))
        ));
        assert_eq!(progression.clock().last_tick().await, START);
    }

    #[tokio::test]
    async fn missing_user_is_a_no_op_and_keeps_the_window_open() {
        let progression = service();
        seed(&progression, 1, 0, 10, 1).await;

        let missing = progression.apply_passive_tick_at(99, OPEN).await.expect("tick");
        assert_eq!(missing, TickOutcome::UserMissing);
        assert_eq!(progression.clock().last_tick().await, START);

        let real = progression.apply_passive_tick_at(1, OPEN).await.expect("tick");
        assert_eq!(real, TickOutcome::Accrued { exp: 11 });
    }

    #[tokio::test]
    async fn banked_exp_levels_once_per_tick() {
        let progression = service();
        seed(&progression, 1, 7, 250, 1).await;

        progression.apply_passive_tick_at(1, OPEN).await.expect("tick");
        let after_first = record(&progression, 1).await;
        assert_eq!((after_first.level, after_first.exp), (8, 150));

        progression
            .apply_passive_tick_at(1, OPEN + 60)
            .await
            .expect("tick");
        let after_second = record(&progression, 1).await;
        assert_eq!((after_second.level, after_second.rank), (0, 2));
        assert_eq!(after_second.exp, 50);
        assert_eq!(after_second.title, "Pemula");
    }

    #[test]
    fn advance_never_stores_level_nine() {
        let mut record = ProgressionRecord::initial();
        record.exp = 100 * 40;

        for _ in 0..40 {
            advance(&mut record);
            assert!(record.level < 9);
            assert_eq!(record.title, crate::titles::title_for_rank(record.rank));
        }
        assert_eq!(record.exp, 0);
    }
}
