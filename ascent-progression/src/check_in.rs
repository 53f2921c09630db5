use std::time::Duration;

use tracing::{debug, warn};

use ascent_database::ProgressionRecord;
use ascent_database::impls::users::update_record;
use ascent_utils::time::{now_unix_secs, secs_between};

use crate::error::ProgressionError;
use crate::rules::{CHECK_IN_COINS, CHECK_IN_EXP};
use crate::service::Progression;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckInOutcome {
    Granted { exp: u64, coins: u64 },
    /// Too soon since the last grant; `retry_after` is the remaining wait.
    AlreadyCheckedIn { retry_after: Duration },
    UserMissing,
}

/// Grant the check-in reward if the per-user interval has passed.
///
/// Does not evaluate level-ups: exp pushed past the threshold here is only
/// spent by the next passive tick.
pub fn grant_check_in(
    record: &mut ProgressionRecord,
    now: u64,
    interval: Duration,
) -> CheckInOutcome {
    if let Some(last) = record.last_check_in {
        let since_last = secs_between(last, now);
        if since_last < interval.as_secs() {
            return CheckInOutcome::AlreadyCheckedIn {
                retry_after: Duration::from_secs(interval.as_secs() - since_last),
            };
        }
    }

    record.exp += CHECK_IN_EXP;
    record.coins += CHECK_IN_COINS;
    record.last_check_in = Some(now);

    CheckInOutcome::Granted {
        exp: record.exp,
        coins: record.coins,
    }
}

impl Progression {
    pub async fn check_in(&self, user_id: u64) -> Result<CheckInOutcome, ProgressionError> {
        self.check_in_at(user_id, now_unix_secs()).await
    }

    pub async fn check_in_at(
        &self,
        user_id: u64,
        now: u64,
    ) -> Result<CheckInOutcome, ProgressionError> {
        let interval = self.rules.check_in_interval();

        let outcome = update_record(&self.db, user_id, |record| {
            grant_check_in(record, now, interval)
        })
        .await
        .map_err(|err| {
            warn!(?err, user_id, "check-in could not reach the user store");
            ProgressionError::store(err)
        })?
        .unwrap_or(CheckInOutcome::UserMissing);

        debug!(user_id, outcome = ?outcome, "check-in evaluated");
        Ok(outcome)
    }
}
