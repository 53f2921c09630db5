use tracing::{info, warn};

use ascent_database::ProgressionRecord;
use ascent_database::impls::users::update_record;

use crate::error::ProgressionError;
use crate::rules::{REDEEM_COINS, REDEEM_EXP};
use crate::service::Progression;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedeemOutcome {
    Redeemed { exp_gained: u64, coins_gained: u64 },
    InvalidCode,
    AlreadyRedeemed,
    UserMissing,
}

fn apply_redeem(record: &mut ProgressionRecord, code: &str) -> RedeemOutcome {
    if record.redeemed_codes.iter().any(|used| used == code) {
        return RedeemOutcome::AlreadyRedeemed;
    }

    record.exp += REDEEM_EXP;
    record.coins += REDEEM_COINS;
    record.redeemed_codes.push(code.to_owned());

    RedeemOutcome::Redeemed {
        exp_gained: REDEEM_EXP,
        coins_gained: REDEEM_COINS,
    }
}

impl Progression {
    /// Exchange a configured code for a one-time bonus.
    ///
    /// Like check-ins, the bonus exp is only spent on levels by later
    /// passive ticks.
    pub async fn redeem(&self, user_id: u64, code: &str) -> Result<RedeemOutcome, ProgressionError> {
        let code = code.trim();
        if !self.rules.is_redeem_code(code) {
            return Ok(RedeemOutcome::InvalidCode);
        }

        let owned_code = code.to_owned();
        let outcome = update_record(&self.db, user_id, move |record| {
            apply_redeem(record, &owned_code)
        })
        .await
        .map_err(|err| {
            warn!(?err, user_id, "redeem could not reach the user store");
            ProgressionError::store(err)
        })?
        .unwrap_or(RedeemOutcome::UserMissing);

        if matches!(outcome, RedeemOutcome::Redeemed { .. }) {
            info!(user_id, "redeem code accepted");
        }

        Ok(outcome)
    }
}
