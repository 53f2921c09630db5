use std::time::Duration;

use poise::serenity_prelude as serenity;

use ascent_database::UserProfile;
use ascent_progression::rules::{CHECK_IN_COINS, CHECK_IN_EXP, LEVEL_UP_EXP};
use ascent_progression::{CheckInOutcome, RedeemOutcome, TickOutcome};
use ascent_utils::embed::DEFAULT_EMBED_COLOR;
use ascent_utils::formatting::{exp_progress_bar, format_compact_duration, format_count};
use ascent_utils::time::secs_between;

const PROGRESS_BAR_WIDTH: usize = 10;

pub fn not_registered_message() -> &'static str {
    "You don't have a profile yet. Use `!register` to start climbing."
}

pub fn profile_embed(
    profile: &UserProfile,
    now: u64,
    check_in_interval: Duration,
) -> serenity::CreateEmbed {
    let record = &profile.progression;
    let exp = i64::try_from(record.exp).unwrap_or(i64::MAX);
    let threshold = i64::try_from(LEVEL_UP_EXP).unwrap_or(i64::MAX);

    serenity::CreateEmbed::new()
        .title(format!("{}'s Profile", profile.name))
        .color(DEFAULT_EMBED_COLOR)
        .field("Title", record.title.clone(), true)
        .field("Rank", record.rank.to_string(), true)
        .field("Level", record.level.to_string(), true)
        .field("Exp", exp_progress_bar(exp, threshold, PROGRESS_BAR_WIDTH), false)
        .field(
            "Coins",
            format_count(i64::try_from(record.coins).unwrap_or(i64::MAX)),
            true,
        )
        .field(
            "Daily Check-In",
            check_in_status(record.last_check_in, now, check_in_interval),
            true,
        )
        .footer(serenity::CreateEmbedFooter::new(format!(
            "User ID {}",
            profile.user_id
        )))
}

/// Describe when the next check-in opens.
pub fn check_in_status(last_check_in: Option<u64>, now: u64, interval: Duration) -> String {
    let Some(last) = last_check_in else {
        return "Available now".to_owned();
    };

    let waited = secs_between(last, now);
    if waited >= interval.as_secs() {
        "Available now".to_owned()
    } else {
        format!(
            "Available in {}",
            format_compact_duration(interval.as_secs() - waited)
        )
    }
}

/// Announcement for ticks worth telling the user about.
pub fn tick_announcement(outcome: &TickOutcome) -> Option<String> {
    match outcome {
        TickOutcome::LeveledUp { level } => Some(format!("Level up! You reached level {level}.")),
        TickOutcome::RankedUp { rank, title } => {
            Some(format!("Promoted to rank {rank}: you are now **{title}**!"))
        }
        TickOutcome::Gated | TickOutcome::UserMissing | TickOutcome::Accrued { .. } => None,
    }
}

pub fn check_in_message(outcome: &CheckInOutcome) -> String {
    match outcome {
        CheckInOutcome::Granted { exp, coins } => format!(
            "Daily check-in complete! You earned {CHECK_IN_EXP} exp and {CHECK_IN_COINS} coins. You now have {exp} exp and {coins} coins."
        ),
        CheckInOutcome::AlreadyCheckedIn { retry_after } => format!(
            "You already checked in recently. Come back in {}.",
            format_compact_duration(retry_after.as_secs())
        ),
        CheckInOutcome::UserMissing => not_registered_message().to_owned(),
    }
}

pub fn redeem_message(outcome: &RedeemOutcome) -> String {
    match outcome {
        RedeemOutcome::Redeemed {
            exp_gained,
            coins_gained,
        } => format!(
            "Code redeemed! You received {} exp and {} coins.",
            format_count(i64::try_from(*exp_gained).unwrap_or(i64::MAX)),
            coins_gained
        ),
        RedeemOutcome::InvalidCode => "That redeem code is not valid.".to_owned(),
        RedeemOutcome::AlreadyRedeemed => "You have already redeemed that code.".to_owned(),
        RedeemOutcome::UserMissing => not_registered_message().to_owned(),
    }
}
