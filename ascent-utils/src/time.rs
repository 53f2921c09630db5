use std::time::{SystemTime, UNIX_EPOCH};

/// Return the current unix timestamp in seconds.
pub fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}

/// Seconds elapsed between two unix timestamps, zero if `later` is not after `earlier`.
pub fn secs_between(earlier: u64, later: u64) -> u64 {
    later.saturating_sub(earlier)
}
