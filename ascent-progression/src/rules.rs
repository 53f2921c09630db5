use std::time::Duration;

/// Exp consumed by one level-up.
pub const LEVEL_UP_EXP: u64 = 100;
/// Coins granted by one level-up.
pub const LEVEL_UP_COINS: u64 = 10;
/// Reaching this level wraps to 0 and promotes the rank instead.
pub const RANK_UP_LEVEL: u32 = 9;
/// Exp granted by a passive tick that does not level up.
pub const PASSIVE_TICK_EXP: u64 = 1;

pub const CHECK_IN_EXP: u64 = 10;
pub const CHECK_IN_COINS: u64 = 10;

pub const REDEEM_EXP: u64 = 100_000;
pub const REDEEM_COINS: u64 = 100;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(60);
pub const DEFAULT_CHECK_IN_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Tunable parts of the progression rules.
#[derive(Clone, Debug)]
pub struct ProgressionRules {
    tick_interval: Duration,
    check_in_interval: Duration,
    redeem_codes: Vec<String>,
}

impl Default for ProgressionRules {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            check_in_interval: DEFAULT_CHECK_IN_INTERVAL,
            redeem_codes: Vec::new(),
        }
    }
}

impl ProgressionRules {
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn with_check_in_interval(mut self, interval: Duration) -> Self {
        self.check_in_interval = interval;
        self
    }

    pub fn with_redeem_codes(mut self, codes: Vec<String>) -> Self {
        self.redeem_codes = codes;
        self
    }

    /// Minimum global gap between passive ticks, in minutes.
    pub fn tick_interval_minutes(&self) -> f64 {
        self.tick_interval.as_secs_f64() / 60.0
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn check_in_interval(&self) -> Duration {
        self.check_in_interval
    }

    pub fn is_redeem_code(&self, code: &str) -> bool {
        self.redeem_codes.iter().any(|known| known == code)
    }

    pub fn redeem_code_count(&self) -> usize {
        self.redeem_codes.len()
    }
}
