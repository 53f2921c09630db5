use std::env;
use std::time::Duration;

use tracing::warn;

use ascent_database::cache::DEFAULT_PROFILE_CACHE_TTL;
use ascent_progression::ProgressionRules;
use ascent_progression::rules::{DEFAULT_CHECK_IN_INTERVAL, DEFAULT_TICK_INTERVAL};
use ascent_utils::parse::{parse_code_list, parse_duration_seconds};

/// Settings read from the environment (after `.env` is loaded).
pub struct BotConfig {
    pub token: String,
    pub guild_id: u64,
    pub database_url: Option<String>,
    pub auto_run_migrations: bool,
    pub redis_enabled: bool,
    pub redis_url: Option<String>,
    pub redis_key_prefix: String,
    pub profile_cache_ttl: Duration,
    pub rules: ProgressionRules,
}

impl BotConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let token = env::var("DISCORD_TOKEN")?;
        let guild_id = env::var("DISCORD_GUILD_ID")?.parse::<u64>()?;

        let rules = ProgressionRules::default()
            .with_tick_interval(env_duration("PROGRESSION_TICK_INTERVAL", DEFAULT_TICK_INTERVAL))
            .with_check_in_interval(env_duration("CHECK_IN_INTERVAL", DEFAULT_CHECK_IN_INTERVAL))
            .with_redeem_codes(
                env::var("REDEEM_CODES")
                    .map(|raw| parse_code_list(&raw))
                    .unwrap_or_default(),
            );

        Ok(Self {
            token,
            guild_id,
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
            auto_run_migrations: env_bool("AUTO_RUN_MIGRATIONS", true),
            redis_enabled: env_bool("REDIS_ENABLED", false),
            redis_url: env::var("REDIS_URL").ok(),
            redis_key_prefix: env::var("REDIS_KEY_PREFIX")
                .unwrap_or_else(|_| "ascent:prod".to_string()),
            profile_cache_ttl: Duration::from_secs(env_u64(
                "PROFILE_CACHE_TTL_SECONDS",
                DEFAULT_PROFILE_CACHE_TTL.as_secs(),
            )),
            rules,
        })
    }
}

fn env_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => parse_bool(&value),
        Err(_) => default,
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn env_u64(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(value) => value.trim().parse::<u64>().unwrap_or(default),
        Err(_) => default,
    }
}

fn env_duration(key: &str, default: Duration) -> Duration {
    let Ok(raw) = env::var(key) else {
        return default;
    };

    match parse_duration_seconds(&raw) {
        Some(secs) => Duration::from_secs(secs),
        None => {
            warn!(
                key,
                value = %raw,
                default_secs = default.as_secs(),
                "invalid duration; using default"
            );
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_bool;

    #[test]
    fn truthy_values() {
        for value in ["1", "true", " YES ", "on"] {
            assert!(parse_bool(value), "{value} should be true");
        }
        for value in ["0", "false", "off", ""] {
            assert!(!parse_bool(value), "{value} should be false");
        }
    }
}
