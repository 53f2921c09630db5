mod config;

use poise::serenity_prelude as serenity;
use tracing::{debug, error, info, warn};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rustls::crypto::ring::default_provider;
use sqlx::postgres::PgPoolOptions;

use ascent_core::{Data, Error};
use ascent_database::{CacheService, Database};
use ascent_progression::Progression;

use crate::config::BotConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter_fn(|metadata| {
        let target = metadata.target();

        let within_info_level = *metadata.level() <= tracing::Level::INFO;
        if !within_info_level {
            return false;
        }

        !(target.starts_with("serenity::gateway::bridge::shard_manager")
            || target.starts_with("serenity::gateway::bridge::shard_runner"))
    }));

    tracing_subscriber::registry().with(fmt_layer).init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    dotenvy::dotenv().ok();
    let config = BotConfig::from_env()?;

    let cache = build_cache(&config).await;
    let db = build_store(&config, cache).await?;

    info!(
        tick_interval_secs = config.rules.tick_interval().as_secs(),
        check_in_interval_secs = config.rules.check_in_interval().as_secs(),
        redeem_codes = config.rules.redeem_code_count(),
        "Progression rules configured."
    );
    let progression = Progression::new(db, config.rules);

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let guild_id = config.guild_id;
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: ascent_commands::commands(),
            on_error: |error| Box::pin(on_error(error)),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(ascent_utils::COMMAND_PREFIX.to_string()),
                mention_as_prefix: false,
                ..Default::default()
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            let progression = progression.clone();
            Box::pin(async move {
                info!("Ascent is online.");

                poise::builtins::register_in_guild(
                    ctx,
                    &framework.options().commands,
                    serenity::GuildId::new(guild_id),
                )
                .await?;

                Ok(Data::new(progression))
            })
        })
        .build();

    info!("Ascent is connecting...");

    let mut client = serenity::ClientBuilder::new(config.token, intents)
        .framework(framework)
        .await?;

    client.start().await?;
    Ok(())
}

async fn build_cache(config: &BotConfig) -> CacheService {
    let prefix = config.redis_key_prefix.clone();

    let mut cache = if !config.redis_enabled {
        info!("Redis cache disabled (set REDIS_ENABLED=true to enable).");
        CacheService::disabled(prefix)
    } else if let Some(redis_url) = config.redis_url.as_deref() {
        match CacheService::redis(redis_url, prefix.clone()) {
            Ok(cache) => {
                info!(key_prefix = %prefix, "Redis cache enabled.");
                cache
            }
            Err(err) => {
                warn!(?err, key_prefix = %prefix, "Failed to initialize Redis cache; continuing without it.");
                CacheService::disabled(prefix)
            }
        }
    } else {
        warn!(key_prefix = %prefix, "REDIS_ENABLED=true but REDIS_URL is missing; continuing without cache.");
        CacheService::disabled(prefix)
    };

    cache.configure_profile_ttl(config.profile_cache_ttl);

    if cache.is_redis_enabled() {
        match cache.ping().await {
            Ok(()) => info!("Redis cache health check passed."),
            Err(err) => warn!(
                ?err,
                "Redis cache ping failed; cache operations will continue with fallback behavior."
            ),
        }
    }

    cache
}

async fn build_store(config: &BotConfig, cache: CacheService) -> anyhow::Result<Database> {
    let Some(database_url) = config.database_url.as_deref() else {
        warn!("DATABASE_URL is not set; progress is kept in memory and lost on restart.");
        return Ok(Database::in_memory(cache));
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;
    info!("PostgreSQL connection established.");

    let db = Database::with_cache(pool, cache);

    if config.auto_run_migrations {
        db.run_migrations().await?;
        info!("Database migrations applied.");
    } else {
        info!("Auto migrations disabled (set AUTO_RUN_MIGRATIONS=true to run at startup).");
    }

    Ok(db)
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(?error, command = %ctx.command().qualified_name, "command error");

            let embed = serenity::CreateEmbed::new()
                .title("Command Error")
                .description("Something went wrong while running this command. Please try again later.")
                .color(ascent_utils::embed::DEFAULT_EMBED_COLOR);

            let _ = ctx
                .send(poise::CreateReply::default().ephemeral(true).embed(embed))
                .await;
        }
        poise::FrameworkError::ArgumentParse { ctx, input, .. } => {
            let usage = format!("Usage: `!{}`", ctx.command().qualified_name);
            let description = match input {
                Some(input) => format!("Invalid argument: `{}`\n{}", input, usage),
                None => format!("Missing required argument.\n{}", usage),
            };

            let _ = ctx.say(description).await;
        }
        poise::FrameworkError::UnknownCommand { .. } => {
            debug!("unknown command invocation");
        }
        other => {
            error!(?other, "framework error");
        }
    }
}
