use ascent_core::{Context, Error};

use crate::CommandMeta;

pub const META: CommandMeta = CommandMeta {
    name: "ping",
    desc: "Check that the bot is up and which store it is using.",
    category: "utility",
    usage: "!ping",
};

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    let db = &ctx.data().db;
    ctx.say(pong_message(db.is_persistent(), db.cache().is_redis_enabled()))
        .await?;
    Ok(())
}

fn pong_message(persistent: bool, cached: bool) -> String {
    let store = if persistent { "PostgreSQL" } else { "in-memory (progress resets on restart)" };
    let cache = if cached { "Redis" } else { "off" };
    format!("Pong! Store: {store}. Profile cache: {cache}.")
}

#[cfg(test)]
mod tests {
    use super::pong_message;

    #[test]
    fn reports_store_and_cache() {
        assert_eq!(
            pong_message(true, true),
            "Pong! Store: PostgreSQL. Profile cache: Redis."
        );
        assert_eq!(
            pong_message(false, false),
            "Pong! Store: in-memory (progress resets on restart). Profile cache: off."
        );
    }
}
