use ascent_core::{Context, Error};

use crate::CommandMeta;
use crate::progression::embeds::check_in_message;

pub const META: CommandMeta = CommandMeta {
    name: "checkin",
    desc: "Claim your daily exp and coin bonus.",
    category: "progression",
    usage: "!checkin",
};

#[poise::command(
    prefix_command,
    slash_command,
    category = "Progression",
    aliases("daily")
)]
pub async fn checkin(ctx: Context<'_>) -> Result<(), Error> {
    let outcome = ctx
        .data()
        .progression
        .check_in(ctx.author().id.get())
        .await?;

    ctx.say(check_in_message(&outcome)).await?;
    Ok(())
}
