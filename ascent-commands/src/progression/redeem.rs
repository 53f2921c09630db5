use ascent_core::{Context, Error};

use crate::CommandMeta;
use crate::progression::embeds::redeem_message;

pub const META: CommandMeta = CommandMeta {
    name: "redeem",
    desc: "Redeem a reward code.",
    category: "progression",
    usage: "!redeem <code>",
};

#[poise::command(prefix_command, slash_command, category = "Progression", ephemeral)]
pub async fn redeem(
    ctx: Context<'_>,
    #[description = "Reward code"] code: Option<String>,
) -> Result<(), Error> {
    let Some(code) = code.filter(|code| !code.trim().is_empty()) else {
        ctx.say(format!("Usage: `{}`", META.usage)).await?;
        return Ok(());
    };

    let outcome = ctx
        .data()
        .progression
        .redeem(ctx.author().id.get(), &code)
        .await?;

    ctx.say(redeem_message(&outcome)).await?;
    Ok(())
}
