use ascent_core::{Context, Error};
use ascent_database::impls::users::register_user;
use ascent_utils::time::now_unix_secs;

use crate::CommandMeta;

pub const META: CommandMeta = CommandMeta {
    name: "register",
    desc: "Create your progression profile.",
    category: "progression",
    usage: "!register",
};

#[poise::command(prefix_command, slash_command, category = "Progression")]
pub async fn register(ctx: Context<'_>) -> Result<(), Error> {
    let author = ctx.author();
    let created = register_user(
        &ctx.data().db,
        author.id.get(),
        &author.name,
        now_unix_secs(),
    )
    .await?;

    if created {
        tracing::info!(user_id = author.id.get(), "user registered");
        ctx.say("Welcome aboard, **Newbie**! Use `!profile` to see your progress and `!checkin` every day for a bonus.")
            .await?;
    } else {
        ctx.say("You already have a profile. Use `!profile` to view it.")
            .await?;
    }

    Ok(())
}
