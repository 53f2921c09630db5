use poise::serenity_prelude as serenity;
use tracing::warn;

use crate::CommandMeta;
use crate::progression::embeds::{not_registered_message, profile_embed, tick_announcement};
use ascent_core::{Context, Error};
use ascent_database::impls::users::get_profile;
use ascent_utils::time::now_unix_secs;

pub const META: CommandMeta = CommandMeta {
    name: "profile",
    desc: "Show your progression profile, or look up another user.",
    category: "progression",
    usage: "!profile [user]",
};

#[poise::command(prefix_command, slash_command, category = "Progression")]
pub async fn profile(
    ctx: Context<'_>,
    #[description = "User to look up"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let author_id = ctx.author().id;
    let target_id = user.as_ref().map_or(author_id, |user| user.id);
    let viewing_self = target_id == author_id;
    let data = ctx.data();

    // Only your own profile view earns the passive tick.
    let mut announcement = None;
    if viewing_self {
        match data.progression.apply_passive_tick(author_id.get()).await {
            Ok(outcome) => announcement = tick_announcement(&outcome),
            Err(err) => warn!(
                ?err,
                user_id = author_id.get(),
                "passive tick failed; showing last known profile"
            ),
        }
    }

    let Some(profile) = get_profile(&data.db, target_id.get()).await? else {
        if viewing_self {
            ctx.say(not_registered_message()).await?;
        } else {
            ctx.say("No profile found for that user.").await?;
        }
        return Ok(());
    };

    let embed = profile_embed(
        &profile,
        now_unix_secs(),
        data.progression.rules().check_in_interval(),
    );
    let mut reply = poise::CreateReply::default().embed(embed);
    if let Some(announcement) = announcement {
        reply = reply.content(announcement);
    }

    ctx.send(reply).await?;
    Ok(())
}
