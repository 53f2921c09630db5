use poise::serenity_prelude as serenity;

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0xD4_A0_17;

/// Build a standard embed with consistent styling and an optional footer.
pub fn build_embed(
    title: &str,
    description: impl Into<String>,
    footer_note: Option<&str>,
) -> serenity::CreateEmbed {
    let builder = serenity::CreateEmbed::new()
        .title(title.to_owned())
        .color(DEFAULT_EMBED_COLOR)
        .description(description);

    match footer_note {
        Some(note) if !note.is_empty() => {
            builder.footer(serenity::CreateEmbedFooter::new(note.to_owned()))
        }
        _ => builder,
    }
}
