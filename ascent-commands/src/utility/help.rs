use crate::{COMMANDS, CommandMeta};
use ascent_core::{Context, Error};
use ascent_utils::embed::build_embed;

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "!help [category]",
};

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Command category"] category: Option<String>,
) -> Result<(), Error> {
    let category = category.map(|raw| raw.trim().to_ascii_lowercase());
    let commands = sorted_commands(category.as_deref());

    if commands.is_empty() {
        ctx.say(unknown_category_message(category.as_deref().unwrap_or_default()))
            .await?;
        return Ok(());
    }

    let embed = build_embed(
        "Available Commands",
        help_description(&commands),
        Some("Check in daily and visit your profile to keep climbing."),
    );
    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

fn sorted_commands(category: Option<&str>) -> Vec<&'static CommandMeta> {
    let mut filtered: Vec<&'static CommandMeta> = COMMANDS
        .iter()
        .filter(|cmd| category.is_none_or(|wanted| cmd.category == wanted))
        .collect();

    filtered.sort_unstable_by(|left, right| {
        left.category
            .cmp(right.category)
            .then_with(|| left.name.cmp(right.name))
    });

    filtered
}

/// One bold heading per category, then a line per command.
fn help_description(commands: &[&CommandMeta]) -> String {
    commands
        .chunk_by(|left, right| left.category == right.category)
        .map(|group| {
            let heading = format!("**{}**", capitalize(group[0].category));
            let lines = group
                .iter()
                .map(|cmd| format!("`{}`: {}", cmd.name, cmd.desc))
                .collect::<Vec<_>>()
                .join("\n");
            format!("{heading}\n{lines}")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn unknown_category_message(wanted: &str) -> String {
    let mut categories: Vec<&str> = COMMANDS.iter().map(|cmd| cmd.category).collect();
    categories.sort_unstable();
    categories.dedup();

    let valid = categories
        .into_iter()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Unknown category: {}\nValid categories: {}",
        capitalize(wanted),
        valid
    )
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}
