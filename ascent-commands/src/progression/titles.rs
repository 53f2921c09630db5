use ascent_core::{Context, Error};
use ascent_progression::rules::RANK_UP_LEVEL;
use ascent_progression::titles::all_titles;
use ascent_utils::embed::build_embed;

use crate::CommandMeta;

pub const META: CommandMeta = CommandMeta {
    name: "titles",
    desc: "List every rank and the title it unlocks.",
    category: "progression",
    usage: "!titles",
};

#[poise::command(prefix_command, slash_command, category = "Progression")]
pub async fn titles(ctx: Context<'_>) -> Result<(), Error> {
    let footer = format!(
        "Each rank takes {} levels. Ranks past the list are Unknown.",
        RANK_UP_LEVEL
    );
    let embed = build_embed("Rank Titles", titles_description(), Some(&footer));
    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

fn titles_description() -> String {
    all_titles()
        .map(|(rank, title)| format!("`{rank:>2}` {title}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::titles_description;

    #[test]
    fn lists_all_ranks_in_order() {
        let text = titles_description();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 18);
        assert_eq!(lines[0], "` 1` Newbie");
        assert_eq!(lines[17], "`18` God");
    }
}
