use serenity::builder::CreateEmbed;

use super::Vote;

const VOTE_COLOR: u32 = 0x0099FF;

/// Title, optional description, and one inline field per option in creation order.
pub fn tally(vote: &Vote) -> CreateEmbed {
    let mut embed = CreateEmbed::new().title(&vote.title).color(VOTE_COLOR);

    if let Some(ref description) = vote.description {
        embed = embed.description(description);
    }

    let fields = vote
        .options
        .iter()
        .map(|option| (option.label.clone(), option.tally.render(), true));
    embed.fields(fields)
}

/// Final results posted by `/endvote`.
pub fn closed(vote: &Vote) -> CreateEmbed {
    tally(vote).footer(serenity::builder::CreateEmbedFooter::new("Vote ended"))
}
