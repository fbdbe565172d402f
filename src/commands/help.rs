use poise::CreateReply;
use serenity::builder::CreateEmbed;

use crate::{Context, Error};

async fn help_impl(ctx: Context<'_>) -> Result<(), Error> {
    let raid_cmds = "\
`/log [id]` — raid summary for a Warcraft Logs report (latest if no id)";

    let vote_cmds = "\
`/vote` — start a vote with up to 5 comma-separated options
`/endvote` — end a vote and post the result";

    let other_cmds = "\
`/ask` — ask the text-completion model
`/transcribe` — transcribe a WAV recording";

    let embed = CreateEmbed::new()
        .title("Help")
        .field("Raids", raid_cmds, false)
        .field("Votes", vote_cmds, false)
        .field("Other", other_cmds, false)
        .color(0x5865F2);

    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Lists the bot's commands
#[poise::command(slash_command, guild_only)]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    help_impl(ctx).await
}
