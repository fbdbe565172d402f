use poise::CreateReply;

use crate::utils::components;
use crate::vote::{self, embed, VoteError};
use crate::{Context, Error};

/// Reply text for errors a user can cause. `None` means an internal failure.
pub fn user_message(err: &VoteError) -> Option<&'static str> {
    match err {
        VoteError::DuplicateTitle(_) => {
            Some("A vote on this issue already exists. Use /endvote to end the previous vote")
        }
        VoteError::NotFound(_) => Some("The vote has already ended"),
        VoteError::AlreadyVoted => Some("Anonymous votes can not be changed"),
        VoteError::UnknownOption(_) => Some("That option no longer exists"),
        VoteError::NoOptions => Some("Write at least one option, separated by commas"),
        VoteError::TooLong { field: "title", .. } => {
            Some("Vote titles can be at most 256 characters long")
        }
        VoteError::TooLong { .. } => Some("Vote descriptions can be at most 4096 characters long"),
        VoteError::Store(_) => None,
    }
}

async fn reply_ephemeral(ctx: Context<'_>, message: &str) -> Result<(), Error> {
    ctx.send(CreateReply::default().content(message).ephemeral(true))
        .await?;
    Ok(())
}

async fn vote_impl(
    ctx: Context<'_>,
    title: String,
    anonymity: bool,
    options: String,
    description: Option<String>,
) -> Result<(), Error> {
    let description = description.filter(|d| !d.trim().is_empty());

    match vote::start(&ctx.data().votes, &title, description, anonymity, &options).await {
        Ok(vote) => {
            ctx.send(
                CreateReply::default()
                    .embed(embed::tally(&vote))
                    .components(components::vote_buttons(&vote)),
            )
            .await?;
        }
        Err(e) => match user_message(&e) {
            Some(message) => reply_ephemeral(ctx, message).await?,
            None => return Err(e.into()),
        },
    }

    Ok(())
}

async fn endvote_impl(ctx: Context<'_>, title: String) -> Result<(), Error> {
    match vote::end(&ctx.data().votes, &title).await {
        Ok(vote) => {
            ctx.send(CreateReply::default().embed(embed::closed(&vote)))
                .await?;
        }
        Err(VoteError::NotFound(_)) => {
            reply_ephemeral(ctx, "There is no open vote with that title").await?;
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

/// Start a vote
#[poise::command(slash_command, guild_only)]
pub async fn vote(
    ctx: Context<'_>,
    #[description = "The issue to vote about"] title: String,
    #[description = "True: Show only score. False: Show who voted for each option. Anonymous votes can not be changed."]
    anonymity: bool,
    #[description = "Write all options with comma-separation (max 5)"] options: String,
    #[description = "A short description (optional)"] description: Option<String>,
) -> Result<(), Error> {
    vote_impl(ctx, title, anonymity, options, description).await
}

/// End a vote and post the final result
#[poise::command(slash_command, guild_only)]
pub async fn endvote(
    ctx: Context<'_>,
    #[description = "The title of the vote to end"] title: String,
) -> Result<(), Error> {
    endvote_impl(ctx, title).await
}
