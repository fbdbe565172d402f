use poise::serenity_prelude as serenity;
use serenity::builder::{CreateEmbed, CreateInteractionResponse, CreateInteractionResponseMessage};
use serenity::model::application::ComponentInteraction;

use crate::commands::vote::user_message;
use crate::utils::components;
use crate::vote::{self, embed};
use crate::{Data, Error};

async fn respond_ephemeral(
    ctx: &serenity::Context,
    interaction: &ComponentInteraction,
    message: &str,
) -> Result<(), Error> {
    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(message)
            .ephemeral(true),
    );
    interaction.create_response(&ctx.http, response).await?;
    Ok(())
}

/// Replaces the tally embed; the buttons stay as they are.
async fn update_message(
    ctx: &serenity::Context,
    interaction: &ComponentInteraction,
    embed: CreateEmbed,
) -> Result<(), Error> {
    let response = CreateInteractionResponse::UpdateMessage(
        CreateInteractionResponseMessage::new().embed(embed),
    );
    interaction.create_response(&ctx.http, response).await?;
    Ok(())
}

/// Server nickname if set, otherwise the account name.
fn display_name(interaction: &ComponentInteraction) -> String {
    interaction
        .member
        .as_ref()
        .and_then(|m| m.nick.clone())
        .unwrap_or_else(|| interaction.user.name.clone())
}

/// Vote buttons carry the option index as their custom id; the vote is
/// identified by the title of the message's embed.
pub async fn handle(
    ctx: &serenity::Context,
    interaction: &ComponentInteraction,
    data: &Data,
) -> Result<(), Error> {
    let Some(index) = components::parse_vote_button(&interaction.data.custom_id) else {
        return Ok(());
    };

    let Some(title) = interaction
        .message
        .embeds
        .first()
        .and_then(|e| e.title.clone())
    else {
        respond_ephemeral(ctx, interaction, "The vote has already ended").await?;
        return Ok(());
    };

    let name = display_name(interaction);
    match vote::cast_ballot(&data.votes, &title, index, interaction.user.id.get(), &name).await {
        Ok((vote, _)) => update_message(ctx, interaction, embed::tally(&vote)).await?,
        Err(e) => {
            let message = user_message(&e).unwrap_or_else(|| {
                tracing::error!("Failed to register vote on `{title}`: {e}");
                "Something went wrong while registering your vote"
            });
            respond_ephemeral(ctx, interaction, message).await?;
        }
    }

    Ok(())
}
