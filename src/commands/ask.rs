use poise::CreateReply;

use crate::ai::{completion, AiError};
use crate::utils::{components::truncate_str, embed};
use crate::{Context, Error};

/// Discord message content limit.
const MAX_MESSAGE_CHARS: usize = 2000;

async fn ask_impl(ctx: Context<'_>, prompt: String) -> Result<(), Error> {
    ctx.defer().await?;

    let data = ctx.data();
    let result = match data.secrets.completion_api_key.as_deref() {
        Some(key) => {
            completion::complete(&data.http_client, key, &data.settings.completion_model, &prompt)
                .await
        }
        None => Err(AiError::MissingCredentials("The completion API key")),
    };

    let reply = match result {
        Ok(text) => CreateReply::default().content(truncate_str(&text, MAX_MESSAGE_CHARS)),
        Err(e) => {
            tracing::error!("Completion failed: {e}");
            CreateReply::default().embed(embed::error("Could not get an answer right now."))
        }
    };

    ctx.send(reply).await?;
    Ok(())
}

/// Ask the text-completion model something
#[poise::command(slash_command, guild_only)]
pub async fn ask(
    ctx: Context<'_>,
    #[description = "What to ask"] prompt: String,
) -> Result<(), Error> {
    ask_impl(ctx, prompt).await
}
