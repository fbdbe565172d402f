mod ask;
mod help;
mod log;
mod transcribe;
pub mod vote;

use poise::CreateReply;

use crate::utils::embed;
use crate::{Data, Error};

pub fn all() -> Vec<poise::Command<Data, Error>> {
    vec![
        help::help(),
        log::log(),
        vote::vote(),
        vote::endvote(),
        ask::ask(),
        transcribe::transcribe(),
    ]
}

/// Last stop for errors a command returned instead of handling itself.
/// The user always gets an answer, which also resolves a deferred reply.
pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            tracing::error!("Failed to start bot: {error}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!("Error in command `{}`: {error}", ctx.command().name);
            let reply = CreateReply::default()
                .embed(embed::error("There was an error while executing this command."))
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                tracing::error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                tracing::error!("Error while handling error: {e}");
            }
        }
    }
}
