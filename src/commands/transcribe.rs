use poise::serenity_prelude as serenity;
use poise::CreateReply;

use crate::ai::speech::{self, SpeechConfig};
use crate::ai::AiError;
use crate::utils::embed;
use crate::{Context, Error};

fn is_wav(attachment: &serenity::Attachment) -> bool {
    attachment
        .content_type
        .as_ref()
        .is_some_and(|ct| ct.contains("wav"))
        || attachment.filename.to_lowercase().ends_with(".wav")
}

async fn transcribe_impl(ctx: Context<'_>, audio: serenity::Attachment) -> Result<(), Error> {
    ctx.defer().await?;

    if !is_wav(&audio) {
        ctx.send(CreateReply::default().embed(embed::error("Attach a WAV recording.")))
            .await?;
        return Ok(());
    }

    let data = ctx.data();
    let result = match (&data.secrets.speech_key, &data.secrets.speech_region) {
        (Some(key), Some(region)) => {
            let config = SpeechConfig {
                key: key.as_str(),
                region: region.as_str(),
                language: data.settings.speech_language.as_str(),
            };
            match audio.download().await {
                Ok(wav) => speech::transcribe(&data.http_client, &config, wav).await,
                Err(e) => Err(AiError::Api(format!("attachment download failed: {e}"))),
            }
        }
        _ => Err(AiError::MissingCredentials("The speech service")),
    };

    let reply = match result {
        Ok(Some(text)) => CreateReply::default().embed(embed::notice("Transcript", &text)),
        Ok(None) => CreateReply::default().embed(embed::notice(
            "Transcript",
            "Speech could not be recognized.",
        )),
        Err(e) => {
            tracing::error!("Transcription failed: {e}");
            CreateReply::default().embed(embed::error("Could not transcribe that recording."))
        }
    };

    ctx.send(reply).await?;
    Ok(())
}

/// Transcribe a WAV recording
#[poise::command(slash_command, guild_only)]
pub async fn transcribe(
    ctx: Context<'_>,
    #[description = "WAV recording to transcribe"] audio: serenity::Attachment,
) -> Result<(), Error> {
    transcribe_impl(ctx, audio).await
}
