use poise::serenity_prelude::{self as serenity, Mentionable};

use crate::{Data, Error};

pub async fn handle(
    ctx: &serenity::Context,
    member: &serenity::Member,
    data: &Data,
) -> Result<(), Error> {
    tracing::info!("{} joined guild {}", member.user.name, member.guild_id);

    if let Some(channel_id) = data.settings.welcome_channel_id {
        serenity::ChannelId::new(channel_id)
            .say(&ctx.http, format!("Welcome, {}!", member.mention()))
            .await?;
    }

    Ok(())
}
