pub mod component;
pub mod member;

use poise::serenity_prelude as serenity;

use crate::{Data, Error};

pub async fn handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::InteractionCreate {
            interaction: serenity::Interaction::Component(comp),
        } => {
            component::handle(ctx, comp, data).await?;
        }
        serenity::FullEvent::GuildMemberAddition { new_member } => {
            member::handle(ctx, new_member, data).await?;
        }
        _ => {}
    }
    Ok(())
}
