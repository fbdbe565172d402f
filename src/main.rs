use poise::serenity_prelude as serenity;
use raid_herald::config::{Config, Secrets, Settings};
use raid_herald::store::{JsonStore, VoteStore};
use raid_herald::{commands, events, logging, Data, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();
    logging::init(&config.log_path)?;

    let documents = JsonStore::new(&config.data_dir);
    let secrets = Secrets::load(&documents).await?;
    let settings = Settings::load(&documents).await?;
    let token = secrets.discord_token()?;
    tracing::info!("Loaded configuration from {}", documents.dir().display());

    let intents =
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::GUILD_MEMBERS;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(commands::on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(events::handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                tracing::info!("Logged in as {}", ready.user.name);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                tracing::info!("Registered {} commands", framework.options().commands.len());

                Ok(Data {
                    http_client: reqwest::Client::new(),
                    votes: VoteStore::new(documents),
                    secrets,
                    settings,
                })
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await?;

    if let Err(e) = client.start().await {
        tracing::error!("Client error: {e}");
        return Err(e.into());
    }

    Ok(())
}
