pub mod ai;
pub mod commands;
pub mod config;
pub mod events;
pub mod logging;
pub mod store;
pub mod utils;
pub mod vote;
pub mod warcraftlogs;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

pub struct Data {
    pub http_client: reqwest::Client,
    pub votes: store::VoteStore,
    pub secrets: config::Secrets,
    pub settings: config::Settings,
}
