use std::path::PathBuf;

use serde::Deserialize;

use crate::store::{JsonStore, StoreError};

pub const SECRETS_DOCUMENT: &str = "secrets";
pub const SETTINGS_DOCUMENT: &str = "config";

const DEFAULT_COMPLETION_MODEL: &str = "gpt-3.5-turbo-instruct";
const DEFAULT_SPEECH_LANGUAGE: &str = "en-US";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no Discord token: set `token` in the secrets document or DISCORD_TOKEN")]
    MissingToken,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Process-level settings read from the environment.
pub struct Config {
    pub data_dir: PathBuf,
    pub log_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("RAID_HERALD_DATA_DIR")
                .unwrap_or_else(|_| "data".to_string())
                .into(),
            log_path: std::env::var("RAID_HERALD_LOG")
                .unwrap_or_else(|_| "log.txt".to_string())
                .into(),
        }
    }
}

/// Credentials document. Everything except the Discord token is optional;
/// commands that need a missing credential say so instead of failing startup.
#[derive(Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct Secrets {
    pub token: Option<String>,
    pub warcraft_logs_client_id: Option<String>,
    pub warcraft_logs_client_secret: Option<String>,
    pub speech_key: Option<String>,
    pub speech_region: Option<String>,
    pub completion_api_key: Option<String>,
}

impl Secrets {
    pub async fn load(store: &JsonStore) -> Result<Self, ConfigError> {
        Ok(store.load(SECRETS_DOCUMENT).await?)
    }

    /// `DISCORD_TOKEN` wins over the document so deployments can inject it.
    pub fn discord_token(&self) -> Result<String, ConfigError> {
        std::env::var("DISCORD_TOKEN")
            .ok()
            .or_else(|| self.token.clone())
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken)
    }

    pub fn warcraft_logs(&self) -> Option<crate::warcraftlogs::client::Credentials> {
        match (&self.warcraft_logs_client_id, &self.warcraft_logs_client_secret) {
            (Some(id), Some(secret)) => Some(crate::warcraftlogs::client::Credentials {
                client_id: id.clone(),
                client_secret: secret.clone(),
            }),
            _ => None,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub analytics_guild_id: Option<u64>,
    pub completion_model: String,
    pub speech_language: String,
    pub welcome_channel_id: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            analytics_guild_id: None,
            completion_model: DEFAULT_COMPLETION_MODEL.to_string(),
            speech_language: DEFAULT_SPEECH_LANGUAGE.to_string(),
            welcome_channel_id: None,
        }
    }
}

impl Settings {
    pub async fn load(store: &JsonStore) -> Result<Self, ConfigError> {
        Ok(store.load(SETTINGS_DOCUMENT).await?)
    }
}
