pub mod completion;
pub mod speech;

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {0}")]
    Api(String),
    #[error("could not read audio: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0} is not configured")]
    MissingCredentials(&'static str),
}
