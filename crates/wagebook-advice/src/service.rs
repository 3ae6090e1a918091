//! The external text-generation collaborator.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from requesting advice.
#[derive(Debug, Error)]
pub enum AdviceError {
    #[error("an advice request is already in flight")]
    Busy,

    #[error("nothing to advise on: total pay is zero")]
    NothingToAdvise,

    #[error("missing API key: set the {0} environment variable")]
    MissingApiKey(String),

    #[error("invalid service configuration: {0}")]
    Config(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Turns a prompt into a short piece of text.
#[async_trait]
pub trait AdviceService: Send + Sync {
    /// Generate a reply for `prompt`. An empty reply is a valid success.
    ///
    /// # Errors
    ///
    /// Any transport or service failure.
    async fn generate(&self, prompt: &str) -> Result<String, AdviceError>;
}
