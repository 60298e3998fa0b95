/// Error types for the content-generation client
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Content service returned {status}: {detail}")]
    Service { status: u16, detail: String },

    #[error("Content service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Content service returned an unusable payload: {0}")]
    InvalidResponse(String),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ContentError>;
