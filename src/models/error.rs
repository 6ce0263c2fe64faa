use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjectorError {
    #[error("total supply must be positive, got {0}")]
    InvalidSupply(u64),

    #[error("unknown cohort: {0}")]
    CohortNotFound(String),

    #[error("wallet report API error: {message}")]
    WalletApi { message: String },

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProjectorError>;
