use std::io;
use thiserror::Error;
use ethdash_shared::models::errors::{ConfigError, SourceError, WalletError};

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Data source error: {0}")]
    Source(#[from] SourceError),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Capture serialization failed: {0}")]
    Capture(#[from] serde_json::Error),

    #[error("Cannot init: {0}")]
    InitializationError(String),
}
