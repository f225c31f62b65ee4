use std::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use reqwest::Error as ReqwestError;
use serde_json::Error as SerdeJsonError;

/// Failure of a single outbound read (balance, fee rate, fiat price).
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("No reachable data source: {0}")]
    TransportUnavailable(String),

    #[error("Malformed response from {0}: {1}")]
    MalformedResponse(String, String),

    #[error("{method} returned RPC error {code}: {message}")]
    Rpc { method: String, code: i64, message: String },
}

impl SourceError {
    pub fn malformed(source: &str, detail: impl Into<String>) -> Self {
        SourceError::MalformedResponse(source.to_string(), detail.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SourceError::TransportUnavailable(_) => ErrorKind::TransportUnavailable,
            SourceError::MalformedResponse(_, _) => ErrorKind::MalformedResponse,
            // The endpoint was reachable but refused to answer usefully
            SourceError::Rpc { .. } => ErrorKind::TransportUnavailable,
        }
    }
}

impl From<ReqwestError> for SourceError {
    fn from(err: ReqwestError) -> Self {
        if err.is_decode() {
            SourceError::MalformedResponse("http".to_string(), err.to_string())
        } else {
            SourceError::TransportUnavailable(err.to_string())
        }
    }
}

impl From<SerdeJsonError> for SourceError {
    fn from(err: SerdeJsonError) -> Self {
        SourceError::MalformedResponse("json".to_string(), err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    TransportUnavailable,
    MalformedResponse,
    UserRejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalletError {
    ProviderMissing,
    UserRejected,
    InvalidAddress(String),
    Provider(String),
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletError::ProviderMissing => write!(f, "No wallet provider is available."),
            WalletError::UserRejected => write!(f, "The account request was rejected."),
            WalletError::InvalidAddress(addr) => write!(f, "Invalid account address: {}", addr),
            WalletError::Provider(msg) => write!(f, "Wallet provider error: {}", msg),
        }
    }
}

impl WalletError {
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            WalletError::UserRejected => Some(ErrorKind::UserRejected),
            WalletError::Provider(_) => Some(ErrorKind::TransportUnavailable),
            _ => None,
        }
    }
}

impl std::error::Error for WalletError {}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("{0} must not be empty")]
    Empty(String),
}
