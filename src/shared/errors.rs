//! Error handling for the application

use thiserror::Error;

/// Configuration errors. These are the only fatal ones.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Marketplace request errors
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url}: unexpected status {status}")]
    Status { url: String, status: u16 },

    #[error("{url}: invalid json: {message}")]
    Decode { url: String, message: String },
}

/// Errors raised while walking a stats document
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    #[error("invalid json traverse at key {key:?}. Ended with {found}")]
    UnexpectedValue { key: String, found: String },

    #[error("floor not found")]
    FloorNotFound,
}

/// Per-slug failure, carrying the URL that produced it
#[derive(Error, Debug)]
pub enum FloorError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("{url}: {source}")]
    Extraction {
        url: String,
        #[source]
        source: ExtractionError,
    },
}

/// Floor history persistence errors
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Failed to read history {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to write history {path}: {message}")]
    Write { path: String, message: String },
}

/// Notification delivery errors
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Telegram request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Telegram API rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}
