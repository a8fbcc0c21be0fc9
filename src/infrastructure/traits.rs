use async_trait::async_trait;
use serde_json::Value;
use crate::domain::History;
use crate::shared::errors::{DeliveryError, FetchError, HistoryError};

/// Source of marketplace stats documents
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// GET `url` and parse the body as JSON
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError>;
}

/// Persistent floor history
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Read the whole history
    async fn load(&self) -> Result<History, HistoryError>;

    /// Replace the stored history with `history`
    async fn save(&self, history: &History) -> Result<(), HistoryError>;
}

/// Sink for the aggregated alert message
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), DeliveryError>;
}
