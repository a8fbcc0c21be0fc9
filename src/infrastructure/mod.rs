//! Infrastructure layer - HTTP, file and Telegram adapters

pub mod history_file;
pub mod http_client;
pub mod log_notifier;
pub mod telegram;
pub mod traits;

pub use history_file::JsonFileHistoryStore;
pub use http_client::HttpStatsSource;
pub use log_notifier::LogNotifier;
pub use telegram::TelegramNotifier;
pub use traits::{HistoryStore, Notifier, StatsSource};
