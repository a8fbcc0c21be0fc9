//! Floorwatch - NFT collection floor price watcher
//!
//! Polls marketplace stats endpoints, compares floors against a JSON history file and
//! sends one Telegram message per cycle for collections whose floor moved inside the
//! configured band. Marketplaces are described entirely by configuration: URL templates,
//! the key path to the floor in the response, and a unit multiplier.

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export main types for convenience
pub use application::{CycleSummary, StorePoller, WatchCycle};
pub use config::{Config, StoreConfig, TelegramConfig};
pub use domain::{extract_floor, History};
