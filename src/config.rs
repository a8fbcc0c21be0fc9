use serde::Deserialize;
use std::collections::HashSet;
use std::{fs, path::Path, time::Duration};

use crate::shared::errors::ConfigError;
use crate::shared::utils::{fill_template, SLUG_PLACEHOLDER};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelegramConfig {
    pub bot_id: String,
    pub recipient_id: String,
}

/// One marketplace integration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(rename = "collection_slugs")]
    pub slugs: Vec<String>,
    /// Collection page, `%s` is replaced by the slug
    #[serde(rename = "store_url")]
    pub store_url_template: String,
    /// Stats endpoint, `%s` is replaced by the slug
    #[serde(rename = "stats_url")]
    pub stats_url_template: String,
    pub max: f64,
    pub min: f64,
    /// Keys leading to the floor value in the stats response
    #[serde(rename = "json_map")]
    pub json_path: Vec<String>,
    pub multiplier: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    pub stores: Vec<StoreConfig>,
    #[serde(rename = "history_json_path")]
    pub history_path: String,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_poll_interval_ms() -> u64 {
    800
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load from a JSON file, or TOML when the extension is `.toml`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;

        let is_toml = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::from_toml_str(&s).map_err(|e| e.with_path(&display))
        } else {
            Self::from_json_str(&s).map_err(|e| e.with_path(&display))
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|e| ConfigError::Parse {
            path: String::new(),
            message: e.to_string(),
        })
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse {
            path: String::new(),
            message: e.to_string(),
        })
    }

    /// Reject configurations the watcher cannot run with.
    /// Telegram ids are only checked when alerts are actually delivered.
    pub fn validate(&self, require_telegram: bool) -> Result<(), ConfigError> {
        if self.stores.is_empty() {
            return Err(ConfigError::Invalid("no stores configured".to_string()));
        }
        if require_telegram
            && (self.telegram.bot_id.trim().is_empty() || self.telegram.recipient_id.trim().is_empty())
        {
            return Err(ConfigError::Invalid(
                "telegram.bot_id and telegram.recipient_id are required".to_string(),
            ));
        }
        if self.history_path.trim().is_empty() {
            return Err(ConfigError::Invalid("history_json_path is empty".to_string()));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid("poll_interval_ms must be positive".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("request_timeout_secs must be positive".to_string()));
        }
        for (i, store) in self.stores.iter().enumerate() {
            store
                .validate()
                .map_err(|reason| ConfigError::Invalid(format!("store {}: {}", i + 1, reason)))?;
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl StoreConfig {
    /// Short name for logs: the stats endpoint host
    pub fn label(&self) -> String {
        let sample = fill_template(&self.stats_url_template, "_");
        reqwest::Url::parse(&sample)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .unwrap_or_else(|| self.stats_url_template.clone())
    }

    fn validate(&self) -> Result<(), String> {
        if self.slugs.is_empty() {
            return Err("collection_slugs is empty".to_string());
        }
        let mut seen = HashSet::new();
        for slug in &self.slugs {
            if slug.trim().is_empty() {
                return Err("empty collection slug".to_string());
            }
            if !seen.insert(slug.as_str()) {
                return Err(format!("duplicate collection slug {:?}", slug));
            }
        }
        if !self.stats_url_template.contains(SLUG_PLACEHOLDER) {
            return Err(format!("stats_url {:?} has no %s placeholder", self.stats_url_template));
        }
        if self.json_path.is_empty() {
            return Err("json_map is empty".to_string());
        }
        if !self.multiplier.is_finite() || self.multiplier <= 0.0 {
            return Err(format!("multiplier {} must be a positive number", self.multiplier));
        }
        if self.min >= self.max {
            return Err(format!("min {} must be below max {}", self.min, self.max));
        }
        Ok(())
    }
}

impl ConfigError {
    fn with_path(self, path: &str) -> Self {
        match self {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.to_string(),
                message,
            },
            other => other,
        }
    }
}
