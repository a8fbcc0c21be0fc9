//! JSON file persistence for the floor history

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

use crate::domain::History;
use crate::shared::errors::HistoryError;
use crate::shared::types::Observation;
use super::traits::HistoryStore;

/// History stored as a JSON array of `{slug, floor, date}` objects.
/// The file is read whole and rewritten whole.
pub struct JsonFileHistoryStore {
    path: PathBuf,
}

impl JsonFileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn display(&self) -> String {
        self.path.display().to_string()
    }
}

#[async_trait]
impl HistoryStore for JsonFileHistoryStore {
    async fn load(&self) -> Result<History, HistoryError> {
        let content = tokio::fs::read(&self.path).await.map_err(|e| {
            let message = if e.kind() == ErrorKind::NotFound {
                "file does not exist yet".to_string()
            } else {
                e.to_string()
            };
            HistoryError::Read {
                path: self.display(),
                message,
            }
        })?;

        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(History::default());
        }

        let observations: Vec<Observation> =
            serde_json::from_slice(&content).map_err(|e| HistoryError::Read {
                path: self.display(),
                message: e.to_string(),
            })?;

        debug!("Loaded {} observations from {}", observations.len(), self.display());
        Ok(History::new(observations))
    }

    async fn save(&self, history: &History) -> Result<(), HistoryError> {
        let content = serde_json::to_vec(history.observations()).map_err(|e| HistoryError::Write {
            path: self.display(),
            message: e.to_string(),
        })?;

        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| HistoryError::Write {
                path: self.display(),
                message: e.to_string(),
            })
    }
}
