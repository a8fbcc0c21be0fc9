//! Per-store polling: fetch each collection in turn and decide what to record and alert

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::StoreConfig;
use crate::domain::alert::{format_alert, percent_change, within_band};
use crate::domain::{extract_floor, History};
use crate::infrastructure::StatsSource;
use crate::shared::errors::FloorError;
use crate::shared::types::FloorUpdate;
use crate::shared::utils::fill_template;

/// What one store produced during a cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreReport {
    pub alerts: Vec<String>,
    /// Changed floors in slug order
    pub floors: Vec<FloorUpdate>,
}

/// Outcome for a single freshly fetched floor
#[derive(Debug, Clone, PartialEq)]
pub enum FloorDecision {
    /// Same as the last recorded floor, nothing to do
    Unchanged,
    /// Record only, the floor is outside the alert band
    Record,
    /// Record and alert with this line
    Alert(String),
}

/// Decide what to do with `floor` given the last known `previous` floor (`0.0` if none)
pub fn decide(store: &StoreConfig, slug: &str, floor: f64, previous: f64) -> FloorDecision {
    if previous > 0.0 && floor == previous {
        return FloorDecision::Unchanged;
    }
    if !within_band(floor, store.min, store.max) {
        return FloorDecision::Record;
    }

    let store_url = fill_template(&store.store_url_template, slug);
    let change = percent_change(previous, floor);
    FloorDecision::Alert(format_alert(slug, &store_url, floor, change))
}

/// Polls the collections of one store, one request at a time
pub struct StorePoller {
    source: Arc<dyn StatsSource>,
}

impl StorePoller {
    pub fn new(source: Arc<dyn StatsSource>) -> Self {
        Self { source }
    }

    /// Fetch the stats for `slug` and extract its floor
    pub async fn fetch_floor(&self, store: &StoreConfig, slug: &str) -> Result<f64, FloorError> {
        let url = fill_template(&store.stats_url_template, slug);
        let document = self.source.fetch_json(&url).await?;
        extract_floor(&document, &store.json_path, store.multiplier)
            .map_err(|source| FloorError::Extraction { url, source })
    }

    /// Walk every slug of `store`. Failures skip the slug and never stop the store.
    pub async fn poll(&self, store: &StoreConfig, history: &History) -> StoreReport {
        let mut report = StoreReport::default();

        for slug in &store.slugs {
            let floor = match self.fetch_floor(store, slug).await {
                Ok(floor) => floor,
                Err(e) => {
                    warn!("❌ {}", e);
                    continue;
                }
            };

            let previous = history.latest_floor(slug);
            let alert = match decide(store, slug, floor, previous) {
                FloorDecision::Unchanged => continue,
                FloorDecision::Record => None,
                FloorDecision::Alert(line) => Some(line),
            };

            info!("{} {}", slug, floor);
            report.floors.push(FloorUpdate::new(slug.as_str(), floor));
            report.alerts.extend(alert);
        }

        report
    }
}
