//! One watch cycle: poll every store concurrently, then notify and persist once

use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::config::StoreConfig;
use crate::domain::History;
use crate::infrastructure::{HistoryStore, Notifier};
use crate::shared::types::FloorUpdate;
use super::store_poller::{StorePoller, StoreReport};

/// What a cycle did, for logging and tests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleSummary {
    pub alerts: usize,
    pub floors_recorded: usize,
    pub notified: bool,
    pub persisted: bool,
}

pub struct WatchCycle {
    stores: Vec<Arc<StoreConfig>>,
    poller: Arc<StorePoller>,
    history_store: Arc<dyn HistoryStore>,
    notifier: Arc<dyn Notifier>,
}

impl WatchCycle {
    pub fn new(
        stores: Vec<StoreConfig>,
        poller: StorePoller,
        history_store: Arc<dyn HistoryStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            stores: stores.into_iter().map(Arc::new).collect(),
            poller: Arc::new(poller),
            history_store,
            notifier,
        }
    }

    pub async fn run_cycle(&self) -> CycleSummary {
        let history = match self.history_store.load().await {
            Ok(history) => history,
            Err(e) => {
                warn!("read error: {}", e);
                History::default()
            }
        };
        let history = Arc::new(history);

        let (alerts, floors) = self.poll_stores(&history).await;
        let mut summary = CycleSummary {
            alerts: alerts.len(),
            floors_recorded: floors.len(),
            ..CycleSummary::default()
        };

        if !alerts.is_empty() {
            match self.notifier.send(&alerts.join("\n")).await {
                Ok(()) => summary.notified = true,
                Err(e) => error!("❌ Failed to deliver alert: {}", e),
            }
        }

        if !floors.is_empty() {
            let mut history = Arc::try_unwrap(history).unwrap_or_else(|shared| (*shared).clone());
            history.record(floors, Utc::now());
            match self.history_store.save(&history).await {
                Ok(()) => summary.persisted = true,
                Err(e) => error!("❌ {}", e),
            }
        }

        debug!("Cycle finished: {:?}", summary);
        summary
    }

    /// One task per store, joined before anything is merged
    async fn poll_stores(&self, history: &Arc<History>) -> (Vec<String>, Vec<FloorUpdate>) {
        let handles = self.stores.iter().map(|store| {
            let store = Arc::clone(store);
            let poller = Arc::clone(&self.poller);
            let history = Arc::clone(history);
            tokio::spawn(async move { poller.poll(&store, &history).await })
        });
        let results = join_all(handles).await;

        let mut alerts = Vec::new();
        let mut floors = Vec::new();
        for (store, result) in self.stores.iter().zip(results) {
            match result {
                Ok(report) => merge_report(&mut alerts, &mut floors, report),
                Err(e) => error!("❌ Store {} worker failed: {}", store.label(), e),
            }
        }

        if !floors.is_empty() {
            info!("Recorded {} new floor(s), {} alert(s)", floors.len(), alerts.len());
        }
        (alerts, floors)
    }
}

/// Fold one store's report in. A slug watched by several stores keeps the last floor merged.
fn merge_report(alerts: &mut Vec<String>, floors: &mut Vec<FloorUpdate>, report: StoreReport) {
    alerts.extend(report.alerts);
    for update in report.floors {
        match floors.iter_mut().find(|existing| existing.slug == update.slug) {
            Some(existing) => existing.floor = update.floor,
            None => floors.push(update),
        }
    }
}
