//! Floor history - append-only log of observations keyed by slug

use chrono::{DateTime, Utc};
use crate::shared::types::{FloorUpdate, Observation};

/// Chronologically ordered floor observations. Newest entries are at the end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    observations: Vec<Observation>,
}

impl History {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    /// Most recent floor recorded for `slug`, or `0.0` when the slug was never seen
    pub fn latest_floor(&self, slug: &str) -> f64 {
        self.observations
            .iter()
            .rev()
            .find(|obs| obs.slug == slug)
            .map_or(0.0, |obs| obs.floor)
    }

    /// Append this cycle's updates, all stamped with the same `timestamp`
    pub fn record<I>(&mut self, updates: I, timestamp: DateTime<Utc>)
    where
        I: IntoIterator<Item = FloorUpdate>,
    {
        self.observations
            .extend(updates.into_iter().map(|update| update.into_observation(timestamp)));
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

impl From<Vec<Observation>> for History {
    fn from(observations: Vec<Observation>) -> Self {
        Self::new(observations)
    }
}
