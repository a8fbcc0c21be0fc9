//! Common types used across the application

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded floor price for a collection.
///
/// Serialized as `{"slug": .., "floor": .., "date": ..}` with an RFC 3339 date,
/// which is the on-disk history format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub slug: String,
    pub floor: f64,
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
}

impl Observation {
    pub fn new(slug: impl Into<String>, floor: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            slug: slug.into(),
            floor,
            timestamp,
        }
    }
}

/// A floor that differs from history and must be recorded this cycle
#[derive(Debug, Clone, PartialEq)]
pub struct FloorUpdate {
    pub slug: String,
    pub floor: f64,
}

impl FloorUpdate {
    pub fn new(slug: impl Into<String>, floor: f64) -> Self {
        Self {
            slug: slug.into(),
            floor,
        }
    }

    pub fn into_observation(self, timestamp: DateTime<Utc>) -> Observation {
        Observation::new(self.slug, self.floor, timestamp)
    }
}
