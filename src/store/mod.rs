pub mod disk;

use crate::core::{Currency, RateInfo, RateTable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use disk::RateCache;

/// Persisted rates for one base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    pub base: Currency,
    pub rates: RateTable,
    #[serde(rename = "timestamp")]
    pub fetched_at: DateTime<Utc>,
    pub source: String,
    pub expires_at: DateTime<Utc>,
}

impl RateSnapshot {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn info(&self) -> RateInfo {
        RateInfo {
            source: self.source.clone(),
            fetched_at: self.fetched_at,
            expires_at: self.expires_at,
            stale: false,
        }
    }

    /// Provenance for a snapshot served past its expiry.
    pub fn stale_info(&self) -> RateInfo {
        RateInfo {
            source: format!("{} (expired)", self.source),
            stale: true,
            ..self.info()
        }
    }
}

/// Result of reading the cache, keeping "expired" apart from "missing".
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    Missing,
    Expired(RateSnapshot),
    Fresh(RateSnapshot),
}

impl CacheLookup {
    pub fn fresh(self) -> Option<RateSnapshot> {
        match self {
            CacheLookup::Fresh(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}
