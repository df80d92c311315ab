//! File-backed rate cache: one pretty-printed JSON snapshot per base currency.
//!
//! There is no locking; concurrent runs overwrite each other and the last
//! writer wins.

use super::{CacheLookup, RateSnapshot};
use crate::core::config::MAX_TTL_HOURS;
use crate::core::{Currency, Error, RateTable, Result};
use chrono::{DateTime, Duration, Utc};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct RateCache {
    dir: PathBuf,
    ttl: Duration,
}

impl RateCache {
    /// `ttl` is capped at `MAX_TTL_HOURS`.
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            dir: dir.into(),
            ttl: ttl.min(Duration::hours(i64::from(MAX_TTL_HOURS))),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn path_for(&self, base: Currency) -> PathBuf {
        self.dir.join(format!("rates-{}.json", base.code()))
    }

    /// Returns the snapshot for `base` only if it has not expired.
    pub fn get(&self, base: Currency) -> Result<Option<RateSnapshot>> {
        self.lookup(base).map(CacheLookup::fresh)
    }

    pub fn lookup(&self, base: Currency) -> Result<CacheLookup> {
        self.lookup_at(base, Utc::now())
    }

    /// Reads the snapshot for `base`, judging expiry against `now`.
    ///
    /// A missing file is `Missing`; other I/O failures and malformed files are
    /// errors.
    pub fn lookup_at(&self, base: Currency, now: DateTime<Utc>) -> Result<CacheLookup> {
        let path = self.path_for(base);
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Cache MISS for {}", base);
                return Ok(CacheLookup::Missing);
            }
            Err(source) => return Err(Error::CacheIo { path, source }),
        };

        let snapshot: RateSnapshot =
            serde_json::from_slice(&data).map_err(|source| Error::CacheParse {
                path: path.clone(),
                source,
            })?;

        if snapshot.is_expired_at(now) {
            debug!("Cache entry expired for {} at {}", base, snapshot.expires_at);
            return Ok(CacheLookup::Expired(snapshot));
        }
        debug!("Cache HIT for {}", base);
        Ok(CacheLookup::Fresh(snapshot))
    }

    /// Builds the snapshot that `set` would persist at `now`.
    pub fn snapshot_at(
        &self,
        base: Currency,
        rates: RateTable,
        source: &str,
        now: DateTime<Utc>,
    ) -> RateSnapshot {
        RateSnapshot {
            base,
            rates,
            fetched_at: now,
            source: source.to_string(),
            expires_at: now
                .checked_add_signed(self.ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    pub fn set(&self, base: Currency, rates: RateTable, source: &str) -> Result<RateSnapshot> {
        let snapshot = self.snapshot_at(base, rates, source, Utc::now());
        self.store(&snapshot)?;
        Ok(snapshot)
    }

    /// Overwrites the file for `snapshot.base`, creating the directory if needed.
    pub fn store(&self, snapshot: &RateSnapshot) -> Result<()> {
        let path = self.path_for(snapshot.base);
        fs::create_dir_all(&self.dir).map_err(|source| Error::CacheIo {
            path: self.dir.clone(),
            source,
        })?;

        let data = serde_json::to_vec_pretty(snapshot).map_err(|source| Error::CacheParse {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, data).map_err(|source| Error::CacheIo {
            path: path.clone(),
            source,
        })?;
        debug!("Cache PUT for {} at {}", snapshot.base, path.display());
        Ok(())
    }
}
