//! Rate acquisition chain: fresh cache, then each source in order, then an
//! expired cache entry as a last resort.

use super::exchangerate_api::ExchangeRateApiProvider;
use super::exchangerate_host::ExchangeRateHostProvider;
use super::util::http_client;
use crate::core::config::AppConfig;
use crate::core::{Currency, Error, RateInfo, RateSource, RateTable, Result};
use crate::store::{CacheLookup, RateCache};
use anyhow::Context;
use chrono::Utc;
use tracing::{info, instrument, warn};

pub struct RateProvider {
    cache: RateCache,
    sources: Vec<Box<dyn RateSource>>,
}

impl RateProvider {
    /// `sources` are tried sequentially in the given order.
    pub fn new(cache: RateCache, sources: Vec<Box<dyn RateSource>>) -> Self {
        Self { cache, sources }
    }

    /// Cache from `config.cache`, primary then fallback source from `config.providers`.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let dir = config
            .cache
            .resolve_dir()
            .context("Failed to determine rate cache directory")?;
        let cache = RateCache::new(dir, config.cache.ttl());
        let client = http_client();
        let sources: Vec<Box<dyn RateSource>> = vec![
            Box::new(ExchangeRateApiProvider::with_client(
                &config.providers.primary.base_url,
                client.clone(),
            )),
            Box::new(ExchangeRateHostProvider::with_client(
                &config.providers.fallback.base_url,
                client,
            )),
        ];
        Ok(Self::new(cache, sources))
    }

    pub fn cache(&self) -> &RateCache {
        &self.cache
    }

    /// Rates relative to `base` plus their provenance.
    ///
    /// Only fails when no source succeeds and nothing, not even an expired
    /// snapshot, is cached.
    #[instrument(skip(self), fields(base = %base))]
    pub async fn get_rates(&self, base: Currency) -> Result<(RateTable, RateInfo)> {
        let cached = self.cache.lookup(base).unwrap_or_else(|e| {
            warn!(error = %e, "Ignoring unreadable rate cache");
            CacheLookup::Missing
        });

        if let CacheLookup::Fresh(snapshot) = cached {
            info!(source = %snapshot.source, "Using cached rates");
            let info = snapshot.info();
            return Ok((snapshot.rates, info));
        }

        let mut last_error = None;
        for source in &self.sources {
            match source.fetch(base).await {
                Ok(fetched) => {
                    info!(source = %fetched.source, "Fetched fresh rates");
                    let snapshot =
                        self.cache
                            .snapshot_at(base, fetched.rates, &fetched.source, Utc::now());
                    if let Err(e) = self.cache.store(&snapshot) {
                        warn!(error = %e, "Failed to persist rates to cache");
                    }
                    let info = snapshot.info();
                    return Ok((snapshot.rates, info));
                }
                Err(e) => {
                    warn!(source = source.name(), error = %e, "Rate source failed");
                    last_error = Some(e);
                }
            }
        }

        if let CacheLookup::Expired(snapshot) = cached {
            warn!(
                source = %snapshot.source,
                expired_at = %snapshot.expires_at,
                "All rate sources failed, using expired cached rates"
            );
            let info = snapshot.stale_info();
            return Ok((snapshot.rates, info));
        }

        Err(Error::AllSourcesExhausted {
            attempts: self.sources.len(),
            last: last_error.map(Box::new),
        })
    }
}
