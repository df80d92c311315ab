//! Error kinds shared by the conversion core, the cache and the rate sources.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid period: {0} (supported: Hour, Day, Month, Year)")]
    InvalidPeriod(String),

    #[error("invalid currency: {0} (supported: PLN, EUR, USD, GBP)")]
    InvalidCurrency(String),

    #[error("amount must be a positive number no greater than {max}, got {0}", max = crate::core::salary::MAX_AMOUNT)]
    InvalidAmount(f64),

    #[error("failed to access rate cache file {}: {source}", .path.display())]
    CacheIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rate cache file {}: {source}", .path.display())]
    CacheParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("request to {provider} failed: {source}")]
    FetchTransport {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned status {status}")]
    FetchStatus {
        provider: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to decode response from {provider}: {reason}")]
    FetchDecode { provider: String, reason: String },

    #[error("failed to fetch exchange rates from {attempts} source(s) and no cached rates are available")]
    AllSourcesExhausted {
        attempts: usize,
        #[source]
        last: Option<Box<Error>>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for errors caused by bad user input rather than the environment.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidPeriod(_) | Error::InvalidCurrency(_) | Error::InvalidAmount(_)
        )
    }
}
