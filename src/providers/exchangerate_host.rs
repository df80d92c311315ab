use super::util::{get_json, http_client, with_base_rate};
use crate::core::{Currency, Error, FetchedRates, RateSource, RateTable, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

pub const NAME: &str = "exchangerate.host";

/// Fallback source: `GET {base_url}/latest?base={BASE}`. The payload must
/// carry `"success": true`.
pub struct ExchangeRateHostProvider {
    base_url: String,
    client: reqwest::Client,
}

impl ExchangeRateHostProvider {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, http_client())
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        ExchangeRateHostProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestResponse {
    #[serde(default)]
    success: bool,
    #[allow(dead_code)]
    base: Option<String>,
    #[serde(default)]
    rates: RateTable,
    date: Option<String>,
}

#[async_trait]
impl RateSource for ExchangeRateHostProvider {
    fn name(&self) -> &str {
        NAME
    }

    #[instrument(name = "ExchangeRateHostFetch", skip(self), fields(base = %base))]
    async fn fetch(&self, base: Currency) -> Result<FetchedRates> {
        let url = format!("{}/latest?base={}", self.base_url, base.code());
        let response: LatestResponse = get_json(&self.client, NAME, &url).await?;

        if !response.success {
            return Err(Error::FetchDecode {
                provider: NAME.to_string(),
                reason: "API returned success=false".to_string(),
            });
        }
        debug!(date = ?response.date, count = response.rates.len(), "Decoded rates");

        Ok(FetchedRates {
            rates: with_base_rate(response.rates, base),
            source: NAME.to_string(),
        })
    }
}
