use super::util::{get_json, http_client, with_base_rate};
use crate::core::{Currency, FetchedRates, RateSource, RateTable, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

pub const NAME: &str = "exchangerate-api.com";

/// Primary source: `GET {base_url}/v4/latest/{BASE}`.
pub struct ExchangeRateApiProvider {
    base_url: String,
    client: reqwest::Client,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, http_client())
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestResponse {
    #[allow(dead_code)]
    base: Option<String>,
    #[serde(default)]
    rates: RateTable,
    date: Option<String>,
}

#[async_trait]
impl RateSource for ExchangeRateApiProvider {
    fn name(&self) -> &str {
        NAME
    }

    #[instrument(name = "ExchangeRateApiFetch", skip(self), fields(base = %base))]
    async fn fetch(&self, base: Currency) -> Result<FetchedRates> {
        let url = format!("{}/v4/latest/{}", self.base_url, base.code());
        let response: LatestResponse = get_json(&self.client, NAME, &url).await?;
        debug!(date = ?response.date, count = response.rates.len(), "Decoded rates");

        Ok(FetchedRates {
            rates: with_base_rate(response.rates, base),
            source: NAME.to_string(),
        })
    }
}
