use crate::core::{Currency, Error, RateTable, Result};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Shared HTTP client with the tool's user agent.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!("s-calc/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Issues one GET request and decodes the JSON body into `T`.
///
/// Transport failures, non-2xx statuses and undecodable bodies map to the
/// matching `Fetch*` error, tagged with `provider`.
pub async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    provider: &str,
    url: &str,
) -> Result<T> {
    debug!("Requesting rates from {}", url);
    let transport = |source| Error::FetchTransport {
        provider: provider.to_string(),
        source,
    };

    let response = client.get(url).send().await.map_err(transport)?;
    debug!(status = %response.status(), "Received {} response", provider);

    if !response.status().is_success() {
        return Err(Error::FetchStatus {
            provider: provider.to_string(),
            status: response.status(),
        });
    }

    let text = response.text().await.map_err(transport)?;
    serde_json::from_str(&text).map_err(|e| Error::FetchDecode {
        provider: provider.to_string(),
        reason: e.to_string(),
    })
}

/// Providers may omit the base currency; it is always 1.0.
pub fn with_base_rate(mut rates: RateTable, base: Currency) -> RateTable {
    rates.insert(base.code().to_string(), 1.0);
    rates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_rate_inserts_and_overrides() {
        let rates = with_base_rate(RateTable::new(), Currency::Pln);
        assert_eq!(rates.get("PLN"), Some(&1.0));

        let rates = with_base_rate(RateTable::from([("USD".to_string(), 0.9)]), Currency::Usd);
        assert_eq!(rates.get("USD"), Some(&1.0));
    }
}
