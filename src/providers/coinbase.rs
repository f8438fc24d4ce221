use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::core::error::{Error, Result};
use crate::core::rates::ExchangeRates;

pub const DEFAULT_BASE_URL: &str = "https://api.coinbase.com";

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    errors: Vec<ServiceError>,
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    id: String,
    message: String,
}

/// Fetches crypto exchange rates for a fiat currency from the Coinbase
/// `exchange-rates` endpoint. No authentication is needed.
///
/// The last successful response is kept in memory. When a later fetch fails
/// it stays readable as stale data and `last_fetch_successful` turns false.
#[derive(Debug)]
pub struct RateFetcher {
    base_url: String,
    last_rates: Option<ExchangeRates>,
    last_fetch_timestamp: Option<DateTime<Utc>>,
    last_fetch_successful: bool,
}

impl RateFetcher {
    pub fn new(base_url: &str) -> Self {
        RateFetcher {
            base_url: base_url.trim_end_matches('/').to_string(),
            last_rates: None,
            last_fetch_timestamp: None,
            last_fetch_successful: false,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Rates from the most recent successful fetch, `None` if nothing was
    /// fetched yet.
    pub fn last_rates(&self) -> Option<&ExchangeRates> {
        self.last_rates.as_ref()
    }

    pub fn last_fetch_timestamp(&self) -> Option<DateTime<Utc>> {
        self.last_fetch_timestamp
    }

    /// Whether `last_rates` came from the most recent fetch attempt.
    pub fn last_fetch_successful(&self) -> bool {
        self.last_fetch_successful
    }

    /// Fetches the current rates for `currency`. The currency code is passed
    /// through to the service unchecked.
    ///
    /// Fails with [`Error::CryptoExchange`] on any unsuccessful attempt. The
    /// message lists every error the service reported, e.g.
    /// `invalid_request was triggered, Currency is invalid.`
    #[instrument(
        name = "CoinbaseRatesFetch",
        skip(self),
        fields(currency = %currency)
    )]
    pub async fn fetch_rates_for(&mut self, currency: &str) -> Result<ExchangeRates> {
        match self.request_rates(currency).await {
            Ok(rates) => {
                self.last_rates = Some(rates.clone());
                self.last_fetch_timestamp = Some(Utc::now());
                self.last_fetch_successful = true;
                debug!(rates = ?rates.rates(), "Stored exchange rates");
                Ok(rates)
            }
            Err(e) => {
                self.last_fetch_successful = false;
                warn!(error = %e, stale = self.last_rates.is_some(), "Exchange rate fetch failed");
                Err(e)
            }
        }
    }

    async fn request_rates(&self, currency: &str) -> Result<ExchangeRates> {
        let endpoint = format!("{}/v2/exchange-rates", self.base_url);
        let url = Url::parse_with_params(&endpoint, &[("currency", currency)]).map_err(|e| {
            Error::CryptoExchange(format!("Invalid rate service URL {endpoint}: {e}"))
        })?;
        debug!("Requesting exchange rates from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("cryptosplit/0.1")
            .build()
            .map_err(|e| Error::CryptoExchange(format!("Failed to build HTTP client: {e}")))?;

        let response = client.get(url).send().await.map_err(|e| {
            Error::CryptoExchange(format!("Request error: {e} for currency: {currency}"))
        })?;

        let status = response.status();
        let body = response.text().await;
        debug!(%status, "Received exchange rate response");

        if !status.is_success() {
            let body = body.unwrap_or_default();
            return Err(Error::CryptoExchange(service_error_message(currency, &body)));
        }

        let body = body.map_err(|e| {
            Error::CryptoExchange(format!("Failed to read response for {currency}: {e}"))
        })?;
        let data: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            Error::CryptoExchange(format!(
                "Failed to parse exchange rates for {currency}: {e}"
            ))
        })?;

        Ok(ExchangeRates::new(data))
    }
}

impl Default for RateFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn service_error_message(currency: &str, body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(response) if !response.errors.is_empty() => response
            .errors
            .iter()
            .map(|error| format!("{} was triggered, {}.", error.id, error.message))
            .collect::<Vec<_>>()
            .join(", "),
        _ => format!("Something went wrong when fetching exchange for {currency}."),
    }
}
