//! Splits a fiat amount into BTC and ETH purchases

use super::error::{Error, Result};
use super::rates::{BTC, ETH};
use super::ratio::AllocationRatio;
use crate::providers::coinbase::{DEFAULT_BASE_URL, RateFetcher};
use serde::Serialize;
use tracing::debug;

/// Quantities of each asset that the amount buys at current rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PurchaseResult {
    pub btc: f64,
    pub eth: f64,
}

/// Works out how much BTC and ETH an amount of `currency` buys, split by a
/// BTC/ETH ratio pair.
#[derive(Debug)]
pub struct AllocationCalculator {
    ratio: AllocationRatio,
    currency: String,
    rate_fetcher: RateFetcher,
}

impl AllocationCalculator {
    /// Creates a calculator backed by the public Coinbase endpoint. Ratios are
    /// decimal strings which must be non-negative and sum to exactly 1.
    pub fn new(btc_ratio: &str, eth_ratio: &str, currency: &str) -> Result<Self> {
        Self::with_base_url(btc_ratio, eth_ratio, currency, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(
        btc_ratio: &str,
        eth_ratio: &str,
        currency: &str,
        base_url: &str,
    ) -> Result<Self> {
        let ratio = AllocationRatio::parse(btc_ratio, eth_ratio)?;
        Ok(AllocationCalculator {
            ratio,
            currency: currency.to_string(),
            rate_fetcher: RateFetcher::new(base_url),
        })
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn btc_ratio(&self) -> f64 {
        self.ratio.btc()
    }

    pub fn eth_ratio(&self) -> f64 {
        self.ratio.eth()
    }

    pub fn rate_fetcher(&self) -> &RateFetcher {
        &self.rate_fetcher
    }

    /// Switches the target currency. The code is not checked against a list
    /// of known currencies; the rate service rejects unknown ones on fetch.
    pub fn update_currency(&mut self, currency: &str) {
        debug!(from = %self.currency, to = %currency, "Updating currency");
        self.currency = currency.to_string();
    }

    /// Replaces both ratios, or neither if the new pair is invalid.
    pub fn update_ratios(&mut self, btc_ratio: &str, eth_ratio: &str) -> Result<()> {
        self.ratio = AllocationRatio::parse(btc_ratio, eth_ratio)?;
        debug!(btc = self.ratio.btc(), eth = self.ratio.eth(), "Updated ratios");
        Ok(())
    }

    /// Fetches current rates and converts `amount` into BTC and ETH.
    ///
    /// A negative amount fails before any request is made. Errors from the
    /// rate service are returned as they are.
    pub async fn determine_allocation(&mut self, amount: f64) -> Result<PurchaseResult> {
        if amount.is_nan() || amount < 0.0 {
            return Err(Error::InvalidArgument(
                "Amount cannot be less than 0.".to_string(),
            ));
        }
        if amount.is_infinite() {
            return Err(Error::InvalidArgument(
                "Amount must be a finite number.".to_string(),
            ));
        }

        let rates = self.rate_fetcher.fetch_rates_for(&self.currency).await?;
        let btc_rate = rates.rate(BTC)?;
        let eth_rate = rates.rate(ETH)?;

        let btc_spend = amount * self.ratio.btc();
        let eth_spend = amount * self.ratio.eth();

        let result = PurchaseResult {
            btc: btc_spend * btc_rate,
            eth: eth_spend * eth_rate,
        };
        debug!(amount, currency = %self.currency, ?result, "Determined allocation");
        Ok(result)
    }
}
