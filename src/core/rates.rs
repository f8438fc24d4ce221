//! Exchange rate snapshot types

use super::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const BTC: &str = "BTC";
pub const ETH: &str = "ETH";

/// A successful rate service response, kept verbatim.
///
/// The expected shape is `{"data": {"currency": "USD", "rates": {"BTC": "0.00003", ...}}}`
/// where each rate is the number of units of the asset one unit of the
/// currency buys. The shape is only checked when a rate is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeRates {
    body: Value,
}

impl ExchangeRates {
    pub fn new(body: Value) -> Self {
        ExchangeRates { body }
    }

    pub fn as_json(&self) -> &Value {
        &self.body
    }

    pub fn currency(&self) -> Option<&str> {
        self.body.pointer("/data/currency").and_then(Value::as_str)
    }

    pub fn rates(&self) -> Option<&Map<String, Value>> {
        self.body.pointer("/data/rates").and_then(Value::as_object)
    }

    /// The rate for `symbol` as the service sent it, string or number.
    pub fn raw_rate(&self, symbol: &str) -> Option<String> {
        match self.rates()?.get(symbol)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn rate(&self, symbol: &str) -> Result<f64> {
        let currency = self.currency().unwrap_or("the requested currency");
        let value = self
            .rates()
            .and_then(|rates| rates.get(symbol))
            .ok_or_else(|| Error::CryptoExchange(format!("No {symbol} rate found for {currency}.")))?;

        let rate = match value {
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Number(n) => n.as_f64(),
            _ => None,
        };
        rate.ok_or_else(|| {
            Error::CryptoExchange(format!("Invalid {symbol} rate {value} for {currency}."))
        })
    }
}
