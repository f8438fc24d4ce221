//! BTC/ETH allocation ratios
//!
//! Ratios are entered as decimal strings and stored as the nearest `f64`.
//! The sum check runs on the stored floats, the same values the purchase
//! calculation uses.

use super::error::{Error, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllocationRatio {
    btc: f64,
    eth: f64,
}

impl AllocationRatio {
    /// Validates a BTC/ETH pair. Each ratio must be non-negative and the two
    /// must add up to exactly 1.
    pub fn parse(btc_input: &str, eth_input: &str) -> Result<Self> {
        let btc_value = parse_non_negative("btc_ratio", btc_input)?;
        let eth_value = parse_non_negative("eth_ratio", eth_input)?;

        if btc_value + eth_value != 1.0 {
            return Err(Error::CryptoExchange(format!(
                "btc_ratio: {btc_value:?} + eth_ratio: {eth_value:?} does not equal 1"
            )));
        }

        Ok(AllocationRatio {
            btc: btc_value,
            eth: eth_value,
        })
    }

    pub fn btc(&self) -> f64 {
        self.btc
    }

    pub fn eth(&self) -> f64 {
        self.eth
    }
}

fn parse_decimal(name: &str, input: &str) -> Result<Decimal> {
    let trimmed = input.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| Error::InvalidArgument(format!("invalid value for {name}: {input:?}")))
}

fn parse_non_negative(name: &str, input: &str) -> Result<f64> {
    let value = parse_decimal(name, input)?;
    if value < Decimal::ZERO {
        return Err(Error::InvalidArgument(format!("{name} cannot be less than 0.")));
    }
    to_f64(name, value)
}

// Goes through the decimal's string form so the result is the float nearest
// to the entered value.
fn to_f64(name: &str, value: Decimal) -> Result<f64> {
    value
        .to_string()
        .parse::<f64>()
        .map_err(|_| Error::InvalidArgument(format!("{name} is out of range: {value}")))
}
