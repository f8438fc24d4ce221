//! Core business logic: ratio validation and allocation

pub mod allocation;
pub mod config;
pub mod error;
pub mod log;
pub mod rates;
pub mod ratio;

// Re-export main types for cleaner imports
pub use allocation::{AllocationCalculator, PurchaseResult};
pub use error::{Error, Result};
pub use rates::ExchangeRates;
pub use ratio::AllocationRatio;
