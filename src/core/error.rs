//! Error kinds raised by the rate fetcher and the allocation calculator

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed or out-of-range scalar input: a non-numeric or negative ratio,
    /// or a negative amount.
    #[error("{0}")]
    InvalidArgument(String),

    /// Domain failure: ratios not summing to 1, or the rate service rejecting
    /// a request.
    #[error("{0}")]
    CryptoExchange(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}
