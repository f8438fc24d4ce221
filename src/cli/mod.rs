pub mod demo;
pub mod purchase;
pub mod rates;
pub mod setup;
pub mod ui;

use crate::core::Error;

/// Renders a core error the way the CLI reports it to the user.
pub fn describe_error(error: &Error) -> String {
    match error {
        Error::InvalidArgument(message) => format!("Bad Input: {message}"),
        Error::CryptoExchange(message) => message.clone(),
    }
}
