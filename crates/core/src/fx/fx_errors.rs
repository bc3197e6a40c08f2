use thiserror::Error;

/// Errors raised by the fx module.
///
/// Note that conversion itself never fails: a missing rate resolves to the
/// unconverted amount (see [`CurrencyConverter`]). Only malformed inputs are
/// rejected.
///
/// [`CurrencyConverter`]: super::CurrencyConverter
#[derive(Error, Debug)]
pub enum FxError {
    #[error("Invalid currency code: {0}")]
    InvalidCurrencyCode(String),
}

/// Format-only validation of an ISO 4217 style currency code.
pub fn validate_currency_code(code: &str) -> Result<(), FxError> {
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(FxError::InvalidCurrencyCode(code.to_string()))
    }
}
