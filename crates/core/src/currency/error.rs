//! Currency engine error types.

use denomina_shared::{AppError, CurrencyCode};
use thiserror::Error;

/// Errors raised by catalog loading, rate conversion and decomposition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurrencyError {
    /// Configuration document is malformed or breaks a load-time invariant.
    #[error("Invalid currency configuration: {0}")]
    InvalidConfiguration(String),

    /// Rate table has no usable (non-zero) rate for the currency.
    #[error("Exchange rate not available for {0}")]
    MissingRate(CurrencyCode),

    /// Amount cannot be negative.
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(f64),

    /// Amount is NaN or infinite.
    #[error("Amount must be a finite number: {0}")]
    InvalidAmount(f64),

    /// Amount needs more pieces of one denomination than a count can hold.
    #[error("Amount is too large to break down: {0}")]
    AmountTooLarge(f64),
}

impl CurrencyError {
    /// Returns true if re-fetching rates may resolve the error.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::MissingRate(_))
    }
}

impl From<CurrencyError> for AppError {
    fn from(err: CurrencyError) -> Self {
        match err {
            CurrencyError::InvalidConfiguration(_) => Self::Configuration(err.to_string()),
            CurrencyError::MissingRate(_) => Self::RatesUnavailable(err.to_string()),
            CurrencyError::NegativeAmount(_)
            | CurrencyError::InvalidAmount(_)
            | CurrencyError::AmountTooLarge(_) => {
                Self::Validation(err.to_string())
            }
        }
    }
}

/// Rejects negative and non-finite amounts.
pub(crate) fn ensure_valid_amount(amount: f64) -> Result<(), CurrencyError> {
    if !amount.is_finite() {
        return Err(CurrencyError::InvalidAmount(amount));
    }
    if amount < 0.0 {
        return Err(CurrencyError::NegativeAmount(amount));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_rate_names_currency() {
        let err = CurrencyError::MissingRate(CurrencyCode::new("XYZ"));
        assert_eq!(err.to_string(), "Exchange rate not available for XYZ");
        assert!(err.is_retryable());
    }

    #[test]
    fn test_validation_errors_are_not_retryable() {
        assert!(!CurrencyError::NegativeAmount(-1.0).is_retryable());
        assert!(!CurrencyError::InvalidAmount(f64::NAN).is_retryable());
        assert!(!CurrencyError::InvalidConfiguration("x".into()).is_retryable());
        assert!(!CurrencyError::AmountTooLarge(1e25).is_retryable());
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = CurrencyError::MissingRate(CurrencyCode::new("COP")).into();
        assert!(matches!(app, AppError::RatesUnavailable(_)));
        assert!(app.is_retryable());

        let app: AppError = CurrencyError::NegativeAmount(-5.0).into();
        assert!(matches!(app, AppError::Validation(_)));
        assert_eq!(app.exit_code(), 65);

        let app: AppError = CurrencyError::AmountTooLarge(1e25).into();
        assert_eq!(app.exit_code(), 65);

        let app: AppError = CurrencyError::InvalidConfiguration("empty".into()).into();
        assert!(matches!(app, AppError::Configuration(_)));
    }

    #[test]
    fn test_ensure_valid_amount() {
        assert!(ensure_valid_amount(0.0).is_ok());
        assert!(ensure_valid_amount(12.5).is_ok());
        assert_eq!(
            ensure_valid_amount(-1.0),
            Err(CurrencyError::NegativeAmount(-1.0))
        );
        assert!(matches!(
            ensure_valid_amount(f64::INFINITY),
            Err(CurrencyError::InvalidAmount(_))
        ));
        assert!(matches!(
            ensure_valid_amount(f64::NAN),
            Err(CurrencyError::InvalidAmount(_))
        ));
    }
}
