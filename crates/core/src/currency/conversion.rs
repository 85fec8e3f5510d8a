//! Real-currency to base-currency conversion.
//!
//! Rates are "units of `from` per 1 base unit", so converting to the base
//! currency divides. No rounding happens here; full precision is carried into
//! decomposition.

use denomina_shared::CurrencyCode;

use super::error::{CurrencyError, ensure_valid_amount};
use super::exchange::ExchangeRateTable;

/// Converts `amount` of `from` into the base currency.
///
/// The base currency itself is returned unchanged. Any other currency needs a
/// positive, finite rate in `rates`; an absent or zero rate is a
/// [`CurrencyError::MissingRate`].
pub fn to_base_currency(
    amount: f64,
    from: &CurrencyCode,
    rates: &ExchangeRateTable,
    base: &CurrencyCode,
) -> Result<f64, CurrencyError> {
    ensure_valid_amount(amount)?;

    if from == base {
        return Ok(amount);
    }

    match rates.rate(from) {
        Some(rate) if rate.is_finite() && rate > 0.0 => Ok(amount / rate),
        _ => Err(CurrencyError::MissingRate(from.clone())),
    }
}
