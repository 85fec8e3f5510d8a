//! Currency service tying catalog, rates and decomposition together.
//!
//! The service resolves the base currency and builds the denomination ladder
//! once; every conversion after that is independent and reentrant.

use std::sync::Arc;

use denomina_shared::CurrencyCode;
use serde::Serialize;
use tracing::debug;

use super::catalog::CurrencyCatalog;
use super::conversion::to_base_currency;
use super::decomposition::{Decomposition, DenominationLadder};
use super::error::CurrencyError;
use super::exchange::ExchangeRateTable;
use super::format::{BreakdownLine, breakdown, format_decomposition};

/// Result of one successful conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionOutcome {
    /// Amount as requested.
    pub original_amount: f64,
    /// Currency the amount was given in.
    pub original_currency: CurrencyCode,
    /// Amount expressed in the base currency.
    pub base_currency_equivalent: f64,
    /// Greedy breakdown into fictional denominations.
    pub decomposition: Decomposition,
}

/// Currency service for conversion operations.
#[derive(Debug, Clone)]
pub struct CurrencyService {
    catalog: Arc<CurrencyCatalog>,
    ladder: DenominationLadder,
    base: CurrencyCode,
}

impl CurrencyService {
    /// Creates a service over `catalog`.
    ///
    /// `default_base` is used only if the catalog flags no base currency.
    #[must_use]
    pub fn new(catalog: Arc<CurrencyCatalog>, default_base: &CurrencyCode) -> Self {
        let base = catalog.base_currency_code_or(default_base);
        let ladder = DenominationLadder::from_catalog(&catalog);
        Self {
            catalog,
            ladder,
            base,
        }
    }

    /// Converts `amount` of `from` into base currency and fictional denominations.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use denomina_core::currency::{CurrencyCatalog, CurrencyService, FixedRates, RateSource};
    /// use denomina_shared::CurrencyCode;
    ///
    /// let service = CurrencyService::new(CurrencyCatalog::bundled(), &CurrencyCode::new("USD"));
    /// let rates = FixedRates::new(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()).latest().unwrap();
    /// let outcome = service.convert(3900.0, &CurrencyCode::new("COP"), &rates).unwrap();
    /// assert_eq!(service.format(&outcome), "1 🪿 gansito");
    /// ```
    pub fn convert(
        &self,
        amount: f64,
        from: &CurrencyCode,
        rates: &ExchangeRateTable,
    ) -> Result<ConversionOutcome, CurrencyError> {
        let base_currency_equivalent = to_base_currency(amount, from, rates, &self.base)?;
        let decomposition = self.ladder.decompose(base_currency_equivalent)?;

        debug!(
            amount,
            from = %from,
            base = %self.base,
            base_equivalent = base_currency_equivalent,
            remainder = decomposition.remainder(),
            "Converted amount"
        );

        Ok(ConversionOutcome {
            original_amount: amount,
            original_currency: from.clone(),
            base_currency_equivalent,
            decomposition,
        })
    }

    /// Display string for an outcome.
    #[must_use]
    pub fn format(&self, outcome: &ConversionOutcome) -> String {
        format_decomposition(&outcome.decomposition, &self.catalog)
    }

    /// Structured breakdown for an outcome.
    #[must_use]
    pub fn breakdown(&self, outcome: &ConversionOutcome) -> Vec<BreakdownLine> {
        breakdown(&outcome.decomposition, &self.catalog)
    }

    /// Base currency every conversion normalizes to.
    #[must_use]
    pub const fn base_currency_code(&self) -> &CurrencyCode {
        &self.base
    }

    /// Catalog backing this service.
    #[must_use]
    pub fn catalog(&self) -> &CurrencyCatalog {
        &self.catalog
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::currency::exchange::{FixedRates, RateSource};

    fn service() -> CurrencyService {
        CurrencyService::new(
            Arc::new(CurrencyCatalog::legacy_default()),
            &CurrencyCode::new("USD"),
        )
    }

    fn rates() -> ExchangeRateTable {
        FixedRates::new(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
            .latest()
            .unwrap()
    }

    #[test]
    fn test_convert_cop() {
        let service = service();
        let outcome = service
            .convert(3900.0, &CurrencyCode::new("COP"), &rates())
            .unwrap();
        assert_eq!(outcome.original_amount, 3900.0);
        assert_eq!(outcome.original_currency.as_str(), "COP");
        assert_eq!(outcome.base_currency_equivalent, 1.0);
        assert_eq!(service.format(&outcome), "1 🪿 gansito");
    }

    #[test]
    fn test_convert_usd_identity() {
        let service = service();
        let outcome = service
            .convert(100.0, &CurrencyCode::new("USD"), &rates())
            .unwrap();
        assert_eq!(outcome.base_currency_equivalent, 100.0);
        assert_eq!(service.format(&outcome), "5 🕷️ silksongs");
        let counts: Vec<u64> = service.breakdown(&outcome).iter().map(|l| l.count).collect();
        assert_eq!(counts, vec![5]);
    }

    #[test]
    fn test_missing_rate_propagates() {
        let err = service()
            .convert(10.0, &CurrencyCode::new("EUR"), &rates())
            .unwrap_err();
        assert_eq!(err, CurrencyError::MissingRate(CurrencyCode::new("EUR")));
    }

    #[test]
    fn test_negative_amount_propagates() {
        let err = service()
            .convert(-3.0, &CurrencyCode::new("MXN"), &rates())
            .unwrap_err();
        assert_eq!(err, CurrencyError::NegativeAmount(-3.0));
    }

    #[test]
    fn test_base_currency_from_catalog() {
        let service = CurrencyService::new(
            Arc::new(CurrencyCatalog::legacy_default()),
            &CurrencyCode::new("EUR"),
        );
        assert_eq!(service.base_currency_code().as_str(), "USD");
        assert_eq!(service.catalog().real_currencies().len(), 3);
    }

    #[test]
    fn test_outcome_serializes_camel_case() {
        let outcome = service()
            .convert(39000.0, &CurrencyCode::new("COP"), &rates())
            .unwrap();
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["originalCurrency"], "COP");
        assert_eq!(value["decomposition"]["counts"]["balatro"], 1);
        assert!(value.get("baseCurrencyEquivalent").is_some());
    }

    #[test]
    fn test_service_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CurrencyService>();
    }
}
