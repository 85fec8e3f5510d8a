//! Exchange rate tables and where they come from.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use denomina_shared::CurrencyCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::CurrencyError;

/// Rates of every known currency against the base currency.
///
/// Each rate is "units of this currency per 1 unit of base currency", so the
/// base currency itself is always `1`. A table is never mutated; newer rates
/// come as a new table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRateTable {
    /// Date the rates were obtained.
    #[serde(rename = "lastUpdated")]
    last_updated: NaiveDate,
    #[serde(flatten)]
    rates: BTreeMap<CurrencyCode, f64>,
}

impl ExchangeRateTable {
    /// Creates a table from `(code, rate)` pairs.
    #[must_use]
    pub fn new(
        rates: impl IntoIterator<Item = (CurrencyCode, f64)>,
        last_updated: NaiveDate,
    ) -> Self {
        Self {
            last_updated,
            rates: rates.into_iter().collect(),
        }
    }

    /// Raw rate for a currency, exactly as supplied.
    #[must_use]
    pub fn rate(&self, code: &CurrencyCode) -> Option<f64> {
        self.rates.get(code).copied()
    }

    /// Currencies present in the table, alphabetically.
    pub fn codes(&self) -> impl Iterator<Item = &CurrencyCode> {
        self.rates.keys()
    }

    /// Date the rates were obtained.
    #[must_use]
    pub const fn last_updated(&self) -> NaiveDate {
        self.last_updated
    }
}

/// Something that can produce a current rate table.
pub trait RateSource {
    /// Returns the latest rates.
    fn latest(&self) -> Result<ExchangeRateTable, CurrencyError>;
}

/// Fixed rates: 1 USD = 3900 COP = 18.40 MXN.
#[derive(Debug, Clone, Copy)]
pub struct FixedRates {
    date: NaiveDate,
}

impl FixedRates {
    /// The fixed table entries.
    pub const RATES: [(&'static str, f64); 3] = [("USD", 1.0), ("COP", 3900.0), ("MXN", 18.4)];

    /// Fixed rates stamped with `date`.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Fixed rates stamped with today's UTC date.
    #[must_use]
    pub fn today() -> Self {
        Self::new(Utc::now().date_naive())
    }
}

impl RateSource for FixedRates {
    fn latest(&self) -> Result<ExchangeRateTable, CurrencyError> {
        debug!(date = %self.date, "Serving fixed exchange rates");
        Ok(ExchangeRateTable::new(
            Self::RATES
                .iter()
                .map(|(code, rate)| (CurrencyCode::new(code), *rate)),
            self.date,
        ))
    }
}
