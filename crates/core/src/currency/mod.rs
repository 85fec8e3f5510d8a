//! Real-currency conversion and fictional denomination breakdown.

pub mod catalog;
pub mod conversion;
pub mod decomposition;
pub mod error;
pub mod exchange;
pub mod format;
pub mod input;
pub mod service;

#[cfg(test)]
mod props;

pub use catalog::{
    CatalogMetadata, ConversionRule, CurrencyCatalog, Equivalence, EquivalenceMismatch,
    FictionalDenomination, RealCurrencyConfig, load_configuration,
};
pub use conversion::to_base_currency;
pub use decomposition::{Decomposition, DenominationLadder, decompose};
pub use error::CurrencyError;
pub use exchange::{ExchangeRateTable, FixedRates, RateSource};
pub use format::{BreakdownLine, LegacyBreakdown, breakdown, format_decomposition, format_monetary};
pub use input::{accepts_amount_input, is_valid_amount, parse_amount};
pub use service::{ConversionOutcome, CurrencyService};
