//! Greedy denomination decomposition.
//!
//! A base-currency amount is broken down largest denomination first:
//! `count = floor(remaining / value)`, `remaining -= count * value`. Whatever is
//! left after the smallest denomination is dropped. This is intentionally
//! greedy, not an optimal coin-change; it is exact for harmonic ladders such as
//! `[20, 10, 1]`.
//!
//! Known limitation: when the smallest value is not 1, fractional leftovers are
//! silently discarded. They are exposed through [`Decomposition::remainder`]
//! for inspection only.

use denomina_shared::DenominationCode;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::catalog::{CurrencyCatalog, FictionalDenomination};
use super::error::{CurrencyError, ensure_valid_amount};

/// First whole count that no longer fits in a `u64` (2^64).
#[allow(clippy::cast_precision_loss)]
const COUNT_LIMIT: f64 = u64::MAX as f64;

/// Denominations sorted descending by value, built once and reused.
#[derive(Debug, Clone, PartialEq)]
pub struct DenominationLadder {
    steps: Vec<(DenominationCode, f64)>,
}

impl DenominationLadder {
    /// Builds the ladder. Ties keep their input order.
    #[must_use]
    pub fn new<'a>(denominations: impl IntoIterator<Item = &'a FictionalDenomination>) -> Self {
        let mut steps: Vec<(DenominationCode, f64)> = denominations
            .into_iter()
            .map(|d| (d.code.clone(), d.base_unit_value))
            .collect();
        steps.sort_by(|a, b| b.1.total_cmp(&a.1));
        Self { steps }
    }

    /// Ladder over every denomination of a catalog.
    #[must_use]
    pub fn from_catalog(catalog: &CurrencyCatalog) -> Self {
        Self::new(catalog.fictional_denominations())
    }

    /// `(code, value)` pairs, largest value first.
    pub fn steps(&self) -> impl Iterator<Item = (&DenominationCode, f64)> {
        self.steps.iter().map(|(code, value)| (code, *value))
    }

    /// Value of the smallest denomination.
    #[must_use]
    pub fn smallest_value(&self) -> Option<f64> {
        self.steps.last().map(|(_, value)| *value)
    }

    /// Base-currency worth of a decomposition under this ladder.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn value_of(&self, decomposition: &Decomposition) -> f64 {
        self.steps
            .iter()
            .map(|(code, value)| decomposition.count(code).unwrap_or(0) as f64 * value)
            .sum()
    }

    /// Breaks `base_amount` down greedily, largest denomination first.
    pub fn decompose(&self, base_amount: f64) -> Result<Decomposition, CurrencyError> {
        ensure_valid_amount(base_amount)?;

        let mut remaining = base_amount;
        let mut counts = Vec::with_capacity(self.steps.len());
        for (code, value) in &self.steps {
            // Clamped: float error may leave `remaining` a hair below zero.
            let whole = (remaining / value).floor().max(0.0);
            if whole >= COUNT_LIMIT {
                return Err(CurrencyError::AmountTooLarge(base_amount));
            }
            remaining -= whole * value;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let count = whole as u64;
            counts.push((code.clone(), count));
        }

        Ok(Decomposition {
            counts,
            remainder: remaining,
        })
    }
}

/// Breaks `base_amount` down over `denominations`.
///
/// Builds a throwaway ladder; prefer [`DenominationLadder::decompose`] when the
/// same denominations are reused.
pub fn decompose(
    base_amount: f64,
    denominations: &[FictionalDenomination],
) -> Result<Decomposition, CurrencyError> {
    DenominationLadder::new(denominations).decompose(base_amount)
}

/// Count of every denomination, largest value first, plus the dropped remainder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decomposition {
    #[serde(serialize_with = "serialize_counts")]
    counts: Vec<(DenominationCode, u64)>,
    remainder: f64,
}

impl Decomposition {
    /// Count for a denomination, `None` if it is not part of the ladder.
    #[must_use]
    pub fn count(&self, code: &DenominationCode) -> Option<u64> {
        self.counts.iter().find(|(c, _)| c == code).map(|(_, n)| *n)
    }

    /// `(code, count)` pairs, largest value first. Zero counts included.
    pub fn iter(&self) -> impl Iterator<Item = (&DenominationCode, u64)> {
        self.counts.iter().map(|(code, count)| (code, *count))
    }

    /// True when every count is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.counts.iter().all(|(_, n)| *n == 0)
    }

    /// Leftover after the smallest denomination. Never carried forward.
    #[must_use]
    pub const fn remainder(&self) -> f64 {
        self.remainder
    }
}

fn serialize_counts<S: Serializer>(
    counts: &[(DenominationCode, u64)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(counts.len()))?;
    for (code, count) in counts {
        map.serialize_entry(code, count)?;
    }
    map.end()
}
