//! Display formatting for decompositions and real-currency amounts.

use denomina_shared::{CurrencyCode, DenominationCode};
use rust_decimal::prelude::*;
use serde::Serialize;

use super::catalog::CurrencyCatalog;
use super::decomposition::Decomposition;

/// Shown when the catalog has no usable base denomination.
pub const ZERO_FALLBACK: &str = "0 🪿 gansitos";

/// One rendered denomination for non-string consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownLine {
    /// Denomination icon.
    pub icon: String,
    /// Count of this denomination.
    pub count: u64,
    /// Singular name for a count of one, plural otherwise.
    pub name: String,
}

/// Renders a decomposition as `"5 🕷️ silksongs, 1 🪿 gansito"`.
///
/// Denominations are listed in display order and zero counts are skipped. An
/// all-zero decomposition renders as zero of the base denomination.
#[must_use]
pub fn format_decomposition(decomposition: &Decomposition, catalog: &CurrencyCatalog) -> String {
    let parts: Vec<String> = catalog
        .fictional_denominations()
        .iter()
        .filter_map(|d| {
            let count = decomposition.count(&d.code).filter(|n| *n > 0)?;
            Some(format!(
                "{count} {} {}",
                d.icon,
                d.name_for(count).to_lowercase()
            ))
        })
        .collect();

    if !parts.is_empty() {
        return parts.join(", ");
    }

    catalog.base_denomination().map_or_else(
        || ZERO_FALLBACK.to_string(),
        |base| format!("0 {} {}", base.icon, base.plural_name.to_lowercase()),
    )
}

/// The denominations [`format_decomposition`] lists, as structured lines.
///
/// Display order, zero counts skipped; an all-zero decomposition yields no lines.
#[must_use]
pub fn breakdown(decomposition: &Decomposition, catalog: &CurrencyCatalog) -> Vec<BreakdownLine> {
    catalog
        .fictional_denominations()
        .iter()
        .filter_map(|d| {
            let count = decomposition.count(&d.code).filter(|n| *n > 0)?;
            Some(BreakdownLine {
                icon: d.icon.clone(),
                count,
                name: d.name_for(count).to_string(),
            })
        })
        .collect()
}

/// The fixed three-tier shape older display code expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LegacyBreakdown {
    /// Count of `silksong`.
    pub silksongs: u64,
    /// Count of `balatro`.
    pub balatros: u64,
    /// Count of `gansito`.
    pub gansitos: u64,
}

impl LegacyBreakdown {
    /// Projects a decomposition; denominations it lacks count as zero.
    #[must_use]
    pub fn from_decomposition(decomposition: &Decomposition) -> Self {
        let count = |code: &str| {
            decomposition
                .count(&DenominationCode::new(code))
                .unwrap_or(0)
        };
        Self {
            silksongs: count("silksong"),
            balatros: count("balatro"),
            gansitos: count("gansito"),
        }
    }
}

/// Formats a real-currency amount the en-US way: `$1,234.50`, `MX$18.40`,
/// `COP 3,900.00`.
///
/// Always two fraction digits, rounded half away from zero on the exact binary
/// value of `amount`.
#[must_use]
pub fn format_monetary(amount: f64, currency: &CurrencyCode) -> String {
    let prefix = currency_prefix(currency);

    let Some(value) = Decimal::from_f64_retain(amount) else {
        // Beyond the Decimal range: no rounding issue left at two places.
        let sign = if amount.is_sign_negative() { "-" } else { "" };
        let digits = format!("{:.2}", amount.abs());
        let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
        return format!("{sign}{prefix}{}.{fraction}", group_thousands(integer));
    };

    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let digits = rounded.abs().to_string();
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    format!("{sign}{prefix}{}.{fraction}", group_thousands(integer))
}

fn currency_prefix(currency: &CurrencyCode) -> String {
    let symbol = match currency.as_str() {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "MXN" => "MX$",
        "CAD" => "CA$",
        "AUD" => "A$",
        "BRL" => "R$",
        "CNY" => "CN¥",
        "INR" => "₹",
        "KRW" => "₩",
        other => return format!("{other}\u{a0}"),
    };
    symbol.to_string()
}

fn group_thousands(integer: &str) -> String {
    let len = integer.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
