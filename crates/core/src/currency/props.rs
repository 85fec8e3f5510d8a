//! Property-based tests for the conversion engine.
//!
//! - Base-currency identity
//! - Exactness of decomposition for integral amounts
//! - Greedy counts stay within one step of the next larger denomination
//! - Negative rejection

use chrono::NaiveDate;
use denomina_shared::CurrencyCode;
use proptest::prelude::*;

use super::catalog::CurrencyCatalog;
use super::conversion::to_base_currency;
use super::decomposition::DenominationLadder;
use super::error::CurrencyError;
use super::exchange::ExchangeRateTable;
use super::input::parse_amount;

fn rates() -> ExchangeRateTable {
    ExchangeRateTable::new(
        [
            (CurrencyCode::new("USD"), 1.0),
            (CurrencyCode::new("COP"), 3900.0),
            (CurrencyCode::new("MXN"), 18.4),
        ],
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
    )
}

fn ladder() -> DenominationLadder {
    DenominationLadder::from_catalog(&CurrencyCatalog::legacy_default())
}

/// Strategy to generate non-negative amounts with up to 4 decimals.
fn non_negative_amount() -> impl Strategy<Value = f64> {
    (0u64..10_000_000_000u64).prop_map(|v| v as f64 / 10_000.0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Converting the base currency to itself returns the amount untouched.
    #[test]
    fn prop_base_currency_identity(amount in non_negative_amount()) {
        let usd = CurrencyCode::new("USD");
        let result = to_base_currency(amount, &usd, &rates(), &usd).unwrap();
        prop_assert_eq!(result.to_bits(), amount.to_bits());
    }

    /// Whole base amounts decompose with nothing left over.
    #[test]
    fn prop_integral_amounts_are_exact(amount in 0u32..10_000_000u32) {
        let amount = f64::from(amount);
        let ladder = ladder();
        let result = ladder.decompose(amount).unwrap();
        prop_assert!(result.remainder().abs() < f64::EPSILON);
        prop_assert!((ladder.value_of(&result) - amount).abs() < f64::EPSILON);
    }

    /// Below the largest tier, a greedy count never reaches the ratio to the
    /// next larger denomination.
    #[test]
    fn prop_greedy_counts_bounded(amount in non_negative_amount()) {
        let result = ladder().decompose(amount).unwrap();
        let counts: Vec<u64> = result.iter().map(|(_, n)| n).collect();
        // [silksong, balatro, gansito] = [20, 10, 1]
        prop_assert!(counts[1] < 2);
        prop_assert!(counts[2] < 10);
    }

    /// Every denomination appears in the result.
    #[test]
    fn prop_all_denominations_present(amount in non_negative_amount()) {
        let result = ladder().decompose(amount).unwrap();
        prop_assert_eq!(result.iter().count(), 3);
    }

    /// Leftover is always smaller than the smallest denomination.
    #[test]
    fn prop_remainder_below_smallest(amount in non_negative_amount()) {
        let ladder = ladder();
        let result = ladder.decompose(amount).unwrap();
        let smallest = ladder.smallest_value().unwrap();
        prop_assert!(result.remainder() >= 0.0);
        prop_assert!(result.remainder() < smallest);
    }

    /// Negative amounts are rejected by both layers.
    #[test]
    fn prop_negative_rejected(amount in 1u64..1_000_000u64) {
        let amount = -(amount as f64);
        let usd = CurrencyCode::new("USD");
        prop_assert_eq!(
            to_base_currency(amount, &CurrencyCode::new("COP"), &rates(), &usd),
            Err(CurrencyError::NegativeAmount(amount))
        );
        prop_assert_eq!(ladder().decompose(amount), Err(CurrencyError::NegativeAmount(amount)));
    }

    /// The sanitizer never hands the engine a negative amount.
    #[test]
    fn prop_parse_amount_never_negative(input in "\\PC*") {
        let parsed = parse_amount(&input);
        prop_assert!(parsed >= 0.0 || parsed.is_nan());
    }
}
