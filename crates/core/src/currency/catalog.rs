//! Currency catalog: real currencies, fictional denominations and the
//! equivalence rules between denominations.
//!
//! A catalog is loaded once from a JSON document, validated, and then shared
//! read-only (usually behind an `Arc`) for the rest of the process.
//!
//! Load-time invariants:
//! - `realCurrencies`, `fictionalCurrencies` and `conversionRules` are present
//!   and non-empty
//! - exactly one real currency is flagged `isBase`
//! - every denomination value is finite and strictly positive
//!
//! Equivalence rates are stored as authored. They are NOT cross-checked against
//! denomination values; see [`CurrencyCatalog::equivalence_mismatches`].

use std::fmt;
use std::marker::PhantomData;
use std::path::Path;
use std::sync::Arc;

use denomina_shared::{CurrencyCode, DenominationCode};
use once_cell::sync::Lazy;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::CurrencyError;

/// Catalog compiled into the crate.
const BUNDLED_DOCUMENT: &str = include_str!("../../data/currencies.json");

/// Denomination used for the zero fallback when no rule flags a base unit.
pub const LEGACY_BASE_DENOMINATION: &str = "gansito";

static BUNDLED: Lazy<Arc<CurrencyCatalog>> = Lazy::new(|| {
    Arc::new(CurrencyCatalog::load_or(
        BUNDLED_DOCUMENT,
        CurrencyCatalog::legacy_default(),
    ))
});

/// A real-world currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealCurrencyConfig {
    /// Currency code (e.g. `USD`). Filled from the map key when omitted.
    #[serde(default)]
    pub code: CurrencyCode,
    /// Human readable name.
    #[serde(rename = "name", alias = "displayName")]
    pub display_name: String,
    /// Symbol shown next to amounts.
    #[serde(default, alias = "symbolPresentation")]
    pub symbol: String,
    /// Whether this is the base currency all rates normalize to.
    #[serde(rename = "isBase", alias = "isBaseCurrency", default)]
    pub is_base: bool,
    /// Visual tag (flag emoji) for display layers.
    #[serde(rename = "flag", alias = "visualTag", default)]
    pub visual_tag: String,
}

/// One tier of the fictional currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FictionalDenomination {
    /// Denomination code (e.g. `gansito`). Filled from the map key when omitted.
    #[serde(default)]
    pub code: DenominationCode,
    /// Name used for a count of exactly one.
    #[serde(rename = "name", alias = "singularName")]
    pub singular_name: String,
    /// Name used for any other count.
    #[serde(rename = "namePlural", alias = "pluralName")]
    pub plural_name: String,
    /// Icon shown next to counts.
    pub icon: String,
    /// Worth in base-currency units.
    #[serde(rename = "usdValue", alias = "baseUnitValue")]
    pub base_unit_value: f64,
    /// Position in display listings (ascending).
    #[serde(rename = "order", alias = "displayOrder", default)]
    pub display_order: u32,
}

impl FictionalDenomination {
    /// Name for the given count: singular for exactly one, plural otherwise.
    #[must_use]
    pub fn name_for(&self, count: u64) -> &str {
        if count == 1 {
            &self.singular_name
        } else {
            &self.plural_name
        }
    }
}

/// A declared ratio from one denomination to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equivalence {
    /// Target denomination.
    #[serde(rename = "unit", alias = "targetDenomination")]
    pub target: DenominationCode,
    /// How many `target` units one source unit is worth.
    pub rate: f64,
}

/// Equivalence rules for a denomination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRule {
    /// Marks the indivisible unit.
    #[serde(default)]
    pub base_unit: bool,
    /// Declared equivalences to other denominations.
    #[serde(default)]
    pub equivalences: Vec<Equivalence>,
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogMetadata {
    /// Document version.
    pub version: String,
    /// Date the document was last edited.
    pub last_updated: String,
    /// Free text description.
    pub description: String,
}

/// An equivalence rate that disagrees with the denomination values.
#[derive(Debug, Clone, PartialEq)]
pub struct EquivalenceMismatch {
    /// Denomination the rule belongs to.
    pub from: DenominationCode,
    /// Target of the equivalence.
    pub to: DenominationCode,
    /// Rate written in the rule.
    pub declared: f64,
    /// Rate implied by `from.base_unit_value / to.base_unit_value`.
    pub derived: f64,
}

/// The raw document shape.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogDocument {
    #[serde(default)]
    real_currencies: Option<OrderedEntries<RealCurrencyConfig>>,
    #[serde(default)]
    fictional_currencies: Option<OrderedEntries<FictionalDenomination>>,
    #[serde(default)]
    conversion_rules: Option<OrderedEntries<ConversionRule>>,
    #[serde(default)]
    metadata: CatalogMetadata,
}

/// A JSON object read as a list of `(key, value)` pairs in document order.
#[derive(Debug)]
struct OrderedEntries<T>(Vec<(String, T)>);

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OrderedEntries<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for EntriesVisitor<T> {
            type Value = OrderedEntries<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map keyed by code")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, T>()? {
                    if entries.iter().any(|(k, _)| *k == key) {
                        return Err(de::Error::custom(format!("duplicate key `{key}`")));
                    }
                    entries.push((key, value));
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

/// Validated, immutable currency catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyCatalog {
    real_currencies: Vec<RealCurrencyConfig>,
    /// Sorted ascending by `display_order`.
    denominations: Vec<FictionalDenomination>,
    rules: Vec<(DenominationCode, ConversionRule)>,
    metadata: CatalogMetadata,
}

/// Parses and validates a catalog document.
pub fn load_configuration(raw: &str) -> Result<CurrencyCatalog, CurrencyError> {
    CurrencyCatalog::from_json(raw)
}

impl CurrencyCatalog {
    /// Builds a catalog from already-parsed parts, enforcing the load-time invariants.
    pub fn from_parts(
        real_currencies: Vec<RealCurrencyConfig>,
        denominations: Vec<FictionalDenomination>,
        rules: Vec<(DenominationCode, ConversionRule)>,
        metadata: CatalogMetadata,
    ) -> Result<Self, CurrencyError> {
        if real_currencies.is_empty() {
            return Err(invalid("realCurrencies must contain at least one entry"));
        }
        if denominations.is_empty() {
            return Err(invalid("fictionalCurrencies must contain at least one entry"));
        }
        if rules.is_empty() {
            return Err(invalid("conversionRules must contain at least one entry"));
        }

        let base_count = real_currencies.iter().filter(|c| c.is_base).count();
        if base_count != 1 {
            return Err(invalid(format!(
                "exactly one real currency must be flagged isBase, found {base_count}"
            )));
        }

        if let Some(bad) = denominations
            .iter()
            .find(|d| !d.base_unit_value.is_finite() || d.base_unit_value <= 0.0)
        {
            return Err(invalid(format!(
                "denomination {} must have a positive value, got {}",
                bad.code, bad.base_unit_value
            )));
        }

        Ok(Self::assemble(real_currencies, denominations, rules, metadata))
    }

    /// Parses a JSON catalog document.
    pub fn from_json(raw: &str) -> Result<Self, CurrencyError> {
        let document: CatalogDocument = serde_json::from_str(raw)
            .map_err(|e| invalid(format!("malformed document: {e}")))?;
        Self::from_document(document)
    }

    /// Reads and parses a catalog document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CurrencyError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| invalid(format!("cannot read {}: {e}", path.display())))?;
        let catalog = Self::from_json(&raw)?;
        debug!(path = %path.display(), "Loaded currency catalog from file");
        Ok(catalog)
    }

    /// Parses `raw`, or returns `fallback` if it is not a valid catalog.
    #[must_use]
    pub fn load_or(raw: &str, fallback: Self) -> Self {
        match Self::from_json(raw) {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(error = %e, "Currency configuration unavailable, using fallback catalog");
                fallback
            }
        }
    }

    /// The catalog shipped with the crate, parsed at most once per process.
    ///
    /// Falls back to [`CurrencyCatalog::legacy_default`] if the bundled
    /// document cannot be loaded.
    #[must_use]
    pub fn bundled() -> Arc<Self> {
        Arc::clone(&BUNDLED)
    }

    /// The hardcoded legacy tables: USD/COP/MXN and gansito (1), balatro (10),
    /// silksong (20).
    #[must_use]
    pub fn legacy_default() -> Self {
        let real = |code: &str, name: &str, is_base: bool, flag: &str| RealCurrencyConfig {
            code: CurrencyCode::new(code),
            display_name: name.to_string(),
            symbol: "$".to_string(),
            is_base,
            visual_tag: flag.to_string(),
        };
        let denomination =
            |code: &str, name: &str, icon: &str, value: f64, order: u32| FictionalDenomination {
                code: DenominationCode::new(code),
                singular_name: name.to_string(),
                plural_name: format!("{name}s"),
                icon: icon.to_string(),
                base_unit_value: value,
                display_order: order,
            };
        let equivalence = |target: &str, rate: f64| Equivalence {
            target: DenominationCode::new(target),
            rate,
        };

        Self::assemble(
            vec![
                real("USD", "US Dollar", true, "🇺🇸"),
                real("COP", "Colombian Peso", false, "🇨🇴"),
                real("MXN", "Mexican Peso", false, "🇲🇽"),
            ],
            vec![
                denomination("silksong", "Silksong", "🕷️", 20.0, 1),
                denomination("balatro", "Balatro", "🤡", 10.0, 2),
                denomination("gansito", "Gansito", "🪿", 1.0, 3),
            ],
            vec![
                (
                    DenominationCode::new("gansito"),
                    ConversionRule {
                        base_unit: true,
                        equivalences: Vec::new(),
                    },
                ),
                (
                    DenominationCode::new("balatro"),
                    ConversionRule {
                        base_unit: false,
                        equivalences: vec![equivalence("gansito", 10.0)],
                    },
                ),
                (
                    DenominationCode::new("silksong"),
                    ConversionRule {
                        base_unit: false,
                        equivalences: vec![equivalence("balatro", 2.0), equivalence("gansito", 20.0)],
                    },
                ),
            ],
            CatalogMetadata {
                version: "legacy".to_string(),
                last_updated: String::new(),
                description: "Hardcoded fallback tables".to_string(),
            },
        )
    }

    fn from_document(document: CatalogDocument) -> Result<Self, CurrencyError> {
        let real = document
            .real_currencies
            .ok_or_else(|| invalid("missing realCurrencies"))?;
        let fictional = document
            .fictional_currencies
            .ok_or_else(|| invalid("missing fictionalCurrencies"))?;
        let rules = document
            .conversion_rules
            .ok_or_else(|| invalid("missing conversionRules"))?;

        let real_currencies = real
            .0
            .into_iter()
            .map(|(key, mut currency)| {
                let key = CurrencyCode::new(&key);
                if currency.code.is_empty() {
                    currency.code = key;
                } else if currency.code != key {
                    return Err(key_mismatch(&key, &currency.code));
                }
                Ok(currency)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let denominations = fictional
            .0
            .into_iter()
            .map(|(key, mut denomination)| {
                let key = DenominationCode::new(&key);
                if denomination.code.is_empty() {
                    denomination.code = key;
                } else if denomination.code != key {
                    return Err(key_mismatch(&key, &denomination.code));
                }
                Ok(denomination)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rules = rules
            .0
            .into_iter()
            .map(|(key, rule)| (DenominationCode::new(key), rule))
            .collect();

        let catalog = Self::from_parts(real_currencies, denominations, rules, document.metadata)?;
        debug!(
            real_currencies = catalog.real_currencies.len(),
            denominations = catalog.denominations.len(),
            version = %catalog.metadata.version,
            "Currency catalog loaded"
        );
        Ok(catalog)
    }

    fn assemble(
        real_currencies: Vec<RealCurrencyConfig>,
        mut denominations: Vec<FictionalDenomination>,
        rules: Vec<(DenominationCode, ConversionRule)>,
        metadata: CatalogMetadata,
    ) -> Self {
        // Stable: equal orders keep document order.
        denominations.sort_by_key(|d| d.display_order);
        Self {
            real_currencies,
            denominations,
            rules,
            metadata,
        }
    }

    /// Looks up a real currency.
    #[must_use]
    pub fn real_currency(&self, code: &CurrencyCode) -> Option<&RealCurrencyConfig> {
        self.real_currencies.iter().find(|c| c.code == *code)
    }

    /// All real currencies in document order.
    #[must_use]
    pub fn real_currencies(&self) -> &[RealCurrencyConfig] {
        &self.real_currencies
    }

    /// The real currency flagged `isBase`.
    #[must_use]
    pub fn base_currency(&self) -> Option<&RealCurrencyConfig> {
        self.real_currencies.iter().find(|c| c.is_base)
    }

    /// Code of the base currency, or `fallback` if none is flagged.
    #[must_use]
    pub fn base_currency_code_or(&self, fallback: &CurrencyCode) -> CurrencyCode {
        self.base_currency()
            .map_or_else(|| fallback.clone(), |c| c.code.clone())
    }

    /// Looks up a fictional denomination.
    #[must_use]
    pub fn fictional_denomination(&self, code: &DenominationCode) -> Option<&FictionalDenomination> {
        self.denominations.iter().find(|d| d.code == *code)
    }

    /// All fictional denominations, ascending by display order.
    #[must_use]
    pub fn fictional_denominations(&self) -> &[FictionalDenomination] {
        &self.denominations
    }

    /// Finds the denomination worth exactly `value` base units.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn fictional_denomination_by_value(&self, value: f64) -> Option<&FictionalDenomination> {
        self.denominations
            .iter()
            .find(|d| d.base_unit_value == value)
    }

    /// Equivalence rules for a denomination.
    #[must_use]
    pub fn conversion_rule(&self, code: &DenominationCode) -> Option<&ConversionRule> {
        self.rules.iter().find(|(c, _)| c == code).map(|(_, r)| r)
    }

    /// Code of the first rule flagged `baseUnit`.
    #[must_use]
    pub fn base_unit(&self) -> Option<&DenominationCode> {
        self.rules.iter().find(|(_, r)| r.base_unit).map(|(c, _)| c)
    }

    /// Declared rate from `from` to `to`, if the `from` rule lists one.
    #[must_use]
    pub fn equivalence_rate(&self, from: &DenominationCode, to: &DenominationCode) -> Option<f64> {
        self.conversion_rule(from)?
            .equivalences
            .iter()
            .find(|e| e.target == *to)
            .map(|e| e.rate)
    }

    /// The indivisible denomination used for the all-zero display.
    ///
    /// Smallest-valued denomination whose rule is flagged `baseUnit`, else the
    /// denomination coded [`LEGACY_BASE_DENOMINATION`].
    #[must_use]
    pub fn base_denomination(&self) -> Option<&FictionalDenomination> {
        self.denominations
            .iter()
            .filter(|d| self.conversion_rule(&d.code).is_some_and(|r| r.base_unit))
            .min_by(|a, b| a.base_unit_value.total_cmp(&b.base_unit_value))
            .or_else(|| {
                self.fictional_denomination(&DenominationCode::new(LEGACY_BASE_DENOMINATION))
            })
    }

    /// Document metadata.
    #[must_use]
    pub fn metadata(&self) -> &CatalogMetadata {
        &self.metadata
    }

    /// Equivalence rates that disagree with the denomination values.
    ///
    /// Diagnostic only: loading never rejects a catalog for these.
    #[must_use]
    pub fn equivalence_mismatches(&self) -> Vec<EquivalenceMismatch> {
        let mut mismatches = Vec::new();
        for (code, rule) in &self.rules {
            let Some(from) = self.fictional_denomination(code) else {
                continue;
            };
            for equivalence in &rule.equivalences {
                let Some(to) = self.fictional_denomination(&equivalence.target) else {
                    continue;
                };
                let derived = from.base_unit_value / to.base_unit_value;
                if (equivalence.rate - derived).abs() > 1e-9 * derived.abs().max(1.0) {
                    mismatches.push(EquivalenceMismatch {
                        from: from.code.clone(),
                        to: to.code.clone(),
                        declared: equivalence.rate,
                        derived,
                    });
                }
            }
        }
        mismatches
    }
}

fn invalid(message: impl Into<String>) -> CurrencyError {
    CurrencyError::InvalidConfiguration(message.into())
}

fn key_mismatch(key: &impl fmt::Display, code: &impl fmt::Display) -> CurrencyError {
    invalid(format!("entry keyed `{key}` declares code `{code}`"))
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "realCurrencies": {
            "USD": { "code": "USD", "name": "US Dollar", "symbol": "$", "isBase": true },
            "EUR": { "name": "Euro", "symbol": "€" }
        },
        "fictionalCurrencies": {
            "big": { "name": "Big", "namePlural": "Bigs", "icon": "B", "usdValue": 5, "order": 2 },
            "small": { "name": "Small", "namePlural": "Smalls", "icon": "s", "usdValue": 1, "order": 1 }
        },
        "conversionRules": {
            "small": { "baseUnit": true, "equivalences": [] },
            "big": { "equivalences": [{ "unit": "small", "rate": 5 }] }
        },
        "metadata": { "version": "2", "lastUpdated": "2025-02-01", "description": "test" }
    }"#;

    fn minimal() -> CurrencyCatalog {
        load_configuration(MINIMAL).unwrap()
    }

    #[test]
    fn test_bundled_catalog_loads() {
        let catalog = CurrencyCatalog::from_json(BUNDLED_DOCUMENT).unwrap();
        assert_eq!(catalog.real_currencies().len(), 3);
        assert_eq!(catalog.fictional_denominations().len(), 3);
        assert_eq!(catalog.base_currency().unwrap().code.as_str(), "USD");
        assert!(catalog.equivalence_mismatches().is_empty());
        assert_eq!(*CurrencyCatalog::bundled(), catalog);
    }

    #[test]
    fn test_legacy_default_is_valid() {
        let legacy = CurrencyCatalog::legacy_default();
        let revalidated = CurrencyCatalog::from_parts(
            legacy.real_currencies.clone(),
            legacy.denominations.clone(),
            legacy.rules.clone(),
            legacy.metadata.clone(),
        )
        .unwrap();
        assert_eq!(revalidated, legacy);
        assert!(legacy.equivalence_mismatches().is_empty());
        let values: Vec<f64> = legacy
            .fictional_denominations()
            .iter()
            .map(|d| d.base_unit_value)
            .collect();
        assert_eq!(values, vec![20.0, 10.0, 1.0]);
    }

    #[test]
    fn test_real_currencies_keep_document_order() {
        let catalog = minimal();
        let codes: Vec<&str> = catalog
            .real_currencies()
            .iter()
            .map(|c| c.code.as_str())
            .collect();
        assert_eq!(codes, vec!["USD", "EUR"]);
    }

    #[test]
    fn test_code_filled_from_key() {
        let catalog = minimal();
        let eur = catalog.real_currency(&CurrencyCode::new("eur")).unwrap();
        assert_eq!(eur.code.as_str(), "EUR");
        assert!(!eur.is_base);
        assert_eq!(eur.visual_tag, "");
    }

    #[test]
    fn test_denominations_sorted_by_display_order() {
        let catalog = minimal();
        let codes: Vec<&str> = catalog
            .fictional_denominations()
            .iter()
            .map(|d| d.code.as_str())
            .collect();
        assert_eq!(codes, vec!["small", "big"]);
    }

    #[test]
    fn test_lookups() {
        let catalog = minimal();
        let big = DenominationCode::new("big");
        let small = DenominationCode::new("small");

        assert_eq!(catalog.fictional_denomination(&big).unwrap().plural_name, "Bigs");
        assert!(catalog.fictional_denomination(&DenominationCode::new("nope")).is_none());
        assert_eq!(catalog.fictional_denomination_by_value(5.0).unwrap().code, big);
        assert!(catalog.fictional_denomination_by_value(3.0).is_none());
        assert_eq!(catalog.fictional_denomination_by_value(1.0).unwrap().code, small);
        // Exact match only: the nearest value below 1.0 is a different value.
        assert!(catalog.fictional_denomination_by_value(1.0 - f64::EPSILON / 2.0).is_none());
        assert!(catalog.conversion_rule(&small).unwrap().base_unit);
        assert_eq!(catalog.base_unit(), Some(&small));
        assert_eq!(catalog.equivalence_rate(&big, &small), Some(5.0));
        assert_eq!(catalog.equivalence_rate(&small, &big), None);
        assert_eq!(catalog.base_denomination().unwrap().code, small);
        assert_eq!(catalog.metadata().version, "2");
        assert_eq!(catalog.metadata().last_updated, "2025-02-01");
    }

    #[test]
    fn test_base_currency_code_or() {
        let catalog = minimal();
        assert_eq!(
            catalog.base_currency_code_or(&CurrencyCode::new("XXX")).as_str(),
            "USD"
        );
    }

    #[test]
    fn test_missing_collection_rejected() {
        let raw = r#"{ "realCurrencies": { "USD": { "name": "US Dollar", "isBase": true } },
                      "fictionalCurrencies": { "g": { "name": "G", "namePlural": "Gs", "icon": "g", "usdValue": 1 } } }"#;
        let err = load_configuration(raw).unwrap_err();
        assert_eq!(
            err,
            CurrencyError::InvalidConfiguration("missing conversionRules".into())
        );
    }

    #[test]
    fn test_empty_collection_rejected() {
        let raw = MINIMAL.replace(
            r#""conversionRules": {"#,
            r#""conversionRules": {}, "unused": {"#,
        );
        let err = load_configuration(&raw).unwrap_err();
        assert!(err.to_string().contains("conversionRules"), "{err}");
    }

    #[test]
    fn test_base_currency_must_be_unique() {
        let none = MINIMAL.replace(r#""isBase": true"#, r#""isBase": false"#);
        assert!(matches!(
            load_configuration(&none),
            Err(CurrencyError::InvalidConfiguration(_))
        ));

        let two = MINIMAL.replace(r#""symbol": "€""#, r#""symbol": "€", "isBase": true"#);
        let err = load_configuration(&two).unwrap_err();
        assert!(err.to_string().contains("found 2"), "{err}");
    }

    #[test]
    fn test_non_positive_value_rejected() {
        let raw = MINIMAL.replace(r#""usdValue": 5"#, r#""usdValue": 0"#);
        let err = load_configuration(&raw).unwrap_err();
        assert!(err.to_string().contains("big"), "{err}");
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            load_configuration("{ not json"),
            Err(CurrencyError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_key_code_mismatch_rejected() {
        let raw = MINIMAL.replace(r#""code": "USD""#, r#""code": "GBP""#);
        let err = load_configuration(&raw).unwrap_err();
        assert!(err.to_string().contains("GBP"), "{err}");
    }

    #[test]
    fn test_load_or_falls_back() {
        let catalog = CurrencyCatalog::load_or("{}", CurrencyCatalog::legacy_default());
        assert_eq!(catalog, CurrencyCatalog::legacy_default());
    }

    #[test]
    fn test_from_path_reports_missing_file() {
        let err = CurrencyCatalog::from_path("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"), "{err}");
    }

    #[test]
    fn test_equivalence_mismatch_reported_not_rejected() {
        let raw = MINIMAL.replace(r#""rate": 5"#, r#""rate": 4"#);
        let catalog = load_configuration(&raw).unwrap();
        let mismatches = catalog.equivalence_mismatches();
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].from.as_str(), "big");
        assert_eq!(mismatches[0].declared, 4.0);
        assert_eq!(mismatches[0].derived, 5.0);
        // The authored rate is kept as-is.
        assert_eq!(
            catalog.equivalence_rate(&DenominationCode::new("big"), &DenominationCode::new("small")),
            Some(4.0)
        );
    }

    #[test]
    fn test_base_denomination_falls_back_to_legacy_code() {
        let raw = r#"{
            "realCurrencies": { "USD": { "name": "US Dollar", "isBase": true } },
            "fictionalCurrencies": {
                "gansito": { "name": "Gansito", "namePlural": "Gansitos", "icon": "🪿", "usdValue": 1 }
            },
            "conversionRules": { "gansito": { "equivalences": [] } }
        }"#;
        let catalog = load_configuration(raw).unwrap();
        assert!(catalog.base_unit().is_none());
        assert_eq!(catalog.base_denomination().unwrap().code.as_str(), "gansito");
    }

    #[test]
    fn test_name_for() {
        let catalog = CurrencyCatalog::legacy_default();
        let gansito = catalog
            .fictional_denomination(&DenominationCode::new("gansito"))
            .unwrap();
        assert_eq!(gansito.name_for(1), "Gansito");
        assert_eq!(gansito.name_for(0), "Gansitos");
        assert_eq!(gansito.name_for(2), "Gansitos");
    }
}
