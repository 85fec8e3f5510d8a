//! Denomina command-line converter.
//!
//! Converts an amount of a real currency into fictional denominations.
//!
//! Usage: denomina 3900 COP

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use denomina_core::currency::{
    BreakdownLine, ConversionOutcome, CurrencyCatalog, CurrencyService, ExchangeRateTable,
    FixedRates, RateSource, format_monetary, is_valid_amount, parse_amount,
};
use denomina_shared::{AppConfig, AppError, CurrencyCode};

/// Convert real currency amounts into fictional denominations.
#[derive(Debug, Parser)]
#[command(name = "denomina", version, about)]
struct Cli {
    /// Amount to convert (e.g. `3900` or `18.40`).
    amount: Option<String>,

    /// Currency the amount is given in. Defaults to the configured currency.
    currency: Option<String>,

    /// Catalog document to use instead of the configured or bundled one.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Rate table document (`{"USD": 1, "COP": 3900, "lastUpdated": "2025-01-15"}`).
    #[arg(long, value_name = "FILE")]
    rates: Option<PathBuf>,

    /// Print the outcome as JSON.
    #[arg(long)]
    json: bool,

    /// List the real currencies of the catalog and exit.
    #[arg(long)]
    list_currencies: bool,

    /// List the fictional denominations of the catalog and exit.
    #[arg(long)]
    list_denominations: bool,
}

/// JSON document printed with `--json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    #[serde(flatten)]
    outcome: &'a ConversionOutcome,
    base_currency: &'a CurrencyCode,
    formatted: String,
    breakdown: Vec<BreakdownLine>,
    rates_last_updated: String,
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load();
    let filter = config
        .as_ref()
        .map_or_else(|_| AppConfig::default().logging.filter, |c| c.logging.filter.clone());

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let result = config
        .map_err(|e| anyhow::Error::from(AppError::Configuration(e.to_string())))
        .and_then(|config| run(&cli, &config));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e.downcast_ref::<AppError>().map_or(1, AppError::exit_code);
            error!(error = %e, "Conversion failed");
            eprintln!("error: {e:#}");
            if e.downcast_ref::<AppError>().is_some_and(AppError::is_retryable) {
                eprintln!("hint: the exchange rates may be temporarily unavailable, try again");
            }
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(cli: &Cli, config: &AppConfig) -> anyhow::Result<()> {
    let catalog_path = cli
        .config
        .as_deref()
        .or_else(|| config.catalog.path.as_deref().map(Path::new));
    let catalog = load_catalog(catalog_path);
    let service = CurrencyService::new(catalog, &config.conversion.default_base_currency);

    if cli.list_currencies {
        for currency in service.catalog().real_currencies() {
            let base = if currency.is_base { " (base)" } else { "" };
            println!(
                "{} {} {}{base}",
                currency.visual_tag, currency.code, currency.display_name
            );
        }
        return Ok(());
    }

    if cli.list_denominations {
        for denomination in service.catalog().fictional_denominations() {
            println!(
                "{} {} = {}",
                denomination.icon,
                denomination.singular_name,
                format_monetary(denomination.base_unit_value, service.base_currency_code())
            );
        }
        return Ok(());
    }

    let raw_amount = cli
        .amount
        .as_deref()
        .ok_or_else(|| AppError::Validation("an amount is required".to_string()))?;
    if !is_valid_amount(raw_amount) {
        return Err(AppError::Validation(format!(
            "amount must be a non-negative number, got `{raw_amount}`"
        ))
        .into());
    }
    let amount = parse_amount(raw_amount);

    let currency = match cli.currency.as_deref() {
        Some(code) => CurrencyCode::from_str(code)?,
        None => config.conversion.default_currency.clone(),
    };
    if service.catalog().real_currency(&currency).is_none() {
        return Err(AppError::NotFound(format!("currency {currency} is not in the catalog")).into());
    }

    let rates = load_rates(cli.rates.as_deref())?;
    let outcome = service
        .convert(amount, &currency, &rates)
        .map_err(AppError::from)?;
    info!(
        amount,
        currency = %currency,
        base_equivalent = outcome.base_currency_equivalent,
        "Conversion complete"
    );

    if cli.json {
        let report = Report {
            outcome: &outcome,
            base_currency: service.base_currency_code(),
            formatted: service.format(&outcome),
            breakdown: service.breakdown(&outcome),
            rates_last_updated: rates.last_updated().to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if let Some(line) = base_equivalent_line(&outcome, service.base_currency_code()) {
            println!("{line}");
        }
        println!("{}", service.format(&outcome));
    }

    Ok(())
}

/// `"MX$1,000.00 = $54.35"`, or nothing when the amount is already in base currency.
fn base_equivalent_line(outcome: &ConversionOutcome, base: &CurrencyCode) -> Option<String> {
    if outcome.original_currency == *base {
        return None;
    }
    Some(format!(
        "{} = {}",
        format_monetary(outcome.original_amount, &outcome.original_currency),
        format_monetary(outcome.base_currency_equivalent, base)
    ))
}

/// Loads the catalog at `path`, falling back to the legacy tables if it is
/// unusable. Without a path the bundled catalog is used.
fn load_catalog(path: Option<&Path>) -> Arc<CurrencyCatalog> {
    let Some(path) = path else {
        return CurrencyCatalog::bundled();
    };
    match CurrencyCatalog::from_path(path) {
        Ok(catalog) => {
            info!(path = %path.display(), "Currency catalog loaded");
            Arc::new(catalog)
        }
        Err(e) => {
            warn!(error = %e, "Falling back to legacy currency tables");
            Arc::new(CurrencyCatalog::legacy_default())
        }
    }
}

/// Reads a rate table from `path`, or serves the fixed rates.
fn load_rates(path: Option<&Path>) -> anyhow::Result<ExchangeRateTable> {
    let Some(path) = path else {
        return Ok(FixedRates::today().latest().map_err(AppError::from)?);
    };
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AppError::RatesUnavailable(format!("{}: {e}", path.display())))?;
    let table = serde_json::from_str(&raw)
        .map_err(|e| AppError::RatesUnavailable(format!("{}: {e}", path.display())))
        .with_context(|| format!("reading rate table {}", path.display()))?;
    Ok(table)
}
