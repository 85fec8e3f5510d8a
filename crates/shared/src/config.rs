//! Application configuration management.

use serde::Deserialize;

use crate::types::CurrencyCode;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Currency catalog configuration.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Conversion defaults.
    #[serde(default)]
    pub conversion: ConversionConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the currency catalog document is read from.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// Path to a catalog JSON document. The bundled catalog is used when unset.
    pub path: Option<String>,
}

/// Conversion defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversionConfig {
    /// Base currency used when the catalog does not flag one.
    #[serde(default = "default_base_currency")]
    pub default_base_currency: CurrencyCode,
    /// Currency assumed when a request does not name one.
    #[serde(default = "default_currency")]
    pub default_currency: CurrencyCode,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            default_base_currency: default_base_currency(),
            default_currency: default_currency(),
        }
    }
}

fn default_base_currency() -> CurrencyCode {
    CurrencyCode::new("USD")
}

fn default_currency() -> CurrencyCode {
    CurrencyCode::new("USD")
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "denomina=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("DENOMINA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
