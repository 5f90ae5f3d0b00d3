//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Analysis engine configuration.
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum accepted request body (CSV uploads included), in bytes.
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_body_limit() -> usize {
    2 * 1024 * 1024
}

/// Analysis engine configuration.
///
/// Loaded once at startup. The driver table built from it is shared
/// read-only by every request.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Forecast (base) year. The budget year is the following one.
    #[serde(default = "default_base_year")]
    pub base_year: i32,
    /// Annual growth applied to the long-term plan after the budget year.
    #[serde(default = "default_trend_growth_rate")]
    pub trend_growth_rate: Decimal,
    /// Trend rounding mode: `stepwise` or `cumulative`.
    #[serde(default = "default_trend_rounding")]
    pub trend_rounding: String,
    /// Driver overrides. Empty means the reference driver table.
    #[serde(default)]
    pub drivers: Vec<DriverEntry>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            base_year: default_base_year(),
            trend_growth_rate: default_trend_growth_rate(),
            trend_rounding: default_trend_rounding(),
            drivers: Vec::new(),
        }
    }
}

fn default_base_year() -> i32 {
    2025
}

fn default_trend_growth_rate() -> Decimal {
    Decimal::new(3, 2) // 3% per year
}

fn default_trend_rounding() -> String {
    "stepwise".to_string()
}

/// A driver as written in configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DriverEntry {
    /// Category key the driver applies to.
    pub item: String,
    /// Multiplicative factor.
    pub factor: Decimal,
    /// Human-readable justification.
    #[serde(default)]
    pub justification: String,
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
            .add_source(config::Environment::with_prefix("OPTICAST").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
