//! Configuration module for the player orders service.
//!
//! Loads a YAML file, interpolates environment variables and validates the
//! result before anything is wired.
//!
//! # Usage
//!
//! ```rust,ignore
//! use player_orders::config::load_config;
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! println!("HTTP port: {}", config.server.http_port);
//! ```

mod budget;
mod observability;
mod risk_intel;
mod server;
mod validation;

use std::net::SocketAddr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use budget::{BudgetConfig, EscrowMultipliers, GuaranteesConfig, InsuranceRates};
pub use observability::{LoggingConfig, MetricsSettings, ObservabilityConfig};
pub use risk_intel::RiskIntelConfig;
pub use server::ServerConfig;
pub use validation::{SourceConfig, ValidationConfig};

/// Maximum supported decimal places.
pub const MAX_MINOR_UNITS: u32 = 8;

/// Largest escrow multiplier a policy may use.
pub const MAX_ESCROW_MULTIPLIER: Decimal = dec!(10);

/// Permitted commission range.
pub const COMMISSION_RANGE: (Decimal, Decimal) = (dec!(0.05), dec!(0.12));

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),

    /// Environment interpolation could not run.
    #[error("Environment interpolation failed: {0}")]
    Interpolation(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Budget engine configuration.
    #[serde(default)]
    pub budget: BudgetConfig,
    /// Guarantee pricing configuration.
    #[serde(default)]
    pub guarantees: GuaranteesConfig,
    /// Validation fan-out configuration.
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Risk intel and market index configuration.
    #[serde(default)]
    pub risk_intel: RiskIntelConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml)?;
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

static ENV_VAR_REGEX: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}"));

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax. Unset or empty
/// variables without a default become the empty string.
fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let re = ENV_VAR_REGEX
        .as_ref()
        .map_err(|e| ConfigError::Interpolation(e.to_string()))?;

    let interpolated = re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    });
    Ok(interpolated.into_owned())
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError(message.into())
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.http_port == 0 {
        return Err(invalid("server.http_port must be non-zero"));
    }

    let budget = &config.budget;
    if budget.currency.trim().is_empty() {
        return Err(invalid("budget.currency must not be empty"));
    }
    if budget.minor_units > MAX_MINOR_UNITS {
        return Err(invalid(format!(
            "budget.minor_units must be between 0 and {MAX_MINOR_UNITS}"
        )));
    }
    let (min_rate, max_rate) = COMMISSION_RANGE;
    if budget.commission_rate < min_rate || budget.commission_rate > max_rate {
        return Err(invalid(format!(
            "budget.commission_rate must be between {min_rate} and {max_rate}"
        )));
    }

    let escrow = &config.guarantees.escrow;
    for (name, multiplier) in [
        ("standard", escrow.standard),
        ("extended", escrow.extended),
        ("premium", escrow.premium),
    ] {
        if multiplier < Decimal::ONE || multiplier > MAX_ESCROW_MULTIPLIER {
            return Err(invalid(format!(
                "guarantees.escrow.{name} must be between 1 and {MAX_ESCROW_MULTIPLIER}"
            )));
        }
    }
    let insurance = &config.guarantees.insurance;
    for (name, rate) in [
        ("basic", insurance.basic),
        ("extended", insurance.extended),
        ("premium", insurance.premium),
    ] {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(invalid(format!(
                "guarantees.insurance.{name} must be between 0 and 1"
            )));
        }
    }

    let validation = &config.validation;
    if validation.source_timeout_ms == 0 {
        return Err(invalid("validation.source_timeout_ms must be positive"));
    }
    for (source, settings) in &validation.sources {
        if settings.timeout_ms == Some(0) {
            return Err(invalid(format!(
                "validation.sources.{source}.timeout_ms must be positive"
            )));
        }
        if settings
            .endpoint
            .as_deref()
            .is_some_and(|e| e.trim().is_empty())
        {
            return Err(invalid(format!(
                "validation.sources.{source}.endpoint must not be empty"
            )));
        }
    }

    let risk_intel = &config.risk_intel;
    if risk_intel.default_market_index <= Decimal::ZERO {
        return Err(invalid("risk_intel.default_market_index must be positive"));
    }
    if let Some((code, _)) = risk_intel
        .market_index_overrides
        .iter()
        .find(|(_, index)| **index <= Decimal::ZERO)
    {
        return Err(invalid(format!(
            "risk_intel.market_index_overrides.{code} must be positive"
        )));
    }

    let logging = &config.observability.logging;
    if !LOG_LEVELS.contains(&logging.level.to_ascii_lowercase().as_str()) {
        return Err(invalid(format!(
            "observability.logging.level must be one of: {LOG_LEVELS:?}"
        )));
    }
    let metrics = &config.observability.metrics;
    if metrics.enabled && metrics.listen_address.parse::<SocketAddr>().is_err() {
        return Err(invalid(
            "observability.metrics.listen_address must be a socket address",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_validation::ValidationSource;
    use crate::domain::player_order::TemplateCode;
    use crate::observability::LogFormat;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.http_port, 8087);
        assert_eq!(config.budget.currency, "eddies");
        assert_eq!(config.budget.minor_units, 2);
        assert_eq!(config.budget.commission_rate, dec!(0.08));
        assert_eq!(config.validation.source_timeout_ms, 3000);
        assert!(!config.validation.allow_static_sources);
        assert_eq!(config.risk_intel.default_market_index, Decimal::TEN);
        assert_eq!(config.observability.logging.format, LogFormat::Json);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_empty_config_uses_defaults() {
        let config = load_config_from_string("{}").unwrap();
        assert_eq!(config.server.http_port, 8087);
    }

    #[test]
    fn test_load_full_config() {
        let yaml = r#"
server:
  http_port: 9100
budget:
  currency: "credits"
  minor_units: 0
  commission_rate: "0.1"
guarantees:
  escrow:
    premium: "1.5"
validation:
  source_timeout_ms: 1500
  allow_static_sources: true
  sources:
    economy:
      endpoint: "http://economy:8080/validate"
      timeout_ms: 500
risk_intel:
  illegal_zones: ["pacifica"]
  hostile_factions:
    watson: ["maelstrom", "tyger-claws"]
  market_index_overrides:
    hacker: "14"
observability:
  logging:
    level: debug
    format: pretty
"#;
        let config = load_config_from_string(yaml).unwrap();
        assert_eq!(config.server.http_port, 9100);
        assert_eq!(config.budget.minor_units, 0);
        assert_eq!(config.guarantees.escrow.premium, dec!(1.5));
        assert_eq!(config.guarantees.escrow.standard, dec!(1.00));
        assert_eq!(
            config.validation.timeout_for(ValidationSource::Economy),
            Some(Duration::from_millis(500))
        );
        assert_eq!(config.validation.timeout_for(ValidationSource::World), None);
        assert_eq!(
            config.validation.endpoint_for(ValidationSource::Economy),
            Some("http://economy:8080/validate")
        );
        assert_eq!(config.risk_intel.hostile_factions["watson"].len(), 2);
        assert_eq!(
            config.risk_intel.market_index_overrides[&TemplateCode::Hacker],
            dec!(14)
        );
        assert_eq!(config.observability.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_escrow_multiplier_above_limit_rejected() {
        let err = load_config_from_string("guarantees:\n  escrow:\n    premium: \"10.01\"\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(ref m) if m.contains("premium")));
        assert!(load_config_from_string("guarantees:\n  escrow:\n    premium: \"10\"\n").is_ok());
    }

    #[test]
    fn test_commission_outside_range_rejected() {
        let err = load_config_from_string("budget:\n  commission_rate: \"0.2\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_minor_units_above_max_rejected() {
        let err = load_config_from_string("budget:\n  minor_units: 9\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let yaml = "validation:\n  sources:\n    world:\n      timeout_ms: 0\n";
        let err = load_config_from_string(yaml).unwrap_err();
        assert!(err.to_string().contains("world"));
    }

    #[test]
    fn test_escrow_below_one_rejected() {
        let yaml = "guarantees:\n  escrow:\n    standard: \"0.9\"\n";
        assert!(load_config_from_string(yaml).is_err());
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let yaml = "observability:\n  logging:\n    level: loud\n";
        assert!(load_config_from_string(yaml).is_err());
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        let input = "port: ${PLAYER_ORDERS_CONFIG_TEST_NONEXISTENT_VAR:-8087}";
        assert_eq!(interpolate_env_vars(input).unwrap(), "port: 8087");
    }

    #[test]
    fn test_env_var_without_default_when_missing() {
        let input = "endpoint: \"${PLAYER_ORDERS_CONFIG_TEST_OTHER_MISSING_VAR}\"";
        assert_eq!(interpolate_env_vars(input).unwrap(), "endpoint: \"\"");
    }

    #[test]
    fn test_env_var_from_path_variable() {
        // PATH is set in every test environment
        let result = interpolate_env_vars("path: ${PATH}").unwrap();
        assert!(!result.contains("${PATH}"));
        assert!(result.len() > "path: ".len());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  http_port: 9200").unwrap();
        let config = load_config(file.path().to_str()).unwrap();
        assert_eq!(config.server.http_port, 9200);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        let err = load_config(path.to_str()).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn test_shipped_config_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.yaml");
        let config = load_config(Some(path)).unwrap();
        assert_eq!(config.budget.currency, "eddies");
        assert_eq!(config.risk_intel.illegal_zones, vec!["pacifica".to_string()]);
        assert_eq!(
            config.validation.timeout_for(ValidationSource::World),
            Some(Duration::from_millis(2000))
        );
    }
}
