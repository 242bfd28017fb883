//! CLI configuration management
//!
//! Handles loading configuration from a TOML file, `TXO_*` environment
//! variables and command-line flags.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use txo_chart::ChartConfig;
use txo_core::{ContractSpec, CurveConfig, MAX_CURVE_POINTS, TXO_MULTIPLIER};

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "txo.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid contract multiplier: {0}. Must be positive")]
    InvalidMultiplier(f64),

    #[error("Invalid curve grid: {0}")]
    InvalidCurve(String),

    #[error("Invalid chart size: {width}x{height}. Both dimensions must be non-zero")]
    InvalidChartSize { width: u32, height: u32 },

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Contract section of the config file
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Currency per index point per lot
    pub multiplier: f64,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            multiplier: TXO_MULTIPLIER,
        }
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Contract specification
    pub contract: ContractConfig,
    /// Payoff curve sampling grid
    pub curve: CurveConfig,
    /// Chart output
    pub chart: ChartConfig,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Apply `TXO_*` overrides from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Apply `TXO_*` overrides from an arbitrary lookup
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("TXO_MULTIPLIER") {
            self.contract.multiplier = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("TXO_MULTIPLIER={}", raw)))?;
        }

        if let Some(level) = lookup("TXO_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }

        if let Some(output) = lookup("TXO_CHART_OUTPUT") {
            self.chart.output = PathBuf::from(output);
        }

        if let Some(font) = lookup("TXO_FONT_PATH") {
            self.chart.font_path = Some(PathBuf::from(font));
        }

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let multiplier = self.contract.multiplier;
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(ConfigError::InvalidMultiplier(multiplier));
        }

        let curve = &self.curve;
        if !curve.half_range.is_finite() || curve.half_range < 0.0 {
            return Err(ConfigError::InvalidCurve(format!(
                "half_range must be non-negative, got {}",
                curve.half_range
            )));
        }
        if !curve.step.is_finite() || curve.step <= 0.0 {
            return Err(ConfigError::InvalidCurve(format!(
                "step must be positive, got {}",
                curve.step
            )));
        }
        if curve.exceeds_limit() {
            return Err(ConfigError::InvalidCurve(format!(
                "half_range {} with step {} exceeds {} points",
                curve.half_range, curve.step, MAX_CURVE_POINTS
            )));
        }

        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(ConfigError::InvalidChartSize {
                width: self.chart.width,
                height: self.chart.height,
            });
        }

        Ok(())
    }

    /// Contract specification for the payoff model
    pub fn contract_spec(&self) -> Result<ContractSpec, ConfigError> {
        ContractSpec::new(self.contract.multiplier)
            .map_err(|_| ConfigError::InvalidMultiplier(self.contract.multiplier))
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) {
        if let Some(output) = &cli.output {
            self.chart.output = output.clone();
        }
        if let Some(half_range) = cli.half_range {
            self.curve.half_range = half_range;
        }
        if let Some(step) = cli.step {
            self.curve.step = step;
        }
        if cli.verbose {
            self.log_level = LogLevel::Debug;
        }
    }
}

/// Configuration-relevant CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Explicit config file path
    pub config_file: Option<PathBuf>,
    /// Chart destination override
    pub output: Option<PathBuf>,
    /// Curve half-range override
    pub half_range: Option<f64>,
    /// Curve step override
    pub step: Option<f64>,
    /// Force debug logging
    pub verbose: bool,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file (`--config`, else `txo.toml` if present)
/// 4. Default values
pub fn build_config(cli: &CliOverrides) -> Result<AppConfig, ConfigError> {
    let mut config = match &cli.config_file {
        Some(path) if !path.exists() => {
            return Err(ConfigError::FileError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        Some(path) => AppConfig::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            AppConfig::from_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => AppConfig::default(),
    };

    config.apply_env()?;
    config.merge_with_cli(cli);

    // Final validation
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.contract.multiplier, 50.0);
        assert_eq!(config.curve, CurveConfig::default());
        assert_eq!(config.chart.output, PathBuf::from("txo_profit_curve.png"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("warn").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("loud").is_err());
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(format!("{}", LogLevel::Warn), "warn");
        assert_eq!(format!("{}", LogLevel::Debug), "debug");
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            log_level = "info"

            [contract]
            multiplier = 200.0

            [curve]
            half_range = 500.0
            step = 25.0

            [chart]
            output = "charts/curve.svg"
            width = 800
            height = 480
            font_path = "/opt/fonts/Sans.ttf"
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.contract.multiplier, 200.0);
        assert_eq!(config.curve.half_range, 500.0);
        assert_eq!(config.curve.step, 25.0);
        assert_eq!(config.chart.output, PathBuf::from("charts/curve.svg"));
        assert_eq!((config.chart.width, config.chart.height), (800, 480));
        assert_eq!(
            config.chart.font_path,
            Some(PathBuf::from("/opt/fonts/Sans.ttf"))
        );
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let toml_str = r#"
            [curve]
            step = 5.0
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        // Should use defaults for unspecified fields
        assert_eq!(config.curve.half_range, 800.0);
        assert_eq!(config.curve.step, 5.0);
        assert_eq!(config.contract.multiplier, 50.0);
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_invalid_log_level_in_toml() {
        let result: Result<AppConfig, _> = toml::from_str(r#"log_level = "chatty""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate() {
        let mut config = AppConfig::default();
        config.contract.multiplier = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMultiplier(_))
        ));

        let mut config = AppConfig::default();
        config.curve.step = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidCurve(_))));

        let mut config = AppConfig::default();
        config.curve.half_range = -10.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidCurve(_))));

        let mut config = AppConfig::default();
        config.curve.half_range = 1e8;
        config.curve.step = 0.01;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidCurve(_))));

        let mut config = AppConfig::default();
        config.chart.width = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidChartSize { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("TXO_MULTIPLIER", "10"),
            ("TXO_LOG_LEVEL", "error"),
            ("TXO_CHART_OUTPUT", "/tmp/out.png"),
            ("TXO_FONT_PATH", "/tmp/font.ttf"),
        ]);
        let mut config = AppConfig::default();
        config
            .apply_env_with(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.contract.multiplier, 10.0);
        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.chart.output, PathBuf::from("/tmp/out.png"));
        assert_eq!(config.chart.font_path, Some(PathBuf::from("/tmp/font.ttf")));
    }

    #[test]
    fn test_bad_env_multiplier() {
        let mut config = AppConfig::default();
        let result = config.apply_env_with(|key| {
            (key == "TXO_MULTIPLIER").then(|| "fifty".to_string())
        });
        assert!(matches!(result, Err(ConfigError::EnvError(_))));
    }

    #[test]
    fn test_cli_merge() {
        let mut config = AppConfig::default();
        let cli = CliOverrides {
            output: Some(PathBuf::from("mine.svg")),
            half_range: Some(300.0),
            step: Some(50.0),
            verbose: true,
            config_file: None,
        };

        config.merge_with_cli(&cli);

        assert_eq!(config.chart.output, PathBuf::from("mine.svg"));
        assert_eq!(config.curve.half_range, 300.0);
        assert_eq!(config.curve.step, 50.0);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("txo.toml");
        std::fs::write(&path, "[contract]\nmultiplier = 100.0\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.contract_spec().unwrap().multiplier(), 100.0);

        std::fs::write(&path, "[curve]\nstep = -1.0\n").unwrap();
        assert!(AppConfig::from_file(&path).is_err());

        std::fs::write(&path, "not = [valid").unwrap();
        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_oversized_grid_from_cli_is_rejected() {
        let mut config = AppConfig::default();
        config.merge_with_cli(&CliOverrides {
            half_range: Some(1e300),
            step: Some(1e-300),
            ..Default::default()
        });
        assert!(matches!(config.validate(), Err(ConfigError::InvalidCurve(_))));
    }

    #[test]
    fn test_missing_explicit_config_file() {
        let cli = CliOverrides {
            config_file: Some(PathBuf::from("/definitely/not/txo.toml")),
            ..Default::default()
        };
        assert!(matches!(build_config(&cli), Err(ConfigError::FileError(_))));
    }
}
