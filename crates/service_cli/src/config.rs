//! CLI configuration management
//!
//! Simulation settings are layered from four sources. Priority, highest first:
//! 1. CLI flags
//! 2. `SIMCTL_*` environment variables
//! 3. Config file (`[simulation]` table)
//! 4. Library defaults
//!
//! ```toml
//! log_level = "debug"
//!
//! [simulation]
//! n_simulations = 400000
//! batch_size = 2000
//! precision = "f64"
//! seed = 7
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use sim_core::Precision;
use sim_engine::config::SimulationConfig;

use crate::{CliError, Result};

/// Prefix shared by every environment override.
pub const ENV_PREFIX: &str = "SIMCTL_";

/// Log levels accepted by `--log-level` and the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(CliError::InvalidArgument(format!(
                "log level '{}': must be one of trace, debug, info, warn, error",
                s
            ))),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = CliError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
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

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

/// Contents of a `simctl` TOML config file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Log level used when neither `--log-level` nor `RUST_LOG` is set
    pub log_level: Option<LogLevel>,
    /// Simulation overrides
    pub simulation: SimulationSettings,
}

impl FileConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| CliError::ConfigFile(format!("Failed to parse TOML: {}", e)))
    }
}

/// Partial simulation settings; `None` means "not set at this layer".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationSettings {
    pub n_simulations: Option<usize>,
    pub batch_size: Option<usize>,
    pub n_variables: Option<usize>,
    pub confidence_level: Option<f64>,
    pub memory_limit_bytes: Option<usize>,
    pub precision: Option<Precision>,
    pub seed: Option<u64>,
    pub cache_size: Option<usize>,
    pub max_workers: Option<usize>,
    pub log_interval: Option<usize>,
}

impl SimulationSettings {
    /// Load overrides from `SIMCTL_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load overrides through an arbitrary variable lookup.
    ///
    /// Variable names are `SIMCTL_` followed by the upper-cased field name,
    /// e.g. `SIMCTL_N_SIMULATIONS` or `SIMCTL_PRECISION`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            n_simulations: parse_var(&lookup, "N_SIMULATIONS")?,
            batch_size: parse_var(&lookup, "BATCH_SIZE")?,
            n_variables: parse_var(&lookup, "N_VARIABLES")?,
            confidence_level: parse_var(&lookup, "CONFIDENCE_LEVEL")?,
            memory_limit_bytes: parse_var(&lookup, "MEMORY_LIMIT_BYTES")?,
            precision: parse_var(&lookup, "PRECISION")?,
            seed: parse_var(&lookup, "SEED")?,
            cache_size: parse_var(&lookup, "CACHE_SIZE")?,
            max_workers: parse_var(&lookup, "MAX_WORKERS")?,
            log_interval: parse_var(&lookup, "LOG_INTERVAL")?,
        })
    }

    /// Overlay `other` on top of `self` (values set in `other` win)
    pub fn merge(mut self, other: &SimulationSettings) -> Self {
        self.n_simulations = other.n_simulations.or(self.n_simulations);
        self.batch_size = other.batch_size.or(self.batch_size);
        self.n_variables = other.n_variables.or(self.n_variables);
        self.confidence_level = other.confidence_level.or(self.confidence_level);
        self.memory_limit_bytes = other.memory_limit_bytes.or(self.memory_limit_bytes);
        self.precision = other.precision.or(self.precision);
        self.seed = other.seed.or(self.seed);
        self.cache_size = other.cache_size.or(self.cache_size);
        self.max_workers = other.max_workers.or(self.max_workers);
        self.log_interval = other.log_interval.or(self.log_interval);
        self
    }

    /// Build a validated engine configuration, defaulting unset fields
    pub fn to_config(&self) -> Result<SimulationConfig> {
        let mut builder = SimulationConfig::builder();
        if let Some(v) = self.n_simulations {
            builder = builder.n_simulations(v);
        }
        if let Some(v) = self.batch_size {
            builder = builder.batch_size(v);
        }
        if let Some(v) = self.n_variables {
            builder = builder.n_variables(v);
        }
        if let Some(v) = self.confidence_level {
            builder = builder.confidence_level(v);
        }
        if let Some(v) = self.memory_limit_bytes {
            builder = builder.memory_limit_bytes(v);
        }
        if let Some(v) = self.precision {
            builder = builder.precision(v);
        }
        if let Some(v) = self.seed {
            builder = builder.seed(v);
        }
        if let Some(v) = self.cache_size {
            builder = builder.cache_size(v);
        }
        if let Some(v) = self.max_workers {
            builder = builder.max_workers(v);
        }
        if let Some(v) = self.log_interval {
            builder = builder.log_interval(v);
        }
        Ok(builder.build()?)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let name = format!("{}{}", ENV_PREFIX, key);
    match lookup(&name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| CliError::InvalidEnv { name, value }),
        None => Ok(None),
    }
}

/// Build the effective simulation configuration from all sources
pub fn build_config(
    file: &SimulationSettings,
    env: &SimulationSettings,
    cli: &SimulationSettings,
) -> Result<SimulationConfig> {
    file.clone().merge(env).merge(cli).to_config()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_engine::config::{DEFAULT_BATCH_SIZE, DEFAULT_SEED};
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str(" Info ").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("verbose").is_err());
        assert_eq!(LogLevel::Warn.to_string(), "warn");
    }

    #[test]
    fn test_file_config_parsing() {
        let config = FileConfig::from_toml(
            r#"
            log_level = "debug"

            [simulation]
            n_simulations = 20000
            batch_size = 500
            precision = "f64"
            seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, Some(LogLevel::Debug));
        assert_eq!(config.simulation.n_simulations, Some(20_000));
        assert_eq!(config.simulation.batch_size, Some(500));
        assert_eq!(config.simulation.precision, Some(Precision::Double));
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.simulation.cache_size, None);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(FileConfig::from_toml("").unwrap(), FileConfig::default());
    }

    #[test]
    fn test_file_config_rejects_bad_values() {
        assert!(matches!(
            FileConfig::from_toml("[simulation]\nprecision = \"f16\""),
            Err(CliError::ConfigFile(_))
        ));
        assert!(matches!(
            FileConfig::from_toml("[simulation]\nbatch = 10"),
            Err(CliError::ConfigFile(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = FileConfig::from_file(Path::new("/nonexistent/simctl.toml"));
        assert!(matches!(result, Err(CliError::FileNotFound(_))));
    }

    #[test]
    fn test_env_overrides() {
        let settings = SimulationSettings::from_lookup(lookup(&[
            ("SIMCTL_N_SIMULATIONS", "50000"),
            ("SIMCTL_PRECISION", "double"),
            ("SIMCTL_MAX_WORKERS", " 2 "),
        ]))
        .unwrap();

        assert_eq!(settings.n_simulations, Some(50_000));
        assert_eq!(settings.precision, Some(Precision::Double));
        assert_eq!(settings.max_workers, Some(2));
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_env_invalid_value() {
        let result = SimulationSettings::from_lookup(lookup(&[("SIMCTL_SEED", "abc")]));
        match result {
            Err(CliError::InvalidEnv { name, value }) => {
                assert_eq!(name, "SIMCTL_SEED");
                assert_eq!(value, "abc");
            }
            other => panic!("expected InvalidEnv, got {:?}", other),
        }
    }

    #[test]
    fn test_layer_priority() {
        let file = SimulationSettings {
            n_simulations: Some(10_000),
            batch_size: Some(500),
            seed: Some(1),
            ..Default::default()
        };
        let env = SimulationSettings {
            batch_size: Some(250),
            seed: Some(2),
            ..Default::default()
        };
        let cli = SimulationSettings {
            seed: Some(3),
            ..Default::default()
        };

        let config = build_config(&file, &env, &cli).unwrap();
        assert_eq!(config.n_simulations(), 10_000);
        assert_eq!(config.batch_size(), 250);
        assert_eq!(config.seed(), 3);
    }

    #[test]
    fn test_unset_fields_use_defaults() {
        let config = SimulationSettings::default().to_config().unwrap();
        assert_eq!(config.batch_size(), DEFAULT_BATCH_SIZE);
        assert_eq!(config.seed(), DEFAULT_SEED);
        assert_eq!(config.precision(), Precision::Single);
    }

    #[test]
    fn test_invalid_merged_config() {
        let cli = SimulationSettings {
            n_simulations: Some(100),
            batch_size: Some(1_000),
            ..Default::default()
        };
        let none = SimulationSettings::default();
        let result = build_config(&none, &none, &cli);
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
