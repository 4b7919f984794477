//! Configuration for classification runs.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with FIDELIS_ prefix)
//!
//! Command-line flags override environment variables, which override the
//! file, which overrides the defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::classifier::PredictOptions;
use crate::estimator::EstimatorKind;

/// Complete run configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KernelConfig {
    /// Overlap estimator selection
    #[serde(default)]
    pub estimator: EstimatorConfig,

    /// Reference-subset sampling
    #[serde(default)]
    pub sampling: SamplingConfig,

    /// Parallelism and deadlines
    #[serde(default)]
    pub execution: ExecutionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Estimator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Estimator kind: "exact", "fast" or "circuit"
    #[serde(default = "default_estimator")]
    pub kind: String,
}

/// Sampling settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Draws per class; absent means the full class
    #[serde(default)]
    pub sample_count: Option<usize>,

    /// RNG seed; absent means OS entropy
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Execution settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Evaluate test queries in parallel
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// Per-query deadline in milliseconds
    #[serde(default)]
    pub query_timeout_ms: Option<u64>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: "full" or "compact"
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_estimator() -> String {
    "exact".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "full".to_string()
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            kind: default_estimator(),
        }
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            parallel: default_true(),
            query_timeout_ms: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl KernelConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.as_ref().display())))?;

        let config: KernelConfig = serde_yaml_ng::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration: file (or defaults), then environment, then validate.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => KernelConfig::default(),
        };

        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Merge process environment variables into this configuration.
    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Merge variables from `lookup` into this configuration.
    ///
    /// Only variables that are set override the current values. Numeric
    /// variables that fail to parse are ignored.
    pub fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("FIDELIS_ESTIMATOR") {
            self.estimator.kind = v;
        }

        // Sampling
        if let Some(v) = lookup("FIDELIS_SAMPLE_COUNT") {
            if let Ok(val) = v.parse() {
                self.sampling.sample_count = Some(val);
            }
        }
        if let Some(v) = lookup("FIDELIS_SEED") {
            if let Ok(val) = v.parse() {
                self.sampling.seed = Some(val);
            }
        }

        // Execution
        if let Some(v) = lookup("FIDELIS_PARALLEL") {
            match v.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.execution.parallel = true,
                "0" | "false" | "no" | "off" => self.execution.parallel = false,
                _ => {}
            }
        }
        if let Some(v) = lookup("FIDELIS_QUERY_TIMEOUT_MS") {
            if let Ok(val) = v.parse() {
                self.execution.query_timeout_ms = Some(val);
            }
        }

        // Logging
        if let Some(v) = lookup("FIDELIS_LOG") {
            self.logging.level = v;
        }

        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.estimator_kind()?;

        if self.sampling.sample_count == Some(0) {
            return Err(ConfigError::ValidationError(
                "sample_count must be greater than 0; omit it to use the full class".to_string(),
            ));
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {other}"
                )));
            }
        }

        match self.logging.format.as_str() {
            "full" | "compact" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log format: {other}"
                )));
            }
        }

        Ok(())
    }

    /// The configured estimator.
    pub fn estimator_kind(&self) -> Result<EstimatorKind, ConfigError> {
        self.estimator
            .kind
            .parse()
            .map_err(|e| ConfigError::ValidationError(format!("{e}")))
    }

    /// Prediction options carrying these settings.
    pub fn predict_options(&self) -> Result<PredictOptions, ConfigError> {
        Ok(PredictOptions {
            sample_count: self.sampling.sample_count,
            estimator: self.estimator_kind()?,
            seed: self.sampling.seed,
            timeout: self.execution.query_timeout_ms.map(Duration::from_millis),
            parallel: self.execution.parallel,
            ..PredictOptions::default()
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
