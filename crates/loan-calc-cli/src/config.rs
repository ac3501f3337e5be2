//! YAML configuration for the CLI.
//!
//! Every section has defaults, so a missing file or a partial file is fine.
//! A file that cannot be read or parsed is reported back to the caller
//! together with the defaults rather than aborting the run.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use loan_calc_core::{LoanCalcError, LoanCalcResult};

use crate::OutputFormat;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "loancalc.yml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub log: LogConfig,
    pub output: OutputConfig,
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// An `EnvFilter` directive, e.g. `info` or `loan_calc_core=debug`.
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Threads used by `batch` to execute requests.
    pub workers: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { workers: 4 }
    }
}

impl CliConfig {
    pub fn from_file(path: &Path) -> LoanCalcResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            LoanCalcError::Config(format!("error reading config file {}: {e}", path.display()))
        })?;
        let config: CliConfig = serde_yaml::from_str(&contents).map_err(|e| {
            LoanCalcError::Config(format!("error parsing config file {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> LoanCalcResult<()> {
        if self.batch.workers == 0 {
            return Err(LoanCalcError::Config("batch.workers must be at least 1".into()));
        }
        Ok(())
    }
}

/// Load the config at `path`, or at [`DEFAULT_CONFIG_PATH`] if it exists.
///
/// Always yields a usable config. The second element carries the reason the
/// defaults were used instead of the requested file.
pub fn load(path: Option<&Path>) -> (CliConfig, Option<LoanCalcError>) {
    let path = match path {
        Some(path) => path,
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if !default.is_file() {
                return (CliConfig::default(), None);
            }
            default
        }
    };
    match CliConfig::from_file(path) {
        Ok(config) => (config, None),
        Err(e) => (CliConfig::default(), Some(e)),
    }
}
