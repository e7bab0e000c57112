//! Runtime configuration read from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `DALYSIM_CALIBRATION_PATH` | `data/processed/model_constants.json` |
//! | `DALYSIM_LOG_LEVEL` | `info` |

use std::path::PathBuf;

use crate::calibration::CalibrationStore;

/// Environment variable naming the calibration document.
pub const CALIBRATION_PATH_VAR: &str = "DALYSIM_CALIBRATION_PATH";

/// Environment variable holding the log filter directive.
pub const LOG_LEVEL_VAR: &str = "DALYSIM_LOG_LEVEL";

/// Process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Calibration document path.
    pub calibration_path: PathBuf,
    /// `tracing` filter directive, e.g. `info` or `dalysim=debug`.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            calibration_path: PathBuf::from(CalibrationStore::DEFAULT_PATH),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Reads the configuration from the environment, falling back to defaults
    /// for unset or empty variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            calibration_path: var(CALIBRATION_PATH_VAR)
                .map_or(defaults.calibration_path, PathBuf::from),
            log_level: var(LOG_LEVEL_VAR).unwrap_or(defaults.log_level),
        }
    }

    /// A calibration store reading from the configured path.
    #[must_use]
    pub fn calibration_store(&self) -> CalibrationStore {
        CalibrationStore::new(self.calibration_path.clone())
    }
}
