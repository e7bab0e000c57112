//! Calibration loading with default fallback and back-fill.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Deserializer};
use tracing::{debug, info, warn};

use crate::error::{CalibrationError, DalyResult};

use super::defaults;
use super::{AgeProportions, BreakdownShares, Calibration, CalibrationSource, Efficacies};

/// Tolerance for the documented sum expectations.
const SUM_TOLERANCE: f64 = 1e-6;

/// Calibration document as it appears on disk. Optional keys stay optional
/// here and are back-filled in [`CalibrationFile::into_calibration`].
#[derive(Debug, Deserialize)]
struct CalibrationFile {
    baseline_dalys: f64,
    breakdown_shares: SharesFile,
    efficacies: Efficacies,
    pasc_weights: Option<BTreeMap<String, f64>>,
    age_proportions: Option<AgeProportions>,
}

#[derive(Debug, Deserialize)]
struct SharesFile {
    acute_share: f64,
    long_covid_share: f64,
    pasc_share: f64,
    yll_share: Option<f64>,
    yld_share: Option<f64>,
}

impl CalibrationFile {
    fn into_calibration(self, source: CalibrationSource) -> Calibration {
        let shares = BreakdownShares {
            acute_share: self.breakdown_shares.acute_share,
            long_covid_share: self.breakdown_shares.long_covid_share,
            pasc_share: self.breakdown_shares.pasc_share,
            yll_share: backfill("yll_share", self.breakdown_shares.yll_share, || {
                defaults::YLL_SHARE
            }),
            yld_share: backfill("yld_share", self.breakdown_shares.yld_share, || {
                defaults::YLD_SHARE
            }),
        };

        Calibration {
            baseline_dalys: self.baseline_dalys,
            shares,
            efficacies: self.efficacies,
            pasc_weights: backfill("pasc_weights", self.pasc_weights, defaults::pasc_weights),
            age_proportions: backfill("age_proportions", self.age_proportions, || {
                defaults::AGE_PROPORTIONS
            }),
            source,
        }
    }
}

impl<'de> Deserialize<'de> for Calibration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        CalibrationFile::deserialize(deserializer)
            .map(|file| file.into_calibration(CalibrationSource::Inline))
    }
}

fn backfill<T>(field: &'static str, value: Option<T>, default: impl FnOnce() -> T) -> T {
    value.unwrap_or_else(|| {
        debug!(field, "calibration field absent; using default");
        default()
    })
}

/// Warns about documented expectations that the calibration does not meet.
/// Never rejects.
fn check_expectations(calibration: &Calibration) {
    let s = &calibration.shares;
    let burden_total = s.yll_share + s.yld_share;
    if (burden_total - 1.0).abs() > SUM_TOLERANCE {
        warn!(
            yll_share = s.yll_share,
            yld_share = s.yld_share,
            "yll_share + yld_share does not sum to 1"
        );
    }

    let pasc_total = calibration.pasc_weight_total();
    if (pasc_total - 1.0).abs() > SUM_TOLERANCE {
        warn!(total = pasc_total, "pasc_weights do not sum to 1");
    }

    if let Err(e) = calibration.validate() {
        warn!(error = %e, "calibration contains out-of-range values");
    }
}

/// Loads the [`Calibration`] from a JSON document on disk.
///
/// # Examples
///
/// ```
/// use dalysim::{Calibration, CalibrationStore};
///
/// let store = CalibrationStore::new("/definitely/not/here.json");
/// assert_eq!(store.load(), Calibration::default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalibrationStore {
    path: PathBuf,
}

impl Default for CalibrationStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PATH)
    }
}

impl CalibrationStore {
    /// Where the offline extraction step writes its output.
    pub const DEFAULT_PATH: &'static str = "data/processed/model_constants.json";

    /// Creates a store reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The configured source path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the calibration, substituting the embedded defaults if the source
    /// is missing, unreadable, or malformed. Never fails.
    #[must_use]
    pub fn load(&self) -> Calibration {
        match self.try_load() {
            Ok(calibration) => calibration,
            Err(e) => {
                warn!(error = %e, "calibration source unavailable; using embedded defaults");
                defaults::calibration()
            }
        }
    }

    /// Loads the calibration, surfacing why the source was rejected.
    ///
    /// # Errors
    ///
    /// Returns `CalibrationError::Unavailable` if the file cannot be read and
    /// `CalibrationError::Malformed` if it is not a valid calibration document.
    pub fn try_load(&self) -> Result<Calibration, CalibrationError> {
        let text = fs::read_to_string(&self.path).map_err(|source| {
            CalibrationError::Unavailable {
                path: self.path.clone(),
                source,
            }
        })?;

        let file: CalibrationFile =
            serde_json::from_str(&text).map_err(|source| CalibrationError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        let calibration = file.into_calibration(CalibrationSource::File {
            path: self.path.clone(),
            loaded_at: Utc::now(),
        });
        check_expectations(&calibration);

        info!(
            path = %self.path.display(),
            baseline_dalys = calibration.baseline_dalys,
            pasc_conditions = calibration.pasc_weights.len(),
            "calibration loaded"
        );
        Ok(calibration)
    }

    /// Loads the calibration and rejects it unless every value is in range.
    ///
    /// # Errors
    ///
    /// Returns `DalyError::Calibration` if the source cannot be read or parsed
    /// and `DalyError::Validation` if it holds out-of-range values.
    pub fn load_validated(&self) -> DalyResult<Calibration> {
        let calibration = self.try_load()?;
        calibration.validate()?;
        Ok(calibration)
    }

    /// Parses a calibration document held in memory, with the same back-fill
    /// rules as a file.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `json` is not a valid calibration document.
    pub fn from_json_str(json: &str) -> Result<Calibration, serde_json::Error> {
        let calibration: Calibration = serde_json::from_str(json)?;
        check_expectations(&calibration);
        Ok(calibration)
    }
}
