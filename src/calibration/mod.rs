//! Calibrated epidemiological constants.
//!
//! A [`Calibration`] is built once at startup by the [`CalibrationStore`] and
//! then only ever read. It is `Send + Sync` and can be shared across any number
//! of concurrent simulations by reference or `Arc`.

pub mod defaults;
mod store;

pub use store::CalibrationStore;

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Fractions of baseline burden attributed to disease stage and burden type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakdownShares {
    /// Acute infection.
    pub acute_share: f64,
    /// Long COVID.
    pub long_covid_share: f64,
    /// Post-acute organ disease.
    pub pasc_share: f64,
    /// Years of life lost (mortality).
    pub yll_share: f64,
    /// Years lived with disability.
    pub yld_share: f64,
}

impl BreakdownShares {
    /// Sum of the three disease-stage shares.
    #[must_use]
    pub fn stage_total(&self) -> f64 {
        self.acute_share + self.long_covid_share + self.pasc_share
    }
}

/// Relative risk or severity reduction of each lever, in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Efficacies {
    /// Clean air, on infection risk.
    pub clean_air: f64,
    /// Nose sprays, on infection risk.
    pub nose_sprays: f64,
    /// Diagnostics, on infection risk.
    pub diagnostics_risk: f64,
    /// Diagnostics, on acute severity.
    pub diagnostics_sev: f64,
    /// Acute treatment, on acute severity.
    pub acute_tx_sev: f64,
    /// Acute treatment, on PASC incidence.
    pub acute_tx_pasc: f64,
    /// Long COVID treatment, on long COVID severity.
    pub lc_tx_severity: f64,
}

impl Efficacies {
    /// Every efficacy paired with its calibration key.
    #[must_use]
    pub const fn named(&self) -> [(&'static str, f64); 7] {
        [
            ("clean_air", self.clean_air),
            ("nose_sprays", self.nose_sprays),
            ("diagnostics_risk", self.diagnostics_risk),
            ("diagnostics_sev", self.diagnostics_sev),
            ("acute_tx_sev", self.acute_tx_sev),
            ("acute_tx_pasc", self.acute_tx_pasc),
            ("lc_tx_severity", self.lc_tx_severity),
        ]
    }
}

/// Fixed demographic split of total burden across three age cohorts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeProportions {
    /// Ages 0 to 17.
    pub group_0_17: f64,
    /// Ages 18 to 64.
    pub group_18_64: f64,
    /// Ages 65 and over.
    pub group_65_plus: f64,
}

impl AgeProportions {
    /// Sum of the three cohort proportions.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.group_0_17 + self.group_18_64 + self.group_65_plus
    }
}

impl Default for AgeProportions {
    fn default() -> Self {
        defaults::AGE_PROPORTIONS
    }
}

/// Where a calibration came from. Metadata only; never affects results.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CalibrationSource {
    /// Embedded literal defaults.
    #[default]
    Defaults,

    /// Parsed from an in-memory document.
    Inline,

    /// Read from a file on disk.
    File {
        /// Path the calibration was read from.
        path: PathBuf,
        /// When it was read.
        loaded_at: DateTime<Utc>,
    },
}

impl fmt::Display for CalibrationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defaults => write!(f, "embedded defaults"),
            Self::Inline => write!(f, "inline document"),
            Self::File { path, loaded_at } => {
                write!(f, "{} (loaded {})", path.display(), loaded_at.to_rfc3339())
            }
        }
    }
}

/// A complete calibration.
///
/// Every optional field of the source document has already been back-filled,
/// so the engine never branches on absence. Deserializing a `Calibration`
/// applies the same back-fill as [`CalibrationStore`] and marks the result as
/// [`CalibrationSource::Inline`].
///
/// # Examples
///
/// ```
/// use dalysim::Calibration;
///
/// let calibration = Calibration::default();
/// assert_eq!(calibration.baseline_dalys, 362_095_599.0);
/// assert_eq!(calibration.pasc_weights.len(), 7);
/// assert!(calibration.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calibration {
    /// Total burden with no interventions.
    pub baseline_dalys: f64,

    /// Stage and burden-type shares.
    #[serde(rename = "breakdown_shares")]
    pub shares: BreakdownShares,

    /// Lever efficacies.
    pub efficacies: Efficacies,

    /// Condition name to fraction of PASC burden.
    pub pasc_weights: BTreeMap<String, f64>,

    /// Age cohort split.
    pub age_proportions: AgeProportions,

    /// Provenance.
    #[serde(skip)]
    pub source: CalibrationSource,
}

impl Default for Calibration {
    fn default() -> Self {
        defaults::calibration()
    }
}

impl Calibration {
    /// Checks that every value is finite and in range.
    ///
    /// The engine does not require this; it is offered to boundary
    /// collaborators that want to reject garbage before simulating.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.baseline_dalys.is_finite() {
            return Err(ValidationError::NonFiniteValue {
                field: "baseline_dalys".to_string(),
            });
        }
        if self.baseline_dalys < 0.0 {
            return Err(ValidationError::NegativeBaseline {
                value: self.baseline_dalys,
            });
        }

        for (lever, value) in self.efficacies.named() {
            if !value.is_finite() {
                return Err(ValidationError::NonFiniteValue {
                    field: format!("efficacies.{lever}"),
                });
            }
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::EfficacyOutOfRange { lever, value });
            }
        }

        let s = &self.shares;
        let fractions = [
            ("breakdown_shares.acute_share".to_string(), s.acute_share),
            ("breakdown_shares.long_covid_share".to_string(), s.long_covid_share),
            ("breakdown_shares.pasc_share".to_string(), s.pasc_share),
            ("breakdown_shares.yll_share".to_string(), s.yll_share),
            ("breakdown_shares.yld_share".to_string(), s.yld_share),
            ("age_proportions.group_0_17".to_string(), self.age_proportions.group_0_17),
            ("age_proportions.group_18_64".to_string(), self.age_proportions.group_18_64),
            ("age_proportions.group_65_plus".to_string(), self.age_proportions.group_65_plus),
        ]
        .into_iter()
        .chain(
            self.pasc_weights
                .iter()
                .map(|(name, weight)| (format!("pasc_weights.{name}"), *weight)),
        );

        for (field, value) in fractions {
            if !value.is_finite() {
                return Err(ValidationError::NonFiniteValue { field });
            }
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::ShareOutOfRange { field, value });
            }
        }

        Ok(())
    }

    /// Sum of all PASC condition weights.
    #[must_use]
    pub fn pasc_weight_total(&self) -> f64 {
        self.pasc_weights.values().sum()
    }
}
