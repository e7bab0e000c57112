//! Embedded calibration constants.
//!
//! Used whole when the calibration source is unavailable, and field by field
//! to back-fill optional keys a source document omits.

use std::collections::BTreeMap;

use super::{AgeProportions, BreakdownShares, Calibration, CalibrationSource, Efficacies};

/// Total DALYs with no interventions.
pub const BASELINE_DALYS: f64 = 362_095_599.0;

/// Mortality share of total burden.
pub const YLL_SHARE: f64 = 0.855;

/// Disability share of total burden.
pub const YLD_SHARE: f64 = 0.145;

/// Stage and burden-type shares.
pub const SHARES: BreakdownShares = BreakdownShares {
    acute_share: 0.1766,
    long_covid_share: 0.0112,
    pasc_share: 0.8122,
    yll_share: YLL_SHARE,
    yld_share: YLD_SHARE,
};

/// Lever efficacies.
pub const EFFICACIES: Efficacies = Efficacies {
    clean_air: 0.74,
    nose_sprays: 0.57,
    diagnostics_risk: 0.20,
    diagnostics_sev: 0.25,
    acute_tx_sev: 0.64,
    acute_tx_pasc: 0.26,
    lc_tx_severity: 0.55,
};

/// Demographic split of total burden.
pub const AGE_PROPORTIONS: AgeProportions = AgeProportions {
    group_0_17: 0.041,
    group_18_64: 0.497,
    group_65_plus: 0.462,
};

/// Seven-condition split of PASC burden. Sums to 1.
pub const PASC_WEIGHTS: [(&str, f64); 7] = [
    ("Cardiovascular", 0.30),
    ("Neurological", 0.20),
    ("Respiratory", 0.15),
    ("Metabolic", 0.12),
    ("Renal", 0.10),
    ("Gastrointestinal", 0.08),
    ("Other", 0.05),
];

/// [`PASC_WEIGHTS`] as an owned map.
#[must_use]
pub fn pasc_weights() -> BTreeMap<String, f64> {
    PASC_WEIGHTS
        .iter()
        .map(|(name, weight)| ((*name).to_string(), *weight))
        .collect()
}

/// The complete default calibration.
#[must_use]
pub fn calibration() -> Calibration {
    Calibration {
        baseline_dalys: BASELINE_DALYS,
        shares: SHARES,
        efficacies: EFFICACIES,
        pasc_weights: pasc_weights(),
        age_proportions: AGE_PROPORTIONS,
        source: CalibrationSource::Defaults,
    }
}
