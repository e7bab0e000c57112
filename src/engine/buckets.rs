//! Disease-stage bucket projection.

use serde::{Deserialize, Serialize};

use crate::calibration::Calibration;

use super::modifiers::Modifiers;

/// Full-precision simulated burden per disease stage.
///
/// Every stage is gated by infection risk, then scaled by the modifier of the
/// lever class that acts on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageBuckets {
    /// `baseline * acute_share * infection * severity`
    pub acute: f64,
    /// `baseline * long_covid_share * infection * lc_severity`
    pub long_covid: f64,
    /// `baseline * pasc_share * infection * pasc_incidence`
    pub pasc: f64,
}

impl StageBuckets {
    /// Projects the baseline through `modifiers`.
    #[must_use]
    pub fn project(calibration: &Calibration, modifiers: &Modifiers) -> Self {
        let baseline = calibration.baseline_dalys;
        let shares = &calibration.shares;

        let base_acute = baseline * shares.acute_share;
        let base_long_covid = baseline * shares.long_covid_share;
        let base_pasc = baseline * shares.pasc_share;

        Self {
            acute: base_acute * modifiers.infection * modifiers.severity,
            long_covid: base_long_covid * modifiers.infection * modifiers.lc_severity,
            pasc: base_pasc * modifiers.infection * modifiers.pasc_incidence,
        }
    }

    /// Unrounded simulated total.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.acute + self.long_covid + self.pasc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_reproduces_stage_shares() {
        let c = Calibration::default();
        let b = StageBuckets::project(&c, &Modifiers::IDENTITY);
        assert!((b.acute - c.baseline_dalys * 0.1766).abs() < 1e-6);
        assert!((b.long_covid - c.baseline_dalys * 0.0112).abs() < 1e-6);
        assert!((b.pasc - c.baseline_dalys * 0.8122).abs() < 1e-6);
        assert!((b.total() - c.baseline_dalys).abs() < 1e-3);
    }

    #[test]
    fn infection_gates_every_stage() {
        let c = Calibration::default();
        let m = Modifiers {
            infection: 0.0,
            ..Modifiers::IDENTITY
        };
        let b = StageBuckets::project(&c, &m);
        assert_eq!(b.total(), 0.0);
    }

    #[test]
    fn stage_modifiers_are_independent() {
        let c = Calibration::default();
        let m = Modifiers {
            lc_severity: 0.5,
            ..Modifiers::IDENTITY
        };
        let b = StageBuckets::project(&c, &m);
        let base = StageBuckets::project(&c, &Modifiers::IDENTITY);
        assert_eq!(b.acute, base.acute);
        assert_eq!(b.pasc, base.pasc);
        assert!((b.long_covid - base.long_covid * 0.5).abs() < 1e-9);
    }
}
