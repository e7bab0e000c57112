//! Multiplicative risk and severity modifiers.

use serde::{Deserialize, Serialize};

use crate::calibration::Efficacies;
use crate::intervention::InterventionSelection;

/// The four running products of `(1 - efficacy)` over enabled levers.
///
/// Each starts at 1.0; a lever that is not enabled leaves it untouched. With
/// efficacies in [0, 1] every modifier stays in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Infection risk: clean air, nose sprays, diagnostics.
    pub infection: f64,
    /// Acute severity: diagnostics, acute treatment.
    pub severity: f64,
    /// PASC incidence: acute treatment.
    pub pasc_incidence: f64,
    /// Long COVID severity: long COVID treatment.
    pub lc_severity: f64,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Modifiers {
    /// No lever enabled.
    pub const IDENTITY: Self = Self {
        infection: 1.0,
        severity: 1.0,
        pasc_incidence: 1.0,
        lc_severity: 1.0,
    };

    /// Composes the modifiers for `selection`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dalysim::{Calibration, InterventionSelection, Modifiers};
    ///
    /// let calibration = Calibration::default();
    /// let m = Modifiers::compose(&calibration.efficacies, &InterventionSelection::all());
    /// assert!((m.infection - 0.26 * 0.43 * 0.80).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn compose(efficacies: &Efficacies, selection: &InterventionSelection) -> Self {
        let mut m = Self::IDENTITY;

        if selection.clean_air {
            m.infection *= 1.0 - efficacies.clean_air;
        }
        if selection.nose_sprays {
            m.infection *= 1.0 - efficacies.nose_sprays;
        }
        if selection.diagnostics {
            m.infection *= 1.0 - efficacies.diagnostics_risk;
        }

        if selection.diagnostics {
            m.severity *= 1.0 - efficacies.diagnostics_sev;
        }
        if selection.acute_treatment {
            m.severity *= 1.0 - efficacies.acute_tx_sev;
        }

        if selection.acute_treatment {
            m.pasc_incidence *= 1.0 - efficacies.acute_tx_pasc;
        }

        if selection.lc_treatment {
            m.lc_severity *= 1.0 - efficacies.lc_tx_severity;
        }

        m
    }

    /// True when every modifier lies in [0, 1].
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        [
            self.infection,
            self.severity,
            self.pasc_incidence,
            self.lc_severity,
        ]
        .iter()
        .all(|v| (0.0..=1.0).contains(v))
    }
}
