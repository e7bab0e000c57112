//! The intervention impact engine.
//!
//! [`simulate`] is a pure function of a [`Calibration`] and an
//! [`InterventionSelection`]: no I/O, no shared mutable state, no error path.
//! [`SimulationEngine`] wraps a shared calibration handle for callers that run
//! many simulations against one calibration.
//!
//! # Rounding
//!
//! Integer outputs are rounded from their own full-precision value to the
//! nearest integer, ties away from zero. Age cohorts and the YLL/YLD split are
//! taken from the rounded total; PASC conditions from the unrounded PASC
//! bucket.

mod buckets;
mod modifiers;

pub use buckets::StageBuckets;
pub use modifiers::Modifiers;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calibration::Calibration;
use crate::intervention::{Intervention, InterventionSelection};
use crate::result::{AgeBreakdown, DalyBreakdown, SimulationResult};

#[allow(clippy::cast_possible_truncation)]
fn round_dalys(value: f64) -> i64 {
    value.round() as i64
}

fn round_one_decimal(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    // Normalize -0.0 so the status quo serializes as 0.0.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Runs one simulation.
///
/// # Examples
///
/// ```
/// use dalysim::{simulate, Calibration, InterventionSelection};
///
/// let calibration = Calibration::default();
/// let result = simulate(&calibration, &InterventionSelection::none());
/// assert_eq!(result.simulated_dalys, result.baseline_dalys);
/// assert_eq!(result.reduction_percentage, 0.0);
/// ```
#[must_use]
pub fn simulate(calibration: &Calibration, selection: &InterventionSelection) -> SimulationResult {
    let modifiers = Modifiers::compose(&calibration.efficacies, selection);
    let buckets = StageBuckets::project(calibration, &modifiers);

    let baseline = calibration.baseline_dalys;
    let total = buckets.total();
    let averted = baseline - total;
    let reduction_percentage = if baseline == 0.0 {
        0.0
    } else {
        round_one_decimal(100.0 * averted / baseline)
    };

    let simulated_dalys = round_dalys(total);
    #[allow(clippy::cast_precision_loss)]
    let rounded_total = simulated_dalys as f64;

    let shares = &calibration.shares;
    let breakdown = DalyBreakdown {
        acute: round_dalys(buckets.acute),
        long_covid: round_dalys(buckets.long_covid),
        pasc: round_dalys(buckets.pasc),
        yll: round_dalys(rounded_total * shares.yll_share),
        yld: round_dalys(rounded_total * shares.yld_share),
    };

    let ages = &calibration.age_proportions;
    let age_breakdown = AgeBreakdown {
        group_0_17: round_dalys(rounded_total * ages.group_0_17),
        group_18_64: round_dalys(rounded_total * ages.group_18_64),
        group_65_plus: round_dalys(rounded_total * ages.group_65_plus),
    };

    let pasc_condition_breakdown: BTreeMap<String, i64> = calibration
        .pasc_weights
        .iter()
        .map(|(condition, weight)| (condition.clone(), round_dalys(buckets.pasc * weight)))
        .collect();

    debug!(
        selection = %selection,
        infection = modifiers.infection,
        severity = modifiers.severity,
        pasc_incidence = modifiers.pasc_incidence,
        lc_severity = modifiers.lc_severity,
        simulated_dalys,
        reduction_percentage,
        "simulation complete"
    );

    SimulationResult {
        baseline_dalys: round_dalys(baseline),
        simulated_dalys,
        dalys_averted: round_dalys(averted),
        reduction_percentage,
        breakdown,
        age_breakdown,
        pasc_condition_breakdown,
    }
}

/// One entry of a scenario sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    /// The simulated selection.
    pub selection: InterventionSelection,
    /// Its result.
    pub result: SimulationResult,
}

/// A cloneable engine bound to one shared calibration.
///
/// Cloning shares the calibration; every call allocates its own result.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    calibration: Arc<Calibration>,
}

impl SimulationEngine {
    /// Creates an engine over `calibration`.
    #[must_use]
    pub fn new(calibration: Calibration) -> Self {
        Self::from_shared(Arc::new(calibration))
    }

    /// Creates an engine over an already shared calibration.
    #[must_use]
    pub fn from_shared(calibration: Arc<Calibration>) -> Self {
        Self { calibration }
    }

    /// The bound calibration.
    #[must_use]
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Runs one simulation. See [`simulate`].
    #[must_use]
    pub fn simulate(&self, selection: &InterventionSelection) -> SimulationResult {
        simulate(&self.calibration, selection)
    }

    /// Simulates every one of the 32 selections, in
    /// [`InterventionSelection::subsets`] order.
    #[must_use]
    pub fn sweep(&self) -> Vec<ScenarioOutcome> {
        InterventionSelection::subsets()
            .map(|selection| ScenarioOutcome {
                result: self.simulate(&selection),
                selection,
            })
            .collect()
    }

    /// Additional DALYs averted by enabling `lever` on top of `selection`.
    /// Zero when the lever is already enabled.
    #[must_use]
    pub fn marginal_impact(&self, selection: &InterventionSelection, lever: Intervention) -> i64 {
        if selection.is_enabled(lever) {
            return 0;
        }
        let without = self.simulate(selection);
        let with = self.simulate(&selection.with(lever));
        without.simulated_dalys - with.simulated_dalys
    }
}

impl From<Calibration> for SimulationEngine {
    fn from(calibration: Calibration) -> Self {
        Self::new(calibration)
    }
}
