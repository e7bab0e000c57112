//! Simulation output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Simulated burden by disease stage and by burden type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DalyBreakdown {
    /// Acute infection.
    pub acute: i64,
    /// Long COVID.
    pub long_covid: i64,
    /// Post-acute organ disease.
    pub pasc: i64,
    /// Years of life lost.
    pub yll: i64,
    /// Years lived with disability.
    pub yld: i64,
}

impl DalyBreakdown {
    /// Sum of the three disease-stage entries.
    #[must_use]
    pub const fn stage_total(&self) -> i64 {
        self.acute + self.long_covid + self.pasc
    }
}

/// Simulated burden by age cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBreakdown {
    /// Ages 0 to 17.
    pub group_0_17: i64,
    /// Ages 18 to 64.
    pub group_18_64: i64,
    /// Ages 65 and over.
    pub group_65_plus: i64,
}

impl AgeBreakdown {
    /// Sum of the three cohorts.
    #[must_use]
    pub const fn total(&self) -> i64 {
        self.group_0_17 + self.group_18_64 + self.group_65_plus
    }
}

/// Outcome of one simulation.
///
/// Integer fields are rounded independently from their own full-precision
/// values, so the parts of a breakdown need not add up exactly to
/// `simulated_dalys`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Burden with no interventions.
    pub baseline_dalys: i64,
    /// Burden under the selected interventions.
    pub simulated_dalys: i64,
    /// `baseline - simulated`. Negative only if a lever ever increased burden.
    pub dalys_averted: i64,
    /// Percent of baseline averted, one decimal place.
    pub reduction_percentage: f64,
    /// Stage and burden-type split of the simulated burden.
    pub breakdown: DalyBreakdown,
    /// Age cohort split of the simulated burden.
    pub age_breakdown: AgeBreakdown,
    /// Condition split of the simulated PASC burden.
    pub pasc_condition_breakdown: BTreeMap<String, i64>,
}

impl SimulationResult {
    /// Sum of the PASC condition entries.
    #[must_use]
    pub fn pasc_condition_total(&self) -> i64 {
        self.pasc_condition_breakdown.values().sum()
    }

    /// Serializes to the flat JSON object returned across the request
    /// boundary.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "baseline_dalys": self.baseline_dalys,
            "simulated_dalys": self.simulated_dalys,
            "dalys_averted": self.dalys_averted,
            "reduction_percentage": self.reduction_percentage,
            "breakdown": self.breakdown,
            "age_breakdown": self.age_breakdown,
            "pasc_condition_breakdown": self.pasc_condition_breakdown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SimulationResult {
        SimulationResult {
            baseline_dalys: 100,
            simulated_dalys: 40,
            dalys_averted: 60,
            reduction_percentage: 60.0,
            breakdown: DalyBreakdown {
                acute: 10,
                long_covid: 2,
                pasc: 28,
                yll: 34,
                yld: 6,
            },
            age_breakdown: AgeBreakdown {
                group_0_17: 2,
                group_18_64: 20,
                group_65_plus: 18,
            },
            pasc_condition_breakdown: [("Renal".to_string(), 28)].into_iter().collect(),
        }
    }

    #[test]
    fn json_matches_serde_layout() {
        let result = sample();
        assert_eq!(result.to_json(), serde_json::to_value(&result).unwrap());
    }

    #[test]
    fn json_field_names() {
        let json = sample().to_json();
        for key in [
            "baseline_dalys",
            "simulated_dalys",
            "dalys_averted",
            "reduction_percentage",
            "breakdown",
            "age_breakdown",
            "pasc_condition_breakdown",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["breakdown"]["long_covid"], 2);
        assert_eq!(json["age_breakdown"]["group_65_plus"], 18);
    }

    #[test]
    fn totals() {
        let result = sample();
        assert_eq!(result.breakdown.stage_total(), 40);
        assert_eq!(result.age_breakdown.total(), 40);
        assert_eq!(result.pasc_condition_total(), 28);
    }
}
