use std::sync::Arc;

use dalysim::{
    simulate, Calibration, CalibrationStore, Intervention, InterventionSelection, Modifiers,
    SimulationEngine, SimulationRequest,
};

fn engine() -> SimulationEngine {
    SimulationEngine::new(Calibration::default())
}

#[test]
fn status_quo_matches_baseline() {
    let result = engine().simulate(&InterventionSelection::none());
    assert_eq!(result.simulated_dalys, result.baseline_dalys);
    assert_eq!(result.dalys_averted, 0);
    assert_eq!(result.reduction_percentage, 0.0);
}

#[test]
fn all_interventions_avert_over_ninety_percent() {
    let engine = engine();
    let m = Modifiers::compose(&engine.calibration().efficacies, &InterventionSelection::all());
    assert!((m.infection - (1.0 - 0.74) * (1.0 - 0.57) * (1.0 - 0.20)).abs() < 1e-12);
    assert!((m.infection - 0.0895).abs() < 1e-3);

    let result = engine.simulate(&InterventionSelection::all());
    assert!(result.simulated_dalys < result.baseline_dalys / 10);
    assert!(result.dalys_averted > 0);
    assert!(result.reduction_percentage > 90.0);
}

#[test]
fn breakdowns_stay_within_rounding_tolerance() {
    let engine = engine();
    for outcome in engine.sweep() {
        let r = &outcome.result;
        assert!(
            (r.age_breakdown.total() - r.simulated_dalys).abs() <= 3,
            "age drift for {}",
            outcome.selection
        );
        assert!((r.breakdown.yll + r.breakdown.yld - r.simulated_dalys).abs() <= 2);
        assert!((r.breakdown.stage_total() - r.simulated_dalys).abs() <= 3);

        let conditions = i64::try_from(r.pasc_condition_breakdown.len()).unwrap();
        assert!((r.pasc_condition_total() - r.breakdown.pasc).abs() <= conditions);
    }
}

#[test]
fn adding_levers_never_increases_burden() {
    let outcomes = engine().sweep();
    for a in &outcomes {
        for b in &outcomes {
            if a.selection.is_subset_of(&b.selection) {
                assert!(
                    b.result.simulated_dalys <= a.result.simulated_dalys,
                    "{} -> {}",
                    a.selection,
                    b.selection
                );
            }
        }
    }
}

#[test]
fn full_efficacy_eliminates_infection_burden() {
    let mut calibration = Calibration::default();
    calibration.efficacies.clean_air = 1.0;
    let selection = InterventionSelection::none().with(Intervention::CleanAir);

    let result = simulate(&calibration, &selection);
    assert_eq!(result.simulated_dalys, 0);
    assert_eq!(result.dalys_averted, result.baseline_dalys);
    assert_eq!(result.reduction_percentage, 100.0);
    assert!(result.pasc_condition_breakdown.values().all(|v| *v == 0));
}

#[test]
fn zero_baseline_does_not_divide_by_zero() {
    let mut calibration = Calibration::default();
    calibration.baseline_dalys = 0.0;
    let result = simulate(&calibration, &InterventionSelection::all());
    assert_eq!(result.reduction_percentage, 0.0);
    assert!(result.reduction_percentage.is_finite());
}

#[test]
fn lc_treatment_only_touches_long_covid() {
    let engine = engine();
    let base = engine.simulate(&InterventionSelection::none());
    let lc = engine.simulate(&InterventionSelection::none().with(Intervention::LcTreatment));

    assert_eq!(lc.breakdown.acute, base.breakdown.acute);
    assert_eq!(lc.breakdown.pasc, base.breakdown.pasc);
    assert_eq!(lc.breakdown.long_covid, 1_824_962);
    assert_eq!(lc.pasc_condition_breakdown, base.pasc_condition_breakdown);
}

#[test]
fn request_boundary_feeds_engine() {
    let request = SimulationRequest::from_json(
        r#"{"clean_air": true, "nose_sprays": false, "charts": {"bar": "data:image/png;base64,AAAA"}}"#,
    )
    .unwrap();
    let result = engine().simulate(&request.into_selection());

    assert_eq!(result.simulated_dalys, 94_144_856);
    assert_eq!(result.reduction_percentage, 74.0);

    let json = result.to_json();
    assert!(json.get("charts").is_none());
    assert_eq!(json["simulated_dalys"], 94_144_856);
}

#[test]
fn concurrent_simulations_agree_with_sequential() {
    let calibration = Arc::new(CalibrationStore::new("/nonexistent/constants.json").load());
    let expected: Vec<_> = InterventionSelection::subsets()
        .map(|s| simulate(&calibration, &s))
        .collect();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = SimulationEngine::from_shared(Arc::clone(&calibration));
            std::thread::spawn(move || {
                InterventionSelection::subsets()
                    .map(|s| engine.simulate(&s))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn marginal_impact_matches_difference() {
    let engine = engine();
    let selection = InterventionSelection::none().with(Intervention::Diagnostics);
    let gain = engine.marginal_impact(&selection, Intervention::AcuteTreatment);

    let before = engine.simulate(&selection).simulated_dalys;
    let after = engine
        .simulate(&selection.with(Intervention::AcuteTreatment))
        .simulated_dalys;
    assert_eq!(gain, before - after);
    assert!(gain > 0);
}
