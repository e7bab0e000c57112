use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};

use dalysim::{simulate, Calibration, InterventionSelection, SimulationEngine, SimulationRequest};

fn bench_simulate_all_levers(c: &mut Criterion) {
    let calibration = Calibration::default();
    let selection = InterventionSelection::all();

    c.bench_function("engine/simulate_all_levers", |b| {
        b.iter(|| simulate(black_box(&calibration), black_box(&selection)));
    });
}

fn bench_sweep(c: &mut Criterion) {
    let engine = SimulationEngine::new(Calibration::default());

    let mut group = c.benchmark_group("engine");
    group.throughput(Throughput::Elements(InterventionSelection::COMBINATIONS as u64));
    group.bench_function("sweep", |b| b.iter(|| black_box(engine.sweep())));
    group.finish();
}

fn bench_request_to_json(c: &mut Criterion) {
    let engine = SimulationEngine::new(Calibration::default());
    let body = r#"{"clean_air": true, "diagnostics": true, "acute_treatment": true, "charts": {"pie": "AAAA"}}"#;

    c.bench_function("boundary/request_to_json", |b| {
        b.iter(|| {
            let request = SimulationRequest::from_json(black_box(body)).unwrap();
            engine.simulate(&request.into_selection()).to_json()
        });
    });
}

criterion_group!(benches, bench_simulate_all_levers, bench_sweep, bench_request_to_json);
criterion_main!(benches);
