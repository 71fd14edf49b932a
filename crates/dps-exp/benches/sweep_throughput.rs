use criterion::{criterion_group, criterion_main, Criterion};
use dps_core::ParamSet;
use dps_exp::{
    select_runs, sweep, FnSimulator, PresetRegistry, RunCatalog, SimOptions, SweepPlan,
};

fn bench_sweep(c: &mut Criterion) {
    let runs = select_runs(&RunCatalog::builtin(), &PresetRegistry::builtin(), &[])
        .expect("runs");
    let sim = FnSimulator::new(|params: &ParamSet| {
        let total: f64 = params.iter().map(|(_, value)| value.as_f64()).sum();
        Ok(format!("{total:.2}"))
    });
    let plan = SweepPlan::standard(5);
    let options = SimOptions::default();
    c.bench_function("sweep_throughput", |b| {
        b.iter(|| {
            for run in &runs {
                let _ = sweep(&sim, &run.params, &plan, &options, &options).expect("sweep");
            }
        });
    });
}

criterion_group!(benches, bench_sweep);
criterion_main!(benches);
