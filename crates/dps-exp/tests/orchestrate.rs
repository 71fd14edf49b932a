use std::cell::Cell;
use std::fs;

use dps_core::errors::{DpsError, ErrorInfo};
use dps_core::ParamSet;
use dps_exp::{run_all, DriverConfig, FnSimulator, Mode, Run, SweepAxis};
use tempfile::tempdir;

fn runs() -> Vec<Run> {
    vec![
        Run {
            name: "2h-arms".into(),
            params: ParamSet::from_pairs([("strength", 223), ("hitBonus", 4)]),
        },
        Run {
            name: "dw-fury".into(),
            params: ParamSet::from_pairs([("strength", 300), ("hitBonus", 2)]),
        },
    ]
}

fn strength_sim(params: &ParamSet) -> Result<String, DpsError> {
    Ok(params
        .get("strength")
        .map(|value| format!("{:.2}", value.as_f64()))
        .unwrap_or_default())
}

#[test]
fn quick_mode_prints_one_result_per_run() {
    let sim = FnSimulator::new(strength_sim);
    let config = DriverConfig::default();
    let mut out = Vec::new();
    let report = run_all(&sim, &runs(), &config, &mut out).expect("pass");
    assert_eq!(
        String::from_utf8(out).expect("utf8"),
        "Run: 2h-arms\n223.00\nRun: dw-fury\n300.00\n"
    );
    assert_eq!(report.runs[1].result.as_deref(), Some("300.00"));
    assert!(report.runs.iter().all(|run| run.table.is_none()));
}

#[test]
fn inspect_mode_separates_runs_with_blank_lines() {
    let calls = Cell::new(0);
    let sim = FnSimulator::new(|_: &ParamSet| {
        calls.set(calls.get() + 1);
        Ok(String::new())
    });
    let config = DriverConfig {
        mode: Mode::Inspect,
        ..DriverConfig::default()
    };
    let mut out = Vec::new();
    run_all(&sim, &runs(), &config, &mut out).expect("pass");
    assert_eq!(
        String::from_utf8(out).expect("utf8"),
        "Run: 2h-arms\n\nRun: dw-fury\n\n"
    );
    assert_eq!(calls.get(), 2);
}

#[test]
fn full_mode_writes_one_table_per_run() {
    let dir = tempdir().expect("tempdir");
    let sim = FnSimulator::new(strength_sim);
    let config = DriverConfig {
        mode: Mode::Full,
        steps: 2,
        out_dir: dir.path().to_path_buf(),
        axes: vec![
            SweepAxis::offset("hitBonus", 1),
            SweepAxis::offset("strength", 10),
        ],
        ..DriverConfig::default()
    };
    let mut out = Vec::new();
    let report = run_all(&sim, &runs(), &config, &mut out).expect("pass");
    assert_eq!(report.runs.len(), 2);
    let text = fs::read_to_string(dir.path().join("2h-arms.csv")).expect("table");
    assert_eq!(
        text,
        "x,0,1,2\nhitBonus,223.00,223.00,223.00\nstrength,223.00,233.00,243.00\n"
    );
    assert_eq!(
        report.runs[1].table.as_deref(),
        Some(dir.path().join("dw-fury.csv").as_path())
    );
    assert!(dir.path().join("dw-fury.csv").exists());
}

#[test]
fn failure_stops_the_pass_without_writing_the_table() {
    let dir = tempdir().expect("tempdir");
    let sim = FnSimulator::new(|params: &ParamSet| {
        if params.get("strength").map(|v| v.as_f64()) == Some(243.0) {
            return Err(DpsError::Exit {
                code: Some(2),
                info: ErrorInfo::new("simulator-exit", "crashed"),
            });
        }
        strength_sim(params)
    });
    let config = DriverConfig {
        mode: Mode::Full,
        steps: 3,
        out_dir: dir.path().to_path_buf(),
        axes: vec![SweepAxis::offset("strength", 10)],
        ..DriverConfig::default()
    };
    let mut out = Vec::new();
    let err = run_all(&sim, &runs(), &config, &mut out).expect_err("step 2 fails");
    assert_eq!(err.exit_code(), Some(2));
    assert!(!dir.path().join("2h-arms.csv").exists());
    assert!(!dir.path().join("dw-fury.csv").exists());
    assert_eq!(String::from_utf8(out).expect("utf8"), "Run: 2h-arms\n");
}

#[test]
fn log_file_only_reaches_the_unperturbed_invocation() {
    let config = DriverConfig {
        log: true,
        verbose: true,
        duration_hours: Some(10),
        out_dir: "tables".into(),
        ..DriverConfig::default()
    };
    let run = &runs()[0];
    let baseline = config.baseline_options(run);
    assert_eq!(
        baseline.log_path.as_deref(),
        Some(std::path::Path::new("tables/2h-arms.text"))
    );
    assert!(baseline.verbose);
    assert_eq!(baseline.duration_hours, Some(10));
    let step = config.step_options();
    assert_eq!(step.log_path, None);
    assert_eq!(step.duration_hours, Some(10));
    assert_eq!(config.table_path(run), std::path::Path::new("tables/2h-arms.csv"));
}
