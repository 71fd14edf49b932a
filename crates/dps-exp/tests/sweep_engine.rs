use std::cell::{Cell, RefCell};

use dps_core::errors::{DpsError, ErrorInfo};
use dps_core::{add, ParamSet, ParamValue};
use dps_exp::{sweep, FnSimulator, SimOptions, SweepAxis, SweepPlan};

fn baseline() -> ParamSet {
    ParamSet::from_pairs([
        ("mainSwingTime", ParamValue::Float(2.3)),
        ("strength", ParamValue::Int(2000)),
        ("hitBonus", ParamValue::Int(4)),
    ])
}

fn fingerprint(params: &ParamSet) -> String {
    params.to_tokens().join(";")
}

fn plan(steps: u32, include_baseline: bool, axes: Vec<SweepAxis>) -> SweepPlan {
    SweepPlan {
        steps,
        include_baseline,
        axes,
    }
}

#[test]
fn cells_match_simulator_on_perturbed_params() {
    let sim = FnSimulator::new(|params: &ParamSet| Ok(fingerprint(params)));
    let base = baseline();
    let table = sweep(
        &sim,
        &base,
        &plan(5, false, vec![SweepAxis::offset("hitBonus", 1)]),
        &SimOptions::default(),
        &SimOptions::default(),
    )
    .expect("sweep");
    let row = &table.rows[1];
    assert_eq!(row[0], "hitBonus");
    for step in 1..=5u32 {
        let expected = add([&base, &ParamSet::single("hitBonus", step)]);
        assert_eq!(row[step as usize], fingerprint(&expected));
    }
}

#[test]
fn strength_axis_scales_by_ten() {
    let sim = FnSimulator::new(|params: &ParamSet| {
        Ok(params
            .get("strength")
            .map(|value| value.to_string())
            .unwrap_or_default())
    });
    let table = sweep(
        &sim,
        &baseline(),
        &plan(3, false, vec![SweepAxis::offset("strength", 10)]),
        &SimOptions::default(),
        &SimOptions::default(),
    )
    .expect("sweep");
    assert_eq!(table.rows[0], vec!["x", "1", "2", "3"]);
    assert_eq!(table.rows[1], vec!["strength", "2010", "2020", "2030"]);
}

#[test]
fn table_shape_counts_axes_and_steps() {
    let sim = FnSimulator::new(|_: &ParamSet| Ok("1.0".to_string()));
    let axes = vec![
        SweepAxis::offset("hitBonus", 1),
        SweepAxis::offset("critBonus", 1),
        SweepAxis::offset("strength", 10),
    ];
    let table = sweep(
        &sim,
        &baseline(),
        &plan(4, false, axes.clone()),
        &SimOptions::default(),
        &SimOptions::default(),
    )
    .expect("sweep");
    assert_eq!(table.row_count(), 4);
    assert!(table.rows.iter().all(|row| row.len() == 5));

    let with_zero = sweep(
        &sim,
        &baseline(),
        &plan(4, true, axes),
        &SimOptions::default(),
        &SimOptions::default(),
    )
    .expect("sweep");
    assert_eq!(with_zero.row_count(), 4);
    assert!(with_zero.rows.iter().all(|row| row.len() == 6));
    assert_eq!(with_zero.rows[0][1], "0");
}

#[test]
fn baseline_value_leads_every_row() {
    let calls = Cell::new(0u32);
    let sim = FnSimulator::new(|params: &ParamSet| {
        calls.set(calls.get() + 1);
        Ok(params.get("hitBonus").map(|v| v.to_string()).unwrap_or_default())
    });
    let table = sweep(
        &sim,
        &baseline(),
        &plan(
            2,
            true,
            vec![SweepAxis::offset("hitBonus", 1), SweepAxis::offset("strength", 10)],
        ),
        &SimOptions::default(),
        &SimOptions::default(),
    )
    .expect("sweep");
    assert_eq!(table.rows[1], vec!["hitBonus", "4", "5", "6"]);
    assert_eq!(table.rows[2], vec!["strength", "4", "4", "4"]);
    // one baseline call shared by both rows
    assert_eq!(calls.get(), 5);
}

#[test]
fn zero_steps_yield_header_and_baseline_only() {
    let sim = FnSimulator::new(|_: &ParamSet| Ok("812.40".to_string()));
    let table = sweep(
        &sim,
        &baseline(),
        &plan(0, true, vec![SweepAxis::offset("hitBonus", 1)]),
        &SimOptions::default(),
        &SimOptions::default(),
    )
    .expect("sweep");
    assert_eq!(table.rows, vec![vec!["x", "0"], vec!["hitBonus", "812.40"]]);
}

#[test]
fn empty_axis_list_yields_header_only() {
    let calls = Cell::new(0u32);
    let sim = FnSimulator::new(|_: &ParamSet| {
        calls.set(calls.get() + 1);
        Ok("1".to_string())
    });
    let table = sweep(
        &sim,
        &baseline(),
        &plan(3, true, Vec::new()),
        &SimOptions::default(),
        &SimOptions::default(),
    )
    .expect("sweep");
    assert_eq!(table.row_count(), 1);
    assert_eq!(calls.get(), 0);
}

#[test]
fn failure_aborts_remaining_steps() {
    let seen = RefCell::new(Vec::new());
    let sim = FnSimulator::new(|params: &ParamSet| {
        let hit = params.get("hitBonus").map(|v| v.as_f64()).unwrap_or(0.0);
        seen.borrow_mut().push(hit);
        if hit >= 7.0 {
            return Err(DpsError::Exit {
                code: Some(1),
                info: ErrorInfo::new("simulator-exit", "boom"),
            });
        }
        Ok(hit.to_string())
    });
    let err = sweep(
        &sim,
        &baseline(),
        &plan(
            5,
            false,
            vec![SweepAxis::offset("hitBonus", 1), SweepAxis::offset("critBonus", 1)],
        ),
        &SimOptions::default(),
        &SimOptions::default(),
    )
    .expect_err("step 3 fails");
    assert_eq!(err.exit_code(), Some(1));
    assert_eq!(*seen.borrow(), vec![5.0, 6.0, 7.0]);
}

#[test]
fn step_options_differ_from_baseline_options() {
    let logged = RefCell::new(Vec::new());
    struct Recorder<'a>(&'a RefCell<Vec<Option<String>>>);
    impl dps_exp::Simulator for Recorder<'_> {
        fn stream(&self, _: &ParamSet, _: &SimOptions) -> Result<(), DpsError> {
            Ok(())
        }
        fn capture(&self, _: &ParamSet, options: &SimOptions) -> Result<String, DpsError> {
            self.0.borrow_mut().push(
                options
                    .log_path
                    .as_ref()
                    .map(|path| path.display().to_string()),
            );
            Ok("0".to_string())
        }
    }
    let baseline_options = SimOptions {
        log_path: Some("dw-fury.text".into()),
        ..SimOptions::default()
    };
    sweep(
        &Recorder(&logged),
        &baseline(),
        &plan(2, true, vec![SweepAxis::offset("hitBonus", 1)]),
        &baseline_options,
        &SimOptions::default(),
    )
    .expect("sweep");
    assert_eq!(
        *logged.borrow(),
        vec![Some("dw-fury.text".to_string()), None, None]
    );
}

#[test]
fn labelled_axis_names_its_row() {
    let sim = FnSimulator::new(|params: &ParamSet| {
        Ok(params
            .get("strength")
            .map(|value| value.to_string())
            .unwrap_or_default())
    });
    let axis = SweepAxis::replace("strength", 100).with_label("str-abs");
    let table = sweep(
        &sim,
        &baseline(),
        &plan(2, true, vec![axis]),
        &SimOptions::default(),
        &SimOptions::default(),
    )
    .expect("sweep");
    assert_eq!(table.rows[1], vec!["str-abs", "2000", "100", "200"]);
}
