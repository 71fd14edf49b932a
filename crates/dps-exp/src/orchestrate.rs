use std::io::Write;
use std::path::PathBuf;

use dps_core::errors::{DpsError, ErrorInfo};
use serde::{Deserialize, Serialize};
use tracing::{error, info, info_span};

use crate::invoker::{SimOptions, Simulator};
use crate::runs::Run;
use crate::sweep::{standard_axes, sweep, SweepAxis, SweepPlan};
use crate::table::write_table;

/// What the orchestrator does with each run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One captured invocation per run, result printed.
    #[default]
    Quick,
    /// Full sweep per run, table written to `<out_dir>/<run>.csv`.
    Full,
    /// One streaming invocation per run; the simulator reports to the terminal.
    Inspect,
}

/// Run-level options shared by every run of a pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverConfig {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub verbose: bool,
    /// Pass `--log=<out_dir>/<run>.text` to each run's unperturbed invocation.
    #[serde(default)]
    pub log: bool,
    #[serde(default)]
    pub duration_hours: Option<u32>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "DriverConfig::default_steps")]
    pub steps: u32,
    #[serde(default = "DriverConfig::default_include_baseline")]
    pub include_baseline: bool,
    #[serde(default = "DriverConfig::default_out_dir")]
    pub out_dir: PathBuf,
    #[serde(default = "standard_axes")]
    pub axes: Vec<SweepAxis>,
}

impl DriverConfig {
    const fn default_steps() -> u32 {
        5
    }

    const fn default_include_baseline() -> bool {
        true
    }

    fn default_out_dir() -> PathBuf {
        PathBuf::from(".")
    }

    /// Options for the unperturbed invocation of `run`.
    pub fn baseline_options(&self, run: &Run) -> SimOptions {
        SimOptions {
            log_path: self
                .log
                .then(|| self.out_dir.join(format!("{}.text", run.name))),
            ..self.step_options()
        }
    }

    /// Options for perturbed sweep steps; these never carry a log file.
    pub fn step_options(&self) -> SimOptions {
        SimOptions {
            verbose: self.verbose,
            log_path: None,
            duration_hours: self.duration_hours,
            seed: self.seed,
        }
    }

    pub fn table_path(&self, run: &Run) -> PathBuf {
        self.out_dir.join(format!("{}.csv", run.name))
    }

    pub fn sweep_plan(&self) -> SweepPlan {
        SweepPlan {
            steps: self.steps,
            include_baseline: self.include_baseline,
            axes: self.axes.clone(),
        }
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            verbose: false,
            log: false,
            duration_hours: None,
            seed: None,
            steps: Self::default_steps(),
            include_baseline: Self::default_include_baseline(),
            out_dir: Self::default_out_dir(),
            axes: standard_axes(),
        }
    }
}

/// What one run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub name: String,
    /// Captured result in quick mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Table written in full mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<PathBuf>,
}

/// Outcomes of a completed pass, in run order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverReport {
    pub runs: Vec<RunOutcome>,
}

/// Processes `runs` in order according to `config.mode`.
///
/// Progress and quick-mode results go to `out`. The first failure ends the
/// whole pass: later runs are not started and the failing run writes no
/// table.
pub fn run_all<S, W>(
    sim: &S,
    runs: &[Run],
    config: &DriverConfig,
    out: &mut W,
) -> Result<DriverReport, DpsError>
where
    S: Simulator + ?Sized,
    W: Write,
{
    let mut report = DriverReport::default();
    for run in runs {
        let _span = info_span!("run", name = %run.name).entered();
        let outcome = run_one(sim, run, config, out).map_err(|err| {
            error!(error = %err, "run aborted");
            err
        })?;
        report.runs.push(outcome);
    }
    Ok(report)
}

fn run_one<S, W>(
    sim: &S,
    run: &Run,
    config: &DriverConfig,
    out: &mut W,
) -> Result<RunOutcome, DpsError>
where
    S: Simulator + ?Sized,
    W: Write,
{
    emit(out, &format!("Run: {}", run.name))?;
    let mut outcome = RunOutcome {
        name: run.name.clone(),
        result: None,
        table: None,
    };
    match config.mode {
        Mode::Quick => {
            let result = sim.capture(&run.params, &config.baseline_options(run))?;
            emit(out, &result)?;
            outcome.result = Some(result);
        }
        Mode::Inspect => {
            sim.stream(&run.params, &config.baseline_options(run))?;
            emit(out, "")?;
        }
        Mode::Full => {
            let table = sweep(
                sim,
                &run.params,
                &config.sweep_plan(),
                &config.baseline_options(run),
                &config.step_options(),
            )?;
            let path = config.table_path(run);
            write_table(&table, &path)?;
            info!(
                path = %path.display(),
                rows = table.row_count(),
                columns = table.column_count(),
                "table written"
            );
            outcome.table = Some(path);
        }
    }
    Ok(outcome)
}

fn emit<W: Write>(out: &mut W, line: &str) -> Result<(), DpsError> {
    writeln!(out, "{line}")
        .and_then(|_| out.flush())
        .map_err(|err| {
            DpsError::Io(
                ErrorInfo::new("console-write", "failed to write driver output")
                    .with_hint(err.to_string()),
            )
        })
}
