use std::error::Error;
use std::io;
use std::path::PathBuf;

use clap::Args;
use dps_exp::{
    run_all, select_runs, DriverConfig, Mode, PresetRegistry, ProcessSimulator, RunCatalog,
};
use tracing::info;

#[derive(Args, Debug)]
pub struct DriverArgs {
    /// Pass `--verbose` to the simulator and log each command line.
    #[arg(short, long)]
    pub verbose: bool,
    /// Have the simulator write `<out-dir>/<run>.text` for each run's unperturbed invocation.
    #[arg(long)]
    pub log: bool,
    /// Simulated duration in hours, forwarded as `--duration`.
    #[arg(long)]
    pub duration: Option<u32>,
    /// Simulator seed, forwarded as `--seed`.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Simulator executable; defaults to `dps` next to this binary.
    #[arg(long = "sim", value_name = "PATH")]
    pub simulator: Option<PathBuf>,
    /// Run to process (repeatable); defaults to the active catalogue entries.
    #[arg(long = "run", value_name = "NAME")]
    pub runs: Vec<String>,
    /// Number of sweep steps per axis in full mode.
    #[arg(long, default_value_t = 5)]
    pub steps: u32,
    /// Omit the unperturbed step-0 column from full-mode tables.
    #[arg(long)]
    pub no_baseline: bool,
    /// Directory receiving tables and log files.
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}

impl DriverArgs {
    pub fn config(&self, mode: Mode) -> DriverConfig {
        DriverConfig {
            mode,
            verbose: self.verbose,
            log: self.log,
            duration_hours: self.duration,
            seed: self.seed,
            steps: self.steps,
            include_baseline: !self.no_baseline,
            out_dir: self.out_dir.clone(),
            ..DriverConfig::default()
        }
    }

    pub fn simulator_path(&self) -> PathBuf {
        self.simulator.clone().unwrap_or_else(default_simulator_path)
    }
}

fn default_simulator_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("dps")))
        .unwrap_or_else(|| PathBuf::from("dps"))
}

pub fn run(args: &DriverArgs, mode: Mode) -> Result<(), Box<dyn Error>> {
    let runs = select_runs(&RunCatalog::builtin(), &PresetRegistry::builtin(), &args.runs)?;
    let config = args.config(mode);
    let sim = ProcessSimulator::new(args.simulator_path());
    info!(
        simulator = %sim.executable().display(),
        runs = runs.len(),
        mode = ?mode,
        "starting pass"
    );
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_all(&sim, &runs, &config, &mut out)?;
    Ok(())
}
