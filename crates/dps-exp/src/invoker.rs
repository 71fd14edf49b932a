use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use dps_core::errors::{DpsError, ErrorInfo};
use dps_core::ParamSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Run-level flags appended after the `key=value` tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimOptions {
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub log_path: Option<PathBuf>,
    /// Simulated duration in hours.
    #[serde(default)]
    pub duration_hours: Option<u32>,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Seam between the driver and the external simulator.
///
/// Every call corresponds to exactly one simulator invocation.
pub trait Simulator {
    /// Runs the simulator with inherited stdio and waits for it to exit.
    fn stream(&self, params: &ParamSet, options: &SimOptions) -> Result<(), DpsError>;

    /// Runs the simulator and returns its trimmed standard output.
    ///
    /// Standard error stays attached to the terminal.
    fn capture(&self, params: &ParamSet, options: &SimOptions) -> Result<String, DpsError>;
}

/// Builds the simulator argument list (without the executable).
pub fn build_args(params: &ParamSet, options: &SimOptions) -> Vec<String> {
    let mut args = params.to_tokens();
    if options.verbose {
        args.push("--verbose".to_string());
    }
    if let Some(path) = &options.log_path {
        args.push(format!("--log={}", path.display()));
    }
    if let Some(hours) = options.duration_hours {
        args.push(format!("--duration={hours}"));
    }
    if let Some(seed) = options.seed {
        args.push(format!("--seed={seed}"));
    }
    args
}

/// Simulator backed by a child process, one process per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSimulator {
    executable: PathBuf,
}

impl ProcessSimulator {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn command(&self, params: &ParamSet, options: &SimOptions) -> (Command, String) {
        let args = build_args(params, options);
        let line = std::iter::once(self.executable.display().to_string())
            .chain(args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");
        debug!(command = %line, "invoking simulator");
        let mut command = Command::new(&self.executable);
        command.args(&args);
        (command, line)
    }

    fn launch_error(&self, line: &str, err: std::io::Error) -> DpsError {
        DpsError::Launch(
            ErrorInfo::new("simulator-launch", "failed to start simulator")
                .with_context("executable", self.executable.display())
                .with_context("command", line)
                .with_hint(err.to_string()),
        )
    }
}

fn check_status(status: ExitStatus, line: &str) -> Result<(), DpsError> {
    if status.success() {
        return Ok(());
    }
    Err(DpsError::Exit {
        code: status.code(),
        info: ErrorInfo::new("simulator-exit", "simulator exited unsuccessfully")
            .with_context("command", line)
            .with_hint("the simulator's diagnostics were printed to stderr"),
    })
}

impl Simulator for ProcessSimulator {
    fn stream(&self, params: &ParamSet, options: &SimOptions) -> Result<(), DpsError> {
        let (mut command, line) = self.command(params, options);
        let status = command
            .stdin(Stdio::null())
            .status()
            .map_err(|err| self.launch_error(&line, err))?;
        check_status(status, &line)
    }

    fn capture(&self, params: &ParamSet, options: &SimOptions) -> Result<String, DpsError> {
        let (mut command, line) = self.command(params, options);
        let output = command
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|err| self.launch_error(&line, err))?;
        check_status(output.status, &line)?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// In-process simulator computing results from a closure.
///
/// Streaming runs evaluate the closure and discard the result.
pub struct FnSimulator<F> {
    eval: F,
}

impl<F> FnSimulator<F>
where
    F: Fn(&ParamSet) -> Result<String, DpsError>,
{
    pub fn new(eval: F) -> Self {
        Self { eval }
    }
}

impl<F> Simulator for FnSimulator<F>
where
    F: Fn(&ParamSet) -> Result<String, DpsError>,
{
    fn stream(&self, params: &ParamSet, _options: &SimOptions) -> Result<(), DpsError> {
        (self.eval)(params).map(|_| ())
    }

    fn capture(&self, params: &ParamSet, _options: &SimOptions) -> Result<String, DpsError> {
        (self.eval)(params).map(|text| text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_follow_parameters_in_fixed_order() {
        let params = ParamSet::from_pairs([("strength", 223), ("hitBonus", 4)]);
        let options = SimOptions {
            verbose: true,
            log_path: Some(PathBuf::from("2h-arms.text")),
            duration_hours: Some(10),
            seed: Some(7),
        };
        assert_eq!(
            build_args(&params, &options),
            vec![
                "strength=223",
                "hitBonus=4",
                "--verbose",
                "--log=2h-arms.text",
                "--duration=10",
                "--seed=7",
            ]
        );
    }

    #[test]
    fn default_options_add_no_flags() {
        let params = ParamSet::from_pairs([("dualWield", 0)]);
        assert_eq!(build_args(&params, &SimOptions::default()), vec!["dualWield=0"]);
    }
}
