//! Sweep-and-tabulate driver for the external `dps` combat simulator.

mod invoker;
mod loadouts;
mod orchestrate;
mod runs;
mod sweep;
mod table;

pub use invoker::{build_args, FnSimulator, ProcessSimulator, SimOptions, Simulator};
pub use loadouts::PresetRegistry;
pub use orchestrate::{run_all, DriverConfig, DriverReport, Mode, RunOutcome};
pub use runs::{select_runs, Run, RunCatalog, RunDef};
pub use sweep::{standard_axes, sweep, AxisRule, SweepAxis, SweepPlan};
pub use table::{read_table, write_table, Table, DELIMITER};
