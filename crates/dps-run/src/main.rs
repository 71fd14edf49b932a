use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    list::{self, ListArgs},
    plot::{self, PlotArgs},
    run::{self, DriverArgs},
};
use dps_exp::Mode;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "dps-run", about = "Parameter sweep driver for the dps simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run each selected loadout once and print its DPS.
    Quick(DriverArgs),
    /// Sweep the standard axes for each loadout and write `<run>.csv` tables.
    Full(DriverArgs),
    /// Run each loadout once with the simulator's report on the terminal.
    Inspect(DriverArgs),
    /// Print the run catalogue with composed parameters as JSON.
    List(ListArgs),
    /// Render sweep tables to SVG line charts.
    Plot(PlotArgs),
}

impl Command {
    fn verbose(&self) -> bool {
        match self {
            Command::Quick(args) | Command::Full(args) | Command::Inspect(args) => args.verbose,
            Command::List(_) => false,
            Command::Plot(args) => args.verbose,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.command.verbose());
    match cli.command {
        Command::Quick(args) => run::run(&args, Mode::Quick),
        Command::Full(args) => run::run(&args, Mode::Full),
        Command::Inspect(args) => run::run(&args, Mode::Inspect),
        Command::List(args) => list::run(&args),
        Command::Plot(args) => plot::run(&args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
