use std::error::Error;

use clap::Args;
use dps_core::ParamSet;
use dps_exp::{PresetRegistry, RunCatalog};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list runs that belong to the default pass.
    #[arg(long)]
    pub active: bool,
}

#[derive(Debug, Serialize)]
struct RunListing<'a> {
    name: &'a str,
    active: bool,
    presets: &'a [&'a str],
    params: ParamSet,
}

pub fn run(args: &ListArgs) -> Result<(), Box<dyn Error>> {
    let registry = PresetRegistry::builtin();
    let catalog = RunCatalog::builtin();
    let listings = catalog
        .defs()
        .iter()
        .filter(|def| def.active || !args.active)
        .map(|def| {
            def.compose(&registry).map(|run| RunListing {
                name: def.name,
                active: def.active,
                presets: def.presets,
                params: run.params,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    println!("{}", serde_json::to_string_pretty(&listings)?);
    Ok(())
}
