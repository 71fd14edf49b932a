use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use dps_plot::{render_file, FigureConfig};

#[derive(Args, Debug)]
pub struct PlotArgs {
    /// Table files produced by `dps-run full`.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    #[arg(short, long)]
    pub verbose: bool,
    #[arg(long, default_value_t = 640)]
    pub width: u32,
    #[arg(long, default_value_t = 360)]
    pub height: u32,
}

pub fn run(args: &PlotArgs) -> Result<(), Box<dyn Error>> {
    let config = FigureConfig {
        width: args.width,
        height: args.height,
        ..FigureConfig::default()
    };
    for file in &args.files {
        let svg = render_file(file, &config)?;
        println!("{}", svg.display());
    }
    Ok(())
}
