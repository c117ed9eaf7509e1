mod animate;
mod cli;
mod colormap;
mod config;
mod error;
mod fonts;
mod index;
mod mask;
mod pipeline;
mod raster;
mod render;
mod report;
mod stats;

use clap::Parser;
use env_logger::Env;
use log::info;

use cli::Args;
use pipeline::Pipeline;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let config = args.into_config()?;

    info!("starting night-light animation pipeline");
    Pipeline::new(config).run()?;
    info!("done");

    Ok(())
}
