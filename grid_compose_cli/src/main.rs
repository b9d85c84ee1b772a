//! CLI entrypoint for `grid-compose`.

use clap::Parser;

use grid_compose_cli::cli::Args;
use grid_compose_cli::{logging, run};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init()?;
    let args = Args::parse();
    run(&args).map_err(color_eyre::eyre::Report::from)
}
