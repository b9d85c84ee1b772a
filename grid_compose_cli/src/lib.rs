//! Library half of the `grid-compose` binary.
//!
//! [`run`] loads the composer settings, composes the grid configuration once
//! and writes either the composite XML or a JSON summary of the declared
//! structures.

pub mod cli;
pub mod error;
pub mod logging;
pub mod output;

use grid_compose::{ComposableConfigFactory, ComposerSettings};
use tracing::info;

use crate::cli::Args;
use crate::error::CliError;

/// Compose the configuration described by `args` and emit the result.
///
/// # Errors
///
/// Returns a [`CliError`] when settings cannot be loaded, composition fails
/// or the result cannot be written.
pub fn run(args: &Args) -> Result<(), CliError> {
    let settings = ComposerSettings::load(args.config.as_deref(), &args.overrides())?;
    let mut factory = ComposableConfigFactory::from_settings(&settings);
    let config = factory.initialise()?;
    let rendered = if args.summary {
        output::render_summary(config)?
    } else {
        output::render_xml(config)?
    };
    output::emit(args.output.as_deref(), &rendered)?;
    info!(
        destination = args.output.as_ref().map_or("stdout", |path| path.as_str()),
        summary = args.summary,
        "wrote composed configuration"
    );
    Ok(())
}
