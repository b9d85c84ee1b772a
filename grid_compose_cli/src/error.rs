//! Error types for `grid-compose`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use grid_compose::ComposeError;
use thiserror::Error;

/// Errors surfaced by the `grid-compose` pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CliError {
    /// Settings could not be loaded or composition failed.
    #[error(transparent)]
    Compose(#[from] Arc<ComposeError>),

    /// The composed configuration carries no composite text.
    #[error("composed configuration has no XML text")]
    MissingXml,

    /// The structure summary could not be encoded.
    #[error("failed to encode summary: {0}")]
    Summary(#[from] serde_json::Error),

    /// Writing the output failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Destination that failed.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Writing to standard output failed.
    #[error("failed to write to standard output: {0}")]
    Stdout(#[source] std::io::Error),

    /// The log subscriber could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
}
