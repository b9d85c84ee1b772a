//! Primary error enum for composition flows.

use camino::Utf8PathBuf;
use figment::Error as FigmentError;
use thiserror::Error;

use std::sync::Arc;

use crate::tree::XmlError;

/// Errors that can occur while discovering, merging or mapping configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ComposeError {
    /// A required input was not supplied or is empty.
    #[error("precondition failed: {message}")]
    Precondition {
        /// Description of the missing or invalid input.
        message: String,
    },

    /// The fragment root directory cannot be used for discovery.
    #[error("fragment directory '{path}' is not usable: {source}")]
    Directory {
        /// Directory that failed validation.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Reading a configuration file failed.
    #[error("configuration file error in '{path}': {source}")]
    File {
        /// Path that triggered the failure.
        path: Utf8PathBuf,
        /// Underlying error reported while reading the file.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A document is not well-formed XML.
    #[error("failed to parse XML from {origin}: {source}")]
    Xml {
        /// Human-readable origin of the document (a path or `<stream>`).
        origin: String,
        /// Parser failure.
        #[source]
        source: XmlError,
    },

    /// A selector expression could not be compiled.
    #[error("invalid selector '{expression}': {message}")]
    Selector {
        /// Expression as supplied.
        expression: String,
        /// Reason the expression was rejected.
        message: String,
    },

    /// Merging a registered fragment failed and composition was aborted.
    #[error("failed to merge configuration fragment '{path}': {source}")]
    Fragment {
        /// Fragment that aborted the composition.
        path: Utf8PathBuf,
        /// Underlying parse or merge failure.
        #[source]
        source: Arc<ComposeError>,
    },

    /// The composite document could not be mapped onto the typed configuration.
    #[error("failed to map <{element}> onto the typed configuration: {source}")]
    Mapping {
        /// Name of the element that failed to map.
        element: String,
        /// Deserialisation failure.
        #[source]
        source: serde_json::Error,
    },

    /// The composite document could not be serialized.
    #[error("failed to serialize the composite document: {source}")]
    Serialize {
        /// Writer failure.
        #[source]
        source: XmlError,
    },

    /// The product was requested before composition completed.
    #[error("no configuration has been composed yet; call build() or initialise() first")]
    NotReady,

    /// Composition was requested after it had already completed.
    #[error("configuration has already been composed; composition runs exactly once")]
    AlreadyBuilt,

    /// Composer settings could not be gathered.
    #[error("failed to load composer settings: {0}")]
    Settings(#[from] Box<FigmentError>),
}
