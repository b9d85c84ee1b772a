//! Composable XML configuration for data-grid servers.
//!
//! A base configuration document is combined with fragment files discovered
//! in a directory: every data structure declaration (`queue`, `map`,
//! `multimap`, `topic`, `semaphore`) found in a fragment is appended to the
//! base root, the composite is serialized, and the result is mapped onto a
//! typed [`GridConfig`] that keeps the composite text for inspection.
//!
//! [`compose`] runs the whole flow once. The pieces are public so callers can
//! assemble their own flow: [`DirectoryScanner`] discovers fragments,
//! [`ComposableConfigBuilder`] registers and merges them, and
//! [`ConfigMapper`](mapper::ConfigMapper) turns the composite into a typed
//! value.

use std::sync::Arc;

pub mod builder;
mod compose;
mod error;
pub mod grid;
pub mod mapper;
pub mod merge;
mod path;
mod result_ext;
pub mod scan;
pub mod selector;
pub mod settings;
pub mod tree;

pub use builder::ComposableConfigBuilder;
pub use compose::{BaseConfigSource, ComposableConfigFactory, compose};
pub use error::ComposeError;
pub use grid::{GridConfig, GridConfigMapper};
pub use path::canonicalise;
pub use result_ext::{ComposeResultExt, SettingsResultExt};
pub use scan::DirectoryScanner;
pub use selector::{SelectorSet, StructureKind};
pub use settings::ComposerSettings;

/// Result type used throughout the crate.
///
/// Errors are shared behind an [`Arc`] so they can be recorded in scan
/// reports and wrapped as the source of a fragment failure without cloning.
pub type ComposeResult<T> = Result<T, Arc<ComposeError>>;
