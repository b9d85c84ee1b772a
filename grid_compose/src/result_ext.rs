//! Extensions for mapping foreign errors onto `ComposeResult` concisely.
//!
//! These helpers replace repetitive `.map_err(|e| Arc::new(...))` chains when
//! converting I/O, XML and figment failures into the crate's
//! `ComposeResult<T>` alias (`Result<T, Arc<ComposeError>>`).
//!
//! # Examples
//!
//! ```
//! use camino::Utf8Path;
//! use grid_compose::{ComposeResult, ComposeResultExt};
//!
//! fn read(path: &Utf8Path) -> ComposeResult<String> {
//!     std::fs::read_to_string(path).for_file(path)
//! }
//! ```

use std::error::Error;
use std::sync::Arc;

use camino::Utf8Path;

use crate::{ComposeError, ComposeResult};

/// Attach file context to any `Result` whose error can be boxed.
pub trait ComposeResultExt<T> {
    /// Convert the error into a [`ComposeError::File`] naming `path`.
    ///
    /// # Errors
    ///
    /// Propagates the original error wrapped in `Arc<ComposeError>`.
    fn for_file(self, path: &Utf8Path) -> ComposeResult<T>;
}

impl<T, E> ComposeResultExt<T> for Result<T, E>
where
    E: Into<Box<dyn Error + Send + Sync>>,
{
    fn for_file(self, path: &Utf8Path) -> ComposeResult<T> {
        self.map_err(|err| ComposeError::file(path, err))
    }
}

/// Extension tailored to `figment::Error` values raised while gathering settings.
pub trait SettingsResultExt<T> {
    /// Convert `Result<T, figment::Error>` into a [`ComposeError::Settings`].
    ///
    /// # Errors
    ///
    /// Returns the settings error wrapped in `Arc` when the input is `Err`.
    fn into_settings(self) -> ComposeResult<T>;
}

impl<T> SettingsResultExt<T> for Result<T, figment::Error> {
    fn into_settings(self) -> ComposeResult<T> {
        self.map_err(ComposeError::settings)
    }
}

/// Re-wrap a failure as the reason a fragment aborted composition.
pub(crate) trait FragmentResultExt<T> {
    fn for_fragment(self, path: &Utf8Path) -> ComposeResult<T>;
}

impl<T> FragmentResultExt<T> for Result<T, Arc<ComposeError>> {
    fn for_fragment(self, path: &Utf8Path) -> ComposeResult<T> {
        self.map_err(|err| ComposeError::fragment(path, err))
    }
}
