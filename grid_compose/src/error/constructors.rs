//! Constructors shared by the composition modules.

use std::error::Error;
use std::sync::Arc;

use camino::Utf8Path;

use super::ComposeError;
use crate::tree::XmlError;

impl ComposeError {
    /// Construct a [`ComposeError::Precondition`] wrapped in an [`Arc`].
    ///
    /// # Examples
    ///
    /// ```
    /// use grid_compose::ComposeError;
    ///
    /// let err = ComposeError::precondition("property 'fragment_root' has not been set");
    /// assert!(matches!(err.as_ref(), ComposeError::Precondition { .. }));
    /// ```
    #[must_use]
    pub fn precondition(message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::Precondition {
            message: message.into(),
        })
    }

    /// Construct a [`ComposeError::File`] for `path`.
    #[must_use]
    pub fn file(path: &Utf8Path, source: impl Into<Box<dyn Error + Send + Sync>>) -> Arc<Self> {
        Arc::new(Self::File {
            path: path.to_path_buf(),
            source: source.into(),
        })
    }

    /// Construct a [`ComposeError::Directory`] for `path`.
    #[must_use]
    pub fn directory(path: &Utf8Path, source: std::io::Error) -> Arc<Self> {
        Arc::new(Self::Directory {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Construct a [`ComposeError::Xml`] for a document read from `origin`.
    #[must_use]
    pub fn xml(origin: impl Into<String>, source: XmlError) -> Arc<Self> {
        Arc::new(Self::Xml {
            origin: origin.into(),
            source,
        })
    }

    /// Wrap `source` as the reason the fragment at `path` aborted composition.
    #[must_use]
    pub fn fragment(path: &Utf8Path, source: Arc<Self>) -> Arc<Self> {
        Arc::new(Self::Fragment {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Construct a settings error from a [`figment::Error`].
    #[must_use]
    pub fn settings(source: figment::Error) -> Arc<Self> {
        Arc::new(Self::Settings(Box::new(source)))
    }

    /// Returns the fragment path when this error aborted a composition.
    #[must_use]
    pub fn fragment_path(&self) -> Option<&Utf8Path> {
        match self {
            Self::Fragment { path, .. } => Some(path.as_path()),
            _ => None,
        }
    }
}
