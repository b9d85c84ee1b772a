//! Property-driven composition that runs exactly once.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use super::compose;
use crate::grid::GridConfig;
use crate::settings::ComposerSettings;
use crate::{ComposeError, ComposeResult, ComposeResultExt};

/// Where the base configuration document comes from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BaseConfigSource {
    /// Document stored in a file.
    File(Utf8PathBuf),
    /// Document held in memory.
    Inline(String),
}

impl BaseConfigSource {
    fn describe(&self) -> &str {
        match self {
            Self::File(path) => path.as_str(),
            Self::Inline(_) => "<inline>",
        }
    }
}

/// Composes a [`GridConfig`] from individually supplied inputs.
///
/// Inputs are optional until [`initialise`](Self::initialise) validates them
/// and runs the composition. The product is then available through
/// [`product`](Self::product) for the lifetime of the factory.
///
/// # Examples
///
/// ```
/// use grid_compose::{BaseConfigSource, ComposableConfigFactory, ComposeError};
///
/// let factory = ComposableConfigFactory::default()
///     .with_base_config(BaseConfigSource::Inline("<hazelcast/>".to_owned()));
/// assert!(matches!(
///     factory.product().map(|_| ()).unwrap_err().as_ref(),
///     ComposeError::NotReady
/// ));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ComposableConfigFactory {
    base_config: Option<BaseConfigSource>,
    fragment_root: Option<Utf8PathBuf>,
    fragment_suffix: Option<String>,
    product: Option<GridConfig>,
}

impl ComposableConfigFactory {
    /// Factory populated from loaded settings.
    #[must_use]
    pub fn from_settings(settings: &ComposerSettings) -> Self {
        Self {
            base_config: settings.base_config.clone().map(BaseConfigSource::File),
            fragment_root: settings.fragment_root.clone(),
            fragment_suffix: Some(settings.fragment_suffix.clone()),
            product: None,
        }
    }

    /// Set the base configuration document.
    #[must_use]
    pub fn with_base_config(mut self, source: BaseConfigSource) -> Self {
        self.base_config = Some(source);
        self
    }

    /// Set the directory holding the configuration fragments.
    #[must_use]
    pub fn with_fragment_root(mut self, root: impl Into<Utf8PathBuf>) -> Self {
        self.fragment_root = Some(root.into());
        self
    }

    /// Set the filename suffix identifying fragments.
    #[must_use]
    pub fn with_fragment_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.fragment_suffix = Some(suffix.into());
        self
    }

    /// Configured base document source.
    #[must_use]
    pub const fn base_config(&self) -> Option<&BaseConfigSource> {
        self.base_config.as_ref()
    }

    /// Configured fragment directory.
    #[must_use]
    pub fn fragment_root(&self) -> Option<&Utf8Path> {
        self.fragment_root.as_deref()
    }

    /// Configured fragment suffix.
    #[must_use]
    pub fn fragment_suffix(&self) -> Option<&str> {
        self.fragment_suffix.as_deref()
    }

    /// Whether [`Self::initialise`] has completed.
    #[must_use]
    pub const fn is_initialised(&self) -> bool {
        self.product.is_some()
    }

    /// Validate the inputs and compose the configuration.
    ///
    /// The base file, when used, is opened here and closed before this
    /// method returns on every path.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::AlreadyBuilt`] when called again after
    /// succeeding, a [`ComposeError::Precondition`] naming the first missing
    /// property (`fragment_root`, then `base_config`) before any I/O, and any
    /// error raised by [`compose`].
    pub fn initialise(&mut self) -> ComposeResult<&GridConfig> {
        if self.product.is_some() {
            return Err(Arc::new(ComposeError::AlreadyBuilt));
        }
        let Some(root) = self.fragment_root.as_deref() else {
            return Err(ComposeError::precondition(
                "property 'fragment_root' has not been set",
            ));
        };
        let Some(source) = self.base_config.as_ref() else {
            return Err(ComposeError::precondition(
                "property 'base_config' has not been set",
            ));
        };
        debug!(base = source.describe(), root = %root, "initialising configuration factory");
        let suffix = self.fragment_suffix.as_deref();
        let config = match source {
            BaseConfigSource::File(path) => {
                let file = std::fs::File::open(path).for_file(path)?;
                compose(file, root, suffix)?
            }
            BaseConfigSource::Inline(text) => compose(text.as_bytes(), root, suffix)?,
        };
        Ok(self.product.insert(config))
    }

    /// Composed configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::NotReady`] before [`Self::initialise`]
    /// succeeded.
    pub fn product(&self) -> ComposeResult<&GridConfig> {
        self.product
            .as_ref()
            .ok_or_else(|| Arc::new(ComposeError::NotReady))
    }

    /// Consume the factory, returning the composed configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::NotReady`] before [`Self::initialise`]
    /// succeeded.
    pub fn into_product(self) -> ComposeResult<GridConfig> {
        self.product.ok_or_else(|| Arc::new(ComposeError::NotReady))
    }
}
