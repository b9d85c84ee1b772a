//! Composite document builder.
//!
//! [`ComposableConfigBuilder`] owns the base document and a
//! [`FragmentRegistry`]. Fragments are registered one at a time and merged in
//! a single [`build`](ComposableConfigBuilder::build) call, which serializes
//! the composite, maps it through a [`ConfigMapper`] and keeps the product.
//! Merging happens on a working copy, so a failing fragment leaves the
//! builder exactly as it was before the call.

mod registry;

use std::fmt;
use std::io::Read;
use std::sync::Arc;

use camino::Utf8Path;
use tracing::{debug, info};

pub use registry::FragmentRegistry;

use crate::grid::GridConfigMapper;
use crate::mapper::{ConfigMapper, XmlSourced};
use crate::merge::merge_fragment_into;
use crate::result_ext::FragmentResultExt;
use crate::selector::SelectorSet;
use crate::tree::Document;
use crate::{ComposeError, ComposeResult, ComposeResultExt};

enum BuildState<T> {
    Unbuilt,
    Built(T),
}

/// Accumulates fragments and composes them into the base document once.
///
/// # Examples
///
/// ```
/// use grid_compose::builder::ComposableConfigBuilder;
/// use grid_compose::mapper::XmlSourced;
///
/// let mut builder = ComposableConfigBuilder::from_reader("<hazelcast/>".as_bytes())?;
/// let config = builder.build()?;
/// assert!(config.maps().is_empty());
/// assert!(config.xml_config().is_some_and(|xml| xml.contains("<hazelcast/>")));
/// # Ok::<_, std::sync::Arc<grid_compose::ComposeError>>(())
/// ```
pub struct ComposableConfigBuilder<M: ConfigMapper = GridConfigMapper> {
    base: Document,
    registry: FragmentRegistry,
    selectors: SelectorSet,
    mapper: M,
    state: BuildState<M::Output>,
}

impl ComposableConfigBuilder {
    /// Read the base document from `reader` and use the grid mapper.
    ///
    /// # Errors
    ///
    /// Returns a [`ComposeError::File`] when reading fails and a
    /// [`ComposeError::Xml`] when the base document is malformed.
    pub fn from_reader<R: Read>(reader: R) -> ComposeResult<Self> {
        let base = Document::from_reader(reader, "<base configuration>")?;
        Ok(Self::new(base, GridConfigMapper::default()))
    }

    /// Read the base document from the file at `path`.
    ///
    /// The file is closed before this function returns.
    ///
    /// # Errors
    ///
    /// Returns a [`ComposeError::File`] when the file cannot be opened or read
    /// and a [`ComposeError::Xml`] when it is malformed.
    pub fn open(path: &Utf8Path) -> ComposeResult<Self> {
        let file = std::fs::File::open(path).for_file(path)?;
        let base = Document::from_reader(file, path.as_str())?;
        Ok(Self::new(base, GridConfigMapper::default()))
    }
}

impl<M: ConfigMapper> ComposableConfigBuilder<M> {
    /// Builder over an already parsed `base` document using `mapper`.
    #[must_use]
    pub fn new(base: Document, mapper: M) -> Self {
        Self {
            base,
            registry: FragmentRegistry::default(),
            selectors: SelectorSet::grid(),
            mapper,
            state: BuildState::Unbuilt,
        }
    }

    /// Replace the selectors applied to every fragment.
    #[must_use]
    pub fn with_selectors(mut self, selectors: SelectorSet) -> Self {
        self.selectors = selectors;
        self
    }

    /// Base document; after a successful build it holds the composite.
    #[must_use]
    pub const fn base(&self) -> &Document {
        &self.base
    }

    /// Selectors applied to every fragment.
    #[must_use]
    pub const fn selectors(&self) -> &SelectorSet {
        &self.selectors
    }

    /// Registered fragments in merge order.
    #[must_use]
    pub const fn fragments(&self) -> &FragmentRegistry {
        &self.registry
    }

    /// Whether [`Self::build`] has completed.
    #[must_use]
    pub const fn is_built(&self) -> bool {
        matches!(self.state, BuildState::Built(_))
    }

    /// Register the fragment at `path`.
    ///
    /// Registering the same file twice, under any spelling, is a no-op; the
    /// return value reports whether the fragment was new.
    ///
    /// # Errors
    ///
    /// Returns a [`ComposeError::Precondition`] for an empty path and
    /// [`ComposeError::AlreadyBuilt`] once the builder has been built.
    pub fn add_fragment(&mut self, path: &Utf8Path) -> ComposeResult<bool> {
        if self.is_built() {
            return Err(Arc::new(ComposeError::AlreadyBuilt));
        }
        let added = self.registry.register(path)?;
        if added {
            debug!(fragment = %path, "registered configuration fragment");
        } else {
            debug!(fragment = %path, "configuration fragment already registered");
        }
        Ok(added)
    }

    /// Merge every registered fragment and map the composite document.
    ///
    /// Fragments are merged in registry order. On success the builder keeps
    /// the composite as its base and the product becomes available through
    /// [`Self::product`].
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::AlreadyBuilt`] on a second call, a
    /// [`ComposeError::Fragment`] naming the first fragment that could not be
    /// read or parsed, a [`ComposeError::Serialize`] when the composite cannot
    /// be written and any error raised by the mapper. On error the builder is
    /// left unchanged.
    pub fn build(&mut self) -> ComposeResult<&M::Output> {
        if self.is_built() {
            return Err(Arc::new(ComposeError::AlreadyBuilt));
        }
        info!(fragments = self.registry.len(), "composing configuration");
        let mut composite = self.base.clone();
        let mut appended = 0;
        for fragment in self.registry.iter() {
            appended += merge_fragment_into(composite.root_mut(), fragment, &self.selectors)
                .for_fragment(fragment)?;
        }
        let xml = composite
            .to_xml_string()
            .map_err(|source| Arc::new(ComposeError::Serialize { source }))?;
        let mut product = self.mapper.map(composite.root())?;
        product.set_xml_config(xml);
        info!(
            fragments = self.registry.len(),
            appended, "composed configuration"
        );
        self.base = composite;
        self.state = BuildState::Built(product);
        self.product()
    }

    /// Product of the completed build.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::NotReady`] before [`Self::build`] succeeded.
    pub fn product(&self) -> ComposeResult<&M::Output> {
        match &self.state {
            BuildState::Built(product) => Ok(product),
            BuildState::Unbuilt => Err(Arc::new(ComposeError::NotReady)),
        }
    }

    /// Consume the builder, returning the product of the completed build.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::NotReady`] before [`Self::build`] succeeded.
    pub fn into_product(self) -> ComposeResult<M::Output> {
        match self.state {
            BuildState::Built(product) => Ok(product),
            BuildState::Unbuilt => Err(Arc::new(ComposeError::NotReady)),
        }
    }
}

impl<M: ConfigMapper> fmt::Debug for ComposableConfigBuilder<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposableConfigBuilder")
            .field("root", &self.base.root().name())
            .field("fragments", &self.registry)
            .field("selectors", &self.selectors.len())
            .field("built", &self.is_built())
            .finish_non_exhaustive()
    }
}
