//! One-shot assembly of a grid configuration from a base and fragments.
//!
//! [`compose`] wires the scanner, builder and mapper together for a single
//! run. [`ComposableConfigFactory`] wraps the same flow behind optional,
//! individually settable inputs, as used when the inputs come from settings
//! or command-line flags.

mod factory;

use std::io::Read;

use camino::Utf8Path;
use tracing::{info, warn};

pub use factory::{BaseConfigSource, ComposableConfigFactory};

use crate::builder::ComposableConfigBuilder;
use crate::grid::GridConfig;
use crate::scan::DirectoryScanner;
use crate::{ComposeError, ComposeResult};

/// Compose the grid configuration read from `base` with every fragment in
/// `fragment_root` whose name ends with `suffix` (`.xml` when `None`).
///
/// Fragments that cannot be registered are logged and skipped, while a
/// registered fragment that fails to parse aborts the composition.
///
/// # Errors
///
/// Returns a [`ComposeError::Precondition`] for an empty `fragment_root`
/// before touching the filesystem, a [`ComposeError::Directory`] when the
/// directory cannot be listed, and any error raised while reading the base
/// or building the composite.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use grid_compose::compose;
/// use grid_compose::mapper::XmlSourced;
///
/// let base = std::fs::File::open("hazelcast.xml").map_err(|e| e.to_string())?;
/// let config = compose(base, Utf8Path::new("conf.d"), None).map_err(|e| e.to_string())?;
/// assert!(config.xml_config().is_some());
/// # Ok::<_, String>(())
/// ```
pub fn compose<R: Read>(
    base: R,
    fragment_root: &Utf8Path,
    suffix: Option<&str>,
) -> ComposeResult<GridConfig> {
    if fragment_root.as_str().is_empty() {
        return Err(ComposeError::precondition(
            "fragment root directory must not be empty",
        ));
    }
    let mut builder = ComposableConfigBuilder::from_reader(base)?;
    let scanner = DirectoryScanner::new(fragment_root, suffix)?;
    let report = scanner.scan_with(|path| builder.add_fragment(path).map(|_| ()))?;
    if !report.skipped.is_empty() {
        warn!(
            root = %fragment_root,
            skipped = report.skipped.len(),
            "some configuration fragments were skipped"
        );
    }
    builder.build()?;
    let config = builder.into_product()?;
    info!(
        root = %fragment_root,
        fragments = report.scanned.len(),
        maps = config.maps().len(),
        queues = config.queues().len(),
        "grid configuration composed"
    );
    Ok(config)
}
