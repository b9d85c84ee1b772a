//! Set of fragment identities awaiting composition.

use std::collections::BTreeSet;

use camino::{Utf8Path, Utf8PathBuf};

use crate::path::canonicalise;
use crate::{ComposeError, ComposeResult};

/// Ordered set of canonical fragment paths.
///
/// Iteration follows the lexicographic order of the canonical paths, so a
/// build merges fragments in a stable order regardless of discovery order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FragmentRegistry {
    paths: BTreeSet<Utf8PathBuf>,
}

impl FragmentRegistry {
    /// Register `path`, returning `true` when it was not yet present.
    ///
    /// Existing files are identified by their canonical path. A path that
    /// cannot be canonicalised, for example because the file does not exist
    /// yet, is identified by its absolute form; the failure then surfaces
    /// when the fragment is merged.
    ///
    /// # Errors
    ///
    /// Returns a [`ComposeError::Precondition`] for an empty path and a
    /// [`ComposeError::File`] when no absolute form can be derived.
    pub fn register(&mut self, path: &Utf8Path) -> ComposeResult<bool> {
        Ok(self.paths.insert(identity(path)?))
    }

    /// Whether `path` is registered under any spelling.
    #[must_use]
    pub fn contains(&self, path: &Utf8Path) -> bool {
        identity(path).is_ok_and(|id| self.paths.contains(&id))
    }

    /// Registered identities in merge order.
    pub fn iter(&self) -> impl Iterator<Item = &Utf8Path> {
        self.paths.iter().map(Utf8PathBuf::as_path)
    }

    /// Number of registered fragments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether no fragment is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

fn identity(path: &Utf8Path) -> ComposeResult<Utf8PathBuf> {
    if path.as_str().is_empty() {
        return Err(ComposeError::precondition(
            "fragment path must not be empty",
        ));
    }
    if let Ok(canonical) = canonicalise(path) {
        return Ok(canonical);
    }
    let absolute = std::path::absolute(path).map_err(|err| ComposeError::file(path, err))?;
    Utf8PathBuf::from_path_buf(absolute).map_err(|raw| {
        ComposeError::file(
            path,
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("absolute path {} is not valid UTF-8", raw.display()),
            ),
        )
    })
}
