//! Filesystem path helpers shared by discovery and the fragment registry.

use camino::{Utf8Path, Utf8PathBuf};

use crate::{ComposeError, ComposeResult, ComposeResultExt};

/// Canonicalise `path` using platform-specific rules.
///
/// Returns an absolute, normalised path with symlinks resolved. Fragment
/// identities are compared by this form, so two spellings of the same file
/// collapse into one registry entry.
///
/// On Windows the [`dunce`](https://docs.rs/dunce/latest/dunce/) crate is used
/// to avoid introducing UNC prefixes in diagnostic messages.
///
/// # Errors
///
/// Returns a [`ComposeError::File`] if canonicalisation fails or the result is
/// not valid UTF-8.
pub fn canonicalise(path: &Utf8Path) -> ComposeResult<Utf8PathBuf> {
    #[cfg(windows)]
    let canonical = dunce::canonicalize(path).for_file(path)?;
    #[cfg(not(windows))]
    let canonical = std::fs::canonicalize(path).for_file(path)?;
    Utf8PathBuf::from_path_buf(canonical).map_err(|raw| {
        ComposeError::file(
            path,
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("canonical path {} is not valid UTF-8", raw.display()),
            ),
        )
    })
}
