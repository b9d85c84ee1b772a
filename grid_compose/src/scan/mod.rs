//! Flat directory discovery of configuration fragments.
//!
//! [`DirectoryScanner`] lists the immediate entries of one directory and
//! yields the regular files whose name ends with the configured suffix. The
//! listing order is whatever the platform returns and carries no meaning.
//! Failures are isolated per file: an entry that cannot be inspected, or a
//! file the consumer rejects, is logged and recorded as skipped while the
//! remaining files are still visited.

use std::fmt;
use std::io;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, DirEntry, ReadDir};
use tracing::{debug, error, info, warn};

use crate::{ComposeError, ComposeResult};

/// Suffix used when the caller does not supply one.
pub const DEFAULT_SUFFIX: &str = ".xml";

/// File that discovery skipped, with the reason.
#[derive(Clone, Debug)]
pub struct SkippedFile {
    /// Path of the skipped file, or the scanned directory when the entry
    /// name itself could not be read.
    pub path: Utf8PathBuf,
    /// Failure that caused the file to be skipped.
    pub error: Arc<ComposeError>,
}

/// Outcome of [`DirectoryScanner::scan_with`].
#[derive(Debug, Default)]
#[must_use]
pub struct ScanReport {
    /// Files accepted by the consumer, in visit order.
    pub scanned: Vec<Utf8PathBuf>,
    /// Files skipped because inspecting or consuming them failed.
    pub skipped: Vec<SkippedFile>,
}

impl ScanReport {
    /// Total number of matching entries encountered.
    #[must_use]
    pub fn total(&self) -> usize {
        self.scanned.len() + self.skipped.len()
    }
}

/// Scanner bound to one fragment directory and filename suffix.
#[derive(Clone, Debug)]
pub struct DirectoryScanner {
    root: Utf8PathBuf,
    suffix: String,
}

impl DirectoryScanner {
    /// Bind a scanner to `root`, matching files ending in `suffix`.
    ///
    /// A `None` suffix falls back to [`DEFAULT_SUFFIX`].
    ///
    /// # Errors
    ///
    /// Returns a [`ComposeError::Precondition`] when `root` or `suffix` is
    /// empty, and a [`ComposeError::Directory`] when `root` does not exist,
    /// is not a directory, or cannot be opened for reading.
    pub fn new(root: impl Into<Utf8PathBuf>, suffix: Option<&str>) -> ComposeResult<Self> {
        let root = root.into();
        if root.as_str().is_empty() {
            return Err(ComposeError::precondition(
                "fragment root directory must not be empty",
            ));
        }
        let suffix = suffix.unwrap_or(DEFAULT_SUFFIX);
        if suffix.is_empty() {
            return Err(ComposeError::precondition(
                "fragment file suffix must not be empty",
            ));
        }
        let metadata = std::fs::metadata(&root).map_err(|err| ComposeError::directory(&root, err))?;
        if !metadata.is_dir() {
            return Err(ComposeError::directory(
                &root,
                io::Error::new(io::ErrorKind::InvalidInput, "path is not a directory"),
            ));
        }
        Dir::open_ambient_dir(&root, ambient_authority())
            .map_err(|err| ComposeError::directory(&root, err))?;
        Ok(Self {
            root,
            suffix: suffix.to_owned(),
        })
    }

    /// Directory this scanner lists.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Filename suffix this scanner matches.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Start a fresh listing of the directory.
    ///
    /// The returned iterator is finite and cannot be restarted; call `scan`
    /// again for a new listing. No state is shared between listings.
    ///
    /// # Errors
    ///
    /// Returns a [`ComposeError::Directory`] if the directory can no longer
    /// be opened or listed.
    pub fn scan(&self) -> ComposeResult<FragmentFiles> {
        let dir = Dir::open_ambient_dir(&self.root, ambient_authority())
            .map_err(|err| ComposeError::directory(&self.root, err))?;
        let entries = dir
            .entries()
            .map_err(|err| ComposeError::directory(&self.root, err))?;
        Ok(FragmentFiles {
            dir,
            entries,
            root: self.root.clone(),
            suffix: self.suffix.clone(),
            skipped: Vec::new(),
        })
    }

    /// Visit every matching file with `visit`, isolating failures per file.
    ///
    /// A file for which `visit` returns an error is logged and recorded in
    /// [`ScanReport::skipped`]; scanning continues with the remaining files.
    ///
    /// # Errors
    ///
    /// Only fails when the directory itself cannot be listed.
    pub fn scan_with<F>(&self, mut visit: F) -> ComposeResult<ScanReport>
    where
        F: FnMut(&Utf8Path) -> ComposeResult<()>,
    {
        info!(root = %self.root, suffix = %self.suffix, "scanning fragment directory");
        let mut files = self.scan()?;
        let mut report = ScanReport::default();
        for path in files.by_ref() {
            debug!(file = %path, "scanning fragment file");
            match visit(&path) {
                Ok(()) => {
                    debug!(file = %path, "fragment file scanned");
                    report.scanned.push(path);
                }
                Err(err) => {
                    error!(file = %path, error = %err, "failed to scan fragment file; skipping it");
                    report.skipped.push(SkippedFile { path, error: err });
                }
            }
        }
        report.skipped.extend(files.into_skipped());
        info!(
            root = %self.root,
            suffix = %self.suffix,
            scanned = report.scanned.len(),
            skipped = report.skipped.len(),
            "finished scanning fragment directory"
        );
        Ok(report)
    }
}

/// Iterator over the fragment files of one directory listing.
pub struct FragmentFiles {
    dir: Dir,
    entries: ReadDir,
    root: Utf8PathBuf,
    suffix: String,
    skipped: Vec<SkippedFile>,
}

impl FragmentFiles {
    /// Entries skipped so far because they could not be inspected.
    #[must_use]
    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    /// Consume the iterator, returning the entries it skipped.
    #[must_use]
    pub fn into_skipped(self) -> Vec<SkippedFile> {
        self.skipped
    }

    fn inspect_entry(&self, entry: &DirEntry) -> Result<Option<Utf8PathBuf>, SkippedFile> {
        let name = entry.file_name().map_err(|err| skipped(&self.root, err))?;
        if !name.ends_with(&self.suffix) {
            return Ok(None);
        }
        let path = self.root.join(&name);
        // `Dir::metadata` follows symlinks, so links to regular files count.
        let metadata = self.dir.metadata(&name).map_err(|err| skipped(&path, err))?;
        Ok(metadata.is_file().then_some(path))
    }
}

fn skipped(path: &Utf8Path, err: io::Error) -> SkippedFile {
    SkippedFile {
        path: path.to_path_buf(),
        error: ComposeError::file(path, err),
    }
}

impl fmt::Debug for FragmentFiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FragmentFiles")
            .field("root", &self.root)
            .field("suffix", &self.suffix)
            .field("skipped", &self.skipped)
            .finish_non_exhaustive()
    }
}

impl Iterator for FragmentFiles {
    type Item = Utf8PathBuf;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let outcome = match self.entries.next()? {
                Ok(entry) => self.inspect_entry(&entry),
                Err(err) => Err(skipped(&self.root, err)),
            };
            match outcome {
                Ok(Some(path)) => return Some(path),
                Ok(None) => {}
                Err(skipped) => {
                    warn!(
                        file = %skipped.path,
                        error = %skipped.error,
                        "failed to inspect directory entry; skipping it"
                    );
                    self.skipped.push(skipped);
                }
            }
        }
    }
}
