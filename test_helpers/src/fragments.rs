//! Temporary fragment directories for discovery and composition tests.
//!
//! # Examples
//!
//! ```
//! use test_helpers::fragments::FragmentDir;
//! use test_helpers::samples;
//!
//! let dir = FragmentDir::new()?;
//! let maps = dir.write("maps.xml", samples::MAPS_FRAGMENT)?;
//! assert!(maps.starts_with(dir.path()));
//! # Ok::<_, anyhow::Error>(())
//! ```

use std::io::Write as _;

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use tempfile::TempDir;

/// Temporary directory populated with fragment files; removed on drop.
#[derive(Debug)]
pub struct FragmentDir {
    path: Utf8PathBuf,
    dir: Dir,
    _temp: TempDir,
}

impl FragmentDir {
    /// Create an empty fragment directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the temporary directory cannot be created or its
    /// path is not valid UTF-8.
    pub fn new() -> Result<Self> {
        let temp = TempDir::new().context("create fragment directory")?;
        let path = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .map_err(|raw| anyhow!("temporary directory path is not valid UTF-8: {raw:?}"))?;
        let dir = Dir::open_ambient_dir(&path, ambient_authority())
            .with_context(|| format!("open {path} with cap-std"))?;
        Ok(Self {
            path,
            dir,
            _temp: temp,
        })
    }

    /// Absolute path of the directory.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Write `contents` to `name` inside the directory, returning its path.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be created or written.
    pub fn write(&self, name: &str, contents: &str) -> Result<Utf8PathBuf> {
        let mut file = self
            .dir
            .create(name)
            .with_context(|| format!("create {name}"))?;
        file.write_all(contents.as_bytes())
            .with_context(|| format!("write {name}"))?;
        Ok(self.path.join(name))
    }

    /// Create a nested directory called `name`, returning its path.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub fn create_subdir(&self, name: &str) -> Result<Utf8PathBuf> {
        self.dir
            .create_dir(name)
            .with_context(|| format!("create directory {name}"))?;
        Ok(self.path.join(name))
    }
}
