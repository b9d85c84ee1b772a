//! Rendering and writing of the composed configuration.

use std::collections::BTreeMap;
use std::io::Write;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use grid_compose::mapper::XmlSourced;
use grid_compose::{GridConfig, StructureKind};
use serde::Serialize;

use crate::error::CliError;

/// Structure overview printed with `--summary`.
#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    /// Cluster group name.
    pub group: Option<&'a str>,
    /// Declared structure names keyed by element name.
    pub structures: BTreeMap<&'static str, Vec<&'a str>>,
    /// Grid properties.
    pub properties: &'a BTreeMap<String, String>,
}

impl<'a> Summary<'a> {
    /// Summarise `config`.
    #[must_use]
    pub fn of(config: &'a GridConfig) -> Self {
        let structures = StructureKind::ALL
            .into_iter()
            .map(|kind| (kind.element_name(), config.structure_names(kind)))
            .collect();
        Self {
            group: config.group().name.as_deref(),
            structures,
            properties: config.properties(),
        }
    }
}

/// Composite XML of `config`.
///
/// # Errors
///
/// Returns [`CliError::MissingXml`] when the configuration carries no text.
pub fn render_xml(config: &GridConfig) -> Result<String, CliError> {
    config
        .xml_config()
        .map(str::to_owned)
        .ok_or(CliError::MissingXml)
}

/// Pretty-printed JSON [`Summary`] of `config`.
///
/// # Errors
///
/// Returns [`CliError::Summary`] when encoding fails.
pub fn render_summary(config: &GridConfig) -> Result<String, CliError> {
    let mut text = serde_json::to_string_pretty(&Summary::of(config))?;
    text.push('\n');
    Ok(text)
}

/// Write `content` to `destination`, or to standard output when `None`.
///
/// # Errors
///
/// Returns [`CliError::Io`] when the destination cannot be written and
/// [`CliError::Stdout`] when standard output is closed.
pub fn emit(destination: Option<&Utf8Path>, content: &str) -> Result<(), CliError> {
    match destination {
        Some(path) => write_file(path, content),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(CliError::Stdout)
        }
    }
}

fn write_file(path: &Utf8Path, content: &str) -> Result<(), CliError> {
    let io_error = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        io_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "output path has no file name",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(io_error)?;
    dir.write(file_name, content).map_err(io_error)
}
