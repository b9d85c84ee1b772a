//! Layered composer settings.
//!
//! Settings are gathered with `figment` from, in increasing precedence:
//! built-in defaults, an optional TOML file, `GRID_COMPOSE_*` environment
//! variables and explicit overrides such as command-line flags. Overrides
//! left as `None` never mask a value from a lower layer.

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::scan::DEFAULT_SUFFIX;
use crate::{ComposeError, ComposeResult, SettingsResultExt};

/// Prefix of the environment variables read by [`ComposerSettings::load`].
pub const ENV_PREFIX: &str = "GRID_COMPOSE_";

/// Inputs of a composition run.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct ComposerSettings {
    /// Base configuration document.
    pub base_config: Option<Utf8PathBuf>,
    /// Directory holding the configuration fragments.
    pub fragment_root: Option<Utf8PathBuf>,
    /// Filename suffix identifying fragments.
    pub fragment_suffix: String,
}

impl Default for ComposerSettings {
    fn default() -> Self {
        Self {
            base_config: None,
            fragment_root: None,
            fragment_suffix: DEFAULT_SUFFIX.to_owned(),
        }
    }
}

/// Highest-precedence settings layer; unset fields defer to lower layers.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct SettingsOverrides {
    /// Base configuration document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_config: Option<Utf8PathBuf>,
    /// Directory holding the configuration fragments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragment_root: Option<Utf8PathBuf>,
    /// Filename suffix identifying fragments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragment_suffix: Option<String>,
}

impl ComposerSettings {
    /// Figment combining every settings layer.
    ///
    /// A missing `config_file` is skipped silently here; [`Self::load`]
    /// rejects it.
    #[must_use]
    pub fn figment(config_file: Option<&Utf8Path>, overrides: &SettingsOverrides) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = config_file {
            figment = figment.merge(Toml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides))
    }

    /// Load settings from every layer.
    ///
    /// # Errors
    ///
    /// Returns a [`ComposeError::File`] when `config_file` is given but is
    /// not a file, and a [`ComposeError::Settings`] when a layer cannot be
    /// parsed or holds a value of the wrong type.
    ///
    /// # Examples
    ///
    /// ```
    /// use grid_compose::settings::{ComposerSettings, SettingsOverrides};
    ///
    /// let overrides = SettingsOverrides {
    ///     fragment_root: Some("conf.d".into()),
    ///     ..SettingsOverrides::default()
    /// };
    /// let settings = ComposerSettings::load(None, &overrides)?;
    /// assert_eq!(settings.fragment_root.as_deref(), Some(camino::Utf8Path::new("conf.d")));
    /// # Ok::<_, std::sync::Arc<grid_compose::ComposeError>>(())
    /// ```
    pub fn load(config_file: Option<&Utf8Path>, overrides: &SettingsOverrides) -> ComposeResult<Self> {
        if let Some(path) = config_file
            && !path.is_file()
        {
            return Err(ComposeError::file(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "settings file not found"),
            ));
        }
        Self::figment(config_file, overrides).extract().into_settings()
    }
}
