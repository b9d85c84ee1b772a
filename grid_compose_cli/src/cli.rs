//! Command-line interface definitions for `grid-compose`.

use camino::Utf8PathBuf;
use clap::Parser;
use grid_compose::settings::SettingsOverrides;

/// Parsed CLI arguments for `grid-compose`.
///
/// Flags override values from the settings file and `GRID_COMPOSE_*`
/// environment variables.
#[derive(Debug, Parser)]
#[command(name = "grid-compose")]
#[command(about = "Compose a data-grid XML configuration from a base document and fragments")]
#[command(version)]
pub struct Args {
    /// Base configuration document.
    #[arg(long, value_name = "file")]
    pub base: Option<Utf8PathBuf>,
    /// Directory holding the configuration fragments.
    #[arg(long, value_name = "dir")]
    pub fragments: Option<Utf8PathBuf>,
    /// Filename suffix identifying fragments (defaults to `.xml`).
    #[arg(long, value_name = "suffix")]
    pub suffix: Option<String>,
    /// TOML settings file.
    #[arg(long, value_name = "file")]
    pub config: Option<Utf8PathBuf>,
    /// Write the result to this file instead of standard output.
    #[arg(long, short, value_name = "file")]
    pub output: Option<Utf8PathBuf>,
    /// Emit a JSON summary of the declared structures instead of the XML.
    #[arg(long)]
    pub summary: bool,
}

impl Args {
    /// Settings layer holding the values given on the command line.
    #[must_use]
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            base_config: self.base.clone(),
            fragment_root: self.fragments.clone(),
            fragment_suffix: self.suffix.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn command_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[rstest]
    fn flags_become_overrides() {
        let args = Args::try_parse_from([
            "grid-compose",
            "--base",
            "hazelcast.xml",
            "--fragments",
            "conf.d",
            "--suffix",
            ".frag",
        ])
        .expect("arguments parse");
        let overrides = args.overrides();
        assert_eq!(overrides.base_config, Some(Utf8PathBuf::from("hazelcast.xml")));
        assert_eq!(overrides.fragment_root, Some(Utf8PathBuf::from("conf.d")));
        assert_eq!(overrides.fragment_suffix.as_deref(), Some(".frag"));
        assert!(!args.summary);
    }

    #[rstest]
    fn omitted_flags_leave_overrides_unset() {
        let args = Args::try_parse_from(["grid-compose", "--summary", "-o", "out.json"])
            .expect("arguments parse");
        assert_eq!(args.overrides(), SettingsOverrides::default());
        assert!(args.summary);
        assert_eq!(args.output, Some(Utf8PathBuf::from("out.json")));
    }

    #[rstest]
    fn unknown_flags_are_rejected() {
        assert!(Args::try_parse_from(["grid-compose", "--recursive"]).is_err());
    }
}
