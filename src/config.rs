//! Run settings, layered from defaults, an optional TOML file, the
//! environment and command-line flags (later layers win).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "lunchcal.toml";

const ENV_PREFIX: &str = "NUTRISLICE";

static DEFAULT_DISTRICT: &str = "a2schools";
static DEFAULT_MENU_TYPE: &str = "lunch";
const DEFAULT_DAYS_AHEAD: i64 = 28;
static DEFAULT_OUTPUT_DIR: &str = "public";

/// Upper bound for `days_ahead` (about ten years).
pub const MAX_DAYS_AHEAD: u32 = 3650;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Nutrislice district (the API subdomain)
    pub district: String,
    /// Menu type, e.g. "lunch" or "breakfast"
    pub menu_type: String,
    /// Days to cover from today forward
    pub days_ahead: u32,
    /// Where calendars, index.html and manifest.json are written
    pub output_dir: PathBuf,
}

/// Values given explicitly on the command line.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub district: Option<String>,
    pub menu_type: Option<String>,
    pub days_ahead: Option<u32>,
    pub output_dir: Option<PathBuf>,
}

impl Settings {
    /// Load settings using the process environment.
    ///
    /// `config_file` must exist when given; otherwise `lunchcal.toml` is read
    /// if present.
    pub fn load(config_file: Option<&Path>, overrides: Overrides) -> Result<Self> {
        Self::load_from(config_file, None, overrides)
    }

    /// Like [`Settings::load`], reading `NUTRISLICE_*` variables from `env`
    /// instead of the process environment when it is `Some`.
    pub fn load_from(
        config_file: Option<&Path>,
        env: Option<HashMap<String, String>>,
        overrides: Overrides,
    ) -> Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
        };

        let settings: Settings = Config::builder()
            .set_default("district", DEFAULT_DISTRICT)?
            .set_default("menu_type", DEFAULT_MENU_TYPE)?
            .set_default("days_ahead", DEFAULT_DAYS_AHEAD)?
            .set_default("output_dir", DEFAULT_OUTPUT_DIR)?
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .set_override_option("district", overrides.district)?
            .set_override_option("menu_type", overrides.menu_type)?
            .set_override_option("days_ahead", overrides.days_ahead.map(i64::from))?
            .set_override_option(
                "output_dir",
                overrides
                    .output_dir
                    .map(|p| p.to_string_lossy().into_owned()),
            )?
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.district.trim().is_empty() {
            anyhow::bail!("District must not be empty");
        }
        if self.menu_type.trim().is_empty() {
            anyhow::bail!("Menu type must not be empty");
        }
        if self.days_ahead > MAX_DAYS_AHEAD {
            anyhow::bail!(
                "days_ahead must be at most {MAX_DAYS_AHEAD}, got {}",
                self.days_ahead
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::load_from(None, env(&[]), Overrides::default()).unwrap();
        assert_eq!(
            settings,
            Settings {
                district: "a2schools".to_string(),
                menu_type: "lunch".to_string(),
                days_ahead: 28,
                output_dir: PathBuf::from("public"),
            }
        );
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let settings = Settings::load_from(
            None,
            env(&[
                ("NUTRISLICE_DISTRICT", "otherdistrict"),
                ("NUTRISLICE_MENU_TYPE", "breakfast"),
                ("NUTRISLICE_DAYS_AHEAD", "14"),
            ]),
            Overrides::default(),
        )
        .unwrap();

        assert_eq!(settings.district, "otherdistrict");
        assert_eq!(settings.menu_type, "breakfast");
        assert_eq!(settings.days_ahead, 14);
        assert_eq!(settings.output_dir, PathBuf::from("public"));
    }

    #[test]
    fn test_flags_override_environment() {
        let settings = Settings::load_from(
            None,
            env(&[("NUTRISLICE_DISTRICT", "fromenv"), ("NUTRISLICE_DAYS_AHEAD", "14")]),
            Overrides {
                district: Some("fromflag".to_string()),
                days_ahead: Some(7),
                output_dir: Some(PathBuf::from("site/out")),
                ..Overrides::default()
            },
        )
        .unwrap();

        assert_eq!(settings.district, "fromflag");
        assert_eq!(settings.days_ahead, 7);
        assert_eq!(settings.output_dir, PathBuf::from("site/out"));
    }

    #[test]
    fn test_config_file_sits_between_defaults_and_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lunchcal.toml");
        std::fs::write(
            &path,
            "district = \"filedistrict\"\nmenu_type = \"breakfast\"\ndays_ahead = 10\n",
        )
        .unwrap();

        let settings = Settings::load_from(
            Some(&path),
            env(&[("NUTRISLICE_MENU_TYPE", "lunch")]),
            Overrides::default(),
        )
        .unwrap();

        assert_eq!(settings.district, "filedistrict");
        assert_eq!(settings.menu_type, "lunch");
        assert_eq!(settings.days_ahead, 10);
    }

    #[test]
    fn test_missing_explicit_config_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(Settings::load_from(Some(&path), env(&[]), Overrides::default()).is_err());
    }

    #[test]
    fn test_empty_district_is_rejected() {
        let result = Settings::load_from(
            None,
            env(&[]),
            Overrides {
                district: Some("  ".to_string()),
                ..Overrides::default()
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_days_ahead_is_rejected() {
        let result = Settings::load_from(
            None,
            env(&[("NUTRISLICE_DAYS_AHEAD", "-3")]),
            Overrides::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_days_ahead_above_limit_is_rejected() {
        let result = Settings::load_from(
            None,
            env(&[]),
            Overrides {
                days_ahead: Some(4_000_000_000),
                ..Overrides::default()
            },
        );
        assert!(result.is_err());

        let at_limit = Settings::load_from(
            None,
            env(&[("NUTRISLICE_DAYS_AHEAD", "3650")]),
            Overrides::default(),
        )
        .unwrap();
        assert_eq!(at_limit.days_ahead, MAX_DAYS_AHEAD);
    }
}
