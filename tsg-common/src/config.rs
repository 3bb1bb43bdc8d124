//! Configuration for Test Status Grid.
//!
//! Loaded from an optional TOML file; every field has a default so a missing
//! file (or missing section) is never an error. CLI flags override whatever
//! the file says.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{Result, TsgError};
use crate::grid::ColorScale;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TsgConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub colors: ColorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Where the status CSV lives unless overridden on the command line.
    #[serde(default = "default_stats_file")]
    pub stats_file: PathBuf,
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            stats_file: default_stats_file(),
            log_level: default_log_level(),
        }
    }
}

/// Two-color scale for the rendered grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorConfig {
    /// Color for passed cells.
    #[serde(default = "default_pass_color")]
    pub pass: String,
    /// Color for failed cells.
    #[serde(default = "default_fail_color")]
    pub fail: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            pass: default_pass_color(),
            fail: default_fail_color(),
        }
    }
}

impl ColorConfig {
    pub fn scale(&self) -> ColorScale {
        ColorScale::new(self.pass.clone(), self.fail.clone())
    }
}

impl TsgConfig {
    /// Load configuration from `path`, or from the default location when
    /// `path` is `None`. A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(TsgError::io(&path, e)),
        };
        let config: Self = toml::from_str(&text).map_err(|source| TsgError::ConfigParse {
            path: path.clone(),
            source: Box::new(source),
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

/// Default config file location: `<config dir>/tsg/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tsg").join("config.toml"))
}

fn default_stats_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tsg")
        .join("status.csv")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_pass_color() -> String {
    "lightgreen".to_string()
}

fn default_fail_color() -> String {
    "red".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = TsgConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.colors.pass, "lightgreen");
        assert_eq!(config.colors.fail, "red");
        assert!(config.general.stats_file.ends_with("tsg/status.csv"));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = TsgConfig::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_partial_file_keeps_defaults_for_the_rest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[colors]\npass = \"#e0ffe0\"\n\n[general]\nstats_file = \"/var/lib/tsg/status.csv\"\n",
        )
        .unwrap();

        let config = TsgConfig::load(Some(&path)).unwrap();
        assert_eq!(config.colors.pass, "#e0ffe0");
        assert_eq!(config.colors.fail, "red");
        assert_eq!(
            config.general.stats_file,
            PathBuf::from("/var/lib/tsg/status.csv")
        );
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[colors\npass = ").unwrap();
        let err = TsgConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, TsgError::ConfigParse { .. }));
    }

    #[test]
    fn test_color_config_to_scale() {
        let scale = ColorConfig::default().scale();
        assert_eq!(scale.color_for(0), "lightgreen");
        assert_eq!(scale.color_for(1), "red");
    }
}
