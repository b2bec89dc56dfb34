//! TOML configuration.
//!
//! Looked up at `--config PATH` when given, otherwise in the platform config
//! directory:
//! - Linux: ~/.config/tom-city-edition/config.toml
//! - macOS: ~/Library/Application Support/tom-city-edition/config.toml
//! - Windows: %APPDATA%\tom-city-edition\config\config.toml
//!
//! Every key is optional. A missing default file means built-in defaults; a
//! file that exists but does not parse is an error.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use edition_clip::branding::{DEFAULT_CALL_TO_ACTION, DEFAULT_CREDIT};
use edition_clip::share::{DEFAULT_SHARE_TEXT, DEFAULT_SHARE_TITLE};
use edition_model::PAPERS_DIR;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

const APP_NAME: &str = "tom-city-edition";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub paths: PathsConfig,
    pub branding: BrandingConfig,
    pub share: ShareConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Root of the `papers/` layout.
    pub papers_dir: PathBuf,
    /// Catalog JSON. When absent the catalog is scanned from `papers_dir`.
    pub catalog: Option<PathBuf>,
    /// Where clip downloads are written.
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            papers_dir: PathBuf::from(PAPERS_DIR),
            catalog: None,
            output_dir: PathBuf::from("clips"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrandingConfig {
    pub logo: PathBuf,
    pub font: PathBuf,
    pub call_to_action: String,
    pub credit: String,
    /// `#rrggbb`
    pub accent: String,
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            logo: PathBuf::from("assets/logo.png"),
            font: PathBuf::from("assets/fonts/Inter.ttf"),
            call_to_action: DEFAULT_CALL_TO_ACTION.to_string(),
            credit: DEFAULT_CREDIT.to_string(),
            accent: "#c4161c".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShareConfig {
    pub title: String,
    pub text: String,
    /// External program that receives the clip path as its last argument.
    pub command: Option<Vec<String>>,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_SHARE_TITLE.to_string(),
            text: DEFAULT_SHARE_TEXT.to_string(),
            command: None,
        }
    }
}

/// Platform default config file location.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

impl Config {
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `explicit`, or from the default location.
    ///
    /// # Errors
    ///
    /// An explicit file must exist. Any file that exists must parse.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::read(path);
        }
        let Some(path) = default_config_path() else {
            debug!("no platform config directory, using defaults");
            return Ok(Self::default());
        };
        match Self::read(&path) {
            Err(ConfigError::Read { source, .. }) if source.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text, path)?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
