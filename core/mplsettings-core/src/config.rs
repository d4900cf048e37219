//! Settings file and well-known locations under `~/.mplsettings`.
//!
//! ```toml
//! dpi = 300
//! font = "Inter"
//! font_paths = ["/opt/fonts"]
//! verbose = false
//! follow_symlinks = false
//! ```
//!
//! Every key is optional. A missing file means defaults.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SettingsError};

/// Overrides the settings file location.
pub const CONFIG_ENV: &str = "MPLSETTINGS_CONFIG";

pub const DEFAULT_DPI: u32 = 300;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsConfig {
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    /// Extra directories loaded before listing or applying a style.
    #[serde(default)]
    pub font_paths: Vec<PathBuf>,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_dpi() -> u32 {
    DEFAULT_DPI
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            font: None,
            font_paths: Vec::new(),
            verbose: false,
            follow_symlinks: false,
        }
    }
}

impl SettingsConfig {
    /// Load from `path`; a file that does not exist yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text).map_err(|source| SettingsError::ConfigParse {
                path: path.to_path_buf(),
                source,
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Load from `MPLSETTINGS_CONFIG`, else `~/.mplsettings/config.toml`.
    pub fn load_default() -> Result<Self> {
        Self::load(&config_path()?)
    }

    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// `<HOME>/.mplsettings`.
pub fn settings_dir() -> Result<PathBuf> {
    settings_dir_in(env::var_os("HOME"))
}

// An empty HOME is still a HOME: it resolves to `/.mplsettings`.
fn settings_dir_in(home: Option<OsString>) -> Result<PathBuf> {
    let mut dir = home.ok_or(SettingsError::HomeUnset)?;
    dir.push("/.mplsettings");
    Ok(PathBuf::from(dir))
}

/// `<HOME>/.mplsettings/fonts`, always searched first by the loader.
pub fn default_font_dir() -> Result<PathBuf> {
    Ok(settings_dir()?.join("fonts"))
}

pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    Ok(settings_dir()?.join("config.toml"))
}
