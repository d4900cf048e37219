//! Error type shared by the mplsettings-core modules.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while loading fonts or applying a style.
///
/// Missing or empty font directories are not errors: the loader reports them
/// as warnings and carries on.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// `HOME` is not set, so the default font directory cannot be built.
    #[error("HOME is not set; cannot locate the default font directory")]
    HomeUnset,

    /// A font family was requested that the registry does not know about.
    #[error(
        "Font '{font}' is not available. Check font paths and add font if necessary using `load_fonts()`."
    )]
    FontUnavailable { font: String },

    /// A file could not be read.
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file with a font extension is not a font we can parse.
    #[error("cannot parse font {path}: {source}")]
    FontParse {
        path: PathBuf,
        #[source]
        source: read_fonts::ReadError,
    },

    /// The settings file is not valid TOML for [`crate::config::SettingsConfig`].
    #[error("failed to parse settings {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T, E = SettingsError> = std::result::Result<T, E>;
