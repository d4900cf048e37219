//! The style session: a font registry and a style table with one owner.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{default_font_dir, SettingsConfig, DEFAULT_DPI};
use crate::error::{Result, SettingsError};
use crate::loader::{load_fonts, FontPaths, LoadOptions, LoadReport};
use crate::registry::FontRegistry;
use crate::style::{keys, PdfFontType, RcValue, StyleTable};

#[derive(Debug, Clone, PartialEq)]
pub struct SetupOptions {
    /// Whole values are written as integers.
    pub dpi: f64,
    /// Family to select; it must be registered after loading the default directory.
    pub font: Option<String>,
}

impl Default for SetupOptions {
    fn default() -> Self {
        Self {
            dpi: f64::from(DEFAULT_DPI),
            font: None,
        }
    }
}

impl SetupOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dpi(mut self, dpi: impl Into<f64>) -> Self {
        self.dpi = dpi.into();
        self
    }

    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }
}

impl From<&SettingsConfig> for SetupOptions {
    fn from(cfg: &SettingsConfig) -> Self {
        Self {
            dpi: f64::from(cfg.dpi),
            font: cfg.font.clone(),
        }
    }
}

/// Owns everything the plotting session reads: registered fonts and rcParams.
///
/// Create one per session and pass it to whatever renders. Nothing here is
/// process-global.
#[derive(Debug, Clone)]
pub struct StyleContext {
    registry: FontRegistry,
    style: StyleTable,
    default_font_dir: PathBuf,
}

impl StyleContext {
    /// A context whose default font directory is `~/.mplsettings/fonts`.
    pub fn new() -> Result<Self> {
        Ok(Self::with_default_font_dir(default_font_dir()?))
    }

    pub fn with_default_font_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            registry: FontRegistry::new(),
            style: StyleTable::new(),
            default_font_dir: dir.into(),
        }
    }

    pub fn default_font_dir(&self) -> &Path {
        &self.default_font_dir
    }

    pub fn registry(&self) -> &FontRegistry {
        &self.registry
    }

    pub fn style(&self) -> &StyleTable {
        &self.style
    }

    /// Load fonts from the default directory followed by `paths`.
    pub fn load_fonts(&mut self, paths: &[PathBuf], opts: &LoadOptions) -> LoadReport {
        let search = FontPaths::new(&self.default_font_dir, paths);
        load_fonts(&mut self.registry, &search, opts)
    }

    /// Sorted, unique family names currently registered.
    pub fn list_fonts(&self) -> Vec<String> {
        self.registry.family_names()
    }

    /// Apply the default figure style.
    ///
    /// When a font is requested the default directory is loaded first and the
    /// family must then be registered; otherwise
    /// [`SettingsError::FontUnavailable`] is returned with `figure.dpi`
    /// already set.
    pub fn setup_plots(&mut self, opts: &SetupOptions) -> Result<()> {
        self.style.set(keys::FIGURE_DPI, RcValue::number(opts.dpi));

        if let Some(font) = &opts.font {
            self.load_fonts(&[], &LoadOptions::default());
            if !self.list_fonts().contains(font) {
                return Err(SettingsError::FontUnavailable { font: font.clone() });
            }
            self.style.set(keys::FONT_FAMILY, font.as_str());
        }

        self.style.set(keys::PDF_FONTTYPE, PdfFontType::TrueType);
        self.style.apply_size_scheme();

        debug!(params = self.style.len(), "applied plot style");
        Ok(())
    }
}
