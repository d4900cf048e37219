//! mplsettings-core: sensible plot defaults without remembering the knobs
//!
//! A small library that keeps a plotting session's fonts and style in one
//! place. It knows where your personal fonts live, how to read their family
//! names, and which handful of rcParams make figures look tidy in a paper.
//!
//! ## Three Things It Does
//!
//! **Load fonts**: walk `~/.mplsettings/fonts` plus any directories you name,
//! read each font's family name, and register it
//! - TrueType and OpenType files, including TTC/OTC collections
//! - Missing or empty directories produce warnings, never errors
//! - Re-loading the same directory is harmless
//!
//! **List fonts**: the sorted family names currently registered
//!
//! **Set up plots**: figure DPI, an optional font family (checked against the
//! registry), editable text in saved PDFs, and a compact size scheme
//!
//! ## A Short Session
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use mplsettings_core::{LoadOptions, SetupOptions, StyleContext};
//!
//! let mut ctx = StyleContext::new()?;
//! ctx.load_fonts(&[PathBuf::from("/opt/fonts")], &LoadOptions::default());
//! println!("available: {:?}", ctx.list_fonts());
//!
//! ctx.setup_plots(&SetupOptions::new().with_dpi(150).with_font("Inter"))?;
//! print!("{}", ctx.style().to_matplotlibrc());
//! #
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## The Cast
//!
//! - [`StyleContext`]: the session; owns the registry and the style table
//! - [`FontRegistry`]: registered faces and their family names
//! - [`StyleTable`]: rcParams keyed by dotted names
//! - [`LoadReport`]: what the loader found, path by path, plus its warnings

pub mod config;
pub mod context;
pub mod discovery;
pub mod error;
pub mod loader;
pub mod names;
pub mod output;
pub mod registry;
pub mod style;

pub use config::SettingsConfig;
pub use context::{SetupOptions, StyleContext};
pub use error::{Result, SettingsError};
pub use loader::{FontPaths, LoadOptions, LoadReport, PathReport, PathStatus};
pub use names::FontFace;
pub use registry::FontRegistry;
pub use style::{PdfFontType, RcValue, StyleTable, BIGGER_SIZE, MEDIUM_SIZE, SMALL_SIZE};
