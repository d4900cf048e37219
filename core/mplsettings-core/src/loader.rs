//! Font loading: walk search paths, read family names, register faces.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::discovery::{FontFileRef, PathDiscovery};
use crate::error::Result;
use crate::names::{read_faces, FontFace};
use crate::registry::FontRegistry;

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Log the families found under each path at info level.
    pub verbose: bool,
    pub follow_symlinks: bool,
    /// Worker threads for reading font files; `None` uses the global pool.
    pub jobs: Option<usize>,
}

/// Ordered search paths, always led by the implicit default directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontPaths {
    default_dir: PathBuf,
    extra: Vec<PathBuf>,
}

impl FontPaths {
    pub fn new(default_dir: impl Into<PathBuf>, paths: &[PathBuf]) -> Self {
        Self {
            default_dir: default_dir.into(),
            extra: paths.to_vec(),
        }
    }

    pub fn default_dir(&self) -> &Path {
        &self.default_dir
    }

    /// Paths in search order, each flagged with whether it is the default directory.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, bool)> {
        std::iter::once(self.default_dir.as_path())
            .chain(self.extra.iter().map(PathBuf::as_path))
            .map(move |path| (path, path == self.default_dir.as_path()))
    }
}

/// What happened at one search path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PathStatus {
    Loaded {
        files: usize,
        registered: usize,
        families: Vec<String>,
    },
    Empty,
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathReport {
    pub path: PathBuf,
    pub is_default: bool,
    #[serde(flatten)]
    pub status: PathStatus,
}

/// Outcome of one loader pass. Warnings are also emitted through `tracing`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub paths: Vec<PathReport>,
    pub warnings: Vec<String>,
}

impl LoadReport {
    /// Faces newly added to the registry during this pass.
    pub fn registered(&self) -> usize {
        self.paths
            .iter()
            .map(|p| match &p.status {
                PathStatus::Loaded { registered, .. } => *registered,
                _ => 0,
            })
            .sum()
    }

    fn warn(&mut self, message: String) {
        warn!("{message}");
        self.warnings.push(message);
    }
}

/// Register every usable font found under `paths` into `registry`.
///
/// Missing or empty directories never fail the pass. They produce warnings,
/// except for the default directory, whose absence or emptiness is expected.
pub fn load_fonts(registry: &mut FontRegistry, paths: &FontPaths, opts: &LoadOptions) -> LoadReport {
    let mut report = LoadReport::default();

    for (path, is_default) in paths.iter() {
        let status = if path.exists() {
            load_path(registry, path, is_default, opts, &mut report)
        } else {
            if !is_default {
                report.warn(format!(
                    "User-specified path {} does not exist.",
                    path.display()
                ));
            }
            PathStatus::Missing
        };

        report.paths.push(PathReport {
            path: path.to_path_buf(),
            is_default,
            status,
        });
    }

    report
}

fn load_path(
    registry: &mut FontRegistry,
    path: &Path,
    is_default: bool,
    opts: &LoadOptions,
    report: &mut LoadReport,
) -> PathStatus {
    let discovered = PathDiscovery::new([path])
        .follow_symlinks(opts.follow_symlinks)
        .discover();
    for err in &discovered.skipped {
        report.warn(format!("Skipping unreadable entry under {}: {err}", path.display()));
    }
    let files = discovered.files;

    let mut faces: Vec<FontFace> = Vec::new();
    for (file, result) in read_all(&files, opts.jobs) {
        match result {
            Ok(found) => {
                debug!(path = %file.display(), faces = found.len(), "read font file");
                faces.extend(found);
            }
            Err(err) => report.warn(format!("Skipping unusable font file: {err}")),
        }
    }

    if faces.is_empty() {
        if !is_default {
            report.warn(format!("No usable fonts found in {}", path.display()));
        }
        return PathStatus::Empty;
    }

    let mut families: Vec<String> = faces.iter().map(|f| f.family.clone()).collect();
    families.sort();
    families.dedup();

    if opts.verbose {
        info!(
            "Loading from {}: {}",
            path.display(),
            format_family_list(&families)
        );
    }

    PathStatus::Loaded {
        files: files.len(),
        registered: registry.extend(faces),
        families,
    }
}

fn read_all(files: &[FontFileRef], jobs: Option<usize>) -> Vec<(PathBuf, Result<Vec<FontFace>>)> {
    let run = || -> Vec<(PathBuf, Result<Vec<FontFace>>)> {
        files
            .par_iter()
            .map(|file| (file.path.clone(), read_faces(&file.path)))
            .collect()
    };

    match jobs.map(|n| ThreadPoolBuilder::new().num_threads(n).build()) {
        Some(Ok(pool)) => pool.install(run),
        Some(Err(err)) => {
            warn!("cannot build font reader pool ({err}); using the global pool");
            run()
        }
        None => run(),
    }
}

/// `['A', 'B']`, the way the listing reads in a Python session.
pub fn format_family_list(families: &[String]) -> String {
    let mut out = String::from("[");
    for (i, family) in families.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "'{family}'");
    }
    out.push(']');
    out
}
