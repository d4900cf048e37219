//! Font file discovery for mplsettings-core.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Path to a candidate font file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FontFileRef {
    pub path: PathBuf,
}

/// Result of one walk: the font files found and the entries that could not be visited.
#[derive(Debug, Default)]
pub struct Discovered {
    pub files: Vec<FontFileRef>,
    /// Dangling links, link loops, unreadable directories. Walking continues past them.
    pub skipped: Vec<walkdir::Error>,
}

/// Recursive filesystem walker that collects TrueType and OpenType files.
///
/// A root may be a directory or a single font file. Roots that do not exist
/// contribute nothing; deciding whether that deserves a warning is the
/// loader's business.
#[derive(Debug, Clone)]
pub struct PathDiscovery {
    roots: Vec<PathBuf>,
    follow_symlinks: bool,
}

impl PathDiscovery {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let roots = roots.into_iter().map(Into::into).collect();
        Self {
            roots,
            follow_symlinks: false,
        }
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn discover(&self) -> Discovered {
        let mut found = Discovered::default();

        for root in &self.roots {
            if !root.exists() {
                continue;
            }

            for entry in WalkDir::new(root).follow_links(self.follow_symlinks) {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        found.skipped.push(err);
                        continue;
                    }
                };
                if entry.file_type().is_file() && is_font(entry.path()) {
                    found.files.push(FontFileRef {
                        path: entry.path().to_path_buf(),
                    });
                }
            }
        }

        found.files.sort();
        found.files.dedup();
        found
    }
}

/// Extensions the plotting stack treats as loadable outline fonts.
pub(crate) fn is_font(path: &Path) -> bool {
    let ext = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.to_ascii_lowercase(),
        None => return false,
    };

    matches!(ext.as_str(), "ttf" | "otf" | "ttc" | "otc")
}
