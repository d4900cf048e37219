//! In-process font registry.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::names::FontFace;

/// The set of fonts a plotting session may select by family name.
///
/// Faces are keyed by file path and collection index, so registering the
/// same file twice leaves the registry unchanged. The registry only grows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FontRegistry {
    faces: BTreeSet<FontFace>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a face. Returns `false` when an identical face was already known.
    pub fn add_face(&mut self, face: FontFace) -> bool {
        if self.contains_source(&face.path, face.ttc_index) {
            return false;
        }
        self.faces.insert(face)
    }

    pub fn extend<I>(&mut self, faces: I) -> usize
    where
        I: IntoIterator<Item = FontFace>,
    {
        let mut added = 0;
        for face in faces {
            if self.add_face(face) {
                added += 1;
            }
        }
        added
    }

    pub fn faces(&self) -> impl Iterator<Item = &FontFace> {
        self.faces.iter()
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Sorted, de-duplicated family names of every registered face.
    pub fn family_names(&self) -> Vec<String> {
        let names: BTreeSet<&str> = self.faces.iter().map(|f| f.family.as_str()).collect();
        names.into_iter().map(str::to_string).collect()
    }

    /// Family names matching any of `patterns` (all names when empty).
    pub fn family_names_matching(&self, patterns: &[Regex]) -> Vec<String> {
        let mut names = self.family_names();
        if !patterns.is_empty() {
            names.retain(|name| patterns.iter().any(|re| re.is_match(name)));
        }
        names
    }

    pub fn contains_family(&self, family: &str) -> bool {
        self.faces.iter().any(|f| f.family == family)
    }

    /// Distinct font files backing the registered faces.
    pub fn font_files(&self) -> Vec<PathBuf> {
        let files: BTreeSet<&PathBuf> = self.faces.iter().map(|f| &f.path).collect();
        files.into_iter().cloned().collect()
    }

    fn contains_source(&self, path: &Path, ttc_index: Option<u32>) -> bool {
        self.faces
            .iter()
            .any(|f| f.path == path && f.ttc_index == ttc_index)
    }
}
