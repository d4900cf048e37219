//! Family-name extraction from font files.

use std::fs;
use std::path::{Path, PathBuf};

use read_fonts::tables::name::{Name, NameId};
use read_fonts::{FileRef, FontRef, TableProvider};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SettingsError};

const WINDOWS_ENGLISH_US: u16 = 0x0409;

/// One face of a font file together with the family it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FontFace {
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttc_index: Option<u32>,
    pub family: String,
}

/// Read every face in `path` and resolve its family name.
///
/// Collections yield one face per member. A face without a usable family
/// record falls back to the file stem.
pub fn read_faces(path: &Path) -> Result<Vec<FontFace>> {
    let data = fs::read(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parse_err = |source| SettingsError::FontParse {
        path: path.to_path_buf(),
        source,
    };

    let fonts: Vec<(Option<u32>, FontRef)> = match FileRef::new(&data).map_err(parse_err)? {
        FileRef::Font(font) => vec![(None, font)],
        FileRef::Collection(collection) => collection
            .iter()
            .enumerate()
            .map(|(idx, font)| font.map(|font| (Some(idx as u32), font)))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(parse_err)?,
    };

    Ok(fonts
        .into_iter()
        .map(|(ttc_index, font)| FontFace {
            path: path.to_path_buf(),
            ttc_index,
            family: family_name(&font).unwrap_or_else(|| file_stem(path)),
        })
        .collect())
}

/// Family name from the `name` table: ID 1, then the typographic family (ID 16).
pub fn family_name(font: &FontRef) -> Option<String> {
    let table = font.name().ok()?;

    [NameId::FAMILY_NAME, NameId::TYPOGRAPHIC_FAMILY_NAME]
        .into_iter()
        .find_map(|id| lookup_name(&table, id))
}

fn lookup_name(table: &Name, id: NameId) -> Option<String> {
    let data = table.string_data();
    let mut candidates: Vec<_> = table
        .name_record()
        .iter()
        .filter(|record| record.is_unicode() && record.name_id() == id)
        .collect();

    // English (US) records win over other localisations.
    candidates.sort_by_key(|record| record.language_id() != WINDOWS_ENGLISH_US);

    candidates.into_iter().find_map(|record| {
        let rendered = record.string(data).ok()?.to_string();
        let trimmed = rendered.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
