//! Synthesized fonts for tests: an sfnt carrying only a `name` table.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

const NAME_TABLE_OFFSET: u32 = 12 + 16;

/// A single-face font whose family (name ID 1) is `family`.
pub fn name_only_font(family: &str) -> Vec<u8> {
    sfnt_at(0, family)
}

/// A TTC collection with one face per family.
pub fn collection(families: &[&str]) -> Vec<u8> {
    let header_len = 12 + 4 * families.len() as u32;
    let mut out = Vec::new();
    out.extend_from_slice(b"ttcf");
    out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    out.extend_from_slice(&(families.len() as u32).to_be_bytes());

    let mut faces = Vec::new();
    let mut offset = header_len;
    for family in families {
        let face = sfnt_at(offset, family);
        out.extend_from_slice(&offset.to_be_bytes());
        offset += face.len() as u32;
        faces.push(face);
    }
    for face in faces {
        out.extend_from_slice(&face);
    }
    out
}

pub fn write_font(dir: &Path, file: &str, family: &str) -> PathBuf {
    fs::create_dir_all(dir).expect("mkdir fonts");
    let path = dir.join(file);
    fs::write(&path, name_only_font(family)).expect("write font");
    path
}

fn sfnt_at(base: u32, family: &str) -> Vec<u8> {
    let name = name_table(family);
    let mut out = Vec::new();

    out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    out.extend_from_slice(&1u16.to_be_bytes()); // numTables
    out.extend_from_slice(&16u16.to_be_bytes()); // searchRange
    out.extend_from_slice(&0u16.to_be_bytes()); // entrySelector
    out.extend_from_slice(&0u16.to_be_bytes()); // rangeShift

    out.extend_from_slice(b"name");
    out.extend_from_slice(&0u32.to_be_bytes());
    out.extend_from_slice(&(base + NAME_TABLE_OFFSET).to_be_bytes());
    out.extend_from_slice(&(name.len() as u32).to_be_bytes());

    out.extend_from_slice(&name);
    out
}

fn name_table(family: &str) -> Vec<u8> {
    let encoded: Vec<u8> = family.encode_utf16().flat_map(u16::to_be_bytes).collect();
    let mut out = Vec::new();

    out.extend_from_slice(&0u16.to_be_bytes()); // format
    out.extend_from_slice(&1u16.to_be_bytes()); // count
    out.extend_from_slice(&(6u16 + 12).to_be_bytes()); // storage offset

    out.extend_from_slice(&3u16.to_be_bytes()); // Windows
    out.extend_from_slice(&1u16.to_be_bytes()); // Unicode BMP
    out.extend_from_slice(&0x0409u16.to_be_bytes());
    out.extend_from_slice(&1u16.to_be_bytes()); // family
    out.extend_from_slice(&(encoded.len() as u16).to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes());

    out.extend_from_slice(&encoded);
    out
}
