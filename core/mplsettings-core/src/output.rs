//! Streaming output helpers.

use std::io::{self, Write};

use serde::Serialize;

use crate::style::StyleTable;

/// Write any serializable value as prettified JSON, newline terminated.
pub fn write_json_pretty<T: Serialize + ?Sized>(value: &T, mut w: impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    w.write_all(json.as_bytes())?;
    w.write_all(b"\n")
}

/// Write one JSON document per item (NDJSON).
pub fn write_ndjson<T: Serialize>(items: &[T], mut w: impl Write) -> io::Result<()> {
    for item in items {
        let line = serde_json::to_string(item)?;
        w.write_all(line.as_bytes())?;
        w.write_all(b"\n")?;
    }
    Ok(())
}

/// Write the style table in `matplotlibrc` syntax.
pub fn write_rc(style: &StyleTable, mut w: impl Write) -> io::Result<()> {
    w.write_all(style.to_matplotlibrc().as_bytes())
}
