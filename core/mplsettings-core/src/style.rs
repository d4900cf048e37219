//! rcParams-style table consumed by the plotting backend.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Text, axes, tick and legend labels.
pub const SMALL_SIZE: i64 = 7;
/// Defined for completeness; no key uses it.
pub const MEDIUM_SIZE: i64 = 9;
/// Figure titles.
pub const BIGGER_SIZE: i64 = 11;

/// Parameter names written by [`crate::StyleContext::setup_plots`].
pub mod keys {
    pub const FIGURE_DPI: &str = "figure.dpi";
    pub const FONT_FAMILY: &str = "font.family";
    pub const PDF_FONTTYPE: &str = "pdf.fonttype";
    pub const FONT_SIZE: &str = "font.size";
    pub const AXES_TITLESIZE: &str = "axes.titlesize";
    pub const AXES_LABELSIZE: &str = "axes.labelsize";
    pub const XTICK_LABELSIZE: &str = "xtick.labelsize";
    pub const YTICK_LABELSIZE: &str = "ytick.labelsize";
    pub const LEGEND_FONTSIZE: &str = "legend.fontsize";
    pub const FIGURE_TITLESIZE: &str = "figure.titlesize";
}

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RcValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl RcValue {
    /// A number that stays an integer when it has no fractional part.
    pub fn number(value: f64) -> Self {
        const EXACT: f64 = 9_007_199_254_740_992.0; // 2^53
        if value.fract() == 0.0 && value.abs() <= EXACT {
            RcValue::Int(value as i64)
        } else {
            RcValue::Float(value)
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            RcValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            RcValue::Str(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for RcValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RcValue::Bool(true) => f.write_str("True"),
            RcValue::Bool(false) => f.write_str("False"),
            RcValue::Int(v) => write!(f, "{v}"),
            RcValue::Float(v) => write!(f, "{v}"),
            RcValue::Str(v) => f.write_str(v),
        }
    }
}

impl From<bool> for RcValue {
    fn from(value: bool) -> Self {
        RcValue::Bool(value)
    }
}

impl From<i64> for RcValue {
    fn from(value: i64) -> Self {
        RcValue::Int(value)
    }
}

impl From<u32> for RcValue {
    fn from(value: u32) -> Self {
        RcValue::Int(i64::from(value))
    }
}

impl From<f64> for RcValue {
    fn from(value: f64) -> Self {
        RcValue::Float(value)
    }
}

impl From<&str> for RcValue {
    fn from(value: &str) -> Self {
        RcValue::Str(value.to_string())
    }
}

impl From<String> for RcValue {
    fn from(value: String) -> Self {
        RcValue::Str(value)
    }
}

/// How text is stored when a figure is saved as PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfFontType {
    /// Glyphs converted to Type 3 procedures; text is not editable.
    Type3 = 3,
    /// TrueType fonts embedded as-is; text stays editable.
    TrueType = 42,
}

impl From<PdfFontType> for RcValue {
    fn from(value: PdfFontType) -> Self {
        RcValue::Int(value as i64)
    }
}

/// Ordered parameter table keyed by dotted rcParams names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleTable {
    params: BTreeMap<String, RcValue>,
}

impl StyleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one parameter, returning the value it replaced.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<RcValue>) -> Option<RcValue> {
        self.params.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&RcValue> {
        self.params.get(key)
    }

    /// Set several parameters of one group, e.g. `rc("axes", [("titlesize", 7)])`
    /// writes `axes.titlesize`.
    pub fn rc<'a, I, V>(&mut self, group: &str, entries: I)
    where
        I: IntoIterator<Item = (&'a str, V)>,
        V: Into<RcValue>,
    {
        for (name, value) in entries {
            self.set(format!("{group}.{name}"), value);
        }
    }

    /// Apply the fixed size scheme: everything small except figure titles.
    pub fn apply_size_scheme(&mut self) {
        self.rc("font", [("size", SMALL_SIZE)]);
        self.rc("axes", [("titlesize", SMALL_SIZE), ("labelsize", SMALL_SIZE)]);
        self.rc("xtick", [("labelsize", SMALL_SIZE)]);
        self.rc("ytick", [("labelsize", SMALL_SIZE)]);
        self.rc("legend", [("fontsize", SMALL_SIZE)]);
        self.rc("figure", [("titlesize", BIGGER_SIZE)]);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RcValue)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Render as `matplotlibrc` lines (`key: value`), in key order.
    pub fn to_matplotlibrc(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.iter() {
            out.push_str(key);
            out.push_str(": ");
            out.push_str(&value.to_string());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rc_prefixes_group_names() {
        let mut table = StyleTable::new();
        table.rc("axes", [("titlesize", 7_i64), ("labelsize", 9_i64)]);

        assert_eq!(table.get("axes.titlesize"), Some(&RcValue::Int(7)));
        assert_eq!(table.get("axes.labelsize"), Some(&RcValue::Int(9)));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn size_scheme_uses_small_and_bigger_only() {
        let mut table = StyleTable::new();
        table.apply_size_scheme();

        for key in [
            keys::FONT_SIZE,
            keys::AXES_TITLESIZE,
            keys::AXES_LABELSIZE,
            keys::XTICK_LABELSIZE,
            keys::YTICK_LABELSIZE,
            keys::LEGEND_FONTSIZE,
        ] {
            assert_eq!(table.get(key).and_then(RcValue::as_int), Some(SMALL_SIZE), "{key}");
        }
        assert_eq!(
            table.get(keys::FIGURE_TITLESIZE).and_then(RcValue::as_int),
            Some(BIGGER_SIZE)
        );
        assert!(table.iter().all(|(_, v)| v.as_int() != Some(MEDIUM_SIZE)));
    }

    #[test]
    fn whole_numbers_stay_integers() {
        assert_eq!(RcValue::number(300.0), RcValue::Int(300));
        assert_eq!(RcValue::number(72.5), RcValue::Float(72.5));
        assert_eq!(RcValue::number(f64::INFINITY), RcValue::Float(f64::INFINITY));
    }

    #[test]
    fn pdf_font_type_maps_to_integer_codes() {
        assert_eq!(RcValue::from(PdfFontType::TrueType), RcValue::Int(42));
        assert_eq!(RcValue::from(PdfFontType::Type3), RcValue::Int(3));
    }

    #[test]
    fn matplotlibrc_is_sorted_key_value_lines() {
        let mut table = StyleTable::new();
        table.set(keys::PDF_FONTTYPE, PdfFontType::TrueType);
        table.set(keys::FIGURE_DPI, 300_u32);
        table.set(keys::FONT_FAMILY, "Inter");
        table.set("text.usetex", false);

        assert_eq!(
            table.to_matplotlibrc(),
            "figure.dpi: 300\nfont.family: Inter\npdf.fonttype: 42\ntext.usetex: False\n"
        );
    }

    #[test]
    fn serializes_as_flat_json_object() {
        let mut table = StyleTable::new();
        table.set(keys::FIGURE_DPI, 150_u32);
        table.set(keys::FONT_FAMILY, "Inter");

        let json = serde_json::to_value(&table).expect("json");
        assert_eq!(json["figure.dpi"], 150);
        assert_eq!(json["font.family"], "Inter");

        let back: StyleTable = serde_json::from_value(json).expect("round trip");
        assert_eq!(back, table);
    }
}
