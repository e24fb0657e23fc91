//! Cell kinds, styles and per-cell LaTeX rendering

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::data::constants::LENGTH_PRECISION;
use crate::utils::error::{LayoutError, LayoutResult};

/// Kind of a header grid entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Single cell
    Cell,
    /// First cell of a horizontal merge
    MultiColumn,
    /// First cell of a vertical merge
    MultiRow,
    /// First cell of a merge spanning rows and columns
    MultiColumnRow,
    /// Non-first row of a `MultiColumnRow` merge
    MultiColumnRowBlank,
    /// Non-first row of a `MultiRow` merge
    MultiRowBlank,
    /// Column covered by a `MultiColumnRowBlank` to its left
    VerticalBlank,
    /// Column covered by a `MultiColumn`/`MultiColumnRow` to its left
    Continuation,
}

impl CellKind {
    /// Tag used in table descriptions
    pub fn tag(&self) -> &'static str {
        match self {
            CellKind::Cell => "cell",
            CellKind::MultiColumn => "mc",
            CellKind::MultiRow => "mr",
            CellKind::MultiColumnRow => "mcr",
            CellKind::MultiColumnRowBlank => "mcrb",
            CellKind::MultiRowBlank => "mrb",
            CellKind::VerticalBlank => "vb",
            CellKind::Continuation => "v",
        }
    }

    /// Placeholder entries carry no content of their own
    pub fn is_placeholder(&self) -> bool {
        matches!(
            self,
            CellKind::MultiColumnRowBlank
                | CellKind::MultiRowBlank
                | CellKind::VerticalBlank
                | CellKind::Continuation
        )
    }

    /// Upper cell of a vertical span, the rule below it is never drawn
    pub fn opens_vertical_span(&self) -> bool {
        matches!(
            self,
            CellKind::MultiRow | CellKind::MultiColumnRow | CellKind::Continuation
        )
    }

    /// Lower part of a vertical span
    pub fn continues_vertical_span(&self) -> bool {
        matches!(
            self,
            CellKind::MultiColumnRowBlank | CellKind::MultiRowBlank | CellKind::VerticalBlank
        )
    }

    /// Marker kind that extends this cell to the right, if it spans columns
    pub fn column_marker(&self) -> Option<CellKind> {
        match self {
            CellKind::MultiColumn | CellKind::MultiColumnRow => Some(CellKind::Continuation),
            CellKind::MultiColumnRowBlank => Some(CellKind::VerticalBlank),
            _ => None,
        }
    }
}

impl FromStr for CellKind {
    type Err = LayoutError;

    fn from_str(s: &str) -> LayoutResult<Self> {
        match s.trim() {
            "cell" => Ok(CellKind::Cell),
            "mc" => Ok(CellKind::MultiColumn),
            "mr" => Ok(CellKind::MultiRow),
            "mcr" => Ok(CellKind::MultiColumnRow),
            "mcrb" => Ok(CellKind::MultiColumnRowBlank),
            "mrb" => Ok(CellKind::MultiRowBlank),
            "vb" => Ok(CellKind::VerticalBlank),
            "v" => Ok(CellKind::Continuation),
            other => Err(LayoutError::invalid(format!("unknown cell type '{}'", other))),
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Horizontal alignment inside a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HAlign {
    #[serde(rename = "l", alias = "left")]
    Left,
    #[default]
    #[serde(rename = "c", alias = "center")]
    Center,
    #[serde(rename = "r", alias = "right")]
    Right,
    #[serde(rename = "j", alias = "justify")]
    Justify,
}

impl HAlign {
    /// Paragraph directive placed before the content
    pub fn directive(&self) -> &'static str {
        match self {
            HAlign::Left => "\\raggedright ",
            HAlign::Center => "\\centering ",
            HAlign::Right => "\\raggedleft ",
            HAlign::Justify => "",
        }
    }
}

/// Vertical alignment inside a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VAlign {
    #[serde(rename = "t", alias = "top")]
    Top,
    #[default]
    #[serde(rename = "c", alias = "center")]
    Center,
    #[serde(rename = "b", alias = "bottom")]
    Bottom,
}

/// Fully resolved style of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub bold: bool,
    pub halign: HAlign,
    pub valign: VAlign,
}

/// Partial style; unset fields fall through to the style underneath
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StyleOverride {
    #[serde(default, rename = "bf", skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, rename = "h", skip_serializing_if = "Option::is_none")]
    pub halign: Option<HAlign>,
    #[serde(default, rename = "v", skip_serializing_if = "Option::is_none")]
    pub valign: Option<VAlign>,
}

impl StyleOverride {
    pub fn bold() -> Self {
        StyleOverride {
            bold: Some(true),
            ..Default::default()
        }
    }

    /// Stack `other` on top of `self`; fields set in `other` win
    pub fn then(&self, other: &StyleOverride) -> StyleOverride {
        StyleOverride {
            bold: other.bold.or(self.bold),
            halign: other.halign.or(self.halign),
            valign: other.valign.or(self.valign),
        }
    }
}

impl CellStyle {
    /// New style with the fields set in `over` replaced
    pub fn with(&self, over: &StyleOverride) -> CellStyle {
        CellStyle {
            bold: over.bold.unwrap_or(self.bold),
            halign: over.halign.unwrap_or(self.halign),
            valign: over.valign.unwrap_or(self.valign),
        }
    }

    /// Wrap content with bold, vertical fill rules and the paragraph directive
    ///
    /// `single_row` cells get `\smallskip` above and below; cells spanning
    /// rows leave the spacing to `\multirow`.
    pub fn apply(&self, content: &str, single_row: bool) -> String {
        let content = if self.bold {
            format!("\\textbf{{{}}}", content)
        } else {
            content.to_string()
        };

        let content = match self.valign {
            VAlign::Bottom => format!("\\rule{{0mm}}{{\\fill}}\\\\{}", content),
            VAlign::Top => format!("{}\\\\\\rule{{0mm}}{{\\fill}}", content),
            VAlign::Center => content,
        };

        let content = if single_row {
            format!("\\smallskip {}\\smallskip", content)
        } else {
            content
        };

        format!("{}{}", self.halign.directive(), content)
    }
}

/// One entry of the header grid
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub kind: CellKind,
    pub content: String,
    /// Number of rows a `MultiRow`/`MultiColumnRow` covers
    pub rows: Option<usize>,
    pub style: StyleOverride,
}

impl HeaderCell {
    pub fn new(kind: CellKind, content: impl Into<String>) -> Self {
        HeaderCell {
            kind,
            content: content.into(),
            rows: None,
            style: StyleOverride::default(),
        }
    }

    pub fn cell(content: impl Into<String>) -> Self {
        Self::new(CellKind::Cell, content)
    }

    pub fn mc(content: impl Into<String>) -> Self {
        Self::new(CellKind::MultiColumn, content)
    }

    pub fn mr(content: impl Into<String>, rows: usize) -> Self {
        Self::new(CellKind::MultiRow, content).with_rows(rows)
    }

    pub fn mcr(content: impl Into<String>, rows: usize) -> Self {
        Self::new(CellKind::MultiColumnRow, content).with_rows(rows)
    }

    /// Placeholder of the given kind
    pub fn marker(kind: CellKind) -> Self {
        Self::new(kind, String::new())
    }

    pub fn v() -> Self {
        Self::marker(CellKind::Continuation)
    }

    pub fn vb() -> Self {
        Self::marker(CellKind::VerticalBlank)
    }

    pub fn mrb() -> Self {
        Self::marker(CellKind::MultiRowBlank)
    }

    pub fn mcrb() -> Self {
        Self::marker(CellKind::MultiColumnRowBlank)
    }

    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn with_style(mut self, style: StyleOverride) -> Self {
        self.style = style;
        self
    }
}

/// One entry of the body grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BodyCell {
    Text(#[serde(deserialize_with = "scalar_content")] String),
    Styled {
        #[serde(deserialize_with = "scalar_content")]
        content: String,
        #[serde(flatten)]
        style: StyleOverride,
    },
}

impl BodyCell {
    pub fn content(&self) -> &str {
        match self {
            BodyCell::Text(s) => s,
            BodyCell::Styled { content, .. } => content,
        }
    }

    pub fn style(&self) -> StyleOverride {
        match self {
            BodyCell::Text(_) => StyleOverride::default(),
            BodyCell::Styled { style, .. } => *style,
        }
    }
}

impl From<&str> for BodyCell {
    fn from(s: &str) -> Self {
        BodyCell::Text(s.to_string())
    }
}

impl From<String> for BodyCell {
    fn from(s: String) -> Self {
        BodyCell::Text(s)
    }
}

/// Cell content as written in a data file: text, a number or a flag
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

/// Read a string, number or boolean as cell text
pub(crate) fn scalar_content<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => s,
        Scalar::Number(n) => n.to_string(),
        Scalar::Flag(b) => b.to_string(),
    })
}

/// Format a length in mm, rounded and without trailing zeros
pub fn format_mm(v: f64) -> String {
    let s = format!("{:.*}", LENGTH_PRECISION, v);
    let s = s.trim_end_matches('0');
    let s = s.trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

// ============================================================================
// Cell markup
// ============================================================================

/// Single cell of `width` mm
pub fn simple_cell(content: &str, width: f64, style: &CellStyle) -> String {
    format!(
        "\\parbox[c][][s]{{{}mm}}{{{}}}",
        format_mm(width),
        style.apply(content, true)
    )
}

/// Horizontal merge over `cols` columns whose inner widths add up to `width`
pub fn multicolumn_cell(content: &str, cols: usize, width: f64, style: &CellStyle) -> String {
    format!(
        "\\multicolumn{{{}}}{{|c|}}{{\\parbox[c][][c]{{{}mm}}{{{}}}}}",
        cols,
        format_mm(width),
        style.apply(content, true)
    )
}

/// Vertical merge over `rows` rows
pub fn multirow_cell(content: &str, rows: usize, width: f64, style: &CellStyle) -> String {
    format!(
        "\\multirow{{{}}}*{{\\parbox[c][][c]{{{}mm}}{{{}}}}}",
        rows,
        format_mm(width),
        style.apply(content, false)
    )
}

/// Merge over `cols` columns and `rows` rows
pub fn multicolumn_row_cell(
    content: &str,
    cols: usize,
    rows: usize,
    width: f64,
    style: &CellStyle,
) -> String {
    format!(
        "\\multicolumn{{{}}}{{|c|}}{{{}}}",
        cols,
        multirow_cell(content, rows, width, style)
    )
}

/// Lower rows of a `multicolumn_row_cell`, keeps the vertical borders
pub fn multicolumn_blank(cols: usize) -> String {
    format!("\\multicolumn{{{}}}{{|c|}}{{}}", cols)
}
