//! Document descriptions as read from JSON or TOML
//!
//! These types mirror the input format one to one. Nothing here is trusted:
//! [`TableSpec::from_config`] turns a [`TableConfig`] into a validated spec.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::core::table::{
    scalar_content, BodyCell, CellKind, CellStyle, ColumnWidth, HeaderCell, StyleOverride,
    TableSpec,
};
use crate::data::constants::DEFAULT_TABCOLSEP_MM;
use crate::features::geometry::GeometryConfig;
use crate::features::sections::{ReportItem, SectionMacros};
use crate::utils::error::{LayoutError, LayoutResult};

/// Whole document: geometry, optional table with its data, report items
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentConfig {
    pub geometry: GeometryConfig,
    #[serde(default)]
    pub table: Option<TableConfig>,
    /// Body grid of the table
    #[serde(default)]
    pub data: Vec<Vec<BodyCell>>,
    #[serde(default)]
    pub sections: Vec<ReportItem>,
    #[serde(default)]
    pub section_macros: SectionMacros,
}

/// Input format of a document description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a file extension; anything but `.toml` is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

impl DocumentConfig {
    pub fn parse(input: &str, format: ConfigFormat) -> LayoutResult<Self> {
        match format {
            ConfigFormat::Json => Ok(serde_json::from_str(input)?),
            ConfigFormat::Toml => Ok(toml::from_str(input)?),
        }
    }

    pub fn from_json(input: &str) -> LayoutResult<Self> {
        Self::parse(input, ConfigFormat::Json)
    }

    pub fn from_toml(input: &str) -> LayoutResult<Self> {
        Self::parse(input, ConfigFormat::Toml)
    }

    /// Read a description from disk, format chosen by extension
    pub fn load(path: impl AsRef<Path>) -> LayoutResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let format = ConfigFormat::from_path(path);
        debug!(path = %path.display(), ?format, "loading document description");
        Self::parse(&text, format)
    }
}

/// Table settings shared by every cell
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvConfig {
    /// Cell padding in mm on each side
    #[serde(default)]
    pub tabcolsep: Option<f64>,
    /// Width budget in mm; defaults to the text width
    #[serde(default)]
    pub tablewidth: Option<f64>,
    #[serde(default)]
    pub default_style: StyleOverride,
    #[serde(default)]
    pub head_style: StyleOverride,
}

/// Column width entry: a length token or a weight
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawWidth {
    Weight(f64),
    Length(String),
}

/// Header cell as written: a type tag plus optional content and style
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawHeaderCell {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, deserialize_with = "scalar_content")]
    pub content: String,
    #[serde(default, alias = "row_count")]
    pub rows: Option<usize>,
    #[serde(flatten)]
    pub style: StyleOverride,
}

/// Table settings, column policy and header grid
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    #[serde(default)]
    pub env: EnvConfig,
    pub col_lens: Vec<RawWidth>,
    /// Per-column body styles; every column gets the defaults when absent
    #[serde(default)]
    pub col_styles: Option<Vec<StyleOverride>>,
    #[serde(default)]
    pub head: Vec<Vec<RawHeaderCell>>,
}

impl RawWidth {
    pub fn resolve(&self) -> LayoutResult<ColumnWidth> {
        match self {
            RawWidth::Weight(w) => Ok(ColumnWidth::weight(*w)),
            RawWidth::Length(s) => ColumnWidth::parse_absolute(s),
        }
    }
}

impl RawHeaderCell {
    pub fn resolve(&self) -> LayoutResult<HeaderCell> {
        let kind: CellKind = self.kind.parse()?;
        if kind.is_placeholder() && !self.content.is_empty() {
            return Err(LayoutError::invalid(format!(
                "'{}' placeholder cannot carry content '{}'",
                kind, self.content
            )));
        }
        Ok(HeaderCell {
            kind,
            content: self.content.clone(),
            rows: self.rows,
            style: self.style,
        })
    }
}

impl TableSpec {
    /// Build a validated spec; `text_width` is used when no `tablewidth` is set
    pub fn from_config(config: &TableConfig, text_width: f64) -> LayoutResult<Self> {
        let widths = config
            .col_lens
            .iter()
            .map(RawWidth::resolve)
            .collect::<LayoutResult<Vec<_>>>()?;

        let head = config
            .head
            .iter()
            .map(|row| {
                row.iter()
                    .map(RawHeaderCell::resolve)
                    .collect::<LayoutResult<Vec<_>>>()
            })
            .collect::<LayoutResult<Vec<_>>>()?;

        let budget = config.env.tablewidth.unwrap_or(text_width);
        let mut spec = TableSpec::new(widths, budget)
            .with_tabcolsep(config.env.tabcolsep.unwrap_or(DEFAULT_TABCOLSEP_MM))
            .with_default_style(CellStyle::default().with(&config.env.default_style))
            .with_head_style(config.env.head_style)
            .with_head(head);
        if let Some(styles) = &config.col_styles {
            spec = spec.with_col_styles(styles.clone());
        }

        spec.validate()?;
        Ok(spec)
    }
}
