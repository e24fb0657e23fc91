//! # tabtex
//!
//! LaTeX generator for data-driven reports, written in Rust.
//!
//! ## Features
//!
//! - **Table Layout**: bordered `tabular` environments with exact column widths
//! - **Merged Cells**: multicolumn, multirow and combined merges in the header
//! - **Rule Suppression**: `\hline` / `\cline` chosen from the span structure
//! - **Page Geometry**: paper presets and margins for the `geometry` package
//! - **Report Sections**: nested macro calls for structured report items
//! - **Template Slots**: `\VAR{name}` substitution into a LaTeX template
//!
//! ## Usage Examples
//!
//! ### Table Rendering
//!
//! ```rust
//! use tabtex::{render, BodyCell, ColumnWidth, HeaderCell, TableSpec};
//!
//! let spec = TableSpec::new(
//!     vec![ColumnWidth::mm(20.0), ColumnWidth::weight(1.0), ColumnWidth::weight(1.0)],
//!     120.0,
//! )
//! .with_head(vec![
//!     vec![HeaderCell::mr("No.", 2), HeaderCell::mc("Range"), HeaderCell::v()],
//!     vec![HeaderCell::mrb(), HeaderCell::cell("min"), HeaderCell::cell("max")],
//! ]);
//! let body = vec![vec![BodyCell::from("1"), BodyCell::from("0.2"), BodyCell::from("0.9")]];
//!
//! let latex = render(&spec, &body).unwrap();
//! assert!(latex.contains("\\multirow{2}*"));
//! assert!(latex.contains("\\cline{2-2}"));
//! ```
//!
//! ### Full Document
//!
//! ```rust
//! use tabtex::{render_template, DocumentConfig};
//!
//! let config = DocumentConfig::from_json(r#"{
//!     "geometry": {"paper": "a4", "left": 25, "right": 25, "top": 20, "bottom": 20},
//!     "table": {"col_lens": ["30mm", 1], "head": [[{"type": "cell", "content": "Key"}, {"type": "cell", "content": "Value"}]]},
//!     "data": [["a", "1"]]
//! }"#).unwrap();
//!
//! let tex = render_template(&config, "\\usepackage[\\VAR{geometry}]{geometry}\n\\VAR{table}").unwrap();
//! assert!(tex.contains("left=25mm"));
//! assert!(tex.contains("\\begin{tabular}{|c|c|}"));
//! ```

/// Core modules: table engine, document config and assembly
pub mod core;

/// Data layer - static lookup tables and constants
pub mod data;

/// Feature modules - geometry, sections, templates
pub mod features;

/// Utility modules
pub mod utils;

// Re-export core functions
pub use crate::core::config::{ConfigFormat, DocumentConfig, TableConfig};
pub use crate::core::document::{render_document, render_template, RenderedDocument};
pub use crate::core::table::{
    render, BodyCell, BorderRule, CellKind, CellStyle, ColumnWidth, HAlign, HeaderCell,
    StyleOverride, TableLayout, TableSpec, VAlign,
};

// Re-export data modules
pub use data::constants;

// Re-export feature modules
pub use features::geometry;
pub use features::sections;
pub use features::templates;

// Re-export utilities
pub use utils::error::{LayoutError, LayoutResult};
