//! Table Layout Engine
//!
//! Turns an abstract table description into a LaTeX `tabular` with exact
//! column widths, merged header cells and the matching horizontal rules.
//!
//! # Architecture
//!
//! ```text
//! Width Spec -> Width Resolver ─┐
//! Header Grid -> Span Detector ─┼-> Cell Renderer -> Table Assembler -> LaTeX
//! Header Grid -> Border Resolver┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use table::{TableLayout, TableSpec, ColumnWidth};
//!
//! let spec = TableSpec::new(vec![ColumnWidth::mm(10.0), ColumnWidth::weight(1.0)], 120.0)
//!     .with_head(head);
//! let layout = TableLayout::new(&spec)?;
//! let latex = layout.render(&rows)?;
//! ```

mod cell;
mod generator;
mod hline;
mod span;
mod width;

#[cfg(test)]
mod tests;

// Re-export public API
pub use cell::{
    format_mm, BodyCell, CellKind, CellStyle, HAlign, HeaderCell, StyleOverride, VAlign,
};
pub(crate) use cell::scalar_content;
pub use generator::{render, TableLayout, TableSpec};
pub use hline::{header_rules, suppression_mask, BorderRule};
pub use span::{column_span, span_end};
pub use width::{resolve_widths, ColumnWidth, Length, ResolvedWidths};
