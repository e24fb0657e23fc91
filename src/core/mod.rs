//! Core modules
//!
//! - `table`: table layout engine (widths, spans, rules, cell markup)
//! - `config`: document descriptions as read from JSON / TOML
//! - `document`: slot assembly for LaTeX templates

pub mod config;
pub mod document;
pub mod table;

// Re-export main types and functions
pub use config::{ConfigFormat, DocumentConfig, TableConfig};
pub use document::{render_document, render_template, RenderedDocument};
pub use table::{render, TableLayout, TableSpec};
