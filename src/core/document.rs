//! Document assembly
//!
//! Resolves a [`DocumentConfig`] into the named slots a LaTeX template
//! expects. The table engine only sees the resolved text width.

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::core::config::DocumentConfig;
use crate::core::table::{format_mm, TableLayout, TableSpec};
use crate::features::geometry::Geometry;
use crate::features::sections::{render_sections, SectionWidths};
use crate::features::templates::fill_template;
use crate::utils::error::{LayoutError, LayoutResult};

/// Everything generated for one document
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub geometry: Geometry,
    /// Resolved table, if the document has one
    pub layout: Option<TableLayout>,
    /// Slot name to markup, in a stable order
    pub slots: IndexMap<String, String>,
}

impl RenderedDocument {
    pub fn slot(&self, name: &str) -> Option<&str> {
        self.slots.get(name).map(String::as_str)
    }

    /// Fill `template` with this document's slots
    pub fn fill(&self, template: &str) -> LayoutResult<String> {
        fill_template(template, &self.slots)
    }
}

/// Render geometry, table and report sections of a document
pub fn render_document(config: &DocumentConfig) -> LayoutResult<RenderedDocument> {
    let geometry = Geometry::from_config(&config.geometry)?;
    let text_width = geometry.text_width();

    let mut slots = IndexMap::new();
    slots.insert("geometry".to_string(), geometry.header());
    slots.insert("textwidth".to_string(), format_mm(text_width));
    slots.insert("textheight".to_string(), format_mm(geometry.text_height()));

    let boxes = SectionWidths::from_text_width(text_width);
    slots.insert("intro_width".to_string(), format_mm(boxes.intro));
    slots.insert("picbox_width".to_string(), format_mm(boxes.picbox));
    slots.insert("picbox_half_width".to_string(), format_mm(boxes.picbox_half));
    slots.insert(
        "sections".to_string(),
        render_sections(&config.sections, &config.section_macros),
    );

    let layout = match &config.table {
        Some(table) => {
            let spec = TableSpec::from_config(table, text_width)?;
            let layout = TableLayout::new(&spec)?;
            let markup = layout.render(&config.data)?;

            let widths: Vec<String> = layout
                .widths()
                .columns
                .iter()
                .map(|w| format_mm(*w))
                .collect();
            slots.insert("table".to_string(), markup);
            slots.insert("tablewidth".to_string(), format_mm(layout.table_width()));
            slots.insert("colwidths".to_string(), widths.join(","));
            Some(layout)
        }
        None if !config.data.is_empty() => {
            return Err(LayoutError::invalid(format!(
                "{} data row(s) given but the document has no table",
                config.data.len()
            )));
        }
        None => None,
    };

    info!(
        rows = config.data.len(),
        sections = config.sections.len(),
        has_table = layout.is_some(),
        "document rendered"
    );
    debug!(slots = ?slots.keys().collect::<Vec<_>>(), "available slots");

    Ok(RenderedDocument {
        geometry,
        layout,
        slots,
    })
}

/// Render a document and fill `template` with the result
pub fn render_template(config: &DocumentConfig, template: &str) -> LayoutResult<String> {
    render_document(config)?.fill(template)
}
