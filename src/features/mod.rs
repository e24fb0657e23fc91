//! Feature modules - document parts around the table
//!
//! - Page geometry
//! - Structured report sections
//! - Template slot filling

pub mod geometry;
pub mod sections;
pub mod templates;

// Re-export commonly used types
pub use geometry::{Geometry, GeometryConfig};
pub use sections::{node_join, ReportItem, SectionMacros};
pub use templates::fill_template;
