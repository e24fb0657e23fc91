//! Data layer - Static lookup tables and constants
//!
//! - Paper size presets
//! - Length unit factors

pub mod constants;

// Re-export commonly used items
pub use constants::{paper_size, DEFAULT_TABCOLSEP_MM, PAPER_SIZES};
