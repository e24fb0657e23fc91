//! Page geometry
//!
//! Resolves paper size and margins (all in millimetres) into the option
//! string of the `geometry` package and the text block dimensions. The text
//! width is the default width budget for tables.
//!
//! ## Example
//!
//! ```rust
//! use tabtex::geometry::{Geometry, GeometryConfig};
//!
//! let config = GeometryConfig {
//!     paper: Some("a4".to_string()),
//!     left: 25.0,
//!     right: 25.0,
//!     ..Default::default()
//! };
//! let geometry = Geometry::from_config(&config).unwrap();
//! assert_eq!(geometry.text_width(), 160.0);
//! assert!(geometry.header().starts_with("paperwidth=210mm,paperheight=297mm"));
//! ```

use serde::Deserialize;

use crate::core::table::format_mm;
use crate::data::constants::paper_size;
use crate::utils::error::{LayoutError, LayoutResult};

/// Geometry as written in a document description
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeometryConfig {
    /// Paper preset name, e.g. "a4" or "letter"
    #[serde(default)]
    pub paper: Option<String>,
    /// Explicit paper width, wins over the preset
    #[serde(default)]
    pub paperwidth: Option<f64>,
    /// Explicit paper height, wins over the preset
    #[serde(default)]
    pub paperheight: Option<f64>,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub bottom: f64,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub right: f64,
    /// Swap paper width and height
    #[serde(default)]
    pub landscape: bool,
}

/// Validated page geometry in millimetres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub paper_width: f64,
    pub paper_height: f64,
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Geometry {
    pub fn from_config(config: &GeometryConfig) -> LayoutResult<Self> {
        let preset = match &config.paper {
            Some(name) => Some(
                paper_size(name)
                    .ok_or_else(|| LayoutError::invalid(format!("unknown paper '{}'", name)))?,
            ),
            None => None,
        };

        let (width, height) = match (config.paperwidth, config.paperheight, preset) {
            (Some(w), Some(h), _) => (w, h),
            (w, h, Some((pw, ph))) => (w.unwrap_or(pw), h.unwrap_or(ph)),
            _ => {
                return Err(LayoutError::invalid(
                    "geometry needs a paper preset or both paperwidth and paperheight",
                ))
            }
        };
        let (width, height) = if config.landscape {
            (height, width)
        } else {
            (width, height)
        };

        let geometry = Geometry {
            paper_width: width,
            paper_height: height,
            top: config.top,
            bottom: config.bottom,
            left: config.left,
            right: config.right,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    fn validate(&self) -> LayoutResult<()> {
        for (name, value) in self.fields() {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::invalid(format!(
                    "geometry {} must be a non-negative length, got {}",
                    name, value
                )));
            }
        }
        if self.text_width() <= 0.0 || self.text_height() <= 0.0 {
            return Err(LayoutError::invalid(format!(
                "margins leave no text area on a {}x{}mm page",
                format_mm(self.paper_width),
                format_mm(self.paper_height)
            )));
        }
        Ok(())
    }

    fn fields(&self) -> [(&'static str, f64); 6] {
        [
            ("paperwidth", self.paper_width),
            ("paperheight", self.paper_height),
            ("top", self.top),
            ("bottom", self.bottom),
            ("left", self.left),
            ("right", self.right),
        ]
    }

    pub fn text_width(&self) -> f64 {
        self.paper_width - self.left - self.right
    }

    pub fn text_height(&self) -> f64 {
        self.paper_height - self.top - self.bottom
    }

    /// Options for `\usepackage[...]{geometry}`
    pub fn header(&self) -> String {
        self.fields()
            .iter()
            .map(|(name, value)| format!("{}={}mm", name, format_mm(*value)))
            .collect::<Vec<_>>()
            .join(",")
    }
}
