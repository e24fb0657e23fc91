//! Column width specification and resolution

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use crate::data::constants::{MM_PER_CM, MM_PER_IN, MM_PER_PC, MM_PER_PT};
use crate::utils::error::{LayoutError, LayoutResult};

lazy_static! {
    // Absolute length token: number followed by a unit, e.g. "10mm", "2.5 cm"
    static ref LENGTH_TOKEN: Regex =
        Regex::new(r"^\s*(\d+(?:\.\d+)?|\.\d+)\s*(mm|cm|in|pt|pc)\s*$").unwrap();
}

/// An absolute length, kept in the unit it was written in
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Millimeter(f64),
    Centimeter(f64),
    Inch(f64),
    Point(f64),
    Pica(f64),
}

impl Length {
    /// Parse a length token like "10mm", "1.5cm", "72pt"
    pub fn parse(s: &str) -> LayoutResult<Length> {
        let caps = LENGTH_TOKEN
            .captures(s)
            .ok_or_else(|| LayoutError::invalid(format!("malformed length '{}'", s)))?;

        let value: f64 = caps[1]
            .parse()
            .map_err(|_| LayoutError::invalid(format!("malformed length '{}'", s)))?;

        Ok(match &caps[2] {
            "mm" => Length::Millimeter(value),
            "cm" => Length::Centimeter(value),
            "in" => Length::Inch(value),
            "pt" => Length::Point(value),
            _ => Length::Pica(value),
        })
    }

    /// Convert to millimetres
    pub fn to_mm(&self) -> f64 {
        match self {
            Length::Millimeter(v) => *v,
            Length::Centimeter(v) => v * MM_PER_CM,
            Length::Inch(v) => v * MM_PER_IN,
            Length::Point(v) => v * MM_PER_PT,
            Length::Pica(v) => v * MM_PER_PC,
        }
    }
}

/// One entry of a column width spec
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnWidth {
    /// Fixed width
    Absolute(Length),
    /// Share of the width left over after absolute columns
    Weight(f64),
}

impl ColumnWidth {
    pub fn mm(value: f64) -> Self {
        ColumnWidth::Absolute(Length::Millimeter(value))
    }

    pub fn weight(value: f64) -> Self {
        ColumnWidth::Weight(value)
    }

    /// Parse an absolute length token
    pub fn parse_absolute(s: &str) -> LayoutResult<Self> {
        Length::parse(s).map(ColumnWidth::Absolute)
    }
}

/// Column widths resolved to millimetres
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedWidths {
    /// Full width of every column, padding included
    pub columns: Vec<f64>,
    /// Table width the columns add up to
    pub total: f64,
}

impl ResolvedWidths {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Full width of column `index`
    pub fn full(&self, index: usize) -> f64 {
        self.columns[index]
    }

    /// Width available to content once `tabcolsep` is removed from both sides
    pub fn inner(&self, index: usize, tabcolsep: f64) -> f64 {
        self.columns[index] - 2.0 * tabcolsep
    }

    /// Summed inner width of columns `start..=end`
    pub fn span_inner(&self, start: usize, end: usize, tabcolsep: f64) -> f64 {
        (start..=end).map(|i| self.inner(i, tabcolsep)).sum()
    }
}

/// Resolve a width spec against a total width budget (mm)
///
/// Absolute entries keep their length. The budget left after them is split
/// across weighted entries in proportion to their weights. When there is no
/// weighted entry the table width becomes the sum of the absolute ones.
///
/// ```
/// use tabtex::core::table::{resolve_widths, ColumnWidth};
///
/// let spec = [ColumnWidth::mm(10.0), ColumnWidth::weight(2.0), ColumnWidth::weight(3.0)];
/// let widths = resolve_widths(&spec, 50.0).unwrap();
/// assert_eq!(widths.columns, vec![10.0, 16.0, 24.0]);
/// assert_eq!(widths.total, 50.0);
/// ```
pub fn resolve_widths(spec: &[ColumnWidth], budget: f64) -> LayoutResult<ResolvedWidths> {
    if spec.is_empty() {
        return Err(LayoutError::invalid("column width spec is empty"));
    }

    let mut fixed = 0.0;
    let mut weight_sum = 0.0;
    let mut weighted = 0usize;

    for (i, entry) in spec.iter().enumerate() {
        match entry {
            ColumnWidth::Absolute(len) => {
                let mm = len.to_mm();
                if !mm.is_finite() {
                    return Err(LayoutError::invalid(format!(
                        "column {} has a non-finite width",
                        i
                    )));
                }
                fixed += mm;
            }
            ColumnWidth::Weight(w) => {
                if !w.is_finite() || *w < 0.0 {
                    return Err(LayoutError::invalid(format!(
                        "column {} has invalid weight {}",
                        i, w
                    )));
                }
                weight_sum += w;
                weighted += 1;
            }
        }
    }

    if weighted == 0 {
        let columns: Vec<f64> = spec
            .iter()
            .map(|entry| match entry {
                ColumnWidth::Absolute(len) => len.to_mm(),
                ColumnWidth::Weight(_) => 0.0,
            })
            .collect();
        debug!(total = fixed, "all columns absolute, table width recomputed");
        return Ok(ResolvedWidths {
            columns,
            total: fixed,
        });
    }

    if weight_sum == 0.0 {
        return Err(LayoutError::invalid(format!(
            "{} weighted column(s) but the weight sum is zero",
            weighted
        )));
    }

    let remaining = budget - fixed;
    if remaining < 0.0 {
        warn!(
            fixed,
            budget, "absolute columns exceed the budget, weighted columns get negative width"
        );
    }

    let columns: Vec<f64> = spec
        .iter()
        .map(|entry| match entry {
            ColumnWidth::Absolute(len) => len.to_mm(),
            ColumnWidth::Weight(w) => w / weight_sum * remaining,
        })
        .collect();

    debug!(?columns, budget, "resolved column widths");

    Ok(ResolvedWidths {
        columns,
        total: budget,
    })
}
