//! Constants and lookup tables for page geometry and length units
//!
//! - Paper size presets (ISO A/B series, North American sizes)
//! - Length unit conversion factors to millimetres
//! - Default table padding

use lazy_static::lazy_static;
use std::collections::HashMap;

// ============================================================================
// Length Units
// ============================================================================

/// Millimetres per centimetre
pub const MM_PER_CM: f64 = 10.0;

/// Millimetres per inch
pub const MM_PER_IN: f64 = 25.4;

/// Millimetres per TeX point (1in = 72.27pt)
pub const MM_PER_PT: f64 = 25.4 / 72.27;

/// Millimetres per pica (1pc = 12pt)
pub const MM_PER_PC: f64 = 12.0 * MM_PER_PT;

/// LaTeX's default `\tabcolsep` (6pt) expressed in millimetres
pub const DEFAULT_TABCOLSEP_MM: f64 = 6.0 * MM_PER_PT;

/// Decimal places kept when lengths are written into markup
pub const LENGTH_PRECISION: usize = 2;

// ============================================================================
// Paper Sizes
// ============================================================================

lazy_static! {
    /// Paper presets as (width, height) in millimetres, portrait orientation
    pub static ref PAPER_SIZES: HashMap<&'static str, (f64, f64)> = {
        let mut m = HashMap::new();

        // ---- ISO 216 A series ----
        m.insert("a3", (297.0, 420.0));
        m.insert("a4", (210.0, 297.0));
        m.insert("a5", (148.0, 210.0));
        m.insert("a6", (105.0, 148.0));

        // ---- ISO 216 B series ----
        m.insert("b4", (250.0, 353.0));
        m.insert("b5", (176.0, 250.0));

        // ---- North American ----
        m.insert("letter", (215.9, 279.4));
        m.insert("legal", (215.9, 355.6));
        m.insert("executive", (184.15, 266.7));

        m
    };
}

/// Look up a paper preset by name (case-insensitive, `paper` suffix allowed)
///
/// ```
/// use tabtex::constants::paper_size;
///
/// assert_eq!(paper_size("A4"), Some((210.0, 297.0)));
/// assert_eq!(paper_size("letterpaper"), Some((215.9, 279.4)));
/// assert_eq!(paper_size("tabloid-ish"), None);
/// ```
pub fn paper_size(name: &str) -> Option<(f64, f64)> {
    let key = name.trim().to_lowercase();
    let key = key.strip_suffix("paper").unwrap_or(&key);
    PAPER_SIZES.get(key).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_conversion() {
        assert!((72.27 * MM_PER_PT - 25.4).abs() < 1e-9);
        assert!((MM_PER_PC - 12.0 * MM_PER_PT).abs() < 1e-12);
    }

    #[test]
    fn test_paper_lookup() {
        assert_eq!(paper_size("a5"), Some((148.0, 210.0)));
        assert_eq!(paper_size(" B5paper "), Some((176.0, 250.0)));
        assert!(paper_size("").is_none());
    }
}
