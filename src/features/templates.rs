//! LaTeX template slot filling
//!
//! Templates are ordinary LaTeX files with named slots written `\VAR{name}`.
//! Delimiters are chosen so that the template still reads as LaTeX:
//!
//! - `\VAR{name}`: replaced by the slot value
//! - `\#{...}`: inline comment, removed
//! - `%#` to the end of the line: template comment, removed; a line holding
//!   nothing but the comment is dropped together with its newline
//!
//! Control blocks (`\BLOCK{...}`) are rejected; slot values are computed in
//! Rust, never in the template.
//!
//! ## Example
//!
//! ```rust
//! use indexmap::IndexMap;
//! use tabtex::templates::fill_template;
//!
//! let mut slots = IndexMap::new();
//! slots.insert("geometry".to_string(), "top=20mm".to_string());
//!
//! let out = fill_template("\\usepackage[\\VAR{geometry}]{geometry}\n", &slots).unwrap();
//! assert_eq!(out, "\\usepackage[top=20mm]{geometry}\n");
//! ```

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::error::{LayoutError, LayoutResult};

lazy_static! {
    // Slot reference: \VAR{name}
    static ref SLOT_PATTERN: Regex = Regex::new(r"\\VAR\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}").unwrap();
    // Inline comment: \#{...}
    static ref COMMENT_PATTERN: Regex = Regex::new(r"\\#\{[^}]*\}").unwrap();
    static ref BLOCK_PATTERN: Regex = Regex::new(r"\\BLOCK\{").unwrap();
    // Line comment after content: text %# note
    static ref TRAILING_COMMENT_PATTERN: Regex = Regex::new(r"[ \t]*%#[^\n]*").unwrap();
}

/// Prefix of template line comments
pub const LINE_COMMENT_PREFIX: &str = "%#";

/// Slot names referenced by a template, in order of first appearance
pub fn template_slots(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in SLOT_PATTERN.captures_iter(template) {
        let name = caps[1].to_string();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Replace every `\VAR{name}` of `template` with its slot value
///
/// Fails on a slot missing from `slots` and on control blocks.
pub fn fill_template(template: &str, slots: &IndexMap<String, String>) -> LayoutResult<String> {
    if let Some(m) = BLOCK_PATTERN.find(template) {
        let line = template[..m.start()].matches('\n').count() + 1;
        return Err(LayoutError::template(format!(
            "control blocks are not supported (line {})",
            line
        )));
    }

    let stripped: String = template
        .split_inclusive('\n')
        .filter(|line| !line.trim_start().starts_with(LINE_COMMENT_PREFIX))
        .collect();
    let stripped = TRAILING_COMMENT_PATTERN.replace_all(&stripped, "");
    let stripped = COMMENT_PATTERN.replace_all(&stripped, "");

    let mut output = String::with_capacity(stripped.len());
    let mut last = 0;
    for caps in SLOT_PATTERN.captures_iter(&stripped) {
        let whole = caps.get(0).map(|m| m.range()).unwrap_or(0..0);
        let name = &caps[1];
        let value = slots
            .get(name)
            .ok_or_else(|| LayoutError::template(format!("unknown slot '{}'", name)))?;
        output.push_str(&stripped[last..whole.start]);
        output.push_str(value);
        last = whole.end;
    }
    output.push_str(&stripped[last..]);

    Ok(output)
}
