//! Structured report sections
//!
//! Each report item becomes a call to a document macro whose arguments are
//! themselves macro calls, e.g.
//!
//! ```text
//! \structTable{OP10}{\structWord{word11}{word12}}{\structPic{pic11}{pic12}}
//! ```
//!
//! The macros are defined by the template; this module only writes the calls.
//! It also derives the widths the section macros lay their text and picture
//! boxes out with.

use serde::Deserialize;

/// Macro names used for report items
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SectionMacros {
    pub table: String,
    pub words: String,
    pub pics: String,
}

impl Default for SectionMacros {
    fn default() -> Self {
        SectionMacros {
            table: "structTable".to_string(),
            words: "structWord".to_string(),
            pics: "structPic".to_string(),
        }
    }
}

/// One report item: a title, its text blocks and its pictures
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportItem {
    pub title: String,
    #[serde(default)]
    pub words: Vec<String>,
    #[serde(default)]
    pub pics: Vec<String>,
}

/// Join a command with its brace-delimited arguments
///
/// ```
/// use tabtex::sections::node_join;
///
/// assert_eq!(node_join("\\structWord", &["a", "b"]), "\\structWord{a}{b}");
/// assert_eq!(node_join("\\relax", &[] as &[&str]), "\\relax");
/// ```
pub fn node_join<S: AsRef<str>>(command: &str, params: &[S]) -> String {
    let mut out = String::from(command);
    for param in params {
        out.push('{');
        out.push_str(param.as_ref());
        out.push('}');
    }
    out
}

impl ReportItem {
    pub fn to_latex(&self, macros: &SectionMacros) -> String {
        let words = node_join(&format!("\\{}", macros.words), &self.words);
        let pics = node_join(&format!("\\{}", macros.pics), &self.pics);
        node_join(
            &format!("\\{}", macros.table),
            &[self.title.as_str(), words.as_str(), pics.as_str()],
        )
    }
}

/// Concatenate the calls for all items, in order
pub fn render_sections(items: &[ReportItem], macros: &SectionMacros) -> String {
    items.iter().map(|item| item.to_latex(macros)).collect()
}

/// Box widths for the two-column report layout
///
/// Text takes 9/16 of the text width and pictures 7/16, each less a 2mm gap;
/// a half picture box leaves another 2mm between two pictures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionWidths {
    pub intro: f64,
    pub picbox: f64,
    pub picbox_half: f64,
}

impl SectionWidths {
    pub fn from_text_width(text_width: f64) -> Self {
        let picbox = text_width * (7.0 / 16.0) - 2.0;
        SectionWidths {
            intro: text_width * (9.0 / 16.0) - 2.0,
            picbox,
            picbox_half: picbox / 2.0 - 2.0,
        }
    }
}
