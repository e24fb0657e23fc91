//! Horizontal rules between header rows

use super::cell::HeaderCell;

/// Rule drawn at one row boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BorderRule {
    /// No rule, every column is crossed by a span
    None,
    /// `\hline`
    Full,
    /// `\cline` segments as inclusive 0-indexed column ranges
    Partial(Vec<(usize, usize)>),
}

impl BorderRule {
    /// Build the rule from a per-column suppression mask
    ///
    /// Runs of drawn columns become `\cline` segments; a single run over the
    /// whole row collapses to `\hline`.
    pub fn from_mask(suppressed: &[bool]) -> Self {
        let mut ranges = Vec::new();
        let mut start: Option<usize> = None;

        for (col, &skip) in suppressed.iter().enumerate() {
            match (skip, start) {
                (false, None) => start = Some(col),
                (true, Some(s)) => {
                    ranges.push((s, col - 1));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            ranges.push((s, suppressed.len() - 1));
        }

        match ranges.as_slice() {
            [] => BorderRule::None,
            [(0, end)] if *end + 1 == suppressed.len() => BorderRule::Full,
            _ => BorderRule::Partial(ranges),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, BorderRule::None)
    }

    /// Generate LaTeX code for this rule
    pub fn to_latex(&self) -> String {
        match self {
            BorderRule::None => String::new(),
            BorderRule::Full => "\\hline".to_string(),
            // LaTeX cline uses 1-indexed columns
            BorderRule::Partial(ranges) => ranges
                .iter()
                .map(|(s, e)| format!("\\cline{{{}-{}}}", s + 1, e + 1))
                .collect(),
        }
    }
}

/// Columns whose rule is suppressed at the boundary below `row`
///
/// A column is suppressed when `row` opens a vertical span there, or when both
/// `row` and `next` sit inside the same vertical span.
pub fn suppression_mask(row: &[HeaderCell], next: Option<&[HeaderCell]>) -> Vec<bool> {
    row.iter()
        .enumerate()
        .map(|(col, cell)| {
            let below_continues = next
                .and_then(|n| n.get(col))
                .is_some_and(|c| c.kind.continues_vertical_span());
            cell.kind.opens_vertical_span()
                || (cell.kind.continues_vertical_span() && below_continues)
        })
        .collect()
}

/// Rule after every header row
///
/// The last header row never gets a rule: the body decides its own leading
/// rule, including the case where there is no body at all.
pub fn header_rules(grid: &[Vec<HeaderCell>]) -> Vec<BorderRule> {
    let mut rules: Vec<BorderRule> = grid
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let next = grid.get(i + 1).map(|r| r.as_slice());
            BorderRule::from_mask(&suppression_mask(row, next))
        })
        .collect();

    if let Some(last) = rules.last_mut() {
        *last = BorderRule::None;
    }
    rules
}
