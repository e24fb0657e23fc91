//! Horizontal span detection over a header row

use super::cell::{CellKind, HeaderCell};

/// Inclusive end column of the span starting at `start`
///
/// The span covers `start` plus every following cell of kind `marker`, up to
/// the first cell of another kind.
pub fn span_end(row: &[HeaderCell], start: usize, marker: CellKind) -> usize {
    let covered = row
        .iter()
        .skip(start + 1)
        .take_while(|cell| cell.kind == marker)
        .count();
    start + covered
}

/// Column range `(start, end)` of the cell at `start`
///
/// Cells that do not span columns always yield `(start, start)`.
pub fn column_span(row: &[HeaderCell], start: usize) -> (usize, usize) {
    match row[start].kind.column_marker() {
        Some(marker) => (start, span_end(row, start, marker)),
        None => (start, start),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_stops_at_other_kind() {
        let row = vec![
            HeaderCell::mc("A"),
            HeaderCell::v(),
            HeaderCell::v(),
            HeaderCell::cell("B"),
            HeaderCell::v(),
        ];
        assert_eq!(span_end(&row, 0, CellKind::Continuation), 2);
        assert_eq!(column_span(&row, 3), (3, 3));
    }

    #[test]
    fn test_blank_span_uses_vb() {
        let row = vec![
            HeaderCell::cell("x"),
            HeaderCell::mcrb(),
            HeaderCell::vb(),
            HeaderCell::v(),
        ];
        assert_eq!(column_span(&row, 1), (1, 2));
    }

    #[test]
    fn test_span_at_row_end() {
        let row = vec![HeaderCell::cell("x"), HeaderCell::mc("y")];
        assert_eq!(span_end(&row, 1, CellKind::Continuation), 1);
    }
}
