//! Table description and LaTeX tabular generator

use tracing::{debug, warn};

use super::cell::{
    multicolumn_blank, multicolumn_cell, multicolumn_row_cell, multirow_cell, simple_cell,
    BodyCell, CellKind, CellStyle, HeaderCell, StyleOverride,
};
use super::hline::header_rules;
use super::span::column_span;
use super::width::{resolve_widths, ColumnWidth, ResolvedWidths};
use crate::data::constants::DEFAULT_TABCOLSEP_MM;
use crate::utils::error::{LayoutError, LayoutResult};

/// Complete description of a table, independent of its body data
#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    /// Column width policy, one entry per column
    pub widths: Vec<ColumnWidth>,
    /// Width (mm) the weighted columns are resolved against
    pub width_budget: f64,
    /// Horizontal padding (mm) on each side of a cell
    pub tabcolsep: f64,
    /// Base style of every cell
    pub default_style: CellStyle,
    /// Applied to header cells on top of `default_style`
    pub head_style: StyleOverride,
    /// Applied to body cells of each column on top of `default_style`
    pub col_styles: Vec<StyleOverride>,
    /// Header grid, one entry per column in every row
    pub head: Vec<Vec<HeaderCell>>,
}

impl TableSpec {
    /// Create a spec without header rows and with default styles
    pub fn new(widths: Vec<ColumnWidth>, width_budget: f64) -> Self {
        let cols = widths.len();
        TableSpec {
            widths,
            width_budget,
            tabcolsep: DEFAULT_TABCOLSEP_MM,
            default_style: CellStyle::default(),
            head_style: StyleOverride::default(),
            col_styles: vec![StyleOverride::default(); cols],
            head: Vec::new(),
        }
    }

    pub fn with_head(mut self, head: Vec<Vec<HeaderCell>>) -> Self {
        self.head = head;
        self
    }

    pub fn with_tabcolsep(mut self, tabcolsep: f64) -> Self {
        self.tabcolsep = tabcolsep;
        self
    }

    pub fn with_default_style(mut self, style: CellStyle) -> Self {
        self.default_style = style;
        self
    }

    pub fn with_head_style(mut self, style: StyleOverride) -> Self {
        self.head_style = style;
        self
    }

    pub fn with_col_styles(mut self, styles: Vec<StyleOverride>) -> Self {
        self.col_styles = styles;
        self
    }

    pub fn column_count(&self) -> usize {
        self.widths.len()
    }

    /// Check grid shapes and merge markers
    pub fn validate(&self) -> LayoutResult<()> {
        let cols = self.column_count();

        if !self.tabcolsep.is_finite() || self.tabcolsep < 0.0 {
            return Err(LayoutError::invalid(format!(
                "tabcolsep must be a non-negative length, got {}",
                self.tabcolsep
            )));
        }

        if self.col_styles.len() < cols {
            return Err(LayoutError::shape_counts(
                "column style list is shorter than the column count",
                cols,
                self.col_styles.len(),
            ));
        }

        for (i, row) in self.head.iter().enumerate() {
            if row.len() != cols {
                return Err(LayoutError::shape_counts(
                    format!("header row {} has the wrong number of cells", i),
                    cols,
                    row.len(),
                ));
            }

            for (col, cell) in row.iter().enumerate() {
                let follows = col.checked_sub(1).map(|c| row[c].kind);
                let valid = match cell.kind {
                    CellKind::Continuation => matches!(
                        follows,
                        Some(
                            CellKind::MultiColumn
                                | CellKind::MultiColumnRow
                                | CellKind::Continuation
                        )
                    ),
                    CellKind::VerticalBlank => {
                        matches!(
                            follows,
                            Some(CellKind::MultiColumnRowBlank | CellKind::VerticalBlank)
                        ) && matches!(
                            self.kind_above(i, col),
                            Some(CellKind::Continuation | CellKind::VerticalBlank)
                        )
                    }
                    CellKind::MultiRowBlank => matches!(
                        self.kind_above(i, col),
                        Some(CellKind::MultiRow | CellKind::MultiRowBlank)
                    ),
                    CellKind::MultiColumnRowBlank => matches!(
                        self.kind_above(i, col),
                        Some(CellKind::MultiColumnRow | CellKind::MultiColumnRowBlank)
                    ),
                    _ => true,
                };
                if !valid {
                    return Err(LayoutError::invalid(format!(
                        "header row {}, column {}: '{}' does not continue a span",
                        i, col, cell.kind
                    )));
                }

                if let Some(rows) = cell.rows {
                    if matches!(cell.kind, CellKind::MultiRow | CellKind::MultiColumnRow) {
                        let stacked = 1 + self.stacked_blanks(i, col);
                        if rows != stacked {
                            return Err(LayoutError::invalid(format!(
                                "header row {}, column {}: '{}' declares {} rows but {} are merged",
                                i, col, cell.kind, rows, stacked
                            )));
                        }
                    }
                }
            }
        }

        Ok(())
    }

    fn kind_above(&self, row: usize, col: usize) -> Option<CellKind> {
        row.checked_sub(1).map(|r| self.head[r][col].kind)
    }

    /// Blank cells stacked directly below the vertical merge at `(row, col)`
    fn stacked_blanks(&self, row: usize, col: usize) -> usize {
        let blank = match self.head[row][col].kind {
            CellKind::MultiRow => CellKind::MultiRowBlank,
            _ => CellKind::MultiColumnRowBlank,
        };
        self.head[row + 1..]
            .iter()
            .take_while(|r| r.get(col).map(|c| c.kind) == Some(blank))
            .count()
    }

    /// Rows covered by the vertical merge at `(row, col)`
    ///
    /// An explicit count wins; otherwise the blank rows below are counted.
    /// [`TableSpec::validate`] guarantees both agree.
    fn row_count(&self, row: usize, col: usize) -> usize {
        self.head[row][col]
            .rows
            .unwrap_or_else(|| 1 + self.stacked_blanks(row, col))
    }
}

/// Resolved table ready to render body data
///
/// Widths and the header markup are computed once in [`TableLayout::new`];
/// any number of bodies can then be rendered against them.
#[derive(Debug, Clone)]
pub struct TableLayout {
    widths: ResolvedWidths,
    tabcolsep: f64,
    col_styles: Vec<CellStyle>,
    head: String,
}

impl TableLayout {
    pub fn new(spec: &TableSpec) -> LayoutResult<Self> {
        spec.validate()?;
        let widths = resolve_widths(&spec.widths, spec.width_budget)?;

        for i in 0..widths.len() {
            let inner = widths.inner(i, spec.tabcolsep);
            if inner <= 0.0 {
                warn!(column = i, inner, "column leaves no room for content");
            }
        }

        let col_styles = spec
            .col_styles
            .iter()
            .take(widths.len())
            .map(|over| spec.default_style.with(over))
            .collect();

        let mut layout = TableLayout {
            widths,
            tabcolsep: spec.tabcolsep,
            col_styles,
            head: String::new(),
        };
        layout.head = layout.render_head(spec)?;
        Ok(layout)
    }

    pub fn column_count(&self) -> usize {
        self.widths.len()
    }

    pub fn widths(&self) -> &ResolvedWidths {
        &self.widths
    }

    /// Total table width in mm
    pub fn table_width(&self) -> f64 {
        self.widths.total
    }

    pub fn full_width(&self, index: usize) -> f64 {
        self.widths.full(index)
    }

    pub fn inner_width(&self, index: usize) -> f64 {
        self.widths.inner(index, self.tabcolsep)
    }

    /// Header markup, starting with `\firsthline`
    pub fn head(&self) -> &str {
        &self.head
    }

    fn render_head(&self, spec: &TableSpec) -> LayoutResult<String> {
        let rules = header_rules(&spec.head);
        let mut rows = Vec::with_capacity(spec.head.len());

        for (row_idx, (row, rule)) in spec.head.iter().zip(&rules).enumerate() {
            let mut cells = Vec::with_capacity(row.len());

            for col in 0..row.len() {
                if let Some(markup) = self.render_head_cell(spec, row_idx, col)? {
                    cells.push(markup);
                }
            }

            debug!(row = row_idx, ?rule, "header row boundary");

            let mut line = format!("{}\\\\", cells.join("&\n"));
            if !rule.is_none() {
                line.push('\n');
                line.push_str(&rule.to_latex());
            }
            rows.push(line);
        }

        if rows.is_empty() {
            return Ok("\\firsthline\n".to_string());
        }
        Ok(format!("\\firsthline\n{}\n", rows.join("\n")))
    }

    fn render_head_cell(
        &self,
        spec: &TableSpec,
        row: usize,
        col: usize,
    ) -> LayoutResult<Option<String>> {
        let cells = &spec.head[row];
        let cell = &cells[col];
        let style = spec
            .default_style
            .with(&spec.head_style.then(&cell.style));

        let markup = match cell.kind {
            CellKind::Cell => simple_cell(&cell.content, self.inner_width(col), &style),
            CellKind::MultiColumn => {
                let (start, end) = column_span(cells, col);
                multicolumn_cell(
                    &cell.content,
                    end - start + 1,
                    self.widths.span_inner(start, end, self.tabcolsep),
                    &style,
                )
            }
            CellKind::MultiRow => multirow_cell(
                &cell.content,
                spec.row_count(row, col),
                self.inner_width(col),
                &style,
            ),
            CellKind::MultiColumnRow => {
                let (start, end) = column_span(cells, col);
                multicolumn_row_cell(
                    &cell.content,
                    end - start + 1,
                    spec.row_count(row, col),
                    self.widths.span_inner(start, end, self.tabcolsep),
                    &style,
                )
            }
            CellKind::MultiColumnRowBlank => {
                let (start, end) = column_span(cells, col);
                multicolumn_blank(end - start + 1)
            }
            CellKind::MultiRowBlank => String::new(),
            CellKind::VerticalBlank | CellKind::Continuation => return Ok(None),
        };
        Ok(Some(markup))
    }

    /// Data rows between the header and `\end{tabular}`
    pub fn render_body(&self, body: &[Vec<BodyCell>]) -> LayoutResult<String> {
        if body.is_empty() {
            return Ok("\\lasthline\n".to_string());
        }

        let cols = self.column_count();
        let mut rows = Vec::with_capacity(body.len());

        for (row_idx, row) in body.iter().enumerate() {
            if row.len() != cols {
                return Err(LayoutError::shape_counts(
                    format!("body row {} has the wrong number of cells", row_idx),
                    cols,
                    row.len(),
                ));
            }

            let cells: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    let style = self.col_styles[col].with(&cell.style());
                    simple_cell(cell.content(), self.inner_width(col), &style)
                })
                .collect();
            rows.push(cells.join("&\n"));
        }

        Ok(format!(
            "\\hline\n{}\\\\\n\\lasthline\n",
            rows.join("\\\\\n\\hline\n")
        ))
    }

    /// Complete `tabular` environment
    pub fn render(&self, body: &[Vec<BodyCell>]) -> LayoutResult<String> {
        let body = self.render_body(body)?;
        let col_spec = vec!["c"; self.column_count()].join("|");
        Ok(format!(
            "\\begin{{tabular}}{{|{}|}}\n{}{}\\end{{tabular}}\n",
            col_spec, self.head, body
        ))
    }
}

/// Render a table description and its body grid into a `tabular` environment
///
/// ```
/// use tabtex::core::table::{render, BodyCell, ColumnWidth, HeaderCell, TableSpec};
///
/// let spec = TableSpec::new(vec![ColumnWidth::weight(1.0), ColumnWidth::weight(1.0)], 60.0)
///     .with_tabcolsep(1.0)
///     .with_head(vec![vec![HeaderCell::cell("Name"), HeaderCell::cell("Value")]]);
/// let body = vec![vec![BodyCell::from("a"), BodyCell::from("1")]];
///
/// let latex = render(&spec, &body).unwrap();
/// assert!(latex.starts_with("\\begin{tabular}{|c|c|}"));
/// assert!(latex.contains("\\parbox[c][][s]{28mm}"));
/// ```
pub fn render(spec: &TableSpec, body: &[Vec<BodyCell>]) -> LayoutResult<String> {
    TableLayout::new(spec)?.render(body)
}
