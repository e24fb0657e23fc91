//! Tests for the table layout engine

use pretty_assertions::assert_eq;

use super::cell::{BodyCell, CellKind, CellStyle, HAlign, HeaderCell, StyleOverride, VAlign};
use super::generator::{render, TableLayout, TableSpec};
use super::hline::{header_rules, BorderRule};
use super::span::{column_span, span_end};
use super::width::{resolve_widths, ColumnWidth};
use crate::utils::error::LayoutError;

fn fixed(widths: &[f64]) -> Vec<ColumnWidth> {
    widths.iter().map(|w| ColumnWidth::mm(*w)).collect()
}

fn text_row(cells: &[&str]) -> Vec<BodyCell> {
    cells.iter().map(|c| BodyCell::from(*c)).collect()
}

// ============================================================================
// Width Resolver
// ============================================================================

#[test]
fn test_mixed_width_spec() {
    let spec = vec![
        ColumnWidth::parse_absolute("10mm").unwrap(),
        ColumnWidth::weight(2.0),
        ColumnWidth::weight(3.0),
    ];
    let widths = resolve_widths(&spec, 50.0).unwrap();
    assert_eq!(widths.columns, vec![10.0, 16.0, 24.0]);
    assert_eq!(widths.total, 50.0);
}

#[test]
fn test_absolute_widths_ignore_budget() {
    for budget in [0.0, 35.0, 1000.0] {
        let widths = resolve_widths(&fixed(&[12.5, 7.5, 20.0]), budget).unwrap();
        assert_eq!(widths.total, 40.0);
        assert_eq!(widths.columns.iter().sum::<f64>(), 40.0);
    }
}

#[test]
fn test_weighted_widths_fill_budget() {
    let spec = vec![
        ColumnWidth::weight(1.0),
        ColumnWidth::weight(1.5),
        ColumnWidth::weight(0.7),
        ColumnWidth::weight(4.0),
    ];
    let widths = resolve_widths(&spec, 173.0).unwrap();
    let sum: f64 = widths.columns.iter().sum();
    assert!((sum - 173.0).abs() < 1e-9);
    assert!((widths.columns[1] / widths.columns[0] - 1.5).abs() < 1e-9);
    assert!((widths.columns[3] / widths.columns[2] - 4.0 / 0.7).abs() < 1e-9);
}

#[test]
fn test_zero_weight_sum_is_invalid() {
    let spec = vec![ColumnWidth::mm(10.0), ColumnWidth::weight(0.0)];
    let err = resolve_widths(&spec, 50.0).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidSpec { .. }));
}

#[test]
fn test_malformed_width_token_is_invalid() {
    let err = ColumnWidth::parse_absolute("10 furlongs").unwrap_err();
    assert!(matches!(err, LayoutError::InvalidSpec { .. }));
}

#[test]
fn test_empty_width_spec_is_invalid() {
    assert!(resolve_widths(&[], 100.0).is_err());
}

// ============================================================================
// Span Detector
// ============================================================================

#[test]
fn test_mc_span_end() {
    let row = vec![HeaderCell::mc("Both"), HeaderCell::v()];
    assert_eq!(span_end(&row, 0, CellKind::Continuation), 1);
}

#[test]
fn test_span_on_collapsed_row_is_single_column() {
    let row = vec![
        HeaderCell::cell("a"),
        HeaderCell::mc("b"),
        HeaderCell::mr("c", 1),
        HeaderCell::mcr("d", 1),
    ];
    for col in 0..row.len() {
        assert_eq!(column_span(&row, col), (col, col));
        assert_eq!(span_end(&row, col, CellKind::Continuation), col);
        assert_eq!(span_end(&row, col, CellKind::VerticalBlank), col);
    }
}

// ============================================================================
// Border Suppression Resolver
// ============================================================================

#[test]
fn test_fully_spanned_boundary_is_suppressed() {
    let head = vec![
        vec![HeaderCell::mcr("All", 2), HeaderCell::v(), HeaderCell::v()],
        vec![HeaderCell::mcrb(), HeaderCell::vb(), HeaderCell::vb()],
        vec![
            HeaderCell::cell("a"),
            HeaderCell::cell("b"),
            HeaderCell::cell("c"),
        ],
    ];
    let rules = header_rules(&head);
    assert_eq!(rules[0], BorderRule::None);
    // blank row sits above plain cells, the span ends here
    assert_eq!(rules[1], BorderRule::Full);
    assert_eq!(rules[2], BorderRule::None);
}

#[test]
fn test_span_free_boundary_draws_full_rule() {
    let head = vec![
        vec![HeaderCell::cell("a"), HeaderCell::cell("b")],
        vec![HeaderCell::cell("c"), HeaderCell::cell("d")],
    ];
    let rules = header_rules(&head);
    assert_eq!(rules, vec![BorderRule::Full, BorderRule::None]);
}

#[test]
fn test_partial_rule_beside_multirow() {
    let head = vec![
        vec![
            HeaderCell::mr("Id", 3),
            HeaderCell::cell("a"),
            HeaderCell::cell("b"),
        ],
        vec![
            HeaderCell::mrb(),
            HeaderCell::cell("c"),
            HeaderCell::cell("d"),
        ],
        vec![
            HeaderCell::mrb(),
            HeaderCell::cell("e"),
            HeaderCell::cell("f"),
        ],
    ];
    let rules = header_rules(&head);
    assert_eq!(rules[0].to_latex(), "\\cline{2-3}");
    assert_eq!(rules[1].to_latex(), "\\cline{2-3}");
    assert!(rules[2].is_none());
}

#[test]
fn test_last_header_row_never_ruled() {
    let head = vec![vec![HeaderCell::cell("only")]];
    assert_eq!(header_rules(&head), vec![BorderRule::None]);
}

// ============================================================================
// Cell Renderer
// ============================================================================

#[test]
fn test_style_application() {
    let style = CellStyle {
        bold: true,
        halign: HAlign::Right,
        valign: VAlign::Bottom,
    };
    assert_eq!(
        style.apply("x", true),
        "\\raggedleft \\smallskip \\rule{0mm}{\\fill}\\\\\\textbf{x}\\smallskip"
    );

    let style = CellStyle {
        bold: false,
        halign: HAlign::Justify,
        valign: VAlign::Top,
    };
    assert_eq!(style.apply("y", false), "y\\\\\\rule{0mm}{\\fill}");
}

// ============================================================================
// Table Assembler
// ============================================================================

#[test]
fn test_empty_body_renders_header_and_closing_rule() {
    let spec = TableSpec::new(fixed(&[12.0, 22.0]), 0.0)
        .with_tabcolsep(1.0)
        .with_head(vec![vec![HeaderCell::cell("X"), HeaderCell::cell("Y")]]);

    let latex = render(&spec, &[]).unwrap();
    assert_eq!(
        latex,
        "\\begin{tabular}{|c|c|}\n\
         \\firsthline\n\
         \\parbox[c][][s]{10mm}{\\centering \\smallskip X\\smallskip}&\n\
         \\parbox[c][][s]{20mm}{\\centering \\smallskip Y\\smallskip}\\\\\n\
         \\lasthline\n\
         \\end{tabular}\n"
    );
}

#[test]
fn test_body_rows_are_ruled() {
    let spec = TableSpec::new(fixed(&[12.0, 22.0]), 0.0)
        .with_tabcolsep(1.0)
        .with_head(vec![vec![HeaderCell::cell("X"), HeaderCell::cell("Y")]]);
    let layout = TableLayout::new(&spec).unwrap();

    let body = layout
        .render_body(&[text_row(&["1", "2"]), text_row(&["3", "4"])])
        .unwrap();
    assert_eq!(
        body,
        "\\hline\n\
         \\parbox[c][][s]{10mm}{\\centering \\smallskip 1\\smallskip}&\n\
         \\parbox[c][][s]{20mm}{\\centering \\smallskip 2\\smallskip}\\\\\n\
         \\hline\n\
         \\parbox[c][][s]{10mm}{\\centering \\smallskip 3\\smallskip}&\n\
         \\parbox[c][][s]{20mm}{\\centering \\smallskip 4\\smallskip}\\\\\n\
         \\lasthline\n"
    );
}

#[test]
fn test_merged_header() {
    let head = vec![
        vec![HeaderCell::mr("A", 2), HeaderCell::mc("B"), HeaderCell::v()],
        vec![HeaderCell::mrb(), HeaderCell::cell("C"), HeaderCell::cell("D")],
    ];
    let spec = TableSpec::new(fixed(&[20.0, 20.0, 20.0]), 0.0)
        .with_tabcolsep(1.0)
        .with_head(head);
    let layout = TableLayout::new(&spec).unwrap();

    assert_eq!(
        layout.head(),
        "\\firsthline\n\
         \\multirow{2}*{\\parbox[c][][c]{18mm}{\\centering A}}&\n\
         \\multicolumn{2}{|c|}{\\parbox[c][][c]{36mm}{\\centering \\smallskip B\\smallskip}}\\\\\n\
         \\cline{2-2}\n\
         &\n\
         \\parbox[c][][s]{18mm}{\\centering \\smallskip C\\smallskip}&\n\
         \\parbox[c][][s]{18mm}{\\centering \\smallskip D\\smallskip}\\\\\n"
    );
}

#[test]
fn test_multicolumn_row_block() {
    let head = vec![
        vec![
            HeaderCell::mcr("Block", 2),
            HeaderCell::v(),
            HeaderCell::cell("t"),
        ],
        vec![HeaderCell::mcrb(), HeaderCell::vb(), HeaderCell::cell("u")],
    ];
    let spec = TableSpec::new(fixed(&[14.0, 16.0, 10.0]), 0.0)
        .with_tabcolsep(2.0)
        .with_head(head);
    let layout = TableLayout::new(&spec).unwrap();
    let head = layout.head();

    assert!(head.contains(
        "\\multicolumn{2}{|c|}{\\multirow{2}*{\\parbox[c][][c]{22mm}{\\centering Block}}}"
    ));
    assert!(head.contains("\\multicolumn{2}{|c|}{}&\n"));
    assert!(head.contains("\\cline{3-3}"));
    // v and vb are collapsed, each row renders two cells
    assert_eq!(head.matches("&\n").count(), 2);
}

#[test]
fn test_row_count_derived_from_blanks() {
    let head = vec![
        vec![HeaderCell::new(CellKind::MultiRow, "Tall"), HeaderCell::cell("a")],
        vec![HeaderCell::mrb(), HeaderCell::cell("b")],
        vec![HeaderCell::mrb(), HeaderCell::cell("c")],
    ];
    let spec = TableSpec::new(fixed(&[10.0, 10.0]), 0.0).with_head(head);
    let layout = TableLayout::new(&spec).unwrap();
    assert!(layout.head().contains("\\multirow{3}*"));
}

#[test]
fn test_row_count_past_header_is_invalid() {
    let head = vec![vec![HeaderCell::mr("Tall", 4), HeaderCell::cell("a")]];
    let spec = TableSpec::new(fixed(&[10.0, 10.0]), 0.0).with_head(head);
    let err = TableLayout::new(&spec).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidSpec { .. }));
}

#[test]
fn test_blank_without_merge_above_is_invalid() {
    let head = vec![vec![HeaderCell::mrb(), HeaderCell::cell("a")]];
    let spec = TableSpec::new(fixed(&[10.0, 10.0]), 0.0).with_head(head);
    assert!(matches!(
        TableLayout::new(&spec).unwrap_err(),
        LayoutError::InvalidSpec { .. }
    ));

    let head = vec![
        vec![HeaderCell::cell("a"), HeaderCell::cell("b")],
        vec![HeaderCell::mcrb(), HeaderCell::vb()],
    ];
    let spec = TableSpec::new(fixed(&[10.0, 10.0]), 0.0).with_head(head);
    assert!(TableLayout::new(&spec).is_err());
}

#[test]
fn test_blank_below_exhausted_merge_is_invalid() {
    let head = vec![
        vec![HeaderCell::mr("x", 1), HeaderCell::cell("a")],
        vec![HeaderCell::mrb(), HeaderCell::cell("b")],
    ];
    let spec = TableSpec::new(fixed(&[10.0, 10.0]), 0.0).with_head(head);
    assert!(matches!(
        TableLayout::new(&spec).unwrap_err(),
        LayoutError::InvalidSpec { .. }
    ));
}

#[test]
fn test_explicit_rows_over_plain_cells_is_invalid() {
    let head = vec![
        vec![HeaderCell::mr("x", 2), HeaderCell::cell("a")],
        vec![HeaderCell::cell("y"), HeaderCell::cell("b")],
    ];
    let spec = TableSpec::new(fixed(&[10.0, 10.0]), 0.0).with_head(head);
    let err = TableLayout::new(&spec).unwrap_err();
    assert!(err.to_string().contains("declares 2 rows but 1 are merged"));
}

#[test]
fn test_orphan_continuation_is_invalid() {
    let head = vec![vec![HeaderCell::cell("a"), HeaderCell::v()]];
    let spec = TableSpec::new(fixed(&[10.0, 10.0]), 0.0).with_head(head);
    assert!(matches!(
        TableLayout::new(&spec).unwrap_err(),
        LayoutError::InvalidSpec { .. }
    ));
}

#[test]
fn test_header_and_body_shape_mismatch() {
    let spec = TableSpec::new(fixed(&[10.0, 10.0]), 0.0)
        .with_head(vec![vec![HeaderCell::cell("a")]]);
    assert!(matches!(
        TableLayout::new(&spec).unwrap_err(),
        LayoutError::ShapeMismatch { .. }
    ));

    let spec = TableSpec::new(fixed(&[10.0, 10.0]), 0.0);
    let err = render(&spec, &[text_row(&["1", "2", "3"])]).unwrap_err();
    assert_eq!(
        err,
        LayoutError::ShapeMismatch {
            message: "body row 0 has the wrong number of cells".to_string(),
            expected: Some(2),
            found: Some(3),
        }
    );
}

#[test]
fn test_short_column_styles_is_shape_mismatch() {
    let spec = TableSpec::new(fixed(&[10.0, 10.0, 10.0]), 0.0)
        .with_col_styles(vec![StyleOverride::bold()]);
    assert!(matches!(
        render(&spec, &[]).unwrap_err(),
        LayoutError::ShapeMismatch { .. }
    ));
}

#[test]
fn test_style_layers() {
    let spec = TableSpec::new(fixed(&[12.0, 12.0]), 0.0)
        .with_tabcolsep(1.0)
        .with_default_style(CellStyle {
            bold: false,
            halign: HAlign::Left,
            valign: VAlign::Center,
        })
        .with_head_style(StyleOverride::bold())
        .with_col_styles(vec![
            StyleOverride::default(),
            StyleOverride {
                halign: Some(HAlign::Right),
                ..Default::default()
            },
        ])
        .with_head(vec![vec![
            HeaderCell::cell("H1"),
            HeaderCell::cell("H2").with_style(StyleOverride {
                bold: Some(false),
                ..Default::default()
            }),
        ]]);
    let layout = TableLayout::new(&spec).unwrap();

    assert!(layout.head().contains("{\\raggedright \\smallskip \\textbf{H1}\\smallskip}"));
    assert!(layout.head().contains("{\\raggedright \\smallskip H2\\smallskip}"));

    let body = layout
        .render_body(&[vec![
            BodyCell::from("a"),
            BodyCell::Styled {
                content: "b".to_string(),
                style: StyleOverride::bold(),
            },
        ]])
        .unwrap();
    assert!(body.contains("{\\raggedright \\smallskip a\\smallskip}"));
    assert!(body.contains("{\\raggedleft \\smallskip \\textbf{b}\\smallskip}"));

    // shared defaults are untouched by the overrides above
    assert_eq!(spec.default_style.halign, HAlign::Left);
    assert!(!spec.default_style.bold);
}

#[test]
fn test_layout_reports_widths() {
    let spec = TableSpec::new(
        vec![ColumnWidth::mm(10.0), ColumnWidth::weight(1.0)],
        100.0,
    )
    .with_tabcolsep(2.0);
    let layout = TableLayout::new(&spec).unwrap();
    assert_eq!(layout.column_count(), 2);
    assert_eq!(layout.table_width(), 100.0);
    assert_eq!(layout.full_width(1), 90.0);
    assert_eq!(layout.inner_width(1), 86.0);
}
