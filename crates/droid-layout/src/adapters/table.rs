//! `<table>` as GridLayout.
//!
//! [§ 17 Tables](https://www.w3.org/TR/CSS2/tables.html)
//!
//! Rows and row groups disappear: their cells become direct children of
//! the GridLayout, placed with `colspan`/`rowspan` occupancy. A caption
//! becomes a first row spanning every column.

use droid_common::format_float;

use super::occupancy::MAX_SPAN;
use super::{AdapterKind, LayoutAdapter, Occupancy};
use crate::api::LOLLIPOP;
use crate::node::{
    AlignmentType, Attr, Axis, BoxRegion, BoxSpaceable, ContainerType, Dimensionable, Edge,
    LayoutMode, View, ViewId,
};
use crate::session::ConversionSession;
use crate::tree::ViewTree;
use crate::values::CssLength;

/// Table adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Table;

/// Whether `id` is a row or row group of a table, which the table's
/// adapter dissolves.
pub(crate) fn is_table_part(tree: &ViewTree, id: ViewId) -> bool {
    let view = &tree[id];
    if !is_row(view) && !is_row_group(view) {
        return false;
    }
    let mut parent = view.parent;
    while let Some(ancestor) = parent {
        if is_table(&tree[ancestor]) {
            return true;
        }
        if !is_row_group(&tree[ancestor]) {
            return false;
        }
        parent = tree[ancestor].parent;
    }
    false
}

fn is_table(view: &View) -> bool {
    view.tag == "table" || matches!(view.css("display"), "table" | "inline-table")
}

fn is_row(view: &View) -> bool {
    view.tag == "tr" || view.css("display") == "table-row"
}

fn is_row_group(view: &View) -> bool {
    matches!(view.tag.as_str(), "thead" | "tbody" | "tfoot")
        || matches!(
            view.css("display"),
            "table-row-group" | "table-header-group" | "table-footer-group"
        )
}

fn is_cell(view: &View) -> bool {
    matches!(view.tag.as_str(), "td" | "th") || view.css("display") == "table-cell"
}

fn is_caption(view: &View) -> bool {
    view.tag == "caption" || view.css("display") == "table-caption"
}

/// [§ 17.2 The CSS table model](https://www.w3.org/TR/CSS2/tables.html#table-display)
///
/// Rows of cells, in document order, whether direct children of the table
/// or inside `<thead>`, `<tbody>` and `<tfoot>`.
struct TableParts {
    caption: Option<ViewId>,
    rows: Vec<Vec<ViewId>>,
    containers: Vec<ViewId>,
}

fn collect_table_rows(tree: &ViewTree, table: ViewId) -> TableParts {
    let mut parts = TableParts {
        caption: None,
        rows: Vec::new(),
        containers: Vec::new(),
    };
    let add_row = |parts: &mut TableParts, row: ViewId| {
        let cells = tree
            .children(row)
            .iter()
            .copied()
            .filter(|&cell| is_cell(&tree[cell]))
            .collect();
        parts.rows.push(cells);
        parts.containers.push(row);
    };
    for &child in tree.children(table) {
        let view = &tree[child];
        if is_row(view) {
            add_row(&mut parts, child);
        } else if is_row_group(view) {
            parts.containers.push(child);
            for &row in tree.children(child) {
                if is_row(&tree[row]) {
                    add_row(&mut parts, row);
                }
            }
        } else if is_caption(view) && parts.caption.is_none() {
            parts.caption = Some(child);
        }
    }
    parts
}

fn span_attr(view: &View, name: &str) -> usize {
    view.element_attrs
        .get(name)
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|span| *span > 0)
        .map_or(1, |span| span.min(MAX_SPAN))
}

/// [§ 17.6.1 The separated borders model](https://www.w3.org/TR/CSS2/tables.html#separated-borders)
///
/// Horizontal and vertical `border-spacing`; none when borders collapse.
fn border_spacing(view: &View) -> (f64, f64) {
    if view.css("border-collapse") == "collapse" {
        return (0.0, 0.0);
    }
    let lengths: Vec<f64> = view
        .css("border-spacing")
        .split_whitespace()
        .map(|part| {
            CssLength::parse(part)
                .and_then(|length| length.to_px(view.facts.font_size, 0.0))
                .unwrap_or(0.0)
        })
        .collect();
    match lengths.as_slice() {
        [both] => (*both, *both),
        [horizontal, vertical, ..] => (*horizontal, *vertical),
        [] => (0.0, 0.0),
    }
}

/// One placed cell.
#[derive(Debug, Clone, Copy)]
struct Cell {
    view: ViewId,
    row: usize,
    column: usize,
    row_span: usize,
    column_span: usize,
}

impl LayoutAdapter for Table {
    fn classify(&self, tree: &mut ViewTree, _session: &mut ConversionSession, id: ViewId) -> bool {
        if !is_table(&tree[id]) {
            return false;
        }
        let parts = collect_table_rows(tree, id);
        if parts.rows.iter().all(Vec::is_empty) {
            return false;
        }
        let _ = tree.set_container_type(id, ContainerType::Grid);
        let view = &mut tree[id];
        view.alignment |= AlignmentType::AUTO_LAYOUT;
        view.adapter = Some(AdapterKind::Table);

        for &container in &parts.containers {
            tree[container].excluded = true;
            tree.detach_render_child(container);
        }
        if let Some(caption) = parts.caption {
            tree.insert_render_child(id, 0, caption);
        }
        for &cell in parts.rows.iter().flatten() {
            tree.append_render_child(id, cell);
        }
        tracing::debug!(view = id.0, rows = parts.rows.len(), "table");
        true
    }

    fn constrain(&self, tree: &mut ViewTree, session: &mut ConversionSession, id: ViewId) {
        let parts = collect_table_rows(tree, id);
        let first_row = usize::from(parts.caption.is_some());

        let mut grid = Occupancy::new(0);
        let mut cells = Vec::new();
        for (index, row) in parts.rows.iter().enumerate() {
            let row_index = first_row + index;
            let mut cursor = 0;
            for &view in row {
                let column_span = span_attr(&tree[view], "colspan");
                let row_span = span_attr(&tree[view], "rowspan");
                let column = grid.first_free_in_row(row_index, cursor, column_span, row_span);
                grid.mark(column, column_span, row_index, row_span);
                cursor = column + column_span;
                cells.push(Cell {
                    view,
                    row: row_index,
                    column,
                    row_span,
                    column_span,
                });
            }
        }
        let columns = grid.columns().max(1);
        let rows = grid.rows().max(first_row);
        if let Some(caption) = parts.caption {
            cells.insert(
                0,
                Cell {
                    view: caption,
                    row: 0,
                    column: 0,
                    row_span: 1,
                    column_span: columns,
                },
            );
        }

        let table = &mut tree[id];
        let _ = table.attributes.set(Attr::ColumnCount, columns.to_string());
        let _ = table.attributes.set(Attr::RowCount, rows.to_string());

        for cell in &cells {
            let attributes = &mut tree[cell.view].attributes;
            let _ = attributes.set(Attr::LayoutRow, cell.row.to_string());
            let _ = attributes.set(Attr::LayoutColumn, cell.column.to_string());
            if cell.row_span > 1 {
                let _ = attributes.set(Attr::LayoutRowSpan, cell.row_span.to_string());
            }
            if cell.column_span > 1 {
                let _ = attributes.set(Attr::LayoutColumnSpan, cell.column_span.to_string());
            }
        }

        let flexible = tree[id].css_percent("width").is_some();
        if flexible && session.config.target_api >= LOLLIPOP {
            let widths = column_widths(tree, &cells, columns);
            set_column_weights(tree, &cells, &widths, session.config.float_precision);
        }
        apply_border_spacing(tree, id, &cells, columns, rows);
        tracing::debug!(view = id.0, columns, rows, "placed table cells");
    }

    fn dimension(
        &self,
        tree: &mut ViewTree,
        _session: &mut ConversionSession,
        _parent: ViewId,
        child: ViewId,
    ) {
        let bounds = tree[child].bounds;
        let view = &mut tree[child];
        let _ = view.set_layout_mode(Axis::Horizontal, LayoutMode::Px(bounds.width), false);
        let _ = view.set_layout_mode(Axis::Vertical, LayoutMode::Px(bounds.height), false);
    }
}

/// [§ 17.5.2.2 Column width determination](https://www.w3.org/TR/CSS2/tables.html#auto-table-layout)
///
/// "For each column, determine a minimum and maximum column width from the
/// cells that span only that column." Columns no single cell decides share
/// what their spanning cells leave over.
fn column_widths(tree: &ViewTree, cells: &[Cell], columns: usize) -> Vec<f64> {
    let mut widths = vec![0.0_f64; columns];
    let mut known = vec![false; columns];
    for cell in cells.iter().filter(|cell| cell.column_span == 1) {
        if let Some(width) = widths.get_mut(cell.column) {
            *width = width.max(tree[cell.view].bounds.width);
            known[cell.column] = true;
        }
    }
    for cell in cells.iter().filter(|cell| cell.column_span > 1) {
        let end = (cell.column + cell.column_span).min(columns);
        let range = cell.column..end;
        let unknown = range.clone().filter(|&column| !known[column]).count();
        if unknown == 0 {
            continue;
        }
        let covered: f64 = range.clone().map(|column| widths[column]).sum();
        let share = (tree[cell.view].bounds.width - covered).max(0.0) / unknown as f64;
        for column in range.filter(|&column| !known[column]) {
            widths[column] = widths[column].max(share);
        }
    }
    widths
}

/// Weights proportional to the rendered column widths, with `0px` widths.
fn set_column_weights(tree: &mut ViewTree, cells: &[Cell], widths: &[f64], precision: u8) {
    let total: f64 = widths.iter().sum();
    if total <= 0.0 {
        return;
    }
    for cell in cells {
        let end = (cell.column + cell.column_span).min(widths.len());
        let share: f64 = widths[cell.column.min(end)..end].iter().sum::<f64>() / total;
        if share <= 0.0 {
            continue;
        }
        let view = &mut tree[cell.view];
        let _ = view.set_layout_mode(Axis::Horizontal, LayoutMode::MatchConstraint, true);
        let _ = view
            .attributes
            .set(Attr::LayoutColumnWeight, format_float(share, precision));
    }
}

/// Cell margins reproducing `border-spacing`: every cell keeps the space on
/// its left and top, the last column and row also on the right and bottom.
fn apply_border_spacing(
    tree: &mut ViewTree,
    table: ViewId,
    cells: &[Cell],
    columns: usize,
    rows: usize,
) {
    let (horizontal, vertical) = border_spacing(&tree[table]);
    for cell in cells {
        let view = &mut tree[cell.view];
        view.reset_box(BoxRegion::Margin, &Edge::ALL);
        if horizontal > 0.0 {
            view.modify_box(BoxRegion::Margin, Edge::Left, horizontal);
            if cell.column + cell.column_span >= columns {
                view.modify_box(BoxRegion::Margin, Edge::Right, horizontal);
            }
        }
        if vertical > 0.0 {
            view.modify_box(BoxRegion::Margin, Edge::Top, vertical);
            if cell.row + cell.row_span >= rows {
                view.modify_box(BoxRegion::Margin, Edge::Bottom, vertical);
            }
        }
    }
}
