//! CSS grid containers as GridLayout.
//!
//! [CSS Grid Layout Module Level 1](https://www.w3.org/TR/css-grid-1/)
//!
//! Items are placed with the grid placement algorithm and written as
//! GridLayout row/column/span attributes. Gaps have no GridLayout
//! counterpart: every gap becomes its own track holding a `Space` of the
//! gap size, so item indices double. Flexible tracks become weights where
//! the platform supports them.

use droid_common::{format_float, within_range};

use super::occupancy::MAX_SPAN;
use super::{AdapterKind, LayoutAdapter, Occupancy};
use crate::api::LOLLIPOP;
use crate::node::{
    AlignmentType, Attr, Axis, ContainerType, Dimensionable, LayoutMode, ViewId, ViewOrigin,
};
use crate::session::ConversionSession;
use crate::tree::ViewTree;
use crate::values::{AlignItems, CssLength, GridAutoFlow, GridLine, TrackSize, parse_track_list};

/// Grid adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssGrid;

/// Resolved 0-based area of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placement {
    item: ViewId,
    row: usize,
    column: usize,
    row_span: usize,
    column_span: usize,
}

/// Line placement properties of one item.
#[derive(Debug, Clone, Copy)]
struct ItemLines {
    column_start: GridLine,
    column_end: GridLine,
    row_start: GridLine,
    row_end: GridLine,
}

impl ItemLines {
    fn of(tree: &ViewTree, id: ViewId) -> Self {
        let view = &tree[id];
        Self {
            column_start: GridLine::parse(view.css("grid-column-start")),
            column_end: GridLine::parse(view.css("grid-column-end")),
            row_start: GridLine::parse(view.css("grid-row-start")),
            row_end: GridLine::parse(view.css("grid-row-end")),
        }
    }
}

impl LayoutAdapter for CssGrid {
    fn classify(&self, tree: &mut ViewTree, _session: &mut ConversionSession, id: ViewId) -> bool {
        if !tree[id].is_grid() || tree.layout_children(id).is_empty() {
            return false;
        }
        let _ = tree.set_container_type(id, ContainerType::Grid);
        let view = &mut tree[id];
        view.alignment |= AlignmentType::AUTO_LAYOUT;
        view.adapter = Some(AdapterKind::Grid);
        tracing::debug!(view = id.0, "grid container");
        true
    }

    fn constrain(&self, tree: &mut ViewTree, session: &mut ConversionSession, id: ViewId) {
        let items = tree.flow_children(id);
        if items.is_empty() {
            return;
        }
        let font_size = tree[id].facts.font_size;
        let columns_value = tree[id].css("grid-template-columns").to_string();
        let rows_value = tree[id].css("grid-template-rows").to_string();
        let tracks = parse_track_list(&columns_value, font_size)
            .zip(parse_track_list(&rows_value, font_size));

        let (placements, column_tracks, row_tracks) = match tracks {
            Some((columns, rows)) => {
                let flow = GridAutoFlow::parse(tree[id].css("grid-auto-flow"));
                let placements = place_items(tree, &items, columns.len(), rows.len(), flow);
                (placements, columns, rows)
            }
            None => {
                let _ = session.diagnostics.warn_once(
                    "grid",
                    &format!("unsupported track list `{columns_value}` / `{rows_value}`"),
                );
                let tolerance = session.config.line_tolerance;
                (place_by_geometry(tree, &items, tolerance), Vec::new(), Vec::new())
            }
        };

        let column_gap = gap(tree, id, "column-gap");
        let row_gap = gap(tree, id, "row-gap");
        let column_stride = if column_gap > 0.0 { 2 } else { 1 };
        let row_stride = if row_gap > 0.0 { 2 } else { 1 };

        let mut grid = Occupancy::new(0);
        for placement in &placements {
            let (column, column_span) =
                expand(placement.column, placement.column_span, column_stride);
            let (row, row_span) = expand(placement.row, placement.row_span, row_stride);
            grid.mark(column, column_span, row, row_span);
            write_placement(tree, placement.item, row, column, row_span, column_span);
        }
        let column_count = grid.columns();
        let row_count = grid.rows();
        if column_gap > 0.0 {
            for column in (1..column_count).step_by(2) {
                let row = (0..)
                    .find(|&row| grid.is_free(column, 1, row, 1))
                    .unwrap_or(row_count);
                grid.mark(column, 1, row, 1);
                let _ = add_spacer(tree, session, id, row, column, (column_gap, 0.0));
            }
        }
        if row_gap > 0.0 {
            for row in (1..row_count).step_by(2) {
                let column = (0..grid.columns())
                    .find(|&column| grid.is_free(column, 1, row, 1))
                    .unwrap_or(0);
                grid.mark(column, 1, row, 1);
                let _ = add_spacer(tree, session, id, row, column, (0.0, row_gap));
            }
        }

        let view = &mut tree[id];
        let _ = view.attributes.set(Attr::ColumnCount, grid.columns().to_string());
        let _ = view.attributes.set(Attr::RowCount, grid.rows().to_string());

        let weights = session.config.target_api >= LOLLIPOP;
        let precision = session.config.float_precision;
        for placement in &placements {
            if weights {
                apply_weights(tree, placement, &column_tracks, &row_tracks, precision);
            }
            set_gravity(tree, id, placement.item);
        }
        tracing::debug!(
            view = id.0,
            columns = column_count,
            rows = row_count,
            "placed grid items"
        );
    }

    fn dimension(
        &self,
        tree: &mut ViewTree,
        _session: &mut ConversionSession,
        _parent: ViewId,
        child: ViewId,
    ) {
        // Track sizes are not expressible: items keep their rendered size.
        let bounds = tree[child].bounds;
        let view = &mut tree[child];
        let _ = view.set_layout_mode(Axis::Horizontal, LayoutMode::Px(bounds.width), false);
        let _ = view.set_layout_mode(Axis::Vertical, LayoutMode::Px(bounds.height), false);
    }
}

/// [§ 8.3 Line-based placement](https://www.w3.org/TR/css-grid-1/#line-placement)
///
/// 0-based track of a definite line. Negative lines count from the last
/// line of the explicit grid. Tracks past [`MAX_SPAN`] are clamped to it.
fn resolve_definite_line(line: GridLine, track_count: usize) -> Option<usize> {
    let index = match line {
        GridLine::Line(n) if n > 0 => i64::from(n) - 1,
        GridLine::Line(n) => track_count as i64 + 1 + i64::from(n),
        GridLine::Auto | GridLine::Span(_) => return None,
    };
    Some(index.clamp(0, MAX_SPAN as i64) as usize)
}

/// Number of tracks an item spans, at most [`MAX_SPAN`].
fn resolve_item_span(start: GridLine, end: GridLine) -> usize {
    let span = match (start, end) {
        (_, GridLine::Span(n)) | (GridLine::Span(n), _) => n as usize,
        (GridLine::Line(s), GridLine::Line(e)) if s != e => {
            (i64::from(e) - i64::from(s)).unsigned_abs() as usize
        }
        _ => 1,
    };
    span.clamp(1, MAX_SPAN)
}

/// [§ 8.5 Grid Item Placement Algorithm](https://www.w3.org/TR/css-grid-1/#auto-placement-algo)
///
/// Items with a definite row and column go first, then items locked to a
/// column, then items locked to a row, then the rest in `grid-auto-flow`
/// order.
fn place_items(
    tree: &ViewTree,
    items: &[ViewId],
    explicit_columns: usize,
    explicit_rows: usize,
    flow: GridAutoFlow,
) -> Vec<Placement> {
    let mut grid = Occupancy::new(explicit_columns.max(1));
    let mut placed = Vec::with_capacity(items.len());
    let resolved: Vec<(ViewId, Option<usize>, Option<usize>, usize, usize)> = items
        .iter()
        .map(|&item| {
            let lines = ItemLines::of(tree, item);
            (
                item,
                resolve_definite_line(lines.column_start, explicit_columns),
                resolve_definite_line(lines.row_start, explicit_rows),
                resolve_item_span(lines.column_start, lines.column_end),
                resolve_item_span(lines.row_start, lines.row_end),
            )
        })
        .collect();

    let mut place = |grid: &mut Occupancy, item, row, column, row_span, column_span| {
        grid.mark(column, column_span, row, row_span);
        placed.push(Placement {
            item,
            row,
            column,
            row_span,
            column_span,
        });
    };

    for &(item, column, row, column_span, row_span) in &resolved {
        if let (Some(column), Some(row)) = (column, row) {
            place(&mut grid, item, row, column, row_span, column_span);
        }
    }
    for &(item, column, row, column_span, row_span) in &resolved {
        if let (Some(column), None) = (column, row) {
            grid.widen(column + column_span);
            let row = (0..)
                .find(|&row| grid.is_free(column, column_span, row, row_span))
                .unwrap_or(0);
            place(&mut grid, item, row, column, row_span, column_span);
        }
    }
    for &(item, column, row, column_span, row_span) in &resolved {
        if let (None, Some(row)) = (column, row) {
            let column = grid.first_free_in_row(row, 0, column_span, row_span);
            place(&mut grid, item, row, column, row_span, column_span);
        }
    }

    let (mut cursor_row, mut cursor_column) = (0, 0);
    for &(item, column, row, column_span, row_span) in &resolved {
        if column.is_some() || row.is_some() {
            continue;
        }
        grid.widen(column_span);
        match flow {
            GridAutoFlow::Row => loop {
                if grid.is_free(cursor_column, column_span, cursor_row, row_span) {
                    break;
                }
                cursor_column += 1;
                if cursor_column + column_span > grid.columns() {
                    cursor_column = 0;
                    cursor_row += 1;
                }
            },
            GridAutoFlow::Column => {
                let rows = explicit_rows.max(row_span).max(1);
                loop {
                    if cursor_row + row_span <= rows
                        && grid.is_free(cursor_column, column_span, cursor_row, row_span)
                    {
                        break;
                    }
                    cursor_row += 1;
                    if cursor_row + row_span > rows {
                        cursor_row = 0;
                        cursor_column += 1;
                        grid.widen(cursor_column + column_span);
                    }
                }
            }
        }
        place(&mut grid, item, cursor_row, cursor_column, row_span, column_span);
    }

    // Document order, which is also the render order GridLayout expects.
    placed.sort_by_key(|placement| {
        items
            .iter()
            .position(|&item| item == placement.item)
            .unwrap_or(usize::MAX)
    });
    placed
}

/// Distinct starts of `values`, merged within `tolerance`.
fn cluster(mut values: Vec<f64>, tolerance: f64) -> Vec<f64> {
    values.sort_by(f64::total_cmp);
    let mut clusters: Vec<f64> = Vec::new();
    for value in values {
        match clusters.last() {
            Some(&last) if within_range(last, value, tolerance) => {}
            _ => clusters.push(value),
        }
    }
    clusters
}

/// Placement read back from the rendered boxes: one column per distinct
/// left edge, one row per distinct top edge.
fn place_by_geometry(tree: &ViewTree, items: &[ViewId], tolerance: f64) -> Vec<Placement> {
    let lefts = cluster(items.iter().map(|&id| tree[id].bounds.left).collect(), tolerance);
    let tops = cluster(items.iter().map(|&id| tree[id].bounds.top).collect(), tolerance);
    let index_of = |clusters: &[f64], value: f64| {
        clusters
            .iter()
            .rposition(|&start| start <= value + tolerance)
            .unwrap_or(0)
    };
    let end_index = |clusters: &[f64], value: f64| {
        clusters
            .iter()
            .filter(|&&start| start < value - tolerance)
            .count()
    };
    items
        .iter()
        .map(|&item| {
            let bounds = tree[item].bounds;
            let column = index_of(&lefts, bounds.left);
            let row = index_of(&tops, bounds.top);
            Placement {
                item,
                row,
                column,
                row_span: end_index(&tops, bounds.bottom).saturating_sub(row).max(1),
                column_span: end_index(&lefts, bounds.right).saturating_sub(column).max(1),
            }
        })
        .collect()
}

fn gap(tree: &ViewTree, id: ViewId, property: &str) -> f64 {
    let view = &tree[id];
    CssLength::parse(view.css(property))
        .and_then(|length| length.to_px(view.facts.font_size, view.box_rect.width))
        .filter(|px| *px > 0.0)
        .unwrap_or(0.0)
}

/// Index and span once every gap is a track of its own.
const fn expand(index: usize, span: usize, stride: usize) -> (usize, usize) {
    (index * stride, span * stride - (stride - 1))
}

fn write_placement(
    tree: &mut ViewTree,
    id: ViewId,
    row: usize,
    column: usize,
    row_span: usize,
    column_span: usize,
) {
    let attributes = &mut tree[id].attributes;
    let _ = attributes.set(Attr::LayoutRow, row.to_string());
    let _ = attributes.set(Attr::LayoutColumn, column.to_string());
    if row_span > 1 {
        let _ = attributes.set(Attr::LayoutRowSpan, row_span.to_string());
    }
    if column_span > 1 {
        let _ = attributes.set(Attr::LayoutColumnSpan, column_span.to_string());
    }
}

/// A `Space` holding one gap track open.
fn add_spacer(
    tree: &mut ViewTree,
    session: &mut ConversionSession,
    parent: ViewId,
    row: usize,
    column: usize,
    (width, height): (f64, f64),
) -> ViewId {
    let spacer = tree.alloc(ViewOrigin::Spacer, "#space");
    let depth = tree[parent].depth + 1;
    tree.append_render_child(parent, spacer);
    let view = &mut tree[spacer];
    view.parent = Some(parent);
    view.depth = depth;
    view.container_type = ContainerType::Space;
    view.control_id = session.next_control_id("space");
    let _ = view.set_layout_mode(Axis::Horizontal, LayoutMode::Px(width), true);
    let _ = view.set_layout_mode(Axis::Vertical, LayoutMode::Px(height), true);
    let _ = view.attributes.set(Attr::LayoutRow, row.to_string());
    let _ = view.attributes.set(Attr::LayoutColumn, column.to_string());
    tracing::trace!(parent = parent.0, row, column, "grid gap spacer");
    spacer
}

/// Sum of the `fr` factors of the tracks in `range`, when all of them flex.
fn flex_factor(tracks: &[TrackSize], start: usize, span: usize) -> Option<f64> {
    let covered = tracks.get(start..start + span)?;
    covered
        .iter()
        .map(|track| match track {
            TrackSize::Fr(fr) => Some(*fr),
            _ => None,
        })
        .sum::<Option<f64>>()
        .filter(|total| *total > 0.0)
}

/// `fr` tracks become `layout_columnWeight` / `layout_rowWeight` with a
/// `0px` size.
fn apply_weights(
    tree: &mut ViewTree,
    placement: &Placement,
    columns: &[TrackSize],
    rows: &[TrackSize],
    precision: u8,
) {
    let view = &mut tree[placement.item];
    if let Some(weight) = flex_factor(columns, placement.column, placement.column_span) {
        let _ = view.set_layout_mode(Axis::Horizontal, LayoutMode::MatchConstraint, true);
        let _ = view
            .attributes
            .set(Attr::LayoutColumnWeight, format_float(weight, precision));
    }
    if let Some(weight) = flex_factor(rows, placement.row, placement.row_span) {
        let _ = view.set_layout_mode(Axis::Vertical, LayoutMode::MatchConstraint, true);
        let _ = view
            .attributes
            .set(Attr::LayoutRowWeight, format_float(weight, precision));
    }
}

/// [§ 11.1 Aligning with `justify-self` and `align-self`](https://www.w3.org/TR/css-align-3/#self-alignment)
fn set_gravity(tree: &mut ViewTree, parent: ViewId, id: ViewId) {
    let container = &tree[parent];
    let justify_items = AlignItems::parse(container.css("justify-items")).unwrap_or_default();
    let align_items = AlignItems::parse(container.css("align-items")).unwrap_or_default();
    let view = &tree[id];
    let justify = AlignItems::parse(view.css("justify-self")).unwrap_or(justify_items);
    let align = AlignItems::parse(view.css("align-self")).unwrap_or(align_items);
    let auto = |property: &str| {
        matches!(CssLength::parse(view.css(property)), Some(CssLength::Auto) | None)
    };

    let mut gravity = Vec::new();
    match justify {
        AlignItems::Stretch if auto("width") => gravity.push("fill_horizontal"),
        AlignItems::Center => gravity.push("center_horizontal"),
        AlignItems::End => gravity.push("right"),
        _ => {}
    }
    match align {
        AlignItems::Stretch if auto("height") => gravity.push("fill_vertical"),
        AlignItems::Center => gravity.push("center_vertical"),
        AlignItems::End => gravity.push("bottom"),
        _ => {}
    }
    if !gravity.is_empty() {
        let value = gravity.join("|");
        let _ = tree[id].attributes.set(Attr::LayoutGravity, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definite_lines() {
        assert_eq!(resolve_definite_line(GridLine::Line(1), 3), Some(0));
        assert_eq!(resolve_definite_line(GridLine::Line(3), 3), Some(2));
        assert_eq!(resolve_definite_line(GridLine::Line(-2), 3), Some(2));
        assert_eq!(resolve_definite_line(GridLine::Line(-10), 3), Some(0));
        assert_eq!(resolve_definite_line(GridLine::Auto, 3), None);
        assert_eq!(resolve_definite_line(GridLine::Span(2), 3), None);
    }

    #[test]
    fn test_item_span() {
        assert_eq!(resolve_item_span(GridLine::Auto, GridLine::Auto), 1);
        assert_eq!(resolve_item_span(GridLine::Line(1), GridLine::Span(3)), 3);
        assert_eq!(resolve_item_span(GridLine::Span(2), GridLine::Auto), 2);
        assert_eq!(resolve_item_span(GridLine::Line(1), GridLine::Line(4)), 3);
        assert_eq!(resolve_item_span(GridLine::Line(2), GridLine::Line(2)), 1);
    }

    #[test]
    fn test_expand_with_gap_tracks() {
        assert_eq!(expand(0, 1, 1), (0, 1));
        assert_eq!(expand(1, 1, 2), (2, 1));
        assert_eq!(expand(1, 2, 2), (2, 3));
    }

    #[test]
    fn test_flex_factor() {
        let tracks = [TrackSize::Fr(1.0), TrackSize::Fr(2.0), TrackSize::Fixed(40.0)];
        assert_eq!(flex_factor(&tracks, 0, 2), Some(3.0));
        assert_eq!(flex_factor(&tracks, 1, 2), None);
        assert_eq!(flex_factor(&tracks, 3, 1), None);
    }

    #[test]
    fn test_cluster() {
        assert_eq!(cluster(vec![100.0, 0.0, 0.5, 100.2], 1.0), vec![0.0, 100.0]);
    }
}
