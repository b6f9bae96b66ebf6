//! CSS multi-column containers.
//!
//! [CSS Multi-column Layout Module Level 1](https://www.w3.org/TR/css-multicol-1/)
//!
//! Items are assigned to columns by where they were rendered. Each column
//! is a vertical stack between two vertical guidelines at the column
//! boundaries. An item with `column-span: all` ends the current run of
//! columns; everything after it starts below a barrier.

use droid_common::within_range;

use super::{AdapterKind, LayoutAdapter};
use crate::constraint::{
    GuidelineValue, add_barrier, add_guideline, fit_margin, position_absolute,
};
use crate::node::{
    AlignmentType, AnchorTarget, Anchorable, Axis, BarrierDirection, ContainerType, Edge,
    LayoutPosition, ViewId,
};
use crate::session::ConversionSession;
use crate::tree::ViewTree;
use crate::values::{CssLength, parse_number};

/// Multi-column adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Column;

/// A run of items laid out in columns, or one spanning item.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Columns(Vec<ViewId>),
    Span(ViewId),
}

fn is_multi_column(tree: &ViewTree, id: ViewId) -> bool {
    let view = &tree[id];
    if view.is_flex() || view.is_grid() {
        return false;
    }
    let count = parse_number(view.css("column-count")).is_some_and(|n| n >= 1.0);
    let width = matches!(
        CssLength::parse(view.css("column-width")),
        Some(length) if length != CssLength::Auto
    );
    count || width
}

fn segments(tree: &ViewTree, items: &[ViewId]) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut run = Vec::new();
    for &item in items {
        if tree[item].css("column-span") == "all" {
            if !run.is_empty() {
                segments.push(Segment::Columns(std::mem::take(&mut run)));
            }
            segments.push(Segment::Span(item));
        } else {
            run.push(item);
        }
    }
    if !run.is_empty() {
        segments.push(Segment::Columns(run));
    }
    segments
}

/// Items grouped by left edge, columns left to right, items top to bottom.
fn split_columns(tree: &ViewTree, items: &[ViewId], tolerance: f64) -> Vec<Vec<ViewId>> {
    let mut columns: Vec<(f64, Vec<ViewId>)> = Vec::new();
    for &item in items {
        let left = tree[item].linear.left;
        match columns
            .iter_mut()
            .find(|(start, _)| within_range(*start, left, tolerance))
        {
            Some((_, members)) => members.push(item),
            None => columns.push((left, vec![item])),
        }
    }
    columns.sort_by(|a, b| a.0.total_cmp(&b.0));
    columns
        .into_iter()
        .map(|(_, mut members)| {
            members.sort_by(|&a, &b| tree[a].linear.top.total_cmp(&tree[b].linear.top));
            members
        })
        .collect()
}

impl LayoutAdapter for Column {
    fn classify(&self, tree: &mut ViewTree, _session: &mut ConversionSession, id: ViewId) -> bool {
        if !is_multi_column(tree, id) || tree.layout_children(id).is_empty() {
            return false;
        }
        let _ = tree.set_container_type(id, ContainerType::Constraint);
        let view = &mut tree[id];
        view.alignment |= AlignmentType::COLUMN | AlignmentType::AUTO_LAYOUT;
        view.adapter = Some(AdapterKind::Column);
        tracing::debug!(view = id.0, "multi-column container");
        true
    }

    fn constrain(&self, tree: &mut ViewTree, session: &mut ConversionSession, id: ViewId) {
        for child in tree.absolute_children(id) {
            position_absolute(tree, session, id, child);
        }
        let items = tree.flow_children(id);
        let content = tree[id].box_rect;
        let mut above: Option<ViewId> = None;
        for segment in segments(tree, &items) {
            let placed = match segment {
                Segment::Span(item) => {
                    let _ = tree[item].anchor_parent(Axis::Horizontal, None, None, false);
                    fit_margin(tree, item, Edge::Left, content.left);
                    fit_margin(tree, item, Edge::Right, content.right);
                    stack_below(tree, item, above, content.top);
                    vec![item]
                }
                Segment::Columns(run) => {
                    let columns = split_columns(tree, &run, session.config.line_tolerance);
                    place_columns(tree, session, id, &columns, above);
                    run
                }
            };
            above = match placed.as_slice() {
                [single] => Some(*single),
                _ => add_barrier(tree, session, id, &placed, BarrierDirection::Bottom),
            };
        }
    }
}

fn stack_below(tree: &mut ViewTree, item: ViewId, above: Option<ViewId>, top: f64) {
    match above {
        Some(previous) => {
            let _ = tree.anchor_to(item, LayoutPosition::TopBottom, previous);
            let at = tree[previous].bounds.bottom;
            fit_margin(tree, item, Edge::Top, at);
        }
        None => {
            let _ = tree.anchor(item, LayoutPosition::Top, AnchorTarget::Parent, false);
            fit_margin(tree, item, Edge::Top, top);
        }
    }
}

/// [§ 3 The number and width of columns](https://www.w3.org/TR/css-multicol-1/#the-number-and-width-of-columns)
///
/// A guideline at the start of every column after the first; each column
/// hangs between its start guideline (or the parent) and the next one.
fn place_columns(
    tree: &mut ViewTree,
    session: &mut ConversionSession,
    parent: ViewId,
    columns: &[Vec<ViewId>],
    above: Option<ViewId>,
) {
    let content = tree[parent].box_rect;
    let boundaries: Vec<(ViewId, f64)> = columns
        .iter()
        .skip(1)
        .map(|column| {
            let start = tree.union_linear(column).left;
            let offset = start - content.left;
            let value = if content.width > 0.0 {
                GuidelineValue::Percent(offset / content.width)
            } else {
                GuidelineValue::Begin(offset)
            };
            (add_guideline(tree, session, parent, Axis::Vertical, value), start)
        })
        .collect();

    for (index, column) in columns.iter().enumerate() {
        let start = index
            .checked_sub(1)
            .and_then(|previous| boundaries.get(previous))
            .copied();
        let end = boundaries.get(index).copied();
        for (position, &item) in column.iter().enumerate() {
            match start {
                Some((guideline, at)) => {
                    let _ = tree.anchor_to(item, LayoutPosition::LeftRight, guideline);
                    fit_margin(tree, item, Edge::Left, at);
                }
                None => {
                    let _ = tree.anchor(item, LayoutPosition::Left, AnchorTarget::Parent, false);
                    fit_margin(tree, item, Edge::Left, content.left);
                }
            }
            match end {
                Some((guideline, at)) => {
                    let _ = tree.anchor_to(item, LayoutPosition::RightLeft, guideline);
                    fit_margin(tree, item, Edge::Right, at);
                }
                None => {
                    let _ = tree.anchor(item, LayoutPosition::Right, AnchorTarget::Parent, false);
                    fit_margin(tree, item, Edge::Right, content.right);
                }
            }
            let previous = position.checked_sub(1).map(|p| column[p]).or(above);
            stack_below(tree, item, previous, content.top);
        }
    }
}
