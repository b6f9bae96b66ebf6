//! Flex containers.
//!
//! [CSS Flexible Box Layout Module Level 1](https://www.w3.org/TR/css-flexbox-1/)
//!
//! A flex container becomes a ConstraintLayout. Each flex line is a chain
//! along the main axis whose style follows `justify-content`; the cross
//! axis follows `align-items` / `align-self`. Lines of a wrapping container
//! stack under barriers. Growing and shrinking items become weighted chain
//! members.

use droid_common::within_range;

use super::{AdapterKind, LayoutAdapter};
use crate::classifier::same_line;
use crate::constraint::{
    add_barrier, calculate_bias, fit_margin, position_absolute, process_constraint_chain,
    set_baseline_items,
};
use crate::dimension::{adjust_grow_ratio, flex_basis, set_flex_dimension};
use crate::node::{
    AlignmentType, Anchorable, AnchorTarget, Axis, BarrierDirection, BoxRegion, BoxSpaceable,
    ChainStyle, ContainerType, Dimensionable, Edge, LayoutMode, LayoutPosition, View, ViewId,
};
use crate::session::ConversionSession;
use crate::tree::ViewTree;
use crate::values::{AlignItems, CssLength, FlexDirection, FlexWrap, Justify, parse_number};

/// Flexbox adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flexbox;

/// Anchor positions and edges of the side of an axis.
struct AxisSides {
    start: LayoutPosition,
    end: LayoutPosition,
    after: LayoutPosition,
    start_edge: Edge,
    end_edge: Edge,
    barrier: BarrierDirection,
}

impl AxisSides {
    const fn of(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Self {
                start: LayoutPosition::Left,
                end: LayoutPosition::Right,
                after: LayoutPosition::LeftRight,
                start_edge: Edge::Left,
                end_edge: Edge::Right,
                barrier: BarrierDirection::Right,
            },
            Axis::Vertical => Self {
                start: LayoutPosition::Top,
                end: LayoutPosition::Bottom,
                after: LayoutPosition::TopBottom,
                start_edge: Edge::Top,
                end_edge: Edge::Bottom,
                barrier: BarrierDirection::Bottom,
            },
        }
    }
}

const fn span(rect: &droid_dom::BoxRect, axis: Axis) -> (f64, f64) {
    match axis {
        Axis::Horizontal => (rect.left, rect.right),
        Axis::Vertical => (rect.top, rect.bottom),
    }
}

impl LayoutAdapter for Flexbox {
    fn classify(&self, tree: &mut ViewTree, _session: &mut ConversionSession, id: ViewId) -> bool {
        if !tree[id].is_flex() || tree.layout_children(id).is_empty() {
            return false;
        }
        let direction = FlexDirection::parse(tree[id].css("flex-direction"));
        let flow = if direction.is_row() {
            AlignmentType::HORIZONTAL
        } else {
            AlignmentType::VERTICAL
        };
        let _ = tree.set_container_type(id, ContainerType::Constraint);
        let view = &mut tree[id];
        view.alignment |= AlignmentType::AUTO_LAYOUT | flow;
        view.adapter = Some(AdapterKind::Flexbox);
        tracing::debug!(view = id.0, ?direction, "flex container");
        true
    }

    fn constrain(&self, tree: &mut ViewTree, session: &mut ConversionSession, id: ViewId) {
        for child in tree.absolute_children(id) {
            position_absolute(tree, session, id, child);
        }
        let view = &tree[id];
        let direction = FlexDirection::parse(view.css("flex-direction"));
        let wrap = FlexWrap::parse(view.css("flex-wrap"));
        let align_items = AlignItems::parse(view.css("align-items")).unwrap_or_default();
        let mut justify = Justify::parse(view.css("justify-content"));
        if direction.is_reverse() {
            justify = justify.reversed();
        }
        let main = if direction.is_row() {
            Axis::Horizontal
        } else {
            Axis::Vertical
        };

        let items = ordered_items(tree, id, direction);
        if items.is_empty() {
            return;
        }
        let tolerance = session.config.line_tolerance;
        let lines = if wrap == FlexWrap::NoWrap {
            vec![items]
        } else {
            flex_lines(tree, &items, main, tolerance)
        };
        let single_line = lines.len() == 1;
        let cross = AxisSides::of(main.cross());

        let mut above: Option<ViewId> = None;
        for line in &lines {
            let weighted = size_line(tree, session, id, line, main);
            process_constraint_chain(tree, line, main, justify);
            if weighted && line.len() > 1 {
                // Weights only distribute space in spread chains.
                tree[line[0]].set_chain_style(main, ChainStyle::Spread);
            }
            if single_line {
                let precision = session.config.float_precision;
                align_line(tree, id, line, main, align_items, precision);
            } else {
                stack_line(tree, id, line, main, align_items, above);
            }
            above = match line.as_slice() {
                [single] => Some(*single),
                _ => add_barrier(tree, session, id, line, cross.barrier),
            };
        }
    }
}

/// Flow children in `order`, reversed for reverse directions.
fn ordered_items(tree: &ViewTree, id: ViewId, direction: FlexDirection) -> Vec<ViewId> {
    let mut items = tree.flow_children(id);
    // Stable: equal `order` keeps document order.
    items.sort_by_key(|&item| parse_number(tree[item].css("order")).map_or(0, |n| n as i64));
    if direction.is_reverse() {
        items.reverse();
    }
    items
}

fn shares_line(a: &View, b: &View, main: Axis, tolerance: f64) -> bool {
    match main {
        Axis::Horizontal => same_line(a, b, tolerance),
        Axis::Vertical => {
            let overlap = a.linear.right.min(b.linear.right) - a.linear.left.max(b.linear.left);
            overlap > tolerance
        }
    }
}

/// [§ 9.3 Main Size Determination](https://www.w3.org/TR/css-flexbox-1/#main-sizing)
///
/// Lines are read back from the rendered geometry, ordered from the
/// cross-start edge.
fn flex_lines(tree: &ViewTree, items: &[ViewId], main: Axis, tolerance: f64) -> Vec<Vec<ViewId>> {
    let mut lines: Vec<Vec<ViewId>> = Vec::new();
    for &item in items {
        let existing = lines.iter_mut().find(|line| {
            line.iter()
                .any(|&other| shares_line(&tree[other], &tree[item], main, tolerance))
        });
        match existing {
            Some(line) => line.push(item),
            None => lines.push(vec![item]),
        }
    }
    let cross = main.cross();
    lines.sort_by(|a, b| {
        let start = |line: &[ViewId]| {
            line.iter()
                .map(|&id| span(&tree[id].linear, cross).0)
                .fold(f64::INFINITY, f64::min)
        };
        start(a).total_cmp(&start(b))
    });
    lines
}

/// Main sizes of one line. Returns whether any item is weighted.
fn size_line(
    tree: &mut ViewTree,
    session: &ConversionSession,
    parent: ViewId,
    line: &[ViewId],
    main: Axis,
) -> bool {
    let (start, end) = span(&tree[parent].box_rect, main);
    let hypothetical: f64 = line
        .iter()
        .map(|&item| {
            let (left, right) = span(&tree[item].linear, main);
            flex_basis(tree, parent, item, main).unwrap_or(right - left)
        })
        .sum();
    let overflow = hypothetical > end - start + session.config.line_tolerance;
    let mut weighted = false;
    for &item in line {
        weighted |= set_flex_dimension(tree, session, parent, item, main, overflow);
    }
    adjust_grow_ratio(tree, session, line, main);
    weighted
}

fn align_of(view: &View, container: AlignItems) -> AlignItems {
    AlignItems::parse(view.css("align-self")).unwrap_or(container)
}

fn cross_size_auto(view: &View, cross: Axis) -> bool {
    let property = match cross {
        Axis::Horizontal => "width",
        Axis::Vertical => "height",
    };
    matches!(CssLength::parse(view.css(property)), Some(CssLength::Auto) | None)
}

/// [§ 8.3 Cross-axis Alignment](https://www.w3.org/TR/css-flexbox-1/#align-items-property)
///
/// Cross placement of the only line, relative to the container.
fn align_line(
    tree: &mut ViewTree,
    parent: ViewId,
    line: &[ViewId],
    main: Axis,
    container: AlignItems,
    precision: u8,
) {
    let cross = main.cross();
    let sides = AxisSides::of(cross);
    let (content_start, content_end) = span(&tree[parent].box_rect, cross);
    let mut baseline = Vec::new();
    for &item in line {
        let align = match align_of(&tree[item], container) {
            AlignItems::Baseline if main == Axis::Horizontal => {
                baseline.push(item);
                continue;
            }
            AlignItems::Baseline => AlignItems::Start,
            other => other,
        };
        match align {
            AlignItems::Stretch => {
                let _ = tree[item].anchor_parent(cross, None, None, false);
                fit_margin(tree, item, sides.start_edge, content_start);
                fit_margin(tree, item, sides.end_edge, content_end);
                if cross_size_auto(&tree[item], cross) {
                    let _ = tree[item].set_layout_mode(cross, LayoutMode::MatchConstraint, false);
                }
            }
            AlignItems::Start | AlignItems::Baseline => {
                let _ = tree.anchor(item, sides.start, AnchorTarget::Parent, false);
                fit_margin(tree, item, sides.start_edge, content_start);
            }
            AlignItems::End => {
                let _ = tree.anchor(item, sides.end, AnchorTarget::Parent, false);
                fit_margin(tree, item, sides.end_edge, content_end);
            }
            AlignItems::Center => {
                let (start, end) = span(&tree[item].linear, cross);
                let bias = calculate_bias(start - content_start, content_end - end, precision);
                tree[item].reset_box(BoxRegion::Margin, &[sides.start_edge, sides.end_edge]);
                let _ = tree[item].anchor_parent(cross, Some(bias), None, false);
            }
        }
    }
    if !baseline.is_empty() {
        let _ = set_baseline_items(tree, parent, &baseline, None);
    }
}

/// Cross placement of a line of a wrapping container: its items start
/// after the previous line.
fn stack_line(
    tree: &mut ViewTree,
    parent: ViewId,
    line: &[ViewId],
    main: Axis,
    container: AlignItems,
    above: Option<ViewId>,
) {
    let cross = main.cross();
    let sides = AxisSides::of(cross);
    let line_start = match above {
        Some(previous) => span(&tree[previous].bounds, cross).1,
        None => span(&tree[parent].box_rect, cross).0,
    };
    let (_, line_end) = line
        .iter()
        .map(|&item| span(&tree[item].linear, cross))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(s, e), (a, b)| (s.min(a), e.max(b)));
    for &item in line {
        match above {
            Some(previous) => {
                let _ = tree.anchor_to(item, sides.after, previous);
            }
            None => {
                let _ = tree.anchor(item, sides.start, AnchorTarget::Parent, false);
            }
        }
        fit_margin(tree, item, sides.start_edge, line_start);
        let (start, end) = span(&tree[item].bounds, cross);
        let stretched = align_of(&tree[item], container) == AlignItems::Stretch
            && cross_size_auto(&tree[item], cross)
            && within_range(end, line_end, 1.0);
        if stretched {
            let _ = tree[item].set_layout_mode(cross, LayoutMode::Px(end - start), false);
        }
    }
}
