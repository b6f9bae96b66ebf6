//! Absolutely positioned children.
//!
//! [§ 9.6 Absolute positioning](https://www.w3.org/TR/CSS2/visuren.html#absolute-positioning)
//!
//! "In the absolute positioning model, a box is explicitly offset with
//! respect to its containing block."

use super::{GuidelineValue, add_guideline, fit_margin};
use crate::node::{AnchorTarget, Axis, ContainerType, Edge, LayoutPosition, View, ViewId};
use crate::session::ConversionSession;
use crate::tree::ViewTree;
use crate::values::CssLength;

/// Anchor an out-of-flow child to the sides its offsets name.
///
/// A side with a non-`auto` offset anchors to the parent; with both offsets
/// of an axis set the child is anchored on both ends and its size follows
/// from the constraints. With neither, the child keeps its static position
/// from the start edge. Inside a ConstraintLayout a percentage offset hangs
/// the side from a percent guideline instead, so it follows the parent's
/// size. Margins are fitted so the rendered position is kept.
pub fn position_absolute(
    tree: &mut ViewTree,
    session: &mut ConversionSession,
    parent: ViewId,
    child: ViewId,
) {
    let content = tree[parent].box_rect;
    let guidelines = tree[parent].container_type == ContainerType::Constraint;
    for axis in [Axis::Horizontal, Axis::Vertical] {
        let (start, end) = offsets(&tree[child], &tree[parent], axis, session);
        let (start_position, end_position, start_edge, end_edge, start_at, end_at) = match axis {
            Axis::Horizontal => (
                LayoutPosition::Left,
                LayoutPosition::Right,
                Edge::Left,
                Edge::Right,
                content.left,
                content.right,
            ),
            Axis::Vertical => (
                LayoutPosition::Top,
                LayoutPosition::Bottom,
                Edge::Top,
                Edge::Bottom,
                content.top,
                content.bottom,
            ),
        };
        let [start_percent, end_percent] = percent_offsets(&tree[child], axis)
            .map(|percent| percent.filter(|_| guidelines));
        if start.is_some() || end.is_none() {
            match start_percent {
                Some(percent) => {
                    let value = GuidelineValue::Percent(percent);
                    hang_from_guideline(tree, session, parent, child, axis, start_edge, value);
                }
                None => {
                    let _ = tree.anchor(child, start_position, AnchorTarget::Parent, false);
                    fit_margin(tree, child, start_edge, start_at);
                }
            }
        }
        if end.is_some() {
            match end_percent {
                Some(percent) => {
                    let value = GuidelineValue::Percent(1.0 - percent);
                    hang_from_guideline(tree, session, parent, child, axis, end_edge, value);
                }
                None => {
                    let _ = tree.anchor(child, end_position, AnchorTarget::Parent, false);
                    fit_margin(tree, child, end_edge, end_at);
                }
            }
        }
    }
    tracing::trace!(view = child.0, parent = parent.0, "positioned absolute child");
}

/// Percentage `left`/`right` (or `top`/`bottom`) offsets strictly between
/// 0 and 100%, as fractions.
fn percent_offsets(view: &View, axis: Axis) -> [Option<f64>; 2] {
    let names = match axis {
        Axis::Horizontal => ["left", "right"],
        Axis::Vertical => ["top", "bottom"],
    };
    names.map(|name| match CssLength::parse(view.css(name)) {
        Some(CssLength::Percent(fraction)) if fraction > 0.0 && fraction < 1.0 => Some(fraction),
        _ => None,
    })
}

/// Anchor `edge` of `child` to the guideline at `value` across `axis`.
fn hang_from_guideline(
    tree: &mut ViewTree,
    session: &mut ConversionSession,
    parent: ViewId,
    child: ViewId,
    axis: Axis,
    edge: Edge,
    value: GuidelineValue,
) {
    // A guideline at an x offset runs vertically.
    let orientation = match axis {
        Axis::Horizontal => Axis::Vertical,
        Axis::Vertical => Axis::Horizontal,
    };
    let guideline = add_guideline(tree, session, parent, orientation, value);
    let position = match edge {
        Edge::Left => LayoutPosition::Left,
        Edge::Top => LayoutPosition::Top,
        Edge::Right => LayoutPosition::Right,
        Edge::Bottom => LayoutPosition::Bottom,
    };
    let _ = tree.anchor(child, position, AnchorTarget::View(guideline), false);
    let line = tree[guideline].bounds;
    let at = match axis {
        Axis::Horizontal => line.left,
        Axis::Vertical => line.top,
    };
    fit_margin(tree, child, edge, at);
}

/// Non-`auto` offsets of `axis` in pixels.
pub(crate) fn offsets(
    view: &View,
    parent: &View,
    axis: Axis,
    session: &mut ConversionSession,
) -> (Option<f64>, Option<f64>) {
    let (names, reference) = match axis {
        Axis::Horizontal => (["left", "right"], parent.box_rect.width),
        Axis::Vertical => (["top", "bottom"], parent.box_rect.height),
    };
    let [start, end] = names.map(|name| {
        let value = view.css(name);
        match CssLength::parse(value) {
            Some(length) => length.to_px(view.facts.font_size, reference),
            None => {
                let _ = session
                    .diagnostics
                    .warn_once("position", &format!("unsupported {name} offset `{value}`"));
                None
            }
        }
    });
    (start, end)
}
