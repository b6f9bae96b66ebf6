//! Float rows.
//!
//! [§ 9.5 Floats](https://www.w3.org/TR/CSS2/visuren.html#floats)
//!
//! "A float is a box that is shifted to the left or right on the current
//! line."

use droid_dom::FloatSide;

use super::{add_barrier, fit_margin, max_bottom};
use crate::classifier::same_line;
use crate::node::{
    AnchorTarget, BarrierDirection, BoxRegion, BoxSpaceable, Edge, LayoutPosition, ViewId,
};
use crate::session::ConversionSession;
use crate::tree::ViewTree;

/// Anchor floats and the content flowing around them.
///
/// Left floats chain from the parent's left edge, right floats from its
/// right edge; a float that dropped to a new line restarts from the edge.
/// Content next to floats hangs between the nearest float of each side.
/// Content below the floats, or clearing them, sits under a barrier on
/// their bottom edge.
pub fn constrain_float_rows(tree: &mut ViewTree, session: &mut ConversionSession, parent: ViewId) {
    let tolerance = session.config.line_tolerance;
    let content = tree[parent].box_rect;
    let flow = tree.flow_children(parent);
    let side = |tree: &ViewTree, side: FloatSide| -> Vec<ViewId> {
        flow.iter()
            .copied()
            .filter(|&id| tree[id].facts.floating == Some(side))
            .collect()
    };
    let lefts = side(tree, FloatSide::Left);
    let rights = side(tree, FloatSide::Right);
    let others: Vec<ViewId> = flow
        .iter()
        .copied()
        .filter(|&id| tree[id].facts.floating.is_none())
        .collect();

    chain_floats(tree, &lefts, Edge::Left, content.left, tolerance);
    chain_floats(tree, &rights, Edge::Right, content.right, tolerance);
    for &float in lefts.iter().chain(&rights) {
        let _ = tree.anchor(float, LayoutPosition::Top, AnchorTarget::Parent, false);
        fit_margin(tree, float, Edge::Top, content.top);
    }

    let floats: Vec<ViewId> = lefts.iter().chain(&rights).copied().collect();
    let floats_bottom = max_bottom(tree, &floats);
    let mut previous: Option<ViewId> = None;
    for item in others {
        let clears = tree[item].css("clear") != "none";
        let beside = |ids: &[ViewId]| -> Vec<ViewId> {
            if clears {
                return Vec::new();
            }
            ids.iter()
                .copied()
                .filter(|&f| same_line(&tree[f], &tree[item], tolerance))
                .collect()
        };
        let left_of = beside(&lefts);
        let right_of = beside(&rights);

        // Vertical.
        if let Some(above) = previous {
            let _ = tree.anchor_to(item, LayoutPosition::TopBottom, above);
            tree[above].reset_box(BoxRegion::Margin, &[Edge::Bottom]);
            let at = tree[above].bounds.bottom;
            fit_margin(tree, item, Edge::Top, at);
        } else if left_of.is_empty()
            && right_of.is_empty()
            && tree[item].bounds.top + tolerance >= floats_bottom
        {
            match add_barrier(tree, session, parent, &floats, BarrierDirection::Bottom) {
                Some(barrier) => {
                    let _ = tree.anchor_to(item, LayoutPosition::TopBottom, barrier);
                    fit_margin(tree, item, Edge::Top, floats_bottom);
                }
                None => {
                    let _ = tree.anchor(item, LayoutPosition::Top, AnchorTarget::Parent, false);
                    fit_margin(tree, item, Edge::Top, content.top);
                }
            }
        } else {
            let _ = tree.anchor(item, LayoutPosition::Top, AnchorTarget::Parent, false);
            fit_margin(tree, item, Edge::Top, content.top);
        }

        // Horizontal: between the nearest floats of each side.
        let nearest_left = left_of
            .iter()
            .copied()
            .max_by(|a, b| tree[*a].bounds.right.total_cmp(&tree[*b].bounds.right));
        let nearest_right = right_of
            .iter()
            .copied()
            .min_by(|a, b| tree[*a].bounds.left.total_cmp(&tree[*b].bounds.left));
        match nearest_left {
            Some(float) => {
                let _ = tree.anchor_to(item, LayoutPosition::LeftRight, float);
                tree[float].reset_box(BoxRegion::Margin, &[Edge::Right]);
                let at = tree[float].bounds.right;
                fit_margin(tree, item, Edge::Left, at);
            }
            None => {
                let _ = tree.anchor(item, LayoutPosition::Left, AnchorTarget::Parent, false);
                fit_margin(tree, item, Edge::Left, content.left);
            }
        }
        if let Some(float) = nearest_right {
            let _ = tree.anchor_to(item, LayoutPosition::RightLeft, float);
            tree[float].reset_box(BoxRegion::Margin, &[Edge::Left]);
            let at = tree[float].bounds.left;
            fit_margin(tree, item, Edge::Right, at);
        } else if tree[item].facts.block {
            let _ = tree.anchor(item, LayoutPosition::Right, AnchorTarget::Parent, false);
        }
        previous = Some(item);
    }
}

/// Chain floats of one side from the parent edge, restarting on each new line.
fn chain_floats(
    tree: &mut ViewTree,
    floats: &[ViewId],
    edge: Edge,
    parent_at: f64,
    tolerance: f64,
) {
    let (to_parent, to_previous) = match edge {
        Edge::Right => (LayoutPosition::Right, LayoutPosition::RightLeft),
        _ => (LayoutPosition::Left, LayoutPosition::LeftRight),
    };
    let mut previous: Option<ViewId> = None;
    for &float in floats {
        match previous.filter(|&p| same_line(&tree[p], &tree[float], tolerance)) {
            Some(p) => {
                let _ = tree.anchor_to(float, to_previous, p);
                // Only the chained float's own margin counts toward the gap.
                tree[p].reset_box(BoxRegion::Margin, &[edge.opposite()]);
                let bounds = tree[p].bounds;
                let at = if edge == Edge::Right {
                    bounds.left
                } else {
                    bounds.right
                };
                fit_margin(tree, float, edge, at);
            }
            None => {
                let _ = tree.anchor(float, to_parent, AnchorTarget::Parent, false);
                fit_margin(tree, float, edge, parent_at);
            }
        }
        previous = Some(float);
    }
}
