//! Anchor/constraint engine.
//!
//! Turns the geometry of a classified container into anchors, biases,
//! chains, weights and helpers, one container at a time from the root down.
//! Siblings are processed in source order.
//!
//! # Module Structure
//!
//! - [`bias`] - `calculate_bias`
//! - [`helper`] - Guideline and barrier synthesis
//! - `horizontal` / `vertical` - Rows and columns inside ConstraintLayout
//! - `chain` - Two-ended chains
//! - `baseline` - Vertical alignment inside a row
//! - `position` - Absolutely positioned children
//! - `float` - Float rows
//! - `relative` - RelativeLayout
//! - `linear` - LinearLayout and FrameLayout

pub mod bias;
mod baseline;
mod chain;
mod float;
pub mod helper;
mod horizontal;
mod linear;
mod position;
mod relative;
mod vertical;

pub use baseline::set_baseline_items;
pub use bias::calculate_bias;
pub use chain::{link_chain, process_constraint_chain};
pub use float::constrain_float_rows;
pub use helper::{add_barrier, add_guideline, GuidelineValue};
pub use horizontal::process_constraint_horizontal;
pub use linear::{set_frame_layout, set_linear_layout};
pub use position::position_absolute;
pub use relative::set_relative_constraints;
pub use vertical::process_constraint_vertical;

use droid_common::within_range;

use crate::classifier::partition_rows;
use crate::node::{
    AlignmentType, BarrierDirection, BoxRegion, BoxSpaceable, ContainerType, Edge, View, ViewId,
};
use crate::session::ConversionSession;
use crate::tree::ViewTree;

/// Margins closer than this to the required value are left alone.
const FIT_TOLERANCE: f64 = 0.5;

/// Place the children of one container.
pub fn constrain_container(tree: &mut ViewTree, session: &mut ConversionSession, id: ViewId) {
    if let Some(kind) = tree[id].adapter {
        kind.adapter().constrain(tree, session, id);
        return;
    }
    match tree[id].container_type {
        ContainerType::Constraint => set_constraints(tree, session, id),
        ContainerType::Relative => set_relative_constraints(tree, session, id),
        ContainerType::Linear => set_linear_layout(tree, id),
        ContainerType::Frame => set_frame_layout(tree, id),
        _ => {}
    }
}

/// Anchor every child of a ConstraintLayout.
pub fn set_constraints(tree: &mut ViewTree, session: &mut ConversionSession, parent: ViewId) {
    for child in tree.absolute_children(parent) {
        position_absolute(tree, session, parent, child);
    }
    let flow = tree.flow_children(parent);
    if flow.is_empty() {
        return;
    }
    let alignment = tree[parent].alignment;
    if alignment.contains(AlignmentType::FLOAT) {
        constrain_float_rows(tree, session, parent);
    } else if alignment.contains(AlignmentType::HORIZONTAL) {
        process_constraint_horizontal(tree, session, parent, &flow);
        let _ = set_baseline_items(tree, parent, &flow, None);
    } else if alignment.contains(AlignmentType::VERTICAL) {
        process_constraint_vertical(tree, session, parent, &flow);
    } else {
        constrain_rows(tree, session, parent, &flow);
    }
}

/// Lines stacked under each other, each line a horizontal row. A line sits
/// below a barrier on the previous line, or below its only view.
pub fn constrain_rows(
    tree: &mut ViewTree,
    session: &mut ConversionSession,
    parent: ViewId,
    items: &[ViewId],
) {
    let rows = partition_rows(tree, items, session.config.line_tolerance);
    let mut above: Option<ViewId> = None;
    for row in rows {
        process_constraint_horizontal(tree, session, parent, &row);
        let _ = set_baseline_items(tree, parent, &row, above);
        above = match row.as_slice() {
            [single] => Some(*single),
            _ => add_barrier(tree, session, parent, &row, BarrierDirection::Bottom),
        };
    }
}

/// Set the margin on `edge` so the border edge lands where it was rendered,
/// given the coordinate of the anchor it hangs from.
pub(crate) fn fit_margin(tree: &mut ViewTree, id: ViewId, edge: Edge, anchor_at: f64) {
    let bounds = tree[id].bounds;
    let required = match edge {
        Edge::Left => bounds.left - anchor_at,
        Edge::Top => bounds.top - anchor_at,
        Edge::Right => anchor_at - bounds.right,
        Edge::Bottom => anchor_at - bounds.bottom,
    };
    let current = tree[id].box_value(BoxRegion::Margin, edge);
    if !within_range(required, current, FIT_TOLERANCE) {
        tree[id].modify_box(BoxRegion::Margin, edge, required - current);
    }
}

/// Both horizontal margins are `auto`.
pub(crate) fn auto_margins(view: &View) -> bool {
    view.css("margin-left") == "auto" && view.css("margin-right") == "auto"
}

/// Bottom edge of the lowest view among `ids`.
pub(crate) fn max_bottom(tree: &ViewTree, ids: &[ViewId]) -> f64 {
    ids.iter()
        .map(|&id| tree[id].bounds.bottom)
        .fold(f64::NEG_INFINITY, f64::max)
}
