//! RelativeLayout placement.
//!
//! [RelativeLayout.LayoutParams](https://developer.android.com/reference/android/widget/RelativeLayout.LayoutParams)
//!
//! RelativeLayout adds the target's own margin when a view is placed next to
//! a sibling (`layout_toRightOf`, `layout_below`), so sibling anchors fit
//! against the target's margin box.

use droid_dom::FloatSide;

use super::{auto_margins, fit_margin, position_absolute, set_baseline_items};
use crate::node::{
    AlignmentType, Anchorable, AnchorTarget, Axis, BoxRegion, BoxSpaceable, Edge,
    LayoutPosition, ViewId,
};
use crate::session::ConversionSession;
use crate::tree::ViewTree;
use crate::values::TextAlign;

/// Anchor every child of a RelativeLayout.
pub fn set_relative_constraints(
    tree: &mut ViewTree,
    session: &mut ConversionSession,
    parent: ViewId,
) {
    for child in tree.absolute_children(parent) {
        position_absolute(tree, session, parent, child);
    }
    let flow = tree.flow_children(parent);
    let content = tree[parent].box_rect;
    let alignment = tree[parent].alignment;

    if alignment.contains(AlignmentType::HORIZONTAL) {
        for (index, &item) in flow.iter().enumerate() {
            match index.checked_sub(1).map(|i| flow[i]) {
                None => {
                    let _ = tree.anchor(item, LayoutPosition::Left, AnchorTarget::Parent, false);
                    fit_margin(tree, item, Edge::Left, content.left);
                }
                Some(previous) => {
                    let _ = tree.anchor_to(item, LayoutPosition::LeftRight, previous);
                    let at = tree[previous].bounds.right
                        + tree[previous].box_value(BoxRegion::Margin, Edge::Right);
                    fit_margin(tree, item, Edge::Left, at);
                }
            }
        }
        let _ = set_baseline_items(tree, parent, &flow, None);
        return;
    }

    let text_align = TextAlign::parse(tree[parent].css("text-align"));
    for (index, &item) in flow.iter().enumerate() {
        let previous = index.checked_sub(1).map(|i| flow[i]);
        match previous.filter(|_| alignment.contains(AlignmentType::VERTICAL)) {
            Some(previous) => {
                let _ = tree.anchor_to(item, LayoutPosition::TopBottom, previous);
                let at = tree[previous].bounds.bottom
                    + tree[previous].box_value(BoxRegion::Margin, Edge::Bottom);
                fit_margin(tree, item, Edge::Top, at);
            }
            None => {
                let _ = tree.anchor(item, LayoutPosition::Top, AnchorTarget::Parent, false);
                fit_margin(tree, item, Edge::Top, content.top);
            }
        }
        place_horizontal(tree, item, content.left, content.right, text_align);
    }
}

/// Horizontal placement of a stacked child: centered for auto margins or
/// centered inline text, right for right floats and end-aligned inline
/// text, else left.
fn place_horizontal(
    tree: &mut ViewTree,
    item: ViewId,
    left: f64,
    right: f64,
    text_align: TextAlign,
) {
    let view = &tree[item];
    let align = if auto_margins(view) {
        TextAlign::Center
    } else if view.facts.floating == Some(FloatSide::Right) {
        TextAlign::End
    } else if view.facts.block {
        TextAlign::Start
    } else {
        text_align
    };
    match align {
        TextAlign::Center => {
            tree[item].reset_box(BoxRegion::Margin, &[Edge::Left, Edge::Right]);
            let _ = tree[item].anchor_parent(Axis::Horizontal, Some(0.5), None, false);
        }
        TextAlign::End => {
            let _ = tree[item].anchor_parent(Axis::Horizontal, Some(1.0), None, false);
            fit_margin(tree, item, Edge::Right, right);
        }
        TextAlign::Start | TextAlign::Justify => {
            let _ = tree[item].anchor_parent(Axis::Horizontal, Some(0.0), None, false);
            fit_margin(tree, item, Edge::Left, left);
        }
    }
}
