//! LinearLayout and FrameLayout placement.
//!
//! Neither container anchors: children are placed by order, gravity and
//! margins. Margins are fitted so each child lands where it was rendered.

use droid_dom::FloatSide;

use super::{auto_margins, fit_margin};
use crate::box_spacing::fit_vertical_gap;
use crate::node::{AlignmentType, Attr, BoxRegion, BoxSpaceable, ContainerType, Edge, ViewId};
use crate::tree::ViewTree;
use crate::values::{TextAlign, VerticalAlign};

/// Orientation, gravity and child margins of a LinearLayout.
pub fn set_linear_layout(tree: &mut ViewTree, parent: ViewId) {
    let horizontal = tree[parent].alignment.contains(AlignmentType::HORIZONTAL)
        && !tree[parent].alignment.contains(AlignmentType::VERTICAL);
    let orientation = if horizontal { "horizontal" } else { "vertical" };
    let _ = tree[parent].attributes.set(Attr::Orientation, orientation);

    let flow = tree.flow_children(parent);
    let content = tree[parent].box_rect;
    let text_align = TextAlign::parse(tree[parent].css("text-align"));

    if horizontal {
        let inline_row = flow.iter().all(|&c| !tree[c].facts.block);
        let gravity = match text_align {
            TextAlign::Center if inline_row => Some("center_horizontal"),
            TextAlign::End if inline_row => Some("right"),
            _ => None,
        };
        if let Some(gravity) = gravity {
            let _ = tree[parent].attributes.set(Attr::Gravity, gravity);
        }
        for (index, &item) in flow.iter().enumerate() {
            match index.checked_sub(1).map(|i| flow[i]) {
                None if gravity.is_none() => fit_margin(tree, item, Edge::Left, content.left),
                None => {}
                Some(previous) => {
                    let at = tree[previous].bounds.right
                        + tree[previous].box_value(BoxRegion::Margin, Edge::Right);
                    fit_margin(tree, item, Edge::Left, at);
                }
            }
            let view = &tree[item];
            let align = VerticalAlign::parse(
                view.css("vertical-align"),
                view.facts.font_size,
                content.height,
            );
            let layout_gravity = match align {
                VerticalAlign::Middle => Some("center_vertical"),
                VerticalAlign::Top | VerticalAlign::TextTop => Some("top"),
                VerticalAlign::Bottom | VerticalAlign::TextBottom => Some("bottom"),
                _ => None,
            };
            if let Some(value) = layout_gravity {
                let _ = tree[item].attributes.set(Attr::LayoutGravity, value);
            }
        }
        set_baseline_child(tree, &flow);
    } else {
        for (index, &item) in flow.iter().enumerate() {
            match index.checked_sub(1).map(|i| flow[i]) {
                None => fit_margin(tree, item, Edge::Top, content.top),
                Some(previous) => fit_vertical_gap(tree, previous, item),
            }
            let view = &tree[item];
            let inline = !view.facts.block;
            let gravity = if auto_margins(view) {
                tree[item].reset_box(BoxRegion::Margin, &[Edge::Left, Edge::Right]);
                Some("center_horizontal")
            } else if view.facts.floating == Some(FloatSide::Right)
                || (inline && text_align == TextAlign::End)
            {
                fit_margin(tree, item, Edge::Right, content.right);
                Some("right")
            } else if inline && text_align == TextAlign::Center {
                Some("center_horizontal")
            } else {
                fit_margin(tree, item, Edge::Left, content.left);
                None
            };
            if let Some(value) = gravity {
                let _ = tree[item].attributes.set(Attr::LayoutGravity, value);
            }
        }
    }
}

/// Inside a horizontal LinearLayout, a nested LinearLayout aligns on the
/// baseline of its first text child.
fn set_baseline_child(tree: &mut ViewTree, flow: &[ViewId]) {
    for &item in flow {
        if tree[item].container_type != ContainerType::Linear {
            continue;
        }
        let index = tree
            .flow_children(item)
            .iter()
            .position(|&c| tree[c].has_baseline());
        match index {
            Some(index) => {
                let _ = tree[item]
                    .attributes
                    .set(Attr::BaselineAlignedChildIndex, index.to_string());
            }
            None => {
                let _ = tree[item].attributes.set(Attr::BaselineAligned, "false");
            }
        }
    }
}

/// Gravity and margins of FrameLayout children.
pub fn set_frame_layout(tree: &mut ViewTree, parent: ViewId) {
    let flow = tree.flow_children(parent);
    let content = tree[parent].box_rect;
    let text_align = TextAlign::parse(tree[parent].css("text-align"));
    for item in flow {
        fit_margin(tree, item, Edge::Top, content.top);
        let view = &tree[item];
        let inline = !view.facts.block;
        let right = view.facts.floating == Some(FloatSide::Right)
            || view.alignment.contains(AlignmentType::RIGHT)
            || (inline && text_align == TextAlign::End);
        let center = auto_margins(view) || (inline && text_align == TextAlign::Center);
        let gravity = if right {
            fit_margin(tree, item, Edge::Right, content.right);
            "right|top"
        } else if center {
            tree[item].reset_box(BoxRegion::Margin, &[Edge::Left, Edge::Right]);
            "center_horizontal|top"
        } else {
            fit_margin(tree, item, Edge::Left, content.left);
            continue;
        };
        let _ = tree[item].attributes.set(Attr::LayoutGravity, gravity);
    }
}
