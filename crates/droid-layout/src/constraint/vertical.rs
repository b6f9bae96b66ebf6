//! Top-to-bottom columns inside a ConstraintLayout.

use droid_dom::FloatSide;

use super::fit_margin;
use super::horizontal::place_single;
use crate::node::{AnchorTarget, BoxRegion, BoxSpaceable, Edge, LayoutPosition, ViewId};
use crate::session::ConversionSession;
use crate::tree::ViewTree;
use crate::values::TextAlign;

/// Stack `column` from the parent's top, each item below the previous one.
///
/// Horizontal placement comes from the item itself: auto margins center or
/// bias it, right floats hang from the parent's right edge, block boxes
/// stretch, and inline items follow the parent's `text-align`.
pub fn process_constraint_vertical(
    tree: &mut ViewTree,
    session: &mut ConversionSession,
    parent: ViewId,
    column: &[ViewId],
) {
    let content = tree[parent].box_rect;
    let text_align = TextAlign::parse(tree[parent].css("text-align"));
    for (index, &item) in column.iter().enumerate() {
        match index.checked_sub(1).map(|i| column[i]) {
            None => {
                let _ = tree.anchor(item, LayoutPosition::Top, AnchorTarget::Parent, false);
                fit_margin(tree, item, Edge::Top, content.top);
            }
            Some(previous) => {
                let _ = tree.anchor_to(item, LayoutPosition::TopBottom, previous);
                // The gap is carried by the lower item alone.
                tree[previous].reset_box(BoxRegion::Margin, &[Edge::Bottom]);
                let at = tree[previous].bounds.bottom;
                fit_margin(tree, item, Edge::Top, at);
            }
        }

        if tree[item].facts.floating == Some(FloatSide::Right) {
            let _ = tree.anchor(item, LayoutPosition::Right, AnchorTarget::Parent, false);
            fit_margin(tree, item, Edge::Right, content.right);
            continue;
        }
        let align = if tree[item].facts.block {
            TextAlign::Start
        } else {
            text_align
        };
        place_single(tree, session, parent, item, align);
    }
}
