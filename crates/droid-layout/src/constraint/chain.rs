//! Two-ended chains.
//!
//! [Chains](https://developer.android.com/reference/androidx/constraintlayout/widget/ConstraintLayout#Chains)

use super::fit_margin;
use crate::node::{
    Anchorable, AnchorTarget, Axis, BoxRegion, BoxSpaceable, ChainStyle, Edge, LayoutPosition,
    ViewId,
};
use crate::tree::ViewTree;
use crate::values::Justify;

/// Link `items` into a chain along `axis`: the ends to the parent, each
/// neighbour pair to each other. Returns false when an anchor failed.
pub fn link_chain(tree: &mut ViewTree, items: &[ViewId], axis: Axis) -> bool {
    let (start, end, start_end, end_start) = match axis {
        Axis::Horizontal => (
            LayoutPosition::Left,
            LayoutPosition::Right,
            LayoutPosition::LeftRight,
            LayoutPosition::RightLeft,
        ),
        Axis::Vertical => (
            LayoutPosition::Top,
            LayoutPosition::Bottom,
            LayoutPosition::TopBottom,
            LayoutPosition::BottomTop,
        ),
    };
    let (Some(&first), Some(&last)) = (items.first(), items.last()) else {
        return false;
    };
    let mut linked = tree.anchor(first, start, AnchorTarget::Parent, true);
    for pair in items.windows(2) {
        linked &= tree.anchor_pair(pair[1], start_end, pair[0], end_start);
    }
    linked &= tree.anchor(last, end, AnchorTarget::Parent, true);
    linked
}

/// Full chain for a flex main axis.
///
/// [§ 8.2 justify-content](https://www.w3.org/TR/css-flexbox-1/#justify-content-property)
///
/// `flex-start`, `center` and `flex-end` pack the chain with bias 0, 0.5 and
/// 1; `space-between` spreads inside the ends; `space-around` and
/// `space-evenly` spread with space at the ends as well. Gaps between items
/// become the leading margin of the following item.
pub fn process_constraint_chain(
    tree: &mut ViewTree,
    items: &[ViewId],
    axis: Axis,
    justify: Justify,
) {
    let Some(&head) = items.first() else {
        return;
    };
    let (leading, trailing) = match axis {
        Axis::Horizontal => (Edge::Left, Edge::Right),
        Axis::Vertical => (Edge::Top, Edge::Bottom),
    };

    if items.len() == 1 {
        let bias = match justify {
            Justify::Start | Justify::SpaceBetween => 0.0,
            Justify::End => 1.0,
            Justify::Center | Justify::SpaceAround | Justify::SpaceEvenly => 0.5,
        };
        let _ = tree[head].anchor_parent(axis, Some(bias), None, true);
        return;
    }

    let _ = link_chain(tree, items, axis);
    let packed = matches!(justify, Justify::Start | Justify::Center | Justify::End);
    for pair in items.windows(2) {
        let (previous, current) = (pair[0], pair[1]);
        tree[previous].reset_box(BoxRegion::Margin, &[trailing]);
        if packed {
            let bounds = tree[previous].bounds;
            let at = match axis {
                Axis::Horizontal => bounds.right,
                Axis::Vertical => bounds.bottom,
            };
            fit_margin(tree, current, leading, at);
        }
    }
    if !packed {
        // Spread chains compute their own spacing.
        for &item in &items[1..] {
            tree[item].reset_box(BoxRegion::Margin, &[leading]);
        }
    }

    match justify {
        Justify::Start => set_packed(tree, head, axis, 0.0),
        Justify::Center => set_packed(tree, head, axis, 0.5),
        Justify::End => set_packed(tree, head, axis, 1.0),
        Justify::SpaceBetween => tree[head].set_chain_style(axis, ChainStyle::SpreadInside),
        Justify::SpaceAround | Justify::SpaceEvenly => {
            tree[head].set_chain_style(axis, ChainStyle::Spread);
        }
    }
}

fn set_packed(tree: &mut ViewTree, head: ViewId, axis: Axis, bias: f64) {
    tree[head].set_chain_style(axis, ChainStyle::Packed);
    tree[head].set_bias(axis, bias);
}
