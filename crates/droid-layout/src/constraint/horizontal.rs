//! Left-to-right rows inside a ConstraintLayout.

use droid_common::{format_float, truncate, within_range};

use super::{auto_margins, calculate_bias, fit_margin, link_chain};
use crate::node::{
    Anchorable, AnchorTarget, Attr, Axis, BoxRegion, BoxSpaceable, ChainStyle, Dimensionable,
    Edge, LayoutMode, LayoutPosition, ViewId,
};
use crate::session::ConversionSession;
use crate::tree::ViewTree;
use crate::values::TextAlign;

/// Anchor a row of siblings from left to right.
///
/// `text-align` of the parent places inline rows: `start` anchors each item
/// to its left neighbour, `center` and `end` build a packed chain with bias
/// 0.5 or 1, `justify` a `spread_inside` chain. Percentage widths are
/// emitted as `layout_constraintWidth_percent` while the row still has
/// budget left, so the fractions of one row never add up to more than 1.
pub fn process_constraint_horizontal(
    tree: &mut ViewTree,
    session: &mut ConversionSession,
    parent: ViewId,
    row: &[ViewId],
) {
    let Some((&first, _)) = row.split_first() else {
        return;
    };
    distribute_percent(tree, session, parent, row);

    let inline_row = row.iter().all(|&id| !tree[id].facts.block);
    let align = if inline_row {
        TextAlign::parse(tree[parent].css("text-align"))
    } else {
        TextAlign::Start
    };
    if row.len() == 1 {
        place_single(tree, session, parent, first, align);
        return;
    }

    let content = tree[parent].box_rect;
    match align {
        TextAlign::Start => {
            let _ = tree.anchor(first, LayoutPosition::Left, AnchorTarget::Parent, false);
            fit_margin(tree, first, Edge::Left, content.left);
            for pair in row.windows(2) {
                let (previous, current) = (pair[0], pair[1]);
                let _ = tree.anchor_to(current, LayoutPosition::LeftRight, previous);
                tree[previous].reset_box(BoxRegion::Margin, &[Edge::Right]);
                let at = tree[previous].bounds.right;
                fit_margin(tree, current, Edge::Left, at);
            }
            let last = row[row.len() - 1];
            if within_range(
                tree[last].linear.right,
                content.right,
                session.config.line_tolerance,
            ) {
                let _ = tree.anchor(last, LayoutPosition::Right, AnchorTarget::Parent, false);
            }
        }
        TextAlign::Center | TextAlign::End | TextAlign::Justify => {
            link_chain(tree, row, Axis::Horizontal);
            for pair in row.windows(2) {
                let (previous, current) = (pair[0], pair[1]);
                // The gap is carried by the right-hand item alone.
                tree[previous].reset_box(BoxRegion::Margin, &[Edge::Right]);
                let at = tree[previous].bounds.right;
                fit_margin(tree, current, Edge::Left, at);
            }
            if align == TextAlign::Justify {
                tree[first].set_chain_style(Axis::Horizontal, ChainStyle::SpreadInside);
            } else {
                tree[first].set_chain_style(Axis::Horizontal, ChainStyle::Packed);
                tree[first].set_bias(Axis::Horizontal, align.bias());
            }
        }
    }
}

/// Emit percentage widths under the row's remaining budget. Fixed widths
/// claim their share of the parent's content width first, wherever they sit
/// in the row.
fn distribute_percent(
    tree: &mut ViewTree,
    session: &ConversionSession,
    parent: ViewId,
    row: &[ViewId],
) {
    let available_width = tree[parent].box_rect.width;
    let precision = session.config.float_precision;
    let fixed: f64 = if available_width > 0.0 {
        row.iter()
            .filter(|&&id| tree[id].css_px("width").is_some())
            .map(|&id| tree[id].bounds.width / available_width)
            .sum()
    } else {
        0.0
    };
    let mut percent_available = (1.0 - fixed).max(0.0);
    for &id in row {
        let Some(percent) = tree[id].css_percent("width").filter(|p| *p < 1.0) else {
            continue;
        };
        let share = truncate(percent.min(percent_available).max(0.0), precision);
        let view = &mut tree[id];
        if share > 0.0 {
            let _ = view.attributes.set(Attr::WidthPercent, format_float(share, precision));
            let _ = view.set_layout_mode(Axis::Horizontal, LayoutMode::MatchConstraint, true);
            percent_available = (percent_available - share).max(0.0);
        } else {
            // Out of budget: keep the rendered size.
            let width = view.bounds.width;
            let _ = view.set_layout_mode(Axis::Horizontal, LayoutMode::Px(width), true);
            tracing::trace!(view = id.0, percent, "percent width over row budget");
        }
    }
}

/// Horizontal placement of the only item of a row.
pub(crate) fn place_single(
    tree: &mut ViewTree,
    session: &ConversionSession,
    parent: ViewId,
    id: ViewId,
    align: TextAlign,
) {
    let content = tree[parent].box_rect;
    let bounds = tree[id].bounds;
    if auto_margins(&tree[id]) {
        tree[id].reset_box(BoxRegion::Margin, &[Edge::Left, Edge::Right]);
        let bias = calculate_bias(
            bounds.left - content.left,
            content.right - bounds.right,
            session.config.float_precision,
        );
        let _ = tree[id].anchor_parent(Axis::Horizontal, Some(bias), None, false);
        return;
    }
    let view = &tree[id];
    let stretches = view.facts.block
        && view.facts.floating.is_none()
        && view.css("width") == "auto"
        && view.facts.page_flow;
    if stretches {
        let _ = tree[id].anchor_parent(Axis::Horizontal, None, None, false);
        return;
    }
    match align {
        TextAlign::Center | TextAlign::End => {
            let _ = tree[id].anchor_parent(Axis::Horizontal, Some(align.bias()), None, false);
        }
        TextAlign::Start | TextAlign::Justify => {
            let _ = tree.anchor(id, LayoutPosition::Left, AnchorTarget::Parent, false);
            fit_margin(tree, id, Edge::Left, content.left);
        }
    }
}
