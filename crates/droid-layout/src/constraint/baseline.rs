//! Vertical alignment of the items of one row.
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)

use super::fit_margin;
use crate::node::{AnchorTarget, Edge, LayoutPosition, ViewId};
use crate::tree::ViewTree;
use crate::values::VerticalAlign;

/// Anchor a row vertically around its baseline item.
///
/// The baseline item is the text-bearing item with the largest font size,
/// then the tallest; without text the tallest item is used. It hangs from
/// `above` (a sibling or barrier) or the parent's top. The other items
/// follow `vertical-align`: `top`/`text-top` align tops, `middle` centers
/// on the baseline item, `bottom`/`text-bottom` align bottoms, baseline
/// values align baselines. Items without a baseline sit on the bottom.
pub fn set_baseline_items(
    tree: &mut ViewTree,
    parent: ViewId,
    row: &[ViewId],
    above: Option<ViewId>,
) -> Option<ViewId> {
    let baseline = baseline_item(tree, row)?;
    let content = tree[parent].box_rect;
    match above {
        Some(view) => {
            let _ = tree.anchor_to(baseline, LayoutPosition::TopBottom, view);
            let at = tree[view].bounds.bottom;
            fit_margin(tree, baseline, Edge::Top, at);
        }
        None => {
            let _ = tree.anchor(baseline, LayoutPosition::Top, AnchorTarget::Parent, false);
            fit_margin(tree, baseline, Edge::Top, content.top);
        }
    }

    let reference = tree[baseline].bounds;
    let line_height = reference.height;
    for &item in row.iter().filter(|&&item| item != baseline) {
        let view = &tree[item];
        let align =
            VerticalAlign::parse(view.css("vertical-align"), view.facts.font_size, line_height);
        let both_text = view.has_baseline() && tree[baseline].has_baseline();
        match align {
            VerticalAlign::Top | VerticalAlign::TextTop => {
                let _ = tree.anchor_to(item, LayoutPosition::Top, baseline);
                fit_margin(tree, item, Edge::Top, reference.top);
            }
            VerticalAlign::Middle => {
                let _ = tree.anchor_to(item, LayoutPosition::Top, baseline);
                let _ = tree.anchor_to(item, LayoutPosition::Bottom, baseline);
            }
            VerticalAlign::Bottom | VerticalAlign::TextBottom => {
                let _ = tree.anchor_to(item, LayoutPosition::Bottom, baseline);
                fit_margin(tree, item, Edge::Bottom, reference.bottom);
            }
            VerticalAlign::Baseline
            | VerticalAlign::Sub
            | VerticalAlign::Super
            | VerticalAlign::Length(_)
                if both_text =>
            {
                let _ = tree.anchor_to(item, LayoutPosition::Baseline, baseline);
                if let VerticalAlign::Length(raise) = align {
                    tree[item].translate_y -= raise;
                }
            }
            _ => {
                let _ = tree.anchor_to(item, LayoutPosition::Bottom, baseline);
                fit_margin(tree, item, Edge::Bottom, reference.bottom);
            }
        }
    }
    Some(baseline)
}

fn baseline_item(tree: &ViewTree, row: &[ViewId]) -> Option<ViewId> {
    let key = |id: &ViewId| {
        let view = &tree[*id];
        (view.facts.font_size, view.bounds.height)
    };
    let by_size = |a: &ViewId, b: &ViewId| {
        let (ka, kb) = (key(a), key(b));
        ka.0.total_cmp(&kb.0).then(ka.1.total_cmp(&kb.1))
    };
    // `max_by` keeps the last of equal items; reverse so the first wins.
    let text = row
        .iter()
        .rev()
        .filter(|&&id| tree[id].has_baseline() && tree[id].has_text())
        .max_by(|a, b| by_size(a, b));
    text.or_else(|| {
        row.iter()
            .rev()
            .max_by(|a, b| tree[**a].bounds.height.total_cmp(&tree[**b].bounds.height))
    })
    .copied()
}
