//! Percentage horizontal margins.
//!
//! [§ 8.3 Margin properties](https://www.w3.org/TR/CSS2/box.html#margin-properties)
//!
//! "The percentage is calculated with respect to the width of the generated
//! box's containing block." Android margins are fixed, so the view moves
//! into a ConstraintLayout as wide as its line, whose guidelines stand for
//! the margins.

use super::{AdapterKind, LayoutAdapter, fills_width, wrapped_by};
use crate::constraint::{GuidelineValue, add_guideline, fit_margin};
use crate::node::{
    AlignmentType, AnchorTarget, Axis, BoxRegion, BoxSpaceable, ContainerType, Edge,
    LayoutPosition, ViewId,
};
use crate::session::ConversionSession;
use crate::tree::ViewTree;

/// Percent margin adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Percent;

fn percent_margins(tree: &ViewTree, id: ViewId) -> (f64, f64) {
    let view = &tree[id];
    let of = |name: &str| view.css_percent(name).filter(|p| *p > 0.0).unwrap_or(0.0);
    (of("margin-left"), of("margin-right"))
}

impl LayoutAdapter for Percent {
    fn wrap(&self, tree: &mut ViewTree, _session: &mut ConversionSession, id: ViewId) -> bool {
        let view = &tree[id];
        let eligible = tree.root() != Some(id)
            && view.render_parent.is_some()
            && !view.is_helper()
            && view.facts.block
            && view.facts.page_flow
            && view.facts.floating.is_none();
        if !eligible || wrapped_by(tree, id, AdapterKind::Percent) {
            return false;
        }
        let (left, right) = percent_margins(tree, id);
        if left <= 0.0 && right <= 0.0 {
            return false;
        }
        let wrapper = tree.wrap(id, ContainerType::Constraint, AlignmentType::PERCENT);
        tree[wrapper].adapter = Some(AdapterKind::Percent);
        tracing::debug!(view = id.0, wrapper = wrapper.0, left, right, "percent margins");
        true
    }

    fn constrain(&self, tree: &mut ViewTree, session: &mut ConversionSession, id: ViewId) {
        let Some(inner) = tree[id].inner_wrapped else {
            return;
        };
        let content = tree[id].box_rect;
        let (left, right) = percent_margins(tree, inner);
        let stretches = fills_width(tree, inner);

        if left > 0.0 {
            let guideline =
                add_guideline(tree, session, id, Axis::Vertical, GuidelineValue::Percent(left));
            tree[inner].reset_box(BoxRegion::Margin, &[Edge::Left]);
            let _ = tree.anchor(inner, LayoutPosition::Left, AnchorTarget::View(guideline), false);
        } else {
            let _ = tree.anchor(inner, LayoutPosition::Left, AnchorTarget::Parent, false);
            fit_margin(tree, inner, Edge::Left, content.left);
        }
        if right > 0.0 && stretches {
            let guideline = add_guideline(
                tree,
                session,
                id,
                Axis::Vertical,
                GuidelineValue::Percent(1.0 - right),
            );
            tree[inner].reset_box(BoxRegion::Margin, &[Edge::Right]);
            let _ = tree.anchor(inner, LayoutPosition::Right, AnchorTarget::View(guideline), false);
        } else if stretches {
            let _ = tree.anchor(inner, LayoutPosition::Right, AnchorTarget::Parent, false);
            fit_margin(tree, inner, Edge::Right, content.right);
        } else {
            // A sized box ignores its right margin.
            tree[inner].reset_box(BoxRegion::Margin, &[Edge::Right]);
        }

        let _ = tree.anchor(inner, LayoutPosition::Top, AnchorTarget::Parent, false);
        fit_margin(tree, inner, Edge::Top, content.top);
        let _ = tree.anchor(inner, LayoutPosition::Bottom, AnchorTarget::Parent, false);
        fit_margin(tree, inner, Edge::Bottom, content.bottom);
    }
}
