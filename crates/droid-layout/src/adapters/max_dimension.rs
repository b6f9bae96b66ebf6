//! `max-width` / `max-height` of views whose parent cannot cap them.
//!
//! Only ConstraintLayout children and the TextView / ImageView families
//! honour a maximum size. Any other block moves into a ConstraintLayout
//! where it is sized `0px` against `layout_constraintWidth_max`.

use super::{AdapterKind, LayoutAdapter, wrapped_by};
use crate::constraint::{auto_margins, calculate_bias, fit_margin};
use crate::dimension::set_constraint_dimension;
use crate::node::{
    AlignmentType, AnchorTarget, Anchorable, Axis, BoxRegion, BoxSpaceable, ContainerType, Edge,
    LayoutPosition, ViewId,
};
use crate::session::ConversionSession;
use crate::tree::ViewTree;

/// Max width / height adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxWidthHeight;

impl LayoutAdapter for MaxWidthHeight {
    fn wrap(&self, tree: &mut ViewTree, _session: &mut ConversionSession, id: ViewId) -> bool {
        let view = &tree[id];
        let Some(parent) = view.render_parent else {
            return false;
        };
        let capped = view.css_px("max-width").is_some() || view.css_px("max-height").is_some();
        let eligible = capped
            && tree[parent].container_type != ContainerType::Constraint
            && view.facts.block
            && view.facts.page_flow
            && !view.container_type.accepts_max_dimension()
            && !view.is_helper();
        if !eligible || wrapped_by(tree, id, AdapterKind::MaxDimension) {
            return false;
        }
        let wrapper = tree.wrap(id, ContainerType::Constraint, AlignmentType::SINGLE);
        tree[wrapper].adapter = Some(AdapterKind::MaxDimension);
        tracing::debug!(view = id.0, wrapper = wrapper.0, "max dimension wrapper");
        true
    }

    fn constrain(&self, tree: &mut ViewTree, session: &mut ConversionSession, id: ViewId) {
        let Some(inner) = tree[id].inner_wrapped else {
            return;
        };
        let content = tree[id].box_rect;
        let bounds = tree[inner].bounds;
        if auto_margins(&tree[inner]) {
            tree[inner].reset_box(BoxRegion::Margin, &[Edge::Left, Edge::Right]);
            let bias = calculate_bias(
                bounds.left - content.left,
                content.right - bounds.right,
                session.config.float_precision,
            );
            let _ = tree[inner].anchor_parent(Axis::Horizontal, Some(bias), None, false);
        } else {
            let _ = tree[inner].anchor_parent(Axis::Horizontal, Some(0.0), None, false);
            fit_margin(tree, inner, Edge::Left, content.left);
            tree[inner].reset_box(BoxRegion::Margin, &[Edge::Right]);
        }
        let _ = tree.anchor(inner, LayoutPosition::Top, AnchorTarget::Parent, false);
        fit_margin(tree, inner, Edge::Top, content.top);
        let _ = tree.anchor(inner, LayoutPosition::Bottom, AnchorTarget::Parent, false);
        fit_margin(tree, inner, Edge::Bottom, content.bottom);
    }

    fn dimension(
        &self,
        tree: &mut ViewTree,
        session: &mut ConversionSession,
        parent: ViewId,
        child: ViewId,
    ) {
        if tree[parent].inner_wrapped != Some(child) {
            return;
        }
        let view = &tree[child];
        if view.css_px("max-width").is_some() && view.css_px("width").is_none() {
            let precision = session.config.float_precision;
            set_constraint_dimension(tree, child, Axis::Horizontal, None, precision);
        }
    }
}
