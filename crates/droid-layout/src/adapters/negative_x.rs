//! Children overflowing the left edge of their container.
//!
//! Android containers clip or clamp content placed before their start
//! edge. The container moves into a ConstraintLayout and the overflowing
//! children become its siblings there, hung from the left with a negative
//! margin that the spacing pass turns into a translation.

use super::{AdapterKind, LayoutAdapter, place_wrapped, wrapped_by};
use crate::constraint::fit_margin;
use crate::node::{AlignmentType, AnchorTarget, ContainerType, Edge, LayoutPosition, ViewId};
use crate::session::ConversionSession;
use crate::tree::ViewTree;

/// Left overflow adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct NegativeX;

impl LayoutAdapter for NegativeX {
    fn wrap(&self, tree: &mut ViewTree, session: &mut ConversionSession, id: ViewId) -> bool {
        if !tree[id].container_type.is_layout() || wrapped_by(tree, id, AdapterKind::NegativeX) {
            return false;
        }
        let edge = tree[id].bounds.left - session.config.line_tolerance;
        let overflowing: Vec<ViewId> = tree
            .layout_children(id)
            .into_iter()
            .filter(|&child| tree[child].bounds.left < edge)
            .collect();
        if overflowing.is_empty() {
            return false;
        }
        let wrapper = tree.wrap(id, ContainerType::Constraint, AlignmentType::EXTENDABLE);
        tree[wrapper].adapter = Some(AdapterKind::NegativeX);
        for &child in &overflowing {
            tree.append_render_child(wrapper, child);
        }
        tracing::debug!(
            view = id.0,
            wrapper = wrapper.0,
            moved = overflowing.len(),
            "left overflow wrapper"
        );
        true
    }

    fn constrain(&self, tree: &mut ViewTree, _session: &mut ConversionSession, id: ViewId) {
        let Some(inner) = tree[id].inner_wrapped else {
            return;
        };
        place_wrapped(tree, id, inner);
        let content = tree[id].box_rect;
        for child in tree.layout_children(id) {
            if child == inner {
                continue;
            }
            let _ = tree.anchor(child, LayoutPosition::Left, AnchorTarget::Parent, false);
            fit_margin(tree, child, Edge::Left, content.left);
            let _ = tree.anchor(child, LayoutPosition::Top, AnchorTarget::Parent, false);
            fit_margin(tree, child, Edge::Top, content.top);
        }
    }
}
