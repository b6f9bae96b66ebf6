//! Absolutely positioned children of LinearLayout, FrameLayout and
//! GridLayout.
//!
//! Those containers have no way to offset a child from its edges. The
//! container moves into a ConstraintLayout and the absolute children follow
//! it there, where their offsets become parent anchors.

use super::{AdapterKind, LayoutAdapter, place_wrapped, wrapped_by};
use crate::constraint::position_absolute;
use crate::node::{AlignmentType, ContainerType, ViewId};
use crate::session::ConversionSession;
use crate::tree::ViewTree;

/// Absolute children adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositiveX;

impl LayoutAdapter for PositiveX {
    fn wrap(&self, tree: &mut ViewTree, _session: &mut ConversionSession, id: ViewId) -> bool {
        let anchorless = matches!(
            tree[id].container_type,
            ContainerType::Linear | ContainerType::Frame | ContainerType::Grid
        );
        if !anchorless || wrapped_by(tree, id, AdapterKind::PositiveX) {
            return false;
        }
        let absolute = tree.absolute_children(id);
        if absolute.is_empty() {
            return false;
        }
        let wrapper = tree.wrap(id, ContainerType::Constraint, AlignmentType::ABSOLUTE);
        tree[wrapper].adapter = Some(AdapterKind::PositiveX);
        for &child in &absolute {
            tree.append_render_child(wrapper, child);
        }
        tracing::debug!(
            view = id.0,
            wrapper = wrapper.0,
            moved = absolute.len(),
            "absolute children wrapper"
        );
        true
    }

    fn constrain(&self, tree: &mut ViewTree, session: &mut ConversionSession, id: ViewId) {
        let Some(inner) = tree[id].inner_wrapped else {
            return;
        };
        place_wrapped(tree, id, inner);
        for child in tree.layout_children(id) {
            if child != inner {
                position_absolute(tree, session, id, child);
            }
        }
    }
}
