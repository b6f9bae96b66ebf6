//! Layouts with no one-to-one Android container.
//!
//! An adapter takes over a container the generic stages cannot express.
//! Structural adapters (flexbox, grid, table, multi-column) claim a
//! container during classification and then place its children. Wrapping
//! adapters (percent margins, max sizes, left overflow, absolute children of
//! non-anchoring containers) insert a ConstraintLayout around a view and
//! place the view inside it. All of them delegate the actual anchoring,
//! sizing and spacing to the engine.
//!
//! # Module Structure
//!
//! - [`column`] - CSS multi-column
//! - [`flexbox`] - Flex containers
//! - [`grid`] - CSS grid
//! - [`max_dimension`] - `max-width` / `max-height` outside ConstraintLayout
//! - [`negative_x`] - Children overflowing the left edge
//! - [`percent`] - Percentage margins
//! - [`positive_x`] - Absolute children of LinearLayout, FrameLayout, GridLayout
//! - [`table`] - `<table>`

pub mod column;
pub mod flexbox;
pub mod grid;
pub mod max_dimension;
pub mod negative_x;
mod occupancy;
pub mod percent;
pub mod positive_x;
pub mod table;

use strum_macros::Display;

use crate::constraint::fit_margin;
use crate::node::{AnchorTarget, Anchorable, Axis, Edge, LayoutPosition, ViewId};
use crate::session::ConversionSession;
use crate::tree::ViewTree;

pub(crate) use occupancy::Occupancy;

/// Hooks an adapter implements. Every hook defaults to doing nothing.
pub trait LayoutAdapter: Sync {
    /// Claim the unclassified container `id`, choosing its type and
    /// alignment. Returns whether the adapter took it.
    fn classify(
        &self,
        _tree: &mut ViewTree,
        _session: &mut ConversionSession,
        _id: ViewId,
    ) -> bool {
        false
    }

    /// Insert a wrapper around `id` when needed. Returns whether it did.
    fn wrap(&self, _tree: &mut ViewTree, _session: &mut ConversionSession, _id: ViewId) -> bool {
        false
    }

    /// Place the children of the container `id` the adapter owns.
    fn constrain(&self, _tree: &mut ViewTree, _session: &mut ConversionSession, _id: ViewId) {}

    /// Choose sizes of `child` before the generic dimension rules run.
    fn dimension(
        &self,
        _tree: &mut ViewTree,
        _session: &mut ConversionSession,
        _parent: ViewId,
        _child: ViewId,
    ) {
    }
}

/// The adapter owning a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum AdapterKind {
    /// `display: flex`
    Flexbox,
    /// `display: grid`
    Grid,
    /// `display: table`
    Table,
    /// `column-count` / `column-width`
    Column,
    /// Percentage horizontal margins.
    Percent,
    /// `max-width` / `max-height` outside ConstraintLayout.
    MaxDimension,
    /// Children overflowing the left edge.
    NegativeX,
    /// Absolute children of a container that cannot anchor.
    PositiveX,
}

impl AdapterKind {
    /// Adapters tried, in order, before generic classification.
    pub const CLASSIFIERS: [Self; 4] = [Self::Table, Self::Grid, Self::Flexbox, Self::Column];

    /// Adapters tried, in order, on every view after classification.
    pub const WRAPPERS: [Self; 4] = [
        Self::PositiveX,
        Self::NegativeX,
        Self::Percent,
        Self::MaxDimension,
    ];

    /// The adapter implementation.
    #[must_use]
    pub fn adapter(self) -> &'static dyn LayoutAdapter {
        match self {
            Self::Flexbox => &flexbox::Flexbox,
            Self::Grid => &grid::CssGrid,
            Self::Table => &table::Table,
            Self::Column => &column::Column,
            Self::Percent => &percent::Percent,
            Self::MaxDimension => &max_dimension::MaxWidthHeight,
            Self::NegativeX => &negative_x::NegativeX,
            Self::PositiveX => &positive_x::PositiveX,
        }
    }
}

/// Whether `id` already sits in a wrapper inserted by `kind`.
pub(crate) fn wrapped_by(tree: &ViewTree, id: ViewId, kind: AdapterKind) -> bool {
    let mut current = id;
    while let Some(outer) = tree[current].outer_wrapper {
        if tree[outer].adapter == Some(kind) {
            return true;
        }
        current = outer;
    }
    false
}

/// Whether a block in flow stretches across its container.
pub(crate) fn fills_width(tree: &ViewTree, id: ViewId) -> bool {
    let view = &tree[id];
    view.facts.block && view.facts.floating.is_none() && view.css("width") == "auto"
}

/// Hang the view a wrapper holds from the wrapper's top left, stretching
/// it across when it fills its line.
pub(crate) fn place_wrapped(tree: &mut ViewTree, wrapper: ViewId, inner: ViewId) {
    let content = tree[wrapper].box_rect;
    let _ = tree.anchor(inner, LayoutPosition::Top, AnchorTarget::Parent, false);
    fit_margin(tree, inner, Edge::Top, content.top);
    if fills_width(tree, inner) {
        let _ = tree[inner].anchor_parent(Axis::Horizontal, None, None, false);
        fit_margin(tree, inner, Edge::Right, content.right);
    } else {
        let _ = tree.anchor(inner, LayoutPosition::Left, AnchorTarget::Parent, false);
    }
    fit_margin(tree, inner, Edge::Left, content.left);
}
