//! Guideline and barrier synthesis.
//!
//! [Guideline](https://developer.android.com/reference/androidx/constraintlayout/widget/Guideline),
//! [Barrier](https://developer.android.com/reference/androidx/constraintlayout/widget/Barrier)
//!
//! Both helpers are memoized in the session: asking twice for the same
//! guideline (within the configured pixel tolerance) or for a barrier over
//! the same views returns the view created the first time. Helpers carry
//! the bounds of the line they stand for, so views anchored to them can fit
//! their margins like against any sibling.

use droid_common::{format_float, math::format_px, truncate, within_range};
use droid_dom::{BoxRect, Edges};

use crate::node::{Attr, Axis, BarrierDirection, ContainerType, ViewId};
use crate::session::{BarrierEntry, ConversionSession, GuidelineEntry};
use crate::tree::ViewTree;

/// Offset of a guideline from the parent's start edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GuidelineValue {
    /// Fraction of the parent's extent (`layout_constraintGuide_percent`).
    Percent(f64),
    /// Fixed pixel offset (`layout_constraintGuide_begin`).
    Begin(f64),
}

impl GuidelineValue {
    /// Offset in pixels for a parent of `extent` pixels.
    #[must_use]
    pub fn to_px(self, extent: f64) -> f64 {
        match self {
            Self::Percent(fraction) => fraction * extent,
            Self::Begin(px) => px,
        }
    }

    const fn same_kind(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Percent(_), Self::Percent(_)) | (Self::Begin(_), Self::Begin(_))
        )
    }
}

/// Guideline inside `parent`.
///
/// `orientation` is the direction the guideline runs: a `Vertical` guideline
/// sits at an x offset and anchors horizontal positions.
pub fn add_guideline(
    tree: &mut ViewTree,
    session: &mut ConversionSession,
    parent: ViewId,
    orientation: Axis,
    value: GuidelineValue,
) -> ViewId {
    let extent = match orientation {
        Axis::Vertical => tree[parent].box_rect.width,
        Axis::Horizontal => tree[parent].box_rect.height,
    };
    let tolerance = session.config.guideline_tolerance;
    let existing = session.guidelines.iter().find(|entry| {
        entry.parent == parent
            && entry.orientation == orientation
            && entry.value.same_kind(value)
            && within_range(entry.value.to_px(extent), value.to_px(extent), tolerance)
    });
    if let Some(entry) = existing {
        return entry.view;
    }

    let view = tree.add_helper(parent, ContainerType::Guideline);
    let precision = session.config.float_precision;
    let content = tree[parent].box_rect;
    let offset = value.to_px(extent);
    let bounds = match orientation {
        Axis::Vertical => BoxRect::new(content.left + offset, content.top, 0.0, content.height),
        Axis::Horizontal => BoxRect::new(content.left, content.top + offset, content.width, 0.0),
    };
    let helper = &mut tree[view];
    helper.set_geometry(bounds, &Edges::default(), &Edges::default());
    helper.control_id = session.next_control_id("guideline");
    let _ = helper.attributes.set(Attr::Orientation, orientation.to_string());
    match value {
        GuidelineValue::Percent(fraction) => {
            let fraction = truncate(fraction.clamp(0.0, 1.0), precision);
            let _ = helper
                .attributes
                .set(Attr::GuidePercent, format_float(fraction, precision));
        }
        GuidelineValue::Begin(px) => {
            let _ = helper.attributes.set(Attr::GuideBegin, format_px(px.max(0.0)));
        }
    }
    session.guidelines.push(GuidelineEntry {
        parent,
        orientation,
        value,
        view,
    });
    tracing::debug!(parent = parent.0, %orientation, ?value, "added guideline");
    view
}

/// Barrier inside `parent` on the `direction` side of `views`.
///
/// Returns `None` when `views` is empty.
pub fn add_barrier(
    tree: &mut ViewTree,
    session: &mut ConversionSession,
    parent: ViewId,
    views: &[ViewId],
    direction: BarrierDirection,
) -> Option<ViewId> {
    let mut referenced = views.to_vec();
    referenced.sort_unstable();
    referenced.dedup();
    if referenced.is_empty() {
        return None;
    }
    let existing = session.barriers.iter().find(|entry| {
        entry.parent == parent && entry.direction == direction && entry.referenced == referenced
    });
    if let Some(entry) = existing {
        return Some(entry.view);
    }

    let ids = referenced
        .iter()
        .map(|&id| tree[id].control_id.clone())
        .collect::<Vec<_>>()
        .join(",");
    let bounds = tree.union_bounds(&referenced);
    let view = tree.add_helper(parent, ContainerType::Barrier);
    let helper = &mut tree[view];
    helper.set_geometry(bounds, &Edges::default(), &Edges::default());
    helper.control_id = session.next_control_id("barrier");
    let _ = helper
        .attributes
        .set(Attr::BarrierDirection, direction.to_string());
    let _ = helper.attributes.set(Attr::ConstraintReferencedIds, ids);
    let _ = tree[parent].constraint.barrier.insert(direction, view);
    session.barriers.push(BarrierEntry {
        parent,
        direction,
        referenced,
        view,
    });
    tracing::debug!(parent = parent.0, %direction, "added barrier");
    Some(view)
}
