//! Anchor bookkeeping for views inside anchoring containers.

use std::collections::BTreeMap;

use strum_macros::Display;

use super::attribute::Attr;
use super::container::ContainerType;
use super::ViewId;

/// Layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Axis {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
}

impl Axis {
    /// The other axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// An anchor slot of a view.
///
/// Compound positions name the view's edge first and the target's edge
/// second: `LeftRight` is this view's left edge on the target's right edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub enum LayoutPosition {
    /// Left edge to the target's left edge.
    Left,
    /// Top edge to the target's top edge.
    Top,
    /// Right edge to the target's right edge.
    Right,
    /// Bottom edge to the target's bottom edge.
    Bottom,
    /// Text baseline to the target's baseline.
    Baseline,
    /// Left edge to the target's right edge.
    LeftRight,
    /// Right edge to the target's left edge.
    RightLeft,
    /// Top edge to the target's bottom edge.
    TopBottom,
    /// Bottom edge to the target's top edge.
    BottomTop,
    /// Centered horizontally in the parent (RelativeLayout only).
    CenterHorizontal,
    /// Centered vertically in the parent (RelativeLayout only).
    CenterVertical,
}

impl LayoutPosition {
    /// Axis the position constrains.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Left
            | Self::Right
            | Self::LeftRight
            | Self::RightLeft
            | Self::CenterHorizontal => Axis::Horizontal,
            Self::Top
            | Self::Bottom
            | Self::Baseline
            | Self::TopBottom
            | Self::BottomTop
            | Self::CenterVertical => Axis::Vertical,
        }
    }

    /// Every position of `axis`.
    #[must_use]
    pub const fn of_axis(axis: Axis) -> &'static [Self] {
        match axis {
            Axis::Horizontal => &[
                Self::Left,
                Self::Right,
                Self::LeftRight,
                Self::RightLeft,
                Self::CenterHorizontal,
            ],
            Axis::Vertical => &[
                Self::Top,
                Self::Bottom,
                Self::Baseline,
                Self::TopBottom,
                Self::BottomTop,
                Self::CenterVertical,
            ],
        }
    }

    /// Attribute expressing the position inside `container`.
    ///
    /// `to_parent` selects the parent form for RelativeLayout, which uses
    /// different attributes for parent and sibling anchors.
    #[must_use]
    pub const fn attr(self, container: ContainerType, to_parent: bool) -> Option<Attr> {
        match container {
            ContainerType::Constraint => match self {
                Self::Left => Some(Attr::LeftToLeftOf),
                Self::LeftRight => Some(Attr::LeftToRightOf),
                Self::Right => Some(Attr::RightToRightOf),
                Self::RightLeft => Some(Attr::RightToLeftOf),
                Self::Top => Some(Attr::TopToTopOf),
                Self::TopBottom => Some(Attr::TopToBottomOf),
                Self::Bottom => Some(Attr::BottomToBottomOf),
                Self::BottomTop => Some(Attr::BottomToTopOf),
                Self::Baseline => Some(Attr::BaselineToBaselineOf),
                Self::CenterHorizontal | Self::CenterVertical => None,
            },
            ContainerType::Relative if to_parent => match self {
                Self::Left => Some(Attr::AlignParentLeft),
                Self::Right => Some(Attr::AlignParentRight),
                Self::Top => Some(Attr::AlignParentTop),
                Self::Bottom => Some(Attr::AlignParentBottom),
                Self::CenterHorizontal => Some(Attr::CenterHorizontal),
                Self::CenterVertical => Some(Attr::CenterVertical),
                _ => None,
            },
            ContainerType::Relative => match self {
                Self::Left => Some(Attr::AlignLeft),
                Self::Right => Some(Attr::AlignRight),
                Self::Top => Some(Attr::AlignTop),
                Self::Bottom => Some(Attr::AlignBottom),
                Self::LeftRight => Some(Attr::ToRightOf),
                Self::RightLeft => Some(Attr::ToLeftOf),
                Self::TopBottom => Some(Attr::Below),
                Self::BottomTop => Some(Attr::Above),
                Self::Baseline => Some(Attr::AlignBaseline),
                Self::CenterHorizontal | Self::CenterVertical => None,
            },
            _ => None,
        }
    }
}

/// What an anchor points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorTarget {
    /// The render parent.
    Parent,
    /// A sibling view.
    View(ViewId),
}

/// A successful anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorRecord {
    /// Anchored view or parent.
    pub target: AnchorTarget,
    /// Attribute value written (`parent`, `true`, or `@id/name`).
    pub document_id: String,
    /// Attribute the anchor was written to.
    pub attr: Attr,
}

/// [ConstraintLayout chains](https://developer.android.com/reference/androidx/constraintlayout/widget/ConstraintLayout#Chains)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ChainStyle {
    /// Elements are packed together; bias positions the group.
    Packed,
    /// Elements are spread with equal space, ends included.
    Spread,
    /// Ends are attached, remaining space is spread between elements.
    SpreadInside,
}

/// Edge referenced by a barrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[strum(serialize_all = "lowercase")]
pub enum BarrierDirection {
    /// Left-most edge.
    Left,
    /// Top-most edge.
    Top,
    /// Right-most edge.
    Right,
    /// Bottom-most edge.
    Bottom,
}

/// Anchors of one view.
#[derive(Debug, Clone, Default)]
pub struct ConstraintState {
    /// Horizontal placement is resolved.
    pub horizontal: bool,
    /// Vertical placement is resolved.
    pub vertical: bool,
    /// Anchors keyed by position.
    pub current: BTreeMap<LayoutPosition, AnchorRecord>,
    /// Barriers synthesized around this view's children.
    pub barrier: BTreeMap<BarrierDirection, ViewId>,
}

impl ConstraintState {
    /// Whether any position of `axis` is anchored.
    #[must_use]
    pub fn anchored(&self, axis: Axis) -> bool {
        LayoutPosition::of_axis(axis)
            .iter()
            .any(|position| self.current.contains_key(position))
    }

    /// Target of an anchor.
    #[must_use]
    pub fn target(&self, position: LayoutPosition) -> Option<AnchorTarget> {
        self.current.get(&position).map(|record| record.target)
    }
}
