//! Capabilities a view exposes to the layout stages.
//!
//! The engine and the adapters program against these traits instead of
//! reaching into [`View`] fields, so anchoring rules live in one place.

use droid_common::format_float;

use super::attribute::Attr;
use super::constraint::{AnchorRecord, AnchorTarget, Axis, ChainStyle, LayoutPosition};
use super::container::ContainerType;
use super::{BoxEdges, BoxRegion, Edge, LayoutMode, View};

/// Decimal places kept when writing a bias that was already truncated.
const BIAS_DIGITS: u8 = 6;

/// Anchoring inside ConstraintLayout and RelativeLayout parents.
pub trait Anchorable {
    /// Anchor `position` to `target`.
    ///
    /// `reference` is the target's `@id/name` and is ignored for the parent.
    /// Fails when the render parent cannot anchor, when the position has no
    /// attribute in that parent, or when the slot is taken and `overwrite`
    /// is false. Anchors are one-sided: the target is never modified.
    fn anchor(
        &mut self,
        position: LayoutPosition,
        target: AnchorTarget,
        reference: &str,
        overwrite: bool,
    ) -> bool;

    /// Anchor both sides of `axis` to the parent, then apply bias and chain
    /// style when given.
    fn anchor_parent(
        &mut self,
        axis: Axis,
        bias: Option<f64>,
        chain_style: Option<ChainStyle>,
        overwrite: bool,
    ) -> bool;

    /// Remove the anchors at `positions`.
    fn anchor_delete(&mut self, positions: &[LayoutPosition]);

    /// Whether any position of `axis` is anchored.
    fn anchored(&self, axis: Axis) -> bool;

    /// Whether `position` is anchored to `target`.
    fn anchored_to(&self, position: LayoutPosition, target: AnchorTarget) -> bool;

    /// Set the bias of `axis`.
    fn set_bias(&mut self, axis: Axis, bias: f64);

    /// Set the chain style of `axis`. Only meaningful on a chain head.
    fn set_chain_style(&mut self, axis: Axis, style: ChainStyle);
}

/// Margin and padding state.
pub trait BoxSpaceable {
    /// Edges of `region`.
    fn box_edges(&self, region: BoxRegion) -> &BoxEdges;

    /// Mutable edges of `region`.
    fn box_edges_mut(&mut self, region: BoxRegion) -> &mut BoxEdges;

    /// Reset `edges` of `region` so their CSS value no longer applies.
    fn reset_box(&mut self, region: BoxRegion, edges: &[Edge]) {
        let state = self.box_edges_mut(region);
        for edge in edges {
            state.reset(*edge);
        }
    }

    /// Add `delta` to one edge.
    fn modify_box(&mut self, region: BoxRegion, edge: Edge, delta: f64) {
        self.box_edges_mut(region).modify(edge, delta);
    }

    /// Resolved value of one edge.
    fn box_value(&self, region: BoxRegion, edge: Edge) -> f64 {
        self.box_edges(region).value(edge)
    }
}

/// Width and height modes.
pub trait Dimensionable {
    /// Mode of `axis`.
    fn layout_mode(&self, axis: Axis) -> LayoutMode;

    /// Set the mode of `axis` when unset (or always with `overwrite`).
    /// `Unset` is never accepted.
    fn set_layout_mode(&mut self, axis: Axis, mode: LayoutMode, overwrite: bool) -> bool;

    /// Width mode.
    fn layout_width(&self) -> LayoutMode {
        self.layout_mode(Axis::Horizontal)
    }

    /// Height mode.
    fn layout_height(&self) -> LayoutMode {
        self.layout_mode(Axis::Vertical)
    }
}

impl Anchorable for View {
    fn anchor(
        &mut self,
        position: LayoutPosition,
        target: AnchorTarget,
        reference: &str,
        overwrite: bool,
    ) -> bool {
        let container = self.render_parent_type;
        if !container.supports_anchor() {
            return false;
        }
        let to_parent = target == AnchorTarget::Parent;
        let Some(attr) = position.attr(container, to_parent) else {
            tracing::trace!(view = %self.control_id, %position, "position not expressible");
            return false;
        };
        if let Some(existing) = self.constraint.current.get(&position) {
            if !overwrite {
                return false;
            }
            let previous = existing.attr;
            let _ = self.attributes.remove(previous);
        }

        let document_id = match (target, container) {
            (AnchorTarget::Parent, ContainerType::Relative) => "true".to_string(),
            (AnchorTarget::Parent, _) => "parent".to_string(),
            (AnchorTarget::View(_), _) => reference.to_string(),
        };
        let _ = self.attributes.set(attr, document_id.clone());
        let _ = self.constraint.current.insert(
            position,
            AnchorRecord {
                target,
                document_id,
                attr,
            },
        );
        match position.axis() {
            Axis::Horizontal => self.constraint.horizontal = true,
            Axis::Vertical => self.constraint.vertical = true,
        }
        true
    }

    fn anchor_parent(
        &mut self,
        axis: Axis,
        bias: Option<f64>,
        chain_style: Option<ChainStyle>,
        overwrite: bool,
    ) -> bool {
        let (start, end, center) = match axis {
            Axis::Horizontal => (
                LayoutPosition::Left,
                LayoutPosition::Right,
                LayoutPosition::CenterHorizontal,
            ),
            Axis::Vertical => (
                LayoutPosition::Top,
                LayoutPosition::Bottom,
                LayoutPosition::CenterVertical,
            ),
        };
        match self.render_parent_type {
            ContainerType::Constraint => {
                let parent = AnchorTarget::Parent;
                let start_done =
                    self.anchor(start, parent, "", overwrite) || self.anchored_to(start, parent);
                let end_done =
                    self.anchor(end, parent, "", overwrite) || self.anchored_to(end, parent);
                if !(start_done && end_done) {
                    return false;
                }
                if let Some(bias) = bias {
                    self.set_bias(axis, bias);
                }
                if let Some(style) = chain_style {
                    self.set_chain_style(axis, style);
                }
                true
            }
            ContainerType::Relative => {
                // RelativeLayout has no bias: snap to the nearest expressible edge.
                let position = match bias {
                    Some(b) if b <= 0.0 => start,
                    Some(b) if b >= 1.0 => end,
                    _ => center,
                };
                self.anchor(position, AnchorTarget::Parent, "", overwrite)
                    || self.anchored_to(position, AnchorTarget::Parent)
            }
            _ => false,
        }
    }

    fn anchor_delete(&mut self, positions: &[LayoutPosition]) {
        for position in positions {
            if let Some(record) = self.constraint.current.remove(position) {
                let _ = self.attributes.remove(record.attr);
            }
        }
        self.constraint.horizontal = self.constraint.anchored(Axis::Horizontal);
        self.constraint.vertical = self.constraint.anchored(Axis::Vertical);
    }

    fn anchored(&self, axis: Axis) -> bool {
        self.constraint.anchored(axis)
    }

    fn anchored_to(&self, position: LayoutPosition, target: AnchorTarget) -> bool {
        self.constraint.target(position) == Some(target)
    }

    fn set_bias(&mut self, axis: Axis, bias: f64) {
        let attr = match axis {
            Axis::Horizontal => Attr::HorizontalBias,
            Axis::Vertical => Attr::VerticalBias,
        };
        let _ = self
            .attributes
            .set(attr, format_float(bias.clamp(0.0, 1.0), BIAS_DIGITS));
    }

    fn set_chain_style(&mut self, axis: Axis, style: ChainStyle) {
        let attr = match axis {
            Axis::Horizontal => Attr::HorizontalChainStyle,
            Axis::Vertical => Attr::VerticalChainStyle,
        };
        let _ = self.attributes.set(attr, style.to_string());
    }
}

impl BoxSpaceable for View {
    fn box_edges(&self, region: BoxRegion) -> &BoxEdges {
        match region {
            BoxRegion::Margin => &self.margin,
            BoxRegion::Padding => &self.padding,
        }
    }

    fn box_edges_mut(&mut self, region: BoxRegion) -> &mut BoxEdges {
        match region {
            BoxRegion::Margin => &mut self.margin,
            BoxRegion::Padding => &mut self.padding,
        }
    }
}

impl Dimensionable for View {
    fn layout_mode(&self, axis: Axis) -> LayoutMode {
        match axis {
            Axis::Horizontal => self.layout_width,
            Axis::Vertical => self.layout_height,
        }
    }

    fn set_layout_mode(&mut self, axis: Axis, mode: LayoutMode, overwrite: bool) -> bool {
        if !mode.is_set() {
            return false;
        }
        let slot = match axis {
            Axis::Horizontal => &mut self.layout_width,
            Axis::Vertical => &mut self.layout_height,
        };
        if slot.is_set() && !overwrite {
            return false;
        }
        *slot = mode;
        true
    }
}
