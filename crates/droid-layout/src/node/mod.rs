//! The view model: one [`View`] per rendered element, text run, or
//! synthesized group, wrapper, or helper.
//!
//! # Module Structure
//!
//! - [`alignment`] - Alignment flags
//! - [`attribute`] - Typed Android attributes and the per-view store
//! - [`capability`] - `Anchorable`, `BoxSpaceable` and `Dimensionable`
//! - [`constraint`] - Anchor positions and bookkeeping
//! - [`container`] - Control and container kinds

pub mod alignment;
pub mod attribute;
pub mod capability;
pub mod constraint;
pub mod container;

use droid_dom::style::{default_display_for_element, parse_percent, parse_px};
use droid_dom::{AttributesMap, BoxRect, Edges, FloatSide, NodeId, PositionScheme, StyleMap};
use strum_macros::Display;

use crate::adapters::AdapterKind;

pub use alignment::AlignmentType;
pub use attribute::{Attr, AttributeStore, Namespace};
pub use capability::{Anchorable, BoxSpaceable, Dimensionable};
pub use constraint::{
    AnchorRecord, AnchorTarget, Axis, BarrierDirection, ChainStyle, ConstraintState,
    LayoutPosition,
};
pub use container::ContainerType;

/// A type-safe index into the view arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub usize);

/// One side of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Edge {
    /// Top side.
    Top,
    /// Right side.
    Right,
    /// Bottom side.
    Bottom,
    /// Left side.
    Left,
}

impl Edge {
    /// All edges in CSS order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Index in CSS order (top, right, bottom, left).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Right => 1,
            Self::Bottom => 2,
            Self::Left => 3,
        }
    }

    /// Edge on the other side of the box.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// Axis the edge lies across.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Top | Self::Bottom => Axis::Vertical,
        }
    }
}

/// Margin or padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum BoxRegion {
    /// Space outside the border.
    Margin,
    /// Space inside the border.
    Padding,
}

/// Four edges of margin or padding with their conversion state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoxEdges {
    css: [f64; 4],
    reset: [bool; 4],
    adjustment: [f64; 4],
}

impl BoxEdges {
    /// Edges seeded from the used CSS values.
    #[must_use]
    pub const fn from_css(edges: &Edges) -> Self {
        Self {
            css: edges.to_array(),
            reset: [false; 4],
            adjustment: [0.0; 4],
        }
    }

    /// The CSS value of an edge.
    #[must_use]
    pub const fn css(&self, edge: Edge) -> f64 {
        self.css[edge.index()]
    }

    /// `reset ? 0 : css`, plus the adjustment.
    #[must_use]
    pub fn value(&self, edge: Edge) -> f64 {
        let i = edge.index();
        let base = if self.reset[i] { 0.0 } else { self.css[i] };
        base + self.adjustment[i]
    }

    /// Whether the edge was reset.
    #[must_use]
    pub const fn is_reset(&self, edge: Edge) -> bool {
        self.reset[edge.index()]
    }

    /// Drop the CSS value and any adjustment of an edge.
    pub const fn reset(&mut self, edge: Edge) {
        self.reset[edge.index()] = true;
        self.adjustment[edge.index()] = 0.0;
    }

    /// Add `delta` to an edge.
    pub fn modify(&mut self, edge: Edge, delta: f64) {
        self.adjustment[edge.index()] += delta;
    }

    /// Resolved values in CSS order.
    #[must_use]
    pub fn values(&self) -> [f64; 4] {
        Edge::ALL.map(|edge| self.value(edge))
    }
}

/// Size mode of one axis.
///
/// `Unset` only exists before the dimension resolver runs; a set mode never
/// goes back to `Unset`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum LayoutMode {
    /// Not resolved yet.
    #[default]
    Unset,
    /// Fixed pixel size.
    Px(f64),
    /// `wrap_content`
    WrapContent,
    /// `match_parent`
    MatchParent,
    /// `0px`: sized by constraints or weights.
    MatchConstraint,
}

impl LayoutMode {
    /// Whether a mode was chosen.
    #[must_use]
    pub const fn is_set(self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// Attribute value.
    #[must_use]
    pub fn value(self) -> String {
        match self {
            Self::Unset | Self::WrapContent => "wrap_content".to_string(),
            Self::MatchParent => "match_parent".to_string(),
            Self::MatchConstraint => "0px".to_string(),
            Self::Px(px) => droid_common::math::format_px(px),
        }
    }
}

/// How a view came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ViewOrigin {
    /// Built from a source element or text run.
    Source,
    /// Synthesized container holding a run of siblings.
    Group,
    /// Synthesized container around one view.
    Wrapper,
    /// Guideline or barrier.
    Helper,
    /// Spacer emitted by an adapter.
    Spacer,
}

/// CSS facts derived once from the source node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewFacts {
    /// Participates in normal flow.
    pub page_flow: bool,
    /// Float side.
    pub floating: Option<FloatSide>,
    /// Block-level outer display.
    pub block: bool,
    /// Inline-level outer display.
    pub inline: bool,
    /// Holds only text.
    pub text_element: bool,
    /// Form control.
    pub input_element: bool,
    /// A `<br>`.
    pub line_break: bool,
    /// Positioning scheme.
    pub position: PositionScheme,
    /// Absolutely positioned with every offset `auto`: stays at its static
    /// position, so it is laid out like a flow box.
    pub auto_position: bool,
    /// Font size in pixels.
    pub font_size: f64,
}

/// A node of the target layout tree.
#[derive(Debug, Clone)]
pub struct View {
    /// Arena index.
    pub id: ViewId,
    /// Source node, if not synthesized.
    pub source: Option<NodeId>,
    /// How the view was created.
    pub origin: ViewOrigin,
    /// Source tag, `#text`, or a synthesized role.
    pub tag: String,
    /// Session-unique control id (`textview_1`), assigned before anchoring.
    pub control_id: String,
    /// Depth in the CSS tree.
    pub depth: usize,
    /// Text content rendered by the view.
    pub text: Option<String>,
    /// Computed style.
    pub styles: StyleMap,
    /// Source element attributes.
    pub element_attrs: AttributesMap,
    /// Border box.
    pub bounds: BoxRect,
    /// Margin box.
    pub linear: BoxRect,
    /// Content box.
    pub box_rect: BoxRect,
    /// Margin state.
    pub margin: BoxEdges,
    /// Padding state.
    pub padding: BoxEdges,
    /// Border widths.
    pub border: Edges,
    /// Derived CSS facts.
    pub facts: ViewFacts,
    /// Widget kind.
    pub container_type: ContainerType,
    /// Arrangement of children.
    pub alignment: AlignmentType,
    /// Adapter that owns this container's layout.
    pub adapter: Option<AdapterKind>,
    /// Target attributes.
    pub attributes: AttributeStore,
    /// Width mode.
    pub layout_width: LayoutMode,
    /// Height mode.
    pub layout_height: LayoutMode,
    /// Anchors.
    pub constraint: ConstraintState,
    /// Horizontal translation in pixels.
    pub translate_x: f64,
    /// Vertical translation in pixels.
    pub translate_y: f64,
    /// CSS parent.
    pub parent: Option<ViewId>,
    /// CSS children in render order.
    pub children: Vec<ViewId>,
    /// Container actually holding the view.
    pub render_parent: Option<ViewId>,
    /// Views held by this container.
    pub render_children: Vec<ViewId>,
    /// Container type of the render parent, cached for anchoring.
    pub render_parent_type: ContainerType,
    /// Wrapper inserted around this view.
    pub outer_wrapper: Option<ViewId>,
    /// View this wrapper holds.
    pub inner_wrapped: Option<ViewId>,
    /// Not rendered.
    pub excluded: bool,
}

impl View {
    /// A detached view with empty state.
    #[must_use]
    pub fn new(id: ViewId, origin: ViewOrigin, tag: &str) -> Self {
        Self {
            id,
            source: None,
            origin,
            tag: tag.to_string(),
            control_id: String::new(),
            depth: 0,
            text: None,
            styles: StyleMap::new(),
            element_attrs: AttributesMap::new(),
            bounds: BoxRect::default(),
            linear: BoxRect::default(),
            box_rect: BoxRect::default(),
            margin: BoxEdges::default(),
            padding: BoxEdges::default(),
            border: Edges::default(),
            facts: ViewFacts {
                page_flow: true,
                font_size: droid_dom::DEFAULT_FONT_SIZE_PX,
                ..ViewFacts::default()
            },
            container_type: ContainerType::Unknown,
            alignment: AlignmentType::empty(),
            adapter: None,
            attributes: AttributeStore::new(),
            layout_width: LayoutMode::Unset,
            layout_height: LayoutMode::Unset,
            constraint: ConstraintState::default(),
            translate_x: 0.0,
            translate_y: 0.0,
            parent: None,
            children: Vec::new(),
            render_parent: None,
            render_children: Vec::new(),
            render_parent_type: ContainerType::Unknown,
            outer_wrapper: None,
            inner_wrapped: None,
            excluded: false,
        }
    }

    /// Set border box, margin and padding together, deriving the other
    /// boxes. `border` must already be set.
    pub fn set_geometry(&mut self, bounds: BoxRect, margin: &Edges, padding: &Edges) {
        self.bounds = bounds;
        self.linear = bounds.expanded_by(margin);
        self.box_rect = bounds.shrunk_by(&self.border).shrunk_by(padding);
        self.margin = BoxEdges::from_css(margin);
        self.padding = BoxEdges::from_css(padding);
    }

    /// Computed CSS value; `display` falls back to the element default.
    #[must_use]
    pub fn css(&self, name: &str) -> &str {
        if name == "display" && !self.styles.contains("display") {
            return if self.tag.starts_with('#') {
                "inline"
            } else {
                default_display_for_element(&self.tag)
            };
        }
        self.styles.value(name)
    }

    /// Pixel value of a property.
    #[must_use]
    pub fn css_px(&self, name: &str) -> Option<f64> {
        parse_px(self.css(name))
    }

    /// Percentage of a property as a fraction.
    #[must_use]
    pub fn css_percent(&self, name: &str) -> Option<f64> {
        parse_percent(self.css(name))
    }

    /// Whether the view has no source node.
    #[must_use]
    pub fn is_synthesized(&self) -> bool {
        self.origin != ViewOrigin::Source
    }

    /// Guideline or barrier.
    #[must_use]
    pub const fn is_helper(&self) -> bool {
        self.container_type.is_helper()
    }

    /// Whether the view displays text.
    #[must_use]
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|text| !text.is_empty())
    }

    /// Whether the view exposes a baseline for `vertical-align`.
    #[must_use]
    pub const fn has_baseline(&self) -> bool {
        self.container_type.has_baseline()
    }

    /// `@id/name` reference to this view.
    #[must_use]
    pub fn document_id(&self) -> String {
        format!("@id/{}", self.control_id)
    }

    /// Whether the outer display is flex.
    #[must_use]
    pub fn is_flex(&self) -> bool {
        matches!(self.css("display"), "flex" | "inline-flex")
    }

    /// Whether the outer display is grid.
    #[must_use]
    pub fn is_grid(&self) -> bool {
        matches!(self.css("display"), "grid" | "inline-grid")
    }

    /// Whether the box draws a visible background.
    #[must_use]
    pub fn has_background(&self) -> bool {
        let color = self.css("background-color");
        let visible_color = !matches!(color, "transparent" | "rgba(0, 0, 0, 0)" | "none" | "");
        visible_color || self.css("background-image") != "none"
    }

    /// Whether any border edge is drawn.
    #[must_use]
    pub fn has_border(&self) -> bool {
        let edges = [
            ("border-top-style", self.border.top),
            ("border-right-style", self.border.right),
            ("border-bottom-style", self.border.bottom),
            ("border-left-style", self.border.left),
        ];
        edges
            .iter()
            .any(|(style, width)| *width > 0.0 && !matches!(self.css(style), "none" | "hidden"))
    }
}
