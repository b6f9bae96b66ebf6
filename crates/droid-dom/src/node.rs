//! Source nodes and their derived CSS facts.

use std::collections::HashMap;

use serde::Serialize;

use crate::geometry::{BoxRect, Edges};
use crate::style::{StyleMap, default_display_for_element, parse_percent, parse_px};
use crate::NodeId;

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// [§ 9.5.1 Positioning the float](https://www.w3.org/TR/CSS2/visuren.html#float-position)
///
/// "left: The element generates a block box that is floated to the left."
/// "right: Similar to 'left', except the box is floated to the right."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FloatSide {
    /// float: left
    Left,
    /// float: right
    Right,
}

/// [§ 9.3.1 Choosing a positioning scheme](https://www.w3.org/TR/CSS2/visuren.html#choose-position)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum PositionScheme {
    /// "The box is a normal box, laid out according to the normal flow."
    #[default]
    Static,
    /// "The box's position is calculated according to the normal flow.
    /// Then the box is offset relative to its normal position."
    Relative,
    /// "The box's position is specified with the 'top', 'right', 'bottom',
    /// and 'left' properties."
    Absolute,
    /// "The box's position is calculated according to the 'absolute' model,
    /// but in addition, the box is fixed with respect to some reference."
    Fixed,
    /// Treated as relative for conversion purposes.
    Sticky,
}

impl PositionScheme {
    /// Parse the `position` property.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "relative" => Self::Relative,
            "absolute" => Self::Absolute,
            "fixed" => Self::Fixed,
            "sticky" => Self::Sticky,
            _ => Self::Static,
        }
    }

    /// Whether the box is taken out of flow.
    #[must_use]
    pub const fn is_absolute(self) -> bool {
        matches!(self, Self::Absolute | Self::Fixed)
    }
}

/// What a source node holds.
#[derive(Debug, Clone)]
pub enum SourceKind {
    /// An element with its tag name and attributes.
    Element {
        /// Lowercase local name.
        tag: String,
        /// Element attributes.
        attrs: AttributesMap,
    },
    /// A text run.
    Text(String),
}

/// A node of the rendered source tree.
///
/// Geometry is supplied by the producer; everything else is derived from
/// the computed style.
#[derive(Debug, Clone)]
pub struct SourceNode {
    /// Element or text.
    pub kind: SourceKind,
    /// Computed style.
    pub styles: StyleMap,
    /// Border box in CSS pixels.
    pub bounds: BoxRect,
    /// Used margins.
    pub margin: Edges,
    /// Used padding.
    pub padding: Edges,
    /// Used border widths.
    pub border: Edges,
    /// Parent node.
    pub parent: Option<NodeId>,
    /// Children in document order.
    pub children: Vec<NodeId>,
    /// Next sibling.
    pub next_sibling: Option<NodeId>,
    /// Previous sibling.
    pub prev_sibling: Option<NodeId>,
}

impl SourceNode {
    /// Create a detached element node.
    #[must_use]
    pub fn element(tag: &str, styles: StyleMap, bounds: BoxRect) -> Self {
        Self::with_kind(
            SourceKind::Element {
                tag: tag.to_ascii_lowercase(),
                attrs: AttributesMap::new(),
            },
            styles,
            bounds,
        )
    }

    /// Create a detached text node.
    #[must_use]
    pub fn text(text: &str, bounds: BoxRect) -> Self {
        Self::with_kind(SourceKind::Text(text.to_string()), StyleMap::new(), bounds)
    }

    fn with_kind(kind: SourceKind, styles: StyleMap, bounds: BoxRect) -> Self {
        Self {
            kind,
            styles,
            bounds,
            margin: Edges::default(),
            padding: Edges::default(),
            border: Edges::default(),
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        }
    }

    /// Tag name, or `#text` for text runs.
    #[must_use]
    pub fn tag(&self) -> &str {
        match &self.kind {
            SourceKind::Element { tag, .. } => tag,
            SourceKind::Text(_) => "#text",
        }
    }

    /// Element attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        match &self.kind {
            SourceKind::Element { attrs, .. } => attrs.get(name).map(String::as_str),
            SourceKind::Text(_) => None,
        }
    }

    /// Set an element attribute. Text runs ignore attributes.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if let SourceKind::Element { attrs, .. } = &mut self.kind {
            let _ = attrs.insert(name.to_string(), value.to_string());
        }
    }

    /// Whether this node is a text run.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self.kind, SourceKind::Text(_))
    }

    /// Text content of a text run.
    #[must_use]
    pub fn text_content(&self) -> Option<&str> {
        match &self.kind {
            SourceKind::Text(text) => Some(text),
            SourceKind::Element { .. } => None,
        }
    }

    /// Computed value of a CSS property. `display` defaults per element.
    #[must_use]
    pub fn css(&self, name: &str) -> &str {
        if name == "display" && !self.styles.contains("display") {
            return if self.is_text() {
                "inline"
            } else {
                default_display_for_element(self.tag())
            };
        }
        self.styles.value(name)
    }

    /// Whether `name` holds a pixel length (or a percentage when
    /// `percent` is allowed).
    #[must_use]
    pub fn has_px(&self, name: &str, percent: bool) -> bool {
        let value = self.css(name);
        parse_px(value).is_some() || (percent && parse_percent(value).is_some())
    }

    /// Positioning scheme from `position`.
    #[must_use]
    pub fn position(&self) -> PositionScheme {
        PositionScheme::parse(self.css("position"))
    }

    /// Whether the node participates in normal flow.
    #[must_use]
    pub fn page_flow(&self) -> bool {
        !self.position().is_absolute()
    }

    /// Float side, if floated.
    ///
    /// [§ 9.7](https://www.w3.org/TR/CSS2/visuren.html#dis-pos-flo)
    /// "if 'position' has the value 'absolute' or 'fixed', the box is
    /// absolutely positioned ... and 'float' is set to 'none'"
    #[must_use]
    pub fn floating(&self) -> Option<FloatSide> {
        if !self.page_flow() {
            return None;
        }
        match self.css("float") {
            "left" | "inline-start" => Some(FloatSide::Left),
            "right" | "inline-end" => Some(FloatSide::Right),
            _ => None,
        }
    }

    /// Whether the outer display type is block-level.
    #[must_use]
    pub fn block(&self) -> bool {
        matches!(
            self.css("display"),
            "block"
                | "list-item"
                | "flex"
                | "grid"
                | "table"
                | "flow-root"
                | "table-caption"
                | "table-row"
                | "table-row-group"
                | "table-header-group"
                | "table-footer-group"
        )
    }

    /// Block-level, in flow and not floated.
    #[must_use]
    pub fn block_static(&self) -> bool {
        self.block() && self.page_flow() && self.floating().is_none()
    }

    /// Whether the node is inline-level (inline, inline-block, text).
    #[must_use]
    pub fn inline(&self) -> bool {
        self.is_text()
            || matches!(
                self.css("display"),
                "inline" | "inline-block" | "inline-flex" | "inline-grid" | "inline-table"
            )
    }

    /// Whether the node is removed from rendering.
    #[must_use]
    pub fn hidden(&self) -> bool {
        self.css("display") == "none"
            || (self.tag() == "input" && self.attr("type") == Some("hidden"))
    }

    /// Whether the node is a form control.
    #[must_use]
    pub fn input_element(&self) -> bool {
        matches!(
            self.tag(),
            "input" | "select" | "textarea" | "button" | "progress" | "meter"
        )
    }

    /// Margin box: bounds plus margin.
    #[must_use]
    pub fn linear(&self) -> BoxRect {
        self.bounds.expanded_by(&self.margin)
    }

    /// Content box: bounds minus border and padding.
    #[must_use]
    pub fn content_box(&self) -> BoxRect {
        self.bounds.shrunk_by(&self.border).shrunk_by(&self.padding)
    }

    /// Font size in pixels.
    #[must_use]
    pub fn font_size(&self) -> f64 {
        parse_px(self.css("font-size")).unwrap_or(crate::DEFAULT_FONT_SIZE_PX)
    }
}
