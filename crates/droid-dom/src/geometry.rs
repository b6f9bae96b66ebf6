//! Rendered geometry of source boxes.
//!
//! [§ 8.1 Box dimensions](https://www.w3.org/TR/CSS2/box.html#box-dimensions)
//!
//! "Each box has a content area and optional surrounding padding, border,
//! and margin areas."

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in CSS pixels.
///
/// All six fields are kept in sync by the constructors; `right` and `bottom`
/// are stored so the layout engine can compare edges without recomputing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BoxRect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl BoxRect {
    /// Rectangle from its origin and size.
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
            width,
            height,
        }
    }

    /// Rectangle from its four edges.
    #[must_use]
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(left, top, (right - left).max(0.0), (bottom - top).max(0.0))
    }

    /// Grow the rectangle outward by `edges` (negative edges shrink it).
    #[must_use]
    pub fn expanded_by(&self, edges: &Edges) -> Self {
        Self::from_edges(
            self.left - edges.left,
            self.top - edges.top,
            self.right + edges.right,
            self.bottom + edges.bottom,
        )
    }

    /// Shrink the rectangle inward by `edges`.
    #[must_use]
    pub fn shrunk_by(&self, edges: &Edges) -> Self {
        Self::from_edges(
            self.left + edges.left,
            self.top + edges.top,
            self.right - edges.right,
            self.bottom - edges.bottom,
        )
    }

    /// Smallest rectangle containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::from_edges(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// Whether `other` lies completely inside this rectangle, allowing
    /// `tolerance` pixels of overhang.
    #[must_use]
    pub fn contains(&self, other: &Self, tolerance: f64) -> bool {
        other.left >= self.left - tolerance
            && other.top >= self.top - tolerance
            && other.right <= self.right + tolerance
            && other.bottom <= self.bottom + tolerance
    }
}

/// Input shape for a rectangle: origin and size.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RectInput {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl From<RectInput> for BoxRect {
    fn from(input: RectInput) -> Self {
        Self::new(input.left, input.top, input.width, input.height)
    }
}

/// Sizes of the four edges of a box area.
///
/// [§ 8.1](https://www.w3.org/TR/CSS2/box.html#box-dimensions)
/// "The margin, border, and padding can be broken down into top, right,
/// bottom, and left segments."
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Edges {
    /// Top edge size.
    pub top: f64,
    /// Right edge size.
    pub right: f64,
    /// Bottom edge size.
    pub bottom: f64,
    /// Left edge size.
    pub left: f64,
}

impl Edges {
    /// Edges from explicit sizes in CSS order.
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same size on every edge.
    #[must_use]
    pub const fn uniform(size: f64) -> Self {
        Self::new(size, size, size, size)
    }

    /// Edges in CSS order: top, right, bottom, left.
    #[must_use]
    pub const fn to_array(&self) -> [f64; 4] {
        [self.top, self.right, self.bottom, self.left]
    }

    /// Sum of left and right.
    #[must_use]
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[must_use]
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}
