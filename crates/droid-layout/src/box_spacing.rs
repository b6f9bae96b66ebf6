//! Final margin and padding of each view.
//!
//! [§ 8 Box model](https://www.w3.org/TR/CSS2/box.html)
//!
//! Edges are resolved in two passes over the whole tree. The first moves
//! negative margins into `translationX` / `translationY` (ConstraintLayout
//! ignores negative margins), the second writes the remaining edges as the
//! fewest attributes that express them.

use droid_common::math::format_px;
use droid_common::within_range;
use droid_dom::{BoxRect, FloatSide, PositionScheme};

use crate::api::OREO;
use crate::node::{Attr, Axis, BoxRegion, BoxSpaceable, ContainerType, Edge, View, ViewId};
use crate::session::ConversionSession;
use crate::tree::ViewTree;
use crate::values::CssLength;

/// Translations smaller than this are not written.
const MIN_TRANSLATION: f64 = 0.5;

/// Vertical margin removed from radio buttons and checkboxes, whose widget
/// drawable already carries inset.
const TOGGLE_INSET: f64 = 4.0;

/// Vertical margin removed from spinners.
const SELECT_INSET: f64 = 2.0;

/// Every attribute this module writes.
const SPACING_ATTRS: &[Attr] = &[
    Attr::LayoutMargin,
    Attr::LayoutMarginTop,
    Attr::LayoutMarginRight,
    Attr::LayoutMarginBottom,
    Attr::LayoutMarginLeft,
    Attr::LayoutMarginHorizontal,
    Attr::LayoutMarginVertical,
    Attr::Padding,
    Attr::PaddingTop,
    Attr::PaddingRight,
    Attr::PaddingBottom,
    Attr::PaddingLeft,
    Attr::PaddingHorizontal,
    Attr::PaddingVertical,
    Attr::TranslationX,
    Attr::TranslationY,
];

/// [§ 8.3.1 Collapsing margins](https://www.w3.org/TR/CSS2/box.html#collapsing-margins)
///
/// "When two or more margins collapse, the resulting margin width is the
/// maximum of the collapsing margins' widths. In the case of negative
/// margins, the maximum of the absolute values of the negative adjoining
/// margins is deducted from the maximum of the positive adjoining margins."
#[must_use]
pub fn collapse_margins(a: f64, b: f64) -> f64 {
    if a >= 0.0 && b >= 0.0 {
        a.max(b)
    } else if a < 0.0 && b < 0.0 {
        a.min(b)
    } else {
        a + b
    }
}

/// Top margin of `current` so it sits where it was rendered below
/// `previous` in a stacking container that adds both margins.
///
/// Without measured boxes the rendered gap is the collapsed margin pair.
pub fn fit_vertical_gap(tree: &mut ViewTree, previous: ViewId, current: ViewId) {
    let previous_bottom = tree[previous].box_value(BoxRegion::Margin, Edge::Bottom);
    let current_top = tree[current].box_value(BoxRegion::Margin, Edge::Top);
    let measured =
        tree[previous].bounds != BoxRect::default() || tree[current].bounds != BoxRect::default();
    let required = if measured {
        tree[current].bounds.top - (tree[previous].bounds.bottom + previous_bottom)
    } else {
        collapse_margins(previous_bottom, current_top) - previous_bottom
    };
    if !within_range(required, current_top, MIN_TRANSLATION) {
        tree[current].modify_box(BoxRegion::Margin, Edge::Top, required - current_top);
    }
}

/// [§ 9.4.3 Relative positioning](https://www.w3.org/TR/CSS2/visuren.html#relative-positioning)
///
/// "If neither 'left' nor 'right' is 'auto', the position is
/// over-constrained, and one of them has to be ignored."
///
/// Percentages refer to the containing block, here the CSS parent.
#[must_use]
pub fn relative_offset(tree: &ViewTree, id: ViewId, axis: Axis) -> f64 {
    let view = &tree[id];
    if view.facts.position != PositionScheme::Relative {
        return 0.0;
    }
    let containing = view.parent.map(|parent| tree[parent].box_rect).unwrap_or_default();
    let (start, end, reference) = match axis {
        Axis::Horizontal => ("left", "right", containing.width),
        Axis::Vertical => ("top", "bottom", containing.height),
    };
    let px = |name: &str| {
        CssLength::parse(view.css(name)).and_then(|len| len.to_px(view.facts.font_size, reference))
    };
    px(start).or_else(|| px(end).map(|v| -v)).unwrap_or(0.0)
}

/// Views that move with `id` when its `edge` pulls in: siblings anchored
/// from `id` toward `direction`, or the following siblings of a
/// LinearLayout stacking along the same axis.
fn successors(tree: &ViewTree, id: ViewId, direction: Edge) -> Vec<ViewId> {
    let Some(parent) = tree[id].render_parent else {
        return Vec::new();
    };
    let container = tree[parent].container_type;
    if container.supports_anchor() {
        return tree.anchor_chain(id, direction);
    }
    if container != ContainerType::Linear {
        return Vec::new();
    }
    let horizontal = tree[parent].attributes.get(Attr::Orientation) == Some("horizontal");
    if horizontal != (direction.axis() == Axis::Horizontal) {
        return Vec::new();
    }
    let siblings = tree.layout_children(parent);
    siblings
        .iter()
        .position(|&s| s == id)
        .map(|index| siblings[index + 1..].to_vec())
        .unwrap_or_default()
}

fn translate(tree: &mut ViewTree, ids: &[ViewId], axis: Axis, delta: f64) {
    for &id in ids {
        match axis {
            Axis::Horizontal => tree[id].translate_x += delta,
            Axis::Vertical => tree[id].translate_y += delta,
        }
    }
}

/// Turn the negative margins of `id` into translations of the view and of
/// the views positioned after it. The edge is reset, so a second call does
/// nothing.
pub fn translate_negative_margins(tree: &mut ViewTree, id: ViewId) {
    if tree[id].is_helper() || tree[id].excluded {
        return;
    }
    let right_float = tree[id].facts.floating == Some(FloatSide::Right);
    for edge in Edge::ALL {
        let value = tree[id].box_value(BoxRegion::Margin, edge);
        if value >= 0.0 {
            continue;
        }
        let axis = edge.axis();
        match edge {
            Edge::Top => {
                let mut moved = vec![id];
                moved.extend(successors(tree, id, Edge::Bottom));
                translate(tree, &moved, axis, value);
            }
            Edge::Bottom => {
                let moved = successors(tree, id, Edge::Bottom);
                translate(tree, &moved, axis, value);
            }
            Edge::Left if right_float => {
                // The float stays put; what is chained on its left moves over it.
                let moved = tree.anchor_chain(id, Edge::Left);
                translate(tree, &moved, axis, -value);
            }
            Edge::Left => {
                let mut moved = vec![id];
                moved.extend(successors(tree, id, Edge::Right));
                translate(tree, &moved, axis, value);
            }
            Edge::Right if right_float => translate(tree, &[id], axis, -value),
            Edge::Right => {
                let moved = successors(tree, id, Edge::Right);
                translate(tree, &moved, axis, value);
            }
        }
        tree[id].reset_box(BoxRegion::Margin, &[edge]);
        tracing::trace!(view = id.0, %edge, value, "negative margin translated");
    }
}

const fn edge_attr(region: BoxRegion, edge: Edge) -> Attr {
    match (region, edge) {
        (BoxRegion::Margin, Edge::Top) => Attr::LayoutMarginTop,
        (BoxRegion::Margin, Edge::Right) => Attr::LayoutMarginRight,
        (BoxRegion::Margin, Edge::Bottom) => Attr::LayoutMarginBottom,
        (BoxRegion::Margin, Edge::Left) => Attr::LayoutMarginLeft,
        (BoxRegion::Padding, Edge::Top) => Attr::PaddingTop,
        (BoxRegion::Padding, Edge::Right) => Attr::PaddingRight,
        (BoxRegion::Padding, Edge::Bottom) => Attr::PaddingBottom,
        (BoxRegion::Padding, Edge::Left) => Attr::PaddingLeft,
    }
}

/// Whole pixels, the precision the attributes are written with.
fn whole(value: f64) -> f64 {
    let value = value.round();
    if value == 0.0 { 0.0 } else { value }
}

/// Write `values` (CSS order) as the fewest attributes of `region`.
fn merge_edges(view: &mut View, region: BoxRegion, values: [f64; 4], api: u32) {
    let [top, right, bottom, left] = values.map(whole);
    let (all, horizontal, vertical) = match region {
        BoxRegion::Margin => (
            Attr::LayoutMargin,
            Attr::LayoutMarginHorizontal,
            Attr::LayoutMarginVertical,
        ),
        BoxRegion::Padding => (
            Attr::Padding,
            Attr::PaddingHorizontal,
            Attr::PaddingVertical,
        ),
    };
    if top == right && right == bottom && bottom == left {
        if top != 0.0 {
            let _ = view.attributes.set(all, format_px(top));
        }
        return;
    }
    let shorthand = api >= OREO;
    let mut write = |edges: [(Edge, f64); 2], pair: Attr| {
        let [(_, a), (_, b)] = edges;
        if shorthand && a == b {
            if a != 0.0 {
                let _ = view.attributes.set(pair, format_px(a));
            }
            return;
        }
        for (edge, value) in edges {
            if value != 0.0 {
                let _ = view.attributes.set(edge_attr(region, edge), format_px(value));
            }
        }
    };
    write([(Edge::Top, top), (Edge::Bottom, bottom)], vertical);
    write([(Edge::Left, left), (Edge::Right, right)], horizontal);
}

/// Write the margin, padding and translation attributes of `id`.
///
/// Reads only the view's edge state, so running it again yields the same
/// attributes.
pub fn resolve_box_spacing(tree: &mut ViewTree, session: &ConversionSession, id: ViewId) {
    let offset_x = relative_offset(tree, id, Axis::Horizontal);
    let offset_y = relative_offset(tree, id, Axis::Vertical);
    let view = &mut tree[id];
    if view.is_helper() || view.excluded {
        return;
    }
    view.attributes.remove_all(SPACING_ATTRS);

    let mut margin = view.margin.values();
    let inset = match view.container_type {
        ContainerType::Radio | ContainerType::Checkbox => TOGGLE_INSET,
        ContainerType::Select => SELECT_INSET,
        _ => 0.0,
    };
    if inset > 0.0 {
        for edge in [Edge::Top, Edge::Bottom] {
            let value = &mut margin[edge.index()];
            *value = (*value - inset).max(0.0);
        }
    }

    let mut padding = view.padding.values();
    if view.has_border() {
        let border = view.border.to_array();
        for (value, width) in padding.iter_mut().zip(border) {
            *value += width;
        }
    }

    let api = session.config.target_api;
    merge_edges(view, BoxRegion::Margin, margin, api);
    merge_edges(view, BoxRegion::Padding, padding, api);

    let translations = [
        (Attr::TranslationX, view.translate_x + offset_x),
        (Attr::TranslationY, view.translate_y + offset_y),
    ];
    for (attr, value) in translations {
        if value.abs() >= MIN_TRANSLATION {
            let _ = view.attributes.set(attr, format_px(value));
        }
    }
}
