//! Width and height modes.
//!
//! [§ 10 Visual formatting model details](https://www.w3.org/TR/CSS2/visudet.html)
//!
//! Each axis of each view ends in exactly one of a fixed size,
//! `wrap_content`, `match_parent` or `0px` (sized by constraints or
//! weights). Adapters get the first say for their items; the CSS width and
//! height decide the rest. Min and max sizes are added on top and never
//! replace the chosen mode.

use droid_common::math::format_px;
use droid_common::{format_float, truncate};

use crate::node::{
    AlignmentType, Attr, Axis, ContainerType, Dimensionable, Edge, LayoutMode, LayoutPosition,
    View, ViewId,
};
use crate::session::ConversionSession;
use crate::tree::ViewTree;
use crate::values::{CssLength, parse_number};

/// Resolve both axes of `id`, then its min and max sizes.
pub fn set_layout(tree: &mut ViewTree, session: &mut ConversionSession, id: ViewId) {
    if tree[id].is_helper() || tree[id].excluded {
        return;
    }
    let owner = tree[id]
        .render_parent
        .and_then(|parent| tree[parent].adapter.map(|kind| (parent, kind)));
    if let Some((parent, kind)) = owner {
        kind.adapter().dimension(tree, session, parent, id);
    }
    for axis in [Axis::Horizontal, Axis::Vertical] {
        if !tree[id].layout_mode(axis).is_set() {
            let mode = resolve_axis(tree, session, id, axis);
            let _ = tree[id].set_layout_mode(axis, mode, false);
        }
    }
    set_min_max(tree, id);
}

const fn size_property(axis: Axis) -> &'static str {
    match axis {
        Axis::Horizontal => "width",
        Axis::Vertical => "height",
    }
}

const fn extent(rect: &droid_dom::BoxRect, axis: Axis) -> f64 {
    match axis {
        Axis::Horizontal => rect.width,
        Axis::Vertical => rect.height,
    }
}

/// Padding plus border along `axis`, the part a `content-box` size leaves out.
fn box_extra(view: &View, axis: Axis) -> f64 {
    let edges = match axis {
        Axis::Horizontal => [Edge::Left, Edge::Right],
        Axis::Vertical => [Edge::Top, Edge::Bottom],
    };
    edges
        .iter()
        .map(|&edge| view.padding.css(edge) + view.border.to_array()[edge.index()])
        .sum()
}

/// `0px` when `id` is anchored on both sides of `axis` inside a
/// ConstraintLayout, `match_parent` otherwise.
#[must_use]
pub fn get_match_constraint(tree: &ViewTree, id: ViewId, axis: Axis) -> LayoutMode {
    let view = &tree[id];
    if view.render_parent_type != ContainerType::Constraint {
        return LayoutMode::MatchParent;
    }
    let has = |positions: &[LayoutPosition]| {
        positions
            .iter()
            .any(|&position| view.constraint.current.contains_key(&position))
    };
    let both = match axis {
        Axis::Horizontal => {
            has(&[LayoutPosition::Left, LayoutPosition::LeftRight])
                && has(&[LayoutPosition::Right, LayoutPosition::RightLeft])
        }
        Axis::Vertical => {
            has(&[LayoutPosition::Top, LayoutPosition::TopBottom])
                && has(&[LayoutPosition::Bottom, LayoutPosition::BottomTop])
        }
    };
    if both {
        LayoutMode::MatchConstraint
    } else {
        LayoutMode::MatchParent
    }
}

/// Size `axis` by constraints, as a `percent` of the parent when given.
/// A percentage already written by the row distribution is kept.
pub fn set_constraint_dimension(
    tree: &mut ViewTree,
    id: ViewId,
    axis: Axis,
    percent: Option<f64>,
    precision: u8,
) {
    let view = &mut tree[id];
    let _ = view.set_layout_mode(axis, LayoutMode::MatchConstraint, true);
    if let Some(percent) = percent {
        let attr = match axis {
            Axis::Horizontal => Attr::WidthPercent,
            Axis::Vertical => Attr::HeightPercent,
        };
        let _ = view
            .attributes
            .set_if_absent(attr, format_float(percent, precision));
    }
}

fn resolve_axis(
    tree: &mut ViewTree,
    session: &mut ConversionSession,
    id: ViewId,
    axis: Axis,
) -> LayoutMode {
    let property = size_property(axis);
    let value = tree[id].css(property).to_string();
    let Some(length) = CssLength::parse(&value) else {
        let _ = session
            .diagnostics
            .warn_once("dimension", &format!("unsupported {property} `{value}`"));
        return auto_mode(tree, id, axis);
    };
    let view = &tree[id];
    let content_box = view.css("box-sizing") != "border-box";
    if length.is_absolute() {
        let px = length.to_px(view.facts.font_size, 0.0).unwrap_or(0.0);
        let extra = if content_box { box_extra(view, axis) } else { 0.0 };
        return LayoutMode::Px(px + extra);
    }
    let Some(percent) = length.percent() else {
        return auto_mode(tree, id, axis);
    };
    let Some(parent) = view.parent.or(view.render_parent) else {
        return auto_mode(tree, id, axis);
    };
    // [§ 10.5](https://www.w3.org/TR/CSS2/visudet.html#the-height-property)
    // "If the height of the containing block is not specified explicitly
    // ... the value computes to 'auto'."
    let parent_height = CssLength::parse(tree[parent].css("height"));
    if axis == Axis::Vertical && matches!(parent_height, Some(CssLength::Auto) | None) {
        return auto_mode(tree, id, axis);
    }
    if percent >= 1.0 {
        return get_match_constraint(tree, id, axis);
    }
    if view.render_parent_type == ContainerType::Constraint {
        set_constraint_dimension(tree, id, axis, Some(percent), session.config.float_precision);
        return LayoutMode::MatchConstraint;
    }
    let reference = extent(&tree[parent].box_rect, axis);
    let extra = if content_box { box_extra(view, axis) } else { 0.0 };
    LayoutMode::Px(percent * reference + extra)
}

/// Mode of an `auto` axis.
fn auto_mode(tree: &ViewTree, id: ViewId, axis: Axis) -> LayoutMode {
    let view = &tree[id];
    let Some(parent) = view.render_parent else {
        return match axis {
            Axis::Horizontal => LayoutMode::MatchParent,
            Axis::Vertical => LayoutMode::WrapContent,
        };
    };
    match view.container_type {
        ContainerType::Image
        | ContainerType::Svg
        | ContainerType::Edit
        | ContainerType::Select
        | ContainerType::Range
        | ContainerType::Progress => return LayoutMode::Px(extent(&view.bounds, axis)),
        ContainerType::Space | ContainerType::Block | ContainerType::Line
            if axis == Axis::Vertical =>
        {
            return LayoutMode::Px(view.bounds.height);
        }
        _ => {}
    }

    let absolute = !view.facts.page_flow && !view.facts.auto_position;
    if absolute {
        let (start, end) = match axis {
            Axis::Horizontal => ("left", "right"),
            Axis::Vertical => ("top", "bottom"),
        };
        let both = view.css(start) != "auto" && view.css(end) != "auto";
        return if both && view.render_parent_type == ContainerType::Constraint {
            LayoutMode::MatchConstraint
        } else if matches!(view.container_type, ContainerType::Space | ContainerType::Block) {
            LayoutMode::Px(extent(&view.bounds, axis))
        } else {
            LayoutMode::WrapContent
        };
    }

    let container = &tree[parent];
    let item = !container.alignment.contains(AlignmentType::WRAPPER)
        && (container.is_flex() || container.is_grid());
    let fills_line = axis == Axis::Horizontal
        && view.facts.block
        && view.facts.floating.is_none()
        && !item;
    if fills_line {
        return get_match_constraint(tree, id, axis);
    }
    let empty_box = matches!(
        view.container_type,
        ContainerType::Space | ContainerType::Block | ContainerType::Line
    );
    if axis == Axis::Horizontal && empty_box {
        return LayoutMode::Px(view.bounds.width);
    }
    LayoutMode::WrapContent
}

/// `min-*` and `max-*` of both axes.
fn set_min_max(tree: &mut ViewTree, id: ViewId) {
    for axis in [Axis::Horizontal, Axis::Vertical] {
        let (min_name, max_name) = match axis {
            Axis::Horizontal => ("min-width", "max-width"),
            Axis::Vertical => ("min-height", "max-height"),
        };
        let (min_attr, max_attr, constraint_min, constraint_max, constrained) = match axis {
            Axis::Horizontal => (
                Attr::MinWidth,
                Attr::MaxWidth,
                Attr::WidthMin,
                Attr::WidthMax,
                Attr::ConstrainedWidth,
            ),
            Axis::Vertical => (
                Attr::MinHeight,
                Attr::MaxHeight,
                Attr::HeightMin,
                Attr::HeightMax,
                Attr::ConstrainedHeight,
            ),
        };
        let view = &tree[id];
        let font_size = view.facts.font_size;
        let px = |name: &str| {
            CssLength::parse(view.css(name))
                .filter(|length| length.is_absolute())
                .and_then(|length| length.to_px(font_size, 0.0))
        };
        let min = px(min_name).filter(|v| *v > 0.0);
        let max = px(max_name);
        let under_constraint = view.render_parent_type == ContainerType::Constraint;
        let accepts_max = view.container_type.accepts_max_dimension();
        let wraps = view.layout_mode(axis) == LayoutMode::WrapContent;

        let view = &mut tree[id];
        if let Some(min) = min {
            let _ = view.attributes.set(min_attr, format_px(min));
            if under_constraint {
                let _ = view.attributes.set(constraint_min, format_px(min));
            }
        }
        if let Some(max) = max {
            if accepts_max {
                let _ = view.attributes.set(max_attr, format_px(max));
            }
            if under_constraint {
                let _ = view.attributes.set(constraint_max, format_px(max));
                if wraps {
                    let _ = view.attributes.set(constrained, "true");
                }
            }
        }
    }
}

/// Weight attribute of `axis` inside a ConstraintLayout chain.
pub(crate) const fn weight_attr(axis: Axis) -> Attr {
    match axis {
        Axis::Horizontal => Attr::HorizontalWeight,
        Axis::Vertical => Attr::VerticalWeight,
    }
}

/// `flex-basis` in pixels along `main`, if definite.
pub(crate) fn flex_basis(tree: &ViewTree, parent: ViewId, id: ViewId, main: Axis) -> Option<f64> {
    let view = &tree[id];
    let reference = extent(&tree[parent].box_rect, main);
    CssLength::parse(view.css("flex-basis"))
        .and_then(|length| length.to_px(view.facts.font_size, reference))
        .filter(|px| *px >= 0.0)
}

/// [§ 7 Flexibility](https://www.w3.org/TR/css-flexbox-1/#flexibility)
///
/// Main-axis size of a flex item. Growing items, and shrinking items of an
/// overflowing line, become weighted `0px` views; a definite basis is then
/// their minimum. Otherwise the basis is the fixed size.
///
/// Returns whether the item is weighted.
pub fn set_flex_dimension(
    tree: &mut ViewTree,
    session: &ConversionSession,
    parent: ViewId,
    id: ViewId,
    main: Axis,
    overflow: bool,
) -> bool {
    let precision = session.config.float_precision;
    let grow = parse_number(tree[id].css("flex-grow")).unwrap_or(0.0).max(0.0);
    let shrink = parse_number(tree[id].css("flex-shrink")).unwrap_or(1.0).max(0.0);
    let basis = flex_basis(tree, parent, id, main);
    let weight = if grow > 0.0 {
        Some(grow)
    } else if overflow && shrink != 1.0 && shrink > 0.0 {
        Some(shrink)
    } else {
        None
    };

    let view = &mut tree[id];
    let Some(weight) = weight else {
        if let Some(basis) = basis {
            let _ = view.set_layout_mode(main, LayoutMode::Px(basis), false);
        }
        return false;
    };
    let _ = view.set_layout_mode(main, LayoutMode::MatchConstraint, true);
    let _ = view
        .attributes
        .set(weight_attr(main), format_float(weight, precision));
    if let Some(basis) = basis.filter(|b| *b > 0.0) {
        let min_attr = match main {
            Axis::Horizontal => Attr::WidthMin,
            Axis::Vertical => Attr::HeightMin,
        };
        let _ = view.attributes.set(min_attr, format_px(basis));
    }
    true
}

/// Rewrite the weights of `items` so they reproduce the rendered sizes.
///
/// The sibling that grew the most past its basis is the reference; every
/// other weight is its size relative to the reference size.
pub fn adjust_grow_ratio(
    tree: &mut ViewTree,
    session: &ConversionSession,
    items: &[ViewId],
    axis: Axis,
) {
    let attr = weight_attr(axis);
    let weighted: Vec<ViewId> = items
        .iter()
        .copied()
        .filter(|&id| tree[id].attributes.contains(attr))
        .collect();
    if weighted.len() < 2 {
        return;
    }
    let growth = |id: ViewId| {
        let size = extent(&tree[id].bounds, axis);
        let basis = tree[id]
            .render_parent
            .and_then(|parent| flex_basis(tree, parent, id, axis))
            .unwrap_or(0.0);
        size - basis
    };
    let Some(reference) = weighted
        .iter()
        .copied()
        .max_by(|a, b| growth(*a).total_cmp(&growth(*b)))
    else {
        return;
    };
    let reference_size = extent(&tree[reference].bounds, axis);
    if reference_size <= 0.0 {
        return;
    }
    let precision = session.config.float_precision;
    for id in weighted {
        let ratio = truncate(extent(&tree[id].bounds, axis) / reference_size, precision);
        if ratio > 0.0 {
            let _ = tree[id].attributes.set(attr, format_float(ratio, precision));
        }
    }
}
