//! Tests for width and height modes.

use droid_dom::{BoxRect, Edges, SourceTree};
use droid_layout::dimension::{adjust_grow_ratio, get_match_constraint, set_constraint_dimension};
use droid_layout::node::{
    AnchorTarget, Attr, Axis, ContainerType, Dimensionable, LayoutMode, LayoutPosition, ViewOrigin,
};
use droid_layout::{ConversionConfig, ConversionSession, LayoutDocument, ViewId, ViewTree, convert};

/// Helper: a ConstraintLayout with children of the given widths, side by side.
fn row(widths: &[f64]) -> (ViewTree, ViewId, Vec<ViewId>) {
    let mut tree = ViewTree::new();
    let parent = tree.alloc(ViewOrigin::Source, "div");
    tree.set_control_type(parent, ContainerType::Constraint);
    let total = widths.iter().sum();
    let bounds = BoxRect::new(0.0, 0.0, total, 20.0);
    tree[parent].set_geometry(bounds, &Edges::default(), &Edges::default());
    let mut left = 0.0;
    let children = widths
        .iter()
        .enumerate()
        .map(|(i, &width)| {
            let child = tree.alloc(ViewOrigin::Source, "div");
            tree[child].control_id = format!("item_{i}");
            let bounds = BoxRect::new(left, 0.0, width, 20.0);
            tree[child].set_geometry(bounds, &Edges::default(), &Edges::default());
            tree[child].parent = Some(parent);
            tree.append_render_child(parent, child);
            left += width;
            child
        })
        .collect();
    (tree, parent, children)
}

/// Convert a two-child vertical stack whose first child carries `styles`.
fn stack_with(styles: &str, padding: &str) -> LayoutDocument {
    let json = format!(
        r#"{{
            "tag": "div", "attrs": {{"id": "root"}},
            "bounds": {{"left": 0, "top": 0, "width": 300, "height": 40}},
            "children": [
                {{"tag": "div", "attrs": {{"id": "sized"}}, "text": "sized",
                 "styles": {styles}, "padding": {padding},
                 "bounds": {{"left": 0, "top": 0, "width": 140, "height": 20}}}},
                {{"tag": "div", "attrs": {{"id": "plain"}}, "text": "plain",
                 "bounds": {{"left": 0, "top": 20, "width": 300, "height": 20}}}}
            ]
        }}"#
    );
    let source = SourceTree::from_json(&json).expect("valid source");
    let config = ConversionConfig {
        support_rtl: false,
        ..ConversionConfig::default()
    };
    convert(&source, config)
}

// ========== Match constraint ==========

#[test]
fn test_match_constraint_needs_both_sides() {
    let (mut tree, _, children) = row(&[100.0]);
    let view = children[0];
    assert_eq!(get_match_constraint(&tree, view, Axis::Horizontal), LayoutMode::MatchParent);

    assert!(tree.anchor(view, LayoutPosition::Left, AnchorTarget::Parent, false));
    assert_eq!(get_match_constraint(&tree, view, Axis::Horizontal), LayoutMode::MatchParent);

    assert!(tree.anchor(view, LayoutPosition::Right, AnchorTarget::Parent, false));
    assert_eq!(
        get_match_constraint(&tree, view, Axis::Horizontal),
        LayoutMode::MatchConstraint
    );
    assert_eq!(get_match_constraint(&tree, view, Axis::Vertical), LayoutMode::MatchParent);
}

#[test]
fn test_match_constraint_outside_constraint_layout() {
    let (mut tree, parent, children) = row(&[100.0]);
    tree.set_control_type(parent, ContainerType::Linear);
    assert_eq!(
        get_match_constraint(&tree, children[0], Axis::Horizontal),
        LayoutMode::MatchParent
    );
}

#[test]
fn test_constraint_dimension_keeps_distributed_percent() {
    let (mut tree, _, children) = row(&[100.0]);
    let view = children[0];
    set_constraint_dimension(&mut tree, view, Axis::Horizontal, Some(0.25), 3);
    assert_eq!(tree[view].layout_width(), LayoutMode::MatchConstraint);
    assert_eq!(tree[view].attributes.get(Attr::WidthPercent), Some("0.25"));

    set_constraint_dimension(&mut tree, view, Axis::Horizontal, Some(0.75), 3);
    assert_eq!(tree[view].attributes.get(Attr::WidthPercent), Some("0.25"));
}

// ========== Weights ==========

#[test]
fn test_grow_ratio_follows_rendered_sizes() {
    let (mut tree, _, children) = row(&[100.0, 200.0, 50.0]);
    for &child in &children[..2] {
        let _ = tree[child].attributes.set(Attr::HorizontalWeight, "1");
    }
    let session = ConversionSession::new(ConversionConfig::default());
    adjust_grow_ratio(&mut tree, &session, &children, Axis::Horizontal);

    assert_eq!(tree[children[0]].attributes.get(Attr::HorizontalWeight), Some("0.5"));
    assert_eq!(tree[children[1]].attributes.get(Attr::HorizontalWeight), Some("1"));
    assert!(!tree[children[2]].attributes.contains(Attr::HorizontalWeight));
}

#[test]
fn test_single_weight_is_left_alone() {
    let (mut tree, _, children) = row(&[120.0, 80.0]);
    let _ = tree[children[0]].attributes.set(Attr::HorizontalWeight, "3");
    let session = ConversionSession::new(ConversionConfig::default());
    adjust_grow_ratio(&mut tree, &session, &children, Axis::Horizontal);
    assert_eq!(tree[children[0]].attributes.get(Attr::HorizontalWeight), Some("3"));
}

// ========== CSS sizes ==========

#[test]
fn test_root_fills_width_and_wraps_height() {
    let document = stack_with("{}", "{}");
    let root = document.find("root").expect("root view");
    assert_eq!(root.layout_width, "match_parent");
    assert_eq!(root.layout_height, "wrap_content");

    let plain = document.find("plain").expect("plain view");
    assert_eq!(plain.layout_width, "match_parent");
    assert_eq!(plain.layout_height, "wrap_content");
}

#[test]
fn test_fixed_width_adds_padding_for_content_box() {
    let document = stack_with(r#"{"width": "120px"}"#, r#"{"left": 10, "right": 10}"#);
    assert_eq!(document.find("sized").expect("sized view").layout_width, "140px");

    let document = stack_with(
        r#"{"width": "120px", "box-sizing": "border-box"}"#,
        r#"{"left": 10, "right": 10}"#,
    );
    assert_eq!(document.find("sized").expect("sized view").layout_width, "120px");
}

#[test]
fn test_min_width_is_written() {
    let document = stack_with(r#"{"min-width": "50px"}"#, "{}");
    let sized = document.find("sized").expect("sized view");
    assert_eq!(sized.attr("android:minWidth"), Some("50px"));
}

#[test]
fn test_percent_height_of_auto_parent_is_auto() {
    let document = stack_with(r#"{"height": "50%"}"#, "{}");
    assert_eq!(document.find("sized").expect("sized view").layout_height, "wrap_content");
}

#[test]
fn test_unsupported_width_warns() {
    let document = stack_with(r#"{"width": "calc(100% - 10px)"}"#, "{}");
    assert!(
        document
            .warnings
            .iter()
            .any(|warning| warning == "[dimension] unsupported width `calc(100% - 10px)`"),
        "{:?}",
        document.warnings
    );
}
