//! Tests for margins, padding and translations.

use droid_dom::{BoxRect, Edges, PositionScheme, SourceTree};
use droid_layout::box_spacing::{
    collapse_margins, resolve_box_spacing, translate_negative_margins,
};
use droid_layout::controller::{
    assign_ids, classify_views, constrain_views, dimension_views, space_views, wrap_views,
};
use droid_layout::node::{Attr, ContainerType, ViewOrigin};
use droid_layout::{ConversionConfig, ConversionSession, ViewId, ViewTree};
use proptest::prelude::*;

/// Helper: a vertical LinearLayout stacking one child per margin set.
fn stack(margins: &[Edges]) -> (ViewTree, ViewId, Vec<ViewId>) {
    let mut tree = ViewTree::new();
    let parent = tree.alloc(ViewOrigin::Source, "div");
    tree.set_control_type(parent, ContainerType::Linear);
    let _ = tree[parent].attributes.set(Attr::Orientation, "vertical");
    let children = margins
        .iter()
        .enumerate()
        .map(|(i, margin)| {
            let child = tree.alloc(ViewOrigin::Source, "p");
            let top = i as f64 * 20.0;
            let bounds = BoxRect::new(0.0, top, 100.0, 20.0);
            tree[child].set_geometry(bounds, margin, &Edges::default());
            tree[child].parent = Some(parent);
            tree.append_render_child(parent, child);
            child
        })
        .collect();
    (tree, parent, children)
}

fn session(target_api: u32) -> ConversionSession {
    ConversionSession::new(ConversionConfig {
        target_api,
        ..ConversionConfig::default()
    })
}

fn attr(tree: &ViewTree, id: ViewId, attr: Attr) -> Option<String> {
    tree[id].attributes.get(attr).map(str::to_string)
}

// ========== Collapsing ==========

#[test]
fn test_collapse_margins() {
    assert_eq!(collapse_margins(10.0, 20.0), 20.0);
    assert_eq!(collapse_margins(-5.0, -10.0), -10.0);
    assert_eq!(collapse_margins(10.0, -4.0), 6.0);
    assert_eq!(collapse_margins(0.0, 0.0), 0.0);
}

proptest! {
    #[test]
    fn test_collapse_margins_is_symmetric(a in -100.0f64..100.0, b in -100.0f64..100.0) {
        prop_assert_eq!(collapse_margins(a, b), collapse_margins(b, a));
    }
}

// ========== Edge attributes ==========

#[test]
fn test_uniform_margin_is_one_attribute() {
    let (mut tree, _, children) = stack(&[Edges::uniform(8.0)]);
    resolve_box_spacing(&mut tree, &session(30), children[0]);
    assert_eq!(attr(&tree, children[0], Attr::LayoutMargin).as_deref(), Some("8px"));
    assert_eq!(attr(&tree, children[0], Attr::LayoutMarginTop), None);
}

#[test]
fn test_axis_shorthand_needs_oreo() {
    let margin = Edges::new(4.0, 6.0, 4.0, 6.0);
    let (mut tree, _, children) = stack(&[margin]);
    resolve_box_spacing(&mut tree, &session(26), children[0]);
    let view = children[0];
    assert_eq!(attr(&tree, view, Attr::LayoutMarginVertical).as_deref(), Some("4px"));
    assert_eq!(attr(&tree, view, Attr::LayoutMarginHorizontal).as_deref(), Some("6px"));

    let (mut tree, _, children) = stack(&[margin]);
    resolve_box_spacing(&mut tree, &session(21), children[0]);
    let view = children[0];
    assert_eq!(attr(&tree, view, Attr::LayoutMarginVertical), None);
    assert_eq!(attr(&tree, view, Attr::LayoutMarginTop).as_deref(), Some("4px"));
    assert_eq!(attr(&tree, view, Attr::LayoutMarginBottom).as_deref(), Some("4px"));
    assert_eq!(attr(&tree, view, Attr::LayoutMarginLeft).as_deref(), Some("6px"));
    assert_eq!(attr(&tree, view, Attr::LayoutMarginRight).as_deref(), Some("6px"));
}

#[test]
fn test_zero_edges_are_omitted() {
    let (mut tree, _, children) = stack(&[Edges::new(0.0, 0.0, 12.0, 0.0)]);
    resolve_box_spacing(&mut tree, &session(30), children[0]);
    let attributes = &tree[children[0]].attributes;
    assert_eq!(attributes.get(Attr::LayoutMarginBottom), Some("12px"));
    assert_eq!(attributes.len(), 1);
}

#[test]
fn test_border_widths_join_padding() {
    let (mut tree, _, children) = stack(&[Edges::default()]);
    let view = &mut tree[children[0]];
    view.border = Edges::uniform(2.0);
    for side in ["top", "right", "bottom", "left"] {
        let _ = view.styles.set(&format!("border-{side}-style"), "solid");
    }
    view.set_geometry(
        BoxRect::new(0.0, 0.0, 100.0, 20.0),
        &Edges::default(),
        &Edges::uniform(3.0),
    );
    resolve_box_spacing(&mut tree, &session(30), children[0]);
    assert_eq!(attr(&tree, children[0], Attr::Padding).as_deref(), Some("5px"));
}

#[test]
fn test_toggle_inset_reduces_vertical_margin() {
    let (mut tree, _, children) = stack(&[Edges::new(6.0, 0.0, 6.0, 0.0)]);
    tree.set_control_type(children[0], ContainerType::Checkbox);
    resolve_box_spacing(&mut tree, &session(30), children[0]);
    assert_eq!(attr(&tree, children[0], Attr::LayoutMarginVertical).as_deref(), Some("2px"));
}

// ========== Translations ==========

#[test]
fn test_negative_top_margin_moves_later_siblings() {
    let (mut tree, _, children) = stack(&[
        Edges::new(-10.0, 0.0, 0.0, 0.0),
        Edges::default(),
        Edges::default(),
    ]);
    let config = session(30);
    for &child in &children {
        translate_negative_margins(&mut tree, child);
    }
    for &child in &children {
        resolve_box_spacing(&mut tree, &config, child);
    }
    for &child in &children {
        assert_eq!(attr(&tree, child, Attr::TranslationY).as_deref(), Some("-10px"));
    }
    assert_eq!(attr(&tree, children[0], Attr::LayoutMarginTop), None);
}

#[test]
fn test_negative_bottom_margin_moves_only_successors() {
    let (mut tree, _, children) = stack(&[Edges::new(0.0, 0.0, -6.0, 0.0), Edges::default()]);
    translate_negative_margins(&mut tree, children[0]);
    assert_eq!(tree[children[0]].translate_y, 0.0);
    assert_eq!(tree[children[1]].translate_y, -6.0);
}

#[test]
fn test_translation_is_applied_once() {
    let (mut tree, _, children) = stack(&[Edges::new(-4.0, 0.0, 0.0, 0.0), Edges::default()]);
    translate_negative_margins(&mut tree, children[0]);
    translate_negative_margins(&mut tree, children[0]);
    assert_eq!(tree[children[0]].translate_y, -4.0);
    assert_eq!(tree[children[1]].translate_y, -4.0);
}

#[test]
fn test_relative_offset_becomes_translation() {
    let (mut tree, _, children) = stack(&[Edges::default()]);
    let view = &mut tree[children[0]];
    view.facts.position = PositionScheme::Relative;
    let _ = view.styles.set("top", "5px");
    let _ = view.styles.set("right", "7px");
    resolve_box_spacing(&mut tree, &session(30), children[0]);
    assert_eq!(attr(&tree, children[0], Attr::TranslationY).as_deref(), Some("5px"));
    assert_eq!(attr(&tree, children[0], Attr::TranslationX).as_deref(), Some("-7px"));
}

// ========== Idempotence ==========

fn arb_edges() -> impl Strategy<Value = Edges> {
    (-20i32..20, -20i32..20, -20i32..20, -20i32..20).prop_map(|(t, r, b, l)| {
        Edges::new(f64::from(t), f64::from(r), f64::from(b), f64::from(l))
    })
}

proptest! {
    #[test]
    fn test_spacing_pass_is_idempotent(margins in prop::collection::vec(arb_edges(), 1..5)) {
        let (mut tree, _, children) = stack(&margins);
        let config = session(30);
        let pass = |tree: &mut ViewTree| {
            for &child in &children {
                translate_negative_margins(tree, child);
            }
            for &child in &children {
                resolve_box_spacing(tree, &config, child);
            }
        };
        pass(&mut tree);
        let first: Vec<_> = children.iter().map(|&c| tree[c].attributes.clone()).collect();
        pass(&mut tree);
        let second: Vec<_> = children.iter().map(|&c| tree[c].attributes.clone()).collect();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn test_space_views_is_idempotent_after_conversion() {
    let source = SourceTree::from_json(
        r#"{
            "tag": "div",
            "bounds": {"left": 0, "top": 0, "width": 300, "height": 60},
            "children": [
                {"tag": "div", "text": "one",
                 "bounds": {"left": 0, "top": -10, "width": 300, "height": 20},
                 "margin": {"top": -10, "left": 8},
                 "padding": {"top": 2, "right": 2, "bottom": 2, "left": 2}},
                {"tag": "div", "text": "two",
                 "bounds": {"left": 0, "top": 10, "width": 300, "height": 20},
                 "margin": {"bottom": 4}},
                {"tag": "div", "text": "three",
                 "bounds": {"left": 0, "top": 34, "width": 300, "height": 20}}
            ]
        }"#,
    )
    .expect("valid source");
    let mut tree = ViewTree::from_source(&source);
    let mut session = ConversionSession::new(ConversionConfig::default());
    classify_views(&mut tree, &mut session);
    wrap_views(&mut tree, &mut session);
    assign_ids(&mut tree, &mut session);
    constrain_views(&mut tree, &mut session);
    dimension_views(&mut tree, &mut session);
    space_views(&mut tree, &session);

    let snapshot = |tree: &ViewTree| {
        tree.iter()
            .map(|view| (view.attributes.clone(), view.translate_x, view.translate_y))
            .collect::<Vec<_>>()
    };
    let first = snapshot(&tree);
    space_views(&mut tree, &session);
    assert_eq!(first, snapshot(&tree));
}
