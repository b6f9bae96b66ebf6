//! End-to-end conversions from rendered source trees.

use droid_dom::SourceTree;
use droid_layout::{ContainerType, ConversionConfig, LayoutDocument, RenderedView, convert};

/// Convert `json` with left/right attributes kept.
fn convert_json(json: &str) -> LayoutDocument {
    let source = SourceTree::from_json(json).expect("valid source");
    let config = ConversionConfig {
        support_rtl: false,
        ..ConversionConfig::default()
    };
    convert(&source, config)
}

fn view<'a>(document: &'a LayoutDocument, id: &str) -> &'a RenderedView {
    document
        .find(id)
        .unwrap_or_else(|| panic!("no view `{id}` in {:#?}", document.root))
}

fn root(document: &LayoutDocument) -> &RenderedView {
    document.root.as_ref().expect("converted root")
}

// ========== Rows ==========

#[test]
fn test_percent_row_becomes_percent_constraints() {
    let document = convert_json(
        r#"{
            "tag": "div",
            "bounds": {"left": 0, "top": 0, "width": 300, "height": 20},
            "children": [
                {"tag": "span", "attrs": {"id": "first"},
                 "styles": {"display": "inline-block", "width": "30%"},
                 "bounds": {"left": 0, "top": 0, "width": 90, "height": 20}},
                {"tag": "span", "attrs": {"id": "second"},
                 "styles": {"display": "inline-block", "width": "70%"},
                 "bounds": {"left": 90, "top": 0, "width": 210, "height": 20}}
            ]
        }"#,
    );
    assert_eq!(root(&document).container_type, ContainerType::Constraint);

    let first = view(&document, "first");
    assert_eq!(first.layout_width, "0px");
    assert_eq!(first.layout_height, "20px");
    assert_eq!(first.attr("app:layout_constraintWidth_percent"), Some("0.3"));
    assert_eq!(first.attr("app:layout_constraintLeft_toLeftOf"), Some("parent"));

    let second = view(&document, "second");
    assert_eq!(second.layout_width, "0px");
    assert_eq!(second.attr("app:layout_constraintWidth_percent"), Some("0.7"));
    assert_eq!(second.attr("app:layout_constraintLeft_toRightOf"), Some("@id/first"));
    assert_eq!(second.attr("app:layout_constraintRight_toRightOf"), Some("parent"));
}

#[test]
fn test_float_row_anchors_around_gap() {
    let document = convert_json(
        r#"{
            "tag": "div",
            "bounds": {"left": 0, "top": 0, "width": 300, "height": 20},
            "children": [
                {"tag": "div", "attrs": {"id": "a"},
                 "styles": {"float": "left", "width": "50px"},
                 "bounds": {"left": 0, "top": 0, "width": 50, "height": 20}},
                {"tag": "div", "attrs": {"id": "b"},
                 "styles": {"float": "left", "width": "50px"},
                 "bounds": {"left": 50, "top": 0, "width": 50, "height": 20}},
                {"tag": "div", "attrs": {"id": "c"},
                 "styles": {"float": "right", "width": "50px"},
                 "bounds": {"left": 250, "top": 0, "width": 50, "height": 20}}
            ]
        }"#,
    );
    assert_eq!(root(&document).container_type, ContainerType::Constraint);

    let (a, b, c) = (view(&document, "a"), view(&document, "b"), view(&document, "c"));
    assert_eq!(a.attr("app:layout_constraintLeft_toLeftOf"), Some("parent"));
    assert_eq!(b.attr("app:layout_constraintLeft_toRightOf"), Some("@id/a"));
    assert_eq!(c.attr("app:layout_constraintRight_toRightOf"), Some("parent"));
    for float in [a, b, c] {
        assert_eq!(float.attr("app:layout_constraintTop_toTopOf"), Some("parent"));
        assert_eq!(float.layout_width, "50px");
    }
}

// ========== Stacks ==========

#[test]
fn test_negative_top_margin_becomes_translation() {
    let document = convert_json(
        r#"{
            "tag": "div",
            "bounds": {"left": 0, "top": 0, "width": 300, "height": 50},
            "children": [
                {"tag": "div", "attrs": {"id": "one"}, "text": "one",
                 "bounds": {"left": 0, "top": -10, "width": 300, "height": 20},
                 "margin": {"top": -10}},
                {"tag": "div", "attrs": {"id": "two"}, "text": "two",
                 "bounds": {"left": 0, "top": 10, "width": 300, "height": 20}},
                {"tag": "div", "attrs": {"id": "three"}, "text": "three",
                 "bounds": {"left": 0, "top": 30, "width": 300, "height": 20}}
            ]
        }"#,
    );
    let stack = root(&document);
    assert_eq!(stack.container_type, ContainerType::Linear);
    assert_eq!(stack.attr("android:orientation"), Some("vertical"));

    for id in ["one", "two", "three"] {
        assert_eq!(view(&document, id).attr("android:translationY"), Some("-10px"));
    }
    assert_eq!(view(&document, "one").attr("android:layout_marginTop"), None);
}

// ========== Flexbox ==========

#[test]
fn test_centered_flex_row_is_packed_chain() {
    let document = convert_json(
        r#"{
            "tag": "div",
            "styles": {"display": "flex", "justify-content": "center"},
            "bounds": {"left": 0, "top": 0, "width": 300, "height": 20},
            "children": [
                {"tag": "span", "attrs": {"id": "a"}, "text": "a",
                 "bounds": {"left": 120, "top": 0, "width": 20, "height": 20}},
                {"tag": "span", "attrs": {"id": "b"}, "text": "b",
                 "bounds": {"left": 140, "top": 0, "width": 20, "height": 20}},
                {"tag": "span", "attrs": {"id": "c"}, "text": "c",
                 "bounds": {"left": 160, "top": 0, "width": 20, "height": 20}}
            ]
        }"#,
    );
    let head = view(&document, "a");
    assert_eq!(head.attr("app:layout_constraintHorizontal_chainStyle"), Some("packed"));
    assert_eq!(head.attr("app:layout_constraintHorizontal_bias"), Some("0.5"));
    assert_eq!(view(&document, "b").attr("app:layout_constraintLeft_toRightOf"), Some("@id/a"));
}

#[test]
fn test_flex_grow_becomes_weights() {
    let document = convert_json(
        r#"{
            "tag": "div",
            "styles": {"display": "flex"},
            "bounds": {"left": 0, "top": 0, "width": 300, "height": 20},
            "children": [
                {"tag": "div", "attrs": {"id": "narrow"}, "text": "narrow",
                 "styles": {"flex-grow": "1"},
                 "bounds": {"left": 0, "top": 0, "width": 100, "height": 20}},
                {"tag": "div", "attrs": {"id": "wide"}, "text": "wide",
                 "styles": {"flex-grow": "2"},
                 "bounds": {"left": 100, "top": 0, "width": 200, "height": 20}}
            ]
        }"#,
    );
    let (narrow, wide) = (view(&document, "narrow"), view(&document, "wide"));
    assert_eq!(narrow.attr("app:layout_constraintHorizontal_chainStyle"), Some("spread"));
    assert_eq!(narrow.attr("app:layout_constraintHorizontal_weight"), Some("0.5"));
    assert_eq!(wide.attr("app:layout_constraintHorizontal_weight"), Some("1"));
    assert_eq!(narrow.layout_width, "0px");
    assert_eq!(wide.layout_width, "0px");
}

// ========== Grid and table ==========

#[test]
fn test_css_grid_places_items_by_track() {
    let document = convert_json(
        r#"{
            "tag": "div", "attrs": {"id": "grid"},
            "styles": {"display": "grid", "grid-template-columns": "1fr 1fr"},
            "bounds": {"left": 0, "top": 0, "width": 300, "height": 40},
            "children": [
                {"tag": "div", "attrs": {"id": "g0"}, "text": "0",
                 "bounds": {"left": 0, "top": 0, "width": 150, "height": 20}},
                {"tag": "div", "attrs": {"id": "g1"}, "text": "1",
                 "bounds": {"left": 150, "top": 0, "width": 150, "height": 20}},
                {"tag": "div", "attrs": {"id": "g2"}, "text": "2",
                 "bounds": {"left": 0, "top": 20, "width": 150, "height": 20}},
                {"tag": "div", "attrs": {"id": "g3"}, "text": "3",
                 "bounds": {"left": 150, "top": 20, "width": 150, "height": 20}}
            ]
        }"#,
    );
    let grid = view(&document, "grid");
    assert_eq!(grid.container_type, ContainerType::Grid);
    assert_eq!(grid.attr("android:columnCount"), Some("2"));
    assert_eq!(grid.attr("android:rowCount"), Some("2"));
    assert_eq!(grid.children.len(), 4);

    let last = view(&document, "g3");
    assert_eq!(last.attr("android:layout_row"), Some("1"));
    assert_eq!(last.attr("android:layout_column"), Some("1"));
    for id in ["g0", "g1", "g2", "g3"] {
        let item = view(&document, id);
        assert_eq!(item.attr("android:layout_columnWeight"), Some("1"));
        assert_eq!(item.layout_width, "0px");
        assert_eq!(
            item.attr("android:layout_gravity"),
            Some("fill_horizontal|fill_vertical")
        );
    }
}

#[test]
fn test_unsupported_track_list_warns_once() {
    let document = convert_json(
        r#"{
            "tag": "div",
            "styles": {"display": "grid", "grid-template-columns": "repeat(auto-fill, 100px)"},
            "bounds": {"left": 0, "top": 0, "width": 300, "height": 20},
            "children": [
                {"tag": "div", "text": "0",
                 "bounds": {"left": 0, "top": 0, "width": 100, "height": 20}},
                {"tag": "div", "text": "1",
                 "bounds": {"left": 100, "top": 0, "width": 100, "height": 20}}
            ]
        }"#,
    );
    let grid_warnings: Vec<_> = document
        .warnings
        .iter()
        .filter(|warning| warning.starts_with("[grid]"))
        .collect();
    assert_eq!(grid_warnings.len(), 1);
    assert!(grid_warnings[0].contains("repeat(auto-fill, 100px)"));
}

#[test]
fn test_table_cells_span_columns() {
    let document = convert_json(
        r#"{
            "tag": "table", "attrs": {"id": "table"},
            "bounds": {"left": 0, "top": 0, "width": 206, "height": 46},
            "children": [
                {"tag": "tr",
                 "bounds": {"left": 2, "top": 2, "width": 202, "height": 20},
                 "children": [
                    {"tag": "td", "attrs": {"id": "a"}, "text": "a",
                     "bounds": {"left": 2, "top": 2, "width": 100, "height": 20}},
                    {"tag": "td", "attrs": {"id": "b"}, "text": "b",
                     "bounds": {"left": 104, "top": 2, "width": 100, "height": 20}}
                 ]},
                {"tag": "tr",
                 "bounds": {"left": 2, "top": 24, "width": 202, "height": 20},
                 "children": [
                    {"tag": "td", "attrs": {"id": "c", "colspan": "2"}, "text": "c",
                     "bounds": {"left": 2, "top": 24, "width": 202, "height": 20}}
                 ]}
            ]
        }"#,
    );
    let table = view(&document, "table");
    assert_eq!(table.container_type, ContainerType::Grid);
    assert_eq!(table.attr("android:columnCount"), Some("2"));
    assert_eq!(table.attr("android:rowCount"), Some("2"));
    // Rows dissolve; cells are direct children.
    assert_eq!(table.children.len(), 3);

    let c = view(&document, "c");
    assert_eq!(c.attr("android:layout_row"), Some("1"));
    assert_eq!(c.attr("android:layout_column"), Some("0"));
    assert_eq!(c.attr("android:layout_columnSpan"), Some("2"));
    assert_eq!(c.attr("android:layout_margin"), Some("2px"));
    assert_eq!(view(&document, "a").attr("android:layout_columnSpan"), None);
}

// ========== Document ==========

#[test]
fn test_empty_source_has_no_root() {
    let document = convert(&SourceTree::new(), ConversionConfig::default());
    assert!(document.root.is_none());
    assert!(document.views().is_empty());
    assert_eq!(document.target_api, 30);
}

#[test]
fn test_ids_are_unique() {
    let document = convert_json(
        r#"{
            "tag": "div",
            "bounds": {"left": 0, "top": 0, "width": 300, "height": 40},
            "children": [
                {"tag": "div", "attrs": {"id": "item"}, "text": "one",
                 "bounds": {"left": 0, "top": 0, "width": 300, "height": 20}},
                {"tag": "div", "attrs": {"id": "item"}, "text": "two",
                 "bounds": {"left": 0, "top": 20, "width": 300, "height": 20}}
            ]
        }"#,
    );
    let mut ids: Vec<&str> = document
        .views()
        .iter()
        .map(|view| view.control_id.as_str())
        .collect();
    let total = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), total);
    assert!(document.find("item").is_some());
}

#[test]
fn test_json_output_names_fields() {
    let document = convert_json(
        r#"{
            "tag": "div", "attrs": {"id": "only"}, "text": "hi",
            "bounds": {"left": 0, "top": 0, "width": 40, "height": 20}
        }"#,
    );
    let json = document.to_json().expect("serializable document");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["target_api"], 30);
    assert_eq!(value["root"]["control_id"], "only");
    assert!(value["root"]["layout_width"].is_string());
}

// ========== Negative margins between siblings ==========

#[test]
fn test_negative_right_margin_moves_next_item_once() {
    let document = convert_json(
        r#"{
            "tag": "div",
            "bounds": {"left": 0, "top": 0, "width": 300, "height": 20},
            "children": [
                {"tag": "span", "attrs": {"id": "a"},
                 "styles": {"display": "inline-block", "width": "30%"},
                 "margin": {"right": -20},
                 "bounds": {"left": 0, "top": 0, "width": 90, "height": 20}},
                {"tag": "span", "attrs": {"id": "b"},
                 "styles": {"display": "inline-block", "width": "70%"},
                 "bounds": {"left": 70, "top": 0, "width": 210, "height": 20}}
            ]
        }"#,
    );
    assert_eq!(root(&document).container_type, ContainerType::Constraint);

    let (a, b) = (view(&document, "a"), view(&document, "b"));
    assert_eq!(b.attr("app:layout_constraintLeft_toRightOf"), Some("@id/a"));
    assert_eq!(b.attr("android:translationX"), Some("-20px"));
    assert_eq!(b.attr("android:layout_marginLeft"), None);
    assert_eq!(a.attr("android:translationX"), None);
    assert_eq!(a.attr("android:layout_marginRight"), None);
}

#[test]
fn test_negative_margin_between_floats_moves_next_float_once() {
    let document = convert_json(
        r#"{
            "tag": "div",
            "bounds": {"left": 0, "top": 0, "width": 300, "height": 20},
            "children": [
                {"tag": "div", "attrs": {"id": "a"},
                 "styles": {"float": "left", "width": "100px"},
                 "margin": {"right": -20},
                 "bounds": {"left": 0, "top": 0, "width": 100, "height": 20}},
                {"tag": "div", "attrs": {"id": "b"},
                 "styles": {"float": "left", "width": "50px"},
                 "bounds": {"left": 80, "top": 0, "width": 50, "height": 20}},
                {"tag": "div", "attrs": {"id": "c"},
                 "styles": {"float": "right", "width": "50px"},
                 "bounds": {"left": 250, "top": 0, "width": 50, "height": 20}}
            ]
        }"#,
    );
    let (a, b) = (view(&document, "a"), view(&document, "b"));
    assert_eq!(b.attr("app:layout_constraintLeft_toRightOf"), Some("@id/a"));
    assert_eq!(b.attr("android:translationX"), Some("-20px"));
    assert_eq!(a.attr("android:translationX"), None);
}

// ========== Absolute children ==========

#[test]
fn test_percent_offsets_hang_from_guidelines() {
    let document = convert_json(
        r#"{
            "tag": "div", "attrs": {"id": "stage"},
            "bounds": {"left": 0, "top": 0, "width": 400, "height": 200},
            "children": [
                {"tag": "div", "attrs": {"id": "body"}, "text": "body",
                 "bounds": {"left": 0, "top": 0, "width": 400, "height": 20}},
                {"tag": "div", "attrs": {"id": "badge"}, "text": "!",
                 "styles": {"position": "absolute", "left": "50%", "top": "25%"},
                 "bounds": {"left": 200, "top": 50, "width": 40, "height": 20}}
            ]
        }"#,
    );
    assert_eq!(view(&document, "stage").container_type, ContainerType::Constraint);

    let across = view(&document, "guideline_1");
    assert_eq!(across.container_type, ContainerType::Guideline);
    assert_eq!(across.attr("android:orientation"), Some("vertical"));
    assert_eq!(across.attr("app:layout_constraintGuide_percent"), Some("0.5"));

    let down = view(&document, "guideline_2");
    assert_eq!(down.attr("android:orientation"), Some("horizontal"));
    assert_eq!(down.attr("app:layout_constraintGuide_percent"), Some("0.25"));

    let badge = view(&document, "badge");
    assert_eq!(
        badge.attr("app:layout_constraintLeft_toLeftOf"),
        Some("@id/guideline_1")
    );
    assert_eq!(badge.attr("app:layout_constraintTop_toTopOf"), Some("@id/guideline_2"));
    assert_eq!(badge.attr("android:layout_marginLeft"), None);
    assert_eq!(badge.attr("android:layout_marginTop"), None);
}

#[test]
fn test_pixel_offsets_anchor_to_parent() {
    let document = convert_json(
        r#"{
            "tag": "div",
            "bounds": {"left": 0, "top": 0, "width": 400, "height": 200},
            "children": [
                {"tag": "div", "text": "body",
                 "bounds": {"left": 0, "top": 0, "width": 400, "height": 20}},
                {"tag": "div", "attrs": {"id": "badge"}, "text": "!",
                 "styles": {"position": "absolute", "left": "30px", "top": "10px"},
                 "bounds": {"left": 30, "top": 10, "width": 40, "height": 20}}
            ]
        }"#,
    );
    let badge = view(&document, "badge");
    assert_eq!(badge.attr("app:layout_constraintLeft_toLeftOf"), Some("parent"));
    assert_eq!(badge.attr("android:layout_marginLeft"), Some("30px"));
    assert!(document.find("guideline_1").is_none());
}

// ========== Grid limits ==========

#[test]
fn test_huge_grid_span_is_clamped() {
    let document = convert_json(
        r#"{
            "tag": "div", "attrs": {"id": "grid"},
            "styles": {"display": "grid", "grid-template-columns": "1fr 1fr"},
            "bounds": {"left": 0, "top": 0, "width": 300, "height": 40},
            "children": [
                {"tag": "div", "attrs": {"id": "wide"}, "text": "wide",
                 "styles": {"grid-column-start": "span 4000000000"},
                 "bounds": {"left": 0, "top": 0, "width": 300, "height": 20}},
                {"tag": "div", "attrs": {"id": "next"}, "text": "next",
                 "bounds": {"left": 0, "top": 20, "width": 150, "height": 20}}
            ]
        }"#,
    );
    let grid = view(&document, "grid");
    assert_eq!(grid.container_type, ContainerType::Grid);
    assert_eq!(grid.attr("android:columnCount"), Some("1000"));

    let wide = view(&document, "wide");
    assert_eq!(wide.attr("android:layout_columnSpan"), Some("1000"));
    let next = view(&document, "next");
    assert_eq!(next.attr("android:layout_row"), Some("1"));
    assert_eq!(next.attr("android:layout_column"), Some("0"));
}
