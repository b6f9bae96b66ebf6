//! Tests for wrapping adapters and multi-column containers.

use droid_dom::SourceTree;
use droid_layout::{ContainerType, ConversionConfig, LayoutDocument, RenderedView, convert};

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

/// The element holding `id` in the output.
fn parent_of<'a>(document: &'a LayoutDocument, id: &str) -> &'a RenderedView {
    document
        .views()
        .into_iter()
        .find(|view| view.children.iter().any(|child| child.control_id == id))
        .unwrap_or_else(|| panic!("`{id}` has no parent"))
}

fn child_ids(view: &RenderedView) -> Vec<&str> {
    view.children
        .iter()
        .map(|child| child.control_id.as_str())
        .collect()
}

// ========== Percent margins ==========

#[test]
fn test_percent_margin_hangs_from_guideline() {
    let document = convert_json(
        r#"{
            "tag": "div",
            "bounds": {"left": 0, "top": 0, "width": 300, "height": 40},
            "children": [
                {"tag": "div", "attrs": {"id": "indented"}, "text": "indented",
                 "styles": {"margin-left": "10%"},
                 "bounds": {"left": 30, "top": 0, "width": 270, "height": 20}},
                {"tag": "div", "attrs": {"id": "plain"}, "text": "plain",
                 "bounds": {"left": 0, "top": 20, "width": 300, "height": 20}}
            ]
        }"#,
    );
    let wrapper = parent_of(&document, "indented");
    assert_eq!(wrapper.container_type, ContainerType::Constraint);
    assert!(child_ids(wrapper).contains(&"guideline_1"));

    let guideline = view(&document, "guideline_1");
    assert_eq!(guideline.container_type, ContainerType::Guideline);
    assert_eq!(guideline.attr("app:layout_constraintGuide_percent"), Some("0.1"));

    let indented = view(&document, "indented");
    assert_eq!(
        indented.attr("app:layout_constraintLeft_toLeftOf"),
        Some("@id/guideline_1")
    );
    assert_eq!(indented.attr("app:layout_constraintRight_toRightOf"), Some("parent"));
    assert_eq!(indented.attr("android:layout_marginLeft"), None);

    // The unwrapped sibling stays in the original container.
    assert_ne!(parent_of(&document, "plain").control_id, wrapper.control_id);
}

// ========== Max sizes ==========

#[test]
fn test_max_width_outside_constraint_layout_is_wrapped() {
    let document = convert_json(
        r#"{
            "tag": "div",
            "bounds": {"left": 0, "top": 0, "width": 300, "height": 60},
            "children": [
                {"tag": "div", "attrs": {"id": "capped"},
                 "styles": {"max-width": "100px"},
                 "bounds": {"left": 0, "top": 0, "width": 100, "height": 40},
                 "children": [
                    {"tag": "div", "text": "one",
                     "bounds": {"left": 0, "top": 0, "width": 100, "height": 20}},
                    {"tag": "div", "text": "two",
                     "bounds": {"left": 0, "top": 20, "width": 100, "height": 20}}
                 ]},
                {"tag": "div", "text": "after",
                 "bounds": {"left": 0, "top": 40, "width": 300, "height": 20}}
            ]
        }"#,
    );
    let wrapper = parent_of(&document, "capped");
    assert_eq!(wrapper.container_type, ContainerType::Constraint);
    assert_eq!(child_ids(wrapper), vec!["capped"]);

    let capped = view(&document, "capped");
    assert_eq!(capped.layout_width, "0px");
    assert_eq!(capped.attr("app:layout_constraintWidth_max"), Some("100px"));
    assert_eq!(capped.attr("app:layout_constraintLeft_toLeftOf"), Some("parent"));
    assert_eq!(capped.attr("app:layout_constraintRight_toRightOf"), Some("parent"));
    assert_eq!(capped.attr("app:layout_constraintHorizontal_bias"), Some("0"));
}

#[test]
fn test_max_width_of_text_needs_no_wrapper() {
    let document = convert_json(
        r#"{
            "tag": "div",
            "bounds": {"left": 0, "top": 0, "width": 300, "height": 40},
            "children": [
                {"tag": "div", "attrs": {"id": "label"}, "text": "label",
                 "styles": {"max-width": "100px"},
                 "bounds": {"left": 0, "top": 0, "width": 100, "height": 20}},
                {"tag": "div", "text": "after",
                 "bounds": {"left": 0, "top": 20, "width": 300, "height": 20}}
            ]
        }"#,
    );
    let label = view(&document, "label");
    assert_eq!(label.container_type, ContainerType::Text);
    assert_eq!(label.attr("android:maxWidth"), Some("100px"));
    assert_ne!(parent_of(&document, "label").container_type, ContainerType::Constraint);
}

// ========== Overflow and absolute children ==========

#[test]
fn test_left_overflow_moves_child_to_wrapper() {
    let document = convert_json(
        r#"{
            "tag": "div",
            "bounds": {"left": 0, "top": 0, "width": 300, "height": 60},
            "children": [
                {"tag": "div", "attrs": {"id": "box"},
                 "bounds": {"left": 0, "top": 0, "width": 300, "height": 40},
                 "children": [
                    {"tag": "div", "attrs": {"id": "overflow"}, "text": "overflow",
                     "bounds": {"left": -20, "top": 0, "width": 100, "height": 20}},
                    {"tag": "div", "attrs": {"id": "inside"}, "text": "inside",
                     "bounds": {"left": 0, "top": 20, "width": 300, "height": 20}}
                 ]},
                {"tag": "div", "text": "after",
                 "bounds": {"left": 0, "top": 40, "width": 300, "height": 20}}
            ]
        }"#,
    );
    let wrapper = parent_of(&document, "overflow");
    assert_eq!(wrapper.container_type, ContainerType::Constraint);
    assert_eq!(child_ids(wrapper), vec!["box", "overflow"]);
    assert_eq!(parent_of(&document, "inside").control_id, "box");

    let overflow = view(&document, "overflow");
    assert_eq!(overflow.attr("app:layout_constraintLeft_toLeftOf"), Some("parent"));
    assert_eq!(overflow.attr("app:layout_constraintTop_toTopOf"), Some("parent"));
}

#[test]
fn test_absolute_child_of_grid_moves_to_wrapper() {
    let document = convert_json(
        r#"{
            "tag": "div",
            "bounds": {"left": 0, "top": 0, "width": 300, "height": 60},
            "children": [
                {"tag": "div", "attrs": {"id": "grid"},
                 "styles": {"display": "grid", "grid-template-columns": "1fr 1fr"},
                 "bounds": {"left": 0, "top": 0, "width": 300, "height": 20},
                 "children": [
                    {"tag": "div", "text": "a",
                     "bounds": {"left": 0, "top": 0, "width": 150, "height": 20}},
                    {"tag": "div", "text": "b",
                     "bounds": {"left": 150, "top": 0, "width": 150, "height": 20}},
                    {"tag": "div", "attrs": {"id": "badge"}, "text": "!",
                     "styles": {"position": "absolute", "left": "10px", "top": "5px"},
                     "bounds": {"left": 10, "top": 5, "width": 20, "height": 20}}
                 ]},
                {"tag": "div", "text": "after",
                 "bounds": {"left": 0, "top": 40, "width": 300, "height": 20}}
            ]
        }"#,
    );
    let wrapper = parent_of(&document, "badge");
    assert_eq!(wrapper.container_type, ContainerType::Constraint);
    assert_eq!(child_ids(wrapper), vec!["grid", "badge"]);

    let grid = view(&document, "grid");
    assert_eq!(grid.container_type, ContainerType::Grid);
    assert_eq!(grid.children.len(), 2);

    let badge = view(&document, "badge");
    assert_eq!(badge.attr("app:layout_constraintLeft_toLeftOf"), Some("parent"));
    assert_eq!(badge.attr("app:layout_constraintTop_toTopOf"), Some("parent"));
}

// ========== Multi-column ==========

#[test]
fn test_columns_hang_between_guidelines() {
    let document = convert_json(
        r#"{
            "tag": "div", "attrs": {"id": "columns"},
            "styles": {"column-count": "2"},
            "bounds": {"left": 0, "top": 0, "width": 300, "height": 40},
            "children": [
                {"tag": "p", "attrs": {"id": "p1"}, "text": "one",
                 "bounds": {"left": 0, "top": 0, "width": 140, "height": 20}},
                {"tag": "p", "attrs": {"id": "p2"}, "text": "two",
                 "bounds": {"left": 0, "top": 20, "width": 140, "height": 20}},
                {"tag": "p", "attrs": {"id": "p3"}, "text": "three",
                 "bounds": {"left": 160, "top": 0, "width": 140, "height": 20}}
            ]
        }"#,
    );
    let columns = view(&document, "columns");
    assert_eq!(columns.container_type, ContainerType::Constraint);

    let guideline = view(&document, "guideline_1");
    assert_eq!(guideline.attr("app:layout_constraintGuide_percent"), Some("0.533"));

    let (p1, p2, p3) = (view(&document, "p1"), view(&document, "p2"), view(&document, "p3"));
    assert_eq!(p1.attr("app:layout_constraintLeft_toLeftOf"), Some("parent"));
    assert_eq!(p1.attr("app:layout_constraintRight_toLeftOf"), Some("@id/guideline_1"));
    assert_eq!(p1.attr("app:layout_constraintTop_toTopOf"), Some("parent"));
    assert_eq!(p2.attr("app:layout_constraintTop_toBottomOf"), Some("@id/p1"));
    assert_eq!(p3.attr("app:layout_constraintLeft_toRightOf"), Some("@id/guideline_1"));
    assert_eq!(p3.attr("app:layout_constraintRight_toRightOf"), Some("parent"));
    assert_eq!(p3.attr("app:layout_constraintTop_toTopOf"), Some("parent"));
}
