//! Tests for the layout XML writer.

use std::collections::BTreeMap;

use droid_layout::{ContainerType, LayoutDocument, RenderedView};
use droid_xml::{escape, write_layout};

/// Helper: a view with `attributes` given as `(namespace, name, value)`.
fn rendered(
    container_type: ContainerType,
    control_id: &str,
    attributes: &[(&str, &str, &str)],
    children: Vec<RenderedView>,
) -> RenderedView {
    let mut namespaced: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    for (namespace, name, value) in attributes {
        let _ = namespaced
            .entry((*namespace).to_string())
            .or_default()
            .insert((*name).to_string(), (*value).to_string());
    }
    RenderedView {
        control_name: container_type.control_name().to_string(),
        control_id: control_id.to_string(),
        document_id: format!("@id/{control_id}"),
        container_type,
        layout_width: "match_parent".to_string(),
        layout_height: "wrap_content".to_string(),
        attributes: namespaced,
        children,
    }
}

fn document(root: RenderedView) -> LayoutDocument {
    LayoutDocument {
        root: Some(root),
        target_api: 30,
        warnings: Vec::new(),
    }
}

// ========== Escaping ==========

#[test]
fn test_escape_special_characters() {
    assert_eq!(escape("a & b"), "a &amp; b");
    assert_eq!(escape("<tag>"), "&lt;tag&gt;");
    assert_eq!(escape(r#"say "hi""#), "say &quot;hi&quot;");
    assert_eq!(escape("it's"), "it&apos;s");
    assert_eq!(escape("plain"), "plain");
}

// ========== Documents ==========

#[test]
fn test_empty_document_is_declaration_only() {
    let empty = LayoutDocument {
        root: None,
        target_api: 30,
        warnings: Vec::new(),
    };
    assert_eq!(
        write_layout(&empty),
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n"
    );
}

#[test]
fn test_single_view_layout() {
    let text = rendered(ContainerType::Text, "title", &[("android", "text", "Hi")], vec![]);
    let xml = write_layout(&document(text));
    let expected = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
        <TextView\n    \
        xmlns:android=\"http://schemas.android.com/apk/res/android\"\n    \
        android:id=\"@+id/title\"\n    \
        android:layout_width=\"match_parent\"\n    \
        android:layout_height=\"wrap_content\"\n    \
        android:text=\"Hi\" />\n";
    assert_eq!(xml, expected);
}

#[test]
fn test_namespaces_declared_once_on_root() {
    let child = rendered(
        ContainerType::Text,
        "child",
        &[("app", "layout_constraintTop_toTopOf", "parent")],
        vec![],
    );
    let root = rendered(ContainerType::Constraint, "root", &[], vec![child]);
    let xml = write_layout(&document(root));

    assert!(xml.contains("<androidx.constraintlayout.widget.ConstraintLayout\n"));
    assert_eq!(xml.matches("xmlns:android=").count(), 1);
    assert_eq!(xml.matches("xmlns:app=").count(), 1);
    assert!(xml.contains("xmlns:app=\"http://schemas.android.com/apk/res-auto\""));
    assert!(xml.contains("        app:layout_constraintTop_toTopOf=\"parent\" />"));
    assert!(xml.ends_with("</androidx.constraintlayout.widget.ConstraintLayout>\n"));
}

#[test]
fn test_app_namespace_omitted_when_unused() {
    let orientation = [("android", "orientation", "vertical")];
    let root = rendered(ContainerType::Linear, "root", &orientation, vec![]);
    let xml = write_layout(&document(root));
    assert!(!xml.contains("xmlns:app"));
}

#[test]
fn test_attribute_order() {
    let view = rendered(
        ContainerType::Text,
        "ordered",
        &[
            ("_", "style", "@style/Body"),
            ("app", "layout_constraintLeft_toLeftOf", "parent"),
            ("android", "text", "x"),
            ("android", "gravity", "center"),
        ],
        vec![],
    );
    let xml = write_layout(&document(view));
    let position = |needle: &str| {
        xml.find(needle)
            .unwrap_or_else(|| panic!("`{needle}` missing from {xml}"))
    };
    let order = [
        position("android:id="),
        position("android:layout_width="),
        position("android:layout_height="),
        position("android:gravity="),
        position("android:text="),
        position("app:layout_constraintLeft_toLeftOf="),
        position("style=\"@style/Body\""),
    ];
    assert!(order.windows(2).all(|pair| pair[0] < pair[1]), "{xml}");
}

#[test]
fn test_attribute_values_are_escaped() {
    let text = [("android", "text", "a < \"b\"")];
    let view = rendered(ContainerType::Text, "quote", &text, vec![]);
    let xml = write_layout(&document(view));
    assert!(xml.contains("android:text=\"a &lt; &quot;b&quot;\""));
}

#[test]
fn test_nested_children_are_indented() {
    let leaf = rendered(ContainerType::Space, "gap", &[], vec![]);
    let middle = rendered(ContainerType::Frame, "frame", &[], vec![leaf]);
    let root = rendered(ContainerType::Linear, "root", &[], vec![middle]);
    let xml = write_layout(&document(root));
    assert!(xml.contains("\n    <FrameLayout\n"));
    assert!(xml.contains("\n        <Space\n"));
    assert!(xml.contains("\n            android:id=\"@+id/gap\""));
    assert!(xml.contains("\n    </FrameLayout>\n"));
}
