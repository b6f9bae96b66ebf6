//! Android layout XML writer.
//!
//! Turns a [`LayoutDocument`] into the XML Android Studio would write for
//! it: an XML declaration, namespace declarations on the root element, and
//! one attribute per line.
//!
//! Attribute order is fixed: `android:id`, `android:layout_width`,
//! `android:layout_height`, the remaining `android:` attributes, then
//! `app:` attributes, then unprefixed ones. Within a namespace attributes
//! are sorted by name.

use droid_layout::node::Namespace;
use droid_layout::{LayoutDocument, RenderedView};

/// Indentation of one nesting level.
const INDENT: &str = "    ";

/// Attributes written ahead of the namespace groups.
const LEADING: [&str; 3] = ["id", "layout_width", "layout_height"];

/// Serialize `document` as layout XML.
///
/// A document without a root produces only the XML declaration.
#[must_use]
pub fn write_layout(document: &LayoutDocument) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    if let Some(root) = &document.root {
        let namespaces = used_namespaces(root);
        write_view(&mut xml, root, 0, &namespaces);
    }
    xml
}

/// Namespaces any view of `root` uses, in declaration order.
fn used_namespaces(root: &RenderedView) -> Vec<Namespace> {
    let views = root.descendants();
    [Namespace::Android, Namespace::App]
        .into_iter()
        .filter(|namespace| {
            // `android:` always carries the id and sizes.
            *namespace == Namespace::Android
                || views.iter().any(|view| {
                    view.attributes
                        .get(&namespace.to_string())
                        .is_some_and(|attrs| !attrs.is_empty())
                })
        })
        .collect()
}

fn write_view(xml: &mut String, view: &RenderedView, depth: usize, namespaces: &[Namespace]) {
    let indent = INDENT.repeat(depth);
    let attr_indent = INDENT.repeat(depth + 1);
    xml.push_str(&format!("{indent}<{}", view.control_name));

    let mut lines = Vec::new();
    for namespace in namespaces {
        if let Some(uri) = namespace.uri() {
            lines.push(format!("xmlns:{namespace}=\"{uri}\""));
        }
    }
    lines.extend(attribute_lines(view));
    for line in &lines {
        xml.push('\n');
        xml.push_str(&attr_indent);
        xml.push_str(line);
    }

    if view.children.is_empty() {
        xml.push_str(" />\n");
        return;
    }
    xml.push_str(">\n");
    for child in &view.children {
        xml.push('\n');
        write_view(xml, child, depth + 1, &[]);
    }
    xml.push_str(&format!("\n{indent}</{}>\n", view.control_name));
}

/// `prefix:name="value"` lines of one view, in output order.
fn attribute_lines(view: &RenderedView) -> Vec<String> {
    let mut lines = Vec::new();
    if !view.control_id.is_empty() {
        lines.push(format!("android:id=\"@+id/{}\"", escape(&view.control_id)));
    }
    lines.push(format!("android:layout_width=\"{}\"", escape(&view.layout_width)));
    lines.push(format!("android:layout_height=\"{}\"", escape(&view.layout_height)));

    for namespace in [Namespace::Android, Namespace::App, Namespace::Unprefixed] {
        let Some(attrs) = view.attributes.get(&namespace.to_string()) else {
            continue;
        };
        for (name, value) in attrs {
            if namespace == Namespace::Android && LEADING.contains(&name.as_str()) {
                continue;
            }
            let value = escape(value);
            match namespace {
                Namespace::Unprefixed => lines.push(format!("{name}=\"{value}\"")),
                _ => lines.push(format!("{namespace}:{name}=\"{value}\"")),
            }
        }
    }
    lines
}

/// Escape an attribute value.
///
/// [XML 1.0 § 2.4](https://www.w3.org/TR/xml/#syntax)
#[must_use]
pub fn escape(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&apos;"),
            '\n' => result.push_str("&#10;"),
            c => result.push(c),
        }
    }
    result
}
