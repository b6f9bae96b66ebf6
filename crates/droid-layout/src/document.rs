//! The converted layout, ready for serialization.
//!
//! Views are flattened out of the arena into an owned tree of
//! [`RenderedView`]s with namespaced string attributes, the only place raw
//! attribute strings appear.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::node::{ContainerType, Dimensionable, ViewId};
use crate::tree::ViewTree;

/// One output element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedView {
    /// XML element name.
    pub control_name: String,
    /// Control id without the `@+id/` prefix.
    pub control_id: String,
    /// `@id/name` reference.
    pub document_id: String,
    /// Widget kind.
    pub container_type: ContainerType,
    /// `android:layout_width`
    pub layout_width: String,
    /// `android:layout_height`
    pub layout_height: String,
    /// Namespace → attribute name → value.
    pub attributes: BTreeMap<String, BTreeMap<String, String>>,
    /// Child elements in render order.
    pub children: Vec<RenderedView>,
}

impl RenderedView {
    /// Snapshot `id` and its rendered subtree.
    #[must_use]
    pub fn from_tree(tree: &ViewTree, id: ViewId) -> Self {
        let view = &tree[id];
        let children = tree
            .render_children(id)
            .iter()
            .copied()
            .filter(|&child| !tree[child].excluded)
            .map(|child| Self::from_tree(tree, child))
            .collect();
        Self {
            control_name: view.container_type.control_name().to_string(),
            control_id: view.control_id.clone(),
            document_id: view.document_id(),
            container_type: view.container_type,
            layout_width: view.layout_width().value(),
            layout_height: view.layout_height().value(),
            attributes: view.attributes.namespaced(),
            children,
        }
    }

    /// Value of a `prefix:name` attribute, e.g. `app:layout_constraintTop_toTopOf`.
    /// Unprefixed attributes are looked up by bare name.
    #[must_use]
    pub fn attr(&self, qualified: &str) -> Option<&str> {
        let (namespace, name) = qualified.split_once(':').unwrap_or(("_", qualified));
        self.attributes
            .get(namespace)
            .and_then(|attrs| attrs.get(name))
            .map(String::as_str)
    }

    /// This view and every descendant, pre-order.
    #[must_use]
    pub fn descendants(&self) -> Vec<&Self> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.descendants());
        }
        out
    }
}

/// Result of one conversion run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutDocument {
    /// Root element, absent for an empty source.
    pub root: Option<RenderedView>,
    /// API level the attributes were finalized for.
    pub target_api: u32,
    /// Deduplicated warnings, `[component] message`.
    pub warnings: Vec<String>,
}

impl LayoutDocument {
    /// View with the given control id.
    #[must_use]
    pub fn find(&self, control_id: &str) -> Option<&RenderedView> {
        self.views().into_iter().find(|view| view.control_id == control_id)
    }

    /// Every view, pre-order.
    #[must_use]
    pub fn views(&self) -> Vec<&RenderedView> {
        self.root.as_ref().map_or_else(Vec::new, RenderedView::descendants)
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error, which only happens for non-string map
    /// keys and so never for this type.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
