//! Rendered source tree for the droid converter.
//!
//! This crate is the geometry/style facade the layout engine consumes: an
//! arena of rendered HTML nodes, each carrying computed CSS values and the
//! pixel boxes measured by the producing browser engine.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues.

pub mod geometry;
mod load;
pub mod node;
pub mod style;

pub use geometry::{BoxRect, Edges};
pub use load::SourceError;
pub use node::{AttributesMap, FloatSide, PositionScheme, SourceKind, SourceNode};
pub use style::StyleMap;

/// [CSS Fonts § 2.5](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
/// "medium" resolves to 16px in all major engines.
pub const DEFAULT_FONT_SIZE_PX: f64 = 16.0;

/// A type-safe index into the source tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The document root element is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// Arena-based source tree with O(1) node access and traversal.
#[derive(Debug, Clone, Default)]
pub struct SourceTree {
    /// All nodes, indexed by [`NodeId`]. The root element is at index 0.
    nodes: Vec<SourceNode>,
}

impl SourceTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The root element, if any node was allocated.
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        (!self.nodes.is_empty()).then_some(NodeId::ROOT)
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&SourceNode> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SourceNode> {
        self.nodes.get_mut(id.0)
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no node was allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node: SourceNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Appends `child` as the last child of `parent`, updating all relationships.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let prev_last_child = self.nodes[parent.0].children.last().copied();

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over preceding siblings (from immediately before to first child).
    #[must_use]
    pub fn preceding_siblings(&self, id: NodeId) -> PrecedingSiblingIterator<'_> {
        PrecedingSiblingIterator {
            tree: self,
            current: self.prev_sibling(id),
        }
    }

    /// Whether the element only holds text: at least one non-blank text run
    /// and no rendered element children.
    #[must_use]
    pub fn text_element(&self, id: NodeId) -> bool {
        let children = self.children(id);
        let mut has_text = false;
        for &child in children {
            let Some(node) = self.get(child) else {
                continue;
            };
            match node.text_content() {
                Some(text) if !text.trim().is_empty() => has_text = true,
                Some(_) => {}
                None if node.hidden() => {}
                None => return false,
            }
        }
        has_text
    }

    /// Concatenated, whitespace-collapsed text of the node's text runs.
    #[must_use]
    pub fn text_of(&self, id: NodeId) -> String {
        let Some(node) = self.get(id) else {
            return String::new();
        };
        let raw = node.text_content().map_or_else(
            || {
                self.children(id)
                    .iter()
                    .filter_map(|&child| self.get(child).and_then(SourceNode::text_content))
                    .collect::<Vec<_>>()
                    .join(" ")
            },
            str::to_string,
        );
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a SourceTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Iterator over preceding siblings of a node.
pub struct PrecedingSiblingIterator<'a> {
    tree: &'a SourceTree,
    current: Option<NodeId>,
}

impl Iterator for PrecedingSiblingIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.prev_sibling(id);
        Some(id)
    }
}
