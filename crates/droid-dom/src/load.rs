//! Loading a source tree from the JSON produced by the measuring engine.

use serde::Deserialize;
use thiserror::Error;

use crate::geometry::{Edges, RectInput};
use crate::node::{AttributesMap, SourceKind, SourceNode};
use crate::style::StyleMap;
use crate::{NodeId, SourceTree};

/// Errors while reading facade input.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The document is not valid JSON or does not match the node shape.
    #[error("malformed source tree: {0}")]
    Json(#[from] serde_json::Error),
    /// A node has neither a tag nor text.
    #[error("node at depth {depth} has neither a tag nor text")]
    Untyped {
        /// Depth of the offending node.
        depth: usize,
    },
}

#[derive(Debug, Deserialize)]
struct NodeInput {
    tag: Option<String>,
    text: Option<String>,
    #[serde(default)]
    attrs: AttributesMap,
    #[serde(default)]
    styles: StyleMap,
    #[serde(default)]
    bounds: RectInput,
    #[serde(default)]
    margin: Edges,
    #[serde(default)]
    padding: Edges,
    #[serde(default)]
    border: Edges,
    #[serde(default)]
    children: Vec<NodeInput>,
}

impl SourceTree {
    /// Parse a tree from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the JSON is malformed or a node is
    /// neither an element nor a text run.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let root: NodeInput = serde_json::from_str(json)?;
        let mut tree = Self::new();
        let _ = tree.insert_input(root, None, 0)?;
        Ok(tree)
    }

    fn insert_input(
        &mut self,
        input: NodeInput,
        parent: Option<NodeId>,
        depth: usize,
    ) -> Result<NodeId, SourceError> {
        // An element may carry its text inline; it becomes a child run.
        let (kind, inline_text) = match (input.tag, input.text) {
            (Some(tag), text) => (
                SourceKind::Element {
                    tag: tag.to_ascii_lowercase(),
                    attrs: input.attrs,
                },
                text,
            ),
            (None, Some(text)) => (SourceKind::Text(text), None),
            (None, None) => return Err(SourceError::Untyped { depth }),
        };
        let mut node = SourceNode::text("", input.bounds.into());
        node.kind = kind;
        node.styles = input.styles;
        node.margin = input.margin;
        node.padding = input.padding;
        node.border = input.border;

        let content = node.content_box();
        let id = self.alloc(node);
        if let Some(parent) = parent {
            self.append_child(parent, id);
        }
        if let Some(text) = inline_text {
            let run = self.alloc(SourceNode::text(&text, content));
            self.append_child(id, run);
        }
        for child in input.children {
            let _ = self.insert_input(child, Some(id), depth + 1)?;
        }
        Ok(id)
    }
}
