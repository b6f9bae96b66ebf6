//! Arena of views with CSS and render relationships.
//!
//! Views keep two parent links: the CSS parent they were built under, and
//! the render parent that actually holds them in the output. Grouping and
//! wrapping only rewire render links.

use std::collections::HashSet;
use std::ops::{Index, IndexMut};

use droid_dom::{BoxRect, NodeId, SourceTree};

use crate::node::{
    AlignmentType, AnchorTarget, Anchorable, ContainerType, Dimensionable, Edge, LayoutMode,
    LayoutPosition, View, ViewFacts, ViewId, ViewOrigin,
};

/// Style properties a wrapper borrows from the view it wraps, so the
/// wrapper's own parent keeps seeing the same item.
const WRAPPER_STYLES: &[&str] = &[
    "display",
    "float",
    "clear",
    "vertical-align",
    "align-self",
    "order",
    "flex-grow",
    "flex-shrink",
    "flex-basis",
    "grid-column-start",
    "grid-column-end",
    "grid-row-start",
    "grid-row-end",
];

/// Arena-based view tree.
#[derive(Debug, Clone, Default)]
pub struct ViewTree {
    views: Vec<View>,
    root: Option<ViewId>,
}

impl Index<ViewId> for ViewTree {
    type Output = View;

    fn index(&self, id: ViewId) -> &View {
        &self.views[id.0]
    }
}

impl IndexMut<ViewId> for ViewTree {
    fn index_mut(&mut self, id: ViewId) -> &mut View {
        &mut self.views[id.0]
    }
}

impl ViewTree {
    /// Empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build one view per rendered source node.
    ///
    /// Hidden elements and whitespace-only text runs are skipped; `<br>`
    /// views stay as CSS children (they drive line detection) but are never
    /// rendered.
    #[must_use]
    pub fn from_source(source: &SourceTree) -> Self {
        let mut tree = Self::new();
        if let Some(root) = source.root() {
            tree.root = tree.build(source, root, None, 0);
        }
        tree
    }

    fn build(
        &mut self,
        source: &SourceTree,
        node_id: NodeId,
        parent: Option<ViewId>,
        depth: usize,
    ) -> Option<ViewId> {
        let node = source.get(node_id)?;
        if node.hidden() {
            return None;
        }
        if node.text_content().is_some_and(|text| text.trim().is_empty()) {
            return None;
        }

        let id = self.alloc(ViewOrigin::Source, node.tag());
        let view = &mut self[id];
        view.source = Some(node_id);
        view.depth = depth;
        view.styles = node.styles.clone();
        if let droid_dom::SourceKind::Element { attrs, .. } = &node.kind {
            view.element_attrs = attrs.clone();
        }
        if node.is_text() {
            view.text = Some(source.text_of(node_id));
        }
        view.border = node.border;
        view.set_geometry(node.bounds, &node.margin, &node.padding);
        let position = node.position();
        view.facts = ViewFacts {
            page_flow: node.page_flow(),
            floating: node.floating(),
            block: node.block(),
            inline: node.inline(),
            text_element: source.text_element(node_id),
            input_element: node.input_element(),
            line_break: node.tag() == "br",
            position,
            auto_position: position.is_absolute()
                && ["top", "right", "bottom", "left"]
                    .iter()
                    .all(|side| node.css(side) == "auto"),
            font_size: node.font_size(),
        };
        view.excluded = view.facts.line_break;

        if let Some(parent) = parent {
            self[id].parent = Some(parent);
            self[parent].children.push(id);
            if !self[id].excluded {
                self.append_render_child(parent, id);
            }
        }

        for &child in source.children(node_id) {
            let _ = self.build(source, child, Some(id), depth + 1);
        }
        Some(id)
    }

    /// Root view.
    #[must_use]
    pub const fn root(&self) -> Option<ViewId> {
        self.root
    }

    /// Number of views, excluded ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Whether the arena is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// View by id.
    #[must_use]
    pub fn get(&self, id: ViewId) -> Option<&View> {
        self.views.get(id.0)
    }

    /// Every view.
    pub fn iter(&self) -> impl Iterator<Item = &View> {
        self.views.iter()
    }

    /// Allocate a detached view.
    pub fn alloc(&mut self, origin: ViewOrigin, tag: &str) -> ViewId {
        let id = ViewId(self.views.len());
        self.views.push(View::new(id, origin, tag));
        id
    }

    /// CSS children.
    #[must_use]
    pub fn children(&self, id: ViewId) -> &[ViewId] {
        &self[id].children
    }

    /// Render children.
    #[must_use]
    pub fn render_children(&self, id: ViewId) -> &[ViewId] {
        &self[id].render_children
    }

    /// Render children that take part in layout: not excluded, not helpers.
    #[must_use]
    pub fn layout_children(&self, id: ViewId) -> Vec<ViewId> {
        self[id]
            .render_children
            .iter()
            .copied()
            .filter(|&child| !self[child].excluded && !self[child].is_helper())
            .collect()
    }

    /// Layout children in normal flow (auto-positioned boxes included).
    #[must_use]
    pub fn flow_children(&self, id: ViewId) -> Vec<ViewId> {
        self.layout_children(id)
            .into_iter()
            .filter(|&child| self[child].facts.page_flow || self[child].facts.auto_position)
            .collect()
    }

    /// Layout children taken out of flow with an explicit offset.
    #[must_use]
    pub fn absolute_children(&self, id: ViewId) -> Vec<ViewId> {
        self.layout_children(id)
            .into_iter()
            .filter(|&child| !self[child].facts.page_flow && !self[child].facts.auto_position)
            .collect()
    }

    /// Append `child` to the render children of `parent`.
    pub fn append_render_child(&mut self, parent: ViewId, child: ViewId) {
        self.detach_render_child(child);
        self[parent].render_children.push(child);
        self.attach(parent, child);
    }

    /// Insert `child` at `index` among the render children of `parent`.
    pub fn insert_render_child(&mut self, parent: ViewId, index: usize, child: ViewId) {
        self.detach_render_child(child);
        let index = index.min(self[parent].render_children.len());
        self[parent].render_children.insert(index, child);
        self.attach(parent, child);
    }

    fn attach(&mut self, parent: ViewId, child: ViewId) {
        let container = self[parent].container_type;
        let view = &mut self[child];
        view.render_parent = Some(parent);
        view.render_parent_type = container;
    }

    /// Remove `child` from its render parent.
    pub fn detach_render_child(&mut self, child: ViewId) {
        if let Some(parent) = self[child].render_parent.take() {
            self[parent].render_children.retain(|&c| c != child);
        }
    }

    /// Position of `child` among its render siblings.
    #[must_use]
    pub fn render_index(&self, child: ViewId) -> Option<usize> {
        let parent = self[child].render_parent?;
        self[parent].render_children.iter().position(|&c| c == child)
    }

    /// Layout siblings of `id` under the same render parent, `id` excluded.
    #[must_use]
    pub fn render_siblings(&self, id: ViewId) -> Vec<ViewId> {
        self[id].render_parent.map_or_else(Vec::new, |parent| {
            self.layout_children(parent)
                .into_iter()
                .filter(|&sibling| sibling != id)
                .collect()
        })
    }

    /// Set the container type of an unclassified view.
    ///
    /// Returns false when the view already has a concrete type; use
    /// [`Self::set_control_type`] to override.
    pub fn set_container_type(&mut self, id: ViewId, container: ContainerType) -> bool {
        if self[id].container_type != ContainerType::Unknown {
            return false;
        }
        self.set_control_type(id, container);
        true
    }

    /// Force the container type, refreshing what children see of it.
    pub fn set_control_type(&mut self, id: ViewId, container: ContainerType) {
        self[id].container_type = container;
        let children = self[id].render_children.clone();
        for child in children {
            self[child].render_parent_type = container;
        }
    }

    /// Outer-most wrapper of `id`, or `id` itself.
    #[must_use]
    pub fn outer_most_wrapper(&self, id: ViewId) -> ViewId {
        let mut current = id;
        let mut seen = HashSet::new();
        while let Some(outer) = self[current].outer_wrapper {
            if !seen.insert(outer) {
                break;
            }
            current = outer;
        }
        current
    }

    /// Wrap `id` (through its outer-most wrapper) in a new container that
    /// takes its place among the render siblings.
    pub fn wrap(
        &mut self,
        id: ViewId,
        container: ContainerType,
        alignment: AlignmentType,
    ) -> ViewId {
        let target = self.outer_most_wrapper(id);
        let wrapper = self.alloc(ViewOrigin::Wrapper, "#wrapper");

        let inner = &self[target];
        let (parent, depth, bounds, facts) = (inner.parent, inner.depth, inner.linear, inner.facts);
        let mut styles = droid_dom::StyleMap::new();
        for name in WRAPPER_STYLES {
            if let Some(value) = inner.styles.get(name) {
                let _ = styles.set(name, value);
            }
        }
        if !styles.contains("display") {
            let _ = styles.set("display", inner.css("display"));
        }
        let render_parent = inner.render_parent;
        let index = self.render_index(target);

        let view = &mut self[wrapper];
        view.parent = parent;
        view.depth = depth;
        view.styles = styles;
        view.set_geometry(bounds, &droid_dom::Edges::default(), &droid_dom::Edges::default());
        view.facts = ViewFacts {
            text_element: false,
            input_element: false,
            ..facts
        };
        view.alignment = alignment | AlignmentType::WRAPPER;
        view.inner_wrapped = Some(target);
        view.container_type = container;

        if let (Some(render_parent), Some(index)) = (render_parent, index) {
            self.insert_render_child(render_parent, index, wrapper);
        }
        self.append_render_child(wrapper, target);
        self[target].outer_wrapper = Some(wrapper);
        if self.root == Some(target) {
            self.root = Some(wrapper);
        }
        tracing::debug!(wrapper = wrapper.0, inner = target.0, %container, "wrapped view");
        wrapper
    }

    /// Move `members` of `parent` into a new group container placed where
    /// the first member was.
    pub fn group(
        &mut self,
        parent: ViewId,
        members: &[ViewId],
        container: ContainerType,
        alignment: AlignmentType,
    ) -> ViewId {
        let group = self.alloc(ViewOrigin::Group, "#group");
        let index = members
            .first()
            .and_then(|&first| self.render_index(first))
            .unwrap_or(self[parent].render_children.len());
        let bounds = self.union_linear(members);
        let text_align = self[parent].css("text-align").to_string();
        let depth = self[parent].depth + 1;

        let view = &mut self[group];
        view.parent = Some(parent);
        view.depth = depth;
        let _ = view.styles.set("display", "block");
        let _ = view.styles.set("text-align", &text_align);
        view.set_geometry(bounds, &droid_dom::Edges::default(), &droid_dom::Edges::default());
        view.facts.block = true;
        view.alignment = alignment;
        view.container_type = container;

        self.insert_render_child(parent, index, group);
        for &member in members {
            self.append_render_child(group, member);
        }
        tracing::debug!(group = group.0, members = members.len(), %container, "synthesized group");
        group
    }

    /// Append a guideline or barrier to `parent`.
    pub fn add_helper(&mut self, parent: ViewId, container: ContainerType) -> ViewId {
        let helper = self.alloc(ViewOrigin::Helper, "#helper");
        let depth = self[parent].depth + 1;
        let view = &mut self[helper];
        view.parent = Some(parent);
        view.depth = depth;
        view.container_type = container;
        let _ = view.set_layout_mode(crate::node::Axis::Horizontal, LayoutMode::WrapContent, true);
        let _ = view.set_layout_mode(crate::node::Axis::Vertical, LayoutMode::WrapContent, true);
        self.append_render_child(parent, helper);
        helper
    }

    /// Smallest rectangle holding the margin boxes of `ids`.
    #[must_use]
    pub fn union_linear(&self, ids: &[ViewId]) -> BoxRect {
        ids.iter()
            .map(|&id| self[id].linear)
            .reduce(|acc, rect| acc.union(&rect))
            .unwrap_or_default()
    }

    /// Smallest rectangle holding the border boxes of `ids`.
    #[must_use]
    pub fn union_bounds(&self, ids: &[ViewId]) -> BoxRect {
        ids.iter()
            .map(|&id| self[id].bounds)
            .reduce(|acc, rect| acc.union(&rect))
            .unwrap_or_default()
    }

    /// Render tree in pre-order from the root.
    #[must_use]
    pub fn render_pre_order(&self) -> Vec<ViewId> {
        let mut out = Vec::new();
        let mut stack: Vec<ViewId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            if self[id].excluded {
                continue;
            }
            out.push(id);
            stack.extend(self[id].render_children.iter().rev().copied());
        }
        out
    }

    /// CSS tree in post-order from the root.
    #[must_use]
    pub fn css_post_order(&self) -> Vec<ViewId> {
        fn visit(tree: &ViewTree, id: ViewId, out: &mut Vec<ViewId>) {
            for &child in &tree[id].children {
                visit(tree, child, out);
            }
            out.push(id);
        }
        let mut out = Vec::new();
        if let Some(root) = self.root {
            visit(self, root, &mut out);
        }
        out
    }

    // ---------------------------------------------------------------------
    // Anchors between siblings
    // ---------------------------------------------------------------------

    /// Anchor `id` at `position` to `target`, resolving the target's
    /// document id.
    pub fn anchor(
        &mut self,
        id: ViewId,
        position: LayoutPosition,
        target: AnchorTarget,
        overwrite: bool,
    ) -> bool {
        let reference = match target {
            AnchorTarget::Parent => String::new(),
            AnchorTarget::View(other) => self[other].document_id(),
        };
        self[id].anchor(position, target, &reference, overwrite)
    }

    /// Anchor `id` to the sibling `other`.
    pub fn anchor_to(&mut self, id: ViewId, position: LayoutPosition, other: ViewId) -> bool {
        self.anchor(id, position, AnchorTarget::View(other), false)
    }

    /// Link two siblings on both sides: `a` at `a_position` to `b`, and `b`
    /// at `b_position` to `a`.
    pub fn anchor_pair(
        &mut self,
        a: ViewId,
        a_position: LayoutPosition,
        b: ViewId,
        b_position: LayoutPosition,
    ) -> bool {
        let first = self.anchor(a, a_position, AnchorTarget::View(b), true);
        let second = self.anchor(b, b_position, AnchorTarget::View(a), true);
        first && second
    }

    /// Views reached by following sibling anchors from `id` toward `direction`.
    ///
    /// The walk stops at the first view without a link or on a cycle.
    #[must_use]
    pub fn anchor_chain(&self, id: ViewId, direction: Edge) -> Vec<ViewId> {
        let (forward, backward) = match direction {
            Edge::Right => (LayoutPosition::RightLeft, LayoutPosition::LeftRight),
            Edge::Left => (LayoutPosition::LeftRight, LayoutPosition::RightLeft),
            Edge::Bottom => (LayoutPosition::BottomTop, LayoutPosition::TopBottom),
            Edge::Top => (LayoutPosition::TopBottom, LayoutPosition::BottomTop),
        };
        let mut chain = Vec::new();
        let mut visited = HashSet::from([id]);
        let mut current = id;
        loop {
            // A sibling anchored back onto `current`, else `current`'s own link.
            let next = self
                .render_siblings(current)
                .into_iter()
                .find(|&s| self[s].anchored_to(backward, AnchorTarget::View(current)))
                .or(match self[current].constraint.target(forward) {
                    Some(AnchorTarget::View(other)) => Some(other),
                    _ => None,
                });
            let Some(next) = next else {
                break;
            };
            if !visited.insert(next) {
                break;
            }
            chain.push(next);
            current = next;
        }
        chain
    }

    /// Remove every anchor of `id`. Siblings anchored to `id` are re-pointed
    /// to the parent when `re_point` is set, else their anchors are removed.
    ///
    /// No pipeline stage needs this: wrapping adapters move views before any
    /// anchor exists. It is for callers that edit an anchored tree.
    pub fn anchor_clear(&mut self, id: ViewId, re_point: bool) {
        for sibling in self.render_siblings(id) {
            let dependent: Vec<LayoutPosition> = self[sibling]
                .constraint
                .current
                .iter()
                .filter(|(_, record)| record.target == AnchorTarget::View(id))
                .map(|(position, _)| *position)
                .collect();
            for position in dependent {
                self[sibling].anchor_delete(&[position]);
                if re_point {
                    let parent_position = match position {
                        LayoutPosition::LeftRight => LayoutPosition::Left,
                        LayoutPosition::RightLeft => LayoutPosition::Right,
                        LayoutPosition::TopBottom | LayoutPosition::Baseline => LayoutPosition::Top,
                        LayoutPosition::BottomTop => LayoutPosition::Bottom,
                        other => other,
                    };
                    let _ = self.anchor(sibling, parent_position, AnchorTarget::Parent, true);
                }
            }
        }
        let positions: Vec<LayoutPosition> = self[id].constraint.current.keys().copied().collect();
        self[id].anchor_delete(&positions);
    }
}
