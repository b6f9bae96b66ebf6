//! The conversion pipeline.
//!
//! [`convert`] runs the stages in a fixed order over one [`ViewTree`]:
//!
//! 1. **Classify** - bottom-up over the CSS tree; adapters first, then the
//!    generic classifier
//! 2. **Wrap** - wrapping adapters insert ConstraintLayouts where a view
//!    needs one
//! 3. **Identify** - every rendered view gets a session-unique control id
//! 4. **Constrain** - top-down, each container anchors its children
//! 5. **Dimension** - width and height modes
//! 6. **Space** - negative margins become translations, then margins and
//!    padding are written
//! 7. **Finalize** - text, RTL localization and API-level rules
//!
//! Every stage is infallible. What cannot be expressed is reported through
//! the session diagnostics and ends up in [`LayoutDocument::warnings`].

use droid_dom::SourceTree;

use crate::adapters::AdapterKind;
use crate::adapters::table::is_table_part;
use crate::api::finalize_attributes;
use crate::box_spacing::{resolve_box_spacing, translate_negative_margins};
use crate::classifier::process_unknown_parent;
use crate::config::ConversionConfig;
use crate::constraint::constrain_container;
use crate::dimension::set_layout;
use crate::document::{LayoutDocument, RenderedView};
use crate::node::Attr;
use crate::session::ConversionSession;
use crate::tree::ViewTree;

/// Convert a rendered source tree into an Android layout.
#[must_use]
pub fn convert(source: &SourceTree, config: ConversionConfig) -> LayoutDocument {
    let mut session = ConversionSession::new(config);
    let mut tree = ViewTree::from_source(source);
    convert_tree(&mut tree, &mut session);
    render_document(&tree, &session)
}

/// Run every stage over `tree`.
pub fn convert_tree(tree: &mut ViewTree, session: &mut ConversionSession) {
    classify_views(tree, session);
    wrap_views(tree, session);
    assign_ids(tree, session);
    constrain_views(tree, session);
    dimension_views(tree, session);
    space_views(tree, session);
    finalize_views(tree, session);
    tracing::debug!(
        views = tree.len(),
        ids = session.id_count(),
        warnings = session.diagnostics.len(),
        "conversion finished"
    );
}

/// Snapshot of the converted tree.
#[must_use]
pub fn render_document(tree: &ViewTree, session: &ConversionSession) -> LayoutDocument {
    LayoutDocument {
        root: tree.root().map(|root| RenderedView::from_tree(tree, root)),
        target_api: session.config.target_api,
        warnings: session.diagnostics.messages().to_vec(),
    }
}

/// Classify every view, children before parents.
pub fn classify_views(tree: &mut ViewTree, session: &mut ConversionSession) {
    for id in tree.css_post_order() {
        if tree[id].excluded || is_table_part(tree, id) {
            continue;
        }
        let claimed = AdapterKind::CLASSIFIERS
            .iter()
            .any(|kind| kind.adapter().classify(tree, session, id));
        if !claimed {
            process_unknown_parent(tree, session, id);
        }
    }
}

/// Give every wrapping adapter a look at every rendered view.
pub fn wrap_views(tree: &mut ViewTree, session: &mut ConversionSession) {
    for id in tree.render_pre_order() {
        for kind in AdapterKind::WRAPPERS {
            let _ = kind.adapter().wrap(tree, session, id);
        }
    }
}

/// Control ids in render order, from the source `id` where there is one.
pub fn assign_ids(tree: &mut ViewTree, session: &mut ConversionSession) {
    for id in tree.render_pre_order() {
        if !tree[id].control_id.is_empty() {
            continue;
        }
        let view = &tree[id];
        let source_id = view.element_attrs.get("id").cloned().unwrap_or_default();
        let prefix = view.container_type.id_prefix();
        tree[id].control_id = session.claim_control_id(&source_id, &prefix);
    }
}

/// Anchor the children of every container, parents first.
pub fn constrain_views(tree: &mut ViewTree, session: &mut ConversionSession) {
    for id in tree.render_pre_order() {
        if tree[id].container_type.is_layout() || tree[id].adapter.is_some() {
            constrain_container(tree, session, id);
        }
    }
}

/// Width and height of every view, helpers and spacers included.
pub fn dimension_views(tree: &mut ViewTree, session: &mut ConversionSession) {
    for id in tree.render_pre_order() {
        set_layout(tree, session, id);
    }
}

/// Translations first, over the whole tree, since a negative margin moves
/// later siblings too; then the remaining edges.
pub fn space_views(tree: &mut ViewTree, session: &ConversionSession) {
    let order = tree.render_pre_order();
    for &id in &order {
        translate_negative_margins(tree, id);
    }
    for &id in &order {
        resolve_box_spacing(tree, session, id);
    }
}

/// Text attributes and the API-level rules.
pub fn finalize_views(tree: &mut ViewTree, session: &ConversionSession) {
    for id in tree.render_pre_order() {
        let view = &mut tree[id];
        let text = view
            .text
            .clone()
            .filter(|text| !text.is_empty() && !view.container_type.is_layout());
        if let Some(text) = text {
            let _ = view.attributes.set(Attr::Text, text);
        }
        if view.has_text() && view.css("white-space") == "nowrap" {
            let _ = view.attributes.set(Attr::SingleLine, "true");
        }
        finalize_attributes(&mut view.attributes, &session.config);
    }
}
