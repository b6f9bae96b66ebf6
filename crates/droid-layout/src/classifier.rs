//! Container classification.
//!
//! Every unclassified parent is summarized into a [`LayoutSignature`] and
//! handed to [`classify`], a pure function applying a fixed precedence.
//! Leaves go through [`classify_leaf`]. The tree-side drivers
//! [`process_unknown_parent`] and [`process_unknown_child`] apply the
//! decision: assigning the container type, absorbing single text runs,
//! grouping rows of a multi-line container, or splitting a right-floated
//! run into two groups.

use droid_common::within_range;
use droid_dom::{FloatSide, PositionScheme};

use crate::node::{AlignmentType, Axis, ContainerType, View, ViewId};
use crate::session::ConversionSession;
use crate::tree::ViewTree;
use crate::values::TextAlign;

/// Facts feeding [`is_constraint_layout`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ConstraintHints {
    /// The parent is a flex container aligning items on their baseline.
    pub flex_baseline: bool,
    /// Inline content is right- or center-aligned.
    pub right_or_center: bool,
    /// A child has a percentage width below 100%.
    pub percent_width: bool,
    /// The parent clips a visible background.
    pub clipped_background: bool,
    /// A child is centered or biased with auto horizontal margins.
    pub horizontal_bias: bool,
}

/// Whether a horizontal run of children needs ConstraintLayout.
///
/// Each hint alone is enough: LinearLayout cannot express baseline-aligned
/// flex items, text-align bias, percentage widths, clipping or bias.
#[must_use]
pub const fn is_constraint_layout(hints: &ConstraintHints) -> bool {
    hints.flex_baseline
        || hints.right_or_center
        || hints.percent_width
        || hints.clipped_background
        || hints.horizontal_bias
}

/// Summary of a parent's children used for classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LayoutSignature {
    /// Number of rendered children.
    pub child_count: usize,
    /// A child is out of flow with explicit offsets.
    pub absolute_child: bool,
    /// The only child is a plain text run.
    pub single_text_child: bool,
    /// A child is relatively positioned.
    pub relative_child: bool,
    /// The parent was already segmented along an axis.
    pub segmented: Option<Axis>,
    /// A `<br>` forces a new line.
    pub line_break: bool,
    /// Placement needs a bias (text-align or auto margins).
    pub needs_bias: bool,
    /// A child floats left.
    pub float_left: bool,
    /// A child floats right.
    pub float_right: bool,
    /// All flow children share one line.
    pub linear_x: bool,
    /// All flow children are stacked.
    pub linear_y: bool,
    /// The run is non-floated content followed by right floats.
    pub right_float_row: bool,
    /// [`is_constraint_layout`] holds.
    pub constraint_layout: bool,
    /// Children share one vertical alignment.
    pub baseline_compatible: bool,
    /// Floats need barriers or clearance.
    pub float_clear: bool,
    /// Some child starts a new line.
    pub aligned_vertically: bool,
}

/// Follow-up work after a container type is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ClassifyAction {
    /// Nothing more.
    #[default]
    None,
    /// The single text child becomes the parent's text.
    AbsorbText,
    /// Each line with several items becomes a horizontal group.
    GroupRows,
    /// Content and right floats become two groups.
    SplitFloatRight,
}

/// Outcome of [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Classification {
    /// Chosen container.
    pub container: ContainerType,
    /// Arrangement flags.
    pub alignment: AlignmentType,
    /// Follow-up.
    pub action: ClassifyAction,
}

impl Classification {
    const fn new(container: ContainerType, alignment: AlignmentType) -> Self {
        Self {
            container,
            alignment,
            action: ClassifyAction::None,
        }
    }

    const fn with(mut self, action: ClassifyAction) -> Self {
        self.action = action;
        self
    }
}

/// Choose the container for a parent.
#[must_use]
pub fn classify(signature: &LayoutSignature) -> Classification {
    let vertical = || {
        let container = if signature.relative_child || signature.needs_bias {
            ContainerType::Constraint
        } else {
            ContainerType::Linear
        };
        Classification::new(container, AlignmentType::VERTICAL).with(ClassifyAction::GroupRows)
    };

    if signature.absolute_child {
        return Classification::new(
            ContainerType::Constraint,
            AlignmentType::ABSOLUTE | AlignmentType::UNKNOWN,
        );
    }
    if signature.child_count == 1 {
        if signature.single_text_child {
            return Classification::new(ContainerType::Text, AlignmentType::SINGLE)
                .with(ClassifyAction::AbsorbText);
        }
        return match signature.segmented {
            _ if signature.relative_child => {
                Classification::new(ContainerType::Relative, AlignmentType::SINGLE)
            }
            Some(Axis::Horizontal) => Classification::new(
                ContainerType::Linear,
                AlignmentType::SINGLE | AlignmentType::HORIZONTAL,
            ),
            Some(Axis::Vertical) => Classification::new(
                ContainerType::Linear,
                AlignmentType::SINGLE | AlignmentType::VERTICAL,
            ),
            None => Classification::new(ContainerType::Frame, AlignmentType::SINGLE),
        };
    }
    if signature.line_break {
        return vertical();
    }
    if signature.float_left && signature.float_right {
        return Classification::new(
            ContainerType::Constraint,
            AlignmentType::FLOAT | AlignmentType::BLOCK,
        );
    }
    if signature.linear_x {
        if signature.right_float_row {
            return Classification::new(
                ContainerType::Frame,
                AlignmentType::HORIZONTAL | AlignmentType::RIGHT,
            )
            .with(ClassifyAction::SplitFloatRight);
        }
        let container = if signature.constraint_layout {
            ContainerType::Constraint
        } else if signature.baseline_compatible {
            ContainerType::Linear
        } else {
            ContainerType::Relative
        };
        return Classification::new(container, AlignmentType::HORIZONTAL);
    }
    if signature.linear_y {
        return if signature.float_clear {
            Classification::new(
                ContainerType::Constraint,
                AlignmentType::VERTICAL | AlignmentType::FLOAT,
            )
        } else if signature.relative_child {
            Classification::new(ContainerType::Relative, AlignmentType::VERTICAL)
        } else {
            Classification::new(ContainerType::Linear, AlignmentType::VERTICAL)
        };
    }
    if signature.aligned_vertically {
        return vertical();
    }
    Classification::new(ContainerType::Constraint, AlignmentType::UNKNOWN)
}

/// Control for a leaf view.
#[must_use]
pub fn classify_leaf(view: &View) -> ContainerType {
    if view.tag == "#text" {
        return ContainerType::Inline;
    }
    match view.tag.as_str() {
        "img" => ContainerType::Image,
        "svg" => ContainerType::Svg,
        "input" => match view.element_attrs.get("type").map(String::as_str) {
            Some("radio") => ContainerType::Radio,
            Some("checkbox") => ContainerType::Checkbox,
            Some("range") => ContainerType::Range,
            Some("button" | "submit" | "reset") => ContainerType::Button,
            Some("image") => ContainerType::Image,
            _ => ContainerType::Edit,
        },
        "textarea" => ContainerType::Edit,
        "select" => ContainerType::Select,
        "button" => ContainerType::Button,
        "progress" | "meter" => ContainerType::Progress,
        "hr" => ContainerType::Line,
        _ if view.has_text() || view.facts.text_element => ContainerType::Text,
        _ if view.has_background() || view.has_border() => ContainerType::Block,
        _ => ContainerType::Space,
    }
}

/// Whether the tag renders as a single control whatever its children.
fn is_control_tag(tag: &str) -> bool {
    matches!(
        tag,
        "img" | "svg" | "input" | "textarea" | "select" | "button" | "progress" | "meter" | "hr"
    )
}

/// Whether `b` shares a line with `a`.
pub(crate) fn same_line(a: &View, b: &View, tolerance: f64) -> bool {
    let (a, b) = (a.linear, b.linear);
    let overlap = a.bottom.min(b.bottom) - a.top.max(b.top);
    let flat = a.height <= tolerance && b.height <= tolerance;
    overlap > tolerance || (flat && within_range(a.top, b.top, tolerance))
}

/// Whether `view` begins a new line after `previous`.
fn starts_line(tree: &ViewTree, previous: ViewId, view: ViewId, tolerance: f64) -> bool {
    let (a, b) = (&tree[previous], &tree[view]);
    let block = |v: &View| v.facts.block && v.facts.floating.is_none();
    block(a) || block(b) || !same_line(a, b, tolerance)
}

/// Split `items` into lines at `<br>`s, block boxes and geometry breaks.
///
/// `items` are CSS children in order; line breaks end the current line and
/// are dropped.
pub(crate) fn partition_rows(
    tree: &ViewTree,
    items: &[ViewId],
    tolerance: f64,
) -> Vec<Vec<ViewId>> {
    let mut rows: Vec<Vec<ViewId>> = Vec::new();
    let mut current: Vec<ViewId> = Vec::new();
    for &item in items {
        if tree[item].facts.line_break {
            if !current.is_empty() {
                rows.push(std::mem::take(&mut current));
            }
            continue;
        }
        let breaks = current
            .last()
            .is_some_and(|&previous| starts_line(tree, previous, item, tolerance));
        if breaks {
            rows.push(std::mem::take(&mut current));
        }
        current.push(item);
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

/// Build the signature of `parent` from its render children.
#[must_use]
pub fn signature(tree: &ViewTree, parent: ViewId, line_tolerance: f64) -> LayoutSignature {
    let view = &tree[parent];
    let children = tree.layout_children(parent);
    let flow = tree.flow_children(parent);
    let line_break = view.children.iter().any(|&c| tree[c].facts.line_break);

    let floats = |side: FloatSide| flow.iter().any(|&c| tree[c].facts.floating == Some(side));
    let (float_left, float_right) = (floats(FloatSide::Left), floats(FloatSide::Right));
    let relative_child = children
        .iter()
        .any(|&c| tree[c].facts.position == PositionScheme::Relative);

    let rows = partition_rows(tree, &flow, line_tolerance);
    let linear_x = flow.len() > 1 && !line_break && rows.len() == 1;
    let linear_y = flow.len() > 1
        && rows.iter().all(|row| row.len() == 1)
        && stacked(tree, &flow, line_tolerance);
    let aligned_vertically = rows.len() > 1;

    let text_align = TextAlign::parse(view.css("text-align"));
    let inline_content = flow.iter().any(|&c| !tree[c].facts.block);
    let auto_margins = flow
        .iter()
        .any(|&c| tree[c].css("margin-left") == "auto" && tree[c].css("margin-right") == "auto");
    let hints = ConstraintHints {
        flex_baseline: view.is_flex() && view.css("align-items") == "baseline",
        right_or_center: inline_content && matches!(text_align, TextAlign::Center | TextAlign::End),
        percent_width: flow
            .iter()
            .any(|&c| tree[c].css_percent("width").is_some_and(|p| p < 1.0)),
        clipped_background: view.has_background()
            && matches!(view.css("overflow"), "hidden" | "clip"),
        horizontal_bias: auto_margins,
    };

    let right_float_row = float_right
        && !float_left
        && !view.is_synthesized()
        && flow
            .iter()
            .skip_while(|&&c| tree[c].facts.floating != Some(FloatSide::Right))
            .all(|&c| tree[c].facts.floating == Some(FloatSide::Right));

    let mut alignments = flow.iter().map(|&c| tree[c].css("vertical-align"));
    let first_alignment = alignments.next();
    let baseline_compatible = alignments.all(|a| Some(a) == first_alignment);

    let float_clear = (float_left || float_right)
        && flow
            .iter()
            .any(|&c| tree[c].facts.floating.is_none() || tree[c].css("clear") != "none");

    LayoutSignature {
        child_count: children.len(),
        absolute_child: !tree.absolute_children(parent).is_empty(),
        single_text_child: children.len() == 1 && tree[children[0]].tag == "#text",
        relative_child,
        segmented: segmented_axis(view),
        line_break,
        needs_bias: hints.right_or_center || hints.horizontal_bias,
        float_left,
        float_right,
        linear_x,
        linear_y,
        right_float_row,
        constraint_layout: is_constraint_layout(&hints),
        baseline_compatible,
        float_clear,
        aligned_vertically,
    }
}

fn stacked(tree: &ViewTree, flow: &[ViewId], tolerance: f64) -> bool {
    flow.windows(2)
        .all(|pair| tree[pair[1]].linear.top + tolerance >= tree[pair[0]].linear.bottom)
}

fn segmented_axis(view: &View) -> Option<Axis> {
    if !view.is_synthesized() {
        None
    } else if view.alignment.contains(AlignmentType::HORIZONTAL) {
        Some(Axis::Horizontal)
    } else if view.alignment.contains(AlignmentType::VERTICAL) {
        Some(Axis::Vertical)
    } else {
        None
    }
}

/// Classify a view without layout children.
pub fn process_unknown_child(tree: &mut ViewTree, id: ViewId) {
    let container = classify_leaf(&tree[id]);
    if tree.set_container_type(id, container) {
        tracing::debug!(view = id.0, tag = %tree[id].tag, %container, "classified control");
    }
}

/// Classify a view with children, applying the follow-up action.
pub fn process_unknown_parent(tree: &mut ViewTree, session: &ConversionSession, id: ViewId) {
    if tree[id].container_type != ContainerType::Unknown {
        return;
    }
    if is_control_tag(&tree[id].tag) {
        absorb_children(tree, id);
        process_unknown_child(tree, id);
        return;
    }
    let children = tree.layout_children(id);
    if children.is_empty() {
        process_unknown_child(tree, id);
        return;
    }

    let signature = signature(tree, id, session.config.line_tolerance);
    let decision = classify(&signature);
    tracing::debug!(
        view = id.0,
        container = %decision.container,
        alignment = ?decision.alignment,
        action = ?decision.action,
        "classified container"
    );
    match decision.action {
        ClassifyAction::AbsorbText => {
            absorb_children(tree, id);
            if tree[id].container_type == ContainerType::Unknown {
                let _ = tree.set_container_type(id, ContainerType::Text);
            }
            tree[id].alignment |= decision.alignment;
            return;
        }
        ClassifyAction::GroupRows => group_rows(tree, session, id),
        ClassifyAction::SplitFloatRight => split_float_right(tree, session, id),
        ClassifyAction::None => {}
    }
    let _ = tree.set_container_type(id, decision.container);
    tree[id].alignment |= decision.alignment;
}

/// Fold the text of every CSS child into `id` and stop rendering them.
fn absorb_children(tree: &mut ViewTree, id: ViewId) {
    let mut text = Vec::new();
    for child in tree.render_children(id).to_vec() {
        if let Some(run) = tree[child].text.clone() {
            text.push(run);
        }
        tree[child].excluded = true;
    }
    if tree[id].text.is_none() && !text.is_empty() {
        tree[id].text = Some(text.join(" "));
    }
    tree[id].facts.text_element = tree[id].has_text();
}

fn group_rows(tree: &mut ViewTree, session: &ConversionSession, id: ViewId) {
    if tree[id].origin == crate::node::ViewOrigin::Group {
        return;
    }
    let flow = tree.flow_children(id);
    let rows = partition_rows(tree, &flow, session.config.line_tolerance);
    let mut grouped = false;
    for row in rows.into_iter().filter(|row| row.len() > 1) {
        let group = tree.group(id, &row, ContainerType::Unknown, AlignmentType::HORIZONTAL);
        process_unknown_parent(tree, session, group);
        grouped = true;
    }
    if grouped {
        tree[id].alignment |= AlignmentType::SEGMENTED;
    }
}

fn split_float_right(tree: &mut ViewTree, session: &ConversionSession, id: ViewId) {
    let flow = tree.flow_children(id);
    let (mut right, left): (Vec<ViewId>, Vec<ViewId>) = flow
        .into_iter()
        .partition(|&c| tree[c].facts.floating == Some(FloatSide::Right));
    // The first right float sits right-most.
    right.reverse();
    for (members, alignment) in [
        (left, AlignmentType::HORIZONTAL),
        (right, AlignmentType::HORIZONTAL | AlignmentType::RIGHT),
    ] {
        if members.len() > 1 {
            let group = tree.group(id, &members, ContainerType::Unknown, alignment);
            process_unknown_parent(tree, session, group);
        } else if let Some(&single) = members.first() {
            tree[single].alignment |= alignment & AlignmentType::RIGHT;
        }
    }
    tree[id].alignment |= AlignmentType::SEGMENTED;
}
