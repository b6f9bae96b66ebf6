//! Tests for container classification.

use droid_dom::{BoxRect, SourceNode, SourceTree, StyleMap};
use droid_layout::classifier::{
    ClassifyAction, ConstraintHints, LayoutSignature, classify, is_constraint_layout,
    process_unknown_parent, signature,
};
use droid_layout::node::{AlignmentType, Axis, ContainerType, ViewOrigin};
use droid_layout::{ConversionConfig, ConversionSession, ViewId, ViewTree};
use proptest::prelude::*;

/// Helper: a 300x40 `div` with `styles` holding one child per entry.
fn parent_with(styles: StyleMap, children: Vec<SourceNode>) -> (ViewTree, ViewId) {
    let mut source = SourceTree::new();
    let root = source.alloc(SourceNode::element(
        "div",
        styles,
        BoxRect::new(0.0, 0.0, 300.0, 40.0),
    ));
    for child in children {
        let id = source.alloc(child);
        source.append_child(root, id);
    }
    let tree = ViewTree::from_source(&source);
    let Some(root) = tree.root() else {
        unreachable!("source has a root");
    };
    (tree, root)
}

/// Helper: an inline span at `left` on the first line.
fn span(left: f64, styles: StyleMap) -> SourceNode {
    SourceNode::element("span", styles, BoxRect::new(left, 0.0, 100.0, 20.0))
}

fn session() -> ConversionSession {
    ConversionSession::new(ConversionConfig::default())
}

fn arb_signature() -> impl Strategy<Value = LayoutSignature> {
    (
        0usize..5,
        prop::array::uniform8(any::<bool>()),
        prop::array::uniform7(any::<bool>()),
        prop::option::of(prop_oneof![Just(Axis::Horizontal), Just(Axis::Vertical)]),
    )
        .prop_map(|(child_count, a, b, segmented)| LayoutSignature {
            child_count,
            absolute_child: a[0],
            single_text_child: a[1],
            relative_child: a[2],
            segmented,
            line_break: a[3],
            needs_bias: a[4],
            float_left: a[5],
            float_right: a[6],
            linear_x: a[7],
            linear_y: b[0],
            right_float_row: b[1],
            constraint_layout: b[2],
            baseline_compatible: b[3],
            float_clear: b[4],
            aligned_vertically: b[5],
        })
}

// ========== Determinism ==========

proptest! {
    #[test]
    fn test_classify_is_deterministic(signature in arb_signature()) {
        prop_assert_eq!(classify(&signature), classify(&signature));
    }

    #[test]
    fn test_any_hint_selects_constraint(hints in prop::array::uniform5(any::<bool>())) {
        let constraint = ConstraintHints {
            flex_baseline: hints[0],
            right_or_center: hints[1],
            percent_width: hints[2],
            clipped_background: hints[3],
            horizontal_bias: hints[4],
        };
        prop_assert_eq!(is_constraint_layout(&constraint), hints.iter().any(|&h| h));
    }
}

#[test]
fn test_signature_is_stable_across_calls() {
    let (tree, root) = parent_with(
        StyleMap::from([("text-align", "center")]),
        vec![span(0.0, StyleMap::new()), span(100.0, StyleMap::new())],
    );
    assert_eq!(signature(&tree, root, 1.0), signature(&tree, root, 1.0));
}

// ========== Constraint hints ==========

#[test]
fn test_no_hint_is_linear_row() {
    let (tree, root) = parent_with(
        StyleMap::new(),
        vec![span(0.0, StyleMap::new()), span(100.0, StyleMap::new())],
    );
    let signature = signature(&tree, root, 1.0);
    assert!(signature.linear_x);
    assert!(!signature.constraint_layout);
    assert_eq!(classify(&signature).container, ContainerType::Linear);
}

#[test]
fn test_flex_baseline_hint() {
    let (tree, root) = parent_with(
        StyleMap::from([("display", "flex"), ("align-items", "baseline")]),
        vec![span(0.0, StyleMap::new()), span(100.0, StyleMap::new())],
    );
    assert!(signature(&tree, root, 1.0).constraint_layout);
    assert!(is_constraint_layout(&ConstraintHints {
        flex_baseline: true,
        ..ConstraintHints::default()
    }));
}

#[test]
fn test_text_align_hint() {
    let (tree, root) = parent_with(
        StyleMap::from([("text-align", "right")]),
        vec![span(100.0, StyleMap::new()), span(200.0, StyleMap::new())],
    );
    let signature = signature(&tree, root, 1.0);
    assert!(signature.constraint_layout);
    assert!(signature.needs_bias);
    assert!(is_constraint_layout(&ConstraintHints {
        right_or_center: true,
        ..ConstraintHints::default()
    }));
}

#[test]
fn test_percent_width_hint() {
    let (tree, root) = parent_with(
        StyleMap::new(),
        vec![
            span(0.0, StyleMap::from([("display", "inline-block"), ("width", "50%")])),
            span(100.0, StyleMap::new()),
        ],
    );
    assert!(signature(&tree, root, 1.0).constraint_layout);

    let (tree, root) = parent_with(
        StyleMap::new(),
        vec![
            span(0.0, StyleMap::from([("width", "100%")])),
            span(100.0, StyleMap::new()),
        ],
    );
    assert!(!signature(&tree, root, 1.0).constraint_layout);
}

#[test]
fn test_clipped_background_hint() {
    let (tree, root) = parent_with(
        StyleMap::from([("background-color", "red"), ("overflow", "hidden")]),
        vec![span(0.0, StyleMap::new()), span(100.0, StyleMap::new())],
    );
    assert!(signature(&tree, root, 1.0).constraint_layout);

    let (tree, root) = parent_with(
        StyleMap::from([("overflow", "hidden")]),
        vec![span(0.0, StyleMap::new()), span(100.0, StyleMap::new())],
    );
    assert!(!signature(&tree, root, 1.0).constraint_layout);
}

#[test]
fn test_auto_margin_hint() {
    let (tree, root) = parent_with(
        StyleMap::new(),
        vec![
            span(
                0.0,
                StyleMap::from([("margin-left", "auto"), ("margin-right", "auto")]),
            ),
            span(100.0, StyleMap::new()),
        ],
    );
    let signature = signature(&tree, root, 1.0);
    assert!(signature.constraint_layout);
    assert!(signature.needs_bias);
}

// ========== Precedence ==========

#[test]
fn test_absolute_child_wins() {
    let decision = classify(&LayoutSignature {
        child_count: 1,
        absolute_child: true,
        single_text_child: true,
        linear_x: true,
        ..LayoutSignature::default()
    });
    assert_eq!(decision.container, ContainerType::Constraint);
    assert!(decision.alignment.contains(AlignmentType::ABSOLUTE));
}

#[test]
fn test_single_child_cases() {
    let text = classify(&LayoutSignature {
        child_count: 1,
        single_text_child: true,
        ..LayoutSignature::default()
    });
    assert_eq!(text.container, ContainerType::Text);
    assert_eq!(text.action, ClassifyAction::AbsorbText);

    let relative = classify(&LayoutSignature {
        child_count: 1,
        relative_child: true,
        segmented: Some(Axis::Horizontal),
        ..LayoutSignature::default()
    });
    assert_eq!(relative.container, ContainerType::Relative);

    let segmented = classify(&LayoutSignature {
        child_count: 1,
        segmented: Some(Axis::Vertical),
        ..LayoutSignature::default()
    });
    assert_eq!(segmented.container, ContainerType::Linear);
    assert!(segmented.alignment.contains(AlignmentType::VERTICAL));

    let plain = classify(&LayoutSignature {
        child_count: 1,
        ..LayoutSignature::default()
    });
    assert_eq!(plain.container, ContainerType::Frame);
}

#[test]
fn test_line_break_before_floats() {
    let decision = classify(&LayoutSignature {
        child_count: 3,
        line_break: true,
        float_left: true,
        float_right: true,
        ..LayoutSignature::default()
    });
    assert_eq!(decision.container, ContainerType::Linear);
    assert_eq!(decision.action, ClassifyAction::GroupRows);

    let biased = classify(&LayoutSignature {
        child_count: 3,
        line_break: true,
        needs_bias: true,
        ..LayoutSignature::default()
    });
    assert_eq!(biased.container, ContainerType::Constraint);
}

#[test]
fn test_two_sided_floats_are_constraint() {
    let decision = classify(&LayoutSignature {
        child_count: 3,
        float_left: true,
        float_right: true,
        linear_x: true,
        ..LayoutSignature::default()
    });
    assert_eq!(decision.container, ContainerType::Constraint);
    assert_eq!(decision.alignment, AlignmentType::FLOAT | AlignmentType::BLOCK);
}

#[test]
fn test_horizontal_row_cases() {
    let row = |extra: LayoutSignature| {
        classify(&LayoutSignature {
            child_count: 2,
            linear_x: true,
            ..extra
        })
    };
    let split = row(LayoutSignature {
        right_float_row: true,
        constraint_layout: true,
        ..LayoutSignature::default()
    });
    assert_eq!(split.container, ContainerType::Frame);
    assert_eq!(split.action, ClassifyAction::SplitFloatRight);

    let constraint = row(LayoutSignature {
        constraint_layout: true,
        baseline_compatible: true,
        ..LayoutSignature::default()
    });
    assert_eq!(constraint.container, ContainerType::Constraint);

    let linear = row(LayoutSignature {
        baseline_compatible: true,
        ..LayoutSignature::default()
    });
    assert_eq!(linear.container, ContainerType::Linear);
    assert_eq!(linear.alignment, AlignmentType::HORIZONTAL);

    let relative = row(LayoutSignature::default());
    assert_eq!(relative.container, ContainerType::Relative);
}

#[test]
fn test_vertical_stack_cases() {
    let stack = |extra: LayoutSignature| {
        classify(&LayoutSignature {
            child_count: 2,
            linear_y: true,
            ..extra
        })
    };
    let floats = stack(LayoutSignature {
        float_left: true,
        float_clear: true,
        relative_child: true,
        ..LayoutSignature::default()
    });
    assert_eq!(floats.container, ContainerType::Constraint);
    assert!(floats.alignment.contains(AlignmentType::FLOAT));

    let relative = stack(LayoutSignature {
        relative_child: true,
        ..LayoutSignature::default()
    });
    assert_eq!(relative.container, ContainerType::Relative);

    assert_eq!(stack(LayoutSignature::default()).container, ContainerType::Linear);
}

#[test]
fn test_fallback_is_constraint() {
    let decision = classify(&LayoutSignature {
        child_count: 2,
        ..LayoutSignature::default()
    });
    assert_eq!(decision.container, ContainerType::Constraint);
    assert_eq!(decision.alignment, AlignmentType::UNKNOWN);
    assert_eq!(decision.action, ClassifyAction::None);
}

// ========== Tree decisions ==========

#[test]
fn test_single_text_child_is_absorbed() {
    let (mut tree, root) = parent_with(
        StyleMap::new(),
        vec![SourceNode::text("Hello", BoxRect::new(0.0, 0.0, 40.0, 20.0))],
    );
    process_unknown_parent(&mut tree, &session(), root);
    assert_eq!(tree[root].container_type, ContainerType::Text);
    assert_eq!(tree[root].text.as_deref(), Some("Hello"));
    assert!(tree.layout_children(root).is_empty());
}

#[test]
fn test_multi_line_content_groups_rows() {
    let block = SourceNode::element("div", StyleMap::new(), BoxRect::new(0.0, 20.0, 300.0, 20.0));
    let (mut tree, root) = parent_with(
        StyleMap::new(),
        vec![span(0.0, StyleMap::new()), span(100.0, StyleMap::new()), block],
    );
    let before = tree.layout_children(root);
    process_unknown_parent(&mut tree, &session(), root);

    assert_eq!(tree[root].container_type, ContainerType::Linear);
    assert!(tree[root].alignment.contains(AlignmentType::VERTICAL));
    assert!(tree[root].alignment.contains(AlignmentType::SEGMENTED));

    let rows = tree.layout_children(root);
    assert_eq!(rows.len(), 2);
    let group = rows[0];
    assert_eq!(tree[group].origin, ViewOrigin::Group);
    assert_eq!(tree[group].container_type, ContainerType::Linear);
    assert_eq!(tree.layout_children(group), vec![before[0], before[1]]);
    assert_eq!(rows[1], before[2]);
}

#[test]
fn test_control_tag_ignores_children() {
    let mut source = SourceTree::new();
    let button = source.alloc(SourceNode::element(
        "button",
        StyleMap::new(),
        BoxRect::new(0.0, 0.0, 80.0, 30.0),
    ));
    let label = source.alloc(SourceNode::text("Go", BoxRect::new(10.0, 5.0, 20.0, 20.0)));
    source.append_child(button, label);
    let mut tree = ViewTree::from_source(&source);
    let Some(root) = tree.root() else {
        unreachable!("source has a root");
    };
    process_unknown_parent(&mut tree, &session(), root);
    assert_eq!(tree[root].container_type, ContainerType::Button);
    assert_eq!(tree[root].text.as_deref(), Some("Go"));
}
