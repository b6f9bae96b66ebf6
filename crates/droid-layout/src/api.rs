//! Android API level gating of attributes.
//!
//! [Android API levels](https://developer.android.com/tools/releases/platforms)
//!
//! Finalization runs three passes over each view's attributes:
//!
//! 1. RTL localization: left/right attributes become start/end when the
//!    target supports it ([`localized`]).
//! 2. [`API_VERSION`]: attributes newer than the target are renamed, expanded
//!    into per-edge attributes, or dropped.
//! 3. [`DEPRECATED_ATTRIBUTE`]: deprecated attributes are replaced by their
//!    successor name and value.

use crate::config::ConversionConfig;
use crate::node::{Attr, AttributeStore};

/// Lowest supported API level (Android 4.0).
pub const MIN_API: u32 = 14;
/// Android 4.2, first release with start/end attributes.
pub const JELLYBEAN_1: u32 = 17;
/// Android 5.0, first release with GridLayout weights.
pub const LOLLIPOP: u32 = 21;
/// Android 8.0, first release with horizontal/vertical margin shorthands.
pub const OREO: u32 = 26;
/// Highest supported API level (Android 11).
pub const MAX_API: u32 = 30;

/// What to do with an attribute the target API does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Remove it.
    Drop,
    /// Use another attribute with the same value.
    Rename(Attr),
    /// Copy the value into each listed attribute.
    Expand(&'static [Attr]),
}

/// Minimum API level of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiRule {
    /// Gated attribute.
    pub attr: Attr,
    /// First API level that understands it.
    pub min_api: u32,
    /// Substitution below that level.
    pub fallback: Fallback,
}

/// Attributes introduced after [`MIN_API`].
pub const API_VERSION: &[ApiRule] = &[
    ApiRule {
        attr: Attr::LayoutMarginHorizontal,
        min_api: OREO,
        fallback: Fallback::Expand(&[Attr::LayoutMarginLeft, Attr::LayoutMarginRight]),
    },
    ApiRule {
        attr: Attr::LayoutMarginVertical,
        min_api: OREO,
        fallback: Fallback::Expand(&[Attr::LayoutMarginTop, Attr::LayoutMarginBottom]),
    },
    ApiRule {
        attr: Attr::PaddingHorizontal,
        min_api: OREO,
        fallback: Fallback::Expand(&[Attr::PaddingLeft, Attr::PaddingRight]),
    },
    ApiRule {
        attr: Attr::PaddingVertical,
        min_api: OREO,
        fallback: Fallback::Expand(&[Attr::PaddingTop, Attr::PaddingBottom]),
    },
    ApiRule {
        attr: Attr::LayoutMarginStart,
        min_api: JELLYBEAN_1,
        fallback: Fallback::Rename(Attr::LayoutMarginLeft),
    },
    ApiRule {
        attr: Attr::LayoutMarginEnd,
        min_api: JELLYBEAN_1,
        fallback: Fallback::Rename(Attr::LayoutMarginRight),
    },
    ApiRule {
        attr: Attr::PaddingStart,
        min_api: JELLYBEAN_1,
        fallback: Fallback::Rename(Attr::PaddingLeft),
    },
    ApiRule {
        attr: Attr::PaddingEnd,
        min_api: JELLYBEAN_1,
        fallback: Fallback::Rename(Attr::PaddingRight),
    },
    ApiRule {
        attr: Attr::AlignParentStart,
        min_api: JELLYBEAN_1,
        fallback: Fallback::Rename(Attr::AlignParentLeft),
    },
    ApiRule {
        attr: Attr::AlignParentEnd,
        min_api: JELLYBEAN_1,
        fallback: Fallback::Rename(Attr::AlignParentRight),
    },
    ApiRule {
        attr: Attr::ToStartOf,
        min_api: JELLYBEAN_1,
        fallback: Fallback::Rename(Attr::ToLeftOf),
    },
    ApiRule {
        attr: Attr::ToEndOf,
        min_api: JELLYBEAN_1,
        fallback: Fallback::Rename(Attr::ToRightOf),
    },
    ApiRule {
        attr: Attr::AlignStart,
        min_api: JELLYBEAN_1,
        fallback: Fallback::Rename(Attr::AlignLeft),
    },
    ApiRule {
        attr: Attr::AlignEnd,
        min_api: JELLYBEAN_1,
        fallback: Fallback::Rename(Attr::AlignRight),
    },
    ApiRule {
        attr: Attr::LayoutRowWeight,
        min_api: LOLLIPOP,
        fallback: Fallback::Drop,
    },
    ApiRule {
        attr: Attr::LayoutColumnWeight,
        min_api: LOLLIPOP,
        fallback: Fallback::Drop,
    },
];

/// A deprecated attribute and its replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeprecatedRule {
    /// Deprecated attribute.
    pub attr: Attr,
    /// Replacement attribute.
    pub replacement: Attr,
    /// Replacement value when the deprecated one is set to `when`.
    pub value: &'static str,
    /// Value of the deprecated attribute that triggers the rule.
    pub when: &'static str,
}

/// Deprecated attributes.
pub const DEPRECATED_ATTRIBUTE: &[DeprecatedRule] = &[DeprecatedRule {
    attr: Attr::SingleLine,
    replacement: Attr::MaxLines,
    value: "1",
    when: "true",
}];

/// Start/end form of a left/right attribute.
#[must_use]
pub const fn localized(attr: Attr) -> Attr {
    match attr {
        Attr::LeftToLeftOf => Attr::StartToStartOf,
        Attr::LeftToRightOf => Attr::StartToEndOf,
        Attr::RightToRightOf => Attr::EndToEndOf,
        Attr::RightToLeftOf => Attr::EndToStartOf,
        Attr::LayoutMarginLeft => Attr::LayoutMarginStart,
        Attr::LayoutMarginRight => Attr::LayoutMarginEnd,
        Attr::PaddingLeft => Attr::PaddingStart,
        Attr::PaddingRight => Attr::PaddingEnd,
        Attr::AlignParentLeft => Attr::AlignParentStart,
        Attr::AlignParentRight => Attr::AlignParentEnd,
        Attr::ToLeftOf => Attr::ToStartOf,
        Attr::ToRightOf => Attr::ToEndOf,
        Attr::AlignLeft => Attr::AlignStart,
        Attr::AlignRight => Attr::AlignEnd,
        other => other,
    }
}

/// Start/end form of a gravity value (`left|top` → `start|top`).
#[must_use]
pub fn localized_gravity(value: &str) -> String {
    value
        .split('|')
        .map(|part| match part {
            "left" => "start",
            "right" => "end",
            other => other,
        })
        .collect::<Vec<_>>()
        .join("|")
}

/// Apply RTL localization, API gating and deprecation rules in place.
pub fn finalize_attributes(store: &mut AttributeStore, config: &ConversionConfig) {
    if config.localize_rtl() {
        localize_store(store);
    }
    apply_api_version(store, config.target_api);
    apply_deprecated(store);
}

fn localize_store(store: &mut AttributeStore) {
    let entries: Vec<(Attr, String)> = store
        .iter()
        .map(|(attr, value)| (attr, value.to_string()))
        .collect();
    for (attr, value) in entries {
        let target = localized(attr);
        if target != attr {
            let _ = store.remove(attr);
            let _ = store.set_if_absent(target, value);
        }
    }
    for attr in [Attr::Gravity, Attr::LayoutGravity] {
        if let Some(value) = store.get(attr).map(localized_gravity) {
            let _ = store.set(attr, value);
        }
    }
}

/// Apply [`API_VERSION`] for `api`.
pub fn apply_api_version(store: &mut AttributeStore, api: u32) {
    for rule in API_VERSION {
        if api >= rule.min_api {
            continue;
        }
        let Some(value) = store.remove(rule.attr) else {
            continue;
        };
        tracing::trace!(attr = %rule.attr, api, "attribute unsupported by target api");
        match rule.fallback {
            Fallback::Drop => {}
            Fallback::Rename(replacement) => {
                let _ = store.set_if_absent(replacement, value);
            }
            Fallback::Expand(replacements) => {
                for replacement in replacements {
                    let _ = store.set_if_absent(*replacement, value.clone());
                }
            }
        }
    }
}

/// Apply [`DEPRECATED_ATTRIBUTE`].
pub fn apply_deprecated(store: &mut AttributeStore) {
    for rule in DEPRECATED_ATTRIBUTE {
        if store.get(rule.attr) == Some(rule.when) {
            let _ = store.remove(rule.attr);
            let _ = store.set_if_absent(rule.replacement, rule.value);
        }
    }
}
