//! State shared by every stage of one conversion run.

use std::collections::{HashMap, HashSet};

use droid_common::Diagnostics;

use crate::config::ConversionConfig;
use crate::constraint::helper::GuidelineValue;
use crate::node::{Axis, BarrierDirection, ViewId};

/// A memoized guideline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct GuidelineEntry {
    pub parent: ViewId,
    pub orientation: Axis,
    pub value: GuidelineValue,
    pub view: ViewId,
}

/// A memoized barrier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BarrierEntry {
    pub parent: ViewId,
    pub direction: BarrierDirection,
    pub referenced: Vec<ViewId>,
    pub view: ViewId,
}

/// Id counters, helper memo tables and diagnostics of one run.
///
/// Nothing here outlives the run, so concurrent conversions never share
/// state.
#[derive(Debug, Default)]
pub struct ConversionSession {
    /// Settings, read-only for the run.
    pub config: ConversionConfig,
    /// Deduplicated warnings.
    pub diagnostics: Diagnostics,
    counters: HashMap<String, usize>,
    used_ids: HashSet<String>,
    pub(crate) guidelines: Vec<GuidelineEntry>,
    pub(crate) barriers: Vec<BarrierEntry>,
}

impl ConversionSession {
    /// Fresh session for `config`.
    #[must_use]
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Next unused generated id for `prefix` (`textview_1`, `textview_2`).
    pub fn next_control_id(&mut self, prefix: &str) -> String {
        loop {
            let counter = self.counters.entry(prefix.to_string()).or_insert(0);
            *counter += 1;
            let candidate = format!("{prefix}_{counter}");
            if self.used_ids.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    /// Claim an id derived from a source `id` attribute, falling back to a
    /// generated one when it is empty or already taken.
    pub fn claim_control_id(&mut self, source_id: &str, prefix: &str) -> String {
        let name: String = source_id
            .trim()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect();
        let name = name.trim_matches('_');
        if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
            return self.next_control_id(prefix);
        }
        if self.used_ids.insert(name.to_string()) {
            return name.to_string();
        }
        self.next_control_id(name)
    }

    /// Number of ids handed out.
    #[must_use]
    pub fn id_count(&self) -> usize {
        self.used_ids.len()
    }
}
