//! Conversion warnings with deduplication.
//!
//! Avoids spamming the same warning multiple times. Used by the facade,
//! classifier and adapters to report CSS they cannot express on Android.
//!
//! Every conversion run owns one [`Diagnostics`] sink, so two runs never see
//! each other's warnings.

use std::collections::HashSet;

/// Deduplicated warning sink for a single conversion run.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    /// Keys of warnings already reported.
    seen: HashSet<String>,
    /// Reported warnings in emission order.
    messages: Vec<String>,
}

impl Diagnostics {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Warn about an unsupported feature (recorded once per unique message).
    ///
    /// Returns `true` when the message was new.
    ///
    /// # Example
    /// ```
    /// let mut diagnostics = droid_common::Diagnostics::new();
    /// assert!(diagnostics.warn_once("CSS", "unsupported unit 'vmin' in width"));
    /// assert!(!diagnostics.warn_once("CSS", "unsupported unit 'vmin' in width"));
    /// ```
    pub fn warn_once(&mut self, component: &str, message: &str) -> bool {
        let key = format!("[{component}] {message}");
        if !self.seen.insert(key.clone()) {
            return false;
        }
        tracing::warn!(component = %component, "{message}");
        self.messages.push(key);
        true
    }

    /// Warnings reported so far, formatted as `[component] message`.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Number of distinct warnings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether nothing has been reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Clear all recorded warnings.
    pub fn clear(&mut self) {
        self.seen.clear();
        self.messages.clear();
    }
}
