//! Conversion settings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::{MAX_API, MIN_API};

/// Errors while reading a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON or has unknown fields.
    #[error("invalid conversion config: {0}")]
    Json(#[from] serde_json::Error),
    /// A tolerance is negative or not finite.
    #[error("{name} must be a non-negative number, got {value}")]
    Tolerance {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
}

/// Settings read by every stage of one conversion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConversionConfig {
    /// Android API level the layout targets.
    pub target_api: u32,
    /// Emit start/end attributes instead of left/right.
    pub support_rtl: bool,
    /// Decimal places kept for bias, percent and weight values.
    pub float_precision: u8,
    /// Pixel distance under which two guidelines are treated as the same.
    pub guideline_tolerance: f64,
    /// Pixel slack when deciding whether boxes share a line.
    pub line_tolerance: f64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            target_api: MAX_API,
            support_rtl: true,
            float_precision: 3,
            guideline_tolerance: 1.0,
            line_tolerance: 1.0,
        }
    }
}

impl ConversionConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for malformed JSON or invalid tolerances.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validated()
    }

    /// Clamp the API level into the supported range and check tolerances.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Tolerance`] for negative or non-finite tolerances.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        for (name, value) in [
            ("guideline_tolerance", self.guideline_tolerance),
            ("line_tolerance", self.line_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Tolerance { name, value });
            }
        }
        self.target_api = self.target_api.clamp(MIN_API, MAX_API);
        self.float_precision = self.float_precision.min(6);
        Ok(self)
    }

    /// Whether left/right attributes localize to start/end.
    #[must_use]
    pub const fn localize_rtl(&self) -> bool {
        self.support_rtl && self.target_api >= crate::api::JELLYBEAN_1
    }
}
