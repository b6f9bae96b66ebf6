//! Common utilities for the droid converter.
//!
//! This crate provides shared infrastructure used by all converter components:
//! - **Warning System** - deduplicated diagnostics for unsupported features
//! - **Math** - truncation, tolerance comparison and attribute number formatting

pub mod math;
pub mod warning;

pub use math::{format_float, truncate, within_range};
pub use warning::Diagnostics;
