//! Layout engine of the droid converter: rendered HTML boxes in, Android
//! view hierarchy out.
//!
//! # Scope
//!
//! This crate implements:
//! - **Container Classifier** - picks LinearLayout, FrameLayout,
//!   RelativeLayout, GridLayout or ConstraintLayout for each element from
//!   its children's flow, floats and geometry
//! - **Anchor/Constraint Engine** ([ConstraintLayout](https://developer.android.com/reference/androidx/constraintlayout/widget/ConstraintLayout))
//!   - Parent and sibling anchors, biases and chains
//!   - Guidelines and barriers, memoized per run
//!   - Baseline rows, float rows, absolute positioning
//! - **Dimension Resolver** ([§ 10 Visual formatting model details](https://www.w3.org/TR/CSS2/visudet.html))
//!   - `match_parent`, `wrap_content`, fixed and `0px` sizes
//!   - Percent widths, min/max sizes, flex grow/shrink weights
//! - **Box-Spacing Resolver** ([§ 8 Box model](https://www.w3.org/TR/CSS2/box.html))
//!   - Negative margins as translations
//!   - Merged margin and padding attributes
//! - **Layout Adapters** - flexbox, CSS grid, tables, multi-column, and
//!   wrappers for percent margins, max sizes and overflow
//! - **API Tables** - RTL localization and API-level substitutions
//!
//! # Not Yet Implemented
//!
//! - List, RadioGroup and ScrollView adapters
//! - `grid-template-areas` and named grid lines

/// Layouts with no one-to-one Android container.
pub mod adapters;
/// API-level and deprecation rules.
pub mod api;
/// Margins, padding and translations.
pub mod box_spacing;
/// Container classification.
pub mod classifier;
/// Conversion settings.
pub mod config;
/// Anchors, chains and helpers.
pub mod constraint;
/// The conversion pipeline.
pub mod controller;
/// Width and height modes.
pub mod dimension;
/// Serializable output.
pub mod document;
/// The view model.
pub mod node;
/// Per-run state.
pub mod session;
/// View arena.
pub mod tree;
/// Typed CSS values.
pub mod values;

pub use config::{ConfigError, ConversionConfig};
pub use controller::{convert, convert_tree};
pub use document::{LayoutDocument, RenderedView};
pub use node::{ContainerType, View, ViewId};
pub use session::ConversionSession;
pub use tree::ViewTree;
