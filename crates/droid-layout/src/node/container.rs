//! Android control and container kinds.

use serde::Serialize;
use strum_macros::Display;

/// The Android widget a view renders as.
///
/// Containers (`Frame` through `Constraint`) hold children; helpers
/// (`Guideline`, `Barrier`) only exist inside a ConstraintLayout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ContainerType {
    /// Not yet classified.
    #[default]
    Unknown,
    /// `<input type="checkbox">`
    Checkbox,
    /// `<input type="radio">`
    Radio,
    /// Text inputs and `<textarea>`.
    Edit,
    /// `<select>`
    Select,
    /// `<input type="range">`
    Range,
    /// Inline `<svg>`.
    Svg,
    /// Text-bearing element.
    Text,
    /// `<img>` and image inputs.
    Image,
    /// Buttons and button-like inputs.
    Button,
    /// Bare text run between elements.
    Inline,
    /// `<hr>`
    Line,
    /// Invisible spacer.
    Space,
    /// Empty box with a visible background or border.
    Block,
    /// FrameLayout
    Frame,
    /// LinearLayout
    Linear,
    /// GridLayout
    Grid,
    /// RelativeLayout
    Relative,
    /// ConstraintLayout
    Constraint,
    /// ConstraintLayout guideline helper.
    Guideline,
    /// ConstraintLayout barrier helper.
    Barrier,
    /// `<progress>` and `<meter>`.
    Progress,
}

impl ContainerType {
    /// Fully qualified widget class emitted as the XML element name.
    #[must_use]
    pub const fn control_name(self) -> &'static str {
        match self {
            Self::Unknown | Self::Line | Self::Block => "View",
            Self::Checkbox => "CheckBox",
            Self::Radio => "RadioButton",
            Self::Edit => "EditText",
            Self::Select => "Spinner",
            Self::Range => "SeekBar",
            Self::Svg | Self::Image => "ImageView",
            Self::Text | Self::Inline => "TextView",
            Self::Button => "Button",
            Self::Space => "Space",
            Self::Frame => "FrameLayout",
            Self::Linear => "LinearLayout",
            Self::Grid => "GridLayout",
            Self::Relative => "RelativeLayout",
            Self::Constraint => "androidx.constraintlayout.widget.ConstraintLayout",
            Self::Guideline => "androidx.constraintlayout.widget.Guideline",
            Self::Barrier => "androidx.constraintlayout.widget.Barrier",
            Self::Progress => "ProgressBar",
        }
    }

    /// Prefix for generated control ids.
    #[must_use]
    pub fn id_prefix(self) -> String {
        let name = self.control_name();
        name.rsplit('.').next().unwrap_or(name).to_ascii_lowercase()
    }

    /// Whether the widget is a `ViewGroup`.
    #[must_use]
    pub const fn is_layout(self) -> bool {
        matches!(
            self,
            Self::Frame | Self::Linear | Self::Grid | Self::Relative | Self::Constraint
        )
    }

    /// Whether children of this container position through anchors.
    #[must_use]
    pub const fn supports_anchor(self) -> bool {
        matches!(self, Self::Constraint | Self::Relative)
    }

    /// Guideline or barrier.
    #[must_use]
    pub const fn is_helper(self) -> bool {
        matches!(self, Self::Guideline | Self::Barrier)
    }

    /// Whether the widget exposes a text baseline.
    #[must_use]
    pub const fn has_baseline(self) -> bool {
        matches!(
            self,
            Self::Text
                | Self::Inline
                | Self::Edit
                | Self::Button
                | Self::Select
                | Self::Checkbox
                | Self::Radio
        )
    }

    /// Whether the widget derives from `TextView` or `ImageView`, the only
    /// widgets honouring `android:maxWidth` / `android:maxHeight`.
    #[must_use]
    pub const fn accepts_max_dimension(self) -> bool {
        matches!(
            self,
            Self::Text
                | Self::Inline
                | Self::Edit
                | Self::Button
                | Self::Checkbox
                | Self::Radio
                | Self::Image
                | Self::Svg
        )
    }
}
