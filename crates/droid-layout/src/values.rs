//! Typed CSS values read by the layout stages.
//!
//! [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//!
//! The facade already holds computed values, so parsing here only splits
//! keywords and units. Anything unrecognized maps to the property's initial
//! behaviour and the caller reports it through the session diagnostics.

use droid_dom::DEFAULT_FONT_SIZE_PX;

/// [§ 4.1 Lengths](https://www.w3.org/TR/css-values-4/#lengths)
/// "Lengths refer to distance measurements."
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CssLength {
    /// [§ 6.1 Absolute lengths](https://www.w3.org/TR/css-values-4/#absolute-lengths)
    Px(f64),
    /// [§ 4.3 Percentages](https://www.w3.org/TR/css-values-4/#percentages),
    /// stored as a fraction.
    Percent(f64),
    /// [§ 5.1.1 Font-relative lengths](https://www.w3.org/TR/css-values-4/#font-relative-lengths)
    /// "Equal to the computed value of the font-size property of the element"
    Em(f64),
    /// "Equal to the computed value of font-size on the root element."
    Rem(f64),
    /// `auto`, `none`, `normal` and other keywords without a length.
    Auto,
}

impl CssLength {
    /// Parse a computed length. Returns `None` for unsupported units.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        match value {
            "" | "auto" | "none" | "normal" | "initial" | "fit-content" | "max-content"
            | "min-content" => return Some(Self::Auto),
            _ => {}
        }
        if let Some(number) = value.strip_suffix('%') {
            return parse_number(number).map(|n| Self::Percent(n / 100.0));
        }
        if let Some(number) = value.strip_suffix("rem") {
            return parse_number(number).map(Self::Rem);
        }
        if let Some(number) = value.strip_suffix("em") {
            return parse_number(number).map(Self::Em);
        }
        if let Some(number) = value.strip_suffix("px") {
            return parse_number(number).map(Self::Px);
        }
        // Unitless zero is a valid length.
        parse_number(value).filter(|n| *n == 0.0).map(Self::Px)
    }

    /// Pixel value against `reference` (for percentages) and `font_size`
    /// (for `em`). `Auto` has no pixel value.
    #[must_use]
    pub fn to_px(self, font_size: f64, reference: f64) -> Option<f64> {
        match self {
            Self::Px(px) => Some(px),
            Self::Percent(fraction) => Some(fraction * reference),
            Self::Em(em) => Some(em * font_size),
            Self::Rem(rem) => Some(rem * DEFAULT_FONT_SIZE_PX),
            Self::Auto => None,
        }
    }

    /// Whether the length needs no reference box.
    #[must_use]
    pub const fn is_absolute(self) -> bool {
        matches!(self, Self::Px(_) | Self::Em(_) | Self::Rem(_))
    }

    /// Fraction of a percentage.
    #[must_use]
    pub const fn percent(self) -> Option<f64> {
        match self {
            Self::Percent(fraction) => Some(fraction),
            _ => None,
        }
    }
}

/// Parse a plain number.
#[must_use]
pub fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// [§ 7.1 text-align](https://www.w3.org/TR/css-text-3/#text-align-property)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlign {
    /// `start`, `left`
    #[default]
    Start,
    /// `center`
    Center,
    /// `end`, `right`
    End,
    /// `justify`
    Justify,
}

impl TextAlign {
    /// Parse `text-align`, treating the page as left-to-right.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "center" | "-webkit-center" => Self::Center,
            "right" | "end" | "-webkit-right" => Self::End,
            "justify" => Self::Justify,
            _ => Self::Start,
        }
    }

    /// Horizontal bias placing inline content.
    #[must_use]
    pub const fn bias(self) -> f64 {
        match self {
            Self::Start | Self::Justify => 0.0,
            Self::Center => 0.5,
            Self::End => 1.0,
        }
    }
}

/// [§ 10.8.1 vertical-align](https://www.w3.org/TR/CSS2/visudet.html#propdef-vertical-align)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum VerticalAlign {
    /// "Align the baseline of the box with the baseline of the parent box."
    #[default]
    Baseline,
    /// "Align the vertical midpoint of the box with the baseline of the
    /// parent box plus half the x-height of the parent."
    Middle,
    /// "Align the top of the aligned subtree with the top of the line box."
    Top,
    /// "Align the top of the box with the top of the parent's content area."
    TextTop,
    /// "Align the bottom of the aligned subtree with the bottom of the line box."
    Bottom,
    /// "Align the bottom of the box with the bottom of the parent's content area."
    TextBottom,
    /// "Lower the baseline of the box to the proper position for subscripts."
    Sub,
    /// "Raise the baseline of the box to the proper position for superscripts."
    Super,
    /// "Raise (positive value) or lower (negative value) the box by this distance."
    Length(f64),
}

impl VerticalAlign {
    /// Parse `vertical-align`; percentages resolve against `line_height`.
    #[must_use]
    pub fn parse(value: &str, font_size: f64, line_height: f64) -> Self {
        match value {
            "middle" => Self::Middle,
            "top" => Self::Top,
            "text-top" => Self::TextTop,
            "bottom" => Self::Bottom,
            "text-bottom" => Self::TextBottom,
            "sub" => Self::Sub,
            "super" => Self::Super,
            other => CssLength::parse(other)
                .and_then(|length| length.to_px(font_size, line_height))
                .map_or(Self::Baseline, Self::Length),
        }
    }
}

/// [§ 5.1 flex-direction](https://www.w3.org/TR/css-flexbox-1/#flex-direction-property)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlexDirection {
    /// Main axis is horizontal.
    #[default]
    Row,
    /// Horizontal, reversed.
    RowReverse,
    /// Main axis is vertical.
    Column,
    /// Vertical, reversed.
    ColumnReverse,
}

impl FlexDirection {
    /// Parse `flex-direction`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "row-reverse" => Self::RowReverse,
            "column" => Self::Column,
            "column-reverse" => Self::ColumnReverse,
            _ => Self::Row,
        }
    }

    /// Whether the main axis is horizontal.
    #[must_use]
    pub const fn is_row(self) -> bool {
        matches!(self, Self::Row | Self::RowReverse)
    }

    /// Whether items run against the axis.
    #[must_use]
    pub const fn is_reverse(self) -> bool {
        matches!(self, Self::RowReverse | Self::ColumnReverse)
    }
}

/// [§ 5.2 flex-wrap](https://www.w3.org/TR/css-flexbox-1/#flex-wrap-property)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlexWrap {
    /// Single line.
    #[default]
    NoWrap,
    /// Multiple lines, cross-start to cross-end.
    Wrap,
    /// Multiple lines, cross-end to cross-start.
    WrapReverse,
}

impl FlexWrap {
    /// Parse `flex-wrap`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "wrap" => Self::Wrap,
            "wrap-reverse" => Self::WrapReverse,
            _ => Self::NoWrap,
        }
    }
}

/// [§ 8.2 justify-content](https://www.w3.org/TR/css-flexbox-1/#justify-content-property)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Justify {
    /// Packed at the main-start edge.
    #[default]
    Start,
    /// Packed in the middle.
    Center,
    /// Packed at the main-end edge.
    End,
    /// First and last items flush, equal space between.
    SpaceBetween,
    /// Half-size space at both ends.
    SpaceAround,
    /// Equal space everywhere.
    SpaceEvenly,
}

impl Justify {
    /// Parse `justify-content`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "center" => Self::Center,
            "flex-end" | "end" | "right" => Self::End,
            "space-between" => Self::SpaceBetween,
            "space-around" => Self::SpaceAround,
            "space-evenly" => Self::SpaceEvenly,
            _ => Self::Start,
        }
    }

    /// The same distribution with start and end swapped.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Start,
            other => other,
        }
    }
}

/// [§ 8.3 align-items](https://www.w3.org/TR/css-flexbox-1/#align-items-property)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlignItems {
    /// Fill the cross size of the line.
    #[default]
    Stretch,
    /// Cross-start edge.
    Start,
    /// Centered in the line.
    Center,
    /// Cross-end edge.
    End,
    /// Baselines aligned.
    Baseline,
}

impl AlignItems {
    /// Parse `align-items` / `align-self` / `justify-self`. `auto` yields
    /// `None` so the container value applies.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "auto" => None,
            "flex-start" | "start" | "self-start" | "left" => Some(Self::Start),
            "center" => Some(Self::Center),
            "flex-end" | "end" | "self-end" | "right" => Some(Self::End),
            "baseline" | "first baseline" | "last baseline" => Some(Self::Baseline),
            _ => Some(Self::Stretch),
        }
    }
}

/// [§ 7.2 Explicit track sizing](https://www.w3.org/TR/css-grid-1/#track-sizing)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackSize {
    /// Fixed pixel size.
    Fixed(f64),
    /// Percentage of the grid container, as a fraction.
    Percent(f64),
    /// "flexible length ... a fraction of the leftover space"
    Fr(f64),
    /// Sized by content.
    Auto,
}

impl TrackSize {
    fn parse(value: &str, font_size: f64) -> Option<Self> {
        let value = value.trim();
        if let Some(inner) = value.strip_prefix("minmax(").and_then(|v| v.strip_suffix(')')) {
            // The maximum decides how the track flexes; a fixed minimum of an
            // auto maximum still fixes it.
            let (min, max) = inner.split_once(',')?;
            return match Self::parse(max, font_size)? {
                Self::Auto => Self::parse(min, font_size),
                other => Some(other),
            };
        }
        if let Some(number) = value.strip_suffix("fr") {
            return parse_number(number).map(Self::Fr);
        }
        match CssLength::parse(value)? {
            CssLength::Auto => Some(Self::Auto),
            CssLength::Percent(fraction) => Some(Self::Percent(fraction)),
            length => length.to_px(font_size, 0.0).map(Self::Fixed),
        }
    }
}

/// Split on whitespace outside parentheses.
fn split_top_level(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = None;
    for (i, c) in value.char_indices() {
        match c {
            '(' => {
                depth += 1;
                start.get_or_insert(i);
            }
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    parts.push(&value[s..i]);
                }
            }
            _ => {
                start.get_or_insert(i);
            }
        }
    }
    if let Some(s) = start {
        parts.push(&value[s..]);
    }
    parts
}

/// Parse `grid-template-columns` / `grid-template-rows`.
///
/// [§ 7.2.3 repeat()](https://www.w3.org/TR/css-grid-1/#repeat-notation)
/// Integer `repeat()` counts are expanded; `auto-fill`/`auto-fit` and line
/// names are not supported and make the whole list fail.
#[must_use]
pub fn parse_track_list(value: &str, font_size: f64) -> Option<Vec<TrackSize>> {
    let value = value.trim();
    if value == "none" || value.is_empty() {
        return Some(Vec::new());
    }
    let mut tracks = Vec::new();
    for part in split_top_level(value) {
        if let Some(inner) = part.strip_prefix("repeat(").and_then(|v| v.strip_suffix(')')) {
            let (count, list) = inner.split_once(',')?;
            let count = count.trim().parse::<usize>().ok()?;
            let repeated = parse_track_list(list, font_size)?;
            for _ in 0..count {
                tracks.extend_from_slice(&repeated);
            }
        } else {
            tracks.push(TrackSize::parse(part, font_size)?);
        }
    }
    Some(tracks)
}

/// [§ 8.3 Line-based placement](https://www.w3.org/TR/css-grid-1/#line-placement)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GridLine {
    /// Automatic placement.
    #[default]
    Auto,
    /// 1-based line number; negative counts from the end.
    Line(i32),
    /// Span of tracks.
    Span(u32),
}

impl GridLine {
    /// Parse `grid-column-start` and friends.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if let Some(span) = value.strip_prefix("span") {
            return span
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .map_or(Self::Span(1), Self::Span);
        }
        value
            .parse::<i32>()
            .ok()
            .filter(|n| *n != 0)
            .map_or(Self::Auto, Self::Line)
    }
}

/// [§ 7.7 grid-auto-flow](https://www.w3.org/TR/css-grid-1/#grid-auto-flow-property)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GridAutoFlow {
    /// Fill rows first.
    #[default]
    Row,
    /// Fill columns first.
    Column,
}

impl GridAutoFlow {
    /// Parse `grid-auto-flow` (`dense` is ignored).
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.split_whitespace().any(|part| part == "column") {
            Self::Column
        } else {
            Self::Row
        }
    }
}
