//! Typed Android layout attributes.
//!
//! Attributes are stored by [`Attr`] and only become namespaced strings at the
//! serialization boundary ([`AttributeStore::namespaced`]).

use std::collections::BTreeMap;

use strum_macros::{Display, EnumString, IntoStaticStr};

/// XML namespace of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub enum Namespace {
    /// `http://schemas.android.com/apk/res/android`
    #[strum(serialize = "android")]
    Android,
    /// `http://schemas.android.com/apk/res-auto`
    #[strum(serialize = "app")]
    App,
    /// No prefix.
    #[strum(serialize = "_")]
    Unprefixed,
}

impl Namespace {
    /// Namespace URI declared on the root element, if the namespace has one.
    #[must_use]
    pub const fn uri(self) -> Option<&'static str> {
        match self {
            Self::Android => Some("http://schemas.android.com/apk/res/android"),
            Self::App => Some("http://schemas.android.com/apk/res-auto"),
            Self::Unprefixed => None,
        }
    }
}

/// An Android layout attribute. The strum name is the XML local name.
#[allow(missing_docs)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, IntoStaticStr,
)]
pub enum Attr {
    // android: view basics
    #[strum(serialize = "id")]
    Id,
    #[strum(serialize = "layout_width")]
    LayoutWidth,
    #[strum(serialize = "layout_height")]
    LayoutHeight,
    #[strum(serialize = "orientation")]
    Orientation,
    #[strum(serialize = "gravity")]
    Gravity,
    #[strum(serialize = "layout_gravity")]
    LayoutGravity,
    #[strum(serialize = "layout_weight")]
    LayoutWeight,
    #[strum(serialize = "baselineAligned")]
    BaselineAligned,
    #[strum(serialize = "baselineAlignedChildIndex")]
    BaselineAlignedChildIndex,
    #[strum(serialize = "text")]
    Text,
    #[strum(serialize = "singleLine")]
    SingleLine,
    #[strum(serialize = "maxLines")]
    MaxLines,
    #[strum(serialize = "minWidth")]
    MinWidth,
    #[strum(serialize = "maxWidth")]
    MaxWidth,
    #[strum(serialize = "minHeight")]
    MinHeight,
    #[strum(serialize = "maxHeight")]
    MaxHeight,
    #[strum(serialize = "translationX")]
    TranslationX,
    #[strum(serialize = "translationY")]
    TranslationY,

    // android: margins
    #[strum(serialize = "layout_margin")]
    LayoutMargin,
    #[strum(serialize = "layout_marginTop")]
    LayoutMarginTop,
    #[strum(serialize = "layout_marginRight")]
    LayoutMarginRight,
    #[strum(serialize = "layout_marginBottom")]
    LayoutMarginBottom,
    #[strum(serialize = "layout_marginLeft")]
    LayoutMarginLeft,
    #[strum(serialize = "layout_marginStart")]
    LayoutMarginStart,
    #[strum(serialize = "layout_marginEnd")]
    LayoutMarginEnd,
    #[strum(serialize = "layout_marginHorizontal")]
    LayoutMarginHorizontal,
    #[strum(serialize = "layout_marginVertical")]
    LayoutMarginVertical,

    // android: padding
    #[strum(serialize = "padding")]
    Padding,
    #[strum(serialize = "paddingTop")]
    PaddingTop,
    #[strum(serialize = "paddingRight")]
    PaddingRight,
    #[strum(serialize = "paddingBottom")]
    PaddingBottom,
    #[strum(serialize = "paddingLeft")]
    PaddingLeft,
    #[strum(serialize = "paddingStart")]
    PaddingStart,
    #[strum(serialize = "paddingEnd")]
    PaddingEnd,
    #[strum(serialize = "paddingHorizontal")]
    PaddingHorizontal,
    #[strum(serialize = "paddingVertical")]
    PaddingVertical,

    // android: GridLayout
    #[strum(serialize = "columnCount")]
    ColumnCount,
    #[strum(serialize = "rowCount")]
    RowCount,
    #[strum(serialize = "layout_row")]
    LayoutRow,
    #[strum(serialize = "layout_column")]
    LayoutColumn,
    #[strum(serialize = "layout_rowSpan")]
    LayoutRowSpan,
    #[strum(serialize = "layout_columnSpan")]
    LayoutColumnSpan,
    #[strum(serialize = "layout_rowWeight")]
    LayoutRowWeight,
    #[strum(serialize = "layout_columnWeight")]
    LayoutColumnWeight,

    // android: RelativeLayout
    #[strum(serialize = "layout_alignParentLeft")]
    AlignParentLeft,
    #[strum(serialize = "layout_alignParentRight")]
    AlignParentRight,
    #[strum(serialize = "layout_alignParentStart")]
    AlignParentStart,
    #[strum(serialize = "layout_alignParentEnd")]
    AlignParentEnd,
    #[strum(serialize = "layout_alignParentTop")]
    AlignParentTop,
    #[strum(serialize = "layout_alignParentBottom")]
    AlignParentBottom,
    #[strum(serialize = "layout_centerHorizontal")]
    CenterHorizontal,
    #[strum(serialize = "layout_centerVertical")]
    CenterVertical,
    #[strum(serialize = "layout_toLeftOf")]
    ToLeftOf,
    #[strum(serialize = "layout_toRightOf")]
    ToRightOf,
    #[strum(serialize = "layout_toStartOf")]
    ToStartOf,
    #[strum(serialize = "layout_toEndOf")]
    ToEndOf,
    #[strum(serialize = "layout_above")]
    Above,
    #[strum(serialize = "layout_below")]
    Below,
    #[strum(serialize = "layout_alignLeft")]
    AlignLeft,
    #[strum(serialize = "layout_alignRight")]
    AlignRight,
    #[strum(serialize = "layout_alignStart")]
    AlignStart,
    #[strum(serialize = "layout_alignEnd")]
    AlignEnd,
    #[strum(serialize = "layout_alignTop")]
    AlignTop,
    #[strum(serialize = "layout_alignBottom")]
    AlignBottom,
    #[strum(serialize = "layout_alignBaseline")]
    AlignBaseline,

    // app: ConstraintLayout anchors
    #[strum(serialize = "layout_constraintLeft_toLeftOf")]
    LeftToLeftOf,
    #[strum(serialize = "layout_constraintLeft_toRightOf")]
    LeftToRightOf,
    #[strum(serialize = "layout_constraintRight_toRightOf")]
    RightToRightOf,
    #[strum(serialize = "layout_constraintRight_toLeftOf")]
    RightToLeftOf,
    #[strum(serialize = "layout_constraintStart_toStartOf")]
    StartToStartOf,
    #[strum(serialize = "layout_constraintStart_toEndOf")]
    StartToEndOf,
    #[strum(serialize = "layout_constraintEnd_toEndOf")]
    EndToEndOf,
    #[strum(serialize = "layout_constraintEnd_toStartOf")]
    EndToStartOf,
    #[strum(serialize = "layout_constraintTop_toTopOf")]
    TopToTopOf,
    #[strum(serialize = "layout_constraintTop_toBottomOf")]
    TopToBottomOf,
    #[strum(serialize = "layout_constraintBottom_toBottomOf")]
    BottomToBottomOf,
    #[strum(serialize = "layout_constraintBottom_toTopOf")]
    BottomToTopOf,
    #[strum(serialize = "layout_constraintBaseline_toBaselineOf")]
    BaselineToBaselineOf,

    // app: ConstraintLayout distribution
    #[strum(serialize = "layout_constraintHorizontal_bias")]
    HorizontalBias,
    #[strum(serialize = "layout_constraintVertical_bias")]
    VerticalBias,
    #[strum(serialize = "layout_constraintHorizontal_chainStyle")]
    HorizontalChainStyle,
    #[strum(serialize = "layout_constraintVertical_chainStyle")]
    VerticalChainStyle,
    #[strum(serialize = "layout_constraintHorizontal_weight")]
    HorizontalWeight,
    #[strum(serialize = "layout_constraintVertical_weight")]
    VerticalWeight,
    #[strum(serialize = "layout_constraintWidth_percent")]
    WidthPercent,
    #[strum(serialize = "layout_constraintHeight_percent")]
    HeightPercent,
    #[strum(serialize = "layout_constraintWidth_min")]
    WidthMin,
    #[strum(serialize = "layout_constraintWidth_max")]
    WidthMax,
    #[strum(serialize = "layout_constraintHeight_min")]
    HeightMin,
    #[strum(serialize = "layout_constraintHeight_max")]
    HeightMax,
    #[strum(serialize = "layout_constrainedWidth")]
    ConstrainedWidth,
    #[strum(serialize = "layout_constrainedHeight")]
    ConstrainedHeight,

    // app: helpers
    #[strum(serialize = "layout_constraintGuide_begin")]
    GuideBegin,
    #[strum(serialize = "layout_constraintGuide_percent")]
    GuidePercent,
    #[strum(serialize = "barrierDirection")]
    BarrierDirection,
    #[strum(serialize = "constraint_referenced_ids")]
    ConstraintReferencedIds,

    // unprefixed
    #[strum(serialize = "style")]
    Style,
}

impl Attr {
    /// XML local name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Namespace the attribute belongs to.
    #[must_use]
    pub const fn namespace(self) -> Namespace {
        match self {
            Self::LeftToLeftOf
            | Self::LeftToRightOf
            | Self::RightToRightOf
            | Self::RightToLeftOf
            | Self::StartToStartOf
            | Self::StartToEndOf
            | Self::EndToEndOf
            | Self::EndToStartOf
            | Self::TopToTopOf
            | Self::TopToBottomOf
            | Self::BottomToBottomOf
            | Self::BottomToTopOf
            | Self::BaselineToBaselineOf
            | Self::HorizontalBias
            | Self::VerticalBias
            | Self::HorizontalChainStyle
            | Self::VerticalChainStyle
            | Self::HorizontalWeight
            | Self::VerticalWeight
            | Self::WidthPercent
            | Self::HeightPercent
            | Self::WidthMin
            | Self::WidthMax
            | Self::HeightMin
            | Self::HeightMax
            | Self::ConstrainedWidth
            | Self::ConstrainedHeight
            | Self::GuideBegin
            | Self::GuidePercent
            | Self::BarrierDirection
            | Self::ConstraintReferencedIds => Namespace::App,
            Self::Style => Namespace::Unprefixed,
            _ => Namespace::Android,
        }
    }
}

/// Attribute values of one view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeStore {
    values: BTreeMap<Attr, String>,
}

impl AttributeStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, returning the previous one.
    pub fn set(&mut self, attr: Attr, value: impl Into<String>) -> Option<String> {
        self.values.insert(attr, value.into())
    }

    /// Set a value only when the attribute is absent.
    pub fn set_if_absent(&mut self, attr: Attr, value: impl Into<String>) -> bool {
        if self.values.contains_key(&attr) {
            return false;
        }
        let _ = self.values.insert(attr, value.into());
        true
    }

    /// Current value.
    #[must_use]
    pub fn get(&self, attr: Attr) -> Option<&str> {
        self.values.get(&attr).map(String::as_str)
    }

    /// Whether a value is present.
    #[must_use]
    pub fn contains(&self, attr: Attr) -> bool {
        self.values.contains_key(&attr)
    }

    /// Remove a value.
    pub fn remove(&mut self, attr: Attr) -> Option<String> {
        self.values.remove(&attr)
    }

    /// Remove every attribute in `attrs`.
    pub fn remove_all(&mut self, attrs: &[Attr]) {
        for attr in attrs {
            let _ = self.values.remove(attr);
        }
    }

    /// Attributes in `Attr` order.
    pub fn iter(&self) -> impl Iterator<Item = (Attr, &str)> {
        self.values.iter().map(|(attr, value)| (*attr, value.as_str()))
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Namespace name → attribute name → value, the serializer's view.
    #[must_use]
    pub fn namespaced(&self) -> BTreeMap<String, BTreeMap<String, String>> {
        let mut out: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        for (attr, value) in &self.values {
            let _ = out
                .entry(attr.namespace().to_string())
                .or_default()
                .insert(attr.name().to_string(), value.clone());
        }
        out
    }
}
