//! Computed CSS values of a source node.
//!
//! The facade receives values already resolved by the cascade. Properties the
//! producer did not emit fall back to their CSS initial value, and `display`
//! falls back to the HTML rendering default for the element.

use std::collections::HashMap;

use serde::Deserialize;

/// Computed style declarations keyed by property name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct StyleMap(HashMap<String, String>);

impl StyleMap {
    /// Empty style map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a declaration, returning the previous value.
    pub fn set(&mut self, name: &str, value: &str) -> Option<String> {
        self.0
            .insert(name.to_ascii_lowercase(), value.trim().to_string())
    }

    /// The declared value, if the producer emitted one.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Whether the producer emitted a value for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// The declared value, or the property's initial value.
    #[must_use]
    pub fn value<'a>(&'a self, name: &str) -> &'a str {
        self.get(name).unwrap_or_else(|| initial_value(name))
    }

    /// Iterate declarations in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<const N: usize> From<[(&str, &str); N]> for StyleMap {
    fn from(pairs: [(&str, &str); N]) -> Self {
        let mut map = Self::new();
        for (name, value) in pairs {
            let _ = map.set(name, value);
        }
        map
    }
}

/// [CSS Values and Units § 6.1 Initial values](https://www.w3.org/TR/css-values-4/#initial-value)
///
/// Initial values of the properties the converter reads. Unknown properties
/// resolve to the empty string.
#[must_use]
pub fn initial_value(name: &str) -> &'static str {
    match name {
        "display" => "inline",
        "position" => "static",
        "float" | "clear" | "max-width" | "max-height" => "none",
        "width" | "height" | "top" | "right" | "bottom" | "left" | "flex-basis"
        | "column-count" | "column-width" | "grid-auto-rows" | "grid-auto-columns"
        | "grid-column-start" | "grid-column-end" | "grid-row-start" | "grid-row-end"
        | "z-index" => "auto",
        "min-width" | "min-height" | "margin-top" | "margin-right" | "margin-bottom"
        | "margin-left" | "padding-top" | "padding-right" | "padding-bottom"
        | "padding-left" | "border-top-width" | "border-right-width"
        | "border-bottom-width" | "border-left-width" | "flex-grow" | "order"
        | "text-indent" => "0",
        "flex-shrink" => "1",
        "box-sizing" => "content-box",
        "text-align" => "start",
        "vertical-align" => "baseline",
        "flex-direction" => "row",
        "flex-wrap" => "nowrap",
        "justify-content" | "align-content" | "justify-items" | "justify-self"
        | "align-self" | "align-items" | "row-gap" | "column-gap" | "line-height" => "normal",
        "grid-template-columns" | "grid-template-rows" | "background-image"
        | "border-top-style" | "border-right-style" | "border-bottom-style"
        | "border-left-style" => "none",
        "grid-auto-flow" => "row",
        "background-color" => "transparent",
        "overflow" => "visible",
        "font-size" => "16px",
        "column-span" => "none",
        "border-spacing" => "2px",
        "direction" => "ltr",
        "visibility" => "visible",
        _ => "",
    }
}

/// Returns the default display value for an HTML element.
///
/// [HTML Living Standard § 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html)
/// [§ 15.3.1 Hidden elements](https://html.spec.whatwg.org/multipage/rendering.html#hidden-elements)
/// [§ 15.3.3 Flow content](https://html.spec.whatwg.org/multipage/rendering.html#flow-content-3)
#[must_use]
pub fn default_display_for_element(tag_name: &str) -> &'static str {
    // "The following elements must have their display set to none"
    let hidden = [
        "area", "base", "basefont", "datalist", "head", "link", "meta", "noembed", "noframes",
        "param", "rp", "script", "style", "template", "title",
    ];
    if hidden.contains(&tag_name) {
        return "none";
    }

    let block_elements = [
        "address",
        "article",
        "aside",
        "blockquote",
        "body",
        "center",
        "dd",
        "details",
        "dialog",
        "div",
        "dl",
        "dt",
        "fieldset",
        "figcaption",
        "figure",
        "footer",
        "form",
        "h1",
        "h2",
        "h3",
        "h4",
        "h5",
        "h6",
        "header",
        "hr",
        "html",
        "legend",
        "main",
        "menu",
        "nav",
        "ol",
        "p",
        "pre",
        "section",
        "summary",
        "ul",
    ];
    if block_elements.contains(&tag_name) {
        return "block";
    }

    match tag_name {
        // [§ 15.3.7 Lists](https://html.spec.whatwg.org/multipage/rendering.html#lists)
        "li" => "list-item",
        // [§ 15.3.8 Tables](https://html.spec.whatwg.org/multipage/rendering.html#tables-2)
        "table" => "table",
        "caption" => "table-caption",
        "thead" => "table-header-group",
        "tbody" => "table-row-group",
        "tfoot" => "table-footer-group",
        "tr" => "table-row",
        "td" | "th" => "table-cell",
        // Form controls are inline-block by default.
        "input" | "button" | "textarea" | "select" | "progress" | "meter" => "inline-block",
        _ => "inline",
    }
}

/// Parse a pixel length (`12px`, `12`, `0`), ignoring whitespace.
#[must_use]
pub fn parse_px(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value);
    number.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse a percentage (`25%`) into a fraction (`0.25`).
#[must_use]
pub fn parse_percent(value: &str) -> Option<f64> {
    value
        .trim()
        .strip_suffix('%')
        .and_then(|n| n.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .map(|n| n / 100.0)
}
