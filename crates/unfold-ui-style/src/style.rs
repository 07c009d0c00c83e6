//! Style snapshots: ordered property → value maps.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;

use crate::transition::TransitionDecl;

/// A style property understood by a rendered surface.
///
/// The properties a collapse transition writes are named variants; anything
/// a caller passes through lands in [`StyleProperty::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Height,
    Width,
    Display,
    Overflow,
    WillChange,
    Transition,
    BoxSizing,
    Custom(String),
}

impl StyleProperty {
    /// CSS-style (kebab-case) name of the property.
    pub fn name(&self) -> &str {
        match self {
            StyleProperty::Height => "height",
            StyleProperty::Width => "width",
            StyleProperty::Display => "display",
            StyleProperty::Overflow => "overflow",
            StyleProperty::WillChange => "will-change",
            StyleProperty::Transition => "transition",
            StyleProperty::BoxSizing => "box-sizing",
            StyleProperty::Custom(name) => name,
        }
    }

    /// Resolves a property from its CSS name. Unknown names become `Custom`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "height" => StyleProperty::Height,
            "width" => StyleProperty::Width,
            "display" => StyleProperty::Display,
            "overflow" => StyleProperty::Overflow,
            "will-change" => StyleProperty::WillChange,
            "transition" => StyleProperty::Transition,
            "box-sizing" => StyleProperty::BoxSizing,
            other => StyleProperty::Custom(other.to_owned()),
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value of a single style property.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// Whole device pixels.
    Px(u32),
    /// Size left to the surface's intrinsic layout.
    Auto,
    /// Any keyword value (`none`, `block`, `hidden`, `height`, ...).
    Keyword(Cow<'static, str>),
    /// A transition declaration for one property.
    Transition(TransitionDecl),
}

impl StyleValue {
    pub const fn keyword(keyword: &'static str) -> Self {
        StyleValue::Keyword(Cow::Borrowed(keyword))
    }

    pub fn as_px(&self) -> Option<u32> {
        match self {
            StyleValue::Px(px) => Some(*px),
            _ => None,
        }
    }

    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            StyleValue::Keyword(keyword) => Some(keyword),
            _ => None,
        }
    }

    pub fn as_transition(&self) -> Option<&TransitionDecl> {
        match self {
            StyleValue::Transition(decl) => Some(decl),
            _ => None,
        }
    }
}

impl From<u32> for StyleValue {
    fn from(px: u32) -> Self {
        StyleValue::Px(px)
    }
}

impl From<TransitionDecl> for StyleValue {
    fn from(decl: TransitionDecl) -> Self {
        StyleValue::Transition(decl)
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Px(px) => write!(f, "{px}px"),
            StyleValue::Auto => f.write_str("auto"),
            StyleValue::Keyword(keyword) => f.write_str(keyword),
            StyleValue::Transition(decl) => write!(f, "{decl}"),
        }
    }
}

/// An ordered set of style declarations.
///
/// Insertion order is preserved so that rendered output is stable; setting
/// an existing property replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    entries: IndexMap<StyleProperty, StyleValue>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Style::set`].
    pub fn with(mut self, property: StyleProperty, value: impl Into<StyleValue>) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: StyleProperty, value: impl Into<StyleValue>) {
        self.entries.insert(property, value.into());
    }

    pub fn get(&self, property: &StyleProperty) -> Option<&StyleValue> {
        self.entries.get(property)
    }

    pub fn contains(&self, property: &StyleProperty) -> bool {
        self.entries.contains_key(property)
    }

    pub fn remove(&mut self, property: &StyleProperty) -> Option<StyleValue> {
        self.entries.shift_remove(property)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StyleProperty, &StyleValue)> {
        self.entries.iter()
    }

    /// Overlays `other` onto `self`; declarations in `other` win.
    pub fn merge(&mut self, other: &Style) {
        for (property, value) in other.iter() {
            self.entries.insert(property.clone(), value.clone());
        }
    }

    /// Consuming form of [`Style::merge`].
    pub fn merged(mut self, other: &Style) -> Self {
        self.merge(other);
        self
    }

    /// True when `display` is the hidden keyword.
    pub fn is_hidden(&self) -> bool {
        self.get(&StyleProperty::Display)
            .and_then(StyleValue::as_keyword)
            == Some("none")
    }

    /// Declaration-block rendering, e.g. `height: 200px; overflow: hidden`.
    pub fn to_css_string(&self) -> String {
        self.entries
            .iter()
            .map(|(property, value)| format!("{property}: {value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl FromIterator<(StyleProperty, StyleValue)> for Style {
    fn from_iter<I: IntoIterator<Item = (StyleProperty, StyleValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.to_css_string())
    }
}

#[cfg(test)]
#[path = "tests/style_tests.rs"]
mod tests;
