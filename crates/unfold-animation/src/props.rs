//! Binding a [`CollapseTransition`] onto a surface's props.

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use unfold_ui_layout::{merge_refs, RefHandle, Surface};
use unfold_ui_style::{Style, StyleProperty, StyleValue};

use crate::collapse::{CollapseTransition, TransitionEndHandler};
use crate::config::DEFAULT_REF_KEY;
use crate::event::TransitionEvent;

pub const ARIA_HIDDEN: &str = "aria-hidden";
pub const STYLE_PROP: &str = "style";
pub const ON_TRANSITION_END: &str = "onTransitionEnd";

/// A single prop value handed to the host.
#[derive(Clone)]
pub enum PropValue {
    Bool(bool),
    Text(Cow<'static, str>),
    Number(f64),
    Style(Style),
    Ref(RefHandle),
    OnTransitionEnd(TransitionEndHandler),
}

impl PropValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_style(&self) -> Option<&Style> {
        match self {
            PropValue::Style(style) => Some(style),
            _ => None,
        }
    }

    pub fn as_ref_handle(&self) -> Option<&RefHandle> {
        match self {
            PropValue::Ref(handle) => Some(handle),
            _ => None,
        }
    }

    pub fn as_transition_end_handler(&self) -> Option<&TransitionEndHandler> {
        match self {
            PropValue::OnTransitionEnd(handler) => Some(handler),
            _ => None,
        }
    }
}

impl fmt::Debug for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            PropValue::Text(value) => f.debug_tuple("Text").field(value).finish(),
            PropValue::Number(value) => f.debug_tuple("Number").field(value).finish(),
            PropValue::Style(style) => f.debug_tuple("Style").field(style).finish(),
            PropValue::Ref(handle) => f.debug_tuple("Ref").field(handle).finish(),
            PropValue::OnTransitionEnd(_) => f.write_str("OnTransitionEnd(..)"),
        }
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<&'static str> for PropValue {
    fn from(value: &'static str) -> Self {
        PropValue::Text(Cow::Borrowed(value))
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(Cow::Owned(value))
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Number(value)
    }
}

impl From<Style> for PropValue {
    fn from(style: Style) -> Self {
        PropValue::Style(style)
    }
}

impl From<RefHandle> for PropValue {
    fn from(handle: RefHandle) -> Self {
        PropValue::Ref(handle)
    }
}

/// Caller-supplied props to merge with the transition's own.
///
/// Anything in `rest` is forwarded untouched, except that a ref stored under
/// the ref key, a `style` and an `onTransitionEnd` entry are composed the
/// same way as the dedicated fields.
#[derive(Clone, Default)]
pub struct PropsInput {
    pub style: Option<Style>,
    pub ref_key: Option<String>,
    pub on_transition_end: Option<TransitionEndHandler>,
    pub rest: IndexMap<String, PropValue>,
}

impl PropsInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn ref_key(mut self, key: impl Into<String>) -> Self {
        self.ref_key = Some(key.into());
        self
    }

    pub fn on_transition_end(mut self, handler: impl Fn(&TransitionEvent) + 'static) -> Self {
        self.on_transition_end = Some(Rc::new(handler));
        self
    }

    pub fn prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.rest.insert(key.into(), value.into());
        self
    }
}

/// Props for the collapsing surface, in insertion order.
#[derive(Clone)]
pub struct Props {
    ref_key: String,
    entries: IndexMap<String, PropValue>,
}

impl Props {
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.entries.get(key)
    }

    pub fn style(&self) -> Option<&Style> {
        self.get(STYLE_PROP).and_then(PropValue::as_style)
    }

    pub fn aria_hidden(&self) -> Option<bool> {
        self.get(ARIA_HIDDEN).and_then(PropValue::as_bool)
    }

    /// Key the measuring ref was placed under.
    pub fn ref_key(&self) -> &str {
        &self.ref_key
    }

    pub fn ref_handle(&self) -> Option<&RefHandle> {
        self.get(&self.ref_key).and_then(PropValue::as_ref_handle)
    }

    pub fn transition_end_handler(&self) -> Option<&TransitionEndHandler> {
        self.get(ON_TRANSITION_END)
            .and_then(PropValue::as_transition_end_handler)
    }

    /// Binds (`Some`) or unbinds (`None`) the rendered surface through the
    /// composed ref.
    pub fn bind_surface(&self, surface: Option<&Rc<dyn Surface>>) {
        if let Some(handle) = self.ref_handle() {
            handle.set(surface);
        }
    }

    /// Delivers a transition-end event the way a host would.
    pub fn dispatch_transition_end(&self, event: &TransitionEvent) {
        if let Some(handler) = self.transition_end_handler() {
            handler(event);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Props {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl CollapseTransition {
    /// Builds the props for the collapsing surface.
    ///
    /// `aria-hidden` mirrors the flag unless the caller overrides it. The
    /// measuring ref is merged with any caller ref under the same key, the
    /// transition-end handler runs before the caller's, and the style
    /// layers `box-sizing: border-box`, then the caller's style, then the
    /// current snapshot.
    pub fn props(&self, input: PropsInput) -> Props {
        let PropsInput {
            style,
            ref_key,
            on_transition_end,
            mut rest,
        } = input;
        let ref_key = ref_key.unwrap_or_else(|| DEFAULT_REF_KEY.to_owned());

        let caller_ref = rest
            .shift_remove(&ref_key)
            .and_then(|value| match value {
                PropValue::Ref(handle) => Some(handle),
                other => {
                    log::trace!("ignoring non-ref value under `{ref_key}`: {other:?}");
                    None
                }
            });
        let rest_handler = rest
            .shift_remove(ON_TRANSITION_END)
            .and_then(|value| match value {
                PropValue::OnTransitionEnd(handler) => Some(handler),
                other => {
                    log::trace!(
                        "ignoring non-handler value under `{ON_TRANSITION_END}`: {other:?}"
                    );
                    None
                }
            });
        let rest_style = rest
            .shift_remove(STYLE_PROP)
            .and_then(|value| match value {
                PropValue::Style(style) => Some(style),
                other => {
                    log::trace!("ignoring non-style value under `{STYLE_PROP}`: {other:?}");
                    None
                }
            });
        let caller_handler = on_transition_end.or(rest_handler);
        let caller_style = style.or(rest_style);

        let mut entries = IndexMap::with_capacity(rest.len() + 4);
        entries.insert(ARIA_HIDDEN.to_owned(), PropValue::Bool(!self.opened()));
        entries.extend(rest);

        let own_ref = RefHandle::from(self.surface_ref());
        let merged_ref = match caller_ref {
            Some(caller_ref) => merge_refs([own_ref, caller_ref]),
            None => own_ref,
        };
        entries.insert(ref_key.clone(), PropValue::Ref(merged_ref));

        let own_handler = self.transition_end_handler();
        let handler: TransitionEndHandler = match caller_handler {
            Some(caller_handler) => Rc::new(move |event: &TransitionEvent| {
                own_handler(event);
                caller_handler(event);
            }),
            None => own_handler,
        };
        entries.insert(
            ON_TRANSITION_END.to_owned(),
            PropValue::OnTransitionEnd(handler),
        );

        let mut merged_style = Style::new().with(
            StyleProperty::BoxSizing,
            StyleValue::keyword("border-box"),
        );
        if let Some(caller_style) = &caller_style {
            merged_style.merge(caller_style);
        }
        merged_style.merge(&self.style());
        entries.insert(STYLE_PROP.to_owned(), PropValue::Style(merged_style));

        Props { ref_key, entries }
    }
}

#[cfg(test)]
#[path = "tests/props_tests.rs"]
mod tests;
