use super::*;
use crate::{TimingFunction, TransitionDecl};

#[test]
fn merge_overrides_existing_values_in_place() {
    let base = Style::new()
        .with(StyleProperty::Display, StyleValue::keyword("none"))
        .with(StyleProperty::Height, 0)
        .with(StyleProperty::Overflow, StyleValue::keyword("hidden"));
    let patch = Style::new()
        .with(StyleProperty::WillChange, StyleValue::keyword("height"))
        .with(StyleProperty::Display, StyleValue::keyword("block"));

    let merged = base.merged(&patch);

    assert_eq!(
        merged.to_css_string(),
        "display: block; height: 0px; overflow: hidden; will-change: height"
    );
    assert!(!merged.is_hidden());
}

#[test]
fn hidden_only_for_display_none() {
    let hidden = Style::new().with(StyleProperty::Display, StyleValue::keyword("none"));
    assert!(hidden.is_hidden());
    assert!(!Style::new().is_hidden());
}

#[test]
fn transition_value_renders_as_declaration() {
    let decl = TransitionDecl::new(StyleProperty::Height, 281, TimingFunction::Ease);
    let style = Style::new().with(StyleProperty::Transition, decl.clone());

    assert_eq!(style.to_css_string(), "transition: height 281ms ease");
    assert_eq!(
        style.get(&StyleProperty::Transition).and_then(StyleValue::as_transition),
        Some(&decl)
    );
}

#[test]
fn custom_properties_round_trip_through_names() {
    assert_eq!(StyleProperty::from_name("will-change"), StyleProperty::WillChange);
    let custom = StyleProperty::from_name("background-color");
    assert_eq!(custom, StyleProperty::Custom("background-color".into()));
    assert_eq!(custom.name(), "background-color");
}

#[test]
fn remove_keeps_remaining_order() {
    let mut style: Style = [
        (StyleProperty::Height, StyleValue::Px(10)),
        (StyleProperty::Overflow, StyleValue::keyword("hidden")),
        (StyleProperty::Width, StyleValue::Auto),
    ]
    .into_iter()
    .collect();

    assert_eq!(style.remove(&StyleProperty::Overflow), Some(StyleValue::keyword("hidden")));
    assert_eq!(style.len(), 2);
    assert_eq!(style.to_string(), "{height: 10px; width: auto}");
}
