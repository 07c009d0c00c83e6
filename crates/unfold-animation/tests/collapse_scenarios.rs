/// End-to-end open/close runs against a simulated surface.
/// Each test drives real frames and lets the surface produce the
/// transition-end events, so the whole commit/measure/settle loop is covered.
use std::cell::RefCell;
use std::rc::Rc;

use unfold_animation::{
    collapsed_style, CollapseConfig, CollapsePhase, PropsInput, TransitionEvent,
};
use unfold_testing::{CollapseTestRule, DEFAULT_CONTENT_HEIGHT};
use unfold_ui_layout::{Axis, Direction, SurfaceId};
use unfold_ui_style::{StyleProperty, StyleValue, TimingFunction};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn transition_text(rule: &CollapseTestRule) -> Option<String> {
    rule.style()
        .get(&StyleProperty::Transition)
        .map(ToString::to_string)
}

#[test]
fn opening_animates_to_measured_size_and_releases_it() {
    init_logging();
    let mut rule = CollapseTestRule::new(false, CollapseConfig::default());
    rule.set_opened(true);

    rule.advance_frame();
    assert_eq!(
        rule.style().to_css_string(),
        "display: block; height: 0px; overflow: hidden; will-change: height"
    );

    rule.advance_frame();
    assert_eq!(
        rule.style().get(&StyleProperty::Height),
        Some(&StyleValue::Px(200))
    );
    assert_eq!(transition_text(&rule).as_deref(), Some("height 281ms ease"));
    assert_eq!(rule.phase(), CollapsePhase::Opening);

    let frames = rule.run_until_settled();
    assert!(frames >= 16, "settled after {frames} frames, before 281ms elapsed");
    assert_eq!(rule.phase(), CollapsePhase::Open);
    assert!(rule.style().is_empty());
    assert_eq!(rule.completions(), 1);
    assert_eq!(rule.commits().len(), 3);
    assert_eq!(
        rule.surface().rendered_extent(Axis::Vertical),
        DEFAULT_CONTENT_HEIGHT
    );
}

#[test]
fn closing_pins_size_then_collapses_and_hides() {
    init_logging();
    let mut rule = CollapseTestRule::with_content(true, CollapseConfig::default(), 150, 320);
    rule.set_opened(false);

    rule.advance_frame();
    assert_eq!(
        rule.style().get(&StyleProperty::Height),
        Some(&StyleValue::Px(150))
    );
    assert_eq!(transition_text(&rule).as_deref(), Some("height 263ms ease"));
    assert_eq!(
        rule.style().get(&StyleProperty::WillChange),
        Some(&StyleValue::keyword("height"))
    );

    rule.advance_frame();
    assert_eq!(
        rule.style().get(&StyleProperty::Height),
        Some(&StyleValue::Px(0))
    );
    assert!(rule.surface().is_transitioning());

    rule.run_until_settled();
    assert_eq!(rule.phase(), CollapsePhase::Closed);
    assert_eq!(rule.style(), collapsed_style(Axis::Vertical));
    assert!(rule.surface().is_hidden());
    assert_eq!(rule.completions(), 1);
}

#[test]
fn foreign_and_unrelated_events_are_ignored() {
    init_logging();
    let mut rule = CollapseTestRule::new(false, CollapseConfig::default());
    rule.set_opened(true);
    rule.advance_frames(2);
    let before = rule.style();
    let commits = rule.commits().len();

    // A descendant finishing its own height transition bubbles up.
    rule.dispatch(&TransitionEvent::new(SurfaceId::next(), "height"));
    rule.dispatch(&TransitionEvent::new(rule.surface().id(), "opacity"));

    assert_eq!(rule.style(), before);
    assert_eq!(rule.commits().len(), commits);
    assert_eq!(rule.completions(), 0);

    rule.run_until_settled();
    assert_eq!(rule.completions(), 1);
}

#[test]
fn content_reflow_during_opening_retargets_once() {
    init_logging();
    let mut rule = CollapseTestRule::new(false, CollapseConfig::default());
    rule.set_opened(true);
    rule.advance_frames(2);
    rule.surface().set_content_extent(Axis::Vertical, 260);

    rule.run_until_settled();

    let retargeted = rule
        .commits()
        .iter()
        .any(|style| style.get(&StyleProperty::Height) == Some(&StyleValue::Px(260)));
    assert!(retargeted, "expected a commit pinning the reflowed size");
    assert_eq!(rule.phase(), CollapsePhase::Open);
    assert!(rule.style().is_empty());
    assert_eq!(rule.completions(), 1);
    assert_eq!(rule.surface().rendered_extent(Axis::Vertical), 260);
}

#[test]
fn rapid_toggles_before_a_frame_run_only_the_last_sequence() {
    init_logging();
    let mut rule = CollapseTestRule::new(false, CollapseConfig::default());
    rule.set_opened(true);
    rule.set_opened(false);
    rule.set_opened(true);

    rule.run_until_settled();
    assert_eq!(rule.phase(), CollapsePhase::Open);
    assert_eq!(rule.commits().len(), 3);
    assert_eq!(rule.completions(), 1);
}

#[test]
fn reversing_mid_expansion_closes_from_current_size() {
    init_logging();
    let mut rule = CollapseTestRule::new(false, CollapseConfig::default());
    rule.set_opened(true);
    rule.advance_frames(7);
    let mid = rule.surface().rendered_extent(Axis::Vertical);
    assert!(mid > 0 && mid < 200, "expected a mid-flight height, got {mid}");

    rule.set_opened(false);
    rule.advance_frames(2);
    let shrinking = rule.surface().active_transition(Axis::Vertical);
    assert_eq!(shrinking.as_ref().map(|transition| transition.to), Some(0));
    assert!(shrinking.is_some_and(|transition| transition.from > 0.0));

    rule.run_until_settled();
    assert_eq!(rule.phase(), CollapsePhase::Closed);
    assert!(rule.surface().is_hidden());
    // The abandoned open never completed.
    assert_eq!(rule.completions(), 1);
}

#[test]
fn duplicate_end_events_after_settling_are_no_ops() {
    init_logging();
    let mut rule = CollapseTestRule::new(false, CollapseConfig::default());
    rule.set_opened(true);
    rule.run_until_settled();
    let commits = rule.commits().len();

    rule.finish_transition();
    rule.finish_transition();

    assert_eq!(rule.completions(), 1);
    assert_eq!(rule.commits().len(), commits);
    assert_eq!(rule.phase(), CollapsePhase::Open);
}

#[test]
fn horizontal_direction_animates_width() {
    init_logging();
    let config = CollapseConfig::new().with_direction(Direction::X);
    let mut rule = CollapseTestRule::with_content(false, config, 200, 320);
    rule.set_opened(true);
    rule.advance_frames(2);

    assert_eq!(
        rule.style().get(&StyleProperty::Width),
        Some(&StyleValue::Px(320))
    );
    assert!(!rule.style().contains(&StyleProperty::Height));
    assert_eq!(transition_text(&rule).as_deref(), Some("width 317ms ease"));

    rule.run_until_settled();
    assert_eq!(rule.phase(), CollapsePhase::Open);
    assert_eq!(rule.completions(), 1);

    rule.set_opened(false);
    rule.run_until_settled();
    assert_eq!(rule.style(), collapsed_style(Axis::Horizontal));
    assert_eq!(rule.completions(), 2);
}

#[test]
fn explicit_timing_is_used_verbatim() {
    init_logging();
    let config = CollapseConfig::new()
        .with_duration(500)
        .with_timing_function(TimingFunction::EaseInOut);
    let mut rule = CollapseTestRule::new(false, config);
    rule.set_opened(true);
    rule.advance_frames(2);
    assert_eq!(
        transition_text(&rule).as_deref(),
        Some("height 500ms ease-in-out")
    );

    let frames = rule.run_until_settled();
    assert!(frames >= 29, "settled after {frames} frames, before 500ms elapsed");
    assert_eq!(rule.completions(), 1);
}

#[test]
fn unmounted_surface_opens_without_animating() {
    init_logging();
    let mut rule = CollapseTestRule::new(false, CollapseConfig::default());
    rule.unmount();
    rule.set_opened(true);
    rule.advance_frames(2);

    let commits = rule.commits();
    assert_eq!(commits.len(), 3);
    assert_eq!(
        commits[1].get(&StyleProperty::Height),
        Some(&StyleValue::Auto)
    );
    assert!(commits[2].is_empty());
    assert_eq!(rule.phase(), CollapsePhase::Open);
    assert_eq!(rule.completions(), 1);
    assert!(!rule.runtime_handle().needs_frame());
}

#[test]
fn open_then_close_before_a_frame_settles_closed() {
    init_logging();
    let mut rule = CollapseTestRule::new(false, CollapseConfig::default());
    rule.set_opened(true);
    rule.set_opened(false);

    rule.run_until_settled();
    assert_eq!(rule.phase(), CollapsePhase::Closed);
    assert_eq!(rule.style(), collapsed_style(Axis::Vertical));
    assert!(rule.surface().is_hidden());
    // Only the close sequence ran; it settles once.
    assert_eq!(rule.completions(), 1);
    assert!(rule.commits().iter().all(|style| style.is_hidden()));
}

#[test]
fn close_then_reopen_before_a_frame_settles_open() {
    init_logging();
    let mut rule = CollapseTestRule::new(true, CollapseConfig::default());
    rule.set_opened(false);
    rule.set_opened(true);

    rule.run_until_settled();
    assert_eq!(rule.phase(), CollapsePhase::Open);
    assert!(rule.style().is_empty());
    assert!(!rule.surface().is_hidden());
    assert_eq!(
        rule.surface().rendered_extent(Axis::Vertical),
        DEFAULT_CONTENT_HEIGHT
    );
    // Nothing pinned the height, so the open settles without an end event.
    assert_eq!(rule.completions(), 1);
    assert_eq!(rule.commits().len(), 3);
}

#[test]
fn caller_handler_observes_every_event() {
    init_logging();
    let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let input = {
        let seen = Rc::clone(&seen);
        PropsInput::new()
            .on_transition_end(move |event| seen.borrow_mut().push(event.property_name.to_string()))
    };
    let mut rule =
        CollapseTestRule::with_props(false, CollapseConfig::default(), 200, 320, input);
    rule.set_opened(true);
    rule.advance_frames(2);
    rule.dispatch(&TransitionEvent::new(SurfaceId::next(), "opacity"));
    rule.run_until_settled();

    assert_eq!(seen.borrow().as_slice(), ["opacity", "height"]);
    assert_eq!(rule.completions(), 1);
}

#[test]
fn repeated_cycles_complete_each_time() {
    init_logging();
    let mut rule = CollapseTestRule::new(false, CollapseConfig::default());
    for cycle in 1..=3 {
        rule.toggle();
        rule.run_until_settled();
        assert_eq!(rule.phase(), CollapsePhase::Open);
        rule.toggle();
        rule.run_until_settled();
        assert_eq!(rule.phase(), CollapsePhase::Closed);
        assert_eq!(rule.completions(), cycle * 2);
    }
    assert_eq!(
        rule.transition().props(PropsInput::new()).aria_hidden(),
        Some(true)
    );
}
