use super::*;
use unfold_ui_layout::Direction;
use unfold_ui_style::{StyleProperty, TimingFunction};

#[test]
fn nothing_to_animate_takes_no_time() {
    assert_eq!(auto_size_duration(Extent::Px(0)), 0);
    assert_eq!(auto_size_duration(Extent::Unconstrained), 0);
}

#[test]
fn duration_for_typical_panel() {
    // 200 / 36 = 5.555..; 10 * (4 + 15 * 1.5353.. + 1.111..) = 281.4
    assert_eq!(auto_size_duration(Extent::Px(200)), 281);
    assert_eq!(auto_size_duration(Extent::Px(36)), 192);
}

#[test]
fn duration_grows_with_size() {
    let mut previous = 0;
    for px in [1, 10, 36, 100, 200, 500, 1_000, 5_000, 20_000] {
        let duration = auto_size_duration(Extent::Px(px));
        assert!(
            duration > previous,
            "{px}px took {duration}ms, expected more than {previous}ms"
        );
        previous = duration;
    }
}

#[test]
fn explicit_duration_overrides_heuristic() {
    let config = CollapseConfig::new().with_duration(500);
    let timing = TimingConfig::resolve(&config, Extent::Px(200));
    assert_eq!(timing.duration_millis, 500);
    assert_eq!(
        TimingConfig::resolve(&config, Extent::Unconstrained).duration_millis,
        500
    );
}

#[test]
fn zero_duration_falls_back_to_heuristic() {
    let config = CollapseConfig::new().with_duration(0);
    assert_eq!(config.explicit_duration(), None);
    assert_eq!(
        TimingConfig::resolve(&config, Extent::Px(200)).duration_millis,
        281
    );
}

#[test]
fn declaration_names_axis_property() {
    let config = CollapseConfig::new()
        .with_direction(Direction::X)
        .with_timing_function(TimingFunction::Linear);
    let timing = TimingConfig::resolve(&config, Extent::Px(200));
    let decl = timing.declaration(config.axis());

    assert_eq!(decl.property, StyleProperty::Width);
    assert_eq!(decl.timing_function, TimingFunction::Linear);
    assert_eq!(decl.to_string(), "width 281ms linear");
}
