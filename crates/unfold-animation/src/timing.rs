//! Transition timing derived from the measured size.

use unfold_ui_layout::{Axis, Extent};
use unfold_ui_style::{TimingFunction, TransitionDecl};

use crate::config::CollapseConfig;

/// Duration in milliseconds for animating across `extent`.
///
/// Grows quickly for small panels and sub-linearly for large ones:
/// `round(10 * (4 + 15 * (s / 36)^0.25 + s / 180))`. Nothing to animate
/// (zero or unconstrained) yields 0.
pub fn auto_size_duration(extent: Extent) -> u64 {
    let size = match extent {
        Extent::Px(0) | Extent::Unconstrained => return 0,
        Extent::Px(px) => f64::from(px),
    };
    let constant = size / 36.0;
    ((4.0 + 15.0 * constant.powf(0.25) + constant / 5.0) * 10.0).round() as u64
}

/// Duration and easing for one transition run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingConfig {
    pub duration_millis: u64,
    pub timing_function: TimingFunction,
}

impl TimingConfig {
    /// Resolves timing for a run that animates across `extent`.
    pub fn resolve(config: &CollapseConfig, extent: Extent) -> Self {
        Self {
            duration_millis: config
                .explicit_duration()
                .unwrap_or_else(|| auto_size_duration(extent)),
            timing_function: config.transition_timing_function,
        }
    }

    /// The `transition` declaration for `axis`.
    pub fn declaration(&self, axis: Axis) -> TransitionDecl {
        TransitionDecl::new(
            axis.style_property(),
            self.duration_millis,
            self.timing_function,
        )
    }
}

#[cfg(test)]
#[path = "tests/timing_tests.rs"]
mod tests;
