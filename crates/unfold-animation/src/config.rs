use unfold_ui_layout::{Axis, Direction};
use unfold_ui_style::{TimingFunction, DEFAULT_TIMING_FUNCTION};

/// Prop key the measuring ref is attached under unless a caller names another.
pub const DEFAULT_REF_KEY: &str = "ref";

/// Tuning for a [`CollapseTransition`](crate::CollapseTransition).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollapseConfig {
    /// Fixed duration in milliseconds. `None` (or zero) derives the duration
    /// from the measured size.
    pub transition_duration: Option<u64>,
    pub transition_timing_function: TimingFunction,
    pub direction: Direction,
}

impl CollapseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duration(mut self, duration_millis: u64) -> Self {
        self.transition_duration = Some(duration_millis);
        self
    }

    pub fn with_timing_function(mut self, timing_function: TimingFunction) -> Self {
        self.transition_timing_function = timing_function;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn axis(&self) -> Axis {
        self.direction.axis()
    }

    /// The configured duration, if it overrides the size heuristic.
    pub fn explicit_duration(&self) -> Option<u64> {
        self.transition_duration.filter(|duration| *duration > 0)
    }
}

impl Default for CollapseConfig {
    fn default() -> Self {
        Self {
            transition_duration: None,
            transition_timing_function: DEFAULT_TIMING_FUNCTION,
            direction: Direction::Y,
        }
    }
}
