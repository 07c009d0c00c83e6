use std::fmt;

use crate::style::StyleProperty;
use crate::timing_function::TimingFunction;

/// One `transition` declaration: which property animates, for how long, and
/// along which curve. Renders as `height 281ms ease`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionDecl {
    pub property: StyleProperty,
    pub duration_millis: u64,
    pub timing_function: TimingFunction,
}

impl TransitionDecl {
    pub fn new(
        property: StyleProperty,
        duration_millis: u64,
        timing_function: TimingFunction,
    ) -> Self {
        Self {
            property,
            duration_millis,
            timing_function,
        }
    }

    /// A zero-length declaration changes the value without animating.
    pub fn is_instant(&self) -> bool {
        self.duration_millis == 0
    }
}

impl fmt::Display for TransitionDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}ms {}",
            self.property, self.duration_millis, self.timing_function
        )
    }
}
