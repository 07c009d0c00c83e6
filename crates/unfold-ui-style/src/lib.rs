//! Pure style data for Unfold
//!
//! This crate contains the style snapshot handed to a rendered surface, the
//! values it can hold, and the easing curves named by transition
//! declarations. Nothing here knows about frames or measurement.

mod style;
mod timing_function;
mod transition;

pub use style::*;
pub use timing_function::*;
pub use transition::*;

pub mod prelude {
    pub use crate::style::{Style, StyleProperty, StyleValue};
    pub use crate::timing_function::TimingFunction;
    pub use crate::transition::TransitionDecl;
}
