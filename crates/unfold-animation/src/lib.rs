//! Expand/collapse transitions for surfaces of unknown natural size
//!
//! [`CollapseTransition`] turns an `opened` flag into a sequence of style
//! commits spread over rendering frames: un-hide, measure, animate to the
//! measured size, then release the pinned size once the surface reports the
//! transition finished. Closing mirrors it. The style and event wiring for a
//! surface comes from [`CollapseTransition::props`].

mod collapse;
mod config;
mod event;
mod props;
mod timing;

pub use collapse::*;
pub use config::*;
pub use event::*;
pub use props::*;
pub use timing::*;

pub mod prelude {
    pub use crate::collapse::{CollapsePhase, CollapseTransition};
    pub use crate::config::CollapseConfig;
    pub use crate::event::TransitionEvent;
    pub use crate::props::{PropValue, Props, PropsInput};
}
