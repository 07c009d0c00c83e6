//! Axes, surface handles, and measurement for Unfold

mod axis;
mod measure;
mod surface;

pub use axis::*;
pub use measure::*;
pub use surface::*;

pub mod prelude {
    pub use crate::axis::{Axis, Direction};
    pub use crate::measure::{measure, Extent};
    pub use crate::surface::{merge_refs, RefHandle, Surface, SurfaceId, SurfaceRef};
}
