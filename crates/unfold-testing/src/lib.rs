//! Testing utilities and harness for Unfold

pub mod surface;
pub mod testing;

pub use surface::*;
pub use testing::*;

pub mod prelude {
    pub use crate::surface::TestSurface;
    pub use crate::testing::{run_collapse_test, CollapseTestRule};
}
