//! Size probing along the active axis.

use std::fmt;

use unfold_ui_style::StyleValue;

use crate::axis::Axis;
use crate::surface::SurfaceRef;

/// Result of measuring a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
    /// Natural content size in pixels.
    Px(u32),
    /// Nothing is attached to measure.
    Unconstrained,
}

impl Extent {
    pub fn px(self) -> Option<u32> {
        match self {
            Extent::Px(px) => Some(px),
            Extent::Unconstrained => None,
        }
    }

    /// The style value that pins a surface to this extent.
    pub fn to_style_value(self) -> StyleValue {
        match self {
            Extent::Px(px) => StyleValue::Px(px),
            Extent::Unconstrained => StyleValue::Auto,
        }
    }

    /// True when `value` is what [`Extent::to_style_value`] would commit.
    pub fn matches(self, value: Option<&StyleValue>) -> bool {
        match (self, value) {
            (Extent::Px(px), Some(StyleValue::Px(committed))) => px == *committed,
            (Extent::Unconstrained, Some(StyleValue::Auto)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extent::Px(px) => write!(f, "{px}px"),
            Extent::Unconstrained => f.write_str("unconstrained"),
        }
    }
}

/// Measures the natural extent of the attached surface along `axis`.
///
/// Never fails: an unattached or already dropped surface yields
/// [`Extent::Unconstrained`].
pub fn measure(axis: Axis, surface: &SurfaceRef) -> Extent {
    match surface.get() {
        Some(surface) => Extent::Px(surface.scroll_extent(axis)),
        None => {
            log::trace!("measure({axis:?}) with no surface attached");
            Extent::Unconstrained
        }
    }
}

#[cfg(test)]
#[path = "tests/measure_tests.rs"]
mod tests;
