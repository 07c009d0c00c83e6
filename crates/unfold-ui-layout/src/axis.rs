use std::fmt;
use std::str::FromStr;

use unfold_ui_style::StyleProperty;

/// The single axis a collapse transition animates.
///
/// Fixed for the lifetime of a transition; switching axes means building a
/// new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Block axis: animates `height`.
    Vertical,

    /// Inline axis: animates `width`.
    Horizontal,
}

impl Axis {
    /// Returns the opposite axis.
    #[inline]
    pub fn cross_axis(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Axis::Vertical)
    }

    /// The size property animated along this axis.
    pub fn style_property(self) -> StyleProperty {
        match self {
            Axis::Vertical => StyleProperty::Height,
            Axis::Horizontal => StyleProperty::Width,
        }
    }

    /// CSS name of [`Axis::style_property`], as carried by transition events.
    pub fn property_name(self) -> &'static str {
        match self {
            Axis::Vertical => "height",
            Axis::Horizontal => "width",
        }
    }
}

/// Configuration-facing spelling of the axis: `"y"` or `"x"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Y,
    X,
}

impl Direction {
    pub fn axis(self) -> Axis {
        match self {
            Direction::Y => Axis::Vertical,
            Direction::X => Axis::Horizontal,
        }
    }
}

impl From<Direction> for Axis {
    fn from(direction: Direction) -> Self {
        direction.axis()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Y => f.write_str("y"),
            Direction::X => f.write_str("x"),
        }
    }
}

/// Error returned for a direction other than `y` or `x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError {
    input: String,
}

impl ParseDirectionError {
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid collapse direction `{}`; expected `y` or `x`", self.input)
    }
}

impl std::error::Error for ParseDirectionError {}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim() {
            "y" | "Y" => Ok(Direction::Y),
            "x" | "X" => Ok(Direction::X),
            _ => Err(ParseDirectionError {
                input: input.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "tests/axis_tests.rs"]
mod tests;
