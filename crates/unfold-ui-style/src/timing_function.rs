//! Transition timing functions (CSS easing keywords).

use std::fmt;
use std::str::FromStr;

/// Easing curve named in a transition declaration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TimingFunction {
    /// `cubic-bezier(0.25, 0.1, 0.25, 1)`.
    #[default]
    Ease,
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    StepStart,
    StepEnd,
    /// Control points `x1, y1, x2, y2`; x values lie in `[0, 1]`.
    CubicBezier(f32, f32, f32, f32),
}

/// Default easing for collapse transitions.
pub const DEFAULT_TIMING_FUNCTION: TimingFunction = TimingFunction::Ease;

impl TimingFunction {
    /// Maps linear progress in `[0, 1]` to eased progress.
    pub fn transform(&self, fraction: f32) -> f32 {
        match *self {
            TimingFunction::Linear => fraction.clamp(0.0, 1.0),
            TimingFunction::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, fraction),
            TimingFunction::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            TimingFunction::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            TimingFunction::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            TimingFunction::StepStart => {
                if fraction > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            TimingFunction::StepEnd => {
                if fraction >= 1.0 {
                    1.0
                } else {
                    0.0
                }
            }
            TimingFunction::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, fraction),
        }
    }
}

impl fmt::Display for TimingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimingFunction::Ease => f.write_str("ease"),
            TimingFunction::Linear => f.write_str("linear"),
            TimingFunction::EaseIn => f.write_str("ease-in"),
            TimingFunction::EaseOut => f.write_str("ease-out"),
            TimingFunction::EaseInOut => f.write_str("ease-in-out"),
            TimingFunction::StepStart => f.write_str("step-start"),
            TimingFunction::StepEnd => f.write_str("step-end"),
            TimingFunction::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
        }
    }
}

/// Error returned when a timing function string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTimingFunctionError {
    input: String,
}

impl ParseTimingFunctionError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseTimingFunctionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid transition timing function `{}`", self.input)
    }
}

impl std::error::Error for ParseTimingFunctionError {}

impl FromStr for TimingFunction {
    type Err = ParseTimingFunctionError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let keyword = trimmed.to_ascii_lowercase();
        match keyword.as_str() {
            "ease" => return Ok(TimingFunction::Ease),
            "linear" => return Ok(TimingFunction::Linear),
            "ease-in" => return Ok(TimingFunction::EaseIn),
            "ease-out" => return Ok(TimingFunction::EaseOut),
            "ease-in-out" => return Ok(TimingFunction::EaseInOut),
            "step-start" => return Ok(TimingFunction::StepStart),
            "step-end" => return Ok(TimingFunction::StepEnd),
            _ => {}
        }

        let args = keyword
            .strip_prefix("cubic-bezier(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| ParseTimingFunctionError::new(input))?;
        let points = args
            .split(',')
            .map(|part| part.trim().parse::<f32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ParseTimingFunctionError::new(input))?;
        match points.as_slice() {
            &[x1, y1, x2, y2]
                if (0.0..=1.0).contains(&x1)
                    && (0.0..=1.0).contains(&x2)
                    && y1.is_finite()
                    && y2.is_finite() =>
            {
                Ok(TimingFunction::CubicBezier(x1, y1, x2, y2))
            }
            _ => Err(ParseTimingFunctionError::new(input)),
        }
    }
}

/// Solves the bezier curve for `fraction` along x and returns y.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample = |a: f32, b: f32, c: f32, t: f32| ((a * t + b) * t + c) * t;
    let slope = |a: f32, b: f32, c: f32, t: f32| (3.0 * a * t + 2.0 * b) * t + c;

    // Newton-Raphson first, bisection when the slope flattens out.
    let mut t = fraction;
    let mut solved = false;
    for _ in 0..8 {
        let error = sample(ax, bx, cx, t) - fraction;
        if error.abs() < 1e-6 {
            solved = true;
            break;
        }
        let derivative = slope(ax, bx, cx, t);
        if derivative.abs() < 1e-6 {
            break;
        }
        t = (t - error / derivative).clamp(0.0, 1.0);
    }

    if !solved {
        let (mut low, mut high) = (0.0f32, 1.0f32);
        t = fraction;
        for _ in 0..16 {
            let delta = sample(ax, bx, cx, t) - fraction;
            if delta.abs() < 1e-6 {
                break;
            }
            if delta > 0.0 {
                high = t;
            } else {
                low = t;
            }
            t = 0.5 * (low + high);
        }
    }

    sample(ay, by, cy, t)
}

#[cfg(test)]
#[path = "tests/timing_function_tests.rs"]
mod tests;
