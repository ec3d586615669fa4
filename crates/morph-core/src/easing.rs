#![forbid(unsafe_code)]

//! Easing curves for transition timing.
//!
//! The engines never tween values themselves: the host's CSS transition
//! does the interpolation. An [`Easing`] therefore mostly travels as its
//! CSS serialization (see [`Easing::css`]), but [`Easing::apply`] evaluates
//! the same curve so hosts without a native transition (tests, canvas
//! renderers) can sample it.
//!
//! # Invariants
//!
//! - `apply(0.0) == 0.0` and `apply(1.0) == 1.0` for every curve.
//! - Input is clamped to `[0.0, 1.0]`.
//! - `css()` output parses back to an equal curve.

use std::fmt;
use std::str::FromStr;

/// Timing function for a transition phase.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// CSS `ease`.
    Ease,
    /// Accelerating; good for exits.
    EaseIn,
    /// Decelerating; good for entrances.
    #[default]
    EaseOut,
    /// Smooth S-curve.
    EaseInOut,
    /// Arbitrary `cubic-bezier(x1, y1, x2, y2)`.
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Easing {
    /// Material "standard" curve, the default for card expansion.
    pub const STANDARD: Easing = Easing::CubicBezier {
        x1: 0.4,
        y1: 0.0,
        x2: 0.2,
        y2: 1.0,
    };

    /// Control points of the equivalent cubic Bézier, or `None` for linear.
    pub fn control_points(self) -> Option<(f64, f64, f64, f64)> {
        match self {
            Self::Linear => None,
            Self::Ease => Some((0.25, 0.1, 0.25, 1.0)),
            Self::EaseIn => Some((0.42, 0.0, 1.0, 1.0)),
            Self::EaseOut => Some((0.0, 0.0, 0.58, 1.0)),
            Self::EaseInOut => Some((0.42, 0.0, 0.58, 1.0)),
            Self::CubicBezier { x1, y1, x2, y2 } => Some((x1, y1, x2, y2)),
        }
    }

    /// Apply the curve to a progress value (0.0 to 1.0).
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self.control_points() {
            None => t,
            Some((x1, y1, x2, y2)) => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let s = solve_bezier_param(t, x1, x2);
                bezier(s, y1, y2)
            }
        }
    }

    /// CSS serialization, suitable for a `transition-timing-function`.
    pub fn css(self) -> String {
        self.to_string()
    }
}

#[inline]
fn bezier(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

#[inline]
fn bezier_slope(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Find the curve parameter whose x coordinate is `x`.
///
/// Newton iterations first; bisection if the slope flattens out.
fn solve_bezier_param(x: f64, x1: f64, x2: f64) -> f64 {
    let mut s = x;
    for _ in 0..8 {
        let err = bezier(s, x1, x2) - x;
        if err.abs() < 1e-7 {
            return s;
        }
        let slope = bezier_slope(s, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= err / slope;
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    s = x;
    for _ in 0..64 {
        let v = bezier(s, x1, x2);
        if (v - x).abs() < 1e-7 {
            break;
        }
        if v < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    s
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("linear"),
            Self::Ease => f.write_str("ease"),
            Self::EaseIn => f.write_str("ease-in"),
            Self::EaseOut => f.write_str("ease-out"),
            Self::EaseInOut => f.write_str("ease-in-out"),
            Self::CubicBezier { x1, y1, x2, y2 } => {
                write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
        }
    }
}

/// Error returned when parsing a timing function fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEasingError(pub String);

impl fmt::Display for ParseEasingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid timing function: {}", self.0)
    }
}

impl std::error::Error for ParseEasingError {}

impl FromStr for Easing {
    type Err = ParseEasingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed {
            "linear" => return Ok(Self::Linear),
            "ease" => return Ok(Self::Ease),
            "ease-in" => return Ok(Self::EaseIn),
            "ease-out" => return Ok(Self::EaseOut),
            "ease-in-out" => return Ok(Self::EaseInOut),
            _ => {}
        }

        let err = || ParseEasingError(trimmed.to_owned());
        let args = trimmed
            .strip_prefix("cubic-bezier(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(err)?;
        let values = args
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| err())?;
        let [x1, y1, x2, y2] = values[..] else {
            return Err(err());
        };
        // x coordinates must stay in [0, 1] for the curve to be a function of time.
        if !(0.0..=1.0).contains(&x1)
            || !(0.0..=1.0).contains(&x2)
            || !y1.is_finite()
            || !y2.is_finite()
        {
            return Err(err());
        }
        Ok(Self::CubicBezier { x1, y1, x2, y2 })
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Easing {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Easing {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 7] = [
        Easing::Linear,
        Easing::Ease,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::STANDARD,
        Easing::CubicBezier {
            x1: 0.3,
            y1: -0.4,
            x2: 0.7,
            y2: 1.4,
        },
    ];

    #[test]
    fn endpoints_are_fixed() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing}");
            assert_eq!(easing.apply(1.0), 1.0, "{easing}");
        }
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Easing::Linear.apply(-0.5), 0.0);
        assert_eq!(Easing::Linear.apply(1.5), 1.0);
        assert_eq!(Easing::EaseOut.apply(f64::NAN), 0.0);
    }

    #[test]
    fn ease_out_decelerates() {
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
        assert!(Easing::EaseIn.apply(0.5) < 0.5);
    }

    #[test]
    fn ease_in_out_is_symmetric() {
        let a = Easing::EaseInOut.apply(0.25);
        let b = Easing::EaseInOut.apply(0.75);
        assert!((a + b - 1.0).abs() < 1e-4);
    }

    #[test]
    fn css_keywords() {
        assert_eq!(Easing::EaseInOut.css(), "ease-in-out");
        assert_eq!(Easing::STANDARD.css(), "cubic-bezier(0.4, 0, 0.2, 1)");
    }

    #[test]
    fn css_parses_back() {
        for easing in ALL {
            assert_eq!(easing.css().parse::<Easing>(), Ok(easing));
        }
    }

    #[test]
    fn parse_rejects_out_of_range_x() {
        assert!("cubic-bezier(1.5, 0, 0.2, 1)".parse::<Easing>().is_err());
        assert!("cubic-bezier(0.4, 0, 0.2)".parse::<Easing>().is_err());
        assert!("steps(4)".parse::<Easing>().is_err());
    }
}
