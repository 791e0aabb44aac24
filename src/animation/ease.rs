use std::fmt;

use crate::foundation::error::{PhaseError, PhaseResult};

/// Overshoot used by `back.out` when no amount is given.
pub const DEFAULT_BACK_OVERSHOOT: f64 = 1.70158;

/// Easing functions used to map a track's local progress.
///
/// An ease only shapes interpolation inside a track's `[start, end]` window; it never moves the
/// window itself. Serialized as its canonical name (see [`Ease::parse`] for accepted aliases).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    /// Linear interpolation (`none`).
    #[default]
    Linear,
    /// Quadratic ease-in (`power1.in`).
    InQuad,
    /// Quadratic ease-out (`power1.out`).
    OutQuad,
    /// Quadratic ease-in/out (`power1.inOut`).
    InOutQuad,
    /// Cubic ease-in (`power2.in`).
    InCubic,
    /// Cubic ease-out (`power2.out`).
    OutCubic,
    /// Cubic ease-in/out (`power2.inOut`).
    InOutCubic,
    /// Ease-out that overshoots the target before settling (`back.out(s)`).
    OutBack {
        /// Overshoot amount; larger values overshoot further.
        overshoot: f64,
    },
}

impl Ease {
    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::OutBack { overshoot } => {
                let u = t - 1.0;
                1.0 + (overshoot + 1.0) * u.powi(3) + overshoot * u.powi(2)
            }
        }
    }

    /// Parse a named curve.
    ///
    /// Accepts GSAP-style names (`none`, `power1.in`, `power2.out`, `back.out(1.6)`) and CSS-style
    /// names (`linear`, `ease-in`, `ease-out`, `ease-in-out`, `ease-out-back`). A bare `powerN`
    /// means `powerN.out`.
    pub fn parse(name: &str) -> PhaseResult<Self> {
        let name = name.trim();
        let ease = match name {
            "none" | "linear" => Self::Linear,
            "power1.in" | "quad.in" => Self::InQuad,
            "power1" | "power1.out" | "quad.out" => Self::OutQuad,
            "power1.inOut" | "quad.inOut" => Self::InOutQuad,
            "power2.in" | "cubic.in" | "ease-in" => Self::InCubic,
            "power2" | "power2.out" | "cubic.out" | "ease-out" => Self::OutCubic,
            "power2.inOut" | "cubic.inOut" | "ease-in-out" => Self::InOutCubic,
            "back.out" | "ease-out-back" => Self::OutBack {
                overshoot: DEFAULT_BACK_OVERSHOOT,
            },
            other => {
                let Some(arg) = other
                    .strip_prefix("back.out(")
                    .and_then(|rest| rest.strip_suffix(')'))
                else {
                    return Err(PhaseError::validation(format!("unknown ease '{other}'")));
                };
                let overshoot: f64 = arg.trim().parse().map_err(|_| {
                    PhaseError::validation(format!("invalid back.out overshoot in '{other}'"))
                })?;
                if !overshoot.is_finite() || overshoot < 0.0 {
                    return Err(PhaseError::validation(format!(
                        "back.out overshoot must be finite and >= 0 in '{other}'"
                    )));
                }
                Self::OutBack { overshoot }
            }
        };
        Ok(ease)
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("none"),
            Self::InQuad => f.write_str("power1.in"),
            Self::OutQuad => f.write_str("power1.out"),
            Self::InOutQuad => f.write_str("power1.inOut"),
            Self::InCubic => f.write_str("power2.in"),
            Self::OutCubic => f.write_str("power2.out"),
            Self::InOutCubic => f.write_str("power2.inOut"),
            Self::OutBack { overshoot } => write!(f, "back.out({overshoot})"),
        }
    }
}

impl TryFrom<String> for Ease {
    type Error = PhaseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Ease> for String {
    fn from(ease: Ease) -> Self {
        ease.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
