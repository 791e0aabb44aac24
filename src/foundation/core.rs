use std::fmt;

use crate::foundation::error::{PhaseError, PhaseResult};

pub use kurbo::{Affine, Vec2};

/// Stable identifier of an animatable element.
///
/// Timelines address targets by id, never by a captured handle, so a timeline can be built,
/// serialized and evaluated without a live render tree.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct TargetId(pub String);

impl TargetId {
    /// Create a target id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TargetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Stable identifier of a pinned section.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct SectionId(pub String);

impl SectionId {
    /// Create a section id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Visible viewport dimensions in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a validated viewport with positive, finite dimensions.
    pub fn new(width: f64, height: f64) -> PhaseResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(PhaseError::validation(
                "viewport width/height must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1440.0,
            height: 900.0,
        }
    }
}

/// Unit of a [`Length`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// CSS pixels.
    Px,
    /// Percent of viewport width.
    Vw,
    /// Percent of viewport height.
    Vh,
}

impl LengthUnit {
    fn suffix(self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Vw => "vw",
            Self::Vh => "vh",
        }
    }
}

/// A translation distance, possibly relative to the viewport.
///
/// Serialized as a bare number for pixels and as `"<value><unit>"` otherwise. Zero is equal to
/// zero in any unit.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "LengthRepr", into = "LengthRepr")]
pub struct Length {
    /// Magnitude in `unit`.
    pub value: f64,
    /// Unit of `value`.
    pub unit: LengthUnit,
}

impl Length {
    /// Zero pixels.
    pub const ZERO: Self = Self::px(0.0);

    /// Length in pixels.
    pub const fn px(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Px,
        }
    }

    /// Length in percent of viewport width.
    pub const fn vw(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Vw,
        }
    }

    /// Length in percent of viewport height.
    pub const fn vh(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Vh,
        }
    }

    /// Parse `"-12vw"`, `"35vh"`, `"24px"` or a bare number (pixels).
    pub fn parse(s: &str) -> PhaseResult<Self> {
        let s = s.trim();
        let (num, unit) = if let Some(n) = s.strip_suffix("vw") {
            (n, LengthUnit::Vw)
        } else if let Some(n) = s.strip_suffix("vh") {
            (n, LengthUnit::Vh)
        } else if let Some(n) = s.strip_suffix("px") {
            (n, LengthUnit::Px)
        } else {
            (s, LengthUnit::Px)
        };
        let value: f64 = num
            .trim()
            .parse()
            .map_err(|_| PhaseError::validation(format!("invalid length '{s}'")))?;
        if !value.is_finite() {
            return Err(PhaseError::validation(format!("length '{s}' is not finite")));
        }
        Ok(Self { value, unit })
    }

    /// Return `true` when the length is zero regardless of unit.
    pub fn is_zero(self) -> bool {
        self.value == 0.0
    }

    /// Unit both lengths can be interpolated in, if any.
    ///
    /// A zero length adopts the other side's unit.
    pub fn common_unit(a: Self, b: Self) -> Option<LengthUnit> {
        if a.unit == b.unit {
            Some(a.unit)
        } else if a.is_zero() {
            Some(b.unit)
        } else if b.is_zero() {
            Some(a.unit)
        } else {
            None
        }
    }

    /// Interpolate between two lengths at `t`.
    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        let unit = Self::common_unit(a, b).unwrap_or(b.unit);
        Self {
            value: a.value + (b.value - a.value) * t,
            unit,
        }
    }

    /// Resolve to CSS pixels against `viewport`.
    pub fn to_px(self, viewport: Viewport) -> f64 {
        match self.unit {
            LengthUnit::Px => self.value,
            LengthUnit::Vw => self.value * viewport.width / 100.0,
            LengthUnit::Vh => self.value * viewport.height / 100.0,
        }
    }
}

impl PartialEq for Length {
    fn eq(&self, other: &Self) -> bool {
        (self.is_zero() && other.is_zero()) || (self.unit == other.unit && self.value == other.value)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum LengthRepr {
    Number(f64),
    Text(String),
}

impl TryFrom<LengthRepr> for Length {
    type Error = PhaseError;

    fn try_from(repr: LengthRepr) -> Result<Self, Self::Error> {
        match repr {
            LengthRepr::Number(v) => Ok(Self::px(v)),
            LengthRepr::Text(s) => Self::parse(&s),
        }
    }
}

impl From<Length> for LengthRepr {
    fn from(len: Length) -> Self {
        match len.unit {
            LengthUnit::Px => Self::Number(len.value),
            _ => Self::Text(len.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
