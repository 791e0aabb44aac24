use crate::foundation::core::{Affine, Length, Vec2, Viewport};
use crate::foundation::error::{PhaseError, PhaseResult};

/// Name of an animatable property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Property {
    /// Horizontal translation.
    X,
    /// Vertical translation.
    Y,
    /// Opacity in `[0, 1]`.
    Opacity,
    /// Uniform scale factor.
    Scale,
}

/// Sparse mapping of animatable property to value.
///
/// `None` means "not written": applying a state leaves unlisted properties untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PropertyState {
    /// Horizontal translation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Length>,
    /// Vertical translation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Length>,
    /// Opacity; clamped to `[0, 1]` when resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Uniform scale factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

impl PropertyState {
    /// Start an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set horizontal translation.
    pub fn x(mut self, x: Length) -> Self {
        self.x = Some(x);
        self
    }

    /// Set vertical translation.
    pub fn y(mut self, y: Length) -> Self {
        self.y = Some(y);
        self
    }

    /// Set opacity.
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Set scale.
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Return `true` when no property is written.
    pub fn is_empty(&self) -> bool {
        self.properties().is_empty()
    }

    /// Properties written by this state, in a stable order.
    pub fn properties(&self) -> Vec<Property> {
        let mut out = Vec::with_capacity(4);
        if self.x.is_some() {
            out.push(Property::X);
        }
        if self.y.is_some() {
            out.push(Property::Y);
        }
        if self.opacity.is_some() {
            out.push(Property::Opacity);
        }
        if self.scale.is_some() {
            out.push(Property::Scale);
        }
        out
    }

    /// Return `true` when `prop` is written.
    pub fn has(&self, prop: Property) -> bool {
        match prop {
            Property::X => self.x.is_some(),
            Property::Y => self.y.is_some(),
            Property::Opacity => self.opacity.is_some(),
            Property::Scale => self.scale.is_some(),
        }
    }

    /// Copy a single property from `other` (which may clear it).
    pub fn copy_property(&mut self, other: &Self, prop: Property) {
        match prop {
            Property::X => self.x = other.x,
            Property::Y => self.y = other.y,
            Property::Opacity => self.opacity = other.opacity,
            Property::Scale => self.scale = other.scale,
        }
    }

    /// Write every property of `top` over `self` (last write wins).
    pub fn overlay(&mut self, top: &Self) {
        self.x = top.x.or(self.x);
        self.y = top.y.or(self.y);
        self.opacity = top.opacity.or(self.opacity);
        self.scale = top.scale.or(self.scale);
    }

    /// Interpolate two states over the properties they both write.
    pub fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn num(a: Option<f64>, b: Option<f64>, t: f64) -> Option<f64> {
            Some(a? + (b? - a?) * t)
        }
        fn len(a: Option<Length>, b: Option<Length>, t: f64) -> Option<Length> {
            Some(Length::lerp(a?, b?, t))
        }

        Self {
            x: len(a.x, b.x, t),
            y: len(a.y, b.y, t),
            opacity: num(a.opacity, b.opacity, t),
            scale: num(a.scale, b.scale, t),
        }
    }

    /// Check that `from` and `to` can be interpolated.
    ///
    /// Both sides must write the same properties, values must be finite, and each translation
    /// pair must share a unit unless one side is zero.
    pub fn validate_pair(from: &Self, to: &Self) -> PhaseResult<()> {
        if from.properties() != to.properties() {
            return Err(PhaseError::validation(format!(
                "from/to states write different properties ({:?} vs {:?})",
                from.properties(),
                to.properties()
            )));
        }
        if from.is_empty() {
            return Err(PhaseError::validation(
                "from/to states must write at least one property",
            ));
        }
        for state in [from, to] {
            let finite = [state.x.map(|l| l.value), state.y.map(|l| l.value)]
                .into_iter()
                .chain([state.opacity, state.scale])
                .flatten()
                .all(f64::is_finite);
            if !finite {
                return Err(PhaseError::validation("property values must be finite"));
            }
        }
        for (name, a, b) in [("x", from.x, to.x), ("y", from.y, to.y)] {
            if let (Some(a), Some(b)) = (a, b)
                && Length::common_unit(a, b).is_none()
            {
                return Err(PhaseError::validation(format!(
                    "property '{name}' mixes units ({a} -> {b})"
                )));
            }
        }
        Ok(())
    }

    /// Resolve against a viewport into concrete paint values.
    ///
    /// Unwritten properties resolve to their identity (no offset, opaque, unscaled).
    pub fn resolve(&self, viewport: Viewport) -> ResolvedStyle {
        let translate = Vec2::new(
            self.x.map_or(0.0, |l| l.to_px(viewport)),
            self.y.map_or(0.0, |l| l.to_px(viewport)),
        );
        let scale = self.scale.unwrap_or(1.0);
        ResolvedStyle {
            translate,
            scale,
            opacity: self.opacity.unwrap_or(1.0).clamp(0.0, 1.0),
            transform: Affine::translate(translate) * Affine::scale(scale),
        }
    }
}

/// Paint-ready values for one target.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedStyle {
    /// Translation in pixels.
    pub translate: Vec2,
    /// Uniform scale factor.
    pub scale: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Combined transform (scale about the element origin, then translate).
    pub transform: Affine,
}

#[cfg(test)]
#[path = "../../tests/unit/animation/props.rs"]
mod tests;
