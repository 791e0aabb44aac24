use crate::{
    animation::{ease::Ease, props::PropertyState},
    foundation::core::TargetId,
    foundation::error::{PhaseError, PhaseResult},
};

/// One element's from/to state over a window of normalized progress.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeyframeTrack {
    /// Element written by this track.
    pub target: TargetId,
    /// State rendered at (and before) `start`.
    pub from: PropertyState,
    /// State rendered at (and after) `end`.
    pub to: PropertyState,
    /// Curve applied to the local window progress.
    pub ease: Ease,
    /// Window start in `[0, 1]`.
    pub start: f64,
    /// Window end in `[start, 1]`.
    pub end: f64,
}

impl KeyframeTrack {
    /// Reject offsets outside `[0, 1]`, reversed windows, and non-interpolable states.
    pub fn validate(&self) -> PhaseResult<()> {
        if self.target.as_str().trim().is_empty() {
            return Err(PhaseError::validation("track target id must be non-empty"));
        }
        for (name, v) in [("startOffset", self.start), ("endOffset", self.end)] {
            if !(0.0..=1.0).contains(&v) {
                return Err(PhaseError::validation(format!(
                    "track '{}' {name} {v} is outside [0, 1]",
                    self.target
                )));
            }
        }
        if self.start > self.end {
            return Err(PhaseError::validation(format!(
                "track '{}' startOffset {} > endOffset {}",
                self.target, self.start, self.end
            )));
        }
        PropertyState::validate_pair(&self.from, &self.to)
            .map_err(|e| PhaseError::validation(format!("track '{}': {e}", self.target)))
    }

    /// Return `true` once progress has reached the window start.
    pub fn has_started(&self, progress: f64) -> bool {
        progress >= self.start
    }

    /// Local progress inside the window, clamped to `[0, 1]`.
    ///
    /// Zero-length windows jump straight to their end state once started.
    pub fn local_t(&self, progress: f64) -> f64 {
        let span = self.end - self.start;
        if span <= 0.0 {
            return if progress >= self.start { 1.0 } else { 0.0 };
        }
        ((progress - self.start) / span).clamp(0.0, 1.0)
    }

    /// Interpolated state at timeline progress `progress`.
    pub fn sample(&self, progress: f64) -> PropertyState {
        let t = self.ease.apply(self.local_t(progress));
        PropertyState::lerp(&self.from, &self.to, t)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/track.rs"]
mod tests;
