//! Time-based sequencing.
//!
//! Steps are placed in seconds with GSAP-style position parameters (`"+=x"`,
//! `"-=x"`, absolute seconds, or after the previous step). The finished sequence is normalized by
//! its total duration into a [`PhaseLayout::Single`](crate::PhaseLayout) timeline, so it can be
//! played by a [`Playhead`](crate::Playhead) exactly like a one-shot reveal.

use crate::{
    animation::{ease::Ease, props::PropertyState, timeline::PhaseTimeline, track::KeyframeTrack},
    foundation::core::TargetId,
    foundation::error::{PhaseError, PhaseResult},
};

/// Where a step starts relative to the sequence built so far.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// At the current end of the sequence.
    AfterPrevious,
    /// `"+=x"`: `x` seconds after the current end.
    Gap(f64),
    /// `"-=x"`: `x` seconds before the current end.
    Overlap(f64),
    /// Absolute time in seconds.
    At(f64),
}

impl Position {
    /// Parse `"+=0.2"`, `"-=0.4"` or an absolute number of seconds.
    pub fn parse(s: &str) -> PhaseResult<Self> {
        let s = s.trim();
        let num = |v: &str| -> PhaseResult<f64> {
            v.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .ok_or_else(|| PhaseError::validation(format!("invalid position '{s}'")))
        };
        if s.is_empty() {
            return Ok(Self::AfterPrevious);
        }
        if let Some(v) = s.strip_prefix("+=") {
            return Ok(Self::Gap(num(v)?));
        }
        if let Some(v) = s.strip_prefix("-=") {
            return Ok(Self::Overlap(num(v)?));
        }
        Ok(Self::At(num(s)?))
    }

    fn resolve(self, end: f64) -> f64 {
        match self {
            Self::AfterPrevious => end,
            Self::Gap(x) => end + x,
            Self::Overlap(x) => (end - x).max(0.0),
            Self::At(x) => x,
        }
    }
}

/// One tween of a sequence, possibly over several targets.
#[derive(Clone, Debug)]
pub struct Step {
    targets: Vec<TargetId>,
    from: PropertyState,
    to: PropertyState,
    duration: f64,
    ease: Option<Ease>,
    stagger: f64,
}

impl Step {
    /// Tween `targets` from `from` to `to` over `duration` seconds.
    pub fn new<I, T>(targets: I, from: PropertyState, to: PropertyState, duration: f64) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TargetId>,
    {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
            from,
            to,
            duration,
            ease: None,
            stagger: 0.0,
        }
    }

    /// Override the sequence's default ease for this step.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    /// Delay each successive target by `seconds`.
    pub fn stagger(mut self, seconds: f64) -> Self {
        self.stagger = seconds;
        self
    }
}

/// Sequence normalized into a single-phase timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Sequence {
    /// Normalized timeline; progress 1 is the end of the last step.
    pub timeline: PhaseTimeline,
    /// Total play time in seconds.
    pub duration_secs: f64,
}

struct Placed {
    target: TargetId,
    from: PropertyState,
    to: PropertyState,
    ease: Ease,
    start: f64,
    end: f64,
}

/// Fluent builder for [`Sequence`].
pub struct SequenceBuilder {
    default_ease: Ease,
    placed: Vec<Placed>,
    end: f64,
}

impl SequenceBuilder {
    /// Start an empty sequence whose steps default to `default_ease`.
    pub fn new(default_ease: Ease) -> Self {
        Self {
            default_ease,
            placed: Vec::new(),
            end: 0.0,
        }
    }

    /// Append a step at `position`.
    pub fn add(mut self, step: Step, position: Position) -> PhaseResult<Self> {
        if !step.duration.is_finite() || step.duration <= 0.0 {
            return Err(PhaseError::timeline("step duration must be > 0 seconds"));
        }
        if !step.stagger.is_finite() || step.stagger < 0.0 {
            return Err(PhaseError::timeline("step stagger must be >= 0 seconds"));
        }
        if step.targets.is_empty() {
            return Err(PhaseError::timeline("step must have at least one target"));
        }

        let t0 = position.resolve(self.end);
        let ease = step.ease.unwrap_or(self.default_ease);
        for (i, target) in step.targets.into_iter().enumerate() {
            let start = t0 + i as f64 * step.stagger;
            let end = start + step.duration;
            self.end = self.end.max(end);
            self.placed.push(Placed {
                target,
                from: step.from,
                to: step.to,
                ease,
                start,
                end,
            });
        }
        Ok(self)
    }

    /// Normalize placements by the total duration and build the timeline.
    #[tracing::instrument(skip(self), fields(steps = self.placed.len()))]
    pub fn build(self) -> PhaseResult<Sequence> {
        if self.placed.is_empty() || self.end <= 0.0 {
            return Err(PhaseError::timeline("sequence has no steps"));
        }
        let total = self.end;
        let tracks = self
            .placed
            .into_iter()
            .map(|p| KeyframeTrack {
                target: p.target,
                from: p.from,
                to: p.to,
                ease: p.ease,
                start: (p.start / total).clamp(0.0, 1.0),
                end: (p.end / total).clamp(0.0, 1.0),
            })
            .collect();
        Ok(Sequence {
            timeline: PhaseTimeline::single(tracks)?,
            duration_secs: total,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/sequence.rs"]
mod tests;
