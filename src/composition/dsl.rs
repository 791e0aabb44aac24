use crate::{
    animation::{
        ease::Ease,
        props::PropertyState,
        timeline::{Phase, PhaseLayout, PhaseTimeline},
    },
    composition::spec::{TimelineSpec, TrackSpec, build_timeline},
    foundation::core::TargetId,
    foundation::error::PhaseResult,
};

/// Fluent builder for one [`TrackSpec`].
pub struct TweenBuilder {
    spec: TrackSpec,
}

impl TweenBuilder {
    /// Tween `target` from `from` to `to` with a linear ease in the entrance phase.
    pub fn new(target: impl Into<TargetId>, from: PropertyState, to: PropertyState) -> Self {
        Self {
            spec: TrackSpec {
                target_id: target.into(),
                from_state: from,
                to_state: to,
                ease: Ease::Linear,
                phase: None,
                start_offset: None,
                end_offset: None,
                stagger_index: None,
                stagger_step: None,
            },
        }
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.spec.ease = ease;
        self
    }

    pub fn phase(mut self, phase: Phase) -> Self {
        self.spec.phase = Some(phase);
        self
    }

    /// Explicit start offset (before stagger).
    pub fn start(mut self, offset: f64) -> Self {
        self.spec.start_offset = Some(offset);
        self
    }

    /// Explicit end offset.
    pub fn end(mut self, offset: f64) -> Self {
        self.spec.end_offset = Some(offset);
        self
    }

    pub fn stagger(mut self, index: u32, step: f64) -> Self {
        self.spec.stagger_index = Some(index);
        self.spec.stagger_step = Some(step);
        self
    }

    pub fn build(self) -> TrackSpec {
        self.spec
    }
}

/// Fluent builder for a [`TimelineSpec`].
pub struct TimelineBuilder {
    layout: PhaseLayout,
    pin_distance_ratio: f64,
    tracks: Vec<TrackSpec>,
}

impl TimelineBuilder {
    /// Entrance / settle / exit timeline pinned for `pin_distance_ratio` viewport heights.
    pub fn phased(pin_distance_ratio: f64) -> Self {
        Self {
            layout: PhaseLayout::Phased,
            pin_distance_ratio,
            tracks: Vec::new(),
        }
    }

    /// Unpinned single-phase timeline.
    pub fn single() -> Self {
        Self {
            layout: PhaseLayout::Single,
            pin_distance_ratio: 0.0,
            tracks: Vec::new(),
        }
    }

    pub fn tween(mut self, tween: TweenBuilder) -> Self {
        self.tracks.push(tween.build());
        self
    }

    /// Add one tween per target with a constant per-index delay of `step`.
    ///
    /// `make` receives each target and returns its tween; the stagger is applied on top.
    pub fn group<I, T>(
        mut self,
        targets: I,
        step: f64,
        make: impl Fn(TargetId) -> TweenBuilder,
    ) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TargetId>,
    {
        for (i, target) in targets.into_iter().enumerate() {
            let index = u32::try_from(i).unwrap_or(u32::MAX);
            self.tracks.push(make(target.into()).stagger(index, step).build());
        }
        self
    }

    pub fn spec(self) -> TimelineSpec {
        TimelineSpec {
            layout: self.layout,
            pin_distance_ratio: self.pin_distance_ratio,
            tracks: self.tracks,
        }
    }

    pub fn build(self) -> PhaseResult<PhaseTimeline> {
        build_timeline(&self.spec())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/dsl.rs"]
mod tests;
