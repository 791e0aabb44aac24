use crate::{
    animation::{
        ease::Ease,
        props::PropertyState,
        timeline::{Phase, PhaseLayout, PhaseTimeline},
        track::KeyframeTrack,
    },
    foundation::core::TargetId,
    foundation::error::{PhaseError, PhaseResult},
};

/// Declarative, serializable description of a timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TimelineSpec {
    /// Progress partitioning; phased unless stated otherwise.
    #[serde(default = "default_layout")]
    pub layout: PhaseLayout,
    /// Pin distance as a multiple of viewport height (1.3 = 130%). Zero for single-phase specs.
    #[serde(default)]
    pub pin_distance_ratio: f64,
    /// Tracks in registration order.
    pub tracks: Vec<TrackSpec>,
}

fn default_layout() -> PhaseLayout {
    PhaseLayout::Phased
}

/// Declarative description of one track.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TrackSpec {
    pub target_id: TargetId,
    pub from_state: PropertyState,
    pub to_state: PropertyState,
    #[serde(default)]
    pub ease: Ease,
    /// Phase that supplies default offsets when explicit ones are absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<Phase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stagger_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stagger_step: Option<f64>,
}

impl TimelineSpec {
    /// Parse a spec from JSON.
    pub fn from_json(s: &str) -> PhaseResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> PhaseResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Describe an already-built timeline with every offset made explicit.
    pub fn from_timeline(timeline: &PhaseTimeline) -> Self {
        let tracks = timeline
            .tracks()
            .iter()
            .map(|t| TrackSpec {
                target_id: t.target.clone(),
                from_state: t.from,
                to_state: t.to,
                ease: t.ease,
                phase: None,
                start_offset: Some(t.start),
                end_offset: Some(t.end),
                stagger_index: None,
                stagger_step: None,
            })
            .collect();
        Self {
            layout: timeline.layout(),
            pin_distance_ratio: timeline.pin_distance_ratio(),
            tracks,
        }
    }
}

impl TrackSpec {
    /// Resolve default offsets and stagger into a concrete track.
    ///
    /// The start is `startOffset` (or the phase start) plus `staggerIndex * staggerStep`; the
    /// end is `endOffset` (or the phase end). Stagger only moves the start.
    pub fn resolve(&self, layout: PhaseLayout) -> PhaseResult<KeyframeTrack> {
        let phase = self.phase.unwrap_or(Phase::Entrance);
        if phase == Phase::Settle {
            return Err(PhaseError::timeline(format!(
                "track '{}' is placed in the settle phase, which holds without tracks",
                self.target_id
            )));
        }
        let (default_start, default_end) = match layout {
            PhaseLayout::Phased => phase.default_window(),
            PhaseLayout::Single => (0.0, 1.0),
        };

        let step = self.stagger_step.unwrap_or(0.0);
        if !step.is_finite() || step < 0.0 {
            return Err(PhaseError::validation(format!(
                "track '{}' staggerStep must be finite and >= 0",
                self.target_id
            )));
        }
        let stagger = f64::from(self.stagger_index.unwrap_or(0)) * step;

        let track = KeyframeTrack {
            target: self.target_id.clone(),
            from: self.from_state,
            to: self.to_state,
            ease: self.ease,
            start: self.start_offset.unwrap_or(default_start) + stagger,
            end: self.end_offset.unwrap_or(default_end),
        };
        track.validate()?;
        Ok(track)
    }
}

/// Build a timeline from its declarative spec, failing fast on invalid offsets.
#[tracing::instrument(skip(spec), fields(tracks = spec.tracks.len()))]
pub fn build_timeline(spec: &TimelineSpec) -> PhaseResult<PhaseTimeline> {
    let tracks = spec
        .tracks
        .iter()
        .map(|t| t.resolve(spec.layout))
        .collect::<PhaseResult<Vec<_>>>()?;
    match spec.layout {
        PhaseLayout::Phased => PhaseTimeline::phased(spec.pin_distance_ratio, tracks),
        PhaseLayout::Single => {
            if spec.pin_distance_ratio != 0.0 {
                return Err(PhaseError::validation(
                    "single-phase timelines have no pin zone; pinDistanceRatio must be 0",
                ));
            }
            PhaseTimeline::single(tracks)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/spec.rs"]
mod tests;
