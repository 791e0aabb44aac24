use std::collections::{BTreeMap, BTreeSet};

use crate::{
    animation::{props::PropertyState, track::KeyframeTrack},
    foundation::core::TargetId,
    foundation::error::{PhaseError, PhaseResult},
};

/// End of the entrance phase (start of the settle hold).
pub const ENTRANCE_END: f64 = 0.3;
/// Start of the exit phase (end of the settle hold).
pub const EXIT_START: f64 = 0.7;

/// Evaluated properties per target at one progress value.
pub type StyleFrame = BTreeMap<TargetId, PropertyState>;

/// Named sub-range of progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// `[0, 0.3)`: elements animate in.
    Entrance,
    /// `[0.3, 0.7)`: hold, nothing moves.
    Settle,
    /// `[0.7, 1]`: elements animate out.
    Exit,
}

impl Phase {
    /// Phase containing `progress` (clamped to `[0, 1]`).
    pub fn at(progress: f64) -> Self {
        let p = clamp_progress(progress);
        if p < ENTRANCE_END {
            Self::Entrance
        } else if p < EXIT_START {
            Self::Settle
        } else {
            Self::Exit
        }
    }

    /// Default `(start, end)` window for tracks placed in this phase.
    pub fn default_window(self) -> (f64, f64) {
        match self {
            Self::Entrance => (0.0, ENTRANCE_END),
            Self::Settle => (ENTRANCE_END, ENTRANCE_END),
            Self::Exit => (EXIT_START, 1.0),
        }
    }
}

/// Well-known progress points a controller can restore to declaratively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Snapshot {
    /// Before any entrance motion (`p = 0`).
    EntranceHidden,
    /// Entrance fully played, start of the settle hold (`p = 0.3`).
    EntranceSettled,
    /// Exit fully played (`p = 1`).
    ExitComplete,
}

impl Snapshot {
    /// Progress at which this snapshot is rendered.
    pub fn progress(self) -> f64 {
        match self {
            Self::EntranceHidden => 0.0,
            Self::EntranceSettled => ENTRANCE_END,
            Self::ExitComplete => 1.0,
        }
    }
}

/// How a timeline partitions progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PhaseLayout {
    /// Entrance / settle / exit. No track may cross into the settle hold.
    Phased,
    /// One phase spanning `[0, 1]` (one-shot reveals, autoplay intros).
    Single,
}

/// Ordered collection of keyframe tracks over normalized progress.
///
/// Evaluation is a pure function of progress and the static track list.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PhaseTimeline {
    layout: PhaseLayout,
    pin_distance_ratio: f64,
    tracks: Vec<KeyframeTrack>,
    #[serde(skip)]
    initial: StyleFrame,
}

impl PhaseTimeline {
    /// Build a phased (entrance / settle / exit) timeline.
    ///
    /// `pin_distance_ratio` is the scroll distance mapped to `[0, 1]`, as a multiple of the
    /// viewport height (1.3 = 130%).
    pub fn phased(pin_distance_ratio: f64, tracks: Vec<KeyframeTrack>) -> PhaseResult<Self> {
        if !pin_distance_ratio.is_finite() || pin_distance_ratio <= 0.0 {
            return Err(PhaseError::validation(
                "pinDistanceRatio must be finite and > 0",
            ));
        }
        Self::new(PhaseLayout::Phased, pin_distance_ratio, tracks)
    }

    /// Build a single-phase timeline with no pin zone.
    pub fn single(tracks: Vec<KeyframeTrack>) -> PhaseResult<Self> {
        Self::new(PhaseLayout::Single, 0.0, tracks)
    }

    fn new(
        layout: PhaseLayout,
        pin_distance_ratio: f64,
        tracks: Vec<KeyframeTrack>,
    ) -> PhaseResult<Self> {
        for track in &tracks {
            track.validate()?;
            if layout == PhaseLayout::Phased
                && track.start < ENTRANCE_END
                && track.end > ENTRANCE_END
            {
                return Err(PhaseError::timeline(format!(
                    "track '{}' [{}, {}] runs past the entrance phase into the settle hold",
                    track.target, track.start, track.end
                )));
            }
            if layout == PhaseLayout::Phased && (ENTRANCE_END..EXIT_START).contains(&track.start) {
                return Err(PhaseError::timeline(format!(
                    "track '{}' starts at {} inside the settle hold",
                    track.target, track.start
                )));
            }
        }

        let initial = initial_frame(&tracks);
        Ok(Self {
            layout,
            pin_distance_ratio,
            tracks,
            initial,
        })
    }

    /// Progress partitioning of this timeline.
    pub fn layout(&self) -> PhaseLayout {
        self.layout
    }

    /// Pin distance as a multiple of viewport height (0 for unpinned timelines).
    pub fn pin_distance_ratio(&self) -> f64 {
        self.pin_distance_ratio
    }

    /// Tracks in registration order.
    pub fn tracks(&self) -> &[KeyframeTrack] {
        &self.tracks
    }

    /// Every target written by at least one track.
    pub fn targets(&self) -> BTreeSet<TargetId> {
        self.tracks.iter().map(|t| t.target.clone()).collect()
    }

    /// Phase containing `progress` for this timeline's layout.
    pub fn phase_at(&self, progress: f64) -> Phase {
        match self.layout {
            PhaseLayout::Phased => Phase::at(progress),
            PhaseLayout::Single => Phase::Entrance,
        }
    }

    /// Evaluate every target at `progress` (clamped to `[0, 1]`).
    ///
    /// Each property starts at the `from` value of the earliest-starting track that writes it.
    /// Tracks whose window has started then write their interpolated value in registration
    /// order, so later registrations win on overlap.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn evaluate(&self, progress: f64) -> StyleFrame {
        let p = clamp_progress(progress);
        let mut frame = self.initial.clone();
        for track in self.tracks.iter().filter(|t| t.has_started(p)) {
            frame
                .entry(track.target.clone())
                .or_default()
                .overlay(&track.sample(p));
        }
        frame
    }

    /// Like [`PhaseTimeline::evaluate`], but rejects non-finite progress instead of clamping it.
    pub fn try_evaluate(&self, progress: f64) -> PhaseResult<StyleFrame> {
        if !progress.is_finite() {
            return Err(PhaseError::evaluation(format!(
                "progress {progress} is not a finite number"
            )));
        }
        Ok(self.evaluate(progress))
    }

    /// Evaluate at a named snapshot.
    pub fn snapshot(&self, snapshot: Snapshot) -> StyleFrame {
        match (self.layout, snapshot) {
            (PhaseLayout::Single, Snapshot::EntranceSettled) => self.evaluate(1.0),
            _ => self.evaluate(snapshot.progress()),
        }
    }

    /// State to show when animation is unavailable (reduced motion, no scroll surface).
    pub fn settled(&self) -> StyleFrame {
        self.snapshot(Snapshot::EntranceSettled)
    }
}

/// Clamp progress into `[0, 1]`, mapping NaN to 0.
pub fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

fn initial_frame(tracks: &[KeyframeTrack]) -> StyleFrame {
    let mut order: Vec<usize> = (0..tracks.len()).collect();
    order.sort_by(|&a, &b| tracks[a].start.total_cmp(&tracks[b].start).then(a.cmp(&b)));

    let mut frame = StyleFrame::new();
    for idx in order {
        let track = &tracks[idx];
        let state = frame.entry(track.target.clone()).or_default();
        for prop in track.from.properties() {
            if !state.has(prop) {
                state.copy_property(&track.from, prop);
            }
        }
    }
    frame
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
