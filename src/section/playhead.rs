use crate::{
    foundation::error::{PhaseError, PhaseResult},
    scroll::mapper::Direction,
};

/// Time-driven position over a fixed duration, for timelines that play rather than scrub.
#[derive(Clone, Debug, PartialEq)]
pub struct Playhead {
    duration_secs: f64,
    progress: f64,
    playing: Option<Direction>,
}

impl Playhead {
    pub fn new(duration_secs: f64) -> PhaseResult<Self> {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(PhaseError::validation(format!(
                "playhead duration must be > 0 seconds, got {duration_secs}"
            )));
        }
        Ok(Self {
            duration_secs,
            progress: 0.0,
            playing: None,
        })
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Normalized position in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Direction of travel, or `None` while paused or parked at an end.
    pub fn playing(&self) -> Option<Direction> {
        self.playing
    }

    pub fn is_playing(&self) -> bool {
        self.playing.is_some()
    }

    /// Play toward 1 from the current position.
    pub fn play(&mut self) {
        self.playing = (self.progress < 1.0).then_some(Direction::Forward);
    }

    /// Play toward 0 from the current position.
    pub fn reverse(&mut self) {
        self.playing = (self.progress > 0.0).then_some(Direction::Backward);
    }

    pub fn pause(&mut self) {
        self.playing = None;
    }

    /// Jump to `progress` and pause.
    pub fn seek(&mut self, progress: f64) {
        self.progress = crate::animation::timeline::clamp_progress(progress);
        self.playing = None;
    }

    /// Move by `dt_secs` in the playing direction and return the new position.
    ///
    /// Stops on reaching either end.
    pub fn advance(&mut self, dt_secs: f64) -> f64 {
        let Some(direction) = self.playing else {
            return self.progress;
        };
        let step = dt_secs.max(0.0) / self.duration_secs;
        match direction {
            Direction::Forward => {
                self.progress = (self.progress + step).min(1.0);
                if self.progress >= 1.0 {
                    self.playing = None;
                }
            }
            Direction::Backward => {
                self.progress = (self.progress - step).max(0.0);
                if self.progress <= 0.0 {
                    self.playing = None;
                }
            }
        }
        self.progress
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/playhead.rs"]
mod tests;
