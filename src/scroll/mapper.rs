use crate::{
    animation::timeline::clamp_progress,
    foundation::error::{PhaseError, PhaseResult},
};

/// Scroll direction derived from the sign of the offset delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    /// Offset increasing (scrolling down the page).
    Forward,
    /// Offset decreasing (scrolling back up).
    Backward,
}

/// Where a raw offset falls relative to a pin zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ZonePosition {
    /// At or above the zone start (`raw <= start`); progress reports 0.
    Before,
    /// Inside `(start, end]`.
    Within,
    /// Past the zone (`raw > end`); progress reports 1.
    After,
}

/// Document offsets during which a section is held on screen.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PinZone {
    /// Offset at which pinning starts (progress 0).
    pub start: f64,
    /// Offset at which pinning ends (progress 1).
    pub end: f64,
}

impl PinZone {
    /// Create a validated zone with `start < end`.
    pub fn new(start: f64, end: f64) -> PhaseResult<Self> {
        if !(start.is_finite() && end.is_finite()) || start >= end {
            return Err(PhaseError::validation(format!(
                "pin zone [{start}, {end}] must be finite with start < end"
            )));
        }
        Ok(Self { start, end })
    }

    /// Zone for a section whose top meets the viewport top (`start: 'top top'`) and which stays
    /// pinned for `ratio` viewport heights (`end: '+=130%'`).
    pub fn from_trigger(section_top: f64, viewport_height: f64, ratio: f64) -> PhaseResult<Self> {
        Self::new(section_top, section_top + viewport_height * ratio)
    }

    /// Scroll distance covered by the zone.
    pub fn distance(self) -> f64 {
        self.end - self.start
    }

    /// Normalized progress, clamped to `[0, 1]`.
    pub fn progress(self, raw: f64) -> f64 {
        clamp_progress((raw - self.start) / self.distance())
    }

    /// Classify `raw`. The start itself is not yet inside the zone, so a section pinned at the
    /// top of the document can still be left backwards by returning to offset 0.
    pub fn position(self, raw: f64) -> ZonePosition {
        if raw <= self.start {
            ZonePosition::Before
        } else if raw > self.end {
            ZonePosition::After
        } else {
            ZonePosition::Within
        }
    }
}

/// Mapper output for one raw offset.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScrollSample {
    /// Raw document offset.
    pub raw: f64,
    /// Progress in `[0, 1]`.
    pub progress: f64,
    pub direction: Direction,
    pub position: ZonePosition,
}

/// Converts raw offsets into progress and direction for one pin zone.
///
/// The only state kept is the previous offset, needed to derive direction.
#[derive(Clone, Debug)]
pub struct ScrollProgressMapper {
    zone: PinZone,
    last_raw: Option<f64>,
    direction: Direction,
}

impl ScrollProgressMapper {
    pub fn new(zone: PinZone) -> Self {
        Self {
            zone,
            last_raw: None,
            direction: Direction::Forward,
        }
    }

    pub fn zone(&self) -> PinZone {
        self.zone
    }

    /// Replace the zone (after a relayout) while keeping direction history.
    pub fn set_zone(&mut self, zone: PinZone) {
        self.zone = zone;
    }

    /// Map `raw`, updating direction history.
    ///
    /// A repeated offset keeps the previous direction so duplicate notifications map to an
    /// identical sample.
    pub fn sample(&mut self, raw: f64) -> ScrollSample {
        if let Some(prev) = self.last_raw {
            if raw > prev {
                self.direction = Direction::Forward;
            } else if raw < prev {
                self.direction = Direction::Backward;
            }
        }
        self.last_raw = Some(raw);
        ScrollSample {
            raw,
            progress: self.zone.progress(raw),
            direction: self.direction,
            position: self.zone.position(raw),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/mapper.rs"]
mod tests;
