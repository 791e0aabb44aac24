use std::rc::Rc;

use crate::{
    animation::timeline::{PhaseLayout, PhaseTimeline, Snapshot, StyleFrame},
    foundation::core::SectionId,
    foundation::error::{PhaseError, PhaseResult},
    render::arena::Renderer,
    scroll::{
        bus::Subscription,
        mapper::{Direction, PinZone, ScrollProgressMapper, ScrollSample, ZonePosition},
        scrub::ScrubSmoother,
        surface::ScrollSurface,
    },
};

/// Controller lifecycle. `Disposed` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Lifecycle {
    /// Constructed, no pin zone registered.
    Unmounted,
    /// Pin zone registered; progress has not entered the zone (or was reset above it).
    Armed,
    /// Progress is inside (or has passed) the zone and the timeline is being evaluated.
    Active,
    /// Listeners and pin released.
    Disposed,
}

/// Per-controller tuning.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ControllerConfig {
    /// Seconds the rendered progress trails the scrollbar; `None` follows it exactly.
    pub scrub: Option<f64>,
    /// Restore the settled entrance state when scrolled back above the zone after a reveal.
    pub reset_on_leave_back: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            scrub: Some(0.6),
            reset_on_leave_back: true,
        }
    }
}

impl ControllerConfig {
    /// No smoothing; progress follows scroll exactly.
    pub fn immediate() -> Self {
        Self {
            scrub: None,
            ..Self::default()
        }
    }
}

type DeliveryKey = (u64, Direction, ZonePosition);

/// What a paint renders.
#[derive(Clone, Copy, Debug)]
enum Paint {
    /// The timeline evaluated at this progress.
    Progress(f64),
    /// The entrance-settled snapshot plus any extra leave-back targets.
    Settled,
}

/// Owns one pinned section: pin zone, timeline, and lifecycle.
pub struct SectionController<R: Renderer> {
    id: SectionId,
    surface: Rc<dyn ScrollSurface>,
    renderer: R,
    config: ControllerConfig,
    state: Lifecycle,
    timeline: Option<PhaseTimeline>,
    mapper: Option<ScrollProgressMapper>,
    subscription: Option<Subscription>,
    smoother: Option<ScrubSmoother>,
    latest: Option<ScrollSample>,
    last_delivery: Option<DeliveryKey>,
    revealed: bool,
    leave_back: StyleFrame,
    resets: u64,
    motion_reduced: bool,
}

impl<R: Renderer> SectionController<R> {
    /// Create an unmounted controller. The surface is injected; nothing is registered yet.
    pub fn new(
        id: impl Into<SectionId>,
        surface: Rc<dyn ScrollSurface>,
        renderer: R,
        config: ControllerConfig,
    ) -> PhaseResult<Self> {
        let smoother = config.scrub.map(ScrubSmoother::new).transpose()?;
        Ok(Self {
            id: id.into(),
            surface,
            renderer,
            config,
            state: Lifecycle::Unmounted,
            timeline: None,
            mapper: None,
            subscription: None,
            smoother,
            latest: None,
            last_delivery: None,
            revealed: false,
            leave_back: StyleFrame::new(),
            resets: 0,
            motion_reduced: false,
        })
    }

    /// Also restore `targets` to the given states whenever the settled state is shown.
    ///
    /// For elements the section owns but its scroll timeline does not animate, such as copy
    /// brought in by a separate intro.
    pub fn with_leave_back(mut self, targets: StyleFrame) -> Self {
        self.leave_back = targets;
        self
    }

    /// Extra targets restored with the settled state.
    pub fn leave_back_targets(&self) -> &StyleFrame {
        &self.leave_back
    }

    /// Number of leave-back resets painted so far.
    pub fn leave_back_resets(&self) -> u64 {
        self.resets
    }

    pub fn id(&self) -> &SectionId {
        &self.id
    }

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn timeline(&self) -> Option<&PhaseTimeline> {
        self.timeline.as_ref()
    }

    pub fn zone(&self) -> Option<PinZone> {
        self.mapper.as_ref().map(ScrollProgressMapper::zone)
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Most recent mapper output.
    pub fn latest_sample(&self) -> Option<ScrollSample> {
        self.latest
    }

    /// State to show without animation: the entrance-settled snapshot, extra leave-back targets
    /// included.
    pub fn settled_snapshot(&self) -> Option<StyleFrame> {
        let mut frame = self.timeline.as_ref()?.snapshot(Snapshot::EntranceSettled);
        for (target, state) in &self.leave_back {
            frame.entry(target.clone()).or_default().overlay(state);
        }
        Some(frame)
    }

    /// Register the pin zone and timeline, subscribe to scroll notifications, and render the
    /// state for the current offset.
    ///
    /// Arming again while armed or active replaces zone and timeline (a relayout). When the
    /// surface reports reduced motion the settled snapshot is rendered and nothing is
    /// registered.
    pub fn arm(&mut self, zone: PinZone, timeline: PhaseTimeline) -> PhaseResult<()> {
        if self.state == Lifecycle::Disposed {
            return Err(PhaseError::lifecycle(format!(
                "section '{}' is disposed and cannot be re-armed",
                self.id
            )));
        }
        if timeline.layout() != PhaseLayout::Phased {
            return Err(PhaseError::timeline(format!(
                "section '{}' needs a phased timeline; single-phase timelines are reveals",
                self.id
            )));
        }

        self.timeline = Some(timeline);
        self.last_delivery = None;
        match self.mapper.as_mut() {
            Some(mapper) => mapper.set_zone(zone),
            None => self.mapper = Some(ScrollProgressMapper::new(zone)),
        }

        if self.surface.reduced_motion() {
            tracing::debug!(section = %self.id, "reduced motion: rendering settled state");
            self.state = Lifecycle::Armed;
            self.motion_reduced = true;
            self.paint(Paint::Settled);
            return Ok(());
        }

        self.surface.pin(&self.id, zone);
        if self.subscription.is_none() {
            self.subscription = Some(self.surface.subscribe());
        }
        if self.state == Lifecycle::Unmounted {
            self.state = Lifecycle::Armed;
        }
        tracing::debug!(section = %self.id, start = zone.start, end = zone.end, "armed");

        let raw = self.surface.scroll_offset();
        if let Some(sample) = self.map(raw) {
            let progress = match self.smoother.as_mut() {
                Some(s) => s.snap(sample.progress),
                None => sample.progress,
            };
            self.latest = Some(sample);
            self.on_scroll(ScrollSample { progress, ..sample });
        }
        Ok(())
    }

    /// Arm with a zone starting at `section_top` and spanning the timeline's pin distance.
    pub fn arm_at(&mut self, section_top: f64, timeline: PhaseTimeline) -> PhaseResult<()> {
        let zone = PinZone::from_trigger(
            section_top,
            self.surface.viewport().height,
            timeline.pin_distance_ratio(),
        )?;
        self.arm(zone, timeline)
    }

    /// Consume at most one pending scroll notification and render once.
    ///
    /// Call once per paint. With scrub smoothing enabled, frames keep advancing toward the last
    /// mapped progress even without new notifications.
    pub fn on_frame(&mut self, dt_secs: f64) {
        if !matches!(self.state, Lifecycle::Armed | Lifecycle::Active) {
            return;
        }
        let pending = self.subscription.as_ref().and_then(Subscription::take);
        if let Some(raw) = pending
            && let Some(sample) = self.map(raw)
        {
            self.latest = Some(sample);
        }
        let Some(sample) = self.latest else {
            return;
        };
        let progress = match self.smoother.as_mut() {
            Some(s) => s.advance(sample.progress, dt_secs),
            None => sample.progress,
        };
        self.on_scroll(ScrollSample { progress, ..sample });
    }

    /// Evaluate the timeline for `sample` and apply it.
    ///
    /// Delivering the same sample twice in a row changes nothing. Once the section has been
    /// revealed, any offset above the zone shows the entrance-settled snapshot, whichever way
    /// the page is moving. If the surface starts reporting reduced motion, the settled snapshot
    /// is shown once and later samples are ignored until it stops.
    pub fn on_scroll(&mut self, sample: ScrollSample) {
        if !matches!(self.state, Lifecycle::Armed | Lifecycle::Active) {
            return;
        }
        if self.surface.reduced_motion() {
            if !self.motion_reduced {
                tracing::debug!(section = %self.id, "reduced motion: rendering settled state");
                self.motion_reduced = true;
                self.last_delivery = None;
                self.paint(Paint::Settled);
            }
            return;
        }
        self.motion_reduced = false;
        let key = (sample.progress.to_bits(), sample.direction, sample.position);
        if self.last_delivery == Some(key) {
            return;
        }
        self.last_delivery = Some(key);

        match sample.position {
            ZonePosition::Before => {
                if self.revealed && self.config.reset_on_leave_back {
                    if sample.direction == Direction::Backward {
                        tracing::debug!(section = %self.id, "left zone backwards: restoring settled state");
                    }
                    self.resets += 1;
                    self.paint(Paint::Settled);
                } else {
                    self.paint(Paint::Progress(0.0));
                }
                self.state = Lifecycle::Armed;
            }
            ZonePosition::Within | ZonePosition::After => {
                if self.state == Lifecycle::Armed {
                    tracing::debug!(section = %self.id, "active");
                }
                self.state = Lifecycle::Active;
                self.revealed = true;
                self.paint(Paint::Progress(sample.progress));
            }
        }
    }

    /// Release the pin and the scroll subscription. Safe to call repeatedly, and before `arm`.
    pub fn dispose(&mut self) {
        if self.state == Lifecycle::Disposed {
            return;
        }
        if self.state != Lifecycle::Unmounted {
            self.surface.unpin(&self.id);
        }
        if let Some(mut sub) = self.subscription.take() {
            sub.cancel();
        }
        self.latest = None;
        self.state = Lifecycle::Disposed;
        tracing::debug!(section = %self.id, "disposed");
    }

    fn map(&mut self, raw: f64) -> Option<ScrollSample> {
        self.mapper.as_mut().map(|m| m.sample(raw))
    }

    fn paint(&mut self, paint: Paint) {
        let frame = match paint {
            Paint::Progress(progress) => self.timeline.as_ref().map(|tl| tl.evaluate(progress)),
            Paint::Settled => self.settled_snapshot(),
        };
        let Some(frame) = frame else {
            return;
        };
        for (target, state) in &frame {
            if !self.renderer.apply(target, state) {
                tracing::trace!(section = %self.id, %target, "target missing; skipped");
            }
        }
        tracing::trace!(section = %self.id, ?paint, "painted");
    }
}

impl<R: Renderer> Drop for SectionController<R> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/controller.rs"]
mod tests;
