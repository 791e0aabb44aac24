use std::rc::Rc;

use crate::{
    animation::{
        sequence::Sequence,
        timeline::{PhaseLayout, PhaseTimeline},
    },
    foundation::core::{SectionId, Viewport},
    foundation::error::{PhaseError, PhaseResult},
    render::arena::Renderer,
    scroll::{bus::Subscription, surface::ScrollSurface},
    section::{controller::Lifecycle, playhead::Playhead},
};

/// Threshold line for a one-shot reveal: fires when the element's top reaches `start` of the
/// viewport height (`'top 80%'` is `start = 0.8`).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealTrigger {
    /// Document offset of the element's top edge.
    pub element_top: f64,
    /// Fraction of the viewport height, measured from the top.
    pub start: f64,
}

impl RevealTrigger {
    pub fn new(element_top: f64, start: f64) -> PhaseResult<Self> {
        if !element_top.is_finite() || !(0.0..=1.0).contains(&start) {
            return Err(PhaseError::validation(format!(
                "reveal trigger needs a finite top and start in [0, 1], got ({element_top}, {start})"
            )));
        }
        Ok(Self { element_top, start })
    }

    /// Parse a `"top <n>%"` start expression.
    pub fn parse(element_top: f64, expr: &str) -> PhaseResult<Self> {
        let pct = expr
            .trim()
            .strip_prefix("top")
            .map(str::trim)
            .and_then(|rest| rest.strip_suffix('%'))
            .and_then(|n| n.trim().parse::<f64>().ok())
            .ok_or_else(|| {
                PhaseError::validation(format!("unsupported reveal start '{expr}'"))
            })?;
        Self::new(element_top, pct / 100.0)
    }

    /// Scroll offset at which the element's top meets the threshold line.
    pub fn line(self, viewport: Viewport) -> f64 {
        self.element_top - self.start * viewport.height
    }

    pub fn is_crossed(self, raw: f64, viewport: Viewport) -> bool {
        raw >= self.line(viewport)
    }
}

/// Plays a single-phase timeline once when its trigger is crossed going down, and reverses it
/// when the trigger is crossed going back up. Nothing happens at the far edge.
pub struct RevealController<R: Renderer> {
    id: SectionId,
    surface: Rc<dyn ScrollSurface>,
    renderer: R,
    timeline: PhaseTimeline,
    playhead: Playhead,
    trigger: RevealTrigger,
    subscription: Option<Subscription>,
    state: Lifecycle,
    crossed: bool,
    painted: Option<u64>,
}

impl<R: Renderer> RevealController<R> {
    pub fn new(
        id: impl Into<SectionId>,
        surface: Rc<dyn ScrollSurface>,
        renderer: R,
        sequence: Sequence,
        trigger: RevealTrigger,
    ) -> PhaseResult<Self> {
        let id = id.into();
        if sequence.timeline.layout() != PhaseLayout::Single {
            return Err(PhaseError::timeline(format!(
                "reveal '{id}' needs a single-phase timeline"
            )));
        }
        Ok(Self {
            id,
            surface,
            renderer,
            playhead: Playhead::new(sequence.duration_secs)?,
            timeline: sequence.timeline,
            trigger,
            subscription: None,
            state: Lifecycle::Unmounted,
            crossed: false,
            painted: None,
        })
    }

    pub fn id(&self) -> &SectionId {
        &self.id
    }

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    pub fn trigger(&self) -> RevealTrigger {
        self.trigger
    }

    pub fn timeline(&self) -> &PhaseTimeline {
        &self.timeline
    }

    pub fn progress(&self) -> f64 {
        self.playhead.progress()
    }

    pub fn is_playing(&self) -> bool {
        self.playhead.is_playing()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Render the from-state, subscribe, and fire immediately if the trigger is already behind
    /// the current offset. Under reduced motion the end state is rendered instead.
    pub fn arm(&mut self) -> PhaseResult<()> {
        match self.state {
            Lifecycle::Disposed => {
                return Err(PhaseError::lifecycle(format!(
                    "reveal '{}' is disposed and cannot be re-armed",
                    self.id
                )));
            }
            Lifecycle::Armed | Lifecycle::Active => return Ok(()),
            Lifecycle::Unmounted => {}
        }

        self.state = Lifecycle::Armed;
        if self.surface.reduced_motion() {
            tracing::debug!(reveal = %self.id, "reduced motion: rendering end state");
            self.playhead.seek(1.0);
            self.paint();
            return Ok(());
        }

        self.subscription = Some(self.surface.subscribe());
        self.paint();
        self.on_offset(self.surface.scroll_offset());
        tracing::debug!(reveal = %self.id, line = self.trigger.line(self.surface.viewport()), "armed");
        Ok(())
    }

    /// Consume pending scroll, advance the playhead by `dt_secs`, and render if it moved.
    pub fn on_frame(&mut self, dt_secs: f64) {
        if !matches!(self.state, Lifecycle::Armed | Lifecycle::Active) {
            return;
        }
        if let Some(raw) = self.subscription.as_ref().and_then(Subscription::take) {
            self.on_offset(raw);
        }
        self.playhead.advance(dt_secs);
        if !self.crossed && self.playhead.progress() == 0.0 {
            self.state = Lifecycle::Armed;
        }
        self.paint();
    }

    /// Jump to the end state and stop playing, as when something else has already shown the
    /// settled content. A later crossing back up still reverses.
    pub fn finish(&mut self) {
        if !matches!(self.state, Lifecycle::Armed | Lifecycle::Active) {
            return;
        }
        if self.playhead.progress() < 1.0 || self.playhead.is_playing() {
            tracing::debug!(reveal = %self.id, "finished early");
        }
        self.playhead.seek(1.0);
        self.state = Lifecycle::Active;
        self.paint();
    }

    /// Release the subscription. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if self.state == Lifecycle::Disposed {
            return;
        }
        if let Some(mut sub) = self.subscription.take() {
            sub.cancel();
        }
        self.playhead.pause();
        self.state = Lifecycle::Disposed;
        tracing::debug!(reveal = %self.id, "disposed");
    }

    fn on_offset(&mut self, raw: f64) {
        let crossed = self.trigger.is_crossed(raw, self.surface.viewport());
        match (self.crossed, crossed) {
            (false, true) => {
                tracing::debug!(reveal = %self.id, raw, "enter: play");
                self.playhead.play();
                self.state = Lifecycle::Active;
            }
            (true, false) => {
                tracing::debug!(reveal = %self.id, raw, "leave back: reverse");
                self.playhead.reverse();
            }
            _ => {}
        }
        self.crossed = crossed;
    }

    fn paint(&mut self) {
        let progress = self.playhead.progress();
        if self.painted == Some(progress.to_bits()) {
            return;
        }
        self.painted = Some(progress.to_bits());
        for (target, state) in &self.timeline.evaluate(progress) {
            if !self.renderer.apply(target, state) {
                tracing::trace!(reveal = %self.id, %target, "target missing; skipped");
            }
        }
    }
}

impl<R: Renderer> Drop for RevealController<R> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/reveal.rs"]
mod tests;
