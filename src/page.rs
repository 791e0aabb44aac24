//! Headless page host: stacks sections top to bottom, drives one frame per paint and tears
//! everything down.

use std::{cell::RefCell, rc::Rc};

use crate::{
    animation::props::PropertyState,
    foundation::core::{SectionId, TargetId, Viewport},
    foundation::error::PhaseResult,
    render::arena::{Renderer, TargetArena},
    scroll::surface::{ScrollSurface, VirtualSurface},
    section::{
        controller::{ControllerConfig, SectionController},
        reveal::{RevealController, RevealTrigger},
    },
    sections::presets::{PresetKind, SectionPreset},
};

pub type SharedArena = Rc<RefCell<TargetArena>>;

pub struct Page {
    surface: Rc<VirtualSurface>,
    arena: SharedArena,
    config: ControllerConfig,
    sections: Vec<SectionController<SharedArena>>,
    reveals: Vec<RevealController<SharedArena>>,
    height: f64,
}

impl Page {
    pub fn new(viewport: Viewport, config: ControllerConfig) -> Self {
        Self {
            surface: Rc::new(VirtualSurface::new(viewport)),
            arena: Rc::new(RefCell::new(TargetArena::new())),
            config,
            sections: Vec::new(),
            reveals: Vec::new(),
            height: 0.0,
        }
    }

    /// Every storefront section in page order.
    pub fn storefront(viewport: Viewport, config: ControllerConfig) -> PhaseResult<Self> {
        let mut page = Self::new(viewport, config);
        for kind in PresetKind::ALL {
            page.push(kind.build()?)?;
        }
        Ok(page)
    }

    pub fn surface(&self) -> &Rc<VirtualSurface> {
        &self.surface
    }

    pub fn arena(&self) -> &SharedArena {
        &self.arena
    }

    /// Total scrollable height in pixels, pin spacers included.
    pub fn document_height(&self) -> f64 {
        self.height
    }

    pub fn sections(&self) -> &[SectionController<SharedArena>] {
        &self.sections
    }

    pub fn reveals(&self) -> &[RevealController<SharedArena>] {
        &self.reveals
    }

    pub fn section(&self, id: &str) -> Option<&SectionController<SharedArena>> {
        self.sections.iter().find(|s| s.id().as_str() == id)
    }

    pub fn reveal(&self, id: &str) -> Option<&RevealController<SharedArena>> {
        self.reveals.iter().find(|r| r.id().as_str() == id)
    }

    /// Current rendered state of `target`.
    pub fn style(&self, target: &str) -> Option<PropertyState> {
        self.arena.borrow().get(&TargetId::new(target)).copied()
    }

    /// Append `preset` below the current content, mount its targets, and arm its controllers.
    #[tracing::instrument(skip(self, preset), fields(section = %preset.id))]
    pub fn push(&mut self, preset: SectionPreset) -> PhaseResult<()> {
        let top = self.height;
        let viewport = self.surface.viewport();
        {
            let mut arena = self.arena.borrow_mut();
            for target in preset.targets() {
                if !arena.contains(&target) {
                    arena.mount(target, PropertyState::new());
                }
            }
        }

        let extent = preset.scroll_extent_vh() * viewport.height;
        let SectionPreset {
            id,
            scroll,
            reveal,
            leave_back,
            ..
        } = preset;

        if let Some(timeline) = scroll {
            let mut ctl = SectionController::new(
                id.clone(),
                self.dyn_surface(),
                self.arena.clone(),
                self.config.clone(),
            )?
            .with_leave_back(leave_back);
            ctl.arm_at(top, timeline)?;
            self.sections.push(ctl);
        }
        if let Some(reveal) = reveal {
            let trigger = RevealTrigger::new(top, reveal.start)?;
            let mut ctl = RevealController::new(
                id,
                self.dyn_surface(),
                self.arena.clone(),
                reveal.sequence,
                trigger,
            )?;
            ctl.arm()?;
            self.reveals.push(ctl);
        }

        self.height += extent;
        tracing::debug!(top, height = extent, "section stacked");
        Ok(())
    }

    /// Scroll the document to `raw`, clamped to the scrollable range.
    pub fn scroll_to(&self, raw: f64) {
        let max = (self.height - self.surface.viewport().height).max(0.0);
        self.surface.scroll_to(raw.clamp(0.0, max));
    }

    /// Section pinned at the current offset, if any.
    pub fn pinned(&self) -> Option<SectionId> {
        self.surface.pinned_now()
    }

    /// Run one paint: scroll-driven sections first, then reveals.
    ///
    /// A section that restores its settled state on leave-back also finishes its own reveal, so
    /// an intro still in flight does not pull the restored copy back mid-animation.
    pub fn frame(&mut self, dt_secs: f64) {
        let mut reset = Vec::new();
        for section in &mut self.sections {
            let before = section.leave_back_resets();
            section.on_frame(dt_secs);
            if section.leave_back_resets() > before {
                reset.push(section.id().clone());
            }
        }
        for reveal in &mut self.reveals {
            if reset.contains(reveal.id()) {
                reveal.finish();
            }
            reveal.on_frame(dt_secs);
        }
    }

    /// Dispose every controller and restore the markup state of every target.
    pub fn teardown(&mut self) {
        for section in &mut self.sections {
            section.dispose();
        }
        for reveal in &mut self.reveals {
            reveal.dispose();
        }
        self.sections.clear();
        self.reveals.clear();
        self.arena.borrow_mut().revert_all();
        tracing::debug!("page torn down");
    }

    fn dyn_surface(&self) -> Rc<dyn ScrollSurface> {
        self.surface.clone()
    }
}

#[cfg(test)]
#[path = "../tests/unit/page.rs"]
mod tests;
