//! Scroll-synchronized phase timelines.
//!
//! A section is pinned for a scroll distance while a declarative timeline plays against the
//! scroll position, split into three phases:
//!
//! 1. **Entrance** `[0, 0.3)`: elements animate in.
//! 2. **Settle** `[0.3, 0.7)`: nothing moves.
//! 3. **Exit** `[0.7, 1]`: elements animate out.
//!
//! The pieces, leaf first:
//!
//! - [`KeyframeTrack`]: one target's from/to state over a window of progress.
//! - [`PhaseTimeline`]: ordered tracks, evaluated as a pure function of progress.
//! - [`ScrollProgressMapper`]: raw offset + [`PinZone`] -> progress and direction.
//! - [`SectionController`]: pins, subscribes, evaluates once per frame, resets on leave-back and
//!   disposes deterministically.
//! - [`RevealController`]: a one-shot, time-driven variant for unpinned content.
//!
//! Timelines are data ([`TimelineSpec`], JSON with camelCase keys) or built with
//! [`TimelineBuilder`]. The storefront sections live in [`sections::presets`] and can be stacked
//! into a headless [`Page`]. A small [`CartStore`] backs the product call-to-action.
//!
//! Nothing here is fatal at runtime: missing targets are skipped, disposal is idempotent, and
//! every timeline exposes a settled snapshot for hosts that cannot animate.
#![forbid(unsafe_code)]

pub mod animation;
pub mod cart;
pub mod composition;
pub mod foundation;
pub mod page;
pub mod render;
pub mod scroll;
pub mod section;
pub mod sections;

pub use animation::ease::Ease;
pub use animation::props::{Property, PropertyState, ResolvedStyle};
pub use animation::sequence::{Position, Sequence, SequenceBuilder, Step};
pub use animation::timeline::{
    ENTRANCE_END, EXIT_START, Phase, PhaseLayout, PhaseTimeline, Snapshot, StyleFrame,
};
pub use animation::track::KeyframeTrack;
pub use cart::store::{CartStore, CartTotals, LineItem, Product, format_price};
pub use composition::dsl::{TimelineBuilder, TweenBuilder};
pub use composition::spec::{TimelineSpec, TrackSpec, build_timeline};
pub use foundation::core::{Affine, Length, LengthUnit, SectionId, TargetId, Vec2, Viewport};
pub use foundation::error::{PhaseError, PhaseResult};
pub use page::Page;
pub use render::arena::{Renderer, TargetArena};
pub use scroll::bus::{ScrollBus, Subscription};
pub use scroll::mapper::{Direction, PinZone, ScrollProgressMapper, ScrollSample, ZonePosition};
pub use scroll::scrub::ScrubSmoother;
pub use scroll::surface::{ScrollSurface, VirtualSurface};
pub use section::controller::{ControllerConfig, Lifecycle, SectionController};
pub use section::playhead::Playhead;
pub use section::reveal::{RevealController, RevealTrigger};
pub use sections::presets::{PresetKind, SectionPreset};
