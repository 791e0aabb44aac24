use std::cell::RefCell;

use super::*;
use crate::{
    animation::{props::PropertyState, timeline::Phase},
    composition::dsl::{TimelineBuilder, TweenBuilder},
    foundation::core::{Length, TargetId, Viewport},
    render::arena::TargetArena,
    scroll::surface::VirtualSurface,
};

type Arena = Rc<RefCell<TargetArena>>;

fn timeline() -> PhaseTimeline {
    TimelineBuilder::phased(1.0)
        .tween(TweenBuilder::new(
            "card",
            PropertyState::new().x(Length::vw(-60.0)).opacity(0.0),
            PropertyState::new().x(Length::ZERO).opacity(1.0),
        ))
        .tween(
            TweenBuilder::new(
                "card",
                PropertyState::new().y(Length::ZERO).opacity(1.0),
                PropertyState::new().y(Length::vh(-35.0)).opacity(0.0),
            )
            .phase(Phase::Exit),
        )
        .tween(
            TweenBuilder::new(
                "badge",
                PropertyState::new().scale(1.0),
                PropertyState::new().scale(0.8),
            )
            .phase(Phase::Exit),
        )
        .build()
        .unwrap()
}

fn zone() -> PinZone {
    PinZone::new(100.0, 1100.0).unwrap()
}

fn raw(progress: f64) -> f64 {
    100.0 + progress * 1000.0
}

fn setup(config: ControllerConfig) -> (Rc<VirtualSurface>, Arena, SectionController<Arena>) {
    let surface = Rc::new(VirtualSurface::new(Viewport::default()));
    let arena: Arena = Rc::new(RefCell::new(TargetArena::new()));
    arena.borrow_mut().mount("card", PropertyState::new());
    arena.borrow_mut().mount("badge", PropertyState::new());
    let dyn_surface: Rc<dyn ScrollSurface> = surface.clone();
    let ctl = SectionController::new("grid", dyn_surface, arena.clone(), config).unwrap();
    (surface, arena, ctl)
}

fn current(arena: &Arena, id: &str) -> PropertyState {
    arena.borrow().get(&TargetId::new(id)).copied().unwrap()
}

fn assert_frame(arena: &Arena, frame: &StyleFrame) {
    for (id, state) in frame {
        assert_eq!(&current(arena, id.as_str()), state, "target {id}");
    }
}

#[test]
fn arm_pins_and_renders_initial_state() {
    let (surface, arena, mut ctl) = setup(ControllerConfig::immediate());
    assert_eq!(ctl.state(), Lifecycle::Unmounted);
    ctl.arm(zone(), timeline()).unwrap();

    assert_eq!(ctl.state(), Lifecycle::Armed);
    assert!(surface.is_pinned(&SectionId::new("grid")));
    assert_eq!(surface.bus().subscriber_count(), 1);
    let card = current(&arena, "card");
    assert_eq!(card.x, Some(Length::vw(-60.0)));
    assert_eq!(card.opacity, Some(0.0));
    assert_eq!(card.y, Some(Length::ZERO));
}

#[test]
fn frame_uses_only_the_latest_offset() {
    let (surface, arena, mut ctl) = setup(ControllerConfig::immediate());
    let tl = timeline();
    let expected = tl.evaluate(0.5);
    ctl.arm(zone(), tl).unwrap();

    surface.scroll_to(raw(0.1));
    surface.scroll_to(raw(0.2));
    surface.scroll_to(raw(0.5));
    ctl.on_frame(1.0 / 60.0);

    assert_eq!(ctl.state(), Lifecycle::Active);
    assert_frame(&arena, &expected);
    assert_eq!(ctl.latest_sample().map(|s| s.progress), Some(0.5));
}

#[test]
fn duplicate_delivery_changes_nothing() {
    let (_surface, arena, mut ctl) = setup(ControllerConfig::immediate());
    ctl.arm(zone(), timeline()).unwrap();
    let sample = ScrollSample {
        raw: raw(0.85),
        progress: 0.85,
        direction: Direction::Forward,
        position: ZonePosition::Within,
    };
    ctl.on_scroll(sample);
    let writes = arena.borrow().writes();
    let snapshot = current(&arena, "card");
    ctl.on_scroll(sample);
    assert_eq!(arena.borrow().writes(), writes);
    assert_eq!(current(&arena, "card"), snapshot);
}

#[test]
fn leaving_backwards_restores_settled_state() {
    let (surface, arena, mut ctl) = setup(ControllerConfig::immediate());
    let tl = timeline();
    let settled = tl.settled();
    ctl.arm(zone(), tl).unwrap();

    surface.scroll_to(raw(0.9));
    ctl.on_frame(0.016);
    assert_eq!(current(&arena, "badge").scale.map(|s| s < 1.0), Some(true));

    surface.scroll_to(50.0);
    ctl.on_frame(0.016);
    assert_eq!(ctl.state(), Lifecycle::Armed);
    assert_frame(&arena, &settled);
}

#[test]
fn revealed_content_stays_settled_when_nudged_forward_above_the_zone() {
    let (surface, arena, mut ctl) = setup(ControllerConfig::immediate());
    let tl = timeline();
    let settled = tl.settled();
    ctl.arm(zone(), tl).unwrap();

    surface.scroll_to(raw(0.9));
    ctl.on_frame(0.016);
    surface.scroll_to(50.0);
    ctl.on_frame(0.016);
    assert_frame(&arena, &settled);

    surface.scroll_to(60.0);
    ctl.on_frame(0.016);
    assert_eq!(
        ctl.latest_sample().map(|s| s.direction),
        Some(Direction::Forward)
    );
    assert_eq!(ctl.state(), Lifecycle::Armed);
    assert_frame(&arena, &settled);
}

#[test]
fn leave_back_also_restores_extra_targets() {
    let (surface, arena, ctl) = setup(ControllerConfig::immediate());
    arena
        .borrow_mut()
        .mount("headline", PropertyState::new().opacity(0.0));
    let copy = PropertyState::new().y(Length::ZERO).opacity(1.0);
    let extra: StyleFrame = [(TargetId::new("headline"), copy)].into_iter().collect();
    let mut ctl = ctl.with_leave_back(extra);
    ctl.arm(zone(), timeline()).unwrap();
    assert_eq!(current(&arena, "headline").opacity, Some(0.0));

    surface.scroll_to(raw(0.5));
    ctl.on_frame(0.016);
    assert_eq!(ctl.leave_back_resets(), 0);
    surface.scroll_to(0.0);
    ctl.on_frame(0.016);

    assert_eq!(current(&arena, "headline"), copy);
    assert_eq!(ctl.leave_back_resets(), 1);
    assert_eq!(
        ctl.settled_snapshot().unwrap()[&TargetId::new("headline")],
        copy
    );
}

#[test]
fn leave_back_reset_can_be_disabled() {
    let config = ControllerConfig {
        reset_on_leave_back: false,
        ..ControllerConfig::immediate()
    };
    let (surface, arena, mut ctl) = setup(config);
    let tl = timeline();
    let initial = tl.evaluate(0.0);
    ctl.arm(zone(), tl).unwrap();

    surface.scroll_to(raw(0.9));
    ctl.on_frame(0.016);
    surface.scroll_to(0.0);
    ctl.on_frame(0.016);
    assert_eq!(ctl.state(), Lifecycle::Armed);
    assert_frame(&arena, &initial);
}

#[test]
fn approaching_from_above_keeps_initial_state() {
    let (surface, arena, mut ctl) = setup(ControllerConfig::immediate());
    let tl = timeline();
    let initial = tl.evaluate(0.0);
    ctl.arm(zone(), tl).unwrap();

    surface.scroll_to(20.0);
    ctl.on_frame(0.016);
    surface.scroll_to(10.0);
    ctl.on_frame(0.016);
    assert_eq!(ctl.state(), Lifecycle::Armed);
    assert_frame(&arena, &initial);
}

#[test]
fn leave_back_reset_overwrites_targets_animated_elsewhere() {
    // Another animation (an intro reveal, say) owning "card" loses its state to the reset.
    let (surface, arena, mut ctl) = setup(ControllerConfig::immediate());
    ctl.arm(zone(), timeline()).unwrap();
    surface.scroll_to(raw(0.5));
    ctl.on_frame(0.016);

    arena
        .borrow_mut()
        .apply(&TargetId::new("card"), &PropertyState::new().opacity(0.2));
    surface.scroll_to(0.0);
    ctl.on_frame(0.016);
    assert_eq!(current(&arena, "card").opacity, Some(1.0));
}

#[test]
fn missing_targets_are_skipped() {
    let (surface, arena, mut ctl) = setup(ControllerConfig::immediate());
    arena.borrow_mut().unmount(&TargetId::new("badge"));
    ctl.arm(zone(), timeline()).unwrap();
    surface.scroll_to(raw(1.0));
    ctl.on_frame(0.016);

    assert_eq!(ctl.state(), Lifecycle::Active);
    assert_eq!(current(&arena, "card").opacity, Some(0.0));
    assert!(arena.borrow().get(&TargetId::new("badge")).is_none());
}

#[test]
fn past_the_zone_holds_exit_complete() {
    let (surface, arena, mut ctl) = setup(ControllerConfig::immediate());
    let tl = timeline();
    let done = tl.evaluate(1.0);
    ctl.arm(zone(), tl).unwrap();
    surface.scroll_to(5000.0);
    ctl.on_frame(0.016);
    assert_eq!(ctl.state(), Lifecycle::Active);
    assert_frame(&arena, &done);
}

#[test]
fn scrub_lags_behind_then_catches_up() {
    let (surface, _arena, mut ctl) = setup(ControllerConfig::default());
    ctl.arm(zone(), timeline()).unwrap();
    surface.scroll_to(raw(0.5));
    ctl.on_frame(1.0 / 60.0);

    let card = ctl.renderer().borrow().get(&TargetId::new("card")).copied().unwrap();
    let opacity = card.opacity.unwrap();
    assert!(opacity > 0.0 && opacity < 1.0, "opacity {opacity}");

    for _ in 0..600 {
        ctl.on_frame(1.0 / 60.0);
    }
    let card = ctl.renderer().borrow().get(&TargetId::new("card")).copied().unwrap();
    assert_eq!(card.opacity, Some(1.0));
}

#[test]
fn dispose_releases_pin_and_subscription() {
    let (surface, _arena, mut ctl) = setup(ControllerConfig::immediate());
    ctl.arm(zone(), timeline()).unwrap();
    ctl.dispose();

    assert_eq!(ctl.state(), Lifecycle::Disposed);
    assert!(!surface.is_pinned(&SectionId::new("grid")));
    assert_eq!(surface.bus().subscriber_count(), 0);
    ctl.dispose();
    assert_eq!(ctl.state(), Lifecycle::Disposed);
}

#[test]
fn notifications_after_dispose_are_ignored() {
    let (surface, arena, mut ctl) = setup(ControllerConfig::immediate());
    ctl.arm(zone(), timeline()).unwrap();
    surface.scroll_to(raw(0.5));
    ctl.dispose();
    let writes = arena.borrow().writes();
    ctl.on_frame(0.016);
    assert_eq!(arena.borrow().writes(), writes);
}

#[test]
fn dispose_before_arm_is_harmless() {
    let (surface, _arena, mut ctl) = setup(ControllerConfig::immediate());
    ctl.dispose();
    assert_eq!(ctl.state(), Lifecycle::Disposed);
    assert!(surface.pins().is_empty());

    let err = ctl.arm(zone(), timeline()).unwrap_err();
    assert!(matches!(err, PhaseError::Lifecycle(_)));
}

#[test]
fn dropping_the_controller_disposes_it() {
    let (surface, _arena, mut ctl) = setup(ControllerConfig::immediate());
    ctl.arm(zone(), timeline()).unwrap();
    drop(ctl);
    assert!(surface.pins().is_empty());
    assert_eq!(surface.bus().subscriber_count(), 0);
}

#[test]
fn reduced_motion_renders_settled_without_registering() {
    let (surface, arena, mut ctl) = setup(ControllerConfig::immediate());
    surface.set_reduced_motion(true);
    let tl = timeline();
    let settled = tl.settled();
    ctl.arm(zone(), tl).unwrap();

    assert!(surface.pins().is_empty());
    assert_eq!(surface.bus().subscriber_count(), 0);
    assert_frame(&arena, &settled);
}

#[test]
fn single_phase_timelines_are_rejected() {
    let (_surface, _arena, mut ctl) = setup(ControllerConfig::immediate());
    let single = TimelineBuilder::single()
        .tween(TweenBuilder::new(
            "card",
            PropertyState::new().opacity(0.0),
            PropertyState::new().opacity(1.0),
        ))
        .build()
        .unwrap();
    assert!(ctl.arm(zone(), single).is_err());
    assert_eq!(ctl.state(), Lifecycle::Unmounted);
}

#[test]
fn rearm_replaces_zone() {
    let (surface, _arena, mut ctl) = setup(ControllerConfig::immediate());
    ctl.arm(zone(), timeline()).unwrap();
    ctl.arm_at(2000.0, timeline()).unwrap();
    let zone = surface.pins()[&SectionId::new("grid")];
    assert_eq!(zone.start, 2000.0);
    assert_eq!(zone.end, 2900.0);
    assert_eq!(surface.bus().subscriber_count(), 1);
}

#[test]
fn reduced_motion_mid_session_shows_settled_state() {
    let (surface, arena, mut ctl) = setup(ControllerConfig::immediate());
    let tl = timeline();
    let settled = tl.settled();
    ctl.arm(zone(), tl).unwrap();
    surface.scroll_to(raw(0.9));
    ctl.on_frame(0.016);

    surface.set_reduced_motion(true);
    ctl.on_frame(0.016);
    assert_frame(&arena, &settled);

    surface.scroll_to(raw(0.95));
    ctl.on_frame(0.016);
    assert_frame(&arena, &settled);

    surface.set_reduced_motion(false);
    ctl.on_frame(0.016);
    assert_frame(&arena, &timeline().evaluate(0.95));
}
