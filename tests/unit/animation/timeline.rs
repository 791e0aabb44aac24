use super::*;
use crate::{animation::ease::Ease, foundation::core::Length};

fn track(target: &str, from: PropertyState, to: PropertyState, start: f64, end: f64) -> KeyframeTrack {
    KeyframeTrack {
        target: TargetId::new(target),
        from,
        to,
        ease: Ease::Linear,
        start,
        end,
    }
}

fn fade_in(target: &str) -> KeyframeTrack {
    track(
        target,
        PropertyState::new().opacity(0.0),
        PropertyState::new().opacity(1.0),
        0.0,
        ENTRANCE_END,
    )
}

fn opacity(frame: &StyleFrame, target: &str) -> f64 {
    frame[&TargetId::new(target)].opacity.unwrap()
}

#[test]
fn entrance_scenario_matches_linear_fade() {
    let tl = PhaseTimeline::phased(1.3, vec![fade_in("a"), fade_in("b")]).unwrap();
    assert_eq!(opacity(&tl.evaluate(0.0), "a"), 0.0);
    assert!((opacity(&tl.evaluate(0.15), "a") - 0.5).abs() < 1e-12);
    assert_eq!(opacity(&tl.evaluate(0.3), "b"), 1.0);
    assert_eq!(opacity(&tl.evaluate(0.5), "b"), 1.0);
}

#[test]
fn evaluate_is_deterministic() {
    let tl = PhaseTimeline::phased(1.3, vec![fade_in("a")]).unwrap();
    for p in [0.0, 0.1, 0.33, 0.71, 1.0] {
        assert_eq!(tl.evaluate(p), tl.evaluate(p));
    }
}

#[test]
fn settle_phase_holds() {
    let exit = track(
        "a",
        PropertyState::new().y(Length::ZERO).opacity(1.0),
        PropertyState::new().y(Length::vh(-35.0)).opacity(0.0),
        EXIT_START,
        1.0,
    );
    let tl = PhaseTimeline::phased(1.3, vec![fade_in("a"), exit]).unwrap();
    assert_eq!(tl.evaluate(0.3), tl.evaluate(0.69));
    assert_eq!(tl.evaluate(0.3), tl.evaluate(0.5));
}

#[test]
fn later_registration_wins_on_overlap() {
    let exit = track(
        "a",
        PropertyState::new().opacity(1.0),
        PropertyState::new().opacity(0.0),
        EXIT_START,
        1.0,
    );
    let tl = PhaseTimeline::phased(1.3, vec![fade_in("a"), exit]).unwrap();
    // Both tracks have started; the exit track was registered last.
    assert!((opacity(&tl.evaluate(0.85), "a") - 0.5).abs() < 1e-12);
    assert_eq!(opacity(&tl.evaluate(1.0), "a"), 0.0);
}

#[test]
fn unstarted_tracks_show_earliest_from_state() {
    // Exit-only timeline: before 0.7 the target sits at the exit track's `from`.
    let exit = track(
        "card",
        PropertyState::new().x(Length::ZERO).opacity(1.0),
        PropertyState::new().x(Length::vw(-55.0)).opacity(0.0),
        EXIT_START,
        1.0,
    );
    let tl = PhaseTimeline::phased(1.3, vec![exit]).unwrap();
    let f = tl.evaluate(0.1);
    assert_eq!(f[&TargetId::new("card")].x, Some(Length::ZERO));
    assert_eq!(opacity(&f, "card"), 1.0);

    // An entrance track starting later than another still contributes its own `from` first.
    let late = track(
        "late",
        PropertyState::new().scale(0.86),
        PropertyState::new().scale(1.0),
        0.2,
        ENTRANCE_END,
    );
    let tl = PhaseTimeline::phased(1.4, vec![late]).unwrap();
    assert_eq!(tl.evaluate(0.05)[&TargetId::new("late")].scale, Some(0.86));
}

#[test]
fn snapshots_are_named_progress_points() {
    let tl = PhaseTimeline::phased(1.3, vec![fade_in("a")]).unwrap();
    assert_eq!(opacity(&tl.snapshot(Snapshot::EntranceHidden), "a"), 0.0);
    assert_eq!(opacity(&tl.snapshot(Snapshot::EntranceSettled), "a"), 1.0);
    assert_eq!(tl.settled(), tl.evaluate(0.3));
}

#[test]
fn single_phase_settles_at_end() {
    let tl = PhaseTimeline::single(vec![track(
        "panel",
        PropertyState::new().opacity(0.0),
        PropertyState::new().opacity(1.0),
        0.0,
        1.0,
    )])
    .unwrap();
    assert_eq!(opacity(&tl.settled(), "panel"), 1.0);
    assert_eq!(tl.phase_at(0.9), Phase::Entrance);
    assert_eq!(tl.pin_distance_ratio(), 0.0);
}

#[test]
fn tracks_may_not_enter_settle_hold() {
    let crossing = track(
        "a",
        PropertyState::new().opacity(0.0),
        PropertyState::new().opacity(1.0),
        0.1,
        0.5,
    );
    assert!(PhaseTimeline::phased(1.3, vec![crossing.clone()]).is_err());
    let inside = KeyframeTrack {
        start: 0.4,
        end: 0.6,
        ..crossing
    };
    assert!(PhaseTimeline::phased(1.3, vec![inside]).is_err());
}

#[test]
fn phase_bounds() {
    assert_eq!(Phase::at(0.0), Phase::Entrance);
    assert_eq!(Phase::at(0.29), Phase::Entrance);
    assert_eq!(Phase::at(0.3), Phase::Settle);
    assert_eq!(Phase::at(0.69), Phase::Settle);
    assert_eq!(Phase::at(0.7), Phase::Exit);
    assert_eq!(Phase::at(4.0), Phase::Exit);
    assert_eq!(Phase::at(f64::NAN), Phase::Entrance);
}

#[test]
fn rejects_bad_pin_distance() {
    assert!(PhaseTimeline::phased(0.0, vec![]).is_err());
    assert!(PhaseTimeline::phased(f64::INFINITY, vec![]).is_err());
}

#[test]
fn try_evaluate_rejects_non_finite_progress() {
    let tl = PhaseTimeline::phased(1.3, vec![]).unwrap();
    assert!(matches!(
        tl.try_evaluate(f64::NAN),
        Err(PhaseError::Evaluation(_))
    ));
    assert_eq!(tl.try_evaluate(2.0).unwrap(), tl.evaluate(1.0));
}
