use super::*;

#[test]
fn lerp_only_touches_shared_properties() {
    let a = PropertyState::new().x(Length::vw(-60.0)).opacity(0.0);
    let b = PropertyState::new().x(Length::ZERO).opacity(1.0);
    let mid = PropertyState::lerp(&a, &b, 0.5);
    assert_eq!(mid.x, Some(Length::vw(-30.0)));
    assert_eq!(mid.opacity, Some(0.5));
    assert_eq!(mid.y, None);
    assert_eq!(mid.scale, None);
}

#[test]
fn overlay_is_last_write_wins() {
    let mut base = PropertyState::new().x(Length::px(1.0)).opacity(0.2);
    base.overlay(&PropertyState::new().opacity(0.9).scale(2.0));
    assert_eq!(base.x, Some(Length::px(1.0)));
    assert_eq!(base.opacity, Some(0.9));
    assert_eq!(base.scale, Some(2.0));
}

#[test]
fn validate_pair_rejects_mismatched_sets_and_units() {
    let from = PropertyState::new().x(Length::vw(10.0));
    let to = PropertyState::new().x(Length::ZERO).opacity(1.0);
    assert!(PropertyState::validate_pair(&from, &to).is_err());

    let from = PropertyState::new().y(Length::vh(10.0));
    let to = PropertyState::new().y(Length::vw(5.0));
    assert!(PropertyState::validate_pair(&from, &to).is_err());

    let empty = PropertyState::new();
    assert!(PropertyState::validate_pair(&empty, &empty).is_err());

    let from = PropertyState::new().opacity(f64::NAN);
    let to = PropertyState::new().opacity(1.0);
    assert!(PropertyState::validate_pair(&from, &to).is_err());

    let from = PropertyState::new().y(Length::vh(30.0)).opacity(0.0);
    let to = PropertyState::new().y(Length::ZERO).opacity(1.0);
    assert!(PropertyState::validate_pair(&from, &to).is_ok());
}

#[test]
fn resolve_fills_identity_for_unwritten() {
    let vp = Viewport::new(1000.0, 500.0).unwrap();
    let style = PropertyState::new().x(Length::vw(10.0)).resolve(vp);
    assert_eq!(style.translate, Vec2::new(100.0, 0.0));
    assert_eq!(style.opacity, 1.0);
    assert_eq!(style.scale, 1.0);

    let style = PropertyState::new().opacity(1.4).scale(0.5).resolve(vp);
    assert_eq!(style.opacity, 1.0);
    assert_eq!(style.transform, Affine::scale(0.5));
}

#[test]
fn json_uses_sparse_keys() {
    let s: PropertyState = serde_json::from_str(r#"{"x":"-12vw","scale":0.98}"#).unwrap();
    assert_eq!(s.x, Some(Length::vw(-12.0)));
    assert_eq!(s.scale, Some(0.98));
    assert_eq!(s.opacity, None);
    assert!(serde_json::from_str::<PropertyState>(r#"{"rotate":1}"#).is_err());
    assert_eq!(
        serde_json::to_string(&PropertyState::new().opacity(1.0)).unwrap(),
        r#"{"opacity":1.0}"#
    );
}
