use super::*;

const ALL: [Ease; 8] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::OutBack {
        overshoot: DEFAULT_BACK_OVERSHOOT,
    },
];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert!(ease.apply(0.0).abs() < 1e-12, "{ease}");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease}");
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in &ALL[..7] {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn back_out_overshoots() {
    let ease = Ease::parse("back.out(1.6)").unwrap();
    assert_eq!(ease, Ease::OutBack { overshoot: 1.6 });
    assert!(ease.apply(0.7) > 1.0);
}

#[test]
fn names_parse_and_roundtrip() {
    assert_eq!(Ease::parse("none").unwrap(), Ease::Linear);
    assert_eq!(Ease::parse("linear").unwrap(), Ease::Linear);
    assert_eq!(Ease::parse("power2.in").unwrap(), Ease::InCubic);
    assert_eq!(Ease::parse("power2").unwrap(), Ease::OutCubic);
    assert_eq!(Ease::parse("ease-in").unwrap(), Ease::InCubic);
    assert_eq!(
        Ease::parse("ease-out-back").unwrap(),
        Ease::OutBack {
            overshoot: DEFAULT_BACK_OVERSHOOT
        }
    );
    assert!(Ease::parse("elastic.out").is_err());
    assert!(Ease::parse("back.out(x)").is_err());

    for ease in ALL {
        let json = serde_json::to_string(&ease).unwrap();
        let back: Ease = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ease);
    }
}

#[test]
fn input_is_clamped() {
    assert_eq!(Ease::Linear.apply(-1.0), 0.0);
    assert_eq!(Ease::Linear.apply(2.0), 1.0);
}
