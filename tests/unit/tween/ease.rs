use super::*;

const ALL: [Ease; 10] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::InSine,
    Ease::OutSine,
    Ease::InOutSine,
];

#[test]
fn endpoints_are_fixed_and_input_is_clamped() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{ease}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease}");
        assert_eq!(ease.apply(-3.0), 0.0, "{ease}");
        assert_eq!(ease.apply(7.0), 1.0, "{ease}");
    }
}

#[test]
fn curves_are_monotonic() {
    for ease in ALL {
        let mut prev = 0.0;
        for i in 1..=20 {
            let v = ease.apply(f64::from(i) / 20.0);
            assert!(v >= prev, "{ease} at step {i}");
            prev = v;
        }
    }
}

#[test]
fn in_out_curves_pass_through_the_midpoint() {
    for ease in [Ease::InOutQuad, Ease::InOutCubic, Ease::InOutSine] {
        assert!((ease.apply(0.5) - 0.5).abs() < 1e-12, "{ease}");
    }
    assert!(Ease::InCubic.apply(0.5) < 0.5);
    assert!(Ease::OutSine.apply(0.5) > 0.5);
}

#[test]
fn parses_common_spellings() {
    assert_eq!("linear".parse::<Ease>().unwrap(), Ease::Linear);
    assert_eq!("in_out_cubic".parse::<Ease>().unwrap(), Ease::InOutCubic);
    assert_eq!("cubic-in-out".parse::<Ease>().unwrap(), Ease::InOutCubic);
    assert_eq!("InQuad".parse::<Ease>().unwrap(), Ease::InQuad);
    assert_eq!("quadratic-out".parse::<Ease>().unwrap(), Ease::OutQuad);
    assert_eq!("sine-in".parse::<Ease>().unwrap(), Ease::InSine);
    assert!("bounce-in".parse::<Ease>().is_err());
    assert!("cubic".parse::<Ease>().is_err());
}

#[test]
fn serde_uses_snake_case_names() {
    let ease: Ease = serde_json::from_str("\"cubic-out\"").unwrap();
    assert_eq!(ease, Ease::OutCubic);
    assert_eq!(serde_json::to_string(&Ease::InOutSine).unwrap(), "\"in_out_sine\"");
}
