use super::*;

#[test]
fn unit_map_interpolates_and_clamps() {
    let m = RangeMap::unit(1.0, 0.4);
    assert_eq!(m.sample(0.0), 1.0);
    assert!((m.sample(0.5) - 0.7).abs() < 1e-12);
    assert!((m.sample(1.0) - 0.4).abs() < 1e-12);
    assert!((m.sample(5.0) - 0.4).abs() < 1e-12);
    assert_eq!(m.sample(-5.0), 1.0);
}

#[test]
fn reversed_input_interval_is_supported() {
    let m = RangeMap {
        input: [1.0, 0.0],
        output: [0.0, 10.0],
        ease: Ease::Linear,
    };
    assert_eq!(m.sample(1.0), 0.0);
    assert_eq!(m.sample(0.0), 10.0);
    assert!((m.sample(0.25) - 7.5).abs() < 1e-12);
}

#[test]
fn ease_shapes_the_interior() {
    let m = RangeMap {
        ease: Ease::InQuad,
        ..RangeMap::unit(0.0, 100.0)
    };
    assert!((m.sample(0.5) - 25.0).abs() < 1e-12);
}

#[test]
fn validate_rejects_degenerate_maps() {
    assert!(RangeMap::unit(0.0, -40.0).validate().is_ok());
    let empty = RangeMap {
        input: [0.3, 0.3],
        ..RangeMap::unit(0.0, 1.0)
    };
    assert!(empty.validate().is_err());
    let nan = RangeMap::unit(f64::NAN, 1.0);
    assert!(nan.validate().is_err());
}

#[test]
fn ease_defaults_to_linear_in_json() {
    let m: RangeMap = serde_json::from_str(r#"{"input":[0,1],"output":[0,-50]}"#).unwrap();
    assert_eq!(m.ease, Ease::Linear);
    assert_eq!(m.sample(0.5), -25.0);
}
