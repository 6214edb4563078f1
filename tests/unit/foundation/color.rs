use super::*;
use serde_json::json;

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: Rgba = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, Rgba::rgba(1.0, 0.0, 0.0, 1.0));

    let c: Rgba = serde_json::from_value(json!("#0000ff80")).unwrap();
    assert!((c.b - 1.0).abs() < 1e-9);
    assert!((c.a - (128.0 / 255.0)).abs() < 1e-9);
}

#[test]
fn parses_rgba_object_and_array() {
    let c: Rgba = serde_json::from_value(json!({"r": 0.25, "g": 0.5, "b": 0.75})).unwrap();
    assert_eq!(c, Rgba::rgba(0.25, 0.5, 0.75, 1.0));

    let c: Rgba = serde_json::from_value(json!([0.25, 0.5, 0.75, 0.9])).unwrap();
    assert_eq!(c, Rgba::rgba(0.25, 0.5, 0.75, 0.9));
}

#[test]
fn hex_output_drops_opaque_alpha() {
    assert_eq!(Rgba::rgba(1.0, 0.0, 0.0, 1.0).to_hex(), "#FF0000");
    assert_eq!(Rgba::parse_hex("#00ff0080").unwrap().to_hex(), "#00FF0080");
    assert!(Rgba::parse_hex("red").is_err());
}

#[test]
fn lerp_midpoint() {
    let c = Rgba::lerp(
        Rgba::parse_hex("#000000").unwrap(),
        Rgba::parse_hex("#FFFFFF").unwrap(),
        0.5,
    );
    assert_eq!(c.to_hex(), "#808080");
}
