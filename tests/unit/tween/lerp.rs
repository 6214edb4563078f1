use super::*;
use crate::foundation::core::{Group, PanelId};

#[test]
fn numbers_blend_and_text_switches_halfway() {
    assert_eq!(Value::lerp(&Value::Num(0.0), &Value::Num(10.0), 0.25), Value::Num(2.5));
    let a = Value::from("low");
    let b = Value::from("high");
    assert_eq!(Value::lerp(&a, &b, 0.49), a);
    assert_eq!(Value::lerp(&a, &b, 0.5), b);
    assert_eq!(Value::lerp(&Value::Na, &Value::Num(3.0), 0.2), Value::Na);
    assert_eq!(Value::lerp(&Value::Na, &Value::Num(3.0), 0.8), Value::Num(3.0));
}

#[test]
fn hex_colours_blend_per_channel() {
    let a = Value::from("#000000");
    let b = Value::from("#FF0000");
    assert_eq!(Value::lerp(&a, &b, 0.5), Value::from("#800000"));
    assert_eq!(Value::lerp(&a, &b, 1.0), Value::from("#FF0000"));
    let faded = Value::lerp(&Value::from("#FFFFFF"), &Value::from("#FFFFFF00"), 0.5);
    assert_eq!(faded, Value::from("#FFFFFF80"));
}

#[test]
fn shapes_blend_vertex_wise_when_topology_matches() {
    let a = Shape::ring(vec![Point::new(0.0, 0.0), Point::new(2.0, 0.0)]);
    let b = Shape::ring(vec![Point::new(0.0, 4.0), Point::new(2.0, 4.0)]);
    let mid = Shape::lerp(&a, &b, 0.5);
    assert_eq!(mid.rings[0], vec![Point::new(0.0, 2.0), Point::new(2.0, 2.0)]);

    let c = Shape::ring(vec![Point::new(9.0, 9.0)]);
    assert_eq!(Shape::lerp(&a, &c, 0.3), a);
    assert_eq!(Shape::lerp(&a, &c, 0.7), c);
}

#[test]
fn rows_blend_the_union_of_columns() {
    let a = Row::new(PanelId(1), Group::Id(1))
        .with("x", 0.0)
        .with("label", "a");
    let b = Row::new(PanelId(1), Group::Id(1))
        .with("x", 4.0)
        .with("y", 2.0);
    let mid = Row::lerp(&a, &b, 0.5);
    assert_eq!(mid.num("x"), Some(2.0));
    assert_eq!(mid.num("y"), Some(2.0));
    assert_eq!(Row::lerp(&a, &b, 0.25).num("y"), Some(2.0));
    assert_eq!(mid.values["label"], Value::from("a"));
    assert_eq!(Row::lerp(&a, &b, 1.0), b.clone().with("label", "a"));
}

#[test]
fn missing_aesthetics_blend_from_their_neutral_value() {
    let shown = Row::new(PanelId(1), Group::Id(1)).with("x", 1.0);
    let gone = shown.clone().with("alpha", 0.0).with("size", 0.0);
    let mid = Row::lerp(&shown, &gone, 0.25);
    assert_eq!(mid.num("alpha"), Some(0.75));
    assert_eq!(mid.num("size"), Some(0.75));
    let back = Row::lerp(&gone, &shown, 0.5);
    assert_eq!(back.num("alpha"), Some(0.5));
}
