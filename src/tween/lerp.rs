use std::collections::BTreeSet;

use crate::data::row::{Row, Shape};
use crate::data::value::Value;
use crate::foundation::color::Rgba;
use crate::foundation::core::Point;

/// Interpolation contract for tweened value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.lerp(*b, t)
    }
}

fn switch<T: Clone>(a: &T, b: &T, t: f64) -> T {
    if t < 0.5 { a.clone() } else { b.clone() }
}

/// Numbers blend linearly, hex colours blend per channel, everything else switches halfway.
impl Lerp for Value {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        match (a, b) {
            (Self::Num(x), Self::Num(y)) => Self::Num(<f64 as Lerp>::lerp(x, y, t)),
            (Self::Text(x), Self::Text(y)) if x != y => {
                match (Rgba::parse_hex(x), Rgba::parse_hex(y)) {
                    (Ok(x), Ok(y)) => Self::Text(Rgba::lerp(x, y, t).to_hex()),
                    _ => switch(a, b, t),
                }
            }
            _ => switch(a, b, t),
        }
    }
}

/// Vertex-wise blend for shapes of identical topology; other pairs switch halfway.
impl Lerp for Shape {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let same_topology = a.rings.len() == b.rings.len()
            && a.rings.iter().zip(&b.rings).all(|(x, y)| x.len() == y.len());
        if !same_topology {
            return switch(a, b, t);
        }
        Self {
            rings: a
                .rings
                .iter()
                .zip(&b.rings)
                .map(|(x, y)| {
                    x.iter()
                        .zip(y)
                        .map(|(p, q)| <Point as Lerp>::lerp(p, q, t))
                        .collect()
                })
                .collect(),
        }
    }
}

impl Lerp for Row {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let columns = a
            .values
            .keys()
            .chain(b.values.keys())
            .collect::<BTreeSet<_>>();
        let values = columns
            .into_iter()
            .map(|c| {
                let (x, y) = column_pair(c, a.values.get(c), b.values.get(c));
                (c.clone(), Value::lerp(&x, &y, t))
            })
            .collect();
        let shape = match (&a.shape, &b.shape) {
            (Some(x), Some(y)) => Some(Shape::lerp(x, y, t)),
            _ => switch(&a.shape, &b.shape, t),
        };
        let structural = if t < 0.5 { a } else { b };
        Self {
            panel: structural.panel,
            group: structural.group.clone(),
            values,
            shape,
            membership: structural.membership.clone(),
        }
    }
}

/// Value a mark shows when its row lacks `column`.
fn neutral(column: &str) -> Option<Value> {
    match column {
        "alpha" | "size" | "linewidth" => Some(Value::Num(1.0)),
        _ => None,
    }
}

/// Both ends of a blended column. A side without the column starts (or ends) at the
/// column's neutral value, or holds the other side's value.
fn column_pair(column: &str, a: Option<&Value>, b: Option<&Value>) -> (Value, Value) {
    match (a, b) {
        (Some(x), Some(y)) => (x.clone(), y.clone()),
        (Some(x), None) => (x.clone(), neutral(column).unwrap_or_else(|| x.clone())),
        (None, Some(y)) => (neutral(column).unwrap_or_else(|| y.clone()), y.clone()),
        (None, None) => (Value::Na, Value::Na),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tween/lerp.rs"]
mod tests;
