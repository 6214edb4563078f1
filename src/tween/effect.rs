use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::row::{Row, Shape};
use crate::data::value::Value;
use crate::foundation::core::Point;

/// Produces the enter or exit state of a set of rows.
///
/// Returning `None` means "nothing to draw": entering rows then pop in on the last
/// transition frame and exiting rows vanish immediately.
pub trait RowEffect: Send + Sync + fmt::Debug {
    /// Transform `rows` into their off-stage representation.
    fn apply(&self, rows: &[Row]) -> Option<Vec<Row>>;
}

/// Built-in enter/exit effects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Alpha to 0.
    Fade,
    /// Size and linewidth to 0; shapes collapse to their centroid.
    Shrink,
    /// Replace colour and fill.
    #[serde(alias = "recolor")]
    Recolour {
        /// Replacement colour, usually `#RRGGBB[AA]`.
        colour: String,
    },
    /// Move to a fixed position.
    Fly {
        /// Target x.
        x: f64,
        /// Target y.
        y: f64,
    },
    /// Offset position.
    Drift {
        /// Offset along x.
        dx: f64,
        /// Offset along y.
        dy: f64,
    },
}

impl Effect {
    /// Apply this effect to one row in place.
    pub fn apply_row(&self, row: &mut Row) {
        match self {
            Self::Fade => row.set("alpha", 0.0),
            Self::Shrink => {
                let mut touched = false;
                for column in ["size", "linewidth"] {
                    if row.values.contains_key(column) {
                        row.set(column, 0.0);
                        touched = true;
                    }
                }
                if !touched {
                    row.set("size", 0.0);
                }
                if let Some(shape) = &mut row.shape {
                    *shape = shape.collapsed_to(shape.centroid());
                }
            }
            Self::Recolour { colour } => {
                row.set("colour", colour.as_str());
                if row.values.contains_key("fill") {
                    row.set("fill", colour.as_str());
                }
            }
            Self::Fly { x, y } => {
                if let Some(shape) = &mut row.shape {
                    let offset = Point::new(*x, *y) - shape.centroid();
                    translate(shape, offset.x, offset.y);
                }
                row.set("x", *x);
                row.set("y", *y);
            }
            Self::Drift { dx, dy } => {
                for (column, d) in [("x", dx), ("y", dy)] {
                    if let Some(Value::Num(v)) = row.values.get_mut(column) {
                        *v += d;
                    }
                }
                if let Some(shape) = &mut row.shape {
                    translate(shape, *dx, *dy);
                }
            }
        }
    }
}

fn translate(shape: &mut Shape, dx: f64, dy: f64) {
    for p in shape.rings.iter_mut().flatten() {
        p.x += dx;
        p.y += dy;
    }
}

impl RowEffect for Effect {
    fn apply(&self, rows: &[Row]) -> Option<Vec<Row>> {
        Some(
            rows.iter()
                .cloned()
                .map(|mut row| {
                    self.apply_row(&mut row);
                    row
                })
                .collect(),
        )
    }
}

/// Effects applied in order. An empty chain means no effect.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectChain {
    /// Effects in application order.
    pub effects: Vec<Effect>,
}

impl EffectChain {
    /// Build a chain from `effects`.
    pub fn new(effects: Vec<Effect>) -> Self {
        Self { effects }
    }

    /// Return `true` when the chain has no effects.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

impl RowEffect for EffectChain {
    fn apply(&self, rows: &[Row]) -> Option<Vec<Row>> {
        if self.effects.is_empty() {
            return None;
        }
        let mut out = rows.to_vec();
        for row in &mut out {
            for effect in &self.effects {
                effect.apply_row(row);
            }
        }
        Some(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tween/effect.rs"]
mod tests;
