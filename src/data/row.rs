use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::membership::{MembershipTag, deserialize_lenient};
use crate::data::value::Value;
use crate::foundation::core::{Group, PanelId, Point};
use crate::foundation::error::{FramesError, FramesResult};

/// Pseudo-column exposing [`Row::panel`] to predicates.
pub const PANEL_COLUMN: &str = "panel";
/// Pseudo-column exposing [`Row::group`] to predicates (`NA` when ungrouped).
pub const GROUP_COLUMN: &str = "group";

/// Outline of a spatial feature: one or more closed rings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Rings in drawing order; the first is the outer ring.
    pub rings: Vec<Vec<Point>>,
}

impl Shape {
    /// Single-ring shape.
    pub fn ring(points: Vec<Point>) -> Self {
        Self {
            rings: vec![points],
        }
    }

    /// Mean of all vertices; the origin for an empty shape.
    pub fn centroid(&self) -> Point {
        let mut n = 0usize;
        let (mut sx, mut sy) = (0.0, 0.0);
        for p in self.rings.iter().flatten() {
            sx += p.x;
            sy += p.y;
            n += 1;
        }
        if n == 0 {
            return Point::ORIGIN;
        }
        Point::new(sx / n as f64, sy / n as f64)
    }

    /// Same topology with every vertex moved to `p`.
    pub fn collapsed_to(&self, p: Point) -> Self {
        Self {
            rings: self
                .rings
                .iter()
                .map(|ring| vec![p; ring.len()])
                .collect(),
        }
    }
}

/// One data row of a layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Facet panel.
    #[serde(default)]
    pub panel: PanelId,
    /// Group identity used for matching across states.
    #[serde(default)]
    pub group: Group,
    /// Named aesthetic columns (`x`, `y`, `colour`, `alpha`, `size`, ...).
    #[serde(default)]
    pub values: BTreeMap<String, Value>,
    /// Spatial outline (spatial layers only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<Shape>,
    /// Filter membership assigned at setup. Untagged rows pass through unfiltered.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_lenient"
    )]
    pub membership: Option<MembershipTag>,
}

impl Row {
    /// Empty row in `panel` with `group`.
    pub fn new(panel: PanelId, group: Group) -> Self {
        Self {
            panel,
            group,
            ..Self::default()
        }
    }

    /// Builder-style column setter.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(column.into(), value.into());
        self
    }

    /// Builder-style shape setter.
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Column value; missing columns read as `NA`.
    pub fn get(&self, column: &str) -> Value {
        match column {
            PANEL_COLUMN => Value::Num(f64::from(self.panel.0)),
            GROUP_COLUMN => self
                .group
                .id()
                .map(|id| Value::Num(id as f64))
                .unwrap_or(Value::Na),
            _ => self.values.get(column).cloned().unwrap_or(Value::Na),
        }
    }

    /// Numeric column value.
    pub fn num(&self, column: &str) -> Option<f64> {
        self.values.get(column).and_then(Value::as_f64)
    }

    /// Set a column value.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(column.into(), value.into());
    }
}

/// Column-oriented view of a panel's rows, restricted to the columns a predicate declared.
#[derive(Clone, Debug, Default)]
pub struct RowBatch {
    len: usize,
    columns: BTreeMap<String, Vec<Value>>,
}

impl RowBatch {
    /// Project `rows` onto `columns`.
    pub fn project<'a, I, S>(rows: I, columns: &[S]) -> Self
    where
        I: IntoIterator<Item = &'a Row>,
        S: AsRef<str>,
    {
        let rows = rows.into_iter().collect::<Vec<_>>();
        let mut out = BTreeMap::new();
        for name in columns {
            let name = name.as_ref();
            if out.contains_key(name) {
                continue;
            }
            out.insert(
                name.to_owned(),
                rows.iter().map(|r| r.get(name)).collect::<Vec<_>>(),
            );
        }
        Self {
            len: rows.len(),
            columns: out,
        }
    }

    /// Number of rows in the batch.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` when the batch has no rows.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Values of a declared column.
    pub fn column(&self, name: &str) -> FramesResult<&[Value]> {
        self.columns.get(name).map(Vec::as_slice).ok_or_else(|| {
            FramesError::expression(format!(
                "column '{name}' was not declared by the predicate"
            ))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/row.rs"]
mod tests;
