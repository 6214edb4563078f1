use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::data::row::{Row, Shape};
use crate::foundation::core::{Group, Point};
use crate::foundation::error::{FramesError, FramesResult};
use crate::tween::effect::RowEffect;
use crate::tween::lerp::Lerp;

/// Layer geometry family; selects the tween service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Geometry {
    /// One row per mark (points, text, tiles, bars).
    Point,
    /// Open vertex sequences, one per group.
    Path,
    /// Closed vertex rings, one per group.
    Polygon,
    /// One row per feature carrying a [`Shape`].
    Spatial,
}

impl Geometry {
    /// Return `true` for geometries whose rows are addressed individually.
    pub fn is_point_like(self) -> bool {
        matches!(self, Self::Point)
    }

    /// Tween service for this geometry.
    pub fn tween(self) -> &'static dyn Tween {
        match self {
            Self::Point => &PointTween,
            Self::Path => &PathTween,
            Self::Polygon => &PolygonTween,
            Self::Spatial => &SpatialTween,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Path => "path",
            Self::Polygon => "polygon",
            Self::Spatial => "spatial",
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Geometry {
    type Err = FramesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "point" | "text" | "label" | "tile" | "bar" | "col" | "rect" => Ok(Self::Point),
            "path" | "line" | "step" => Ok(Self::Path),
            "polygon" | "area" | "ribbon" => Ok(Self::Polygon),
            "spatial" | "sf" => Ok(Self::Spatial),
            _ => Err(FramesError::unsupported_geometry(s)),
        }
    }
}

impl serde::Serialize for Geometry {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> serde::Deserialize<'de> for Geometry {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Identity of a track across states: group plus occurrence within the group.
pub type TrackKey = (Group, usize);

/// Rows of one state that tween together.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    /// Matching key.
    pub key: TrackKey,
    /// Rows of the track in drawing order.
    pub rows: Vec<Row>,
}

/// Geometry-specific tweening between two states.
pub trait Tween: Send + Sync {
    /// Split a state into keyed tracks, in first-appearance order.
    fn key(&self, rows: &[Row]) -> FramesResult<Vec<Track>>;

    /// Make a matched pair of tracks structurally compatible.
    fn align(&self, from: &[Row], to: &[Row]) -> (Vec<Row>, Vec<Row>) {
        (from.to_vec(), to.to_vec())
    }

    /// Blend an aligned pair of tracks.
    fn interpolate(&self, from: &[Row], to: &[Row], t: f64) -> Vec<Row> {
        from.iter().zip(to).map(|(a, b)| Row::lerp(a, b, t)).collect()
    }

    /// Off-stage start of an entering track.
    fn enter(&self, track: &[Row], effect: Option<&dyn RowEffect>) -> Option<Vec<Row>> {
        effect?.apply(track)
    }

    /// Off-stage end of an exiting track.
    fn exit(&self, track: &[Row], effect: Option<&dyn RowEffect>) -> Option<Vec<Row>> {
        effect?.apply(track)
    }
}

/// Per-row tweening keyed by (group, occurrence).
#[derive(Clone, Copy, Debug, Default)]
pub struct PointTween;

impl Tween for PointTween {
    fn key(&self, rows: &[Row]) -> FramesResult<Vec<Track>> {
        Ok(key_by_occurrence(rows))
    }
}

/// Ordered-vertex tweening of open paths keyed by group.
#[derive(Clone, Copy, Debug, Default)]
pub struct PathTween;

impl Tween for PathTween {
    fn key(&self, rows: &[Row]) -> FramesResult<Vec<Track>> {
        Ok(key_by_group(rows))
    }

    fn align(&self, from: &[Row], to: &[Row]) -> (Vec<Row>, Vec<Row>) {
        let n = from.len().max(to.len());
        (resample(from, n), resample(to, n))
    }
}

/// Ordered-vertex tweening of closed rings keyed by group.
///
/// The target ring is rotated so it starts at the vertex nearest the source start.
#[derive(Clone, Copy, Debug, Default)]
pub struct PolygonTween;

impl Tween for PolygonTween {
    fn key(&self, rows: &[Row]) -> FramesResult<Vec<Track>> {
        Ok(key_by_group(rows))
    }

    fn align(&self, from: &[Row], to: &[Row]) -> (Vec<Row>, Vec<Row>) {
        let mut to = to.to_vec();
        if let Some(start) = from.first().and_then(xy) {
            let points = to.iter().map(xy).collect::<Vec<_>>();
            if points.iter().all(Option::is_some) {
                let points = points.into_iter().flatten().collect::<Vec<_>>();
                to.rotate_left(nearest(&points, start));
            }
        }
        let n = from.len().max(to.len());
        (resample(from, n), resample(&to, n))
    }
}

/// Shape tweening of spatial features keyed by (group, occurrence).
#[derive(Clone, Copy, Debug, Default)]
pub struct SpatialTween;

impl Tween for SpatialTween {
    fn key(&self, rows: &[Row]) -> FramesResult<Vec<Track>> {
        if let Some(row) = rows.iter().find(|r| r.shape.is_none()) {
            return Err(FramesError::validation(format!(
                "spatial row in panel {} group {} has no shape",
                row.panel, row.group
            )));
        }
        Ok(key_by_occurrence(rows))
    }

    fn align(&self, from: &[Row], to: &[Row]) -> (Vec<Row>, Vec<Row>) {
        let mut from = from.to_vec();
        let mut to = to.to_vec();
        for (a, b) in from.iter_mut().zip(to.iter_mut()) {
            if let (Some(sa), Some(sb)) = (&a.shape, &b.shape) {
                let (sa, sb) = align_shapes(sa, sb);
                a.shape = Some(sa);
                b.shape = Some(sb);
            }
        }
        (from, to)
    }
}

fn key_by_occurrence(rows: &[Row]) -> Vec<Track> {
    let mut seen: HashMap<&Group, usize> = HashMap::new();
    rows.iter()
        .map(|row| {
            let n = seen.entry(&row.group).or_default();
            let key = (row.group.clone(), *n);
            *n += 1;
            Track {
                key,
                rows: vec![row.clone()],
            }
        })
        .collect()
}

fn key_by_group(rows: &[Row]) -> Vec<Track> {
    let mut index: HashMap<&Group, usize> = HashMap::new();
    let mut out: Vec<Track> = Vec::new();
    for row in rows {
        let slot = *index.entry(&row.group).or_insert_with(|| {
            out.push(Track {
                key: (row.group.clone(), 0),
                rows: Vec::new(),
            });
            out.len() - 1
        });
        out[slot].rows.push(row.clone());
    }
    out
}

fn xy(row: &Row) -> Option<Point> {
    Some(Point::new(row.num("x")?, row.num("y")?))
}

fn nearest(points: &[Point], to: Point) -> usize {
    points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.distance_squared(to).total_cmp(&b.distance_squared(to)))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Stretch `items` to `n` entries by proportional index mapping; order is preserved.
fn resample<T: Clone>(items: &[T], n: usize) -> Vec<T> {
    let len = items.len();
    if len == n || len == 0 {
        return items.to_vec();
    }
    (0..n)
        .map(|i| {
            let at = if n == 1 {
                0
            } else {
                (i as f64 * (len - 1) as f64 / (n - 1) as f64).round() as usize
            };
            items[at.min(len - 1)].clone()
        })
        .collect()
}

fn align_shapes(a: &Shape, b: &Shape) -> (Shape, Shape) {
    let (ca, cb) = (a.centroid(), b.centroid());
    let rings = a.rings.len().max(b.rings.len());
    let mut out_a = Vec::with_capacity(rings);
    let mut out_b = Vec::with_capacity(rings);
    for i in 0..rings {
        let ra = a.rings.get(i).cloned().unwrap_or_default();
        let mut rb = b.rings.get(i).cloned().unwrap_or_default();
        if let Some(&start) = ra.first()
            && !rb.is_empty()
        {
            let at = nearest(&rb, start);
            rb.rotate_left(at);
        }
        let n = ra.len().max(rb.len());
        out_a.push(pad_ring(&ra, n, cb));
        out_b.push(pad_ring(&rb, n, ca));
    }
    (Shape { rings: out_a }, Shape { rings: out_b })
}

/// Resample a ring to `n` vertices; a missing ring collapses onto `fallback`.
fn pad_ring(ring: &[Point], n: usize, fallback: Point) -> Vec<Point> {
    if ring.is_empty() {
        return vec![fallback; n];
    }
    resample(ring, n)
}

#[cfg(test)]
#[path = "../../tests/unit/tween/geometry.rs"]
mod tests;
