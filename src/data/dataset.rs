use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::row::Row;
use crate::foundation::error::{FramesError, FramesResult};
use crate::tween::geometry::Geometry;

/// One plot layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Layer name, used in logs.
    #[serde(default)]
    pub name: String,
    /// Geometry tag (`point`, `path`, `polygon`, `sf`, ...).
    pub geometry: Geometry,
    /// Whether the filters apply to this layer. Unfiltered layers show in every frame.
    #[serde(default = "yes")]
    pub filter: bool,
    /// Layer rows.
    #[serde(default)]
    pub rows: Vec<Row>,
}

fn yes() -> bool {
    true
}

/// Layers of one plot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Layers in drawing order.
    pub layers: Vec<Layer>,
}

impl Dataset {
    /// Parse a dataset from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FramesResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| FramesError::serde(format!("parse dataset JSON: {e}")))
    }

    /// Parse a dataset from a JSON string.
    pub fn from_json_str(s: &str) -> FramesResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| FramesError::serde(format!("parse dataset JSON: {e}")))
    }

    /// Parse a dataset from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FramesResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FramesError::validation(format!("open dataset '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Total row count across layers.
    pub fn row_count(&self) -> usize {
        self.layers.iter().map(|l| l.rows.len()).sum()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/dataset.rs"]
mod tests;
