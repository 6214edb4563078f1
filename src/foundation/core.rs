use std::fmt;

use serde::{Deserialize, Serialize};

pub use kurbo::Point;

/// Facet panel a row is drawn in. Rows of different panels never tween into each other.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PanelId(pub u32);

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Row group identity used to match rows across filter states.
///
/// `Framed` only shows up in expanded output, where every group is scoped to the frame it
/// was emitted in.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Group {
    /// No explicit group (the host's `-1` marker).
    #[default]
    Ungrouped,
    /// Explicit group id.
    Id(u64),
    /// Output group scoped to one frame; displays as `<base>_<frame>`.
    Framed {
        /// Group the row had before expansion.
        base: Box<Group>,
        /// 1-based output frame.
        frame: u64,
    },
}

impl Group {
    /// Return `true` for the host's "no group" marker.
    pub fn is_ungrouped(&self) -> bool {
        matches!(self, Self::Ungrouped)
    }

    /// Explicit id, if any.
    pub fn id(&self) -> Option<u64> {
        match self {
            Self::Id(id) => Some(*id),
            _ => None,
        }
    }

    /// Scope this group to `frame`.
    pub fn framed(self, frame: u64) -> Self {
        Self::Framed {
            base: Box::new(self),
            frame,
        }
    }

    /// Output frame of a framed group.
    pub fn frame(&self) -> Option<u64> {
        match self {
            Self::Framed { frame, .. } => Some(*frame),
            _ => None,
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ungrouped => f.write_str("-1"),
            Self::Id(id) => write!(f, "{id}"),
            Self::Framed { base, frame } => write!(f, "{base}_{frame}"),
        }
    }
}

impl Serialize for Group {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Ungrouped => serializer.serialize_i64(-1),
            Self::Id(id) => serializer.serialize_u64(*id),
            Self::Framed { .. } => serializer.collect_str(self),
        }
    }
}

impl<'de> Deserialize<'de> for Group {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match Option::<i64>::deserialize(deserializer)? {
            None | Some(-1) => Ok(Self::Ungrouped),
            Some(v) if v >= 0 => Ok(Self::Id(v as u64)),
            Some(v) => Err(serde::de::Error::custom(format!(
                "group must be >= 0 or -1 (ungrouped), got {v}"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
