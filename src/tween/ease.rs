use std::fmt;
use std::str::FromStr;

use crate::foundation::error::FramesError;

/// Easing functions used to map normalized transition progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ease {
    /// Linear interpolation.
    #[default]
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Sinusoidal ease-in.
    InSine,
    /// Sinusoidal ease-out.
    OutSine,
    /// Sinusoidal ease-in/out.
    InOutSine,
}

impl Ease {
    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        use std::f64::consts::PI;

        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            // Endpoints are pinned; the trig forms are off by an ulp at 0 and 1.
            _ if t == 0.0 || t == 1.0 => t,
            Self::InSine => 1.0 - (t * PI / 2.0).cos(),
            Self::OutSine => (t * PI / 2.0).sin(),
            Self::InOutSine => -((PI * t).cos() - 1.0) / 2.0,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::InQuad => "in_quad",
            Self::OutQuad => "out_quad",
            Self::InOutQuad => "in_out_quad",
            Self::InCubic => "in_cubic",
            Self::OutCubic => "out_cubic",
            Self::InOutCubic => "in_out_cubic",
            Self::InSine => "in_sine",
            Self::OutSine => "out_sine",
            Self::InOutSine => "in_out_sine",
        }
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts `in_out_cubic`, `InOutCubic`, `cubic-in-out`, `quadratic-in` and similar spellings.
impl FromStr for Ease {
    type Err = FramesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect::<String>()
            .to_ascii_lowercase();
        if norm == "linear" {
            return Ok(Self::Linear);
        }

        let (family, rest) = ["quadratic", "quad", "cubic", "sine"]
            .iter()
            .find_map(|fam| {
                let at = norm.find(fam)?;
                Some((*fam, [&norm[..at], &norm[at + fam.len()..]].concat()))
            })
            .ok_or_else(|| FramesError::config(format!("unknown ease '{s}'")))?;

        let ease = match (family, rest.as_str()) {
            ("quad" | "quadratic", "in") => Self::InQuad,
            ("quad" | "quadratic", "out") => Self::OutQuad,
            ("quad" | "quadratic", "inout") => Self::InOutQuad,
            ("cubic", "in") => Self::InCubic,
            ("cubic", "out") => Self::OutCubic,
            ("cubic", "inout") => Self::InOutCubic,
            ("sine", "in") => Self::InSine,
            ("sine", "out") => Self::OutSine,
            ("sine", "inout") => Self::InOutSine,
            _ => return Err(FramesError::config(format!("unknown ease '{s}'"))),
        };
        Ok(ease)
    }
}

impl serde::Serialize for Ease {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> serde::Deserialize<'de> for Ease {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tween/ease.rs"]
mod tests;
