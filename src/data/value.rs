use std::fmt;

use serde::{Deserialize, Serialize};

/// One cell of row data.
///
/// Deserializes from plain JSON scalars; `null` becomes [`Value::Na`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing value.
    #[default]
    Na,
    /// Logical value.
    Bool(bool),
    /// Numeric value.
    Num(f64),
    /// Text value (hex colours included).
    Text(String),
}

impl Value {
    /// Return `true` for [`Value::Na`].
    pub fn is_na(&self) -> bool {
        matches!(self, Self::Na)
    }

    /// Numeric payload, if any.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Num(v) => Some(*v),
            _ => None,
        }
    }

    /// Logical payload, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Text payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Na => "na",
            Self::Bool(_) => "bool",
            Self::Num(_) => "number",
            Self::Text(_) => "text",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Na => f.write_str("NA"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Num(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Num(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Num(f64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}
