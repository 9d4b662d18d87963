// Geometry value types decoded from remote mappings
//
// Remote geometry commands return JSON mappings with integer-valued fields.
// Some drivers report integral floats (30.0 for 30); the decoding helper
// accepts those, but any fractional or non-numeric field is a conversion
// failure, never a silent truncation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// A point on the page, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

/// The rendered size of an element, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    pub width: i64,
    pub height: i64,
}

/// An element's position and size combined.
///
/// All four components are named fields; `width` and `height` are never
/// positional, so they cannot trade places during construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Point {
    pub(crate) fn from_wire(value: &Value) -> Result<Self> {
        Ok(Self {
            x: int_field(value, "x")?,
            y: int_field(value, "y")?,
        })
    }
}

impl Dimension {
    pub(crate) fn from_wire(value: &Value) -> Result<Self> {
        Ok(Self {
            width: int_field(value, "width")?,
            height: int_field(value, "height")?,
        })
    }
}

impl Rect {
    pub(crate) fn from_wire(value: &Value) -> Result<Self> {
        Ok(Self {
            x: int_field(value, "x")?,
            y: int_field(value, "y")?,
            width: int_field(value, "width")?,
            height: int_field(value, "height")?,
        })
    }

    /// The position component.
    pub fn position(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }

    /// The size component.
    pub fn dimension(&self) -> Dimension {
        Dimension {
            width: self.width,
            height: self.height,
        }
    }
}

/// Reads an integer-valued field out of a remote mapping.
fn int_field(value: &Value, key: &str) -> Result<i64> {
    let map = value
        .as_object()
        .ok_or_else(|| Error::conversion("mapping", value))?;
    let field = map
        .get(key)
        .ok_or_else(|| Error::conversion(format!("mapping with field `{key}`"), value))?;

    if let Some(n) = field.as_i64() {
        return Ok(n);
    }
    if let Some(f) = field.as_f64() {
        if f.fract() == 0.0 {
            return Ok(f as i64);
        }
    }
    Err(Error::conversion(format!("integer field `{key}`"), field))
}
