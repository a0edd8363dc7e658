use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{ShellError, ShellResult};

/// Window rectangle persisted as `[x, y, width, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Geometry {
    /// Fallback for the main shell window when nothing usable was persisted.
    pub const MAIN_FALLBACK: Geometry = Geometry::new(100, 100, 1280, 720);
    /// Default placement of a tool opened in its own window.
    pub const TOOL_DEFAULT: Geometry = Geometry::new(200, 200, 900, 700);

    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn to_array(self) -> [i32; 4] {
        [self.x, self.y, self.width, self.height]
    }

    /// Grows the rectangle so it is at least `min_width` x `min_height`.
    pub fn with_min_size(self, min_width: i32, min_height: i32) -> Self {
        Self {
            width: self.width.max(min_width),
            height: self.height.max(min_height),
            ..self
        }
    }

    /// Coerces a loosely typed JSON value into a geometry.
    ///
    /// Accepts an array of exactly four entries, each an integer, a float
    /// (truncated toward zero) or a numeric string.
    pub fn from_value(value: &Value) -> ShellResult<Self> {
        let items = value
            .as_array()
            .ok_or_else(|| ShellError::InvalidGeometry(format!("expected an array, got {value}")))?;
        if items.len() != 4 {
            return Err(ShellError::InvalidGeometry(format!(
                "expected 4 entries, got {}",
                items.len()
            )));
        }
        let mut parts = [0i32; 4];
        for (slot, item) in parts.iter_mut().zip(items) {
            *slot = coerce_i32(item).ok_or_else(|| {
                ShellError::InvalidGeometry(format!("entry {item} is not an integer"))
            })?;
        }
        let [x, y, width, height] = parts;
        Ok(Self::new(x, y, width, height))
    }
}

impl From<[i32; 4]> for Geometry {
    fn from([x, y, width, height]: [i32; 4]) -> Self {
        Self::new(x, y, width, height)
    }
}

impl Serialize for Geometry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_array().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Geometry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Geometry::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// Integer coercion shared by the preferences loader.
pub(crate) fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>().ok().or_else(|| {
                text.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        _ => None,
    }
}

fn coerce_i32(value: &Value) -> Option<i32> {
    coerce_i64(value).and_then(|n| i32::try_from(n).ok())
}
