use serde::Serialize;
use serde_json::{Map, Value};

use super::geometry::{coerce_i64, Geometry};
use crate::theme::DEFAULT_THEME;
use crate::zoom::{clamp_zoom, DEFAULT_ZOOM};

pub const KEY_WINDOW_GEOMETRY: &str = "window_geometry";
pub const KEY_RIGHT_PANEL_WIDTH: &str = "right_panel_width";
pub const KEY_ZOOM_FACTOR: &str = "zoom_factor";
pub const KEY_OPEN_EXTERNAL: &str = "open_external";
pub const KEY_TOOL_WINDOW_GEOMETRY: &str = "tool_window_geometry";
pub const KEY_THEME: &str = "theme";

pub const DEFAULT_RIGHT_PANEL_WIDTH: u32 = 250;

/// The flat settings record shared by the shell, the tools panel and tool windows.
///
/// Only [`Preferences::from_map`] builds one from stored JSON, so every read
/// goes through backfill and coercion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preferences {
    /// Main window rectangle; `None` until the shell has been closed once.
    pub window_geometry: Option<Geometry>,
    pub right_panel_width: u32,
    pub zoom_factor: f64,
    /// `true` opens tools as separate windows, `false` as tabs in the shell.
    pub open_external: bool,
    pub tool_window_geometry: Geometry,
    pub theme: String,
    /// Keys this version does not know about, written back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            window_geometry: None,
            right_panel_width: DEFAULT_RIGHT_PANEL_WIDTH,
            zoom_factor: DEFAULT_ZOOM,
            open_external: true,
            tool_window_geometry: Geometry::TOOL_DEFAULT,
            theme: DEFAULT_THEME.to_string(),
            extra: Map::new(),
        }
    }
}

impl Preferences {
    /// Builds a record from a stored JSON object, backfilling missing keys
    /// and coercing every known field to its declared type.
    ///
    /// A field that cannot be coerced falls back to its default; the
    /// remaining fields are kept.
    pub fn from_map(mut map: Map<String, Value>) -> Self {
        let defaults = Self::default();

        let window_geometry = match map.remove(KEY_WINDOW_GEOMETRY) {
            None | Some(Value::Null) => None,
            Some(value) => match Geometry::from_value(&value) {
                Ok(geometry) => Some(geometry),
                Err(error) => {
                    tracing::warn!("ignoring stored {KEY_WINDOW_GEOMETRY}: {error}");
                    None
                }
            },
        };

        let tool_window_geometry = match map.remove(KEY_TOOL_WINDOW_GEOMETRY) {
            None | Some(Value::Null) => defaults.tool_window_geometry,
            Some(value) => Geometry::from_value(&value).unwrap_or_else(|error| {
                tracing::warn!("ignoring stored {KEY_TOOL_WINDOW_GEOMETRY}: {error}");
                defaults.tool_window_geometry
            }),
        };

        let right_panel_width = match map.remove(KEY_RIGHT_PANEL_WIDTH) {
            None => defaults.right_panel_width,
            Some(value) => match coerce_i64(&value) {
                Some(width) => width.clamp(0, i64::from(u32::MAX)) as u32,
                None => {
                    tracing::warn!("ignoring stored {KEY_RIGHT_PANEL_WIDTH}: {value}");
                    defaults.right_panel_width
                }
            },
        };

        let zoom_factor = match map.remove(KEY_ZOOM_FACTOR) {
            None => defaults.zoom_factor,
            Some(value) => match coerce_f64(&value) {
                Some(factor) => clamp_zoom(factor),
                None => {
                    tracing::warn!("ignoring stored {KEY_ZOOM_FACTOR}: {value}");
                    defaults.zoom_factor
                }
            },
        };

        let open_external = match map.remove(KEY_OPEN_EXTERNAL) {
            Some(Value::Bool(flag)) => flag,
            None => defaults.open_external,
            Some(other) => {
                tracing::warn!("ignoring stored {KEY_OPEN_EXTERNAL}: {other}");
                defaults.open_external
            }
        };

        let theme = match map.remove(KEY_THEME) {
            Some(Value::String(theme)) => theme,
            None => defaults.theme,
            Some(other) => {
                tracing::warn!("ignoring stored {KEY_THEME}: {other}");
                defaults.theme
            }
        };

        Self {
            window_geometry,
            right_panel_width,
            zoom_factor,
            open_external,
            tool_window_geometry,
            theme,
            extra: map,
        }
    }

    /// Serializes the record back into a flat JSON object.
    pub fn to_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

fn coerce_f64(value: &Value) -> Option<f64> {
    let factor = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    factor.is_finite().then_some(factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn empty_object_yields_defaults() {
        let prefs = Preferences::from_map(Map::new());
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn defaults_match_fresh_install_record() {
        let value = serde_json::to_value(Preferences::default()).expect("serialize");
        assert_eq!(
            value,
            json!({
                "window_geometry": null,
                "right_panel_width": 250,
                "zoom_factor": 1.0,
                "open_external": true,
                "tool_window_geometry": [200, 200, 900, 700],
                "theme": "dark_pastel"
            })
        );
    }

    #[test]
    fn partial_record_is_backfilled() {
        let prefs = Preferences::from_map(map(json!({ "open_external": false })));
        assert!(!prefs.open_external);
        assert_eq!(prefs.window_geometry, None);
        assert_eq!(prefs.right_panel_width, DEFAULT_RIGHT_PANEL_WIDTH);
        assert_eq!(prefs.zoom_factor, DEFAULT_ZOOM);
        assert_eq!(prefs.tool_window_geometry, Geometry::TOOL_DEFAULT);
        assert_eq!(prefs.theme, DEFAULT_THEME);
        assert!(prefs.extra.is_empty());
    }

    #[test]
    fn coerces_loosely_typed_fields() {
        let prefs = Preferences::from_map(map(json!({
            "window_geometry": [1.0, "2", 1024.7, 768],
            "right_panel_width": "310",
            "zoom_factor": 2,
            "open_external": false
        })));
        assert_eq!(prefs.window_geometry, Some(Geometry::new(1, 2, 1024, 768)));
        assert_eq!(prefs.right_panel_width, 310);
        assert_eq!(prefs.zoom_factor, 2.0);
        assert!(!prefs.open_external);
        assert_eq!(prefs.tool_window_geometry, Geometry::TOOL_DEFAULT);
    }

    #[test]
    fn malformed_fields_fall_back_individually() {
        let prefs = Preferences::from_map(map(json!({
            "window_geometry": [1, 2, 3],
            "tool_window_geometry": "big",
            "right_panel_width": -40,
            "zoom_factor": 12.5,
            "open_external": "yes",
            "theme": 7
        })));
        assert_eq!(prefs.window_geometry, None);
        assert_eq!(prefs.tool_window_geometry, Geometry::TOOL_DEFAULT);
        assert_eq!(prefs.right_panel_width, 0);
        assert_eq!(prefs.zoom_factor, 5.0);
        assert!(prefs.open_external);
        assert_eq!(prefs.theme, DEFAULT_THEME);
    }

    #[test]
    fn unknown_keys_pass_through() {
        let prefs = Preferences::from_map(map(json!({
            "zoom_factor": 1.5,
            "last_world": 42,
            "notes": { "pinned": true }
        })));
        assert_eq!(prefs.extra.get("last_world"), Some(&json!(42)));

        let written = prefs.to_map();
        assert_eq!(written.get("notes"), Some(&json!({ "pinned": true })));
        assert_eq!(written.get("zoom_factor"), Some(&json!(1.5)));
    }
}
