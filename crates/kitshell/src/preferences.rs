//! Persisted shell preferences.

pub mod geometry;
pub mod record;
pub mod store;

pub use geometry::Geometry;
pub use record::{
    Preferences, DEFAULT_RIGHT_PANEL_WIDTH, KEY_OPEN_EXTERNAL, KEY_RIGHT_PANEL_WIDTH, KEY_THEME,
    KEY_TOOL_WINDOW_GEOMETRY, KEY_WINDOW_GEOMETRY, KEY_ZOOM_FACTOR,
};
pub use store::{PreferencesStore, PREFERENCES_FILENAME};
