use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use super::record::Preferences;
use crate::error::{ShellError, ShellResult};
use crate::paths::resolve_config_dir;

pub const PREFERENCES_FILENAME: &str = "config.json";

/// File-backed preferences service.
///
/// Every read goes to disk and every write replaces the whole record, so
/// independent writers (shell, tools panel, tool windows) see each other's
/// changes with last-write-wins semantics.
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    path: PathBuf,
}

impl PreferencesStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(PREFERENCES_FILENAME))
    }

    /// Store rooted at the configured settings directory.
    pub fn from_env() -> Self {
        Self::in_dir(&resolve_config_dir())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the persisted record, falling back to defaults on any failure.
    pub fn load(&self) -> Preferences {
        match self.read_map() {
            Ok(Some(map)) => Preferences::from_map(map),
            Ok(None) => Preferences::default(),
            Err(error) => {
                tracing::warn!("error loading preferences, using defaults: {error}");
                Preferences::default()
            }
        }
    }

    /// Writes the full record. On failure the previous file is left in place.
    pub fn save(&self, prefs: &Preferences) -> ShellResult<()> {
        self.write_map(&prefs.to_map())
    }

    /// Best-effort [`save`](Self::save) for event handlers that cannot act on an error.
    pub fn save_or_log(&self, prefs: &Preferences) {
        if let Err(error) = self.save(prefs) {
            tracing::error!("error saving preferences: {error}");
        }
    }

    /// Load, modify and save in one step.
    pub fn update<F>(&self, apply: F) -> Preferences
    where
        F: FnOnce(&mut Preferences),
    {
        let mut prefs = self.load();
        apply(&mut prefs);
        self.save_or_log(&prefs);
        prefs
    }

    /// Reads a single key from a freshly loaded record.
    pub fn get(&self, key: &str, default: Value) -> Value {
        self.load().to_map().remove(key).unwrap_or(default)
    }

    /// Sets a single key and persists the whole record.
    ///
    /// The value goes through the same coercion as a load, so a malformed
    /// value for a known key is replaced by that key's default.
    pub fn set(&self, key: &str, value: Value) -> ShellResult<()> {
        let mut map = self.load().to_map();
        map.insert(key.to_string(), value);
        self.save(&Preferences::from_map(map))
    }

    fn read_map(&self) -> ShellResult<Option<Map<String, Value>>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(ShellError::io(&self.path, error)),
        };
        match serde_json::from_str::<Value>(&data)? {
            Value::Object(map) => Ok(Some(map)),
            other => Err(ShellError::Serialization(serde::de::Error::custom(format!(
                "expected a JSON object in {}, found {}",
                self.path.display(),
                json_kind(&other)
            )))),
        }
    }

    fn write_map(&self, map: &Map<String, Value>) -> ShellResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|error| ShellError::io(parent, error))?;
        }
        let data = serde_json::to_string_pretty(map)?;

        // Write beside the target and rename so a failed write never truncates it.
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, data).map_err(|error| ShellError::io(&tmp_path, error))?;
        if let Err(error) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(ShellError::io(&self.path, error));
        }

        tracing::debug!("wrote preferences to {}", self.path.display());
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::Geometry;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn missing_file_returns_defaults() {
        let dir = tempdir().expect("tempdir");
        let store = PreferencesStore::in_dir(dir.path());
        assert_eq!(store.load(), Preferences::default());
        assert!(!store.path().exists());
    }

    #[test]
    fn corrupt_file_returns_defaults() {
        let dir = tempdir().expect("tempdir");
        let store = PreferencesStore::in_dir(dir.path());
        for contents in ["{ not json", "[1, 2, 3]", "\"text\"", ""] {
            fs::write(store.path(), contents).expect("write corrupt file");
            assert_eq!(store.load(), Preferences::default(), "contents: {contents:?}");
        }
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempdir().expect("tempdir");
        let store = PreferencesStore::in_dir(dir.path());
        let mut prefs = Preferences {
            window_geometry: Some(Geometry::new(-8, 0, 1600, 900)),
            right_panel_width: 320,
            zoom_factor: 1.3,
            open_external: false,
            tool_window_geometry: Geometry::new(50, 60, 700, 500),
            theme: "dark_pastel".to_string(),
            ..Preferences::default()
        };
        prefs.extra.insert("world".to_string(), json!(2));

        store.save(&prefs).expect("save");
        assert_eq!(store.load(), prefs);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().expect("tempdir");
        let store = PreferencesStore::in_dir(&dir.path().join("nested").join("kitshell"));
        store.save(&Preferences::default()).expect("save");
        assert!(store.path().exists());
    }

    #[test]
    fn failed_save_keeps_previous_file() {
        let dir = tempdir().expect("tempdir");
        let store = PreferencesStore::in_dir(dir.path());
        let mut prefs = Preferences::default();
        prefs.right_panel_width = 400;
        store.save(&prefs).expect("first save");

        // A directory squatting on the temp path makes the next write fail.
        fs::create_dir(store.path().with_extension("json.tmp")).expect("block temp path");
        prefs.right_panel_width = 10;
        assert!(store.save(&prefs).is_err());
        store.save_or_log(&prefs);

        assert_eq!(store.load().right_panel_width, 400);
    }

    #[test]
    fn set_and_get_single_keys() {
        let dir = tempdir().expect("tempdir");
        let store = PreferencesStore::in_dir(dir.path());

        store.set("open_external", json!(false)).expect("set flag");
        store.set("zoom_factor", json!(2.5)).expect("set zoom");
        store.set("custom", json!("kept")).expect("set custom");

        assert_eq!(store.get("open_external", json!(true)), json!(false));
        assert_eq!(store.get("zoom_factor", json!(1.0)), json!(2.5));
        assert_eq!(store.get("custom", json!(null)), json!("kept"));
        assert_eq!(store.get("absent", json!("fallback")), json!("fallback"));
    }

    #[test]
    fn set_coerces_known_keys() {
        let dir = tempdir().expect("tempdir");
        let store = PreferencesStore::in_dir(dir.path());
        store.set("zoom_factor", json!(40)).expect("set zoom");
        assert_eq!(store.load().zoom_factor, 5.0);
    }

    #[test]
    fn backfills_missing_keys_and_keeps_unknown_ones() {
        let dir = tempdir().expect("tempdir");
        let store = PreferencesStore::in_dir(dir.path());
        fs::write(
            store.path(),
            r#"{ "zoom_factor": "1.75", "favourite_world": 2 }"#,
        )
        .expect("write partial file");

        let prefs = store.load();
        assert_eq!(prefs.zoom_factor, 1.75);
        assert_eq!(prefs.right_panel_width, 250);
        assert!(prefs.open_external);

        store.save(&prefs).expect("save");
        let raw: Value =
            serde_json::from_str(&fs::read_to_string(store.path()).expect("read")).expect("parse");
        assert_eq!(raw["favourite_world"], json!(2));
        assert_eq!(raw["tool_window_geometry"], json!([200, 200, 900, 700]));
    }

    #[test]
    fn update_applies_and_persists() {
        let dir = tempdir().expect("tempdir");
        let store = PreferencesStore::in_dir(dir.path());
        let prefs = store.update(|prefs| prefs.right_panel_width = 275);
        assert_eq!(prefs.right_panel_width, 275);
        assert_eq!(store.load().right_panel_width, 275);
    }
}
