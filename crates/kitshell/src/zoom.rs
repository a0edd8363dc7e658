//! Zoom state of the primary game view.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::preferences::PreferencesStore;

pub const MIN_ZOOM: f64 = 0.25;
pub const MAX_ZOOM: f64 = 5.0;
pub const DEFAULT_ZOOM: f64 = 1.0;
pub const ZOOM_STEP: f64 = 0.1;

pub fn clamp_zoom(factor: f64) -> f64 {
    if factor.is_nan() {
        return DEFAULT_ZOOM;
    }
    factor.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Renders a factor as a whole percentage, `1.0` -> `"100%"`.
pub fn format_percentage(factor: f64) -> String {
    format!("{}%", (factor * 100.0).round() as i64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomAction {
    In,
    Out,
    Reset,
}

impl ZoomAction {
    /// Maps a keyboard shortcut (`Ctrl+0`, `Ctrl++`/`Ctrl+=`, `Ctrl+-`).
    pub fn from_key(key: &str, ctrl: bool) -> Option<ZoomAction> {
        if !ctrl {
            return None;
        }
        match key {
            "0" => Some(ZoomAction::Reset),
            "+" | "=" => Some(ZoomAction::In),
            "-" => Some(ZoomAction::Out),
            _ => None,
        }
    }

    /// Maps a Ctrl+wheel notch; positive deltas scroll away from the user.
    pub fn from_wheel(delta_y: f64, ctrl: bool) -> Option<ZoomAction> {
        if !ctrl || delta_y == 0.0 || delta_y.is_nan() {
            return None;
        }
        Some(if delta_y > 0.0 {
            ZoomAction::In
        } else {
            ZoomAction::Out
        })
    }
}

type ZoomObserver = Box<dyn Fn(f64) + Send>;

/// Owns the zoom factor, persisting and broadcasting every change.
pub struct ZoomController {
    factor: f64,
    store: PreferencesStore,
    observers: Vec<ZoomObserver>,
}

impl fmt::Debug for ZoomController {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ZoomController")
            .field("factor", &self.factor)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl ZoomController {
    pub fn new(initial: f64, store: PreferencesStore) -> Self {
        Self {
            factor: clamp_zoom(initial),
            store,
            observers: Vec::new(),
        }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn percentage(&self) -> String {
        format_percentage(self.factor)
    }

    /// Registers a callback invoked with the new factor after each change.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: Fn(f64) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.set(self.factor + ZOOM_STEP)
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.set(self.factor - ZOOM_STEP)
    }

    pub fn reset(&mut self) -> f64 {
        self.set(DEFAULT_ZOOM)
    }

    pub fn apply(&mut self, action: ZoomAction) -> f64 {
        match action {
            ZoomAction::In => self.zoom_in(),
            ZoomAction::Out => self.zoom_out(),
            ZoomAction::Reset => self.reset(),
        }
    }

    /// Clamps, stores and broadcasts `factor`.
    pub fn set(&mut self, factor: f64) -> f64 {
        self.factor = clamp_zoom(factor);
        let factor = self.factor;
        self.store.update(|prefs| prefs.zoom_factor = factor);
        tracing::debug!("zoom set to {}", format_percentage(factor));
        for observer in &self.observers {
            observer(factor);
        }
        factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    fn controller(initial: f64) -> (tempfile::TempDir, ZoomController) {
        let dir = tempdir().expect("tempdir");
        let store = PreferencesStore::in_dir(dir.path());
        (dir, ZoomController::new(initial, store))
    }

    #[test]
    fn percentage_readout() {
        assert_eq!(format_percentage(1.0), "100%");
        assert_eq!(format_percentage(0.25), "25%");
        assert_eq!(format_percentage(5.0), "500%");
        assert_eq!(format_percentage(1.0 - ZOOM_STEP * 3.0), "70%");
    }

    #[test]
    fn initial_factor_is_clamped() {
        let (_dir, zoom) = controller(9.0);
        assert_eq!(zoom.factor(), MAX_ZOOM);
        let (_dir, zoom) = controller(f64::NAN);
        assert_eq!(zoom.factor(), DEFAULT_ZOOM);
    }

    #[test]
    fn steps_stay_within_bounds() {
        let (_dir, mut zoom) = controller(1.0);
        for _ in 0..100 {
            let factor = zoom.zoom_in();
            assert!((MIN_ZOOM..=MAX_ZOOM).contains(&factor));
        }
        assert_eq!(zoom.factor(), MAX_ZOOM);
        assert_eq!(zoom.percentage(), "500%");

        for _ in 0..100 {
            let factor = zoom.zoom_out();
            assert!((MIN_ZOOM..=MAX_ZOOM).contains(&factor));
        }
        assert_eq!(zoom.factor(), MIN_ZOOM);
        assert_eq!(zoom.percentage(), "25%");
    }

    #[test]
    fn reset_is_exactly_one() {
        let (_dir, mut zoom) = controller(0.3);
        zoom.zoom_in();
        zoom.zoom_in();
        assert_eq!(zoom.reset(), 1.0);
        assert_eq!(zoom.percentage(), "100%");
    }

    #[test]
    fn every_change_is_persisted() {
        let (dir, mut zoom) = controller(1.0);
        let store = PreferencesStore::in_dir(dir.path());

        zoom.zoom_in();
        assert_eq!(store.load().zoom_factor, zoom.factor());
        zoom.set(3.25);
        assert_eq!(store.load().zoom_factor, 3.25);
        zoom.reset();
        assert_eq!(store.load().zoom_factor, 1.0);
    }

    #[test]
    fn observers_see_each_change() {
        let (_dir, mut zoom) = controller(1.0);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        zoom.subscribe(move |factor| sink.lock().expect("lock").push(format_percentage(factor)));

        zoom.apply(ZoomAction::In);
        zoom.apply(ZoomAction::Reset);
        zoom.apply(ZoomAction::Out);

        assert_eq!(*seen.lock().expect("lock"), vec!["110%", "100%", "90%"]);
    }

    #[test]
    fn maps_shortcuts_and_wheel() {
        assert_eq!(ZoomAction::from_key("0", true), Some(ZoomAction::Reset));
        assert_eq!(ZoomAction::from_key("=", true), Some(ZoomAction::In));
        assert_eq!(ZoomAction::from_key("-", true), Some(ZoomAction::Out));
        assert_eq!(ZoomAction::from_key("-", false), None);
        assert_eq!(ZoomAction::from_key("a", true), None);

        assert_eq!(ZoomAction::from_wheel(120.0, true), Some(ZoomAction::In));
        assert_eq!(ZoomAction::from_wheel(-120.0, true), Some(ZoomAction::Out));
        assert_eq!(ZoomAction::from_wheel(120.0, false), None);
        assert_eq!(ZoomAction::from_wheel(0.0, true), None);
    }
}
