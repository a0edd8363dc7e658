//! The shell: preferences, views and zoom wired together.

pub mod layout;
pub mod snapshot;

use std::fmt;

use crate::catalog::ToolId;
use crate::error::{ShellError, ShellResult};
use crate::preferences::{Geometry, Preferences, PreferencesStore};
use crate::theme::Palette;
use crate::views::{
    OpenOutcome, Tab, TabHost, TabId, TabOutcome, TabStrip, ViewRegistry, WindowHost,
};
use crate::zoom::{ZoomAction, ZoomController};

pub use layout::{ShellLayout, TAB_BAR_HEIGHT};
pub use snapshot::{ShellSnapshot, ToolEntry};

/// Smallest size the main window may take.
pub const MAIN_MIN_SIZE: (i32, i32) = (800, 600);
/// The game area never shrinks below this when the window is resized.
pub const MIN_GAME_WIDTH: u32 = 400;

/// Addresses one open view for [`Shell::close`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewId {
    /// The always-present game view.
    Primary,
    /// A tab by its current index.
    Tab(usize),
    /// A tab by its stable id.
    TabId(TabId),
    /// A tool's own window.
    Window(ToolId),
}

pub struct Shell<H: WindowHost> {
    store: PreferencesStore,
    prefs: Preferences,
    host: H,
    registry: ViewRegistry<H::Handle>,
    tabs: TabStrip,
    zoom: ZoomController,
    shut_down: bool,
}

impl<H: WindowHost> fmt::Debug for Shell<H> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Shell")
            .field("store", &self.store)
            .field("prefs", &self.prefs)
            .field("windows", &self.registry.open_titles())
            .field("tabs", &self.tabs.len())
            .field("zoom", &self.zoom.factor())
            .finish()
    }
}

impl<H> Shell<H>
where
    H: WindowHost + TabHost,
{
    /// Loads preferences once and starts with only the game tab.
    pub fn new(store: PreferencesStore, host: H) -> Self {
        let prefs = store.load();
        let zoom = ZoomController::new(prefs.zoom_factor, store.clone());
        tracing::info!("loaded preferences from {}", store.path().display());
        Self {
            store,
            prefs,
            host,
            registry: ViewRegistry::new(),
            tabs: TabStrip::new(),
            zoom,
            shut_down: false,
        }
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn store(&self) -> &PreferencesStore {
        &self.store
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn tabs(&self) -> &TabStrip {
        &self.tabs
    }

    pub fn registry(&self) -> &ViewRegistry<H::Handle> {
        &self.registry
    }

    pub fn zoom(&self) -> &ZoomController {
        &self.zoom
    }

    pub fn zoom_mut(&mut self) -> &mut ZoomController {
        &mut self.zoom
    }

    pub fn palette(&self) -> Palette {
        Palette::for_name(&self.prefs.theme)
    }

    /// Handles a tool button: one generic path for every catalog entry.
    pub fn open_tool(&mut self, tool: ToolId) -> OpenOutcome {
        let outcome =
            self.registry
                .request_open(tool, &self.prefs, &mut self.host, &mut self.tabs);
        let landed = match outcome {
            OpenOutcome::Tab { outcome } => outcome,
            other => return other,
        };

        match landed {
            TabOutcome::Added(index) => {
                let tab = self.tabs.tabs()[index].clone();
                if let Err(error) = self.host.materialize_tab(&tab) {
                    tracing::error!("error creating browser tab {}: {error}", tab.label);
                    let _ = self.tabs.close(index);
                    self.activate_current();
                    return OpenOutcome::Failed {
                        title: tab.title,
                        reason: error.to_string(),
                    };
                }
                self.activate_current();
            }
            TabOutcome::Selected(_) => self.activate_current(),
        }
        OpenOutcome::Tab { outcome: landed }
    }

    pub fn select_tab(&mut self, index: usize) -> ShellResult<()> {
        self.tabs.select(index)?;
        self.activate_current();
        Ok(())
    }

    /// Closes any view except the game view.
    pub fn close(&mut self, view: ViewId) -> ShellResult<()> {
        match view {
            ViewId::Primary => Err(ShellError::PrimaryViewProtected),
            ViewId::Tab(index) => self.close_tab(index).map(|_| ()),
            ViewId::TabId(id) => {
                let index = self
                    .tabs
                    .index_of_id(id)
                    .ok_or_else(|| ShellError::ViewNotOpen(format!("tab {id}")))?;
                self.close_tab(index).map(|_| ())
            }
            ViewId::Window(tool) => self.close_tool_window(tool),
        }
    }

    pub fn close_tab(&mut self, index: usize) -> ShellResult<Tab> {
        let closed = self.tabs.close(index)?;
        if let Err(error) = self.host.discard_tab(&closed) {
            tracing::warn!("error discarding tab {}: {error}", closed.label);
        }
        self.activate_current();
        Ok(closed)
    }

    pub fn close_tool_window(&mut self, tool: ToolId) -> ShellResult<()> {
        let geometry = self
            .registry
            .handle_of(tool)
            .and_then(|handle| self.host.window_geometry(handle));
        self.registry.close_window(tool, &mut self.host, &self.store)?;
        if let Some(geometry) = geometry {
            self.prefs.tool_window_geometry = geometry;
        }
        Ok(())
    }

    /// A tool window is about to close at `geometry`.
    pub fn window_closing(&mut self, handle: &H::Handle, geometry: Option<Geometry>) {
        if self.registry.tool_of(handle).is_none() {
            return;
        }
        self.registry.window_closing(handle, geometry, &self.store);
        if let Some(geometry) = geometry {
            self.prefs.tool_window_geometry = geometry;
        }
    }

    pub fn window_destroyed(&mut self, handle: &H::Handle) -> Option<ToolId> {
        self.registry.window_destroyed(handle)
    }

    /// Checkbox "Open tools in separate windows".
    pub fn set_open_external(&mut self, open_external: bool) {
        self.prefs.open_external = open_external;
        self.store.update(|prefs| prefs.open_external = open_external);
    }

    /// Splitter dragging; kept in memory until [`set_panel_width`](Self::set_panel_width).
    pub fn preview_panel_width(&mut self, width: u32) {
        self.prefs.right_panel_width = width;
    }

    /// Splitter released.
    pub fn set_panel_width(&mut self, width: u32) {
        self.prefs.right_panel_width = width;
        self.store.update(|prefs| prefs.right_panel_width = width);
    }

    pub fn panel_width(&self) -> u32 {
        self.prefs.right_panel_width
    }

    pub fn zoom_factor(&self) -> f64 {
        self.zoom.factor()
    }

    pub fn zoom_percentage(&self) -> String {
        self.zoom.percentage()
    }

    pub fn apply_zoom(&mut self, action: ZoomAction) -> f64 {
        let factor = self.zoom.apply(action);
        self.prefs.zoom_factor = factor;
        factor
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.apply_zoom(ZoomAction::In)
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.apply_zoom(ZoomAction::Out)
    }

    pub fn reset_zoom(&mut self) -> f64 {
        self.apply_zoom(ZoomAction::Reset)
    }

    /// Where the main window should open.
    pub fn main_window_geometry(&self) -> Geometry {
        let geometry = match self.prefs.window_geometry {
            Some(geometry) if geometry.width > 0 && geometry.height > 0 => geometry,
            Some(geometry) => {
                tracing::warn!("stored window geometry {geometry:?} unusable, using defaults");
                Geometry::MAIN_FALLBACK
            }
            None => Geometry::MAIN_FALLBACK,
        };
        geometry.with_min_size(MAIN_MIN_SIZE.0, MAIN_MIN_SIZE.1)
    }

    /// Splits `total_width` into `(game, panel)` widths, the same split
    /// [`layout`](Self::layout) places the webviews with.
    pub fn split_sizes(&self, total_width: u32) -> (u32, u32) {
        let layout = ShellLayout::compute(total_width, 0, self.prefs.right_panel_width);
        (layout.content.width as u32, layout.panel.width as u32)
    }

    pub fn layout(&self, width: u32, height: u32) -> ShellLayout {
        ShellLayout::compute(width, height, self.prefs.right_panel_width)
    }

    /// Captures the final window state. Only the first call writes.
    pub fn shutdown(&mut self, geometry: Option<Geometry>, panel_width: Option<u32>) -> bool {
        if self.shut_down {
            return false;
        }
        self.shut_down = true;

        if let Some(geometry) = geometry {
            self.prefs.window_geometry = Some(geometry);
        }
        if let Some(width) = panel_width {
            self.prefs.right_panel_width = width;
        }
        self.prefs.zoom_factor = self.zoom.factor();

        let (window_geometry, right_panel_width, zoom_factor) = (
            self.prefs.window_geometry,
            self.prefs.right_panel_width,
            self.prefs.zoom_factor,
        );
        self.store.update(|prefs| {
            prefs.window_geometry = window_geometry;
            prefs.right_panel_width = right_panel_width;
            prefs.zoom_factor = zoom_factor;
        });
        tracing::info!("saved shell state on shutdown");
        true
    }

    pub fn snapshot(&self) -> ShellSnapshot {
        ShellSnapshot::capture(self)
    }

    fn activate_current(&mut self) {
        let tab = self.tabs.active().clone();
        if let Err(error) = self.host.activate_tab(&tab) {
            tracing::warn!("error activating tab {}: {error}", tab.label);
        }
    }
}
