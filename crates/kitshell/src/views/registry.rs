use serde::Serialize;

use super::host::{
    OpenRequest, OpenRequestSink, TabOutcome, WindowHost, WindowSpec, TOOL_WINDOW_MIN_SIZE,
};
use crate::catalog::ToolId;
use crate::error::{ShellError, ShellResult};
use crate::preferences::{Geometry, Preferences, PreferencesStore};

/// Result of asking for a tool to be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OpenOutcome {
    /// An existing window was raised.
    Focused { title: String },
    /// A new window was created.
    Created { title: String },
    /// The request went to the tab surface.
    Tab { outcome: TabOutcome },
    /// The host could not create the view; nothing was registered.
    Failed { title: String, reason: String },
}

#[derive(Debug, Clone)]
struct OpenWindow<H> {
    tool: ToolId,
    title: String,
    handle: H,
}

/// Live top-level tool windows, at most one per title.
#[derive(Debug)]
pub struct ViewRegistry<H> {
    windows: Vec<OpenWindow<H>>,
}

impl<H> Default for ViewRegistry<H> {
    fn default() -> Self {
        Self {
            windows: Vec::new(),
        }
    }
}

impl<H: Clone + PartialEq + std::fmt::Debug> ViewRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn is_open(&self, tool: ToolId) -> bool {
        self.windows.iter().any(|window| window.tool == tool)
    }

    /// Titles of the live windows in the order they were opened.
    pub fn open_titles(&self) -> Vec<String> {
        self.windows.iter().map(|window| window.title.clone()).collect()
    }

    pub fn handle_of(&self, tool: ToolId) -> Option<&H> {
        self.windows
            .iter()
            .find(|window| window.tool == tool)
            .map(|window| &window.handle)
    }

    pub fn tool_of(&self, handle: &H) -> Option<ToolId> {
        self.windows
            .iter()
            .find(|window| &window.handle == handle)
            .map(|window| window.tool)
    }

    /// Shows `tool`, reusing whatever presentation already exists for it.
    ///
    /// `prefs.open_external` only decides the presentation when the tool is
    /// not open anywhere; an open window or tab is reused in either mode.
    pub fn request_open<W, S>(
        &mut self,
        tool: ToolId,
        prefs: &Preferences,
        host: &mut W,
        tabs: &mut S,
    ) -> OpenOutcome
    where
        W: WindowHost<Handle = H>,
        S: OpenRequestSink + ?Sized,
    {
        let descriptor = tool.descriptor();
        let title = descriptor.window_title();

        if let Some(index) = self.windows.iter().position(|window| window.title == title) {
            match host.focus_window(&self.windows[index].handle) {
                Ok(()) => return OpenOutcome::Focused { title },
                Err(ShellError::ViewNotOpen(_)) => {
                    // Gone without a destruction notification; build a new one.
                    tracing::warn!("window {title} vanished, reopening");
                    self.windows.remove(index);
                }
                Err(error) => {
                    tracing::warn!("could not focus {title}: {error}");
                    return OpenOutcome::Focused { title };
                }
            }
        }

        let request = OpenRequest {
            url: descriptor.url.to_string(),
            title: descriptor.name.to_string(),
        };
        if !prefs.open_external || tabs.has_open(descriptor.name) {
            tracing::info!("opening {} in a tab", descriptor.name);
            let outcome = tabs.open_requested(&request);
            return OpenOutcome::Tab { outcome };
        }

        let spec = WindowSpec {
            tool,
            label: descriptor.window_label(),
            title: title.clone(),
            url: request.url,
            geometry: usable_geometry(prefs.tool_window_geometry, Geometry::TOOL_DEFAULT),
            min_size: TOOL_WINDOW_MIN_SIZE,
            storage_scope: descriptor.window_label(),
        };
        match host.create_window(&spec) {
            Ok(handle) => {
                tracing::info!("opened window {title}");
                self.windows.push(OpenWindow {
                    tool,
                    title: title.clone(),
                    handle,
                });
                OpenOutcome::Created { title }
            }
            Err(error) => {
                tracing::error!("error opening tool window {title}: {error}");
                OpenOutcome::Failed {
                    title,
                    reason: error.to_string(),
                }
            }
        }
    }

    /// The user is closing a tool window; remember where it was.
    pub fn window_closing(&self, handle: &H, geometry: Option<Geometry>, store: &PreferencesStore) {
        if self.tool_of(handle).is_none() {
            return;
        }
        if let Some(geometry) = geometry {
            store.update(|prefs| prefs.tool_window_geometry = geometry);
        }
    }

    /// Destruction notification from the host. Returns the tool that was dropped.
    pub fn window_destroyed(&mut self, handle: &H) -> Option<ToolId> {
        let index = self.windows.iter().position(|window| &window.handle == handle)?;
        let removed = self.windows.remove(index);
        tracing::debug!("window {} destroyed", removed.title);
        Some(removed.tool)
    }

    /// Closes the window of `tool`, persisting its geometry first.
    pub fn close_window<W>(
        &mut self,
        tool: ToolId,
        host: &mut W,
        store: &PreferencesStore,
    ) -> ShellResult<()>
    where
        W: WindowHost<Handle = H>,
    {
        let index = self
            .windows
            .iter()
            .position(|window| window.tool == tool)
            .ok_or_else(|| ShellError::ViewNotOpen(tool.to_string()))?;

        let handle = self.windows[index].handle.clone();
        self.window_closing(&handle, host.window_geometry(&handle), store);
        host.close_window(&handle)?;
        self.windows.remove(index);
        Ok(())
    }
}

/// Rejects rectangles no window could be shown at.
fn usable_geometry(geometry: Geometry, fallback: Geometry) -> Geometry {
    if geometry.width <= 0 || geometry.height <= 0 {
        tracing::warn!("stored tool window geometry {geometry:?} unusable, using defaults");
        return fallback;
    }
    geometry
}
