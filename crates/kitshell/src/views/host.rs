//! Contracts between the view bookkeeping and the windowing host.

use serde::Serialize;
use std::fmt;

use super::tabs::Tab;
use crate::catalog::ToolId;
use crate::error::ShellResult;
use crate::preferences::Geometry;

/// Smallest size a tool window may be resized to.
pub const TOOL_WINDOW_MIN_SIZE: (u32, u32) = (600, 400);

/// Everything the host needs to materialize a tool window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    pub tool: ToolId,
    /// Host-level identifier, unique per tool.
    pub label: String,
    pub title: String,
    pub url: String,
    pub geometry: Geometry,
    pub min_size: (u32, u32),
    /// Persistent browser storage scope so logins survive restarts.
    pub storage_scope: String,
}

/// An "open tool" request delivered to the internal tab surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenRequest {
    pub url: String,
    pub title: String,
}

/// Where an [`OpenRequest`] landed in the tab surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum TabOutcome {
    /// A tab with the same label already existed and was selected.
    Selected(usize),
    /// A new tab was appended and selected.
    Added(usize),
}

/// Single subscriber of open requests that did not become a window.
pub trait OpenRequestSink {
    /// Whether a view for `title` is already present on this surface.
    fn has_open(&self, title: &str) -> bool;
    fn open_requested(&mut self, request: &OpenRequest) -> TabOutcome;
}

/// Top-level window operations supplied by the host toolkit.
pub trait WindowHost {
    type Handle: Clone + PartialEq + fmt::Debug;

    fn create_window(&mut self, spec: &WindowSpec) -> ShellResult<Self::Handle>;
    /// Shows, raises and focuses an existing window.
    fn focus_window(&mut self, handle: &Self::Handle) -> ShellResult<()>;
    /// Current outer rectangle, if the window still exists.
    fn window_geometry(&self, handle: &Self::Handle) -> Option<Geometry>;
    fn close_window(&mut self, handle: &Self::Handle) -> ShellResult<()>;
}

/// Embedded tab operations supplied by the host toolkit.
pub trait TabHost {
    /// Creates the browsing surface for a freshly added tab.
    fn materialize_tab(&mut self, tab: &Tab) -> ShellResult<()>;
    /// Brings `tab` to the front of the tab area.
    fn activate_tab(&mut self, tab: &Tab) -> ShellResult<()>;
    /// Tears down the browsing surface of a closed tab.
    fn discard_tab(&mut self, tab: &Tab) -> ShellResult<()>;
}
