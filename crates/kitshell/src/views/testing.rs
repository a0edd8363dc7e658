//! Recording host used by the view and shell tests.

use std::collections::HashMap;

use super::host::{TabHost, WindowHost, WindowSpec};
use super::tabs::Tab;
use crate::error::{ShellError, ShellResult};
use crate::preferences::Geometry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    CreateWindow(String),
    FocusWindow(u32),
    CloseWindow(u32),
    MaterializeTab(String),
    ActivateTab(String),
    DiscardTab(String),
}

#[derive(Debug, Default)]
pub struct FakeHost {
    pub calls: Vec<HostCall>,
    pub specs: Vec<WindowSpec>,
    pub geometries: HashMap<u32, Geometry>,
    pub fail_windows: bool,
    pub fail_tabs: bool,
    /// Handles whose windows disappeared without telling anyone.
    pub vanished: Vec<u32>,
    pub next_handle: u32,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn windows_created(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, HostCall::CreateWindow(_)))
            .count()
    }
}

impl WindowHost for FakeHost {
    type Handle = u32;

    fn create_window(&mut self, spec: &WindowSpec) -> ShellResult<u32> {
        if self.fail_windows {
            return Err(ShellError::ViewCreation("webview unavailable".to_string()));
        }
        self.next_handle += 1;
        self.calls.push(HostCall::CreateWindow(spec.title.clone()));
        self.specs.push(spec.clone());
        self.geometries.insert(self.next_handle, spec.geometry);
        Ok(self.next_handle)
    }

    fn focus_window(&mut self, handle: &u32) -> ShellResult<()> {
        self.calls.push(HostCall::FocusWindow(*handle));
        if self.vanished.contains(handle) {
            return Err(ShellError::ViewNotOpen(format!("window {handle}")));
        }
        Ok(())
    }

    fn window_geometry(&self, handle: &u32) -> Option<Geometry> {
        self.geometries.get(handle).copied()
    }

    fn close_window(&mut self, handle: &u32) -> ShellResult<()> {
        self.calls.push(HostCall::CloseWindow(*handle));
        self.geometries.remove(handle);
        Ok(())
    }
}

impl TabHost for FakeHost {
    fn materialize_tab(&mut self, tab: &Tab) -> ShellResult<()> {
        if self.fail_tabs {
            return Err(ShellError::ViewCreation("webview unavailable".to_string()));
        }
        self.calls.push(HostCall::MaterializeTab(tab.label.clone()));
        Ok(())
    }

    fn activate_tab(&mut self, tab: &Tab) -> ShellResult<()> {
        self.calls.push(HostCall::ActivateTab(tab.label.clone()));
        Ok(())
    }

    fn discard_tab(&mut self, tab: &Tab) -> ShellResult<()> {
        self.calls.push(HostCall::DiscardTab(tab.label.clone()));
        Ok(())
    }
}
