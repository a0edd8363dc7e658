use serde::Serialize;
use std::fmt;

use super::host::{OpenRequest, OpenRequestSink, TabOutcome};
use crate::catalog::{tab_label, GAME_STORAGE_SCOPE, GAME_TAB_LABEL, GAME_URL};
use crate::error::{ShellError, ShellResult};

/// Index of the always-present game tab.
pub const PRIMARY_TAB_INDEX: usize = 0;

/// Host label of the game tab's browsing surface.
pub const PRIMARY_HOST_LABEL: &str = "game";

/// Storage scope shared by every tool tab.
pub const TAB_STORAGE_SCOPE: &str = "tabs";

/// Stable tab identifier; indices shift as tabs close, ids do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TabId(pub u64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tab {
    pub id: TabId,
    pub label: String,
    pub title: String,
    pub url: String,
    pub primary: bool,
}

impl Tab {
    /// Host-level identifier of the tab's browsing surface.
    pub fn host_label(&self) -> String {
        if self.primary {
            PRIMARY_HOST_LABEL.to_string()
        } else {
            format!("tab-{}", self.id)
        }
    }

    pub fn storage_scope(&self) -> &'static str {
        if self.primary {
            GAME_STORAGE_SCOPE
        } else {
            TAB_STORAGE_SCOPE
        }
    }
}

/// Ordered tabs of the shell, the game tab first.
#[derive(Debug, Clone)]
pub struct TabStrip {
    tabs: Vec<Tab>,
    active: usize,
    next_id: u64,
}

impl Default for TabStrip {
    fn default() -> Self {
        Self::new()
    }
}

impl TabStrip {
    pub fn new() -> Self {
        let primary = Tab {
            id: TabId(0),
            label: GAME_TAB_LABEL.to_string(),
            title: "LostCity".to_string(),
            url: GAME_URL.to_string(),
            primary: true,
        };
        Self {
            tabs: vec![primary],
            active: PRIMARY_TAB_INDEX,
            next_id: 1,
        }
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Always false; the game tab cannot be removed.
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Tab> {
        self.tabs.get(index)
    }

    pub fn primary(&self) -> &Tab {
        &self.tabs[PRIMARY_TAB_INDEX]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> &Tab {
        &self.tabs[self.active]
    }

    pub fn index_of_label(&self, label: &str) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.label == label)
    }

    pub fn index_of_id(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id == id)
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.index_of_label(label).is_some()
    }

    /// Selects the tab whose label matches the request, appending one if needed.
    pub fn open(&mut self, request: &OpenRequest) -> TabOutcome {
        let label = tab_label(&request.title);
        if let Some(index) = self.index_of_label(&label) {
            self.active = index;
            return TabOutcome::Selected(index);
        }
        let tab = Tab {
            id: TabId(self.next_id),
            label,
            title: request.title.clone(),
            url: request.url.clone(),
            primary: false,
        };
        self.next_id += 1;
        self.tabs.push(tab);
        self.active = self.tabs.len() - 1;
        TabOutcome::Added(self.active)
    }

    pub fn select(&mut self, index: usize) -> ShellResult<&Tab> {
        if index >= self.tabs.len() {
            return Err(ShellError::NoSuchTab(index));
        }
        self.active = index;
        Ok(&self.tabs[index])
    }

    /// Removes the tab at `index`; the game tab is refused.
    pub fn close(&mut self, index: usize) -> ShellResult<Tab> {
        if index == PRIMARY_TAB_INDEX {
            return Err(ShellError::PrimaryViewProtected);
        }
        if index >= self.tabs.len() {
            return Err(ShellError::NoSuchTab(index));
        }
        let closed = self.tabs.remove(index);
        if self.active >= index {
            self.active = self.active.saturating_sub(1).min(self.tabs.len() - 1);
        }
        Ok(closed)
    }

    /// Closes a tab by its stable id.
    pub fn close_by_id(&mut self, id: TabId) -> ShellResult<Tab> {
        let index = self
            .index_of_id(id)
            .ok_or_else(|| ShellError::ViewNotOpen(format!("tab {id}")))?;
        self.close(index)
    }
}

impl OpenRequestSink for TabStrip {
    fn has_open(&self, title: &str) -> bool {
        self.contains_label(&tab_label(title))
    }

    fn open_requested(&mut self, request: &OpenRequest) -> TabOutcome {
        self.open(request)
    }
}
