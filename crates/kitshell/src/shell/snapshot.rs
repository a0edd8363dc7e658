use serde::Serialize;

use super::Shell;
use crate::catalog::{tools, ToolId};
use crate::views::{Tab, TabHost, WindowHost};

/// One tool button of the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolEntry {
    pub id: ToolId,
    pub name: &'static str,
    pub icon: &'static str,
    pub url: &'static str,
    pub button_label: String,
}

/// Everything the panel front end renders, in one serializable value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellSnapshot {
    pub tools: Vec<ToolEntry>,
    pub tabs: Vec<Tab>,
    pub active_tab: usize,
    pub open_windows: Vec<String>,
    pub open_external: bool,
    pub zoom_factor: f64,
    pub zoom_percentage: String,
    pub panel_width: u32,
    pub theme_css: String,
}

impl ShellSnapshot {
    pub fn capture<H: WindowHost + TabHost>(shell: &Shell<H>) -> Self {
        let prefs = shell.preferences();
        Self {
            tools: tools()
                .iter()
                .map(|tool| ToolEntry {
                    id: tool.id,
                    name: tool.name,
                    icon: tool.icon,
                    url: tool.url,
                    button_label: format!("{}  {}", tool.icon, tool.name),
                })
                .collect(),
            tabs: shell.tabs().tabs().to_vec(),
            active_tab: shell.tabs().active_index(),
            open_windows: shell.registry().open_titles(),
            open_external: prefs.open_external,
            zoom_factor: shell.zoom_factor(),
            zoom_percentage: shell.zoom_percentage(),
            panel_width: prefs.right_panel_width,
            theme_css: shell.palette().css_variables(),
        }
    }
}
