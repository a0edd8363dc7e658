use std::path::{Path, PathBuf};

use kitshell::paths::web_storage_dir;
use kitshell::theme::{Palette, DARK_PASTEL};
use kitshell::views::Tab;
use kitshell::{Geometry, ShellError, ShellResult, TabHost, WindowHost, WindowSpec};
use tauri::webview::WebviewBuilder;
use tauri::{AppHandle, Manager, Url, WebviewUrl, WebviewWindowBuilder, WindowEvent};

use crate::state;
use crate::window::{self, MAIN_WINDOW};

/// Backs the shell's views with Tauri windows and child webviews.
pub struct TauriHost {
    app: AppHandle,
    config_dir: PathBuf,
    palette: Palette,
    content_area: Geometry,
    active_tab: Option<String>,
}

impl TauriHost {
    pub fn new(app: AppHandle, config_dir: PathBuf) -> Self {
        Self {
            app,
            config_dir,
            palette: DARK_PASTEL,
            content_area: Geometry::new(0, 0, 0, 0),
            active_tab: None,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Where tab webviews go inside the main window.
    pub fn set_content_area(&mut self, area: Geometry) {
        self.content_area = area;
    }

    /// Records a tab webview that was created outside [`TabHost`].
    pub fn mark_active(&mut self, label: &str) {
        self.active_tab = Some(label.to_string());
    }
}

pub(crate) fn parse_url(raw: &str) -> ShellResult<Url> {
    raw.parse()
        .map_err(|error| ShellError::ViewCreation(format!("invalid url {raw}: {error}")))
}

fn host_error(error: tauri::Error) -> ShellError {
    ShellError::Host(error.to_string())
}

impl WindowHost for TauriHost {
    type Handle = String;

    fn create_window(&mut self, spec: &WindowSpec) -> ShellResult<String> {
        let url = parse_url(&spec.url)?;
        let geometry = spec.geometry;
        let window = WebviewWindowBuilder::new(&self.app, &spec.label, WebviewUrl::External(url))
            .title(&spec.title)
            .position(geometry.x as f64, geometry.y as f64)
            .inner_size(geometry.width as f64, geometry.height as f64)
            .min_inner_size(spec.min_size.0 as f64, spec.min_size.1 as f64)
            .data_directory(web_storage_dir(&self.config_dir, &spec.storage_scope))
            .build()
            .map_err(|error| ShellError::ViewCreation(error.to_string()))?;

        window::apply_caption_colour(&window.as_ref().window(), &self.palette);

        let app = self.app.clone();
        let label = spec.label.clone();
        let handle = window.clone();
        window.on_window_event(move |event| match event {
            WindowEvent::CloseRequested { .. } => {
                let geometry = window::tool_geometry(&handle);
                let label = label.clone();
                state::dispatch(&app, move |shell, _| shell.window_closing(&label, geometry));
            }
            WindowEvent::Destroyed => {
                let label = label.clone();
                state::dispatch(&app, move |shell, app| {
                    if let Some(tool) = shell.window_destroyed(&label) {
                        log::info!("{tool} window closed");
                        state::emit_state(app, shell);
                    }
                });
            }
            _ => {}
        });

        let _ = window.set_focus();
        Ok(spec.label.clone())
    }

    fn focus_window(&mut self, handle: &String) -> ShellResult<()> {
        let window = self
            .app
            .get_webview_window(handle)
            .ok_or_else(|| ShellError::ViewNotOpen(handle.clone()))?;
        window.show().map_err(host_error)?;
        window.unminimize().map_err(host_error)?;
        window.set_focus().map_err(host_error)
    }

    fn window_geometry(&self, handle: &String) -> Option<Geometry> {
        let window = self.app.get_webview_window(handle)?;
        window::tool_geometry(&window)
    }

    fn close_window(&mut self, handle: &String) -> ShellResult<()> {
        let window = self
            .app
            .get_webview_window(handle)
            .ok_or_else(|| ShellError::ViewNotOpen(handle.clone()))?;
        window.destroy().map_err(host_error)
    }
}

impl TabHost for TauriHost {
    fn materialize_tab(&mut self, tab: &Tab) -> ShellResult<()> {
        let main = self
            .app
            .get_window(MAIN_WINDOW)
            .ok_or_else(|| ShellError::Host("main window is gone".to_string()))?;
        let url = parse_url(&tab.url)?;
        let builder = WebviewBuilder::new(tab.host_label(), WebviewUrl::External(url))
            .data_directory(web_storage_dir(&self.config_dir, tab.storage_scope()));
        let area = self.content_area;
        let webview = main
            .add_child(builder, window::position_of(area), window::size_of(area))
            .map_err(|error| ShellError::ViewCreation(error.to_string()))?;
        webview.hide().map_err(host_error)
    }

    fn activate_tab(&mut self, tab: &Tab) -> ShellResult<()> {
        let label = tab.host_label();
        if let Some(previous) = self.active_tab.replace(label.clone()) {
            if previous != label {
                if let Some(webview) = self.app.get_webview(&previous) {
                    webview.hide().map_err(host_error)?;
                }
            }
        }
        let webview = self
            .app
            .get_webview(&label)
            .ok_or_else(|| ShellError::ViewNotOpen(tab.label.clone()))?;
        webview.show().map_err(host_error)?;
        webview.set_focus().map_err(host_error)
    }

    fn discard_tab(&mut self, tab: &Tab) -> ShellResult<()> {
        let label = tab.host_label();
        if self.active_tab.as_deref() == Some(label.as_str()) {
            self.active_tab = None;
        }
        match self.app.get_webview(&label) {
            Some(webview) => webview.close().map_err(host_error),
            None => Ok(()),
        }
    }
}
