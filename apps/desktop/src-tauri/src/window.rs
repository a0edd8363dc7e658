use kitshell::catalog::{APP_TITLE, GAME_URL};
use kitshell::paths::web_storage_dir;
use kitshell::shell::MAIN_MIN_SIZE;
use kitshell::theme::Palette;
use kitshell::Geometry;
use tauri::webview::{PageLoadEvent, WebviewBuilder};
use tauri::window::WindowBuilder;
use tauri::{
    AppHandle, LogicalPosition, LogicalSize, Manager, PhysicalPosition, PhysicalSize, WebviewUrl,
    Window, WindowEvent,
};

use crate::host::parse_url;
use crate::state::{self, DesktopShell};

pub const MAIN_WINDOW: &str = "main";
pub const TAB_BAR: &str = "tabbar";
pub const PANEL: &str = "panel";

/// Forwards Ctrl shortcuts and Ctrl+wheel from the game page to the shell.
const ZOOM_INPUT_SCRIPT: &str = r#"
(function () {
  const send = (args) => {
    const internals = window.__TAURI_INTERNALS__;
    if (internals) internals.invoke('zoom_input', args);
  };
  window.addEventListener('keydown', (event) => {
    if (!event.ctrlKey || !['0', '+', '=', '-'].includes(event.key)) return;
    event.preventDefault();
    send({ key: event.key, deltaY: null });
  }, true);
  window.addEventListener('wheel', (event) => {
    if (!event.ctrlKey) return;
    event.preventDefault();
    send({ key: null, deltaY: -event.deltaY });
  }, { passive: false, capture: true });
})();
"#;

pub fn position_of(area: Geometry) -> LogicalPosition<f64> {
    LogicalPosition::new(area.x as f64, area.y as f64)
}

pub fn size_of(area: Geometry) -> LogicalSize<f64> {
    LogicalSize::new(area.width.max(0) as f64, area.height.max(0) as f64)
}

/// Converts a window's physical frame into the logical rectangle we store.
pub fn to_logical_geometry(
    scale: f64,
    position: PhysicalPosition<i32>,
    size: PhysicalSize<u32>,
) -> Geometry {
    let position = position.to_logical::<f64>(scale);
    let size = size.to_logical::<f64>(scale);
    Geometry::new(
        position.x.round() as i32,
        position.y.round() as i32,
        size.width.round() as i32,
        size.height.round() as i32,
    )
}

pub fn logical_geometry(window: &Window) -> Option<Geometry> {
    let scale = window.scale_factor().ok()?;
    let position = window.outer_position().ok()?;
    let size = window.inner_size().ok()?;
    Some(to_logical_geometry(scale, position, size))
}

pub fn tool_geometry(window: &tauri::WebviewWindow) -> Option<Geometry> {
    logical_geometry(&window.as_ref().window())
}

/// Builds the main window: tab bar, game view and tools panel.
pub fn build_main_window(
    app: &AppHandle,
    shell: &mut DesktopShell,
) -> Result<(), Box<dyn std::error::Error>> {
    let geometry = shell.main_window_geometry();
    let window = WindowBuilder::new(app, MAIN_WINDOW)
        .title(APP_TITLE)
        .position(geometry.x as f64, geometry.y as f64)
        .inner_size(geometry.width as f64, geometry.height as f64)
        .min_inner_size(MAIN_MIN_SIZE.0 as f64, MAIN_MIN_SIZE.1 as f64)
        .build()?;

    let layout = shell.layout(geometry.width as u32, geometry.height as u32);
    shell.host_mut().set_content_area(layout.content);

    let game_label = shell.tabs().primary().host_label();
    let game_url = parse_url(GAME_URL)?;
    let game = WebviewBuilder::new(&game_label, WebviewUrl::External(game_url))
        .data_directory(web_storage_dir(
            shell.host().config_dir(),
            shell.tabs().primary().storage_scope(),
        ))
        .zoom_hotkeys_enabled(false)
        .initialization_script(ZOOM_INPUT_SCRIPT)
        .on_page_load(|webview, payload| {
            if let PageLoadEvent::Finished = payload.event() {
                log::info!("game page loaded: {}", payload.url());
                let app = webview.app_handle().clone();
                state::dispatch(&app, move |shell, _| {
                    if let Err(error) = webview.set_zoom(shell.zoom_factor()) {
                        log::warn!("failed to restore zoom: {error}");
                    }
                });
            }
        });
    let game = window.add_child(game, position_of(layout.content), size_of(layout.content))?;
    game.set_zoom(shell.zoom_factor())?;
    shell.host_mut().mark_active(&game_label);

    window.add_child(
        WebviewBuilder::new(TAB_BAR, WebviewUrl::App("tabs.html".into())),
        position_of(layout.tab_bar),
        size_of(layout.tab_bar),
    )?;
    window.add_child(
        WebviewBuilder::new(PANEL, WebviewUrl::App("panel.html".into())),
        position_of(layout.panel),
        size_of(layout.panel),
    )?;

    apply_caption_colour(&window, &shell.palette());
    watch_main_window(app, &window);
    Ok(())
}

fn watch_main_window(app: &AppHandle, window: &Window) {
    let app = app.clone();
    let handle = window.clone();
    window.on_window_event(move |event| match event {
        WindowEvent::Resized(_) => {
            state::dispatch(&app, |shell, app| relayout(app, shell));
        }
        WindowEvent::CloseRequested { .. } => {
            let geometry = logical_geometry(&handle);
            state::dispatch(&app, move |shell, _| {
                let panel_width = shell.panel_width();
                shell.shutdown(geometry, Some(panel_width));
            });
        }
        WindowEvent::Destroyed => {
            log::info!("main window closed, exiting");
            app.exit(0);
        }
        _ => {}
    });
}

/// Re-positions every child webview after a resize or splitter move.
pub fn relayout(app: &AppHandle, shell: &mut DesktopShell) {
    let Some(window) = app.get_window(MAIN_WINDOW) else {
        return;
    };
    let Ok(scale) = window.scale_factor() else {
        return;
    };
    let Ok(size) = window.inner_size() else {
        return;
    };
    let size = size.to_logical::<f64>(scale);
    let layout = shell.layout(size.width.round() as u32, size.height.round() as u32);
    shell.host_mut().set_content_area(layout.content);

    let mut placements = vec![
        (TAB_BAR.to_string(), layout.tab_bar),
        (PANEL.to_string(), layout.panel),
    ];
    placements.extend(
        shell
            .tabs()
            .tabs()
            .iter()
            .map(|tab| (tab.host_label(), layout.content)),
    );
    place_webviews(app, &placements);
}

fn place_webviews(app: &AppHandle, placements: &[(String, Geometry)]) {
    for (label, area) in placements {
        let Some(webview) = app.get_webview(label) else {
            continue;
        };
        if let Err(error) = webview
            .set_position(position_of(*area))
            .and_then(|_| webview.set_size(size_of(*area)))
        {
            log::warn!("failed to place webview {label}: {error}");
        }
    }
}

/// Tints the native title bar on Windows 11. Failures are ignored.
#[cfg(windows)]
pub fn apply_caption_colour(window: &Window, palette: &Palette) {
    use windows_sys::Win32::Graphics::Dwm::{
        DwmSetWindowAttribute, DWMWA_BORDER_COLOR, DWMWA_CAPTION_COLOR,
    };

    let (Some(colour), Ok(hwnd)) = (palette.caption_colorref(), window.hwnd()) else {
        return;
    };
    let hwnd = hwnd.0 as isize;
    for attribute in [DWMWA_CAPTION_COLOR, DWMWA_BORDER_COLOR] {
        // SAFETY: hwnd belongs to a live window and the pointer covers 4 bytes.
        unsafe {
            DwmSetWindowAttribute(
                hwnd,
                attribute,
                &colour as *const u32 as *const _,
                std::mem::size_of::<u32>() as u32,
            );
        }
    }
}

#[cfg(not(windows))]
pub fn apply_caption_colour(_window: &Window, _palette: &Palette) {}
