use kitshell::views::PRIMARY_TAB_INDEX;
use kitshell::{OpenOutcome, ShellError, ShellSnapshot, ToolId, ZoomAction};
use tauri::{AppHandle, State};

use crate::state::{self, AppState};
use crate::window;

#[tauri::command]
pub fn get_snapshot(state: State<'_, AppState>) -> Result<ShellSnapshot, String> {
    state.try_with_shell(|shell| shell.snapshot())
}

#[tauri::command]
pub async fn open_tool(app: AppHandle, tool: ToolId) -> Result<(), String> {
    state::on_main_thread(&app, move |shell, app| {
        match shell.open_tool(tool) {
            OpenOutcome::Failed { title, reason } => {
                log::error!("could not open {title}: {reason}");
            }
            outcome => log::debug!("open {tool}: {outcome:?}"),
        }
        state::emit_state(app, shell);
    })
}

#[tauri::command]
pub async fn select_tab(app: AppHandle, index: usize) -> Result<(), String> {
    state::on_main_thread(&app, move |shell, app| {
        if let Err(error) = shell.select_tab(index) {
            log::warn!("select tab {index}: {error}");
        }
        state::emit_state(app, shell);
    })
}

#[tauri::command]
pub async fn close_tab(app: AppHandle, index: usize) -> Result<(), String> {
    if index == PRIMARY_TAB_INDEX {
        return Err(ShellError::PrimaryViewProtected.to_string());
    }
    state::on_main_thread(&app, move |shell, app| {
        if let Err(error) = shell.close_tab(index) {
            log::warn!("close tab {index}: {error}");
        }
        state::emit_state(app, shell);
    })
}

#[tauri::command]
pub async fn close_tool_window(app: AppHandle, tool: ToolId) -> Result<(), String> {
    state::on_main_thread(&app, move |shell, app| {
        if let Err(error) = shell.close_tool_window(tool) {
            log::warn!("close {tool}: {error}");
        }
        state::emit_state(app, shell);
    })
}

#[tauri::command]
pub async fn set_open_external(app: AppHandle, enabled: bool) -> Result<(), String> {
    state::on_main_thread(&app, move |shell, app| {
        shell.set_open_external(enabled);
        state::emit_state(app, shell);
    })
}

/// Splitter drag. `commit` is set once the handle is released.
#[tauri::command]
pub async fn set_panel_width(app: AppHandle, width: u32, commit: bool) -> Result<(), String> {
    state::on_main_thread(&app, move |shell, app| {
        if commit {
            shell.set_panel_width(width);
            state::emit_state(app, shell);
        } else {
            shell.preview_panel_width(width);
        }
        window::relayout(app, shell);
    })
}

#[tauri::command]
pub async fn zoom(app: AppHandle, action: ZoomAction) -> Result<(), String> {
    state::on_main_thread(&app, move |shell, app| {
        shell.apply_zoom(action);
        state::emit_state(app, shell);
    })
}

/// Raw input from the game page; anything that is not a zoom gesture is dropped.
#[tauri::command]
pub async fn zoom_input(
    app: AppHandle,
    key: Option<String>,
    delta_y: Option<f64>,
) -> Result<(), String> {
    let action = match (key.as_deref(), delta_y) {
        (Some(key), _) => ZoomAction::from_key(key, true),
        (None, Some(delta)) => ZoomAction::from_wheel(delta, true),
        (None, None) => None,
    };
    let Some(action) = action else {
        return Ok(());
    };
    zoom(app, action).await
}
