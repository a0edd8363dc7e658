use kitshell::paths::resolve_config_dir;
use kitshell::views::PRIMARY_HOST_LABEL;
use kitshell::{PreferencesStore, Shell};
use tauri::{Manager, RunEvent};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};

mod commands;
mod host;
mod state;
mod window;

use crate::host::TauriHost;
use crate::state::AppState;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Load .env file from the crate root directory
    let _ = dotenvy::from_path(std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join(".env"));
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            let handle = app.handle().clone();
            let config_dir = resolve_config_dir();
            log::info!("using config directory {}", config_dir.display());

            let store = PreferencesStore::in_dir(&config_dir);
            let mut shell = Shell::new(store, TauriHost::new(handle.clone(), config_dir));
            let palette = shell.palette();
            shell.host_mut().set_palette(palette);

            let zoom_handle = handle.clone();
            shell.zoom_mut().subscribe(move |factor| {
                let Some(game) = zoom_handle.get_webview(PRIMARY_HOST_LABEL) else {
                    return;
                };
                if let Err(error) = game.set_zoom(factor) {
                    log::warn!("failed to apply zoom: {error}");
                }
            });

            if let Err(error) = window::build_main_window(&handle, &mut shell) {
                log::error!("failed to start: {error}");
                let exit_handle = handle.clone();
                handle
                    .dialog()
                    .message(format!("Failed to start application: {error}"))
                    .title("Application Error")
                    .kind(MessageDialogKind::Error)
                    .show(move |_| exit_handle.exit(1));
                return Ok(());
            }
            app.manage(AppState::new(shell));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::get_snapshot,
            commands::open_tool,
            commands::select_tab,
            commands::close_tab,
            commands::close_tool_window,
            commands::set_open_external,
            commands::set_panel_width,
            commands::zoom,
            commands::zoom_input,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(|handle, event| {
        // Covers exits that never reached the main window's close handler.
        if let RunEvent::Exit = event {
            if let Some(state) = handle.try_state::<AppState>() {
                let _ = state.with_shell(|shell| {
                    let panel_width = shell.panel_width();
                    shell.shutdown(None, Some(panel_width))
                });
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    const BUILD_SCRIPT: &str = include_str!("../build.rs");
    const CHROME: &str = include_str!("../capabilities/default.json");
    const GAME: &str = include_str!("../capabilities/game.json");

    const CHROME_COMMANDS: &[&str] = &[
        "get_snapshot",
        "open_tool",
        "select_tab",
        "close_tab",
        "close_tool_window",
        "set_open_external",
        "set_panel_width",
        "zoom",
    ];

    fn permissions(capability: &str) -> Vec<String> {
        let value: Value = serde_json::from_str(capability).expect("capability json");
        value["permissions"]
            .as_array()
            .expect("permissions")
            .iter()
            .filter_map(|permission| permission.as_str().map(str::to_string))
            .collect()
    }

    fn allow(command: &str) -> String {
        format!("allow-{}", command.replace('_', "-"))
    }

    #[test]
    fn game_page_may_only_report_zoom_input() {
        assert_eq!(permissions(GAME), vec![allow("zoom_input")]);

        let value: Value = serde_json::from_str(GAME).expect("capability json");
        let urls = value["remote"]["urls"].as_array().expect("remote urls");
        assert!(urls
            .iter()
            .all(|url| url.as_str().is_some_and(|url| !url.contains('*'))));
    }

    #[test]
    fn chrome_commands_are_granted_to_chrome_only() {
        let chrome = permissions(CHROME);
        for command in CHROME_COMMANDS.iter().chain(["zoom_input"].iter()) {
            assert!(
                BUILD_SCRIPT.contains(&format!("\"{command}\"")),
                "{command} missing from the app manifest"
            );
        }
        for command in CHROME_COMMANDS {
            assert!(chrome.contains(&allow(command)), "{command} not granted");
        }
        assert!(!chrome.contains(&allow("zoom_input")));
    }
}
