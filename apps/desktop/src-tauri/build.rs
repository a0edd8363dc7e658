/// Commands the webviews may invoke. Each gets an `allow-*` permission that a
/// capability must grant; the remote game page only receives `allow-zoom-input`.
const COMMANDS: &[&str] = &[
    "get_snapshot",
    "open_tool",
    "select_tab",
    "close_tab",
    "close_tool_window",
    "set_open_external",
    "set_panel_width",
    "zoom",
    "zoom_input",
];

fn main() {
    tauri_build::try_build(
        tauri_build::Attributes::new()
            .app_manifest(tauri_build::AppManifest::new().commands(COMMANDS)),
    )
    .expect("failed to run tauri-build");
}
