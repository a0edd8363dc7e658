use std::path::{Path, PathBuf};

/// Overrides the settings directory when set.
pub const CONFIG_DIR_ENV: &str = "KITSHELL_CONFIG_DIR";

const APP_DIR_NAME: &str = "kitshell";
const WEB_STORAGE_DIR: &str = "web_storage";

/// Directory holding `config.json` and the web storage scopes.
///
/// `KITSHELL_CONFIG_DIR` wins, then the platform config directory, then the
/// current directory.
pub fn resolve_config_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
        return PathBuf::from(dir);
    }
    match dirs::config_dir() {
        Some(dir) => dir.join(APP_DIR_NAME),
        None => {
            tracing::warn!("no platform config directory, using the current directory");
            PathBuf::from(".")
        }
    }
}

/// Persistent browser storage (cookies, local storage) for one scope.
pub fn web_storage_dir(config_dir: &Path, scope: &str) -> PathBuf {
    config_dir.join(WEB_STORAGE_DIR).join(scope)
}
