use std::sync::{Mutex, TryLockError};

use kitshell::Shell;
use tauri::{AppHandle, Emitter, Manager};

use crate::host::TauriHost;

pub type DesktopShell = Shell<TauriHost>;

/// Event carrying a fresh [`kitshell::ShellSnapshot`] to the chrome webviews.
pub const SHELL_STATE_EVENT: &str = "shell-state";

/// Shared application state holding the shell.
/// Only touched on the main thread; the mutex is what `manage` needs.
pub struct AppState {
    shell: Mutex<DesktopShell>,
}

impl AppState {
    pub fn new(shell: DesktopShell) -> Self {
        Self {
            shell: Mutex::new(shell),
        }
    }

    pub fn with_shell<T>(&self, f: impl FnOnce(&mut DesktopShell) -> T) -> Result<T, String> {
        let mut shell = self.shell.lock().map_err(|error| error.to_string())?;
        Ok(f(&mut shell))
    }

    /// Like [`with_shell`](Self::with_shell) but refuses instead of blocking,
    /// for callers already on the main thread.
    pub fn try_with_shell<T>(&self, f: impl FnOnce(&mut DesktopShell) -> T) -> Result<T, String> {
        with_unlocked(&self.shell, f)
    }
}

pub const SHELL_BUSY: &str = "shell is busy, try again";

fn with_unlocked<S, T>(mutex: &Mutex<S>, f: impl FnOnce(&mut S) -> T) -> Result<T, String> {
    match mutex.try_lock() {
        Ok(mut value) => Ok(f(&mut value)),
        Err(TryLockError::WouldBlock) => Err(SHELL_BUSY.to_string()),
        Err(TryLockError::Poisoned(error)) => Err(error.to_string()),
    }
}

/// Runs `f` against the shell on the main thread.
///
/// Window creation from a command thread deadlocks on Windows, so every
/// mutation goes through here.
pub fn on_main_thread<F>(app: &AppHandle, f: F) -> Result<(), String>
where
    F: FnOnce(&mut DesktopShell, &AppHandle) + Send + 'static,
{
    let handle = app.clone();
    app.run_on_main_thread(move || dispatch(&handle, f))
        .map_err(|error| error.to_string())
}

/// Runs `f` now if the shell is free, otherwise queues it behind the
/// current holder. Window events may fire while a command still holds it.
pub fn dispatch<F>(app: &AppHandle, f: F)
where
    F: FnOnce(&mut DesktopShell, &AppHandle) + Send + 'static,
{
    let Some(state) = app.try_state::<AppState>() else {
        log::debug!("shell not ready, dropping event");
        return;
    };
    match state.shell.try_lock() {
        Ok(mut shell) => f(&mut shell, app),
        Err(TryLockError::WouldBlock) => {
            let handle = app.clone();
            if let Err(error) = app.run_on_main_thread(move || dispatch(&handle, f)) {
                log::error!("failed to requeue shell update: {error}");
            }
        }
        Err(TryLockError::Poisoned(error)) => {
            log::error!("shell state poisoned: {error}");
        }
    }
}

pub fn emit_state(app: &AppHandle, shell: &DesktopShell) {
    if let Err(error) = app.emit(SHELL_STATE_EVENT, shell.snapshot()) {
        log::warn!("failed to emit shell state: {error}");
    }
}
