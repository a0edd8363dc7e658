//! View lifecycle and persisted preferences for the 2004Kit desktop shell.
//!
//! The host toolkit supplies windows and webviews through [`views::WindowHost`]
//! and [`views::TabHost`]; everything else lives here.

pub mod catalog;
pub mod error;
pub mod paths;
pub mod preferences;
pub mod shell;
pub mod theme;
pub mod views;
pub mod zoom;

pub use crate::catalog::{ToolDescriptor, ToolId};
pub use crate::error::{ShellError, ShellResult};
pub use crate::preferences::{Geometry, Preferences, PreferencesStore};
pub use crate::shell::{Shell, ShellSnapshot, ViewId};
pub use crate::views::{OpenOutcome, OpenRequest, TabHost, WindowHost, WindowSpec};
pub use crate::zoom::{ZoomAction, ZoomController};
