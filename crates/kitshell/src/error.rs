use std::path::PathBuf;

/// Unified error type for the kitshell crate.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("View creation failed: {0}")]
    ViewCreation(String),

    #[error("View not open: {0}")]
    ViewNotOpen(String),

    #[error("No tab at index {0}")]
    NoSuchTab(usize),

    #[error("The primary game view cannot be closed")]
    PrimaryViewProtected,

    #[error("Host error: {0}")]
    Host(String),
}

impl ShellError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ShellError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias using [`ShellError`].
pub type ShellResult<T> = std::result::Result<T, ShellError>;
