use std::path::PathBuf;

use thiserror::Error;

use mandeljulia_render::RenderError;

/// Startup and shutdown failures of the launcher.
///
/// Everything that can go wrong while events are being handled is reported
/// as a [`ControlError`](crate::controller::ControlError) instead and never
/// ends the run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid panel dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("failed to open event script {path}: {source}")]
    Script {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("export failed: {0}")]
    Export(#[from] RenderError),
}
