use thiserror::Error;

/// Errors originating from the core fractal engine.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid max iterations: {0} (must be >= 1)")]
    InvalidMaxIterations(u32),

    #[error("invalid power: {0} (must be >= 1)")]
    InvalidPower(u32),

    #[error("invalid escape radius: {0} (must be > 0.0)")]
    InvalidEscapeRadius(f64),

    #[error("invalid viewport: {reason}")]
    InvalidViewport { reason: String },

    #[error("degenerate zoom rectangle: {width}×{height}")]
    InvalidZoom { width: f64, height: f64 },
}
