pub mod complex;
pub mod error;
pub mod fractal;
pub mod julia;
pub mod mandelbrot;
pub mod viewport;
pub mod viewport_state;

// Re-export primary types for convenience.
pub use complex::Complex;
pub use error::CoreError;
pub use fractal::{escape_time, Fractal, FractalParams, IterationResult};
pub use julia::Julia;
pub use mandelbrot::Mandelbrot;
pub use viewport::Viewport;
pub use viewport_state::{Panel, ViewportState};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
