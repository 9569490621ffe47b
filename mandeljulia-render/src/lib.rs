pub mod buffer;
pub mod color;
pub mod error;
pub mod export;
pub mod iteration_buffer;
pub mod palette;
pub mod renderer;
pub mod sink;

pub use buffer::RenderBuffer;
pub use color::{ColorMapper, ColorParams};
pub use error::RenderError;
pub use export::{export_png, ExportMetadata};
pub use iteration_buffer::IterationBuffer;
pub use palette::{builtin_palettes, Palette, DEFAULT_PALETTE};
pub use renderer::{render, render_into, RenderResult};
pub use sink::PixelSink;

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
