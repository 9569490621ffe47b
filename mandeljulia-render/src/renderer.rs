use std::time::{Duration, Instant};

use tracing::debug;

use mandeljulia_core::{Fractal, Viewport};

use crate::color::ColorMapper;
use crate::iteration_buffer::IterationBuffer;
use crate::sink::PixelSink;

/// The iteration data of one panel render.
///
/// Carries no colors; pass it through a [`ColorMapper`] to get pixels.
pub struct RenderResult {
    pub iterations: IterationBuffer,
    pub elapsed: Duration,
}

/// Iterate every pixel of a `width × height` panel showing `viewport`.
///
/// Runs row by row on the calling thread and blocks until the whole panel
/// is done.
pub fn render<F: Fractal>(fractal: &F, viewport: &Viewport, width: u32, height: u32) -> RenderResult {
    let start = Instant::now();
    let max_iter = fractal.params().max_iterations;
    let mut iterations = IterationBuffer::new(width, height, max_iter);

    for py in 0..height {
        let row = py as usize * width as usize;
        for px in 0..width {
            let point = viewport.screen_to_plane(px as f64, py as f64, width, height);
            iterations.data[row + px as usize] = fractal.iterate(point);
        }
    }

    let elapsed = start.elapsed();
    debug!(
        width,
        height,
        max_iter,
        interior = iterations.interior_count(),
        elapsed_ms = elapsed.as_millis(),
        "Panel iterated"
    );
    RenderResult {
        iterations,
        elapsed,
    }
}

/// Render a panel, color it into `sink` at `x_offset`, and present it.
pub fn render_into<F: Fractal, S: PixelSink + ?Sized>(
    fractal: &F,
    viewport: &Viewport,
    width: u32,
    height: u32,
    mapper: &ColorMapper<'_>,
    sink: &mut S,
    x_offset: u32,
) -> RenderResult {
    let result = render(fractal, viewport, width, height);
    mapper.paint(&result.iterations, sink, x_offset);
    sink.present();
    result
}
