use crate::complex::Complex;
use crate::fractal::{escape_time, Fractal, FractalParams, IterationResult};

/// The Mandelbrot set of `z ← z^power + c`, starting from `z₀ = 0`.
///
/// The pixel's plane point is `c`.
#[derive(Debug, Clone)]
pub struct Mandelbrot {
    params: FractalParams,
}

impl Mandelbrot {
    pub fn new(params: FractalParams) -> Self {
        Self { params }
    }
}

impl Default for Mandelbrot {
    fn default() -> Self {
        Self::new(FractalParams::default())
    }
}

impl Fractal for Mandelbrot {
    #[inline]
    fn iterate(&self, c: Complex) -> IterationResult {
        escape_time(Complex::ZERO, c, &self.params)
    }

    fn params(&self) -> &FractalParams {
        &self.params
    }
}
