use crate::complex::Complex;
use crate::fractal::{escape_time, Fractal, FractalParams, IterationResult};

/// A Julia set of `z ← z^power + c`, where the seed `c` is fixed and the
/// pixel's plane point is `z₀`.
#[derive(Debug, Clone)]
pub struct Julia {
    params: FractalParams,
    c: Complex,
}

impl Julia {
    pub fn new(c: Complex, params: FractalParams) -> Self {
        Self { params, c }
    }

    /// Seed used before the user picks one in the Mandelbrot panel.
    pub fn default_c() -> Complex {
        Complex::new(0.5, 0.0)
    }

    pub fn c(&self) -> Complex {
        self.c
    }
}

impl Default for Julia {
    fn default() -> Self {
        Self::new(Self::default_c(), FractalParams::default())
    }
}

impl Fractal for Julia {
    #[inline]
    fn iterate(&self, z0: Complex) -> IterationResult {
        escape_time(z0, self.c, &self.params)
    }

    fn params(&self) -> &FractalParams {
        &self.params
    }
}
