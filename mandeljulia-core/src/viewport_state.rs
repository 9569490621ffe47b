use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::julia::Julia;
use crate::viewport::Viewport;

/// One of the two side-by-side panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Panel {
    /// Left half: `c` varies per pixel.
    Mandelbrot,
    /// Right half: `z₀` varies per pixel, `c` is the seed.
    Julia,
}

impl Panel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Mandelbrot => "Mandelbrot",
            Self::Julia => "Julia",
        }
    }

    /// Horizontal offset of this panel inside the two-panel window.
    pub fn x_offset(self, panel_width: u32) -> u32 {
        match self {
            Self::Mandelbrot => 0,
            Self::Julia => panel_width,
        }
    }

    /// Panel under window column `x`, with the column made panel-relative.
    pub fn at(x: f64, panel_width: u32) -> (Self, f64) {
        let w = panel_width as f64;
        if x < w {
            (Self::Mandelbrot, x)
        } else {
            (Self::Julia, x - w)
        }
    }
}

/// Both panel viewports plus the Julia seed.
///
/// Default bounds come from [`Viewport::default_mandelbrot`] and
/// [`Viewport::default_julia`] both at startup and on reset.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    pub mandelbrot: Viewport,
    pub julia: Viewport,
    pub seed: Complex,
}

impl ViewportState {
    pub fn new(power: u32) -> Self {
        Self {
            mandelbrot: Viewport::default_mandelbrot(power),
            julia: Viewport::default_julia(),
            seed: Julia::default_c(),
        }
    }

    pub fn viewport(&self, panel: Panel) -> Viewport {
        match panel {
            Panel::Mandelbrot => self.mandelbrot,
            Panel::Julia => self.julia,
        }
    }

    pub fn set_viewport(&mut self, panel: Panel, viewport: Viewport) {
        match panel {
            Panel::Mandelbrot => self.mandelbrot = viewport,
            Panel::Julia => self.julia = viewport,
        }
    }

    pub fn reset_mandelbrot(&mut self, power: u32) {
        self.mandelbrot = Viewport::default_mandelbrot(power);
    }

    pub fn reset_julia(&mut self) {
        self.julia = Viewport::default_julia();
    }

    /// Restore one panel's default bounds. `power` only matters for the
    /// Mandelbrot panel.
    pub fn reset(&mut self, panel: Panel, power: u32) {
        match panel {
            Panel::Mandelbrot => self.reset_mandelbrot(power),
            Panel::Julia => self.reset_julia(),
        }
    }

    /// Zoom a panel to the rectangle spanned by two plane points.
    ///
    /// On a degenerate rectangle the panel keeps its current bounds and the
    /// error is returned.
    pub fn apply_zoom(
        &mut self,
        panel: Panel,
        p0: Complex,
        p1: Complex,
        square: bool,
    ) -> crate::Result<Viewport> {
        let viewport = Viewport::from_corners(p0, p1, square)?;
        self.set_viewport(panel, viewport);
        Ok(viewport)
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(crate::FractalParams::DEFAULT_POWER)
    }
}
