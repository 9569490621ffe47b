use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::error::CoreError;

/// The rectangle of the complex plane mapped onto one panel.
///
/// Bounds are stored directly rather than as center + scale, so that a zoom
/// rectangle dragged by the user and a command record replayed from history
/// produce exactly the same numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Viewport {
    /// Half-extent of the symmetric default views.
    pub const DEFAULT_EXTENT: f64 = 1.25;

    /// Create a viewport, rejecting empty, inverted, or non-finite bounds.
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> crate::Result<Self> {
        let vp = Self {
            xmin,
            xmax,
            ymin,
            ymax,
        };
        vp.validate()?;
        Ok(vp)
    }

    /// Default Mandelbrot bounds for the given iteration power.
    ///
    /// Only the quadratic set is lopsided towards negative reals; every other
    /// power gets the symmetric square.
    pub fn default_mandelbrot(power: u32) -> Self {
        if power == 2 {
            Self {
                xmin: -2.0,
                xmax: 0.5,
                ymin: -Self::DEFAULT_EXTENT,
                ymax: Self::DEFAULT_EXTENT,
            }
        } else {
            Self::symmetric(Self::DEFAULT_EXTENT)
        }
    }

    /// Default Julia bounds, independent of power.
    pub fn default_julia() -> Self {
        Self::symmetric(Self::DEFAULT_EXTENT)
    }

    fn symmetric(extent: f64) -> Self {
        Self {
            xmin: -extent,
            xmax: extent,
            ymin: -extent,
            ymax: extent,
        }
    }

    /// Check the `xmin < xmax`, `ymin < ymax` invariant.
    pub fn validate(&self) -> crate::Result<()> {
        let finite = [self.xmin, self.xmax, self.ymin, self.ymax]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(CoreError::InvalidViewport {
                reason: format!("bounds must be finite, got {self}"),
            });
        }
        if self.xmin >= self.xmax || self.ymin >= self.ymax {
            return Err(CoreError::InvalidViewport {
                reason: format!("bounds must satisfy xmin < xmax and ymin < ymax, got {self}"),
            });
        }
        Ok(())
    }

    /// Map a screen position to a plane point.
    ///
    /// Screen rows grow downward while the imaginary axis grows upward, so
    /// row 0 maps to `ymax`. Positions outside the panel extrapolate linearly.
    #[inline]
    pub fn screen_to_plane(&self, px: f64, py: f64, width: u32, height: u32) -> Complex {
        Complex::new(
            px * (self.xmax - self.xmin) / width as f64 + self.xmin,
            py * (self.ymin - self.ymax) / height as f64 + self.ymax,
        )
    }

    /// Inverse of [`screen_to_plane`](Self::screen_to_plane).
    #[inline]
    pub fn plane_to_screen(&self, point: Complex, width: u32, height: u32) -> (f64, f64) {
        (
            (point.re - self.xmin) * width as f64 / (self.xmax - self.xmin),
            (point.im - self.ymax) * height as f64 / (self.ymin - self.ymax),
        )
    }

    /// Bounds spanned by two dragged corners.
    ///
    /// With `square` set the result is the square centred on the rectangle's
    /// midpoint whose side is the larger of the two spans; otherwise it is
    /// the axis-aligned box of the corners. A zero-area result is rejected
    /// with [`CoreError::InvalidZoom`].
    pub fn from_corners(p0: Complex, p1: Complex, square: bool) -> crate::Result<Self> {
        let vp = if square {
            let center = Complex::new((p0.re + p1.re) / 2.0, (p0.im + p1.im) / 2.0);
            let radius = (p0.re - p1.re).abs().max((p0.im - p1.im).abs()) / 2.0;
            Self {
                xmin: center.re - radius,
                xmax: center.re + radius,
                ymin: center.im - radius,
                ymax: center.im + radius,
            }
        } else {
            Self {
                xmin: p0.re.min(p1.re),
                xmax: p0.re.max(p1.re),
                ymin: p0.im.min(p1.im),
                ymax: p0.im.max(p1.im),
            }
        };

        let (width, height) = (vp.width(), vp.height());
        if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
            return Err(CoreError::InvalidZoom { width, height });
        }
        Ok(vp)
    }

    /// Horizontal extent in plane units.
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Vertical extent in plane units.
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }
}

impl std::fmt::Display for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({};{};{};{})",
            self.xmin, self.xmax, self.ymin, self.ymax
        )
    }
}
