use crate::complex::Complex;
use crate::error::CoreError;

/// The outcome of iterating a single point.
///
/// `escaped == false` means the iteration cap was reached and the point is
/// treated as belonging to the set; `iterations` then equals the cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationResult {
    pub iterations: u32,
    pub escaped: bool,
}

impl IterationResult {
    #[inline]
    pub fn escaped(iterations: u32) -> Self {
        Self {
            iterations,
            escaped: true,
        }
    }

    #[inline]
    pub fn interior(max_iterations: u32) -> Self {
        Self {
            iterations: max_iterations,
            escaped: false,
        }
    }
}

/// Parameters of the generalized map `z ← z^power + c`.
///
/// The cached `escape_radius_sq` field is recomputed whenever the radius
/// changes, so the inner loop never squares it again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractalParams {
    /// Exponent of the iterated map. `1` is accepted and degenerates to a
    /// translation.
    pub power: u32,

    /// Iteration cap; reaching it classifies the point as interior.
    pub max_iterations: u32,

    /// Bailout radius: the orbit has escaped once `|z| >= escape_radius`.
    pub escape_radius: f64,

    escape_radius_sq: f64,
}

impl FractalParams {
    pub const DEFAULT_POWER: u32 = 2;
    pub const DEFAULT_MAX_ITERATIONS: u32 = 100;
    pub const DEFAULT_ESCAPE_RADIUS: f64 = 2.0;

    pub fn new(power: u32, max_iterations: u32, escape_radius: f64) -> crate::Result<Self> {
        if power < 1 {
            return Err(CoreError::InvalidPower(power));
        }
        if max_iterations < 1 {
            return Err(CoreError::InvalidMaxIterations(max_iterations));
        }
        if escape_radius <= 0.0 || !escape_radius.is_finite() {
            return Err(CoreError::InvalidEscapeRadius(escape_radius));
        }
        Ok(Self {
            power,
            max_iterations,
            escape_radius,
            escape_radius_sq: escape_radius * escape_radius,
        })
    }

    #[inline]
    pub fn escape_radius_sq(&self) -> f64 {
        self.escape_radius_sq
    }

    /// Update the escape radius and recompute the cached square.
    pub fn set_escape_radius(&mut self, r: f64) {
        self.escape_radius = r;
        self.escape_radius_sq = r * r;
    }

    /// Return a copy with a different `max_iterations` value.
    pub fn with_max_iterations(self, max_iterations: u32) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            power: Self::DEFAULT_POWER,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            escape_radius: Self::DEFAULT_ESCAPE_RADIUS,
            escape_radius_sq: Self::DEFAULT_ESCAPE_RADIUS * Self::DEFAULT_ESCAPE_RADIUS,
        }
    }
}

/// Escape-time iteration of `z ← z^power + c` starting from `z0`.
///
/// The magnitude and the cap are both tested before each step, so a start
/// point already outside the radius reports zero iterations. Running into
/// the cap always classifies the point as interior.
#[inline]
pub fn escape_time(z0: Complex, c: Complex, params: &FractalParams) -> IterationResult {
    let radius_sq = params.escape_radius_sq();
    let max_iter = params.max_iterations;

    let mut z = z0;
    let mut n: u32 = 0;
    while n < max_iter && z.norm_sq() < radius_sq {
        z = if params.power == 2 {
            Complex::new(z.re * z.re - z.im * z.im + c.re, 2.0 * z.re * z.im + c.im)
        } else {
            z.powi(params.power) + c
        };
        n += 1;
    }

    if n == max_iter {
        IterationResult::interior(max_iter)
    } else {
        IterationResult::escaped(n)
    }
}

/// Trait implemented by both panel fractals.
///
/// Renderers are generic over `F: Fractal` so the iteration call is
/// statically dispatched and inlined.
pub trait Fractal {
    /// Iterate the plane point shown at one pixel.
    ///
    /// For the Mandelbrot set `point` is `c`; for a Julia set it is `z0`.
    fn iterate(&self, point: Complex) -> IterationResult;

    fn params(&self) -> &FractalParams;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params() {
        let p = FractalParams::default();
        assert_eq!(p.power, 2);
        assert_eq!(p.max_iterations, 100);
        assert!((p.escape_radius_sq() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_params() {
        assert_eq!(FractalParams::new(0, 100, 2.0), Err(CoreError::InvalidPower(0)));
        assert_eq!(
            FractalParams::new(2, 0, 2.0),
            Err(CoreError::InvalidMaxIterations(0))
        );
        assert!(FractalParams::new(2, 100, 0.0).is_err());
        assert!(FractalParams::new(2, 100, f64::NAN).is_err());
        assert!(FractalParams::new(2, 100, f64::INFINITY).is_err());
    }

    #[test]
    fn set_escape_radius_updates_cache() {
        let mut p = FractalParams::default();
        p.set_escape_radius(3.0);
        assert!((p.escape_radius_sq() - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn origin_never_escapes() {
        let p = FractalParams::default();
        assert_eq!(
            escape_time(Complex::ZERO, Complex::ZERO, &p),
            IterationResult::interior(100)
        );
    }

    #[test]
    fn two_plus_two_i_escapes_after_one_step() {
        // z₁ = (2, 2), |z₁| ≈ 2.83 ≥ 2
        let p = FractalParams::default();
        assert_eq!(
            escape_time(Complex::ZERO, Complex::new(2.0, 2.0), &p),
            IterationResult::escaped(1)
        );
    }

    #[test]
    fn start_outside_radius_reports_zero() {
        let p = FractalParams::default();
        assert_eq!(
            escape_time(Complex::new(3.0, 0.0), Complex::ZERO, &p),
            IterationResult::escaped(0)
        );
    }

    #[test]
    fn escape_on_last_step_counts_as_interior() {
        // c = 1: z₁ = 1, z₂ = 2 → |z₂| = 2 ≥ 2 after exactly two steps.
        let p = FractalParams::new(2, 2, 2.0).unwrap();
        assert_eq!(
            escape_time(Complex::ZERO, Complex::ONE, &p),
            IterationResult::interior(2)
        );
        let p = FractalParams::new(2, 3, 2.0).unwrap();
        assert_eq!(
            escape_time(Complex::ZERO, Complex::ONE, &p),
            IterationResult::escaped(2)
        );
    }

    #[test]
    fn power_one_is_a_translation() {
        // z_n = n·c, so c = 0.5 crosses |z| ≥ 2 at n = 4.
        let p = FractalParams::new(1, 100, 2.0).unwrap();
        assert_eq!(
            escape_time(Complex::ZERO, Complex::new(0.5, 0.0), &p),
            IterationResult::escaped(4)
        );
    }

    #[test]
    fn general_power_matches_quadratic_fast_path() {
        let fast = FractalParams::default();
        let points = [
            Complex::new(-0.75, 0.1),
            Complex::new(0.3, 0.5),
            Complex::new(-1.8, 0.0),
            Complex::new(0.26, 0.0),
        ];
        for c in points {
            let mut z = Complex::ZERO;
            let mut n = 0;
            while n < fast.max_iterations && z.norm_sq() < fast.escape_radius_sq() {
                z = z.powi(2) + c;
                n += 1;
            }
            assert_eq!(escape_time(Complex::ZERO, c, &fast).iterations, n, "c = {c}");
        }
    }

    #[test]
    fn larger_radius_never_lowers_count() {
        let points = [
            Complex::new(0.3, 0.5),
            Complex::new(-0.75, 0.2),
            Complex::new(0.4, -0.3),
            Complex::new(2.0, 2.0),
        ];
        for c in points {
            let mut previous = 0;
            for radius in [0.5, 1.0, 2.0, 4.0, 10.0] {
                let p = FractalParams::new(2, 200, radius).unwrap();
                let r = escape_time(Complex::ZERO, c, &p);
                assert!(r.iterations >= previous, "c = {c}, radius = {radius}");
                previous = r.iterations;
            }
        }
    }
}
