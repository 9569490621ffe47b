use mandeljulia_core::IterationResult;

use crate::iteration_buffer::IterationBuffer;
use crate::palette::Palette;
use crate::sink::PixelSink;

// ---------------------------------------------------------------------------
// Color params
// ---------------------------------------------------------------------------

/// Parameters of the iteration-count → RGB mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorParams {
    /// Exponent applied to the iteration count before scaling.
    pub exponent: f64,
    /// Factor applied after the exponent.
    pub factor: f64,
    /// Red, green and blue channel multipliers.
    pub multipliers: [u32; 3],
    /// Color of points that never escaped.
    pub convergence: [u8; 3],
}

impl ColorParams {
    pub const DEFAULT_EXPONENT: f64 = 1.3;
    pub const DEFAULT_FACTOR: f64 = 2.0;

    /// `factor · n^exponent`, the continuous value both color modes start from.
    #[inline]
    pub fn scaled(&self, iterations: u32) -> f64 {
        self.factor * (iterations as f64).powf(self.exponent)
    }

    /// Replace each convergence channel `v` with `255 - v`.
    pub fn invert_convergence(&mut self) {
        for channel in &mut self.convergence {
            *channel = 255 - *channel;
        }
    }
}

impl Default for ColorParams {
    fn default() -> Self {
        Self {
            exponent: Self::DEFAULT_EXPONENT,
            factor: Self::DEFAULT_FACTOR,
            multipliers: [1, 1, 1],
            convergence: [0, 0, 0],
        }
    }
}

// ---------------------------------------------------------------------------
// Color mapper
// ---------------------------------------------------------------------------

/// Maps iteration results to RGB, through a palette when one is set and
/// procedurally otherwise.
///
/// The mapping is a pure function of the result and the parameters.
#[derive(Debug, Clone, Copy)]
pub struct ColorMapper<'a> {
    params: &'a ColorParams,
    palette: Option<&'a Palette>,
}

impl<'a> ColorMapper<'a> {
    pub fn new(params: &'a ColorParams, palette: Option<&'a Palette>) -> Self {
        Self { params, palette }
    }

    #[inline]
    pub fn color(&self, result: IterationResult) -> [u8; 3] {
        if !result.escaped {
            return self.params.convergence;
        }
        let scaled = self.params.scaled(result.iterations);
        let [rm, gm, bm] = self.params.multipliers;
        match self.palette {
            Some(palette) => {
                // Saturating cast; `scaled` is never negative.
                let [r, g, b] = palette.lookup(scaled as u64);
                [wrap_product(rm, r), wrap_product(gm, g), wrap_product(bm, b)]
            }
            None => [
                wrap_scaled(rm, scaled),
                wrap_scaled(gm, scaled),
                wrap_scaled(bm, scaled),
            ],
        }
    }

    /// Color a panel's iteration data into `sink`, shifted right by `x_offset`.
    pub fn paint<S: PixelSink + ?Sized>(&self, iterations: &IterationBuffer, sink: &mut S, x_offset: u32) {
        for y in 0..iterations.height {
            for x in 0..iterations.width {
                sink.set_pixel(x + x_offset, y, self.color(iterations.get(x, y)));
            }
        }
    }
}

#[inline]
fn wrap_product(multiplier: u32, channel: u8) -> u8 {
    (multiplier as u64 * channel as u64 % 256) as u8
}

#[inline]
fn wrap_scaled(multiplier: u32, scaled: f64) -> u8 {
    (multiplier as f64 * scaled).rem_euclid(256.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn interior_gets_convergence_color() {
        let params = ColorParams {
            convergence: [12, 34, 56],
            ..ColorParams::default()
        };
        let palette = Palette::default();
        let interior = IterationResult::interior(100);
        assert_eq!(ColorMapper::new(&params, None).color(interior), [12, 34, 56]);
        assert_eq!(
            ColorMapper::new(&params, Some(&palette)).color(interior),
            [12, 34, 56]
        );
    }

    #[test]
    fn procedural_channels_share_one_scalar() {
        let params = ColorParams {
            exponent: 1.0,
            factor: 1.0,
            multipliers: [3, 1, 10],
            convergence: [0, 0, 0],
        };
        let mapper = ColorMapper::new(&params, None);
        // scaled = 30 → (90, 30, 300 mod 256 = 44)
        assert_eq!(mapper.color(IterationResult::escaped(30)), [90, 30, 44]);
    }

    #[test]
    fn procedural_truncates_fractional_channels() {
        let params = ColorParams::default();
        let mapper = ColorMapper::new(&params, None);
        // 2 · 10^1.3 ≈ 39.905
        let expected = (2.0 * 10f64.powf(1.3)) as u8;
        assert_eq!(mapper.color(IterationResult::escaped(10)), [expected; 3]);
    }

    #[test]
    fn palette_index_is_truncated_then_wrapped() {
        let palette = Palette::by_name("gray").unwrap();
        let params = ColorParams {
            exponent: 1.0,
            factor: 0.75,
            multipliers: [1, 1, 1],
            convergence: [0, 0, 0],
        };
        let mapper = ColorMapper::new(&params, Some(&palette));
        // 0.75 · 10 = 7.5 → index 7
        assert_eq!(mapper.color(IterationResult::escaped(10)), palette.lookup(7));
        // 0.75 · 400 = 300 → index 300 mod 256 = 44
        assert_eq!(mapper.color(IterationResult::escaped(400)), palette.lookup(44));
    }

    #[test]
    fn palette_channels_are_multiplied_and_wrapped() {
        let palette = Palette::by_name("hsv").unwrap();
        let params = ColorParams {
            exponent: 1.0,
            factor: 1.0,
            multipliers: [2, 0, 3],
            convergence: [0, 0, 0],
        };
        let mapper = ColorMapper::new(&params, Some(&palette));
        let [r, _, b] = palette.lookup(5);
        assert_eq!(
            mapper.color(IterationResult::escaped(5)),
            [
                ((2 * r as u32) % 256) as u8,
                0,
                ((3 * b as u32) % 256) as u8
            ]
        );
    }

    #[test]
    fn invert_convergence_twice_restores() {
        let mut params = ColorParams::default();
        params.invert_convergence();
        assert_eq!(params.convergence, [255, 255, 255]);
        params.convergence = [10, 200, 0];
        params.invert_convergence();
        assert_eq!(params.convergence, [245, 55, 255]);
        params.invert_convergence();
        assert_eq!(params.convergence, [10, 200, 0]);
    }

    proptest! {
        #[test]
        fn color_is_a_pure_function_of_n(
            n in 0u32..100_000,
            exponent in 0.05f64..3.0,
            factor in 0.05f64..10.0,
            rm in 0u32..50, gm in 0u32..50, bm in 0u32..50,
            use_palette in any::<bool>(),
        ) {
            let params = ColorParams { exponent, factor, multipliers: [rm, gm, bm], convergence: [0, 0, 0] };
            let palette = Palette::default();
            let mapper = ColorMapper::new(&params, use_palette.then_some(&palette));
            let first = mapper.color(IterationResult::escaped(n));
            prop_assert_eq!(first, mapper.color(IterationResult::escaped(n)));
        }
    }
}
