const LUT_SIZE: usize = 256;

/// Palette used when nothing else is configured.
pub const DEFAULT_PALETTE: &str = "twilight";

type Stops = &'static [(f64, [u8; 3])];

const TWILIGHT: Stops = &[
    (0.0, [226, 217, 226]),
    (0.25, [94, 129, 182]),
    (0.5, [47, 20, 70]),
    (0.75, [168, 65, 55]),
    (1.0, [226, 217, 226]),
];

/// Built-in palettes as gradient stops, in display order.
const PALETTES: [(&str, Stops); 10] = [
    ("twilight", TWILIGHT),
    (
        "twilight_shifted",
        &[
            (0.0, [47, 20, 70]),
            (0.25, [94, 129, 182]),
            (0.5, [226, 217, 226]),
            (0.75, [168, 65, 55]),
            (1.0, [47, 20, 70]),
        ],
    ),
    (
        "viridis",
        &[
            (0.0, [68, 1, 84]),
            (0.25, [59, 82, 139]),
            (0.5, [33, 145, 140]),
            (0.75, [94, 201, 98]),
            (1.0, [253, 231, 37]),
        ],
    ),
    (
        "plasma",
        &[
            (0.0, [13, 8, 135]),
            (0.25, [126, 3, 168]),
            (0.5, [204, 71, 120]),
            (0.75, [248, 149, 64]),
            (1.0, [240, 249, 33]),
        ],
    ),
    (
        "inferno",
        &[
            (0.0, [0, 0, 4]),
            (0.25, [87, 16, 110]),
            (0.5, [188, 55, 84]),
            (0.75, [249, 142, 9]),
            (1.0, [252, 255, 164]),
        ],
    ),
    (
        "magma",
        &[
            (0.0, [0, 0, 4]),
            (0.25, [81, 18, 124]),
            (0.5, [183, 55, 121]),
            (0.75, [252, 137, 97]),
            (1.0, [252, 253, 191]),
        ],
    ),
    (
        "hsv",
        &[
            (0.0, [255, 0, 0]),
            (1.0 / 6.0, [255, 255, 0]),
            (2.0 / 6.0, [0, 255, 0]),
            (3.0 / 6.0, [0, 255, 255]),
            (4.0 / 6.0, [0, 0, 255]),
            (5.0 / 6.0, [255, 0, 255]),
            (1.0, [255, 0, 0]),
        ],
    ),
    ("gray", &[(0.0, [0, 0, 0]), (1.0, [255, 255, 255])]),
    (
        "hot",
        &[
            (0.0, [11, 0, 0]),
            (0.375, [255, 0, 0]),
            (0.75, [255, 255, 0]),
            (1.0, [255, 255, 255]),
        ],
    ),
    ("cool", &[(0.0, [0, 255, 255]), (1.0, [255, 0, 255])]),
];

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// A named ring of RGB colors indexed by a wrapped integer.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub name: &'static str,
    colors: Vec<[u8; 3]>,
}

impl Palette {
    fn new(name: &'static str, colors: Vec<[u8; 3]>) -> Self {
        debug_assert!(!colors.is_empty());
        Self { name, colors }
    }

    /// Look up a built-in palette. Names are case-sensitive.
    pub fn by_name(name: &str) -> Option<Self> {
        PALETTES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(n, stops)| Self::new(n, gradient_lut(stops)))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index`, wrapping around the end of the table.
    #[inline]
    pub fn lookup(&self, index: u64) -> [u8; 3] {
        self.colors[(index % self.colors.len() as u64) as usize]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE, gradient_lut(TWILIGHT))
    }
}

// ---------------------------------------------------------------------------
// Builtin palettes
// ---------------------------------------------------------------------------

/// Every built-in palette, in display order.
pub fn builtin_palettes() -> Vec<Palette> {
    PALETTES
        .iter()
        .map(|&(name, stops)| Palette::new(name, gradient_lut(stops)))
        .collect()
}

/// Build a gradient LUT by interpolating between color stops.
fn gradient_lut(stops: Stops) -> Vec<[u8; 3]> {
    (0..LUT_SIZE)
        .map(|i| {
            let t = i as f64 / LUT_SIZE as f64;
            let mut lo = 0;
            for (j, &(pos, _)) in stops.iter().enumerate() {
                if pos <= t {
                    lo = j;
                }
            }
            let hi = (lo + 1).min(stops.len() - 1);
            let (lo_t, lo_c) = stops[lo];
            let (hi_t, hi_c) = stops[hi];
            let frac = if (hi_t - lo_t).abs() < 1e-10 {
                0.0
            } else {
                ((t - lo_t) / (hi_t - lo_t)).clamp(0.0, 1.0)
            };
            let inv = 1.0 - frac;
            [
                (lo_c[0] as f64 * inv + hi_c[0] as f64 * frac) as u8,
                (lo_c[1] as f64 * inv + hi_c[1] as f64 * frac) as u8,
                (lo_c[2] as f64 * inv + hi_c[2] as f64 * frac) as u8,
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_palettes_have_correct_size() {
        let palettes = builtin_palettes();
        assert_eq!(palettes.len(), PALETTES.len());
        for pal in palettes {
            assert_eq!(pal.len(), LUT_SIZE, "{}", pal.name);
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(Palette::by_name("viridis").is_some());
        assert!(Palette::by_name("Viridis").is_none());
        assert!(Palette::by_name("no-such-map").is_none());
    }

    #[test]
    fn default_is_twilight() {
        assert_eq!(Palette::default(), Palette::by_name(DEFAULT_PALETTE).unwrap());
    }

    #[test]
    fn lookup_wraps() {
        let p = Palette::by_name("gray").unwrap();
        assert_eq!(p.lookup(0), [0, 0, 0]);
        assert_eq!(p.lookup(LUT_SIZE as u64), p.lookup(0));
        assert_eq!(p.lookup(3 * LUT_SIZE as u64 + 17), p.lookup(17));
    }

    #[test]
    fn gray_ramp_is_monotonic() {
        let p = Palette::by_name("gray").unwrap();
        for i in 1..LUT_SIZE as u64 {
            assert!(p.lookup(i)[0] >= p.lookup(i - 1)[0]);
        }
    }
}
