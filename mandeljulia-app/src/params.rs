use tracing::{info, warn};

use mandeljulia_core::FractalParams;
use mandeljulia_render::{ColorParams, Palette};

use crate::config::LaunchConfig;

pub const MIN_MAX_ITERATIONS: u32 = 10;
pub const MIN_POWER: u32 = 1;
pub const MIN_ESCAPE_RADIUS: f64 = 0.5;
pub const MIN_COLOR_EXPONENT: f64 = 0.05;
pub const MIN_COLOR_FACTOR: f64 = 0.05;

/// A scalar of [`RenderParams`] that a key press can step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustable {
    Depth,
    Power,
    EscapeRadius,
    ColorExponent,
    ColorFactor,
    Red,
    Green,
    Blue,
}

/// Formula and coloring parameters shared by both panels.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderParams {
    pub fractal: FractalParams,
    pub color: ColorParams,
    /// `None` selects procedural coloring.
    pub palette: Option<Palette>,
    pub square_zoom: bool,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            fractal: FractalParams::default(),
            color: ColorParams::default(),
            palette: Some(Palette::default()),
            square_zoom: true,
        }
    }
}

impl RenderParams {
    /// Build from already clamped launch settings.
    pub fn from_config(config: &LaunchConfig) -> Self {
        let mut fractal = FractalParams::default();
        fractal.power = config.power;
        fractal.max_iterations = config.depth;
        fractal.set_escape_radius(config.abs_limit);

        let color = ColorParams {
            exponent: config.color_exponent,
            factor: config.color_factor,
            multipliers: [config.red, config.green, config.blue],
            convergence: config.color_conv,
        };

        let palette = config.color_name.as_deref().and_then(|name| {
            let palette = Palette::by_name(name);
            if palette.is_none() {
                warn!("Unknown palette {name:?}, using procedural coloring");
            }
            palette
        });

        Self {
            fractal,
            color,
            palette,
            square_zoom: config.square_zoom,
        }
    }

    pub fn palette_name(&self) -> Option<&'static str> {
        self.palette.as_ref().map(|p| p.name)
    }

    /// Switch palettes. An unknown name clears the palette so procedural
    /// coloring takes over, and is returned as the error.
    pub fn set_palette(&mut self, name: &str) -> Result<(), String> {
        self.palette = Palette::by_name(name);
        match self.palette {
            Some(_) => {
                info!("Palette set to {name}");
                Ok(())
            }
            None => Err(name.to_string()),
        }
    }

    /// Step one scalar up, or down when `decrease` is set, clamping at its floor.
    pub fn adjust(&mut self, which: Adjustable, decrease: bool) {
        let f = &mut self.fractal;
        let c = &mut self.color;
        match which {
            Adjustable::Depth => {
                f.max_iterations = if decrease {
                    f.max_iterations.saturating_sub(10).max(MIN_MAX_ITERATIONS)
                } else {
                    f.max_iterations.saturating_add(10)
                };
            }
            Adjustable::Power => {
                f.power = if decrease {
                    f.power.saturating_sub(1).max(MIN_POWER)
                } else {
                    f.power.saturating_add(1)
                };
            }
            Adjustable::EscapeRadius => {
                let r = step_f64(f.escape_radius, 0.5, decrease, MIN_ESCAPE_RADIUS);
                f.set_escape_radius(r);
            }
            Adjustable::ColorExponent => {
                c.exponent = step_f64(c.exponent, 0.05, decrease, MIN_COLOR_EXPONENT);
            }
            Adjustable::ColorFactor => {
                c.factor = step_f64(c.factor, 0.05, decrease, MIN_COLOR_FACTOR);
            }
            Adjustable::Red | Adjustable::Green | Adjustable::Blue => {
                let idx = match which {
                    Adjustable::Red => 0,
                    Adjustable::Green => 1,
                    _ => 2,
                };
                let m = &mut c.multipliers[idx];
                *m = if decrease {
                    m.saturating_sub(1)
                } else {
                    m.saturating_add(1)
                };
            }
        }
        info!(
            "{which:?} -> depth={} power={} radius={} exponent={:.2} factor={:.2} rgb={:?}",
            f.max_iterations, f.power, f.escape_radius, c.exponent, c.factor, c.multipliers
        );
    }

    pub fn toggle_square_zoom(&mut self) {
        self.square_zoom = !self.square_zoom;
        info!("Square zoom {}", if self.square_zoom { "on" } else { "off" });
    }
}

fn step_f64(value: f64, step: f64, decrease: bool, floor: f64) -> f64 {
    if decrease {
        (value - step).max(floor)
    } else {
        value + step
    }
}
