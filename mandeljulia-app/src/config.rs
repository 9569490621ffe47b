use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::params::{
    MIN_COLOR_EXPONENT, MIN_COLOR_FACTOR, MIN_ESCAPE_RADIUS, MIN_MAX_ITERATIONS, MIN_POWER,
};

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Render the Mandelbrot set next to one of its Julia sets.
#[derive(Debug, Parser)]
#[command(name = "mandeljulia", version, about)]
pub struct Args {
    /// Width of one panel in pixels.
    #[arg(short = 'L', long)]
    pub width: Option<u32>,

    /// Height of the panels in pixels.
    #[arg(short = 'H', long)]
    pub height: Option<u32>,

    /// Exponent of the iterated map.
    #[arg(short = 'P', long)]
    pub power: Option<u32>,

    /// Iteration depth.
    #[arg(short = 'D', long)]
    pub depth: Option<u32>,

    /// Escape radius.
    #[arg(short = 'A', long)]
    pub abs_limit: Option<f64>,

    /// Color of non-escaping points as `r,g,b`.
    #[arg(short = 'C', long, value_parser = parse_rgb)]
    pub color_conv: Option<[u8; 3]>,

    /// Palette name; unknown names fall back to procedural coloring.
    #[arg(short = 'N', long)]
    pub color_name: Option<String>,

    /// Exponent applied to iteration counts before coloring.
    #[arg(short = 'E', long)]
    pub color_exponent: Option<f64>,

    /// Factor applied to iteration counts before coloring.
    #[arg(short = 'F', long)]
    pub color_factor: Option<f64>,

    /// Red channel multiplier.
    #[arg(short = 'R', long)]
    pub red: Option<u32>,

    /// Green channel multiplier.
    #[arg(short = 'G', long)]
    pub green: Option<u32>,

    /// Blue channel multiplier.
    #[arg(short = 'B', long)]
    pub blue: Option<u32>,

    /// Keep zoom rectangles square (1) or not (0).
    #[arg(short = 'S', long, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub square_zoom: Option<u8>,

    /// JSON file with launch settings; flags override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Event script to replay after the initial render (`-` reads stdin).
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Where to write the final two-panel image.
    #[arg(long, default_value = "mandeljulia.png")]
    pub output: PathBuf,
}

fn parse_rgb(s: &str) -> Result<[u8; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected r,g,b but got {s:?}"));
    }
    let mut rgb = [0u8; 3];
    for (slot, part) in rgb.iter_mut().zip(parts) {
        *slot = part
            .parse()
            .map_err(|e| format!("invalid channel {part:?}: {e}"))?;
    }
    Ok(rgb)
}

// ---------------------------------------------------------------------------
// Launch configuration
// ---------------------------------------------------------------------------

/// Startup settings. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchConfig {
    #[serde(default = "default_panel_size")]
    pub width: u32,
    #[serde(default = "default_panel_size")]
    pub height: u32,
    #[serde(default = "default_power")]
    pub power: u32,
    #[serde(default = "default_depth")]
    pub depth: u32,
    #[serde(default = "default_abs_limit")]
    pub abs_limit: f64,
    #[serde(default)]
    pub color_conv: [u8; 3],
    /// `None` selects procedural coloring.
    #[serde(default = "default_color_name")]
    pub color_name: Option<String>,
    #[serde(default = "default_color_exponent")]
    pub color_exponent: f64,
    #[serde(default = "default_color_factor")]
    pub color_factor: f64,
    #[serde(default = "default_multiplier")]
    pub red: u32,
    #[serde(default = "default_multiplier")]
    pub green: u32,
    #[serde(default = "default_multiplier")]
    pub blue: u32,
    #[serde(default = "default_true")]
    pub square_zoom: bool,
}

fn default_panel_size() -> u32 {
    700
}
fn default_power() -> u32 {
    mandeljulia_core::FractalParams::DEFAULT_POWER
}
fn default_depth() -> u32 {
    mandeljulia_core::FractalParams::DEFAULT_MAX_ITERATIONS
}
fn default_abs_limit() -> f64 {
    mandeljulia_core::FractalParams::DEFAULT_ESCAPE_RADIUS
}
fn default_color_name() -> Option<String> {
    Some(mandeljulia_render::DEFAULT_PALETTE.to_string())
}
fn default_color_exponent() -> f64 {
    mandeljulia_render::ColorParams::DEFAULT_EXPONENT
}
fn default_color_factor() -> f64 {
    mandeljulia_render::ColorParams::DEFAULT_FACTOR
}
fn default_multiplier() -> u32 {
    1
}
fn default_true() -> bool {
    true
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            width: default_panel_size(),
            height: default_panel_size(),
            power: default_power(),
            depth: default_depth(),
            abs_limit: default_abs_limit(),
            color_conv: [0, 0, 0],
            color_name: default_color_name(),
            color_exponent: default_color_exponent(),
            color_factor: default_color_factor(),
            red: default_multiplier(),
            green: default_multiplier(),
            blue: default_multiplier(),
            square_zoom: true,
        }
    }
}

impl LaunchConfig {
    /// Defaults, then the optional config file, then the flags.
    pub fn resolve(args: &Args) -> Result<Self, AppError> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_args(args);
        config.sanitize();
        config.validate()?;
        Ok(config)
    }

    /// Read settings from a JSON file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let json = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&json).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded launch settings from {}", path.display());
        Ok(config)
    }

    pub fn apply_args(&mut self, args: &Args) {
        if let Some(v) = args.width {
            self.width = v;
        }
        if let Some(v) = args.height {
            self.height = v;
        }
        if let Some(v) = args.power {
            self.power = v;
        }
        if let Some(v) = args.depth {
            self.depth = v;
        }
        if let Some(v) = args.abs_limit {
            self.abs_limit = v;
        }
        if let Some(v) = args.color_conv {
            self.color_conv = v;
        }
        if let Some(v) = &args.color_name {
            self.color_name = Some(v.clone());
        }
        if let Some(v) = args.color_exponent {
            self.color_exponent = v;
        }
        if let Some(v) = args.color_factor {
            self.color_factor = v;
        }
        if let Some(v) = args.red {
            self.red = v;
        }
        if let Some(v) = args.green {
            self.green = v;
        }
        if let Some(v) = args.blue {
            self.blue = v;
        }
        if let Some(v) = args.square_zoom {
            self.square_zoom = v != 0;
        }
        debug!(config = ?self, "Launch settings after command line");
    }

    /// Clamp numeric settings to their floors, warning about each change.
    pub fn sanitize(&mut self) {
        if self.power < MIN_POWER {
            warn!("power {} below {MIN_POWER}, clamping", self.power);
            self.power = MIN_POWER;
        }
        if self.depth < MIN_MAX_ITERATIONS {
            warn!("depth {} below {MIN_MAX_ITERATIONS}, clamping", self.depth);
            self.depth = MIN_MAX_ITERATIONS;
        }
        // NaN fails every comparison, so test for "not at least" the floor.
        if !(self.abs_limit >= MIN_ESCAPE_RADIUS) || !self.abs_limit.is_finite() {
            warn!("escape radius {} out of range, clamping", self.abs_limit);
            self.abs_limit = MIN_ESCAPE_RADIUS;
        }
        if !(self.color_exponent >= MIN_COLOR_EXPONENT) || !self.color_exponent.is_finite() {
            warn!("color exponent {} out of range, clamping", self.color_exponent);
            self.color_exponent = MIN_COLOR_EXPONENT;
        }
        if !(self.color_factor >= MIN_COLOR_FACTOR) || !self.color_factor.is_finite() {
            warn!("color factor {} out of range, clamping", self.color_factor);
            self.color_factor = MIN_COLOR_FACTOR;
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.width == 0 || self.height == 0 {
            return Err(AppError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}
