//! PNG export with embedded metadata (tEXt chunks).

use std::io::BufWriter;
use std::path::Path;

use tracing::debug;

use mandeljulia_core::{Complex, Viewport};

use crate::error::RenderError;

/// Parameters to embed in an exported PNG as tEXt chunks.
pub struct ExportMetadata {
    /// Status line of the last rendered panel.
    pub caption: String,
    pub power: u32,
    pub max_iterations: u32,
    pub escape_radius: f64,
    /// `None` when the procedural coloring was used.
    pub palette_name: Option<String>,
    pub mandelbrot: Viewport,
    pub julia: Viewport,
    pub seed: Complex,
}

/// Write an RGBA pixel buffer as a PNG file with embedded fractal metadata.
pub fn export_png(
    pixels: &[u8],
    width: u32,
    height: u32,
    path: &Path,
    metadata: &ExportMetadata,
) -> crate::Result<()> {
    if width == 0 || height == 0 || pixels.len() != width as usize * height as usize * 4 {
        return Err(RenderError::InvalidDimensions { width, height });
    }

    let file = std::fs::File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);

    encoder.add_text_chunk("Software".to_string(), "MandelJulia".to_string())?;
    encoder.add_text_chunk("Description".to_string(), metadata.caption.clone())?;
    for (key, value) in build_metadata_pairs(metadata) {
        encoder.add_text_chunk(key, value)?;
    }

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(pixels)?;

    debug!("Exported PNG {}x{} to {}", width, height, path.display());
    Ok(())
}

fn build_metadata_pairs(meta: &ExportMetadata) -> Vec<(String, String)> {
    vec![
        ("MandelJulia.Power".into(), meta.power.to_string()),
        ("MandelJulia.MaxIterations".into(), meta.max_iterations.to_string()),
        ("MandelJulia.EscapeRadius".into(), meta.escape_radius.to_string()),
        (
            "MandelJulia.Palette".into(),
            meta.palette_name.clone().unwrap_or_else(|| "procedural".into()),
        ),
        ("MandelJulia.Mandelbrot".into(), meta.mandelbrot.to_string()),
        ("MandelJulia.Julia".into(), meta.julia.to_string()),
        ("MandelJulia.JuliaC".into(), meta.seed.to_string()),
    ]
}
