use crate::sink::PixelSink;

/// An in-memory RGBA frame holding both panels side by side.
///
/// Serves as the pixel sink for headless runs and tests, and is what gets
/// exported as PNG.
#[derive(Debug, Clone)]
pub struct RenderBuffer {
    pub width: u32,
    pub height: u32,
    /// RGBA pixel data, 4 bytes per pixel, row-major order.
    pub pixels: Vec<u8>,
    caption: String,
    frames_presented: u64,
}

impl RenderBuffer {
    /// Create a new buffer filled with black (opaque).
    pub fn new(width: u32, height: u32) -> Self {
        let mut pixels = vec![0u8; width as usize * height as usize * 4];
        for chunk in pixels.chunks_exact_mut(4) {
            chunk[3] = 255;
        }
        Self {
            width,
            height,
            pixels,
            caption: String::new(),
            frames_presented: 0,
        }
    }

    /// A frame for two panels of `panel_width × panel_height` each.
    pub fn for_panels(panel_width: u32, panel_height: u32) -> Self {
        Self::new(2 * panel_width, panel_height)
    }

    /// RGB value at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = self.index(x, y);
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }

    /// RGBA bytes of the columns `[x_offset, x_offset + width)`, row by row.
    pub fn region(&self, x_offset: u32, width: u32) -> Vec<u8> {
        let stride = self.width as usize * 4;
        let start = x_offset as usize * 4;
        let len = width as usize * 4;
        self.pixels
            .chunks_exact(stride)
            .flat_map(|row| row[start..start + len].iter().copied())
            .collect()
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }
}

impl PixelSink for RenderBuffer {
    fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.index(x, y);
        self.pixels[idx..idx + 3].copy_from_slice(&rgb);
        self.pixels[idx + 3] = 255;
    }

    fn present(&mut self) {
        self.frames_presented += 1;
    }

    fn set_caption(&mut self, caption: &str) {
        self.caption.clear();
        self.caption.push_str(caption);
    }
}
