/// Destination for rendered pixels.
///
/// Coordinates are window coordinates: the Mandelbrot panel occupies
/// `[0, W)` and the Julia panel `[W, 2W)`. A renderer writes every pixel of
/// one panel, then calls [`present`](Self::present) once.
pub trait PixelSink {
    fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]);

    /// Publish the pixels written since the last call.
    fn present(&mut self);

    /// Replace the status line describing the last rendered panel.
    fn set_caption(&mut self, caption: &str);
}
