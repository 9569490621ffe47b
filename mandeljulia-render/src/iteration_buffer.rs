use mandeljulia_core::IterationResult;

/// Per-pixel iteration results for one panel, row-major.
///
/// This is the raw renderer output before coloring, so a panel can be
/// recolored without iterating again.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationBuffer {
    pub width: u32,
    pub height: u32,
    pub max_iterations: u32,
    pub data: Vec<IterationResult>,
}

impl IterationBuffer {
    pub fn new(width: u32, height: u32, max_iterations: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            max_iterations,
            data: vec![IterationResult::interior(max_iterations); size],
        }
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> IterationResult {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Number of pixels that never escaped.
    pub fn interior_count(&self) -> usize {
        self.data.iter().filter(|r| !r.escaped).count()
    }
}
