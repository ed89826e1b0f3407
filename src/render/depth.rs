/// Value every depth slot starts at. Any finite depth is closer.
pub const DEPTH_CLEAR: f32 = f32::NEG_INFINITY;

/// Per-pixel depth for one render pass. Greater values are closer.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthBuffer {
    depths: Vec<f32>,
    width: u32,
    height: u32,
}

impl DepthBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            depths: vec![DEPTH_CLEAR; width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self) {
        self.depths.fill(DEPTH_CLEAR);
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Stored depth at (x, y), or `None` outside the buffer.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|i| self.depths[i])
    }

    /// Stores `depth` if it is strictly closer than what is there.
    ///
    /// Returns whether the test passed. Out-of-range coordinates always fail.
    #[inline]
    pub fn test_and_set(&mut self, x: i32, y: i32, depth: f32) -> bool {
        match self.index(x, y) {
            Some(i) if depth > self.depths[i] => {
                self.depths[i] = depth;
                true
            }
            _ => false,
        }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.depths
    }
}
