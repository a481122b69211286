//! Software RGB frame buffer
//!
//! Scene coordinates have y growing upward; pixel rows grow downward. A
//! scene point `(x, y)` lands on pixel `(x, height - y)`.

use glam::DVec2;

/// RGB color
pub type Rgb = [u8; 3];

/// Colors for scene elements
pub mod colors {
    use super::Rgb;

    pub const BACKGROUND: Rgb = [255, 255, 255];
    pub const BORDER: Rgb = [0, 0, 0];
    pub const ZONE_DIVIDER: Rgb = [128, 128, 128];
    pub const CANNON: Rgb = [100, 100, 100];
    pub const CANNON_HUB: Rgb = [0, 0, 0];
    pub const BALL: Rgb = [255, 0, 0];
    pub const PLATE: Rgb = [0, 0, 0];
    pub const PLATE_ARM: Rgb = [100, 100, 100];
}

/// A rectangular image, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Frame {
    /// New frame filled with the background color
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![colors::BACKGROUND; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Pixel at (col, row), `None` outside the frame
    pub fn get(&self, col: usize, row: usize) -> Option<Rgb> {
        (col < self.width && row < self.height).then(|| self.pixels[row * self.width + col])
    }

    /// Set a pixel; writes outside the frame are clipped
    pub fn set(&mut self, col: i64, row: i64, color: Rgb) {
        if col < 0 || row < 0 {
            return;
        }
        let (col, row) = (col as usize, row as usize);
        if col < self.width && row < self.height {
            self.pixels[row * self.width + col] = color;
        }
    }

    /// Scene point to fractional pixel coordinates
    #[inline]
    pub fn to_pixel(&self, p: DVec2) -> DVec2 {
        DVec2::new(p.x, self.height as f64 - p.y)
    }

    /// Fractional pixel coordinates back to a scene point
    #[inline]
    pub fn to_scene(&self, px: DVec2) -> DVec2 {
        DVec2::new(px.x, self.height as f64 - px.y)
    }

    /// Copy out a sub-rectangle, clipped to the frame
    pub fn crop(&self, col: usize, row: usize, width: usize, height: usize) -> Frame {
        let col = col.min(self.width);
        let row = row.min(self.height);
        let width = width.min(self.width - col);
        let height = height.min(self.height - row);

        let mut pixels = Vec::with_capacity(width * height);
        for r in row..row + height {
            let start = r * self.width + col;
            pixels.extend_from_slice(&self.pixels[start..start + width]);
        }
        Frame {
            width,
            height,
            pixels,
        }
    }

    /// Count pixels of exactly `color`
    pub fn count(&self, color: Rgb) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }
}
