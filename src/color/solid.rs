use image::Rgba;

use super::{ColorContext, ColorPolicy};

// -------------------------------------------------------------------------------------------------

/// Draws all pixels with a single color. The default foreground and background policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolidColor {
    color: Rgba<u8>,
}

impl SolidColor {
    pub fn new(color: Rgba<u8>) -> Self {
        Self { color }
    }

    pub fn color(&self) -> Rgba<u8> {
        self.color
    }
}

impl ColorPolicy for SolidColor {
    fn color_at(&mut self, _context: &ColorContext) -> Rgba<u8> {
        self.color
    }
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid() {
        let color = Rgba([12, 34, 56, 255]);
        let mut policy = SolidColor::new(color);
        for n in 0..16 {
            for (x, y) in [(0, 0), (3, 127), (n as u32, 64)] {
                let context = ColorContext::new(n, x, y, 15, 15, 127);
                assert_eq!(policy.color_at(&context), color);
            }
        }
    }
}
