use image::Rgba;

use super::{ColorContext, ColorPolicy};
use crate::error::Error;

// -------------------------------------------------------------------------------------------------

/// Draws a checkerboard pattern of two colors with square tiles of a fixed pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckerColor {
    color_a: Rgba<u8>,
    color_b: Rgba<u8>,
    tile_size: u32,
}

impl CheckerColor {
    /// Create a new checkerboard policy. Returns an error when the tile size is zero.
    pub fn new(color_a: Rgba<u8>, color_b: Rgba<u8>, tile_size: u32) -> Result<Self, Error> {
        if tile_size == 0 {
            return Err(Error::ParameterError(
                "checker tile size must be > 0".to_string(),
            ));
        }
        Ok(Self {
            color_a,
            color_b,
            tile_size,
        })
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }
}

impl ColorPolicy for CheckerColor {
    fn color_at(&mut self, context: &ColorContext) -> Rgba<u8> {
        if (context.x / self.tile_size + context.y / self.tile_size) % 2 == 0 {
            self.color_a
        } else {
            self.color_b
        }
    }
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn color_at(policy: &mut CheckerColor, x: u32, y: u32) -> Rgba<u8> {
        policy.color_at(&ColorContext::new(x as usize, x, y, 99, 99, 99))
    }

    #[test]
    fn zero_tile_size() {
        assert!(matches!(
            CheckerColor::new(BLACK, WHITE, 0),
            Err(Error::ParameterError(_))
        ));
    }

    #[test]
    fn tiles() {
        let mut policy = CheckerColor::new(BLACK, WHITE, 10).unwrap();
        assert_eq!(color_at(&mut policy, 0, 0), BLACK);
        assert_eq!(color_at(&mut policy, 9, 9), BLACK);
        assert_eq!(color_at(&mut policy, 10, 0), WHITE);
        assert_eq!(color_at(&mut policy, 0, 10), WHITE);
        assert_eq!(color_at(&mut policy, 10, 10), BLACK);
        assert_eq!(color_at(&mut policy, 25, 5), BLACK);
    }

    #[test]
    fn period_is_twice_tile_size() {
        for (color_b, size) in [(BLACK, 1), (WHITE, 3), (WHITE, 10)] {
            let mut policy = CheckerColor::new(BLACK, color_b, size).unwrap();
            for x in 0..40 {
                for y in 0..40 {
                    let color = color_at(&mut policy, x, y);
                    assert!(color == BLACK || color == color_b);
                    assert_eq!(color_at(&mut policy, x + size, y + size), color);
                    assert_eq!(color_at(&mut policy, x + 2 * size, y), color);
                    assert_eq!(color_at(&mut policy, x, y + 2 * size), color);
                    if color_b != BLACK {
                        assert_ne!(color_at(&mut policy, x + size, y), color);
                        assert_ne!(color_at(&mut policy, x, y + size), color);
                    }
                }
            }
        }
    }
}
