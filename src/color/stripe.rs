use image::Rgba;

use super::{ColorContext, ColorPolicy};
use crate::error::Error;

// -------------------------------------------------------------------------------------------------

/// Rotates through a palette of colors, using the next color for each new computed value.
/// This creates a stripe effect in the resulting waveform image.
#[derive(Debug, Clone)]
pub struct StripeColor {
    palette: Vec<Rgba<u8>>,
    rotation: usize,
    last_n: Option<usize>,
}

impl StripeColor {
    /// Create a new stripe policy. Returns an error when the palette is empty.
    pub fn new(palette: Vec<Rgba<u8>>) -> Result<Self, Error> {
        if palette.is_empty() {
            return Err(Error::ParameterError(
                "stripe color palette must not be empty".to_string(),
            ));
        }
        Ok(Self {
            palette,
            rotation: 0,
            last_n: None,
        })
    }

    /// Move to the next palette color when `n` advanced past the last seen value.
    pub fn advance(&mut self, n: usize) {
        match self.last_n {
            Some(last_n) if n > last_n => {
                self.rotation = (self.rotation + 1) % self.palette.len();
                self.last_n = Some(n);
            }
            Some(last_n) if n < last_n => {
                // a new drawing pass started
                self.reset();
                self.last_n = Some(n);
            }
            Some(_) => (),
            None => self.last_n = Some(n),
        }
    }

    /// The current palette color.
    pub fn color(&self) -> Rgba<u8> {
        self.palette[self.rotation]
    }
}

impl ColorPolicy for StripeColor {
    fn color_at(&mut self, context: &ColorContext) -> Rgba<u8> {
        self.advance(context.n);
        self.color()
    }

    fn reset(&mut self) {
        self.rotation = 0;
        self.last_n = None;
    }
}

// -------------------------------------------------------------------------------------------------

/// Alternates two colors by the parity of the computed value index: even values are drawn with
/// the first, odd values with the second color. Without a second color, only the first one is
/// used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlternateColor {
    even: Rgba<u8>,
    odd: Option<Rgba<u8>>,
}

impl AlternateColor {
    pub fn new(even: Rgba<u8>, odd: Option<Rgba<u8>>) -> Self {
        Self { even, odd }
    }
}

impl ColorPolicy for AlternateColor {
    fn color_at(&mut self, context: &ColorContext) -> Rgba<u8> {
        if context.n % 2 == 0 {
            self.even
        } else {
            self.odd.unwrap_or(self.even)
        }
    }
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const A: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const B: Rgba<u8> = Rgba([0, 255, 0, 255]);
    const C: Rgba<u8> = Rgba([0, 0, 255, 255]);

    fn context(n: usize) -> ColorContext {
        ColorContext::new(n, n as u32, 0, 5, 5, 127)
    }

    #[test]
    fn empty_palette() {
        assert!(matches!(
            StripeColor::new(vec![]),
            Err(Error::ParameterError(_))
        ));
    }

    #[test]
    fn single_color() {
        let mut policy = StripeColor::new(vec![A]).unwrap();
        for n in [0, 1, 1, 2, 5, 3, 7] {
            assert_eq!(policy.color_at(&context(n)), A);
        }
    }

    #[test]
    fn rotation() {
        let mut policy = StripeColor::new(vec![A, B, C]).unwrap();
        let colors = (0..6)
            .map(|n| policy.color_at(&context(n)))
            .collect::<Vec<_>>();
        assert_eq!(colors, vec![A, B, C, A, B, C]);
    }

    #[test]
    fn rotation_ignores_pixel_iterations() {
        let mut policy = StripeColor::new(vec![A, B]).unwrap();
        for n in 0..4 {
            let expected = if n % 2 == 0 { A } else { B };
            for y in 0..8 {
                let context = ColorContext::new(n, n as u32, y, 3, 3, 7);
                assert_eq!(policy.color_at(&context), expected);
            }
        }
    }

    #[test]
    fn rotation_restarts() {
        let mut policy = StripeColor::new(vec![A, B, C]).unwrap();
        for n in 0..4 {
            policy.color_at(&context(n));
        }
        // a new pass, starting at n = 0 again
        assert_eq!(policy.color_at(&context(0)), A);
        assert_eq!(policy.color_at(&context(1)), B);
        // explicit reset
        policy.reset();
        assert_eq!(policy.color_at(&context(0)), A);
    }

    #[test]
    fn alternate() {
        let mut policy = AlternateColor::new(A, Some(B));
        assert_eq!(policy.color_at(&context(0)), A);
        assert_eq!(policy.color_at(&context(1)), B);
        assert_eq!(policy.color_at(&context(4)), A);
        assert_eq!(policy.color_at(&context(5)), B);

        let mut policy = AlternateColor::new(A, None);
        assert_eq!(policy.color_at(&context(0)), A);
        assert_eq!(policy.color_at(&context(1)), A);
    }
}
