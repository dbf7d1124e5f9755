use image::Rgba;

use super::{ColorContext, ColorPolicy};

// -------------------------------------------------------------------------------------------------

/// Draws a linear color gradient from a start to an end color along the computed values.
///
/// The first computed value is drawn with exactly the start color and the last one with exactly
/// the end color. The color only changes when a new computed value is entered, so all pixels of
/// a single computed value share the same color.
#[derive(Debug, Clone)]
pub struct GradientColor {
    start: Rgba<u8>,
    end: Rgba<u8>,
    current: Rgba<u8>,
    last_n: Option<usize>,
}

impl GradientColor {
    pub fn new(start: Rgba<u8>, end: Rgba<u8>) -> Self {
        Self {
            start,
            end,
            current: start,
            last_n: None,
        }
    }

    /// Update the current color for the given computed value index and range.
    pub fn advance(&mut self, n: usize, max_n: usize) {
        if self.last_n == Some(n) {
            return;
        }
        self.last_n = Some(n);
        self.current = if n == 0 || max_n == 0 {
            self.start
        } else if n >= max_n {
            self.end
        } else {
            Self::interpolate(self.start, self.end, n as f32 / max_n as f32)
        };
    }

    /// The current gradient color.
    pub fn color(&self) -> Rgba<u8> {
        self.current
    }

    fn interpolate(start: Rgba<u8>, end: Rgba<u8>, amount: f32) -> Rgba<u8> {
        let mut color = start;
        for ((c, s), e) in color.0.iter_mut().zip(start.0).zip(end.0) {
            let (s, e) = (s as f32, e as f32);
            *c = (s + (e - s) * amount).round().clamp(s.min(e), s.max(e)) as u8;
        }
        color
    }
}

impl ColorPolicy for GradientColor {
    fn color_at(&mut self, context: &ColorContext) -> Rgba<u8> {
        self.advance(context.n, context.max_n);
        self.color()
    }

    fn reset(&mut self) {
        self.current = self.start;
        self.last_n = None;
    }
}

// -------------------------------------------------------------------------------------------------
