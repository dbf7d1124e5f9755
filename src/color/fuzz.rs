use image::Rgba;
use rand::{rngs::SmallRng, Rng, SeedableRng};

use super::{ColorContext, ColorPolicy};
use crate::error::Error;

// -------------------------------------------------------------------------------------------------

/// Picks a random color from a palette for every drawn pixel. This creates a "static" or fuzz
/// effect in the resulting waveform image.
///
/// The random number generator is owned by the policy: separate instances can be used from
/// separate threads. Images drawn with this policy are not reproducible unless the policy got
/// created with a seeded generator via [`FuzzColor::with_rng`].
#[derive(Debug, Clone)]
pub struct FuzzColor<R: Rng = SmallRng> {
    palette: Vec<Rgba<u8>>,
    rng: R,
}

impl FuzzColor<SmallRng> {
    /// Create a new fuzz policy with a random generator seeded from the operating system.
    /// Returns an error when the palette is empty.
    pub fn new(palette: Vec<Rgba<u8>>) -> Result<Self, Error> {
        Self::with_rng(palette, SmallRng::from_os_rng())
    }
}

impl<R: Rng> FuzzColor<R> {
    /// Create a new fuzz policy which uses the given random generator.
    /// Returns an error when the palette is empty.
    pub fn with_rng(palette: Vec<Rgba<u8>>, rng: R) -> Result<Self, Error> {
        if palette.is_empty() {
            return Err(Error::ParameterError(
                "fuzz color palette must not be empty".to_string(),
            ));
        }
        Ok(Self { palette, rng })
    }
}

impl<R: Rng> ColorPolicy for FuzzColor<R> {
    fn color_at(&mut self, _context: &ColorContext) -> Rgba<u8> {
        self.palette[self.rng.random_range(0..self.palette.len())]
    }
}

// -------------------------------------------------------------------------------------------------
