//! Color policies, which define the colors of a waveform image's pixels.

pub mod checker;
pub mod fuzz;
pub mod gradient;
pub mod solid;
pub mod stripe;

use image::Rgba;

use crate::error::Error;

// -------------------------------------------------------------------------------------------------

/// Position of a single pixel draw operation within a waveform image, passed to [`ColorPolicy`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorContext {
    /// Index of the computed value which is drawn.
    pub n: usize,
    /// Pixel X coordinate.
    pub x: u32,
    /// Pixel Y coordinate.
    pub y: u32,
    /// Index of the last computed value in the drawn sequence.
    pub max_n: usize,
    /// Last valid pixel X coordinate of the image.
    pub max_x: u32,
    /// Last valid pixel Y coordinate of the image.
    pub max_y: u32,
}

impl ColorContext {
    pub fn new(n: usize, x: u32, y: u32, max_n: usize, max_x: u32, max_y: u32) -> Self {
        Self {
            n,
            x,
            y,
            max_n,
            max_x,
            max_y,
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// Selects the color of a pixel in a waveform image.
///
/// A policy gets invoked for each pixel that is drawn. Many pixels share the same computed value
/// index `n`, so stateful policies must track their state by `n` and not by pixel coordinates.
///
/// Any `FnMut(ColorContext) -> Rgba<u8>` closure is a color policy too.
pub trait ColorPolicy {
    /// Color of the pixel at the given context.
    fn color_at(&mut self, context: &ColorContext) -> Rgba<u8>;

    /// Reset internal state before a new image is drawn. Stateless policies do nothing here.
    fn reset(&mut self) {}
}

impl<F> ColorPolicy for F
where
    F: FnMut(ColorContext) -> Rgba<u8>,
{
    fn color_at(&mut self, context: &ColorContext) -> Rgba<u8> {
        self(*context)
    }
}

// -------------------------------------------------------------------------------------------------

/// Names of all built-in foreground color policies.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
)]
#[strum(serialize_all = "lowercase")]
pub enum ColorFunction {
    /// Foreground color only.
    #[default]
    Solid,
    /// Foreground and alternate color, changing with every computed value.
    Stripe,
    /// Randomly picks foreground or alternate color for every pixel.
    Fuzz,
    /// Gradient from foreground to alternate color.
    Gradient,
    /// Checkerboard pattern of foreground and alternate color.
    Checker,
}

impl ColorFunction {
    /// Tile size of [`ColorFunction::Checker`] policies.
    pub const CHECKER_TILE_SIZE: u32 = 10;

    /// Create a new foreground color policy of this kind from the given foreground and optional
    /// alternate color. When no alternate color is set, the foreground color is used instead.
    pub fn create(
        &self,
        foreground: Rgba<u8>,
        alternate: Option<Rgba<u8>>,
    ) -> Result<Box<dyn ColorPolicy>, Error> {
        let alternate = alternate.unwrap_or(foreground);
        let policy: Box<dyn ColorPolicy> = match self {
            Self::Solid => Box::new(solid::SolidColor::new(foreground)),
            Self::Stripe => Box::new(stripe::StripeColor::new(vec![foreground, alternate])?),
            Self::Fuzz => Box::new(fuzz::FuzzColor::new(vec![foreground, alternate])?),
            Self::Gradient => Box::new(gradient::GradientColor::new(foreground, alternate)),
            Self::Checker => Box::new(checker::CheckerColor::new(
                foreground,
                alternate,
                Self::CHECKER_TILE_SIZE,
            )?),
        };
        Ok(policy)
    }
}

// -------------------------------------------------------------------------------------------------

/// Parse a hex color string in the form `#rrggbb` or `#rgb` into an opaque color.
/// The leading `#` is optional.
pub fn parse_hex_color(string: &str) -> Result<Rgba<u8>, Error> {
    let invalid_color =
        || Error::ParameterError(format!("'{string}' is not a valid hex color value"));

    let hex = string.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid_color());
    }
    let hex = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => hex.to_string(),
        _ => return Err(invalid_color()),
    };
    let rgb = u32::from_str_radix(&hex, 16).map_err(|_| invalid_color())?;
    Ok(Rgba([
        (rgb >> 16) as u8,
        ((rgb >> 8) & 0xFF) as u8,
        (rgb & 0xFF) as u8,
        0xFF,
    ]))
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::VariantNames;

    use super::*;

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#000000").unwrap(), BLACK);
        assert_eq!(parse_hex_color("#FFFFFF").unwrap(), WHITE);
        assert_eq!(parse_hex_color("fff").unwrap(), WHITE);
        assert_eq!(parse_hex_color("#1a2B3c").unwrap(), Rgba([0x1a, 0x2b, 0x3c, 255]));
        assert_eq!(parse_hex_color("#abc").unwrap(), Rgba([0xaa, 0xbb, 0xcc, 255]));
        for invalid in ["", "#", "#12345", "#1234567", "#ggg", "+12345", "#-12345"] {
            assert!(
                matches!(parse_hex_color(invalid), Err(Error::ParameterError(_))),
                "'{invalid}' should not parse"
            );
        }
    }

    #[test]
    fn closure_policies() {
        let mut policy = |context: ColorContext| if context.n % 2 == 0 { BLACK } else { WHITE };
        let policy: &mut dyn ColorPolicy = &mut policy;
        assert_eq!(policy.color_at(&ColorContext::new(0, 0, 0, 1, 0, 0)), BLACK);
        assert_eq!(policy.color_at(&ColorContext::new(1, 0, 0, 1, 0, 0)), WHITE);
    }

    #[test]
    fn color_functions() {
        assert_eq!(
            ColorFunction::VARIANTS,
            &["solid", "stripe", "fuzz", "gradient", "checker"]
        );
        assert_eq!(ColorFunction::from_str("stripe").unwrap(), ColorFunction::Stripe);
        assert_eq!(ColorFunction::Gradient.to_string(), "gradient");
        assert!(ColorFunction::from_str("plaid").is_err());

        let context = ColorContext::new(1, 0, 0, 4, 0, 0);
        for name in ColorFunction::VARIANTS {
            let function = ColorFunction::from_str(name).unwrap();
            // without alternate color, all policies draw the foreground color only
            let mut policy = function.create(BLACK, None).unwrap();
            assert_eq!(policy.color_at(&context), BLACK, "{function}");
        }
    }
}
