//! Draw waveform images from computed magnitude values.

use image::{Rgba, RgbaImage};

use crate::{
    color::{solid::SolidColor, stripe::AlternateColor, ColorContext, ColorPolicy},
    error::Error,
};

// -------------------------------------------------------------------------------------------------

/// Height of waveform images in pixels, without any scaling applied.
pub const BASE_IMAGE_HEIGHT: u32 = 128;

/// Factor which scales computed values by the image's height.
pub const DEFAULT_AMPLITUDE_SCALE: f32 = 3.00;

/// Clipping compensation: the max value at which the amplitude scale starts to get reduced.
pub const CLIPPING_THRESHOLD: f32 = 0.30;
/// Clipping compensation: for each step of this size at or above the threshold that is below
/// the max value, the amplitude scale is reduced by [`CLIPPING_SCALE_DECREMENT`].
pub const CLIPPING_THRESHOLD_STEP: f32 = 0.05;
/// Clipping compensation: amplitude scale reduction per threshold step.
pub const CLIPPING_SCALE_DECREMENT: f32 = 0.25;
/// Clipping compensation: the amplitude scale never gets reduced below this value.
pub const MIN_AMPLITUDE_SCALE: f32 = 0.50;

// -------------------------------------------------------------------------------------------------

/// Options to control how waveform images are drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageOptions {
    /// By default white: color of the image's background.
    pub background: Rgba<u8>,
    /// By default black: color of the waveform.
    pub foreground: Rgba<u8>,
    /// By default None: when set, this color is alternated with the foreground color to
    /// create a stripe effect in the image. Even values are drawn with the alternate color.
    pub alternate: Option<Rgba<u8>>,
    /// By default 1: number of pixel columns a single value occupies.
    pub scale_x: u32,
    /// By default 1: multiplier for the image's base height of 128 pixels.
    pub scale_y: u32,
    /// By default 1: curvature which gets applied to X-scaled values. Higher values result in
    /// steeper curves, lower values in more "blocky" ones.
    pub sharpness: u32,
    /// By default false: reduce the amplitude scale when the values reach certain thresholds,
    /// to show a more accurate waveform with less clipping.
    pub scale_clipping: bool,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            background: Rgba([255, 255, 255, 255]),
            foreground: Rgba([0, 0, 0, 255]),
            alternate: None,
            scale_x: 1,
            scale_y: 1,
            sharpness: 1,
            scale_clipping: false,
        }
    }
}

impl ImageOptions {
    pub fn colors(
        mut self,
        foreground: Rgba<u8>,
        background: Rgba<u8>,
        alternate: Option<Rgba<u8>>,
    ) -> Self {
        self.foreground = foreground;
        self.background = background;
        self.alternate = alternate;
        self
    }

    pub fn scale(mut self, scale_x: u32, scale_y: u32) -> Self {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self
    }

    pub fn sharpness(mut self, sharpness: u32) -> Self {
        self.sharpness = sharpness;
        self
    }

    pub fn scale_clipping(mut self, enabled: bool) -> Self {
        self.scale_clipping = enabled;
        self
    }

    /// Validate all parameters. Returns Error::ParameterError on errors.
    pub fn validate(&self) -> Result<(), Error> {
        if self.scale_x == 0 {
            return Err(Error::ParameterError(
                "image options 'scale_x' must be > 0".to_string(),
            ));
        }
        if self.scale_y == 0 {
            return Err(Error::ParameterError(
                "image options 'scale_y' must be > 0".to_string(),
            ));
        }
        if self.scale_y.checked_mul(BASE_IMAGE_HEIGHT).is_none() {
            return Err(Error::ParameterError(format!(
                "image options 'scale_y' value '{}' is too large",
                self.scale_y
            )));
        }
        Ok(())
    }

    /// Width and height of an image with the given number of values.
    pub fn image_size(&self, value_count: usize) -> Result<(u32, u32), Error> {
        self.validate()?;
        let width = u32::try_from(value_count)
            .ok()
            .and_then(|count| count.checked_mul(self.scale_x))
            .ok_or_else(|| {
                Error::ParameterError(format!(
                    "image width of {value_count} values with scale {} is too large",
                    self.scale_x
                ))
            })?;
        Ok((width, BASE_IMAGE_HEIGHT * self.scale_y))
    }
}

// -------------------------------------------------------------------------------------------------

/// Calculate the factor which scales values by the image height. With clipping compensation
/// enabled, the factor is reduced for each [`CLIPPING_THRESHOLD_STEP`] the max value exceeds the
/// [`CLIPPING_THRESHOLD`].
pub fn amplitude_scale(values: &[f32], scale_clipping: bool) -> f32 {
    if !scale_clipping {
        return DEFAULT_AMPLITUDE_SCALE;
    }
    let max_value = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0f32, f32::max);
    let max_steps =
        ((DEFAULT_AMPLITUDE_SCALE - MIN_AMPLITUDE_SCALE) / CLIPPING_SCALE_DECREMENT) as usize;
    let steps = (0..max_steps)
        .take_while(|step| CLIPPING_THRESHOLD + *step as f32 * CLIPPING_THRESHOLD_STEP < max_value)
        .count();
    DEFAULT_AMPLITUDE_SCALE - steps as f32 * CLIPPING_SCALE_DECREMENT
}

// -------------------------------------------------------------------------------------------------

/// Draw a waveform image from the given values, using the colors from the given options.
///
/// Without an alternate color, the waveform is drawn in the foreground color only, else even
/// values are drawn in the alternate and odd values in the foreground color.
pub fn draw_image(values: &[f32], options: &ImageOptions) -> Result<RgbaImage, Error> {
    let mut background = SolidColor::new(options.background);
    match options.alternate {
        Some(alternate) => {
            let mut foreground = AlternateColor::new(alternate, Some(options.foreground));
            draw_image_with_colors(values, options, &mut background, &mut foreground)
        }
        None => {
            let mut foreground = SolidColor::new(options.foreground);
            draw_image_with_colors(values, options, &mut background, &mut foreground)
        }
    }
}

/// Draw a waveform image from the given values, using custom background and foreground color
/// policies. The color fields of the given options are ignored.
///
/// The image is `values.len() * scale_x` pixels wide and `128 * scale_y` pixels high. Each
/// value is drawn as a band, centered on the image's horizontal midline. Non-finite or negative
/// values are drawn as empty bands.
pub fn draw_image_with_colors(
    values: &[f32],
    options: &ImageOptions,
    background: &mut dyn ColorPolicy,
    foreground: &mut dyn ColorPolicy,
) -> Result<RgbaImage, Error> {
    let (width, height) = options.image_size(values.len())?;
    let mut image = RgbaImage::new(width, height);
    if values.is_empty() {
        log::debug!("Drawing an empty waveform image");
        return Ok(image);
    }

    background.reset();
    foreground.reset();

    let scale_x = options.scale_x;
    let max_n = values.len() - 1;
    let (max_x, max_y) = (width - 1, height - 1);

    // Fill background
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let n = (x / scale_x) as usize;
        *pixel = background.color_at(&ColorContext::new(n, x, y, max_n, max_x, max_y));
    }

    let amplitude_scale = amplitude_scale(values, options.scale_clipping);
    log::debug!(
        "Drawing waveform image with {width}x{height} pixels and an amplitude scale of {amplitude_scale}"
    );

    // Half of the Y-axis and the peak column of X-scaled values, used for smoothing
    let height_i64 = height as i64;
    let half_height = height_i64 / 2;
    let peak = (scale_x / 2) as i64;
    let sharpness = options.sharpness as i64;

    for (n, value) in values.iter().copied().enumerate() {
        let value = if value.is_finite() && value > 0.0 {
            value
        } else {
            if value.is_nan() {
                log::debug!("Drawing NaN value at index {n} as empty band");
            }
            0.0
        };

        // Scale the value to the image height and draw it symmetrically above and below the
        // center of the image
        let scaled_value = (value as f64 * height as f64 * amplitude_scale as f64).floor() as i64;
        let half_scaled_value = scaled_value / 2;
        let start_y = half_height - half_scaled_value;
        let end_y = start_y + scaled_value;

        let column_x = n as i64 * scale_x as i64;
        for i in 0..scale_x as i64 {
            // Lower X-scaled values on either side of the peak column, so the image
            // appears smooth rather than "blocky"
            let adjust = (i - peak).abs().saturating_mul(sharpness);
            // Move the top half down and the bottom half up to keep both halves symmetrical.
            // Rows which would end up outside of the image are skipped.
            let top_rows = start_y.max(-adjust)
                ..end_y.min(half_height).min(height_i64.saturating_sub(adjust));
            let bottom_rows = start_y.max(half_height).max(adjust)
                ..end_y.min(height_i64.saturating_add(adjust));
            let pixel_x = (column_x + i) as u32;
            for pixel_y in top_rows
                .map(|y| y + adjust)
                .chain(bottom_rows.map(|y| y - adjust))
            {
                let pixel_y = pixel_y as u32;
                let context = ColorContext::new(n, pixel_x, pixel_y, max_n, max_x, max_y);
                image.put_pixel(pixel_x, pixel_y, foreground.color_at(&context));
            }
        }
    }

    Ok(image)
}

// -------------------------------------------------------------------------------------------------
