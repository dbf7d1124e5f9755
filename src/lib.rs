#![doc = include_str!("../README.md")]

// private mods (will be partly re-exported)
mod compute;
mod error;
mod generate;
mod render;

// public, flat re-exports
pub use error::Error;

pub use compute::{compute_values, ComputeOptions, Magnitudes};
pub use generate::{
    waveform_from_buffer, waveform_from_file, waveform_from_reader, waveform_from_source, Options,
};
pub use render::{
    amplitude_scale, draw_image, draw_image_with_colors, ImageOptions, BASE_IMAGE_HEIGHT,
    CLIPPING_SCALE_DECREMENT, CLIPPING_THRESHOLD, CLIPPING_THRESHOLD_STEP,
    DEFAULT_AMPLITUDE_SCALE, MIN_AMPLITUDE_SCALE,
};

// public mods
pub mod color;
pub mod reducer;
pub mod source;

pub mod colors {
    //! Set of built-in color policies.

    pub use super::color::{
        checker::CheckerColor, fuzz::FuzzColor, gradient::GradientColor, solid::SolidColor,
        stripe::AlternateColor, stripe::StripeColor,
    };
}

// re-export the image crate, so users can access the image types without adding a dependency
pub use image;
