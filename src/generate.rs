//! One-shot waveform image generation from audio files and streams.
//!
//! When the same audio stream gets drawn multiple times, compute its values once via
//! [`compute_values`] and then draw the images with [`draw_image`] instead.

use std::{io, path::Path};

use image::RgbaImage;

use crate::{
    compute::{compute_values, ComputeOptions},
    error::Error,
    render::{draw_image, ImageOptions},
    source::{decoder::AudioDecoder, SampleBlockSource},
};

// -------------------------------------------------------------------------------------------------

/// Options to customize both, the value computation and drawing of waveform images.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub compute: ComputeOptions,
    pub image: ImageOptions,
}

impl Options {
    pub fn compute(mut self, compute: ComputeOptions) -> Self {
        self.compute = compute;
        self
    }

    pub fn image(mut self, image: ImageOptions) -> Self {
        self.image = image;
        self
    }

    /// Validate all parameters. Returns Error::ParameterError on errors.
    pub fn validate(&self) -> Result<(), Error> {
        self.compute.validate()?;
        self.image.validate()
    }
}

// -------------------------------------------------------------------------------------------------

/// Generate a waveform image from the audio file at the given path.
pub fn waveform_from_file<P: AsRef<Path>>(path: P, options: &Options) -> Result<RgbaImage, Error> {
    options.validate()?;
    log::info!("Generating waveform of file '{}'", path.as_ref().display());
    let mut decoder = AudioDecoder::from_file(path)?;
    waveform_from_source(&mut decoder, options)
}

/// Generate a waveform image from the given encoded audio file buffer.
pub fn waveform_from_buffer(buffer: Vec<u8>, options: &Options) -> Result<RgbaImage, Error> {
    options.validate()?;
    let mut decoder = AudioDecoder::from_buffer(buffer)?;
    waveform_from_source(&mut decoder, options)
}

/// Generate a waveform image from the given encoded audio stream, e.g. stdin.
pub fn waveform_from_reader<R: io::Read + Send + Sync + 'static>(
    reader: R,
    options: &Options,
) -> Result<RgbaImage, Error> {
    options.validate()?;
    let mut decoder = AudioDecoder::from_reader(reader)?;
    waveform_from_source(&mut decoder, options)
}

/// Generate a waveform image from the given decoded sample block source.
pub fn waveform_from_source<S: SampleBlockSource + ?Sized>(
    source: &mut S,
    options: &Options,
) -> Result<RgbaImage, Error> {
    options.validate()?;
    let values = compute_values(source, &options.compute)?;
    draw_image(&values, &options.image)
}

// -------------------------------------------------------------------------------------------------
