//! Compute magnitude values from audio sample streams.

use std::{fmt::Debug, ops::Deref, sync::Arc};

use crate::{
    error::Error,
    reducer::{rms, SampleReducer},
    source::{BlockRead, SampleBlockSource},
};

// -------------------------------------------------------------------------------------------------

/// Options to control how magnitude values are computed from an audio stream.
#[derive(Clone)]
pub struct ComputeOptions {
    /// By default 1: number of values which are computed per second of audio.
    pub resolution: u32,
    /// By default [`rms`]: reduces a block of samples into a single value.
    pub reducer: Option<Arc<dyn SampleReducer>>,
}

impl Debug for ComputeOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComputeOptions")
            .field("resolution", &self.resolution)
            .field("reducer", &self.reducer.is_some())
            .finish()
    }
}

impl Default for ComputeOptions {
    fn default() -> Self {
        Self {
            resolution: 1,
            reducer: Some(Arc::new(rms)),
        }
    }
}

impl ComputeOptions {
    pub fn resolution(mut self, resolution: u32) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn reducer<R: SampleReducer + 'static>(mut self, reducer: R) -> Self {
        self.reducer = Some(Arc::new(reducer));
        self
    }

    /// Validate all parameters. Returns Error::ParameterError on errors.
    pub fn validate(&self) -> Result<(), Error> {
        if self.resolution == 0 {
            return Err(Error::ParameterError(
                "compute options 'resolution' must be > 0".to_string(),
            ));
        }
        if self.reducer.is_none() {
            return Err(Error::ParameterError(
                "compute options 'reducer' is not set".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of interleaved samples which are reduced into a single value for a stream with
    /// the given signal specs.
    pub fn block_len(&self, sample_rate: u32, channel_count: usize) -> Result<usize, Error> {
        self.validate()?;
        let block_len = sample_rate as usize * channel_count / self.resolution as usize;
        if block_len == 0 {
            return Err(Error::ParameterError(format!(
                "compute options 'resolution' value '{}' exceeds the stream's sample rate '{}'",
                self.resolution, sample_rate
            )));
        }
        Ok(block_len)
    }
}

// -------------------------------------------------------------------------------------------------

/// Magnitude values, computed from an audio stream, in the stream's temporal order.
///
/// Dereferences to a slice of values, so it can directly be passed to the image drawing
/// functions. Can be reused to draw multiple images with different options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Magnitudes {
    values: Vec<f32>,
    max_value: f32,
}

impl Magnitudes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new value, updating the running maximum value.
    pub fn push(&mut self, value: f32) {
        if value > self.max_value {
            self.max_value = value;
        }
        self.values.push(value);
    }

    /// Largest value in the sequence or 0.0 when empty. `NaN` values are ignored.
    pub fn max_value(&self) -> f32 {
        self.max_value
    }

    /// Access to the raw values.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f32> {
        self.values
    }
}

impl Deref for Magnitudes {
    type Target = [f32];

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}

impl From<Vec<f32>> for Magnitudes {
    fn from(values: Vec<f32>) -> Self {
        let mut magnitudes = Self {
            values: Vec::with_capacity(values.len()),
            max_value: 0.0,
        };
        for value in values {
            magnitudes.push(value);
        }
        magnitudes
    }
}

// -------------------------------------------------------------------------------------------------

/// Read the given sample source until it's exhausted and reduce each block of samples with the
/// configured reducer into a single value.
///
/// Options are validated before the source is read. Decoding errors abort the computation:
/// in this case all values which got computed so far are discarded.
pub fn compute_values<S: SampleBlockSource + ?Sized>(
    source: &mut S,
    options: &ComputeOptions,
) -> Result<Magnitudes, Error> {
    let block_len = options.block_len(source.sample_rate(), source.channel_count())?;
    let reducer = options.reducer.as_ref().ok_or_else(|| {
        Error::ParameterError("compute options 'reducer' is not set".to_string())
    })?;

    log::debug!(
        "Computing {} value(s) per second with a block size of {} samples",
        options.resolution,
        block_len
    );

    let mut magnitudes = Magnitudes::new();
    let mut block = vec![0.0f32; block_len];
    loop {
        match source.read_block(&mut block)? {
            BlockRead::Filled => {
                magnitudes.push(reducer.reduce(&block));
            }
            BlockRead::EndOfStream(len) => {
                // reduce the last, possibly shorter block
                if len > 0 {
                    magnitudes.push(reducer.reduce(&block[..len]));
                }
                break;
            }
        }
    }

    log::debug!(
        "Computed {} value(s) with a max value of {}",
        magnitudes.len(),
        magnitudes.max_value()
    );
    Ok(magnitudes)
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        reducer::peak,
        source::{decoder::tests::sine_wav, decoder::AudioDecoder, BufferSource},
    };

    /// A source which fails after reading a given number of blocks.
    struct FailingSource {
        blocks_left: usize,
    }

    impl SampleBlockSource for FailingSource {
        fn sample_rate(&self) -> u32 {
            10
        }
        fn channel_count(&self) -> usize {
            1
        }
        fn read_block(&mut self, block: &mut [f32]) -> Result<BlockRead, Error> {
            if self.blocks_left == 0 {
                return Err(Error::InvalidData("corrupt frame".to_string()));
            }
            self.blocks_left -= 1;
            block.fill(0.5);
            Ok(BlockRead::Filled)
        }
    }

    /// A source which must never be read.
    struct UnreadableSource;

    impl SampleBlockSource for UnreadableSource {
        fn sample_rate(&self) -> u32 {
            44100
        }
        fn channel_count(&self) -> usize {
            2
        }
        fn read_block(&mut self, _block: &mut [f32]) -> Result<BlockRead, Error> {
            panic!("source should not be read with invalid options");
        }
    }

    #[test]
    fn invalid_options() {
        let mut source = UnreadableSource;
        let options = ComputeOptions::default().resolution(0);
        assert!(matches!(
            compute_values(&mut source, &options),
            Err(Error::ParameterError(_))
        ));
        let options = ComputeOptions {
            reducer: None,
            ..Default::default()
        };
        assert!(matches!(
            compute_values(&mut source, &options),
            Err(Error::ParameterError(_))
        ));
        let options = ComputeOptions::default().resolution(44100 * 2 + 1);
        assert!(matches!(
            compute_values(&mut source, &options),
            Err(Error::ParameterError(_))
        ));
    }

    #[test]
    fn block_values() {
        // 2 channels, 4 Hz: one second is 8 samples
        let buffer = [
            [0.5; 8].as_slice(),
            [-0.25; 8].as_slice(),
            [1.0, -1.0, 1.0].as_slice(),
        ]
        .concat();
        let mut source = BufferSource::new(&buffer, 2, 4);
        let values = compute_values(&mut source, &ComputeOptions::default()).unwrap();
        assert_eq!(values.values(), &[0.5, 0.25, 1.0]);
        assert_eq!(values.max_value(), 1.0);

        // twice the resolution
        let mut source = BufferSource::new(&buffer, 2, 4);
        let options = ComputeOptions::default().resolution(2);
        let values = compute_values(&mut source, &options).unwrap();
        assert_eq!(values.len(), 5);
        assert_eq!(values[4], 1.0);
    }

    #[test]
    fn custom_reducer() {
        let buffer = [0.1, -0.8, 0.2, 0.4];
        let mut source = BufferSource::new(&buffer, 1, 2);
        let options = ComputeOptions::default().reducer(peak);
        let values = compute_values(&mut source, &options).unwrap();
        assert_eq!(values.values(), &[0.8, 0.4]);
    }

    #[test]
    fn empty_stream() {
        let mut source = BufferSource::new(&[], 1, 44100);
        let values = compute_values(&mut source, &ComputeOptions::default()).unwrap();
        assert!(values.is_empty());
        assert_eq!(values.max_value(), 0.0);
    }

    #[test]
    fn decode_errors() {
        let mut source = FailingSource { blocks_left: 3 };
        assert!(matches!(
            compute_values(&mut source, &ComputeOptions::default()),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn decoded_values() {
        let mut decoder = AudioDecoder::from_buffer(sine_wav(44100, 1, 5.0, 0.5)).unwrap();
        let values = compute_values(&mut decoder, &ComputeOptions::default()).unwrap();
        assert_eq!(values.len(), 5);
        // RMS of a sine is its amplitude / sqrt(2)
        for value in values.iter() {
            assert!((value - 0.5 / 2.0f32.sqrt()).abs() < 0.01, "{value}");
        }

        let mut decoder = AudioDecoder::from_buffer(sine_wav(44100, 2, 5.0, 0.5)).unwrap();
        let options = ComputeOptions::default().resolution(10);
        let values = compute_values(&mut decoder, &options).unwrap();
        assert_eq!(values.len(), 50);
    }

    #[test]
    fn magnitudes() {
        let magnitudes = Magnitudes::from(vec![0.2, f32::NAN, 0.7, 0.1]);
        assert_eq!(magnitudes.len(), 4);
        assert_eq!(magnitudes.max_value(), 0.7);
        assert!(magnitudes[1].is_nan());
        assert_eq!(magnitudes.into_values().len(), 4);
    }
}
