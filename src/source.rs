//! Sources of decoded, interleaved audio sample blocks.

pub mod decoder;

use crate::error::Error;

// -------------------------------------------------------------------------------------------------

/// Result of a [`SampleBlockSource::read_block`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRead {
    /// The block got filled completely. More samples may follow.
    Filled,
    /// The stream ended. The given number of samples at the start of the block are valid,
    /// which may be zero.
    EndOfStream(usize),
}

// -------------------------------------------------------------------------------------------------

/// A stream of decoded, normalized and interleaved audio samples, which is read in blocks.
pub trait SampleBlockSource {
    /// Sample rate of the decoded audio stream.
    fn sample_rate(&self) -> u32;
    /// Number of interleaved channels in the decoded audio stream.
    fn channel_count(&self) -> usize;

    /// Fill the given block with the next samples of the stream.
    ///
    /// Once [`BlockRead::EndOfStream`] got returned, the source is exhausted. Decoding failures
    /// are returned as errors and also end the stream.
    fn read_block(&mut self, block: &mut [f32]) -> Result<BlockRead, Error>;
}

// -------------------------------------------------------------------------------------------------

/// A sample block source which reads from an already decoded, interleaved sample buffer.
#[derive(Debug, Clone)]
pub struct BufferSource<'a> {
    buffer: &'a [f32],
    buffer_pos: usize,
    sample_rate: u32,
    channel_count: usize,
}

impl<'a> BufferSource<'a> {
    pub fn new(buffer: &'a [f32], channel_count: usize, sample_rate: u32) -> Self {
        Self {
            buffer,
            buffer_pos: 0,
            sample_rate,
            channel_count,
        }
    }
}

impl SampleBlockSource for BufferSource<'_> {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn channel_count(&self) -> usize {
        self.channel_count
    }

    fn read_block(&mut self, block: &mut [f32]) -> Result<BlockRead, Error> {
        let remaining = &self.buffer[self.buffer_pos..];
        let len = remaining.len().min(block.len());
        block[..len].copy_from_slice(&remaining[..len]);
        self.buffer_pos += len;
        if len < block.len() {
            Ok(BlockRead::EndOfStream(len))
        } else {
            Ok(BlockRead::Filled)
        }
    }
}

// -------------------------------------------------------------------------------------------------
