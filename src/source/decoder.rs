use std::{fs::File, io, path::Path};

use symphonia::core::{
    audio::SampleBuffer,
    codecs::{Decoder, DecoderOptions},
    errors::Error as SymphoniaError,
    formats::{FormatOptions, FormatReader},
    io::{MediaSource, MediaSourceStream, ReadOnlySource},
    meta::MetadataOptions,
    probe::Hint,
};

use super::{BlockRead, SampleBlockSource};
use crate::error::Error;

// -------------------------------------------------------------------------------------------------

/// Decodes the default track of an audio file or stream into interleaved `f32` sample blocks.
///
/// Supports all formats and codecs which are enabled in symphonia: WAV, AIFF, FLAC, ALAC, OGG,
/// MP3 and raw PCM/ADPCM.
pub struct AudioDecoder {
    track_id: u32, // Internal track index.
    decoder: Box<dyn Decoder>,
    format: Box<dyn FormatReader>,
    sample_rate: u32,
    channel_count: usize,
    total_frames: Option<u64>,
    decoded_frames: u64,
    decode_buffer: Option<SampleBuffer<f32>>,
    decode_buffer_frames: u64,
    decode_buffer_pos: usize,
    finished: bool,
}

impl AudioDecoder {
    /// Create a new decoder from the given file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = File::open(path.as_ref())?;
        let mut hint = Hint::new();
        if let Some(extension) = path.as_ref().extension().and_then(|e| e.to_str()) {
            hint.with_extension(extension);
        }
        Self::from_media_source(Box::new(file), hint)
    }

    /// Create a new decoder from the given encoded buffer.
    pub fn from_buffer(buffer: Vec<u8>) -> Result<Self, Error> {
        Self::from_media_source(Box::new(io::Cursor::new(buffer)), Hint::new())
    }

    /// Create a new decoder from the given, not seekable reader, e.g. stdin.
    pub fn from_reader<R: io::Read + Send + Sync + 'static>(reader: R) -> Result<Self, Error> {
        Self::from_media_source(Box::new(ReadOnlySource::new(reader)), Hint::new())
    }

    fn from_media_source(source: Box<dyn MediaSource>, hint: Hint) -> Result<Self, Error> {
        let source_stream = MediaSourceStream::new(source, Default::default());

        // Use the default options when reading and decoding.
        let format_opts: FormatOptions = Default::default();
        let metadata_opts: MetadataOptions = Default::default();
        let decoder_opts: DecoderOptions = Default::default();

        // Probe the media source stream for a format.
        let probed = symphonia::default::get_probe()
            .format(&hint, source_stream, &format_opts, &metadata_opts)
            .map_err(|err| {
                log::debug!("Audio stream failed to probe: {err}");
                Error::UnsupportedFormat
            })?;

        // Get the format reader yielded by the probe operation.
        let format = probed.format;

        // Get the default track.
        let track = format.default_track().ok_or(Error::UnsupportedFormat)?;
        let track_id = track.id;
        let codec_params = track.codec_params.clone();

        // Create a decoder for the track.
        let decoder = symphonia::default::get_codecs()
            .make(&codec_params, &decoder_opts)
            .map_err(|err| {
                log::debug!("Audio stream has no supported decoder: {err}");
                Error::UnsupportedFormat
            })?;

        let sample_rate = codec_params.sample_rate.ok_or(Error::UnsupportedFormat)?;
        let channel_count = codec_params
            .channels
            .ok_or(Error::UnsupportedFormat)?
            .count();
        if sample_rate == 0 || channel_count == 0 {
            return Err(Error::UnsupportedFormat);
        }
        log::debug!(
            "Opened audio stream with {sample_rate} Hz, {channel_count} channel(s) and {} frames",
            codec_params
                .n_frames
                .map_or("an unknown number of".to_string(), |n| n.to_string())
        );

        Ok(Self {
            track_id,
            decoder,
            format,
            sample_rate,
            channel_count,
            total_frames: codec_params.n_frames,
            decoded_frames: 0,
            decode_buffer: None,
            decode_buffer_frames: 0,
            decode_buffer_pos: 0,
            finished: false,
        })
    }

    /// Total number of sample frames in the stream, if the container provides this info.
    pub fn total_frames(&self) -> Option<u64> {
        self.total_frames
    }

    /// Number of sample frames which got decoded so far.
    pub fn decoded_frames(&self) -> u64 {
        self.decoded_frames
    }

    /// Decode the next packet of the track into our decode buffer. Returns `Ok(false)` when the
    /// stream ended.
    fn decode_next_packet(&mut self) -> Result<bool, Error> {
        loop {
            // Demux an encoded packet from the media format.
            let packet = match self.format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(err)) if err.kind() == io::ErrorKind::UnexpectedEof => {
                    return self.end_of_stream();
                }
                Err(SymphoniaError::ResetRequired) => {
                    log::warn!("Audio stream changed its track layout, stopping to decode");
                    return Ok(false);
                }
                Err(err) => return Err(err.into()),
            };
            // If the packet does not belong to the selected track, skip over it.
            if packet.track_id() != self.track_id {
                continue;
            }
            if packet.buf().is_empty() {
                return self.end_of_stream();
            }
            // Decode the packet into an audio buffer.
            let decoded = match self.decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(SymphoniaError::DecodeError(err)) => {
                    return Err(Error::InvalidData(err.to_string()));
                }
                Err(err) => return Err(err.into()),
            };
            let frames = decoded.frames();
            if frames == 0 {
                continue;
            }
            // (Re)allocate the buffer when the packet does not fit.
            let capacity = decoded.capacity() as u64;
            if self.decode_buffer.is_none() || self.decode_buffer_frames < capacity {
                self.decode_buffer = Some(SampleBuffer::new(capacity, *decoded.spec()));
                self.decode_buffer_frames = capacity;
            }
            if let Some(decode_buffer) = self.decode_buffer.as_mut() {
                // Interleave the samples into the buffer.
                decode_buffer.copy_interleaved_ref(decoded);
            }
            self.decode_buffer_pos = 0;
            self.decoded_frames += frames as u64;
            return Ok(true);
        }
    }

    fn end_of_stream(&self) -> Result<bool, Error> {
        match self.total_frames {
            Some(total_frames) if self.decoded_frames < total_frames => {
                log::warn!(
                    "Audio stream ended after {} of {} frames",
                    self.decoded_frames,
                    total_frames
                );
                Err(Error::UnexpectedEndOfStream)
            }
            _ => Ok(false),
        }
    }
}

impl SampleBlockSource for AudioDecoder {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn channel_count(&self) -> usize {
        self.channel_count
    }

    fn read_block(&mut self, block: &mut [f32]) -> Result<BlockRead, Error> {
        let mut block_pos = 0;
        loop {
            // Copy pending samples from the last decoded packet.
            if let Some(decode_buffer) = &self.decode_buffer {
                let pending = &decode_buffer.samples()[self.decode_buffer_pos..];
                let len = pending.len().min(block.len() - block_pos);
                block[block_pos..block_pos + len].copy_from_slice(&pending[..len]);
                block_pos += len;
                self.decode_buffer_pos += len;
            }
            if block_pos == block.len() {
                return Ok(BlockRead::Filled);
            }
            if self.finished {
                return Ok(BlockRead::EndOfStream(block_pos));
            }
            match self.decode_next_packet() {
                Ok(true) => continue,
                Ok(false) => {
                    self.finished = true;
                    return Ok(BlockRead::EndOfStream(block_pos));
                }
                Err(err) => {
                    self.finished = true;
                    return Err(err);
                }
            }
        }
    }
}

// -------------------------------------------------------------------------------------------------
