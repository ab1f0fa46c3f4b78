//! WAV output via hound
//!
//! The encoder is constructed with a target sample rate and channel count and
//! refuses any buffer whose shape differs - it never resamples silently.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};
use mellow_dsp::SampleBuffer;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while writing the output file
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("buffer shape does not match encoder: expected {expected_rate} Hz / {expected_channels} ch, got {actual_rate} Hz / {actual_channels} ch")]
    ShapeMismatch {
        expected_rate: u32,
        expected_channels: u16,
        actual_rate: u32,
        actual_channels: u16,
    },
    #[error("refusing to encode an empty buffer")]
    EmptyBuffer,
}

impl From<hound::Error> for EncodeError {
    fn from(e: hound::Error) -> Self {
        EncodeError::Io(std::io::Error::other(e))
    }
}

/// 16-bit PCM WAV encoder locked to a negotiated shape
pub struct WavEncoder<W: Write + Seek> {
    writer: WavWriter<W>,
    sample_rate: u32,
    channels: u16,
}

impl WavEncoder<BufWriter<File>> {
    /// Create an encoder writing to a file
    pub fn create(path: &Path, sample_rate: u32, channels: u16) -> Result<Self, EncodeError> {
        let writer = WavWriter::create(path, wav_spec(sample_rate, channels))?;
        Ok(Self {
            writer,
            sample_rate,
            channels,
        })
    }
}

impl<W: Write + Seek> WavEncoder<W> {
    /// Create an encoder over any seekable writer (e.g. an in-memory cursor)
    pub fn new(inner: W, sample_rate: u32, channels: u16) -> Result<Self, EncodeError> {
        let writer = WavWriter::new(inner, wav_spec(sample_rate, channels))?;
        Ok(Self {
            writer,
            sample_rate,
            channels,
        })
    }

    /// Append a buffer's samples to the output
    ///
    /// Fails if the buffer is empty or its shape differs from what the
    /// encoder was constructed with.
    pub fn encode(&mut self, buffer: &SampleBuffer) -> Result<(), EncodeError> {
        if buffer.sample_rate != self.sample_rate || buffer.channels != self.channels {
            return Err(EncodeError::ShapeMismatch {
                expected_rate: self.sample_rate,
                expected_channels: self.channels,
                actual_rate: buffer.sample_rate,
                actual_channels: buffer.channels,
            });
        }
        if buffer.samples.is_empty() {
            return Err(EncodeError::EmptyBuffer);
        }

        for &sample in &buffer.samples {
            self.writer.write_sample(float_to_i16(sample))?;
        }

        debug!(frames = buffer.frame_count(), "encoded buffer");
        Ok(())
    }

    /// Finish the WAV container (writes the final header)
    pub fn finalize(self) -> Result<(), EncodeError> {
        self.writer.finalize()?;
        Ok(())
    }
}

fn wav_spec(sample_rate: u32, channels: u16) -> WavSpec {
    WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Convert float sample to 16-bit integer with clipping
#[inline]
fn float_to_i16(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    (clamped * 32767.0) as i16
}
