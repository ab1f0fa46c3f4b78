//! Interleaved multi-channel sample storage
//!
//! The unit of exchange between the decoder, the effect stages, and the
//! encoder. Samples are frame-major interleaved: `samples[frame * channels + channel]`.

/// A fully decoded block of audio
///
/// A buffer with zero sample rate, zero channels, or no samples is the
/// canonical "invalid/empty" value. Stages detect it on input and return an
/// equally empty buffer (shape metadata carried through) instead of computing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleBuffer {
    /// Samples per second
    pub sample_rate: u32,
    /// Number of interleaved channels
    pub channels: u16,
    /// Frame-major interleaved samples, normalized -1.0 to 1.0
    pub samples: Vec<f32>,
}

impl SampleBuffer {
    /// Create a buffer from interleaved samples
    pub fn new(sample_rate: u32, channels: u16, samples: Vec<f32>) -> Self {
        Self {
            sample_rate,
            channels,
            samples,
        }
    }

    /// Create an empty buffer that still carries shape metadata
    ///
    /// This is the "error as data" value every stage returns for invalid input.
    pub fn empty_like(sample_rate: u32, channels: u16) -> Self {
        Self {
            sample_rate,
            channels,
            samples: Vec::new(),
        }
    }

    /// Number of frames (samples per channel)
    pub fn frame_count(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    /// Duration in seconds, 0.0 for an invalid buffer
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frame_count() as f64 / self.sample_rate as f64
    }

    /// Whether this buffer can be processed
    ///
    /// Requires a positive sample rate, at least one channel, and a non-empty
    /// sample vector whose length is an exact multiple of the channel count.
    pub fn is_valid(&self) -> bool {
        self.sample_rate > 0
            && self.channels > 0
            && !self.samples.is_empty()
            && self.samples.len() % self.channels as usize == 0
    }

    /// Whether the sample rate and channel count match another buffer
    pub fn same_shape(&self, other: &SampleBuffer) -> bool {
        self.sample_rate == other.sample_rate && self.channels == other.channels
    }

    /// Copy one channel into a contiguous vector
    pub fn extract_channel(&self, channel: u16) -> Vec<f32> {
        let channels = self.channels as usize;
        let frames = self.frame_count();
        let ch = channel as usize;

        (0..frames)
            .map(|n| self.samples[n * channels + ch])
            .collect()
    }

    /// Write a contiguous channel back into the interleaved layout
    ///
    /// `channel_samples` must hold exactly `frame_count()` values.
    pub fn write_channel(&mut self, channel: u16, channel_samples: &[f32]) {
        let channels = self.channels as usize;
        let ch = channel as usize;

        for (n, &s) in channel_samples.iter().enumerate() {
            self.samples[n * channels + ch] = s;
        }
    }
}
