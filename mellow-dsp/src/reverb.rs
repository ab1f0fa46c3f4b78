//! Schroeder-style reverb
//!
//! Four parallel feedback comb filters feed two series allpass filters,
//! per channel. Channels never interact and every call builds fresh delay
//! lines, so no state survives across buffers.

use crate::SampleBuffer;

/// Comb filter base delay times in milliseconds
const COMB_DELAYS_MS: [f32; 4] = [29.7, 37.1, 41.1, 43.7];

/// Allpass filter delay times in milliseconds
const ALLPASS_DELAYS_MS: [f32; 2] = [5.0, 1.7];

/// Comb feedback at room_size = 0.0
const BASE_FEEDBACK: f32 = 0.75;

/// Additional comb feedback at room_size = 1.0 (range 0.75..0.95)
const FEEDBACK_RANGE: f32 = 0.20;

/// Diffusion coefficient for the allpass stages
const ALLPASS_GAIN: f32 = 0.5;

/// Reverb parameters, all in 0.0 - 1.0
///
/// A pure value object; out-of-range values are clamped before processing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverbParams {
    /// Dry/wet blend: 0.0 = fully dry, 1.0 = fully wet
    pub mix: f32,
    /// Scales comb feedback: larger room, longer decay
    pub room_size: f32,
    /// Attenuates the comb feedback path: 1.0 removes feedback memory
    pub damp: f32,
}

impl Default for ReverbParams {
    fn default() -> Self {
        // The canonical "slowed + reverb" treatment: a subtle tail
        Self {
            mix: 0.05,
            room_size: 0.5,
            damp: 0.3,
        }
    }
}

impl ReverbParams {
    fn clamped(&self) -> Self {
        Self {
            mix: self.mix.clamp(0.0, 1.0),
            room_size: self.room_size.clamp(0.0, 1.0),
            damp: self.damp.clamp(0.0, 1.0),
        }
    }
}

/// Feedback comb filter over an owned circular delay line
struct CombFilter {
    buffer: Vec<f32>,
    index: usize,
}

impl CombFilter {
    fn new(delay_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; delay_samples],
            index: 0,
        }
    }

    /// Read the delayed sample, write input plus attenuated feedback
    fn process(&mut self, input: f32, feedback: f32) -> f32 {
        let output = self.buffer[self.index];
        self.buffer[self.index] = input + output * feedback;
        self.index = (self.index + 1) % self.buffer.len();
        output
    }
}

/// Schroeder allpass filter for diffusing the comb output
struct AllpassFilter {
    buffer: Vec<f32>,
    index: usize,
}

impl AllpassFilter {
    fn new(delay_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; delay_samples],
            index: 0,
        }
    }

    fn process(&mut self, input: f32) -> f32 {
        let buffered = self.buffer[self.index];
        let output = input - buffered;
        self.buffer[self.index] = input + buffered * ALLPASS_GAIN;
        self.index = (self.index + 1) % self.buffer.len();
        output
    }
}

/// Delay time in samples, never below 1 so cursor arithmetic stays safe
fn delay_samples(delay_ms: f32, sample_rate: u32) -> usize {
    ((delay_ms * 0.001 * sample_rate as f32).round() as usize).max(1)
}

/// Run the filter bank over one channel
///
/// Pure function of the channel samples, parameters, and sample rate; safe to
/// call for each channel independently.
fn process_channel(input: &[f32], params: &ReverbParams, sample_rate: u32) -> Vec<f32> {
    // Damping attenuates the feedback path only (not a spectral lowpass)
    let feedback = (BASE_FEEDBACK + params.room_size * FEEDBACK_RANGE) * (1.0 - params.damp);
    let dry = 1.0 - params.mix;
    let wet = params.mix;

    let mut combs: [CombFilter; 4] =
        std::array::from_fn(|i| CombFilter::new(delay_samples(COMB_DELAYS_MS[i], sample_rate)));
    let mut allpasses: [AllpassFilter; 2] = std::array::from_fn(|i| {
        AllpassFilter::new(delay_samples(ALLPASS_DELAYS_MS[i], sample_rate))
    });

    input
        .iter()
        .map(|&x| {
            let comb_sum: f32 = combs.iter_mut().map(|c| c.process(x, feedback)).sum();

            let wet_sample = allpasses
                .iter_mut()
                .fold(comb_sum, |signal, ap| ap.process(signal));

            dry * x + wet * wet_sample
        })
        .collect()
}

/// Apply reverb, producing a new buffer of identical shape
///
/// An invalid input buffer yields an empty buffer that still carries the
/// input's sample rate and channel count.
pub fn reverb(input: &SampleBuffer, params: &ReverbParams) -> SampleBuffer {
    if !input.is_valid() {
        return SampleBuffer::empty_like(input.sample_rate, input.channels);
    }

    let params = params.clamped();
    tracing::debug!(
        frames = input.frame_count(),
        channels = input.channels,
        mix = params.mix,
        room_size = params.room_size,
        damp = params.damp,
        "applying reverb"
    );

    let mut output = SampleBuffer::new(
        input.sample_rate,
        input.channels,
        vec![0.0; input.samples.len()],
    );

    for ch in 0..input.channels {
        let channel_in = input.extract_channel(ch);
        let channel_out = process_channel(&channel_in, &params, input.sample_rate);
        output.write_channel(ch, &channel_out);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine_buffer(sample_rate: u32, channels: u16, frames: usize) -> SampleBuffer {
        let mut samples = Vec::with_capacity(frames * channels as usize);
        for n in 0..frames {
            let t = n as f32 / sample_rate as f32;
            let s = (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5;
            for _ in 0..channels {
                samples.push(s);
            }
        }
        SampleBuffer::new(sample_rate, channels, samples)
    }

    #[test]
    fn test_reverb_preserves_shape() {
        let input = sine_buffer(44100, 2, 4410);
        let output = reverb(&input, &ReverbParams::default());

        assert_eq!(output.sample_rate, input.sample_rate);
        assert_eq!(output.channels, input.channels);
        assert_eq!(output.samples.len(), input.samples.len());
    }

    #[test]
    fn test_reverb_fully_dry_is_identity() {
        let input = sine_buffer(44100, 1, 2000);
        let params = ReverbParams {
            mix: 0.0,
            room_size: 0.8,
            damp: 0.2,
        };
        let output = reverb(&input, &params);

        // mix = 0 blends with weight 1.0 on the dry path
        assert_eq!(output.samples, input.samples);
    }

    #[test]
    fn test_reverb_fully_wet_alters_signal() {
        let input = sine_buffer(44100, 1, 8000);
        let params = ReverbParams {
            mix: 1.0,
            room_size: 0.5,
            damp: 0.0,
        };
        let output = reverb(&input, &params);

        assert_ne!(output.samples, input.samples);
    }

    #[test]
    fn test_reverb_invalid_input_returns_empty_with_shape() {
        let empty = SampleBuffer::empty_like(48000, 2);
        let output = reverb(&empty, &ReverbParams::default());
        assert!(output.samples.is_empty());
        assert_eq!(output.sample_rate, 48000);
        assert_eq!(output.channels, 2);

        let no_channels = SampleBuffer::new(44100, 0, vec![0.1, 0.2]);
        let output = reverb(&no_channels, &ReverbParams::default());
        assert!(output.samples.is_empty());
        assert_eq!(output.channels, 0);
    }

    #[test]
    fn test_reverb_parameters_are_clamped() {
        let input = sine_buffer(44100, 1, 500);
        let over = ReverbParams {
            mix: -2.0,
            room_size: 7.0,
            damp: -1.0,
        };
        let clamped = ReverbParams {
            mix: 0.0,
            room_size: 1.0,
            damp: 0.0,
        };

        assert_eq!(reverb(&input, &over).samples, reverb(&input, &clamped).samples);
    }

    #[test]
    fn test_reverb_channels_are_independent() {
        // Silence on the right channel must stay silent
        let frames = 3000;
        let mono = sine_buffer(44100, 1, frames);
        let mut interleaved = Vec::with_capacity(frames * 2);
        for &s in &mono.samples {
            interleaved.push(s);
            interleaved.push(0.0);
        }
        let stereo = SampleBuffer::new(44100, 2, interleaved);

        let params = ReverbParams {
            mix: 1.0,
            room_size: 0.9,
            damp: 0.0,
        };
        let output = reverb(&stereo, &params);

        let right = output.extract_channel(1);
        assert!(right.iter().all(|&s| s == 0.0));

        // And the left channel matches processing the mono signal alone
        let mono_out = reverb(&mono, &params);
        assert_eq!(output.extract_channel(0), mono_out.samples);
    }

    #[test]
    fn test_delay_length_clamped_to_one() {
        // At 1 Hz every delay time rounds to 0 samples; the clamp must keep
        // the cursor arithmetic alive.
        assert_eq!(delay_samples(1.7, 1), 1);

        let input = SampleBuffer::new(1, 1, vec![0.5, -0.5, 0.25]);
        let output = reverb(&input, &ReverbParams::default());
        assert_eq!(output.samples.len(), 3);
    }

    #[test]
    fn test_delay_length_rounding() {
        // 29.7 ms at 44.1 kHz = 1309.77 samples, rounds to 1310
        assert_eq!(delay_samples(29.7, 44100), 1310);
        assert_eq!(delay_samples(5.0, 44100), 221);
    }

    #[test]
    fn test_reverb_is_deterministic() {
        let input = sine_buffer(44100, 2, 2000);
        let params = ReverbParams::default();
        assert_eq!(reverb(&input, &params), reverb(&input, &params));
    }
}
