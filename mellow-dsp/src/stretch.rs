//! Time-stretch by linear-interpolation resampling
//!
//! Changes duration and pitch together, like slowing a record down. A factor
//! above 1.0 stretches (slower, lower); below 1.0 compresses (faster,
//! higher). Single-order interpolation, no anti-aliasing filter: compressing
//! can alias high frequencies, which is accepted for this effect.

use crate::SampleBuffer;

/// Resample a buffer to `floor(frame_count * speed_factor)` frames
///
/// Sample rate and channel count are unchanged. A non-positive or non-finite
/// factor, or an invalid input buffer, yields an empty buffer carrying the
/// input's shape metadata.
pub fn change_speed(input: &SampleBuffer, speed_factor: f32) -> SampleBuffer {
    if !speed_factor.is_finite() || speed_factor <= 0.0 || !input.is_valid() {
        return SampleBuffer::empty_like(input.sample_rate, input.channels);
    }

    let channels = input.channels as usize;
    let in_frames = input.frame_count();
    let out_frames = (in_frames as f64 * speed_factor as f64) as usize;

    tracing::debug!(in_frames, out_frames, speed_factor, "time-stretching");

    let mut samples = vec![0.0f32; out_frames * channels];

    for n in 0..out_frames {
        let position = n as f32 / speed_factor;

        let mut i0 = position as usize;
        let mut frac = position - i0 as f32;

        // Hold the last frame instead of reading past the end
        if i0 >= in_frames - 1 {
            i0 = in_frames - 1;
            frac = 0.0;
        }
        let i1 = if i0 + 1 < in_frames { i0 + 1 } else { i0 };

        for ch in 0..channels {
            let s0 = input.samples[i0 * channels + ch];
            let s1 = input.samples[i1 * channels + ch];
            samples[n * channels + ch] = s0 + (s1 - s0) * frac;
        }
    }

    SampleBuffer::new(input.sample_rate, input.channels, samples)
}
