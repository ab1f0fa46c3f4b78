//! Effect orchestration: reverb, then time-stretch
//!
//! The stages themselves report invalid input as empty shape-carrying
//! buffers; this is the one place that turns such a result into an error and
//! stops before anything reaches an encoder.

use tracing::info;

use crate::{change_speed, reverb, PipelineError, ReverbParams, SampleBuffer};

/// Applies the full slowed + reverb treatment to a decoded buffer
#[derive(Debug, Clone)]
pub struct EffectPipeline {
    params: ReverbParams,
    speed_factor: f32,
}

impl EffectPipeline {
    /// Create a pipeline with the given reverb parameters and speed factor
    pub fn new(params: ReverbParams, speed_factor: f32) -> Self {
        Self {
            params,
            speed_factor,
        }
    }

    /// Run both stages, validating shape invariants between them
    ///
    /// On error no partial result is produced: the caller gets `Err` before
    /// any encoder is involved.
    pub fn process(&self, input: SampleBuffer) -> Result<SampleBuffer, PipelineError> {
        if !input.is_valid() {
            return Err(PipelineError::InvalidInput {
                sample_rate: input.sample_rate,
                channels: input.channels,
                samples: input.samples.len(),
            });
        }

        if !self.speed_factor.is_finite() || self.speed_factor <= 0.0 {
            return Err(PipelineError::InvalidParameter(format!(
                "speed factor must be positive, got {}",
                self.speed_factor
            )));
        }

        info!(
            frames = input.frame_count(),
            channels = input.channels,
            sample_rate = input.sample_rate,
            "processing buffer"
        );

        let reverbed = reverb(&input, &self.params);
        if !reverbed.same_shape(&input) {
            return Err(PipelineError::ShapeMismatch {
                stage: "reverb",
                expected_rate: input.sample_rate,
                expected_channels: input.channels,
                actual_rate: reverbed.sample_rate,
                actual_channels: reverbed.channels,
            });
        }
        // Reverb cannot empty a valid buffer today; this guards future
        // parameter ranges that might.
        if reverbed.samples.is_empty() {
            return Err(PipelineError::EmptyResult { stage: "reverb" });
        }

        let stretched = change_speed(&reverbed, self.speed_factor);
        if stretched.samples.is_empty() {
            // A pathological factor can truncate to zero output frames;
            // that is a failure, not a silently-written empty file.
            return Err(PipelineError::EmptyResult { stage: "time-stretch" });
        }

        info!(
            frames = stretched.frame_count(),
            duration_secs = stretched.duration_secs(),
            "processing complete"
        );

        Ok(stretched)
    }
}
