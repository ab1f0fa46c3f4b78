//! Error taxonomy for the effect pipeline

use thiserror::Error;

/// Errors surfaced by [`crate::EffectPipeline`]
///
/// The effect stages themselves never fail; they map invalid input to an
/// empty, shape-carrying buffer. The pipeline is the single place where an
/// empty or mismatched intermediate result becomes a user-visible error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// Input buffer has a non-positive sample rate, no channels, or no samples
    #[error("invalid input buffer: {sample_rate} Hz, {channels} channel(s), {samples} sample(s)")]
    InvalidInput {
        sample_rate: u32,
        channels: u16,
        samples: usize,
    },

    /// A processing parameter is out of its legal range
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A stage produced a buffer whose shape differs from what was negotiated
    #[error("shape mismatch after {stage}: expected {expected_rate} Hz / {expected_channels} ch, got {actual_rate} Hz / {actual_channels} ch")]
    ShapeMismatch {
        stage: &'static str,
        expected_rate: u32,
        expected_channels: u16,
        actual_rate: u32,
        actual_channels: u16,
    },

    /// A stage produced zero output frames from non-empty input
    #[error("{stage} produced an empty buffer")]
    EmptyResult { stage: &'static str },
}
