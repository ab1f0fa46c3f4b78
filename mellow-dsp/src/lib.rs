//! DSP core for mellow - the slowed + reverb processor
//!
//! This crate operates on fully decoded, in-memory audio:
//! - SampleBuffer: interleaved multi-channel f32 samples
//! - Reverb: parallel comb / series allpass filter bank, wet/dry blended
//! - Time-stretch: linear-interpolation resampler (speed and pitch change)
//! - EffectPipeline: reverb then stretch, with shape validation between stages

mod buffer;
mod error;
mod pipeline;
mod reverb;
mod stretch;

pub use buffer::SampleBuffer;
pub use error::PipelineError;
pub use pipeline::EffectPipeline;
pub use reverb::{reverb, ReverbParams};
pub use stretch::change_speed;
