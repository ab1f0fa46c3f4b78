//! File I/O collaborators for mellow
//!
//! - Decoder: any Symphonia-supported container/codec to an interleaved
//!   f32 [`mellow_dsp::SampleBuffer`]
//! - Encoder: 16-bit PCM WAV output, locked to a negotiated shape

mod decoder;
mod encoder;

pub use decoder::{decode_file, decode_source, DecodeError};
pub use encoder::{EncodeError, WavEncoder};
