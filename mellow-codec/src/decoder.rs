//! Audio file decoding via Symphonia

use std::path::Path;

use mellow_dsp::SampleBuffer;
use symphonia::core::audio::SampleBuffer as SymphoniaBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSource, MediaSourceStream};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while decoding an input file
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("No audio track found in file")]
    NoAudioTrack,
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Decoded stream violates the buffer contract: {0}")]
    InvalidStream(String),
}

/// Decode an audio file into an interleaved f32 buffer
pub fn decode_file(path: &Path) -> Result<SampleBuffer, DecodeError> {
    let file = std::fs::File::open(path)?;
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    decode_source(Box::new(file), hint)
}

/// Decode a raw media source (file, in-memory cursor, ...)
pub fn decode_source(
    source: Box<dyn MediaSource>,
    hint: Hint,
) -> Result<SampleBuffer, DecodeError> {
    let mss = MediaSourceStream::new(source, Default::default());

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| DecodeError::Decode(e.to_string()))?;

    let mut format = probed.format;

    // First track with a recognized codec
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(DecodeError::NoAudioTrack)?;

    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let sample_rate = codec_params.sample_rate.unwrap_or(0);
    let channels = codec_params
        .channels
        .map(|c| c.count() as u16)
        .unwrap_or(0);

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| DecodeError::Decode(e.to_string()))?;

    let mut samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(_) => break,
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(e) => {
                // Skip corrupt packets, keep whatever decodes
                warn!("skipping undecodable packet: {e}");
                continue;
            }
        };

        let spec = *decoded.spec();
        let duration = decoded.capacity() as u64;

        let mut sample_buf = SymphoniaBuffer::<f32>::new(duration, spec);
        sample_buf.copy_interleaved_ref(decoded);
        samples.extend_from_slice(sample_buf.samples());
    }

    let buffer = SampleBuffer::new(sample_rate, channels, samples);
    validate_contract(&buffer)?;

    debug!(
        sample_rate = buffer.sample_rate,
        channels = buffer.channels,
        frames = buffer.frame_count(),
        "decoded audio stream"
    );

    Ok(buffer)
}

/// The decoder must hand the pipeline a well-formed buffer or fail outright
fn validate_contract(buffer: &SampleBuffer) -> Result<(), DecodeError> {
    if buffer.sample_rate == 0 {
        return Err(DecodeError::InvalidStream("unknown sample rate".into()));
    }
    if buffer.channels == 0 {
        return Err(DecodeError::InvalidStream("no channels".into()));
    }
    if buffer.samples.is_empty() {
        return Err(DecodeError::InvalidStream("no samples decoded".into()));
    }
    if buffer.samples.len() % buffer.channels as usize != 0 {
        return Err(DecodeError::InvalidStream(format!(
            "{} samples do not interleave into {} channels",
            buffer.samples.len(),
            buffer.channels
        )));
    }
    Ok(())
}
