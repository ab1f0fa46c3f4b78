//! Encode-then-decode integration tests over in-memory WAV data

use std::io::Cursor;

use mellow_codec::{decode_source, DecodeError, WavEncoder};
use mellow_dsp::SampleBuffer;
use symphonia::core::probe::Hint;

/// 2 seconds of a 440 Hz sine at 44.1 kHz, stereo
fn test_signal() -> SampleBuffer {
    let sample_rate = 44100u32;
    let frames = 2 * sample_rate as usize;
    let mut samples = Vec::with_capacity(frames * 2);
    for n in 0..frames {
        let t = n as f32 / sample_rate as f32;
        let s = (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5;
        samples.push(s);
        samples.push(s);
    }
    SampleBuffer::new(sample_rate, 2, samples)
}

fn wav_hint() -> Hint {
    let mut hint = Hint::new();
    hint.with_extension("wav");
    hint
}

#[test]
fn test_round_trip_preserves_shape_and_duration() {
    let signal = test_signal();

    let mut bytes = Vec::new();
    {
        let cursor = Cursor::new(&mut bytes);
        let mut encoder = WavEncoder::new(cursor, signal.sample_rate, signal.channels).unwrap();
        encoder.encode(&signal).unwrap();
        encoder.finalize().unwrap();
    }

    let decoded = decode_source(Box::new(Cursor::new(bytes)), wav_hint()).unwrap();

    assert!(decoded.sample_rate > 0);
    assert!(decoded.channels >= 1);
    assert!(!decoded.samples.is_empty());
    assert_eq!(decoded.sample_rate, 44100);
    assert_eq!(decoded.channels, 2);

    let seconds = decoded.duration_secs();
    assert!(seconds > 0.5, "decoded only {seconds} s");
    assert!(seconds < 3.0, "decoded {seconds} s");
}

#[test]
fn test_round_trip_preserves_samples_within_quantization() {
    let signal = test_signal();

    let mut bytes = Vec::new();
    {
        let cursor = Cursor::new(&mut bytes);
        let mut encoder = WavEncoder::new(cursor, signal.sample_rate, signal.channels).unwrap();
        encoder.encode(&signal).unwrap();
        encoder.finalize().unwrap();
    }

    let decoded = decode_source(Box::new(Cursor::new(bytes)), wav_hint()).unwrap();

    assert_eq!(decoded.samples.len(), signal.samples.len());
    // 16-bit quantization leaves ~1/32767 of error per sample
    for (a, b) in decoded.samples.iter().zip(signal.samples.iter()) {
        assert!((a - b).abs() < 1e-3, "expected {b}, got {a}");
    }
}

#[test]
fn test_truncated_wav_fails_contract() {
    // A valid header with the sample data chopped off decodes to nothing
    let signal = test_signal();

    let mut bytes = Vec::new();
    {
        let cursor = Cursor::new(&mut bytes);
        let mut encoder = WavEncoder::new(cursor, signal.sample_rate, signal.channels).unwrap();
        encoder.encode(&signal).unwrap();
        encoder.finalize().unwrap();
    }
    bytes.truncate(44);

    let result = decode_source(Box::new(Cursor::new(bytes)), wav_hint());
    assert!(matches!(
        result,
        Err(DecodeError::InvalidStream(_)) | Err(DecodeError::Decode(_))
    ));
}
