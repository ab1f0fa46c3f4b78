//! mellow - turn any track into its slowed + reverb version
//!
//! Decodes an audio file, applies reverb then a time-stretch, and writes the
//! result as 16-bit WAV. Everything happens on a fully decoded in-memory
//! buffer; one file per invocation.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mellow_codec::{decode_file, WavEncoder};
use mellow_dsp::{EffectPipeline, ReverbParams};

#[derive(Parser, Debug)]
#[command(name = "mellow", version, about)]
struct Cli {
    /// Input audio file (anything Symphonia can decode: wav, mp3, flac, ogg, aac)
    input: PathBuf,

    /// Output WAV file
    output: PathBuf,

    /// Reverb wet/dry mix, 0.0 (dry) to 1.0 (wet)
    #[arg(long, default_value_t = 0.05)]
    mix: f32,

    /// Reverb room size, 0.0 to 1.0
    #[arg(long, default_value_t = 0.5)]
    room_size: f32,

    /// Reverb damping, 0.0 to 1.0
    #[arg(long, default_value_t = 0.3)]
    damp: f32,

    /// Speed factor: above 1.0 slows down and lowers pitch
    #[arg(long, default_value_t = 1.15)]
    speed: f32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    info!(path = %cli.input.display(), "decoding");
    let decoded = decode_file(&cli.input)
        .with_context(|| format!("failed to decode {}", cli.input.display()))?;

    let sample_rate = decoded.sample_rate;
    let channels = decoded.channels;
    info!(
        sample_rate,
        channels,
        seconds = decoded.duration_secs(),
        "decoded"
    );

    let params = ReverbParams {
        mix: cli.mix,
        room_size: cli.room_size,
        damp: cli.damp,
    };
    let pipeline = EffectPipeline::new(params, cli.speed);

    let processed = pipeline.process(decoded).context("processing failed")?;

    // The encoder is only created once processing has succeeded, so a failed
    // run never leaves a partial output file behind.
    info!(path = %cli.output.display(), "encoding");
    let mut encoder = WavEncoder::create(&cli.output, sample_rate, channels)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;
    encoder.encode(&processed)?;
    encoder.finalize()?;

    info!(
        seconds = processed.duration_secs(),
        "done"
    );
    Ok(())
}
