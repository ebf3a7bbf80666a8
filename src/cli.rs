use std::path::PathBuf;

use clap::Parser;

use crate::config::CaptureConfig;

/// Guided audio-sample capture: for each phrase, hold a key to record a
/// short clip, review it, and keep or retake it. One WAV file per
/// accepted phrase, named `{prefix}.{sanitized phrase}.{ext}`, is written
/// to the current directory by the external recorder.
#[derive(Debug, Parser)]
#[command(name = "phraserec", version)]
pub struct Args {
    /// Phrases to record, in order
    #[arg(conflicts_with = "file")]
    pub phrases: Vec<String>,

    /// File containing phrases, one per line
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Number of sample bits
    #[arg(short, long)]
    pub bits: Option<u32>,

    /// Mono=1, stereo=2
    #[arg(short, long)]
    pub channels: Option<u32>,

    /// Sampling rate in Hz
    #[arg(short, long)]
    pub rate: Option<u32>,

    /// Record the built-in test phrases
    #[arg(short, long)]
    pub unit: bool,

    /// Accept every take immediately instead of playing it back for
    /// keep/retry review
    #[arg(long)]
    pub no_review: bool,

    /// Output filename prefix
    #[arg(long)]
    pub prefix: Option<String>,

    /// Output filename extension
    #[arg(long)]
    pub ext: Option<String>,

    /// Optional config file with defaults (toml/yaml/json)
    #[arg(long, default_value = "phraserec")]
    pub config: String,
}

impl Args {
    /// Layer CLI overrides on top of the (file-or-default) config.
    pub fn apply_to(&self, config: &mut CaptureConfig) {
        if let Some(bits) = self.bits {
            config.audio.bits = bits;
        }
        if let Some(channels) = self.channels {
            config.audio.channels = channels;
        }
        if let Some(rate) = self.rate {
            config.audio.rate = rate;
        }
        if let Some(prefix) = &self.prefix {
            config.prefix = prefix.clone();
        }
        if let Some(ext) = &self.ext {
            config.ext = ext.clone();
        }
        if self.no_review {
            config.review = false;
        }
    }
}
