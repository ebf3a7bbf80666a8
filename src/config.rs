use anyhow::Result;
use serde::Deserialize;

use crate::error::ConfigError;

/// Audio parameters passed unchanged into every recorder invocation.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Sample bit depth (8, 16, 24 or 32)
    pub bits: u32,
    /// Mono = 1, stereo = 2
    pub channels: u32,
    /// Sampling rate in Hz
    pub rate: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            bits: 16,
            channels: 1,
            rate: 16000,
        }
    }
}

impl AudioConfig {
    /// Reject malformed parameters before any recording begins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.bits, 8 | 16 | 24 | 32) {
            return Err(ConfigError::BitDepth(self.bits));
        }
        if self.channels == 0 {
            return Err(ConfigError::Channels);
        }
        if !(4000..=192_000).contains(&self.rate) {
            return Err(ConfigError::SampleRate(self.rate));
        }
        Ok(())
    }
}

/// Settings for the whole capture run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub audio: AudioConfig,

    /// Output filename prefix ("phrase" -> phrase.hello.world.wav)
    pub prefix: String,

    /// Output filename extension
    pub ext: String,

    /// Recorder executable (SoX)
    pub recorder: String,

    /// Playback executable (SoX)
    pub player: String,

    /// Recording ceiling in seconds, enforced by the recorder invocation
    /// itself so an unattended session cannot run away
    pub max_duration_secs: u64,

    /// Play the clip back and ask keep/retry after each take. When false
    /// every clean take is accepted immediately (single-shot mode).
    pub review: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            audio: AudioConfig::default(),
            prefix: "phrase".to_string(),
            ext: "wav".to_string(),
            recorder: "rec".to_string(),
            player: "play".to_string(),
            max_duration_secs: 120,
            review: true,
        }
    }
}

impl CaptureConfig {
    /// Load defaults from an optional config file. A missing file yields
    /// the built-in defaults; a present but malformed file is an error.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.audio.validate()?;
        if self.max_duration_secs == 0 {
            return Err(ConfigError::MaxDuration);
        }
        Ok(())
    }
}
