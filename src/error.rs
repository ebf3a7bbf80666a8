use std::io;

use thiserror::Error;

/// An external program could not be launched.
///
/// Fatal to the current phrase only; the batch keeps going.
#[derive(Debug, Error)]
#[error("failed to launch `{program}`: {source}")]
pub struct SpawnError {
    /// The executable we tried to run (e.g. "rec", "play").
    pub program: String,
    #[source]
    pub source: io::Error,
}

/// Malformed audio parameters. Fatal to the whole run, reported before
/// any recording begins.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unsupported bit depth {0} (expected 8, 16, 24 or 32)")]
    BitDepth(u32),
    #[error("channel count must be at least 1")]
    Channels,
    #[error("sample rate {0} Hz is out of range (4000-192000)")]
    SampleRate(u32),
    #[error("maximum clip duration must be at least 1 second")]
    MaxDuration,
}

/// Everything a single phrase's capture session can fail with.
///
/// A `SessionError` never aborts the batch; the runner reports it and
/// moves on to the next phrase.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Spawn(#[from] SpawnError),
    #[error("key input failed: {0}")]
    Input(io::Error),
    #[error("`{filename}` was already produced by an earlier phrase")]
    FilenameCollision { filename: String },
}
