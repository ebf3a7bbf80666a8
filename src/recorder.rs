//! External recorder/player process lifecycle.
//!
//! The core never writes audio bytes itself: SoX's `rec` owns the output
//! file while recording, and `play` handles review playback. This module
//! owns spawning those processes, signal-terminating the recorder, and
//! polling its liveness so the controller can notice when the duration
//! ceiling stopped a take on its own.

use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::{AudioConfig, CaptureConfig};
use crate::error::SpawnError;

/// How long to give the recorder to finalize its WAV header after
/// SIGTERM before falling back to a hard kill.
const TERM_GRACE: Duration = Duration::from_millis(100);

/// A handle to one running recorder invocation.
pub trait RecorderHandle {
    /// Non-blocking liveness check. A recorder that hit its duration
    /// ceiling exits on its own and starts reporting `false` here.
    fn is_running(&mut self) -> bool;

    /// Terminate the recording. Idempotent: stopping an already-exited
    /// or already-stopped recorder is a no-op, since a manual stop key
    /// routinely races the duration ceiling.
    fn stop(&mut self);
}

/// Launches recorder and playback processes.
pub trait Recorder {
    /// Spawn a recording of `filename` with the given audio parameters.
    /// The duration ceiling is passed to the invocation itself, never
    /// polled by the caller.
    fn start(
        &mut self,
        filename: &str,
        audio: &AudioConfig,
    ) -> Result<Box<dyn RecorderHandle>, SpawnError>;

    /// Spawn playback of `filename`, fire-and-forget. The caller does not
    /// wait for playback to finish; review proceeds on key events.
    fn play(&mut self, filename: &str) -> Result<(), SpawnError>;
}

/// SoX-backed recorder: `rec -q -b B -c C -r R FILE trim 0 SECS` and
/// `play -q FILE`.
pub struct SoxRecorder {
    recorder: String,
    player: String,
    max_duration_secs: u64,
}

impl SoxRecorder {
    pub fn new(config: &CaptureConfig) -> Self {
        Self {
            recorder: config.recorder.clone(),
            player: config.player.clone(),
            max_duration_secs: config.max_duration_secs,
        }
    }
}

impl Recorder for SoxRecorder {
    fn start(
        &mut self,
        filename: &str,
        audio: &AudioConfig,
    ) -> Result<Box<dyn RecorderHandle>, SpawnError> {
        let child = Command::new(&self.recorder)
            .arg("-q")
            .args(["-b", &audio.bits.to_string()])
            .args(["-c", &audio.channels.to_string()])
            .args(["-r", &audio.rate.to_string()])
            .arg(filename)
            // trim caps the take so an unattended session cannot run away
            .args(["trim", "0", &self.max_duration_secs.to_string()])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SpawnError {
                program: self.recorder.clone(),
                source,
            })?;

        debug!("recorder pid {} -> {}", child.id(), filename);
        Ok(Box::new(SoxHandle { child: Some(child) }))
    }

    fn play(&mut self, filename: &str) -> Result<(), SpawnError> {
        let child = Command::new(&self.player)
            .arg("-q")
            .arg(filename)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SpawnError {
                program: self.player.clone(),
                source,
            })?;

        debug!("player pid {} <- {}", child.id(), filename);
        Ok(())
    }
}

struct SoxHandle {
    child: Option<Child>,
}

impl RecorderHandle for SoxHandle {
    fn is_running(&mut self) -> bool {
        match self.child.as_mut() {
            Some(child) => match child.try_wait() {
                Ok(None) => true,
                Ok(Some(_)) => false,
                Err(e) => {
                    warn!("recorder liveness check failed: {}", e);
                    false
                }
            },
            None => false,
        }
    }

    fn stop(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };

        // SIGTERM first so sox can flush and close the WAV file.
        #[cfg(unix)]
        {
            let _ = Command::new("kill")
                .args(["-TERM", &child.id().to_string()])
                .output();
            thread::sleep(TERM_GRACE);
        }
        let _ = child.kill();
        let _ = child.wait();
    }
}

impl Drop for SoxHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
