//! Per-phrase capture session.
//!
//! One session drives a single phrase from prompt to an accepted (or
//! abandoned) clip: compose the filename, arm, start the external
//! recorder on key-down, stop it on key-up or on its own exit (duration
//! ceiling), optionally play the take back, and loop until the operator
//! keeps it. The controller is single-threaded and event-driven: every
//! loop iteration checks recorder liveness and polls for one key event,
//! so neither a key press nor a self-terminating recorder is missed.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::CaptureConfig;
use crate::error::SessionError;
use crate::keys::{Key, KeyEvent, KeyEventSource, KeyKind};
use crate::recorder::{Recorder, RecorderHandle};
use crate::sanitize;

/// Poll-loop tick. Short enough that a key press and a recorder exit in
/// the same tick are both observed promptly.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Where a session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Created, not yet prompting
    Idle,
    /// Prompt shown, waiting for the start key
    Armed,
    /// External recorder running
    Recording,
    /// Recorder terminated, take on disk
    Stopped,
    /// Playback launched, waiting for keep/retry
    Reviewing,
    /// Terminal: take kept
    Accepted,
    /// Terminal: session abandoned
    Discarded,
}

/// State machine for one phrase's capture session.
///
/// The filename is derived exactly once at construction and is stable
/// across every retry of the phrase. At most one recorder handle is live
/// at any time.
pub struct Session<'a> {
    config: &'a CaptureConfig,
    phrase: String,
    filename: String,
    phase: Phase,
    handle: Option<Box<dyn RecorderHandle>>,
    /// Key source cannot observe releases: a second key-down stops the
    /// take instead of an `Up` event (press-to-start, press-to-stop).
    stop_on_press: bool,
}

impl<'a> Session<'a> {
    pub fn new(phrase: &str, config: &'a CaptureConfig) -> Self {
        let filename = sanitize::filename(phrase, &config.prefix, &config.ext);
        Self {
            config,
            phrase: phrase.to_string(),
            filename,
            phase: Phase::Idle,
            handle: None,
            stop_on_press: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Whether a recorder process handle is currently live.
    pub fn has_live_recorder(&self) -> bool {
        self.handle.is_some()
    }

    /// Terminate the current recorder, if any. Idempotent: with no live
    /// handle this is a no-op, never an error, because a manual stop
    /// routinely races the recorder's own duration ceiling.
    pub fn stop(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.stop();
        }
    }

    /// Show the prompt and start waiting for the operator's start key.
    /// Idle -> Armed; the filename was already fixed at construction.
    pub fn begin(&mut self) {
        self.arm();
    }

    /// Drive the session to a terminal phase. Returns the output filename
    /// on acceptance; any error leaves the session `Discarded`.
    pub fn run(
        &mut self,
        keys: &mut dyn KeyEventSource,
        recorder: &mut dyn Recorder,
    ) -> Result<String, SessionError> {
        self.stop_on_press = !keys.reports_releases();
        self.begin();

        loop {
            let event = match keys.poll() {
                Ok(event) => event,
                Err(e) => {
                    self.stop();
                    self.phase = Phase::Discarded;
                    return Err(SessionError::Input(e));
                }
            };

            if let Err(e) = self.step(event, recorder) {
                self.stop();
                self.phase = Phase::Discarded;
                return Err(e);
            }

            match self.phase {
                Phase::Accepted => {
                    status(&format!("{}\r\n", self.filename));
                    info!("accepted: {}", self.filename);
                    return Ok(self.filename.clone());
                }
                Phase::Discarded => {
                    // No path sets Discarded without an error today, but
                    // treat it as terminal all the same.
                    return Err(SessionError::Input(io::Error::other(
                        "session discarded",
                    )));
                }
                _ => {}
            }

            thread::sleep(POLL_INTERVAL);
        }
    }

    /// One poll-loop iteration: recorder liveness first, then at most one
    /// key event. Exposed for tests, which script events directly.
    pub fn step(
        &mut self,
        event: Option<KeyEvent>,
        recorder: &mut dyn Recorder,
    ) -> Result<(), SessionError> {
        // A recorder that hit its duration ceiling exits on its own; that
        // counts as a stop, same filename, same follow-up.
        if self.phase == Phase::Recording {
            let alive = self.handle.as_mut().map(|h| h.is_running()).unwrap_or(false);
            if !alive {
                info!("recorder exited on its own (duration ceiling)");
                self.finish_take(recorder);
                return Ok(());
            }
        }

        let Some(event) = event else {
            return Ok(());
        };

        match (self.phase, event.kind) {
            (Phase::Armed, KeyKind::Down) => {
                self.start_take(recorder)?;
            }
            (Phase::Recording, KeyKind::Down) => {
                if self.stop_on_press {
                    // No releases from this source: the second press is
                    // the stop key.
                    self.finish_take(recorder);
                }
                // Otherwise a duplicate start: already recording, ignore.
            }
            (Phase::Recording, KeyKind::Up) => {
                self.finish_take(recorder);
            }
            (Phase::Reviewing, KeyKind::Down) => match event.key {
                Key::Char('y') | Key::Char('Y') | Key::Enter => {
                    self.phase = Phase::Accepted;
                }
                Key::Char('n') | Key::Char('N') | Key::Char(' ') => {
                    info!("retake: {}", self.phrase);
                    self.arm();
                }
                _ => {}
            },
            // Stop keys while Idle/Armed, key-ups anywhere else: no-ops.
            _ => {}
        }

        Ok(())
    }

    fn arm(&mut self) {
        self.phase = Phase::Armed;
        let hint = if self.stop_on_press {
            "press a key to record"
        } else {
            "hold a key to record"
        };
        status(&format!("Preparing: \"{}\" -- {}", self.phrase, hint));
    }

    fn start_take(&mut self, recorder: &mut dyn Recorder) -> Result<(), SessionError> {
        let handle = recorder.start(&self.filename, &self.config.audio)?;
        self.handle = Some(handle);
        self.phase = Phase::Recording;
        let hint = if self.stop_on_press {
            "press again to stop"
        } else {
            "release to stop"
        };
        status(&format!("Recording: \"{}\" -- {}", self.phrase, hint));
        Ok(())
    }

    /// Recording -> Stopped, then either straight to Accepted (review
    /// disabled) or into the playback/keep/retry cycle.
    fn finish_take(&mut self, recorder: &mut dyn Recorder) {
        self.stop();
        self.phase = Phase::Stopped;

        if !self.config.review {
            self.phase = Phase::Accepted;
            return;
        }

        // Fire-and-forget playback; review proceeds on key events, not on
        // playback completion. A player that fails to launch still leaves
        // a reviewable take on disk.
        if let Err(e) = recorder.play(&self.filename) {
            warn!("playback unavailable: {}", e);
        }
        self.phase = Phase::Reviewing;
        status(&format!(
            "Sample collected: {} -- keep? [Y/n]",
            self.filename
        ));
    }
}

/// Same-line operator prompt: clear the line, rewrite it in place.
fn status(msg: &str) {
    print!("\r{:79}\r{}", "", msg);
    let _ = io::stdout().flush();
}
