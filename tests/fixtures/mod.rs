#![allow(dead_code)]

// Shared fakes for driving the session controller without a terminal or
// a real SoX install.

use std::collections::{HashSet, VecDeque};
use std::io;
use std::sync::{Arc, Mutex};

use phraserec::{AudioConfig, Key, KeyEvent, KeyEventSource, Recorder, RecorderHandle, SpawnError};

/// Key source that replays a fixed script. `None` entries are idle polls
/// (no key activity that tick); an exhausted script polls as idle forever.
pub struct ScriptedKeys {
    events: VecDeque<Option<KeyEvent>>,
    releases: bool,
}

impl ScriptedKeys {
    pub fn new(events: Vec<Option<KeyEvent>>) -> Self {
        Self {
            events: events.into(),
            releases: true,
        }
    }

    /// A source that never delivers key-up events, like a terminal
    /// without the kitty keyboard protocol.
    pub fn without_releases(events: Vec<Option<KeyEvent>>) -> Self {
        Self {
            events: events.into(),
            releases: false,
        }
    }
}

impl KeyEventSource for ScriptedKeys {
    fn poll(&mut self) -> io::Result<Option<KeyEvent>> {
        Ok(self.events.pop_front().flatten())
    }

    fn reports_releases(&self) -> bool {
        self.releases
    }
}

pub fn down(c: char) -> Option<KeyEvent> {
    Some(KeyEvent::down(Key::Char(c)))
}

pub fn up(c: char) -> Option<KeyEvent> {
    Some(KeyEvent::up(Key::Char(c)))
}

/// Everything the fake recorder was asked to do.
#[derive(Debug, Default)]
pub struct RecorderLog {
    pub starts: Vec<String>,
    pub plays: Vec<String>,
    pub stops: usize,
}

/// In-memory stand-in for the SoX processes.
pub struct FakeRecorder {
    pub log: Arc<Mutex<RecorderLog>>,
    /// Filenames whose start fails with a SpawnError
    pub fail_filenames: HashSet<String>,
    /// Handles report the process dead after this many liveness polls
    /// (None = runs until stopped), emulating the duration ceiling.
    pub dies_after_polls: Option<usize>,
}

impl FakeRecorder {
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(RecorderLog::default())),
            fail_filenames: HashSet::new(),
            dies_after_polls: None,
        }
    }

    pub fn failing_on(filename: &str) -> Self {
        let mut recorder = Self::new();
        recorder.fail_filenames.insert(filename.to_string());
        recorder
    }
}

impl Recorder for FakeRecorder {
    fn start(
        &mut self,
        filename: &str,
        _audio: &AudioConfig,
    ) -> Result<Box<dyn RecorderHandle>, SpawnError> {
        if self.fail_filenames.contains(filename) {
            return Err(SpawnError {
                program: "rec".to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "rec not found"),
            });
        }
        self.log.lock().unwrap().starts.push(filename.to_string());
        Ok(Box::new(FakeHandle {
            log: Arc::clone(&self.log),
            polls_left: self.dies_after_polls,
            stopped: false,
        }))
    }

    fn play(&mut self, filename: &str) -> Result<(), SpawnError> {
        self.log.lock().unwrap().plays.push(filename.to_string());
        Ok(())
    }
}

pub struct FakeHandle {
    log: Arc<Mutex<RecorderLog>>,
    polls_left: Option<usize>,
    stopped: bool,
}

impl RecorderHandle for FakeHandle {
    fn is_running(&mut self) -> bool {
        if self.stopped {
            return false;
        }
        match &mut self.polls_left {
            Some(0) => false,
            Some(n) => {
                *n -= 1;
                true
            }
            None => true,
        }
    }

    fn stop(&mut self) {
        if !self.stopped {
            self.stopped = true;
            self.log.lock().unwrap().stops += 1;
        }
    }
}
