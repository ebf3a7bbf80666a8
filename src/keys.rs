//! Discrete key events without a line-buffered terminal.
//!
//! The session controller busy-polls a [`KeyEventSource`]; the terminal
//! implementation puts the tty into raw mode for its lifetime and maps
//! crossterm press/release events onto the small [`KeyEvent`] type the
//! controller understands. Plain raw mode on Unix only ever reports key
//! presses; release events need the kitty keyboard protocol, which is
//! pushed when the terminal supports it. Sources that cannot observe
//! releases say so via [`KeyEventSource::reports_releases`], and the
//! controller falls back to press-to-start/press-to-stop. Tests drive
//! the controller with a scripted source instead.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode as CtKeyCode, KeyEventKind, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};
use tracing::warn;

/// Key identity, reduced to what the session controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    /// Anything else (arrows, function keys, ...)
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Down,
    Up,
}

/// One discrete key transition, produced and consumed once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub kind: KeyKind,
    pub key: Key,
}

impl KeyEvent {
    pub fn down(key: Key) -> Self {
        Self {
            kind: KeyKind::Down,
            key,
        }
    }

    pub fn up(key: Key) -> Self {
        Self {
            kind: KeyKind::Up,
            key,
        }
    }
}

/// A lazy, unbounded sequence of key events, polled non-blockingly.
pub trait KeyEventSource {
    /// Return the next pending event, or `None` when no key activity has
    /// happened since the last poll. Must not block on the operator.
    fn poll(&mut self) -> io::Result<Option<KeyEvent>>;

    /// Whether this source ever delivers `KeyKind::Up` events. A source
    /// that cannot observe releases still satisfies the contract, but
    /// consumers must not wait on an `Up` that will never come.
    fn reports_releases(&self) -> bool {
        true
    }
}

/// Raw-mode terminal key source.
///
/// Raw mode is entered on construction and restored on drop, so prompts
/// stay on one line and key presses arrive unbuffered and un-echoed.
/// Where the terminal supports the kitty keyboard protocol, release
/// events are requested too (and the enhancement is popped on drop).
pub struct TerminalKeys {
    /// Terminal reports release events (kitty protocol active)
    enhanced: bool,
}

impl TerminalKeys {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;

        let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }

        Ok(Self { enhanced })
    }

    fn map_key(code: CtKeyCode) -> Key {
        match code {
            CtKeyCode::Char(c) => Key::Char(c),
            CtKeyCode::Enter => Key::Enter,
            CtKeyCode::Esc => Key::Esc,
            _ => Key::Other,
        }
    }
}

impl KeyEventSource for TerminalKeys {
    fn poll(&mut self) -> io::Result<Option<KeyEvent>> {
        // Zero timeout: report whatever is already pending and return.
        if !event::poll(Duration::ZERO)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => {
                let kind = match key.kind {
                    KeyEventKind::Press => KeyKind::Down,
                    KeyEventKind::Release => KeyKind::Up,
                    // Repeats would read as duplicate starts; skip them.
                    KeyEventKind::Repeat => return Ok(None),
                };
                Ok(Some(KeyEvent {
                    kind,
                    key: Self::map_key(key.code),
                }))
            }
            _ => Ok(None),
        }
    }

    fn reports_releases(&self) -> bool {
        self.enhanced
    }
}

impl Drop for TerminalKeys {
    fn drop(&mut self) {
        if self.enhanced {
            if let Err(e) = execute!(io::stdout(), PopKeyboardEnhancementFlags) {
                warn!("failed to pop keyboard enhancement: {}", e);
            }
        }
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("failed to restore terminal mode: {}", e);
        }
    }
}

/// Log writer for raw mode: raw mode stops translating `\n`, so plain
/// newline-terminated log lines staircase across the screen. This writer
/// turns every `\n` into `\r\n` on the way to stderr.
pub struct CrlfWriter<W: Write>(pub W);

impl<W: Write> Write for CrlfWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for part in buf.split_inclusive(|&b| b == b'\n') {
            match part.split_last() {
                Some((&b'\n', line)) => {
                    self.0.write_all(line)?;
                    self.0.write_all(b"\r\n")?;
                }
                _ => self.0.write_all(part)?,
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}
