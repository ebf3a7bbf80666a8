pub mod cli;
pub mod config;
pub mod error;
pub mod keys;
pub mod phrases;
pub mod recorder;
pub mod runner;
pub mod sanitize;
pub mod session;

pub use cli::Args;
pub use config::{AudioConfig, CaptureConfig};
pub use error::{ConfigError, SessionError, SpawnError};
pub use keys::{CrlfWriter, Key, KeyEvent, KeyEventSource, KeyKind, TerminalKeys};
pub use recorder::{Recorder, RecorderHandle, SoxRecorder};
pub use runner::RunReport;
pub use session::{Phase, Session};
