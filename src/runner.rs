//! Batch driver: one capture session per phrase, in list order.
//!
//! A phrase that fails (recorder would not spawn, key input broke,
//! filename collision) is reported and skipped; the remaining phrases
//! still run. Failure isolation at phrase granularity is the resilience
//! contract of the whole tool.

use std::collections::HashSet;

use tracing::{error, info};

use crate::config::CaptureConfig;
use crate::error::SessionError;
use crate::keys::KeyEventSource;
use crate::recorder::Recorder;
use crate::sanitize;
use crate::session::Session;

/// What a whole run produced.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Output filenames, in acceptance order
    pub accepted: Vec<String>,
    /// (phrase, error message) for every phrase that did not finish
    pub failed: Vec<(String, String)>,
}

/// Record every phrase in order. Never returns an error for a per-phrase
/// failure; only the report says what happened.
pub fn run(
    phrases: &[String],
    config: &CaptureConfig,
    keys: &mut dyn KeyEventSource,
    recorder: &mut dyn Recorder,
) -> RunReport {
    let mut report = RunReport::default();

    if phrases.is_empty() {
        println!("No phrases to record");
        return report;
    }

    // Sanitizing drops characters, so distinct phrases can collapse to
    // the same filename. Fail loudly on the later phrase instead of
    // silently overwriting the earlier take.
    let mut produced: HashSet<String> = HashSet::new();

    for phrase in phrases {
        let filename = sanitize::filename(phrase, &config.prefix, &config.ext);
        if produced.contains(&filename) {
            let err = SessionError::FilenameCollision {
                filename: filename.clone(),
            };
            error!("skipping \"{}\": {}", phrase, err);
            report.failed.push((phrase.clone(), err.to_string()));
            continue;
        }

        let mut session = Session::new(phrase, config);
        match session.run(keys, recorder) {
            Ok(filename) => {
                produced.insert(filename.clone());
                report.accepted.push(filename);
            }
            Err(e) => {
                error!("phrase \"{}\" abandoned: {}", phrase, e);
                report.failed.push((phrase.clone(), e.to_string()));
            }
        }
    }

    info!(
        "run complete: {} accepted, {} failed",
        report.accepted.len(),
        report.failed.len()
    );

    report
}
