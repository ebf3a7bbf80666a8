//! Phrase-source loading: inline CLI arguments or a newline-delimited
//! phrase file, plus the fixed set used by `--unit`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Phrases for the built-in self-exercise mode.
pub const UNIT_PHRASES: &[&str] = &["hello world", "klatu barada nikto", "fubar"];

/// Read one phrase per line, trimmed; blank lines are skipped.
pub fn load_file(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read phrase file {}", path.display()))?;

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
