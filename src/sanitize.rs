//! Phrase-to-filename mapping.
//!
//! A phrase doubles as the operator prompt and as the distinguishing part
//! of the output filename. The mapping keeps ASCII alphanumerics and
//! `_`/`-`, turns each space into a `.`, and drops everything else. Two
//! phrases differing only in dropped characters collapse to the same name;
//! the runner detects that collision and fails loudly rather than
//! overwriting (see `runner`).

/// Convert a phrase to its filesystem-safe token.
///
/// Deterministic and total. `.` is kept as-is so that applying the
/// function to its own output returns the output unchanged.
pub fn sanitize(phrase: &str) -> String {
    phrase
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() => Some(c),
            '_' | '-' | '.' => Some(c),
            ' ' => Some('.'),
            _ => None,
        })
        .collect()
}

/// Compose the final output filename: `{prefix}.{token}.{ext}`.
///
/// `filename("hello world", "phrase", "wav")` is `phrase.hello.world.wav`.
pub fn filename(phrase: &str, prefix: &str, ext: &str) -> String {
    format!("{}.{}.{}", prefix, sanitize(phrase), ext)
}
