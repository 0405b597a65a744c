// src/core/classifier.rs

//! Fallback classification for statements the SQL parser rejects.
//!
//! Certain statement shapes that real client libraries emit during their
//! handshake are not modeled by the parser, yet must not surface as syntax
//! errors. When parsing fails, the dispatcher runs the raw failing text
//! through an ordered rule list; the first matching rule decides the outcome.

use crate::core::admin::{self, KillParse};
use once_cell::sync::Lazy;
use regex::Regex;

/// A statement consisting solely of a bracketed comment, e.g. `/* ping */`.
static COMMENT_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/\*.+?\*/$").expect("comment-only regex must compile"));

/// A `SET ... COLLATE ...` character-set statement, the common
/// `SET NAMES 'utf8' COLLATE 'utf8_unicode_ci'` handshake shape.
static SET_COLLATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^set.*collate").expect("set-collate regex must compile"));

/// The decision the fallback rules reach for a parser-rejected statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackOutcome {
    /// A protocol-compatibility no-op: respond with an empty success result.
    EmptySuccess,
    /// The text is an administrative kill command (possibly malformed).
    Kill(KillParse),
    /// No rule matched; the original parse error stands.
    NoMatch,
}

/// Runs the ordered fallback rules over raw statement text. Only called
/// after the parser has rejected the text; the rules judge intent from the
/// text itself, never from the parse error.
pub fn classify(text: &str) -> FallbackOutcome {
    let trimmed = text.trim();
    if COMMENT_ONLY.is_match(trimmed) {
        return FallbackOutcome::EmptySuccess;
    }
    if SET_COLLATE.is_match(trimmed) {
        return FallbackOutcome::EmptySuccess;
    }
    match admin::parse_kill(trimmed) {
        KillParse::NotKill => FallbackOutcome::NoMatch,
        parse => FallbackOutcome::Kill(parse),
    }
}
