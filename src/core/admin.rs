// src/core/admin.rs

//! The administrative KILL command: recognizing it in raw statement text and
//! terminating the targeted session.
//!
//! KILL arrives inline as ordinary statement text the SQL parser rejects, so
//! recognition is grammar-light: normalize, split on whitespace, and look for
//! the `kill` token. A kill-shaped command with a bad identifier must be
//! reported as malformed rather than falling through to a generic syntax
//! error.

use crate::core::registry::ConnectionRegistry;
use crate::core::resultset::ResultSet;
use crate::core::HubError;
use tracing::info;

/// The outcome of scanning statement text for the kill grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KillParse {
    /// No `kill` token present; the caller continues other fallbacks.
    NotKill,
    /// A `kill` token was found but the following token is not a base-10
    /// 64-bit integer. Carries the offending token.
    Malformed(String),
    /// A valid numeric target identifier.
    Target(i64),
}

/// Scans statement text for the kill grammar.
///
/// The text is lower-cased with backticks and embedded newlines stripped
/// before tokenizing. The first token after `kill` is the target identifier;
/// any further tokens are ignored, so `KILL 7 QUERY` is accepted identically
/// to `KILL 7`.
pub fn parse_kill(text: &str) -> KillParse {
    let normalized = text.replace(['`', '\n'], "").to_lowercase();
    let mut tokens = normalized.split_whitespace();
    if !tokens.any(|token| token == "kill") {
        return KillParse::NotKill;
    }
    let id_token = tokens.next().unwrap_or_default();
    match id_token.parse::<i64>() {
        Ok(id) => KillParse::Target(id),
        Err(_) => KillParse::Malformed(id_token.to_string()),
    }
}

/// Terminates the session registered under `target`, reporting one affected
/// row on success.
///
/// Removal happens before the close and the close runs outside the registry
/// lock, matching the registry's removal discipline. Any error the close
/// itself raises is propagated.
pub async fn execute_kill(
    registry: &ConnectionRegistry,
    target: i64,
) -> Result<ResultSet, HubError> {
    // The wire protocol assigns 32-bit identifiers; a wider KILL operand is
    // truncated into that domain.
    let id = target as u32;
    let Some(connector) = registry.remove(id) else {
        return Err(HubError::UnknownTarget(id));
    };
    info!(connection_id = id, "administrative kill");
    connector.close().await?;
    Ok(ResultSet::affected(1))
}
