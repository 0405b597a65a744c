// src/core/errors.rs

//! Defines the primary error type for the entire application.

use std::sync::Arc;
use thiserror::Error;

/// The main error enum, representing all possible failures within the hub front end.
/// Using `thiserror` allows for clean error definitions and automatic `From` trait implementations.
#[derive(Error, Debug, Clone)]
pub enum HubError {
    #[error("IO Error: {0}")]
    Io(Arc<std::io::Error>),

    /// Dispatch was invoked without a valid session token.
    #[error("not connected")]
    NotConnected,

    /// The statement matched the blacklist gate; execution was never attempted.
    #[error("sqlhub refused execute: {0}")]
    Refused(String),

    /// The parser rejected the statement and no fallback classification matched.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// Kill-shaped command whose target token is not a valid connection id.
    /// Kept distinct from `Syntax` so a malformed KILL is never reported as a
    /// generic parse failure.
    #[error("invalid connection id in kill command: '{0}'")]
    MalformedKill(String),

    /// A kill command named an identifier with no live session.
    #[error("no connection of: {0}")]
    UnknownTarget(u32),

    /// Backend execution failed; propagated verbatim, no retry at this layer.
    #[error("execution error: {0}")]
    Execution(String),

    /// The result delivery callback itself failed after a successful execution.
    #[error("result delivery failed: {0}")]
    Delivery(String),

    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl PartialEq for HubError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (HubError::Io(e1), HubError::Io(e2)) => e1.to_string() == e2.to_string(),
            (HubError::Refused(s1), HubError::Refused(s2)) => s1 == s2,
            (HubError::Syntax(s1), HubError::Syntax(s2)) => s1 == s2,
            (HubError::MalformedKill(s1), HubError::MalformedKill(s2)) => s1 == s2,
            (HubError::UnknownTarget(id1), HubError::UnknownTarget(id2)) => id1 == id2,
            (HubError::Execution(s1), HubError::Execution(s2)) => s1 == s2,
            (HubError::Delivery(s1), HubError::Delivery(s2)) => s1 == s2,
            (HubError::Internal(s1), HubError::Internal(s2)) => s1 == s2,
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

// --- From trait implementations for easy error conversion ---

impl From<std::io::Error> for HubError {
    fn from(e: std::io::Error) -> Self {
        HubError::Io(Arc::new(e))
    }
}

impl From<sqlparser::parser::ParserError> for HubError {
    fn from(e: sqlparser::parser::ParserError) -> Self {
        HubError::Syntax(e.to_string())
    }
}
