// src/core/dispatcher.rs

//! The per-statement orchestration pipeline:
//! gate → parse → classify → execute-or-intercept → deliver.
//!
//! One dispatch runs per inbound statement on the session's own execution
//! context. The dispatcher holds no per-session state; everything it needs
//! arrives as the session's connector and the raw statement text.

use crate::core::admin::{self, KillParse};
use crate::core::classifier::{self, FallbackOutcome};
use crate::core::connector::Connector;
use crate::core::parser::StatementParser;
use crate::core::registry::ConnectionRegistry;
use crate::core::resultset::ResultSet;
use crate::core::HubError;
use regex::Regex;
use std::sync::Arc;
use tracing::debug;

/// A pluggable predicate that can refuse a statement before parsing.
///
/// The surrounding system supplies the policy; with no rules configured the
/// gate is permanently false and every statement passes.
pub type BlacklistGate = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Compiles blacklist regex patterns into a gate predicate. An empty pattern
/// list yields the always-allow gate.
pub fn gate_from_patterns(patterns: &[String]) -> anyhow::Result<BlacklistGate> {
    if patterns.is_empty() {
        return Ok(Box::new(|_| false));
    }
    let rules = patterns
        .iter()
        .map(|p| Regex::new(p))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Box::new(move |text| {
        rules.iter().any(|rule| rule.is_match(text))
    }))
}

/// Orchestrates one statement's journey from raw text to delivered result.
pub struct QueryDispatcher {
    registry: Arc<ConnectionRegistry>,
    parser: Arc<dyn StatementParser>,
    gate: BlacklistGate,
}

impl QueryDispatcher {
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        parser: Arc<dyn StatementParser>,
        gate: BlacklistGate,
    ) -> Self {
        Self {
            registry,
            parser,
            gate,
        }
    }

    /// Runs the pipeline for a single statement.
    ///
    /// `deliver` is invoked at most once, with the result, on success. An
    /// execution error is propagated without invoking it; a failure from
    /// `deliver` itself becomes the pipeline's failure.
    pub async fn dispatch<F>(
        &self,
        connector: &Arc<dyn Connector>,
        text: &str,
        deliver: F,
    ) -> Result<(), HubError>
    where
        F: FnOnce(&ResultSet) -> Result<(), HubError>,
    {
        connector.touch_activity();
        debug!(target: "query", connection_id = connector.id(), query = %text, "query");

        if (self.gate)(text) {
            return Err(HubError::Refused(text.to_string()));
        }

        let stmt = match self.parser.parse(text) {
            Ok(stmt) => stmt,
            // The parser cannot handle every statement real clients send.
            // Classify the raw failing text before giving up on it.
            Err(parse_err) => {
                return match classifier::classify(text) {
                    FallbackOutcome::EmptySuccess => {
                        deliver(&ResultSet::empty()).map_err(as_delivery)
                    }
                    FallbackOutcome::Kill(KillParse::Target(id)) => {
                        let rs = admin::execute_kill(&self.registry, id).await?;
                        deliver(&rs).map_err(as_delivery)
                    }
                    FallbackOutcome::Kill(KillParse::Malformed(token)) => {
                        Err(HubError::MalformedKill(token))
                    }
                    FallbackOutcome::Kill(KillParse::NotKill) | FallbackOutcome::NoMatch => {
                        Err(parse_err)
                    }
                };
            }
        };

        let rs = connector.execute(&stmt, text).await?;
        deliver(&rs).map_err(as_delivery)
    }
}

fn as_delivery(e: HubError) -> HubError {
    match e {
        already @ HubError::Delivery(_) => already,
        other => HubError::Delivery(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pattern_list_compiles_to_an_always_allow_gate() {
        let gate = gate_from_patterns(&[]).unwrap();
        assert!(!gate("drop table users"));
        assert!(!gate(""));
    }

    #[test]
    fn configured_patterns_refuse_matching_statements() {
        let patterns = vec![r"(?i)^drop\s".to_string(), r"(?i)truncate".to_string()];
        let gate = gate_from_patterns(&patterns).unwrap();
        assert!(gate("DROP TABLE users"));
        assert!(gate("truncate table logs"));
        assert!(!gate("select * from users"));
    }

    #[test]
    fn invalid_pattern_is_rejected_at_build_time() {
        assert!(gate_from_patterns(&["(".to_string()]).is_err());
    }
}
