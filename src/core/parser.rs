// src/core/parser.rs

//! The seam between the dispatch pipeline and the external SQL parser.
//!
//! The pipeline never inspects a parsed statement itself; it only needs to
//! know whether the text parses, and to hand the structured form on to the
//! session's connector. Keeping the parser behind a trait lets tests
//! substitute a double that fails or succeeds on demand.

use crate::core::HubError;
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;

/// The structured statement produced by the parser and consumed by the
/// backend connector.
pub type Statement = sqlparser::ast::Statement;

/// Turns raw statement text into a structured statement, or reports a
/// syntax failure the fallback classifier may override.
pub trait StatementParser: Send + Sync {
    fn parse(&self, text: &str) -> Result<Statement, HubError>;
}

/// The default parser, backed by `sqlparser` with the MySQL dialect.
#[derive(Debug, Default)]
pub struct HubParser;

impl StatementParser for HubParser {
    fn parse(&self, text: &str) -> Result<Statement, HubError> {
        let mut statements = Parser::parse_sql(&MySqlDialect {}, text)?;
        if statements.is_empty() {
            return Err(HubError::Syntax(format!("empty statement: {text}")));
        }
        // Clients send one statement per query packet; anything after the
        // first is not addressable through the single-result contract.
        match statements.remove(0) {
            // Administrative statements are intercepted by the dispatch
            // fallback, never executed through the backend. Reporting them as
            // unmodeled routes them there.
            Statement::Kill { .. } => {
                Err(HubError::Syntax(format!("unsupported statement: {text}")))
            }
            stmt => Ok(stmt),
        }
    }
}
