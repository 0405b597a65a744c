// src/core/connector.rs

//! The per-session backend capability the registry tracks and the
//! dispatcher drives.

use crate::core::parser::Statement;
use crate::core::resultset::ResultSet;
use crate::core::HubError;
use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::Arc;

/// Identity of an accepted session, as assigned by the protocol layer.
///
/// The connection id is unique among currently live sessions only; the
/// protocol layer may reuse it after a session closes.
#[derive(Debug, Clone, Copy)]
pub struct SessionDescriptor {
    pub connection_id: u32,
    pub peer_addr: Option<SocketAddr>,
}

/// The capability interface for one live session's backend executor.
///
/// The registry holds a reference but does not own the backend resources;
/// the connector owns those and releases them on `close`.
#[async_trait]
pub trait Connector: Send + Sync {
    /// The protocol-assigned connection identifier of this session.
    fn id(&self) -> u32;

    /// Executes a structured statement against backend storage. The raw text
    /// accompanies it for backends that re-serialize or log the original.
    async fn execute(&self, stmt: &Statement, raw: &str) -> Result<ResultSet, HubError>;

    /// Resets the session's last-activity timestamp.
    fn touch_activity(&self);

    /// Releases backend resources. Must be idempotent and safe to call
    /// concurrently with an in-flight `execute`: a kill racing a normal
    /// disconnect may close the same connector twice.
    async fn close(&self) -> Result<(), HubError>;
}

/// Creates a connector for each accepted session. This is the seam to the
/// backend executor collaborator (sharding, pooling and transactions live
/// behind it, not here).
pub trait ConnectorFactory: Send + Sync {
    fn create(&self, session: &SessionDescriptor) -> Arc<dyn Connector>;
}
