// src/connection/handler.rs

//! Defines `HubHandler`, the handler the wire-protocol layer drives with
//! lifecycle events and statements.
//!
//! The protocol layer supplies the concurrency model: each session's events
//! and statements arrive sequentially for that session, while sessions run
//! concurrently with each other and with administrative kills targeting
//! other sessions.

use crate::config::Config;
use crate::core::connector::{Connector, ConnectorFactory, SessionDescriptor};
use crate::core::dispatcher::{gate_from_patterns, BlacklistGate, QueryDispatcher};
use crate::core::parser::{HubParser, StatementParser};
use crate::core::registry::ConnectionRegistry;
use crate::core::resultset::ResultSet;
use crate::core::slowlog::SlowQueryRecorder;
use crate::core::HubError;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Terminates client sessions for the hub: registers a connector per accepted
/// session, dispatches each statement through the pipeline, and records
/// slow-query timings.
pub struct HubHandler {
    registry: Arc<ConnectionRegistry>,
    dispatcher: QueryDispatcher,
    factory: Arc<dyn ConnectorFactory>,
    slow_log: SlowQueryRecorder,
}

impl HubHandler {
    /// Builds a handler from configuration, with the default parser and the
    /// gate compiled from the configured blacklist patterns.
    pub fn from_config(
        config: &Config,
        factory: Arc<dyn ConnectorFactory>,
    ) -> anyhow::Result<Self> {
        let gate = gate_from_patterns(&config.blacklist)?;
        Ok(Self::new(
            factory,
            Arc::new(HubParser),
            gate,
            config.slow_query_threshold_ms,
        ))
    }

    /// Builds a handler from explicit parts. Tests use this to substitute a
    /// parser double or a custom gate.
    pub fn new(
        factory: Arc<dyn ConnectorFactory>,
        parser: Arc<dyn StatementParser>,
        gate: BlacklistGate,
        slow_query_threshold_ms: i64,
    ) -> Self {
        let registry = Arc::new(ConnectionRegistry::new());
        let dispatcher = QueryDispatcher::new(registry.clone(), parser, gate);
        Self {
            registry,
            dispatcher,
            factory,
            slow_log: SlowQueryRecorder::new(slow_query_threshold_ms),
        }
    }

    /// The live-session registry, for administrative enumeration.
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Called once per accepted session. Returns the connector token the
    /// protocol layer passes back on subsequent calls for this session.
    ///
    /// If the identifier already has an occupant, the new connector replaces
    /// it in the registry first and the superseded one is closed on a spawned
    /// task, so the close never delays the replace and never runs under the
    /// registry lock.
    pub fn on_connect(&self, session: SessionDescriptor) -> Arc<dyn Connector> {
        let connector = self.factory.create(&session);
        debug!(
            connection_id = session.connection_id,
            peer = ?session.peer_addr,
            "session connected"
        );
        if let Some(evicted) = self
            .registry
            .register(session.connection_id, connector.clone())
        {
            let id = session.connection_id;
            tokio::spawn(async move {
                if let Err(e) = evicted.close().await {
                    warn!(connection_id = id, "failed to close evicted connector: {e}");
                }
            });
        }
        connector
    }

    /// Called once when the underlying transport closes. Removes the session
    /// from the registry, then closes its connector outside the lock.
    pub async fn on_disconnect(&self, connection_id: u32) {
        let Some(connector) = self.registry.remove(connection_id) else {
            // Already gone, e.g. an administrative kill won the race.
            debug!(connection_id, "disconnect for unregistered session");
            return;
        };
        debug!(connection_id, "session disconnected");
        if let Err(e) = connector.close().await {
            warn!(connection_id, "failed to close connector: {e}");
        }
    }

    /// Called once per statement. `deliver` is invoked at most once with the
    /// result on success.
    pub async fn on_query<F>(
        &self,
        token: Option<&Arc<dyn Connector>>,
        text: &str,
        deliver: F,
    ) -> Result<(), HubError>
    where
        F: FnOnce(&ResultSet) -> Result<(), HubError>,
    {
        let Some(connector) = token else {
            return Err(HubError::NotConnected);
        };
        self.dispatcher.dispatch(connector, text, deliver).await
    }

    /// Called after `on_query` completes, regardless of outcome, for
    /// slow-query accounting.
    pub fn on_query_timed(&self, text: &str, start: Instant) {
        self.slow_log.record(text, start);
    }
}
