#![allow(dead_code)]

//! Shared test doubles for the registry and dispatch tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use sqlhub::core::connector::{Connector, ConnectorFactory, SessionDescriptor};
use sqlhub::core::parser::{Statement, StatementParser};
use sqlhub::core::resultset::ResultSet;
use sqlhub::core::HubError;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// A connector double that counts calls and models an idempotent close:
/// backend resources are released at most once no matter how many times
/// `close` runs.
pub struct MockConnector {
    id: u32,
    released: AtomicBool,
    close_calls: AtomicUsize,
    release_count: AtomicUsize,
    execute_calls: AtomicUsize,
    touch_calls: AtomicUsize,
    execute_error: Option<HubError>,
    close_error: Option<HubError>,
}

impl MockConnector {
    pub fn new(id: u32) -> Arc<Self> {
        Arc::new(Self::inner_new(id))
    }

    pub fn failing_execute(id: u32, error: HubError) -> Arc<Self> {
        let mut conn = Self::inner_new(id);
        conn.execute_error = Some(error);
        Arc::new(conn)
    }

    pub fn failing_close(id: u32, error: HubError) -> Arc<Self> {
        let mut conn = Self::inner_new(id);
        conn.close_error = Some(error);
        Arc::new(conn)
    }

    fn inner_new(id: u32) -> Self {
        Self {
            id,
            released: AtomicBool::new(false),
            close_calls: AtomicUsize::new(0),
            release_count: AtomicUsize::new(0),
            execute_calls: AtomicUsize::new(0),
            touch_calls: AtomicUsize::new(0),
            execute_error: None,
            close_error: None,
        }
    }

    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }

    /// How many times backend resources were actually released. Must never
    /// exceed one.
    pub fn release_count(&self) -> usize {
        self.release_count.load(Ordering::SeqCst)
    }

    pub fn execute_calls(&self) -> usize {
        self.execute_calls.load(Ordering::SeqCst)
    }

    pub fn touch_calls(&self) -> usize {
        self.touch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for MockConnector {
    fn id(&self) -> u32 {
        self.id
    }

    async fn execute(&self, _stmt: &Statement, raw: &str) -> Result<ResultSet, HubError> {
        self.execute_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(e) = &self.execute_error {
            return Err(e.clone());
        }
        Ok(ResultSet {
            columns: vec!["echo".to_string()],
            rows: vec![vec![raw.to_string()]],
            rows_affected: 0,
        })
    }

    fn touch_activity(&self) {
        self.touch_calls.fetch_add(1, Ordering::SeqCst);
    }

    async fn close(&self) -> Result<(), HubError> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        if self
            .released
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            self.release_count.fetch_add(1, Ordering::SeqCst);
            if let Some(e) = &self.close_error {
                return Err(e.clone());
            }
        }
        Ok(())
    }
}

/// Hands out `MockConnector`s and remembers every one it created, so tests
/// can inspect connectors after the handler has taken ownership.
#[derive(Default)]
pub struct MockFactory {
    created: Mutex<Vec<Arc<MockConnector>>>,
}

impl MockFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn created(&self) -> Vec<Arc<MockConnector>> {
        self.created.lock().clone()
    }

    pub fn last(&self) -> Arc<MockConnector> {
        self.created.lock().last().cloned().expect("no connector created yet")
    }
}

impl ConnectorFactory for MockFactory {
    fn create(&self, session: &SessionDescriptor) -> Arc<dyn Connector> {
        let connector = MockConnector::new(session.connection_id);
        self.created.lock().push(connector.clone());
        connector
    }
}

/// A parser double that rejects everything and counts how often it ran.
#[derive(Default)]
pub struct RejectingParser {
    calls: AtomicUsize,
}

impl RejectingParser {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl StatementParser for RejectingParser {
    fn parse(&self, text: &str) -> Result<Statement, HubError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(HubError::Syntax(format!("unparseable: {text}")))
    }
}

pub fn session(connection_id: u32) -> SessionDescriptor {
    SessionDescriptor {
        connection_id,
        peer_addr: None,
    }
}

/// An always-pass blacklist gate.
pub fn open_gate() -> Box<dyn Fn(&str) -> bool + Send + Sync> {
    Box::new(|_| false)
}
