//! # Outbound Ports (Driven Ports)
//!
//! Interfaces the host must implement for this crate to run. The host
//! ledger owns persistence, replication, and transaction validation; this
//! crate only reads and writes opaque records through [`LedgerStore`].
//!
//! Reference implementations for tests and light deployments live in
//! `crate::adapters`.

use crate::domain::entities::Timestamp;
use crate::domain::errors::LedgerError;

/// One record write inside an atomic batch.
#[derive(Clone, Debug)]
pub struct RecordWrite {
    pub key: String,
    pub value: Vec<u8>,
}

impl RecordWrite {
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Abstract interface to the host's key-value ledger.
///
/// Keys are strings: each container's id is its own key, and the two
/// singleton records use the keys configured in
/// [`LedgerKeys`](crate::domain::entities::LedgerKeys). Reads within one
/// invocation observe that invocation's earlier writes; commit ordering and
/// conflict detection between invocations belong to the host.
pub trait LedgerStore: Send + Sync {
    /// Get a record by key. `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Put a single record.
    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), LedgerError>;

    /// Write several records in one atomic commit.
    ///
    /// Either every write in the batch lands or none do. Custody operations
    /// rely on this to keep the container record, the id counter, and the
    /// owner index consistent with each other.
    fn put_batch(&mut self, writes: Vec<RecordWrite>) -> Result<(), LedgerError>;
}

/// Abstract interface for time, so tests control audit timestamps.
pub trait TimeSource: Send + Sync {
    /// Current timestamp in seconds since the Unix epoch.
    fn now(&self) -> Timestamp;
}

/// Attribute lookup for the already-authenticated caller.
///
/// Used only by the pass-through attribute query; no authorization policy
/// lives in this crate.
pub trait IdentityAttributes: Send + Sync {
    /// Read the named certificate attribute of the invoking caller.
    fn read_caller_attribute(&self, name: &str) -> Result<Vec<u8>, LedgerError>;
}
