//! # In-Memory Adapters
//!
//! HashMap-backed implementations of the outbound ports, for unit tests
//! and light deployments. Production hosts bind the ports to the real
//! ledger runtime.

use crate::domain::errors::LedgerError;
use crate::ports::outbound::{IdentityAttributes, LedgerStore, RecordWrite};
use std::collections::HashMap;

/// In-memory ledger store.
///
/// Single-threaded map, so `put_batch` is trivially atomic. The host's
/// real store must provide the same all-or-nothing guarantee.
#[derive(Default)]
pub struct InMemoryLedger {
    records: HashMap<String, Vec<u8>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently stored. Test helper.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl LedgerStore for InMemoryLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        Ok(self.records.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), LedgerError> {
        self.records.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn put_batch(&mut self, writes: Vec<RecordWrite>) -> Result<(), LedgerError> {
        for write in writes {
            self.records.insert(write.key, write.value);
        }
        Ok(())
    }
}

/// Static caller-attribute source for tests and development.
///
/// Production hosts resolve attributes from the caller's enrollment
/// certificate.
#[derive(Default)]
pub struct StaticAttributes {
    attributes: HashMap<String, Vec<u8>>,
}

impl StaticAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

impl IdentityAttributes for StaticAttributes {
    fn read_caller_attribute(&self, name: &str) -> Result<Vec<u8>, LedgerError> {
        self.attributes
            .get(name)
            .cloned()
            .ok_or_else(|| LedgerError::Io {
                message: format!("attribute {name} not present on caller certificate"),
            })
    }
}
