//! # Domain Errors
//!
//! Error taxonomy for custody operations.
//!
//! Callers need to distinguish "not found" from "invalid input" from
//! "storage failure" to decide whether a retry makes sense, so every
//! variant classifies itself through [`CustodyError::kind`]. The core never
//! retries; retry policy belongs to the host.

use thiserror::Error;

/// Coarse classification of a [`CustodyError`], for callers deciding how
/// to react.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced record or index entry does not exist.
    NotFound,
    /// The caller's input was malformed or incomplete.
    Validation,
    /// The ledger facade failed or returned a corrupt record.
    Storage,
}

/// Errors returned by custody operations.
#[derive(Debug, Error)]
pub enum CustodyError {
    /// No container record exists under this id.
    #[error("container not found: {container_id}")]
    ContainerNotFound { container_id: String },

    /// The owner index has no entry for this party.
    #[error("no owner index entry for {owner_id}")]
    OwnerNotFound { owner_id: String },

    /// A caller-supplied payload could not be decoded into a container.
    #[error("invalid container payload: {reason}")]
    InvalidPayload { reason: String },

    /// A reject operation was invoked with empty remarks.
    #[error("remarks are required when rejecting container {container_id}")]
    MissingRemarks { container_id: String },

    /// A stored record failed to decode. Surfaced, never silently zeroed.
    #[error("corrupt record under key {key}: {reason}")]
    CorruptRecord { key: String, reason: String },

    /// A record failed to encode for storage.
    #[error("failed to encode record for key {key}: {reason}")]
    EncodeFailed { key: String, reason: String },

    /// The ledger facade's get/put failed.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl CustodyError {
    /// Classify this error for the caller.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            CustodyError::ContainerNotFound { .. } | CustodyError::OwnerNotFound { .. } => {
                ErrorKind::NotFound
            }
            CustodyError::InvalidPayload { .. } | CustodyError::MissingRemarks { .. } => {
                ErrorKind::Validation
            }
            CustodyError::CorruptRecord { .. }
            | CustodyError::EncodeFailed { .. }
            | CustodyError::Ledger(_) => ErrorKind::Storage,
        }
    }
}

/// Errors raised by a [`LedgerStore`](crate::ports::outbound::LedgerStore)
/// implementation.
#[derive(Clone, Debug, Error)]
pub enum LedgerError {
    /// I/O failure during a read or write.
    #[error("ledger I/O error: {message}")]
    Io { message: String },

    /// The store detected corruption in its own data.
    #[error("ledger corruption: {message}")]
    Corruption { message: String },
}
