//! # pharma-custody
//!
//! Chain-of-custody tracking for pharmaceutical shipments, running as
//! business logic atop a replicated, ordered key-value ledger. The host
//! ledger supplies consensus, persistence, and transaction validation;
//! this crate supplies the shipment state machine and the ownership index.
//!
//! ## Custody Flow
//!
//! ```text
//! (no container) ──Ship──────────────────→ Shipped
//! Shipped        ──AcceptByLogistics─────→ Accepted
//! Shipped        ──RejectByLogistics─────→ Rejected
//! Accepted       ──Dispatch──────────────→ Dispatched
//! Dispatched     ──AcceptByDistributor───→ Accepted
//! Dispatched     ──RejectByDistributor───→ Rejected
//! ```
//!
//! Re-dispatch after acceptance restarts the cycle for the next hop.
//!
//! Every transition appends one immutable audit entry to the container's
//! supply chain log and records the receiving party in the owner index.
//! The index is grow-only: it answers "has ever held", not "currently
//! holds".
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - pure logic: record types, identifier scheme, template
//!   builder, custody transitions, error taxonomy
//! - `ports/` - port traits (inbound operation API, outbound ledger SPI)
//! - `adapters/` - in-memory reference implementations of the outbound
//!   ports
//! - `service.rs` - application service implementing the API
//! - `dispatch.rs` - typed invocation surface for the host dispatcher
//!
//! ## Usage
//!
//! ```ignore
//! use pharma_custody::{CustodyApi, CustodyService};
//!
//! let mut service = CustodyService::in_memory();
//! service.init()?;
//!
//! // Shipment clients fill in the generated skeleton, then ship it.
//! let template = service.empty_container_template()?;
//! let payload = serde_json::to_vec(&template)?;
//! let shipped = service.ship_container("MFG-1", "LOG-1", "DIST-1", "", &payload)?;
//!
//! service.accept_by_logistics(&shipped.container_id, "LOG-1", "DIST-1", "")?;
//! service.dispatch_container(&shipped.container_id, "DIST-1", "")?;
//! ```

pub mod adapters;
pub mod dispatch;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use adapters::{FixedTimeSource, InMemoryLedger, StaticAttributes, SystemTimeSource};
pub use dispatch::{dispatch, Invocation};
pub use domain::entities::{
    Case, ChainActivity, Container, ContainerElements, ContainerOwners, ContainerProvenance,
    LedgerKeys, Owner, OwnerShipments, Pallet, Timestamp, TransitStatus, Unit, UniqueIdCounter,
};
pub use domain::errors::{CustodyError, ErrorKind, LedgerError};
pub use ports::inbound::CustodyApi;
pub use ports::outbound::{IdentityAttributes, LedgerStore, RecordWrite, TimeSource};
pub use service::CustodyService;
