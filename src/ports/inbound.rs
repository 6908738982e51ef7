//! # Inbound Ports (Driving Ports)
//!
//! The operation surface this crate exposes to the host dispatcher. One
//! method per named operation; each executes as a single logically atomic
//! unit of work against the ledger.
//!
//! Implementations must honor the no-partial-side-effect rule: an operation
//! that fails validation or container lookup must not touch the counter or
//! the owner index.

use crate::domain::entities::{Container, ContainerOwners, OwnerShipments, UniqueIdCounter};
use crate::domain::errors::CustodyError;

/// Primary API for custody tracking.
///
/// Mutating operations return the persisted container so the invocation
/// layer can choose its payload (ship's wire payload is the container id).
pub trait CustodyApi {
    /// Create the singleton id counter record with both counters at zero.
    ///
    /// Called once at system bring-up by the host.
    fn init(&mut self) -> Result<(), CustodyError>;

    /// Ship a container from `sender_id` through `logistics_id` toward
    /// `receiver_id`.
    ///
    /// Decodes `elements_payload` into a container skeleton, installs the
    /// opening provenance (`Shipped`, sender -> logistics), and commits the
    /// container write, the counter advance, and the owner-index additions
    /// for sender and logistics as one atomic batch.
    ///
    /// ## Errors
    ///
    /// - `InvalidPayload`: the payload is not a container document, or its
    ///   `container_id` is empty
    /// - `Ledger` / `CorruptRecord`: facade failure on any touched record
    fn ship_container(
        &mut self,
        sender_id: &str,
        logistics_id: &str,
        receiver_id: &str,
        remarks: &str,
        elements_payload: &[u8],
    ) -> Result<Container, CustodyError>;

    /// Dispatch an accepted container onward to `receiver_id`.
    ///
    /// The carried sender is the prior provenance's receiver - the party
    /// dispatching is the one who last took custody.
    ///
    /// ## Errors
    ///
    /// - `ContainerNotFound`: no record under `container_id`
    fn dispatch_container(
        &mut self,
        container_id: &str,
        receiver_id: &str,
        remarks: &str,
    ) -> Result<Container, CustodyError>;

    /// Logistics provider `logistics_id` takes custody of a shipped
    /// container intended for `receiver_id`.
    ///
    /// The carried sender is taken from the existing provenance, not from
    /// caller input, so a mistyped sender cannot fork the audit trail.
    ///
    /// ## Errors
    ///
    /// - `ContainerNotFound`: no record under `container_id`
    fn accept_by_logistics(
        &mut self,
        container_id: &str,
        logistics_id: &str,
        receiver_id: &str,
        remarks: &str,
    ) -> Result<Container, CustodyError>;

    /// Logistics provider refuses a container. Identical bookkeeping to
    /// [`accept_by_logistics`](CustodyApi::accept_by_logistics) with status
    /// `Rejected`.
    ///
    /// ## Errors
    ///
    /// - `ContainerNotFound`: no record under `container_id`
    /// - `MissingRemarks`: `remarks` is empty; a rejection must say why
    fn reject_by_logistics(
        &mut self,
        container_id: &str,
        logistics_id: &str,
        receiver_id: &str,
        remarks: &str,
    ) -> Result<Container, CustodyError>;

    /// Distributor `receiver_id` takes custody of a dispatched container.
    ///
    /// ## Errors
    ///
    /// - `ContainerNotFound`: no record under `container_id`
    fn accept_by_distributor(
        &mut self,
        container_id: &str,
        receiver_id: &str,
        remarks: &str,
    ) -> Result<Container, CustodyError>;

    /// Distributor refuses a dispatched container.
    ///
    /// ## Errors
    ///
    /// - `ContainerNotFound`: no record under `container_id`
    /// - `MissingRemarks`: `remarks` is empty
    fn reject_by_distributor(
        &mut self,
        container_id: &str,
        receiver_id: &str,
        remarks: &str,
    ) -> Result<Container, CustodyError>;

    /// Record that `owner_id` holds `container_id` in the owner index.
    ///
    /// Idempotent upsert; the index is grow-only. Invoked internally by
    /// every transition and exposed as its own operation for the host.
    fn record_custody(&mut self, owner_id: &str, container_id: &str) -> Result<(), CustodyError>;

    /// Fetch a container by id.
    ///
    /// ## Errors
    ///
    /// - `ContainerNotFound`: no record under `container_id`
    fn get_container(&self, container_id: &str) -> Result<Container, CustodyError>;

    /// Current value of the singleton id counter.
    fn get_max_ids(&self) -> Result<UniqueIdCounter, CustodyError>;

    /// Build the empty 3x3x3 packaging skeleton for the next container.
    /// Pure read: nothing is persisted and the counter does not move.
    fn empty_container_template(&self) -> Result<Container, CustodyError>;

    /// Every container a party has ever held, with per-item results:
    /// containers listed in the index but missing from the ledger are
    /// reported in `missing`, not silently skipped.
    ///
    /// ## Errors
    ///
    /// - `OwnerNotFound`: the index has no entry for `owner_id`
    fn containers_for_owner(&self, owner_id: &str) -> Result<OwnerShipments, CustodyError>;

    /// Raw owner index, for reporting.
    fn owner_index(&self) -> Result<ContainerOwners, CustodyError>;

    /// Pass-through read of an attribute of the authenticated caller.
    fn caller_attribute(&self, name: &str) -> Result<Vec<u8>, CustodyError>;
}
