//! # Domain Entities
//!
//! Record types stored in the host ledger. Every type here serializes with
//! `serde`; the ledger encoding is JSON and must round-trip without loss.
//!
//! ## Record Keys
//!
//! - A container is stored under its own `container_id`.
//! - The id counter and the owner index are singleton records whose keys
//!   are supplied by the host through [`LedgerKeys`].
//!
//! ## Type Decisions
//!
//! - `Timestamp = u64` - seconds since the Unix epoch, assigned by the
//!   service's `TimeSource` when an audit entry is appended. Callers never
//!   supply timestamps.
//! - Counter fields are `u64` - the counter only grows and is never reused.

use serde::{Deserialize, Serialize};

/// Seconds since the Unix epoch.
pub type Timestamp = u64;

/// Transit status of a container, as recorded in its provenance.
///
/// The wire values are the lowercase strings used by the deployed system
/// (`"shipped"`, `"accepted"`, `"rejected"`, `"dispatched"`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitStatus {
    /// Handed from the sender to a logistics provider.
    #[default]
    Shipped,
    /// Taken into custody by the receiving party of the current hop.
    Accepted,
    /// Refused by the receiving party of the current hop.
    Rejected,
    /// Sent onward from an accepting party to the next hop.
    Dispatched,
}

impl std::fmt::Display for TransitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TransitStatus::Shipped => "shipped",
            TransitStatus::Accepted => "accepted",
            TransitStatus::Rejected => "rejected",
            TransitStatus::Dispatched => "dispatched",
        };
        f.write_str(s)
    }
}

/// One immutable audit entry in a container's supply chain log.
///
/// Entries are append-only: once recorded they are never mutated or
/// removed. Append order equals chronological order because the timestamp
/// is assigned at append time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainActivity {
    pub sender: String,
    pub receiver: String,
    pub status: TransitStatus,
    /// Instant the transition was recorded, assigned by the system.
    pub activity_timestamp: Timestamp,
}

/// Custody state of a container: the current status plus the append-only
/// history of every hand-off.
///
/// Invariant: `transit_status`, `sender`, and `receiver` always equal the
/// corresponding fields of the last entry in `supplychain`. The mutators in
/// `domain::custody` maintain this by construction; nothing else should
/// write these fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerProvenance {
    pub transit_status: TransitStatus,
    /// Sending party of the most recent transition.
    pub sender: String,
    /// Receiving party of the most recent transition.
    pub receiver: String,
    /// Append-only chain-of-custody log, oldest first.
    pub supplychain: Vec<ChainActivity>,
}

/// Smallest saleable element of a shipment.
///
/// Unit fields are payload data: they are set when the shipment is built
/// and carried through custody transitions unchanged. The custody state
/// machine never mutates them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Unit {
    pub drug_id: String,
    pub drug_name: String,
    pub unit_id: String,
    pub expiry_date: String,
    pub health_status: String,
    pub batch_number: String,
    pub lot_number: String,
    pub sale_status: String,
    pub consumer_name: String,
}

/// A case holds units.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Case {
    pub case_id: String,
    pub units: Vec<Unit>,
}

/// A pallet holds cases.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pallet {
    pub pallet_id: String,
    pub cases: Vec<Case>,
}

/// The packaging hierarchy of a container.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerElements {
    pub pallets: Vec<Pallet>,
}

/// The root shipment unit.
///
/// A container record lives in the ledger under its own `container_id`;
/// that key never changes after the first write. Containers are created by
/// the template builder (skeleton, no provenance) or by the first custody
/// transition (skeleton plus opening provenance), mutated in place by every
/// subsequent transition, and never deleted - the append-only history lives
/// inside `provenance.supplychain`.
///
/// Decoding is lenient: any field absent from a payload takes its default,
/// matching the behavior shipment-building clients rely on. Malformed
/// documents still fail loudly at the service layer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Container {
    /// Unique, immutable identifier; also the ledger key for this record.
    pub container_id: String,
    /// Optional hierarchy link, carried in the schema but unused by the
    /// current operation set.
    pub parent_container_id: String,
    /// Optional hierarchy links, carried in the schema but unused by the
    /// current operation set.
    pub child_container_id: Vec<String>,
    /// Party currently intended to receive the container.
    pub recipient: String,
    pub elements: ContainerElements,
    pub provenance: ContainerProvenance,
    pub certified_by: String,
    pub address: String,
    pub usn: String,
    pub shipment_date: String,
    pub invoice_number: String,
    pub remarks: String,
}

/// Singleton counter record behind the identifier generator.
///
/// Created once at system initialization with both fields at zero and
/// advanced after every shipped container (one container, three pallets).
/// Never deleted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniqueIdCounter {
    pub container_max_id: u64,
    pub pallet_max_id: u64,
}

/// One entry in the owner index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Owner {
    pub owner_id: String,
    /// Deduplicated ids of every container this party has ever held.
    pub container_list: Vec<String>,
}

/// Singleton owner index: party id to the containers it has ever held.
///
/// Entries only grow. A container id is added the first time a party is
/// recorded against it and is never removed, even after custody passes on;
/// the index answers "has ever held", not "currently holds".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerOwners {
    pub owners: Vec<Owner>,
}

impl ContainerOwners {
    /// Find the index entry for a party, exact and case-sensitive.
    pub fn entry(&self, owner_id: &str) -> Option<&Owner> {
        self.owners.iter().find(|o| o.owner_id == owner_id)
    }

    /// Record that `owner_id` holds `container_id`. Idempotent: appends the
    /// container id only when it is not already listed, creating the owner
    /// entry on first sight.
    pub fn record(&mut self, owner_id: &str, container_id: &str) {
        match self.owners.iter().position(|o| o.owner_id == owner_id) {
            Some(i) => {
                let owner = &mut self.owners[i];
                if !owner.container_list.iter().any(|c| c == container_id) {
                    owner.container_list.push(container_id.to_string());
                }
            }
            None => self.owners.push(Owner {
                owner_id: owner_id.to_string(),
                container_list: vec![container_id.to_string()],
            }),
        }
    }
}

/// Result of a per-owner container lookup.
///
/// Partial failures are observable: containers listed in the index but
/// missing from the ledger are reported in `missing` instead of being
/// silently dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerShipments {
    pub owner_id: String,
    pub containers: Vec<Container>,
    pub missing: Vec<String>,
}

/// Ledger keys of the two singleton records.
///
/// The keys are handed to the service at construction rather than read from
/// ambient globals; the defaults are the literal keys of the deployed
/// system.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerKeys {
    pub counter: String,
    pub owner_index: String,
}

impl Default for LedgerKeys {
    fn default() -> Self {
        Self {
            counter: "UniqueIDCounter".to_string(),
            owner_index: "ContainerOwner".to_string(),
        }
    }
}
