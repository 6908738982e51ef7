//! # Custody Service
//!
//! The application service implementing [`CustodyApi`] over injected
//! outbound ports. Every operation is a straight-line sequence: read the
//! records it needs, apply a pure domain transformation, write the results
//! back in one atomic batch. No state survives between invocations; the
//! host ledger linearizes concurrent invocations touching the same keys.
//!
//! ## Commit discipline
//!
//! Multi-record updates (container + counter + owner index) go through
//! `LedgerStore::put_batch` so the counter can never advance without the
//! container write it describes, and a transition can never land without
//! its owner-index update. Operations that fail validation or lookup
//! return before any write is issued.

use crate::domain::entities::{
    Container, ContainerOwners, ContainerProvenance, LedgerKeys, OwnerShipments, TransitStatus,
    UniqueIdCounter,
};
use crate::domain::errors::CustodyError;
use crate::domain::template::build_empty_container;
use crate::ports::inbound::CustodyApi;
use crate::ports::outbound::{IdentityAttributes, LedgerStore, RecordWrite, TimeSource};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Which provenance field supplies the carried-forward sender of a
/// transition. Sender identity always comes from the stored record, never
/// from caller input.
enum CarriedSender {
    /// The party who last took custody is handing the container onward.
    PriorReceiver,
    /// The sender who opened the current hop is carried through.
    PriorSender,
}

/// Custody tracking service.
///
/// Generic over the host-provided ledger store, time source, and identity
/// collaborator.
pub struct CustodyService<L, T, I>
where
    L: LedgerStore,
    T: TimeSource,
    I: IdentityAttributes,
{
    ledger: L,
    time_source: T,
    identity: I,
    keys: LedgerKeys,
}

impl
    CustodyService<
        crate::adapters::InMemoryLedger,
        crate::adapters::SystemTimeSource,
        crate::adapters::StaticAttributes,
    >
{
    /// Service over in-memory adapters, for tests and development.
    pub fn in_memory() -> Self {
        Self::new(
            crate::adapters::InMemoryLedger::new(),
            crate::adapters::SystemTimeSource,
            crate::adapters::StaticAttributes::new(),
            LedgerKeys::default(),
        )
    }
}

impl<L, T, I> CustodyService<L, T, I>
where
    L: LedgerStore,
    T: TimeSource,
    I: IdentityAttributes,
{
    /// Create a service over the given ports. `keys` addresses the two
    /// singleton records; pass [`LedgerKeys::default`] for the deployed
    /// key names.
    pub fn new(ledger: L, time_source: T, identity: I, keys: LedgerKeys) -> Self {
        Self {
            ledger,
            time_source,
            identity,
            keys,
        }
    }

    fn encode<V: Serialize>(&self, key: &str, value: &V) -> Result<Vec<u8>, CustodyError> {
        serde_json::to_vec(value).map_err(|e| CustodyError::EncodeFailed {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    fn decode<V: DeserializeOwned>(&self, key: &str, bytes: &[u8]) -> Result<V, CustodyError> {
        serde_json::from_slice(bytes).map_err(|e| CustodyError::CorruptRecord {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    /// Load a container, failing `ContainerNotFound` when the key is
    /// absent or holds an empty record.
    fn load_container(&self, container_id: &str) -> Result<Container, CustodyError> {
        match self.ledger.get(container_id)? {
            Some(bytes) if !bytes.is_empty() => self.decode(container_id, &bytes),
            _ => Err(CustodyError::ContainerNotFound {
                container_id: container_id.to_string(),
            }),
        }
    }

    /// Load a singleton record, treating an absent or empty key as the
    /// zero value. A present record that fails to decode is a storage
    /// error - it is never silently replaced.
    fn load_singleton<V: DeserializeOwned + Default>(&self, key: &str) -> Result<V, CustodyError> {
        match self.ledger.get(key)? {
            Some(bytes) if !bytes.is_empty() => self.decode(key, &bytes),
            _ => Ok(V::default()),
        }
    }

    fn load_counter(&self) -> Result<UniqueIdCounter, CustodyError> {
        self.load_singleton(&self.keys.counter)
    }

    fn load_owner_index(&self) -> Result<ContainerOwners, CustodyError> {
        self.load_singleton(&self.keys.owner_index)
    }

    /// Shared skeleton of the five post-ship transitions: load the
    /// container, append one audit entry with the carried-forward sender,
    /// record custody for the receiving party, and commit container +
    /// owner index atomically.
    fn apply_transition(
        &mut self,
        container_id: &str,
        status: TransitStatus,
        carried: CarriedSender,
        receiver: &str,
        recipient: &str,
    ) -> Result<Container, CustodyError> {
        let mut container = self.load_container(container_id)?;

        let sender = match carried {
            CarriedSender::PriorReceiver => container.provenance.receiver.clone(),
            CarriedSender::PriorSender => container.provenance.sender.clone(),
        };
        let now = self.time_source.now();
        container.recipient = recipient.to_string();
        container.provenance.record(status, &sender, receiver, now);

        let mut index = self.load_owner_index()?;
        index.record(receiver, container_id);

        let writes = vec![
            RecordWrite::new(container_id, self.encode(container_id, &container)?),
            RecordWrite::new(
                self.keys.owner_index.clone(),
                self.encode(&self.keys.owner_index, &index)?,
            ),
        ];
        self.ledger.put_batch(writes)?;

        info!(
            container_id,
            status = %status,
            sender = %sender,
            receiver,
            "custody transition recorded"
        );
        Ok(container)
    }
}

impl<L, T, I> CustodyApi for CustodyService<L, T, I>
where
    L: LedgerStore,
    T: TimeSource,
    I: IdentityAttributes,
{
    fn init(&mut self) -> Result<(), CustodyError> {
        // Bring-up is idempotent: a counter that already exists is left
        // alone, since resetting it would reissue spent ids.
        if self.ledger.get(&self.keys.counter)?.is_some() {
            warn!(key = %self.keys.counter, "id counter already present, leaving untouched");
            return Ok(());
        }

        let counter = UniqueIdCounter::default();
        let bytes = self.encode(&self.keys.counter, &counter)?;
        self.ledger.put(&self.keys.counter, &bytes)?;
        info!(key = %self.keys.counter, "id counter initialized");
        Ok(())
    }

    fn ship_container(
        &mut self,
        sender_id: &str,
        logistics_id: &str,
        receiver_id: &str,
        remarks: &str,
        elements_payload: &[u8],
    ) -> Result<Container, CustodyError> {
        let mut container: Container =
            serde_json::from_slice(elements_payload).map_err(|e| CustodyError::InvalidPayload {
                reason: e.to_string(),
            })?;
        if container.container_id.is_empty() {
            return Err(CustodyError::InvalidPayload {
                reason: "container_id is empty".to_string(),
            });
        }

        let now = self.time_source.now();
        container.recipient = receiver_id.to_string();
        container.provenance = ContainerProvenance::shipped(sender_id, logistics_id, now);

        // The counter advance commits with the container write it
        // describes; a crash cannot leave them inconsistent.
        let mut counter = self.load_counter()?;
        counter.advance();

        let mut index = self.load_owner_index()?;
        index.record(sender_id, &container.container_id);
        index.record(logistics_id, &container.container_id);

        let container_key = container.container_id.clone();
        let writes = vec![
            RecordWrite::new(container_key.clone(), self.encode(&container_key, &container)?),
            RecordWrite::new(
                self.keys.counter.clone(),
                self.encode(&self.keys.counter, &counter)?,
            ),
            RecordWrite::new(
                self.keys.owner_index.clone(),
                self.encode(&self.keys.owner_index, &index)?,
            ),
        ];
        self.ledger.put_batch(writes)?;

        info!(
            container_id = %container.container_id,
            sender = sender_id,
            logistics = logistics_id,
            recipient = receiver_id,
            remarks,
            "container shipped"
        );
        Ok(container)
    }

    fn dispatch_container(
        &mut self,
        container_id: &str,
        receiver_id: &str,
        remarks: &str,
    ) -> Result<Container, CustodyError> {
        debug!(container_id, receiver_id, remarks, "dispatching container");
        self.apply_transition(
            container_id,
            TransitStatus::Dispatched,
            CarriedSender::PriorReceiver,
            receiver_id,
            receiver_id,
        )
    }

    fn accept_by_logistics(
        &mut self,
        container_id: &str,
        logistics_id: &str,
        receiver_id: &str,
        remarks: &str,
    ) -> Result<Container, CustodyError> {
        debug!(container_id, logistics_id, remarks, "logistics accepting container");
        self.apply_transition(
            container_id,
            TransitStatus::Accepted,
            CarriedSender::PriorSender,
            logistics_id,
            receiver_id,
        )
    }

    fn reject_by_logistics(
        &mut self,
        container_id: &str,
        logistics_id: &str,
        receiver_id: &str,
        remarks: &str,
    ) -> Result<Container, CustodyError> {
        if remarks.is_empty() {
            return Err(CustodyError::MissingRemarks {
                container_id: container_id.to_string(),
            });
        }
        debug!(container_id, logistics_id, remarks, "logistics rejecting container");
        self.apply_transition(
            container_id,
            TransitStatus::Rejected,
            CarriedSender::PriorSender,
            logistics_id,
            receiver_id,
        )
    }

    fn accept_by_distributor(
        &mut self,
        container_id: &str,
        receiver_id: &str,
        remarks: &str,
    ) -> Result<Container, CustodyError> {
        debug!(container_id, receiver_id, remarks, "distributor accepting container");
        self.apply_transition(
            container_id,
            TransitStatus::Accepted,
            CarriedSender::PriorSender,
            receiver_id,
            receiver_id,
        )
    }

    fn reject_by_distributor(
        &mut self,
        container_id: &str,
        receiver_id: &str,
        remarks: &str,
    ) -> Result<Container, CustodyError> {
        if remarks.is_empty() {
            return Err(CustodyError::MissingRemarks {
                container_id: container_id.to_string(),
            });
        }
        debug!(container_id, receiver_id, remarks, "distributor rejecting container");
        self.apply_transition(
            container_id,
            TransitStatus::Rejected,
            CarriedSender::PriorSender,
            receiver_id,
            receiver_id,
        )
    }

    fn record_custody(&mut self, owner_id: &str, container_id: &str) -> Result<(), CustodyError> {
        let mut index = self.load_owner_index()?;
        index.record(owner_id, container_id);
        let bytes = self.encode(&self.keys.owner_index, &index)?;
        self.ledger.put(&self.keys.owner_index, &bytes)?;
        debug!(owner_id, container_id, "custody recorded in owner index");
        Ok(())
    }

    fn get_container(&self, container_id: &str) -> Result<Container, CustodyError> {
        if container_id.is_empty() {
            return Err(CustodyError::InvalidPayload {
                reason: "container id is empty".to_string(),
            });
        }
        self.load_container(container_id)
    }

    fn get_max_ids(&self) -> Result<UniqueIdCounter, CustodyError> {
        self.load_counter()
    }

    fn empty_container_template(&self) -> Result<Container, CustodyError> {
        let counter = self.load_counter()?;
        Ok(build_empty_container(&counter))
    }

    fn containers_for_owner(&self, owner_id: &str) -> Result<OwnerShipments, CustodyError> {
        let index = self.load_owner_index()?;
        let entry = index
            .entry(owner_id)
            .ok_or_else(|| CustodyError::OwnerNotFound {
                owner_id: owner_id.to_string(),
            })?;

        let mut shipments = OwnerShipments {
            owner_id: owner_id.to_string(),
            ..OwnerShipments::default()
        };
        for container_id in &entry.container_list {
            match self.load_container(container_id) {
                Ok(container) => shipments.containers.push(container),
                // An indexed container missing from the ledger is reported,
                // not skipped. Storage failures still propagate.
                Err(CustodyError::ContainerNotFound { .. }) => {
                    warn!(owner_id, container_id, "indexed container missing from ledger");
                    shipments.missing.push(container_id.clone());
                }
                Err(e) => return Err(e),
            }
        }
        Ok(shipments)
    }

    fn owner_index(&self) -> Result<ContainerOwners, CustodyError> {
        self.load_owner_index()
    }

    fn caller_attribute(&self, name: &str) -> Result<Vec<u8>, CustodyError> {
        let value = self.identity.read_caller_attribute(name)?;
        debug!(attribute = name, "caller attribute read");
        Ok(value)
    }
}
