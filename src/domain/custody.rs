//! # Custody State Machine
//!
//! Pure transition logic for a container's provenance. The intended flow
//! is a repeating multi-hop cycle rather than a run to a terminal state:
//!
//! ```text
//! (no container) --Ship-->                Shipped
//! Shipped        --AcceptByLogistics-->   Accepted
//! Shipped        --RejectByLogistics-->   Rejected
//! Accepted       --Dispatch-->            Dispatched
//! Dispatched     --AcceptByDistributor--> Accepted
//! Dispatched     --RejectByDistributor--> Rejected
//! ```
//!
//! Re-dispatch after acceptance restarts the cycle. A rejected container
//! has no further transition in the current operation set.
//!
//! Every mutation goes through [`ContainerProvenance::record`], which
//! appends one audit entry and synchronizes the head fields in the same
//! step - the head always equals the last entry, by construction.

use super::entities::{ChainActivity, ContainerProvenance, Timestamp, TransitStatus};

impl ContainerProvenance {
    /// Opening provenance for a freshly shipped container: status
    /// `Shipped`, one audit entry from `sender` to `receiver`.
    pub fn shipped(sender: &str, receiver: &str, now: Timestamp) -> Self {
        let mut provenance = ContainerProvenance::default();
        provenance.record(TransitStatus::Shipped, sender, receiver, now);
        provenance
    }

    /// Append one custody transition and update the head fields.
    ///
    /// The audit entry is immutable once appended; append order equals
    /// chronological order because `now` is assigned at append time.
    pub fn record(&mut self, status: TransitStatus, sender: &str, receiver: &str, now: Timestamp) {
        self.supplychain.push(ChainActivity {
            sender: sender.to_string(),
            receiver: receiver.to_string(),
            status,
            activity_timestamp: now,
        });
        self.transit_status = status;
        self.sender = sender.to_string();
        self.receiver = receiver.to_string();
    }

    /// Last appended audit entry, if any transition has been recorded.
    pub fn last_activity(&self) -> Option<&ChainActivity> {
        self.supplychain.last()
    }
}
