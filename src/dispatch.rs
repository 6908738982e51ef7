//! # Invocation Dispatch
//!
//! The statically-typed invocation surface exposed to the host dispatcher.
//! One enum variant per operation; the host's transport layer decodes a
//! request into an [`Invocation`] and hands it to [`dispatch`], which runs
//! the operation and encodes the reply payload.
//!
//! Payload conventions follow the deployed wire contract: ship answers
//! with the container id, the other transitions answer with an empty
//! payload, queries answer with the JSON encoding of the record they read,
//! and the attribute query answers with the raw attribute bytes.

use crate::domain::errors::CustodyError;
use crate::ports::inbound::CustodyApi;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// One invocation of the custody logic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Invocation {
    Init,
    ShipContainer {
        sender_id: String,
        logistics_id: String,
        receiver_id: String,
        remarks: String,
        /// JSON container document, normally obtained from
        /// `GetEmptyContainer` and filled in by the shipment client.
        elements_payload: String,
    },
    DispatchContainer {
        container_id: String,
        receiver_id: String,
        remarks: String,
    },
    AcceptByLogistics {
        container_id: String,
        logistics_id: String,
        receiver_id: String,
        remarks: String,
    },
    RejectByLogistics {
        container_id: String,
        logistics_id: String,
        receiver_id: String,
        remarks: String,
    },
    AcceptByDistributor {
        container_id: String,
        receiver_id: String,
        remarks: String,
    },
    RejectByDistributor {
        container_id: String,
        receiver_id: String,
        remarks: String,
    },
    SetCurrentOwner {
        owner_id: String,
        container_id: String,
    },
    GetContainerDetails {
        container_id: String,
    },
    GetMaxIdValue,
    GetEmptyContainer,
    GetContainerDetailsForOwner {
        owner_id: String,
    },
    GetOwner,
    GetUserAttribute {
        attribute_name: String,
    },
}

impl Invocation {
    /// Operation name, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Invocation::Init => "Init",
            Invocation::ShipContainer { .. } => "ShipContainer",
            Invocation::DispatchContainer { .. } => "DispatchContainer",
            Invocation::AcceptByLogistics { .. } => "AcceptByLogistics",
            Invocation::RejectByLogistics { .. } => "RejectByLogistics",
            Invocation::AcceptByDistributor { .. } => "AcceptByDistributor",
            Invocation::RejectByDistributor { .. } => "RejectByDistributor",
            Invocation::SetCurrentOwner { .. } => "SetCurrentOwner",
            Invocation::GetContainerDetails { .. } => "GetContainerDetails",
            Invocation::GetMaxIdValue => "GetMaxIdValue",
            Invocation::GetEmptyContainer => "GetEmptyContainer",
            Invocation::GetContainerDetailsForOwner { .. } => "GetContainerDetailsForOwner",
            Invocation::GetOwner => "GetOwner",
            Invocation::GetUserAttribute { .. } => "GetUserAttribute",
        }
    }

    /// Whether this invocation mutates ledger state.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Invocation::Init
                | Invocation::ShipContainer { .. }
                | Invocation::DispatchContainer { .. }
                | Invocation::AcceptByLogistics { .. }
                | Invocation::RejectByLogistics { .. }
                | Invocation::AcceptByDistributor { .. }
                | Invocation::RejectByDistributor { .. }
                | Invocation::SetCurrentOwner { .. }
        )
    }
}

fn to_json<V: Serialize>(what: &str, value: &V) -> Result<Vec<u8>, CustodyError> {
    serde_json::to_vec(value).map_err(|e| CustodyError::EncodeFailed {
        key: what.to_string(),
        reason: e.to_string(),
    })
}

/// Run one invocation against the service and encode its reply payload.
pub fn dispatch<S: CustodyApi>(
    service: &mut S,
    invocation: Invocation,
) -> Result<Vec<u8>, CustodyError> {
    debug!(operation = invocation.name(), "dispatching invocation");
    match invocation {
        Invocation::Init => {
            service.init()?;
            Ok(Vec::new())
        }
        Invocation::ShipContainer {
            sender_id,
            logistics_id,
            receiver_id,
            remarks,
            elements_payload,
        } => {
            let container = service.ship_container(
                &sender_id,
                &logistics_id,
                &receiver_id,
                &remarks,
                elements_payload.as_bytes(),
            )?;
            Ok(container.container_id.into_bytes())
        }
        Invocation::DispatchContainer {
            container_id,
            receiver_id,
            remarks,
        } => {
            service.dispatch_container(&container_id, &receiver_id, &remarks)?;
            Ok(Vec::new())
        }
        Invocation::AcceptByLogistics {
            container_id,
            logistics_id,
            receiver_id,
            remarks,
        } => {
            service.accept_by_logistics(&container_id, &logistics_id, &receiver_id, &remarks)?;
            Ok(Vec::new())
        }
        Invocation::RejectByLogistics {
            container_id,
            logistics_id,
            receiver_id,
            remarks,
        } => {
            service.reject_by_logistics(&container_id, &logistics_id, &receiver_id, &remarks)?;
            Ok(Vec::new())
        }
        Invocation::AcceptByDistributor {
            container_id,
            receiver_id,
            remarks,
        } => {
            service.accept_by_distributor(&container_id, &receiver_id, &remarks)?;
            Ok(Vec::new())
        }
        Invocation::RejectByDistributor {
            container_id,
            receiver_id,
            remarks,
        } => {
            service.reject_by_distributor(&container_id, &receiver_id, &remarks)?;
            Ok(Vec::new())
        }
        Invocation::SetCurrentOwner {
            owner_id,
            container_id,
        } => {
            service.record_custody(&owner_id, &container_id)?;
            Ok(Vec::new())
        }
        Invocation::GetContainerDetails { container_id } => {
            let container = service.get_container(&container_id)?;
            to_json("container", &container)
        }
        Invocation::GetMaxIdValue => {
            let counter = service.get_max_ids()?;
            to_json("counter", &counter)
        }
        Invocation::GetEmptyContainer => {
            let template = service.empty_container_template()?;
            to_json("container template", &template)
        }
        Invocation::GetContainerDetailsForOwner { owner_id } => {
            let shipments = service.containers_for_owner(&owner_id)?;
            to_json("owner shipments", &shipments)
        }
        Invocation::GetOwner => {
            let index = service.owner_index()?;
            to_json("owner index", &index)
        }
        Invocation::GetUserAttribute { attribute_name } => {
            service.caller_attribute(&attribute_name)
        }
    }
}
