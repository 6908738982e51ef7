//! # End-to-End Custody Flow Tests
//!
//! Drives the full multi-hop cycle through the typed invocation surface,
//! the way a host dispatcher would:
//!
//! ```text
//! MFG-A ──Ship──→ [Shipped] ──AcceptByLogistics──→ [Accepted]
//!                                                      │
//!                                                  Dispatch
//!                                                      ↓
//!            [Accepted] ←──AcceptByDistributor── [Dispatched]
//! ```
//!
//! Assertions follow the acceptance properties: audit log length equals
//! the number of transitions, the provenance head mirrors the last log
//! entry, and the owner index accumulates every party that ever held the
//! container.

use pharma_custody::{
    dispatch, Container, ContainerOwners, CustodyApi, CustodyError, CustodyService, ErrorKind,
    FixedTimeSource, InMemoryLedger, Invocation, LedgerKeys, OwnerShipments, StaticAttributes,
    TransitStatus, UniqueIdCounter,
};

type TestService = CustodyService<InMemoryLedger, FixedTimeSource, StaticAttributes>;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_test_writer()
        .try_init();
}

fn new_service() -> TestService {
    init_tracing();
    let mut service = CustodyService::new(
        InMemoryLedger::new(),
        FixedTimeSource::new(1_700_000_000),
        StaticAttributes::new().with_attribute("role", b"manufacturer".to_vec()),
        LedgerKeys::default(),
    );
    service.init().expect("init must succeed on empty ledger");
    service
}

/// Fetch the next empty template and ship it through the given parties,
/// returning the new container id from the wire reply.
fn ship_next(service: &mut TestService, sender: &str, logistics: &str, receiver: &str) -> String {
    let template = dispatch(service, Invocation::GetEmptyContainer).unwrap();
    let reply = dispatch(
        service,
        Invocation::ShipContainer {
            sender_id: sender.to_string(),
            logistics_id: logistics.to_string(),
            receiver_id: receiver.to_string(),
            remarks: String::new(),
            elements_payload: String::from_utf8(template).unwrap(),
        },
    )
    .unwrap();
    String::from_utf8(reply).unwrap()
}

fn fetch_container(service: &mut TestService, container_id: &str) -> Container {
    let bytes = dispatch(
        service,
        Invocation::GetContainerDetails {
            container_id: container_id.to_string(),
        },
    )
    .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[test]
fn multi_hop_cycle_accumulates_audit_log_and_owners() {
    let mut service = new_service();

    let container_id = ship_next(&mut service, "A", "L", "B");
    assert_eq!(container_id, "CON1");

    let shipped = fetch_container(&mut service, &container_id);
    assert_eq!(shipped.provenance.transit_status, TransitStatus::Shipped);
    assert_eq!(shipped.provenance.supplychain.len(), 1);
    assert_eq!(shipped.provenance.sender, "A");
    assert_eq!(shipped.provenance.receiver, "L");

    dispatch(
        &mut service,
        Invocation::AcceptByLogistics {
            container_id: container_id.clone(),
            logistics_id: "L".to_string(),
            receiver_id: "B".to_string(),
            remarks: String::new(),
        },
    )
    .unwrap();
    let accepted = fetch_container(&mut service, &container_id);
    assert_eq!(accepted.provenance.transit_status, TransitStatus::Accepted);
    assert_eq!(accepted.provenance.supplychain.len(), 2);

    dispatch(
        &mut service,
        Invocation::DispatchContainer {
            container_id: container_id.clone(),
            receiver_id: "D".to_string(),
            remarks: String::new(),
        },
    )
    .unwrap();
    let dispatched = fetch_container(&mut service, &container_id);
    assert_eq!(dispatched.provenance.transit_status, TransitStatus::Dispatched);
    assert_eq!(dispatched.provenance.supplychain.len(), 3);
    assert_eq!(dispatched.provenance.sender, "L");
    assert_eq!(dispatched.recipient, "D");

    dispatch(
        &mut service,
        Invocation::AcceptByDistributor {
            container_id: container_id.clone(),
            receiver_id: "D".to_string(),
            remarks: String::new(),
        },
    )
    .unwrap();
    let final_state = fetch_container(&mut service, &container_id);
    assert_eq!(final_state.provenance.transit_status, TransitStatus::Accepted);
    assert_eq!(final_state.provenance.supplychain.len(), 4);

    // Head always mirrors the last audit entry.
    let last = final_state.provenance.supplychain.last().unwrap();
    assert_eq!(final_state.provenance.sender, last.sender);
    assert_eq!(final_state.provenance.receiver, last.receiver);
    assert_eq!(final_state.provenance.transit_status, last.status);

    // Every party that ever held CON1 stays in the index.
    let index_bytes = dispatch(&mut service, Invocation::GetOwner).unwrap();
    let index: ContainerOwners = serde_json::from_slice(&index_bytes).unwrap();
    for owner in ["A", "L", "D"] {
        let entry = index.entry(owner).unwrap_or_else(|| panic!("no entry for {owner}"));
        assert!(entry.container_list.contains(&container_id));
    }
}

#[test]
fn shipping_many_containers_issues_distinct_increasing_ids() {
    let mut service = new_service();

    let ids: Vec<String> = (0..4)
        .map(|_| ship_next(&mut service, "A", "L", "B"))
        .collect();
    assert_eq!(ids, vec!["CON1", "CON2", "CON3", "CON4"]);

    let counter_bytes = dispatch(&mut service, Invocation::GetMaxIdValue).unwrap();
    let counter: UniqueIdCounter = serde_json::from_slice(&counter_bytes).unwrap();
    assert_eq!(counter.container_max_id, 4);
    assert_eq!(counter.pallet_max_id, 12);

    // Each shipped container carries the full 3x3x3 hierarchy with ids
    // extending their parents.
    for id in &ids {
        let container = fetch_container(&mut service, id);
        assert_eq!(container.elements.pallets.len(), 3);
        for pallet in &container.elements.pallets {
            assert!(pallet.pallet_id.starts_with(id.as_str()));
            assert_eq!(pallet.cases.len(), 3);
            for case in &pallet.cases {
                assert!(case.case_id.starts_with(&pallet.pallet_id));
                assert_eq!(case.units.len(), 3);
                for unit in &case.units {
                    assert!(unit.unit_id.starts_with(&case.case_id));
                }
            }
        }
    }
}

#[test]
fn rejection_without_remarks_leaves_ledger_untouched() {
    let mut service = new_service();
    let container_id = ship_next(&mut service, "A", "L", "B");
    let before = fetch_container(&mut service, &container_id);

    let err = dispatch(
        &mut service,
        Invocation::RejectByLogistics {
            container_id: container_id.clone(),
            logistics_id: "L".to_string(),
            receiver_id: "B".to_string(),
            remarks: String::new(),
        },
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    assert_eq!(fetch_container(&mut service, &container_id), before);

    // With a reason, the rejection lands.
    dispatch(
        &mut service,
        Invocation::RejectByLogistics {
            container_id: container_id.clone(),
            logistics_id: "L".to_string(),
            receiver_id: "B".to_string(),
            remarks: "cold-chain breach".to_string(),
        },
    )
    .unwrap();
    let rejected = fetch_container(&mut service, &container_id);
    assert_eq!(rejected.provenance.transit_status, TransitStatus::Rejected);
    assert_eq!(rejected.provenance.supplychain.len(), 2);
}

#[test]
fn owner_lookup_reports_containers_and_missing_ids() {
    let mut service = new_service();
    let first = ship_next(&mut service, "A", "L", "B");
    let second = ship_next(&mut service, "A", "L", "C");

    // Index an id with no backing record, as a stale index would.
    dispatch(
        &mut service,
        Invocation::SetCurrentOwner {
            owner_id: "A".to_string(),
            container_id: "CON999".to_string(),
        },
    )
    .unwrap();

    let bytes = dispatch(
        &mut service,
        Invocation::GetContainerDetailsForOwner {
            owner_id: "A".to_string(),
        },
    )
    .unwrap();
    let shipments: OwnerShipments = serde_json::from_slice(&bytes).unwrap();

    let held: Vec<&str> = shipments
        .containers
        .iter()
        .map(|c| c.container_id.as_str())
        .collect();
    assert_eq!(held, vec![first.as_str(), second.as_str()]);
    assert_eq!(shipments.missing, vec!["CON999"]);

    let err = dispatch(
        &mut service,
        Invocation::GetContainerDetailsForOwner {
            owner_id: "NOBODY".to_string(),
        },
    )
    .unwrap_err();
    assert!(matches!(err, CustodyError::OwnerNotFound { .. }));
}

#[test]
fn attribute_query_passes_through_identity_collaborator() {
    let mut service = new_service();
    let value = dispatch(
        &mut service,
        Invocation::GetUserAttribute {
            attribute_name: "role".to_string(),
        },
    )
    .unwrap();
    assert_eq!(value, b"manufacturer".to_vec());
}
