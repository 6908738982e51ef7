//! # Container Template Builder
//!
//! Builds the empty packaging skeleton a shipment client fills in before
//! calling ship: one container, three pallets, three cases per pallet,
//! three units per case, every id structurally derived from the counter.
//!
//! Pure function of the counter value. No ledger access and no counter
//! mutation happen here; callers that want the id persisted must ship the
//! container, which advances the counter as part of the same commit.

use super::entities::{Case, Container, ContainerElements, Pallet, Unit, UniqueIdCounter};
use super::identifiers::{case_id, unit_id, FAN_OUT};

/// Build the skeleton for the next container after `counter`.
///
/// Only the identifier fields are populated; payload fields (drug identity,
/// batch numbers, expiry) are left for the shipment client to fill in.
pub fn build_empty_container(counter: &UniqueIdCounter) -> Container {
    let container_id = counter.next_container_id();
    let pallets = counter
        .next_pallet_ids(&container_id)
        .into_iter()
        .map(build_pallet)
        .collect();

    Container {
        container_id,
        elements: ContainerElements { pallets },
        ..Container::default()
    }
}

fn build_pallet(pallet_id: String) -> Pallet {
    let cases = (1..=FAN_OUT)
        .map(|k| build_case(case_id(&pallet_id, k)))
        .collect();
    Pallet { pallet_id, cases }
}

fn build_case(case_id: String) -> Case {
    let units = (1..=FAN_OUT)
        .map(|k| Unit {
            unit_id: unit_id(&case_id, k),
            ..Unit::default()
        })
        .collect();
    Case { case_id, units }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_shape() {
        let container = build_empty_container(&UniqueIdCounter::default());

        assert_eq!(container.container_id, "CON1");
        assert_eq!(container.elements.pallets.len(), 3);
        for pallet in &container.elements.pallets {
            assert_eq!(pallet.cases.len(), 3);
            for case in &pallet.cases {
                assert_eq!(case.units.len(), 3);
            }
        }
    }

    #[test]
    fn test_template_ids_extend_parents() {
        let counter = UniqueIdCounter {
            container_max_id: 1,
            pallet_max_id: 3,
        };
        let container = build_empty_container(&counter);
        assert_eq!(container.container_id, "CON2");

        for pallet in &container.elements.pallets {
            assert!(pallet.pallet_id.starts_with("CON2PAL"));
            for case in &pallet.cases {
                assert!(case.case_id.starts_with(&pallet.pallet_id));
                for unit in &case.units {
                    assert!(unit.unit_id.starts_with(&case.case_id));
                }
            }
        }

        // Pallet numbering continues the global block.
        assert_eq!(container.elements.pallets[0].pallet_id, "CON2PAL4");
        assert_eq!(container.elements.pallets[2].pallet_id, "CON2PAL6");
    }

    #[test]
    fn test_template_is_pure() {
        let counter = UniqueIdCounter::default();
        let first = build_empty_container(&counter);
        let second = build_empty_container(&counter);
        assert_eq!(first, second);
    }

    #[test]
    fn test_template_has_no_provenance() {
        let container = build_empty_container(&UniqueIdCounter::default());
        assert!(container.provenance.supplychain.is_empty());
        assert!(container.recipient.is_empty());
    }
}
