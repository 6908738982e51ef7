//! # Identifier Generation
//!
//! Monotonic, collision-free identifiers for containers and their nested
//! packaging, all derived from the singleton [`UniqueIdCounter`] record.
//!
//! Ids concatenate a fixed prefix with a decimal counter value:
//!
//! ```text
//! CON4                      container
//! CON4PAL10                 pallet   (globally numbered)
//! CON4PAL10CASE2            case     (numbered within its pallet)
//! CON4PAL10CASE2UNIT3       unit     (numbered within its case)
//! ```
//!
//! Every child id is a prefix-extension of its parent, so any nested id
//! resolves to its container without a lookup. Uniqueness holds as long as
//! the counter is monotonic and never reused; the service commits the
//! counter advance atomically with the container write it describes.

use super::entities::UniqueIdCounter;

/// Container id prefix.
pub const CONTAINER_PREFIX: &str = "CON";
/// Pallet id infix, appended to the container id.
pub const PALLET_PREFIX: &str = "PAL";
/// Case id infix, appended to the pallet id.
pub const CASE_PREFIX: &str = "CASE";
/// Unit id infix, appended to the case id.
pub const UNIT_PREFIX: &str = "UNIT";

/// Fan-out at every level of the packaging hierarchy: a container carries
/// three pallets, a pallet three cases, a case three units.
pub const FAN_OUT: usize = 3;

impl UniqueIdCounter {
    /// Id the next shipped container will carry.
    pub fn next_container_id(&self) -> String {
        format!("{}{}", CONTAINER_PREFIX, self.container_max_id + 1)
    }

    /// Ids of the pallet block for the next container. Pallets are numbered
    /// from a single global counter, three per container.
    pub fn next_pallet_ids(&self, container_id: &str) -> Vec<String> {
        (1..=FAN_OUT as u64)
            .map(|offset| {
                format!("{}{}{}", container_id, PALLET_PREFIX, self.pallet_max_id + offset)
            })
            .collect()
    }

    /// Advance past one shipped container: one container id and one block
    /// of three pallet ids are now spent.
    pub fn advance(&mut self) {
        self.container_max_id += 1;
        self.pallet_max_id += FAN_OUT as u64;
    }
}

/// Case id within a pallet, `k` counted from 1.
pub fn case_id(pallet_id: &str, k: usize) -> String {
    format!("{pallet_id}{CASE_PREFIX}{k}")
}

/// Unit id within a case, `k` counted from 1.
pub fn unit_id(case_id: &str, k: usize) -> String {
    format!("{case_id}{UNIT_PREFIX}{k}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_container_id() {
        let counter = UniqueIdCounter::default();
        assert_eq!(counter.next_container_id(), "CON1");
    }

    #[test]
    fn test_pallet_block_numbering() {
        let counter = UniqueIdCounter {
            container_max_id: 3,
            pallet_max_id: 9,
        };
        let ids = counter.next_pallet_ids("CON4");
        assert_eq!(ids, vec!["CON4PAL10", "CON4PAL11", "CON4PAL12"]);
    }

    #[test]
    fn test_advance_spends_one_container_and_three_pallets() {
        let mut counter = UniqueIdCounter::default();
        counter.advance();
        counter.advance();

        assert_eq!(counter.container_max_id, 2);
        assert_eq!(counter.pallet_max_id, 6);
        assert_eq!(counter.next_container_id(), "CON3");
        assert_eq!(counter.next_pallet_ids("CON3")[0], "CON3PAL7");
    }

    #[test]
    fn test_ids_are_strictly_increasing_across_advances() {
        let mut counter = UniqueIdCounter::default();
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(counter.next_container_id());
            counter.advance();
        }
        assert_eq!(seen, vec!["CON1", "CON2", "CON3", "CON4", "CON5"]);
    }

    #[test]
    fn test_nested_ids_extend_parent() {
        let cid = case_id("CON1PAL2", 3);
        assert_eq!(cid, "CON1PAL2CASE3");
        assert_eq!(unit_id(&cid, 1), "CON1PAL2CASE3UNIT1");
        assert!(unit_id(&cid, 1).starts_with(&cid));
    }
}
