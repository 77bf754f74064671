//! Seven-slot resource counters.
//!
//! Tiles and players both hold an [`Inventory`]. Counters are unsigned and
//! every mutation is checked, so no sequence of operations can drive a
//! counter negative or wrap it.

use serde::{Deserialize, Serialize};

use crate::enums::Resource;
use crate::error::TypesError;

/// One non-negative counter per [`Resource`], in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Inventory {
    counts: [u32; 7],
}

impl Inventory {
    /// An inventory holding nothing.
    pub const fn empty() -> Self {
        Self { counts: [0; 7] }
    }

    /// Build an inventory from counts in wire order.
    pub const fn from_counts(counts: [u32; 7]) -> Self {
        Self { counts }
    }

    /// Units of `resource` held.
    pub fn get(&self, resource: Resource) -> u32 {
        self.counts.get(resource.index()).copied().unwrap_or(0)
    }

    /// Counts in wire order.
    pub const fn counts(&self) -> [u32; 7] {
        self.counts
    }

    /// Sum of all counters, saturating.
    pub fn total(&self) -> u32 {
        self.counts.iter().fold(0u32, |acc, n| acc.saturating_add(*n))
    }

    /// Whether every counter is zero.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|n| *n == 0)
    }

    /// Add `amount` units of `resource`.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::Overflow`] if the counter would overflow; the
    /// inventory is left unchanged.
    pub fn add(&mut self, resource: Resource, amount: u32) -> Result<(), TypesError> {
        let slot = self
            .counts
            .get_mut(resource.index())
            .ok_or(TypesError::Overflow(resource))?;
        *slot = slot
            .checked_add(amount)
            .ok_or(TypesError::Overflow(resource))?;
        Ok(())
    }

    /// Remove `amount` units of `resource`.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::InsufficientResource`] if fewer than `amount`
    /// units are held; the inventory is left unchanged.
    pub fn remove(&mut self, resource: Resource, amount: u32) -> Result<(), TypesError> {
        let available = self.get(resource);
        let insufficient = TypesError::InsufficientResource {
            resource,
            requested: amount,
            available,
        };
        let Some(slot) = self.counts.get_mut(resource.index()) else {
            return Err(insufficient);
        };
        *slot = slot.checked_sub(amount).ok_or(insufficient)?;
        Ok(())
    }

    /// Whether every counter is at least the matching counter in `other`.
    pub fn covers(&self, other: &Self) -> bool {
        self.counts
            .iter()
            .zip(other.counts.iter())
            .all(|(have, need)| have >= need)
    }

    /// Subtract `other` counter-by-counter, all or nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::InsufficientResource`] for the first counter
    /// that would go negative; the inventory is left unchanged.
    pub fn debit(&mut self, other: &Self) -> Result<(), TypesError> {
        let mut next = *self;
        for resource in Resource::ALL {
            next.remove(resource, other.get(resource))?;
        }
        *self = next;
        Ok(())
    }

    /// Add every counter of `other` into this inventory, all or nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::Overflow`] if any counter would overflow.
    pub fn merge(&mut self, other: &Self) -> Result<(), TypesError> {
        let mut next = *self;
        for resource in Resource::ALL {
            next.add(resource, other.get(resource))?;
        }
        *self = next;
        Ok(())
    }

    /// Move everything out, leaving this inventory empty.
    pub const fn take_all(&mut self) -> Self {
        let out = *self;
        self.counts = [0; 7];
        out
    }

    /// Counts separated by spaces, as used by observer payloads.
    pub fn wire_counts(&self) -> String {
        self.counts
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Agent-facing description: `[food 10, linemate 0, ...]`.
    pub fn describe(&self) -> String {
        let body = Resource::ALL
            .iter()
            .map(|r| format!("{} {}", r.name(), self.get(*r)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("[{body}]")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn remove_refuses_to_go_negative() {
        let mut inv = Inventory::empty();
        inv.add(Resource::Sibur, 1).unwrap();
        inv.remove(Resource::Sibur, 1).unwrap();
        let err = inv.remove(Resource::Sibur, 1).unwrap_err();
        assert_eq!(
            err,
            TypesError::InsufficientResource {
                resource: Resource::Sibur,
                requested: 1,
                available: 0,
            }
        );
        assert!(inv.is_empty());
    }

    #[test]
    fn add_detects_overflow() {
        let mut inv = Inventory::from_counts([u32::MAX, 0, 0, 0, 0, 0, 0]);
        assert_eq!(inv.add(Resource::Food, 1), Err(TypesError::Overflow(Resource::Food)));
        assert_eq!(inv.get(Resource::Food), u32::MAX);
    }

    #[test]
    fn debit_is_all_or_nothing() {
        let mut inv = Inventory::from_counts([0, 2, 1, 0, 0, 0, 0]);
        let cost = Inventory::from_counts([0, 1, 1, 1, 0, 0, 0]);
        assert!(!inv.covers(&cost));
        assert!(inv.debit(&cost).is_err());
        assert_eq!(inv.counts(), [0, 2, 1, 0, 0, 0, 0]);

        let cheap = Inventory::from_counts([0, 1, 1, 0, 0, 0, 0]);
        inv.debit(&cheap).unwrap();
        assert_eq!(inv.counts(), [0, 1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn take_all_empties() {
        let mut inv = Inventory::from_counts([3, 1, 0, 0, 0, 0, 2]);
        let out = inv.take_all();
        assert_eq!(out.total(), 6);
        assert!(inv.is_empty());
    }

    #[test]
    fn renders_wire_and_agent_forms() {
        let inv = Inventory::from_counts([10, 1, 0, 0, 0, 0, 0]);
        assert_eq!(inv.wire_counts(), "10 1 0 0 0 0 0");
        assert_eq!(
            inv.describe(),
            "[food 10, linemate 1, deraumere 0, sibur 0, mendiane 0, phiras 0, thystame 0]"
        );
    }
}
