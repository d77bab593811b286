//! Inventory - Fixed-capacity, index-addressed item storage

use super::EquipError;
use crate::item::{Item, ItemLocation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default number of inventory slots
pub const DEFAULT_CAPACITY: usize = 36;

/// Bag of items addressed by slot index. No two items share an index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    capacity: usize,
    items: BTreeMap<usize, Item>,
}

impl Default for Inventory {
    fn default() -> Self {
        Inventory::with_capacity(DEFAULT_CAPACITY)
    }
}

impl Inventory {
    pub fn with_capacity(capacity: usize) -> Self {
        Inventory {
            capacity,
            items: BTreeMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.first_free_slot().is_none()
    }

    pub fn free_slots(&self) -> usize {
        self.capacity.saturating_sub(self.items.len())
    }

    /// Lowest unused index
    pub fn first_free_slot(&self) -> Option<usize> {
        (0..self.capacity).find(|index| !self.items.contains_key(index))
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(&index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Item)> + '_ {
        self.items.iter().map(|(index, item)| (*index, item))
    }

    /// Place an item in the first free slot and return its index
    pub fn add(&mut self, item: Item) -> Result<usize, EquipError> {
        let index = self.first_free_slot().ok_or(EquipError::InventoryFull)?;
        self.put(index, item);
        Ok(index)
    }

    /// Take an item out of the inventory. Its location becomes unplaced.
    pub fn remove(&mut self, index: usize) -> Result<Item, EquipError> {
        let mut item = self
            .items
            .remove(&index)
            .ok_or(EquipError::ItemNotFound(index))?;
        item.slot = ItemLocation::Unplaced;
        Ok(item)
    }

    /// Destroy an item
    pub fn delete(&mut self, index: usize) -> Result<Item, EquipError> {
        let item = self.remove(index)?;
        tracing::debug!(index, item = %item.name, "Deleted inventory item");
        Ok(item)
    }

    /// Place an item at a specific index. The caller guarantees the index is free.
    pub(crate) fn put(&mut self, index: usize, mut item: Item) {
        item.slot = ItemLocation::Inventory(index);
        self.items.insert(index, item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemGenerator, ItemRequest};
    use crate::types::{CharacterClass, SlotKey};

    fn any_item() -> Item {
        ItemGenerator::default().generate(&ItemRequest::new(SlotKey::Boots, CharacterClass::Warrior))
    }

    #[test]
    fn test_add_uses_first_free_slot() {
        let mut inv = Inventory::with_capacity(4);
        assert_eq!(inv.add(any_item()).unwrap(), 0);
        assert_eq!(inv.add(any_item()).unwrap(), 1);
        assert_eq!(inv.add(any_item()).unwrap(), 2);

        inv.remove(1).unwrap();
        assert_eq!(inv.add(any_item()).unwrap(), 1);
        assert_eq!(inv.get(1).unwrap().slot, ItemLocation::Inventory(1));
    }

    #[test]
    fn test_full_inventory_rejects() {
        let mut inv = Inventory::with_capacity(2);
        inv.add(any_item()).unwrap();
        inv.add(any_item()).unwrap();
        assert!(inv.is_full());
        assert_eq!(inv.free_slots(), 0);
        assert_eq!(inv.add(any_item()), Err(EquipError::InventoryFull));
        assert_eq!(inv.len(), 2);
    }

    #[test]
    fn test_remove_clears_location() {
        let mut inv = Inventory::default();
        let index = inv.add(any_item()).unwrap();
        let item = inv.remove(index).unwrap();
        assert_eq!(item.slot, ItemLocation::Unplaced);
        assert_eq!(inv.remove(index), Err(EquipError::ItemNotFound(index)));
    }

    #[test]
    fn test_delete_missing_index() {
        let mut inv = Inventory::default();
        assert_eq!(inv.delete(5), Err(EquipError::ItemNotFound(5)));
        assert_eq!(inv.capacity(), DEFAULT_CAPACITY);
    }
}
