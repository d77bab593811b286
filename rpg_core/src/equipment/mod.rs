//! Equipment - Equipped items, the bounded inventory and equip/unequip transitions

mod inventory;
mod manager;

pub use inventory::Inventory;

use crate::item::Item;
use crate::types::{CharacterClass, SlotKey, WeaponType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Why an equip or unequip was rejected. The character is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EquipError {
    #[error("item for '{item}' cannot go in the {target} slot")]
    InvalidSlot { item: String, target: SlotKey },

    #[error("'{0}' cannot be equipped")]
    NotEquippable(String),

    #[error("a {class} cannot wield a {weapon} in the {slot} slot")]
    ClassRestricted {
        class: CharacterClass,
        weapon: WeaponType,
        slot: SlotKey,
    },

    #[error("the secondary slot is blocked by a two-handed weapon")]
    SecondaryBlockedByTwoHanded,

    #[error("inventory is full")]
    InventoryFull,

    #[error("no item at inventory index {0}")]
    ItemNotFound(usize),

    #[error("nothing equipped in the {0} slot")]
    SlotEmpty(SlotKey),
}

/// Items currently worn, at most one per slot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquipmentSet {
    slots: BTreeMap<SlotKey, Item>,
}

impl EquipmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: SlotKey) -> Option<&Item> {
        self.slots.get(&slot)
    }

    pub fn is_empty_slot(&self, slot: SlotKey) -> bool {
        !self.slots.contains_key(&slot)
    }

    /// Weapon type held in a hand slot, if any
    pub fn weapon_type(&self, slot: SlotKey) -> Option<WeaponType> {
        self.get(slot).and_then(Item::weapon_type)
    }

    pub fn has_two_handed_primary(&self) -> bool {
        self.get(SlotKey::Primary).is_some_and(Item::is_two_handed)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotKey, &Item)> + '_ {
        self.slots.iter().map(|(slot, item)| (*slot, item))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Put an item in a slot without any rule checks, returning the previous occupant
    pub(crate) fn insert(&mut self, slot: SlotKey, item: Item) -> Option<Item> {
        self.slots.insert(slot, item)
    }

    pub(crate) fn take(&mut self, slot: SlotKey) -> Option<Item> {
        self.slots.remove(&slot)
    }
}

impl FromIterator<(SlotKey, Item)> for EquipmentSet {
    fn from_iter<I: IntoIterator<Item = (SlotKey, Item)>>(iter: I) -> Self {
        EquipmentSet {
            slots: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemGenerator, ItemRequest};

    #[test]
    fn test_one_item_per_slot() {
        let generator = ItemGenerator::default();
        let mut set = EquipmentSet::new();
        let first = generator.generate(&ItemRequest::new(SlotKey::Head, CharacterClass::Mage));
        let second = generator.generate(&ItemRequest::new(SlotKey::Head, CharacterClass::Mage));

        assert!(set.insert(SlotKey::Head, first.clone()).is_none());
        assert_eq!(set.insert(SlotKey::Head, second), Some(first));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_two_handed_primary_detection() {
        let generator = ItemGenerator::default();
        let staff = generator.generate(
            &ItemRequest::new(SlotKey::Primary, CharacterClass::Mage).weapon(WeaponType::Staff),
        );
        let set: EquipmentSet = [(SlotKey::Primary, staff)].into_iter().collect();
        assert!(set.has_two_handed_primary());
        assert_eq!(set.weapon_type(SlotKey::Primary), Some(WeaponType::Staff));
        assert!(set.is_empty_slot(SlotKey::Secondary));
    }

    #[test]
    fn test_json_keyed_by_slot() {
        let generator = ItemGenerator::default();
        let ring = generator.generate(&ItemRequest::new(SlotKey::Ring, CharacterClass::Rogue));
        let set: EquipmentSet = [(SlotKey::Ring, ring)].into_iter().collect();
        let value = serde_json::to_value(&set).unwrap();
        assert_eq!(value["ring"]["subtype"], "ring");
    }
}
