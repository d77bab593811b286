//! Equip and unequip transitions on a character.
//!
//! Every operation validates fully before touching state, so a rejected
//! call leaves equipment, inventory and totals exactly as they were.

use super::EquipError;
use crate::character::Character;
use crate::item::{Item, ItemLocation};
use crate::types::SlotKey;

impl Character {
    /// Equip an inventory item into the slot it was generated for
    pub fn equip(&mut self, inventory_index: usize) -> Result<(), EquipError> {
        let item = self
            .inventory
            .get(inventory_index)
            .ok_or(EquipError::ItemNotFound(inventory_index))?;
        let target = item
            .subtype()
            .ok_or_else(|| EquipError::NotEquippable(item.name.clone()))?;
        self.equip_to(inventory_index, target)
    }

    /// Equip an inventory item into a specific slot.
    ///
    /// Checks, in order: the item's subtype matches `target`; the class may
    /// wield the weapon there; a two-handed primary does not block the
    /// secondary slot; the inventory has room for every displaced item.
    pub fn equip_to(&mut self, inventory_index: usize, target: SlotKey) -> Result<(), EquipError> {
        let item = self
            .inventory
            .get(inventory_index)
            .ok_or(EquipError::ItemNotFound(inventory_index))?;

        if item.subtype() != Some(target) {
            return Err(EquipError::InvalidSlot {
                item: item.name.clone(),
                target,
            });
        }

        let two_handed = item.is_two_handed();
        // Two-handers always live in the primary hand
        let target = if two_handed { SlotKey::Primary } else { target };

        if let Some(weapon) = item.weapon_type() {
            if !self.class.can_wield(weapon, target) {
                return Err(EquipError::ClassRestricted {
                    class: self.class,
                    weapon,
                    slot: target,
                });
            }
        }

        if target == SlotKey::Secondary && self.equipment.has_two_handed_primary() {
            return Err(EquipError::SecondaryBlockedByTwoHanded);
        }

        let displaced: Vec<SlotKey> = if two_handed {
            [SlotKey::Primary, SlotKey::Secondary]
                .into_iter()
                .filter(|slot| !self.equipment.is_empty_slot(*slot))
                .collect()
        } else if self.equipment.is_empty_slot(target) {
            Vec::new()
        } else {
            vec![target]
        };

        // The equipped item frees its own inventory slot
        let room = self.inventory.free_slots() + 1;
        if displaced.len() > room {
            return Err(EquipError::InventoryFull);
        }

        // Commit
        let mut item = self.inventory.remove(inventory_index)?;
        let returned: Vec<Item> = displaced
            .into_iter()
            .filter_map(|slot| self.equipment.take(slot))
            .collect();
        let mut returned = returned.into_iter();
        if let Some(first) = returned.next() {
            self.inventory.put(inventory_index, first);
        }
        for other in returned {
            self.inventory.add(other)?;
        }

        item.slot = ItemLocation::Equipped(target);
        tracing::debug!(character = %self.name, item = %item.name, slot = %target, "Equipped item");
        self.equipment.insert(target, item);
        self.refresh();
        Ok(())
    }

    /// Move the item in `slot` back to the inventory
    pub fn unequip(&mut self, slot: SlotKey) -> Result<usize, EquipError> {
        if self.equipment.is_empty_slot(slot) {
            return Err(EquipError::SlotEmpty(slot));
        }
        if self.inventory.is_full() {
            return Err(EquipError::InventoryFull);
        }

        let item = self.equipment.take(slot).ok_or(EquipError::SlotEmpty(slot))?;
        tracing::debug!(character = %self.name, item = %item.name, slot = %slot, "Unequipped item");
        let index = self.inventory.add(item)?;
        self.refresh();
        Ok(index)
    }
}
