//! Items: typed item shape, procedural generation and stat comparison

mod compare;
mod generator;
mod materials;

pub use compare::{compare_items, StatChange, StatComparison};
pub use generator::{ItemGenerator, ItemRequest};
pub use materials::{material, GatheringSkill, Material, MATERIALS};

use crate::stat_block::StatMap;
use crate::types::{ItemCategory, Rarity, SlotKey, StatName, WeaponType};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A generated item. Everything but `slot` is fixed at generation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(flatten)]
    pub kind: ItemKind,
    pub rarity: Rarity,
    pub level: u32,
    pub stats: StatMap,
    #[serde(default)]
    pub slot: ItemLocation,
}

/// Item category with the data specific to it.
///
/// Serialized inline on the item as `type` + `subtype` (+ `weaponType`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    Armor {
        subtype: SlotKey,
    },
    Weapon {
        subtype: SlotKey,
        #[serde(rename = "weaponType", default, skip_serializing_if = "Option::is_none")]
        weapon_type: Option<WeaponType>,
    },
    Accessory {
        subtype: SlotKey,
    },
    /// Non-equippable items such as gathered materials
    Misc {
        subtype: String,
    },
}

impl Item {
    pub fn category(&self) -> ItemCategory {
        match self.kind {
            ItemKind::Armor { .. } => ItemCategory::Armor,
            ItemKind::Weapon { .. } => ItemCategory::Weapon,
            ItemKind::Accessory { .. } => ItemCategory::Accessory,
            ItemKind::Misc { .. } => ItemCategory::Misc,
        }
    }

    /// Equipment slot this item was generated for, if it is equippable
    pub fn subtype(&self) -> Option<SlotKey> {
        match &self.kind {
            ItemKind::Armor { subtype }
            | ItemKind::Weapon { subtype, .. }
            | ItemKind::Accessory { subtype } => Some(*subtype),
            ItemKind::Misc { .. } => None,
        }
    }

    pub fn weapon_type(&self) -> Option<WeaponType> {
        match &self.kind {
            ItemKind::Weapon { weapon_type, .. } => *weapon_type,
            _ => None,
        }
    }

    pub fn is_two_handed(&self) -> bool {
        self.weapon_type().is_some_and(|w| w.is_two_handed())
    }

    pub fn stat(&self, stat: StatName) -> f64 {
        self.stats.get(stat)
    }

    /// Damage roll bounds for a weapon hit.
    ///
    /// Archetype weapons carry MinDamage/MaxDamage; generic weapons carry a
    /// single WeaponDamage value. Blocking weapons have no damage range.
    pub fn damage_range(&self) -> Option<(u32, u32)> {
        let min = self.stats.try_get(StatName::MinDamage);
        let max = self.stats.try_get(StatName::MaxDamage);
        match (min, max) {
            (Some(min), Some(max)) => {
                let min = min.max(0.0) as u32;
                let max = (max.max(0.0) as u32).max(min);
                Some((min, max))
            }
            _ => self
                .stats
                .try_get(StatName::WeaponDamage)
                .map(|flat| {
                    let flat = flat.max(0.0) as u32;
                    (flat, flat)
                }),
        }
    }
}

/// Where an item currently lives.
///
/// Serialized as the client expects: an inventory index, the string
/// `"equipped:<slot>"`, or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemLocation {
    #[default]
    Unplaced,
    Inventory(usize),
    Equipped(SlotKey),
}

impl Serialize for ItemLocation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ItemLocation::Unplaced => serializer.serialize_none(),
            ItemLocation::Inventory(index) => serializer.serialize_u64(*index as u64),
            ItemLocation::Equipped(slot) => {
                serializer.serialize_str(&format!("equipped:{}", slot.key()))
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLocation {
    Index(usize),
    Key(String),
}

impl<'de> Deserialize<'de> for ItemLocation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<RawLocation>::deserialize(deserializer)? {
            None => Ok(ItemLocation::Unplaced),
            Some(RawLocation::Index(index)) => Ok(ItemLocation::Inventory(index)),
            Some(RawLocation::Key(key)) => {
                let slot = key
                    .strip_prefix("equipped:")
                    .ok_or_else(|| D::Error::custom(format!("invalid item location '{}'", key)))?;
                slot.parse::<SlotKey>()
                    .map(ItemLocation::Equipped)
                    .map_err(D::Error::custom)
            }
        }
    }
}
