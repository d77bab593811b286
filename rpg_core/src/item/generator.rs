//! ItemGenerator - Procedural loot from slot, class, rarity and item level

use super::materials::{GatheringSkill, Material};
use super::{Item, ItemKind, ItemLocation};
use crate::config::LootConstants;
use crate::stat_block::{round_to, StatMap};
use crate::types::{CharacterClass, ItemCategory, Rarity, SlotKey, StatName, WeaponType};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inputs for one generated item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRequest {
    pub slot: SlotKey,
    pub class: CharacterClass,
    /// Rolled from the rarity table when absent
    #[serde(default)]
    pub rarity: Option<Rarity>,
    /// Ignored outside weapon slots; absent means a generic weapon
    #[serde(default)]
    pub weapon_type: Option<WeaponType>,
    #[serde(default = "default_item_level")]
    pub item_level: u32,
}

fn default_item_level() -> u32 {
    1
}

impl ItemRequest {
    pub fn new(slot: SlotKey, class: CharacterClass) -> Self {
        ItemRequest {
            slot,
            class,
            rarity: None,
            weapon_type: None,
            item_level: 1,
        }
    }

    pub fn rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = Some(rarity);
        self
    }

    pub fn weapon(mut self, weapon_type: WeaponType) -> Self {
        self.weapon_type = Some(weapon_type);
        self
    }

    /// Set the weapon type from a client-supplied name; unknown names fall
    /// back to a generic weapon.
    pub fn weapon_named(mut self, name: &str) -> Self {
        self.weapon_type = match name.parse::<WeaponType>() {
            Ok(weapon_type) => Some(weapon_type),
            Err(reason) => {
                tracing::debug!(%reason, "generating generic weapon");
                None
            }
        };
        self
    }

    pub fn level(mut self, item_level: u32) -> Self {
        self.item_level = item_level;
        self
    }
}

/// Stateless item factory over a loot table
#[derive(Debug, Clone, Default)]
pub struct ItemGenerator {
    constants: LootConstants,
}

impl ItemGenerator {
    pub fn new(constants: LootConstants) -> Self {
        ItemGenerator { constants }
    }

    pub fn constants(&self) -> &LootConstants {
        &self.constants
    }

    /// Generate an item (RNG handled internally)
    pub fn generate(&self, request: &ItemRequest) -> Item {
        let mut rng = rand::thread_rng();
        self.generate_with_rng(request, &mut rng)
    }

    /// Generate an item with a provided RNG (for deterministic testing).
    ///
    /// Never fails: unknown weapon archetypes and missing rarities degrade
    /// to a generic weapon and a rolled rarity.
    pub fn generate_with_rng(&self, request: &ItemRequest, rng: &mut impl Rng) -> Item {
        let rarity = request.rarity.unwrap_or_else(|| self.roll_rarity(rng));
        let level = request.item_level.max(1);
        let factor = self.constants.multiplier(rarity) * self.constants.level_scale(level);
        let slot = request.slot;

        let mut stats = StatMap::new();
        stats.set(
            request.class.main_stat(),
            round_to(self.constants.main_stat_base * factor, 1),
        );
        stats.set(
            StatName::Vitality,
            round_to(self.constants.vitality_base * factor, 1),
        );

        let kind = match slot.category() {
            ItemCategory::Armor => {
                stats.set(StatName::Armor, (self.constants.armor_base * factor).round());
                ItemKind::Armor { subtype: slot }
            }
            ItemCategory::Weapon => {
                let weapon_type = request
                    .weapon_type
                    .filter(|w| self.constants.archetype(*w).is_some());
                match weapon_type {
                    Some(weapon_type) => {
                        self.roll_archetype_stats(&mut stats, weapon_type, request, factor)
                    }
                    None => self.roll_generic_weapon_stats(&mut stats, slot, factor),
                }
                ItemKind::Weapon {
                    subtype: slot,
                    weapon_type,
                }
            }
            ItemCategory::Accessory => {
                stats.set(
                    StatName::CriticalChance,
                    round_to(self.constants.crit_chance_base * factor, 1),
                );
                stats.set(
                    StatName::CriticalDamage,
                    round_to(self.constants.crit_damage_base * factor, 1),
                );
                ItemKind::Accessory { subtype: slot }
            }
            ItemCategory::Misc => ItemKind::Misc {
                subtype: slot.key().to_string(),
            },
        };

        let label = match &kind {
            ItemKind::Weapon {
                weapon_type: Some(weapon_type),
                ..
            } => weapon_type.name().to_string(),
            _ => slot.title(),
        };

        Item {
            name: format!("{} {}", rarity, label),
            kind,
            rarity,
            level,
            stats,
            slot: ItemLocation::Unplaced,
        }
    }

    /// Gather one material (RNG handled internally)
    pub fn gather(&self, skill: GatheringSkill, skill_level: u32) -> Option<Item> {
        let mut rng = rand::thread_rng();
        self.gather_with_rng(skill, skill_level, &mut rng)
    }

    /// Pick one material the skill level unlocks, weighted by its rarity's
    /// drop weight. `None` when nothing is unlocked yet.
    ///
    /// When every unlocked rarity has zero weight the highest-level
    /// unlocked material is returned.
    pub fn gather_with_rng(
        &self,
        skill: GatheringSkill,
        skill_level: u32,
        rng: &mut impl Rng,
    ) -> Option<Item> {
        let unlocked: Vec<&Material> = skill
            .materials()
            .filter(|m| m.level <= skill_level.max(1))
            .collect();
        let fallback = *unlocked.last()?;

        let total: f64 = unlocked.iter().map(|m| self.constants.weight(m.rarity)).sum();
        if total <= 0.0 {
            return Some(fallback.to_item());
        }

        let roll = rng.gen_range(0.0..total);
        let mut threshold = 0.0;
        for material in &unlocked {
            threshold += self.constants.weight(material.rarity);
            if roll < threshold {
                return Some(material.to_item());
            }
        }
        Some(fallback.to_item())
    }

    /// Roll a rarity against the weight table.
    ///
    /// Rows are checked in declared order against a roll in
    /// `[0, total_weight)`; the last row is the fallback.
    pub fn roll_rarity(&self, rng: &mut impl Rng) -> Rarity {
        let table = &self.constants.rarities;
        let fallback = table.last().map(|t| t.rarity).unwrap_or(Rarity::Common);

        let total: f64 = table.iter().map(|t| t.weight.max(0.0)).sum();
        if total <= 0.0 {
            return fallback;
        }

        let roll = rng.gen_range(0.0..total);
        let mut threshold = 0.0;
        for tier in table {
            threshold += tier.weight.max(0.0);
            if roll < threshold {
                return tier.rarity;
            }
        }
        fallback
    }

    fn roll_archetype_stats(
        &self,
        stats: &mut StatMap,
        weapon_type: WeaponType,
        request: &ItemRequest,
        factor: f64,
    ) {
        let Some(archetype) = self.constants.archetype(weapon_type) else {
            return;
        };

        if weapon_type.is_blocking() {
            stats.set(StatName::Block, (archetype.base_block * factor).round());
        } else {
            let min = (0.85 * archetype.base_damage * factor).round().max(1.0);
            let max = (1.15 * archetype.base_damage * factor).round().max(min);
            stats.set(StatName::MinDamage, min);
            stats.set(StatName::MaxDamage, max);
        }

        if archetype.base_speed > 0.0 {
            let mut speed = archetype.base_speed;
            // Two-handers are always wielded in the primary hand
            if request.slot == SlotKey::Secondary && !weapon_type.is_two_handed() {
                speed -= match request.class {
                    CharacterClass::Rogue => self.constants.rogue_offhand_penalty,
                    _ => self.constants.offhand_penalty,
                };
            }
            stats.set(StatName::AttackSpeed, round_to(speed.max(0.0), 2));
        }
    }

    fn roll_generic_weapon_stats(&self, stats: &mut StatMap, slot: SlotKey, factor: f64) {
        if slot == SlotKey::Secondary {
            stats.set(
                StatName::WeaponDamage,
                (self.constants.generic_secondary_damage * factor).round(),
            );
            stats.set(
                StatName::Block,
                round_to(self.constants.generic_secondary_block * factor, 1),
            );
            stats.set(
                StatName::Dodge,
                round_to(self.constants.generic_secondary_dodge * factor, 1),
            );
        } else {
            stats.set(
                StatName::WeaponDamage,
                (self.constants.generic_primary_damage * factor).round(),
            );
        }
    }
}
