//! Character - A player's stats, gear, inventory and progress

use crate::config::ProgressionConstants;
use crate::equipment::{EquipmentSet, Inventory};
use crate::progression::{IdleReward, ProgressionState};
use crate::stat_block::{recompute, BaseStats, TotalStats};
use crate::types::CharacterClass;
use serde::{Deserialize, Serialize};

/// A playable character.
///
/// Total stats are cached and refreshed after every change to base stats or
/// equipment, so they are never read stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CharacterRecord", into = "CharacterRecord")]
pub struct Character {
    pub name: String,
    pub class: CharacterClass,
    base: BaseStats,
    pub(crate) equipment: EquipmentSet,
    pub(crate) inventory: Inventory,
    pub progression: ProgressionState,
    total: TotalStats,
}

/// Persisted shape of a character. Total stats are never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub name: String,
    pub class: CharacterClass,
    pub base_stats: BaseStats,
    #[serde(default)]
    pub equipment: EquipmentSet,
    #[serde(default)]
    pub inventory: Inventory,
    #[serde(flatten)]
    pub progression: ProgressionState,
}

impl From<CharacterRecord> for Character {
    fn from(record: CharacterRecord) -> Self {
        let total = recompute(&record.base_stats, &record.equipment);
        Character {
            name: record.name,
            class: record.class,
            base: record.base_stats,
            equipment: record.equipment,
            inventory: record.inventory,
            progression: record.progression,
            total,
        }
    }
}

impl From<Character> for CharacterRecord {
    fn from(character: Character) -> Self {
        CharacterRecord {
            name: character.name,
            class: character.class,
            base_stats: character.base,
            equipment: character.equipment,
            inventory: character.inventory,
            progression: character.progression,
        }
    }
}

impl Character {
    /// A fresh level 1 character
    pub fn new(name: impl Into<String>, class: CharacterClass) -> Self {
        Self::with_inventory(name, class, Inventory::default())
    }

    pub fn with_inventory(name: impl Into<String>, class: CharacterClass, inventory: Inventory) -> Self {
        Character::from(CharacterRecord {
            name: name.into(),
            class,
            base_stats: BaseStats::for_class(class),
            equipment: EquipmentSet::new(),
            inventory,
            progression: ProgressionState::default(),
        })
    }

    pub fn base_stats(&self) -> &BaseStats {
        &self.base
    }

    pub fn total_stats(&self) -> &TotalStats {
        &self.total
    }

    pub fn equipment(&self) -> &EquipmentSet {
        &self.equipment
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn level(&self) -> u32 {
        self.progression.level
    }

    /// Edit base stats; totals are refreshed afterwards
    pub fn update_base_stats(&mut self, edit: impl FnOnce(&mut BaseStats)) {
        edit(&mut self.base);
        self.refresh();
    }

    pub(crate) fn refresh(&mut self) {
        self.total = recompute(&self.base, &self.equipment);
    }

    /// Add experience, applying per-level health and mana gains.
    /// Returns the number of levels gained.
    pub fn apply_experience(&mut self, amount: u64, constants: &ProgressionConstants) -> u32 {
        let gained = self.progression.add_experience(amount, constants);
        if gained > 0 {
            self.base.base_health += constants.health_per_level * gained as f64;
            self.base.base_mana += constants.mana_per_level * gained as f64;
            self.refresh();
            tracing::info!(
                character = %self.name,
                level = self.progression.level,
                gained,
                "Level up"
            );
        }
        gained
    }

    pub fn add_copper(&mut self, amount: u64) {
        self.progression.coins.add_copper(amount);
    }

    /// Claim the pending offline reward. Returns `None` if there is none or
    /// it was already claimed.
    pub fn claim_idle_reward(&mut self, constants: &ProgressionConstants) -> Option<IdleReward> {
        let reward = self.progression.take_idle_reward()?;
        self.progression.coins.add_gold(reward.gold);
        self.apply_experience(reward.xp, constants);
        tracing::info!(character = %self.name, xp = reward.xp, gold = reward.gold, "Idle reward claimed");
        Some(reward)
    }

    /// Record a cleared dungeon run. Returns true on a new deepest clear.
    pub fn record_dungeon_clear(&mut self, level: u32) -> bool {
        let record = self.progression.dungeon.record_clear(level);
        tracing::info!(
            character = %self.name,
            level,
            next = self.progression.dungeon.current_level,
            record,
            "Dungeon cleared"
        );
        record
    }

    pub fn into_record(self) -> CharacterRecord {
        self.into()
    }
}
