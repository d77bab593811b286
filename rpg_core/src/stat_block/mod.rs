//! Character stats: base values, aggregated totals and the aggregator

mod aggregator;
mod computed;
mod stat_map;

pub use aggregator::{recompute, recompute_from_sources, HandState, StatAccumulator};
pub use stat_map::StatMap;

use crate::types::{CharacterClass, StatName};
use serde::{Deserialize, Serialize};

/// Attack speed and derived-stat constants
pub mod constants {
    /// Attack speed never drops below this many attacks per second
    pub const MIN_ATTACK_SPEED: f64 = 0.2;

    /// Speed of an empty or speedless primary hand
    pub const UNARMED_ATTACK_SPEED: f64 = 1.0;

    /// Off-hand speed contributions, as a fraction of the off-hand weapon's speed
    pub const SHIELD_SPEED_BONUS: f64 = 0.0;
    pub const FOCUS_SPEED_BONUS: f64 = 0.05;
    pub const ROGUE_DUAL_WIELD_BONUS: f64 = 0.25;
    pub const DUAL_WIELD_BONUS: f64 = 0.10;

    /// Attribute points per derived point
    pub const STRENGTH_PER_BONUS_DAMAGE: f64 = 5.0;
    pub const INTELLIGENCE_PER_MANA: f64 = 5.0;
    pub const VITALITY_PER_HEALTH: f64 = 5.0;
    pub const INTELLIGENCE_PER_AVOIDANCE: f64 = 10.0;
    pub const AGILITY_PER_DODGE: f64 = 10.0;
}

/// Round to a fixed number of decimal places
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// A character's own stats before any equipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseStats {
    pub class: CharacterClass,
    #[serde(rename = "Strength")]
    pub strength: f64,
    #[serde(rename = "Agility", alias = "Dexterity")]
    pub agility: f64,
    #[serde(rename = "Intelligence")]
    pub intelligence: f64,
    #[serde(rename = "Vitality")]
    pub vitality: f64,
    pub base_health: f64,
    pub base_mana: f64,
    #[serde(rename = "Armor", default)]
    pub armor: f64,
    #[serde(rename = "Block", default)]
    pub block: f64,
    #[serde(rename = "Dodge", default)]
    pub dodge: f64,
    #[serde(rename = "Critical Chance", default)]
    pub critical_chance: f64,
    #[serde(rename = "Critical Damage", default)]
    pub critical_damage: f64,
}

impl BaseStats {
    /// Level 1 stats for a freshly created character of the given class
    pub fn for_class(class: CharacterClass) -> Self {
        let mut base = BaseStats {
            class,
            strength: 5.0,
            agility: 5.0,
            intelligence: 5.0,
            vitality: 5.0,
            base_health: 100.0,
            base_mana: 50.0,
            armor: 0.0,
            block: 0.0,
            dodge: 0.0,
            critical_chance: 5.0,
            critical_damage: 50.0,
        };
        match class.main_stat() {
            StatName::Strength => base.strength = 10.0,
            StatName::Intelligence => base.intelligence = 10.0,
            _ => base.agility = 10.0,
        }
        base
    }

    /// Every base stat as a (name, value) pair
    pub fn pairs(&self) -> [(StatName, f64); 11] {
        [
            (StatName::Strength, self.strength),
            (StatName::Agility, self.agility),
            (StatName::Intelligence, self.intelligence),
            (StatName::Vitality, self.vitality),
            (StatName::BaseHealth, self.base_health),
            (StatName::BaseMana, self.base_mana),
            (StatName::Armor, self.armor),
            (StatName::Block, self.block),
            (StatName::Dodge, self.dodge),
            (StatName::CriticalChance, self.critical_chance),
            (StatName::CriticalDamage, self.critical_damage),
        ]
    }
}

/// Effective stats: base + every equipped item + derived values.
///
/// Only the aggregator can build one, so a snapshot is always the result of
/// a full recompute.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct TotalStats {
    stats: StatMap,
}

impl TotalStats {
    pub(crate) fn from_map(stats: StatMap) -> Self {
        TotalStats { stats }
    }

    pub fn get(&self, stat: StatName) -> f64 {
        self.stats.get(stat)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatName, f64)> + '_ {
        self.stats.iter()
    }

    pub fn as_map(&self) -> &StatMap {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert!((round_to(1.234, 1) - 1.2).abs() < 1e-9);
        assert!((round_to(1.256, 2) - 1.26).abs() < 1e-9);
        assert!((round_to(10.5, 0) - 11.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_class_main_stat_raised() {
        let warrior = BaseStats::for_class(CharacterClass::Warrior);
        assert!((warrior.strength - 10.0).abs() < f64::EPSILON);
        assert!((warrior.agility - 5.0).abs() < f64::EPSILON);

        let rogue = BaseStats::for_class(CharacterClass::Rogue);
        assert!((rogue.agility - 10.0).abs() < f64::EPSILON);

        let mage = BaseStats::for_class(CharacterClass::Mage);
        assert!((mage.intelligence - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_base_stats_accepts_dexterity_key() {
        let json = r#"{
            "class": "Rogue",
            "Strength": 5, "Dexterity": 12, "Intelligence": 5, "Vitality": 5,
            "base_health": 100, "base_mana": 50
        }"#;
        let base: BaseStats = serde_json::from_str(json).unwrap();
        assert!((base.agility - 12.0).abs() < f64::EPSILON);
        assert!((base.armor - 0.0).abs() < f64::EPSILON);
    }
}
