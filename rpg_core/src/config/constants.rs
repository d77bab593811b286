//! Game constants configuration

use super::ConfigError;
use crate::types::{Rarity, WeaponType};
use serde::{Deserialize, Serialize};

/// Tunable game constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub loot: LootConstants,
    #[serde(default)]
    pub enemies: EnemyConstants,
    #[serde(default)]
    pub combat: CombatConstants,
    #[serde(default)]
    pub progression: ProgressionConstants,
}

impl GameConstants {
    /// Reject tables the generators cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.loot.rarities.is_empty() {
            return Err(ConfigError::ValidationError(
                "loot.rarities must not be empty".to_string(),
            ));
        }
        if let Some(tier) = self.loot.rarities.iter().find(|t| t.weight < 0.0 || t.multiplier <= 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "rarity {} needs a non-negative weight and a positive multiplier",
                tier.rarity
            )));
        }
        if self.enemies.tiers.is_empty() {
            return Err(ConfigError::ValidationError(
                "enemies.tiers must not be empty".to_string(),
            ));
        }
        if self.enemies.tiers.windows(2).any(|w| w[0].min_level >= w[1].min_level) {
            return Err(ConfigError::ValidationError(
                "enemies.tiers must be sorted by strictly increasing min_level".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.enemies.elite_chance) {
            return Err(ConfigError::ValidationError(format!(
                "enemies.elite_chance {} outside 0..=1",
                self.enemies.elite_chance
            )));
        }
        if self.progression.xp_per_level == 0 {
            return Err(ConfigError::ValidationError(
                "progression.xp_per_level must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// One row of the rarity table: drop weight and stat multiplier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RarityTier {
    pub rarity: Rarity,
    pub weight: f64,
    pub multiplier: f64,
}

/// Base values for a weapon archetype before rarity/level scaling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponArchetype {
    pub weapon_type: WeaponType,
    /// Centre of the damage roll (0 for blocking weapons)
    #[serde(default)]
    pub base_damage: f64,
    /// Attacks per second
    #[serde(default)]
    pub base_speed: f64,
    /// Block chance for blocking weapons
    #[serde(default)]
    pub base_block: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LootConstants {
    /// Rarity table in roll order; the last row is the fallback
    #[serde(default = "default_rarities")]
    pub rarities: Vec<RarityTier>,
    #[serde(default = "default_weapons")]
    pub weapons: Vec<WeaponArchetype>,
    /// Per-level growth: `1 + (level - 1) * step`
    #[serde(default = "default_level_scale_step")]
    pub level_scale_step: f64,
    #[serde(default = "default_armor_base")]
    pub armor_base: f64,
    #[serde(default = "default_main_stat_base")]
    pub main_stat_base: f64,
    #[serde(default = "default_vitality_base")]
    pub vitality_base: f64,
    #[serde(default = "default_crit_chance_base")]
    pub crit_chance_base: f64,
    #[serde(default = "default_crit_damage_base")]
    pub crit_damage_base: f64,
    #[serde(default = "default_generic_primary_damage")]
    pub generic_primary_damage: f64,
    #[serde(default = "default_generic_secondary_damage")]
    pub generic_secondary_damage: f64,
    #[serde(default = "default_generic_secondary_block")]
    pub generic_secondary_block: f64,
    #[serde(default = "default_generic_secondary_dodge")]
    pub generic_secondary_dodge: f64,
    /// Attack speed lost by a Rogue's off-hand weapon
    #[serde(default = "default_rogue_offhand_penalty")]
    pub rogue_offhand_penalty: f64,
    /// Attack speed lost by everyone else's off-hand weapon
    #[serde(default = "default_offhand_penalty")]
    pub offhand_penalty: f64,
}

impl Default for LootConstants {
    fn default() -> Self {
        LootConstants {
            rarities: default_rarities(),
            weapons: default_weapons(),
            level_scale_step: default_level_scale_step(),
            armor_base: default_armor_base(),
            main_stat_base: default_main_stat_base(),
            vitality_base: default_vitality_base(),
            crit_chance_base: default_crit_chance_base(),
            crit_damage_base: default_crit_damage_base(),
            generic_primary_damage: default_generic_primary_damage(),
            generic_secondary_damage: default_generic_secondary_damage(),
            generic_secondary_block: default_generic_secondary_block(),
            generic_secondary_dodge: default_generic_secondary_dodge(),
            rogue_offhand_penalty: default_rogue_offhand_penalty(),
            offhand_penalty: default_offhand_penalty(),
        }
    }
}

impl LootConstants {
    /// Stat multiplier for a rarity (1.0 when the table has no row for it)
    pub fn multiplier(&self, rarity: Rarity) -> f64 {
        self.rarities
            .iter()
            .find(|t| t.rarity == rarity)
            .map(|t| t.multiplier)
            .unwrap_or(1.0)
    }

    /// Drop weight for a rarity (0 when the table has no row for it)
    pub fn weight(&self, rarity: Rarity) -> f64 {
        self.rarities
            .iter()
            .find(|t| t.rarity == rarity)
            .map(|t| t.weight.max(0.0))
            .unwrap_or(0.0)
    }

    pub fn archetype(&self, weapon_type: WeaponType) -> Option<&WeaponArchetype> {
        self.weapons.iter().find(|w| w.weapon_type == weapon_type)
    }

    pub fn level_scale(&self, item_level: u32) -> f64 {
        1.0 + (item_level.max(1) - 1) as f64 * self.level_scale_step
    }
}

fn default_rarities() -> Vec<RarityTier> {
    [
        (Rarity::Common, 65.0, 1.0),
        (Rarity::Uncommon, 25.0, 1.25),
        (Rarity::Rare, 10.0, 1.5),
        (Rarity::Epic, 5.0, 1.75),
        (Rarity::Legendary, 3.0, 2.0),
        (Rarity::Mythical, 2.0, 3.0),
    ]
    .into_iter()
    .map(|(rarity, weight, multiplier)| RarityTier {
        rarity,
        weight,
        multiplier,
    })
    .collect()
}

fn default_weapons() -> Vec<WeaponArchetype> {
    [
        (WeaponType::Sword, 10.0, 1.0, 0.0),
        (WeaponType::Dagger, 7.0, 1.4, 0.0),
        (WeaponType::Bow, 12.0, 0.9, 0.0),
        (WeaponType::Staff, 14.0, 0.8, 0.0),
        (WeaponType::Shield, 0.0, 0.0, 5.0),
        (WeaponType::Focus, 6.0, 1.0, 0.0),
    ]
    .into_iter()
    .map(|(weapon_type, base_damage, base_speed, base_block)| WeaponArchetype {
        weapon_type,
        base_damage,
        base_speed,
        base_block,
    })
    .collect()
}

fn default_level_scale_step() -> f64 {
    0.2
}
fn default_armor_base() -> f64 {
    6.0
}
fn default_main_stat_base() -> f64 {
    5.0
}
fn default_vitality_base() -> f64 {
    4.0
}
fn default_crit_chance_base() -> f64 {
    3.0
}
fn default_crit_damage_base() -> f64 {
    7.0
}
fn default_generic_primary_damage() -> f64 {
    10.0
}
fn default_generic_secondary_damage() -> f64 {
    5.0
}
fn default_generic_secondary_block() -> f64 {
    3.0
}
fn default_generic_secondary_dodge() -> f64 {
    2.0
}
fn default_rogue_offhand_penalty() -> f64 {
    0.10
}
fn default_offhand_penalty() -> f64 {
    0.05
}

/// One row of the enemy tier table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyTier {
    pub min_level: u32,
    pub name: String,
    pub base_hp: f64,
    pub base_damage: f64,
    pub base_speed: f64,
    pub base_xp: u64,
    pub base_copper: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyConstants {
    /// Ordered by ascending `min_level`
    #[serde(default = "default_enemy_tiers")]
    pub tiers: Vec<EnemyTier>,
    #[serde(default = "default_hp_per_level")]
    pub hp_per_level: f64,
    #[serde(default = "default_damage_per_level")]
    pub damage_per_level: f64,
    #[serde(default = "default_enemy_crit_chance")]
    pub crit_chance: f64,
    #[serde(default = "default_enemy_crit_damage")]
    pub crit_damage: f64,
    #[serde(default = "default_elite_chance")]
    pub elite_chance: f64,
    #[serde(default = "default_elite_hp_multiplier")]
    pub elite_hp_multiplier: f64,
    #[serde(default = "default_elite_damage_multiplier")]
    pub elite_damage_multiplier: f64,
    #[serde(default = "default_elite_speed_penalty")]
    pub elite_speed_penalty: f64,
    #[serde(default = "default_elite_min_speed")]
    pub elite_min_speed: f64,
    #[serde(default = "default_elite_xp_multiplier")]
    pub elite_xp_multiplier: f64,
    #[serde(default = "default_elite_copper_multiplier")]
    pub elite_copper_multiplier: f64,
    #[serde(default = "default_boss_hp_multiplier")]
    pub boss_hp_multiplier: f64,
    #[serde(default = "default_boss_damage_multiplier")]
    pub boss_damage_multiplier: f64,
}

impl Default for EnemyConstants {
    fn default() -> Self {
        EnemyConstants {
            tiers: default_enemy_tiers(),
            hp_per_level: default_hp_per_level(),
            damage_per_level: default_damage_per_level(),
            crit_chance: default_enemy_crit_chance(),
            crit_damage: default_enemy_crit_damage(),
            elite_chance: default_elite_chance(),
            elite_hp_multiplier: default_elite_hp_multiplier(),
            elite_damage_multiplier: default_elite_damage_multiplier(),
            elite_speed_penalty: default_elite_speed_penalty(),
            elite_min_speed: default_elite_min_speed(),
            elite_xp_multiplier: default_elite_xp_multiplier(),
            elite_copper_multiplier: default_elite_copper_multiplier(),
            boss_hp_multiplier: default_boss_hp_multiplier(),
            boss_damage_multiplier: default_boss_damage_multiplier(),
        }
    }
}

fn default_enemy_tiers() -> Vec<EnemyTier> {
    [
        (1, "Slime", 25.0, 2.0, 0.5, 10, 5),
        (10, "Goblin", 40.0, 10.0, 0.7, 20, 50),
        (20, "Orc", 70.0, 18.0, 0.9, 35, 100),
        (30, "Dark Knight", 100.0, 28.0, 1.1, 60, 200),
        (40, "Dragonling", 140.0, 35.0, 1.3, 90, 300),
    ]
    .into_iter()
    .map(
        |(min_level, name, base_hp, base_damage, base_speed, base_xp, base_copper)| EnemyTier {
            min_level,
            name: name.to_string(),
            base_hp,
            base_damage,
            base_speed,
            base_xp,
            base_copper,
        },
    )
    .collect()
}

fn default_hp_per_level() -> f64 {
    7.0
}
fn default_damage_per_level() -> f64 {
    2.0
}
fn default_enemy_crit_chance() -> f64 {
    5.0
}
fn default_enemy_crit_damage() -> f64 {
    50.0
}
fn default_elite_chance() -> f64 {
    0.15
}
fn default_elite_hp_multiplier() -> f64 {
    1.6
}
fn default_elite_damage_multiplier() -> f64 {
    1.5
}
fn default_elite_speed_penalty() -> f64 {
    0.1
}
fn default_elite_min_speed() -> f64 {
    0.5
}
fn default_elite_xp_multiplier() -> f64 {
    2.0
}
fn default_elite_copper_multiplier() -> f64 {
    1.75
}
fn default_boss_hp_multiplier() -> f64 {
    2.0
}
fn default_boss_damage_multiplier() -> f64 {
    1.8
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatConstants {
    /// Shortest allowed time between two attacks of one combatant, in seconds
    #[serde(default = "default_min_attack_delay")]
    pub min_attack_delay: f64,
    /// Pause between a victory and the next wave, in seconds
    #[serde(default = "default_wave_delay")]
    pub wave_delay: f64,
    /// Battle log lines retained per encounter
    #[serde(default = "default_log_history")]
    pub log_history: usize,
    /// Damage range of an empty primary hand
    #[serde(default = "default_unarmed_min")]
    pub unarmed_min: u32,
    #[serde(default = "default_unarmed_max")]
    pub unarmed_max: u32,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            min_attack_delay: default_min_attack_delay(),
            wave_delay: default_wave_delay(),
            log_history: default_log_history(),
            unarmed_min: default_unarmed_min(),
            unarmed_max: default_unarmed_max(),
        }
    }
}

fn default_min_attack_delay() -> f64 {
    0.2
}
fn default_wave_delay() -> f64 {
    1.0
}
fn default_log_history() -> usize {
    15
}
fn default_unarmed_min() -> u32 {
    1
}
fn default_unarmed_max() -> u32 {
    2
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionConstants {
    /// Experience needed for the next level is `level * xp_per_level`
    #[serde(default = "default_xp_per_level")]
    pub xp_per_level: u64,
    #[serde(default = "default_health_per_level")]
    pub health_per_level: f64,
    #[serde(default = "default_mana_per_level")]
    pub mana_per_level: f64,
    /// Longest offline stretch that still accrues idle rewards, in seconds
    #[serde(default = "default_idle_cap_secs")]
    pub idle_cap_secs: i64,
    #[serde(default = "default_idle_xp_interval_secs")]
    pub idle_xp_interval_secs: i64,
    #[serde(default = "default_idle_gold_interval_secs")]
    pub idle_gold_interval_secs: i64,
    #[serde(default = "default_inventory_capacity")]
    pub inventory_capacity: usize,
}

impl Default for ProgressionConstants {
    fn default() -> Self {
        ProgressionConstants {
            xp_per_level: default_xp_per_level(),
            health_per_level: default_health_per_level(),
            mana_per_level: default_mana_per_level(),
            idle_cap_secs: default_idle_cap_secs(),
            idle_xp_interval_secs: default_idle_xp_interval_secs(),
            idle_gold_interval_secs: default_idle_gold_interval_secs(),
            inventory_capacity: default_inventory_capacity(),
        }
    }
}

fn default_xp_per_level() -> u64 {
    25
}
fn default_health_per_level() -> f64 {
    5.0
}
fn default_mana_per_level() -> f64 {
    5.0
}
fn default_idle_cap_secs() -> i64 {
    4 * 60 * 60
}
fn default_idle_xp_interval_secs() -> i64 {
    10
}
fn default_idle_gold_interval_secs() -> i64 {
    5
}
fn default_inventory_capacity() -> usize {
    36
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = GameConstants::default();
        assert!((constants.loot.multiplier(Rarity::Mythical) - 3.0).abs() < f64::EPSILON);
        assert!((constants.enemies.elite_chance - 0.15).abs() < f64::EPSILON);
        assert_eq!(constants.progression.xp_per_level, 25);
        assert!(constants.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let toml = r#"
[enemies]
elite_chance = 0.5

[progression]
xp_per_level = 40
"#;

        let constants: GameConstants = toml::from_str(toml).unwrap();
        assert!((constants.enemies.elite_chance - 0.5).abs() < f64::EPSILON);
        assert_eq!(constants.progression.xp_per_level, 40);
        assert_eq!(constants.enemies.tiers.len(), 5);
        assert_eq!(constants.loot.rarities.len(), 6);
    }

    #[test]
    fn test_parse_rarity_table() {
        let toml = r#"
[[loot.rarities]]
rarity = "Common"
weight = 1.0
multiplier = 1.0

[[loot.rarities]]
rarity = "Rare"
weight = 1.0
multiplier = 4.0
"#;

        let constants: GameConstants = toml::from_str(toml).unwrap();
        assert!((constants.loot.multiplier(Rarity::Rare) - 4.0).abs() < f64::EPSILON);
        // Missing rows fall back to 1.0
        assert!((constants.loot.multiplier(Rarity::Epic) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_rejects_unsorted_tiers() {
        let mut constants = GameConstants::default();
        constants.enemies.tiers.swap(0, 1);
        assert!(constants.validate().is_err());
    }

    #[test]
    fn test_level_scale() {
        let loot = LootConstants::default();
        assert!((loot.level_scale(1) - 1.0).abs() < f64::EPSILON);
        assert!((loot.level_scale(6) - 2.0).abs() < 1e-9);
        // Level 0 is treated as level 1
        assert!((loot.level_scale(0) - 1.0).abs() < f64::EPSILON);
    }
}
