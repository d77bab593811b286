//! rpg_core - Game rules engine for the online RPG server
//!
//! This library provides:
//! - ItemGenerator: Procedural loot from slot, class, rarity and item level
//! - Equipment and Inventory: Slot rules, two-handed weapons, swaps
//! - Stat aggregation: Base stats plus gear into cached totals
//! - CombatEncounter: Wave-based real-time battles against generated enemies
//! - Progression: Experience, levels, coins and offline rewards
//! - Engine: Per-player sessions tying all of the above together

pub mod character;
pub mod combat;
pub mod config;
pub mod defense;
pub mod enemy;
pub mod engine;
pub mod equipment;
pub mod error;
pub mod item;
pub mod prelude;
pub mod progression;
pub mod session;
pub mod source;
pub mod stat_block;
pub mod types;

// Re-export core types for convenience
pub use character::{Character, CharacterRecord};
pub use combat::{
    AttackResult, BattleMode, CombatEncounter, EncounterConfig, EncounterError, EncounterEvents,
    EncounterHandle, EncounterState, RunTotals,
};
pub use config::{ConfigError, GameConstants};
pub use enemy::{EliteType, Enemy, EnemyFactory};
pub use engine::Engine;
pub use equipment::{EquipError, EquipmentSet, Inventory};
pub use error::{EngineError, Result};
pub use item::{GatheringSkill, Item, ItemGenerator, ItemKind, ItemLocation, ItemRequest, Material};
pub use progression::{Coins, DungeonStats, GatheringLevels, IdleReward, ProgressionState};
pub use source::{GearSource, StatSource};
pub use stat_block::{BaseStats, StatAccumulator, StatMap, TotalStats};
pub use types::{CharacterClass, ItemCategory, Rarity, SlotKey, StatName, WeaponType};
