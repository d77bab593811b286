//! Prelude module for convenient imports
//!
//! ```rust
//! use rpg_core::prelude::*;
//! ```

// Core types
pub use crate::types::{CharacterClass, ItemCategory, Rarity, SlotKey, StatName, WeaponType};
pub use crate::stat_block::{BaseStats, StatMap, TotalStats};

// Items and gear
pub use crate::item::{compare_items, GatheringSkill, Item, ItemGenerator, ItemRequest, StatComparison};
pub use crate::equipment::{EquipError, EquipmentSet, Inventory};
pub use crate::character::{Character, CharacterRecord};

// Combat
pub use crate::combat::{BattleMode, CombatEncounter, EncounterConfig, EncounterEvents, EncounterState};
pub use crate::enemy::{Enemy, EnemyFactory};

// Progression
pub use crate::progression::{Coins, DungeonStats, IdleReward};

// Engine
pub use crate::config::GameConstants;
pub use crate::engine::Engine;
pub use crate::error::{EngineError, Result};
