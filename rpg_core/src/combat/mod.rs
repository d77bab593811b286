//! Combat - Attack resolution and the per-player encounter state machine

mod encounter;
mod resolution;
mod result;

pub use encounter::{
    BattleMode, CombatEncounter, Combatant, EncounterConfig, EncounterEvents, EncounterState,
    HpDelta, Reward, RunTotals, DUNGEON_RUN_WAVES,
};
pub use resolution::{
    resolve_enemy_attack, resolve_enemy_attack_with_rng, resolve_player_attack,
    resolve_player_attack_with_rng, roll_player_damage,
};
pub use result::AttackResult;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifies one encounter for its lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EncounterHandle(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncounterError {
    #[error("an encounter is already running")]
    AlreadyActive,

    #[error("no encounter with handle {0:?}")]
    UnknownEncounter(EncounterHandle),

    #[error("no encounter is running")]
    NoEncounter,
}
