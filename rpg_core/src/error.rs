//! EngineError - Everything the engine facade can reject

use crate::combat::EncounterError;
use crate::config::ConfigError;
use crate::equipment::EquipError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Equip(#[from] EquipError),

    #[error(transparent)]
    Encounter(#[from] EncounterError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("player '{0}' is not online")]
    UnknownPlayer(String),

    #[error("player '{0}' is already online")]
    AlreadyOnline(String),

    #[error("session lock was poisoned")]
    SessionPoisoned,
}

pub type Result<T> = std::result::Result<T, EngineError>;
