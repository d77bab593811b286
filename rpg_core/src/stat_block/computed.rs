//! Convenience readers over a TotalStats snapshot

use crate::stat_block::constants::MIN_ATTACK_SPEED;
use crate::stat_block::TotalStats;
use crate::types::StatName;

impl TotalStats {
    /// Maximum health, whole points
    pub fn max_health(&self) -> u32 {
        self.get(StatName::Health).max(0.0).floor() as u32
    }

    pub fn max_mana(&self) -> u32 {
        self.get(StatName::Mana).max(0.0).floor() as u32
    }

    /// Flat damage added to every player hit
    pub fn bonus_damage(&self) -> u32 {
        self.get(StatName::BonusDamage).max(0.0) as u32
    }

    /// Attacks per second, already clamped and rounded by the aggregator
    pub fn attack_speed(&self) -> f64 {
        self.get(StatName::AttackSpeed)
    }

    /// Seconds between two player attacks
    pub fn attack_delay(&self, min_delay: f64) -> f64 {
        let speed = self.attack_speed().max(MIN_ATTACK_SPEED);
        (1.0 / speed).max(min_delay)
    }

    /// Critical strike chance in percent
    pub fn crit_chance(&self) -> f64 {
        self.get(StatName::CriticalChance)
    }

    /// Extra damage on a critical strike in percent
    pub fn crit_damage(&self) -> f64 {
        self.get(StatName::CriticalDamage)
    }

    pub fn armor(&self) -> f64 {
        self.get(StatName::Armor)
    }

    /// Block chance in percent
    pub fn block(&self) -> f64 {
        self.get(StatName::Block)
    }

    /// Dodge chance in percent
    pub fn dodge(&self) -> f64 {
        self.get(StatName::Dodge)
    }

    /// Avoidance chance in percent
    pub fn avoidance(&self) -> f64 {
        self.get(StatName::Avoidance)
    }
}
