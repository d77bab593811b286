//! Enemies - Stat blocks for procedurally generated opponents

mod factory;

pub use factory::{EnemyFactory, NAME_PREFIXES};

use serde::{Deserialize, Serialize};

/// Cosmetic elite variant. Only affects name and aura, never combat math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EliteType {
    Dread,
    Alpha,
    Ancient,
    Frenzied,
    Mythic,
}

impl EliteType {
    pub fn all() -> &'static [EliteType] {
        &[
            EliteType::Dread,
            EliteType::Alpha,
            EliteType::Ancient,
            EliteType::Frenzied,
            EliteType::Mythic,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EliteType::Dread => "Dread",
            EliteType::Alpha => "Alpha",
            EliteType::Ancient => "Ancient",
            EliteType::Frenzied => "Frenzied",
            EliteType::Mythic => "Mythic",
        }
    }

    /// Aura colour as a `#RRGGBB` hex string
    pub fn aura_color(&self) -> &'static str {
        match self {
            EliteType::Dread => "#FF3333",
            EliteType::Alpha => "#3399FF",
            EliteType::Ancient => "#9933FF",
            EliteType::Frenzied => "#FF9900",
            EliteType::Mythic => "#FFD700",
        }
    }
}

/// A generated opponent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enemy {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub damage: u32,
    /// Attacks per second
    pub speed: f64,
    /// Percent
    pub crit_chance: f64,
    /// Percent extra damage on a crit
    pub crit_damage: f64,
    pub reward_xp: u64,
    pub reward_copper: u64,
    pub is_elite: bool,
    pub is_boss: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elite_type: Option<EliteType>,
}

impl Enemy {
    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }

    /// Apply damage, flooring hp at zero. Returns the damage actually dealt.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.hp);
        self.hp -= dealt;
        dealt
    }

    /// Seconds between two attacks
    pub fn attack_delay(&self, min_delay: f64) -> f64 {
        if self.speed <= 0.0 {
            return f64::INFINITY;
        }
        (1.0 / self.speed).max(min_delay)
    }

    pub fn aura_color(&self) -> Option<&'static str> {
        self.elite_type.map(|e| e.aura_color())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slime() -> Enemy {
        Enemy {
            name: "Vile Slime Lv1".to_string(),
            hp: 32,
            max_hp: 32,
            damage: 4,
            speed: 0.5,
            crit_chance: 5.0,
            crit_damage: 50.0,
            reward_xp: 10,
            reward_copper: 5,
            is_elite: false,
            is_boss: false,
            elite_type: None,
        }
    }

    #[test]
    fn test_take_damage_floors_at_zero() {
        let mut enemy = slime();
        assert_eq!(enemy.take_damage(10), 10);
        assert_eq!(enemy.hp, 22);
        assert_eq!(enemy.take_damage(100), 22);
        assert_eq!(enemy.hp, 0);
        assert!(enemy.is_dead());
    }

    #[test]
    fn test_attack_delay() {
        let enemy = slime();
        assert!((enemy.attack_delay(0.2) - 2.0).abs() < f64::EPSILON);

        let mut fast = slime();
        fast.speed = 10.0;
        assert!((fast.attack_delay(0.2) - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_json_shape() {
        let value = serde_json::to_value(slime()).unwrap();
        assert_eq!(value["maxHp"], 32);
        assert_eq!(value["rewardCopper"], 5);
        assert!(value.get("eliteType").is_none());
    }

    #[test]
    fn test_aura_colors() {
        assert_eq!(EliteType::Mythic.aura_color(), "#FFD700");
        let mut enemy = slime();
        assert_eq!(enemy.aura_color(), None);
        enemy.elite_type = Some(EliteType::Dread);
        assert_eq!(enemy.aura_color(), Some("#FF3333"));
    }
}
