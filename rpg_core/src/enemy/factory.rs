//! EnemyFactory - Builds enemies from the tier table and a challenge level

use super::{EliteType, Enemy};
use crate::config::{EnemyConstants, EnemyTier};
use rand::seq::SliceRandom;
use rand::Rng;

/// Flavour prefixes for regular enemies
pub const NAME_PREFIXES: &[&str] = &[
    "Savage",
    "Vile",
    "Corrupted",
    "Twisted",
    "Lurking",
    "Furious",
    "Enraged",
    "Brutal",
    "Dark",
    "Wild",
    "Grimy",
    "Malformed",
];

/// Generates enemies. Holds only constants, so it can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct EnemyFactory {
    constants: EnemyConstants,
}

impl EnemyFactory {
    pub fn new(constants: EnemyConstants) -> Self {
        EnemyFactory { constants }
    }

    pub fn constants(&self) -> &EnemyConstants {
        &self.constants
    }

    /// Highest tier whose minimum level is at or below the challenge level.
    /// Levels below every tier use the first one.
    pub fn tier_for(&self, level: u32) -> Option<&EnemyTier> {
        self.constants
            .tiers
            .iter()
            .rev()
            .find(|t| t.min_level <= level)
            .or_else(|| self.constants.tiers.first())
    }

    pub fn generate(&self, level: u32, is_boss: bool) -> Enemy {
        self.generate_with_rng(level, is_boss, &mut rand::thread_rng())
    }

    /// Generate an enemy with a provided RNG (for deterministic testing).
    ///
    /// Bosses never roll elite.
    pub fn generate_with_rng(&self, level: u32, is_boss: bool, rng: &mut impl Rng) -> Enemy {
        let c = &self.constants;
        let level = level.max(1);
        let (tier_name, base_hp, base_damage, base_speed, base_xp, base_copper) =
            match self.tier_for(level) {
                Some(t) => (
                    t.name.as_str(),
                    t.base_hp,
                    t.base_damage,
                    t.base_speed,
                    t.base_xp,
                    t.base_copper,
                ),
                None => ("Slime", 25.0, 2.0, 0.5, 10, 5),
            };

        let mut hp = (base_hp + level as f64 * c.hp_per_level).floor();
        let mut damage = (base_damage + level as f64 * c.damage_per_level).floor();
        let mut speed = base_speed;
        let mut reward_xp = base_xp;
        let mut reward_copper = base_copper;

        let elite_type = if !is_boss && rng.gen::<f64>() < c.elite_chance {
            EliteType::all().choose(rng).copied()
        } else {
            None
        };

        let prefix = match elite_type {
            Some(elite) => {
                hp = (hp * c.elite_hp_multiplier).floor();
                damage = (damage * c.elite_damage_multiplier).floor();
                speed = (speed - c.elite_speed_penalty).max(c.elite_min_speed);
                reward_xp = (reward_xp as f64 * c.elite_xp_multiplier).floor() as u64;
                reward_copper = (reward_copper as f64 * c.elite_copper_multiplier).floor() as u64;
                elite.name()
            }
            None => NAME_PREFIXES.choose(rng).copied().unwrap_or("Wild"),
        };

        let mut name = format!("{} {} Lv{}", prefix, tier_name, level);
        if is_boss {
            hp = (hp * c.boss_hp_multiplier).floor();
            damage = (damage * c.boss_damage_multiplier).floor();
            name = format!("BOSS: {}", name);
        }

        let hp = hp.max(1.0) as u32;
        let enemy = Enemy {
            name,
            hp,
            max_hp: hp,
            damage: damage.max(0.0) as u32,
            speed,
            crit_chance: c.crit_chance,
            crit_damage: c.crit_damage,
            reward_xp,
            reward_copper,
            is_elite: elite_type.is_some(),
            is_boss,
            elite_type,
        };
        tracing::debug!(
            name = %enemy.name,
            hp = enemy.hp,
            damage = enemy.damage,
            elite = enemy.is_elite,
            boss = enemy.is_boss,
            "Generated enemy"
        );
        enemy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn factory_with_elite_chance(chance: f64) -> EnemyFactory {
        EnemyFactory::new(EnemyConstants {
            elite_chance: chance,
            ..EnemyConstants::default()
        })
    }

    #[test]
    fn test_tier_selection() {
        let factory = EnemyFactory::default();
        assert_eq!(factory.tier_for(1).unwrap().name, "Slime");
        assert_eq!(factory.tier_for(9).unwrap().name, "Slime");
        assert_eq!(factory.tier_for(10).unwrap().name, "Goblin");
        assert_eq!(factory.tier_for(35).unwrap().name, "Dark Knight");
        assert_eq!(factory.tier_for(99).unwrap().name, "Dragonling");
        assert_eq!(factory.tier_for(0).unwrap().name, "Slime");
    }

    #[test]
    fn test_regular_enemy_stats() {
        let factory = factory_with_elite_chance(0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let enemy = factory.generate_with_rng(12, false, &mut rng);

        // Goblin: 40 + 12*7, 10 + 12*2
        assert_eq!(enemy.hp, 124);
        assert_eq!(enemy.max_hp, 124);
        assert_eq!(enemy.damage, 34);
        assert!((enemy.speed - 0.7).abs() < f64::EPSILON);
        assert_eq!(enemy.reward_xp, 20);
        assert_eq!(enemy.reward_copper, 50);
        assert!(!enemy.is_elite);
        assert!(enemy.name.ends_with("Goblin Lv12"));
        assert!(NAME_PREFIXES.iter().any(|p| enemy.name.starts_with(p)));
    }

    #[test]
    fn test_elite_scaling() {
        let factory = factory_with_elite_chance(1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let enemy = factory.generate_with_rng(12, false, &mut rng);

        assert!(enemy.is_elite);
        let elite = enemy.elite_type.unwrap();
        assert!(enemy.name.starts_with(elite.name()));
        // 124 * 1.6, 34 * 1.5
        assert_eq!(enemy.hp, 198);
        assert_eq!(enemy.damage, 51);
        assert!((enemy.speed - 0.6).abs() < 1e-9);
        assert_eq!(enemy.reward_xp, 40);
        // 50 * 1.75
        assert_eq!(enemy.reward_copper, 87);
    }

    #[test]
    fn test_elite_speed_floor() {
        let factory = factory_with_elite_chance(1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        // Slime speed 0.5 would drop to 0.4
        let enemy = factory.generate_with_rng(1, false, &mut rng);
        assert!((enemy.speed - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_boss_scaling_and_name() {
        let factory = factory_with_elite_chance(1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let boss = factory.generate_with_rng(5, true, &mut rng);

        assert!(boss.is_boss);
        assert!(!boss.is_elite, "bosses never roll elite");
        assert!(boss.name.starts_with("BOSS: "));
        // Slime: (25 + 35) * 2, (2 + 10) * 1.8
        assert_eq!(boss.hp, 120);
        assert_eq!(boss.damage, 21);
    }

    #[test]
    fn test_elite_rate_roughly_matches_chance() {
        let factory = EnemyFactory::default();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let elites = (0..2000)
            .filter(|_| factory.generate_with_rng(15, false, &mut rng).is_elite)
            .count();
        // 15% of 2000 = 300
        assert!((200..400).contains(&elites), "elite count {}", elites);
    }
}
