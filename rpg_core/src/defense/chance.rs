//! Percentage rolls: dodge, avoidance, crit and block

use super::constants::{BLOCK_PASS_THROUGH, MAX_CHANCE};
use rand::Rng;

/// Roll a percentage chance. 0 never succeeds, 100 always does.
pub fn roll_chance(chance_percent: f64, rng: &mut impl Rng) -> bool {
    if chance_percent <= 0.0 {
        return false;
    }
    rng.gen::<f64>() * MAX_CHANCE < chance_percent.min(MAX_CHANCE)
}

/// Critical hit damage: `floor(damage * (1 + crit_damage / 100))`
pub fn apply_crit(damage: u32, crit_damage_percent: f64) -> u32 {
    let multiplier = 1.0 + crit_damage_percent.max(0.0) / 100.0;
    (damage as f64 * multiplier).floor() as u32
}

/// Damage that gets through a successful block
pub fn apply_block(damage: u32) -> u32 {
    (damage as f64 * BLOCK_PASS_THROUGH).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_roll_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..100 {
            assert!(!roll_chance(0.0, &mut rng));
            assert!(roll_chance(100.0, &mut rng));
            assert!(roll_chance(250.0, &mut rng));
        }
    }

    #[test]
    fn test_roll_rate() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let hits = (0..10_000).filter(|_| roll_chance(25.0, &mut rng)).count();
        assert!((2200..2800).contains(&hits), "hits {}", hits);
    }

    #[test]
    fn test_crit_damage() {
        assert_eq!(apply_crit(10, 50.0), 15);
        assert_eq!(apply_crit(7, 50.0), 10);
        assert_eq!(apply_crit(7, 0.0), 7);
    }

    #[test]
    fn test_block_halves() {
        assert_eq!(apply_block(10), 5);
        assert_eq!(apply_block(11), 5);
        assert_eq!(apply_block(1), 0);
    }
}
