//! Armor - Flat percentage mitigation applied last to incoming hits

use super::constants::ARMOR_CONSTANT;

/// Damage left after armor.
///
/// `floor(damage * 100 / (100 + armor))`. Negative armor is treated as zero.
pub fn mitigate_armor(damage: u32, armor: f64) -> u32 {
    if damage == 0 {
        return 0;
    }
    let armor = armor.max(0.0);
    (damage as f64 * ARMOR_CONSTANT / (ARMOR_CONSTANT + armor)).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_armor() {
        assert_eq!(mitigate_armor(37, 0.0), 37);
        assert_eq!(mitigate_armor(37, -20.0), 37);
    }

    #[test]
    fn test_hundred_armor_halves() {
        assert_eq!(mitigate_armor(40, 100.0), 20);
        assert_eq!(mitigate_armor(41, 100.0), 20);
    }

    #[test]
    fn test_small_armor() {
        // 10 * 100 / 106 = 9.43
        assert_eq!(mitigate_armor(10, 6.0), 9);
        assert_eq!(mitigate_armor(0, 50.0), 0);
    }

    #[test]
    fn test_mitigation_never_increases_damage() {
        for armor in [0.0, 1.0, 6.0, 54.0, 300.0] {
            for damage in [1, 2, 13, 250] {
                assert!(mitigate_armor(damage, armor) <= damage);
            }
        }
    }
}
