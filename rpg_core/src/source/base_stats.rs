//! Base stats as a stat source

use crate::source::StatSource;
use crate::stat_block::{BaseStats, StatAccumulator};

impl StatSource for BaseStats {
    fn id(&self) -> &str {
        "base_stats"
    }

    fn priority(&self) -> i32 {
        -100 // Base stats apply first
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        stats.class = Some(self.class);
        for (stat, value) in self.pairs() {
            stats.add(stat, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CharacterClass, StatName};

    #[test]
    fn test_base_stats_copied() {
        let base = BaseStats::for_class(CharacterClass::Rogue);
        let mut acc = StatAccumulator::new();
        base.apply(&mut acc);

        assert_eq!(acc.class, Some(CharacterClass::Rogue));
        assert!((acc.stats.get(StatName::Agility) - 10.0).abs() < 0.01);
        assert!((acc.stats.get(StatName::BaseHealth) - 100.0).abs() < 0.01);
        assert!((acc.stats.get(StatName::CriticalDamage) - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_base_stats_priority() {
        let base = BaseStats::for_class(CharacterClass::Mage);
        assert_eq!(base.priority(), -100);
    }
}
