//! Stat-by-stat comparison of an item against the one it would replace

use super::Item;
use crate::types::StatName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatChange {
    Better,
    Worse,
    Same,
    /// Only the candidate has this stat
    New,
    /// Only the equipped item has this stat
    Lost,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatComparison {
    pub stat: StatName,
    pub candidate: f64,
    pub equipped: f64,
    pub change: StatChange,
}

impl StatComparison {
    pub fn delta(&self) -> f64 {
        self.candidate - self.equipped
    }
}

/// Compare every stat on either item. Without an equipped item every
/// candidate stat is `New`.
pub fn compare_items(candidate: &Item, equipped: Option<&Item>) -> Vec<StatComparison> {
    let mut stats: BTreeSet<StatName> = candidate.stats.iter().map(|(s, _)| s).collect();
    if let Some(equipped) = equipped {
        stats.extend(equipped.stats.iter().map(|(s, _)| s));
    }

    stats
        .into_iter()
        .map(|stat| {
            let theirs = equipped.and_then(|e| e.stats.try_get(stat));
            let ours = candidate.stats.try_get(stat);
            let change = match (ours, theirs) {
                (Some(_), None) => StatChange::New,
                (None, _) => StatChange::Lost,
                (Some(a), Some(b)) if a > b => StatChange::Better,
                (Some(a), Some(b)) if a < b => StatChange::Worse,
                (Some(_), Some(_)) => StatChange::Same,
            };
            StatComparison {
                stat,
                candidate: ours.unwrap_or(0.0),
                equipped: theirs.unwrap_or(0.0),
                change,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemGenerator, ItemRequest};
    use crate::types::{CharacterClass, Rarity, SlotKey};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn helm(rarity: Rarity, class: CharacterClass) -> Item {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        ItemGenerator::default().generate_with_rng(
            &ItemRequest::new(SlotKey::Head, class).rarity(rarity),
            &mut rng,
        )
    }

    #[test]
    fn test_upgrade_is_better_everywhere() {
        let common = helm(Rarity::Common, CharacterClass::Warrior);
        let rare = helm(Rarity::Rare, CharacterClass::Warrior);
        let diff = compare_items(&rare, Some(&common));
        assert_eq!(diff.len(), 3);
        assert!(diff.iter().all(|c| c.change == StatChange::Better));
        let armor = diff.iter().find(|c| c.stat == StatName::Armor).unwrap();
        assert!((armor.delta() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_nothing_equipped_means_new() {
        let item = helm(Rarity::Common, CharacterClass::Mage);
        let diff = compare_items(&item, None);
        assert!(diff.iter().all(|c| c.change == StatChange::New));
    }

    #[test]
    fn test_different_main_stat_is_new_and_lost() {
        let warrior = helm(Rarity::Common, CharacterClass::Warrior);
        let mage = helm(Rarity::Common, CharacterClass::Mage);
        let diff = compare_items(&mage, Some(&warrior));

        let change_of = |stat| diff.iter().find(|c| c.stat == stat).map(|c| c.change);
        assert_eq!(change_of(StatName::Intelligence), Some(StatChange::New));
        assert_eq!(change_of(StatName::Strength), Some(StatChange::Lost));
        assert_eq!(change_of(StatName::Armor), Some(StatChange::Same));
    }
}
