//! StatMap - Ordered stat name → value container shared by items and totals

use crate::types::StatName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stat values keyed by [`StatName`]; absent stats read as zero
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatMap(BTreeMap<StatName, f64>);

impl StatMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a stat, zero when absent
    pub fn get(&self, stat: StatName) -> f64 {
        self.0.get(&stat).copied().unwrap_or(0.0)
    }

    /// Value of a stat only if it was set
    pub fn try_get(&self, stat: StatName) -> Option<f64> {
        self.0.get(&stat).copied()
    }

    pub fn set(&mut self, stat: StatName, value: f64) {
        self.0.insert(stat, value);
    }

    /// Add to a stat, inserting it at zero first
    pub fn add(&mut self, stat: StatName, value: f64) {
        *self.0.entry(stat).or_insert(0.0) += value;
    }

    pub fn contains(&self, stat: StatName) -> bool {
        self.0.contains_key(&stat)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatName, f64)> + '_ {
        self.0.iter().map(|(stat, value)| (*stat, *value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(StatName, f64)> for StatMap {
    fn from_iter<I: IntoIterator<Item = (StatName, f64)>>(iter: I) -> Self {
        let mut map = StatMap::new();
        for (stat, value) in iter {
            map.add(stat, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_stat_is_zero() {
        let map = StatMap::new();
        assert!((map.get(StatName::Armor) - 0.0).abs() < f64::EPSILON);
        assert!(map.try_get(StatName::Armor).is_none());
    }

    #[test]
    fn test_add_accumulates() {
        let mut map = StatMap::new();
        map.add(StatName::Armor, 6.0);
        map.add(StatName::Armor, 8.0);
        assert!((map.get(StatName::Armor) - 14.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_json_shape() {
        let map: StatMap = [(StatName::Strength, 5.0), (StatName::CriticalDamage, 7.5)]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"Strength":5.0,"Critical Damage":7.5}"#);
    }
}
