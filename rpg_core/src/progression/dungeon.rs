//! Dungeon progress: the next floor to attempt and the deepest cleared

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonStats {
    /// Challenge level of the next run
    pub current_level: u32,
    /// Deepest level cleared; 0 before the first clear
    pub highest_level: u32,
}

impl Default for DungeonStats {
    fn default() -> Self {
        DungeonStats {
            current_level: 1,
            highest_level: 0,
        }
    }
}

impl DungeonStats {
    /// Record a cleared run at `level`. Returns true if it is a new record.
    ///
    /// Clearing a lower floor again never moves progress backwards.
    pub fn record_clear(&mut self, level: u32) -> bool {
        let level = level.max(1);
        self.current_level = self.current_level.max(level + 1);
        if level > self.highest_level {
            self.highest_level = level;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_clear_advances() {
        let mut stats = DungeonStats::default();
        assert!(stats.record_clear(1));
        assert_eq!(stats.current_level, 2);
        assert_eq!(stats.highest_level, 1);
    }

    #[test]
    fn test_replaying_lower_floor_keeps_progress() {
        let mut stats = DungeonStats {
            current_level: 6,
            highest_level: 5,
        };
        assert!(!stats.record_clear(2));
        assert_eq!(stats.current_level, 6);
        assert_eq!(stats.highest_level, 5);
    }

    #[test]
    fn test_missing_fields_default() {
        let stats: DungeonStats = serde_json::from_str(r#"{"highest_level": 4}"#).unwrap();
        assert_eq!(stats.current_level, 1);
        assert_eq!(stats.highest_level, 4);
    }
}
