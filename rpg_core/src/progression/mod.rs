//! Progression - Experience, levels, currency and offline rewards

mod coins;
mod dungeon;
mod gathering;
mod idle;

pub use coins::{Coins, COINS_PER_TIER};
pub use dungeon::DungeonStats;
pub use gathering::GatheringLevels;
pub use idle::{compute_idle_reward, IdleReward};

use crate::config::ProgressionConstants;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-character progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionState {
    pub level: u32,
    pub experience: u64,
    #[serde(default)]
    pub coins: Coins,
    #[serde(default, rename = "lastLogoutTime")]
    pub last_logout: Option<DateTime<Utc>>,
    /// Offline reward waiting to be claimed
    #[serde(default)]
    pub pending_idle: Option<IdleReward>,
    #[serde(default, rename = "dungeon_stats")]
    pub dungeon: DungeonStats,
    #[serde(flatten)]
    pub gathering: GatheringLevels,
}

impl Default for ProgressionState {
    fn default() -> Self {
        ProgressionState {
            level: 1,
            experience: 0,
            coins: Coins::default(),
            last_logout: None,
            pending_idle: None,
            dungeon: DungeonStats::default(),
            gathering: GatheringLevels::default(),
        }
    }
}

impl ProgressionState {
    /// Experience needed to leave the current level
    pub fn experience_to_next(&self, constants: &ProgressionConstants) -> u64 {
        self.level.max(1) as u64 * constants.xp_per_level
    }

    /// Add experience and level up as many times as it covers.
    ///
    /// Returns the number of levels gained. Leftover experience carries into
    /// the new level.
    pub fn add_experience(&mut self, amount: u64, constants: &ProgressionConstants) -> u32 {
        self.experience += amount;
        let mut gained = 0;
        loop {
            let needed = self.experience_to_next(constants);
            if needed == 0 || self.experience < needed {
                break;
            }
            self.experience -= needed;
            self.level += 1;
            gained += 1;
        }
        gained
    }

    /// Compute the offline reward since the last logout and add it to the
    /// pending reward. Returns the total now pending, or `None` if this
    /// period earned nothing.
    ///
    /// Consumes the logout stamp, so one offline period is rewarded once.
    /// An unclaimed reward from an earlier period is kept and added to.
    pub fn accrue_idle_reward(
        &mut self,
        now: DateTime<Utc>,
        constants: &ProgressionConstants,
    ) -> Option<IdleReward> {
        let last_logout = self.last_logout.take()?;
        let reward = compute_idle_reward(now, last_logout, constants)?;
        tracing::info!(
            xp = reward.xp,
            gold = reward.gold,
            seconds = reward.elapsed_secs,
            "Idle reward accrued"
        );
        let pending = match self.pending_idle.take() {
            Some(unclaimed) => unclaimed.merge(reward),
            None => reward,
        };
        self.pending_idle = Some(pending);
        Some(pending)
    }

    /// Take the pending idle reward. A second claim returns `None`.
    pub fn take_idle_reward(&mut self) -> Option<IdleReward> {
        self.pending_idle.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn constants() -> ProgressionConstants {
        ProgressionConstants::default()
    }

    #[test]
    fn test_single_level_up_with_carry() {
        let mut state = ProgressionState::default();
        let gained = state.add_experience(30, &constants());
        assert_eq!(gained, 1);
        assert_eq!(state.level, 2);
        assert_eq!(state.experience, 5);
    }

    #[test]
    fn test_multi_level_up() {
        let mut state = ProgressionState::default();
        // 25 (1->2) + 50 (2->3) + 75 (3->4) = 150, 10 left over
        let gained = state.add_experience(160, &constants());
        assert_eq!(gained, 3);
        assert_eq!(state.level, 4);
        assert_eq!(state.experience, 10);
    }

    #[test]
    fn test_below_threshold() {
        let mut state = ProgressionState::default();
        assert_eq!(state.add_experience(24, &constants()), 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.experience, 24);
        assert_eq!(state.experience_to_next(&constants()), 25);
    }

    #[test]
    fn test_idle_reward_accrual_and_single_claim() {
        let now = Utc::now();
        let mut state = ProgressionState {
            last_logout: Some(now - Duration::hours(10)),
            ..ProgressionState::default()
        };

        let reward = state.accrue_idle_reward(now, &constants()).unwrap();
        assert_eq!(reward.xp, 1440);
        assert_eq!(reward.gold, 2880);

        assert_eq!(state.take_idle_reward(), Some(reward));
        assert_eq!(state.take_idle_reward(), None);

        // The same offline period cannot be accrued again
        assert!(state.last_logout.is_none());
        assert!(state.accrue_idle_reward(now, &constants()).is_none());
    }

    #[test]
    fn test_unclaimed_reward_is_added_to() {
        let now = Utc::now();
        let mut state = ProgressionState {
            last_logout: Some(now - Duration::hours(4)),
            ..ProgressionState::default()
        };
        state.accrue_idle_reward(now, &constants()).unwrap();

        let later = now + Duration::minutes(10);
        state.last_logout = Some(now);
        let pending = state.accrue_idle_reward(later, &constants()).unwrap();
        assert_eq!(pending.xp, 1500);
        assert_eq!(pending.gold, 3000);
        assert_eq!(pending.elapsed_secs, 14_400 + 600);

        // Nothing earned this time: the pending reward is untouched
        state.last_logout = Some(later);
        assert!(state.accrue_idle_reward(later, &constants()).is_none());
        assert_eq!(state.take_idle_reward(), Some(pending));
        assert_eq!(state.take_idle_reward(), None);
    }

    #[test]
    fn test_no_logout_no_reward() {
        let mut state = ProgressionState::default();
        assert!(state.accrue_idle_reward(Utc::now(), &constants()).is_none());
        assert!(state.pending_idle.is_none());
    }

    #[test]
    fn test_json_uses_last_logout_time_key() {
        let json = r#"{"level": 3, "experience": 12, "lastLogoutTime": "2024-05-01T12:00:00Z"}"#;
        let state: ProgressionState = serde_json::from_str(json).unwrap();
        assert_eq!(state.level, 3);
        assert!(state.last_logout.is_some());
        assert_eq!(state.coins, Coins::default());
        assert_eq!(state.dungeon, DungeonStats::default());
        assert_eq!(state.gathering.level(crate::item::GatheringSkill::Mining), 1);
    }

    #[test]
    fn test_dungeon_and_gathering_keys() {
        let mut state = ProgressionState::default();
        state.dungeon.record_clear(3);
        state.gathering.set_level(crate::item::GatheringSkill::Farming, 12);

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["dungeon_stats"]["current_level"], 4);
        assert_eq!(value["dungeon_stats"]["highest_level"], 3);
        assert_eq!(value["farming_level"], 12);
        assert_eq!(value["woodcutting_level"], 1);

        let back: ProgressionState = serde_json::from_value(value).unwrap();
        assert_eq!(back, state);
    }
}
