//! Idle rewards - Experience and gold earned while logged out

use crate::config::ProgressionConstants;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reward for time spent offline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdleReward {
    pub xp: u64,
    pub gold: u64,
    /// Offline seconds counted, after the cap
    pub elapsed_secs: i64,
}

impl IdleReward {
    /// Combine two unclaimed rewards. Each offline period was already capped
    /// on its own, so the sum is not capped again.
    pub fn merge(self, other: IdleReward) -> IdleReward {
        IdleReward {
            xp: self.xp.saturating_add(other.xp),
            gold: self.gold.saturating_add(other.gold),
            elapsed_secs: self.elapsed_secs.saturating_add(other.elapsed_secs),
        }
    }
}

/// Reward for the time between `last_logout` and `now`.
///
/// Elapsed time is capped (4 hours by default) and a clock that went
/// backwards counts as zero. Returns `None` when nothing was earned.
pub fn compute_idle_reward(
    now: DateTime<Utc>,
    last_logout: DateTime<Utc>,
    constants: &ProgressionConstants,
) -> Option<IdleReward> {
    let elapsed = (now - last_logout)
        .num_seconds()
        .clamp(0, constants.idle_cap_secs.max(0));

    let per = |interval: i64| -> u64 {
        if interval <= 0 {
            0
        } else {
            (elapsed / interval) as u64
        }
    };
    let xp = per(constants.idle_xp_interval_secs);
    let gold = per(constants.idle_gold_interval_secs);

    if xp == 0 && gold == 0 {
        return None;
    }
    Some(IdleReward {
        xp,
        gold,
        elapsed_secs: elapsed,
    })
}
