//! StatSource - Trait and implementations for stat providers

mod base_stats;
mod gear;

pub use gear::GearSource;

use crate::stat_block::StatAccumulator;

/// Anything that contributes stats to a TotalStats snapshot
pub trait StatSource: Send + Sync {
    /// Identifier for this source
    fn id(&self) -> &str;

    /// Priority for application order (higher = applied later)
    /// Default priority is 0.
    /// - Base stats: -100
    /// - Gear: 0
    fn priority(&self) -> i32 {
        0
    }

    /// Apply this source's stats to the accumulator
    fn apply(&self, stats: &mut StatAccumulator);
}
