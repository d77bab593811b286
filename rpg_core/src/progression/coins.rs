//! Coins - Four-denomination currency with 100:1 conversion per tier

use serde::{Deserialize, Serialize};

/// Units of one denomination per unit of the next
pub const COINS_PER_TIER: u64 = 100;

/// Currency purse. Normalised after every change so no lower denomination
/// holds 100 or more.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coins {
    #[serde(default)]
    pub copper: u64,
    #[serde(default)]
    pub silver: u64,
    #[serde(default)]
    pub gold: u64,
    #[serde(default)]
    pub platinum: u64,
}

impl Coins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw amounts, normalising overflow upward
    pub fn from_parts(copper: u64, silver: u64, gold: u64, platinum: u64) -> Self {
        let mut coins = Coins {
            copper,
            silver,
            gold,
            platinum,
        };
        coins.normalize();
        coins
    }

    /// Carry 100 copper into 1 silver, 100 silver into 1 gold, 100 gold into 1 platinum
    pub fn normalize(&mut self) {
        self.silver += self.copper / COINS_PER_TIER;
        self.copper %= COINS_PER_TIER;
        self.gold += self.silver / COINS_PER_TIER;
        self.silver %= COINS_PER_TIER;
        self.platinum += self.gold / COINS_PER_TIER;
        self.gold %= COINS_PER_TIER;
    }

    pub fn add_copper(&mut self, amount: u64) {
        self.copper += amount;
        self.normalize();
    }

    pub fn add_gold(&mut self, amount: u64) {
        self.gold += amount;
        self.normalize();
    }

    /// Whole purse expressed in copper
    pub fn total_copper(&self) -> u64 {
        let per_gold = COINS_PER_TIER * COINS_PER_TIER;
        self.copper
            + self.silver * COINS_PER_TIER
            + self.gold * per_gold
            + self.platinum * per_gold * COINS_PER_TIER
    }

    pub fn is_normalized(&self) -> bool {
        self.copper < COINS_PER_TIER && self.silver < COINS_PER_TIER && self.gold < COINS_PER_TIER
    }
}

impl std::fmt::Display for Coins {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}p {}g {}s {}c",
            self.platinum, self.gold, self.silver, self.copper
        )
    }
}
