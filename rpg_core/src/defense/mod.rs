//! Defense system - Armor mitigation and percentage rolls

mod armour;
mod chance;

pub use armour::mitigate_armor;
pub use chance::{apply_block, apply_crit, roll_chance};

/// Defense calculation constants
pub mod constants {
    /// Armor formula constant: `damage * C / (C + armor)`
    pub const ARMOR_CONSTANT: f64 = 100.0;

    /// Fraction of a hit that gets through a block
    pub const BLOCK_PASS_THROUGH: f64 = 0.5;

    /// Percentage rolls are clamped to this range
    pub const MAX_CHANCE: f64 = 100.0;
}
