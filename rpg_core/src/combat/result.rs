//! AttackResult - Outcome of a single attack

use serde::{Deserialize, Serialize};

/// Breakdown of one attack from roll to final damage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackResult {
    // === Damage ===
    /// Damage before any defensive step
    pub raw_damage: u32,
    /// Damage actually applied
    pub final_damage: u32,

    // === Mitigation Info ===
    pub reduced_by_block: u32,
    pub reduced_by_armor: u32,

    // === Flags ===
    pub dodged: bool,
    pub avoided: bool,
    pub critical: bool,
    pub blocked: bool,
    /// Whether this attack brought the target to zero hp
    pub is_killing_blow: bool,
}

impl AttackResult {
    pub fn new(raw_damage: u32) -> Self {
        AttackResult {
            raw_damage,
            final_damage: raw_damage,
            ..Self::default()
        }
    }

    /// True if the hit was dodged or avoided and dealt nothing
    pub fn missed(&self) -> bool {
        self.dodged || self.avoided
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        if self.dodged {
            return "Dodged".to_string();
        }
        if self.avoided {
            return "Avoided".to_string();
        }

        let mut parts = vec![format!("{} damage", self.final_damage)];
        if self.critical {
            parts.push("critical".to_string());
        }
        if self.blocked {
            parts.push(format!("{} blocked", self.reduced_by_block));
        }
        if self.reduced_by_armor > 0 {
            parts.push(format!("{} reduced by armor", self.reduced_by_armor));
        }
        if self.is_killing_blow {
            parts.push("FATAL".to_string());
        }
        parts.join(", ")
    }
}
