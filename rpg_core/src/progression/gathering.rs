//! Gathering skill levels

use crate::item::GatheringSkill;
use serde::{Deserialize, Serialize};

/// One level per gathering skill. Serialized inline on the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatheringLevels {
    pub woodcutting_level: u32,
    pub mining_level: u32,
    pub farming_level: u32,
    pub scavenging_level: u32,
}

impl Default for GatheringLevels {
    fn default() -> Self {
        GatheringLevels {
            woodcutting_level: 1,
            mining_level: 1,
            farming_level: 1,
            scavenging_level: 1,
        }
    }
}

impl GatheringLevels {
    pub fn level(&self, skill: GatheringSkill) -> u32 {
        match skill {
            GatheringSkill::Woodcutting => self.woodcutting_level,
            GatheringSkill::Mining => self.mining_level,
            GatheringSkill::Farming => self.farming_level,
            GatheringSkill::Scavenging => self.scavenging_level,
        }
    }

    pub fn set_level(&mut self, skill: GatheringSkill, level: u32) {
        let slot = match skill {
            GatheringSkill::Woodcutting => &mut self.woodcutting_level,
            GatheringSkill::Mining => &mut self.mining_level,
            GatheringSkill::Farming => &mut self.farming_level,
            GatheringSkill::Scavenging => &mut self.scavenging_level,
        };
        *slot = level.max(1);
    }
}
