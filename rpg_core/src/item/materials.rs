//! Gathering materials - Fixed catalogue of misc items from gathering skills

use super::{Item, ItemKind, ItemLocation};
use crate::stat_block::StatMap;
use crate::types::Rarity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Skill that produces a family of materials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatheringSkill {
    Woodcutting,
    Mining,
    Farming,
    Scavenging,
}

impl GatheringSkill {
    pub fn all() -> &'static [GatheringSkill] {
        &[
            GatheringSkill::Woodcutting,
            GatheringSkill::Mining,
            GatheringSkill::Farming,
            GatheringSkill::Scavenging,
        ]
    }

    /// Lowercase key, also used as the `subtype` of produced items
    pub fn key(&self) -> &'static str {
        match self {
            GatheringSkill::Woodcutting => "woodcutting",
            GatheringSkill::Mining => "mining",
            GatheringSkill::Farming => "farming",
            GatheringSkill::Scavenging => "scavenging",
        }
    }

    /// Materials this skill can produce, ascending by level
    pub fn materials(&self) -> impl Iterator<Item = &'static Material> {
        let skill = *self;
        MATERIALS.iter().filter(move |m| m.skill == skill)
    }
}

impl fmt::Display for GatheringSkill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for GatheringSkill {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GatheringSkill::all()
            .iter()
            .copied()
            .find(|skill| skill.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown gathering skill '{}'", s))
    }
}

/// One catalogue row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Material {
    pub id: u32,
    pub name: &'static str,
    /// Skill level needed to gather it
    pub level: u32,
    pub rarity: Rarity,
    pub skill: GatheringSkill,
}

impl Material {
    /// A fresh inventory item for this material
    pub fn to_item(self) -> Item {
        Item {
            name: self.name.to_string(),
            kind: ItemKind::Misc {
                subtype: self.skill.key().to_string(),
            },
            rarity: self.rarity,
            level: self.level,
            stats: StatMap::new(),
            slot: ItemLocation::Unplaced,
        }
    }
}

const fn row(id: u32, name: &'static str, level: u32, rarity: Rarity, skill: GatheringSkill) -> Material {
    Material {
        id,
        name,
        level,
        rarity,
        skill,
    }
}

use GatheringSkill::{Farming, Mining, Scavenging, Woodcutting};
use Rarity::{Common, Legendary, Mythical, Rare, Uncommon};

/// Every gatherable material. Ids are grouped by skill in blocks of 100.
pub const MATERIALS: &[Material] = &[
    // === Woodcutting ===
    row(1, "Oak Log", 1, Common, Woodcutting),
    row(2, "Spruce Log", 2, Common, Woodcutting),
    row(3, "Pine Log", 3, Uncommon, Woodcutting),
    row(4, "Birch Log", 5, Uncommon, Woodcutting),
    row(5, "Maple Log", 7, Rare, Woodcutting),
    row(6, "Ash Log", 10, Rare, Woodcutting),
    row(7, "Willow Log", 13, Rare, Woodcutting),
    row(8, "Cedar Log", 16, Legendary, Woodcutting),
    row(9, "Redwood Log", 20, Legendary, Woodcutting),
    row(10, "Ancient Bark", 25, Mythical, Woodcutting),
    // === Mining ===
    row(100, "Copper Chunk", 1, Common, Mining),
    row(101, "Tin Chunk", 2, Common, Mining),
    row(102, "Iron Ore", 4, Uncommon, Mining),
    row(103, "Silver Ore", 6, Uncommon, Mining),
    row(104, "Gold Nugget", 9, Rare, Mining),
    row(105, "Platinum Ore", 12, Rare, Mining),
    row(106, "Mithril Fragment", 15, Legendary, Mining),
    row(107, "Adamantite Shard", 18, Legendary, Mining),
    row(108, "Runestone", 22, Mythical, Mining),
    row(109, "Gem Cluster", 25, Mythical, Mining),
    // === Farming ===
    row(200, "Cotton Bundle", 1, Common, Farming),
    row(201, "Jute Bundle", 2, Common, Farming),
    row(202, "Flax Bundle", 3, Uncommon, Farming),
    row(203, "Wool Bundle", 5, Uncommon, Farming),
    row(204, "Silk Cocoon", 8, Rare, Farming),
    row(205, "Raw Wheat", 10, Rare, Farming),
    row(206, "Barley Husk", 13, Rare, Farming),
    row(207, "Oat Straw", 16, Legendary, Farming),
    row(208, "Herb Sprig", 20, Legendary, Farming),
    row(209, "Root Vegetable", 25, Mythical, Farming),
    // === Scavenging ===
    row(300, "Scrap Leather", 1, Common, Scavenging),
    row(301, "Torn Hide", 2, Common, Scavenging),
    row(302, "Worn Fabric", 3, Uncommon, Scavenging),
    row(303, "Broken Needle", 5, Uncommon, Scavenging),
    row(304, "Rusty Gear", 8, Rare, Scavenging),
    row(305, "Cracked Bone", 10, Rare, Scavenging),
    row(306, "Cloth Strap", 13, Rare, Scavenging),
    row(307, "Grease Stain", 16, Legendary, Scavenging),
    row(308, "Rat Tail", 20, Legendary, Scavenging),
    row(309, "Lost Trinket", 25, Mythical, Scavenging),
];

/// Look up a material by id
pub fn material(id: u32) -> Option<&'static Material> {
    MATERIALS.iter().find(|m| m.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemCategory;

    #[test]
    fn test_lookup_by_id() {
        let ore = material(102).unwrap();
        assert_eq!(ore.name, "Iron Ore");
        assert_eq!(ore.level, 4);
        assert_eq!(ore.skill, GatheringSkill::Mining);
        assert!(material(11).is_none());
    }

    #[test]
    fn test_every_skill_has_ten_ordered_materials() {
        for skill in GatheringSkill::all() {
            let levels: Vec<u32> = skill.materials().map(|m| m.level).collect();
            assert_eq!(levels.len(), 10);
            assert_eq!(levels[0], 1);
            assert!(levels.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_material_item_is_misc() {
        let item = material(1).unwrap().to_item();
        assert_eq!(item.category(), ItemCategory::Misc);
        assert_eq!(item.subtype(), None);
        assert!(item.stats.is_empty());

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["type"], "misc");
        assert_eq!(value["subtype"], "woodcutting");
        assert_eq!(value["rarity"], "Common");
    }

    #[test]
    fn test_skill_parse() {
        assert_eq!("Mining".parse::<GatheringSkill>(), Ok(GatheringSkill::Mining));
        assert!("fishing".parse::<GatheringSkill>().is_err());
    }
}
