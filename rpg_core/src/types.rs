//! Core enums shared by every engine component

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Item rarity tier, ordered from weakest to strongest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythical,
}

impl Rarity {
    /// All rarities in drop-table order
    pub fn all() -> &'static [Rarity] {
        &[
            Rarity::Common,
            Rarity::Uncommon,
            Rarity::Rare,
            Rarity::Epic,
            Rarity::Legendary,
            Rarity::Mythical,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Mythical => "Mythical",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Playable character class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    Warrior,
    Mage,
    Rogue,
}

impl CharacterClass {
    /// The attribute that every generated item rolls for this class
    pub fn main_stat(&self) -> StatName {
        match self {
            CharacterClass::Warrior => StatName::Strength,
            CharacterClass::Mage => StatName::Intelligence,
            CharacterClass::Rogue => StatName::Agility,
        }
    }

    /// Weapon archetypes this class may hold in the given hand
    pub fn allowed_weapons(&self, slot: SlotKey) -> &'static [WeaponType] {
        use WeaponType::*;
        match (self, slot) {
            (CharacterClass::Warrior, SlotKey::Primary) => &[Sword],
            (CharacterClass::Warrior, SlotKey::Secondary) => &[Sword, Shield],
            (CharacterClass::Rogue, SlotKey::Primary) => &[Sword, Dagger, Bow],
            (CharacterClass::Rogue, SlotKey::Secondary) => &[Sword, Dagger],
            (CharacterClass::Mage, SlotKey::Primary) => &[Staff, Dagger],
            (CharacterClass::Mage, SlotKey::Secondary) => &[Focus],
            _ => &[],
        }
    }

    pub fn can_wield(&self, weapon: WeaponType, slot: SlotKey) -> bool {
        self.allowed_weapons(slot).contains(&weapon)
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CharacterClass::Warrior => "Warrior",
            CharacterClass::Mage => "Mage",
            CharacterClass::Rogue => "Rogue",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for CharacterClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "warrior" => Ok(CharacterClass::Warrior),
            "mage" => Ok(CharacterClass::Mage),
            "rogue" => Ok(CharacterClass::Rogue),
            other => Err(format!("unknown class '{}'", other)),
        }
    }
}

/// Broad item category, serialized as the item's `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Armor,
    Weapon,
    Accessory,
    Misc,
}

/// Equipment slot key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKey {
    Head,
    Shoulders,
    Chest,
    Gloves,
    Legs,
    Boots,
    Primary,
    Secondary,
    Amulet,
    Ring,
    Bracelet,
    Belt,
}

impl SlotKey {
    /// Get all equipment slots
    pub fn all() -> &'static [SlotKey] {
        &[
            SlotKey::Head,
            SlotKey::Shoulders,
            SlotKey::Chest,
            SlotKey::Gloves,
            SlotKey::Legs,
            SlotKey::Boots,
            SlotKey::Primary,
            SlotKey::Secondary,
            SlotKey::Amulet,
            SlotKey::Ring,
            SlotKey::Bracelet,
            SlotKey::Belt,
        ]
    }

    pub fn category(&self) -> ItemCategory {
        match self {
            SlotKey::Head
            | SlotKey::Shoulders
            | SlotKey::Chest
            | SlotKey::Gloves
            | SlotKey::Legs
            | SlotKey::Boots => ItemCategory::Armor,
            SlotKey::Primary | SlotKey::Secondary => ItemCategory::Weapon,
            SlotKey::Amulet | SlotKey::Ring | SlotKey::Bracelet | SlotKey::Belt => {
                ItemCategory::Accessory
            }
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            SlotKey::Head => "head",
            SlotKey::Shoulders => "shoulders",
            SlotKey::Chest => "chest",
            SlotKey::Gloves => "gloves",
            SlotKey::Legs => "legs",
            SlotKey::Boots => "boots",
            SlotKey::Primary => "primary",
            SlotKey::Secondary => "secondary",
            SlotKey::Amulet => "amulet",
            SlotKey::Ring => "ring",
            SlotKey::Bracelet => "bracelet",
            SlotKey::Belt => "belt",
        }
    }

    /// Title-cased slot name used in generated item names
    pub fn title(&self) -> String {
        let key = self.key();
        let mut chars = key.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SlotKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SlotKey::all()
            .iter()
            .copied()
            .find(|slot| slot.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown slot '{}'", s))
    }
}

/// Weapon archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponType {
    Sword,
    Dagger,
    Bow,
    Staff,
    Shield,
    Focus,
}

impl WeaponType {
    pub fn all() -> &'static [WeaponType] {
        &[
            WeaponType::Sword,
            WeaponType::Dagger,
            WeaponType::Bow,
            WeaponType::Staff,
            WeaponType::Shield,
            WeaponType::Focus,
        ]
    }

    /// Bow and Staff occupy both hands
    pub fn is_two_handed(&self) -> bool {
        matches!(self, WeaponType::Bow | WeaponType::Staff)
    }

    /// Blocking weapons roll Block instead of a damage range
    pub fn is_blocking(&self) -> bool {
        matches!(self, WeaponType::Shield)
    }

    pub fn name(&self) -> &'static str {
        match self {
            WeaponType::Sword => "Sword",
            WeaponType::Dagger => "Dagger",
            WeaponType::Bow => "Bow",
            WeaponType::Staff => "Staff",
            WeaponType::Shield => "Shield",
            WeaponType::Focus => "Focus",
        }
    }
}

impl fmt::Display for WeaponType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for WeaponType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeaponType::all()
            .iter()
            .copied()
            .find(|w| w.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown weapon type '{}'", s))
    }
}

/// Closed set of stat names carried by items, base stats and total stats.
///
/// Serialized names match the display strings used by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatName {
    // === Attributes ===
    Strength,
    #[serde(alias = "Dexterity")]
    Agility,
    Intelligence,
    Vitality,

    // === Resources ===
    #[serde(rename = "base_health")]
    BaseHealth,
    #[serde(rename = "base_mana")]
    BaseMana,

    // === Defenses ===
    Armor,
    Block,
    Dodge,

    // === Offense ===
    #[serde(rename = "Critical Chance")]
    CriticalChance,
    #[serde(rename = "Critical Damage")]
    CriticalDamage,
    #[serde(rename = "Weapon Damage")]
    WeaponDamage,
    MinDamage,
    MaxDamage,
    AttackSpeed,

    // === Derived ===
    #[serde(rename = "Bonus Damage")]
    BonusDamage,
    #[serde(rename = "Bonus Mana")]
    BonusMana,
    Health,
    Mana,
    Avoidance,
}

impl StatName {
    pub fn label(&self) -> &'static str {
        match self {
            StatName::Strength => "Strength",
            StatName::Agility => "Agility",
            StatName::Intelligence => "Intelligence",
            StatName::Vitality => "Vitality",
            StatName::BaseHealth => "Base Health",
            StatName::BaseMana => "Base Mana",
            StatName::Armor => "Armor",
            StatName::Block => "Block",
            StatName::Dodge => "Dodge",
            StatName::CriticalChance => "Critical Chance",
            StatName::CriticalDamage => "Critical Damage",
            StatName::WeaponDamage => "Weapon Damage",
            StatName::MinDamage => "Min Damage",
            StatName::MaxDamage => "Max Damage",
            StatName::AttackSpeed => "Attack Speed",
            StatName::BonusDamage => "Bonus Damage",
            StatName::BonusMana => "Bonus Mana",
            StatName::Health => "Health",
            StatName::Mana => "Mana",
            StatName::Avoidance => "Avoidance",
        }
    }
}

impl fmt::Display for StatName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_ordering() {
        let all = Rarity::all();
        for pair in all.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_slot_categories() {
        assert_eq!(SlotKey::Boots.category(), ItemCategory::Armor);
        assert_eq!(SlotKey::Secondary.category(), ItemCategory::Weapon);
        assert_eq!(SlotKey::Bracelet.category(), ItemCategory::Accessory);
        assert_eq!(SlotKey::all().len(), 12);
    }

    #[test]
    fn test_slot_key_parse() {
        assert_eq!("Primary".parse::<SlotKey>(), Ok(SlotKey::Primary));
        assert!("tail".parse::<SlotKey>().is_err());
        assert_eq!(SlotKey::Shoulders.title(), "Shoulders");
    }

    #[test]
    fn test_class_allow_lists() {
        assert!(CharacterClass::Warrior.can_wield(WeaponType::Shield, SlotKey::Secondary));
        assert!(!CharacterClass::Warrior.can_wield(WeaponType::Bow, SlotKey::Primary));
        assert!(CharacterClass::Rogue.can_wield(WeaponType::Bow, SlotKey::Primary));
        assert!(!CharacterClass::Rogue.can_wield(WeaponType::Shield, SlotKey::Secondary));
        assert!(CharacterClass::Mage.can_wield(WeaponType::Focus, SlotKey::Secondary));
        assert!(!CharacterClass::Mage.can_wield(WeaponType::Sword, SlotKey::Primary));
        assert!(!CharacterClass::Mage.can_wield(WeaponType::Staff, SlotKey::Head));
    }

    #[test]
    fn test_stat_name_serde_names() {
        let json = serde_json::to_string(&StatName::CriticalChance).unwrap();
        assert_eq!(json, "\"Critical Chance\"");

        let dex: StatName = serde_json::from_str("\"Dexterity\"").unwrap();
        assert_eq!(dex, StatName::Agility);
    }
}
