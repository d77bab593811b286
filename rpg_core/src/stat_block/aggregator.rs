//! StatAccumulator - Collects stat contributions before producing TotalStats

use super::constants::*;
use super::{round_to, BaseStats, StatMap, TotalStats};
use crate::equipment::EquipmentSet;
use crate::source::{GearSource, StatSource};
use crate::types::{CharacterClass, SlotKey, StatName, WeaponType};

/// What a hand slot contributes to attack speed
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HandState {
    pub weapon_type: Option<WeaponType>,
    /// The item's AttackSpeed, if it carries one
    pub speed: Option<f64>,
}

/// Accumulates stat contributions from every source.
///
/// Sources add raw stats; [`StatAccumulator::finish`] then derives the
/// attribute-driven stats and attack speed.
#[derive(Debug, Clone, Default)]
pub struct StatAccumulator {
    pub stats: StatMap,
    pub class: Option<CharacterClass>,
    pub primary: Option<HandState>,
    pub secondary: Option<HandState>,
}

impl StatAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, stat: StatName, value: f64) {
        self.stats.add(stat, value);
    }

    /// Record the weapon held in a hand slot
    pub fn set_hand(&mut self, slot: SlotKey, hand: HandState) {
        match slot {
            SlotKey::Primary => self.primary = Some(hand),
            SlotKey::Secondary => self.secondary = Some(hand),
            _ => {}
        }
    }

    /// Attack speed from the hand slots, clamped and rounded to 2 decimals
    fn attack_speed(&self) -> f64 {
        let primary_two_handed = self
            .primary
            .and_then(|hand| hand.weapon_type)
            .is_some_and(|w| w.is_two_handed());
        let primary_speed = self
            .primary
            .and_then(|hand| hand.speed)
            .unwrap_or(UNARMED_ATTACK_SPEED);

        let speed = if primary_two_handed {
            primary_speed
        } else {
            primary_speed + self.secondary_bonus()
        };

        round_to(speed.max(MIN_ATTACK_SPEED), 2)
    }

    fn secondary_bonus(&self) -> f64 {
        let Some(hand) = self.secondary else {
            return 0.0;
        };
        let speed = hand.speed.unwrap_or(0.0);
        let rate = match hand.weapon_type {
            Some(WeaponType::Shield) => SHIELD_SPEED_BONUS,
            Some(WeaponType::Focus) => FOCUS_SPEED_BONUS,
            Some(WeaponType::Sword | WeaponType::Dagger) => match self.class {
                Some(CharacterClass::Rogue) => ROGUE_DUAL_WIELD_BONUS,
                _ => DUAL_WIELD_BONUS,
            },
            _ => 0.0,
        };
        rate * speed
    }

    /// Derive the attribute-driven stats and produce the snapshot
    pub fn finish(self) -> TotalStats {
        let attack_speed = self.attack_speed();
        let mut stats = self.stats;

        let strength = stats.get(StatName::Strength);
        let agility = stats.get(StatName::Agility);
        let intelligence = stats.get(StatName::Intelligence);
        let vitality = stats.get(StatName::Vitality);

        stats.set(
            StatName::BonusDamage,
            (strength / STRENGTH_PER_BONUS_DAMAGE).floor(),
        );
        stats.set(
            StatName::BonusMana,
            (intelligence / INTELLIGENCE_PER_MANA).floor(),
        );
        stats.set(
            StatName::Health,
            stats.get(StatName::BaseHealth) + (vitality / VITALITY_PER_HEALTH).floor(),
        );
        stats.set(
            StatName::Mana,
            stats.get(StatName::BaseMana) + (intelligence / INTELLIGENCE_PER_MANA).floor(),
        );
        stats.set(
            StatName::Avoidance,
            (intelligence / INTELLIGENCE_PER_AVOIDANCE).floor(),
        );
        stats.add(StatName::Dodge, (agility / AGILITY_PER_DODGE).floor());
        stats.set(StatName::AttackSpeed, attack_speed);

        TotalStats::from_map(stats)
    }
}

/// Apply sources in priority order and produce the snapshot
pub fn recompute_from_sources(sources: &[&dyn StatSource]) -> TotalStats {
    let mut sorted: Vec<&dyn StatSource> = sources.to_vec();
    sorted.sort_by_key(|s| s.priority());

    let mut accumulator = StatAccumulator::new();
    for source in sorted {
        source.apply(&mut accumulator);
    }
    accumulator.finish()
}

/// Effective stats for base stats plus equipment.
///
/// Pure: the same inputs always give the same snapshot. A secondary item
/// behind a two-handed primary contributes nothing.
pub fn recompute(base: &BaseStats, equipment: &EquipmentSet) -> TotalStats {
    let two_handed = equipment.has_two_handed_primary();
    let gear: Vec<GearSource<'_>> = equipment
        .iter()
        .filter(|(slot, _)| !(two_handed && *slot == SlotKey::Secondary))
        .map(|(slot, item)| GearSource::new(slot, item))
        .collect();

    let mut sources: Vec<&dyn StatSource> = Vec::with_capacity(gear.len() + 1);
    sources.push(base);
    sources.extend(gear.iter().map(|g| g as &dyn StatSource));

    recompute_from_sources(&sources)
}
