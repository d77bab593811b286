//! Attack resolution - Turn stats into damage for both sides of an encounter

use super::result::AttackResult;
use crate::config::CombatConstants;
use crate::defense::{apply_block, apply_crit, mitigate_armor, roll_chance};
use crate::enemy::Enemy;
use crate::equipment::EquipmentSet;
use crate::stat_block::TotalStats;
use crate::types::{SlotKey, WeaponType};
use rand::Rng;

/// Roll a player's weapon damage before crits.
///
/// Primary weapon range (or the unarmed range), plus the secondary range
/// when dual-wielding a Sword or Dagger, plus BonusDamage.
pub fn roll_player_damage(
    attacker: &TotalStats,
    equipment: &EquipmentSet,
    constants: &CombatConstants,
    rng: &mut impl Rng,
) -> u32 {
    let (min, max) = equipment
        .get(SlotKey::Primary)
        .and_then(|item| item.damage_range())
        .unwrap_or((constants.unarmed_min, constants.unarmed_max.max(constants.unarmed_min)));
    let mut damage = rng.gen_range(min..=max);

    let dual_wield = !equipment.has_two_handed_primary()
        && matches!(
            equipment.weapon_type(SlotKey::Secondary),
            Some(WeaponType::Sword | WeaponType::Dagger)
        );
    if dual_wield {
        if let Some((min, max)) = equipment
            .get(SlotKey::Secondary)
            .and_then(|item| item.damage_range())
        {
            damage += rng.gen_range(min..=max);
        }
    }

    damage + attacker.bonus_damage()
}

/// Resolve a player attack against an enemy (thread RNG)
pub fn resolve_player_attack(
    attacker: &TotalStats,
    equipment: &EquipmentSet,
    constants: &CombatConstants,
) -> AttackResult {
    resolve_player_attack_with_rng(attacker, equipment, constants, &mut rand::thread_rng())
}

/// Resolve a player attack with a provided RNG (for deterministic testing)
///
/// Enemies have no defenses: the result is the weapon roll, possibly crit.
pub fn resolve_player_attack_with_rng(
    attacker: &TotalStats,
    equipment: &EquipmentSet,
    constants: &CombatConstants,
    rng: &mut impl Rng,
) -> AttackResult {
    let mut result = AttackResult::new(roll_player_damage(attacker, equipment, constants, rng));
    if roll_chance(attacker.crit_chance(), rng) {
        result.critical = true;
        result.final_damage = apply_crit(result.raw_damage, attacker.crit_damage());
    }
    result
}

/// Resolve an enemy attack against the player (thread RNG)
pub fn resolve_enemy_attack(enemy: &Enemy, defender: &TotalStats) -> AttackResult {
    resolve_enemy_attack_with_rng(enemy, defender, &mut rand::thread_rng())
}

/// Resolve an enemy attack with a provided RNG (for deterministic testing)
///
/// Steps, in order:
/// 1. Dodge (no damage)
/// 2. Avoidance (no damage)
/// 3. Enemy critical strike
/// 4. Block halves the post-crit damage
/// 5. Armor mitigation
pub fn resolve_enemy_attack_with_rng(
    enemy: &Enemy,
    defender: &TotalStats,
    rng: &mut impl Rng,
) -> AttackResult {
    let mut result = AttackResult::new(enemy.damage);

    if roll_chance(defender.dodge(), rng) {
        result.dodged = true;
        result.final_damage = 0;
        return result;
    }
    if roll_chance(defender.avoidance(), rng) {
        result.avoided = true;
        result.final_damage = 0;
        return result;
    }

    let mut damage = enemy.damage;
    if roll_chance(enemy.crit_chance, rng) {
        result.critical = true;
        damage = apply_crit(damage, enemy.crit_damage);
    }

    if roll_chance(defender.block(), rng) {
        let through = apply_block(damage);
        result.blocked = true;
        result.reduced_by_block = damage - through;
        damage = through;
    }

    let after_armor = mitigate_armor(damage, defender.armor());
    result.reduced_by_armor = damage - after_armor;
    result.final_damage = after_armor;
    result
}
