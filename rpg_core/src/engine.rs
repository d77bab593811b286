//! Engine - Facade over item generation, equipment, combat and progression
//!
//! Owns the tuning constants, the generators and the session registry.
//! Every per-player operation is keyed by player name and runs under that
//! player's session lock.

use crate::character::{Character, CharacterRecord};
use crate::combat::{
    BattleMode, CombatEncounter, EncounterConfig, EncounterError, EncounterEvents, EncounterHandle,
    EncounterState, RunTotals, DUNGEON_RUN_WAVES,
};
use crate::config::{load_constants, GameConstants};
use crate::enemy::EnemyFactory;
use crate::equipment::{EquipError, EquipmentSet, Inventory};
use crate::error::{EngineError, Result};
use crate::item::{compare_items, GatheringSkill, Item, ItemGenerator, ItemRequest, StatComparison};
use crate::progression::IdleReward;
use crate::session::SessionRegistry;
use crate::stat_block::{recompute, BaseStats, TotalStats};
use crate::types::{CharacterClass, SlotKey};
use chrono::{DateTime, Utc};
use rand::Rng;
use std::path::Path;

#[derive(Debug)]
pub struct Engine {
    constants: GameConstants,
    items: ItemGenerator,
    enemies: EnemyFactory,
    sessions: SessionRegistry,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(GameConstants::default())
    }
}

impl Engine {
    pub fn new(constants: GameConstants) -> Self {
        Engine {
            items: ItemGenerator::new(constants.loot.clone()),
            enemies: EnemyFactory::new(constants.enemies.clone()),
            sessions: SessionRegistry::new(),
            constants,
        }
    }

    /// Build an engine from a constants TOML file
    pub fn from_config_file(path: &Path) -> Result<Self> {
        Ok(Engine::new(load_constants(path)?))
    }

    pub fn constants(&self) -> &GameConstants {
        &self.constants
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    // === Items ===

    pub fn generate_item(&self, request: &ItemRequest) -> Item {
        self.items.generate(request)
    }

    pub fn generate_item_with_rng(&self, request: &ItemRequest, rng: &mut impl Rng) -> Item {
        self.items.generate_with_rng(request, rng)
    }

    pub fn gather(&self, player: &str, skill: GatheringSkill) -> Result<Option<usize>> {
        self.gather_with_rng(player, skill, &mut rand::thread_rng())
    }

    /// Gather one material at the player's skill level and put it in their
    /// inventory. Returns its index, or `None` if the skill unlocks nothing.
    pub fn gather_with_rng(
        &self,
        player: &str,
        skill: GatheringSkill,
        rng: &mut impl Rng,
    ) -> Result<Option<usize>> {
        self.sessions.with_session(player, |s| -> Result<Option<usize>> {
            let level = s.character.progression.gathering.level(skill);
            let Some(item) = self.items.gather_with_rng(skill, level, rng) else {
                return Ok(None);
            };
            tracing::debug!(player = %s.character.name, skill = %skill, item = %item.name, "Gathered");
            Ok(Some(s.character.inventory_mut().add(item)?))
        })?
    }

    /// Put an item in a player's inventory, returning its index
    pub fn give_item(&self, player: &str, item: Item) -> Result<usize> {
        self.sessions
            .with_session(player, |s| s.character.inventory_mut().add(item))?
            .map_err(EngineError::from)
    }

    pub fn delete_item(&self, player: &str, inventory_index: usize) -> Result<Item> {
        self.sessions
            .with_session(player, |s| s.character.inventory_mut().delete(inventory_index))?
            .map_err(EngineError::from)
    }

    /// Compare an inventory item with whatever is equipped in its slot
    pub fn compare_with_equipped(&self, player: &str, inventory_index: usize) -> Result<Vec<StatComparison>> {
        self.sessions.with_session(player, |s| -> Result<Vec<StatComparison>> {
            let character = &s.character;
            let item = character
                .inventory()
                .get(inventory_index)
                .ok_or(EquipError::ItemNotFound(inventory_index))?;
            let equipped = item.subtype().and_then(|slot| character.equipment().get(slot));
            Ok(compare_items(item, equipped))
        })?
    }

    // === Equipment ===

    pub fn equip(&self, player: &str, inventory_index: usize) -> Result<()> {
        self.sessions
            .with_session(player, |s| s.character.equip(inventory_index))?
            .map_err(EngineError::from)
    }

    pub fn equip_to(&self, player: &str, inventory_index: usize, slot: SlotKey) -> Result<()> {
        self.sessions
            .with_session(player, |s| s.character.equip_to(inventory_index, slot))?
            .map_err(EngineError::from)
    }

    /// Move an equipped item back to the inventory, returning its new index
    pub fn unequip(&self, player: &str, slot: SlotKey) -> Result<usize> {
        self.sessions
            .with_session(player, |s| s.character.unequip(slot))?
            .map_err(EngineError::from)
    }

    // === Stats ===

    pub fn recompute_stats(base: &BaseStats, equipment: &EquipmentSet) -> TotalStats {
        recompute(base, equipment)
    }

    pub fn total_stats(&self, player: &str) -> Result<TotalStats> {
        self.sessions
            .with_session(player, |s| s.character.total_stats().clone())
    }

    /// Snapshot of a player's character
    pub fn character(&self, player: &str) -> Result<Character> {
        self.sessions.with_session(player, |s| s.character.clone())
    }

    // === Combat ===

    pub fn start_encounter(&self, player: &str, config: EncounterConfig) -> Result<EncounterHandle> {
        self.start_encounter_with_rng(player, config, &mut rand::thread_rng())
    }

    /// Open an encounter. A finished encounter is replaced; a running one
    /// is an error.
    pub fn start_encounter_with_rng(
        &self,
        player: &str,
        config: EncounterConfig,
        rng: &mut impl Rng,
    ) -> Result<EncounterHandle> {
        let handle = self.sessions.next_handle();
        self.sessions.with_session(player, |s| -> Result<EncounterHandle> {
            if let Some((_, running)) = &s.encounter {
                if !running.is_finished() {
                    return Err(EncounterError::AlreadyActive.into());
                }
            }
            let encounter = CombatEncounter::new_with_rng(
                config,
                &s.character,
                self.enemies.clone(),
                self.constants.combat.clone(),
                rng,
            );
            s.encounter = Some((handle, encounter));
            Ok(handle)
        })?
    }

    pub fn start_dungeon(&self, player: &str) -> Result<EncounterHandle> {
        self.start_dungeon_with_rng(player, &mut rand::thread_rng())
    }

    /// Open a full dungeon run at the player's current dungeon level
    pub fn start_dungeon_with_rng(&self, player: &str, rng: &mut impl Rng) -> Result<EncounterHandle> {
        let level = self
            .sessions
            .with_session(player, |s| s.character.progression.dungeon.current_level)?;
        self.start_encounter_with_rng(player, EncounterConfig::dungeon(level, DUNGEON_RUN_WAVES), rng)
    }

    pub fn tick(&self, player: &str, handle: EncounterHandle, dt: f64) -> Result<EncounterEvents> {
        self.tick_with_rng(player, handle, dt, &mut rand::thread_rng())
    }

    /// Advance a player's encounter and apply any kill rewards to the
    /// character. A dungeon that completes on this tick is recorded in the
    /// character's dungeon progress.
    pub fn tick_with_rng(
        &self,
        player: &str,
        handle: EncounterHandle,
        dt: f64,
        rng: &mut impl Rng,
    ) -> Result<EncounterEvents> {
        let progression = &self.constants.progression;
        self.sessions.with_session(player, |s| -> Result<EncounterEvents> {
            let encounter = match &mut s.encounter {
                Some((current, encounter)) if *current == handle => encounter,
                Some(_) => return Err(EncounterError::UnknownEncounter(handle).into()),
                None => return Err(EncounterError::NoEncounter.into()),
            };
            let was_finished = encounter.is_finished();
            let config = *encounter.config();
            let events = encounter.update_with_rng(dt, &s.character, rng);
            for reward in &events.rewards {
                s.character.apply_experience(reward.xp, progression);
                s.character.add_copper(reward.copper);
            }
            if !was_finished
                && events.state == EncounterState::Complete
                && config.mode == BattleMode::Dungeon
            {
                s.character.record_dungeon_clear(config.challenge_level);
            }
            Ok(events)
        })?
    }

    /// Close an encounter and return its run totals
    pub fn end_encounter(&self, player: &str, handle: EncounterHandle) -> Result<RunTotals> {
        self.sessions.with_session(player, |s| -> Result<RunTotals> {
            match s.encounter.take() {
                Some((current, encounter)) if current == handle => {
                    tracing::info!(player = %s.character.name, kills = encounter.totals().kills, "Encounter closed");
                    Ok(*encounter.totals())
                }
                None => Err(EncounterError::NoEncounter.into()),
                other => {
                    s.encounter = other;
                    Err(EncounterError::UnknownEncounter(handle).into())
                }
            }
        })?
    }

    // === Progression ===

    /// Returns the number of levels gained
    pub fn apply_experience(&self, player: &str, amount: u64) -> Result<u32> {
        let progression = &self.constants.progression;
        self.sessions
            .with_session(player, |s| s.character.apply_experience(amount, progression))
    }

    /// Claim the pending offline reward. Any offline time not yet accrued
    /// (a logout stamp still present) is added against `now` first.
    pub fn claim_idle_reward(&self, player: &str, now: DateTime<Utc>) -> Result<Option<IdleReward>> {
        let progression = &self.constants.progression;
        self.sessions.with_session(player, |s| {
            s.character.progression.accrue_idle_reward(now, progression);
            s.character.claim_idle_reward(progression)
        })
    }

    // === Sessions ===

    pub fn login(&self, record: CharacterRecord, now: DateTime<Utc>) -> Result<Option<IdleReward>> {
        self.sessions.login(record, now, &self.constants.progression)
    }

    pub fn logout(&self, player: &str, now: DateTime<Utc>) -> Result<CharacterRecord> {
        self.sessions.logout(player, now)
    }

    /// Create a fresh character and log it in
    pub fn create_character(
        &self,
        name: &str,
        class: CharacterClass,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let character = Character::with_inventory(
            name,
            class,
            Inventory::with_capacity(self.constants.progression.inventory_capacity),
        );
        self.login(character.into_record(), now).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::EncounterState;
    use crate::types::{Rarity, WeaponType};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn engine_with(name: &str, class: CharacterClass) -> Engine {
        let engine = Engine::default();
        engine.create_character(name, class, Utc::now()).unwrap();
        engine
    }

    #[test]
    fn test_equip_through_engine() {
        let engine = engine_with("Aria", CharacterClass::Warrior);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let sword = engine.generate_item_with_rng(
            &ItemRequest::new(SlotKey::Primary, CharacterClass::Warrior)
                .weapon(WeaponType::Sword)
                .rarity(Rarity::Epic),
            &mut rng,
        );
        let index = engine.give_item("Aria", sword).unwrap();

        let diff = engine.compare_with_equipped("Aria", index).unwrap();
        assert!(!diff.is_empty());

        engine.equip("Aria", index).unwrap();
        let stats = engine.total_stats("Aria").unwrap();
        assert!((stats.attack_speed() - 1.0).abs() < f64::EPSILON);

        assert_eq!(engine.unequip("Aria", SlotKey::Primary).unwrap(), 0);
        assert!(matches!(
            engine.unequip("Aria", SlotKey::Primary),
            Err(EngineError::Equip(EquipError::SlotEmpty(SlotKey::Primary)))
        ));
    }

    #[test]
    fn test_one_encounter_at_a_time() {
        let engine = engine_with("Aria", CharacterClass::Rogue);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let handle = engine
            .start_encounter_with_rng("Aria", EncounterConfig::survival(1, 0), &mut rng)
            .unwrap();
        assert!(matches!(
            engine.start_encounter_with_rng("Aria", EncounterConfig::survival(1, 0), &mut rng),
            Err(EngineError::Encounter(EncounterError::AlreadyActive))
        ));

        let stale = EncounterHandle(handle.0 + 100);
        assert!(matches!(
            engine.tick("Aria", stale, 0.1),
            Err(EngineError::Encounter(EncounterError::UnknownEncounter(_)))
        ));

        engine.end_encounter("Aria", handle).unwrap();
        assert!(matches!(
            engine.tick("Aria", handle, 0.1),
            Err(EngineError::Encounter(EncounterError::NoEncounter))
        ));
        assert!(engine
            .start_encounter_with_rng("Aria", EncounterConfig::survival(1, 0), &mut rng)
            .is_ok());
    }

    #[test]
    fn test_tick_applies_rewards() {
        let engine = engine_with("Aria", CharacterClass::Warrior);
        engine
            .sessions()
            .with_session("Aria", |s| {
                s.character.update_base_stats(|base| base.strength = 5000.0)
            })
            .unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let handle = engine
            .start_encounter_with_rng("Aria", EncounterConfig::survival(1, 3), &mut rng)
            .unwrap();

        let mut xp = 0;
        let mut copper = 0;
        for _ in 0..10 {
            let events = engine.tick_with_rng("Aria", handle, 1.0, &mut rng).unwrap();
            xp += events.rewards.iter().map(|r| r.xp).sum::<u64>();
            copper += events.rewards.iter().map(|r| r.copper).sum::<u64>();
            if events.state == EncounterState::Complete {
                break;
            }
        }
        assert!(xp > 0);

        let hero = engine.character("Aria").unwrap();
        assert_eq!(hero.progression.coins.total_copper(), copper);
        assert!(hero.level() > 1);
        let totals = engine.end_encounter("Aria", handle).unwrap();
        assert_eq!(totals.kills, 3);
        assert_eq!(totals.xp_earned, xp);
    }

    #[test]
    fn test_dungeon_clear_advances_progress_once() {
        let engine = engine_with("Aria", CharacterClass::Warrior);
        engine
            .sessions()
            .with_session("Aria", |s| {
                s.character.update_base_stats(|base| base.strength = 5000.0)
            })
            .unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let handle = engine
            .start_encounter_with_rng("Aria", EncounterConfig::dungeon(1, 2), &mut rng)
            .unwrap();
        let mut state = EncounterState::Engaging;
        for _ in 0..50 {
            state = engine.tick_with_rng("Aria", handle, 1.0, &mut rng).unwrap().state;
            if state == EncounterState::Complete {
                break;
            }
        }
        assert_eq!(state, EncounterState::Complete);

        // Ticking a finished run does not count it again
        engine.tick_with_rng("Aria", handle, 1.0, &mut rng).unwrap();
        let dungeon = engine.character("Aria").unwrap().progression.dungeon;
        assert_eq!(dungeon.current_level, 2);
        assert_eq!(dungeon.highest_level, 1);

        engine.end_encounter("Aria", handle).unwrap();
        let next = engine.start_dungeon_with_rng("Aria", &mut rng).unwrap();
        let config = engine
            .sessions()
            .with_session("Aria", |s| s.encounter.as_ref().map(|(_, e)| *e.config()))
            .unwrap()
            .unwrap();
        assert_eq!(config, EncounterConfig::dungeon(2, DUNGEON_RUN_WAVES));
        engine.end_encounter("Aria", next).unwrap();
    }

    #[test]
    fn test_survival_waves_leave_dungeon_progress() {
        let engine = engine_with("Aria", CharacterClass::Warrior);
        engine
            .sessions()
            .with_session("Aria", |s| {
                s.character.update_base_stats(|base| base.strength = 5000.0)
            })
            .unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let handle = engine
            .start_encounter_with_rng("Aria", EncounterConfig::survival(1, 1), &mut rng)
            .unwrap();
        for _ in 0..20 {
            if engine.tick_with_rng("Aria", handle, 1.0, &mut rng).unwrap().state
                == EncounterState::Complete
            {
                break;
            }
        }
        let dungeon = engine.character("Aria").unwrap().progression.dungeon;
        assert_eq!(dungeon, crate::progression::DungeonStats::default());
    }

    #[test]
    fn test_gather_fills_inventory() {
        let engine = engine_with("Aria", CharacterClass::Rogue);
        let mut rng = ChaCha8Rng::seed_from_u64(6);

        let index = engine
            .gather_with_rng("Aria", GatheringSkill::Scavenging, &mut rng)
            .unwrap()
            .unwrap();
        let hero = engine.character("Aria").unwrap();
        let item = hero.inventory().get(index).unwrap();
        assert!(GatheringSkill::Scavenging
            .materials()
            .any(|m| m.name == item.name));
        assert_eq!(item.level, 1);

        // A misc item cannot be equipped
        assert!(matches!(engine.equip("Aria", index), Err(EngineError::Equip(_))));
    }

    #[test]
    fn test_unknown_player() {
        let engine = Engine::default();
        assert!(matches!(
            engine.apply_experience("Ghost", 10),
            Err(EngineError::UnknownPlayer(_))
        ));
    }

    #[test]
    fn test_claim_idle_reward_once() {
        let engine = Engine::default();
        let now = Utc::now();
        let mut record = Character::new("Aria", CharacterClass::Mage).into_record();
        record.progression.last_logout = Some(now - chrono::Duration::hours(10));
        engine.login(record, now).unwrap();

        let reward = engine.claim_idle_reward("Aria", now).unwrap().unwrap();
        assert_eq!(reward.xp, 1440);
        assert_eq!(engine.claim_idle_reward("Aria", now).unwrap(), None);
    }
}
