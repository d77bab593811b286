//! CombatEncounter - Time-driven battle state machine for one player

use super::resolution::{resolve_enemy_attack_with_rng, resolve_player_attack_with_rng};
use crate::character::Character;
use crate::config::CombatConstants;
use crate::enemy::{Enemy, EnemyFactory};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterState {
    /// Enemy spawned, no time has passed yet
    Engaging,
    Active,
    /// Enemy defeated; the next wave spawns after the wave delay
    Victory,
    /// Player defeated. Terminal in dungeon mode.
    Defeat,
    /// Final wave cleared
    Complete,
}

impl EncounterState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, EncounterState::Complete)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleMode {
    /// Endless or fixed waves; defeat restores both sides and continues
    Survival,
    /// Fixed waves ending in a boss; defeat ends the run
    Dungeon,
}

/// Waves in a full dungeon run: ten enemies then the boss
pub const DUNGEON_RUN_WAVES: u32 = 11;

/// Parameters for a new encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterConfig {
    pub challenge_level: u32,
    /// Number of waves including the boss wave. 0 in survival is endless.
    pub wave_count: u32,
    pub mode: BattleMode,
}

impl EncounterConfig {
    pub fn survival(challenge_level: u32, wave_count: u32) -> Self {
        EncounterConfig {
            challenge_level,
            wave_count,
            mode: BattleMode::Survival,
        }
    }

    pub fn dungeon(challenge_level: u32, wave_count: u32) -> Self {
        EncounterConfig {
            challenge_level,
            wave_count: wave_count.max(1),
            mode: BattleMode::Dungeon,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Combatant {
    Player,
    Enemy,
}

/// A change in hp. Negative for damage, positive for restores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HpDelta {
    pub target: Combatant,
    pub amount: i64,
}

/// Rewards earned for one kill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub xp: u64,
    pub copper: u64,
}

/// Everything that happened during one `update`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterEvents {
    pub log_lines: Vec<String>,
    pub hp_deltas: Vec<HpDelta>,
    pub rewards: Vec<Reward>,
    pub state: EncounterState,
}

impl EncounterEvents {
    fn new(state: EncounterState) -> Self {
        EncounterEvents {
            log_lines: Vec::new(),
            hp_deltas: Vec::new(),
            rewards: Vec::new(),
            state,
        }
    }
}

/// Running totals for the whole encounter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTotals {
    pub damage_dealt: u64,
    pub damage_taken: u64,
    pub kills: u32,
    pub defeats: u32,
    pub xp_earned: u64,
    pub copper_earned: u64,
}

/// One player's battle against a sequence of generated enemies
#[derive(Debug, Clone)]
pub struct CombatEncounter {
    config: EncounterConfig,
    constants: CombatConstants,
    enemies: EnemyFactory,
    state: EncounterState,
    /// 1-based index of the current wave
    wave: u32,
    enemy: Enemy,
    player_hp: u32,

    // === Timers ===
    player_timer: f64,
    enemy_timer: f64,
    wave_timer: f64,

    totals: RunTotals,
    history: VecDeque<String>,
    pending: Vec<String>,
}

impl CombatEncounter {
    /// Open an encounter and spawn the first enemy
    pub fn new(
        config: EncounterConfig,
        player: &Character,
        enemies: EnemyFactory,
        constants: CombatConstants,
    ) -> Self {
        Self::new_with_rng(config, player, enemies, constants, &mut rand::thread_rng())
    }

    pub fn new_with_rng(
        config: EncounterConfig,
        player: &Character,
        enemies: EnemyFactory,
        constants: CombatConstants,
        rng: &mut impl rand::Rng,
    ) -> Self {
        let is_boss = Self::is_boss_wave(&config, 1);
        let enemy = enemies.generate_with_rng(config.challenge_level, is_boss, rng);
        let mut encounter = CombatEncounter {
            config,
            constants,
            enemies,
            state: EncounterState::Engaging,
            wave: 1,
            enemy,
            player_hp: player.total_stats().max_health(),
            player_timer: 0.0,
            enemy_timer: 0.0,
            wave_timer: 0.0,
            totals: RunTotals::default(),
            history: VecDeque::new(),
            pending: Vec::new(),
        };
        encounter.log(format!("You engage a {}!", encounter.enemy.name));
        tracing::info!(
            mode = ?config.mode,
            level = config.challenge_level,
            waves = config.wave_count,
            "Encounter started"
        );
        encounter
    }

    fn is_boss_wave(config: &EncounterConfig, wave: u32) -> bool {
        config.mode == BattleMode::Dungeon && wave == config.wave_count
    }

    fn is_final_wave(&self) -> bool {
        self.config.wave_count > 0 && self.wave >= self.config.wave_count
    }

    // === Accessors ===

    pub fn state(&self) -> EncounterState {
        self.state
    }

    pub fn config(&self) -> &EncounterConfig {
        &self.config
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn player_hp(&self) -> u32 {
        self.player_hp
    }

    pub fn totals(&self) -> &RunTotals {
        &self.totals
    }

    /// The most recent log lines, oldest first
    pub fn history(&self) -> impl Iterator<Item = &str> + '_ {
        self.history.iter().map(String::as_str)
    }

    fn log(&mut self, line: String) {
        self.history.push_back(line.clone());
        while self.history.len() > self.constants.log_history {
            self.history.pop_front();
        }
        self.pending.push(line);
    }

    /// Advance the encounter by `dt` seconds (thread RNG)
    pub fn update(&mut self, dt: f64, player: &Character) -> EncounterEvents {
        self.update_with_rng(dt, player, &mut rand::thread_rng())
    }

    /// Advance the encounter with a provided RNG (for deterministic testing).
    ///
    /// Each side attacks at most once per call; the player swings first and
    /// a dead enemy does not swing back. Calling this on a finished
    /// encounter returns an empty event set. Negative or non-finite `dt`
    /// counts as zero.
    pub fn update_with_rng(
        &mut self,
        dt: f64,
        player: &Character,
        rng: &mut impl rand::Rng,
    ) -> EncounterEvents {
        if self.is_finished() {
            return EncounterEvents::new(self.state);
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        let mut events = EncounterEvents::new(self.state);
        match self.state {
            EncounterState::Engaging => {
                self.state = EncounterState::Active;
                self.tick_active(dt, player, rng, &mut events);
            }
            EncounterState::Active => self.tick_active(dt, player, rng, &mut events),
            EncounterState::Victory => self.tick_victory(dt, player, rng),
            EncounterState::Defeat => {
                // Survival only: both sides were restored when the player fell
                self.state = EncounterState::Active;
                self.tick_active(dt, player, rng, &mut events);
            }
            EncounterState::Complete => {}
        }

        events.log_lines = std::mem::take(&mut self.pending);
        events.state = self.state;
        events
    }

    /// Dungeon defeat ends the run
    fn is_lost(&self) -> bool {
        self.state == EncounterState::Defeat && self.config.mode == BattleMode::Dungeon
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal() || self.is_lost()
    }

    fn tick_active(
        &mut self,
        dt: f64,
        player: &Character,
        rng: &mut impl rand::Rng,
        events: &mut EncounterEvents,
    ) {
        let stats = player.total_stats();
        let max_hp = stats.max_health();
        if self.player_hp > max_hp {
            events.hp_deltas.push(HpDelta {
                target: Combatant::Player,
                amount: -((self.player_hp - max_hp) as i64),
            });
            self.player_hp = max_hp;
        }

        let player_delay = stats.attack_delay(self.constants.min_attack_delay);
        let enemy_delay = self.enemy.attack_delay(self.constants.min_attack_delay);

        self.player_timer += dt;
        self.enemy_timer += dt;

        if self.player_timer >= player_delay {
            self.player_timer = 0.0;
            let mut result = resolve_player_attack_with_rng(
                stats,
                &player.equipment,
                &self.constants,
                rng,
            );
            let dealt = self.enemy.take_damage(result.final_damage);
            result.is_killing_blow = self.enemy.is_dead();
            tracing::trace!(enemy = %self.enemy.name, result = %result.summary(), "Player attack");
            self.totals.damage_dealt += dealt as u64;
            events.hp_deltas.push(HpDelta {
                target: Combatant::Enemy,
                amount: -(dealt as i64),
            });

            let crit = if result.critical { " Critical hit!" } else { "" };
            self.log(format!(
                "You hit {} for {} damage.{}",
                self.enemy.name, result.final_damage, crit
            ));

            if result.is_killing_blow {
                self.win_wave(events);
                return;
            }
        }

        if self.enemy_timer >= enemy_delay {
            self.enemy_timer = 0.0;
            let result = resolve_enemy_attack_with_rng(&self.enemy, stats, rng);
            tracing::trace!(enemy = %self.enemy.name, result = %result.summary(), "Enemy attack");
            if result.missed() {
                let verb = if result.dodged { "dodge" } else { "avoid" };
                self.log(format!("You {} {}'s attack.", verb, self.enemy.name));
                return;
            }

            let taken = result.final_damage.min(self.player_hp);
            self.player_hp -= taken;
            self.totals.damage_taken += taken as u64;
            events.hp_deltas.push(HpDelta {
                target: Combatant::Player,
                amount: -(taken as i64),
            });

            let mut line = format!("{} hits you for {} damage.", self.enemy.name, result.final_damage);
            if result.critical {
                line.push_str(" Critical hit!");
            }
            if result.blocked {
                line.push_str(" You block part of the blow.");
            }
            self.log(line);

            if self.player_hp == 0 {
                self.lose(player, events);
            }
        }
    }

    fn win_wave(&mut self, events: &mut EncounterEvents) {
        let reward = Reward {
            xp: self.enemy.reward_xp,
            copper: self.enemy.reward_copper,
        };
        self.totals.kills += 1;
        self.totals.xp_earned += reward.xp;
        self.totals.copper_earned += reward.copper;
        events.rewards.push(reward);

        self.log(format!("{} is defeated!", self.enemy.name));
        self.log(format!("You gain {} XP and {} copper.", reward.xp, reward.copper));

        if self.is_final_wave() {
            self.state = EncounterState::Complete;
            self.log("You are victorious!".to_string());
            tracing::info!(kills = self.totals.kills, "Encounter complete");
        } else {
            self.state = EncounterState::Victory;
            self.wave_timer = 0.0;
            tracing::debug!(wave = self.wave, enemy = %self.enemy.name, "Wave cleared");
        }
    }

    fn tick_victory(
        &mut self,
        dt: f64,
        player: &Character,
        rng: &mut impl rand::Rng,
    ) {
        self.wave_timer += dt;
        if self.wave_timer < self.constants.wave_delay {
            return;
        }

        self.wave += 1;
        let is_boss = Self::is_boss_wave(&self.config, self.wave);
        self.enemy = self
            .enemies
            .generate_with_rng(self.config.challenge_level, is_boss, rng);
        self.player_timer = 0.0;
        self.enemy_timer = 0.0;
        self.wave_timer = 0.0;
        self.state = EncounterState::Active;

        // Hp carries over between waves but never above the current maximum
        self.player_hp = self.player_hp.min(player.total_stats().max_health());

        tracing::debug!(wave = self.wave, enemy = %self.enemy.name, boss = is_boss, "Wave spawned");
        self.log(format!("You engage a {}!", self.enemy.name));
    }

    fn lose(&mut self, player: &Character, events: &mut EncounterEvents) {
        self.totals.defeats += 1;
        self.state = EncounterState::Defeat;
        self.log("You have been defeated.".to_string());

        match self.config.mode {
            BattleMode::Dungeon => {
                tracing::info!(wave = self.wave, "Dungeon run lost");
            }
            BattleMode::Survival => {
                let max_hp = player.total_stats().max_health();
                events.hp_deltas.push(HpDelta {
                    target: Combatant::Player,
                    amount: max_hp as i64,
                });
                events.hp_deltas.push(HpDelta {
                    target: Combatant::Enemy,
                    amount: (self.enemy.max_hp - self.enemy.hp) as i64,
                });
                self.player_hp = max_hp;
                self.enemy.hp = self.enemy.max_hp;
                self.player_timer = 0.0;
                self.enemy_timer = 0.0;
                tracing::info!(wave = self.wave, "Survival defeat, restoring both sides");
            }
        }
    }
}
