//! SessionRegistry - Online players and their per-player state
//!
//! One entry per logged-in player, created at login and dropped at logout.
//! Each session sits behind its own mutex so an equip can never interleave
//! with a combat tick for the same player.

use crate::character::{Character, CharacterRecord};
use crate::combat::{CombatEncounter, EncounterHandle};
use crate::config::ProgressionConstants;
use crate::error::{EngineError, Result};
use crate::progression::IdleReward;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

/// State owned by one online player
#[derive(Debug)]
pub struct PlayerSession {
    pub character: Character,
    pub(crate) encounter: Option<(EncounterHandle, CombatEncounter)>,
    pub logged_in_at: DateTime<Utc>,
}

impl PlayerSession {
    pub fn encounter(&self) -> Option<(EncounterHandle, &CombatEncounter)> {
        self.encounter.as_ref().map(|(handle, encounter)| (*handle, encounter))
    }

    /// Time spent online as of `now`; zero if the clock went backwards
    pub fn online_for(&self, now: DateTime<Utc>) -> Duration {
        (now - self.logged_in_at).max(Duration::zero())
    }
}

/// Registry of online players keyed by case-insensitive name
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Arc<Mutex<PlayerSession>>>>,
    next_handle: AtomicU64,
}

fn key(name: &str) -> String {
    name.to_lowercase()
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring a character online and accrue any offline reward since its
    /// last logout. The reward stays pending until claimed.
    pub fn login(
        &self,
        record: CharacterRecord,
        now: DateTime<Utc>,
        constants: &ProgressionConstants,
    ) -> Result<Option<IdleReward>> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| EngineError::SessionPoisoned)?;

        let name = record.name.clone();
        if sessions.contains_key(&key(&name)) {
            return Err(EngineError::AlreadyOnline(name));
        }

        let mut character = Character::from(record);
        let reward = character.progression.accrue_idle_reward(now, constants);
        sessions.insert(
            key(&name),
            Arc::new(Mutex::new(PlayerSession {
                character,
                encounter: None,
                logged_in_at: now,
            })),
        );
        tracing::info!(player = %name, online = sessions.len(), "Player logged in");
        Ok(reward)
    }

    /// Take a character offline, stamping its logout time. Returns the
    /// record to persist. Any running encounter is dropped.
    pub fn logout(&self, name: &str, now: DateTime<Utc>) -> Result<CharacterRecord> {
        let session = {
            let mut sessions = self
                .sessions
                .write()
                .map_err(|_| EngineError::SessionPoisoned)?;
            sessions
                .remove(&key(name))
                .ok_or_else(|| EngineError::UnknownPlayer(name.to_string()))?
        };

        let mut session = session.lock().map_err(|_| EngineError::SessionPoisoned)?;
        session.encounter = None;
        session.character.progression.last_logout = Some(now);
        tracing::info!(
            player = %name,
            online_secs = session.online_for(now).num_seconds(),
            "Player logged out"
        );
        Ok(session.character.clone().into_record())
    }

    pub fn session(&self, name: &str) -> Result<Arc<Mutex<PlayerSession>>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| EngineError::SessionPoisoned)?;
        sessions
            .get(&key(name))
            .cloned()
            .ok_or_else(|| EngineError::UnknownPlayer(name.to_string()))
    }

    /// Run `f` with exclusive access to one player's session
    pub fn with_session<T>(&self, name: &str, f: impl FnOnce(&mut PlayerSession) -> T) -> Result<T> {
        let session = self.session(name)?;
        let mut guard = session.lock().map_err(|_| EngineError::SessionPoisoned)?;
        Ok(f(&mut guard))
    }

    pub fn is_online(&self, name: &str) -> bool {
        self.sessions
            .read()
            .map(|sessions| sessions.contains_key(&key(name)))
            .unwrap_or(false)
    }

    pub fn online_count(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub(crate) fn next_handle(&self) -> EncounterHandle {
        EncounterHandle(self.next_handle.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CharacterClass;

    fn record(name: &str) -> CharacterRecord {
        Character::new(name, CharacterClass::Warrior).into_record()
    }

    #[test]
    fn test_login_logout_cycle() {
        let registry = SessionRegistry::new();
        let now = Utc::now();
        assert_eq!(registry.login(record("Aria"), now, &Default::default()).unwrap(), None);
        assert!(registry.is_online("aria"));
        assert_eq!(registry.online_count(), 1);

        let saved = registry.logout("ARIA", now).unwrap();
        assert_eq!(saved.progression.last_logout, Some(now));
        assert!(!registry.is_online("Aria"));
    }

    #[test]
    fn test_double_login_rejected() {
        let registry = SessionRegistry::new();
        let now = Utc::now();
        registry.login(record("Aria"), now, &Default::default()).unwrap();
        let err = registry.login(record("aria"), now, &Default::default()).unwrap_err();
        assert!(matches!(err, EngineError::AlreadyOnline(_)));
    }

    #[test]
    fn test_unknown_player() {
        let registry = SessionRegistry::new();
        assert!(matches!(
            registry.logout("Nobody", Utc::now()),
            Err(EngineError::UnknownPlayer(_))
        ));
        assert!(matches!(
            registry.with_session("Nobody", |_| ()),
            Err(EngineError::UnknownPlayer(_))
        ));
    }

    #[test]
    fn test_login_accrues_idle_reward() {
        let registry = SessionRegistry::new();
        let now = Utc::now();
        let mut saved = record("Aria");
        saved.progression.last_logout = Some(now - Duration::minutes(10));

        let reward = registry.login(saved, now, &Default::default()).unwrap().unwrap();
        assert_eq!(reward.xp, 60);
        assert_eq!(reward.gold, 120);

        let pending = registry
            .with_session("Aria", |s| s.character.progression.pending_idle)
            .unwrap();
        assert_eq!(pending, Some(reward));
    }

    #[test]
    fn test_unclaimed_reward_survives_relog() {
        let registry = SessionRegistry::new();
        let t0 = Utc::now();
        let mut saved = record("Aria");
        saved.progression.last_logout = Some(t0 - Duration::hours(4));

        let first = registry.login(saved, t0, &Default::default()).unwrap().unwrap();
        assert_eq!(first.xp, 1440);

        // Log out without claiming, come back ten minutes later
        let saved = registry.logout("Aria", t0).unwrap();
        assert_eq!(saved.progression.pending_idle, Some(first));
        let pending = registry
            .login(saved, t0 + Duration::minutes(10), &Default::default())
            .unwrap()
            .unwrap();
        assert_eq!(pending.xp, 1500);
        assert_eq!(pending.gold, 3000);
    }

    #[test]
    fn test_online_time() {
        let registry = SessionRegistry::new();
        let now = Utc::now();
        registry.login(record("Aria"), now, &Default::default()).unwrap();
        let session = registry.session("Aria").unwrap();
        let session = session.lock().unwrap();
        assert_eq!(session.online_for(now + Duration::minutes(3)).num_seconds(), 180);
        assert_eq!(session.online_for(now - Duration::minutes(3)), Duration::zero());
    }

    #[test]
    fn test_handles_are_unique() {
        let registry = SessionRegistry::new();
        let a = registry.next_handle();
        let b = registry.next_handle();
        assert_ne!(a, b);
    }
}
