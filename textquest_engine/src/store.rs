//! Concurrent registry of running quests keyed by player id.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use log::info;

use crate::session::{Quest, QuestError};

#[derive(Debug)]
pub struct QuestStore {
    quests: DashMap<String, Arc<Quest>>,
    total_started: AtomicU64,
    started_at: Instant,
}

impl Default for QuestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestStore {
    pub fn new() -> Self {
        Self {
            quests: DashMap::new(),
            total_started: AtomicU64::new(0),
            started_at: Instant::now(),
        }
    }

    /// Register a quest, replacing (and stopping) any previous one for the same player.
    pub fn insert(&self, quest: Quest) -> Arc<Quest> {
        let quest = Arc::new(quest);
        self.total_started.fetch_add(1, Ordering::Relaxed);
        if let Some(previous) = self.quests.insert(quest.player_id().to_string(), Arc::clone(&quest)) {
            previous.stop();
        }
        quest
    }

    pub fn lookup(&self, player_id: &str) -> Option<Arc<Quest>> {
        self.quests.get(player_id).map(|entry| Arc::clone(entry.value()))
    }

    /// Return the player's live quest, starting one with `start` if there is none or the
    /// previous one has stopped.
    ///
    /// # Errors
    /// Propagates the error from `start`.
    pub fn get_or_start<F>(&self, player_id: &str, start: F) -> Result<Arc<Quest>, QuestError>
    where
        F: FnOnce() -> Result<Quest, QuestError>,
    {
        match self.quests.entry(player_id.to_string()) {
            Entry::Occupied(mut occupied) => {
                if !occupied.get().is_stopped() {
                    return Ok(Arc::clone(occupied.get()));
                }
                let quest = Arc::new(start()?);
                occupied.insert(Arc::clone(&quest));
                self.total_started.fetch_add(1, Ordering::Relaxed);
                Ok(quest)
            },
            Entry::Vacant(vacant) => {
                let quest = Arc::new(start()?);
                vacant.insert(Arc::clone(&quest));
                self.total_started.fetch_add(1, Ordering::Relaxed);
                Ok(quest)
            },
        }
    }

    /// Remove and stop the player's quest.
    pub fn remove(&self, player_id: &str) -> Option<Arc<Quest>> {
        let (_, quest) = self.quests.remove(player_id)?;
        quest.stop();
        Some(quest)
    }

    /// Remove `quest` only if it is still the one registered for its player, then stop it.
    /// A stale handle never evicts a newer quest.
    pub fn remove_quest(&self, quest: &Quest) -> bool {
        let removed = self
            .quests
            .remove_if(quest.player_id(), |_, stored| stored.id() == quest.id())
            .is_some();
        quest.stop();
        removed
    }

    /// Stop and drop every quest that is expired or already stopped. Returns the player ids
    /// that were removed.
    pub fn sweep_expired(&self) -> Vec<String> {
        let mut swept = Vec::new();
        self.quests.retain(|_, quest| {
            let keep = !(quest.is_stopped() || quest.is_expired());
            if !keep {
                swept.push(Arc::clone(quest));
            }
            keep
        });
        // stopped outside the shard locks
        let removed: Vec<String> = swept
            .iter()
            .map(|quest| {
                quest.stop();
                quest.player_id().to_string()
            })
            .collect();
        if !removed.is_empty() {
            info!("swept {} idle quest(s): {}", removed.len(), removed.join(", "));
        }
        removed
    }

    pub fn active_count(&self) -> usize {
        self.quests.len()
    }

    pub fn total_started(&self) -> u64 {
        self.total_started.load(Ordering::Relaxed)
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
