//! Shared game state for the front ends: the quest store plus what it takes to start a
//! new quest.

use std::sync::Arc;

use log::debug;
use textquest_engine::{EngineConfig, Mailer, Player, Quest, QuestError, QuestStore, build_castle};

pub struct App {
    pub store: QuestStore,
    pub config: EngineConfig,
    mailer: Arc<dyn Mailer>,
}

impl App {
    pub fn new(mailer: Arc<dyn Mailer>, config: EngineConfig) -> Self {
        Self {
            store: QuestStore::new(),
            config,
            mailer,
        }
    }

    /// Spawn a quest in a fresh castle. The quest is not registered in the store.
    ///
    /// # Errors
    /// - if the worker thread cannot be spawned
    pub fn start_quest(&self, player_id: &str) -> Result<Quest, QuestError> {
        let world = build_castle(Arc::clone(&self.mailer), &self.config.mail);
        Quest::spawn(Player::new(player_id), world, self.config.session.idle_timeout())
    }

    /// Run one turn for `player_id`, starting a quest if they have none. A turn that ends
    /// the quest removes it from the store.
    ///
    /// Blocks until the quest replies; call from a blocking context.
    ///
    /// # Errors
    /// - if a quest cannot be started or its worker disappeared
    pub fn play_turn(&self, player_id: &str, line: &str) -> Result<String, QuestError> {
        let (quest, reply) = match self.submit(player_id, line) {
            // stopped between lookup and submit (swept or exited); the retry starts fresh
            Err(QuestError::Stopped) => {
                debug!("quest for '{player_id}' stopped mid-turn, starting a new one");
                self.submit(player_id, line)?
            },
            other => other?,
        };
        if quest.is_stopped() {
            self.store.remove_quest(&quest);
        }
        Ok(reply)
    }

    fn submit(&self, player_id: &str, line: &str) -> Result<(Arc<Quest>, String), QuestError> {
        let quest = self.store.get_or_start(player_id, || self.start_quest(player_id))?;
        let reply = quest.submit_command(line)?;
        Ok((quest, reply))
    }
}
