//! Threaded quest sessions.
//!
//! Each [`Quest`] owns a worker thread running a [`QuestState`]. Callers hand it one message
//! at a time through a single-slot channel and block until the reply arrives, so turns for
//! one player are strictly sequential while different players never wait on each other.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::{Arc, Mutex, PoisonError, TryLockError};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info};
use thiserror::Error;
use uuid::Uuid;

use crate::player::Player;
use crate::quest::{Inbound, QuestControl, QuestState};
use crate::world::World;

#[derive(Debug, Error)]
pub enum QuestError {
    #[error("the quest has been stopped")]
    Stopped,
    #[error("the quest loop is no longer running")]
    Disconnected,
    #[error("unable to start the quest loop")]
    Spawn(#[from] std::io::Error),
}

struct Exchange {
    inbound: SyncSender<Inbound>,
    outbound: Receiver<String>,
}

/// Handle to one player's running quest.
pub struct Quest {
    id: Uuid,
    player_id: String,
    /// `None` once the quest is stopped. Holding the lock serializes turns.
    exchange: Mutex<Option<Exchange>>,
    stopped: Arc<AtomicBool>,
    last_active: Mutex<Instant>,
    idle_limit: Duration,
}

impl std::fmt::Debug for Quest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Quest")
            .field("id", &self.id)
            .field("player_id", &self.player_id)
            .field("stopped", &self.is_stopped())
            .finish_non_exhaustive()
    }
}

impl Quest {
    /// Start a worker thread for `player` exploring `world`.
    ///
    /// # Errors
    /// Returns [`QuestError::Spawn`] if the thread cannot be created.
    pub fn spawn(player: Player, world: World, idle_limit: Duration) -> Result<Self, QuestError> {
        let id = Uuid::new_v4();
        let player_id = player.id.clone();
        let (inbound, worker_inbound) = mpsc::sync_channel::<Inbound>(1);
        let (worker_outbound, outbound) = mpsc::sync_channel::<String>(1);
        let stopped = Arc::new(AtomicBool::new(false));
        let worker_stopped = Arc::clone(&stopped);
        let state = QuestState::new(player, world);

        thread::Builder::new()
            .name(format!("quest-{id}"))
            .spawn(move || run_quest(state, &worker_inbound, &worker_outbound, &worker_stopped))?;
        info!("started quest {id} for player '{player_id}'");

        Ok(Self {
            id,
            player_id,
            exchange: Mutex::new(Some(Exchange { inbound, outbound })),
            stopped,
            last_active: Mutex::new(Instant::now()),
            idle_limit,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    /// Ask for the current room prompt. On a fresh quest this is the opening prompt.
    ///
    /// # Errors
    /// See [`Quest::submit_command`].
    pub fn start(&self) -> Result<String, QuestError> {
        self.exchange(Inbound::Start)
    }

    /// Hand one line to the quest and wait for its reply.
    ///
    /// # Errors
    /// Returns [`QuestError::Stopped`] once the quest has ended, or
    /// [`QuestError::Disconnected`] if the worker vanished unexpectedly.
    pub fn submit_command(&self, line: &str) -> Result<String, QuestError> {
        self.exchange(Inbound::Line(line.to_string()))
    }

    fn exchange(&self, message: Inbound) -> Result<String, QuestError> {
        let mut slot = self.exchange.lock().unwrap_or_else(PoisonError::into_inner);
        if self.is_stopped() {
            *slot = None;
            return Err(QuestError::Stopped);
        }
        let Some(exchange) = slot.as_ref() else {
            return Err(QuestError::Stopped);
        };
        self.touch();

        let reply = exchange.inbound.send(message).ok().and_then(|()| exchange.outbound.recv().ok());
        match reply {
            Some(text) => {
                if self.is_stopped() {
                    *slot = None;
                    info!("quest {} for '{}' finished", self.id, self.player_id);
                }
                Ok(text)
            },
            None => {
                *slot = None;
                if self.stopped.swap(true, Ordering::SeqCst) {
                    Err(QuestError::Stopped)
                } else {
                    Err(QuestError::Disconnected)
                }
            },
        }
    }

    fn touch(&self) {
        *self.last_active.lock().unwrap_or_else(PoisonError::into_inner) = Instant::now();
    }

    pub fn idle_for(&self) -> Duration {
        self.last_active.lock().unwrap_or_else(PoisonError::into_inner).elapsed()
    }

    /// True once the quest has been idle for longer than its limit.
    pub fn is_expired(&self) -> bool {
        self.idle_for() > self.idle_limit
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Stop the worker. Safe to call more than once, and never waits on a turn in flight:
    /// that turn drops the channels itself once it sees the flag.
    pub fn stop(&self) {
        let was_running = !self.stopped.swap(true, Ordering::SeqCst);
        match self.exchange.try_lock() {
            Ok(mut slot) => {
                slot.take();
            },
            Err(TryLockError::Poisoned(poisoned)) => {
                poisoned.into_inner().take();
            },
            Err(TryLockError::WouldBlock) => debug!("quest {} busy; its turn will close it", self.id),
        }
        if was_running {
            info!("stopped quest {} for '{}'", self.id, self.player_id);
        }
    }
}

fn run_quest(
    mut state: QuestState,
    inbound: &Receiver<Inbound>,
    outbound: &SyncSender<String>,
    stopped: &AtomicBool,
) {
    while let Ok(message) = inbound.recv() {
        if stopped.load(Ordering::SeqCst) {
            break;
        }
        let turn = state.receive(message);
        let finished = turn.control == QuestControl::Stop;
        if finished {
            stopped.store(true, Ordering::SeqCst);
        }
        if outbound.send(turn.text).is_err() || finished {
            break;
        }
    }
    debug!("quest loop for '{}' exited", state.player.id);
}
