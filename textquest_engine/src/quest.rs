//! The per-player quest state machine.
//!
//! A quest binds one [`Player`] to one [`World`] and a cursor naming the player's current
//! location. Each inbound line is parsed and dispatched in a fixed order; the first handler
//! that produces an answer wins. The threaded wrapper that feeds this machine one line at a
//! time lives in [`crate::session`].

pub mod interact;
pub mod look;
pub mod movement;
pub mod system;

pub use interact::*;
pub use look::*;
pub use movement::*;
pub use system::*;

use log::{debug, warn};
use variantly::Variantly;

use crate::command::{Command, parse_command};
use crate::player::Player;
use crate::world::World;

/// Lifecycle of a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Variantly)]
pub enum QuestStatus {
    /// Created; the first inbound message only produces the opening prompt.
    AwaitingFirstInput,
    Active,
    Stopped,
}

/// Message handed to a quest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// Ask for the current room prompt without issuing a command.
    Start,
    Line(String),
}

/// Control flow signal: keep going, or the quest is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestControl {
    Continue,
    Stop,
}

/// Result of one exchange with the quest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub text: String,
    pub control: QuestControl,
}

impl Turn {
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            control: QuestControl::Continue,
        }
    }

    pub fn finish(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            control: QuestControl::Stop,
        }
    }
}

#[derive(Debug)]
pub struct QuestState {
    pub player: Player,
    pub world: World,
    /// Id of the location the player occupies.
    pub location_id: String,
    pub status: QuestStatus,
}

impl QuestState {
    pub fn new(player: Player, world: World) -> Self {
        let location_id = world.starting_location().to_string();
        Self {
            player,
            world,
            location_id,
            status: QuestStatus::AwaitingFirstInput,
        }
    }

    /// Advance the machine by one inbound message.
    ///
    /// While awaiting first input, any message (line or start) is a handshake: it is not
    /// parsed and the reply is the opening room prompt.
    pub fn receive(&mut self, inbound: Inbound) -> Turn {
        let status = self.status;
        match (status, inbound) {
            (QuestStatus::Stopped, _) => Turn::finish(FAREWELL),
            (QuestStatus::AwaitingFirstInput, inbound) => {
                if let Inbound::Line(line) = &inbound {
                    debug!("handshake line from '{}' ignored: {line:?}", self.player.id);
                }
                self.status = QuestStatus::Active;
                Turn::reply(look_handler(self))
            },
            (QuestStatus::Active, Inbound::Start) => Turn::reply(look_handler(self)),
            (QuestStatus::Active, Inbound::Line(line)) => self.handle_line(&line),
        }
    }

    /// Parse and dispatch one line of player input.
    pub fn handle_line(&mut self, line: &str) -> Turn {
        debug!("received input from '{}': {line:?}", self.player.id);
        let command = parse_command(line);
        debug!("{command:?}");
        self.dispatch(&command)
    }

    /// Resolve a parsed command against the current location.
    pub fn dispatch(&mut self, command: &Command) -> Turn {
        if self.status.is_stopped() {
            return Turn::finish(FAREWELL);
        }
        if self.world.location(&self.location_id).is_none() {
            return Turn::reply(self.recover_misroute());
        }

        let text = match command.action.as_str() {
            "look" if command.object.is_empty() || command.object == "around" => look_handler(self),
            "look" if command.object == "inventory" => inv_handler(self),
            "inventory" => inv_handler(self),
            "look" => look_at_handler(self, command),
            "exit" => return quit_handler(self),
            "help" => help_handler(),
            "take" => take_handler(self, command),
            "go" => move_to_handler(self, command),
            _ => door_handler(self, command)
                .or_else(|| item_handler(self, command))
                .unwrap_or_else(|| {
                    warn!(
                        "no handler for '{}' from '{}' in '{}'",
                        command.sentence, self.player.id, self.location_id
                    );
                    UNRECOGNIZED.to_string()
                }),
        };
        Turn::reply(text)
    }

    /// Put a player whose cursor names an unknown location back at the start.
    pub fn recover_misroute(&mut self) -> String {
        let start = self.world.starting_location().to_string();
        warn!(
            "player '{}' was in unknown location '{}'; moving to '{start}'",
            self.player.id, self.location_id
        );
        self.location_id = start;
        let prompt = self
            .world
            .location(&self.location_id)
            .map(|location| self.world.room_prompt(location))
            .unwrap_or_default();
        format!("{LOST}\n{prompt}")
    }
}
