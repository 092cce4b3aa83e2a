#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const TEXTQUEST_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod command;
pub mod config;
pub mod door;
pub mod interaction;
pub mod item;
pub mod location;
pub mod mail;
pub mod player;
pub mod quest;
pub mod session;
pub mod store;
pub mod world;
pub mod worlds;

// Re-exports for convenience
pub use command::{Command, parse_command};
pub use config::{ConfigError, EngineConfig, MailConfig, SessionConfig};
pub use door::{Door, DoorId, DoorKind};
pub use item::{Item, ItemBehavior, ItemHolder};
pub use location::Location;
pub use mail::{DisabledMailer, Letter, Mailer};
pub use player::Player;
pub use quest::{Inbound, QuestControl, QuestState, QuestStatus, Turn};
pub use session::{Quest, QuestError};
pub use store::QuestStore;
pub use world::World;
pub use worlds::build_castle;
