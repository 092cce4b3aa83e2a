//! Shared shapes for door and item behavior.
//!
//! Doors and items answer a parsed [`Command`] through [`Interactable`]. They never mutate
//! the world themselves: a [`Response`] carries the text for the player plus an effect
//! which the session applies afterwards.

use crate::command::Command;
use crate::item::Item;
use crate::location::Location;

/// Text returned by a behavior that does not apply to the command.
pub const NOTHING_HAPPENS: &str = "nothing happens";

/// Everything a behavior may inspect while deciding how to respond.
#[derive(Debug, Clone, Copy)]
pub struct Interaction<'a> {
    pub location: &'a Location,
    pub command: &'a Command,
    pub inventory: &'a [Item],
}

impl Interaction<'_> {
    /// True if the acting player carries an item with exactly this name.
    pub fn carries(&self, name: &str) -> bool {
        self.inventory.iter().any(|item| item.name == name)
    }
}

/// Response text plus the state change it implies.
#[derive(Debug, Default)]
pub struct Response<E> {
    pub text: String,
    pub effect: E,
}

impl<E: Default> Response<E> {
    /// Text only, no state change.
    pub fn say(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            effect: E::default(),
        }
    }

    pub fn with_effect(text: impl Into<String>, effect: E) -> Self {
        Self {
            text: text.into(),
            effect,
        }
    }

    /// The "not applicable" response.
    pub fn nothing() -> Self {
        Self::say(NOTHING_HAPPENS)
    }

    /// False for empty text and the [`NOTHING_HAPPENS`] sentinel.
    pub fn is_actionable(&self) -> bool {
        !self.text.is_empty() && self.text != NOTHING_HAPPENS
    }
}

/// Capability shared by doors and items: respond to a command.
pub trait Interactable {
    type Effect: Default;

    fn on_command(&self, ctx: &Interaction<'_>) -> Response<Self::Effect>;
}
