//! Doors: shared, stateful gates between locations.
//!
//! A door is stored once in the world's door arena and referenced by [`DoorId`] from every
//! location it connects, so opening it from one side is visible from the other.

use serde::{Deserialize, Serialize};

use crate::interaction::{Interactable, Interaction, Response};

/// Stable index of a door in the world's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoorId(pub(crate) usize);

/// How a door reacts to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DoorKind {
    /// Stuck in place. The listed verbs get the refusal text.
    Fixed { verbs: Vec<String>, refusal: String },
    /// Nothing the player does has any effect.
    Sealed { message: String },
    /// No lock; opens and closes freely.
    Swinging {
        open_description: String,
        closed_description: String,
    },
    /// Locked with no way to unlock it.
    Barred { open_description: String },
    /// Locked and unlocked with any of the named keys.
    Keyed {
        keys: Vec<String>,
        lock_hint: String,
        open_description: String,
        closed_description: String,
        locked_description: String,
    },
}

/// State change requested by a door behavior.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DoorEffect {
    pub open: Option<bool>,
    pub locked: Option<bool>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Door {
    pub name: String,
    /// Shown in the room prompt; changes along with the door's state.
    pub description: String,
    pub is_open: bool,
    pub is_locked: bool,
    pub kind: DoorKind,
}

const OPEN_VERBS: &[&str] = &["push", "open", "kick", "hit", "knock"];
const CLOSE_VERBS: &[&str] = &["close", "shut"];
const UNLOCK_VERBS: &[&str] = &["use", "unlock"];

impl Door {
    pub fn new(name: &str, is_locked: bool, is_open: bool, description: &str, kind: DoorKind) -> Self {
        Self {
            name: name.to_lowercase(),
            description: description.to_string(),
            is_open,
            is_locked,
            kind,
        }
    }

    /// Apply a state change produced by [`Interactable::on_command`].
    pub fn apply(&mut self, effect: DoorEffect) {
        if let Some(open) = effect.open {
            self.is_open = open;
        }
        if let Some(locked) = effect.locked {
            self.is_locked = locked;
        }
        if let Some(description) = effect.description {
            self.description = description;
        }
    }

    fn swing(&self, ctx: &Interaction<'_>, open_description: &str, closed_description: &str) -> Response<DoorEffect> {
        let name = &self.name;
        if ctx.command.is_any(OPEN_VERBS) {
            if self.is_open {
                return Response::say(format!("the {name} is already open"));
            }
            return Response::with_effect(
                format!("the {name} easily opens"),
                DoorEffect {
                    open: Some(true),
                    description: Some(open_description.to_string()),
                    ..DoorEffect::default()
                },
            );
        }
        if ctx.command.is_any(CLOSE_VERBS) {
            return Response::with_effect(
                format!("the {name} is closed."),
                DoorEffect {
                    open: Some(false),
                    description: Some(closed_description.to_string()),
                    ..DoorEffect::default()
                },
            );
        }
        Response::nothing()
    }

    fn barred(&self, ctx: &Interaction<'_>, open_description: &str) -> Response<DoorEffect> {
        let name = &self.name;
        match ctx.command.action.as_str() {
            "push" | "open" => {
                if self.is_locked && !self.is_open {
                    return Response::say(format!("the {name} does not move."));
                }
                Response::with_effect(
                    format!("the {name} is now open"),
                    DoorEffect {
                        open: Some(true),
                        description: Some(open_description.to_string()),
                        ..DoorEffect::default()
                    },
                )
            },
            "use" | "unlock" => Response::say(format!("You see no way to unlock the {name}.")),
            _ => Response::nothing(),
        }
    }

    fn keyed(
        &self,
        ctx: &Interaction<'_>,
        keys: &[String],
        lock_hint: &str,
        descriptions: [&str; 3],
    ) -> Response<DoorEffect> {
        let [open_description, closed_description, locked_description] = descriptions;
        let name = &self.name;
        let tool = ctx.command.described_tool();
        let at_rest = |locked: bool| {
            if locked {
                locked_description.to_string()
            } else {
                closed_description.to_string()
            }
        };

        let action = ctx.command.action.as_str();
        match action {
            "push" | "open" => {
                if self.is_locked && !self.is_open {
                    return Response::say(format!("the {name} does not move, {lock_hint}"));
                }
                Response::with_effect(
                    format!("the {name} is now open"),
                    DoorEffect {
                        open: Some(true),
                        description: Some(open_description.to_string()),
                        ..DoorEffect::default()
                    },
                )
            },
            "close" | "shut" => Response::with_effect(
                format!("the {name} is no longer open"),
                DoorEffect {
                    open: Some(false),
                    description: Some(at_rest(self.is_locked)),
                    ..DoorEffect::default()
                },
            ),
            "use" | "unlock" | "lock" => {
                if tool.is_empty() {
                    return Response::say(format!("please be more specific. {} the {name} with what?", capitalize(action)));
                }
                if !keys.contains(&tool) {
                    return Response::say(format!("the {tool} does nothing, and the {name} remains unchanged"));
                }
                if !ctx.carries(&tool) {
                    return Response::say(format!("you do not have the {tool}"));
                }
                // "lock" always locks; "unlock" and "use" flip the bolt
                let locked = action == "lock" || !self.is_locked;
                let text = if locked {
                    format!("you turn the {tool} and hear a large thunk as the lock slides into place.")
                } else {
                    format!("you turn the {tool} and hear a large thunk as the lock slides open.")
                };
                let description = (!self.is_open).then(|| at_rest(locked));
                Response::with_effect(
                    text,
                    DoorEffect {
                        locked: Some(locked),
                        description,
                        ..DoorEffect::default()
                    },
                )
            },
            _ => Response::nothing(),
        }
    }
}

impl Interactable for Door {
    type Effect = DoorEffect;

    fn on_command(&self, ctx: &Interaction<'_>) -> Response<DoorEffect> {
        match &self.kind {
            DoorKind::Fixed { verbs, refusal } => {
                if verbs.iter().any(|verb| *verb == ctx.command.action) {
                    Response::say(refusal.clone())
                } else {
                    Response::nothing()
                }
            },
            DoorKind::Sealed { message } => Response::say(message.clone()),
            DoorKind::Swinging {
                open_description,
                closed_description,
            } => self.swing(ctx, open_description, closed_description),
            DoorKind::Barred { open_description } => self.barred(ctx, open_description),
            DoorKind::Keyed {
                keys,
                lock_hint,
                open_description,
                closed_description,
                locked_description,
            } => self.keyed(
                ctx,
                keys,
                lock_hint,
                [
                    open_description.as_str(),
                    closed_description.as_str(),
                    locked_description.as_str(),
                ],
            ),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
