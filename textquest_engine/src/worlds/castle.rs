//! The castle: the world every new player starts in.
//!
//! ```text
//! outworld                       castle
//!            [1,0 forest]                                    [2,0 blue room]
//! [1,1 clearing] [2,1 courtyard] [0,1 steps] [1,1 entry hall] [2,1 hallway] [3,2 white room]
//!                                                            [2,2 green room]
//! ```
//!
//! The stone table in the blue room mails the player a password, and saying it splits the
//! table and reveals the blue key that opens the red door.

use std::fmt;
use std::sync::Arc;

use lazy_static::lazy_static;
use log::{info, warn};
use regex::Regex;

use crate::config::MailConfig;
use crate::door::{Door, DoorKind};
use crate::interaction::{Interaction, Response};
use crate::item::{Item, ItemBehavior, ItemEffect, ItemScript};
use crate::mail::{Letter, Mailer};
use crate::world::World;

pub const CASTLE_NAME: &str = "castle";

/// Password carried in the stone table's mail headers.
pub const STONE_TABLE_PASSWORD: &str = "mellon";
pub const PASSWORD_HEADER: &str = "x-textquest-stone-table-password";

const SPLIT_FLAG: &str = "split";

lazy_static! {
    static ref EMAIL_ADDRESS: Regex =
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email address pattern should compile");
}

/// Build a fresh castle. Every player gets their own copy; nothing is shared between calls
/// except the mailer.
pub fn build_castle(mailer: Arc<dyn Mailer>, mail: &MailConfig) -> World {
    let mut world = World::new();

    let rusty_door = world.add_door(Door::new(
        "rusty door",
        false,
        true,
        "A rusty door, at least fifteen feet tall, hangs on hinges rusted in place. It stands ajar, \
         wide enough to slip in and out of the castle.",
        DoorKind::Fixed {
            verbs: vec!["push".into()],
            refusal: "push as you might, the door is firmly in place".into(),
        },
    ));
    let white_door = world.add_door(Door::new(
        "white door",
        true,
        false,
        "A white door sits flush with the wall around it, with no lock and no handle.",
        DoorKind::Sealed {
            message: "nothing you do to the white door has any effect.".into(),
        },
    ));
    let blue_door = world.add_door(Door::new(
        "blue door",
        false,
        false,
        "A large blue door with no visible lock sits closed. Maybe you can 'open the blue door'?",
        DoorKind::Swinging {
            open_description: "A large blue door lays open.".into(),
            closed_description: "The blue door is closed.".into(),
        },
    ));
    let green_door = world.add_door(Door::new(
        "green door",
        true,
        false,
        "A green door without hinges is firmly shut. A large white lock is set in its center.",
        DoorKind::Barred {
            open_description: "The green door lays open.".into(),
        },
    ));
    let red_locked = "A massive red door sits firmly closed. A blue lock is set in its center.";
    let red_door = world.add_door(Door::new(
        "red door",
        true,
        false,
        red_locked,
        DoorKind::Keyed {
            keys: vec!["blue key".into(), "master key".into()],
            lock_hint: "in its center sits a blue lock".into(),
            open_description: "A red door lays open.".into(),
            closed_description: "The red door is closed.".into(),
            locked_description: red_locked.into(),
        },
    ));

    world
        .new_location("outworld 1,1")
        .set_description(
            "You are standing in a clearing. A wooden sign reads: \"Welcome to Text Quest! Answer with \
             short commands to explore this world. Type 'help' if you get stuck.\" Perhaps you should \
             'go east'. If you lose your bearings, 'look around'.",
        )
        .add_destination("outworld 1,0", "north", "Northward a vast, dark forest rises.")
        .add_destination(
            "outworld 2,1",
            "east",
            "Eastward the tips of tall spires peek over the hills.",
        );

    world
        .new_location("outworld 1,0")
        .set_description("You are in a dark forest. Trees and undergrowth are far too thick to pass.")
        .add_destination("outworld 1,1", "south", "Southward you can make out a clearing.");

    world
        .new_location("outworld 2,1")
        .set_description(
            "A great castle looms before you. Forest too dense to enter lies to the north, and a deep \
             chasm to the south.",
        )
        .add_destination("outworld 1,1", "west", "The clearing lies to the west.")
        .add_destination(
            "castle 0,1",
            "steps|door|rusty door|east",
            "Broad steps climb to a towering door.",
        );

    world
        .new_location("castle 0,1")
        .set_description("You stand at the top of a long flight of steps, at the mouth of the castle.")
        .add_door("castle 1,1", "rusty door|east|door", rusty_door)
        .add_destination(
            "outworld 2,1",
            "steps|west",
            "The steps lead west, down and away from the castle.",
        );

    world
        .new_location("castle 1,1")
        .set_description(
            "You are in a grand entry hall. The ceiling is lost somewhere far overhead and the air \
             smells of damp rot. Three doors lead deeper into the castle.",
        )
        .add_door("castle 0,1", "rusty door|west", rusty_door)
        .add_door("castle 2,0", "blue door", blue_door)
        .add_door("castle 2,1", "red door", red_door)
        .add_door("castle 2,2", "green door", green_door);

    world
        .new_location("castle 2,0")
        .set_description("The room is wide, and a great stone table fills its center.")
        .add_door("castle 1,1", "door|blue door", blue_door)
        .add_item(Item::new(
            "stone table",
            false,
            "a large stone table. An inscription reads 'tell me first your email, then a secret'",
            "",
            ItemBehavior::Scripted(Box::new(StoneTable {
                mailer,
                mail: mail.clone(),
            })),
        ));

    world
        .new_location("castle 2,1")
        .set_description("You are in a narrow hallway.")
        .add_door("castle 1,1", "door|red door", red_door)
        .add_door("castle 3,2", "white door", white_door);

    world
        .new_location("castle 2,2")
        .set_description("You should not be here. There is no key for the green door...")
        .add_door("castle 1,1", "door|green door", green_door);

    world
        .new_location("castle 3,2")
        .set_description("You should not be here. Nothing opens the white door...")
        .add_door("castle 2,1", "door|white door", white_door);

    world.log_summary(CASTLE_NAME);
    world
}

fn blue_key() -> Item {
    Item::new(
        "blue key",
        true,
        "a blue key floats in midair",
        "an ordinary blue key, apart from having been found floating in the air.",
        ItemBehavior::Hint {
            verbs: vec!["use".into()],
            text: "Use it how? Try: unlock the <thing> with the blue key".into(),
        },
    )
}

/// Mails the password to the player, then splits open when it is spoken.
struct StoneTable {
    mailer: Arc<dyn Mailer>,
    mail: MailConfig,
}

impl fmt::Debug for StoneTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoneTable").field("mail", &self.mail).finish_non_exhaustive()
    }
}

impl StoneTable {
    fn letter(&self, address: &str) -> Letter {
        Letter {
            to: address.to_string(),
            subject: self.mail.subject.clone(),
            body: "You have spoken with the stone table, and your world now reaches beyond text \
                   messages into email.\nLook to the headers of this message, friend, and say the \
                   password you find there in the room of the stone table to claim your reward.\n"
                .to_string(),
            headers: vec![(PASSWORD_HEADER.to_string(), STONE_TABLE_PASSWORD.to_string())],
        }
    }

    fn send_password(&self, address: &str) -> Response<ItemEffect> {
        if !EMAIL_ADDRESS.is_match(address) {
            return Response::say("the table hums for a moment, then a whisper: 'that is no address I can reach...'");
        }
        if self.mailer.send(&self.letter(address)) {
            info!("stone table mailed the password to {address}");
            Response::say("the room rumbles for a moment and dust falls from the ceiling. A distant whisper: 'email sent...'")
        } else {
            warn!("stone table could not mail {address}");
            Response::say("the room begins to rumble, then goes still. A distant whisper: 'unable to send email...'")
        }
    }
}

impl ItemScript for StoneTable {
    fn on_command(&self, item: &Item, ctx: &Interaction<'_>) -> Response<ItemEffect> {
        let command = ctx.command;
        if let Some(address) = [&command.raw_action, &command.object].into_iter().find(|word| word.contains('@')) {
            return self.send_password(address);
        }

        if command.action == STONE_TABLE_PASSWORD {
            return Response::say(format!("you need a verb. Try 'say {STONE_TABLE_PASSWORD}'"));
        }
        if command.action == "say" && command.object == STONE_TABLE_PASSWORD {
            if item.has_flag(SPLIT_FLAG) {
                return Response::say("your voice echoes off the broken halves of the stone table.");
            }
            return Response::with_effect(
                "the room violently rumbles and begins to quake. The large stone table strains against the \
                 shifting ground and breaks in half. Floating in the air, you see a blue key.",
                ItemEffect {
                    room_description: Some("a large stone table lies split in half".into()),
                    set_flag: Some(SPLIT_FLAG.into()),
                    spawn: vec![blue_key()],
                },
            );
        }

        if !item.answers_to(&command.object) {
            return Response::nothing();
        }
        match command.action.as_str() {
            "move" | "push" => Response::say("you are unable to budge the large stone table"),
            _ => Response::nothing(),
        }
    }
}
