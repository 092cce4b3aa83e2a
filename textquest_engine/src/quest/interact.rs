//! Handlers that act on things in the current location: taking items, working doors and
//! letting items respond to arbitrary verbs.

use log::{debug, info};

use crate::command::Command;
use crate::interaction::{Interactable, Interaction};
use crate::item::ItemHolder;
use crate::location::Location;

use super::QuestState;

/// Move a takable item from the location into the player's inventory.
pub fn take_handler(quest: &mut QuestState, command: &Command) -> String {
    let described = command.described_object();
    if described.is_empty() {
        return "take what?".to_string();
    }
    let QuestState {
        world,
        player,
        location_id,
        ..
    } = quest;
    let Some(here) = world.location_mut(location_id) else {
        return format!("there is no {described} here");
    };
    let Some(index) = here.find_item(&described, &command.object) else {
        return format!("there is no {described} here");
    };
    if !here.items[index].takable {
        return format!("you cannot take the {}", here.items[index].name);
    }
    let Some(item) = here.remove_item(index) else {
        return format!("there is no {described} here");
    };
    info!("player '{}' took the {} from '{location_id}'", player.id, item.name);
    let reply = format!("you take the {}", item.name);
    player.add_item(item);
    reply
}

/// Let a door named by the command respond, then apply the resulting state change.
///
/// Returns `None` if no door in the location answers to the described object.
pub fn door_handler(quest: &mut QuestState, command: &Command) -> Option<String> {
    let described = command.described_object();
    let here = quest.world.location(&quest.location_id)?;
    let door_id = quest.world.resolve_door(here, &described)?;
    let door = quest.world.door(door_id)?;
    let response = door.on_command(&Interaction {
        location: here,
        command,
        inventory: &quest.player.inventory,
    });
    debug!("{} answered {:?} with {:?}", door.name, command.sentence, response.effect);
    if response.text.is_empty() {
        return None;
    }
    quest.world.door_mut(door_id)?.apply(response.effect);
    Some(response.text)
}

/// Offer the command to each item in the location, in order; the first actionable answer wins.
pub fn item_handler(quest: &mut QuestState, command: &Command) -> Option<String> {
    let QuestState {
        world,
        player,
        location_id,
        ..
    } = quest;
    let here = world.location_mut(location_id)?;
    let (index, response) = {
        let room: &Location = here;
        room.items.iter().enumerate().find_map(|(index, item)| {
            let response = item.on_command(&Interaction {
                location: room,
                command,
                inventory: &player.inventory,
            });
            response.is_actionable().then_some((index, response))
        })?
    };

    let mut effect = response.effect;
    let item = &mut here.items[index];
    info!("{} answered {:?} for player '{}'", item.name, command.sentence, player.id);
    item.apply(&mut effect);
    for spawned in effect.spawn {
        info!("{} appeared in '{}'", spawned.name, here.id);
        ItemHolder::add_item(here, spawned);
    }
    Some(response.text)
}
