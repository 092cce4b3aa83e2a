//! Movement between locations.

use log::{info, warn};

use crate::command::Command;

use super::QuestState;

/// Move the player through a destination or door.
///
/// A door named by the full described phrase is used first. Otherwise the raw object noun is
/// tried, then the full phrase ("red door"). The door the player named, or failing that the
/// door behind the matched name, must be open before the player may pass.
pub fn move_to_handler(quest: &mut QuestState, command: &Command) -> String {
    let described = command.described_object();
    if described.is_empty() {
        return "go where? Try 'look' to see the ways out.".to_string();
    }
    let Some(here) = quest.world.location(&quest.location_id) else {
        return quest.recover_misroute();
    };

    // a door named by the full phrase wins over a shorter key ("white door" vs "door")
    let named_door = quest.world.resolve_door(here, &described);
    let route = named_door
        .and_then(|id| here.door_links().find(|(_, link)| link.door == id))
        .map(|(key, link)| (key, link.target))
        .or_else(|| {
            here.resolve_destination(&command.object)
                .map(|target| (command.object.as_str(), target))
        })
        .or_else(|| here.resolve_destination(&described).map(|target| (described.as_str(), target)));
    let Some((name, target)) = route else {
        return format!("'{described}' does not seem to be here. Try 'look' to see the ways out.");
    };

    let gate = named_door.or_else(|| quest.world.resolve_door(here, name));
    if let Some(door) = gate.and_then(|id| quest.world.door(id)) {
        if !door.is_open {
            info!("player '{}' blocked by the {}", quest.player.id, door.name);
            return if door.is_locked {
                format!("The {} is locked.", door.name)
            } else {
                format!("The {} is not open. Maybe try to open it?", door.name)
            };
        }
    }

    let target = target.to_string();
    match quest.world.location(&target) {
        Some(next) => {
            let prompt = quest.world.room_prompt(next);
            info!("player '{}' moved from '{}' to '{target}'", quest.player.id, quest.location_id);
            quest.location_id = target;
            prompt
        },
        None => {
            warn!("'{name}' in '{}' leads to unknown location '{target}'", quest.location_id);
            quest.recover_misroute()
        },
    }
}
