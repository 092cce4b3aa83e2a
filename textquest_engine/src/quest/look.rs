//! Look and inventory handlers.

use crate::command::Command;
use crate::item::ItemHolder;

use super::QuestState;

/// Describe the player's current location.
pub fn look_handler(quest: &QuestState) -> String {
    quest
        .world
        .location(&quest.location_id)
        .map(|here| quest.world.room_prompt(here))
        .unwrap_or_default()
}

/// Describe what the player carries.
pub fn inv_handler(quest: &QuestState) -> String {
    quest.player.describe_inventory()
}

/// Look at a named item in the current location.
///
/// Carried items are not considered here; "look inventory" covers those.
pub fn look_at_handler(quest: &QuestState, command: &Command) -> String {
    let described = command.described_object();
    let Some(here) = quest.world.location(&quest.location_id) else {
        return format!("there is no {described}");
    };
    match here.find_item(&described, &command.object) {
        Some(index) => {
            let item = &here.items[index];
            if item.room_description.is_empty() {
                format!("you see the {}", item.name)
            } else {
                item.room_description.clone()
            }
        },
        None => format!("there is no {described}"),
    }
}
