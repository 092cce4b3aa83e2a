//! Help and exit handlers.

use log::info;

use super::{QuestState, QuestStatus, Turn};

pub const FAREWELL: &str = "you have exited text quest";

pub const UNRECOGNIZED: &str =
    "** you can't do that. You must be more specific. Type 'help' to get an idea of how to interact. **";

pub const LOST: &str = "you feel a strange sensation, you are suddenly not where you were";

const HELP_TEXT: &str = "Text Quest is played by typing short commands. Try things like 'look', \
'inventory', 'go north', 'take the lamp' or 'open the yellow chest with the green key'. The longest \
commands look like 'verb adjective noun with adjective noun'. Type 'exit' to leave.";

pub fn help_handler() -> String {
    HELP_TEXT.to_string()
}

/// End the quest. Any later message gets the farewell again.
pub fn quit_handler(quest: &mut QuestState) -> Turn {
    info!("player '{}' exited in '{}'", quest.player.id, quest.location_id);
    quest.status = QuestStatus::Stopped;
    Turn::finish(FAREWELL)
}
