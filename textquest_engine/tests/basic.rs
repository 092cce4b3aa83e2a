use std::sync::Arc;
use std::thread;
use std::time::Duration;

use te::mail::MemoryMailer;
use te::quest::{FAREWELL, LOST, UNRECOGNIZED};
use te::worlds::castle::{PASSWORD_HEADER, STONE_TABLE_PASSWORD};
use te::*;
use textquest_engine as te;

fn castle_quest(mailer: &Arc<MemoryMailer>) -> QuestState {
    let world = build_castle(Arc::clone(mailer) as Arc<dyn Mailer>, &MailConfig::default());
    let mut quest = QuestState::new(Player::new("+15551234"), world);
    quest.receive(Inbound::Start);
    quest
}

fn say(quest: &mut QuestState, line: &str) -> String {
    quest.handle_line(line).text
}

#[test]
fn test_lib_version() {
    assert!(!te::TEXTQUEST_VERSION.is_empty());
}

#[test]
fn test_opening_prompt_lists_ways_out() {
    let mut quest = castle_quest(&Arc::new(MemoryMailer::new(true)));
    let text = say(&mut quest, "look around");
    assert!(text.starts_with("You are standing in a clearing."));
    assert!(text.contains("Northward"));
    assert!(text.contains("Eastward"));
    assert!(text.ends_with('\n'));
}

#[test]
fn test_walk_to_the_entry_hall() {
    let mut quest = castle_quest(&Arc::new(MemoryMailer::new(true)));
    assert!(say(&mut quest, "go east").starts_with("A great castle looms"));
    assert_eq!(quest.location_id, "outworld 2,1");
    assert!(say(&mut quest, "climb the steps").starts_with("You stand at the top"));
    let hall = say(&mut quest, "go through the rusty door");
    assert!(hall.starts_with("You are in a grand entry hall."));
    assert_eq!(quest.location_id, "castle 1,1");
}

#[test]
fn test_fixed_door_refuses_push() {
    let mut quest = castle_quest(&Arc::new(MemoryMailer::new(true)));
    say(&mut quest, "go east");
    say(&mut quest, "go east");
    assert_eq!(
        say(&mut quest, "push the rusty door"),
        "push as you might, the door is firmly in place"
    );
}

#[test]
fn test_locked_and_closed_doors_block_movement() {
    let mut quest = castle_quest(&Arc::new(MemoryMailer::new(true)));
    quest.location_id = "castle 1,1".into();
    assert_eq!(say(&mut quest, "go red door"), "The red door is locked.");
    assert!(say(&mut quest, "go blue door").contains("not open"));
    assert_eq!(quest.location_id, "castle 1,1");

    assert_eq!(say(&mut quest, "open the blue door"), "the blue door easily opens");
    assert!(say(&mut quest, "look").contains("A large blue door lays open."));
    let room = say(&mut quest, "go blue door");
    assert!(room.starts_with("The room is wide"));
    assert!(room.contains("stone table"));
}

#[test]
fn test_hallway_white_door_is_not_the_red_door() {
    let mut quest = castle_quest(&Arc::new(MemoryMailer::new(true)));
    quest.location_id = "castle 2,1".into();
    assert_eq!(say(&mut quest, "go white door"), "The white door is locked.");
    assert_eq!(quest.location_id, "castle 2,1");

    let red = quest
        .world
        .location("castle 2,1")
        .and_then(|hallway| quest.world.resolve_door(hallway, "red door"))
        .unwrap();
    let door = quest.world.door_mut(red).unwrap();
    door.is_locked = false;
    door.is_open = true;

    assert_eq!(say(&mut quest, "go white door"), "The white door is locked.");
    assert_eq!(quest.location_id, "castle 2,1");
    assert!(say(&mut quest, "go red door").starts_with("You are in a grand entry hall."));
    assert_eq!(quest.location_id, "castle 1,1");
}

#[test]
fn test_unlock_without_key() {
    let mut quest = castle_quest(&Arc::new(MemoryMailer::new(true)));
    quest.location_id = "castle 1,1".into();
    assert_eq!(
        say(&mut quest, "unlock the red door with the blue key"),
        "you do not have the blue key"
    );
    assert_eq!(say(&mut quest, "go red door"), "The red door is locked.");
    assert_eq!(
        say(&mut quest, "unlock the green door with the blue key"),
        "You see no way to unlock the green door."
    );
}

#[test]
fn test_stone_table_walkthrough() {
    let mailer = Arc::new(MemoryMailer::new(true));
    let mut quest = castle_quest(&mailer);
    quest.location_id = "castle 1,1".into();
    say(&mut quest, "open the blue door");
    say(&mut quest, "go blue door");

    assert!(say(&mut quest, "player@example.com").contains("email sent"));
    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "player@example.com");
    assert!(
        sent[0]
            .headers
            .contains(&(PASSWORD_HEADER.to_string(), STONE_TABLE_PASSWORD.to_string()))
    );

    assert!(say(&mut quest, "mellon").starts_with("you need a verb"));
    assert!(say(&mut quest, "say mellon").contains("blue key"));
    let room = say(&mut quest, "look");
    assert!(room.contains("split in half"));
    assert!(room.contains("a blue key floats in midair"));

    // splitting happens once
    assert!(!say(&mut quest, "say mellon").contains("Floating"));
    let keys = quest
        .world
        .location("castle 2,0")
        .expect("blue room")
        .items
        .iter()
        .filter(|item| item.name == "blue key")
        .count();
    assert_eq!(keys, 1);

    assert!(say(&mut quest, "use the key").starts_with("Use it how?"));
    assert_eq!(say(&mut quest, "take the blue key"), "you take the blue key");
    assert!(!say(&mut quest, "look").contains("floats"));
    assert!(say(&mut quest, "inventory").contains(" - blue key: "));

    say(&mut quest, "go door");
    assert_eq!(quest.location_id, "castle 1,1");
    assert!(say(&mut quest, "unlock the red door with the blue key").contains("slides open"));
    assert!(say(&mut quest, "go red door").contains("not open"));
    assert_eq!(say(&mut quest, "open the red door"), "the red door is now open");
    assert!(say(&mut quest, "go red door").starts_with("You are in a narrow hallway."));
}

#[test]
fn test_failed_mail_is_reported() {
    let mailer = Arc::new(MemoryMailer::new(false));
    let mut quest = castle_quest(&mailer);
    quest.location_id = "castle 2,0".into();
    assert!(say(&mut quest, "player@example.com").contains("unable to send email"));
    assert!(say(&mut quest, "send to nobody@nowhere").contains("no address"));
    // only the well-formed address reached the mailer
    assert_eq!(mailer.sent().len(), 1);
}

#[test]
fn test_take_errors() {
    let mut quest = castle_quest(&Arc::new(MemoryMailer::new(true)));
    quest.location_id = "castle 2,0".into();
    assert_eq!(say(&mut quest, "take the stone table"), "you cannot take the stone table");
    assert_eq!(say(&mut quest, "grab the lamp"), "there is no lamp here");
    assert_eq!(say(&mut quest, "look at the lamp"), "there is no lamp");
    assert!(say(&mut quest, "examine the table").starts_with("a large stone table"));
}

#[test]
fn test_unknown_commands_and_help() {
    let mut quest = castle_quest(&Arc::new(MemoryMailer::new(true)));
    assert_eq!(say(&mut quest, "juggle"), UNRECOGNIZED);
    assert!(say(&mut quest, "manual").contains("'go north'"));
    assert!(say(&mut quest, "go west").contains("does not seem to be here"));
    assert!(say(&mut quest, "go").starts_with("go where?"));
    assert_eq!(quest.location_id, "outworld 1,1");
}

#[test]
fn test_misroute_recovers_to_start() {
    let mut quest = castle_quest(&Arc::new(MemoryMailer::new(true)));
    quest.location_id = "outworld 9,9".into();
    let text = say(&mut quest, "go north");
    assert!(text.starts_with(LOST));
    assert_eq!(quest.location_id, "outworld 1,1");
}

#[test]
fn test_threaded_quest_handshake_and_exit() {
    let world = build_castle(Arc::new(DisabledMailer), &MailConfig::default());
    let quest = Quest::spawn(Player::new("web-1"), world, Duration::from_secs(60)).expect("spawn");
    let opening = quest.submit_command("hello?").expect("handshake");
    assert!(opening.starts_with("You are standing in a clearing."));
    assert!(quest.submit_command("go east").expect("move").starts_with("A great castle"));
    assert_eq!(quest.submit_command("bye").expect("farewell"), FAREWELL);
    assert!(matches!(quest.submit_command("look"), Err(QuestError::Stopped)));
}

#[test]
fn test_players_do_not_share_worlds() {
    let store = QuestStore::new();
    let start = |id: &str| {
        let world = build_castle(Arc::new(DisabledMailer), &MailConfig::default());
        Quest::spawn(Player::new(id), world, Duration::from_secs(60))
    };
    let alice = store.get_or_start("alice", || start("alice")).expect("alice");
    let bob = store.get_or_start("bob", || start("bob")).expect("bob");

    let walker = thread::spawn(move || {
        alice.start().expect("start");
        alice.submit_command("go east").expect("move")
    });
    bob.start().expect("start");
    let bob_view = bob.submit_command("look").expect("look");
    let alice_view = walker.join().expect("walker thread");

    assert!(alice_view.starts_with("A great castle"));
    assert!(bob_view.starts_with("You are standing in a clearing."));
    assert_eq!(store.active_count(), 2);
}

#[test]
fn test_sweep_after_idle_limit() {
    let store = QuestStore::new();
    let world = build_castle(Arc::new(DisabledMailer), &MailConfig::default());
    let quest = store.insert(Quest::spawn(Player::new("sleepy"), world, Duration::from_millis(10)).expect("spawn"));
    quest.start().expect("start");
    thread::sleep(Duration::from_millis(50));
    assert_eq!(store.sweep_expired(), vec!["sleepy".to_string()]);
    assert!(quest.is_stopped());
    assert!(matches!(quest.submit_command("look"), Err(QuestError::Stopped)));
}
