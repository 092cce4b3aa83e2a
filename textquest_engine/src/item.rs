//! Item types and related helpers.
//!
//! Items rest either in a [`Location`](crate::location::Location) or in a player's
//! inventory. Ownership moves by value, so an item is always in exactly one place.

use std::collections::HashSet;
use std::fmt;

use crate::interaction::{Interactable, Interaction, Response};

/// Anything that owns an ordered collection of items.
pub trait ItemHolder {
    fn items(&self) -> &[Item];
    fn add_item(&mut self, item: Item);
    /// Removes and returns the item at `index`, keeping the order of the rest.
    fn remove_item(&mut self, index: usize) -> Option<Item>;

    /// Index of the first item the player could mean by `described` (e.g. "stone table")
    /// or by its bare noun `object` (e.g. "table").
    fn find_item(&self, described: &str, object: &str) -> Option<usize> {
        let items = self.items();
        items
            .iter()
            .position(|item| item.name == described)
            .or_else(|| items.iter().position(|item| item.answers_to(object)))
    }

    fn contains_item(&self, name: &str) -> bool {
        self.items().iter().any(|item| item.name == name)
    }
}

/// State change requested by an item behavior.
#[derive(Debug, Default)]
pub struct ItemEffect {
    /// New room description for the responding item.
    pub room_description: Option<String>,
    /// Flag to record on the responding item.
    pub set_flag: Option<String>,
    /// Items to place in the current location.
    pub spawn: Vec<Item>,
}

/// Custom behavior for one-off items.
pub trait ItemScript: fmt::Debug + Send {
    fn on_command(&self, item: &Item, ctx: &Interaction<'_>) -> Response<ItemEffect>;
}

#[derive(Debug)]
pub enum ItemBehavior {
    /// Never reacts.
    Inert,
    /// Answers the listed verbs with a fixed hint when the command names this item.
    Hint { verbs: Vec<String>, text: String },
    Scripted(Box<dyn ItemScript>),
}

#[derive(Debug)]
pub struct Item {
    pub name: String,
    pub takable: bool,
    pub in_inventory: bool,
    /// Line shown in the room prompt. Items with an empty room description are not listed.
    pub room_description: String,
    pub inventory_description: String,
    pub flags: HashSet<String>,
    pub behavior: ItemBehavior,
}

impl Item {
    pub fn new(
        name: &str,
        takable: bool,
        room_description: &str,
        inventory_description: &str,
        behavior: ItemBehavior,
    ) -> Self {
        Self {
            name: name.to_lowercase(),
            takable,
            in_inventory: false,
            room_description: room_description.to_string(),
            inventory_description: inventory_description.to_string(),
            flags: HashSet::new(),
            behavior,
        }
    }

    /// True if `noun` is this item's full name or its last word.
    pub fn answers_to(&self, noun: &str) -> bool {
        !noun.is_empty() && (self.name == noun || self.name.rsplit(' ').next() == Some(noun))
    }

    pub fn is_listed(&self) -> bool {
        !self.room_description.is_empty()
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Apply the parts of an effect that concern this item. Spawned items are left in
    /// the effect for the caller to place.
    pub fn apply(&mut self, effect: &mut ItemEffect) {
        if let Some(description) = effect.room_description.take() {
            self.room_description = description;
        }
        if let Some(flag) = effect.set_flag.take() {
            self.flags.insert(flag);
        }
    }
}

impl Interactable for Item {
    type Effect = ItemEffect;

    fn on_command(&self, ctx: &Interaction<'_>) -> Response<ItemEffect> {
        match &self.behavior {
            ItemBehavior::Inert => Response::nothing(),
            ItemBehavior::Hint { verbs, text } => {
                let named = ctx.command.object.is_empty()
                    || self.name == ctx.command.described_object()
                    || self.answers_to(&ctx.command.object);
                if named && verbs.iter().any(|verb| *verb == ctx.command.action) {
                    Response::say(text.clone())
                } else {
                    Response::nothing()
                }
            },
            ItemBehavior::Scripted(script) => script.on_command(self, ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::parse_command;
    use crate::location::Location;

    struct Shelf(Vec<Item>);

    impl ItemHolder for Shelf {
        fn items(&self) -> &[Item] {
            &self.0
        }
        fn add_item(&mut self, item: Item) {
            self.0.push(item);
        }
        fn remove_item(&mut self, index: usize) -> Option<Item> {
            (index < self.0.len()).then(|| self.0.remove(index))
        }
    }

    fn hinted_key() -> Item {
        Item::new(
            "Blue Key",
            true,
            "a blue key floats in midair",
            "an ordinary blue key",
            ItemBehavior::Hint {
                verbs: vec!["use".into()],
                text: "Use it how?".into(),
            },
        )
    }

    #[test]
    fn names_are_lowercased_and_matched_by_noun() {
        let key = hinted_key();
        assert_eq!(key.name, "blue key");
        assert!(key.answers_to("key"));
        assert!(key.answers_to("blue key"));
        assert!(!key.answers_to("blue"));
        assert!(!key.answers_to(""));
    }

    #[test]
    fn find_item_prefers_full_name() {
        let shelf = Shelf(vec![
            Item::new("red key", true, "a red key", "", ItemBehavior::Inert),
            Item::new("blue key", true, "a blue key", "", ItemBehavior::Inert),
        ]);
        assert_eq!(shelf.find_item("blue key", "key"), Some(1));
        assert_eq!(shelf.find_item("key", "key"), Some(0));
        assert_eq!(shelf.find_item("green key", "lamp"), None);
        assert!(shelf.contains_item("red key"));
    }

    #[test]
    fn hint_answers_only_its_verbs() {
        let key = hinted_key();
        let location = Location::new("room");
        let respond = |line: &str| {
            let command = parse_command(line);
            key.on_command(&Interaction {
                location: &location,
                command: &command,
                inventory: &[],
            })
            .text
        };
        assert_eq!(respond("use the blue key"), "Use it how?");
        assert_eq!(respond("use key"), "Use it how?");
        assert_eq!(respond("use the lamp"), crate::interaction::NOTHING_HAPPENS);
        assert_eq!(respond("eat the key"), crate::interaction::NOTHING_HAPPENS);
    }

    #[test]
    fn apply_updates_description_and_flags() {
        let mut table = Item::new("stone table", false, "a table", "", ItemBehavior::Inert);
        let mut effect = ItemEffect {
            room_description: Some("a split table".into()),
            set_flag: Some("split".into()),
            spawn: vec![hinted_key()],
        };
        table.apply(&mut effect);
        assert_eq!(table.room_description, "a split table");
        assert!(table.has_flag("split"));
        assert_eq!(effect.spawn.len(), 1);
    }
}
