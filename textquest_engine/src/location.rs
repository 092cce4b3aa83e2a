//! Locations ("cells") and their outgoing paths.
//!
//! A location owns its destinations, links to shared doors, and the items resting in it.
//! Path names may carry pipe-delimited aliases (`"door|large door|entrance"`): every alias
//! resolves to the same target, but only the first is listed in the room prompt.

use serde::{Deserialize, Serialize};

use crate::door::DoorId;
use crate::item::{Item, ItemHolder};

/// A named one-way path to another location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub target: String,
    pub description: String,
    /// Alias entries are hidden so one path is listed once.
    pub hidden: bool,
}

/// A named path through a shared door.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorLink<'a> {
    pub door: DoorId,
    pub target: &'a str,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DoorEntry {
    door: DoorId,
    target: String,
    hidden: bool,
}

#[derive(Debug)]
pub struct Location {
    pub id: String,
    pub description: String,
    destinations: Vec<(String, Destination)>,
    doors: Vec<(String, DoorEntry)>,
    pub items: Vec<Item>,
}

impl ItemHolder for Location {
    fn items(&self) -> &[Item] {
        &self.items
    }

    fn add_item(&mut self, mut item: Item) {
        item.in_inventory = false;
        self.items.push(item);
    }

    fn remove_item(&mut self, index: usize) -> Option<Item> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }
}

/// Splits a pipe-delimited alias list into normalized, non-empty names.
pub fn alias_names(names: &str) -> impl Iterator<Item = String> + '_ {
    names
        .split('|')
        .map(|name| name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
}

/// Insert or replace `key` while keeping registration order.
fn upsert<V>(entries: &mut Vec<(String, V)>, key: String, value: V) {
    match entries.iter_mut().find(|(existing, _)| *existing == key) {
        Some(entry) => entry.1 = value,
        None => entries.push((key, value)),
    }
}

impl Location {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            description: String::new(),
            destinations: Vec::new(),
            doors: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn set_description(&mut self, text: &str) -> &mut Self {
        self.description = text.to_string();
        self
    }

    /// Adds a path (with optional `|` aliases) leading to `target`.
    pub fn add_destination(&mut self, target: &str, names: &str, local_description: &str) -> &mut Self {
        for (i, name) in alias_names(names).enumerate() {
            let destination = Destination {
                target: target.to_string(),
                description: local_description.to_string(),
                hidden: i > 0,
            };
            upsert(&mut self.destinations, name, destination);
        }
        self
    }

    /// Adds a path through `door` (with optional `|` aliases) leading to `target`.
    pub fn add_door(&mut self, target: &str, names: &str, door: DoorId) -> &mut Self {
        for (i, name) in alias_names(names).enumerate() {
            let entry = DoorEntry {
                door,
                target: target.to_string(),
                hidden: i > 0,
            };
            upsert(&mut self.doors, name, entry);
        }
        self
    }

    pub fn add_item(&mut self, item: Item) -> &mut Self {
        ItemHolder::add_item(self, item);
        self
    }

    /// Target of the path called `name`: destinations first, then doors.
    pub fn resolve_destination(&self, name: &str) -> Option<&str> {
        self.destination(name)
            .map(|destination| destination.target.as_str())
            .or_else(|| self.door_link(name).map(|link| link.target))
    }

    pub fn destination(&self, name: &str) -> Option<&Destination> {
        self.destinations
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, destination)| destination)
    }

    /// The door registered under `name` (any alias) in this location.
    pub fn door_link(&self, name: &str) -> Option<DoorLink<'_>> {
        self.doors
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, entry)| DoorLink {
                door: entry.door,
                target: &entry.target,
                hidden: entry.hidden,
            })
    }

    /// Destinations in registration order, aliases included.
    pub fn destinations(&self) -> impl Iterator<Item = (&str, &Destination)> {
        self.destinations
            .iter()
            .map(|(name, destination)| (name.as_str(), destination))
    }

    /// Door links in registration order, aliases included.
    pub fn door_links(&self) -> impl Iterator<Item = (&str, DoorLink<'_>)> {
        self.doors.iter().map(|(name, entry)| {
            (
                name.as_str(),
                DoorLink {
                    door: entry.door,
                    target: &entry.target,
                    hidden: entry.hidden,
                },
            )
        })
    }

    /// Each door reachable from here, once, in registration order.
    pub fn doors(&self) -> Vec<DoorId> {
        let mut seen = Vec::new();
        for (_, entry) in &self.doors {
            if !seen.contains(&entry.door) {
                seen.push(entry.door);
            }
        }
        seen
    }

    /// Every location id this one links to.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.destinations
            .iter()
            .map(|(_, destination)| destination.target.as_str())
            .chain(self.doors.iter().map(|(_, entry)| entry.target.as_str()))
    }
}
