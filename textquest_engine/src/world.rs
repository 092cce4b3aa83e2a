//! The world graph.
//!
//! [`World`] owns every location and the door arena. Locations refer to doors by
//! [`DoorId`], so a door seen from two sides is one value.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use log::info;

use crate::door::{Door, DoorId};
use crate::location::Location;

#[derive(Debug, Default)]
pub struct World {
    locations: HashMap<String, Location>,
    doors: Vec<Door>,
    starting_location: String,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates (or replaces) a location. The first location created is where players start.
    pub fn new_location(&mut self, id: &str) -> &mut Location {
        if self.locations.is_empty() {
            self.starting_location = id.to_string();
        }
        match self.locations.entry(id.to_string()) {
            Entry::Occupied(mut entry) => {
                entry.insert(Location::new(id));
                entry.into_mut()
            },
            Entry::Vacant(entry) => entry.insert(Location::new(id)),
        }
    }

    /// Stores a door in the arena and returns the id locations use to refer to it.
    pub fn add_door(&mut self, door: Door) -> DoorId {
        self.doors.push(door);
        DoorId(self.doors.len() - 1)
    }

    pub fn starting_location(&self) -> &str {
        &self.starting_location
    }

    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.get(id)
    }

    pub fn location_mut(&mut self, id: &str) -> Option<&mut Location> {
        self.locations.get_mut(id)
    }

    pub fn door(&self, id: DoorId) -> Option<&Door> {
        self.doors.get(id.0)
    }

    pub fn door_mut(&mut self, id: DoorId) -> Option<&mut Door> {
        self.doors.get_mut(id.0)
    }

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    /// The door in `location` called `name`: registered aliases first, then the door's own
    /// name among the doors reachable from here.
    pub fn resolve_door(&self, location: &Location, name: &str) -> Option<DoorId> {
        if name.is_empty() {
            return None;
        }
        location.door_link(name).map(|link| link.door).or_else(|| {
            location
                .doors()
                .into_iter()
                .find(|id| self.door(*id).is_some_and(|door| door.name == name))
        })
    }

    /// Description, visible destinations, doors, and listed items, one per line.
    /// Rebuilt on every call so it reflects current door and item state.
    pub fn room_prompt(&self, location: &Location) -> String {
        let mut lines = vec![location.description.as_str()];
        lines.extend(
            location
                .destinations()
                .filter(|(_, destination)| !destination.hidden)
                .map(|(_, destination)| destination.description.as_str()),
        );
        lines.extend(
            location
                .doors()
                .into_iter()
                .filter_map(|id| self.door(id))
                .map(|door| door.description.as_str()),
        );
        lines.extend(
            location
                .items
                .iter()
                .filter(|item| item.is_listed())
                .map(|item| item.room_description.as_str()),
        );
        lines
            .into_iter()
            .filter(|line| !line.is_empty())
            .map(|line| format!("{line}\n"))
            .collect()
    }

    /// Paths whose target location does not exist, as `(from, to)` pairs.
    pub fn dangling_paths(&self) -> Vec<(String, String)> {
        let mut dangling: Vec<(String, String)> = self
            .locations
            .values()
            .flat_map(|location| {
                location
                    .targets()
                    .filter(|target| !self.locations.contains_key(*target))
                    .map(|target| (location.id.clone(), target.to_string()))
            })
            .collect();
        dangling.sort();
        dangling.dedup();
        dangling
    }

    /// Log a summary of the world, the way loaders report what they built.
    pub fn log_summary(&self, name: &str) {
        info!(
            "world '{name}' built: {} locations, {} doors, starting at '{}'",
            self.locations.len(),
            self.doors.len(),
            self.starting_location
        );
    }
}
