//! Player -- the acting identity and what they carry.
use crate::item::{Item, ItemHolder};

#[derive(Debug)]
pub struct Player {
    pub id: String,
    /// Insertion order is display order.
    pub inventory: Vec<Item>,
}

impl Player {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            inventory: Vec::new(),
        }
    }

    pub fn describe_inventory(&self) -> String {
        if self.inventory.is_empty() {
            return "you have nothing in your inventory".to_string();
        }
        let mut description = String::from("You have the following in your inventory:");
        for item in &self.inventory {
            description.push_str(&format!("\n - {}: {}", item.name, item.inventory_description));
        }
        description
    }
}

impl ItemHolder for Player {
    fn items(&self) -> &[Item] {
        &self.inventory
    }

    fn add_item(&mut self, mut item: Item) {
        item.in_inventory = true;
        self.inventory.push(item);
    }

    fn remove_item(&mut self, index: usize) -> Option<Item> {
        (index < self.inventory.len()).then(|| self.inventory.remove(index))
    }
}
