use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::item::{Consumable, Gear, Item, ItemId, Weapon};

/// One item instance held in an inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryEntry {
    /// Stable identifier of this instance.
    pub id: ItemId,
    /// The item itself.
    pub item: Item,
}

/// An owned, ordered item collection.
///
/// Every mutation bumps [`Inventory::version`], so a collaborator handing an
/// inventory into a battle can tell whether it came back changed.
/// Serializes as a plain list of items; IDs are reassigned on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Item>", into = "Vec<Item>")]
pub struct Inventory {
    entries: Vec<InventoryEntry>,
    next_id: u32,
    version: u64,
}

impl Inventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Append an item. Returns the ID of the new instance.
    pub fn push(&mut self, item: impl Into<Item>) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.entries.push(InventoryEntry {
            id,
            item: item.into(),
        });
        self.version += 1;
        id
    }

    /// Remove an item instance by ID.
    pub fn remove(&mut self, id: ItemId) -> CoreResult<Item> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(CoreError::ItemNotFound(id))?;
        self.version += 1;
        Ok(self.entries.remove(pos).item)
    }

    /// Remove the first item with the given name, if any.
    pub fn remove_first_named(&mut self, name: &str) -> Option<InventoryEntry> {
        let pos = self.entries.iter().position(|e| e.item.name() == name)?;
        self.version += 1;
        Some(self.entries.remove(pos))
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Get an item by ID.
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.item)
    }

    /// Returns true if any held item has exactly this name.
    pub fn has_item(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.item.name() == name)
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    /// All weapons in inventory order.
    pub fn weapons(&self) -> impl Iterator<Item = (ItemId, &Weapon)> {
        self.entries
            .iter()
            .filter_map(|e| e.item.as_weapon().map(|w| (e.id, w)))
    }

    /// All gear in inventory order.
    pub fn gear(&self) -> impl Iterator<Item = (ItemId, &Gear)> {
        self.entries
            .iter()
            .filter_map(|e| e.item.as_gear().map(|g| (e.id, g)))
    }

    /// All consumables in inventory order.
    pub fn consumables(&self) -> impl Iterator<Item = (ItemId, &Consumable)> {
        self.entries
            .iter()
            .filter_map(|e| e.item.as_consumable().map(|c| (e.id, c)))
    }

    /// Number of items held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is held.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mutation counter, incremented by every insert and removal.
    pub fn version(&self) -> u64 {
        self.version
    }
}

impl From<Vec<Item>> for Inventory {
    fn from(items: Vec<Item>) -> Self {
        let mut inventory = Self::new();
        for item in items {
            inventory.push(item);
        }
        inventory.version = 0;
        inventory
    }
}

impl From<Inventory> for Vec<Item> {
    fn from(inventory: Inventory) -> Self {
        inventory.entries.into_iter().map(|e| e.item).collect()
    }
}

impl FromIterator<Item> for Inventory {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}
