//! Core types for RoboBattle: items, inventories, and combatant definitions.
//!
//! This crate defines the plain data exchanged between the combat engine and
//! its collaborators (catalog, shop, progression). It has no game logic
//! beyond deriving effective stats from held gear.

/// Combatant definitions and gear-derived effective stats.
pub mod combatant;
/// Error types used throughout the crate.
pub mod error;
/// Owned, versioned item collections.
pub mod inventory;
/// The item sum type and its variants.
pub mod item;

/// Re-export the combatant definition.
pub use combatant::CombatantDefinition;
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export inventory types.
pub use inventory::{Inventory, InventoryEntry};
/// Re-export item types.
pub use item::{Consumable, Gear, Item, ItemId, ItemKind, Weapon};
