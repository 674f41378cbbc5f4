//! Per-battle fighter state.
//!
//! A [`FighterRuntime`] wraps a [`CombatantDefinition`] with the resources
//! that only exist while a battle runs: current health and energy, temporary
//! modifiers, and the consumables already spent.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use rb_core::{CombatantDefinition, ItemId};

/// One side of a battle with its in-battle resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FighterRuntime {
    /// The base definition. Its inventory shrinks as items are consumed.
    pub definition: CombatantDefinition,
    /// Current health, kept within `0..=effective_max_health()`.
    pub current_health: i32,
    /// Current energy, kept within `0..=effective_max_energy()`.
    pub current_energy: i32,
    /// Defence added by consumables for the rest of the battle.
    pub temp_defence: i32,
    /// Attack percentage added by consumables for the rest of the battle.
    pub temp_attack: i32,
    /// Dodge removed by the opponent's consumables for the rest of the battle.
    pub temp_dodge_reduction: i32,
    consumables_used: BTreeSet<String>,
    spent_items: BTreeMap<ItemId, String>,
}

impl FighterRuntime {
    /// Start a fighter at full effective health and energy.
    pub fn new(definition: CombatantDefinition) -> Self {
        let current_health = definition.effective_max_health().max(0);
        let current_energy = definition.effective_max_energy().max(0);
        Self {
            definition,
            current_health,
            current_energy,
            temp_defence: 0,
            temp_attack: 0,
            temp_dodge_reduction: 0,
            consumables_used: BTreeSet::new(),
            spent_items: BTreeMap::new(),
        }
    }

    /// The fighter's display name.
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Max health including gear.
    pub fn effective_max_health(&self) -> i32 {
        self.definition.effective_max_health()
    }

    /// Max energy including gear.
    pub fn effective_max_energy(&self) -> i32 {
        self.definition.effective_max_energy()
    }

    /// Defence including gear and temporary bonuses.
    pub fn effective_defence(&self) -> i32 {
        self.definition.effective_defence().saturating_add(self.temp_defence)
    }

    /// Dodge including gear, minus temporary reductions, floored at 0.
    pub fn effective_dodge(&self) -> i32 {
        self.definition
            .effective_dodge()
            .saturating_sub(self.temp_dodge_reduction)
            .max(0)
    }

    /// Attack percentage including gear and temporary bonuses.
    pub fn effective_attack(&self) -> i32 {
        self.definition.effective_attack().saturating_add(self.temp_attack)
    }

    /// Hands including gear.
    pub fn effective_hands(&self) -> i32 {
        self.definition.effective_hands()
    }

    /// Returns true while health is above zero.
    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    /// Returns true if any held item has exactly this name.
    pub fn has_item(&self, name: &str) -> bool {
        self.definition.has_item(name)
    }

    /// Returns true if a consumable with this name was used this battle.
    pub fn has_used(&self, name: &str) -> bool {
        self.consumables_used.contains(name)
    }

    /// Name of the consumable instance if it was used this battle.
    pub fn spent_name(&self, id: ItemId) -> Option<&str> {
        self.spent_items.get(&id).map(String::as_str)
    }

    /// Names of consumables used this battle, sorted.
    pub fn consumables_used(&self) -> impl Iterator<Item = &str> {
        self.consumables_used.iter().map(String::as_str)
    }

    /// Record a consumable as used.
    pub(crate) fn mark_used(&mut self, id: ItemId, name: &str) {
        self.consumables_used.insert(name.to_string());
        self.spent_items.insert(id, name.to_string());
    }

    /// Apply damage, flooring health at 0. Returns the health actually lost.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let before = self.current_health;
        self.current_health = (self.current_health - amount.max(0)).max(0);
        before - self.current_health
    }

    /// Restore health up to the effective max. Returns the amount restored.
    pub fn restore_health(&mut self, amount: i32) -> i32 {
        let room = (self.effective_max_health() - self.current_health).max(0);
        let restored = amount.clamp(0, room);
        self.current_health += restored;
        restored
    }

    /// Restore energy up to the effective max. Returns the amount restored.
    pub fn restore_energy(&mut self, amount: i32) -> i32 {
        let room = (self.effective_max_energy() - self.current_energy).max(0);
        let restored = amount.clamp(0, room);
        self.current_energy += restored;
        restored
    }

    /// Pull health and energy back within `0..=effective_max`.
    ///
    /// Needed whenever held gear is lost mid-battle.
    pub fn clamp_resources(&mut self) {
        self.current_health = self
            .current_health
            .clamp(0, self.effective_max_health().max(0));
        self.current_energy = self
            .current_energy
            .clamp(0, self.effective_max_energy().max(0));
    }

    /// Spend energy, flooring at 0.
    pub fn spend_energy(&mut self, amount: i32) {
        self.current_energy = (self.current_energy - amount.max(0)).max(0);
    }
}
