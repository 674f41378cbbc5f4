//! Side-effect-free legality checks for planned actions.
//!
//! The executor runs these again at resolution time; a plan that was legal
//! when it was made is not trusted later.

use std::collections::BTreeSet;

use rb_core::{Consumable, Item, ItemId, Weapon};

use crate::action::PlannedAction;
use crate::error::{ActionError, ValidationResult};
use crate::fighter::FighterRuntime;

/// A validated weapon selection, resolved against the inventory.
#[derive(Debug, Clone)]
pub struct AttackPlan {
    /// The selected weapons in selection order.
    pub weapons: Vec<(ItemId, Weapon)>,
    /// Total hands occupied.
    pub hands: i32,
    /// Total energy cost.
    pub energy: i32,
}

/// Check an attack with the given weapon instances.
pub fn validate_attack(fighter: &FighterRuntime, weapons: &[ItemId]) -> ValidationResult<AttackPlan> {
    if weapons.is_empty() {
        return Err(ActionError::InvalidAction("No weapons selected".to_string()));
    }

    let mut seen = BTreeSet::new();
    for id in weapons {
        if !seen.insert(*id) {
            return Err(ActionError::DuplicateWeapon(*id));
        }
    }

    let mut resolved = Vec::with_capacity(weapons.len());
    for id in weapons {
        match fighter.definition.inventory.get(*id) {
            Some(Item::Weapon(weapon)) => resolved.push((*id, weapon.clone())),
            Some(other) => {
                return Err(ActionError::InvalidAction(format!(
                    "{} is not a weapon",
                    other.name()
                )));
            }
            None => return Err(ActionError::NotOwned(*id)),
        }
    }

    let hands = resolved
        .iter()
        .map(|(_, w)| w.hands)
        .fold(0, i32::saturating_add);
    let available_hands = fighter.effective_hands();
    if hands > available_hands {
        return Err(ActionError::InsufficientHands {
            needed: hands,
            available: available_hands,
        });
    }

    let energy = resolved
        .iter()
        .map(|(_, w)| w.energy_cost)
        .fold(0, i32::saturating_add);
    if energy > fighter.current_energy {
        return Err(ActionError::InsufficientEnergy {
            needed: energy,
            available: fighter.current_energy,
        });
    }

    for (_, weapon) in &resolved {
        if let Some(missing) = weapon.requirements.iter().find(|r| !fighter.has_item(r)) {
            return Err(ActionError::MissingRequirement {
                weapon: weapon.name.clone(),
                requirement: missing.clone(),
            });
        }
    }

    Ok(AttackPlan {
        weapons: resolved,
        hands,
        energy,
    })
}

/// Check use of a consumable instance. Returns a copy of the consumable.
pub fn validate_consumable(fighter: &FighterRuntime, item: ItemId) -> ValidationResult<Consumable> {
    if let Some(name) = fighter.spent_name(item) {
        return Err(ActionError::AlreadyUsed(name.to_string()));
    }

    match fighter.definition.inventory.get(item) {
        Some(Item::Consumable(consumable)) if fighter.has_used(&consumable.name) => {
            Err(ActionError::AlreadyUsed(consumable.name.clone()))
        }
        Some(Item::Consumable(consumable)) => Ok(consumable.clone()),
        Some(other) => Err(ActionError::InvalidAction(format!(
            "{} is not a consumable",
            other.name()
        ))),
        None => Err(ActionError::NotOwned(item)),
    }
}

/// Check any planned action. Rest is always legal.
pub fn validate_action(fighter: &FighterRuntime, action: &PlannedAction) -> ValidationResult<()> {
    match action {
        PlannedAction::Attack { weapons } => validate_attack(fighter, weapons).map(|_| ()),
        PlannedAction::Rest => Ok(()),
        PlannedAction::UseConsumable { item } => validate_consumable(fighter, *item).map(|_| ()),
    }
}
