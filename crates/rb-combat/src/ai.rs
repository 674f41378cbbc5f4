//! Greedy heuristic used for the opponent and for suggested defaults.

use rb_core::ItemId;

use crate::action::PlannedAction;
use crate::fighter::FighterRuntime;

/// Pick weapons greedily by damage per hand within the hands and energy budget.
///
/// Candidates are weapons whose requirements are held and whose energy cost is
/// affordable on their own. Ties keep inventory order.
pub fn select_weapons(fighter: &FighterRuntime) -> Vec<ItemId> {
    if fighter.current_energy <= 0 {
        return Vec::new();
    }

    let mut candidates: Vec<_> = fighter
        .definition
        .inventory
        .weapons()
        .filter(|(_, w)| w.requirements.iter().all(|r| fighter.has_item(r)))
        .filter(|(_, w)| w.energy_cost <= fighter.current_energy)
        .collect();

    // sort_by is stable
    candidates.sort_by(|(_, a), (_, b)| {
        efficiency(b.damage, b.hands).total_cmp(&efficiency(a.damage, a.hands))
    });

    let mut hands = fighter.effective_hands();
    let mut energy = fighter.current_energy;
    let mut selected = Vec::new();
    for (id, weapon) in candidates {
        if weapon.hands <= hands && weapon.energy_cost <= energy {
            hands -= weapon.hands;
            energy -= weapon.energy_cost;
            selected.push(id);
        }
    }
    selected
}

fn efficiency(damage: i32, hands: i32) -> f64 {
    f64::from(damage) / f64::from(hands)
}

/// Choose an action: an unused consumable, then the greedy attack, then rest.
pub fn plan_action(fighter: &FighterRuntime) -> PlannedAction {
    let unused = fighter
        .definition
        .inventory
        .consumables()
        .find(|(id, c)| !fighter.has_used(&c.name) && fighter.spent_name(*id).is_none());
    if let Some((id, _)) = unused {
        return PlannedAction::use_consumable(id);
    }

    let weapons = select_weapons(fighter);
    if weapons.is_empty() {
        PlannedAction::Rest
    } else {
        PlannedAction::Attack { weapons }
    }
}
