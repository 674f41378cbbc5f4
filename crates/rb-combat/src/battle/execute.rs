//! Action executors. Each re-validates against current state before mutating.

use rand::Rng;
use tracing::debug;

use rb_core::ItemId;

use super::Battle;
use crate::action::{ActionResult, PlannedAction, Side};
use crate::config::REST_ENERGY;
use crate::error::ActionError;
use crate::fighter::FighterRuntime;
use crate::math::{damage, hit_chance};
use crate::validate::{validate_attack, validate_consumable};

fn actor_and_target<'a>(
    player: &'a mut FighterRuntime,
    opponent: &'a mut FighterRuntime,
    side: Side,
) -> (&'a mut FighterRuntime, &'a mut FighterRuntime) {
    match side {
        Side::Player => (player, opponent),
        Side::Opponent => (opponent, player),
    }
}

impl Battle {
    /// Attack the other side with the given weapons.
    ///
    /// Energy is spent up front and one of each required item is consumed,
    /// then every weapon rolls to hit on its own. Nothing is mutated if the
    /// attack is rejected.
    pub fn execute_attack(&mut self, side: Side, weapons: &[ItemId]) -> ActionResult {
        if self.is_over() {
            return ActionError::BattleOver.into();
        }
        let (attacker, defender) = actor_and_target(&mut self.player, &mut self.opponent, side);
        let plan = match validate_attack(attacker, weapons) {
            Ok(plan) => plan,
            Err(e) => return e.into(),
        };

        attacker.spend_energy(plan.energy);
        for (_, weapon) in &plan.weapons {
            for requirement in &weapon.requirements {
                if attacker.definition.inventory.remove_first_named(requirement).is_some() {
                    self.log.push(format!("{} used {requirement}", attacker.name()));
                }
            }
        }
        attacker.clamp_resources();

        self.log.push(format!("{} attacks!", attacker.name()));
        let mut total = 0;
        let mut lines = Vec::with_capacity(plan.weapons.len());
        for (i, (_, weapon)) in plan.weapons.iter().enumerate() {
            let ordinal = i + 1;
            let chance = hit_chance(weapon.accuracy, defender.effective_dodge());
            let roll: f64 = self.rng.random();
            debug!(weapon = %weapon.name, chance, roll, "attack roll");

            let line = if roll <= chance {
                let dealt = damage(weapon, attacker, defender);
                defender.take_damage(dealt);
                total += dealt;
                format!("  {} {ordinal} hits for {dealt} damage", weapon.name)
            } else {
                format!("  {} {ordinal} misses!", weapon.name)
            };
            self.log.push(line.clone());
            lines.push(line);
        }

        self.check_victory();
        ActionResult {
            success: true,
            message: lines.join("\n"),
            damage_dealt: total,
            energy_spent: plan.energy,
            turn_ended: true,
            failure: None,
        }
    }

    /// Recover [`REST_ENERGY`] energy, capped at max. Always ends the turn.
    pub fn execute_rest(&mut self, side: Side) -> ActionResult {
        if self.is_over() {
            return ActionError::BattleOver.into();
        }
        let (actor, _) = actor_and_target(&mut self.player, &mut self.opponent, side);
        let restored = actor.restore_energy(REST_ENERGY);
        self.log
            .push(format!("{} rests and recovers {restored} energy", actor.name()));
        ActionResult::ok(format!("Recovered {restored} energy"), true)
    }

    /// Use a consumable. Does not end the turn.
    ///
    /// Effects apply in order: health, energy, temporary defence, temporary
    /// attack, damage to the other side, dodge reduction on the other side.
    pub fn use_consumable(&mut self, side: Side, item: ItemId) -> ActionResult {
        if self.is_over() {
            return ActionError::BattleOver.into();
        }
        let (actor, target) = actor_and_target(&mut self.player, &mut self.opponent, side);
        let consumable = match validate_consumable(actor, item) {
            Ok(consumable) => consumable,
            Err(e) => return e.into(),
        };
        if actor.definition.inventory.remove(item).is_err() {
            return ActionError::NotOwned(item).into();
        }
        actor.mark_used(item, &consumable.name);
        actor.clamp_resources();

        let mut effects = Vec::new();
        if consumable.health_restore > 0 {
            let n = actor.restore_health(consumable.health_restore);
            effects.push(format!("+{n} health"));
        }
        if consumable.energy_restore > 0 {
            let n = actor.restore_energy(consumable.energy_restore);
            effects.push(format!("+{n} energy"));
        }
        if consumable.temp_defence > 0 {
            actor.temp_defence = actor.temp_defence.saturating_add(consumable.temp_defence);
            effects.push(format!("+{} temp defence", consumable.temp_defence));
        }
        if consumable.temp_attack > 0 {
            actor.temp_attack = actor.temp_attack.saturating_add(consumable.temp_attack);
            effects.push(format!("+{} temp attack", consumable.temp_attack));
        }
        let mut dealt = 0;
        if consumable.damage > 0 {
            target.take_damage(consumable.damage);
            dealt = consumable.damage;
            effects.push(format!("{} damage to enemy", consumable.damage));
        }
        if consumable.enemy_dodge_reduction > 0 {
            target.temp_dodge_reduction = target
                .temp_dodge_reduction
                .saturating_add(consumable.enemy_dodge_reduction);
            effects.push(format!("-{} enemy dodge", consumable.enemy_dodge_reduction));
        }

        let summary = effects.join(", ");
        self.log
            .push(format!("{} uses {}: {summary}", actor.name(), consumable.name));
        self.check_victory();

        ActionResult {
            damage_dealt: dealt,
            ..ActionResult::ok(format!("Used {}: {summary}", consumable.name), false)
        }
    }

    /// Run a planned action for a side.
    pub fn execute_planned(&mut self, side: Side, action: &PlannedAction) -> ActionResult {
        match action {
            PlannedAction::Attack { weapons } => self.execute_attack(side, weapons),
            PlannedAction::Rest => self.execute_rest(side),
            PlannedAction::UseConsumable { item } => self.use_consumable(side, *item),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rb_core::{CombatantDefinition, Consumable, Gear, Weapon};

    use super::*;

    fn battle(player: CombatantDefinition, opponent: CombatantDefinition) -> Battle {
        Battle::new(player, opponent, StdRng::seed_from_u64(7))
    }

    #[test]
    fn rest_caps_at_max_energy() {
        let mut b = battle(
            CombatantDefinition::new("P").with_energy(15),
            CombatantDefinition::new("O"),
        );
        b.player.current_energy = 13;
        let result = b.execute_rest(Side::Player);
        assert_eq!(b.player().current_energy, 15);
        assert_eq!(result.message, "Recovered 2 energy");
        assert!(result.turn_ended);
        assert_eq!(b.log().full().last().unwrap(), "P rests and recovers 2 energy");

        b.player.current_energy = 10;
        b.execute_rest(Side::Player);
        assert_eq!(b.player().current_energy, 15);
    }

    #[test]
    fn consumable_health_caps_and_reports_actual() {
        let mut p = CombatantDefinition::new("P").with_health(10);
        let kit = p.inventory.push(Consumable {
            health_restore: 10,
            ..Consumable::new("Repair Kit")
        });
        let mut b = battle(p, CombatantDefinition::new("O"));
        b.player.current_health = 5;

        let result = b.use_consumable(Side::Player, kit);
        assert!(result.success);
        assert!(!result.turn_ended);
        assert_eq!(result.message, "Used Repair Kit: +5 health");
        assert_eq!(b.player().current_health, 10);
        assert!(!b.player().has_item("Repair Kit"));
        assert!(b.player().has_used("Repair Kit"));
    }

    #[test]
    fn consumable_once_per_battle() {
        let mut p = CombatantDefinition::new("P");
        let first = p.inventory.push(Consumable {
            temp_defence: 2,
            ..Consumable::new("Shield Cell")
        });
        let second = p.inventory.push(Consumable {
            temp_defence: 2,
            ..Consumable::new("Shield Cell")
        });
        let mut b = battle(p, CombatantDefinition::new("O"));

        assert!(b.use_consumable(Side::Player, first).success);
        let again = b.use_consumable(Side::Player, second);
        assert_eq!(again.failure, Some(ActionError::AlreadyUsed("Shield Cell".into())));
        let stale = b.use_consumable(Side::Player, first);
        assert_eq!(stale.failure, Some(ActionError::AlreadyUsed("Shield Cell".into())));

        assert_eq!(b.player().temp_defence, 2);
        assert!(b.player().has_item("Shield Cell"));
    }

    #[test]
    fn offensive_consumable_hits_other_side() {
        let mut p = CombatantDefinition::new("P");
        let flash = p.inventory.push(Consumable {
            damage: 3,
            enemy_dodge_reduction: 10,
            ..Consumable::new("Flashbang")
        });
        let mut b = battle(p, CombatantDefinition::new("O").with_dodge(15));

        let result = b.use_consumable(Side::Player, flash);
        assert_eq!(result.message, "Used Flashbang: 3 damage to enemy, -10 enemy dodge");
        assert_eq!(result.damage_dealt, 3);
        assert_eq!(b.opponent().current_health, 7);
        assert_eq!(b.opponent().effective_dodge(), 5);
    }

    #[test]
    fn lethal_consumable_ends_battle() {
        let mut o = CombatantDefinition::new("O");
        let bomb = o.inventory.push(Consumable {
            damage: 50,
            ..Consumable::new("Bomb")
        });
        let mut b = battle(CombatantDefinition::new("P"), o);

        b.use_consumable(Side::Opponent, bomb);
        assert_eq!(b.player().current_health, 0);
        assert_eq!(b.winner(), Some(Side::Opponent));
        assert_eq!(b.log().full().last().unwrap(), "P has been destroyed!");
        assert_eq!(
            b.execute_rest(Side::Player).failure,
            Some(ActionError::BattleOver)
        );
    }

    #[test]
    fn rejected_attack_mutates_nothing() {
        let mut p = CombatantDefinition::new("P");
        let sword = p
            .inventory
            .push(Weapon::new("Sword").with_damage(10).with_energy_cost(5));
        let mut b = battle(p, CombatantDefinition::new("O"));
        let log_len = b.log().len();

        let result = b.execute_attack(Side::Player, &[sword, sword]);
        assert!(!result.success);
        assert_eq!(result.failure, Some(ActionError::DuplicateWeapon(sword)));

        b.player.current_energy = 2;
        let result = b.execute_attack(Side::Player, &[sword]);
        assert_eq!(result.message, "Not enough energy (need 5, have 2)");

        assert_eq!(b.player().current_energy, 2);
        assert_eq!(b.opponent().current_health, 10);
        assert_eq!(b.log().len(), log_len);
    }

    #[test]
    fn sure_hit_applies_damage_and_energy() {
        let mut p = CombatantDefinition::new("P");
        let sword = p
            .inventory
            .push(Weapon::new("Sword").with_damage(6).with_energy_cost(4));
        let mut b = battle(p, CombatantDefinition::new("O").with_defence(2));

        let result = b.execute_attack(Side::Player, &[sword]);
        assert!(result.success);
        assert!(result.turn_ended);
        assert_eq!(result.damage_dealt, 4);
        assert_eq!(result.energy_spent, 4);
        assert_eq!(result.message, "  Sword 1 hits for 4 damage");
        assert_eq!(b.player().current_energy, 16);
        assert_eq!(b.opponent().current_health, 6);
        assert_eq!(
            &b.log().current_turn()[1..],
            ["P attacks!", "  Sword 1 hits for 4 damage"]
        );
    }

    #[test]
    fn misses_still_cost_energy() {
        let mut p = CombatantDefinition::new("P");
        let blaster = p
            .inventory
            .push(Weapon::new("Blaster").with_accuracy(0).with_energy_cost(3));
        let mut b = battle(p, CombatantDefinition::new("O").with_dodge(50));

        let result = b.execute_attack(Side::Player, &[blaster]);
        assert_eq!(result.message, "  Blaster 1 misses!");
        assert_eq!(result.damage_dealt, 0);
        assert_eq!(b.player().current_energy, 17);
        assert_eq!(b.opponent().current_health, 10);
    }

    #[test]
    fn ammunition_consumed_on_attack() {
        let mut p = CombatantDefinition::new("P").with_hands(2);
        let shotgun = Weapon::new("Shotgun")
            .with_damage(2)
            .with_requirement("Shotgun Shell");
        let left = p.inventory.push(shotgun.clone());
        let right = p.inventory.push(shotgun);
        p.inventory.push(Consumable::new("Shotgun Shell"));
        p.inventory.push(Consumable::new("Shotgun Shell"));
        let mut b = battle(p, CombatantDefinition::new("O").with_health(50));

        let result = b.execute_attack(Side::Player, &[left, right]);
        assert!(result.success);
        assert!(!b.player().has_item("Shotgun Shell"));
        let lines = b.log().current_turn();
        assert_eq!(lines[1], "P used Shotgun Shell");
        assert_eq!(lines[2], "P used Shotgun Shell");
        assert_eq!(lines[3], "P attacks!");
        assert!(lines[4].starts_with("  Shotgun 1 "));
        assert!(lines[5].starts_with("  Shotgun 2 "));

        let result = b.execute_attack(Side::Player, &[left]);
        assert_eq!(result.message, "Shotgun requires Shotgun Shell");
    }

    #[test]
    fn killing_blow_sets_winner() {
        let mut p = CombatantDefinition::new("P");
        let hammer = p.inventory.push(Weapon::new("Hammer").with_damage(20));
        let mut b = battle(p, CombatantDefinition::new("O"));

        b.execute_attack(Side::Player, &[hammer]);
        assert_eq!(b.opponent().current_health, 0);
        assert_eq!(b.winner(), Some(Side::Player));
        assert_eq!(
            b.execute_attack(Side::Player, &[hammer]).failure,
            Some(ActionError::BattleOver)
        );
    }

    #[test]
    fn planned_dispatch() {
        let mut b = battle(CombatantDefinition::new("P"), CombatantDefinition::new("O"));
        let result = b.execute_planned(Side::Opponent, &PlannedAction::Rest);
        assert_eq!(result.message, "Recovered 0 energy");
        let result = b.execute_planned(Side::Opponent, &PlannedAction::attack([]));
        assert_eq!(result.message, "No weapons selected");
    }

    #[test]
    fn spending_required_gear_lowers_current_health() {
        let mut p = CombatantDefinition::new("P").with_health(10);
        p.inventory.push(Gear {
            health_bonus: 20,
            energy_bonus: 5,
            ..Gear::new("Core")
        });
        let beam = p
            .inventory
            .push(Weapon::new("Core Beam").with_damage(2).with_requirement("Core"));
        let mut b = battle(p, CombatantDefinition::new("O").with_health(50));
        assert_eq!(b.player().current_health, 30);
        assert_eq!(b.player().current_energy, 25);

        assert!(b.execute_attack(Side::Player, &[beam]).success);
        assert!(!b.player().has_item("Core"));
        assert_eq!(b.player().effective_max_health(), 10);
        assert_eq!(b.player().current_health, 10);
        assert_eq!(b.player().current_energy, 20);
    }

    #[test]
    fn temp_bonuses_saturate() {
        let mut p = CombatantDefinition::new("P");
        let cell = p.inventory.push(Consumable {
            temp_defence: 5,
            temp_attack: 5,
            ..Consumable::new("Shield Cell")
        });
        let flash = p.inventory.push(Consumable {
            enemy_dodge_reduction: 5,
            ..Consumable::new("Flashbang")
        });
        let mut b = battle(p, CombatantDefinition::new("O"));
        b.player.temp_defence = i32::MAX - 1;
        b.player.temp_attack = i32::MAX;
        b.opponent.temp_dodge_reduction = i32::MAX - 2;

        assert!(b.use_consumable(Side::Player, cell).success);
        assert!(b.use_consumable(Side::Player, flash).success);
        assert_eq!(b.player().temp_defence, i32::MAX);
        assert_eq!(b.player().temp_attack, i32::MAX);
        assert_eq!(b.opponent().temp_dodge_reduction, i32::MAX);
        assert_eq!(b.opponent().effective_dodge(), 0);
    }

    #[derive(Debug, Clone, Copy)]
    enum Step {
        Attack(Side, usize),
        Rest(Side),
        Consume(Side, usize),
        Turn,
    }

    fn side() -> impl Strategy<Value = Side> {
        prop_oneof![Just(Side::Player), Just(Side::Opponent)]
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            (side(), 0usize..4).prop_map(|(s, i)| Step::Attack(s, i)),
            side().prop_map(Step::Rest),
            (side(), 0usize..4).prop_map(|(s, i)| Step::Consume(s, i)),
            Just(Step::Turn),
        ]
    }

    fn geared(name: &str) -> CombatantDefinition {
        let mut def = CombatantDefinition::new(name).with_health(12).with_hands(2);
        def.inventory.push(Gear {
            health_bonus: 15,
            energy_bonus: 6,
            ..Gear::new("Reactor")
        });
        def.inventory.push(Gear {
            health_bonus: 4,
            ..Gear::new("Plating")
        });
        def.inventory.push(
            Weapon::new("Fusion Lance")
                .with_damage(3)
                .with_energy_cost(4)
                .with_requirement("Reactor"),
        );
        def.inventory.push(
            Weapon::new("Rivet Gun")
                .with_damage(2)
                .with_accuracy(70)
                .with_requirement("Plating"),
        );
        def.inventory.push(Weapon::new("Claw").with_damage(1));
        def.inventory.push(Consumable {
            health_restore: 30,
            energy_restore: 30,
            ..Consumable::new("Overcharge")
        });
        def.inventory.push(Consumable {
            damage: 6,
            ..Consumable::new("Grenade")
        });
        def
    }

    fn nth_of_kind(fighter: &FighterRuntime, weapon: bool, n: usize) -> Option<ItemId> {
        let ids: Vec<ItemId> = fighter
            .definition
            .inventory
            .entries()
            .iter()
            .filter(|e| {
                if weapon {
                    e.item.as_weapon().is_some()
                } else {
                    e.item.as_consumable().is_some()
                }
            })
            .map(|e| e.id)
            .collect();
        ids.get(n % ids.len().max(1)).copied()
    }

    fn within_bounds(fighter: &FighterRuntime) -> Result<(), TestCaseError> {
        let max_health = fighter.effective_max_health();
        let max_energy = fighter.effective_max_energy();
        prop_assert!(
            (0..=max_health).contains(&fighter.current_health),
            "{} health {} outside 0..={max_health}",
            fighter.name(),
            fighter.current_health
        );
        prop_assert!(
            (0..=max_energy).contains(&fighter.current_energy),
            "{} energy {} outside 0..={max_energy}",
            fighter.name(),
            fighter.current_energy
        );
        Ok(())
    }

    proptest! {
        #[test]
        fn resources_stay_within_effective_max(
            seed in any::<u64>(),
            steps in prop::collection::vec(step(), 1..40),
        ) {
            let mut b = Battle::new(geared("P"), geared("O"), StdRng::seed_from_u64(seed));
            for step in steps {
                match step {
                    Step::Attack(s, n) => {
                        if let Some(id) = nth_of_kind(b.fighter(s), true, n) {
                            b.execute_attack(s, &[id]);
                        }
                    }
                    Step::Rest(s) => {
                        b.execute_rest(s);
                    }
                    Step::Consume(s, n) => {
                        if let Some(id) = nth_of_kind(b.fighter(s), false, n) {
                            b.use_consumable(s, id);
                        }
                    }
                    Step::Turn => {
                        b.plan_ai(Side::Player);
                        b.plan_ai(Side::Opponent);
                        b.resolve_turn();
                    }
                }
                within_bounds(b.player())?;
                within_bounds(b.opponent())?;
            }
        }
    }
}
