//! Hit chance and damage formulas.
//!
//! ```text
//! hit_chance = clamp((accuracy - dodge) / 100, 0.0, 1.0)
//! damage     = max(0, floor(base * (100 + attack%) / 100) - defence)
//! ```
//!
//! The attack percentage scales the base damage first; defence is a flat
//! reduction applied afterwards.

use rb_core::Weapon;

use crate::fighter::FighterRuntime;

/// Chance to hit, in `[0.0, 1.0]`.
pub fn hit_chance(accuracy: i32, dodge: i32) -> f64 {
    let raw = (f64::from(accuracy) - f64::from(dodge)) / 100.0;
    raw.clamp(0.0, 1.0)
}

/// Base damage scaled by an attack percentage, floored.
pub fn scaled_damage(base: i32, attack_percent: i32) -> i64 {
    (i64::from(base) * (100 + i64::from(attack_percent))).div_euclid(100)
}

/// Damage a single weapon hit deals to the defender. Never negative.
pub fn damage(weapon: &Weapon, attacker: &FighterRuntime, defender: &FighterRuntime) -> i32 {
    let scaled = scaled_damage(weapon.damage, attacker.effective_attack());
    let reduced = scaled - i64::from(defender.effective_defence());
    i32::try_from(reduced.max(0)).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rb_core::{CombatantDefinition, Gear};

    fn fighter(attack: i32, defence: i32) -> FighterRuntime {
        FighterRuntime::new(
            CombatantDefinition::new("Bot")
                .with_attack(attack)
                .with_defence(defence),
        )
    }

    fn sword() -> Weapon {
        Weapon::new("Sword").with_damage(10)
    }

    #[test]
    fn perfect_accuracy_no_dodge() {
        assert_eq!(hit_chance(100, 0), 1.0);
    }

    #[test]
    fn accuracy_minus_dodge() {
        assert_eq!(hit_chance(100, 30), 0.7);
    }

    #[test]
    fn dodge_above_accuracy() {
        assert_eq!(hit_chance(50, 100), 0.0);
    }

    #[test]
    fn over_full_accuracy_is_capped() {
        assert_eq!(hit_chance(150, 30), 1.0);
    }

    #[test]
    fn basic_damage() {
        assert_eq!(damage(&sword(), &fighter(0, 0), &fighter(0, 0)), 10);
    }

    #[test]
    fn defence_subtracts() {
        assert_eq!(damage(&sword(), &fighter(0, 0), &fighter(0, 3)), 7);
    }

    #[test]
    fn damage_never_negative() {
        assert_eq!(damage(&sword(), &fighter(0, 0), &fighter(0, 100)), 0);
    }

    #[test]
    fn attack_scales_before_defence() {
        // floor(10 * 1.5) - 4 = 11, not floor((10 - 4) * 1.5) = 9
        assert_eq!(damage(&sword(), &fighter(50, 0), &fighter(0, 4)), 11);
        // floor(3 * 1.1) = 3
        let stick = Weapon::new("Stick").with_damage(3);
        assert_eq!(damage(&stick, &fighter(10, 0), &fighter(0, 0)), 3);
    }

    #[test]
    fn temp_modifiers_apply() {
        let mut attacker = fighter(0, 0);
        attacker.temp_attack = 100;
        let mut defender = fighter(0, 0);
        defender.definition.inventory.push(Gear {
            defence_bonus: 2,
            ..Gear::new("Plating")
        });
        defender.temp_defence = 3;
        assert_eq!(damage(&sword(), &attacker, &defender), 15);
    }

    proptest! {
        #[test]
        fn hit_chance_in_unit_range(a in -500i32..500, d in -500i32..500) {
            let p = hit_chance(a, d);
            prop_assert!((0.0..=1.0).contains(&p));
        }

        #[test]
        fn hit_chance_monotonic(a in -300i32..300, d in -300i32..300, step in 0i32..100) {
            prop_assert!(hit_chance(a + step, d) >= hit_chance(a, d));
            prop_assert!(hit_chance(a, d + step) <= hit_chance(a, d));
        }

        #[test]
        fn damage_is_non_negative(
            base in 0i32..1000,
            attack in -100i32..500,
            defence in -50i32..2000,
        ) {
            let weapon = Weapon::new("W").with_damage(base);
            let d = damage(&weapon, &fighter(attack, 0), &fighter(0, defence));
            prop_assert!(d >= 0);
        }
    }
}
