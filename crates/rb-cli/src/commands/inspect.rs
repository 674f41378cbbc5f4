use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use rb_core::{CombatantDefinition, Item};

pub fn run(path: &Path) -> Result<(), String> {
    let def = super::load_definition(path)?;

    println!(
        "  {} {}",
        def.name.bold(),
        format!("(level {})", def.level).dimmed()
    );
    println!();

    println!("  {}", "Stats".bold().underline());
    println!();
    println!("{}", stats_table(&def));
    println!();

    println!("  {}", "Inventory".bold().underline());
    println!();
    if def.inventory.is_empty() {
        println!("  {}", "(empty)".dimmed());
    } else {
        println!("{}", inventory_table(&def));
    }
    println!();

    Ok(())
}

fn stats_table(def: &CombatantDefinition) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Stat", "Base", "Effective"]);
    let rows = [
        ("Health", def.health, def.effective_max_health()),
        ("Energy", def.energy, def.effective_max_energy()),
        ("Defence", def.defence, def.effective_defence()),
        ("Attack %", def.attack, def.effective_attack()),
        ("Hands", def.hands, def.effective_hands()),
        ("Dodge", def.dodge, def.effective_dodge()),
        ("Money %", 0, def.money_bonus_percent()),
    ];
    for (stat, base, effective) in rows {
        table.add_row(vec![stat.to_string(), base.to_string(), effective.to_string()]);
    }
    table
}

fn inventory_table(def: &CombatantDefinition) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Name", "Kind", "Details"]);
    for entry in def.inventory.entries() {
        table.add_row(vec![
            entry.id.to_string(),
            entry.item.name().to_string(),
            entry.item.kind().to_string(),
            details(&entry.item),
        ]);
    }
    table
}

fn details(item: &Item) -> String {
    let mut parts = Vec::new();
    match item {
        Item::Weapon(w) => {
            parts.push(format!("dmg {}", w.damage));
            parts.push(format!("energy {}", w.energy_cost));
            parts.push(format!("acc {}", w.accuracy));
            parts.push(format!("hands {}", w.hands));
        }
        Item::Gear(g) => {
            let bonuses = [
                ("health", g.health_bonus),
                ("energy", g.energy_bonus),
                ("defence", g.defence_bonus),
                ("attack %", g.attack_bonus),
                ("hands", g.hands_bonus),
                ("dodge", g.dodge_bonus),
                ("money %", g.money_bonus_percent),
            ];
            parts.extend(
                bonuses
                    .iter()
                    .filter(|(_, v)| *v != 0)
                    .map(|(label, v)| format!("{v:+} {label}")),
            );
        }
        Item::Consumable(c) => {
            let effects = [
                ("health", c.health_restore),
                ("energy", c.energy_restore),
                ("temp defence", c.temp_defence),
                ("temp attack", c.temp_attack),
                ("damage", c.damage),
                ("enemy dodge", -c.enemy_dodge_reduction),
            ];
            parts.extend(
                effects
                    .iter()
                    .filter(|(_, v)| *v != 0)
                    .map(|(label, v)| format!("{v:+} {label}")),
            );
        }
    }
    let requirements = item.requirements();
    if !requirements.is_empty() {
        parts.push(format!("needs {}", requirements.join(", ")));
    }
    parts.join(", ")
}
