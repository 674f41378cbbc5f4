use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use rb_combat::{Battle, BattleConfig, BattleOutcome, Side};

/// Flags for a simulated battle.
pub struct Options {
    pub seed: u64,
    pub max_turns: u32,
    pub fight: u32,
    pub verbose: bool,
    pub json: bool,
}

pub fn run(player: &Path, opponent: &Path, opts: &Options) -> Result<(), String> {
    let player = super::load_definition(player)?;
    let opponent = super::load_definition(opponent)?;

    let config = BattleConfig::default()
        .with_seed(opts.seed)
        .with_fight_number(opts.fight)
        .with_max_turns(opts.max_turns);

    let mut battle = Battle::from_config(player, opponent, &config);
    battle.autoplay(config.max_turns);
    let last_turn: Vec<String> = battle.log().last_turn().to_vec();
    let outcome = battle.finish();

    if opts.json {
        let json = serde_json::to_string_pretty(&outcome)
            .map_err(|e| format!("cannot serialize outcome: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    // Header
    println!(
        "  {} {} {} {} {}",
        format!("Fight #{}", outcome.fight_number).bold(),
        outcome.player.name.cyan(),
        "vs".dimmed(),
        outcome.opponent.name.magenta(),
        format!("(seed={}, max {} turns)", opts.seed, opts.max_turns).dimmed()
    );
    println!();

    // Log
    if opts.verbose {
        println!("  {}", "Battle Log".bold().underline());
        println!();
        for line in &outcome.log {
            println!("  {}", colorize_line(line));
        }
    } else {
        println!("  {}", "Final Turn".bold().underline());
        println!();
        for line in &last_turn {
            println!("  {}", colorize_line(line));
        }
    }
    println!();

    // Health per turn
    println!("  {}", "Health by Turn".bold().underline());
    println!();
    println!("{}", history_table(&outcome));
    println!();

    // Result
    match outcome.winner {
        Some(side) => {
            let name = match side {
                Side::Player => &outcome.player.name,
                Side::Opponent => &outcome.opponent.name,
            };
            println!(
                "  {} {} wins after {} turn{}",
                "RESULT".green().bold(),
                name,
                outcome.turns,
                if outcome.turns == 1 { "" } else { "s" }
            );
        }
        None => println!(
            "  {} no winner after {} turns",
            "RESULT".yellow().bold(),
            outcome.turns
        ),
    }

    Ok(())
}

fn history_table(outcome: &BattleOutcome) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Turn".to_string(),
        outcome.player.name.clone(),
        outcome.opponent.name.clone(),
    ]);
    for snap in &outcome.turn_history {
        table.add_row(vec![
            snap.turn.to_string(),
            format!("{}/{}", snap.player_hp, snap.player_max_hp),
            format!("{}/{}", snap.opponent_hp, snap.opponent_max_hp),
        ]);
    }
    table
}

fn colorize_line(line: &str) -> colored::ColoredString {
    if line.ends_with("has been destroyed!") {
        line.red().bold()
    } else if line.ends_with("misses!") {
        line.dimmed()
    } else if line.contains(" hits for ") {
        line.yellow()
    } else if line.contains(" rests and recovers ") {
        line.blue()
    } else if line.contains(" uses ") || line.contains(" used ") {
        line.green()
    } else if line.ends_with("attacks!") {
        line.bold()
    } else {
        line.normal()
    }
}
