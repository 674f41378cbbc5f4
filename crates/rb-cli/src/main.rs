//! CLI frontend for the RoboBattle combat engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "rb",
    about = "RoboBattle, a turn-based robot combat engine",
    version,
    propagate_version = true
)]
struct Cli {
    /// Print engine diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Let the AI fight both sides of a battle
    Simulate {
        /// Player definition (JSON)
        player: PathBuf,

        /// Opponent definition (JSON)
        opponent: PathBuf,

        /// RNG seed for a reproducible battle
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Stop after this many turns without a winner
        #[arg(short, long, default_value = "100")]
        max_turns: u32,

        /// Fight ordinal shown in the header
        #[arg(short, long, default_value = "1")]
        fight: u32,

        /// Print the outcome as JSON instead of a report
        #[arg(long)]
        json: bool,
    },

    /// Show effective stats and inventory of a combatant
    Inspect {
        /// Combatant definition (JSON)
        definition: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Simulate {
            player,
            opponent,
            seed,
            max_turns,
            fight,
            json,
        } => commands::simulate::run(
            &player,
            &opponent,
            &commands::simulate::Options {
                seed,
                max_turns,
                fight,
                verbose: cli.verbose,
                json,
            },
        ),
        Commands::Inspect { definition } => commands::inspect::run(&definition),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
