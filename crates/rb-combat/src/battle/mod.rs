//! Turn orchestration for a two-fighter battle.
//!
//! Both sides plan an action, then [`Battle::resolve_turn`] runs the two
//! actions in a random order drawn from the battle's RNG. The second action is
//! skipped once a winner exists. Every completed turn appends a
//! [`TurnSnapshot`] and swaps the per-turn log.

mod execute;
pub mod log;

pub use log::{BattleLog, TurnSnapshot};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, warn};

use rb_core::{CombatantDefinition, Item};

use crate::action::{ActionResult, PlannedAction, Side};
use crate::ai;
use crate::config::BattleConfig;
use crate::error::ActionError;
use crate::fighter::FighterRuntime;
use crate::validate::validate_action;

/// Where the battle is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BattlePhase {
    /// Waiting for planned actions.
    Planning,
    /// Executing the planned actions.
    Resolving,
    /// A winner has been decided. Terminal.
    Finished(Side),
}

/// One executed action, in resolution order.
#[derive(Debug, Clone, Serialize)]
pub struct TurnEntry {
    /// The side that acted.
    pub side: Side,
    /// The actor's name.
    pub actor: String,
    /// What happened.
    pub result: ActionResult,
}

/// Everything a finished battle hands back to its caller.
#[derive(Debug, Clone, Serialize)]
pub struct BattleOutcome {
    /// The winner, or `None` if the battle was stopped early.
    pub winner: Option<Side>,
    /// Display ordinal of the fight.
    pub fight_number: u32,
    /// Completed turns.
    pub turns: u32,
    /// The full narrative log.
    pub log: Vec<String>,
    /// Health after every completed turn.
    pub turn_history: Vec<TurnSnapshot>,
    /// The player's definition, inventory reflecting consumption.
    pub player: CombatantDefinition,
    /// The opponent's definition, inventory reflecting consumption.
    pub opponent: CombatantDefinition,
}

/// A battle between a player and a single opponent.
#[derive(Debug)]
pub struct Battle {
    player: FighterRuntime,
    opponent: FighterRuntime,
    rng: StdRng,
    turn_number: u32,
    phase: BattlePhase,
    final_turn_closed: bool,
    player_action: Option<PlannedAction>,
    opponent_action: Option<PlannedAction>,
    log: BattleLog,
    turn_history: Vec<TurnSnapshot>,
    fight_number: u32,
}

impl Battle {
    /// Start a battle. All randomness is drawn from `rng`.
    pub fn new(player: CombatantDefinition, opponent: CombatantDefinition, rng: StdRng) -> Self {
        let mut log = BattleLog::new();
        log.push("Battle begins! Both robots choose their actions simultaneously.");
        info!(player = %player.name, opponent = %opponent.name, "battle started");
        Self {
            player: FighterRuntime::new(player),
            opponent: FighterRuntime::new(opponent),
            rng,
            turn_number: 1,
            phase: BattlePhase::Planning,
            final_turn_closed: false,
            player_action: None,
            opponent_action: None,
            log,
            turn_history: Vec::new(),
            fight_number: 1,
        }
    }

    /// Start a battle seeded from a configuration.
    pub fn from_config(
        player: CombatantDefinition,
        opponent: CombatantDefinition,
        config: &BattleConfig,
    ) -> Self {
        let mut battle = Self::new(player, opponent, StdRng::seed_from_u64(config.seed));
        battle.fight_number = config.fight_number;
        battle
    }

    /// Set the fight ordinal echoed in the outcome.
    pub fn with_fight_number(mut self, fight_number: u32) -> Self {
        self.fight_number = fight_number;
        self
    }

    /// The player's runtime state.
    pub fn player(&self) -> &FighterRuntime {
        &self.player
    }

    /// The opponent's runtime state.
    pub fn opponent(&self) -> &FighterRuntime {
        &self.opponent
    }

    /// Runtime state for one side.
    pub fn fighter(&self, side: Side) -> &FighterRuntime {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    /// The current turn, starting at 1.
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// The current phase.
    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    /// The winner, once decided.
    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            BattlePhase::Finished(side) => Some(side),
            _ => None,
        }
    }

    /// Returns true once a winner exists.
    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    /// The narrative log.
    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    /// Health snapshots of completed turns.
    pub fn turn_history(&self) -> &[TurnSnapshot] {
        &self.turn_history
    }

    /// The fight ordinal.
    pub fn fight_number(&self) -> u32 {
        self.fight_number
    }

    /// The pending action for a side, if any.
    pub fn planned(&self, side: Side) -> Option<&PlannedAction> {
        match side {
            Side::Player => self.player_action.as_ref(),
            Side::Opponent => self.opponent_action.as_ref(),
        }
    }

    /// Validate and store a side's action for this turn.
    ///
    /// Replaces an earlier plan. A rejected plan leaves the slot untouched.
    pub fn plan(&mut self, side: Side, action: PlannedAction) -> ActionResult {
        if self.is_over() {
            return ActionError::BattleOver.into();
        }
        let fighter = self.fighter(side);
        if let Err(e) = validate_action(fighter, &action) {
            debug!(%side, %action, reason = %e, "plan rejected");
            return e.into();
        }

        let message = match &action {
            PlannedAction::Attack { weapons } => {
                let names: Vec<&str> = weapons
                    .iter()
                    .filter_map(|id| fighter.definition.inventory.get(*id))
                    .map(Item::name)
                    .collect();
                format!("Planned attack with {}", names.join(", "))
            }
            PlannedAction::Rest => "Planned to rest".to_string(),
            PlannedAction::UseConsumable { item } => {
                let name = fighter.definition.inventory.get(*item).map_or("", Item::name);
                format!("Planned to use {name}")
            }
        };

        debug!(%side, %action, "planned");
        match side {
            Side::Player => self.player_action = Some(action),
            Side::Opponent => self.opponent_action = Some(action),
        }
        ActionResult::ok(message, true)
    }

    /// The heuristic's choice for a side, without planning it.
    pub fn suggest(&self, side: Side) -> PlannedAction {
        ai::plan_action(self.fighter(side))
    }

    /// Plan the heuristic's choice for a side, falling back to rest.
    pub fn plan_ai(&mut self, side: Side) -> ActionResult {
        let action = self.suggest(side);
        let result = self.plan(side, action);
        if result.success || self.is_over() {
            result
        } else {
            self.plan(side, PlannedAction::Rest)
        }
    }

    /// Resolve both planned actions in random order and close the turn.
    ///
    /// A side without a plan rests. Returns the executed actions in order,
    /// or nothing if the battle is already over.
    pub fn resolve_turn(&mut self) -> Vec<TurnEntry> {
        if self.is_over() {
            return Vec::new();
        }
        self.phase = BattlePhase::Resolving;

        let first = if self.rng.random_bool(0.5) {
            Side::Player
        } else {
            Side::Opponent
        };
        debug!(turn = self.turn_number, %first, "resolving turn");

        let mut entries = Vec::with_capacity(2);
        for side in [first, first.other()] {
            if self.is_over() {
                break;
            }
            let action = match side {
                Side::Player => self.player_action.take(),
                Side::Opponent => self.opponent_action.take(),
            }
            .unwrap_or(PlannedAction::Rest);

            let result = self.execute_planned(side, &action);
            entries.push(TurnEntry {
                side,
                actor: self.fighter(side).name().to_string(),
                result,
            });
        }

        self.end_turn();
        entries
    }

    /// Decide the winner if either fighter is down.
    ///
    /// The player is checked first, so if both are down the opponent wins.
    /// Once set, the winner never changes.
    pub fn check_victory(&mut self) -> Option<Side> {
        if let Some(winner) = self.winner() {
            return Some(winner);
        }

        let (winner, loser) = if !self.player.is_alive() {
            (Side::Opponent, Side::Player)
        } else if !self.opponent.is_alive() {
            (Side::Player, Side::Opponent)
        } else {
            return None;
        };

        let loser_name = self.fighter(loser).name().to_string();
        self.log.push(format!("{loser_name} has been destroyed!"));
        info!(%winner, turn = self.turn_number, "battle decided");
        self.phase = BattlePhase::Finished(winner);
        Some(winner)
    }

    /// Close the current turn: snapshot health, swap the turn log, clear
    /// plans, advance the counter.
    ///
    /// The turn that produced the winner gets its snapshot but the counter
    /// stays put. Afterwards this is a no-op.
    pub fn end_turn(&mut self) {
        if self.final_turn_closed {
            return;
        }
        self.turn_history.push(TurnSnapshot {
            turn: self.turn_number,
            player_hp: self.player.current_health,
            player_max_hp: self.player.effective_max_health(),
            opponent_hp: self.opponent.current_health,
            opponent_max_hp: self.opponent.effective_max_health(),
        });
        self.log.end_turn();
        self.player_action = None;
        self.opponent_action = None;

        if self.is_over() {
            self.final_turn_closed = true;
        } else {
            self.turn_number += 1;
            self.phase = BattlePhase::Planning;
        }
    }

    /// Use every consumable the heuristic suggests for a side right away.
    ///
    /// Items do not end the turn, so the side still plans a primary action
    /// afterwards. Stops at the first rejection or once a winner exists.
    pub fn use_suggested_items(&mut self, side: Side) -> Vec<ActionResult> {
        let mut results = Vec::new();
        while let PlannedAction::UseConsumable { item } = self.suggest(side) {
            let result = self.use_consumable(side, item);
            let stop = !result.success || self.is_over();
            results.push(result);
            if stop {
                break;
            }
        }
        results
    }

    /// Let the heuristic play both sides until a winner or `max_turns`
    /// resolved turns.
    pub fn autoplay(&mut self, max_turns: u32) -> Option<Side> {
        let mut played = 0;
        while !self.is_over() && played < max_turns {
            self.use_suggested_items(Side::Player);
            if self.is_over() {
                self.end_turn();
                break;
            }
            self.plan_ai(Side::Player);
            self.plan_ai(Side::Opponent);
            self.resolve_turn();
            played += 1;
        }
        if !self.is_over() {
            warn!(max_turns, turn = self.turn_number, "autoplay stopped without a winner");
        }
        self.winner()
    }

    /// Consume the battle, handing both definitions back.
    pub fn finish(self) -> BattleOutcome {
        BattleOutcome {
            winner: self.winner(),
            fight_number: self.fight_number,
            turns: u32::try_from(self.turn_history.len()).unwrap_or(u32::MAX),
            log: self.log.into_full(),
            turn_history: self.turn_history,
            player: self.player.definition,
            opponent: self.opponent.definition,
        }
    }
}
