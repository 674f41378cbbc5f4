//! Narrative log and per-turn health history.

use serde::Serialize;

/// Append-only battle narrative with a view of the current and last turn.
#[derive(Debug, Clone, Default)]
pub struct BattleLog {
    full: Vec<String>,
    current_turn: Vec<String>,
    last_turn: Vec<String>,
}

impl BattleLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line to the full log and the current turn.
    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        self.current_turn.push(line.clone());
        self.full.push(line);
    }

    /// Every line since the battle started.
    pub fn full(&self) -> &[String] {
        &self.full
    }

    /// Lines written since the last turn boundary.
    pub fn current_turn(&self) -> &[String] {
        &self.current_turn
    }

    /// Lines of the previous completed turn.
    pub fn last_turn(&self) -> &[String] {
        &self.last_turn
    }

    /// Move the current turn into `last_turn` and start a fresh one.
    pub fn end_turn(&mut self) {
        self.last_turn = std::mem::take(&mut self.current_turn);
    }

    /// Number of lines in the full log.
    pub fn len(&self) -> usize {
        self.full.len()
    }

    /// Returns true if nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.full.is_empty()
    }

    /// Consume the log, returning every line.
    pub fn into_full(self) -> Vec<String> {
        self.full
    }
}

/// Health of both sides at the end of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TurnSnapshot {
    /// The turn this snapshot closes.
    pub turn: u32,
    /// Player health after the turn.
    pub player_hp: i32,
    /// Player effective max health.
    pub player_max_hp: i32,
    /// Opponent health after the turn.
    pub opponent_hp: i32,
    /// Opponent effective max health.
    pub opponent_max_hp: i32,
}
