//! Battle configuration.

/// Energy recovered by resting, before the max-energy cap.
pub const REST_ENERGY: i32 = 5;

/// Configuration for a seeded battle.
#[derive(Debug, Clone)]
pub struct BattleConfig {
    /// RNG seed for deterministic battles.
    pub seed: u64,
    /// Display ordinal of this fight, echoed in the outcome.
    pub fight_number: u32,
    /// Turn cap for autoplay.
    pub max_turns: u32,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            fight_number: 1,
            max_turns: 100,
        }
    }
}

impl BattleConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the fight ordinal.
    pub fn with_fight_number(mut self, fight_number: u32) -> Self {
        self.fight_number = fight_number;
        self
    }

    /// Set the autoplay turn cap.
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }
}
