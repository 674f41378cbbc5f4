//! Error types for the combat engine.

use rb_core::ItemId;

/// Reasons an action can be rejected.
///
/// Every variant is recoverable: the caller re-prompts a human or falls back
/// to resting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// The action has no usable target (e.g. an attack with no weapons).
    #[error("{0}")]
    InvalidAction(String),

    /// The selected weapons need more hands than the fighter has.
    #[error("Not enough hands (need {needed}, have {available})")]
    InsufficientHands {
        /// Hands needed by the selection.
        needed: i32,
        /// Effective hands of the fighter.
        available: i32,
    },

    /// The selected weapons cost more energy than the fighter has left.
    #[error("Not enough energy (need {needed}, have {available})")]
    InsufficientEnergy {
        /// Energy needed by the selection.
        needed: i32,
        /// Current energy of the fighter.
        available: i32,
    },

    /// A weapon's prerequisite item is not in the inventory.
    #[error("{weapon} requires {requirement}")]
    MissingRequirement {
        /// The weapon that cannot be used.
        weapon: String,
        /// The missing item name.
        requirement: String,
    },

    /// The same weapon instance was selected more than once.
    #[error("You can only use each weapon once per attack ({0} selected twice)")]
    DuplicateWeapon(ItemId),

    /// A consumable with this name was already used in this battle.
    #[error("Already used {0} this battle")]
    AlreadyUsed(String),

    /// The referenced item is not in the fighter's inventory.
    #[error("Don't have item {0}")]
    NotOwned(ItemId),

    /// The battle already has a winner.
    #[error("The battle is already over")]
    BattleOver,
}

/// Convenience result type for validation.
pub type ValidationResult<T> = Result<T, ActionError>;
