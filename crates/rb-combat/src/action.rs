//! Plannable actions and their results.

use std::fmt;

use serde::{Deserialize, Serialize};

use rb_core::ItemId;

use crate::error::ActionError;

/// Which side of the battle a fighter is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The human-controlled (or suggested) fighter.
    Player,
    /// The autonomous opponent.
    Opponent,
}

impl Side {
    /// The other side.
    pub fn other(self) -> Self {
        match self {
            Self::Player => Self::Opponent,
            Self::Opponent => Self::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::Opponent => write!(f, "opponent"),
        }
    }
}

/// An action chosen for one side, resolved when the turn resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlannedAction {
    /// Attack with the given weapon instances, in order.
    Attack {
        /// Inventory IDs of the weapons to fire.
        weapons: Vec<ItemId>,
    },
    /// Recover energy.
    Rest,
    /// Use a consumable from the inventory.
    UseConsumable {
        /// Inventory ID of the consumable.
        item: ItemId,
    },
}

impl PlannedAction {
    /// Attack with the given weapons.
    pub fn attack(weapons: impl IntoIterator<Item = ItemId>) -> Self {
        Self::Attack {
            weapons: weapons.into_iter().collect(),
        }
    }

    /// Use the given consumable.
    pub fn use_consumable(item: ItemId) -> Self {
        Self::UseConsumable { item }
    }
}

impl fmt::Display for PlannedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attack { weapons } => {
                let ids: Vec<String> = weapons.iter().map(ItemId::to_string).collect();
                write!(f, "Attack with [{}]", ids.join(", "))
            }
            Self::Rest => write!(f, "Rest"),
            Self::UseConsumable { item } => write!(f, "Use {item}"),
        }
    }
}

/// The outcome of planning or executing an action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionResult {
    /// Whether the action was accepted.
    pub success: bool,
    /// Narrative summary, or the rejection reason.
    pub message: String,
    /// Total damage dealt to the opponent.
    pub damage_dealt: i32,
    /// Energy spent by the actor.
    pub energy_spent: i32,
    /// Whether the action uses up the actor's turn.
    pub turn_ended: bool,
    /// The rejection reason, set exactly when `success` is false.
    #[serde(skip)]
    pub failure: Option<ActionError>,
}

impl ActionResult {
    /// A successful result with no damage or energy accounting.
    pub fn ok(message: impl Into<String>, turn_ended: bool) -> Self {
        Self {
            success: true,
            message: message.into(),
            damage_dealt: 0,
            energy_spent: 0,
            turn_ended,
            failure: None,
        }
    }

    /// A rejected action. Nothing was mutated.
    pub fn rejected(error: ActionError) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            damage_dealt: 0,
            energy_spent: 0,
            turn_ended: false,
            failure: Some(error),
        }
    }
}

impl From<ActionError> for ActionResult {
    fn from(error: ActionError) -> Self {
        Self::rejected(error)
    }
}
