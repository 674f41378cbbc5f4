//! Turn-based combat engine for robot battles.
//!
//! Two fighters plan one action each per turn. The [`Battle`] orchestrator
//! resolves both in a random order drawn from an injected, seedable RNG, so a
//! battle replays identically from the same seed. Legality checks, hit and
//! damage math, and the greedy AI are plain functions over
//! [`FighterRuntime`].

pub mod action;
pub mod ai;
pub mod battle;
pub mod config;
pub mod error;
pub mod fighter;
pub mod math;
pub mod validate;

pub use action::{ActionResult, PlannedAction, Side};
pub use battle::{Battle, BattleLog, BattleOutcome, BattlePhase, TurnEntry, TurnSnapshot};
pub use config::{BattleConfig, REST_ENERGY};
pub use error::{ActionError, ValidationResult};
pub use fighter::FighterRuntime;
pub use validate::{AttackPlan, validate_action, validate_attack, validate_consumable};
