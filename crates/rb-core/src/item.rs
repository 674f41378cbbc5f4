use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of one item instance inside an [`Inventory`](crate::Inventory).
///
/// IDs are assigned on insertion and never reused by the same inventory, so
/// two copies of the same catalog item are still distinct instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The kind of an item, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Used to attack.
    Weapon,
    /// Passive stat bonuses while held.
    Gear,
    /// Single-use battle effect.
    Consumable,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weapon => write!(f, "weapon"),
            Self::Gear => write!(f, "gear"),
            Self::Consumable => write!(f, "consumable"),
        }
    }
}

/// Any item a combatant can carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Item {
    /// A weapon used in attacks.
    Weapon(Weapon),
    /// Equipment providing passive bonuses.
    Gear(Gear),
    /// A single-use item.
    Consumable(Consumable),
}

impl Item {
    /// The item's name, shared by every variant.
    pub fn name(&self) -> &str {
        match self {
            Self::Weapon(w) => &w.name,
            Self::Gear(g) => &g.name,
            Self::Consumable(c) => &c.name,
        }
    }

    /// Item names that must be held (and are consumed) to use this item.
    pub fn requirements(&self) -> &[String] {
        match self {
            Self::Weapon(w) => &w.requirements,
            Self::Gear(g) => &g.requirements,
            Self::Consumable(c) => &c.requirements,
        }
    }

    /// The minimum level at which the item becomes available.
    pub fn level(&self) -> u32 {
        match self {
            Self::Weapon(w) => w.level,
            Self::Gear(g) => g.level,
            Self::Consumable(c) => c.level,
        }
    }

    /// The shop price of the item.
    pub fn cost(&self) -> u32 {
        match self {
            Self::Weapon(w) => w.cost,
            Self::Gear(g) => g.cost,
            Self::Consumable(c) => c.cost,
        }
    }

    /// The kind of this item.
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Weapon(_) => ItemKind::Weapon,
            Self::Gear(_) => ItemKind::Gear,
            Self::Consumable(_) => ItemKind::Consumable,
        }
    }

    /// Returns the weapon payload if this is a weapon.
    pub fn as_weapon(&self) -> Option<&Weapon> {
        match self {
            Self::Weapon(w) => Some(w),
            _ => None,
        }
    }

    /// Returns the gear payload if this is gear.
    pub fn as_gear(&self) -> Option<&Gear> {
        match self {
            Self::Gear(g) => Some(g),
            _ => None,
        }
    }

    /// Returns the consumable payload if this is a consumable.
    pub fn as_consumable(&self) -> Option<&Consumable> {
        match self {
            Self::Consumable(c) => Some(c),
            _ => None,
        }
    }
}

impl From<Weapon> for Item {
    fn from(weapon: Weapon) -> Self {
        Self::Weapon(weapon)
    }
}

impl From<Gear> for Item {
    fn from(gear: Gear) -> Self {
        Self::Gear(gear)
    }
}

impl From<Consumable> for Item {
    fn from(consumable: Consumable) -> Self {
        Self::Consumable(consumable)
    }
}

fn one() -> i32 {
    1
}

fn full_accuracy() -> i32 {
    100
}

/// A weapon that can be used to attack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    /// Display name, also used for requirement lookups.
    pub name: String,
    /// Minimum level to acquire.
    #[serde(default)]
    pub level: u32,
    /// Shop price.
    #[serde(default)]
    pub cost: u32,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Item names consumed on every attack with this weapon (e.g. ammunition).
    #[serde(default)]
    pub requirements: Vec<String>,
    /// Base damage before attack bonus and defence.
    #[serde(default = "one")]
    pub damage: i32,
    /// Energy spent per attack.
    #[serde(default = "one")]
    pub energy_cost: i32,
    /// Accuracy in percent, compared against the defender's dodge.
    #[serde(default = "full_accuracy")]
    pub accuracy: i32,
    /// Hands occupied while attacking.
    #[serde(default = "one")]
    pub hands: i32,
}

impl Weapon {
    /// Create a weapon with default stats (1 damage, 1 energy, 100 accuracy, 1 hand).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: 0,
            cost: 0,
            description: String::new(),
            requirements: Vec::new(),
            damage: 1,
            energy_cost: 1,
            accuracy: 100,
            hands: 1,
        }
    }

    /// Set the base damage.
    pub fn with_damage(mut self, damage: i32) -> Self {
        self.damage = damage;
        self
    }

    /// Set the energy cost per attack.
    pub fn with_energy_cost(mut self, energy_cost: i32) -> Self {
        self.energy_cost = energy_cost;
        self
    }

    /// Set the accuracy percentage.
    pub fn with_accuracy(mut self, accuracy: i32) -> Self {
        self.accuracy = accuracy;
        self
    }

    /// Set the number of hands needed.
    pub fn with_hands(mut self, hands: i32) -> Self {
        self.hands = hands;
        self
    }

    /// Add a required item name.
    pub fn with_requirement(mut self, requirement: impl Into<String>) -> Self {
        self.requirements.push(requirement.into());
        self
    }
}

/// Equipment that provides passive stat bonuses while held.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gear {
    /// Display name.
    pub name: String,
    /// Minimum level to acquire.
    pub level: u32,
    /// Shop price.
    pub cost: u32,
    /// Free-text description.
    pub description: String,
    /// Prerequisite item names.
    pub requirements: Vec<String>,
    /// Added to max health.
    pub health_bonus: i32,
    /// Added to max energy.
    pub energy_bonus: i32,
    /// Added to defence.
    pub defence_bonus: i32,
    /// Added to the attack percentage.
    pub attack_bonus: i32,
    /// Added to available hands.
    pub hands_bonus: i32,
    /// Added to dodge.
    pub dodge_bonus: i32,
    /// Percentage bonus to money rewards.
    pub money_bonus_percent: i32,
}

impl Gear {
    /// Create gear with no bonuses.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A single-use item applied during battle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Consumable {
    /// Display name, also the key for once-per-battle tracking.
    pub name: String,
    /// Minimum level to acquire.
    pub level: u32,
    /// Shop price.
    pub cost: u32,
    /// Free-text description.
    pub description: String,
    /// Prerequisite item names.
    pub requirements: Vec<String>,
    /// Health restored to the user.
    pub health_restore: i32,
    /// Energy restored to the user.
    pub energy_restore: i32,
    /// Defence added to the user for the rest of the battle.
    pub temp_defence: i32,
    /// Attack percentage added to the user for the rest of the battle.
    pub temp_attack: i32,
    /// Direct damage dealt to the opponent.
    pub damage: i32,
    /// Dodge removed from the opponent for the rest of the battle.
    pub enemy_dodge_reduction: i32,
}

impl Consumable {
    /// Create a consumable with no effects.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
