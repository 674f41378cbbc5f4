use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::inventory::Inventory;
use crate::item::Gear;

fn default_health() -> i32 {
    10
}

fn default_energy() -> i32 {
    20
}

fn default_hands() -> i32 {
    2
}

fn default_level() -> u32 {
    1
}

/// A combatant's base stats and inventory, owned by the caller.
///
/// Effective stats are derived on every call by summing the bonuses of the
/// gear currently held; nothing is cached, because inventory can change
/// between calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantDefinition {
    /// Display name.
    pub name: String,
    /// Base maximum health.
    #[serde(default = "default_health")]
    pub health: i32,
    /// Base maximum energy.
    #[serde(default = "default_energy")]
    pub energy: i32,
    /// Base flat damage reduction.
    #[serde(default)]
    pub defence: i32,
    /// Base attack bonus in percent.
    #[serde(default)]
    pub attack: i32,
    /// Base number of hands.
    #[serde(default = "default_hands")]
    pub hands: i32,
    /// Base dodge, subtracted from attacker accuracy.
    #[serde(default)]
    pub dodge: i32,
    /// Progression level.
    #[serde(default = "default_level")]
    pub level: u32,
    /// Items carried into battle.
    #[serde(default)]
    pub inventory: Inventory,
}

impl CombatantDefinition {
    /// Create a combatant with default stats and an empty inventory.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            health: default_health(),
            energy: default_energy(),
            defence: 0,
            attack: 0,
            hands: default_hands(),
            dodge: 0,
            level: default_level(),
            inventory: Inventory::new(),
        }
    }

    /// Set base maximum health.
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self
    }

    /// Set base maximum energy.
    pub fn with_energy(mut self, energy: i32) -> Self {
        self.energy = energy;
        self
    }

    /// Set base defence.
    pub fn with_defence(mut self, defence: i32) -> Self {
        self.defence = defence;
        self
    }

    /// Set base attack percentage.
    pub fn with_attack(mut self, attack: i32) -> Self {
        self.attack = attack;
        self
    }

    /// Set base hands.
    pub fn with_hands(mut self, hands: i32) -> Self {
        self.hands = hands;
        self
    }

    /// Set base dodge.
    pub fn with_dodge(mut self, dodge: i32) -> Self {
        self.dodge = dodge;
        self
    }

    /// Parse a definition from JSON and validate it.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let definition: Self = serde_json::from_str(json)?;
        definition.validate()?;
        Ok(definition)
    }

    /// Check that the definition is usable in battle.
    pub fn validate(&self) -> CoreResult<()> {
        let invalid = |reason: String| CoreError::InvalidDefinition {
            name: self.name.clone(),
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name is empty".to_string()));
        }
        for (stat, value) in [
            ("health", self.health),
            ("energy", self.energy),
            ("defence", self.defence),
            ("hands", self.hands),
            ("dodge", self.dodge),
        ] {
            if value < 0 {
                return Err(invalid(format!("{stat} is negative ({value})")));
            }
        }
        if let Some((_, weapon)) = self.inventory.weapons().find(|(_, w)| w.hands <= 0) {
            return Err(invalid(format!(
                "weapon '{}' must need at least one hand",
                weapon.name
            )));
        }
        Ok(())
    }

    fn gear_sum(&self, bonus: impl Fn(&Gear) -> i32) -> i32 {
        self.inventory.gear().map(|(_, g)| bonus(g)).sum()
    }

    /// Max health including gear bonuses.
    pub fn effective_max_health(&self) -> i32 {
        self.health + self.gear_sum(|g| g.health_bonus)
    }

    /// Max energy including gear bonuses.
    pub fn effective_max_energy(&self) -> i32 {
        self.energy + self.gear_sum(|g| g.energy_bonus)
    }

    /// Defence including gear bonuses.
    pub fn effective_defence(&self) -> i32 {
        self.defence + self.gear_sum(|g| g.defence_bonus)
    }

    /// Dodge including gear bonuses.
    pub fn effective_dodge(&self) -> i32 {
        self.dodge + self.gear_sum(|g| g.dodge_bonus)
    }

    /// Attack percentage including gear bonuses.
    pub fn effective_attack(&self) -> i32 {
        self.attack + self.gear_sum(|g| g.attack_bonus)
    }

    /// Hands including gear bonuses.
    pub fn effective_hands(&self) -> i32 {
        self.hands + self.gear_sum(|g| g.hands_bonus)
    }

    /// Total money bonus percentage from gear.
    pub fn money_bonus_percent(&self) -> i32 {
        self.gear_sum(|g| g.money_bonus_percent)
    }

    /// Returns true if any held item has exactly this name.
    pub fn has_item(&self, name: &str) -> bool {
        self.inventory.has_item(name)
    }
}
