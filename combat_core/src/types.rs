//! Core types shared across the combat engine

use serde::{Deserialize, Serialize};

/// Elemental tag carried by weapons, abilities and foe affinities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Fire,
    Ice,
    Lightning,
    Holy,
    Shadow,
}

impl Element {
    /// Get all elements
    pub fn all() -> &'static [Element] {
        &[
            Element::Fire,
            Element::Ice,
            Element::Lightning,
            Element::Holy,
            Element::Shadow,
        ]
    }
}

/// Ambient condition fixed for the whole encounter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    #[default]
    Clear,
    Rain,
    Storm,
    Snow,
    Heatwave,
    Eclipse,
}

impl Weather {
    /// Get all weather conditions
    pub fn all() -> &'static [Weather] {
        &[
            Weather::Clear,
            Weather::Rain,
            Weather::Storm,
            Weather::Snow,
            Weather::Heatwave,
            Weather::Eclipse,
        ]
    }

    /// Multiplier applied to elemental damage under this weather
    pub fn element_modifier(&self, element: Element) -> f64 {
        match (self, element) {
            (Weather::Rain, Element::Fire) => 0.75,
            (Weather::Rain, Element::Lightning) => 1.25,
            (Weather::Storm, Element::Lightning) => 1.5,
            (Weather::Snow, Element::Fire) => 0.9,
            (Weather::Snow, Element::Ice) => 1.25,
            (Weather::Heatwave, Element::Fire) => 1.25,
            (Weather::Heatwave, Element::Ice) => 0.75,
            (Weather::Eclipse, Element::Holy) => 0.8,
            (Weather::Eclipse, Element::Shadow) => 1.25,
            _ => 1.0,
        }
    }
}

/// Combat posture, each with a damage/defense multiplier pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stance {
    #[default]
    Balanced,
    Offensive,
    Defensive,
    Counter,
}

impl Stance {
    pub fn damage_multiplier(&self) -> f64 {
        match self {
            Stance::Offensive => 1.3,
            Stance::Defensive => 0.7,
            Stance::Balanced | Stance::Counter => 1.0,
        }
    }

    pub fn defense_multiplier(&self) -> f64 {
        match self {
            Stance::Offensive => 0.8,
            Stance::Defensive => 1.5,
            Stance::Balanced | Stance::Counter => 1.0,
        }
    }
}

/// Base character class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    #[default]
    Warrior,
    Mage,
    Rogue,
    Berserker,
    Assassin,
}

impl ClassKind {
    pub fn all() -> &'static [ClassKind] {
        &[
            ClassKind::Warrior,
            ClassKind::Mage,
            ClassKind::Rogue,
            ClassKind::Berserker,
            ClassKind::Assassin,
        ]
    }

    pub fn damage_bonus(&self) -> i32 {
        match self {
            ClassKind::Warrior => 2,
            ClassKind::Mage => 10,
            ClassKind::Berserker => 3,
            ClassKind::Rogue | ClassKind::Assassin => 0,
        }
    }

    pub fn health_bonus(&self) -> i32 {
        match self {
            ClassKind::Warrior => 20,
            ClassKind::Mage => -5,
            ClassKind::Berserker => 10,
            ClassKind::Rogue | ClassKind::Assassin => 0,
        }
    }

    /// Fraction by which written cooldowns are shortened
    pub fn cooldown_reduction(&self) -> f64 {
        match self {
            ClassKind::Rogue | ClassKind::Assassin => 0.15,
            _ => 0.0,
        }
    }

    /// Whether the ×1.5 damage rule below half health applies
    pub fn has_low_health_rule(&self) -> bool {
        matches!(self, ClassKind::Berserker)
    }
}

/// Multiclass combination unlocked by the progression layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HybridClass {
    /// Warrior + Mage
    Spellblade,
    /// Rogue + Assassin
    Nightblade,
    /// Warrior + Berserker
    Warlord,
    /// Mage + Berserker
    Bloodmage,
}

impl HybridClass {
    pub fn all() -> &'static [HybridClass] {
        &[
            HybridClass::Spellblade,
            HybridClass::Nightblade,
            HybridClass::Warlord,
            HybridClass::Bloodmage,
        ]
    }

    /// The two base classes this hybrid combines
    pub fn parents(&self) -> (ClassKind, ClassKind) {
        match self {
            HybridClass::Spellblade => (ClassKind::Warrior, ClassKind::Mage),
            HybridClass::Nightblade => (ClassKind::Rogue, ClassKind::Assassin),
            HybridClass::Warlord => (ClassKind::Warrior, ClassKind::Berserker),
            HybridClass::Bloodmage => (ClassKind::Mage, ClassKind::Berserker),
        }
    }

    pub fn damage_bonus(&self) -> i32 {
        match self {
            HybridClass::Spellblade => 4,
            _ => 0,
        }
    }

    pub fn crit_chance_bonus(&self) -> f64 {
        match self {
            HybridClass::Spellblade => 0.05,
            HybridClass::Nightblade => 0.08,
            _ => 0.0,
        }
    }

    /// Crit multiplier replacing the configured default, if any
    pub fn crit_multiplier(&self) -> Option<f64> {
        match self {
            HybridClass::Nightblade => Some(2.5),
            _ => None,
        }
    }

    pub fn parry_bonus(&self) -> f64 {
        match self {
            HybridClass::Warlord => 0.05,
            _ => 0.0,
        }
    }

    /// Fraction of dealt damage healed on every hit
    pub fn lifesteal(&self) -> f64 {
        match self {
            HybridClass::Bloodmage => 0.10,
            _ => 0.0,
        }
    }

    /// Fraction of dealt damage healed when the hit kills
    pub fn on_kill_heal(&self) -> f64 {
        match self {
            HybridClass::Warlord => 0.10,
            _ => 0.0,
        }
    }

    pub fn has_low_health_rule(&self) -> bool {
        let (a, b) = self.parents();
        a.has_low_health_rule() || b.has_low_health_rule()
    }
}

/// Armor slot on the actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorSlot {
    Helmet,
    BodyArmour,
    Gloves,
    Boots,
    Shield,
}

impl ArmorSlot {
    /// Get all armor slots
    pub fn all() -> &'static [ArmorSlot] {
        &[
            ArmorSlot::Helmet,
            ArmorSlot::BodyArmour,
            ArmorSlot::Gloves,
            ArmorSlot::Boots,
            ArmorSlot::Shield,
        ]
    }
}

/// Loot rarity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
}
