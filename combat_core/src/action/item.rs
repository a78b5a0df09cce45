//! Consumable items

use crate::types::Element;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Consumable {
    HealthPotion,
    GreaterPotion,
    FireBomb,
}

/// What using an item does
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemEffect {
    Heal(i32),
    /// Thrown at one foe through the elemental and defense pipeline
    Bomb {
        damage: f64,
        element: Element,
        burn_turns: u32,
    },
}

impl Consumable {
    pub fn all() -> &'static [Consumable] {
        &[
            Consumable::HealthPotion,
            Consumable::GreaterPotion,
            Consumable::FireBomb,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Consumable::HealthPotion => "Health Potion",
            Consumable::GreaterPotion => "Greater Potion",
            Consumable::FireBomb => "Fire Bomb",
        }
    }

    pub fn effect(&self) -> ItemEffect {
        match self {
            Consumable::HealthPotion => ItemEffect::Heal(30),
            Consumable::GreaterPotion => ItemEffect::Heal(60),
            Consumable::FireBomb => ItemEffect::Bomb {
                damage: 25.0,
                element: Element::Fire,
                burn_turns: 2,
            },
        }
    }

    pub fn needs_target(&self) -> bool {
        matches!(self.effect(), ItemEffect::Bomb { .. })
    }
}
