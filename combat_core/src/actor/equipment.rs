//! Equipment carried by the actor: weapon, armor pieces, artifacts

use crate::types::{Element, Rarity};
use serde::{Deserialize, Serialize};

/// Enchantment on a weapon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enchantment {
    pub level: u32,
}

impl Enchantment {
    /// Flat damage added per enchantment level
    pub const DAMAGE_PER_LEVEL: i32 = 3;

    pub fn damage_bonus(&self) -> i32 {
        self.level as i32 * Self::DAMAGE_PER_LEVEL
    }
}

/// Equipped weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub base_damage: i32,
    /// Element every hit with this weapon carries
    #[serde(default)]
    pub element: Option<Element>,
    /// Crit chance replacing the default (0.15 = 15%)
    #[serde(default)]
    pub crit_chance: Option<f64>,
    #[serde(default)]
    pub enchantment: Option<Enchantment>,
}

impl Weapon {
    pub fn new(name: &str, base_damage: i32) -> Self {
        Weapon {
            name: name.to_string(),
            base_damage,
            element: None,
            crit_chance: None,
            enchantment: None,
        }
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.element = Some(element);
        self
    }

    pub fn with_crit_chance(mut self, chance: f64) -> Self {
        self.crit_chance = Some(chance);
        self
    }

    pub fn with_enchantment(mut self, level: u32) -> Self {
        self.enchantment = Some(Enchantment { level });
        self
    }

    pub fn enchantment_bonus(&self) -> i32 {
        self.enchantment.map(|e| e.damage_bonus()).unwrap_or(0)
    }
}

/// A worn armor piece
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmorPiece {
    pub name: String,
    #[serde(default)]
    pub defense: i32,
    #[serde(default)]
    pub health_bonus: i32,
}

impl ArmorPiece {
    pub fn new(name: &str, defense: i32) -> Self {
        ArmorPiece {
            name: name.to_string(),
            defense,
            health_bonus: 0,
        }
    }

    pub fn with_health(mut self, health_bonus: i32) -> Self {
        self.health_bonus = health_bonus;
        self
    }
}

/// Passive trinket with flat modifiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub rarity: Rarity,
    #[serde(default)]
    pub damage_bonus: i32,
    #[serde(default)]
    pub defense_bonus: i32,
    #[serde(default)]
    pub health_bonus: i32,
    /// Fraction shaved off written cooldowns (0.10 = 10%)
    #[serde(default)]
    pub cooldown_reduction: f64,
}

impl Artifact {
    pub fn new(id: &str, name: &str, rarity: Rarity) -> Self {
        Artifact {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            rarity,
            damage_bonus: 0,
            defense_bonus: 0,
            health_bonus: 0,
            cooldown_reduction: 0.0,
        }
    }

    pub fn with_damage(mut self, bonus: i32) -> Self {
        self.damage_bonus = bonus;
        self
    }

    pub fn with_defense(mut self, bonus: i32) -> Self {
        self.defense_bonus = bonus;
        self
    }

    pub fn with_health(mut self, bonus: i32) -> Self {
        self.health_bonus = bonus;
        self
    }

    pub fn with_cooldown_reduction(mut self, reduction: f64) -> Self {
        self.cooldown_reduction = reduction;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enchantment_bonus() {
        let weapon = Weapon::new("Flame Tongue", 6).with_enchantment(2);
        assert_eq!(weapon.enchantment_bonus(), 6);
        assert_eq!(Weapon::new("Stick", 1).enchantment_bonus(), 0);
    }

    #[test]
    fn test_weapon_deserialize_defaults() {
        let weapon: Weapon = toml::from_str("name = \"Club\"\nbase_damage = 4").unwrap();
        assert_eq!(weapon.element, None);
        assert_eq!(weapon.crit_chance, None);
    }
}
