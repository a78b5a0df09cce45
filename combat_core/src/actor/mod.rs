//! Actor - the single player-controlled combatant
//!
//! The actor is borrowed mutably by an encounter for its whole duration and
//! handed back afterwards with every change (health, cooldowns, consumables,
//! ultimate charge) applied in place.

mod companion;
mod equipment;
mod skills;

pub use companion::{Companion, CompanionBonus};
pub use equipment::{ArmorPiece, Artifact, Enchantment, Weapon};
pub use skills::{PassiveSkill, PassiveSkills, Prestige};

use crate::action::{abilities_for, AbilityId, Consumable};
use crate::encounter::Material;
use crate::ledger::EffectLedger;
use crate::stats;
use crate::types::{ArmorSlot, ClassKind, HybridClass, Stance};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unmodified base stats, before class, gear and skills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub damage: i32,
    pub defense: i32,
    pub max_health: i32,
}

impl Default for BaseStats {
    fn default() -> Self {
        BaseStats {
            damage: 10,
            defense: 2,
            max_health: 100,
        }
    }
}

/// Per-encounter combat state
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatState {
    /// Ultimate resource, capped by `UltimateConstants::max_charge`.
    /// Carried over between encounters.
    pub ultimate_charge: u32,
    /// Consecutive basic strikes
    pub combo: u32,
    /// The next incoming foe hit is avoided
    pub dodge_next: bool,
    /// Multiplier consumed by the next basic strike
    pub next_strike_multiplier: Option<f64>,
}

impl CombatState {
    /// Clear everything that must not leak between encounters
    pub fn reset_transient(&mut self) {
        self.combo = 0;
        self.dodge_next = false;
        self.next_strike_multiplier = None;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    pub class: ClassKind,
    #[serde(default)]
    pub hybrid: Option<HybridClass>,
    #[serde(default)]
    pub base: BaseStats,
    health: i32,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub xp: u32,
    /// Earned on level up, spent outside combat on passive skills
    #[serde(default)]
    pub skill_points: u32,
    #[serde(default)]
    pub gold: u32,
    #[serde(default)]
    pub weapon: Option<Weapon>,
    #[serde(default)]
    pub armor: HashMap<ArmorSlot, ArmorPiece>,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
    #[serde(default)]
    pub companion: Option<Companion>,
    #[serde(default)]
    pub stance: Stance,
    #[serde(default)]
    pub prestige: Prestige,
    #[serde(default)]
    pub skills: PassiveSkills,
    #[serde(default)]
    pub inventory: HashMap<Consumable, u32>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub ledger: EffectLedger,
    #[serde(default)]
    pub combat: CombatState,
}

impl Actor {
    /// Create a level 1 actor at full health
    pub fn new(name: &str, class: ClassKind) -> Self {
        let mut actor = Actor {
            name: name.to_string(),
            class,
            hybrid: None,
            base: BaseStats::default(),
            health: 0,
            level: 1,
            xp: 0,
            skill_points: 0,
            gold: 0,
            weapon: None,
            armor: HashMap::new(),
            artifacts: Vec::new(),
            companion: None,
            stance: Stance::default(),
            prestige: Prestige::default(),
            skills: PassiveSkills::default(),
            inventory: HashMap::new(),
            materials: Vec::new(),
            ledger: EffectLedger::default(),
            combat: CombatState::default(),
        };
        actor.restore_full_health();
        actor
    }

    pub fn with_base(mut self, base: BaseStats) -> Self {
        self.base = base;
        self.restore_full_health();
        self
    }

    pub fn with_hybrid(mut self, hybrid: HybridClass) -> Self {
        self.hybrid = Some(hybrid);
        self.restore_full_health();
        self
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = Some(weapon);
        self
    }

    pub fn with_armor(mut self, slot: ArmorSlot, piece: ArmorPiece) -> Self {
        self.armor.insert(slot, piece);
        self.restore_full_health();
        self
    }

    pub fn with_artifact(mut self, artifact: Artifact) -> Self {
        self.artifacts.push(artifact);
        self.restore_full_health();
        self
    }

    pub fn with_companion(mut self, companion: Companion) -> Self {
        self.companion = Some(companion);
        self.restore_full_health();
        self
    }

    pub fn with_skill(mut self, skill: PassiveSkill, level: u32) -> Self {
        self.skills.set_level(skill, level);
        self.restore_full_health();
        self
    }

    pub fn with_prestige(mut self, tier: u32) -> Self {
        self.prestige = Prestige::new(tier);
        self.restore_full_health();
        self
    }

    pub fn with_item(mut self, item: Consumable, count: u32) -> Self {
        self.add_item(item, count);
        self
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        stats::effective_max_health(self)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Set health, clamped to [0, max health]
    pub fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, self.max_health());
    }

    pub fn restore_full_health(&mut self) {
        self.health = self.max_health();
    }

    /// Re-clamp after anything that may have lowered max health
    pub fn clamp_health(&mut self) {
        self.set_health(self.health);
    }

    /// Heal up to max health, returning the amount actually restored
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.set_health(self.health.saturating_add(amount.max(0)));
        self.health - before
    }

    /// Take damage down to zero, returning the amount actually lost
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.set_health(self.health.saturating_sub(amount.max(0)));
        before - self.health
    }

    /// Whether health is strictly below half of max health
    pub fn is_below_half_health(&self) -> bool {
        (self.health as f64) < self.max_health() as f64 / 2.0
    }

    /// Whether the ×1.5 low-health damage rule applies to this actor's classes
    pub fn has_low_health_rule(&self) -> bool {
        self.class.has_low_health_rule()
            || self.hybrid.map(|h| h.has_low_health_rule()).unwrap_or(false)
    }

    /// Abilities this actor may use
    pub fn abilities(&self) -> Vec<AbilityId> {
        abilities_for(self.class, self.hybrid)
    }

    pub fn knows(&self, ability: AbilityId) -> bool {
        self.abilities().contains(&ability)
    }

    pub fn item_count(&self, item: Consumable) -> u32 {
        self.inventory.get(&item).copied().unwrap_or(0)
    }

    pub fn add_item(&mut self, item: Consumable, count: u32) {
        if count > 0 {
            *self.inventory.entry(item).or_insert(0) += count;
        }
    }

    /// Remove one of an item, returning false if none were held
    pub fn consume_item(&mut self, item: Consumable) -> bool {
        match self.inventory.get_mut(&item) {
            Some(count) if *count > 0 => {
                *count -= 1;
                if *count == 0 {
                    self.inventory.remove(&item);
                }
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_actor_full_health() {
        let actor = Actor::new("Hero", ClassKind::Warrior);
        // 100 base + 20 warrior
        assert_eq!(actor.max_health(), 120);
        assert_eq!(actor.health(), 120);
    }

    #[test]
    fn test_health_clamped() {
        let mut actor = Actor::new("Hero", ClassKind::Rogue);
        assert_eq!(actor.take_damage(250), 100);
        assert_eq!(actor.health(), 0);
        assert!(!actor.is_alive());
        assert_eq!(actor.heal(500), 100);
        assert_eq!(actor.health(), 100);
    }

    #[test]
    fn test_clamp_after_max_health_drop() {
        let mut actor = Actor::new("Hero", ClassKind::Rogue).with_skill(PassiveSkill::Vitality, 2);
        assert_eq!(actor.health(), 120);
        actor.skills.set_level(PassiveSkill::Vitality, 0);
        actor.clamp_health();
        assert_eq!(actor.health(), 100);
    }

    #[test]
    fn test_consume_item() {
        let mut actor = Actor::new("Hero", ClassKind::Mage).with_item(Consumable::HealthPotion, 1);
        assert!(actor.consume_item(Consumable::HealthPotion));
        assert!(!actor.consume_item(Consumable::HealthPotion));
        assert_eq!(actor.item_count(Consumable::HealthPotion), 0);
    }

    #[test]
    fn test_low_health_rule() {
        assert!(Actor::new("A", ClassKind::Berserker).has_low_health_rule());
        assert!(!Actor::new("B", ClassKind::Mage).has_low_health_rule());
        assert!(Actor::new("C", ClassKind::Mage)
            .with_hybrid(HybridClass::Bloodmage)
            .has_low_health_rule());
    }

    #[test]
    fn test_reset_transient_keeps_charge() {
        let mut state = CombatState {
            ultimate_charge: 60,
            combo: 3,
            dodge_next: true,
            next_strike_multiplier: Some(1.5),
        };
        state.reset_transient();
        assert_eq!(state.ultimate_charge, 60);
        assert_eq!(state.combo, 0);
        assert!(!state.dodge_next);
    }
}
