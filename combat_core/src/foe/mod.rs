//! Foes - the opposing side of an encounter

mod affinity;
mod templates;

pub use affinity::{Affinity, RESISTANCE_MULTIPLIER, WEAKNESS_MULTIPLIER};
pub use templates::{BossRule, FoeKind, SKELETON_SUMMON_ATTACK};

use crate::error::InvariantViolation;
use crate::ledger::FoeStatus;
use crate::types::Element;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Foe {
    pub name: String,
    pub kind: FoeKind,
    health: i32,
    pub max_health: i32,
    /// Nominal attack before curse and actor defense
    pub attack: i32,
    /// Flat reduction applied to every actor hit
    #[serde(default)]
    pub defense: i32,
    #[serde(default)]
    pub boss: bool,
    #[serde(default)]
    pub affinity: Option<Affinity>,
    #[serde(default)]
    pub status: FoeStatus,
}

impl Foe {
    /// Spawn a foe from its template at full health
    pub fn spawn(kind: FoeKind) -> Self {
        let template = kind.template();
        Foe {
            name: template.name.to_string(),
            kind,
            health: template.max_health,
            max_health: template.max_health,
            attack: template.attack,
            defense: template.defense,
            boss: template.boss,
            affinity: template.affinity,
            status: FoeStatus::default(),
        }
    }

    /// An untemplated foe with no boss behaviour
    pub fn custom(name: &str, max_health: i32, attack: i32) -> Self {
        let max_health = max_health.max(1);
        Foe {
            name: name.to_string(),
            kind: FoeKind::Custom,
            health: max_health,
            max_health,
            attack,
            defense: 0,
            boss: false,
            affinity: None,
            status: FoeStatus::default(),
        }
    }

    pub fn with_defense(mut self, defense: i32) -> Self {
        self.defense = defense;
        self
    }

    pub fn with_affinity(mut self, affinity: Affinity) -> Self {
        self.affinity = Some(affinity);
        self
    }

    pub fn as_boss(mut self) -> Self {
        self.boss = true;
        self
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_below_half_health(&self) -> bool {
        (self.health as f64) < self.max_health as f64 / 2.0
    }

    /// Reduce health down to zero, returning the amount actually lost
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = self.health.saturating_sub(amount.max(0)).clamp(0, self.max_health);
        before - self.health
    }

    /// Set health to zero, returning the amount lost
    pub fn kill(&mut self) -> i32 {
        let before = self.health;
        self.health = 0;
        before
    }

    /// Affinity multiplier for an element (1.0 without affinity)
    pub fn affinity_multiplier(&self, element: Element) -> f64 {
        self.affinity
            .map(|a| a.multiplier(element))
            .unwrap_or(1.0)
    }

    pub fn boss_rule(&self) -> Option<BossRule> {
        self.kind.boss_rule()
    }

    /// Check health range and affinity for foes built outside the templates
    pub fn verify(&self) -> Result<(), InvariantViolation> {
        if let Some(affinity) = self.affinity {
            if affinity.weakness() == affinity.resistance() {
                return Err(InvariantViolation::WeaknessEqualsResistance {
                    foe: self.name.clone(),
                    element: affinity.weakness(),
                });
            }
        }
        if self.health < 0 || self.health > self.max_health {
            return Err(InvariantViolation::HealthOutOfRange {
                who: self.name.clone(),
                health: self.health,
                max: self.max_health,
            });
        }
        Ok(())
    }
}
