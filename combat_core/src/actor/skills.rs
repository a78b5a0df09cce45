//! Passive skills and prestige tier

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A learned passive skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassiveSkill {
    /// +2 damage per level
    Might,
    /// +1 defense per level
    Toughness,
    /// +10 max health per level
    Vitality,
    /// Cooldown decrement +X% per level
    Haste,
    /// +0.02 crit chance per level
    Precision,
    /// +3 luck points per level
    Fortune,
    /// +0.03 lifesteal per level
    Vampirism,
}

impl PassiveSkill {
    pub fn all() -> &'static [PassiveSkill] {
        &[
            PassiveSkill::Might,
            PassiveSkill::Toughness,
            PassiveSkill::Vitality,
            PassiveSkill::Haste,
            PassiveSkill::Precision,
            PassiveSkill::Fortune,
            PassiveSkill::Vampirism,
        ]
    }

    /// Bonus per level; Haste is expressed in percent
    pub fn per_level(&self) -> f64 {
        match self {
            PassiveSkill::Might => 2.0,
            PassiveSkill::Toughness => 1.0,
            PassiveSkill::Vitality => 10.0,
            PassiveSkill::Haste => 10.0,
            PassiveSkill::Precision => 0.02,
            PassiveSkill::Fortune => 3.0,
            PassiveSkill::Vampirism => 0.03,
        }
    }
}

/// Learned passive skills and their levels
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassiveSkills {
    levels: HashMap<PassiveSkill, u32>,
}

impl PassiveSkills {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, skill: PassiveSkill, level: u32) -> Self {
        self.set_level(skill, level);
        self
    }

    pub fn level(&self, skill: PassiveSkill) -> u32 {
        self.levels.get(&skill).copied().unwrap_or(0)
    }

    pub fn set_level(&mut self, skill: PassiveSkill, level: u32) {
        if level == 0 {
            self.levels.remove(&skill);
        } else {
            self.levels.insert(skill, level);
        }
    }

    /// Monotonic bonus for a skill at its current level
    pub fn bonus(&self, skill: PassiveSkill) -> f64 {
        self.level(skill) as f64 * skill.per_level()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PassiveSkill, &u32)> {
        self.levels.iter()
    }
}

/// Permanent progression tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prestige {
    pub tier: u32,
}

impl Prestige {
    pub fn new(tier: u32) -> Self {
        Prestige { tier }
    }

    pub fn damage_bonus(&self) -> i32 {
        self.tier as i32 * 3
    }

    pub fn defense_bonus(&self) -> i32 {
        self.tier as i32
    }

    pub fn health_bonus(&self) -> i32 {
        self.tier as i32 * 15
    }

    pub fn luck_points(&self) -> i32 {
        self.tier as i32
    }
}
