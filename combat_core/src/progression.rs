//! Applying encounter rewards to the actor between encounters

use crate::action::Consumable;
use crate::actor::Actor;
use crate::encounter::{EncounterOutcome, Rewards};
use serde::{Deserialize, Serialize};
use tracing::info;

/// XP needed for each level
pub const XP_PER_LEVEL: u32 = 100;

/// Levels from this one on no longer grant skill points
pub const SKILL_POINT_LEVEL_CAP: u32 = 10;

/// What applying rewards changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionReport {
    pub levels_gained: u32,
    pub level: u32,
    pub skill_points_gained: u32,
    pub gold: u32,
    /// Reported for achievement/bounty collaborators, never tracked here
    pub kills: u32,
    pub boss_defeats: Vec<String>,
}

/// Raise the actor one level: +10 max health, +2 damage, +1 defense, full heal.
/// Grants a skill point while below `SKILL_POINT_LEVEL_CAP`.
pub fn level_up(actor: &mut Actor) {
    actor.level += 1;
    if actor.level < SKILL_POINT_LEVEL_CAP {
        actor.skill_points += 1;
    }
    actor.base.max_health += 10;
    actor.base.damage += 2;
    actor.base.defense += 1;
    actor.restore_full_health();
}

/// Apply victory rewards: gold, potions, artifacts, materials and XP
pub fn apply_rewards(actor: &mut Actor, rewards: &Rewards) -> ProgressionReport {
    actor.gold = actor.gold.saturating_add(rewards.gold);
    actor.add_item(Consumable::HealthPotion, rewards.potions);
    actor.artifacts.extend(rewards.artifacts.iter().cloned());
    actor.materials.extend(rewards.materials.iter().cloned());

    actor.xp = actor.xp.saturating_add(rewards.xp);
    let points_before = actor.skill_points;
    let mut levels_gained = 0;
    while actor.xp >= XP_PER_LEVEL {
        actor.xp -= XP_PER_LEVEL;
        level_up(actor);
        levels_gained += 1;
    }
    // New artifacts may raise max health without a level up
    actor.clamp_health();

    if levels_gained > 0 {
        info!(actor = %actor.name, level = actor.level, levels_gained, "level up");
    }

    ProgressionReport {
        levels_gained,
        level: actor.level,
        skill_points_gained: actor.skill_points - points_before,
        gold: actor.gold,
        kills: rewards.kills,
        boss_defeats: rewards.boss_defeats.clone(),
    }
}

/// Apply an outcome; only victories carry rewards
pub fn apply_outcome(actor: &mut Actor, outcome: &EncounterOutcome) -> Option<ProgressionReport> {
    outcome.rewards().map(|rewards| apply_rewards(actor, rewards))
}
