//! Encounter outcome and reward resolution

use crate::actor::Artifact;
use crate::config::{ArtifactPool, RewardConstants};
use crate::foe::Foe;
use crate::types::Rarity;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Crafting material dropped by a defeated foe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Material {
    /// Captured soul of the named foe
    Soul { foe: String },
}

/// Everything a victory hands to the progression layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rewards {
    pub kills: u32,
    /// Names of boss-tier foes defeated
    pub boss_defeats: Vec<String>,
    pub gold: u32,
    pub xp: u32,
    pub materials: Vec<Material>,
    /// Health potions dropped
    pub potions: u32,
    pub artifacts: Vec<Artifact>,
}

/// Terminal result of an encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum EncounterOutcome {
    Victory(Rewards),
    /// No rewards
    Defeat,
    /// Neither victory nor defeat, no rewards
    Fled,
    /// An engine invariant broke and the encounter was stopped
    Aborted { reason: String },
}

impl EncounterOutcome {
    pub fn rewards(&self) -> Option<&Rewards> {
        match self {
            EncounterOutcome::Victory(rewards) => Some(rewards),
            _ => None,
        }
    }

    pub fn is_victory(&self) -> bool {
        matches!(self, EncounterOutcome::Victory(_))
    }
}

/// Roll loot rarity; bosses are weighted toward better drops
pub fn roll_rarity(boss: bool, rng: &mut impl Rng) -> Rarity {
    let (common, rare) = if boss { (0.3, 0.5) } else { (0.7, 0.25) };
    let roll: f64 = rng.gen();
    if roll < common {
        Rarity::Common
    } else if roll < common + rare {
        Rarity::Rare
    } else {
        Rarity::Epic
    }
}

/// Roll rewards for every foe in the roster
pub fn roll_rewards(
    foes: &[Foe],
    luck: f64,
    constants: &RewardConstants,
    pool: &ArtifactPool,
    rng: &mut impl Rng,
) -> Rewards {
    let mut rewards = Rewards::default();
    let soul_chance = (constants.soul_capture_base + luck).clamp(0.0, 1.0);
    let (gold_min, gold_max) = (
        constants.gold_min.min(constants.gold_max),
        constants.gold_max.max(constants.gold_min),
    );

    for foe in foes {
        rewards.kills += 1;

        let mut gold = rng.gen_range(gold_min..=gold_max);
        if foe.boss {
            gold = gold.saturating_mul(constants.boss_gold_multiplier);
            rewards.boss_defeats.push(foe.name.clone());
            rewards.xp += constants.xp_per_boss;
        } else {
            rewards.xp += constants.xp_per_foe;
        }
        rewards.gold = rewards.gold.saturating_add(gold);

        if rng.gen::<f64>() < soul_chance {
            rewards.materials.push(Material::Soul {
                foe: foe.name.clone(),
            });
        }

        let rarity = roll_rarity(foe.boss, rng);
        if rng.gen::<f64>() < constants.potion_drop_chance {
            rewards.potions += 1;
        }
        if rng.gen::<f64>() < constants.artifact_drop_chance {
            if let Some(artifact) = pool.of_rarity(rarity).choose(rng) {
                rewards.artifacts.push((*artifact).clone());
            }
        }
    }

    debug!(
        kills = rewards.kills,
        gold = rewards.gold,
        xp = rewards.xp,
        "rewards rolled"
    );
    rewards
}
