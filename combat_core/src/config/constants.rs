//! Game constants configuration

use serde::{Deserialize, Serialize};

/// Tunable game constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConstants {
    pub crit: CritConstants,
    pub initiative: InitiativeConstants,
    pub parry: ParryConstants,
    pub status: StatusConstants,
    pub ultimate: UltimateConstants,
    pub buffs: BuffConstants,
    pub sacrifice: SacrificeConstants,
    pub stats: StatConstants,
    pub rewards: RewardConstants,
    pub boss: BossConstants,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CritConstants {
    /// Crit chance when the weapon carries none (0.10 = 10%)
    #[serde(default = "default_crit_chance")]
    pub default_chance: f64,
    /// Damage multiplier on a critical hit
    #[serde(default = "default_crit_multiplier")]
    pub multiplier: f64,
    /// Crit chance added per consecutive basic strike
    #[serde(default = "default_combo_bonus")]
    pub combo_bonus: f64,
    #[serde(default = "default_max_combo")]
    pub max_combo: u32,
}

impl Default for CritConstants {
    fn default() -> Self {
        CritConstants {
            default_chance: default_crit_chance(),
            multiplier: default_crit_multiplier(),
            combo_bonus: default_combo_bonus(),
            max_combo: default_max_combo(),
        }
    }
}

fn default_crit_chance() -> f64 {
    0.10
}
fn default_crit_multiplier() -> f64 {
    2.0
}
fn default_combo_bonus() -> f64 {
    0.02
}
fn default_max_combo() -> u32 {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitiativeConstants {
    /// Probability the foes act first
    #[serde(default = "default_foe_first")]
    pub foe_first_chance: f64,
    /// Probability the foes act first when a boss is present
    #[serde(default = "default_boss_foe_first")]
    pub boss_foe_first_chance: f64,
}

impl Default for InitiativeConstants {
    fn default() -> Self {
        InitiativeConstants {
            foe_first_chance: default_foe_first(),
            boss_foe_first_chance: default_boss_foe_first(),
        }
    }
}

fn default_foe_first() -> f64 {
    0.35
}
fn default_boss_foe_first() -> f64 {
    0.50
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParryConstants {
    #[serde(default = "default_parry")]
    pub base_chance: f64,
    /// Parry chance while in Counter stance
    #[serde(default = "default_counter_parry")]
    pub counter_stance_chance: f64,
}

impl Default for ParryConstants {
    fn default() -> Self {
        ParryConstants {
            base_chance: default_parry(),
            counter_stance_chance: default_counter_parry(),
        }
    }
}

fn default_parry() -> f64 {
    0.05
}
fn default_counter_parry() -> f64 {
    0.15
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConstants {
    /// Damage per poison tick
    pub poison_damage: i32,
    /// Damage per burn tick
    pub burn_damage: i32,
    /// Fraction of nominal attack a cursed foe deals
    pub curse_attack_multiplier: f64,
}

impl Default for StatusConstants {
    fn default() -> Self {
        StatusConstants {
            poison_damage: 5,
            burn_damage: 7,
            curse_attack_multiplier: 0.7,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UltimateConstants {
    pub max_charge: u32,
    pub strike_charge: u32,
    pub ability_charge: u32,
    /// Multiple of effective damage dealt to every living foe
    pub damage_multiplier: f64,
    pub berserk_turns: u32,
    pub berserk_multiplier: f64,
}

impl Default for UltimateConstants {
    fn default() -> Self {
        UltimateConstants {
            max_charge: 100,
            strike_charge: 20,
            ability_charge: 10,
            damage_multiplier: 3.0,
            berserk_turns: 3,
            berserk_multiplier: 1.4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuffConstants {
    pub damage_buff_flat: i32,
    pub defense_buff_flat: i32,
    /// Flat defense granted by the IronForm transformation
    pub transformation_defense: i32,
}

impl Default for BuffConstants {
    fn default() -> Self {
        BuffConstants {
            damage_buff_flat: 10,
            defense_buff_flat: 5,
            transformation_defense: 8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SacrificeConstants {
    pub health_cost: i32,
    pub buff_turns: u32,
}

impl Default for SacrificeConstants {
    fn default() -> Self {
        SacrificeConstants {
            health_cost: 15,
            buff_turns: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatConstants {
    /// Damage multiplier below half health for classes with the low-health rule
    pub low_health_multiplier: f64,
    /// Maximum luck fraction
    pub luck_cap: f64,
    /// Maximum fraction cooldown reduction can shave off a written cooldown
    pub cooldown_reduction_cap: f64,
    /// Percent added to the cooldown decrement per Haste level
    pub haste_percent_per_level: f64,
}

impl Default for StatConstants {
    fn default() -> Self {
        StatConstants {
            low_health_multiplier: 1.5,
            luck_cap: 0.5,
            cooldown_reduction_cap: 0.9,
            haste_percent_per_level: 10.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConstants {
    pub gold_min: u32,
    pub gold_max: u32,
    pub boss_gold_multiplier: u32,
    pub xp_per_foe: u32,
    pub xp_per_boss: u32,
    pub soul_capture_base: f64,
    pub potion_drop_chance: f64,
    pub artifact_drop_chance: f64,
}

impl Default for RewardConstants {
    fn default() -> Self {
        RewardConstants {
            gold_min: 15,
            gold_max: 30,
            boss_gold_multiplier: 2,
            xp_per_foe: 20,
            xp_per_boss: 50,
            soul_capture_base: 0.30,
            potion_drop_chance: 0.5,
            artifact_drop_chance: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BossConstants {
    /// Chance a wounded Dragon loses its attack for the turn
    pub falter_chance: f64,
}

impl Default for BossConstants {
    fn default() -> Self {
        BossConstants { falter_chance: 0.5 }
    }
}

impl GameConstants {
    /// Constants with every random roll pinned: no crits, no parries, actor
    /// always acts first, no loot drops beyond gold and XP.
    pub fn deterministic() -> Self {
        let mut constants = GameConstants::default();
        constants.crit.default_chance = 0.0;
        constants.crit.combo_bonus = 0.0;
        constants.parry.base_chance = 0.0;
        constants.parry.counter_stance_chance = 0.0;
        constants.initiative.foe_first_chance = 0.0;
        constants.initiative.boss_foe_first_chance = 0.0;
        constants.rewards.gold_max = constants.rewards.gold_min;
        constants.rewards.soul_capture_base = 0.0;
        constants.rewards.potion_drop_chance = 0.0;
        constants.rewards.artifact_drop_chance = 0.0;
        constants.boss.falter_chance = 0.0;
        constants
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = GameConstants::default();
        assert!((constants.crit.default_chance - 0.10).abs() < f64::EPSILON);
        assert!((constants.crit.multiplier - 2.0).abs() < f64::EPSILON);
        assert!((constants.initiative.boss_foe_first_chance - 0.50).abs() < f64::EPSILON);
        assert_eq!(constants.status.poison_damage, 5);
        assert_eq!(constants.status.burn_damage, 7);
        assert!((constants.boss.falter_chance - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_partial_constants() {
        let toml = r#"
[crit]
default_chance = 0.25

[rewards]
gold_min = 5
gold_max = 10
"#;

        let constants: GameConstants = toml::from_str(toml).unwrap();
        assert!((constants.crit.default_chance - 0.25).abs() < f64::EPSILON);
        // Unspecified fields keep their defaults
        assert!((constants.crit.multiplier - 2.0).abs() < f64::EPSILON);
        assert_eq!(constants.rewards.gold_max, 10);
        assert_eq!(constants.rewards.xp_per_boss, 50);
        assert_eq!(constants.ultimate.max_charge, 100);
    }

    #[test]
    fn test_deterministic_pins_rolls() {
        let constants = GameConstants::deterministic();
        assert_eq!(constants.crit.default_chance, 0.0);
        assert_eq!(constants.rewards.gold_min, constants.rewards.gold_max);
    }
}
