//! StatAccumulator - collects contributions from every stat source

use serde::{Deserialize, Serialize};

/// Summed contributions before stance, buffs and overrides are applied
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatAccumulator {
    pub damage_flat: f64,
    pub defense_flat: f64,
    pub health_flat: f64,
    /// Raw luck points, converted to a fraction by `luck_fraction`
    pub luck_points: f64,
    /// Summed cooldown reduction, capped when applied
    pub cooldown_reduction: f64,
    /// Percent added to the per-turn cooldown decrement
    pub cooldown_rate_percent: f64,
    /// Crit chance replacing the configured default (weapon)
    pub crit_chance_override: Option<f64>,
    /// Crit chance added on top of the base chance
    pub crit_chance_bonus: f64,
    pub crit_multiplier_override: Option<f64>,
    pub parry_bonus: f64,
    pub lifesteal: f64,
    pub on_kill_heal: f64,
}

impl StatAccumulator {
    pub fn new() -> Self {
        Self::default()
    }
}
