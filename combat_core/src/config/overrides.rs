//! CombatOverrides - explicit debug toggles consulted by the engine

use serde::{Deserialize, Serialize};

/// Named overrides of normal combat computation.
///
/// Precedence, highest first:
/// 1. `invulnerable`: the actor's health is never reduced by foe hits,
///    skeleton summons or its own sacrifice.
/// 2. `one_hit_kill`: after every other step of an actor hit, the target's
///    health is set to zero.
/// 3. `damage_multiplier`: multiplies effective damage after every other
///    multiplier (including berserk).
/// 4. `no_cooldowns`: ability cooldowns are written as zero, so abilities
///    never gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatOverrides {
    pub invulnerable: bool,
    pub no_cooldowns: bool,
    pub one_hit_kill: bool,
    pub damage_multiplier: Option<f64>,
}

impl CombatOverrides {
    /// No overrides active
    pub const NONE: CombatOverrides = CombatOverrides {
        invulnerable: false,
        no_cooldowns: false,
        one_hit_kill: false,
        damage_multiplier: None,
    };

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}
