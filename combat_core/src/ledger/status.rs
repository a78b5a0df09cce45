//! Foe afflictions: stun, poison, burn, curse

use crate::config::StatusConstants;
use crate::foe::Foe;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Affliction {
    Stun,
    Poison,
    Burn,
    Curse,
}

/// Turns remaining per affliction. Counters never go negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoeStatus {
    pub stun: u32,
    pub poison: u32,
    pub burn: u32,
    /// Lasts for the rest of the encounter
    pub cursed: bool,
}

impl FoeStatus {
    /// Stun does not stack; the longer duration wins
    pub fn apply_stun(&mut self, turns: u32) {
        self.stun = self.stun.max(turns);
    }

    /// Poison stacks additively
    pub fn apply_poison(&mut self, turns: u32) {
        self.poison = self.poison.saturating_add(turns);
    }

    /// Burn stacks additively
    pub fn apply_burn(&mut self, turns: u32) {
        self.burn = self.burn.saturating_add(turns);
    }

    pub fn apply_curse(&mut self) {
        self.cursed = true;
    }

    pub fn apply(&mut self, affliction: Affliction, turns: u32) {
        match affliction {
            Affliction::Stun => self.apply_stun(turns),
            Affliction::Poison => self.apply_poison(turns),
            Affliction::Burn => self.apply_burn(turns),
            Affliction::Curse => self.apply_curse(),
        }
    }

    pub fn is_stunned(&self) -> bool {
        self.stun > 0
    }

    /// Spend one stunned turn, returning true if the foe was stunned
    pub fn consume_stun(&mut self) -> bool {
        if self.stun > 0 {
            self.stun -= 1;
            true
        } else {
            false
        }
    }
}

/// Damage dealt by one status tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTickResult {
    pub poison_damage: i32,
    pub burn_damage: i32,
    pub killed: bool,
}

impl StatusTickResult {
    pub fn total(&self) -> i32 {
        self.poison_damage + self.burn_damage
    }
}

/// Apply poison and burn damage to one foe and decrement their counters.
///
/// Dead foes are skipped entirely.
pub fn tick_status(foe: &mut Foe, constants: &StatusConstants) -> StatusTickResult {
    let mut result = StatusTickResult::default();
    if !foe.is_alive() {
        return result;
    }
    if foe.status.poison > 0 {
        result.poison_damage = foe.take_damage(constants.poison_damage);
        foe.status.poison -= 1;
    }
    if foe.status.burn > 0 {
        result.burn_damage = foe.take_damage(constants.burn_damage);
        foe.status.burn -= 1;
    }
    result.killed = !foe.is_alive();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foe::FoeKind;

    #[test]
    fn test_poison_ticks() {
        let mut foe = Foe::spawn(FoeKind::Goblin);
        foe.status.apply_poison(2);
        let constants = StatusConstants::default();

        let result = tick_status(&mut foe, &constants);
        assert_eq!(result.poison_damage, 5);
        assert_eq!(foe.health(), 45);
        assert_eq!(foe.status.poison, 1);

        tick_status(&mut foe, &constants);
        assert_eq!(foe.status.poison, 0);
        let result = tick_status(&mut foe, &constants);
        assert_eq!(result.total(), 0);
        assert_eq!(foe.health(), 40);
    }

    #[test]
    fn test_dead_foe_skipped() {
        let mut foe = Foe::spawn(FoeKind::Wolf);
        foe.status.apply_burn(3);
        foe.take_damage(1000);
        let result = tick_status(&mut foe, &StatusConstants::default());
        assert_eq!(result, StatusTickResult::default());
        assert_eq!(foe.status.burn, 3);
    }

    #[test]
    fn test_stacking_rules() {
        let mut status = FoeStatus::default();
        status.apply_stun(2);
        status.apply_stun(1);
        assert_eq!(status.stun, 2);
        status.apply_poison(2);
        status.apply_poison(3);
        assert_eq!(status.poison, 5);
        assert!(status.consume_stun());
        assert!(status.consume_stun());
        assert!(!status.consume_stun());
    }

    #[test]
    fn test_status_kill() {
        let mut foe = Foe::custom("Rat", 4, 1);
        foe.status.apply_burn(1);
        let result = tick_status(&mut foe, &StatusConstants::default());
        assert!(result.killed);
        assert_eq!(result.burn_damage, 4);
        assert_eq!(foe.health(), 0);
    }
}
