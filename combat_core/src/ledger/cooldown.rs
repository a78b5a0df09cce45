//! Ability cooldown bookkeeping

use super::EffectLedger;
use crate::action::AbilityId;
use crate::error::InvariantViolation;

impl EffectLedger {
    /// Turns left before the ability may be used again (0 = ready)
    pub fn cooldown(&self, ability: AbilityId) -> f64 {
        self.cooldowns.get(&ability).copied().unwrap_or(0.0)
    }

    pub fn is_ready(&self, ability: AbilityId) -> bool {
        self.cooldown(ability) <= 0.0
    }

    /// Write a cooldown after use. Non-positive values leave the ability ready.
    pub fn start_cooldown(&mut self, ability: AbilityId, turns: f64) {
        if turns > 0.0 {
            self.cooldowns.insert(ability, turns);
        } else {
            self.cooldowns.remove(&ability);
        }
    }

    /// Subtract `rate` from every pending cooldown, clamping at zero.
    ///
    /// Returns the abilities that became ready on this tick.
    pub fn tick_cooldowns(&mut self, rate: f64) -> Vec<AbilityId> {
        let mut ready = Vec::new();
        for (ability, remaining) in self.cooldowns.iter_mut() {
            *remaining = (*remaining - rate).max(0.0);
            if *remaining <= 0.0 {
                ready.push(*ability);
            }
        }
        self.cooldowns.retain(|_, remaining| *remaining > 0.0);
        ready.sort_by_key(|a| format!("{:?}", a));
        ready
    }

    /// Pending cooldowns, sorted by ability name
    pub fn cooldowns(&self) -> Vec<(AbilityId, f64)> {
        let mut pending: Vec<_> = self.cooldowns.iter().map(|(a, v)| (*a, *v)).collect();
        pending.sort_by_key(|(a, _)| format!("{:?}", a));
        pending
    }

    pub fn check_cooldowns(&self) -> Result<(), InvariantViolation> {
        match self.cooldowns.iter().find(|(_, v)| **v < 0.0 || v.is_nan()) {
            Some((ability, value)) => Err(InvariantViolation::NegativeCooldown {
                ability: *ability,
                value: *value,
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_ticks_to_zero() {
        let mut ledger = EffectLedger::new();
        ledger.start_cooldown(AbilityId::PowerStrike, 3.0);
        assert!(!ledger.is_ready(AbilityId::PowerStrike));

        assert!(ledger.tick_cooldowns(1.0).is_empty());
        assert!(ledger.tick_cooldowns(1.0).is_empty());
        assert_eq!(ledger.tick_cooldowns(1.0), vec![AbilityId::PowerStrike]);
        assert!(ledger.is_ready(AbilityId::PowerStrike));
    }

    #[test]
    fn test_fractional_rate_clamps() {
        let mut ledger = EffectLedger::new();
        ledger.start_cooldown(AbilityId::Backstab, 2.5);
        ledger.tick_cooldowns(1.2);
        assert!((ledger.cooldown(AbilityId::Backstab) - 1.3).abs() < 1e-9);
        ledger.tick_cooldowns(1.2);
        assert!((ledger.cooldown(AbilityId::Backstab) - 0.1).abs() < 1e-9);
        ledger.tick_cooldowns(1.2);
        assert_eq!(ledger.cooldown(AbilityId::Backstab), 0.0);
        assert!(ledger.check_cooldowns().is_ok());
    }

    #[test]
    fn test_zero_cooldown_not_stored() {
        let mut ledger = EffectLedger::new();
        ledger.start_cooldown(AbilityId::Heal, 0.0);
        assert!(ledger.cooldowns().is_empty());
    }
}
