//! Error taxonomy for the combat engine
//!
//! - [`InvalidAction`]: a bad request from the caller. Always recoverable, the
//!   caller re-prompts. No state is mutated when one is returned.
//! - [`InvariantViolation`]: a configuration or engine bug. Fatal for the
//!   encounter, which aborts into a safe terminal state.

use crate::action::{AbilityId, Consumable};
use crate::encounter::TurnPhase;
use thiserror::Error;

/// A rejected action request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidAction {
    #[error("no foe at roster index {0}")]
    NoSuchTarget(usize),
    #[error("foe at roster index {0} is already dead")]
    TargetDead(usize),
    #[error("{0:?} requires a target")]
    MissingTarget(AbilityId),
    #[error("ability {0:?} is not known by this actor")]
    UnknownAbility(AbilityId),
    #[error("ability {ability:?} is on cooldown ({remaining:.1} turns left)")]
    OnCooldown { ability: AbilityId, remaining: f64 },
    #[error("the actor cannot act at 0 health")]
    ActorDown,
    #[error("sacrifice needs more than {required} health, actor has {current}")]
    InsufficientHealth { required: i32, current: i32 },
    #[error("ultimate not ready ({charge}/{required})")]
    UltimateNotReady { charge: u32, required: u32 },
    #[error("no {0:?} left")]
    NoSuchItem(Consumable),
    #[error("{0:?} requires a target")]
    ItemNeedsTarget(Consumable),
    #[error("action not accepted during {0:?}")]
    OutOfPhase(TurnPhase),
    #[error("the encounter is over")]
    EncounterOver,
    #[error("an encounter needs at least one living foe")]
    EmptyRoster,
}

/// A broken engine or configuration invariant
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    #[error("foe '{foe}' has {element:?} as both weakness and resistance")]
    WeaknessEqualsResistance { foe: String, element: crate::types::Element },
    #[error("{who} health {health} escaped [0, {max}]")]
    HealthOutOfRange { who: String, health: i32, max: i32 },
    #[error("cooldown for {ability:?} went negative ({value})")]
    NegativeCooldown { ability: AbilityId, value: f64 },
    #[error("illegal phase transition {from:?} -> {to:?}")]
    IllegalTransition { from: TurnPhase, to: TurnPhase },
}

/// Top-level engine error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CombatError {
    #[error("invalid action: {0}")]
    InvalidAction(#[from] InvalidAction),
    #[error("invariant violation: {0}")]
    InvariantViolation(#[from] InvariantViolation),
}

impl CombatError {
    /// Returns true if the caller can simply re-prompt
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CombatError::InvalidAction(_))
    }

    /// The invalid action, if this is one
    pub fn as_invalid_action(&self) -> Option<&InvalidAction> {
        match self {
            CombatError::InvalidAction(e) => Some(e),
            CombatError::InvariantViolation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_action_is_recoverable() {
        let err: CombatError = InvalidAction::TargetDead(0).into();
        assert!(err.is_recoverable());
        assert_eq!(err.as_invalid_action(), Some(&InvalidAction::TargetDead(0)));
    }

    #[test]
    fn test_invariant_violation_is_fatal() {
        let err: CombatError = InvariantViolation::HealthOutOfRange {
            who: "Hero".to_string(),
            health: -3,
            max: 100,
        }
        .into();
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("-3"));
    }
}
