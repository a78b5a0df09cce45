//! Actions the actor can submit, and their resolution

mod ability;
mod item;
mod outcome;
mod resolver;

pub use ability::{
    abilities_for, AbilityDef, AbilityEffect, AbilityId, Formula, FormulaInput, HitElement,
    HitSpec, Targeting, HEAL_AMOUNT,
};
pub use item::{Consumable, ItemEffect};
pub use outcome::ActionOutcome;
pub use resolver::{hit_damage, resolve_action, validate_action, ResolveContext};

use crate::types::Stance;
use serde::{Deserialize, Serialize};

/// One actor action per turn. Targets are roster indices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    Strike {
        target: usize,
    },
    Ability {
        id: AbilityId,
        #[serde(default)]
        target: Option<usize>,
    },
    UseItem {
        item: Consumable,
        #[serde(default)]
        target: Option<usize>,
    },
    ChangeStance {
        stance: Stance,
    },
    Ultimate,
    Sacrifice,
    Flee,
}

impl Action {
    pub fn strike(target: usize) -> Self {
        Action::Strike { target }
    }

    pub fn ability(id: AbilityId, target: Option<usize>) -> Self {
        Action::Ability { id, target }
    }

    pub fn use_item(item: Consumable, target: Option<usize>) -> Self {
        Action::UseItem { item, target }
    }

    pub fn stance(stance: Stance) -> Self {
        Action::ChangeStance { stance }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_json() {
        let action: Action =
            serde_json::from_str(r#"{"kind":"ability","id":"fireball","target":1}"#).unwrap();
        assert_eq!(action, Action::ability(AbilityId::Fireball, Some(1)));
        let flee: Action = serde_json::from_str(r#"{"kind":"flee"}"#).unwrap();
        assert_eq!(flee, Action::Flee);
    }
}
