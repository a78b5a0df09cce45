//! TurnReport - what happened during one call into the encounter

use super::{EncounterOutcome, Initiative, TurnPhase};
use crate::action::ActionOutcome;
use crate::event::CombatEvent;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub turn: u32,
    /// Phases entered, in order
    pub phases: Vec<TurnPhase>,
    pub initiative: Option<Initiative>,
    pub foe_events: Vec<CombatEvent>,
    /// `None` if the action fizzled or the encounter ended first
    pub action: Option<ActionOutcome>,
    /// Why a validated action became invalid before the actor's phase
    pub fizzled: Option<String>,
    pub tick_events: Vec<CombatEvent>,
    /// Set when this call ended the encounter
    pub outcome: Option<EncounterOutcome>,
}

impl TurnReport {
    pub fn new(turn: u32) -> Self {
        TurnReport {
            turn,
            phases: Vec::new(),
            initiative: None,
            foe_events: Vec::new(),
            action: None,
            fizzled: None,
            tick_events: Vec::new(),
            outcome: None,
        }
    }

    /// Fold a later report of the same turn into this one
    pub fn merge(&mut self, later: TurnReport) {
        self.phases.extend(later.phases);
        self.foe_events.extend(later.foe_events);
        self.tick_events.extend(later.tick_events);
        if later.outcome.is_some() {
            self.outcome = later.outcome;
        }
    }

    /// Every event in the order it happened
    pub fn events(&self) -> Vec<&CombatEvent> {
        let action_events = self.action.iter().flat_map(|a| a.events.iter());
        match self.initiative {
            Some(Initiative::FoesFirst) => self
                .foe_events
                .iter()
                .chain(action_events)
                .chain(self.tick_events.iter())
                .collect(),
            _ => action_events
                .chain(self.foe_events.iter())
                .chain(self.tick_events.iter())
                .collect(),
        }
    }

    pub fn ended(&self) -> bool {
        self.outcome.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_order() {
        let mut first = TurnReport::new(1);
        first.phases.push(TurnPhase::Initiative);
        let mut second = TurnReport::new(1);
        second.phases.push(TurnPhase::StatusTick);
        second.outcome = Some(EncounterOutcome::Defeat);
        first.merge(second);
        assert_eq!(first.phases, vec![TurnPhase::Initiative, TurnPhase::StatusTick]);
        assert!(first.ended());
    }
}
