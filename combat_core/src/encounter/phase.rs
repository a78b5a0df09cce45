//! Turn phases and initiative

use serde::{Deserialize, Serialize};

/// Position of an encounter in its turn cycle
///
/// ```text
/// TurnStart -> Initiative -> FoeFirst | ActorFirst -> OpposingSideAction
///   -> StatusTick -> CooldownTick -> BuffTick -> TurnEnd -> TurnStart
/// ```
/// Any non-terminal phase may end in Victory, Defeat, Fled or Aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    TurnStart,
    Initiative,
    FoeFirst,
    ActorFirst,
    OpposingSideAction,
    StatusTick,
    CooldownTick,
    BuffTick,
    TurnEnd,
    Victory,
    Defeat,
    Fled,
    Aborted,
}

impl TurnPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TurnPhase::Victory | TurnPhase::Defeat | TurnPhase::Fled | TurnPhase::Aborted
        )
    }

    pub fn can_transition_to(&self, next: TurnPhase) -> bool {
        use TurnPhase::*;
        if self.is_terminal() {
            return false;
        }
        if next.is_terminal() {
            return true;
        }
        matches!(
            (self, next),
            (TurnStart, Initiative)
                | (Initiative, FoeFirst)
                | (Initiative, ActorFirst)
                | (FoeFirst, OpposingSideAction)
                | (ActorFirst, OpposingSideAction)
                | (OpposingSideAction, StatusTick)
                | (StatusTick, CooldownTick)
                | (CooldownTick, BuffTick)
                | (BuffTick, TurnEnd)
                | (TurnEnd, TurnStart)
        )
    }
}

/// Which side acts first this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Initiative {
    ActorFirst,
    FoesFirst,
}

impl Initiative {
    pub fn first_phase(&self) -> TurnPhase {
        match self {
            Initiative::ActorFirst => TurnPhase::ActorFirst,
            Initiative::FoesFirst => TurnPhase::FoeFirst,
        }
    }
}
