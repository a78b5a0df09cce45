//! ActionOutcome - what one actor action did

use super::Action;
use crate::event::CombatEvent;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub action: Action,
    pub events: Vec<CombatEvent>,
    /// Damage computed for every hit, before clamping to the target's health
    pub damage_dealt: i32,
    /// Health actually restored
    pub healed: i32,
    pub critical: bool,
    /// Roster indices of foes killed by this action
    pub kills: Vec<usize>,
    pub fled: bool,
}

impl ActionOutcome {
    pub fn new(action: Action) -> Self {
        ActionOutcome {
            action,
            events: Vec::new(),
            damage_dealt: 0,
            healed: 0,
            critical: false,
            kills: Vec::new(),
            fled: false,
        }
    }

    pub fn push(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if self.damage_dealt > 0 {
            if self.critical {
                parts.push(format!("{} damage (CRIT)", self.damage_dealt));
            } else {
                parts.push(format!("{} damage", self.damage_dealt));
            }
        }

        if self.healed > 0 {
            parts.push(format!("{} healed", self.healed));
        }

        if !self.kills.is_empty() {
            parts.push(format!("{} killed", self.kills.len()));
        }

        if self.fled {
            parts.push("FLED".to_string());
        }

        if parts.is_empty() {
            format!("{:?}", self.action)
        } else {
            parts.join(", ")
        }
    }
}
