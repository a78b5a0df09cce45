//! Read-only encounter state for display and serialization

use super::{EncounterOutcome, TurnPhase};
use crate::action::{AbilityId, Consumable};
use crate::actor::Actor;
use crate::config::{CombatOverrides, GameConstants};
use crate::foe::Foe;
use crate::ledger::{ActiveBuff, BuffKind, FoeStatus};
use crate::stats::EffectiveStats;
use crate::types::{Stance, Weather};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    pub name: String,
    pub health: i32,
    pub stance: Stance,
    pub stats: EffectiveStats,
    pub ultimate_charge: u32,
    pub combo: u32,
    pub dodge_next: bool,
    pub cooldowns: Vec<(AbilityId, f64)>,
    pub buffs: Vec<(BuffKind, ActiveBuff)>,
    pub inventory: Vec<(Consumable, u32)>,
}

impl ActorSnapshot {
    pub fn of(actor: &Actor, constants: &GameConstants, overrides: &CombatOverrides) -> Self {
        let inventory = Consumable::all()
            .iter()
            .map(|item| (*item, actor.item_count(*item)))
            .filter(|(_, count)| *count > 0)
            .collect();
        ActorSnapshot {
            name: actor.name.clone(),
            health: actor.health(),
            stance: actor.stance,
            stats: EffectiveStats::of(actor, constants, overrides),
            ultimate_charge: actor.combat.ultimate_charge,
            combo: actor.combat.combo,
            dodge_next: actor.combat.dodge_next,
            cooldowns: actor.ledger.cooldowns(),
            buffs: actor.ledger.buffs(),
            inventory,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoeSnapshot {
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub attack: i32,
    pub boss: bool,
    pub alive: bool,
    pub status: FoeStatus,
}

impl From<&Foe> for FoeSnapshot {
    fn from(foe: &Foe) -> Self {
        FoeSnapshot {
            name: foe.name.clone(),
            health: foe.health(),
            max_health: foe.max_health,
            attack: foe.attack,
            boss: foe.boss,
            alive: foe.is_alive(),
            status: foe.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterSnapshot {
    pub turn: u32,
    pub phase: TurnPhase,
    pub weather: Weather,
    pub actor: ActorSnapshot,
    pub foes: Vec<FoeSnapshot>,
    pub outcome: Option<EncounterOutcome>,
}

impl EncounterSnapshot {
    pub fn living_foes(&self) -> usize {
        self.foes.iter().filter(|f| f.alive).count()
    }
}
