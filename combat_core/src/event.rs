//! CombatEvent - everything observable that happens during an encounter

use crate::action::{AbilityId, Consumable};
use crate::ledger::{Affliction, BuffKind};
use crate::types::{Element, Stance};
use serde::{Deserialize, Serialize};

/// Foe indices refer to positions in the encounter roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CombatEvent {
    // === Actor side ===
    Hit {
        target: usize,
        damage: i32,
        critical: bool,
        element: Option<Element>,
    },
    FoeDefeated {
        target: usize,
    },
    Healed {
        amount: i32,
    },
    AfflictionApplied {
        target: usize,
        affliction: Affliction,
        turns: u32,
    },
    BuffGranted {
        buff: BuffKind,
        turns: u32,
    },
    AbilityUsed {
        ability: AbilityId,
    },
    ItemUsed {
        item: Consumable,
    },
    StanceChanged {
        from: Stance,
        to: Stance,
    },
    Sacrificed {
        health_cost: i32,
    },
    UltimateUnleashed,
    Fled,

    // === Foe side ===
    FoeAttacked {
        foe: usize,
        damage: i32,
    },
    FoeStunned {
        foe: usize,
    },
    Dodged {
        foe: usize,
    },
    Parried {
        foe: usize,
        counter_damage: i32,
    },
    Enraged {
        foe: usize,
    },
    Faltered {
        foe: usize,
    },
    SkeletonStruck {
        foe: usize,
        damage: i32,
    },

    // === Ticks ===
    StatusDamage {
        target: usize,
        poison: i32,
        burn: i32,
    },
    CooldownReady {
        ability: AbilityId,
    },
    BuffExpired {
        buff: BuffKind,
    },
}

impl CombatEvent {
    /// One-line description for logs
    pub fn describe(&self) -> String {
        match self {
            CombatEvent::Hit {
                target,
                damage,
                critical,
                ..
            } => {
                if *critical {
                    format!("critical hit on foe {} for {}", target, damage)
                } else {
                    format!("hit foe {} for {}", target, damage)
                }
            }
            CombatEvent::FoeDefeated { target } => format!("foe {} defeated", target),
            CombatEvent::Healed { amount } => format!("healed {}", amount),
            CombatEvent::AfflictionApplied {
                target,
                affliction,
                turns,
            } => format!("{:?} on foe {} for {} turns", affliction, target, turns),
            CombatEvent::BuffGranted { buff, turns } => format!("{:?} for {} turns", buff, turns),
            CombatEvent::AbilityUsed { ability } => format!("used {:?}", ability),
            CombatEvent::ItemUsed { item } => format!("used {}", item.name()),
            CombatEvent::StanceChanged { from, to } => format!("stance {:?} -> {:?}", from, to),
            CombatEvent::Sacrificed { health_cost } => format!("sacrificed {} health", health_cost),
            CombatEvent::UltimateUnleashed => "ultimate unleashed".to_string(),
            CombatEvent::Fled => "fled".to_string(),
            CombatEvent::FoeAttacked { foe, damage } => format!("foe {} hit for {}", foe, damage),
            CombatEvent::FoeStunned { foe } => format!("foe {} is stunned", foe),
            CombatEvent::Dodged { foe } => format!("dodged foe {}", foe),
            CombatEvent::Parried { foe, counter_damage } => {
                format!("parried foe {}, countered for {}", foe, counter_damage)
            }
            CombatEvent::Enraged { foe } => format!("foe {} is enraged", foe),
            CombatEvent::Faltered { foe } => format!("foe {} falters and its attack misses", foe),
            CombatEvent::SkeletonStruck { foe, damage } => {
                format!("skeleton summoned by foe {} hit for {}", foe, damage)
            }
            CombatEvent::StatusDamage {
                target,
                poison,
                burn,
            } => format!("foe {} took {} poison, {} burn", target, poison, burn),
            CombatEvent::CooldownReady { ability } => format!("{:?} ready", ability),
            CombatEvent::BuffExpired { buff } => format!("{:?} expired", buff),
        }
    }
}
