//! combat_core - Turn-based combat engine for a single actor against a foe roster
//!
//! This library provides:
//! - Actor and Foe records with equipment, companions and passive skills
//! - Stat aggregation: effective damage, defense, max health, luck
//! - EffectLedger: cooldowns, timed buffs and foe afflictions
//! - Action resolution: strikes, abilities, items, stance, ultimate, sacrifice
//! - Encounter: the per-turn phase state machine and reward resolution

pub mod action;
pub mod actor;
pub mod config;
pub mod encounter;
pub mod error;
pub mod event;
pub mod foe;
pub mod ledger;
pub mod prelude;
pub mod progression;
pub mod stats;
pub mod types;

// Re-export core types for convenience
pub use action::{AbilityId, Action, ActionOutcome, Consumable};
pub use actor::{Actor, Artifact, Companion, CompanionBonus, PassiveSkill, Weapon};
pub use config::{default_artifacts, CombatOverrides, ConfigError, GameConstants};
pub use encounter::{
    start_encounter, Encounter, EncounterOutcome, EncounterSnapshot, Rewards, TurnPhase,
    TurnReport,
};
pub use error::{CombatError, InvalidAction, InvariantViolation};
pub use event::CombatEvent;
pub use foe::{Affinity, Foe, FoeKind};
pub use stats::{effective_damage, effective_defense, effective_max_health, EffectiveStats};
pub use types::{ArmorSlot, ClassKind, Element, HybridClass, Rarity, Stance, Weather};
