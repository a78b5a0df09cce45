//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Core types
pub use crate::actor::{Actor, ArmorPiece, Artifact, Companion, CompanionBonus, PassiveSkill, Weapon};
pub use crate::foe::{Affinity, Foe, FoeKind};
pub use crate::types::{ArmorSlot, ClassKind, Element, HybridClass, Rarity, Stance, Weather};

// Actions
pub use crate::action::{AbilityId, Action, ActionOutcome, Consumable};

// Encounter
pub use crate::encounter::{
    start_encounter, Encounter, EncounterOutcome, EncounterSnapshot, Initiative, Rewards,
    TurnPhase, TurnReport,
};
pub use crate::event::CombatEvent;

// Errors
pub use crate::error::{CombatError, InvalidAction, InvariantViolation};

// Config
pub use crate::config::{default_artifacts, CombatOverrides, GameConstants};

// Progression
pub use crate::progression::{apply_outcome, apply_rewards, ProgressionReport};
