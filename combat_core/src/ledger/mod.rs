//! EffectLedger - timed effects owned by the actor
//!
//! Cooldowns tick down by a fractional rate, buffs by whole turns. Foe-side
//! afflictions live on each foe (see [`FoeStatus`]) and are ticked by
//! [`tick_status`].

mod buff;
mod cooldown;
mod status;

pub use buff::{ActiveBuff, BuffKind, BuffTickResult};
pub use status::{tick_status, Affliction, FoeStatus, StatusTickResult};

use crate::action::AbilityId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Cooldowns and active buffs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectLedger {
    cooldowns: HashMap<AbilityId, f64>,
    buffs: HashMap<BuffKind, ActiveBuff>,
}

impl EffectLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flat defense currently granted by transformations
    pub fn granted_defense(&self) -> i32 {
        self.buffs.values().map(|b| b.granted_defense).sum()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.cooldowns.clear();
        self.buffs.clear();
    }
}
