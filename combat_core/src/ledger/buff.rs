//! Timed actor buffs

use super::EffectLedger;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuffKind {
    /// Flat damage bonus
    DamageUp,
    /// Flat defense bonus
    DefenseUp,
    /// Damage multiplier granted by the ultimate
    Berserk,
    /// Flat stat grant reversed on expiry
    Transformation,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveBuff {
    pub remaining: u32,
    /// Defense added on grant and removed on expiry
    pub granted_defense: i32,
}

/// Result of one buff tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuffTickResult {
    pub expired: Vec<BuffKind>,
    /// Granted defense reverted by expiring buffs
    pub defense_reverted: i32,
}

impl EffectLedger {
    /// Grant a buff, or refresh the duration of one already active.
    ///
    /// A refresh keeps the original grant so stat changes are never
    /// applied twice.
    pub fn grant_buff(&mut self, kind: BuffKind, turns: u32, granted_defense: i32) {
        if turns == 0 {
            return;
        }
        self.buffs
            .entry(kind)
            .and_modify(|b| b.remaining = b.remaining.max(turns))
            .or_insert(ActiveBuff {
                remaining: turns,
                granted_defense,
            });
    }

    pub fn has_buff(&self, kind: BuffKind) -> bool {
        self.buffs.contains_key(&kind)
    }

    pub fn buff(&self, kind: BuffKind) -> Option<&ActiveBuff> {
        self.buffs.get(&kind)
    }

    /// Active buffs, sorted by kind name
    pub fn buffs(&self) -> Vec<(BuffKind, ActiveBuff)> {
        let mut active: Vec<_> = self.buffs.iter().map(|(k, b)| (*k, *b)).collect();
        active.sort_by_key(|(k, _)| format!("{:?}", k));
        active
    }

    /// Decrement every buff by one turn, removing (and reverting) those that
    /// reach zero. A no-op on an empty ledger.
    pub fn tick_buffs(&mut self) -> BuffTickResult {
        let mut result = BuffTickResult::default();
        for (kind, buff) in self.buffs.iter_mut() {
            buff.remaining = buff.remaining.saturating_sub(1);
            if buff.remaining == 0 {
                result.expired.push(*kind);
                result.defense_reverted += buff.granted_defense;
            }
        }
        self.buffs.retain(|_, b| b.remaining > 0);
        result.expired.sort_by_key(|k| format!("{:?}", k));
        result
    }
}
