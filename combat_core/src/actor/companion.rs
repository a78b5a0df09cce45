//! Companion creature granting a single flat bonus

use serde::{Deserialize, Serialize};

/// The one bonus a companion grants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "amount", rename_all = "snake_case")]
pub enum CompanionBonus {
    Damage(i32),
    Defense(i32),
    /// Scaled ×5 into max health
    Health(i32),
    /// Luck points (100 points = 1.0 luck fraction before the cap)
    Luck(i32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Companion {
    pub name: String,
    pub bonus: CompanionBonus,
}

impl Companion {
    /// Max health scaling for health companions
    pub const HEALTH_SCALE: i32 = 5;

    pub fn new(name: &str, bonus: CompanionBonus) -> Self {
        Companion {
            name: name.to_string(),
            bonus,
        }
    }
}
