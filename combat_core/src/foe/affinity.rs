//! Elemental affinity: one weakness and one distinct resistance

use crate::error::InvariantViolation;
use crate::types::Element;
use serde::{Deserialize, Serialize};

/// Damage multiplier against a weakness
pub const WEAKNESS_MULTIPLIER: f64 = 1.5;
/// Damage multiplier against a resistance
pub const RESISTANCE_MULTIPLIER: f64 = 0.5;

/// A foe's elemental affinity
///
/// Weakness and resistance are always different elements; the constructor
/// and deserialization both enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AffinityRepr", into = "AffinityRepr")]
pub struct Affinity {
    weakness: Element,
    resistance: Element,
}

#[derive(Serialize, Deserialize)]
struct AffinityRepr {
    weakness: Element,
    resistance: Element,
}

impl Affinity {
    pub fn new(weakness: Element, resistance: Element) -> Result<Self, InvariantViolation> {
        if weakness == resistance {
            return Err(InvariantViolation::WeaknessEqualsResistance {
                foe: String::new(),
                element: weakness,
            });
        }
        Ok(Affinity {
            weakness,
            resistance,
        })
    }

    pub fn weakness(&self) -> Element {
        self.weakness
    }

    pub fn resistance(&self) -> Element {
        self.resistance
    }

    pub fn multiplier(&self, element: Element) -> f64 {
        if element == self.weakness {
            WEAKNESS_MULTIPLIER
        } else if element == self.resistance {
            RESISTANCE_MULTIPLIER
        } else {
            1.0
        }
    }
}

impl TryFrom<AffinityRepr> for Affinity {
    type Error = InvariantViolation;

    fn try_from(repr: AffinityRepr) -> Result<Self, Self::Error> {
        Affinity::new(repr.weakness, repr.resistance)
    }
}

impl From<Affinity> for AffinityRepr {
    fn from(affinity: Affinity) -> Self {
        AffinityRepr {
            weakness: affinity.weakness,
            resistance: affinity.resistance,
        }
    }
}
