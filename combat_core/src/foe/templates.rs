//! Foe templates

use super::Affinity;
use crate::types::Element;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoeKind {
    Goblin,
    Wolf,
    Skeleton,
    StoneGolem,
    Minotaur,
    Necromancer,
    Dragon,
    /// Built by hand, no template
    Custom,
}

/// Special boss behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BossRule {
    /// Double attack below half health
    Enrage,
    /// Below half health, a summoned skeleton strikes alongside the attack
    SummonSkeleton,
    /// Below half health, each attack may be lost entirely
    Falter,
}

pub(super) struct Template {
    pub name: &'static str,
    pub max_health: i32,
    pub attack: i32,
    pub defense: i32,
    pub boss: bool,
    pub affinity: Option<Affinity>,
}

/// Nominal attack of a summoned skeleton
pub const SKELETON_SUMMON_ATTACK: i32 = 6;

impl FoeKind {
    pub fn regular() -> &'static [FoeKind] {
        &[
            FoeKind::Goblin,
            FoeKind::Wolf,
            FoeKind::Skeleton,
            FoeKind::StoneGolem,
        ]
    }

    pub fn bosses() -> &'static [FoeKind] {
        &[FoeKind::Minotaur, FoeKind::Necromancer, FoeKind::Dragon]
    }

    pub fn boss_rule(&self) -> Option<BossRule> {
        match self {
            FoeKind::Minotaur => Some(BossRule::Enrage),
            FoeKind::Necromancer => Some(BossRule::SummonSkeleton),
            FoeKind::Dragon => Some(BossRule::Falter),
            _ => None,
        }
    }

    pub(super) fn template(&self) -> Template {
        let (name, max_health, attack, defense, boss, affinity) = match self {
            FoeKind::Goblin => ("Goblin", 50, 8, 0, false, None),
            FoeKind::Wolf => ("Wolf", 45, 9, 0, false, None),
            FoeKind::Skeleton => (
                "Skeleton",
                40,
                6,
                0,
                false,
                Some((Element::Holy, Element::Shadow)),
            ),
            FoeKind::StoneGolem => (
                "Stone Golem",
                80,
                10,
                4,
                false,
                Some((Element::Lightning, Element::Fire)),
            ),
            FoeKind::Minotaur => ("Minotaur", 150, 20, 0, true, None),
            FoeKind::Necromancer => (
                "Necromancer",
                120,
                15,
                0,
                true,
                Some((Element::Holy, Element::Shadow)),
            ),
            FoeKind::Dragon => (
                "Dragon",
                200,
                25,
                0,
                true,
                Some((Element::Ice, Element::Fire)),
            ),
            FoeKind::Custom => ("Unknown", 1, 0, 0, false, None),
        };
        Template {
            name,
            max_health,
            attack,
            defense,
            boss,
            // Template pairs are distinct elements, so construction cannot fail
            affinity: affinity.and_then(|(w, r)| Affinity::new(w, r).ok()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foe::Foe;

    #[test]
    fn test_boss_templates() {
        for kind in FoeKind::bosses() {
            assert!(Foe::spawn(*kind).boss);
        }
        for kind in FoeKind::regular() {
            assert!(!Foe::spawn(*kind).boss);
        }
    }

    #[test]
    fn test_boss_rules() {
        assert_eq!(FoeKind::Minotaur.boss_rule(), Some(BossRule::Enrage));
        assert_eq!(FoeKind::Necromancer.boss_rule(), Some(BossRule::SummonSkeleton));
        assert_eq!(FoeKind::Dragon.boss_rule(), Some(BossRule::Falter));
        assert_eq!(FoeKind::Goblin.boss_rule(), None);
    }

    #[test]
    fn test_template_affinities_valid() {
        let dragon = Foe::spawn(FoeKind::Dragon);
        let affinity = dragon.affinity.unwrap();
        assert_eq!(affinity.weakness(), Element::Ice);
        assert_eq!(affinity.resistance(), Element::Fire);
    }
}
