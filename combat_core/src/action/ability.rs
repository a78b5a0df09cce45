//! Ability definitions
//!
//! Abilities form a closed set. Each id is bound to a definition holding its
//! cooldown, targeting and a formula that turns the caster's current numbers
//! into a declarative [`AbilityEffect`].

use crate::ledger::{Affliction, BuffKind};
use crate::types::{ClassKind, Element, HybridClass};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityId {
    Heal,
    // Warrior
    PowerStrike,
    ShieldBash,
    // Mage
    Fireball,
    IceBarrier,
    // Rogue
    Backstab,
    Evasion,
    // Berserker
    RageStrike,
    Bloodlust,
    // Assassin
    PoisonBlade,
    ShadowStep,
    // Spellblade
    ArcaneSlash,
    Hex,
    // Nightblade
    Eviscerate,
    Vanish,
    // Warlord
    Warcry,
    IronForm,
    // Bloodmage
    BloodBolt,
    Immolate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Targeting {
    SingleFoe,
    AllFoes,
    Caster,
}

/// Element carried by an ability hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitElement {
    /// Whatever the equipped weapon carries (possibly nothing)
    Weapon,
    Fixed(Element),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitSpec {
    /// Raw damage before weather, affinity and foe defense
    pub amount: f64,
    pub element: HitElement,
}

/// Caster numbers a formula reads
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormulaInput {
    pub damage: i32,
    pub below_half_health: bool,
}

/// What an ability does, decided before anything is mutated
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AbilityEffect {
    pub hit: Option<HitSpec>,
    pub heal: i32,
    /// Fraction of dealt damage healed
    pub heal_from_damage: f64,
    /// Applied to every targeted foe
    pub afflictions: Vec<(Affliction, u32)>,
    pub dodge_next: bool,
    pub next_strike_multiplier: Option<f64>,
    pub buff: Option<(BuffKind, u32)>,
}

impl AbilityEffect {
    fn hit(amount: f64, element: HitElement) -> Self {
        AbilityEffect {
            hit: Some(HitSpec { amount, element }),
            ..Default::default()
        }
    }

    fn weapon_hit(amount: f64) -> Self {
        Self::hit(amount, HitElement::Weapon)
    }

    fn with_affliction(mut self, affliction: Affliction, turns: u32) -> Self {
        self.afflictions.push((affliction, turns));
        self
    }
}

pub type Formula = fn(&FormulaInput) -> AbilityEffect;

/// Static definition of an ability
#[derive(Clone, Copy)]
pub struct AbilityDef {
    pub id: AbilityId,
    pub name: &'static str,
    /// Configured cooldown in turns, before cooldown reduction
    pub cooldown: f64,
    pub targeting: Targeting,
    pub formula: Formula,
}

impl std::fmt::Debug for AbilityDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbilityDef")
            .field("id", &self.id)
            .field("cooldown", &self.cooldown)
            .field("targeting", &self.targeting)
            .finish()
    }
}

impl AbilityDef {
    pub fn evaluate(&self, input: &FormulaInput) -> AbilityEffect {
        (self.formula)(input)
    }
}

/// Flat healing of the universal Heal ability
pub const HEAL_AMOUNT: i32 = 20;

impl AbilityId {
    pub fn all() -> &'static [AbilityId] {
        use AbilityId::*;
        &[
            Heal, PowerStrike, ShieldBash, Fireball, IceBarrier, Backstab, Evasion, RageStrike,
            Bloodlust, PoisonBlade, ShadowStep, ArcaneSlash, Hex, Eviscerate, Vanish, Warcry,
            IronForm, BloodBolt, Immolate,
        ]
    }

    pub fn def(&self) -> AbilityDef {
        let id = *self;
        match self {
            AbilityId::Heal => define(id, "Heal", 5.0, Targeting::Caster, |_| AbilityEffect {
                heal: HEAL_AMOUNT,
                ..Default::default()
            }),
            AbilityId::PowerStrike => define(id, "Power Strike", 3.0, Targeting::SingleFoe, |i| {
                AbilityEffect::weapon_hit(i.damage as f64 * 2.0)
            }),
            AbilityId::ShieldBash => define(id, "Shield Bash", 4.0, Targeting::SingleFoe, |i| {
                AbilityEffect::weapon_hit((i.damage + 3) as f64)
                    .with_affliction(Affliction::Stun, 1)
            }),
            AbilityId::Fireball => define(id, "Fireball", 3.0, Targeting::SingleFoe, |i| {
                AbilityEffect::hit((i.damage + 8) as f64, HitElement::Fixed(Element::Fire))
                    .with_affliction(Affliction::Burn, 2)
            }),
            AbilityId::IceBarrier => define(id, "Ice Barrier", 5.0, Targeting::Caster, |_| {
                AbilityEffect {
                    heal: 20,
                    buff: Some((BuffKind::DefenseUp, 2)),
                    ..Default::default()
                }
            }),
            AbilityId::Backstab => define(id, "Backstab", 2.5, Targeting::SingleFoe, |i| {
                AbilityEffect::weapon_hit(i.damage as f64 * 2.5)
            }),
            AbilityId::Evasion => define(id, "Evasion", 4.0, Targeting::Caster, |_| AbilityEffect {
                dodge_next: true,
                ..Default::default()
            }),
            AbilityId::RageStrike => define(id, "Rage Strike", 3.0, Targeting::SingleFoe, |i| {
                let rage = if i.below_half_health { 1.5 } else { 1.0 };
                AbilityEffect::weapon_hit(i.damage as f64 * rage)
            }),
            AbilityId::Bloodlust => define(id, "Bloodlust", 5.0, Targeting::SingleFoe, |i| {
                AbilityEffect {
                    heal_from_damage: 0.3,
                    ..AbilityEffect::weapon_hit(i.damage as f64)
                }
            }),
            AbilityId::PoisonBlade => define(id, "Poison Blade", 3.0, Targeting::SingleFoe, |i| {
                AbilityEffect::weapon_hit(i.damage as f64).with_affliction(Affliction::Poison, 3)
            }),
            AbilityId::ShadowStep => define(id, "Shadow Step", 4.0, Targeting::Caster, |_| {
                AbilityEffect {
                    dodge_next: true,
                    next_strike_multiplier: Some(1.5),
                    ..Default::default()
                }
            }),
            AbilityId::ArcaneSlash => define(id, "Arcane Slash", 3.0, Targeting::SingleFoe, |i| {
                AbilityEffect::hit(
                    (i.damage + 5) as f64,
                    HitElement::Fixed(Element::Lightning),
                )
            }),
            AbilityId::Hex => define(id, "Hex", 4.0, Targeting::SingleFoe, |_| {
                AbilityEffect::default().with_affliction(Affliction::Curse, 1)
            }),
            AbilityId::Eviscerate => define(id, "Eviscerate", 3.0, Targeting::SingleFoe, |i| {
                AbilityEffect::weapon_hit(i.damage as f64 * 2.0)
                    .with_affliction(Affliction::Poison, 2)
            }),
            AbilityId::Vanish => define(id, "Vanish", 5.0, Targeting::Caster, |_| AbilityEffect {
                dodge_next: true,
                next_strike_multiplier: Some(2.0),
                ..Default::default()
            }),
            AbilityId::Warcry => define(id, "Warcry", 5.0, Targeting::Caster, |_| AbilityEffect {
                buff: Some((BuffKind::DamageUp, 3)),
                ..Default::default()
            }),
            AbilityId::IronForm => define(id, "Iron Form", 6.0, Targeting::Caster, |_| AbilityEffect {
                buff: Some((BuffKind::Transformation, 3)),
                ..Default::default()
            }),
            AbilityId::BloodBolt => define(id, "Blood Bolt", 3.0, Targeting::SingleFoe, |i| {
                AbilityEffect {
                    heal_from_damage: 0.5,
                    ..AbilityEffect::hit(
                        (i.damage + 10) as f64,
                        HitElement::Fixed(Element::Shadow),
                    )
                }
            }),
            AbilityId::Immolate => define(id, "Immolate", 4.0, Targeting::AllFoes, |_| {
                AbilityEffect::default().with_affliction(Affliction::Burn, 3)
            }),
        }
    }
}

fn define(
    id: AbilityId,
    name: &'static str,
    cooldown: f64,
    targeting: Targeting,
    formula: Formula,
) -> AbilityDef {
    AbilityDef {
        id,
        name,
        cooldown,
        targeting,
        formula,
    }
}

fn class_abilities(class: ClassKind) -> [AbilityId; 2] {
    match class {
        ClassKind::Warrior => [AbilityId::PowerStrike, AbilityId::ShieldBash],
        ClassKind::Mage => [AbilityId::Fireball, AbilityId::IceBarrier],
        ClassKind::Rogue => [AbilityId::Backstab, AbilityId::Evasion],
        ClassKind::Berserker => [AbilityId::RageStrike, AbilityId::Bloodlust],
        ClassKind::Assassin => [AbilityId::PoisonBlade, AbilityId::ShadowStep],
    }
}

fn hybrid_abilities(hybrid: HybridClass) -> [AbilityId; 2] {
    match hybrid {
        HybridClass::Spellblade => [AbilityId::ArcaneSlash, AbilityId::Hex],
        HybridClass::Nightblade => [AbilityId::Eviscerate, AbilityId::Vanish],
        HybridClass::Warlord => [AbilityId::Warcry, AbilityId::IronForm],
        HybridClass::Bloodmage => [AbilityId::BloodBolt, AbilityId::Immolate],
    }
}

/// Abilities known by a class, optionally multiclassed
pub fn abilities_for(class: ClassKind, hybrid: Option<HybridClass>) -> Vec<AbilityId> {
    let mut known = vec![AbilityId::Heal];
    known.extend(class_abilities(class));
    if let Some(hybrid) = hybrid {
        known.extend(hybrid_abilities(hybrid));
    }
    known
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(damage: i32) -> FormulaInput {
        FormulaInput {
            damage,
            below_half_health: false,
        }
    }

    #[test]
    fn test_every_class_knows_heal() {
        for class in ClassKind::all() {
            let known = abilities_for(*class, None);
            assert_eq!(known.len(), 3);
            assert!(known.contains(&AbilityId::Heal));
        }
    }

    #[test]
    fn test_hybrid_adds_abilities() {
        let known = abilities_for(ClassKind::Warrior, Some(HybridClass::Warlord));
        assert!(known.contains(&AbilityId::Warcry));
        assert!(known.contains(&AbilityId::IronForm));
        assert!(!known.contains(&AbilityId::Fireball));
    }

    #[test]
    fn test_power_strike_doubles() {
        let effect = AbilityId::PowerStrike.def().evaluate(&input(12));
        assert_eq!(effect.hit.map(|h| h.amount), Some(24.0));
    }

    #[test]
    fn test_rage_strike_low_health() {
        let def = AbilityId::RageStrike.def();
        let calm = def.evaluate(&input(10));
        let enraged = def.evaluate(&FormulaInput {
            damage: 10,
            below_half_health: true,
        });
        assert_eq!(calm.hit.map(|h| h.amount), Some(10.0));
        assert_eq!(enraged.hit.map(|h| h.amount), Some(15.0));
    }

    #[test]
    fn test_fireball_is_fire() {
        let effect = AbilityId::Fireball.def().evaluate(&input(10));
        let hit = effect.hit.unwrap();
        assert_eq!(hit.element, HitElement::Fixed(Element::Fire));
        assert_eq!(effect.afflictions, vec![(Affliction::Burn, 2)]);
    }

    #[test]
    fn test_definitions_consistent() {
        for id in AbilityId::all() {
            let def = id.def();
            assert_eq!(def.id, *id);
            assert!(def.cooldown > 0.0);
        }
    }
}
