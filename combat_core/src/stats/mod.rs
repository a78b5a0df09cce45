//! Effective stat computation
//!
//! Every function here is a pure function of the actor (plus constants and
//! overrides): calling it twice without mutating the actor in between yields
//! the same result.

mod accumulator;
mod source;
mod stat_value;

pub use accumulator::StatAccumulator;
pub use source::StatSource;
pub use stat_value::{StatStep, StatValue};

use crate::actor::Actor;
use crate::config::{CombatOverrides, GameConstants};
use crate::ledger::BuffKind;
use crate::types::Stance;
use serde::{Deserialize, Serialize};

/// All stat sources of an actor, sorted by priority
pub fn sources(actor: &Actor) -> Vec<&dyn StatSource> {
    let mut sources: Vec<&dyn StatSource> = Vec::new();
    sources.push(&actor.base);
    sources.push(&actor.prestige);
    sources.push(&actor.class);
    if let Some(hybrid) = &actor.hybrid {
        sources.push(hybrid);
    }
    if let Some(weapon) = &actor.weapon {
        sources.push(weapon);
    }
    for piece in actor.armor.values() {
        sources.push(piece);
    }
    for artifact in &actor.artifacts {
        sources.push(artifact);
    }
    if let Some(companion) = &actor.companion {
        sources.push(companion);
    }
    sources.push(&actor.skills);
    sources.push(&actor.ledger);
    sources.sort_by_key(|s| s.priority());
    sources
}

/// Sum every source's contribution
pub fn accumulate(actor: &Actor) -> StatAccumulator {
    let mut stats = StatAccumulator::new();
    for source in sources(actor) {
        source.apply(&mut stats);
    }
    stats
}

/// Effective outgoing damage
///
/// Order: additive sum, low-health rule, stance, damage buff, berserk,
/// override multiplier. Truncated and floored at zero.
pub fn effective_damage(
    actor: &Actor,
    constants: &GameConstants,
    overrides: &CombatOverrides,
) -> i32 {
    let stats = accumulate(actor);
    let mut value = StatValue::with_base(stats.damage_flat);
    if actor.has_low_health_rule() && actor.is_below_half_health() {
        value.multiply(constants.stats.low_health_multiplier);
    }
    value.multiply(actor.stance.damage_multiplier());
    if actor.ledger.has_buff(BuffKind::DamageUp) {
        value.add(constants.buffs.damage_buff_flat as f64);
    }
    if actor.ledger.has_buff(BuffKind::Berserk) {
        value.multiply(constants.ultimate.berserk_multiplier);
    }
    if let Some(multiplier) = overrides.damage_multiplier {
        value.multiply(multiplier);
    }
    value.compute_non_negative()
}

/// Effective defense: additive sum, stance, defense buff
pub fn effective_defense(actor: &Actor, constants: &GameConstants) -> i32 {
    let stats = accumulate(actor);
    let mut value = StatValue::with_base(stats.defense_flat);
    value.multiply(actor.stance.defense_multiplier());
    if actor.ledger.has_buff(BuffKind::DefenseUp) {
        value.add(constants.buffs.defense_buff_flat as f64);
    }
    value.compute_non_negative()
}

/// Effective max health, never below 1
pub fn effective_max_health(actor: &Actor) -> i32 {
    let stats = accumulate(actor);
    StatValue::with_base(stats.health_flat)
        .compute_non_negative()
        .max(1)
}

/// Luck as a fraction in [0, luck_cap]
pub fn luck_fraction(actor: &Actor, constants: &GameConstants) -> f64 {
    let stats = accumulate(actor);
    (stats.luck_points / 100.0).clamp(0.0, constants.stats.luck_cap)
}

/// Cooldown reduction fraction in [0, cooldown_reduction_cap]
pub fn cooldown_reduction(actor: &Actor, constants: &GameConstants) -> f64 {
    accumulate(actor)
        .cooldown_reduction
        .clamp(0.0, constants.stats.cooldown_reduction_cap)
}

/// Cooldown actually written for an ability with the given configured value
pub fn scaled_cooldown(
    actor: &Actor,
    configured: f64,
    constants: &GameConstants,
    overrides: &CombatOverrides,
) -> f64 {
    if overrides.no_cooldowns {
        return 0.0;
    }
    (configured * (1.0 - cooldown_reduction(actor, constants))).max(0.0)
}

/// Amount subtracted from every cooldown per turn
pub fn cooldown_decrement(actor: &Actor) -> f64 {
    1.0 + accumulate(actor).cooldown_rate_percent.max(0.0) / 100.0
}

/// Crit chance for a basic strike, before combo bonuses
pub fn crit_chance(actor: &Actor, constants: &GameConstants) -> f64 {
    let stats = accumulate(actor);
    let base = stats
        .crit_chance_override
        .unwrap_or(constants.crit.default_chance);
    let combo = actor.combat.combo.min(constants.crit.max_combo) as f64 * constants.crit.combo_bonus;
    (base + stats.crit_chance_bonus + combo + luck_fraction(actor, constants)).clamp(0.0, 1.0)
}

pub fn crit_multiplier(actor: &Actor, constants: &GameConstants) -> f64 {
    accumulate(actor)
        .crit_multiplier_override
        .unwrap_or(constants.crit.multiplier)
}

/// Probability of parrying a single foe attack
pub fn parry_chance(actor: &Actor, constants: &GameConstants) -> f64 {
    let base = match actor.stance {
        Stance::Counter => constants.parry.counter_stance_chance,
        _ => constants.parry.base_chance,
    };
    (base + accumulate(actor).parry_bonus).clamp(0.0, 1.0)
}

/// Fraction of dealt damage healed on every hit
pub fn lifesteal(actor: &Actor) -> f64 {
    accumulate(actor).lifesteal.max(0.0)
}

/// Fraction of dealt damage healed on a killing hit
pub fn on_kill_heal(actor: &Actor) -> f64 {
    accumulate(actor).on_kill_heal.max(0.0)
}

/// Snapshot of every effective stat, for display and serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectiveStats {
    pub damage: i32,
    pub defense: i32,
    pub max_health: i32,
    pub luck: f64,
    pub crit_chance: f64,
    pub crit_multiplier: f64,
    pub cooldown_reduction: f64,
    pub cooldown_decrement: f64,
    pub lifesteal: f64,
}

impl EffectiveStats {
    pub fn of(actor: &Actor, constants: &GameConstants, overrides: &CombatOverrides) -> Self {
        EffectiveStats {
            damage: effective_damage(actor, constants, overrides),
            defense: effective_defense(actor, constants),
            max_health: effective_max_health(actor),
            luck: luck_fraction(actor, constants),
            crit_chance: crit_chance(actor, constants),
            crit_multiplier: crit_multiplier(actor, constants),
            cooldown_reduction: cooldown_reduction(actor, constants),
            cooldown_decrement: cooldown_decrement(actor),
            lifesteal: lifesteal(actor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{
        ArmorPiece, Artifact, BaseStats, Companion, CompanionBonus, PassiveSkill, Weapon,
    };
    use crate::types::{ArmorSlot, ClassKind, HybridClass, Rarity};

    fn plain_actor() -> Actor {
        Actor::new("Hero", ClassKind::Rogue).with_base(BaseStats {
            damage: 10,
            defense: 2,
            max_health: 100,
        })
    }

    #[test]
    fn test_plain_damage() {
        let actor = plain_actor();
        let c = GameConstants::default();
        assert_eq!(effective_damage(&actor, &c, &CombatOverrides::NONE), 10);
    }

    #[test]
    fn test_stance_damage() {
        let mut actor = plain_actor();
        let c = GameConstants::default();
        actor.stance = Stance::Offensive;
        assert_eq!(effective_damage(&actor, &c, &CombatOverrides::NONE), 13);
        actor.stance = Stance::Defensive;
        assert_eq!(effective_damage(&actor, &c, &CombatOverrides::NONE), 7);
    }

    #[test]
    fn test_additive_sources() {
        let actor = plain_actor()
            .with_weapon(Weapon::new("Sword", 5).with_enchantment(1))
            .with_artifact(Artifact::new("a", "Ring", Rarity::Common).with_damage(4))
            .with_companion(Companion::new("Wolf", CompanionBonus::Damage(2)))
            .with_skill(PassiveSkill::Might, 1)
            .with_prestige(1);
        let c = GameConstants::default();
        // 10 + 5 + 3 + 4 + 2 + 2 + 3
        assert_eq!(effective_damage(&actor, &c, &CombatOverrides::NONE), 29);
    }

    #[test]
    fn test_low_health_rule() {
        let mut actor = Actor::new("Rage", ClassKind::Berserker);
        let c = GameConstants::default();
        // 10 base + 3 class
        assert_eq!(effective_damage(&actor, &c, &CombatOverrides::NONE), 13);
        let max = actor.max_health();
        actor.set_health(max / 2 - 1);
        assert_eq!(effective_damage(&actor, &c, &CombatOverrides::NONE), 19);
    }

    #[test]
    fn test_damage_buff_and_berserk_order() {
        let mut actor = plain_actor();
        let c = GameConstants::default();
        actor.stance = Stance::Offensive;
        actor.ledger.grant_buff(BuffKind::DamageUp, 3, 0);
        actor.ledger.grant_buff(BuffKind::Berserk, 3, 0);
        // ((10 × 1.3) + 10) × 1.4 = 32.2
        assert_eq!(effective_damage(&actor, &c, &CombatOverrides::NONE), 32);
    }

    #[test]
    fn test_override_multiplier_last() {
        let actor = plain_actor();
        let c = GameConstants::default();
        let overrides = CombatOverrides {
            damage_multiplier: Some(10.0),
            ..CombatOverrides::NONE
        };
        assert_eq!(effective_damage(&actor, &c, &overrides), 100);
    }

    #[test]
    fn test_defense() {
        let mut actor = plain_actor()
            .with_armor(ArmorSlot::Helmet, ArmorPiece::new("Cap", 2))
            .with_skill(PassiveSkill::Toughness, 2);
        let c = GameConstants::default();
        assert_eq!(effective_defense(&actor, &c), 6);
        actor.stance = Stance::Defensive;
        assert_eq!(effective_defense(&actor, &c), 9);
        actor.ledger.grant_buff(BuffKind::DefenseUp, 2, 0);
        assert_eq!(effective_defense(&actor, &c), 14);
    }

    #[test]
    fn test_luck_capped() {
        let c = GameConstants::default();
        let actor = plain_actor().with_skill(PassiveSkill::Fortune, 30);
        assert!((luck_fraction(&actor, &c) - 0.5).abs() < f64::EPSILON);
        let lucky = plain_actor().with_companion(Companion::new("Cat", CompanionBonus::Luck(10)));
        assert!((luck_fraction(&lucky, &c) - 0.10).abs() < 1e-9);
    }

    #[test]
    fn test_cooldown_reduction_capped() {
        let c = GameConstants::default();
        let actor = plain_actor()
            .with_artifact(Artifact::new("x", "Hourglass", Rarity::Epic).with_cooldown_reduction(0.8));
        // 0.15 rogue + 0.8 artifact, capped at 0.9
        assert!((cooldown_reduction(&actor, &c) - 0.9).abs() < 1e-9);
        let written = scaled_cooldown(&actor, 3.0, &c, &CombatOverrides::NONE);
        assert!((written - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_no_cooldowns_override() {
        let c = GameConstants::default();
        let overrides = CombatOverrides {
            no_cooldowns: true,
            ..CombatOverrides::NONE
        };
        assert_eq!(scaled_cooldown(&plain_actor(), 5.0, &c, &overrides), 0.0);
    }

    #[test]
    fn test_haste_decrement() {
        let actor = plain_actor().with_skill(PassiveSkill::Haste, 2);
        assert!((cooldown_decrement(&actor) - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_crit_chance_sources() {
        let c = GameConstants::default();
        let mut actor = Actor::new("Blade", ClassKind::Rogue).with_hybrid(HybridClass::Nightblade);
        actor.combat.combo = 2;
        // 0.10 default + 0.08 hybrid + 0.04 combo
        assert!((crit_chance(&actor, &c) - 0.22).abs() < 1e-9);
        assert!((crit_multiplier(&actor, &c) - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_referentially_transparent() {
        let actor = plain_actor().with_weapon(Weapon::new("Axe", 7));
        let c = GameConstants::default();
        let first = EffectiveStats::of(&actor, &c, &CombatOverrides::NONE);
        let second = EffectiveStats::of(&actor, &c, &CombatOverrides::NONE);
        assert_eq!(first, second);
    }
}
