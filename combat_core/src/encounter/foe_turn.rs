//! The foes' side of a turn

use crate::action::{hit_damage, ResolveContext};
use crate::actor::Actor;
use crate::event::CombatEvent;
use crate::foe::{BossRule, Foe, SKELETON_SUMMON_ATTACK};
use crate::stats;
use rand::Rng;
use tracing::debug;

/// Let every living foe act once, in roster order.
///
/// Stops as soon as the actor or the whole roster is down.
pub(super) fn run_foe_phase(
    actor: &mut Actor,
    foes: &mut [Foe],
    ctx: &ResolveContext,
    rng: &mut impl Rng,
    events: &mut Vec<CombatEvent>,
) {
    for index in 0..foes.len() {
        foe_action(actor, foes, index, ctx, rng, events);
        if !actor.is_alive() || foes.iter().all(|f| !f.is_alive()) {
            break;
        }
    }
}

fn foe_action(
    actor: &mut Actor,
    foes: &mut [Foe],
    index: usize,
    ctx: &ResolveContext,
    rng: &mut impl Rng,
    events: &mut Vec<CombatEvent>,
) {
    let Some(foe) = foes.get_mut(index) else {
        return;
    };
    if !foe.is_alive() {
        return;
    }
    if foe.status.consume_stun() {
        events.push(CombatEvent::FoeStunned { foe: index });
        return;
    }

    if rng.gen::<f64>() < stats::parry_chance(actor, ctx.constants) {
        let raw = stats::effective_damage(actor, ctx.constants, ctx.overrides) as f64;
        let element = actor.weapon.as_ref().and_then(|w| w.element);
        let counter = hit_damage(raw, element, foe, ctx.weather);
        if ctx.overrides.one_hit_kill {
            foe.kill();
        } else {
            foe.take_damage(counter);
        }
        events.push(CombatEvent::Parried {
            foe: index,
            counter_damage: counter,
        });
        if !foe.is_alive() {
            events.push(CombatEvent::FoeDefeated { target: index });
        }
        return;
    }

    if actor.combat.dodge_next {
        actor.combat.dodge_next = false;
        events.push(CombatEvent::Dodged { foe: index });
        return;
    }

    let rule = foe.boss_rule();
    if rule == Some(BossRule::Falter)
        && foe.is_below_half_health()
        && rng.gen::<f64>() < ctx.constants.boss.falter_chance
    {
        events.push(CombatEvent::Faltered { foe: index });
        return;
    }

    let mut attack = foe.attack as f64;
    if rule == Some(BossRule::Enrage) && foe.is_below_half_health() {
        attack *= 2.0;
        events.push(CombatEvent::Enraged { foe: index });
    }
    if foe.status.cursed {
        attack *= ctx.constants.status.curse_attack_multiplier;
    }

    let defense = stats::effective_defense(actor, ctx.constants);
    let damage = (attack.trunc() as i32 - defense).max(0);
    strike_actor(actor, damage, ctx);
    events.push(CombatEvent::FoeAttacked { foe: index, damage });
    debug!(foe = %foe.name, damage, actor_health = actor.health(), "foe attacked");

    if rule == Some(BossRule::SummonSkeleton) && foe.is_below_half_health() && actor.is_alive() {
        let damage = (SKELETON_SUMMON_ATTACK - defense).max(0);
        strike_actor(actor, damage, ctx);
        events.push(CombatEvent::SkeletonStruck { foe: index, damage });
    }
}

fn strike_actor(actor: &mut Actor, damage: i32, ctx: &ResolveContext) {
    if !ctx.overrides.invulnerable {
        actor.take_damage(damage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CombatOverrides, GameConstants};
    use crate::foe::FoeKind;
    use crate::types::{ClassKind, Weather};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ctx<'a>(constants: &'a GameConstants, overrides: &'a CombatOverrides) -> ResolveContext<'a> {
        ResolveContext {
            weather: Weather::Clear,
            constants,
            overrides,
        }
    }

    #[test]
    fn test_foe_attack_minus_defense() {
        let constants = GameConstants::deterministic();
        let overrides = CombatOverrides::NONE;
        let mut actor = Actor::new("Hero", ClassKind::Rogue);
        let mut foes = vec![Foe::spawn(FoeKind::Goblin)];
        let mut events = Vec::new();
        let mut rng = StdRng::seed_from_u64(5);

        run_foe_phase(&mut actor, &mut foes, &ctx(&constants, &overrides), &mut rng, &mut events);
        // 8 attack - 2 defense
        assert_eq!(actor.health(), 94);
        assert_eq!(events, vec![CombatEvent::FoeAttacked { foe: 0, damage: 6 }]);
    }

    #[test]
    fn test_stunned_foe_skips() {
        let constants = GameConstants::deterministic();
        let overrides = CombatOverrides::NONE;
        let mut actor = Actor::new("Hero", ClassKind::Rogue);
        let mut foes = vec![Foe::spawn(FoeKind::Wolf)];
        foes[0].status.apply_stun(1);
        let mut events = Vec::new();
        let mut rng = StdRng::seed_from_u64(5);

        run_foe_phase(&mut actor, &mut foes, &ctx(&constants, &overrides), &mut rng, &mut events);
        assert_eq!(actor.health(), 100);
        assert_eq!(foes[0].status.stun, 0);
    }

    #[test]
    fn test_dodge_consumed() {
        let constants = GameConstants::deterministic();
        let overrides = CombatOverrides::NONE;
        let mut actor = Actor::new("Hero", ClassKind::Rogue);
        actor.combat.dodge_next = true;
        let mut foes = vec![Foe::spawn(FoeKind::Goblin), Foe::spawn(FoeKind::Goblin)];
        let mut events = Vec::new();
        let mut rng = StdRng::seed_from_u64(5);

        run_foe_phase(&mut actor, &mut foes, &ctx(&constants, &overrides), &mut rng, &mut events);
        assert_eq!(events[0], CombatEvent::Dodged { foe: 0 });
        assert_eq!(actor.health(), 94);
        assert!(!actor.combat.dodge_next);
    }

    #[test]
    fn test_minotaur_enrage() {
        let constants = GameConstants::deterministic();
        let overrides = CombatOverrides::NONE;
        let mut actor = Actor::new("Hero", ClassKind::Rogue);
        let mut foes = vec![Foe::spawn(FoeKind::Minotaur)];
        foes[0].take_damage(80);
        let mut events = Vec::new();
        let mut rng = StdRng::seed_from_u64(5);

        run_foe_phase(&mut actor, &mut foes, &ctx(&constants, &overrides), &mut rng, &mut events);
        // 20 × 2 - 2
        assert_eq!(actor.health(), 62);
        assert!(events.contains(&CombatEvent::Enraged { foe: 0 }));
    }

    #[test]
    fn test_wounded_dragon_falters() {
        let mut constants = GameConstants::deterministic();
        constants.boss.falter_chance = 1.0;
        let overrides = CombatOverrides::NONE;
        let mut actor = Actor::new("Hero", ClassKind::Rogue);
        let mut foes = vec![Foe::spawn(FoeKind::Dragon)];
        foes[0].take_damage(150);
        let mut events = Vec::new();
        let mut rng = StdRng::seed_from_u64(5);

        run_foe_phase(&mut actor, &mut foes, &ctx(&constants, &overrides), &mut rng, &mut events);
        assert_eq!(actor.health(), 100);
        assert_eq!(events, vec![CombatEvent::Faltered { foe: 0 }]);
    }

    #[test]
    fn test_healthy_dragon_never_falters() {
        let mut constants = GameConstants::deterministic();
        constants.boss.falter_chance = 1.0;
        let overrides = CombatOverrides::NONE;
        let mut actor = Actor::new("Hero", ClassKind::Rogue);
        let mut foes = vec![Foe::spawn(FoeKind::Dragon)];
        let mut events = Vec::new();
        let mut rng = StdRng::seed_from_u64(5);

        run_foe_phase(&mut actor, &mut foes, &ctx(&constants, &overrides), &mut rng, &mut events);
        // 25 - 2
        assert_eq!(actor.health(), 77);
        assert_eq!(events, vec![CombatEvent::FoeAttacked { foe: 0, damage: 23 }]);
    }

    #[test]
    fn test_necromancer_summons() {
        let constants = GameConstants::deterministic();
        let overrides = CombatOverrides::NONE;
        let mut actor = Actor::new("Hero", ClassKind::Rogue);
        let mut foes = vec![Foe::spawn(FoeKind::Necromancer)];
        foes[0].take_damage(70);
        let mut events = Vec::new();
        let mut rng = StdRng::seed_from_u64(5);

        run_foe_phase(&mut actor, &mut foes, &ctx(&constants, &overrides), &mut rng, &mut events);
        // (15 - 2) + (6 - 2)
        assert_eq!(actor.health(), 83);
    }

    #[test]
    fn test_curse_weakens() {
        let constants = GameConstants::deterministic();
        let overrides = CombatOverrides::NONE;
        let mut actor = Actor::new("Hero", ClassKind::Rogue);
        let mut foes = vec![Foe::custom("Brute", 50, 20)];
        foes[0].status.apply_curse();
        let mut events = Vec::new();
        let mut rng = StdRng::seed_from_u64(5);

        run_foe_phase(&mut actor, &mut foes, &ctx(&constants, &overrides), &mut rng, &mut events);
        // trunc(20 × 0.7) - 2
        assert_eq!(actor.health(), 88);
    }

    #[test]
    fn test_certain_parry_counters() {
        let mut constants = GameConstants::deterministic();
        constants.parry.base_chance = 1.0;
        let overrides = CombatOverrides::NONE;
        let mut actor = Actor::new("Hero", ClassKind::Rogue);
        let mut foes = vec![Foe::spawn(FoeKind::Goblin)];
        let mut events = Vec::new();
        let mut rng = StdRng::seed_from_u64(5);

        run_foe_phase(&mut actor, &mut foes, &ctx(&constants, &overrides), &mut rng, &mut events);
        assert_eq!(actor.health(), 100);
        assert_eq!(foes[0].health(), 40);
    }

    #[test]
    fn test_parry_counter_obeys_one_hit_kill() {
        let mut constants = GameConstants::deterministic();
        constants.parry.base_chance = 1.0;
        let overrides = CombatOverrides {
            one_hit_kill: true,
            ..CombatOverrides::NONE
        };
        let mut actor = Actor::new("Hero", ClassKind::Rogue);
        let mut foes = vec![Foe::spawn(FoeKind::Minotaur)];
        let mut events = Vec::new();
        let mut rng = StdRng::seed_from_u64(5);

        run_foe_phase(&mut actor, &mut foes, &ctx(&constants, &overrides), &mut rng, &mut events);
        assert!(!foes[0].is_alive());
        assert!(events.contains(&CombatEvent::FoeDefeated { target: 0 }));
        assert_eq!(actor.health(), 100);
    }

    #[test]
    fn test_invulnerable_actor() {
        let constants = GameConstants::deterministic();
        let overrides = CombatOverrides {
            invulnerable: true,
            ..CombatOverrides::NONE
        };
        let mut actor = Actor::new("Hero", ClassKind::Rogue);
        let mut foes = vec![Foe::spawn(FoeKind::Dragon)];
        let mut events = Vec::new();
        let mut rng = StdRng::seed_from_u64(5);

        run_foe_phase(&mut actor, &mut foes, &ctx(&constants, &overrides), &mut rng, &mut events);
        assert_eq!(actor.health(), 100);
    }
}
