//! Action resolution
//!
//! Every action is validated in full before anything is mutated, so a
//! rejected action leaves actor, foes and RNG untouched.

use super::ability::{HitElement, Targeting};
use super::{AbilityId, Action, ActionOutcome, Consumable, FormulaInput, ItemEffect};
use crate::actor::Actor;
use crate::config::{CombatOverrides, GameConstants};
use crate::error::{CombatError, InvalidAction};
use crate::event::CombatEvent;
use crate::foe::Foe;
use crate::ledger::{Affliction, BuffKind};
use crate::stats;
use crate::types::{Element, Stance, Weather};
use rand::Rng;
use tracing::debug;

/// Encounter-wide inputs to resolution
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub weather: Weather,
    pub constants: &'a GameConstants,
    pub overrides: &'a CombatOverrides,
}

fn check_target(foes: &[Foe], target: usize) -> Result<(), InvalidAction> {
    match foes.get(target) {
        None => Err(InvalidAction::NoSuchTarget(target)),
        Some(foe) if !foe.is_alive() => Err(InvalidAction::TargetDead(target)),
        Some(_) => Ok(()),
    }
}

/// Check an action against the current state without mutating anything
pub fn validate_action(
    action: &Action,
    actor: &Actor,
    foes: &[Foe],
    ctx: &ResolveContext,
) -> Result<(), InvalidAction> {
    if !actor.is_alive() {
        return Err(InvalidAction::ActorDown);
    }

    match *action {
        Action::Strike { target } => check_target(foes, target),
        Action::Ability { id, target } => {
            if !actor.knows(id) {
                return Err(InvalidAction::UnknownAbility(id));
            }
            if !ctx.overrides.no_cooldowns && !actor.ledger.is_ready(id) {
                return Err(InvalidAction::OnCooldown {
                    ability: id,
                    remaining: actor.ledger.cooldown(id),
                });
            }
            match id.def().targeting {
                Targeting::SingleFoe => {
                    let target = target.ok_or(InvalidAction::MissingTarget(id))?;
                    check_target(foes, target)
                }
                Targeting::AllFoes | Targeting::Caster => Ok(()),
            }
        }
        Action::UseItem { item, target } => {
            if actor.item_count(item) == 0 {
                return Err(InvalidAction::NoSuchItem(item));
            }
            if item.needs_target() {
                let target = target.ok_or(InvalidAction::ItemNeedsTarget(item))?;
                check_target(foes, target)?;
            }
            Ok(())
        }
        Action::Ultimate => {
            let required = ctx.constants.ultimate.max_charge;
            let charge = actor.combat.ultimate_charge;
            if charge < required {
                Err(InvalidAction::UltimateNotReady { charge, required })
            } else {
                Ok(())
            }
        }
        Action::Sacrifice => {
            let required = ctx.constants.sacrifice.health_cost;
            if actor.health() <= required {
                Err(InvalidAction::InsufficientHealth {
                    required,
                    current: actor.health(),
                })
            } else {
                Ok(())
            }
        }
        Action::ChangeStance { .. } | Action::Flee => Ok(()),
    }
}

/// Validate, then apply an action
pub fn resolve_action(
    action: &Action,
    actor: &mut Actor,
    foes: &mut [Foe],
    ctx: &ResolveContext,
    rng: &mut impl Rng,
) -> Result<ActionOutcome, CombatError> {
    validate_action(action, actor, foes, ctx)?;

    let mut outcome = ActionOutcome::new(*action);
    match *action {
        Action::Strike { target } => strike(actor, foes, target, ctx, rng, &mut outcome),
        Action::Ability { id, target } => use_ability(actor, foes, id, target, ctx, &mut outcome),
        Action::UseItem { item, target } => use_item(actor, foes, item, target, ctx, &mut outcome),
        Action::ChangeStance { stance } => change_stance(actor, stance, &mut outcome),
        Action::Ultimate => ultimate(actor, foes, ctx, &mut outcome),
        Action::Sacrifice => sacrifice(actor, ctx, &mut outcome),
        Action::Flee => {
            actor.combat.combo = 0;
            outcome.fled = true;
            outcome.push(CombatEvent::Fled);
        }
    }

    debug!(action = ?action, summary = %outcome.summary(), "actor action resolved");
    Ok(outcome)
}

/// Damage a hit deals after weather, affinity and foe defense
pub fn hit_damage(raw: f64, element: Option<Element>, foe: &Foe, weather: Weather) -> i32 {
    let mut amount = raw;
    if let Some(element) = element {
        amount *= weather.element_modifier(element);
        amount *= foe.affinity_multiplier(element);
    }
    let after_defense = (amount - foe.defense as f64).max(0.0).trunc();
    after_defense as i32
}

/// Run one hit through the shared pipeline and apply it
#[allow(clippy::too_many_arguments)]
fn land_hit(
    actor: &mut Actor,
    foes: &mut [Foe],
    target: usize,
    raw: f64,
    element: Option<Element>,
    critical: bool,
    ctx: &ResolveContext,
    outcome: &mut ActionOutcome,
) -> i32 {
    let Some(foe) = foes.get_mut(target) else {
        return 0;
    };
    if !foe.is_alive() {
        return 0;
    }

    let damage = hit_damage(raw, element, foe, ctx.weather);
    if ctx.overrides.one_hit_kill {
        foe.kill();
    } else {
        foe.take_damage(damage);
    }
    let killed = !foe.is_alive();

    outcome.damage_dealt += damage;
    outcome.critical |= critical;
    outcome.push(CombatEvent::Hit {
        target,
        damage,
        critical,
        element,
    });

    // Healing from hits reads the computed damage, not the health lost
    let mut heal_fraction = stats::lifesteal(actor);
    if killed {
        heal_fraction += stats::on_kill_heal(actor);
        outcome.kills.push(target);
        outcome.push(CombatEvent::FoeDefeated { target });
    }
    let heal = (damage as f64 * heal_fraction).trunc() as i32;
    if heal > 0 {
        restore(actor, heal, outcome);
    }
    damage
}

fn restore(actor: &mut Actor, amount: i32, outcome: &mut ActionOutcome) {
    let healed = actor.heal(amount);
    if healed > 0 {
        outcome.healed += healed;
        outcome.push(CombatEvent::Healed { amount: healed });
    }
}

fn add_charge(actor: &mut Actor, amount: u32, constants: &GameConstants) {
    let charge = actor.combat.ultimate_charge.saturating_add(amount);
    actor.combat.ultimate_charge = charge.min(constants.ultimate.max_charge);
}

fn weapon_element(actor: &Actor) -> Option<Element> {
    actor.weapon.as_ref().and_then(|w| w.element)
}

fn strike(
    actor: &mut Actor,
    foes: &mut [Foe],
    target: usize,
    ctx: &ResolveContext,
    rng: &mut impl Rng,
    outcome: &mut ActionOutcome,
) {
    let damage = stats::effective_damage(actor, ctx.constants, ctx.overrides);
    let boost = actor.combat.next_strike_multiplier.take().unwrap_or(1.0);
    let critical = rng.gen::<f64>() < stats::crit_chance(actor, ctx.constants);
    let mut raw = damage as f64 * boost;
    if critical {
        raw *= stats::crit_multiplier(actor, ctx.constants);
    }

    let element = weapon_element(actor);
    land_hit(actor, foes, target, raw, element, critical, ctx, outcome);

    actor.combat.combo = (actor.combat.combo + 1).min(ctx.constants.crit.max_combo);
    add_charge(actor, ctx.constants.ultimate.strike_charge, ctx.constants);
}

fn use_ability(
    actor: &mut Actor,
    foes: &mut [Foe],
    id: AbilityId,
    target: Option<usize>,
    ctx: &ResolveContext,
    outcome: &mut ActionOutcome,
) {
    let def = id.def();
    let input = FormulaInput {
        damage: stats::effective_damage(actor, ctx.constants, ctx.overrides),
        below_half_health: actor.is_below_half_health(),
    };
    let effect = def.evaluate(&input);
    outcome.push(CombatEvent::AbilityUsed { ability: id });

    let targets: Vec<usize> = match def.targeting {
        Targeting::SingleFoe => target.into_iter().collect(),
        Targeting::AllFoes => (0..foes.len()).filter(|i| foes[*i].is_alive()).collect(),
        Targeting::Caster => Vec::new(),
    };

    let mut dealt = 0;
    for index in targets {
        if let Some(hit) = effect.hit {
            let element = match hit.element {
                HitElement::Weapon => weapon_element(actor),
                HitElement::Fixed(element) => Some(element),
            };
            dealt += land_hit(actor, foes, index, hit.amount, element, false, ctx, outcome);
        }
        if let Some(foe) = foes.get_mut(index) {
            if foe.is_alive() {
                for (affliction, turns) in &effect.afflictions {
                    foe.status.apply(*affliction, *turns);
                    outcome.push(CombatEvent::AfflictionApplied {
                        target: index,
                        affliction: *affliction,
                        turns: *turns,
                    });
                }
            }
        }
    }

    let heal = effect.heal + (dealt as f64 * effect.heal_from_damage).trunc() as i32;
    if heal > 0 {
        restore(actor, heal, outcome);
    }
    if effect.dodge_next {
        actor.combat.dodge_next = true;
    }
    if let Some(multiplier) = effect.next_strike_multiplier {
        actor.combat.next_strike_multiplier = Some(multiplier);
    }
    if let Some((buff, turns)) = effect.buff {
        let granted_defense = match buff {
            BuffKind::Transformation => ctx.constants.buffs.transformation_defense,
            _ => 0,
        };
        actor.ledger.grant_buff(buff, turns, granted_defense);
        outcome.push(CombatEvent::BuffGranted { buff, turns });
    }

    let cooldown = stats::scaled_cooldown(actor, def.cooldown, ctx.constants, ctx.overrides);
    actor.ledger.start_cooldown(id, cooldown);
    actor.combat.combo = 0;
    add_charge(actor, ctx.constants.ultimate.ability_charge, ctx.constants);
}

fn use_item(
    actor: &mut Actor,
    foes: &mut [Foe],
    item: Consumable,
    target: Option<usize>,
    ctx: &ResolveContext,
    outcome: &mut ActionOutcome,
) {
    if !actor.consume_item(item) {
        return;
    }
    outcome.push(CombatEvent::ItemUsed { item });

    match item.effect() {
        ItemEffect::Heal(amount) => restore(actor, amount, outcome),
        ItemEffect::Bomb {
            damage,
            element,
            burn_turns,
        } => {
            if let Some(index) = target {
                land_hit(actor, foes, index, damage, Some(element), false, ctx, outcome);
                if let Some(foe) = foes.get_mut(index).filter(|f| f.is_alive()) {
                    foe.status.apply_burn(burn_turns);
                    outcome.push(CombatEvent::AfflictionApplied {
                        target: index,
                        affliction: Affliction::Burn,
                        turns: burn_turns,
                    });
                }
            }
        }
    }
    actor.combat.combo = 0;
}

fn change_stance(actor: &mut Actor, stance: Stance, outcome: &mut ActionOutcome) {
    let from = actor.stance;
    actor.stance = stance;
    actor.combat.combo = 0;
    outcome.push(CombatEvent::StanceChanged { from, to: stance });
}

fn ultimate(
    actor: &mut Actor,
    foes: &mut [Foe],
    ctx: &ResolveContext,
    outcome: &mut ActionOutcome,
) {
    let constants = &ctx.constants.ultimate;
    let raw = stats::effective_damage(actor, ctx.constants, ctx.overrides) as f64
        * constants.damage_multiplier;
    let element = weapon_element(actor);
    outcome.push(CombatEvent::UltimateUnleashed);

    let living: Vec<usize> = (0..foes.len()).filter(|i| foes[*i].is_alive()).collect();
    for index in living {
        land_hit(actor, foes, index, raw, element, false, ctx, outcome);
    }

    actor
        .ledger
        .grant_buff(BuffKind::Berserk, constants.berserk_turns, 0);
    outcome.push(CombatEvent::BuffGranted {
        buff: BuffKind::Berserk,
        turns: constants.berserk_turns,
    });
    actor.combat.ultimate_charge = 0;
    actor.combat.combo = 0;
}

fn sacrifice(actor: &mut Actor, ctx: &ResolveContext, outcome: &mut ActionOutcome) {
    let cost = ctx.constants.sacrifice.health_cost;
    if !ctx.overrides.invulnerable {
        actor.take_damage(cost);
    }
    let turns = ctx.constants.sacrifice.buff_turns;
    actor.ledger.grant_buff(BuffKind::DamageUp, turns, 0);
    outcome.push(CombatEvent::Sacrificed { health_cost: cost });
    outcome.push(CombatEvent::BuffGranted {
        buff: BuffKind::DamageUp,
        turns,
    });
    actor.combat.combo = 0;
}
