//! Arena simulation: a run of scripted encounters against one actor

use combat_core::action::Targeting;
use combat_core::config::ArtifactPool;
use combat_core::encounter::EncounterSnapshot;
use combat_core::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Safety cap on turns per battle
pub const MAX_TURNS: u32 = 200;

/// Every n-th battle is against a boss
pub const BOSS_EVERY: u32 = 10;

/// Health fraction under which the policy reaches for healing
const HEAL_THRESHOLD: f64 = 0.35;

/// Picks the actor's action each turn
pub trait Policy {
    fn choose(&self, encounter: &Encounter<'_>) -> Action;
}

/// Greedy policy: ultimate when charged, heal when low, otherwise the first
/// ready damaging ability, falling back to a basic strike.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedPolicy;

impl ScriptedPolicy {
    fn first_living(encounter: &Encounter<'_>) -> usize {
        encounter
            .foes()
            .iter()
            .position(|f| f.is_alive())
            .unwrap_or(0)
    }

    fn candidates(encounter: &Encounter<'_>) -> Vec<Action> {
        let actor = encounter.actor();
        let target = Self::first_living(encounter);
        let mut candidates = vec![Action::Ultimate];

        let low = (actor.health() as f64) < actor.max_health() as f64 * HEAL_THRESHOLD;
        if low {
            candidates.push(Action::use_item(Consumable::GreaterPotion, None));
            candidates.push(Action::use_item(Consumable::HealthPotion, None));
            candidates.push(Action::ability(AbilityId::Heal, None));
        }

        for id in actor.abilities() {
            if id == AbilityId::Heal {
                continue;
            }
            let action = match id.def().targeting {
                Targeting::SingleFoe => Action::ability(id, Some(target)),
                Targeting::AllFoes | Targeting::Caster => Action::ability(id, None),
            };
            candidates.push(action);
        }

        if encounter.foes().iter().filter(|f| f.is_alive()).count() > 1 {
            candidates.push(Action::use_item(Consumable::FireBomb, Some(target)));
        }
        candidates
    }
}

impl Policy for ScriptedPolicy {
    fn choose(&self, encounter: &Encounter<'_>) -> Action {
        Self::candidates(encounter)
            .into_iter()
            .find(|action| encounter.validate(action).is_ok())
            .unwrap_or_else(|| Action::strike(Self::first_living(encounter)))
    }
}

/// Result of one battle
#[derive(Debug, Clone, Serialize)]
pub struct BattleRecord {
    pub battle: u32,
    pub foes: Vec<String>,
    pub weather: Weather,
    pub turns: u32,
    pub outcome: EncounterOutcome,
    pub damage_dealt: i64,
    pub crits: u32,
    pub level_after: u32,
    pub final_state: EncounterSnapshot,
}

/// Aggregate over a run of battles
#[derive(Debug, Clone, Default, Serialize)]
pub struct ArenaReport {
    pub battles: Vec<BattleRecord>,
    pub victories: u32,
    pub defeats: u32,
    pub fled: u32,
    pub aborted: u32,
    pub total_turns: u32,
    pub total_gold: u32,
}

impl ArenaReport {
    pub fn win_rate(&self) -> f64 {
        if self.battles.is_empty() {
            0.0
        } else {
            self.victories as f64 / self.battles.len() as f64 * 100.0
        }
    }

    pub fn avg_turns(&self) -> f64 {
        if self.battles.is_empty() {
            0.0
        } else {
            self.total_turns as f64 / self.battles.len() as f64
        }
    }
}

/// Settings shared by every battle of a run
#[derive(Debug, Clone)]
pub struct ArenaConfig {
    pub battles: u32,
    pub weather: Option<Weather>,
    pub constants: GameConstants,
    pub artifact_pool: ArtifactPool,
}

/// Roster for a battle: a boss every `BOSS_EVERY` battles, otherwise one to
/// three regular foes.
pub fn roster_for(battle: u32, rng: &mut impl Rng) -> Vec<Foe> {
    if battle % BOSS_EVERY == 0 {
        let kind = FoeKind::bosses()
            .choose(rng)
            .copied()
            .unwrap_or(FoeKind::Minotaur);
        return vec![Foe::spawn(kind)];
    }
    let count = rng.gen_range(1..=3);
    (0..count)
        .filter_map(|_| FoeKind::regular().choose(rng).copied())
        .map(Foe::spawn)
        .collect()
}

/// Sort a turn result into progress, an ended battle or a run-stopping error.
///
/// An invariant violation has already moved the encounter to `Aborted`, so it
/// ends only this battle. A rejected action means the policy is broken.
fn battle_step(
    battle: u32,
    result: Result<TurnReport, CombatError>,
) -> Result<Option<TurnReport>, CombatError> {
    match result {
        Ok(report) => Ok(Some(report)),
        Err(err) if err.is_recoverable() => Err(err),
        Err(err) => {
            warn!(battle, %err, "engine stopped the battle");
            Ok(None)
        }
    }
}

/// Run one battle to completion
pub fn run_battle(
    battle: u32,
    actor: &mut Actor,
    config: &ArenaConfig,
    policy: &impl Policy,
    rng: &mut impl Rng,
) -> Result<BattleRecord, CombatError> {
    let foes = roster_for(battle, rng);
    let names: Vec<String> = foes.iter().map(|f| f.name.clone()).collect();
    let weather = config
        .weather
        .or_else(|| Weather::all().choose(rng).copied())
        .unwrap_or_default();

    let mut encounter = start_encounter(actor, foes, weather)?
        .with_seed(rng.gen())
        .with_constants(config.constants.clone())
        .with_artifact_pool(config.artifact_pool.clone());

    let mut damage_dealt = 0i64;
    let mut crits = 0;
    while !encounter.is_over() {
        if encounter.turn() > MAX_TURNS {
            warn!(battle, turns = MAX_TURNS, "turn cap reached, fleeing");
            battle_step(battle, encounter.play_turn(Action::Flee))?;
            break;
        }
        let action = policy.choose(&encounter);
        let Some(report) = battle_step(battle, encounter.play_turn(action))? else {
            break;
        };
        if let Some(outcome) = &report.action {
            damage_dealt += outcome.damage_dealt as i64;
            if outcome.critical {
                crits += 1;
            }
            debug!(battle, turn = report.turn, "{}", outcome.summary());
        }
    }

    let turns = encounter.turn();
    let final_state = encounter.query_state();
    let outcome = encounter
        .into_outcome()
        .unwrap_or(EncounterOutcome::Aborted {
            reason: "encounter ended without an outcome".to_string(),
        });

    if apply_outcome(actor, &outcome).is_none() {
        // Arena healers patch the actor up after a loss
        actor.restore_full_health();
    }

    Ok(BattleRecord {
        battle,
        foes: names,
        weather,
        turns,
        outcome,
        damage_dealt,
        crits,
        level_after: actor.level,
        final_state,
    })
}

/// Run every battle of the arena
pub fn run_arena(
    actor: &mut Actor,
    config: &ArenaConfig,
    policy: &impl Policy,
    rng: &mut impl Rng,
) -> Result<ArenaReport, CombatError> {
    let mut report = ArenaReport::default();
    let gold_before = actor.gold;

    for battle in 1..=config.battles {
        let record = run_battle(battle, actor, config, policy, rng)?;
        match &record.outcome {
            EncounterOutcome::Victory(_) => report.victories += 1,
            EncounterOutcome::Defeat => report.defeats += 1,
            EncounterOutcome::Fled => report.fled += 1,
            EncounterOutcome::Aborted { reason } => {
                warn!(battle, %reason, "battle aborted");
                report.aborted += 1;
            }
        }
        report.total_turns += record.turns;
        report.battles.push(record);
    }

    report.total_gold = actor.gold.saturating_sub(gold_before);
    info!(
        battles = config.battles,
        victories = report.victories,
        defeats = report.defeats,
        "arena finished"
    );
    Ok(report)
}
