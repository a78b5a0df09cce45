//! Encounter - the turn scheduler
//!
//! An [`Encounter`] borrows the actor mutably and owns the foe roster for its
//! whole duration. Each turn is driven by two calls:
//!
//! 1. [`Encounter::submit_action`] runs initiative and both action phases.
//! 2. [`Encounter::advance_turn`] runs the status, cooldown and buff ticks and
//!    returns to `TurnStart`.
//!
//! A terminal check runs after every phase; the first side reduced to zero
//! health ends the encounter and no further phase runs.

mod foe_turn;
mod phase;
mod report;
mod rewards;
mod snapshot;

pub use phase::{Initiative, TurnPhase};
pub use report::TurnReport;
pub use rewards::{roll_rarity, roll_rewards, EncounterOutcome, Material, Rewards};
pub use snapshot::{ActorSnapshot, EncounterSnapshot, FoeSnapshot};

use crate::action::{resolve_action, validate_action, Action, ResolveContext};
use crate::actor::Actor;
use crate::config::{default_artifacts, ArtifactPool, CombatOverrides, GameConstants};
use crate::error::{CombatError, InvalidAction, InvariantViolation};
use crate::event::CombatEvent;
use crate::foe::Foe;
use crate::ledger::tick_status;
use crate::stats;
use crate::types::Weather;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

/// Start an encounter against a roster of foes.
///
/// The roster needs at least one living foe and the actor must be alive.
/// Per-encounter combat state (combo, dodge, next-strike boost) is reset.
pub fn start_encounter(
    actor: &mut Actor,
    foes: Vec<Foe>,
    weather: Weather,
) -> Result<Encounter<'_>, CombatError> {
    if !foes.iter().any(|f| f.is_alive()) {
        return Err(InvalidAction::EmptyRoster.into());
    }
    for foe in &foes {
        foe.verify()?;
    }
    actor.clamp_health();
    if !actor.is_alive() {
        return Err(InvalidAction::ActorDown.into());
    }
    actor.combat.reset_transient();

    info!(
        actor = %actor.name,
        foes = foes.len(),
        weather = ?weather,
        "encounter started"
    );

    Ok(Encounter {
        actor,
        foes,
        weather,
        phase: TurnPhase::TurnStart,
        turn: 1,
        constants: GameConstants::default(),
        overrides: CombatOverrides::default(),
        artifact_pool: default_artifacts(),
        rng: StdRng::from_entropy(),
        fled: false,
        outcome: None,
    })
}

pub struct Encounter<'a> {
    actor: &'a mut Actor,
    foes: Vec<Foe>,
    weather: Weather,
    phase: TurnPhase,
    turn: u32,
    constants: GameConstants,
    overrides: CombatOverrides,
    artifact_pool: ArtifactPool,
    rng: StdRng,
    fled: bool,
    outcome: Option<EncounterOutcome>,
}

/// Side taking an action phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Actor,
    Foes,
}

impl<'a> Encounter<'a> {
    /// Seed the encounter RNG for reproducible runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_constants(mut self, constants: GameConstants) -> Self {
        self.constants = constants;
        self
    }

    pub fn with_overrides(mut self, overrides: CombatOverrides) -> Self {
        if !overrides.is_none() {
            warn!(?overrides, "combat overrides active");
        }
        self.overrides = overrides;
        self
    }

    pub fn with_artifact_pool(mut self, pool: ArtifactPool) -> Self {
        self.artifact_pool = pool;
        self
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn weather(&self) -> Weather {
        self.weather
    }

    pub fn actor(&self) -> &Actor {
        self.actor
    }

    pub fn foes(&self) -> &[Foe] {
        &self.foes
    }

    pub fn constants(&self) -> &GameConstants {
        &self.constants
    }

    /// `None` while the encounter is in progress
    pub fn outcome(&self) -> Option<&EncounterOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Release the actor borrow, keeping the outcome
    pub fn into_outcome(self) -> Option<EncounterOutcome> {
        self.outcome
    }

    pub fn query_state(&self) -> EncounterSnapshot {
        EncounterSnapshot {
            turn: self.turn,
            phase: self.phase,
            weather: self.weather,
            actor: ActorSnapshot::of(self.actor, &self.constants, &self.overrides),
            foes: self.foes.iter().map(FoeSnapshot::from).collect(),
            outcome: self.outcome.clone(),
        }
    }

    /// Check an action without running anything
    pub fn validate(&self, action: &Action) -> Result<(), CombatError> {
        self.ensure_phase(TurnPhase::TurnStart)?;
        let ctx = ResolveContext {
            weather: self.weather,
            constants: &self.constants,
            overrides: &self.overrides,
        };
        validate_action(action, self.actor, &self.foes, &ctx)?;
        Ok(())
    }

    /// Run initiative and both action phases for the current turn.
    ///
    /// Only accepted in `TurnStart`. A rejected action mutates nothing and
    /// draws nothing from the RNG.
    pub fn submit_action(&mut self, action: Action) -> Result<TurnReport, CombatError> {
        self.validate(&action)?;

        let mut report = TurnReport::new(self.turn);
        self.enter(TurnPhase::Initiative, &mut report)?;
        let initiative = self.roll_initiative();
        report.initiative = Some(initiative);
        debug!(turn = self.turn, ?initiative, "initiative rolled");

        let (first, second) = match initiative {
            Initiative::ActorFirst => (Side::Actor, Side::Foes),
            Initiative::FoesFirst => (Side::Foes, Side::Actor),
        };

        self.enter(initiative.first_phase(), &mut report)?;
        self.run_side(first, &action, &mut report);
        if self.settle(&mut report)? {
            return Ok(report);
        }

        self.enter(TurnPhase::OpposingSideAction, &mut report)?;
        self.run_side(second, &action, &mut report);
        self.settle(&mut report)?;
        Ok(report)
    }

    /// Run the status, cooldown and buff ticks and start the next turn
    pub fn advance_turn(&mut self) -> Result<TurnReport, CombatError> {
        self.ensure_phase(TurnPhase::OpposingSideAction)?;
        let mut report = TurnReport::new(self.turn);

        self.enter(TurnPhase::StatusTick, &mut report)?;
        for index in 0..self.foes.len() {
            let tick = tick_status(&mut self.foes[index], &self.constants.status);
            if tick.total() > 0 {
                report.tick_events.push(CombatEvent::StatusDamage {
                    target: index,
                    poison: tick.poison_damage,
                    burn: tick.burn_damage,
                });
            }
            if tick.killed {
                report
                    .tick_events
                    .push(CombatEvent::FoeDefeated { target: index });
            }
        }
        if self.settle(&mut report)? {
            return Ok(report);
        }

        self.enter(TurnPhase::CooldownTick, &mut report)?;
        let rate = stats::cooldown_decrement(self.actor);
        for ability in self.actor.ledger.tick_cooldowns(rate) {
            report.tick_events.push(CombatEvent::CooldownReady { ability });
        }
        if self.settle(&mut report)? {
            return Ok(report);
        }

        self.enter(TurnPhase::BuffTick, &mut report)?;
        let expired = self.actor.ledger.tick_buffs();
        for buff in expired.expired {
            report.tick_events.push(CombatEvent::BuffExpired { buff });
        }
        self.actor.clamp_health();
        if self.settle(&mut report)? {
            return Ok(report);
        }

        self.enter(TurnPhase::TurnEnd, &mut report)?;
        self.turn += 1;
        self.enter(TurnPhase::TurnStart, &mut report)?;
        Ok(report)
    }

    /// Submit an action and, if the encounter continues, run the ticks
    pub fn play_turn(&mut self, action: Action) -> Result<TurnReport, CombatError> {
        let mut report = self.submit_action(action)?;
        if !report.ended() {
            let ticks = self.advance_turn()?;
            report.merge(ticks);
        }
        Ok(report)
    }

    fn ensure_phase(&self, expected: TurnPhase) -> Result<(), InvalidAction> {
        if self.outcome.is_some() {
            return Err(InvalidAction::EncounterOver);
        }
        if self.phase != expected {
            return Err(InvalidAction::OutOfPhase(self.phase));
        }
        Ok(())
    }

    fn enter(&mut self, next: TurnPhase, report: &mut TurnReport) -> Result<(), CombatError> {
        if !self.phase.can_transition_to(next) {
            let violation = InvariantViolation::IllegalTransition {
                from: self.phase,
                to: next,
            };
            self.abort(&violation, report);
            return Err(violation.into());
        }
        self.phase = next;
        report.phases.push(next);
        Ok(())
    }

    fn roll_initiative(&mut self) -> Initiative {
        // A defeated boss still counts; it stays on the roster
        let boss_present = self.foes.iter().any(|f| f.boss);
        let chance = if boss_present {
            self.constants.initiative.boss_foe_first_chance
        } else {
            self.constants.initiative.foe_first_chance
        };
        if self.rng.gen::<f64>() < chance {
            Initiative::FoesFirst
        } else {
            Initiative::ActorFirst
        }
    }

    fn run_side(&mut self, side: Side, action: &Action, report: &mut TurnReport) {
        let ctx = ResolveContext {
            weather: self.weather,
            constants: &self.constants,
            overrides: &self.overrides,
        };
        match side {
            Side::Foes => foe_turn::run_foe_phase(
                self.actor,
                &mut self.foes,
                &ctx,
                &mut self.rng,
                &mut report.foe_events,
            ),
            Side::Actor => {
                match resolve_action(action, self.actor, &mut self.foes, &ctx, &mut self.rng) {
                    Ok(outcome) => {
                        self.fled = outcome.fled;
                        report.action = Some(outcome);
                    }
                    Err(err) => {
                        // Validated at submission; only the foes' phase can invalidate it
                        debug!(%err, ?action, "action fizzled");
                        report.fizzled = Some(err.to_string());
                    }
                }
            }
        }
    }

    fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let max = self.actor.max_health();
        let health = self.actor.health();
        if !(0..=max).contains(&health) {
            return Err(InvariantViolation::HealthOutOfRange {
                who: self.actor.name.clone(),
                health,
                max,
            });
        }
        for foe in &self.foes {
            foe.verify()?;
        }
        self.actor.ledger.check_cooldowns()
    }

    /// Invariant and terminal check after a phase.
    ///
    /// Returns true if the encounter ended.
    fn settle(&mut self, report: &mut TurnReport) -> Result<bool, CombatError> {
        if let Err(violation) = self.check_invariants() {
            self.abort(&violation, report);
            return Err(violation.into());
        }

        let (phase, outcome) = if !self.actor.is_alive() {
            (TurnPhase::Defeat, EncounterOutcome::Defeat)
        } else if self.foes.iter().all(|f| !f.is_alive()) {
            let luck = stats::luck_fraction(self.actor, &self.constants);
            let rewards = roll_rewards(
                &self.foes,
                luck,
                &self.constants.rewards,
                &self.artifact_pool,
                &mut self.rng,
            );
            (TurnPhase::Victory, EncounterOutcome::Victory(rewards))
        } else if self.fled {
            (TurnPhase::Fled, EncounterOutcome::Fled)
        } else {
            return Ok(false);
        };

        info!(turn = self.turn, ?phase, "encounter ended");
        self.enter(phase, report)?;
        report.outcome = Some(outcome.clone());
        self.outcome = Some(outcome);
        Ok(true)
    }

    fn abort(&mut self, violation: &InvariantViolation, report: &mut TurnReport) {
        warn!(%violation, phase = ?self.phase, "encounter aborted");
        let outcome = EncounterOutcome::Aborted {
            reason: violation.to_string(),
        };
        self.phase = TurnPhase::Aborted;
        report.phases.push(TurnPhase::Aborted);
        report.outcome = Some(outcome.clone());
        self.outcome = Some(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::AbilityId;
    use crate::foe::FoeKind;
    use crate::types::ClassKind;

    fn deterministic<'a>(actor: &'a mut Actor, foes: Vec<Foe>) -> Encounter<'a> {
        start_encounter(actor, foes, Weather::Clear)
            .unwrap()
            .with_seed(7)
            .with_constants(GameConstants::deterministic())
    }

    #[test]
    fn test_empty_roster_rejected() {
        let mut actor = Actor::new("Hero", ClassKind::Warrior);
        let err = start_encounter(&mut actor, Vec::new(), Weather::Clear)
            .err()
            .unwrap();
        assert_eq!(err, CombatError::InvalidAction(InvalidAction::EmptyRoster));
    }

    #[test]
    fn test_phase_trace() {
        let mut actor = Actor::new("Hero", ClassKind::Rogue);
        let mut encounter = deterministic(&mut actor, vec![Foe::spawn(FoeKind::Goblin)]);

        let report = encounter.submit_action(Action::strike(0)).unwrap();
        assert_eq!(
            report.phases,
            vec![
                TurnPhase::Initiative,
                TurnPhase::ActorFirst,
                TurnPhase::OpposingSideAction
            ]
        );
        let ticks = encounter.advance_turn().unwrap();
        assert_eq!(
            ticks.phases,
            vec![
                TurnPhase::StatusTick,
                TurnPhase::CooldownTick,
                TurnPhase::BuffTick,
                TurnPhase::TurnEnd,
                TurnPhase::TurnStart
            ]
        );
        assert_eq!(encounter.turn(), 2);
    }

    #[test]
    fn test_out_of_phase() {
        let mut actor = Actor::new("Hero", ClassKind::Rogue);
        let mut encounter = deterministic(&mut actor, vec![Foe::spawn(FoeKind::Goblin)]);
        assert_eq!(
            encounter.advance_turn().unwrap_err(),
            CombatError::InvalidAction(InvalidAction::OutOfPhase(TurnPhase::TurnStart))
        );
        encounter.submit_action(Action::strike(0)).unwrap();
        assert_eq!(
            encounter.submit_action(Action::strike(0)).unwrap_err(),
            CombatError::InvalidAction(InvalidAction::OutOfPhase(
                TurnPhase::OpposingSideAction
            ))
        );
    }

    #[test]
    fn test_invalid_action_leaves_state() {
        let mut actor = Actor::new("Hero", ClassKind::Rogue);
        let mut encounter = deterministic(&mut actor, vec![Foe::spawn(FoeKind::Goblin)]);
        let before = encounter.query_state();
        let err = encounter.submit_action(Action::strike(4)).unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(encounter.query_state(), before);
        assert_eq!(encounter.phase(), TurnPhase::TurnStart);
    }

    #[test]
    fn test_flee() {
        let mut actor = Actor::new("Hero", ClassKind::Rogue);
        let mut encounter = deterministic(&mut actor, vec![Foe::spawn(FoeKind::Wolf)]);
        let report = encounter.submit_action(Action::Flee).unwrap();
        assert_eq!(report.outcome, Some(EncounterOutcome::Fled));
        assert_eq!(encounter.phase(), TurnPhase::Fled);
        assert_eq!(
            encounter.submit_action(Action::strike(0)).unwrap_err(),
            CombatError::InvalidAction(InvalidAction::EncounterOver)
        );
    }

    #[test]
    fn test_victory_skips_foe_phase() {
        let mut actor = Actor::new("Hero", ClassKind::Rogue);
        let mut encounter = deterministic(&mut actor, vec![Foe::custom("Rat", 5, 50)]);
        let report = encounter.submit_action(Action::strike(0)).unwrap();
        assert!(report.outcome.as_ref().map(|o| o.is_victory()).unwrap_or(false));
        assert!(report.foe_events.is_empty());
        assert_eq!(
            report.phases,
            vec![TurnPhase::Initiative, TurnPhase::ActorFirst, TurnPhase::Victory]
        );
        drop(encounter);
        assert_eq!(actor.health(), 100);
    }

    fn boss_initiative(foes: Vec<Foe>) -> Option<Initiative> {
        let mut constants = GameConstants::deterministic();
        constants.initiative.foe_first_chance = 0.0;
        constants.initiative.boss_foe_first_chance = 1.0;
        let mut actor = Actor::new("Hero", ClassKind::Rogue);
        let mut encounter = start_encounter(&mut actor, foes, Weather::Clear)
            .unwrap()
            .with_seed(7)
            .with_constants(constants);
        encounter.submit_action(Action::Flee).unwrap().initiative
    }

    #[test]
    fn test_boss_uses_boss_initiative_odds() {
        let roster = vec![Foe::spawn(FoeKind::Minotaur), Foe::spawn(FoeKind::Goblin)];
        assert_eq!(boss_initiative(roster), Some(Initiative::FoesFirst));
    }

    #[test]
    fn test_regular_roster_uses_regular_odds() {
        let roster = vec![Foe::spawn(FoeKind::Goblin), Foe::spawn(FoeKind::Wolf)];
        assert_eq!(boss_initiative(roster), Some(Initiative::ActorFirst));
    }

    #[test]
    fn test_defeated_boss_still_counts_for_initiative() {
        let mut minotaur = Foe::spawn(FoeKind::Minotaur);
        minotaur.kill();
        let roster = vec![minotaur, Foe::spawn(FoeKind::Goblin)];
        assert_eq!(boss_initiative(roster), Some(Initiative::FoesFirst));
    }

    #[test]
    fn test_fizzled_sacrifice() {
        let mut constants = GameConstants::deterministic();
        constants.initiative.foe_first_chance = 1.0;
        let mut actor = Actor::new("Hero", ClassKind::Rogue);
        actor.set_health(20);
        let mut encounter = start_encounter(&mut actor, vec![Foe::spawn(FoeKind::Goblin)], Weather::Clear)
            .unwrap()
            .with_seed(1)
            .with_constants(constants);

        let report = encounter.submit_action(Action::Sacrifice).unwrap();
        assert_eq!(report.initiative, Some(Initiative::FoesFirst));
        assert!(report.action.is_none());
        assert!(report.fizzled.is_some());
        // Goblin hit for 6, sacrifice did not run
        assert_eq!(encounter.actor().health(), 14);
    }

    #[test]
    fn test_status_tick_victory() {
        let mut actor = Actor::new("Hero", ClassKind::Rogue);
        let mut rat = Foe::custom("Rat", 5, 0);
        rat.status.apply_poison(1);
        let mut encounter = deterministic(&mut actor, vec![rat]);
        encounter
            .submit_action(Action::ability(AbilityId::Evasion, None))
            .unwrap();
        let ticks = encounter.advance_turn().unwrap();
        assert_eq!(
            ticks.phases,
            vec![TurnPhase::StatusTick, TurnPhase::Victory]
        );
        assert!(encounter.outcome().map(|o| o.is_victory()).unwrap_or(false));
    }
}
