//! arena_sim - Headless arena runner for the combat engine

mod simulation;

use clap::{Parser, ValueEnum};
use combat_core::config::{load_artifact_pool, load_constants};
use combat_core::prelude::*;
use combat_core::ConfigError;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use simulation::{run_arena, ArenaConfig, ScriptedPolicy};
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Run a scripted actor through a series of arena battles
#[derive(Parser, Debug)]
#[command(name = "arena_sim")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of battles to fight
    #[arg(short = 'n', long, default_value_t = 20)]
    battles: u32,

    /// Seed for the arena RNG; random if omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Base class of the actor
    #[arg(short, long, value_enum, default_value_t = ClassArg::Warrior)]
    class: ClassArg,

    /// Multiclass hybrid
    #[arg(long, value_enum)]
    hybrid: Option<HybridArg>,

    /// Fixed weather for every battle; random per battle if omitted
    #[arg(short, long, value_enum)]
    weather: Option<WeatherArg>,

    /// Game constants TOML file
    #[arg(long)]
    constants: Option<PathBuf>,

    /// Artifact pool TOML file
    #[arg(long)]
    artifacts: Option<PathBuf>,

    /// Starting health potions
    #[arg(long, default_value_t = 3)]
    potions: u32,

    /// Print the full report as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ClassArg {
    Warrior,
    Mage,
    Rogue,
    Berserker,
    Assassin,
}

impl From<ClassArg> for ClassKind {
    fn from(arg: ClassArg) -> Self {
        match arg {
            ClassArg::Warrior => ClassKind::Warrior,
            ClassArg::Mage => ClassKind::Mage,
            ClassArg::Rogue => ClassKind::Rogue,
            ClassArg::Berserker => ClassKind::Berserker,
            ClassArg::Assassin => ClassKind::Assassin,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HybridArg {
    Spellblade,
    Nightblade,
    Warlord,
    Bloodmage,
}

impl From<HybridArg> for HybridClass {
    fn from(arg: HybridArg) -> Self {
        match arg {
            HybridArg::Spellblade => HybridClass::Spellblade,
            HybridArg::Nightblade => HybridClass::Nightblade,
            HybridArg::Warlord => HybridClass::Warlord,
            HybridArg::Bloodmage => HybridClass::Bloodmage,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum WeatherArg {
    Clear,
    Rain,
    Storm,
    Snow,
    Heatwave,
    Eclipse,
}

impl From<WeatherArg> for Weather {
    fn from(arg: WeatherArg) -> Self {
        match arg {
            WeatherArg::Clear => Weather::Clear,
            WeatherArg::Rain => Weather::Rain,
            WeatherArg::Storm => Weather::Storm,
            WeatherArg::Snow => Weather::Snow,
            WeatherArg::Heatwave => Weather::Heatwave,
            WeatherArg::Eclipse => Weather::Eclipse,
        }
    }
}

#[derive(Error, Debug)]
enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Combat(#[from] CombatError),
    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<(), SimError> {
    let args = Args::parse();
    init_tracing();

    let constants = match &args.constants {
        Some(path) => load_constants(path)?,
        None => GameConstants::default(),
    };
    let artifact_pool = match &args.artifacts {
        Some(path) => load_artifact_pool(path)?,
        None => default_artifacts(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    info!(seed, "arena seeded");

    let mut actor = Actor::new("Challenger", args.class.into())
        .with_item(Consumable::HealthPotion, args.potions);
    if let Some(hybrid) = args.hybrid {
        actor = actor.with_hybrid(hybrid.into());
    }

    let config = ArenaConfig {
        battles: args.battles,
        weather: args.weather.map(Weather::from),
        constants,
        artifact_pool,
    };
    let report = run_arena(&mut actor, &config, &ScriptedPolicy, &mut rng)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("=== Arena (seed {}) ===", seed);
    for record in &report.battles {
        let result = match &record.outcome {
            EncounterOutcome::Victory(rewards) => {
                format!("victory, {} gold, {} xp", rewards.gold, rewards.xp)
            }
            EncounterOutcome::Defeat => "defeat".to_string(),
            EncounterOutcome::Fled => "fled".to_string(),
            EncounterOutcome::Aborted { reason } => format!("aborted: {}", reason),
        };
        println!(
            "#{:>3} {:<40} {:>3} turns  {:>5} dmg  {:>2} crits  L{}  {}",
            record.battle,
            record.foes.join(", "),
            record.turns,
            record.damage_dealt,
            record.crits,
            record.level_after,
            result
        );
    }
    println!();
    println!(
        "Won {}/{} ({:.1}%), {:.1} turns per battle, {} gold earned",
        report.victories,
        report.battles.len(),
        report.win_rate(),
        report.avg_turns(),
        report.total_gold
    );
    println!(
        "{} ended at level {} with {} artifacts and {} materials",
        actor.name,
        actor.level,
        actor.artifacts.len(),
        actor.materials.len()
    );
    Ok(())
}
