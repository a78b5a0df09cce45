//! Configuration loading from TOML files

mod artifacts;
mod constants;
mod overrides;

pub use artifacts::{default_artifacts, load_artifact_pool, parse_artifact_pool, ArtifactPool};
pub use constants::{
    BossConstants, BuffConstants, CritConstants, GameConstants, InitiativeConstants, ParryConstants,
    RewardConstants, SacrificeConstants, StatConstants, StatusConstants, UltimateConstants,
};
pub use overrides::CombatOverrides;

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Load game constants from a TOML file, checking probabilities are in range
pub fn load_constants(path: &Path) -> Result<GameConstants, ConfigError> {
    let constants: GameConstants = load_toml(path)?;
    validate_constants(&constants)?;
    Ok(constants)
}

fn validate_constants(constants: &GameConstants) -> Result<(), ConfigError> {
    let probabilities = [
        ("crit.default_chance", constants.crit.default_chance),
        ("initiative.foe_first_chance", constants.initiative.foe_first_chance),
        ("initiative.boss_foe_first_chance", constants.initiative.boss_foe_first_chance),
        ("parry.base_chance", constants.parry.base_chance),
        ("parry.counter_stance_chance", constants.parry.counter_stance_chance),
        ("rewards.soul_capture_base", constants.rewards.soul_capture_base),
        ("rewards.potion_drop_chance", constants.rewards.potion_drop_chance),
        ("rewards.artifact_drop_chance", constants.rewards.artifact_drop_chance),
        ("boss.falter_chance", constants.boss.falter_chance),
    ];
    for (name, value) in probabilities {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::ValidationError(format!(
                "{} = {} is not a probability",
                name, value
            )));
        }
    }
    if constants.rewards.gold_min > constants.rewards.gold_max {
        return Err(ConfigError::ValidationError(
            "rewards.gold_min exceeds rewards.gold_max".to_string(),
        ));
    }
    if constants.ultimate.max_charge == 0 {
        return Err(ConfigError::ValidationError(
            "ultimate.max_charge must be positive".to_string(),
        ));
    }
    Ok(())
}
