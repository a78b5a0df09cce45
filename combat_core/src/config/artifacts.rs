//! Artifact pool configuration loading

use super::ConfigError;
use crate::actor::Artifact;
use crate::types::Rarity;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for the artifact pool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactPool {
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

impl ArtifactPool {
    /// All artifacts of the given rarity
    pub fn of_rarity(&self, rarity: Rarity) -> Vec<&Artifact> {
        self.artifacts.iter().filter(|a| a.rarity == rarity).collect()
    }

    pub fn get(&self, id: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

/// Load an artifact pool from a TOML file
pub fn load_artifact_pool(path: &Path) -> Result<ArtifactPool, ConfigError> {
    let pool: ArtifactPool = super::load_toml(path)?;
    validate(&pool)?;
    Ok(pool)
}

/// Load an artifact pool from a TOML string
pub fn parse_artifact_pool(content: &str) -> Result<ArtifactPool, ConfigError> {
    let pool: ArtifactPool = super::parse_toml(content)?;
    validate(&pool)?;
    Ok(pool)
}

fn validate(pool: &ArtifactPool) -> Result<(), ConfigError> {
    for artifact in &pool.artifacts {
        if !(0.0..1.0).contains(&artifact.cooldown_reduction) {
            return Err(ConfigError::ValidationError(format!(
                "artifact '{}' has cooldown_reduction {} outside [0, 1)",
                artifact.id, artifact.cooldown_reduction
            )));
        }
    }
    Ok(())
}

/// Get the built-in artifact pool
pub fn default_artifacts() -> ArtifactPool {
    let toml = include_str!("../../config/artifacts.toml");
    parse_artifact_pool(toml).unwrap_or_else(|_| ArtifactPool {
        artifacts: vec![Artifact::new("art_1", "Ring of Might", Rarity::Common).with_damage(5)],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_artifacts_loads_all() {
        let pool = default_artifacts();
        assert_eq!(pool.len(), 6, "Expected 6 artifacts from config");
        assert_eq!(pool.of_rarity(Rarity::Epic).len(), 2);

        let crown = pool.get("art_5").unwrap();
        assert_eq!(crown.damage_bonus, 5);
        assert_eq!(crown.health_bonus, 15);
    }

    #[test]
    fn test_rejects_bad_cooldown_reduction() {
        let toml = r#"
[[artifacts]]
id = "broken"
name = "Broken Hourglass"
rarity = "Rare"
cooldown_reduction = 1.5
"#;
        let err = parse_artifact_pool(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
