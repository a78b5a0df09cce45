//! StatSource - trait and implementations for everything feeding actor stats

use super::StatAccumulator;
use crate::actor::{
    ArmorPiece, Artifact, BaseStats, Companion, CompanionBonus, PassiveSkill, PassiveSkills,
    Prestige, Weapon,
};
use crate::ledger::EffectLedger;
use crate::types::{ClassKind, HybridClass};

/// Anything that contributes to the actor's effective stats
pub trait StatSource: Send + Sync {
    /// Identifier for logging
    fn id(&self) -> &str;

    /// Application order (higher = applied later)
    /// - Base stats: -100
    /// - Prestige: -90
    /// - Class and hybrid: -50
    /// - Equipment: 0 to 10
    /// - Companion: 50
    /// - Passive skills: 100
    /// - Active effects: 200
    fn priority(&self) -> i32 {
        0
    }

    fn apply(&self, stats: &mut StatAccumulator);
}

impl StatSource for BaseStats {
    fn id(&self) -> &str {
        "base"
    }

    fn priority(&self) -> i32 {
        -100
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        stats.damage_flat += self.damage as f64;
        stats.defense_flat += self.defense as f64;
        stats.health_flat += self.max_health as f64;
    }
}

impl StatSource for Prestige {
    fn id(&self) -> &str {
        "prestige"
    }

    fn priority(&self) -> i32 {
        -90
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        stats.damage_flat += self.damage_bonus() as f64;
        stats.defense_flat += self.defense_bonus() as f64;
        stats.health_flat += self.health_bonus() as f64;
        stats.luck_points += self.luck_points() as f64;
    }
}

impl StatSource for ClassKind {
    fn id(&self) -> &str {
        match self {
            ClassKind::Warrior => "warrior",
            ClassKind::Mage => "mage",
            ClassKind::Rogue => "rogue",
            ClassKind::Berserker => "berserker",
            ClassKind::Assassin => "assassin",
        }
    }

    fn priority(&self) -> i32 {
        -50
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        stats.damage_flat += self.damage_bonus() as f64;
        stats.health_flat += self.health_bonus() as f64;
        stats.cooldown_reduction += self.cooldown_reduction();
    }
}

impl StatSource for HybridClass {
    fn id(&self) -> &str {
        match self {
            HybridClass::Spellblade => "spellblade",
            HybridClass::Nightblade => "nightblade",
            HybridClass::Warlord => "warlord",
            HybridClass::Bloodmage => "bloodmage",
        }
    }

    fn priority(&self) -> i32 {
        -50
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        stats.damage_flat += self.damage_bonus() as f64;
        stats.crit_chance_bonus += self.crit_chance_bonus();
        if let Some(multiplier) = self.crit_multiplier() {
            stats.crit_multiplier_override = Some(multiplier);
        }
        stats.parry_bonus += self.parry_bonus();
        stats.lifesteal += self.lifesteal();
        stats.on_kill_heal += self.on_kill_heal();
    }
}

impl StatSource for Weapon {
    fn id(&self) -> &str {
        &self.name
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        stats.damage_flat += (self.base_damage + self.enchantment_bonus()) as f64;
        if let Some(chance) = self.crit_chance {
            stats.crit_chance_override = Some(chance);
        }
    }
}

impl StatSource for ArmorPiece {
    fn id(&self) -> &str {
        &self.name
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        stats.defense_flat += self.defense as f64;
        stats.health_flat += self.health_bonus as f64;
    }
}

impl StatSource for Artifact {
    fn id(&self) -> &str {
        &self.id
    }

    fn priority(&self) -> i32 {
        10
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        stats.damage_flat += self.damage_bonus as f64;
        stats.defense_flat += self.defense_bonus as f64;
        stats.health_flat += self.health_bonus as f64;
        stats.cooldown_reduction += self.cooldown_reduction;
    }
}

impl StatSource for Companion {
    fn id(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        50
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        match self.bonus {
            CompanionBonus::Damage(v) => stats.damage_flat += v as f64,
            CompanionBonus::Defense(v) => stats.defense_flat += v as f64,
            CompanionBonus::Health(v) => {
                stats.health_flat += (v * Companion::HEALTH_SCALE) as f64
            }
            CompanionBonus::Luck(v) => stats.luck_points += v as f64,
        }
    }
}

impl StatSource for PassiveSkills {
    fn id(&self) -> &str {
        "passives"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        stats.damage_flat += self.bonus(PassiveSkill::Might);
        stats.defense_flat += self.bonus(PassiveSkill::Toughness);
        stats.health_flat += self.bonus(PassiveSkill::Vitality);
        stats.cooldown_rate_percent += self.bonus(PassiveSkill::Haste);
        stats.crit_chance_bonus += self.bonus(PassiveSkill::Precision);
        stats.luck_points += self.bonus(PassiveSkill::Fortune);
        stats.lifesteal += self.bonus(PassiveSkill::Vampirism);
    }
}

/// Flat defense granted by active transformations
impl StatSource for EffectLedger {
    fn id(&self) -> &str {
        "effects"
    }

    fn priority(&self) -> i32 {
        200
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        stats.defense_flat += self.granted_defense() as f64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_companion_health_scaled() {
        let mut stats = StatAccumulator::new();
        Companion::new("Bear", CompanionBonus::Health(4)).apply(&mut stats);
        assert!((stats.health_flat - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_weapon_crit_overrides() {
        let mut stats = StatAccumulator::new();
        Weapon::new("Dagger", 5)
            .with_crit_chance(0.25)
            .with_enchantment(1)
            .apply(&mut stats);
        assert!((stats.damage_flat - 8.0).abs() < f64::EPSILON);
        assert_eq!(stats.crit_chance_override, Some(0.25));
    }

    #[test]
    fn test_passives_apply() {
        let mut stats = StatAccumulator::new();
        PassiveSkills::new()
            .with_level(PassiveSkill::Might, 2)
            .with_level(PassiveSkill::Fortune, 1)
            .apply(&mut stats);
        assert!((stats.damage_flat - 4.0).abs() < f64::EPSILON);
        assert!((stats.luck_points - 3.0).abs() < f64::EPSILON);
    }
}
