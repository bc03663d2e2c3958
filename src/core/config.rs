//! Engine configuration with documented tuning values
//!
//! Every constant the probability and effect models consume lives here or
//! on a technique descriptor. The host persists this block however it
//! likes; JSON and TOML round-trips are provided.

use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};
use crate::techniques::TechniqueId;

/// Configuration for technique resolution
///
/// Mutated only through `TechniqueEngine::apply_config`; the pipeline
/// reads it, never writes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Master switch. Off means no technique ever fires.
    pub enabled: bool,

    /// Restrict techniques to player-controlled actors
    pub player_only: bool,

    /// Keep scaling trigger chance beyond the nominal level cap
    ///
    /// Damage scaling stays capped at level 20 either way; this only
    /// decouples "how often" from "how hard".
    pub uncapped_scaling: bool,

    /// Baseline trigger chance for techniques that don't tune their own
    pub base_chance: f32,

    /// Multiplier applied to the final trigger chance, pre-cap
    pub chance_multiplier: f32,

    /// Multiplier on the skill-derived portion of the trigger chance
    ///
    /// At 1.0 each level below 20 contributes the descriptor's full
    /// per-level scaling.
    pub skill_influence: f32,

    /// Per-level chance gain past level 20 when uncapped scaling is on
    ///
    /// Kept well below the per-level scaling of any descriptor so growth
    /// past the nominal cap shows diminishing returns.
    pub uncapped_decay: f32,

    /// Scales severity/duration of secondary debuffs applied by effects
    pub debuff_duration_multiplier: f32,

    /// Emit technique-name display requests to the presenter
    pub show_technique_text: bool,

    /// Per-technique enable switches
    pub toggles: TechniqueToggles,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            player_only: false,
            uncapped_scaling: true,
            base_chance: 0.05,
            chance_multiplier: 1.0,
            skill_influence: 1.0,
            uncapped_decay: 0.002,
            debuff_duration_multiplier: 1.0,
            show_technique_text: true,
            toggles: TechniqueToggles::default(),
        }
    }
}

impl GlobalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.base_chance) {
            return Err(EngineError::InvalidConfig(format!(
                "base_chance ({}) must be within [0, 1]",
                self.base_chance
            )));
        }
        if self.chance_multiplier < 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "chance_multiplier ({}) must be non-negative",
                self.chance_multiplier
            )));
        }
        if self.skill_influence < 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "skill_influence ({}) must be non-negative",
                self.skill_influence
            )));
        }
        // Decay past the cap must stay below the nominal per-level slope,
        // otherwise high levels grow faster than low ones.
        if self.uncapped_decay < 0.0 || self.uncapped_decay >= 0.01 {
            return Err(EngineError::InvalidConfig(format!(
                "uncapped_decay ({}) must be within [0, 0.01)",
                self.uncapped_decay
            )));
        }
        if self.debuff_duration_multiplier <= 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "debuff_duration_multiplier ({}) must be positive",
                self.debuff_duration_multiplier
            )));
        }
        Ok(())
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Per-technique enable switches, all on by default
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TechniqueToggles {
    pub counter_throw: bool,
    pub deflecting_parry: bool,
    pub sidestep_slash: bool,
    pub crushing_counter: bool,
    pub whirlwind_sweep: bool,
    pub breakfall: bool,
    pub reflex_dodge: bool,
    pub wall_slam: bool,
    pub lunging_strike: bool,
    pub point_blank_shot: bool,
}

impl Default for TechniqueToggles {
    fn default() -> Self {
        Self {
            counter_throw: true,
            deflecting_parry: true,
            sidestep_slash: true,
            crushing_counter: true,
            whirlwind_sweep: true,
            breakfall: true,
            reflex_dodge: true,
            wall_slam: true,
            lunging_strike: true,
            point_blank_shot: true,
        }
    }
}

impl TechniqueToggles {
    pub fn enabled(&self, id: TechniqueId) -> bool {
        match id {
            TechniqueId::CounterThrow => self.counter_throw,
            TechniqueId::DeflectingParry => self.deflecting_parry,
            TechniqueId::SidestepSlash => self.sidestep_slash,
            TechniqueId::CrushingCounter => self.crushing_counter,
            TechniqueId::WhirlwindSweep => self.whirlwind_sweep,
            TechniqueId::Breakfall => self.breakfall,
            TechniqueId::ReflexDodge => self.reflex_dodge,
            TechniqueId::WallSlam => self.wall_slam,
            TechniqueId::LungingStrike => self.lunging_strike,
            TechniqueId::PointBlankShot => self.point_blank_shot,
        }
    }

    pub fn set(&mut self, id: TechniqueId, value: bool) {
        match id {
            TechniqueId::CounterThrow => self.counter_throw = value,
            TechniqueId::DeflectingParry => self.deflecting_parry = value,
            TechniqueId::SidestepSlash => self.sidestep_slash = value,
            TechniqueId::CrushingCounter => self.crushing_counter = value,
            TechniqueId::WhirlwindSweep => self.whirlwind_sweep = value,
            TechniqueId::Breakfall => self.breakfall = value,
            TechniqueId::ReflexDodge => self.reflex_dodge = value,
            TechniqueId::WallSlam => self.wall_slam = value,
            TechniqueId::LungingStrike => self.lunging_strike = value,
            TechniqueId::PointBlankShot => self.point_blank_shot = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GlobalConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_decay_faster_than_nominal_slope() {
        let config = GlobalConfig {
            uncapped_decay: 0.01,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_multiplier() {
        let config = GlobalConfig {
            chance_multiplier: -0.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = GlobalConfig::default();
        config.player_only = true;
        config.toggles.set(TechniqueId::WallSlam, false);

        let text = config.to_toml().unwrap();
        let loaded = GlobalConfig::from_toml(&text).unwrap();

        assert!(loaded.player_only);
        assert!(!loaded.toggles.enabled(TechniqueId::WallSlam));
        assert!(loaded.toggles.enabled(TechniqueId::Breakfall));
    }

    #[test]
    fn test_json_defaults_for_missing_fields() {
        let loaded = GlobalConfig::from_json("{\"player_only\": true}").unwrap();
        assert!(loaded.player_only);
        assert!(loaded.enabled);
        assert!((loaded.base_chance - 0.05).abs() < f32::EPSILON);
    }
}
