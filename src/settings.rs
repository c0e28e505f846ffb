//! Run configuration
//!
//! Tunables that differ between builds or test setups. Loaded from JSON; any
//! field left out falls back to its default.

use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::error::ConfigError;

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Arena ===
    pub width: f32,
    pub height: f32,

    // === Run ===
    pub starting_lives: u32,
    pub starting_continues: u32,
    pub starting_bombs: u32,
    pub max_lives: u32,
    /// Score step between extra lives
    pub extend_every: u64,
    /// Last stage; clearing it ends the run
    pub final_stage: u32,

    // === Escalation (seconds of boss-free stage time) ===
    pub mid_boss_time: f32,
    pub stage_boss_time: f32,

    // === Debug ===
    /// Player hits are ignored
    pub debug_invincible: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,

            starting_lives: 3,
            starting_continues: 2,
            starting_bombs: 2,
            max_lives: 5,
            extend_every: 60_000,
            final_stage: 5,

            mid_boss_time: 45.0,
            stage_boss_time: 100.0,

            debug_invincible: false,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        // Plain data with no maps or non-string keys; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let arena_ok = self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0;
        if !arena_ok {
            return Err(ConfigError::InvalidArena {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.mid_boss_time < self.stage_boss_time) {
            return Err(ConfigError::BossTimeline {
                mid: self.mid_boss_time,
                stage: self.stage_boss_time,
            });
        }
        if self.final_stage == 0 {
            return Err(ConfigError::ZeroStages);
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::ZeroLives);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimConfig::from_json(r#"{ "starting_lives": 5, "debug_invincible": true }"#)
            .expect("valid config");
        assert_eq!(config.starting_lives, 5);
        assert!(config.debug_invincible);
        assert_eq!(config.width, ARENA_WIDTH);
        assert_eq!(config.final_stage, 5);
    }

    #[test]
    fn test_rejects_boss_before_mid_boss() {
        let err = SimConfig::from_json(r#"{ "mid_boss_time": 60.0, "stage_boss_time": 30.0 }"#)
            .unwrap_err();
        assert_eq!(err, ConfigError::BossTimeline { mid: 60.0, stage: 30.0 });
    }

    #[test]
    fn test_rejects_bad_arena() {
        let err = SimConfig::from_json(r#"{ "width": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidArena { .. }));
    }

    #[test]
    fn test_parse_error_surfaces() {
        let err = SimConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse error"));
    }

    #[test]
    fn test_json_round_trip() {
        let config = SimConfig {
            final_stage: 3,
            ..Default::default()
        };
        assert_eq!(SimConfig::from_json(&config.to_json()).unwrap(), config);
    }
}
