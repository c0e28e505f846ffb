//! Configuration errors
//!
//! The simulation never fails at runtime; only loading a [`crate::SimConfig`]
//! can be rejected.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// JSON could not be parsed into a config
    Parse(String),
    InvalidArena { width: f32, height: f32 },
    /// Mid-boss must arrive strictly before the stage boss
    BossTimeline { mid: f32, stage: f32 },
    ZeroStages,
    ZeroLives,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::InvalidArena { width, height } => {
                write!(f, "arena must be positive and finite: got {width}x{height}")
            }
            Self::BossTimeline { mid, stage } => write!(
                f,
                "mid-boss time ({mid}s) must be earlier than stage boss time ({stage}s)"
            ),
            Self::ZeroStages => write!(f, "final_stage must be at least 1"),
            Self::ZeroLives => write!(f, "starting_lives must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
