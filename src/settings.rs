//! Shell settings for the native loop
//!
//! These shape how the game is hosted, never how it plays.

use serde::{Deserialize, Serialize};

use crate::consts::TICK_HZ;
use crate::tuning::TuningError;

/// Settings for the frame loop in `main`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Window caption
    pub title: String,
    /// Target frames per second for the frame clock
    pub tick_hz: u32,
    /// RNG seed; `None` picks one from the system clock
    pub seed: Option<u64>,
    /// Stop after this many frames (headless demo); `None` runs until quit
    pub max_frames: Option<u64>,
    /// Let the autopilot drive the hero
    pub idle_mode: bool,
    /// Draw the health/souls text overlay
    pub show_hud: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "Shadow Fiend Simulator (Squares)".to_string(),
            tick_hz: TICK_HZ,
            seed: None,
            max_frames: Some(60 * TICK_HZ as u64),
            idle_mode: true,
            show_hud: true,
        }
    }
}

impl Settings {
    /// Parse settings from JSON (missing fields fall back to defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let settings: Settings = serde_json::from_str(json)?;
        if settings.tick_hz == 0 {
            return Err(TuningError::Invalid {
                field: "tick_hz",
                reason: "must be non-zero".to_string(),
            });
        }
        Ok(settings)
    }

    /// Seed to use for this run
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}
