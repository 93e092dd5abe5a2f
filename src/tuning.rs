//! Game balance values
//!
//! Every number the simulation consults lives here. Defaults reproduce the
//! classic feel; a JSON document may override any subset of fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Errors raised while loading tuning or settings
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl TuningError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Balance table for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,
    /// Creeps never spawn closer than this to the arena edge
    pub spawn_margin: f32,
    /// Creeps present when the world is created
    pub initial_creeps: u32,
    /// Milliseconds between creep spawns
    pub spawn_interval_ms: u32,

    // === Shared combat ===
    /// Frames an attacker waits after a basic attack
    pub attack_cooldown_ticks: u32,

    // === Hero ===
    pub hero_size: f32,
    pub hero_speed: f32,
    pub hero_health: i32,
    pub hero_attack_damage: i32,
    /// Target is considered reached inside this distance
    pub arrival_epsilon: f32,
    pub max_souls: u32,
    pub souls_per_kill: u32,

    // === Creep ===
    pub creep_size: f32,
    pub creep_speed: f32,
    pub creep_health: i32,
    pub creep_attack_damage: i32,
    /// Creeps melee when closer than this (center to center)
    pub melee_range: f32,

    // === Shadow raze ===
    /// Cast distances for the near / mid / far raze
    pub raze_ranges: [f32; 3],
    pub raze_radius: f32,
    pub raze_damage: i32,
    pub raze_effect_radius: f32,

    // === Requiem ===
    pub requiem_cost: u32,
    pub requiem_radius: f32,
    pub requiem_damage: i32,

    // === Raze burst ===
    pub burst_directions: u32,
    pub burst_length: f32,
    pub burst_damage: i32,
    pub burst_line_width: f32,

    /// Lifespan of every ability effect, in frames
    pub effect_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            spawn_margin: 50.0,
            initial_creeps: 5,
            spawn_interval_ms: 2000,

            attack_cooldown_ticks: 30,

            hero_size: 30.0,
            hero_speed: 4.0,
            hero_health: 100,
            hero_attack_damage: 10,
            arrival_epsilon: 5.0,
            max_souls: 30,
            souls_per_kill: 1,

            creep_size: 20.0,
            creep_speed: 1.5,
            creep_health: 30,
            creep_attack_damage: 5,
            melee_range: 45.0,

            raze_ranges: [50.0, 100.0, 200.0],
            raze_radius: 30.0,
            raze_damage: 20,
            raze_effect_radius: 10.0,

            requiem_cost: 20,
            requiem_radius: 150.0,
            requiem_damage: 30,

            burst_directions: 8,
            burst_length: 500.0,
            burst_damage: 20,
            burst_line_width: 5.0,

            effect_ticks: 20,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.arena_width > 0.0 && self.arena_height > 0.0) {
            return Err(TuningError::invalid("arena_width", "arena must have a positive size"));
        }
        if self.spawn_margin < 0.0
            || self.spawn_margin * 2.0 > self.arena_width
            || self.spawn_margin * 2.0 > self.arena_height
        {
            return Err(TuningError::invalid(
                "spawn_margin",
                format!(
                    "{} leaves no spawn area in a {}x{} arena",
                    self.spawn_margin, self.arena_width, self.arena_height
                ),
            ));
        }
        if self.spawn_interval_ms == 0 {
            return Err(TuningError::invalid("spawn_interval_ms", "must be non-zero"));
        }
        if self.attack_cooldown_ticks == 0 {
            return Err(TuningError::invalid("attack_cooldown_ticks", "must be non-zero"));
        }
        for (field, speed) in [("hero_speed", self.hero_speed), ("creep_speed", self.creep_speed)] {
            if !(speed > 0.0) {
                return Err(TuningError::invalid(field, format!("speed {speed} must be positive")));
            }
        }
        for (field, size) in [("hero_size", self.hero_size), ("creep_size", self.creep_size)] {
            if !(size > 0.0) {
                return Err(TuningError::invalid(field, format!("size {size} must be positive")));
            }
        }
        if self.hero_health <= 0 || self.creep_health <= 0 {
            return Err(TuningError::invalid("hero_health", "starting health must be positive"));
        }
        if self.requiem_cost > self.max_souls {
            return Err(TuningError::invalid(
                "requiem_cost",
                format!("cost {} exceeds max_souls {}", self.requiem_cost, self.max_souls),
            ));
        }
        if self.burst_directions == 0 {
            return Err(TuningError::invalid("burst_directions", "must be non-zero"));
        }
        if self.effect_ticks == 0 {
            return Err(TuningError::invalid("effect_ticks", "must be non-zero"));
        }
        Ok(())
    }
}
