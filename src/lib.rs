//! Fiend Arena - a real-time arena arcade game
//!
//! Core modules:
//! - `sim`: Frame-locked simulation (movement, combat, abilities, spawning)
//! - `renderer`: Drawing collaborator and primitive tessellation
//! - `platform`: Input events and frame clocks
//! - `tuning`: Data-driven game balance
//! - `settings`: Shell settings for the native loop

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (frames per second). Movement is frame-locked.
    pub const TICK_HZ: u32 = 60;
    /// Milliseconds per frame at the fixed rate
    pub const FRAME_MS: u32 = 1000 / TICK_HZ;

    /// Arena dimensions (matches the window size)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// HUD text positions
    pub const HUD_HEALTH_POS: (f32, f32) = (10.0, 10.0);
    pub const HUD_SOULS_POS: (f32, f32) = (10.0, 30.0);
}

/// Unit heading from `from` toward `to`.
///
/// Uses `atan2`, so a zero offset heads along +x instead of producing NaN.
#[inline]
pub fn heading(from: Vec2, to: Vec2) -> Vec2 {
    let d = to - from;
    Vec2::from_angle(d.y.atan2(d.x))
}

/// Convert polar (r, theta) to cartesian offset (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
